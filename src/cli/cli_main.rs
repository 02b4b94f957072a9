use super::cli_calculations::calculations_menu;
use super::cli_database::database_menu;
use super::display::{composition_table, matrix_table, render_equation, subscript_formula};
use crate::Database::chem_database::ChemDatabase;
use crate::Formula::equation_balancer::{balance, split_equation, stoichiometry_matrix};
use crate::Formula::molmass::{mass_composition, molar_mass};
use crate::Ions::ionic_compound::{IonicCompound, combine_ions};
use crate::Ions::solubility::classify_solubility;
use crate::chem_errors::ChemError;
use crate::library_manager::{with_library_manager, with_library_manager_mut};
use log::error;
use std::io::{self, Write};

pub fn run_interactive_menu() {
    let mut db = match ChemDatabase::from_config() {
        Ok(db) => db,
        Err(e) => {
            error!("cannot load the configured data files: {}", e);
            match ChemDatabase::canonical() {
                Ok(db) => db,
                Err(e) => {
                    println!("\x1b[31mBundled data is unreadable: {}\x1b[0m", e);
                    return;
                }
            }
        }
    };
    loop {
        show_main_menu();
        let Some(choice) = get_user_input() else {
            break;
        };

        match choice.trim() {
            "1" => molar_mass_dialog(&db),
            "2" => balance_dialog(),
            "3" => combine_ions_dialog(&db),
            "4" => solubility_dialog(),
            "5" => database_menu(&mut db),
            "6" => calculations_menu(&db),
            "7" => settings_menu(&mut db),
            "0" => {
                println!("Goodbye!");
                break;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }
}
/* colors
Blue (\x1b[34m) - Welcome header text

Yellow (\x1b[33m) - Menu options

Cyan (\x1b[36m) - prompts

Green (\x1b[32m) / Red (\x1b[31m) - results and errors

Reset (\x1b[0m) - Returns to normal color after each colored section
*/
fn show_main_menu() {
    println!(
        "\x1b[34m\n Welcome to ChemBot: element and ion data, molar masses,\n
    equation balancing, solubility and stoichiometry \n \x1b[0m"
    );
    println!("\x1b[33m1. Molar mass and composition\x1b[0m");
    println!("\x1b[33m2. Balance an equation\x1b[0m");
    println!("\x1b[33m3. Combine ions\x1b[0m");
    println!("\x1b[33m4. Solubility\x1b[0m");
    println!("\x1b[33m5. Database\x1b[0m");
    println!("\x1b[33m6. Calculations\x1b[0m");
    println!("\x1b[33m7. Data files\x1b[0m");
    println!("\x1b[33m0. Exit\x1b[0m");
    print!("\x1b[36mEnter your choice: \x1b[0m");
    flush();
}

pub(crate) fn flush() {
    // a closed stdout only loses the prompt
    let _ = io::stdout().flush();
}

/// One line from stdin, `None` at end of input.
pub(crate) fn get_user_input() -> Option<String> {
    let mut input = String::new();
    match io::stdin().read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input),
    }
}

/// Prints the prompt and reads the trimmed answer.
pub(crate) fn ask(prompt: &str) -> Option<String> {
    print!("\x1b[36m{}: \x1b[0m", prompt);
    flush();
    get_user_input().map(|s| s.trim().to_string())
}

pub(crate) fn print_error(e: &ChemError) {
    println!("\x1b[31m{}\x1b[0m", e);
}

fn molar_mass_dialog(db: &ChemDatabase) {
    let Some(formula) = ask("Formula") else { return };
    match molar_mass(&formula, db).and_then(|m| Ok((m, mass_composition(&formula, db)?))) {
        Ok((mass, shares)) => {
            println!(
                "\x1b[32mM({}) = {:.2} g/mol\x1b[0m",
                subscript_formula(&formula),
                mass
            );
            composition_table(&shares).printstd();
        }
        Err(e) => print_error(&e),
    }
}

fn balance_dialog() {
    let Some(equation) = ask("Equation (e.g. C6H12O6 + O2 = CO2 + H2O)") else {
        return;
    };
    match balance(&equation) {
        Ok(balanced) => println!("\x1b[32m{}\x1b[0m", render_equation(&balanced)),
        Err(e) => {
            print_error(&e);
            if let (Ok((reactants, products)), Ok(matrix)) =
                (split_equation(&equation), stoichiometry_matrix(&equation))
            {
                let terms: Vec<String> = reactants.into_iter().chain(products).collect();
                println!("Element balance of the terms:");
                matrix_table(&matrix, &terms).printstd();
            }
        }
    }
}

fn solubility_word(soluble: bool) -> &'static str {
    if soluble { "soluble" } else { "insoluble" }
}

fn combine_ions_dialog(db: &ChemDatabase) {
    let Some(pos) = ask("Positive ion") else { return };
    let Some(neg) = ask("Negative ion") else { return };
    match combine_ions(&pos, &neg, db) {
        IonicCompound::Known { formula, soluble } => println!(
            "\x1b[32m{} + {} -> {} ({} in water)\x1b[0m",
            pos,
            neg,
            subscript_formula(&formula),
            solubility_word(soluble)
        ),
        IonicCompound::FormulaUnknown { soluble } => println!(
            "\x1b[33mThe charge of {} or {} is not known, the compound is {} in water\x1b[0m",
            pos,
            neg,
            solubility_word(soluble)
        ),
        IonicCompound::AllUnknown { soluble } => println!(
            "\x1b[31m{} or {} is neither an element nor a known ion, by the rules the compound is {} in water\x1b[0m",
            pos,
            neg,
            solubility_word(soluble)
        ),
    }
}

fn solubility_dialog() {
    let Some(pos) = ask("Positive ion") else { return };
    let Some(neg) = ask("Negative ion") else { return };
    let (soluble, rule) = classify_solubility(&pos, &neg);
    println!(
        "\x1b[32m{} + {}: {} ({})\x1b[0m",
        pos,
        neg,
        solubility_word(soluble),
        rule.description()
    );
}

fn settings_menu(db: &mut ChemDatabase) {
    loop {
        let (elements, ions, file) = with_library_manager(|manager| {
            (
                manager.elements_base_path().to_string(),
                manager.ions_base_path().to_string(),
                manager.config_file().to_string(),
            )
        });
        println!("\n=== Data files ({}) ===", file);
        println!("elements: {}", elements);
        println!("ions:     {}", ions);
        println!("1. Set element table file");
        println!("2. Set ion table file");
        println!("3. Reset to defaults");
        println!("0. Back to main menu");
        print!("Enter your choice: ");
        flush();

        let Some(choice) = get_user_input() else { break };
        let result = match choice.trim() {
            "1" => ask("Path").map(|path| with_library_manager_mut(|m| m.set_elements_base(&path))),
            "2" => ask("Path").map(|path| with_library_manager_mut(|m| m.set_ions_base(&path))),
            "3" => Some(with_library_manager_mut(|m| m.reset_to_defaults())),
            "0" => break,
            _ => {
                println!("Invalid choice. Please try again.");
                None
            }
        };
        if let Some(result) = result {
            match result.and_then(|_| ChemDatabase::from_config()) {
                Ok(reloaded) => {
                    *db = reloaded;
                    println!(
                        "\x1b[32mLoaded {} elements and {} ions\x1b[0m",
                        db.element_count(),
                        db.ion_count()
                    );
                }
                Err(e) => print_error(&e),
            }
        }
    }
}
