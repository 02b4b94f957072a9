use super::cli_main::{ask, flush, get_user_input, print_error};
use super::display::{ion_table, lookup_table};
use crate::Database::chem_database::ChemDatabase;
use crate::chem_errors::ChemError;
use std::path::Path;

pub fn database_menu(db: &mut ChemDatabase) {
    loop {
        println!("\n=== Database ===");
        println!("1. Look up an element or ion");
        println!("2. List ions");
        println!("3. Add an ion");
        println!("4. Delete an ion (* restores the bundled ions)");
        println!("5. Save ions to file");
        println!("0. Back to main menu");
        print!("Enter your choice: ");
        flush();

        let Some(choice) = get_user_input() else { break };
        match choice.trim() {
            "1" => lookup_dialog(db),
            "2" => ion_table(&db.ions()).printstd(),
            "3" => insert_dialog(db),
            "4" => delete_dialog(db),
            "5" => save_dialog(db),
            "0" => break,
            _ => println!("Invalid choice. Please try again."),
        }
    }
}

fn lookup_dialog(db: &ChemDatabase) {
    let Some(query) = ask("Symbol, formula or name") else { return };
    match db.find(&query) {
        Some(hit) => lookup_table(&hit).printstd(),
        None => println!("\x1b[33mNo data found for {}\x1b[0m", query),
    }
}

fn insert_dialog(db: &mut ChemDatabase) {
    let Some(name) = ask("Name") else { return };
    let Some(formula) = ask("Formula") else { return };
    let Some(charge) = ask("Charge (e.g. -2)") else { return };
    let charge = match charge.trim_start_matches('+').parse::<i64>() {
        Ok(charge) if charge != 0 => charge,
        _ => {
            print_error(&ChemError::Parse(format!("invalid charge {}", charge)));
            return;
        }
    };
    match db.insert_ion(&name, &formula, charge) {
        Ok(record) => println!(
            "\x1b[32mAdded {} ({}), {:.2} g/mol\x1b[0m",
            record.formula, record.name, record.molar_mass
        ),
        Err(e) => print_error(&e),
    }
}

fn delete_dialog(db: &mut ChemDatabase) {
    let Some(formula) = ask("Formula") else { return };
    match db.delete_ion(&formula) {
        Ok(true) if formula == "*" => println!("\x1b[32mIon table restored\x1b[0m"),
        Ok(true) => println!("\x1b[32mDeleted {}\x1b[0m", formula),
        Ok(false) => println!("\x1b[33mNo ion {} stored\x1b[0m", formula),
        Err(e) => print_error(&e),
    }
}

fn save_dialog(db: &ChemDatabase) {
    let Some(path) = ask("File") else { return };
    match db.save_ions(Path::new(&path)) {
        Ok(()) => println!("\x1b[32m{} ions written to {}\x1b[0m", db.ion_count(), path),
        Err(e) => print_error(&e),
    }
}
