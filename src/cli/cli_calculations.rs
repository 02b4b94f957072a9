use super::cli_main::{ask, flush, get_user_input, print_error};
use super::display::subscript_formula;
use crate::Calculations::stoichiometry::{
    GasQuery, ideal_gas, mass_from_moles, moles_from_mass, stoichiometric_ratio,
};
use crate::Calculations::units::{AmountUnit, MassUnit, Unit, parse_quantity};
use crate::Database::chem_database::ChemDatabase;
use crate::chem_errors::ChemError;

pub fn calculations_menu(db: &ChemDatabase) {
    loop {
        println!("\n=== Calculations ===");
        println!("1. Convert units");
        println!("2. Moles <-> grams");
        println!("3. Ideal gas (PV = nRT)");
        println!("4. Stoichiometry of a reaction");
        println!("0. Back to main menu");
        print!("Enter your choice: ");
        flush();

        let Some(choice) = get_user_input() else { break };
        let result = match choice.trim() {
            "1" => convert_dialog(),
            "2" => moles_dialog(db),
            "3" => gas_dialog(),
            "4" => stoichiometry_dialog(db),
            "0" => break,
            _ => {
                println!("Invalid choice. Please try again.");
                Ok(())
            }
        };
        if let Err(e) = result {
            print_error(&e);
        }
    }
}

fn answer(prompt: &str) -> Result<String, ChemError> {
    ask(prompt).ok_or_else(|| ChemError::Parse("input closed".to_string()))
}

fn convert_dialog() -> Result<(), ChemError> {
    let quantity = answer("Quantity (e.g. 10 kg)")?;
    let target = answer("Target unit")?;
    let quantity = parse_quantity(&quantity)?;
    let converted = quantity.to_unit(target.parse::<Unit>()?)?;
    println!("\x1b[32m{} = {:.4} {}\x1b[0m", quantity, converted.value, converted.unit);
    Ok(())
}

fn moles_dialog(db: &ChemDatabase) -> Result<(), ChemError> {
    let formula = answer("Formula")?;
    let quantity = parse_quantity(&answer("Amount (e.g. 36 g or 2 mol)")?)?;
    match quantity.unit {
        Unit::Mass(_) => {
            let grams = quantity.to_unit(Unit::Mass(MassUnit::Gram))?.value;
            let moles = moles_from_mass(&formula, grams, db)?;
            println!("\x1b[32m{} of {} = {:.2} mol\x1b[0m", quantity, subscript_formula(&formula), moles);
        }
        Unit::Amount(_) => {
            let moles = quantity.to_unit(Unit::Amount(AmountUnit::Mole))?.value;
            let grams = mass_from_moles(&formula, moles, db)?;
            println!("\x1b[32m{} of {} = {:.2} g\x1b[0m", quantity, subscript_formula(&formula), grams);
        }
        other => {
            return Err(ChemError::IncompatibleUnits(
                other.to_string(),
                "g or mol".to_string(),
            ));
        }
    }
    Ok(())
}

fn gas_dialog() -> Result<(), ChemError> {
    let line = answer("Three of pressure, volume, moles, temperature (e.g. 1 atm, 22.4 L, 273.15 K)")?;
    let mut query = GasQuery::new();
    for part in line.split(',').filter(|p| !p.trim().is_empty()) {
        query.set_quantity(&parse_quantity(part)?)?;
    }
    let solution = ideal_gas(&query)?;
    println!(
        "\x1b[32m{:?} = {:.2} {}\x1b[0m",
        solution.variable,
        solution.value,
        solution.variable.unit()
    );
    Ok(())
}

fn stoichiometry_dialog(db: &ChemDatabase) -> Result<(), ChemError> {
    let equation = answer("Equation")?;
    let known = answer("Known substance")?;
    let amount = parse_quantity(&answer("Its amount (e.g. 2 mol or 64 g)")?)?;
    let target = answer("Target substance")?;
    let known_moles = match amount.unit {
        Unit::Amount(_) => amount.to_unit(Unit::Amount(AmountUnit::Mole))?.value,
        Unit::Mass(_) => {
            let grams = amount.to_unit(Unit::Mass(MassUnit::Gram))?.value;
            moles_from_mass(&known, grams, db)?
        }
        other => {
            return Err(ChemError::IncompatibleUnits(
                other.to_string(),
                "g or mol".to_string(),
            ));
        }
    };
    let result = stoichiometric_ratio(&equation, &known, known_moles, &target, db)?;
    println!("{}", result.equation);
    println!(
        "\x1b[32m{} : {:.2} mol, {:.2} g\x1b[0m",
        subscript_formula(&result.target),
        result.moles,
        result.grams
    );
    Ok(())
}
