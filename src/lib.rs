/// eng
/// ChemBot: a toolkit for everyday chemistry calculations.
/// 1) parsing of chemical formulae and their molar mass and composition
/// 2) balancing of chemical equations with exact rational arithmetic
/// 3) formulae and water solubility of ionic compounds
/// 4) unit conversion, ideal gas and stoichiometry calculations
/// The calculations use the element and ion tables only through the
/// `ChemLookup` trait, the bundled JSON data is one implementation of it.
#[allow(non_snake_case)]
pub mod Calculations;
#[allow(non_snake_case)]
pub mod Database;
#[allow(non_snake_case)]
pub mod Formula;
#[allow(non_snake_case)]
pub mod Ions;
pub mod chem_errors;
pub mod cli;
pub mod library_manager;
