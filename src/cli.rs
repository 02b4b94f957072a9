/// Interactive terminal menu: the main loop and the dialogs of the core operations
pub mod cli_main;
/// Database submenu: lookup, listing, insertion and deletion of ions
pub mod cli_database;
/// Calculations submenu: unit conversion, moles, ideal gas and reaction stoichiometry
pub mod cli_calculations;
/// Subscript rendering and tables
pub mod display;
