/// Unit conversion across mass, volume, pressure, temperature and amount of substance
pub mod units;
/// eng
/// Quantity calculations built on molar masses and balanced equations:
/// 1) moles from grams and grams from moles
/// 2) the ideal gas law solved for the unknown variable
/// 3) amount of a product or reactant from the amount of another term of the reaction
pub mod stoichiometry;
