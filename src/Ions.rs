/// Neutral compound formula from a positive and a negative ion
pub mod ionic_compound;
/// Water solubility from the fixed table of cation/anion rules
pub mod solubility;
