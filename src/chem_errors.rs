use crate::Database::lookup::IonRecord;
use thiserror::Error;

/// Common error type of the crate. Lookup misses are not errors: the lookup
/// tables return `None` and callers decide what "no data" means for them.
#[derive(Debug, Error)]
pub enum ChemError {
    #[error("Malformed formula or equation: {0}")]
    Parse(String),

    #[error("Invalid formula: {0}")]
    InvalidFormula(String),

    #[error("Equation cannot be balanced: {0}")]
    Unbalanceable(String),

    #[error("No data found for {0}")]
    NotFound(String),

    #[error("Ion {} is already stored as {} (charge {})", .0.formula, .0.name, .0.charge)]
    DuplicateKey(Box<IonRecord>),

    #[error("Unknown unit: {0}")]
    UnknownUnit(String),

    #[error("Cannot convert {0} into {1}")]
    IncompatibleUnits(String, String),

    #[error("Substance {0} is not a term of the equation")]
    NotInEquation(String),

    #[error("Gas law query cannot be solved: {0}")]
    MissingQuantity(&'static str),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}
