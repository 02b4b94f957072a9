//! Water solubility of an ionic compound from the fixed table of solubility rules.
//!
//! Rules are checked in order and the first match decides. Only the ion
//! identifiers are used, so the classification works even when the charges of
//! the ions are unknown.

/// pairs that are soluble although a later rule says otherwise
const SOLUBLE_EXCEPTIONS: [(&str, &str); 2] = [("Co", "IO3"), ("Fe", "OOCCOO")];
/// pairs that are insoluble although a later rule says otherwise
const INSOLUBLE_EXCEPTIONS: [(&str, &str); 4] = [
    ("Rb", "ClO4"),
    ("Cs", "ClO4"),
    ("Ag", "CH3COO"),
    ("Hg2", "CH3COO"),
];
const INSOLUBLE_FLUORIDES: [&str; 8] = ["Li", "Mg", "Ca", "Sr", "Ba", "Fe", "Hg2", "Pb"];
const HALIDES: [&str; 3] = ["Cl", "Br", "I"];
const INSOLUBLE_HALIDES: [&str; 5] = ["Cu", "Ag", "Hg2", "Pb", "Tl"];
const INSOLUBLE_SULFATES: [&str; 7] = ["Ca", "Sr", "Ba", "Ag", "Hg2", "Pb", "Ra"];
const SOLUBLE_CATIONS: [&str; 7] = ["Li", "Na", "K", "Rb", "Cs", "Fr", "NH4"];
const SOLUBLE_ANIONS: [&str; 4] = ["ClO3", "ClO4", "NO3", "CH3COO"];

/// Which rule of the table decided the outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolubilityRule {
    SolubleException,
    InsolubleException,
    Fluoride,
    Halide,
    Sulfate,
    AlwaysSoluble,
    Otherwise,
}

impl SolubilityRule {
    pub fn description(&self) -> &'static str {
        match self {
            SolubilityRule::SolubleException => "listed soluble exception",
            SolubilityRule::InsolubleException => "listed insoluble exception",
            SolubilityRule::Fluoride => "fluoride rule",
            SolubilityRule::Halide => "chloride, bromide and iodide rule",
            SolubilityRule::Sulfate => "sulfate rule",
            SolubilityRule::AlwaysSoluble => "alkali metal, ammonium, nitrate, chlorate, perchlorate and acetate rule",
            SolubilityRule::Otherwise => "all other compounds are insoluble",
        }
    }
}

/// Returns the solubility together with the rule that decided it.
pub fn classify_solubility(pos_ion: &str, neg_ion: &str) -> (bool, SolubilityRule) {
    let (pos, neg) = (pos_ion.trim(), neg_ion.trim());
    if SOLUBLE_EXCEPTIONS.contains(&(pos, neg)) {
        return (true, SolubilityRule::SolubleException);
    }
    if INSOLUBLE_EXCEPTIONS.contains(&(pos, neg)) {
        return (false, SolubilityRule::InsolubleException);
    }
    if neg == "F" {
        return (!INSOLUBLE_FLUORIDES.contains(&pos), SolubilityRule::Fluoride);
    }
    if HALIDES.contains(&neg) {
        return (!INSOLUBLE_HALIDES.contains(&pos), SolubilityRule::Halide);
    }
    if neg == "SO4" {
        return (!INSOLUBLE_SULFATES.contains(&pos), SolubilityRule::Sulfate);
    }
    if SOLUBLE_CATIONS.contains(&pos) || SOLUBLE_ANIONS.contains(&neg) {
        return (true, SolubilityRule::AlwaysSoluble);
    }
    (false, SolubilityRule::Otherwise)
}

/// true if the compound of the two ions is soluble in water
pub fn test_solubility(pos_ion: &str, neg_ion: &str) -> bool {
    classify_solubility(pos_ion, neg_ion).0
}
