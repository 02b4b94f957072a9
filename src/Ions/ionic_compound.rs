//! Combination of a positive and a negative ion into a neutral compound.
//!
//! The subscripts are the absolute charges crossed over and divided by their
//! greatest common divisor: Ca(2+) and PO4(3-) give Ca3(PO4)2. Polyatomic ions
//! get parentheses only when their subscript is greater than 1.
use crate::Database::lookup::ChemLookup;
use crate::Ions::solubility::test_solubility;
use log::{debug, warn};
use num_integer::Integer;

/// Outcome of combining two ions.
#[derive(Debug, Clone, PartialEq)]
pub enum IonicCompound {
    /// formula and water solubility
    Known { formula: String, soluble: bool },
    /// both ions exist but at least one has no single known charge
    FormulaUnknown { soluble: bool },
    /// at least one identifier is neither an element nor an ion of the
    /// database; the solubility rules work on the identifiers alone
    AllUnknown { soluble: bool },
}

impl IonicCompound {
    pub fn formula(&self) -> Option<&str> {
        match self {
            IonicCompound::Known { formula, .. } => Some(formula),
            _ => None,
        }
    }

    pub fn soluble(&self) -> bool {
        match self {
            IonicCompound::Known { soluble, .. }
            | IonicCompound::FormulaUnknown { soluble }
            | IonicCompound::AllUnknown { soluble } => *soluble,
        }
    }
}

/// true if the identifier is an element symbol or an ion formula of the database
pub fn is_known_species(ion: &str, lookup: &dyn ChemLookup) -> bool {
    lookup.get_element(ion).is_some() || lookup.get_ion(ion).is_some()
}

/// Charge of an ion: the element table is consulted first, then the ion
/// table. Elements with several common charges ("+2,+3") or none have no
/// usable charge.
pub fn ion_charge(ion: &str, lookup: &dyn ChemLookup) -> Option<i64> {
    lookup
        .get_element(ion)
        .and_then(|element| element.charge_value())
        .or_else(|| lookup.get_ion(ion).map(|record| record.charge))
        .filter(|&charge| charge != 0)
}

/// Polyatomic ions need parentheses when they get a subscript: anything longer
/// than two characters, two capitals ("OH", "CN") or an ion with a digit ("Hg2").
pub fn is_polyatomic(ion: &str) -> bool {
    let chars: Vec<char> = ion.chars().collect();
    chars.len() > 2
        || (chars.len() == 2 && chars.iter().all(|c| c.is_ascii_uppercase()))
        || chars.iter().any(|c| c.is_ascii_digit())
}

fn with_subscript(ion: &str, count: i64) -> String {
    match (count, is_polyatomic(ion)) {
        (1, _) => ion.to_string(),
        (n, true) => format!("({}){}", ion, n),
        (n, false) => format!("{}{}", ion, n),
    }
}

/// Formula of the neutral compound for two charges, `None` unless the first
/// charge is positive and the second one negative.
pub fn build_formula(pos_ion: &str, pos_charge: i64, neg_ion: &str, neg_charge: i64) -> Option<String> {
    if pos_charge <= 0 || neg_charge >= 0 {
        return None;
    }
    let neg_charge = -neg_charge;
    let common = pos_charge.gcd(&neg_charge);
    Some(format!(
        "{}{}",
        with_subscript(pos_ion, neg_charge / common),
        with_subscript(neg_ion, pos_charge / common)
    ))
}

/// Combines a positive and a negative ion, e.g. `combine_ions("Na", "SO4", &db)`
/// gives `Known { formula: "Na2SO4", soluble: true }`.
pub fn combine_ions(pos_ion: &str, neg_ion: &str, lookup: &dyn ChemLookup) -> IonicCompound {
    let (pos_ion, neg_ion) = (pos_ion.trim(), neg_ion.trim());
    let soluble = test_solubility(pos_ion, neg_ion);
    if !is_known_species(pos_ion, lookup) || !is_known_species(neg_ion, lookup) {
        warn!("unknown ion in {} + {}", pos_ion, neg_ion);
        return IonicCompound::AllUnknown { soluble };
    }
    let formula = match (ion_charge(pos_ion, lookup), ion_charge(neg_ion, lookup)) {
        (Some(pos_charge), Some(neg_charge)) => build_formula(pos_ion, pos_charge, neg_ion, neg_charge),
        _ => None,
    };
    debug!("{} + {}: formula {:?}, soluble {}", pos_ion, neg_ion, formula, soluble);
    match formula {
        Some(formula) => IonicCompound::Known { formula, soluble },
        None => IonicCompound::FormulaUnknown { soluble },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database::chem_database::ChemDatabase;

    fn known(formula: &str, soluble: bool) -> IonicCompound {
        IonicCompound::Known {
            formula: formula.to_string(),
            soluble,
        }
    }

    #[test]
    fn test_combine_common_ions() {
        let db = ChemDatabase::canonical().unwrap();
        assert_eq!(combine_ions("Na", "SO4", &db), known("Na2SO4", true));
        assert_eq!(combine_ions("Ca", "PO4", &db), known("Ca3(PO4)2", false));
        assert_eq!(combine_ions("Al", "SO4", &db), known("Al2(SO4)3", true));
        assert_eq!(combine_ions("NH4", "SO4", &db), known("(NH4)2SO4", true));
        assert_eq!(combine_ions("Na", "Cl", &db), known("NaCl", true));
        assert_eq!(combine_ions("Mg", "O", &db), known("MgO", false));
        assert_eq!(combine_ions("Ca", "OH", &db), known("Ca(OH)2", false));
        assert_eq!(combine_ions("Ag", "NO3", &db), known("AgNO3", true));
        assert_eq!(combine_ions("Hg2", "Cl", &db), known("Hg2Cl2", false));
        assert_eq!(combine_ions(" K ", " I ", &db), known("KI", true));
    }

    #[test]
    fn test_unknown_charge_or_ion() {
        let db = ChemDatabase::canonical().unwrap();
        // iron has two common charges
        let compound = combine_ions("Fe", "Cl", &db);
        assert_eq!(compound, IonicCompound::FormulaUnknown { soluble: true });
        assert_eq!(compound.formula(), None);
        assert!(compound.soluble());

        // the solubility rules still decide for identifiers outside the database
        assert_eq!(combine_ions("Qq", "Cl", &db), IonicCompound::AllUnknown { soluble: true });
        assert_eq!(combine_ions("Qq", "CO3", &db), IonicCompound::AllUnknown { soluble: false });
        assert_eq!(combine_ions("Na", "XyZ", &db), IonicCompound::AllUnknown { soluble: true });
        assert_eq!(combine_ions("Qq", "Cl", &db).formula(), None);
    }

    #[test]
    fn test_charges_of_the_wrong_sign() {
        let db = ChemDatabase::canonical().unwrap();
        // two cations, two anions, or the ions swapped
        assert_eq!(combine_ions("Na", "Na", &db), IonicCompound::FormulaUnknown { soluble: true });
        assert_eq!(combine_ions("Cl", "O", &db), IonicCompound::FormulaUnknown { soluble: false });
        assert_eq!(combine_ions("Cl", "Na", &db).formula(), None);
    }

    #[test]
    fn test_ion_charge_lookup_order() {
        let db = ChemDatabase::canonical().unwrap();
        assert_eq!(ion_charge("Na", &db), Some(1));
        assert_eq!(ion_charge("O", &db), Some(-2));
        assert_eq!(ion_charge("PO4", &db), Some(-3));
        assert_eq!(ion_charge("Hg2", &db), Some(2));
        assert_eq!(ion_charge("Fe", &db), None);
        assert_eq!(ion_charge("He", &db), None);
    }

    #[test]
    fn test_polyatomic_heuristic() {
        for ion in ["SO4", "OH", "CN", "NH4", "Hg2", "O2"] {
            assert!(is_polyatomic(ion), "{}", ion);
        }
        for ion in ["Na", "Cl", "O", "F"] {
            assert!(!is_polyatomic(ion), "{}", ion);
        }
    }

    #[test]
    fn test_build_formula() {
        assert_eq!(build_formula("Fe", 3, "O", -2).as_deref(), Some("Fe2O3"));
        assert_eq!(build_formula("Pb", 4, "O", -2).as_deref(), Some("PbO2"));
        assert_eq!(build_formula("Na", 1, "O2", -2).as_deref(), Some("Na2O2"));
        assert_eq!(build_formula("Ba", 2, "OH", -1).as_deref(), Some("Ba(OH)2"));
        assert_eq!(build_formula("Na", 0, "Cl", -1), None);
        assert_eq!(build_formula("Na", 1, "Na", 1), None);
        assert_eq!(build_formula("Cl", -1, "Na", 1), None);
        assert_eq!(build_formula("Cl", -1, "O", -2), None);
    }
}
