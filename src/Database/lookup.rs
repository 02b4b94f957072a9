//! Records of the element and ion tables and the lookup trait the calculations
//! are written against. Any storage that can answer "give me this symbol" and
//! "give me this ion" can back the molar mass, balancing and solubility code.
use serde::{Deserialize, Serialize};

/// One row of the periodic table as it is stored in `elements.json`.
///
/// `molar_mass` is kept as text: unstable elements carry their mass number in
/// parentheses, e.g. `"(98)"` for technetium. `charge` is text as well because
/// many elements have several common charges (`"+2,+3"`) or none at all (`""`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementRecord {
    pub symbol: String,
    pub name: String,
    pub atomic_number: u32,
    pub molar_mass: String,
    #[serde(default)]
    pub charge: String,
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub electronegativity: String,
    #[serde(default)]
    pub state: String,
}

impl ElementRecord {
    /// molar mass with the "approximate value" brackets stripped
    pub fn molar_mass_value(&self) -> Option<f64> {
        self.molar_mass
            .trim()
            .trim_start_matches('(')
            .trim_end_matches(')')
            .trim()
            .parse::<f64>()
            .ok()
    }

    /// The single common ionic charge, if the element has exactly one.
    pub fn charge_value(&self) -> Option<i64> {
        let charge = self.charge.trim();
        charge
            .strip_prefix('+')
            .unwrap_or(charge)
            .parse::<i64>()
            .ok()
    }
}

/// Polyatomic (or otherwise non-elemental) ion, keyed by its case-sensitive formula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IonRecord {
    pub name: String,
    pub formula: String,
    pub charge: i64,
    #[serde(default)]
    pub molar_mass: f64,
}

/// Read access to the element and ion tables.
pub trait ChemLookup {
    fn get_element(&self, symbol: &str) -> Option<&ElementRecord>;
    fn get_ion(&self, formula: &str) -> Option<&IonRecord>;
}

/// Result of a free-form `+database <query>` request.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupHit<'a> {
    Element(&'a ElementRecord),
    Ion(&'a IonRecord),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(mass: &str, charge: &str) -> ElementRecord {
        ElementRecord {
            symbol: "Tc".to_string(),
            name: "Technetium".to_string(),
            atomic_number: 43,
            molar_mass: mass.to_string(),
            charge: charge.to_string(),
            group: "7".to_string(),
            electronegativity: "1.9".to_string(),
            state: "solid".to_string(),
        }
    }

    #[test]
    fn test_bracketed_molar_mass() {
        assert_eq!(record("(98)", "").molar_mass_value(), Some(98.0));
        assert_eq!(record(" 12.011 ", "").molar_mass_value(), Some(12.011));
        assert_eq!(record("unknown", "").molar_mass_value(), None);
    }

    #[test]
    fn test_charge_value() {
        assert_eq!(record("1", "+2").charge_value(), Some(2));
        assert_eq!(record("1", "-3").charge_value(), Some(-3));
        assert_eq!(record("1", "1").charge_value(), Some(1));
        assert_eq!(record("1", "+2,+3").charge_value(), None);
        assert_eq!(record("1", "").charge_value(), None);
    }
}
