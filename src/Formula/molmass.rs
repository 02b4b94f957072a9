use crate::Database::lookup::ChemLookup;
use crate::Formula::formula_parser::{FormulaNode, merge_counts, parse_formula, parse_formula_tree};
use crate::chem_errors::ChemError;
use log::{debug, warn};
/// Module to calculate the molar mass and mass composition of a chemical formula
/// using the element lookup table.
///
/// Bracket groups are evaluated on their own and then multiplied by the number
/// after the closing bracket, so (NH4)2SO4 = 2*M(NH4) + M(SO4).
/// Results are rounded to `DECIMAL_PLACES`.
pub const DECIMAL_PLACES: i32 = 2;

pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// molar mass of a single element, g/mol
pub fn element_mass(symbol: &str, lookup: &dyn ChemLookup) -> Result<f64, ChemError> {
    let Some(element) = lookup.get_element(symbol) else {
        warn!("element {} not found in the lookup table", symbol);
        return Err(ChemError::InvalidFormula(format!("unknown element symbol {}", symbol)));
    };
    element.molar_mass_value().ok_or_else(|| {
        ChemError::InvalidFormula(format!(
            "element {} has no numeric molar mass ({})",
            symbol, element.molar_mass
        ))
    })
}

fn nodes_mass(nodes: &[FormulaNode], lookup: &dyn ChemLookup) -> Result<f64, ChemError> {
    let mut total = 0.0;
    for node in nodes {
        match node {
            FormulaNode::Element { symbol, count } => {
                total += element_mass(symbol, lookup)? * *count as f64;
            }
            FormulaNode::Group { items, multiplier } => {
                total += nodes_mass(items, lookup)? * *multiplier as f64;
            }
        }
    }
    Ok(total)
}

/// Calculates the molar mass (g/mol) of a formula, rounded to 2 decimal places.
/// Fails with `InvalidFormula` if any symbol is missing from the lookup table.
pub fn molar_mass(formula: &str, lookup: &dyn ChemLookup) -> Result<f64, ChemError> {
    let tree = parse_formula_tree(formula)?;
    let mass = nodes_mass(&tree, lookup)?;
    debug!("molar mass of {}: {}", formula, mass);
    Ok(round_to(mass, DECIMAL_PLACES))
}

// Function to calculate the molar mass of a vector of chemical formulas
pub fn molar_mass_of_vector(
    vec_of_formulae: &[&str],
    lookup: &dyn ChemLookup,
) -> Result<Vec<f64>, ChemError> {
    vec_of_formulae
        .iter()
        .map(|formula| molar_mass(formula, lookup))
        .collect()
}

/// Share of one element in a compound
#[derive(Debug, Clone, PartialEq)]
pub struct ElementShare {
    pub symbol: String,
    pub count: u64,
    pub mass: f64,
    /// mass percent, rounded
    pub percent: f64,
}

/// Atom counts and mass percentages of every element of the formula, in order
/// of first appearance.
pub fn mass_composition(
    formula: &str,
    lookup: &dyn ChemLookup,
) -> Result<Vec<ElementShare>, ChemError> {
    let counts = merge_counts(&parse_formula(formula)?);
    let mut shares = Vec::with_capacity(counts.len());
    let mut total = 0.0;
    for (symbol, count) in counts {
        let mass = element_mass(&symbol, lookup)? * count as f64;
        total += mass;
        shares.push(ElementShare {
            symbol,
            count,
            mass,
            percent: 0.0,
        });
    }
    if total > 0.0 {
        for share in shares.iter_mut() {
            share.percent = round_to(100.0 * share.mass / total, DECIMAL_PLACES);
            share.mass = round_to(share.mass, DECIMAL_PLACES);
        }
    }
    Ok(shares)
}
