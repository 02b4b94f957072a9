//! Balancing of chemical equations written like "C6H12O6 + O2 = CO2 + H2O".
//!
//! Every term is parsed into its element composition and becomes one row of the
//! stoichiometry matrix (reactants positive, products negative, one column per
//! element in order of first appearance). Integer coefficients are the null
//! space of the transposed matrix, computed exactly over the rationals and
//! scaled by the LCM of the denominators.
//!
//! All the working data (element list, matrix rows) lives in a
//! `StoichiometryMatrix` created for one call, so concurrent balancing never
//! shares state.
use crate::Formula::formula_parser::{ParsedTerm, filter_phase_marks, parse_formula};
use crate::Formula::rational_matrix::{
    RationalMatrix, from_integer_rows, is_non_positive, null_space, to_integer_vector,
};
use crate::chem_errors::ChemError;
use log::{debug, info};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive, Zero};
use std::fmt;

pub const REACTANT_SEPARATOR: &str = " + ";
pub const SIDE_SEPARATOR: &str = " -> ";

#[derive(Debug, Clone, PartialEq)]
pub struct BalancedTerm {
    pub coefficient: u64,
    pub formula: String,
}

/// Balanced equation: the terms in input order with their coefficients.
#[derive(Debug, Clone, PartialEq)]
pub struct BalancedEquation {
    pub reactants: Vec<BalancedTerm>,
    pub products: Vec<BalancedTerm>,
}

impl BalancedEquation {
    /// Output tokens: coefficient (omitted when 1), formula and separators.
    /// Concatenated they give e.g. "2H2 + O2 -> 2H2O".
    pub fn tokens(&self) -> Vec<String> {
        fn push_side(side: &[BalancedTerm], tokens: &mut Vec<String>) {
            for (i, term) in side.iter().enumerate() {
                if i > 0 {
                    tokens.push(REACTANT_SEPARATOR.to_string());
                }
                if term.coefficient != 1 {
                    tokens.push(term.coefficient.to_string());
                }
                tokens.push(term.formula.clone());
            }
        }
        let mut tokens = Vec::new();
        push_side(&self.reactants, &mut tokens);
        tokens.push(SIDE_SEPARATOR.to_string());
        push_side(&self.products, &mut tokens);
        tokens
    }

    /// reactants followed by products
    pub fn terms(&self) -> impl Iterator<Item = &BalancedTerm> {
        self.reactants.iter().chain(self.products.iter())
    }

    pub fn coefficients(&self) -> Vec<u64> {
        self.terms().map(|t| t.coefficient).collect()
    }

    pub fn coefficient_of(&self, formula: &str) -> Option<u64> {
        let formula = formula.trim();
        self.terms()
            .find(|t| t.formula == formula)
            .map(|t| t.coefficient)
    }
}

impl fmt::Display for BalancedEquation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokens().concat())
    }
}

/// Element composition of all terms of one equation. Rows are terms
/// (reactants first), columns are elements in order of first appearance.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StoichiometryMatrix {
    pub elements: Vec<String>,
    pub rows: Vec<Vec<i64>>,
    pub number_of_reactants: usize,
}

impl StoichiometryMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one term with sign +1 (reactant) or -1 (product). A new element
    /// adds a zero column to every existing row; repeated symbols of the term
    /// are summed.
    pub fn add_term(&mut self, term: &ParsedTerm, sign: i64) {
        let mut row = vec![0; self.elements.len()];
        for (symbol, count) in term {
            let column = match self.elements.iter().position(|e| e == symbol) {
                Some(column) => column,
                None => {
                    self.elements.push(symbol.clone());
                    for existing in self.rows.iter_mut() {
                        existing.push(0);
                    }
                    row.push(0);
                    self.elements.len() - 1
                }
            };
            row[column] += sign * *count as i64;
        }
        if sign > 0 {
            self.number_of_reactants += 1;
        }
        self.rows.push(row);
    }

    /// elements x terms matrix whose null space holds the coefficients
    pub fn transposed_rational(&self) -> RationalMatrix {
        from_integer_rows(&self.rows, self.elements.len()).transpose()
    }

    /// Net atom count of every element for the given coefficients; all zeros
    /// means the equation is balanced. Products are taken in `i128`, so no
    /// `u64` coefficient can overflow them.
    pub fn element_balance(&self, coefficients: &[u64]) -> Vec<i128> {
        (0..self.elements.len())
            .map(|column| {
                self.rows
                    .iter()
                    .zip(coefficients)
                    .map(|(row, &c)| row[column] as i128 * c as i128)
                    .sum()
            })
            .collect()
    }
}

/// A term is a bare formula: no coefficient of its own and, apart from phase
/// marks, nothing but letters, digits and brackets.
fn check_term(term: &str, equation: &str) -> Result<(), ChemError> {
    if term.is_empty() {
        return Err(ChemError::Parse(format!("empty term in equation {}", equation)));
    }
    if term.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(ChemError::Parse(format!(
            "term {} carries a coefficient in equation {}",
            term, equation
        )));
    }
    let formula = filter_phase_marks(term);
    if let Some(c) = formula
        .chars()
        .find(|&c| !(c.is_ascii_alphanumeric() || matches!(c, '(' | ')' | '[' | ']')))
    {
        return Err(ChemError::Parse(format!(
            "unexpected character '{}' in term {} of equation {}",
            c, term, equation
        )));
    }
    Ok(())
}

fn split_side(side: &str, equation: &str) -> Result<Vec<String>, ChemError> {
    side.split('+')
        .map(|term| {
            let term = term.trim();
            check_term(term, equation)?;
            Ok(term.to_string())
        })
        .collect()
}

/// Splits an equation into reactant and product formulae. The sides are
/// separated by a single "=" ("->" and "→" are accepted too), terms by "+".
/// Terms written with a coefficient ("2H2") or with stray characters are
/// rejected, since the balanced equation prints its own coefficients in front
/// of the term text.
pub fn split_equation(equation: &str) -> Result<(Vec<String>, Vec<String>), ChemError> {
    let normalized = equation.replace("->", "=").replace('→', "=");
    let sides: Vec<&str> = normalized.split('=').collect();
    if sides.len() != 2 {
        return Err(ChemError::Parse(format!(
            "equation must contain exactly one '=': {}",
            equation
        )));
    }
    let reactants = split_side(sides[0], equation)?;
    let products = split_side(sides[1], equation)?;
    Ok((reactants, products))
}

/// Builds the stoichiometry matrix of an equation.
pub fn stoichiometry_matrix(equation: &str) -> Result<StoichiometryMatrix, ChemError> {
    let (reactants, products) = split_equation(equation)?;
    build_matrix(&reactants, &products)
}

fn build_matrix(reactants: &[String], products: &[String]) -> Result<StoichiometryMatrix, ChemError> {
    let mut matrix = StoichiometryMatrix::new();
    for formula in reactants {
        matrix.add_term(&parse_formula(formula)?, 1);
    }
    for formula in products {
        matrix.add_term(&parse_formula(formula)?, -1);
    }
    Ok(matrix)
}

/// Turns a null space vector into strictly positive integer coefficients.
/// A vector with only non positive entries is flipped; anything with a zero
/// or mixed signs is not a chemical solution.
fn positive_coefficients(vector: &[BigRational]) -> Option<Vec<u64>> {
    let mut integers = to_integer_vector(vector);
    if is_non_positive(&integers) {
        integers = integers.into_iter().map(|x| -x).collect();
    }
    if integers.iter().any(|x: &BigInt| !x.is_positive()) {
        return None;
    }
    integers.iter().map(|x| x.to_u64()).collect()
}

/// Balances a chemical equation.
///
/// The first null space basis vector is used. When the null space has several
/// dimensions and the first vector has zero or mixed-sign entries, the sum of
/// all basis vectors is tried before giving up.
pub fn balance(equation: &str) -> Result<BalancedEquation, ChemError> {
    info!("balancing equation {}", equation);
    let (reactants, products) = split_equation(equation)?;
    let matrix = build_matrix(&reactants, &products)?;
    debug!(
        "stoichiometry matrix, elements {:?}, rows {:?}",
        matrix.elements, matrix.rows
    );

    let basis = null_space(&matrix.transposed_rational());
    if basis.is_empty() {
        return Err(ChemError::Unbalanceable(format!(
            "no non trivial solution for {}",
            equation
        )));
    }
    let mut coefficients = positive_coefficients(&basis[0]);
    if coefficients.is_none() && basis.len() > 1 {
        let mut sum = vec![BigRational::zero(); basis[0].len()];
        for vector in &basis {
            for (acc, x) in sum.iter_mut().zip(vector) {
                *acc += x.clone();
            }
        }
        coefficients = positive_coefficients(&sum);
    }
    let Some(coefficients) = coefficients else {
        return Err(ChemError::Unbalanceable(format!(
            "no positive integer coefficients for {}",
            equation
        )));
    };
    debug!("coefficients {:?}", coefficients);

    let (reactant_coefficients, product_coefficients) = coefficients.split_at(reactants.len());
    let to_terms = |formulas: Vec<String>, coefficients: &[u64]| -> Vec<BalancedTerm> {
        formulas
            .into_iter()
            .zip(coefficients)
            .map(|(formula, &coefficient)| BalancedTerm {
                coefficient,
                formula,
            })
            .collect()
    };
    let balanced = BalancedEquation {
        reactants: to_terms(reactants, reactant_coefficients),
        products: to_terms(products, product_coefficients),
    };
    info!("balanced: {}", balanced);
    Ok(balanced)
}
