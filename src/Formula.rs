/// eng
/// The module turns free-text chemical notation into structured data:
/// a tokenizer and recursive-descent parser for formulae like `(NH4)2SO4`,
/// which give a tree of elements and bracket groups and, flattened, a list of
/// (symbol, count) pairs.
pub mod formula_parser;
/// Molar mass and mass composition of a formula, evaluated recursively over
/// the formula tree against the element table.
pub mod molmass;
/// Exact reduced row echelon form and null space over big rationals.
pub mod rational_matrix;
/// eng
/// The module takes a chemical equation written as "A + B = C + D" and returns
/// the smallest positive integer coefficients:
/// 1) every term is parsed and becomes one row of the stoichiometry matrix
/// 2) the null space of the transposed matrix is found exactly
/// 3) the basis vector is scaled to integers and checked for positivity
pub mod equation_balancer;
mod equation_balancer_tests;
