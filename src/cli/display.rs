//! Presentation helpers of the terminal menu: subscript rendering of formulae
//! and prettytable tables of records, compositions and matrices.
use crate::Database::lookup::{ElementRecord, IonRecord, LookupHit};
use crate::Formula::equation_balancer::{BalancedEquation, SIDE_SEPARATOR, StoichiometryMatrix};
use crate::Formula::molmass::ElementShare;
use prettytable::{Cell, Row, Table, row};

const SUBSCRIPTS: [char; 10] = ['₀', '₁', '₂', '₃', '₄', '₅', '₆', '₇', '₈', '₉'];

/// "(NH4)2SO4" -> "(NH₄)₂SO₄". Digits are subscripted only after a symbol or a
/// closing bracket, so a leading coefficient ("2H2O") keeps its normal digits.
pub fn subscript_formula(formula: &str) -> String {
    let mut rendered = String::with_capacity(formula.len() * 2);
    let mut subscripting = false;
    let mut previous: Option<char> = None;
    for c in formula.chars() {
        match c.to_digit(10) {
            Some(d) => {
                if !subscripting {
                    subscripting = matches!(previous, Some(p) if p.is_ascii_alphabetic() || p == ')' || p == ']');
                }
                if subscripting {
                    rendered.push(SUBSCRIPTS[d as usize]);
                } else {
                    rendered.push(c);
                }
            }
            None => {
                subscripting = false;
                rendered.push(c);
            }
        }
        previous = Some(c);
    }
    rendered
}

/// Balanced equation with subscripted formulae and an arrow between the sides.
pub fn render_equation(equation: &BalancedEquation) -> String {
    equation
        .tokens()
        .iter()
        .map(|token| {
            if token == SIDE_SEPARATOR {
                " → ".to_string()
            } else if token.chars().all(|c| c.is_ascii_digit()) {
                token.clone()
            } else {
                subscript_formula(token)
            }
        })
        .collect()
}

pub fn element_table(element: &ElementRecord) -> Table {
    let mut table = Table::new();
    table.add_row(row!["Property", "Value"]);
    table.add_row(row!["Symbol", element.symbol]);
    table.add_row(row!["Name", element.name]);
    table.add_row(row!["Atomic number", element.atomic_number]);
    table.add_row(row!["Molar mass, g/mol", element.molar_mass]);
    table.add_row(row!["Common charge", element.charge]);
    table.add_row(row!["Group", element.group]);
    table.add_row(row!["Electronegativity", element.electronegativity]);
    table.add_row(row!["State", element.state]);
    table
}

pub fn ion_table(ions: &[&IonRecord]) -> Table {
    let mut table = Table::new();
    table.add_row(row!["Formula", "Name", "Charge", "Molar mass, g/mol"]);
    for ion in ions {
        table.add_row(row![
            subscript_formula(&ion.formula),
            ion.name,
            format!("{:+}", ion.charge),
            format!("{:.2}", ion.molar_mass)
        ]);
    }
    table
}

pub fn lookup_table(hit: &LookupHit<'_>) -> Table {
    match hit {
        LookupHit::Element(element) => element_table(element),
        LookupHit::Ion(ion) => ion_table(&[*ion]),
    }
}

pub fn composition_table(shares: &[ElementShare]) -> Table {
    let mut table = Table::new();
    table.add_row(row!["Element", "Atoms", "Mass, g/mol", "Mass %"]);
    for share in shares {
        table.add_row(row![
            share.symbol,
            share.count,
            format!("{:.2}", share.mass),
            format!("{:.2}", share.percent)
        ]);
    }
    table
}

/// One row per term, one column per element
pub fn matrix_table(matrix: &StoichiometryMatrix, terms: &[String]) -> Table {
    let mut table = Table::new();
    let mut header = vec![Cell::new("Term")];
    header.extend(matrix.elements.iter().map(|e| Cell::new(e)));
    table.add_row(Row::new(header));
    for (term, counts) in terms.iter().zip(&matrix.rows) {
        let mut cells = vec![Cell::new(&subscript_formula(term))];
        cells.extend(counts.iter().map(|c| Cell::new(&c.to_string())));
        table.add_row(Row::new(cells));
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database::chem_database::ChemDatabase;
    use crate::Formula::equation_balancer::{balance, split_equation, stoichiometry_matrix};
    use crate::Formula::molmass::mass_composition;

    #[test]
    fn test_subscript_formula() {
        assert_eq!(subscript_formula("H2O"), "H₂O");
        assert_eq!(subscript_formula("(NH4)2SO4"), "(NH₄)₂SO₄");
        assert_eq!(subscript_formula("K4[Fe(CN)6]"), "K₄[Fe(CN)₆]");
        assert_eq!(subscript_formula("C12H22O11"), "C₁₂H₂₂O₁₁");
        assert_eq!(subscript_formula("2H2O"), "2H₂O");
        assert_eq!(subscript_formula("NaCl"), "NaCl");
    }

    #[test]
    fn test_render_equation() {
        let balanced = balance("H2 + O2 = H2O").unwrap();
        assert_eq!(render_equation(&balanced), "2H₂ + O₂ → 2H₂O");
        let balanced = balance("C6H12O6 + O2 = CO2 + H2O").unwrap();
        assert_eq!(render_equation(&balanced), "C₆H₁₂O₆ + 6O₂ → 6CO₂ + 6H₂O");
    }

    #[test]
    fn test_tables() {
        let db = ChemDatabase::canonical().unwrap();
        let hit = db.find("Na").unwrap();
        assert_eq!(lookup_table(&hit).len(), 9);
        assert_eq!(ion_table(&db.ions()).len(), db.ion_count() + 1);

        let shares = mass_composition("H2O", &db).unwrap();
        assert_eq!(composition_table(&shares).len(), 3);

        let equation = "H2 + O2 = H2O";
        let (reactants, products) = split_equation(equation).unwrap();
        let terms: Vec<String> = reactants.into_iter().chain(products).collect();
        let matrix = stoichiometry_matrix(equation).unwrap();
        let table = matrix_table(&matrix, &terms);
        assert_eq!(table.len(), 4);
        assert_eq!(table.get_row(3).unwrap().get_cell(1).unwrap().get_content(), "-2");
    }
}
