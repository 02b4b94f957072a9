/////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// TESTS
//////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use crate::Formula::equation_balancer::{
        BalancedEquation, balance, split_equation, stoichiometry_matrix,
    };
    use crate::chem_errors::ChemError;

    const EQUATIONS: [(&str, &str); 9] = [
        ("H2 + O2 = H2O", "2H2 + O2 -> 2H2O"),
        ("C6H12O6 + O2 = CO2 + H2O", "C6H12O6 + 6O2 -> 6CO2 + 6H2O"),
        ("Fe + O2 = Fe2O3", "4Fe + 3O2 -> 2Fe2O3"),
        ("C3H8 + O2 = CO2 + H2O", "C3H8 + 5O2 -> 3CO2 + 4H2O"),
        (
            "KMnO4 + HCl = KCl + MnCl2 + H2O + Cl2",
            "2KMnO4 + 16HCl -> 2KCl + 2MnCl2 + 8H2O + 5Cl2",
        ),
        (
            "Ca(OH)2 + H3PO4 = Ca3(PO4)2 + H2O",
            "3Ca(OH)2 + 2H3PO4 -> Ca3(PO4)2 + 6H2O",
        ),
        (
            "(NH4)2SO4 + NaOH = Na2SO4 + NH3 + H2O",
            "(NH4)2SO4 + 2NaOH -> Na2SO4 + 2NH3 + 2H2O",
        ),
        ("Al + O2 -> Al2O3", "4Al + 3O2 -> 2Al2O3"),
        (
            "CH3(CH2)2CH3 + O2 = CO2 + H2O",
            "2CH3(CH2)2CH3 + 13O2 -> 8CO2 + 10H2O",
        ),
    ];

    #[test]
    fn test_balance_known_equations() {
        for (equation, expected) in EQUATIONS {
            let balanced = balance(equation).unwrap();
            assert_eq!(balanced.to_string(), expected, "equation {}", equation);
        }
    }

    #[test]
    fn test_water_synthesis_tokens() {
        let balanced = balance("H2 + O2 = H2O").unwrap();
        assert_eq!(
            balanced.tokens(),
            vec!["2", "H2", " + ", "O2", " -> ", "2", "H2O"]
        );
        assert_eq!(balanced.coefficients(), vec![2, 1, 2]);
        assert_eq!(balanced.coefficient_of("O2"), Some(1));
        assert_eq!(balanced.coefficient_of("CO2"), None);
    }

    #[test]
    fn test_mass_balance_invariant() {
        for (equation, _) in EQUATIONS {
            let balanced: BalancedEquation = balance(equation).unwrap();
            let matrix = stoichiometry_matrix(equation).unwrap();
            let net = matrix.element_balance(&balanced.coefficients());
            assert_eq!(net.len(), matrix.elements.len());
            assert!(net.iter().all(|&n| n == 0), "{} is not balanced: {:?}", equation, net);
            assert!(balanced.coefficients().iter().all(|&c| c > 0));
        }
    }

    #[test]
    fn test_balance_is_idempotent() {
        let first = balance("C6H12O6 + O2 = CO2 + H2O").unwrap();
        let second = balance("C6H12O6 + O2 = CO2 + H2O").unwrap();
        assert_eq!(first, second);
        assert_eq!(first.tokens(), second.tokens());
    }

    #[test]
    fn test_concurrent_balancing() {
        let handles: Vec<_> = EQUATIONS
            .iter()
            .map(|&(equation, expected)| {
                std::thread::spawn(move || {
                    for _ in 0..10 {
                        assert_eq!(balance(equation).unwrap().to_string(), expected);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
    }

    #[test]
    fn test_stoichiometry_matrix() {
        let matrix = stoichiometry_matrix("H2 + O2 = H2O").unwrap();
        assert_eq!(matrix.elements, vec!["H".to_string(), "O".to_string()]);
        assert_eq!(matrix.rows, vec![vec![2, 0], vec![0, 2], vec![-2, -1]]);
        assert_eq!(matrix.number_of_reactants, 2);
        // repeated symbols of one term accumulate
        let matrix = stoichiometry_matrix("CH3(CH2)2CH3 = C4H10").unwrap();
        assert_eq!(matrix.rows, vec![vec![4, 10], vec![-4, -10]]);
    }

    #[test]
    fn test_several_independent_solutions() {
        // the first basis vector gives no H2O, the sum of the basis is used
        let balanced = balance("H2 + O2 = H2O2 + H2O").unwrap();
        assert_eq!(balanced.to_string(), "4H2 + 3O2 -> 2H2O2 + 2H2O");
    }

    #[test]
    fn test_unknown_symbols_are_balanced_too() {
        assert_eq!(balance("Xx + O2 = XxO").unwrap().to_string(), "2Xx + O2 -> 2XxO");
    }

    #[test]
    fn test_unbalanceable() {
        assert!(matches!(balance("H2 = O2"), Err(ChemError::Unbalanceable(_))));
        assert!(matches!(balance("NaCl = Na"), Err(ChemError::Unbalanceable(_))));
        // only solution has mixed signs
        assert!(matches!(balance("H2O + H2 = O2"), Err(ChemError::Unbalanceable(_))));
    }

    #[test]
    fn test_malformed_equations() {
        for equation in ["H2 + O2", "H2 + = H2O", "= H2O", "H2 = H2O = O2", "(H2 + O2 = H2O", "H2 + O2 = "] {
            assert!(
                matches!(balance(equation), Err(ChemError::Parse(_))),
                "{} should be a parse error",
                equation
            );
        }
    }

    #[test]
    fn test_terms_with_coefficients_are_rejected() {
        for equation in ["2H2 + O2 = 2H2O", "H2 + O2 = 2H2O", "1H2 + O2 = H2O"] {
            match balance(equation) {
                Err(ChemError::Parse(message)) => {
                    assert!(message.contains("coefficient"), "{}: {}", equation, message)
                }
                other => panic!("{} gave {:?}", equation, other),
            }
        }
        assert!(matches!(split_equation("2H2 + O2 = H2O"), Err(ChemError::Parse(_))));
    }

    #[test]
    fn test_terms_with_stray_characters_are_rejected() {
        for equation in ["H2 + O2 => H2O", "H2 + O2 = H2 O", "Na^ + Cl = NaCl", "H2 + O2 = H2O;"] {
            assert!(
                matches!(balance(equation), Err(ChemError::Parse(_))),
                "{} should be a parse error",
                equation
            );
        }
        // phase marks and square brackets are part of a term
        assert_eq!(
            balance("H2(g) + O2(g) = H2O(l)").unwrap().to_string(),
            "2H2(g) + O2(g) -> 2H2O(l)"
        );
        assert_eq!(
            balance("K4[Fe(CN)6] + Cl2 = K3[Fe(CN)6] + KCl").unwrap().to_string(),
            "2K4[Fe(CN)6] + Cl2 -> 2K3[Fe(CN)6] + 2KCl"
        );
    }

    #[test]
    fn test_element_balance_of_large_coefficients() {
        let matrix = stoichiometry_matrix("H2 + O2 = H2O").unwrap();
        let net = matrix.element_balance(&[u64::MAX, u64::MAX, u64::MAX]);
        assert_eq!(net, vec![0, u64::MAX as i128]);
    }

    #[test]
    fn test_split_equation() {
        let (reactants, products) = split_equation(" C6H12O6 +O2 → CO2+ H2O ").unwrap();
        assert_eq!(reactants, vec!["C6H12O6", "O2"]);
        assert_eq!(products, vec!["CO2", "H2O"]);
    }
}
