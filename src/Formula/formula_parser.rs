//! Parser of chemical formulae like "C6H12O6", "(NH4)2SO4" or "Ca(NO3)2".
//!
//! The formula is first split into a flat stream of tokens (element symbol,
//! number, opening and closing bracket) and then consumed by a small recursive
//! descent parser which builds a tree of elements and bracket groups.
//! Element symbols are not checked against the periodic table here: any
//! uppercase letter with an optional lowercase letter is accepted, and the
//! lookup table decides later whether the symbol exists.
use crate::chem_errors::ChemError;
use log::debug;

/// Maximal depth of nested brackets, "(..(..)..)" is fine, deeper nesting is rejected
const MAX_NESTING: usize = 8;

/// Phase marks that may follow a formula, e.g. "H2O(l)"
const PHASE_MARKS: [&str; 5] = ["(aq)", "(g)", "(l)", "(s)", "(c)"];

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Symbol(String),
    Number(u32),
    LParen,
    RParen,
}

/// Node of a parsed formula: an element with its count or a bracket group
/// with the multiplier written after the closing bracket.
#[derive(Debug, Clone, PartialEq)]
pub enum FormulaNode {
    Element { symbol: String, count: u32 },
    Group { items: Vec<FormulaNode>, multiplier: u32 },
}

/// Flat (symbol, count) pairs in the order they appear in the formula.
/// Symbols from different bracket groups are not merged, so "CH3(CH2)2CH3"
/// contains several "C" entries.
pub type ParsedTerm = Vec<(String, u32)>;

pub(crate) fn filter_phase_marks(formula: &str) -> String {
    let mut formula = formula.to_string();
    for phase in PHASE_MARKS {
        formula = formula.replace(phase, "");
    }
    formula
}

/// Splits a formula into tokens.
///
/// Digits become a number token only when they directly follow a symbol or a
/// closing bracket; everything that cannot start a token (lowercase letters not
/// belonging to a symbol, leading digits, spaces, charges...) is skipped, and a
/// skipped character separates the digits after it from the token before it.
pub fn tokenize(formula: &str) -> Result<Vec<Token>, ChemError> {
    let chars: Vec<char> = formula.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    // true while the previous character ended a symbol or a closing bracket
    let mut countable = false;
    while i < chars.len() {
        let c = chars[i];
        if c == '(' || c == '[' {
            tokens.push(Token::LParen);
            countable = false;
            i += 1;
        } else if c == ')' || c == ']' {
            tokens.push(Token::RParen);
            countable = true;
            i += 1;
        } else if c.is_ascii_uppercase() {
            let mut symbol = c.to_string();
            i += 1;
            if let Some(&next) = chars.get(i) {
                if next.is_ascii_lowercase() {
                    symbol.push(next);
                    i += 1;
                }
            }
            tokens.push(Token::Symbol(symbol));
            countable = true;
        } else if c.is_ascii_digit() && countable {
            let mut value: u32 = 0;
            while let Some(digit) = chars.get(i).and_then(|d| d.to_digit(10)) {
                value = value
                    .checked_mul(10)
                    .and_then(|v| v.checked_add(digit))
                    .ok_or_else(|| ChemError::Parse(format!("count is too large in {}", formula)))?;
                i += 1;
            }
            if value == 0 {
                return Err(ChemError::Parse(format!("zero count in {}", formula)));
            }
            tokens.push(Token::Number(value));
            countable = false;
        } else {
            countable = false;
            // skip the whole run of digits so that "2H2" does not turn into "H" + "2"
            if c.is_ascii_digit() {
                while chars.get(i).is_some_and(|d| d.is_ascii_digit()) {
                    i += 1;
                }
            } else {
                i += 1;
            }
        }
    }
    Ok(tokens)
}

struct TokenStream<'a> {
    tokens: &'a [Token],
    pos: usize,
    formula: &'a str,
}

impl<'a> TokenStream<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn next_number(&mut self) -> Option<u32> {
        if let Some(Token::Number(n)) = self.peek() {
            self.pos += 1;
            Some(*n)
        } else {
            None
        }
    }

    fn parse_sequence(&mut self, depth: usize) -> Result<Vec<FormulaNode>, ChemError> {
        let mut items = Vec::new();
        loop {
            match self.peek() {
                None => {
                    if depth > 0 {
                        return Err(ChemError::Parse(format!(
                            "unterminated bracket in {}",
                            self.formula
                        )));
                    }
                    break;
                }
                Some(Token::Symbol(symbol)) => {
                    self.pos += 1;
                    let count = self.next_number().unwrap_or(1);
                    items.push(FormulaNode::Element {
                        symbol: symbol.clone(),
                        count,
                    });
                }
                Some(Token::LParen) => {
                    if depth + 1 > MAX_NESTING {
                        return Err(ChemError::Parse(format!(
                            "brackets are nested too deep in {}",
                            self.formula
                        )));
                    }
                    self.pos += 1;
                    let group = self.parse_sequence(depth + 1)?;
                    // parse_sequence at depth > 0 only returns Ok in front of a closing bracket
                    self.pos += 1;
                    if group.is_empty() {
                        return Err(ChemError::Parse(format!("empty brackets in {}", self.formula)));
                    }
                    let multiplier = self.next_number().unwrap_or(1);
                    items.push(FormulaNode::Group {
                        items: group,
                        multiplier,
                    });
                }
                Some(Token::RParen) => {
                    if depth == 0 {
                        return Err(ChemError::Parse(format!(
                            "closing bracket without opening one in {}",
                            self.formula
                        )));
                    }
                    break;
                }
                Some(Token::Number(_)) => {
                    // the tokenizer never emits a number in this position
                    self.pos += 1;
                }
            }
        }
        Ok(items)
    }
}

/// Parses a formula into a tree of elements and bracket groups.
pub fn parse_formula_tree(formula: &str) -> Result<Vec<FormulaNode>, ChemError> {
    let filtered = filter_phase_marks(formula.trim());
    let tokens = tokenize(&filtered)?;
    if !tokens.iter().any(|t| matches!(t, Token::Symbol(_))) {
        return Err(ChemError::Parse(format!(
            "no element symbols found in '{}'",
            formula
        )));
    }
    let mut stream = TokenStream {
        tokens: &tokens,
        pos: 0,
        formula,
    };
    let tree = stream.parse_sequence(0)?;
    debug!("formula {} parsed into {:?}", formula, tree);
    Ok(tree)
}

fn flatten(nodes: &[FormulaNode], multiplier: u32, out: &mut ParsedTerm) -> Result<(), ChemError> {
    for node in nodes {
        match node {
            FormulaNode::Element { symbol, count } => {
                let count = count
                    .checked_mul(multiplier)
                    .ok_or_else(|| ChemError::Parse(format!("count of {} is too large", symbol)))?;
                out.push((symbol.clone(), count));
            }
            FormulaNode::Group {
                items,
                multiplier: group_multiplier,
            } => {
                let multiplier = multiplier
                    .checked_mul(*group_multiplier)
                    .ok_or_else(|| ChemError::Parse("group multiplier is too large".to_string()))?;
                flatten(items, multiplier, out)?;
            }
        }
    }
    Ok(())
}

/// Parses a formula into ordered (symbol, count) pairs, applying bracket
/// multipliers to every element of the group.
pub fn parse_formula(formula: &str) -> Result<ParsedTerm, ChemError> {
    let tree = parse_formula_tree(formula)?;
    let mut term = Vec::new();
    flatten(&tree, 1, &mut term)?;
    Ok(term)
}

/// Sums the counts of repeated symbols, keeping the order of first appearance.
pub fn merge_counts(term: &ParsedTerm) -> Vec<(String, u64)> {
    let mut merged: Vec<(String, u64)> = Vec::new();
    for (symbol, count) in term {
        match merged.iter_mut().find(|(s, _)| s == symbol) {
            Some((_, total)) => *total += *count as u64,
            None => merged.push((symbol.clone(), *count as u64)),
        }
    }
    merged
}
