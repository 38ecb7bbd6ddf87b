//! # Equation Parser Module
//!
//! ## Aim
//! Turns a reaction written as text (`"CH4 + 2 O2 -> CO2 + 2 H2O"`) into two
//! stoichiometric maps, one per side of the arrow.
//!
//! ## Main Data Structures and Logic
//! - `SpeciesTerm`: one `+`-separated segment of a side, coefficient and formula
//! - `Reaction`: reactants and products as `StoichMap` (formula -> coefficient)
//! - `EquationError`: what can go wrong with the whole equation
//!
//! ## Rules
//! - exactly one `->` separates reactants from products
//! - a leading numeric token is the coefficient: `2`, `0.5`, `7/2`, `(7/2)`, `2/3/4`;
//!   a token that does not evaluate to a finite non-negative number counts as 1
//! - trailing phase marks `(g)`, `(l)`, `(s)`, `(aq)` are removed from the formula
//! - empty segments (`"H2 + -> ..."`) are ignored
//! - a formula written twice on one side keeps the last coefficient
use regex::Regex;
use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;
use thiserror::Error;

/// separator between reactants and products
pub const SIDE_SEPARATOR: &str = "->";
/// separator between species on one side
pub const SPECIES_SEPARATOR: char = '+';

static COEFF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\(?[0-9./]+\)?)\s*(.*)$").expect("coefficient regex"));
static PHASE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((g|l|s|aq)\)$").expect("phase regex"));

/// formula -> stoichiometric coefficient
pub type StoichMap = HashMap<String, f64>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EquationError {
    #[error("Malformed equation '{equation}': expected exactly one '->', found {found}")]
    Malformed { equation: String, found: usize },
    #[error("Species '{segment}' has a coefficient but no formula")]
    EmptyFormula { segment: String },
    #[error("Equation '{0}' contains no species")]
    NoSpecies(String),
}

/// one species as written on one side of the equation
#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesTerm {
    pub coefficient: f64,
    pub formula: String,
}

/// parsed reaction: reactants and products
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Reaction {
    pub reactants: StoichMap,
    pub products: StoichMap,
}

impl Reaction {
    /// all distinct formulas of the reaction, sorted
    pub fn species(&self) -> Vec<String> {
        let set: BTreeSet<&String> = self.reactants.keys().chain(self.products.keys()).collect();
        set.into_iter().cloned().collect()
    }

    /// writes the reaction back as an equation with sorted species on each side
    pub fn to_equation(&self) -> String {
        format!(
            "{} {} {}",
            side_to_string(&self.reactants),
            SIDE_SEPARATOR,
            side_to_string(&self.products)
        )
    }
}

fn side_to_string(side: &StoichMap) -> String {
    let mut formulas: Vec<&String> = side.keys().collect();
    formulas.sort();
    formulas
        .into_iter()
        .map(|formula| format!("{} {}", side[formula], formula))
        .collect::<Vec<_>>()
        .join(" + ")
}

/// splits the equation into (reactants side, products side), both trimmed
pub fn split_equation(equation: &str) -> Result<(&str, &str), EquationError> {
    let found = equation.matches(SIDE_SEPARATOR).count();
    if found != 1 {
        return Err(EquationError::Malformed {
            equation: equation.to_string(),
            found,
        });
    }
    match equation.split_once(SIDE_SEPARATOR) {
        Some((lhs, rhs)) => Ok((lhs.trim(), rhs.trim())),
        None => Err(EquationError::Malformed {
            equation: equation.to_string(),
            found,
        }),
    }
}

/// nonempty trimmed segments of one side
pub fn side_segments(side: &str) -> Vec<&str> {
    side.split(SPECIES_SEPARATOR)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// evaluates "2", "0.5", "7/2", "(7/2)" or "2/3/4" (divided left to right);
/// None when it is not a finite number >= 0
fn evaluate_coefficient(raw: &str) -> Option<f64> {
    let raw = raw.trim().trim_start_matches('(').trim_end_matches(')');
    let mut parts = raw.split('/');
    let first: f64 = parts.next()?.trim().parse().ok()?;
    let value = parts.try_fold(first, |acc, den| {
        den.trim().parse::<f64>().ok().map(|den| acc / den)
    })?;
    (value.is_finite() && value >= 0.0).then_some(value)
}

fn strip_formula(formula: &str) -> String {
    let mut formula = formula.trim();
    if formula.starts_with('(') && formula.ends_with(')') && formula.len() > 1 {
        formula = formula[1..formula.len() - 1].trim();
    }
    PHASE_RE.replace(formula, "").trim().to_string()
}

/// coefficient and formula of a single segment
pub fn parse_term(segment: &str) -> Result<SpeciesTerm, EquationError> {
    let segment = segment.trim();
    let (coefficient, formula) = match COEFF_RE.captures(segment) {
        Some(caps) => {
            let raw = caps.get(1).map_or("", |m| m.as_str());
            let rest = caps.get(2).map_or("", |m| m.as_str());
            let coefficient = evaluate_coefficient(raw).unwrap_or_else(|| {
                log::warn!("invalid coefficient '{}' in '{}', using 1", raw, segment);
                1.0
            });
            (coefficient, rest)
        }
        None => (1.0, segment),
    };
    let formula = strip_formula(formula);
    if formula.is_empty() {
        return Err(EquationError::EmptyFormula {
            segment: segment.to_string(),
        });
    }
    Ok(SpeciesTerm {
        coefficient,
        formula,
    })
}

/// every written term of one side, in order, duplicates kept
pub fn split_side(side: &str) -> Result<Vec<SpeciesTerm>, EquationError> {
    side_segments(side).into_iter().map(parse_term).collect()
}

fn side_to_map(side: &str) -> Result<StoichMap, EquationError> {
    let mut map = StoichMap::new();
    for term in split_side(side)? {
        // the last occurrence of a formula wins
        map.insert(term.formula, term.coefficient);
    }
    Ok(map)
}

/// parses "reactants -> products" into a Reaction
pub fn parse(equation: &str) -> Result<Reaction, EquationError> {
    let (lhs, rhs) = split_equation(equation)?;
    let reaction = Reaction {
        reactants: side_to_map(lhs)?,
        products: side_to_map(rhs)?,
    };
    if reaction.reactants.is_empty() && reaction.products.is_empty() {
        return Err(EquationError::NoSpecies(equation.to_string()));
    }
    Ok(reaction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_equation() {
        let reaction = parse("CH4 + 2 O2 -> CO2 + 2 H2O").unwrap();
        assert_eq!(
            reaction.reactants,
            HashMap::from([("CH4".to_string(), 1.0), ("O2".to_string(), 2.0)])
        );
        assert_eq!(
            reaction.products,
            HashMap::from([("CO2".to_string(), 1.0), ("H2O".to_string(), 2.0)])
        );
    }

    #[test]
    fn test_coefficients_without_space_and_fractions() {
        let reaction = parse("C2H6 + 7/2O2 -> 2CO2 + 3H2O").unwrap();
        assert_eq!(reaction.reactants["O2"], 3.5);
        assert_eq!(reaction.reactants["C2H6"], 1.0);
        assert_eq!(reaction.products["CO2"], 2.0);

        let reaction = parse("0.5 O2 + H2 -> H2O").unwrap();
        assert_eq!(reaction.reactants["O2"], 0.5);

        let reaction = parse("(7/2) O2 + C2H6 -> 2 CO2 + 3 H2O").unwrap();
        assert_eq!(reaction.reactants["O2"], 3.5);
    }

    #[test]
    fn test_chained_division_is_evaluated_left_to_right() {
        let reaction = parse("2/3/4 O2 -> O3").unwrap();
        approx::assert_relative_eq!(reaction.reactants["O2"], 2.0 / 3.0 / 4.0);
        let reaction = parse("1/2/0 O2 -> O3").unwrap();
        assert_eq!(reaction.reactants["O2"], 1.0);
    }

    #[test]
    fn test_invalid_coefficient_falls_back_to_one() {
        let reaction = parse("1.2.3 O2 + 2 H2 -> 2 H2O").unwrap();
        assert_eq!(reaction.reactants["O2"], 1.0);
        let reaction = parse("1/0 O2 -> O2").unwrap();
        assert_eq!(reaction.reactants["O2"], 1.0);
    }

    #[test]
    fn test_phase_marks_are_stripped() {
        let reaction = parse("2H2(g) + O2(g) -> 2H2O(l)").unwrap();
        assert_eq!(reaction.species(), vec!["H2", "H2O", "O2"]);
        let reaction = parse("NaCl(s) -> NaCl(aq)").unwrap();
        assert!(reaction.reactants.contains_key("NaCl"));
        assert!(reaction.products.contains_key("NaCl"));
        let reaction = parse("(H2O) -> H2O(g)").unwrap();
        assert_eq!(reaction.species(), vec!["H2O"]);
    }

    #[test]
    fn test_trailing_separator_is_tolerated() {
        let reaction = parse("H2 + O2 + -> H2O +").unwrap();
        assert_eq!(reaction.reactants.len(), 2);
        assert_eq!(reaction.products.len(), 1);
    }

    #[test]
    fn test_separator_count() {
        assert!(matches!(
            parse("H2 + O2 = H2O"),
            Err(EquationError::Malformed { found: 0, .. })
        ));
        assert!(matches!(
            parse("A -> B -> C"),
            Err(EquationError::Malformed { found: 2, .. })
        ));
        assert!(matches!(parse(" -> "), Err(EquationError::NoSpecies(_))));
    }

    #[test]
    fn test_coefficient_without_formula() {
        assert!(matches!(
            parse("2 -> H2"),
            Err(EquationError::EmptyFormula { .. })
        ));
    }

    #[test]
    fn test_duplicate_formula_last_write_wins() {
        let reaction = parse("H2 + 2 H2 + O2 -> 2 H2O").unwrap();
        assert_eq!(reaction.reactants["H2"], 2.0);
        let terms = split_side("H2 + 2 H2 + O2").unwrap();
        assert_eq!(terms.len(), 3);
    }

    #[test]
    fn test_reserialization_keeps_terms() {
        for equation in [
            "2H2 + O2 -> 2H2O",
            "C2H6 + 3.5 O2 -> 2 CO2 + 3 H2O",
            "CaCO3 -> CaO + CO2",
            "N2 + 3H2 -> 2NH3",
        ] {
            let reaction = parse(equation).unwrap();
            let again = parse(&reaction.to_equation()).unwrap();
            assert_eq!(reaction, again, "round trip of {}", equation);
        }
    }
}
