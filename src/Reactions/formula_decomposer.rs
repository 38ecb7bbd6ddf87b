//! Module to calculate the atomic composition of a flat chemical formula
//!
//! The formula is scanned left to right as a stream of (element symbol, optional count)
//! tokens. An element symbol is one uppercase letter optionally followed by one lowercase
//! letter, a count is a run of digits (1 if absent). Repeated symbols are summed.
//!
//! Brackets are not expanded: "Ca(OH)2" is read as the literal tokens Ca, O, H2,
//! so formulas that need group multipliers must be written flat ("CaO2H2").
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static ELEMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z][a-z]?)(\d*)").expect("element regex"));

/// element symbol -> number of atoms
pub type ElementCounts = BTreeMap<String, f64>;

/// Function to parse a chemical formula and return the counts of its elements
pub fn decompose(formula: &str) -> ElementCounts {
    let mut counts = ElementCounts::new();
    for caps in ELEMENT_RE.captures_iter(formula) {
        let element = &caps[1];
        let count = match caps.get(2).map(|m| m.as_str()) {
            Some(digits) if !digits.is_empty() => digits.parse::<f64>().unwrap_or(1.0),
            _ => 1.0,
        };
        *counts.entry(element.to_string()).or_insert(0.0) += count;
    }
    counts
}

/// element counts of a whole side of a reaction: sum of coefficient * atoms
pub fn decompose_terms<'a, I>(terms: I) -> ElementCounts
where
    I: IntoIterator<Item = (f64, &'a str)>,
{
    let mut total = ElementCounts::new();
    for (coefficient, formula) in terms {
        for (element, count) in decompose(formula) {
            *total.entry(element).or_insert(0.0) += coefficient * count;
        }
    }
    total
}
