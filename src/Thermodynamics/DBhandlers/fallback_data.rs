//! Hard-coded standard formation enthalpies and entropies for common species,
//! used when neither the cache nor the remote source has data.
//! Entries are stored as published (dH kJ/mol, S J/(mol*K)) and converted on the way out.
use crate::Thermodynamics::DBhandlers::lookup_api::SpeciesRecord;
use crate::Thermodynamics::units::EntropyUnit;
use std::collections::HashMap;

/// one fallback entry: dH in kJ/mol, S in J/(mol*K)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallbackEntry {
    pub delta_h: f64,
    pub delta_s: f64,
}

const STANDARD_DATA: [(&str, f64, f64); 10] = [
    ("H2O", -241.8, 69.9),
    ("CO2", -393.5, 213.7),
    ("O2", 0.0, 205.0),
    ("H2", 0.0, 130.6),
    ("CH4", -74.8, 186.3),
    ("NH3", -45.9, 192.8),
    ("N2", 0.0, 191.5),
    ("C2H6", -84.0, 229.5),
    ("CO", -110.5, 197.7),
    ("H2O2", -136.1, 109.6),
];

/// immutable fallback table, built once and handed to the resolver
#[derive(Debug, Clone, Default)]
pub struct FallbackTable {
    entries: HashMap<String, FallbackEntry>,
}

impl FallbackTable {
    /// table with the built-in common species
    pub fn standard() -> Self {
        Self::from_entries(
            STANDARD_DATA
                .iter()
                .map(|&(formula, delta_h, delta_s)| (formula, FallbackEntry { delta_h, delta_s })),
        )
    }

    /// table without entries
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_entries<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, FallbackEntry)>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(formula, entry)| (formula.to_string(), entry))
                .collect(),
        }
    }

    pub fn contains(&self, formula: &str) -> bool {
        self.entries.contains_key(formula)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// record in crate units (entropy in kJ/(mol*K))
    pub fn get(&self, formula: &str) -> Option<SpeciesRecord> {
        self.entries
            .get(formula)
            .map(|e| SpeciesRecord::new(e.delta_h, EntropyUnit::J.to_kj(e.delta_s)))
    }
}
