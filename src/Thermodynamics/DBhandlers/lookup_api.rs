//! Species property records and the capability of looking them up in an external source.
use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// standard formation enthalpy and standard entropy of one species.
/// Either field may be unset (None) when a source found only part of the data.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SpeciesRecord {
    /// dHf°, kJ/mol
    pub delta_hf_kj_per_mol: Option<f64>,
    /// S°, kJ/(mol*K)
    pub s_kj_per_mol_k: Option<f64>,
}

impl SpeciesRecord {
    pub fn new(delta_hf_kj_per_mol: f64, s_kj_per_mol_k: f64) -> Self {
        Self {
            delta_hf_kj_per_mol: Some(delta_hf_kj_per_mol),
            s_kj_per_mol_k: Some(s_kj_per_mol_k),
        }
    }
    /// record with both fields unset
    pub fn unresolved() -> Self {
        Self::default()
    }
    /// both fields present
    pub fn is_complete(&self) -> bool {
        self.delta_hf_kj_per_mol.is_some() && self.s_kj_per_mol_k.is_some()
    }
    /// both fields unset
    pub fn is_unresolved(&self) -> bool {
        self.delta_hf_kj_per_mol.is_none() && self.s_kj_per_mol_k.is_none()
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LookupError {
    #[error("Lookup source unavailable: {0}")]
    Unavailable(String),
}

/// external source of species properties (e.g. the NIST Chemistry WebBook).
/// Implementations return entropy in kJ/(mol*K). `Ok` with an unresolved record means
/// the source answered and has no data; `Err` means the source could not be asked.
#[enum_dispatch]
pub trait SpeciesLookupSource {
    fn lookup(&mut self, formula: &str) -> Result<SpeciesRecord, LookupError>;
    /// the lookup goes over the network; local sources are neither throttled nor counted
    fn is_remote(&self) -> bool {
        true
    }
}

/// source used when working without network access
#[derive(Debug, Clone, Default)]
pub struct OfflineLookup;

impl SpeciesLookupSource for OfflineLookup {
    fn lookup(&mut self, formula: &str) -> Result<SpeciesRecord, LookupError> {
        Err(LookupError::Unavailable(format!(
            "offline mode, no remote lookup for {}",
            formula
        )))
    }

    fn is_remote(&self) -> bool {
        false
    }
}

/// lookup backends selectable from the configuration
#[enum_dispatch(SpeciesLookupSource)]
pub enum LookupBackend {
    Nist(super::NIST_parser::NistParser<reqwest::blocking::Client>),
    Offline(OfflineLookup),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_state() {
        assert!(SpeciesRecord::unresolved().is_unresolved());
        assert!(!SpeciesRecord::unresolved().is_complete());
        let partial = SpeciesRecord {
            delta_hf_kj_per_mol: Some(-241.8),
            s_kj_per_mol_k: None,
        };
        assert!(!partial.is_complete());
        assert!(!partial.is_unresolved());
        assert!(SpeciesRecord::new(0.0, 0.2050).is_complete());
    }

    #[test]
    fn test_record_json_keeps_nulls() {
        let json = serde_json::to_string(&SpeciesRecord::unresolved()).unwrap();
        assert_eq!(json, r#"{"delta_hf_kj_per_mol":null,"s_kj_per_mol_k":null}"#);
        let back: SpeciesRecord = serde_json::from_str(r#"{"delta_hf_kj_per_mol":-74.8}"#).unwrap();
        assert_eq!(back.delta_hf_kj_per_mol, Some(-74.8));
        assert_eq!(back.s_kj_per_mol_k, None);
    }

    #[test]
    fn test_offline_lookup_is_unavailable() {
        let mut source = OfflineLookup;
        assert!(matches!(
            source.lookup("H2O"),
            Err(LookupError::Unavailable(_))
        ));
        assert!(!source.is_remote());
        let mut backend = LookupBackend::from(OfflineLookup);
        assert!(backend.lookup("H2O").is_err());
        assert!(!backend.is_remote());
    }
}
