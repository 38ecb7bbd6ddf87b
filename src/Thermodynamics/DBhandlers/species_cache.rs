//! # Species Cache Module
//!
//! ## Aim
//! Persistent formula -> `SpeciesRecord` store, so species looked up once are not looked
//! up again in later runs. Explicitly unresolved records are stored too: a species the
//! remote source has no data for is not asked for again.
//!
//! ## File format
//! One JSON object, keys sorted:
//! ```json
//! {
//!   "H2O": { "delta_hf_kj_per_mol": -241.826, "s_kj_per_mol_k": 0.18884 },
//!   "XeF9": { "delta_hf_kj_per_mol": null, "s_kj_per_mol_k": null }
//! }
//! ```
//!
//! ## Persistence
//! The whole mapping is written to a temporary file in the target directory which then
//! replaces the cache file, so an interrupted run leaves either the old or the new file.
use crate::Thermodynamics::DBhandlers::lookup_api::SpeciesRecord;
use log::{info, warn};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Cache file '{path}' is not valid JSON: {source}")]
    Corrupt {
        path: String,
        source: serde_json::Error,
    },
    #[error("Failed to serialize cache: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default)]
pub struct SpeciesCache {
    /// None for a cache that lives only in memory
    path: Option<PathBuf>,
    entries: BTreeMap<String, SpeciesRecord>,
    /// changed since the last persist
    dirty: bool,
}

impl SpeciesCache {
    /// cache that is never written to disk
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// in-memory cache prefilled with records
    pub fn from_entries(entries: BTreeMap<String, SpeciesRecord>) -> Self {
        Self {
            path: None,
            entries,
            dirty: false,
        }
    }

    /// loads the cache file; a missing file gives an empty cache bound to that path
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CacheError> {
        let path = path.as_ref();
        let entries = if path.exists() {
            let content = fs::read_to_string(path)?;
            if content.trim().is_empty() {
                warn!("cache file '{}' is empty", path.display());
                BTreeMap::new()
            } else {
                serde_json::from_str(&content).map_err(|source| CacheError::Corrupt {
                    path: path.display().to_string(),
                    source,
                })?
            }
        } else {
            BTreeMap::new()
        };
        info!(
            "species cache '{}' loaded: {} records",
            path.display(),
            entries.len()
        );
        Ok(Self {
            path: Some(path.to_path_buf()),
            entries,
            dirty: false,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn get(&self, formula: &str) -> Option<&SpeciesRecord> {
        self.entries.get(formula)
    }

    pub fn contains(&self, formula: &str) -> bool {
        self.entries.contains_key(formula)
    }

    pub fn insert(&mut self, formula: &str, record: SpeciesRecord) {
        self.entries.insert(formula.to_string(), record);
        self.dirty = true;
    }

    pub fn entries(&self) -> &BTreeMap<String, SpeciesRecord> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// writes the whole mapping to disk (temporary file, then replace)
    pub fn persist(&mut self) -> Result<(), CacheError> {
        let Some(path) = self.path.as_ref() else {
            self.dirty = false;
            return Ok(());
        };
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;
        let mut tmp = NamedTempFile::new_in(&dir)?;
        serde_json::to_writer_pretty(&mut tmp, &self.entries)?;
        tmp.write_all(b"\n")?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| CacheError::Io(e.error))?;
        self.dirty = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_empty_cache() {
        let dir = tempdir().unwrap();
        let cache = SpeciesCache::load(dir.path().join("nist_species_cache.json")).unwrap();
        assert!(cache.is_empty());
        assert!(!cache.is_dirty());
    }

    #[test]
    fn test_persist_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("raw").join("nist_species_cache.json");
        let mut cache = SpeciesCache::load(&path).unwrap();
        cache.insert("H2O", SpeciesRecord::new(-241.826, 0.18884));
        cache.insert("XeF9", SpeciesRecord::unresolved());
        assert!(cache.is_dirty());
        cache.persist().unwrap();
        assert!(!cache.is_dirty());

        let reloaded = SpeciesCache::load(&path).unwrap();
        assert_eq!(reloaded.len(), 2);
        assert_eq!(
            reloaded.get("H2O"),
            Some(&SpeciesRecord::new(-241.826, 0.18884))
        );
        // an unresolved record is different from an absent one
        assert!(reloaded.contains("XeF9"));
        assert!(reloaded.get("XeF9").unwrap().is_unresolved());
        assert!(!reloaded.contains("CO2"));

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"delta_hf_kj_per_mol\": null"));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cache.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            SpeciesCache::load(&path),
            Err(CacheError::Corrupt { .. })
        ));
    }

    #[test]
    fn test_in_memory_persist_is_noop() {
        let mut cache = SpeciesCache::in_memory();
        cache.insert("O2", SpeciesRecord::new(0.0, 0.205));
        cache.persist().unwrap();
        assert!(cache.path().is_none());
        assert_eq!(cache.len(), 1);
    }
}
