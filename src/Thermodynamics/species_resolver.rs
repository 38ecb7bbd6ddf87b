//! # Species Property Resolver Module
//!
//! ## Aim
//! Resolves ΔHf° and S° of one species through a tiered strategy:
//! 1. the persistent cache (records returned verbatim, explicit "unresolved" ones included)
//! 2. the lookup source (any non-empty answer, partial ones too, is cached)
//! 3. the injected fallback table (never written to the cache, so later runs ask the source again)
//! 4. an unresolved record
//!
//! A definitive empty answer from the source is cached as unresolved unless the fallback
//! table covers the formula. A failed lookup (source unavailable) is never cached. There are
//! no retries here: a failed lookup degrades to fallback or unresolved within the same call.
//!
//! ## Main Data Structures
//! - `SpeciesResolver<S>`: owns the source, the cache and the fallback table
//! - `Resolution`: the record plus the tier (`ResolutionSource`) that produced it
use crate::Thermodynamics::DBhandlers::fallback_data::FallbackTable;
use crate::Thermodynamics::DBhandlers::lookup_api::{SpeciesLookupSource, SpeciesRecord};
use crate::Thermodynamics::DBhandlers::species_cache::{CacheError, SpeciesCache};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::fmt;

/// tier that produced a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionSource {
    Cache,
    Remote,
    Fallback,
    Unresolved,
}

impl fmt::Display for ResolutionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResolutionSource::Cache => "cache",
            ResolutionSource::Remote => "remote",
            ResolutionSource::Fallback => "fallback",
            ResolutionSource::Unresolved => "unresolved",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub record: SpeciesRecord,
    pub source: ResolutionSource,
}

pub struct SpeciesResolver<S: SpeciesLookupSource> {
    source: S,
    cache: SpeciesCache,
    fallback: FallbackTable,
    remote_calls: usize,
}

impl<S: SpeciesLookupSource> SpeciesResolver<S> {
    pub fn new(source: S, cache: SpeciesCache, fallback: FallbackTable) -> Self {
        Self {
            source,
            cache,
            fallback,
            remote_calls: 0,
        }
    }

    /// properties of one species, see the module docs for the tiers
    pub fn resolve(&mut self, formula: &str) -> Resolution {
        if let Some(record) = self.cache.get(formula) {
            debug!("{}: cache hit", formula);
            return Resolution {
                record: *record,
                source: ResolutionSource::Cache,
            };
        }

        if self.source.is_remote() {
            self.remote_calls += 1;
        }
        match self.source.lookup(formula) {
            Ok(record) if !record.is_unresolved() => {
                if !record.is_complete() {
                    warn!("{}: source returned a partial record {:?}", formula, record);
                }
                self.cache.insert(formula, record);
                return Resolution {
                    record,
                    source: ResolutionSource::Remote,
                };
            }
            Ok(_) => {
                info!("{}: source has no data", formula);
                if !self.fallback.contains(formula) {
                    // remember the failure so the source is not asked again
                    self.cache.insert(formula, SpeciesRecord::unresolved());
                }
            }
            Err(e) => warn!("{}: {}", formula, e),
        }

        match self.fallback.get(formula) {
            Some(record) => {
                info!("{}: using fallback data", formula);
                Resolution {
                    record,
                    source: ResolutionSource::Fallback,
                }
            }
            None => Resolution {
                record: SpeciesRecord::unresolved(),
                source: ResolutionSource::Unresolved,
            },
        }
    }

    /// records of every formula, each resolved once
    pub fn resolve_all<'a, I>(&mut self, formulas: I) -> HashMap<String, SpeciesRecord>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut records = HashMap::new();
        for formula in formulas {
            if !records.contains_key(formula) {
                let resolution = self.resolve(formula);
                records.insert(formula.to_string(), resolution.record);
            }
        }
        records
    }

    /// writes the cache if it changed since the last write
    pub fn persist_cache(&mut self) -> Result<bool, CacheError> {
        if !self.cache.is_dirty() {
            return Ok(false);
        }
        self.cache.persist()?;
        Ok(true)
    }

    pub fn cache(&self) -> &SpeciesCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut SpeciesCache {
        &mut self.cache
    }

    pub fn fallback(&self) -> &FallbackTable {
        &self.fallback
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// number of lookups handed to the source so far
    pub fn remote_calls(&self) -> usize {
        self.remote_calls
    }
}
