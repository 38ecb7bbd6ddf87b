//! # Dataset Builder Module
//!
//! ## Aim
//! Batch pipeline over many reaction equations: every reaction is parsed, its species are
//! resolved one at a time and its dH, dS, dG are computed at one temperature.
//!
//! ## Logic
//! - reactions are processed strictly in input order
//! - the species cache is written (temp file, then replace) after every resolution that
//!   changed it, so an interrupted run keeps everything resolved so far
//! - remote lookups go through a `ThrottledSource`, i.e. at least `min_interval` apart
//! - a malformed equation or an unresolved species skips that reaction with the reason;
//!   the batch goes on. Only infrastructure failures (cache write) abort the batch
//! - spontaneity labels are a view over completed records, ΔG° < 0 -> 1
use crate::Dataset::throttle::ThrottledSource;
use crate::Reactions::equation_parser::parse;
use crate::Thermodynamics::DBhandlers::fallback_data::FallbackTable;
use crate::Thermodynamics::DBhandlers::lookup_api::SpeciesLookupSource;
use crate::Thermodynamics::DBhandlers::species_cache::{CacheError, SpeciesCache};
use crate::Thermodynamics::reaction_thermo::{ReactionThermo, ThermoError, compute};
use crate::Thermodynamics::species_resolver::{ResolutionSource, SpeciesResolver};
use log::{info, warn};
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Species cache error: {0}")]
    Cache(#[from] CacheError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Export failed: {0}")]
    Export(String),
    #[error(transparent)]
    Thermo(#[from] ThermoError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// parser message
    Malformed(String),
    /// species without usable data, sorted
    MissingSpecies(Vec<String>),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Malformed(msg) => write!(f, "malformed equation: {}", msg),
            SkipReason::MissingSpecies(species) => {
                write!(f, "missing data for {}", species.join(", "))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DatasetRecord {
    Completed {
        reaction: String,
        result: ReactionThermo,
    },
    Skipped {
        reaction: String,
        reason: SkipReason,
    },
}

impl DatasetRecord {
    pub fn reaction(&self) -> &str {
        match self {
            DatasetRecord::Completed { reaction, .. } | DatasetRecord::Skipped { reaction, .. } => {
                reaction
            }
        }
    }
}

/// how many species resolutions each tier served
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolutionStats {
    pub cache: usize,
    pub remote: usize,
    pub fallback: usize,
    pub unresolved: usize,
}

impl ResolutionStats {
    fn count(&mut self, source: ResolutionSource) {
        match source {
            ResolutionSource::Cache => self.cache += 1,
            ResolutionSource::Remote => self.remote += 1,
            ResolutionSource::Fallback => self.fallback += 1,
            ResolutionSource::Unresolved => self.unresolved += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub temperature_k: f64,
    /// one record per input reaction, input order
    pub records: Vec<DatasetRecord>,
    pub stats: ResolutionStats,
}

impl Dataset {
    pub fn completed(&self) -> Vec<(&str, &ReactionThermo)> {
        self.records
            .iter()
            .filter_map(|r| match r {
                DatasetRecord::Completed { reaction, result } => Some((reaction.as_str(), result)),
                DatasetRecord::Skipped { .. } => None,
            })
            .collect()
    }

    pub fn skipped(&self) -> Vec<(&str, &SkipReason)> {
        self.records
            .iter()
            .filter_map(|r| match r {
                DatasetRecord::Skipped { reaction, reason } => Some((reaction.as_str(), reason)),
                DatasetRecord::Completed { .. } => None,
            })
            .collect()
    }

    /// (reaction, 1 if ΔG° < 0 else 0) for completed reactions
    pub fn labels(&self) -> Vec<(&str, u8)> {
        self.completed()
            .into_iter()
            .map(|(reaction, result)| (reaction, result.label()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

pub struct DatasetBuilder<S: SpeciesLookupSource> {
    resolver: SpeciesResolver<ThrottledSource<S>>,
}

impl<S: SpeciesLookupSource> DatasetBuilder<S> {
    pub fn new(
        source: S,
        cache: SpeciesCache,
        fallback: FallbackTable,
        min_interval: Duration,
    ) -> Self {
        Self {
            resolver: SpeciesResolver::new(
                ThrottledSource::new(source, min_interval),
                cache,
                fallback,
            ),
        }
    }

    pub fn resolver(&self) -> &SpeciesResolver<ThrottledSource<S>> {
        &self.resolver
    }

    pub fn build<R: AsRef<str>>(
        &mut self,
        reactions: &[R],
        temperature_k: f64,
    ) -> Result<Dataset, DatasetError> {
        if !temperature_k.is_finite() || temperature_k < 0.0 {
            return Err(ThermoError::InvalidTemperature(temperature_k).into());
        }
        let mut records = Vec::with_capacity(reactions.len());
        let mut stats = ResolutionStats::default();

        for (i, equation) in reactions.iter().enumerate() {
            let equation = equation.as_ref().trim();
            info!("[{}/{}] {}", i + 1, reactions.len(), equation);
            let reaction = match parse(equation) {
                Ok(reaction) => reaction,
                Err(e) => {
                    warn!("skipping '{}': {}", equation, e);
                    records.push(DatasetRecord::Skipped {
                        reaction: equation.to_string(),
                        reason: SkipReason::Malformed(e.to_string()),
                    });
                    continue;
                }
            };

            let mut properties = HashMap::new();
            for formula in reaction.species() {
                let resolution = self.resolver.resolve(&formula);
                stats.count(resolution.source);
                self.resolver.persist_cache()?;
                properties.insert(formula, resolution.record);
            }

            match compute(&reaction, &properties, temperature_k) {
                Ok(result) => records.push(DatasetRecord::Completed {
                    reaction: equation.to_string(),
                    result,
                }),
                Err(ThermoError::MissingProperty { species }) => {
                    warn!("skipping '{}': no data for {:?}", equation, species);
                    records.push(DatasetRecord::Skipped {
                        reaction: equation.to_string(),
                        reason: SkipReason::MissingSpecies(species),
                    });
                }
                Err(e) => return Err(e.into()),
            }
        }

        let dataset = Dataset {
            temperature_k,
            records,
            stats,
        };
        info!(
            "dataset built: {} completed, {} skipped, {} remote lookups ({:?})",
            dataset.completed().len(),
            dataset.skipped().len(),
            self.resolver.remote_calls(),
            dataset.stats
        );
        Ok(dataset)
    }
}
