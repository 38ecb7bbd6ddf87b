/// batch pipeline: reactions -> dH, dS, dG records and spontaneity labels
/// # Examples
/// ```
/// use std::time::Duration;
/// use ThermoExplorer::Dataset::dataset_builder::DatasetBuilder;
/// use ThermoExplorer::Thermodynamics::DBhandlers::fallback_data::FallbackTable;
/// use ThermoExplorer::Thermodynamics::DBhandlers::lookup_api::OfflineLookup;
/// use ThermoExplorer::Thermodynamics::DBhandlers::species_cache::SpeciesCache;
///
/// let mut builder = DatasetBuilder::new(
///     OfflineLookup,
///     SpeciesCache::in_memory(),
///     FallbackTable::standard(),
///     Duration::ZERO,
/// );
/// let dataset = builder
///     .build(&["2H2 + O2 -> 2H2O", "CaCO3 -> CaO + CO2"], 298.15)
///     .unwrap();
/// assert_eq!(dataset.labels(), vec![("2H2 + O2 -> 2H2O", 1)]);
/// assert_eq!(dataset.skipped().len(), 1);
/// ```
pub mod dataset_builder;
/// CSV and console tables of a dataset
pub mod export;
/// rate limit for remote lookups
pub mod throttle;
