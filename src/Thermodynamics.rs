#[allow(non_snake_case)]
/// species property sources: NIST lookup, persistent cache, fallback table
pub mod DBhandlers;
/// unit conventions (kJ/mol, kJ/(mol*K))
pub mod units;
/// tiered resolution of species properties
/// # Examples
/// ```
/// use ThermoExplorer::Thermodynamics::DBhandlers::fallback_data::FallbackTable;
/// use ThermoExplorer::Thermodynamics::DBhandlers::lookup_api::OfflineLookup;
/// use ThermoExplorer::Thermodynamics::DBhandlers::species_cache::SpeciesCache;
/// use ThermoExplorer::Thermodynamics::species_resolver::{ResolutionSource, SpeciesResolver};
///
/// let mut resolver =
///     SpeciesResolver::new(OfflineLookup, SpeciesCache::in_memory(), FallbackTable::standard());
/// let co2 = resolver.resolve("CO2");
/// assert_eq!(co2.source, ResolutionSource::Fallback);
/// assert_eq!(co2.record.delta_hf_kj_per_mol, Some(-393.5));
/// ```
pub mod species_resolver;
/// dH, dS, dG of a reaction
/// # Examples
/// ```
/// use ThermoExplorer::Thermodynamics::DBhandlers::fallback_data::FallbackTable;
/// use ThermoExplorer::Thermodynamics::DBhandlers::lookup_api::OfflineLookup;
/// use ThermoExplorer::Thermodynamics::DBhandlers::species_cache::SpeciesCache;
/// use ThermoExplorer::Thermodynamics::reaction_thermo::reaction_thermo_for_equation;
/// use ThermoExplorer::Thermodynamics::species_resolver::SpeciesResolver;
///
/// let mut resolver =
///     SpeciesResolver::new(OfflineLookup, SpeciesCache::in_memory(), FallbackTable::standard());
/// let result = reaction_thermo_for_equation("CH4 + 2O2 -> CO2 + 2H2O", &mut resolver, 298.15).unwrap();
/// assert!(result.is_spontaneous());
/// ```
pub mod reaction_thermo;
