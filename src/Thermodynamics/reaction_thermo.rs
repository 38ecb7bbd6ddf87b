//! # Reaction Thermodynamics Module
//!
//! ## Aim
//! Standard reaction enthalpy, entropy and Gibbs energy from species properties:
//! - ΔH° = Σν·ΔHf°(products) − Σν·ΔHf°(reactants), kJ/mol
//! - ΔS° = Σν·S°(products) − Σν·S°(reactants), kJ/(mol·K)
//! - ΔG° = ΔH° − T·ΔS°, kJ/mol
//!
//! A reaction with any species lacking a complete record is not computed at all: the
//! error names every such species.
use crate::Reactions::equation_parser::{EquationError, Reaction, StoichMap, parse};
use crate::Thermodynamics::DBhandlers::lookup_api::{SpeciesLookupSource, SpeciesRecord};
use crate::Thermodynamics::species_resolver::SpeciesResolver;
use crate::Thermodynamics::units::kj_to_j;
use prettytable::{Cell, Row, Table};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ThermoError {
    #[error("Missing thermodynamic data for: {}", .species.join(", "))]
    MissingProperty { species: Vec<String> },
    #[error("Invalid temperature: {0} K")]
    InvalidTemperature(f64),
    #[error(transparent)]
    Equation(#[from] EquationError),
}

/// reaction-level result; never cached
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReactionThermo {
    /// kJ/mol
    pub delta_h: f64,
    /// kJ/(mol*K)
    pub delta_s: f64,
    /// kJ/mol
    pub delta_g: f64,
    pub temperature_k: f64,
}

impl ReactionThermo {
    pub fn is_spontaneous(&self) -> bool {
        self.delta_g < 0.0
    }
    /// 1 if spontaneous at `temperature_k`, else 0
    pub fn label(&self) -> u8 {
        u8::from(self.is_spontaneous())
    }
    pub fn delta_s_j_per_mol_k(&self) -> f64 {
        kj_to_j(self.delta_s)
    }

    pub fn pretty_print(&self, equation: &str) {
        let mut table = Table::new();
        table.add_row(Row::new(vec![
            Cell::new("Reaction"),
            Cell::new("dH, kJ/mol"),
            Cell::new("dS, J/(mol*K)"),
            Cell::new("dG, kJ/mol"),
            Cell::new("T, K"),
            Cell::new("spontaneous"),
        ]));
        table.add_row(Row::new(vec![
            Cell::new(equation),
            Cell::new(&format!("{:.3}", self.delta_h)),
            Cell::new(&format!("{:.3}", self.delta_s_j_per_mol_k())),
            Cell::new(&format!("{:.3}", self.delta_g)),
            Cell::new(&format!("{:.2}", self.temperature_k)),
            Cell::new(if self.is_spontaneous() { "yes" } else { "no" }),
        ]));
        table.printstd();
    }
}

impl fmt::Display for ReactionThermo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "dH = {:.3} kJ/mol, dS = {:.3} J/(mol*K), dG = {:.3} kJ/mol at {} K",
            self.delta_h,
            self.delta_s_j_per_mol_k(),
            self.delta_g,
            self.temperature_k
        )
    }
}

fn check_temperature(temperature_k: f64) -> Result<(), ThermoError> {
    if temperature_k.is_finite() && temperature_k >= 0.0 {
        Ok(())
    } else {
        Err(ThermoError::InvalidTemperature(temperature_k))
    }
}

/// Σν·(dHf, S) of one side; every species is known to have a complete record
fn side_sums(side: &StoichMap, properties: &HashMap<String, SpeciesRecord>) -> (f64, f64) {
    side.iter().fold((0.0, 0.0), |(h, s), (formula, nu)| {
        let record = properties.get(formula).copied().unwrap_or_default();
        (
            h + nu * record.delta_hf_kj_per_mol.unwrap_or(0.0),
            s + nu * record.s_kj_per_mol_k.unwrap_or(0.0),
        )
    })
}

/// species of the reaction without a complete record, sorted
pub fn missing_species(
    reaction: &Reaction,
    properties: &HashMap<String, SpeciesRecord>,
) -> Vec<String> {
    reaction
        .species()
        .into_iter()
        .filter(|formula| !properties.get(formula).is_some_and(|r| r.is_complete()))
        .collect()
}

pub fn compute(
    reaction: &Reaction,
    properties: &HashMap<String, SpeciesRecord>,
    temperature_k: f64,
) -> Result<ReactionThermo, ThermoError> {
    check_temperature(temperature_k)?;
    let missing = missing_species(reaction, properties);
    if !missing.is_empty() {
        return Err(ThermoError::MissingProperty { species: missing });
    }
    let (h_products, s_products) = side_sums(&reaction.products, properties);
    let (h_reactants, s_reactants) = side_sums(&reaction.reactants, properties);
    let delta_h = h_products - h_reactants;
    let delta_s = s_products - s_reactants;
    Ok(ReactionThermo {
        delta_h,
        delta_s,
        delta_g: delta_h - temperature_k * delta_s,
        temperature_k,
    })
}

/// parse, resolve every species, compute
pub fn reaction_thermo_for_equation<S: SpeciesLookupSource>(
    equation: &str,
    resolver: &mut SpeciesResolver<S>,
    temperature_k: f64,
) -> Result<ReactionThermo, ThermoError> {
    check_temperature(temperature_k)?;
    let reaction = parse(equation)?;
    let species = reaction.species();
    let properties = resolver.resolve_all(species.iter().map(String::as_str));
    compute(&reaction, &properties, temperature_k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Thermodynamics::DBhandlers::fallback_data::FallbackTable;
    use crate::Thermodynamics::DBhandlers::lookup_api::OfflineLookup;
    use crate::Thermodynamics::DBhandlers::species_cache::SpeciesCache;
    use crate::Thermodynamics::units::T_REF;
    use approx::assert_relative_eq;

    fn offline_resolver() -> SpeciesResolver<OfflineLookup> {
        SpeciesResolver::new(OfflineLookup, SpeciesCache::in_memory(), FallbackTable::standard())
    }

    #[test]
    fn test_water_formation() {
        let mut resolver = offline_resolver();
        let result = reaction_thermo_for_equation("2H2 + O2 -> 2H2O", &mut resolver, T_REF).unwrap();
        assert_relative_eq!(result.delta_h, -483.6, epsilon = 1e-9);
        assert_relative_eq!(result.delta_s, -0.3264, epsilon = 1e-9);
        assert_relative_eq!(result.delta_g, -386.284, epsilon = 1e-3);
        assert_relative_eq!(result.delta_s_j_per_mol_k(), -326.4, epsilon = 1e-6);
        assert!(result.is_spontaneous());
        assert_eq!(result.label(), 1);
    }

    #[test]
    fn test_gibbs_energy_changes_sign_with_temperature() {
        let mut resolver = offline_resolver();
        // dS < 0, so dG grows with T and turns positive near 1482 K
        let hot = reaction_thermo_for_equation("2H2 + O2 -> 2H2O", &mut resolver, 2000.0).unwrap();
        assert!(hot.delta_g > 0.0);
        assert_eq!(hot.label(), 0);
        let zero = reaction_thermo_for_equation("2H2 + O2 -> 2H2O", &mut resolver, 0.0).unwrap();
        assert_relative_eq!(zero.delta_g, zero.delta_h);
    }

    #[test]
    fn test_missing_property_names_exactly_the_unknown_species() {
        let mut resolver = offline_resolver();
        let err = reaction_thermo_for_equation("XeF9 + H2 -> H2O", &mut resolver, T_REF).unwrap_err();
        assert_eq!(
            err,
            ThermoError::MissingProperty {
                species: vec!["XeF9".to_string()]
            }
        );
    }

    #[test]
    fn test_partial_record_counts_as_missing() {
        let reaction = parse("O3 -> 1.5O2").unwrap();
        let properties = HashMap::from([
            (
                "O3".to_string(),
                SpeciesRecord {
                    delta_hf_kj_per_mol: Some(142.67),
                    s_kj_per_mol_k: None,
                },
            ),
            ("O2".to_string(), SpeciesRecord::new(0.0, 0.205)),
        ]);
        assert_eq!(
            compute(&reaction, &properties, T_REF),
            Err(ThermoError::MissingProperty {
                species: vec!["O3".to_string()]
            })
        );
    }

    #[test]
    fn test_fractional_coefficients() {
        let reaction = parse("H2 + 1/2 O2 -> H2O").unwrap();
        let properties = HashMap::from([
            ("H2".to_string(), SpeciesRecord::new(0.0, 0.1306)),
            ("O2".to_string(), SpeciesRecord::new(0.0, 0.2050)),
            ("H2O".to_string(), SpeciesRecord::new(-241.8, 0.0699)),
        ]);
        let result = compute(&reaction, &properties, T_REF).unwrap();
        assert_relative_eq!(result.delta_h, -241.8, epsilon = 1e-9);
        assert_relative_eq!(result.delta_s, -0.1632, epsilon = 1e-9);
    }

    #[test]
    fn test_invalid_temperature() {
        let reaction = parse("2H2 + O2 -> 2H2O").unwrap();
        let properties = HashMap::new();
        assert_eq!(
            compute(&reaction, &properties, -1.0),
            Err(ThermoError::InvalidTemperature(-1.0))
        );
        assert!(matches!(
            compute(&reaction, &properties, f64::NAN),
            Err(ThermoError::InvalidTemperature(_))
        ));
    }

    #[test]
    fn test_malformed_equation() {
        let mut resolver = offline_resolver();
        assert!(matches!(
            reaction_thermo_for_equation("2H2 + O2 = 2H2O", &mut resolver, T_REF),
            Err(ThermoError::Equation(_))
        ));
    }
}
