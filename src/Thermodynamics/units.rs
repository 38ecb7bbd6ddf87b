//! Units used inside the crate: enthalpies in kJ/mol, entropies in kJ/(mol*K).
//! Values expressed in J are converted once, where they enter the crate.

/// J per kJ
pub const J_PER_KJ: f64 = 1000.0;
/// standard reference temperature, K
pub const T_REF: f64 = 298.15;

/// entropy unit as reported by a data source
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntropyUnit {
    /// J/(mol*K)
    J,
    /// kJ/(mol*K)
    KJ,
}

impl EntropyUnit {
    /// guesses the unit from a unit label such as "J/mol*K" or "kJ/(mol K)"
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        if label.starts_with("kJ/") {
            Some(EntropyUnit::KJ)
        } else if label.starts_with("J/") {
            Some(EntropyUnit::J)
        } else {
            None
        }
    }

    /// value in kJ/(mol*K)
    pub fn to_kj(&self, value: f64) -> f64 {
        match self {
            EntropyUnit::J => value / J_PER_KJ,
            EntropyUnit::KJ => value,
        }
    }
}

/// kJ/(mol*K) -> J/(mol*K), for display only
pub fn kj_to_j(value: f64) -> f64 {
    value * J_PER_KJ
}
