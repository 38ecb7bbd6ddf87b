//! Model card: a small JSON file next to a trained artifact describing what it predicts,
//! how many samples and features it saw, the ordered feature names and its errors.
use crate::ML::predictor::{PredictError, Predictor};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelCard {
    pub artifact: String,
    pub target: String,
    pub n_samples: usize,
    pub n_features: usize,
    /// feature names in training order
    pub features: Vec<String>,
    pub cv_folds: usize,
    /// kJ/mol for ΔG° regressors
    pub cv_mae_mean: f64,
    pub cv_mae_std: f64,
    pub test_mae: f64,
    pub random_state: u64,
}

/// card path of an artifact: same name with a .json extension,
/// or .card.json when the artifact itself is JSON
pub fn card_path_for(artifact: &Path) -> PathBuf {
    if artifact.extension().is_some_and(|ext| ext == "json") {
        artifact.with_extension("card.json")
    } else {
        artifact.with_extension("json")
    }
}

impl ModelCard {
    pub fn load(path: &Path) -> Result<Self, PredictError> {
        let content = fs::read_to_string(path)?;
        let card: ModelCard = serde_json::from_str(&content)?;
        if card.features.len() != card.n_features {
            warn!(
                "model card {}: n_features = {} but {} feature names listed",
                path.display(),
                card.n_features,
                card.features.len()
            );
        }
        Ok(card)
    }

    pub fn save(&self, path: &Path) -> Result<(), PredictError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        info!("model card saved to {}", path.display());
        Ok(())
    }

    /// the model was trained on exactly the features the card lists, in that order
    pub fn describes<P: Predictor + ?Sized>(&self, model: &P) -> bool {
        self.features.as_slice() == model.feature_names()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ML::predictor::LinearModel;
    use tempfile::tempdir;

    fn card(features: Vec<String>) -> ModelCard {
        ModelCard {
            artifact: "models/delta_g_linear.json".to_string(),
            target: "delta_g".to_string(),
            n_samples: 120,
            n_features: features.len(),
            features,
            cv_folds: 5,
            cv_mae_mean: 41.2,
            cv_mae_std: 6.3,
            test_mae: 38.9,
            random_state: 42,
        }
    }

    #[test]
    fn test_card_round_trip_and_layout() {
        let dir = tempdir().unwrap();
        let path = card_path_for(&dir.path().join("delta_g_rf.pkl"));
        assert_eq!(path, dir.path().join("delta_g_rf.json"));
        assert_eq!(
            card_path_for(Path::new("models/delta_g_linear.json")),
            PathBuf::from("models/delta_g_linear.card.json")
        );

        let names = vec!["L_H".to_string(), "n_reactants".to_string()];
        let card = card(names.clone());
        card.save(&path).unwrap();
        let loaded = ModelCard::load(&path).unwrap();
        assert_eq!(loaded, card);

        let model = LinearModel::new("delta_g", names, vec![1.0, 2.0], 0.0).unwrap();
        assert!(loaded.describes(&model));
        let other = LinearModel::new("delta_g", vec!["L_O".to_string()], vec![1.0], 0.0).unwrap();
        assert!(!loaded.describes(&other));
    }

    #[test]
    fn test_card_json_keys() {
        let json = serde_json::to_value(card(vec!["d_H".to_string()])).unwrap();
        for key in ["artifact", "target", "n_samples", "n_features", "features", "test_mae"] {
            assert!(json.get(key).is_some(), "missing key {}", key);
        }
    }
}
