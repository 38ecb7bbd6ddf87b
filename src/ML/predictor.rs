//! # Predictor Module
//!
//! ## Aim
//! Inference over reaction feature vectors with models trained elsewhere.
//!
//! ## Main Data Structures and Logic
//! - `Predictor` trait: a model knows the ordered feature names it was trained on and maps
//!   a feature matrix laid out in that order to one output per row
//! - `predict_delta_g`, `predict_spontaneous`: featurize one reaction against the model's
//!   names (unknown features dropped, missing ones zero) and read the single output;
//!   a classifier output above 0.5 means spontaneous
//! - `LinearModel`: y = intercept + Σ wᵢ·xᵢ, stored as JSON
use crate::Reactions::equation_parser::EquationError;
use crate::Reactions::featurizer::{FeatureMatrix, vectorize_with_names};
use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// classifier outputs above this are read as "spontaneous"
pub const SPONTANEOUS_THRESHOLD: f64 = 0.5;

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("Feature count mismatch: model expects {expected}, matrix has {found}")]
    FeatureCount { expected: usize, found: usize },
    #[error("Feature names differ from the ones the model was trained on")]
    FeatureNames,
    #[error("Model returned {0} outputs for one reaction")]
    OutputCount(usize),
    #[error(transparent)]
    Equation(#[from] EquationError),
    #[error("Model I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Model JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub trait Predictor {
    /// feature names in training order
    fn feature_names(&self) -> &[String];
    /// one output per matrix row
    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<f64>, PredictError>;
}

/// feature matrix of one reaction in the model's layout
pub fn features_for<P: Predictor + ?Sized>(
    model: &P,
    reaction: &str,
) -> Result<FeatureMatrix, PredictError> {
    Ok(vectorize_with_names(&[reaction], model.feature_names())?)
}

fn single_output<P: Predictor + ?Sized>(model: &P, reaction: &str) -> Result<f64, PredictError> {
    let features = features_for(model, reaction)?;
    let outputs = model.predict(&features)?;
    match outputs.as_slice() {
        [value] => Ok(*value),
        other => Err(PredictError::OutputCount(other.len())),
    }
}

/// ΔG° estimate of a regression model, kJ/mol
pub fn predict_delta_g<P: Predictor + ?Sized>(model: &P, reaction: &str) -> Result<f64, PredictError> {
    single_output(model, reaction)
}

pub fn predict_spontaneous<P: Predictor + ?Sized>(
    model: &P,
    reaction: &str,
) -> Result<bool, PredictError> {
    Ok(single_output(model, reaction)? > SPONTANEOUS_THRESHOLD)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    /// e.g. "delta_g" or "label"
    pub target: String,
    pub feature_names: Vec<String>,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LinearModel {
    pub fn new(
        target: &str,
        feature_names: Vec<String>,
        coefficients: Vec<f64>,
        intercept: f64,
    ) -> Result<Self, PredictError> {
        let model = Self {
            target: target.to_string(),
            feature_names,
            coefficients,
            intercept,
        };
        model.check()?;
        Ok(model)
    }

    fn check(&self) -> Result<(), PredictError> {
        if self.feature_names.len() != self.coefficients.len() {
            return Err(PredictError::FeatureCount {
                expected: self.feature_names.len(),
                found: self.coefficients.len(),
            });
        }
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, PredictError> {
        let content = fs::read_to_string(path)?;
        let model: LinearModel = serde_json::from_str(&content)?;
        model.check()?;
        Ok(model)
    }

    pub fn save(&self, path: &Path) -> Result<(), PredictError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

impl Predictor for LinearModel {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<f64>, PredictError> {
        if features.ncols() != self.coefficients.len() {
            return Err(PredictError::FeatureCount {
                expected: self.coefficients.len(),
                found: features.ncols(),
            });
        }
        if features.feature_names != self.feature_names {
            return Err(PredictError::FeatureNames);
        }
        let weights = DVector::from_column_slice(&self.coefficients);
        let outputs = &features.matrix * weights;
        Ok(outputs.iter().map(|y| y + self.intercept).collect())
    }
}
