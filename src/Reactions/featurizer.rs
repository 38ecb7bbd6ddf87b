//! # Reaction Featurizer Module
//!
//! ## Aim
//! Converts reaction strings into numeric feature vectors for learned predictors
//! of dG and spontaneity.
//!
//! ## Features of one reaction
//! - for every element on either side: `L_<el>` (reactant atoms), `R_<el>` (product atoms),
//!   `d_<el>` (R minus L); atoms are coefficient * count summed over every written term
//! - `num_elems`, `n_reactants`, `n_products`, `len_lhs`, `len_rhs`
//! - `contains_O`, `contains_N`, `contains_C`, `contains_H` as 1.0 / 0.0
//!
//! ## Batches
//! `vectorize` takes the union of the feature names over the batch, sorts it
//! lexicographically and zero-fills the features a reaction does not have, so the matrix
//! and its column order depend only on the set of reactions, never on container
//! iteration order. `vectorize_with_names` lays rows out against a fixed name list,
//! e.g. the one stored with a trained model.
use crate::Reactions::equation_parser::{EquationError, side_segments, split_equation, split_side};
use crate::Reactions::formula_decomposer::{ElementCounts, decompose_terms};
use nalgebra::DMatrix;
use std::collections::{BTreeMap, BTreeSet};

/// feature name -> value for one reaction
pub type FeatureMap = BTreeMap<String, f64>;

/// elements with a dedicated presence flag
const FLAGGED_ELEMENTS: [&str; 4] = ["O", "N", "C", "H"];

/// rectangular feature matrix: one row per reaction, one column per name
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    pub matrix: DMatrix<f64>,
    pub feature_names: Vec<String>,
}

impl FeatureMatrix {
    pub fn nrows(&self) -> usize {
        self.matrix.nrows()
    }
    pub fn ncols(&self) -> usize {
        self.matrix.ncols()
    }
    /// column index of a feature
    pub fn column_of(&self, name: &str) -> Option<usize> {
        self.feature_names.iter().position(|n| n == name)
    }
    /// row i as a name -> value map
    pub fn row_map(&self, i: usize) -> FeatureMap {
        self.feature_names
            .iter()
            .enumerate()
            .map(|(j, name)| (name.clone(), self.matrix[(i, j)]))
            .collect()
    }
}

fn side_elements(side: &str) -> Result<ElementCounts, EquationError> {
    let terms = split_side(side)?;
    Ok(decompose_terms(
        terms.iter().map(|t| (t.coefficient, t.formula.as_str())),
    ))
}

/// features of a single reaction
pub fn featurize(reaction: &str) -> Result<FeatureMap, EquationError> {
    let (lhs, rhs) = split_equation(reaction)?;
    let left = side_elements(lhs)?;
    let right = side_elements(rhs)?;
    let elements: BTreeSet<&String> = left.keys().chain(right.keys()).collect();

    let mut features = FeatureMap::new();
    for element in &elements {
        let l = left.get(*element).copied().unwrap_or(0.0);
        let r = right.get(*element).copied().unwrap_or(0.0);
        features.insert(format!("L_{}", element), l);
        features.insert(format!("R_{}", element), r);
        features.insert(format!("d_{}", element), r - l);
    }

    features.insert("num_elems".to_string(), elements.len() as f64);
    features.insert("n_reactants".to_string(), side_segments(lhs).len() as f64);
    features.insert("n_products".to_string(), side_segments(rhs).len() as f64);
    features.insert("len_lhs".to_string(), lhs.chars().count() as f64);
    features.insert("len_rhs".to_string(), rhs.chars().count() as f64);
    for flag in FLAGGED_ELEMENTS {
        let present = elements.iter().any(|e| e.as_str() == flag);
        features.insert(format!("contains_{}", flag), if present { 1.0 } else { 0.0 });
    }
    Ok(features)
}

fn build_rows(maps: &[FeatureMap], names: Vec<String>) -> FeatureMatrix {
    let matrix = DMatrix::from_fn(maps.len(), names.len(), |i, j| {
        maps[i].get(&names[j]).copied().unwrap_or(0.0)
    });
    FeatureMatrix {
        matrix,
        feature_names: names,
    }
}

/// feature matrix of a batch with the sorted union of feature names as columns
pub fn vectorize<S: AsRef<str>>(reactions: &[S]) -> Result<FeatureMatrix, EquationError> {
    let maps = reactions
        .iter()
        .map(|r| featurize(r.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    let names: BTreeSet<&String> = maps.iter().flat_map(|m| m.keys()).collect();
    let names: Vec<String> = names.into_iter().cloned().collect();
    Ok(build_rows(&maps, names))
}

/// feature matrix of a batch laid out against a fixed list of names;
/// features outside the list are dropped, missing ones are 0.0
pub fn vectorize_with_names<S: AsRef<str>>(
    reactions: &[S],
    names: &[String],
) -> Result<FeatureMatrix, EquationError> {
    let maps = reactions
        .iter()
        .map(|r| featurize(r.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    for (reaction, map) in reactions.iter().zip(&maps) {
        let dropped: Vec<&String> = map.keys().filter(|k| !names.contains(*k)).collect();
        if !dropped.is_empty() {
            log::debug!(
                "features {:?} of '{}' are unknown to the model and ignored",
                dropped,
                reaction.as_ref()
            );
        }
    }
    Ok(build_rows(&maps, names.to_vec()))
}
