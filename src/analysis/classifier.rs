//! Zone classifier: a decision tree fit fresh on each request's samples.
//!
//! The tree is grown without a depth limit using Gini impurity, so on
//! noise-free synthetic samples it reproduces every training label.

use linfa::prelude::*;
use linfa_trees::DecisionTree;
use ndarray::{Array1, Array2};

use crate::model::{FinderError, Observation, Sample};
use crate::zones::Zone;

const N_FEATURES: usize = 4;

fn feature_matrix(rows: &[[f64; N_FEATURES]]) -> Array2<f64> {
    Array2::from_shape_fn((rows.len(), N_FEATURES), |(i, j)| rows[i][j])
}

/// Wraps a `linfa_trees::DecisionTree` with zone labels. Starts unfit;
/// `predict` before a successful `fit` returns `ClassifierNotFit`.
#[derive(Debug, Clone, Default)]
pub struct ZoneClassifier {
    tree: Option<DecisionTree<f64, usize>>,
}

impl ZoneClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fits against `samples`, replacing any previous fit.
    pub fn fit(&mut self, samples: &[Sample]) -> Result<(), FinderError> {
        if samples.is_empty() {
            return Err(FinderError::EmptyTrainingSet);
        }
        let rows: Vec<[f64; N_FEATURES]> =
            samples.iter().map(|s| s.observation.features()).collect();
        let targets: Array1<usize> = samples.iter().map(|s| s.zone.index()).collect();
        let dataset = Dataset::new(feature_matrix(&rows), targets);

        let tree = DecisionTree::<f64, usize>::params()
            .max_depth(None)
            .fit(&dataset)
            .map_err(|e| FinderError::TrainingFailed(e.to_string()))?;
        self.tree = Some(tree);
        Ok(())
    }

    /// Returns the most likely zone for one observation.
    pub fn predict(&self, observation: &Observation) -> Result<Zone, FinderError> {
        let tree = self.tree.as_ref().ok_or(FinderError::ClassifierNotFit)?;
        let row = feature_matrix(&[observation.features()]);
        let predicted: Array1<usize> = tree.predict(&row);
        predicted
            .first()
            .and_then(|&class| Zone::from_index(class))
            .ok_or(FinderError::ClassifierNotFit)
    }

    pub fn is_fitted(&self) -> bool {
        self.tree.is_some()
    }

    pub fn depth(&self) -> Option<usize> {
        self.tree.as_ref().map(DecisionTree::max_depth)
    }

    pub fn leaf_count(&self) -> Option<usize> {
        self.tree.as_ref().map(DecisionTree::num_leaves)
    }
}
