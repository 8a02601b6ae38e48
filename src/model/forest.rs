//! Random forest regressor.
//!
//! Fitting delegates to [`aprender::tree::RandomForestRegressor`]. Tree `i`
//! draws its bootstrap sample from a generator seeded with `seed + i` and
//! considers every feature at each split, so a fit depends only on data and
//! config. Inputs are narrowed to `f32` on the way in and predictions widened
//! back to `f64`.

use aprender::primitives::{Matrix, Vector};
use aprender::tree::RandomForestRegressor as Estimator;
use rodar_common::{Result, RodarError};
use serde::{Deserialize, Serialize};

/// Random forest hyperparameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForestConfig {
    /// Number of trees in the forest
    #[serde(default = "default_n_trees")]
    pub n_trees: usize,
    /// Maximum depth of each tree; `None` grows until leaves are pure
    #[serde(default)]
    pub max_depth: Option<usize>,
    /// Random seed
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self { n_trees: default_n_trees(), max_depth: None, seed: default_seed() }
    }
}

fn default_n_trees() -> usize {
    100
}

fn default_seed() -> u64 {
    42
}

impl ForestConfig {
    fn estimator(&self) -> Estimator {
        let estimator = Estimator::new(self.n_trees).with_random_state(self.seed);
        match self.max_depth {
            Some(depth) => estimator.with_max_depth(depth),
            None => estimator,
        }
    }
}

/// Row-major `f64` rows as an aprender matrix.
fn to_matrix(x: &[Vec<f64>], n_features: usize) -> Result<Matrix<f32>> {
    let data: Vec<f32> = x.iter().flat_map(|row| row.iter().map(|&v| v as f32)).collect();
    Matrix::from_vec(x.len(), n_features, data)
        .map_err(|e| RodarError::Internal { message: format!("building feature matrix: {e}") })
}

/// Fitted forest: prediction is the mean of the trees' predictions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForestRegressor {
    config: ForestConfig,
    n_features: usize,
    estimator: Estimator,
}

impl RandomForestRegressor {
    /// Fit on row-major `x` and target `y`.
    pub fn fit(config: &ForestConfig, x: &[Vec<f64>], y: &[f64]) -> Result<Self> {
        if x.len() != y.len() {
            return Err(RodarError::ShapeMismatch { expected: x.len(), actual: y.len() });
        }
        if x.is_empty() {
            return Err(RodarError::EmptyDataset { context: "no rows to fit the forest on".into() });
        }
        if config.n_trees == 0 {
            return Err(RodarError::ConfigValue {
                field: "forest.n_trees".into(),
                message: "a forest needs at least one tree".into(),
                suggestion: "Use n_trees: 100".into(),
            });
        }

        let n_features = x[0].len();
        if let Some(row) = x.iter().find(|row| row.len() != n_features) {
            return Err(RodarError::ShapeMismatch { expected: n_features, actual: row.len() });
        }

        let matrix = to_matrix(x, n_features)?;
        let target: Vec<f32> = y.iter().map(|&v| v as f32).collect();
        let mut estimator = config.estimator();
        estimator
            .fit(&matrix, &Vector::from_vec(target))
            .map_err(|e| RodarError::Internal { message: format!("fitting random forest: {e}") })?;

        tracing::debug!(
            trees = config.n_trees,
            rows = x.len(),
            features = n_features,
            "fitted random forest"
        );

        Ok(Self { config: config.clone(), n_features, estimator })
    }

    /// Predict for multiple rows, in input order.
    pub fn predict(&self, x: &[Vec<f64>]) -> Result<Vec<f64>> {
        if let Some(row) = x.iter().find(|row| row.len() != self.n_features) {
            return Err(RodarError::ShapeMismatch { expected: self.n_features, actual: row.len() });
        }
        if x.is_empty() {
            return Ok(Vec::new());
        }
        let predictions = self.estimator.predict(&to_matrix(x, self.n_features)?);
        Ok(predictions.as_slice().iter().map(|&p| f64::from(p)).collect())
    }

    pub fn config(&self) -> &ForestConfig {
        &self.config
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn n_trees(&self) -> usize {
        self.config.n_trees
    }

    /// Mean decrease in impurity, normalised to sum 1 (all zeros when no
    /// tree split). `None` for a forest without trees.
    pub fn feature_importances(&self) -> Option<Vec<f64>> {
        self.estimator
            .feature_importances()
            .map(|imp| imp.into_iter().map(f64::from).collect())
    }

    /// Structural check for a deserialized forest.
    pub fn is_well_formed(&self) -> bool {
        self.config.n_trees > 0
            && self.feature_importances().is_some_and(|imp| imp.len() == self.n_features)
    }
}
