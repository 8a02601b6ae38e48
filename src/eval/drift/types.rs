//! Type definitions for drift detection.

use serde::{Deserialize, Serialize};

/// Statistical test for drift detection
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "test")]
pub enum DriftTest {
    /// Kolmogorov-Smirnov test (continuous features)
    #[serde(rename = "ks")]
    KS { threshold: f64 },
    /// Chi-square goodness-of-fit test (categorical features)
    #[serde(rename = "chisquare")]
    ChiSquare { threshold: f64 },
    /// Two-proportion Z-test (columns with at most two distinct values)
    #[serde(rename = "z")]
    Z { threshold: f64 },
    /// Population Stability Index (standard industry metric)
    #[serde(rename = "psi")]
    PSI { threshold: f64 },
    /// Wasserstein distance normed by the reference standard deviation
    #[serde(rename = "wasserstein")]
    Wasserstein { threshold: f64 },
    /// Jensen-Shannon distance between binned distributions
    #[serde(rename = "jensenshannon")]
    JensenShannon { threshold: f64 },
}

impl DriftTest {
    /// Get the name of this test
    pub fn name(&self) -> &'static str {
        match self {
            DriftTest::KS { .. } => "Kolmogorov-Smirnov",
            DriftTest::ChiSquare { .. } => "Chi-Square",
            DriftTest::Z { .. } => "Z-test",
            DriftTest::PSI { .. } => "PSI",
            DriftTest::Wasserstein { .. } => "Wasserstein distance (normed)",
            DriftTest::JensenShannon { .. } => "Jensen-Shannon distance",
        }
    }

    /// Get the threshold for this test
    pub fn threshold(&self) -> f64 {
        match self {
            DriftTest::KS { threshold }
            | DriftTest::ChiSquare { threshold }
            | DriftTest::Z { threshold }
            | DriftTest::PSI { threshold }
            | DriftTest::Wasserstein { threshold }
            | DriftTest::JensenShannon { threshold } => *threshold,
        }
    }

    /// Whether the score is a p-value (drift below threshold) rather than a
    /// distance (drift at or above threshold).
    pub fn is_p_value(&self) -> bool {
        matches!(self, DriftTest::KS { .. } | DriftTest::ChiSquare { .. } | DriftTest::Z { .. })
    }

    /// Whether `score` crosses this test's threshold.
    pub fn detects(&self, score: f64) -> bool {
        if self.is_p_value() {
            score < self.threshold()
        } else {
            score >= self.threshold()
        }
    }
}

/// Severity levels for drift
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// No drift detected
    None,
    /// Score is close to the threshold but has not crossed it
    Warning,
    /// Threshold crossed; counts towards dataset drift
    Critical,
}

/// How a column's values are compared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

/// Test selection for one column kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatTestChoice {
    /// Pick by sample size and cardinality: p-value tests for small
    /// reference samples, distance tests for large ones.
    #[default]
    Auto,
    Ks,
    ChiSquare,
    Z,
    Psi,
    Wasserstein,
    JensenShannon,
}

/// Drift report settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DriftConfig {
    /// Fraction of drifted columns at which the dataset counts as drifted
    #[serde(default = "default_drift_share")]
    pub drift_share: f64,
    /// Test for numeric columns (features, target, prediction)
    #[serde(default)]
    pub numeric_test: StatTestChoice,
    /// Test for categorical columns
    #[serde(default)]
    pub categorical_test: StatTestChoice,
    /// Threshold for KS, chi-square and the Z-test
    #[serde(default = "default_p_value_threshold")]
    pub p_value_threshold: f64,
    /// Threshold for Wasserstein and Jensen-Shannon
    #[serde(default = "default_distance_threshold")]
    pub distance_threshold: f64,
    /// Threshold for PSI
    #[serde(default = "default_psi_threshold")]
    pub psi_threshold: f64,
    /// Reference sizes above this switch `auto` to distance tests
    #[serde(default = "default_large_sample_rows")]
    pub large_sample_rows: usize,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            drift_share: default_drift_share(),
            numeric_test: StatTestChoice::Auto,
            categorical_test: StatTestChoice::Auto,
            p_value_threshold: default_p_value_threshold(),
            distance_threshold: default_distance_threshold(),
            psi_threshold: default_psi_threshold(),
            large_sample_rows: default_large_sample_rows(),
        }
    }
}

fn default_drift_share() -> f64 {
    0.5
}

fn default_p_value_threshold() -> f64 {
    0.05
}

fn default_distance_threshold() -> f64 {
    0.1
}

fn default_psi_threshold() -> f64 {
    0.1
}

fn default_large_sample_rows() -> usize {
    1000
}

/// Numeric columns with at most this many distinct values are compared
/// as categories.
pub const LOW_CARDINALITY: usize = 5;

impl DriftConfig {
    /// Resolve the concrete test for a column of `kind`, given the reference
    /// size and the number of distinct values across reference and current.
    pub fn test_for(
        &self,
        kind: ColumnKind,
        reference_rows: usize,
        distinct_values: usize,
    ) -> DriftTest {
        let choice = match kind {
            ColumnKind::Numeric => self.numeric_test,
            ColumnKind::Categorical => self.categorical_test,
        };
        let p = self.p_value_threshold;
        let d = self.distance_threshold;
        match choice {
            StatTestChoice::Auto => {
                let continuous =
                    kind == ColumnKind::Numeric && distinct_values > LOW_CARDINALITY;
                let large = reference_rows > self.large_sample_rows;
                match (continuous, large) {
                    (true, false) => DriftTest::KS { threshold: p },
                    (true, true) => DriftTest::Wasserstein { threshold: d },
                    (false, true) => DriftTest::JensenShannon { threshold: d },
                    (false, false) if distinct_values > 2 => DriftTest::ChiSquare { threshold: p },
                    (false, false) => DriftTest::Z { threshold: p },
                }
            }
            StatTestChoice::Ks => DriftTest::KS { threshold: p },
            StatTestChoice::ChiSquare => DriftTest::ChiSquare { threshold: p },
            StatTestChoice::Z => DriftTest::Z { threshold: p },
            StatTestChoice::Psi => DriftTest::PSI { threshold: self.psi_threshold },
            StatTestChoice::Wasserstein => DriftTest::Wasserstein { threshold: d },
            StatTestChoice::JensenShannon => DriftTest::JensenShannon { threshold: d },
        }
    }
}

/// Drift verdict for a single column.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColumnDrift {
    pub column_name: String,
    pub column_type: ColumnKind,
    pub stattest_name: String,
    pub stattest_threshold: f64,
    /// p-value for KS/chi-square, distance for the others
    pub drift_score: f64,
    pub drift_detected: bool,
    pub severity: Severity,
}

/// Summary of drift detection results
#[derive(Debug, Clone, PartialEq)]
pub struct DriftSummary {
    /// Total number of columns checked
    pub total_columns: usize,
    /// Number of columns with detected drift
    pub drifted_columns: usize,
    /// Number of near-threshold columns that did not drift
    pub warnings: usize,
    /// Threshold on the drifted share
    pub drift_share: f64,
}

impl DriftSummary {
    pub fn from_results(results: &[ColumnDrift], drift_share: f64) -> Self {
        Self {
            total_columns: results.len(),
            drifted_columns: results.iter().filter(|r| r.drift_detected).count(),
            warnings: results.iter().filter(|r| r.severity == Severity::Warning).count(),
            drift_share,
        }
    }

    /// Whether any column drifted
    pub fn has_drift(&self) -> bool {
        self.drifted_columns > 0
    }

    /// Fraction of columns that drifted
    pub fn share_of_drifted(&self) -> f64 {
        if self.total_columns == 0 {
            0.0
        } else {
            self.drifted_columns as f64 / self.total_columns as f64
        }
    }

    /// Dataset-level verdict: drifted share at or above `drift_share`.
    pub fn dataset_drift(&self) -> bool {
        self.total_columns > 0 && self.share_of_drifted() >= self.drift_share
    }
}
