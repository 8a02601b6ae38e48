//! Drift detector implementation.

use rayon::prelude::*;
use rodar_common::Result;

use super::statistical::{
    aligned_counts, bin_counts, chi_square_p_value, floor_shares, histogram_edges,
    jensen_shannon_distance, ks_exact_p_value, ks_p_value, ks_statistic, sorted, std_dev,
    two_proportion_z_p_value, wasserstein_distance,
};
use super::types::{
    ColumnDrift, ColumnKind, DriftConfig, DriftSummary, DriftTest, Severity, LOW_CARDINALITY,
};
use crate::config::FeatureSchema;
use crate::data::Frame;

/// Bins used by PSI and Jensen-Shannon on numeric columns
const NUMERIC_BINS: usize = 10;

/// Floor for the reference standard deviation when norming Wasserstein
const MIN_NORM_STD: f64 = 0.001;

/// Largest `n1 * n2` for which the KS p-value is computed exactly
const KS_EXACT_MAX_CELLS: usize = 10_000_000;

/// Drift detector comparing reference and current columns
pub struct DriftDetector {
    config: DriftConfig,
    warning_multiplier: f64,
}

impl DriftDetector {
    /// Create a new drift detector with the given settings
    pub fn new(config: DriftConfig) -> Self {
        Self {
            config,
            warning_multiplier: 0.8, // Warning at 80% of threshold
        }
    }

    pub fn config(&self) -> &DriftConfig {
        &self.config
    }

    /// Check one column, resolving the test from its kind, the reference size
    /// and the number of distinct values in both samples.
    pub fn check_column(
        &self,
        name: &str,
        kind: ColumnKind,
        reference: &[f64],
        current: &[f64],
    ) -> ColumnDrift {
        let distinct = aligned_counts(reference, current).len();
        let test = self.config.test_for(kind, reference.len(), distinct);
        let categorical = kind == ColumnKind::Categorical || distinct <= LOW_CARDINALITY;
        self.run_test(name, kind, categorical, test, reference, current)
    }

    /// Check every monitored column of two frames.
    ///
    /// Columns are visited in schema order: numeric features, categorical
    /// features, target, then the prediction column when the reference frame
    /// carries one. Columns are loaded in that order and tested in parallel;
    /// results keep the schema order.
    pub fn check_frame(
        &self,
        reference: &Frame,
        current: &Frame,
        schema: &FeatureSchema,
    ) -> Result<Vec<ColumnDrift>> {
        let mut columns: Vec<(&str, ColumnKind)> = Vec::new();
        columns.extend(schema.numeric.iter().map(|c| (c.as_str(), ColumnKind::Numeric)));
        columns.extend(schema.categorical.iter().map(|c| (c.as_str(), ColumnKind::Categorical)));
        columns.push((schema.target.as_str(), ColumnKind::Numeric));
        if reference.has_column(&schema.prediction) {
            columns.push((schema.prediction.as_str(), ColumnKind::Numeric));
        }

        let samples = columns
            .into_iter()
            .map(|(name, kind)| {
                Ok((name, kind, reference.numeric_column(name)?, current.numeric_column(name)?))
            })
            .collect::<Result<Vec<_>>>()?;

        let results: Vec<ColumnDrift> = samples
            .par_iter()
            .map(|(name, kind, ref_values, cur_values)| {
                self.check_column(name, *kind, ref_values, cur_values)
            })
            .collect();

        for result in &results {
            tracing::debug!(
                column = result.column_name.as_str(),
                test = result.stattest_name.as_str(),
                score = result.drift_score,
                drifted = result.drift_detected,
                "column drift"
            );
        }
        Ok(results)
    }

    /// Summarise results against the configured drift share
    pub fn summary(&self, results: &[ColumnDrift]) -> DriftSummary {
        DriftSummary::from_results(results, self.config.drift_share)
    }

    fn run_test(
        &self,
        name: &str,
        kind: ColumnKind,
        categorical: bool,
        test: DriftTest,
        reference: &[f64],
        current: &[f64],
    ) -> ColumnDrift {
        let score = if reference.is_empty() || current.is_empty() {
            // Nothing to compare: report a non-drifting score
            if test.is_p_value() {
                1.0
            } else {
                0.0
            }
        } else {
            match test {
                DriftTest::KS { .. } => Self::ks_test(reference, current),
                DriftTest::ChiSquare { .. } => Self::chi_square_test(reference, current),
                DriftTest::Z { .. } => Self::z_test(reference, current),
                DriftTest::PSI { .. } => Self::psi_test(categorical, reference, current),
                DriftTest::Wasserstein { .. } => Self::wasserstein_test(reference, current),
                DriftTest::JensenShannon { .. } => {
                    Self::jensen_shannon_test(categorical, reference, current)
                }
            }
        };

        let (drifted, severity) = self.classify_result(test, score);

        ColumnDrift {
            column_name: name.to_string(),
            column_type: kind,
            stattest_name: test.name().to_string(),
            stattest_threshold: test.threshold(),
            drift_score: score,
            drift_detected: drifted,
            severity,
        }
    }

    /// Kolmogorov-Smirnov test; returns the p-value, exact unless both
    /// samples are large
    fn ks_test(reference: &[f64], current: &[f64]) -> f64 {
        let sorted_reference = sorted(reference);
        let sorted_current = sorted(current);
        let d_max = ks_statistic(&sorted_reference, &sorted_current);

        let (n1, n2) = (reference.len(), current.len());
        if n1.saturating_mul(n2) <= KS_EXACT_MAX_CELLS {
            return ks_exact_p_value(n1, n2, d_max);
        }
        let n_eff = (n1 as f64 * n2 as f64) / (n1 + n2) as f64;
        ks_p_value(d_max * n_eff.sqrt())
    }

    /// Chi-square goodness of fit of current against reference frequencies
    /// scaled to the current sample size; returns the p-value
    fn chi_square_test(reference: &[f64], current: &[f64]) -> f64 {
        let scale = current.len() as f64 / reference.len() as f64;
        let cells = aligned_counts(reference, current);

        let mut chi_sq = 0.0;
        for &(_, ref_count, cur_count) in &cells {
            let expected = ref_count as f64 * scale;
            let observed = cur_count as f64;
            if expected > 0.0 {
                chi_sq += (observed - expected).powi(2) / expected;
            } else if observed > 0.0 {
                // A category never seen in reference
                chi_sq = f64::INFINITY;
            }
        }

        let df = cells.len().saturating_sub(1); // degrees of freedom = categories - 1
        chi_square_p_value(chi_sq, df)
    }

    /// Two-proportion Z-test on the share of the first value; returns the
    /// p-value
    fn z_test(reference: &[f64], current: &[f64]) -> f64 {
        match aligned_counts(reference, current).first() {
            Some(&(_, ref_hits, cur_hits)) => {
                two_proportion_z_p_value(ref_hits, reference.len(), cur_hits, current.len())
            }
            None => 1.0,
        }
    }

    /// Population Stability Index over categories, or reference deciles for
    /// continuous columns
    fn psi_test(categorical: bool, reference: &[f64], current: &[f64]) -> f64 {
        let (ref_counts, cur_counts) = if categorical {
            let cells = aligned_counts(reference, current);
            (
                cells.iter().map(|c| c.1).collect::<Vec<_>>(),
                cells.iter().map(|c| c.2).collect::<Vec<_>>(),
            )
        } else {
            let sorted_reference = sorted(reference);
            let mut edges = Vec::with_capacity(NUMERIC_BINS + 1);
            edges.push(f64::NEG_INFINITY);
            for i in 1..NUMERIC_BINS {
                let idx =
                    (sorted_reference.len() * i / NUMERIC_BINS).min(sorted_reference.len() - 1);
                edges.push(sorted_reference[idx]);
            }
            edges.push(f64::INFINITY);
            (bin_counts(reference, &edges), bin_counts(current, &edges))
        };

        let b_pct = floor_shares(&ref_counts, reference.len());
        let c_pct = floor_shares(&cur_counts, current.len());
        b_pct.iter().zip(c_pct.iter()).map(|(b, c)| (c - b) * (c / b).ln()).sum()
    }

    /// Wasserstein distance normed by the reference standard deviation
    fn wasserstein_test(reference: &[f64], current: &[f64]) -> f64 {
        let distance = wasserstein_distance(&sorted(reference), &sorted(current));
        distance / std_dev(reference).max(MIN_NORM_STD)
    }

    /// Jensen-Shannon distance over shared bins
    fn jensen_shannon_test(categorical: bool, reference: &[f64], current: &[f64]) -> f64 {
        let (ref_counts, cur_counts) = if categorical {
            let cells = aligned_counts(reference, current);
            (
                cells.iter().map(|c| c.1).collect::<Vec<_>>(),
                cells.iter().map(|c| c.2).collect::<Vec<_>>(),
            )
        } else {
            let sorted_reference = sorted(reference);
            let sorted_current = sorted(current);
            let edges = histogram_edges(&sorted_reference, &sorted_current, NUMERIC_BINS);
            (bin_counts(reference, &edges), bin_counts(current, &edges))
        };
        jensen_shannon_distance(
            &floor_shares(&ref_counts, reference.len()),
            &floor_shares(&cur_counts, current.len()),
        )
    }

    /// Classify a score against its test's threshold
    fn classify_result(&self, test: DriftTest, score: f64) -> (bool, Severity) {
        let threshold = test.threshold();
        if test.detects(score) {
            (true, Severity::Critical)
        } else if test.is_p_value() && score < threshold / self.warning_multiplier {
            (false, Severity::Warning)
        } else if !test.is_p_value() && score >= threshold * self.warning_multiplier {
            (false, Severity::Warning)
        } else {
            (false, Severity::None)
        }
    }
}
