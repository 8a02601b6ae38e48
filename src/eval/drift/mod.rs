//! Drift Detection Module
//!
//! Implements Jidoka (Automation with Human Touch) for detecting when the
//! incoming data no longer looks like what the model was trained on.
//!
//! Provides statistical tests for detecting data drift:
//! - Kolmogorov-Smirnov test (numeric columns, small samples; exact p-value
//!   unless both samples are large)
//! - Chi-square test (categorical columns, small samples)
//! - Two-proportion Z-test (columns with at most two values, small samples)
//! - Normed Wasserstein distance (numeric columns, large samples)
//! - Jensen-Shannon distance (categorical columns, large samples)
//! - Population Stability Index (PSI)
//!
//! Numeric columns with few distinct values are tested as categories.

mod detector;
mod statistical;
mod types;

#[cfg(test)]
mod tests;

pub use detector::DriftDetector;
pub use types::{
    ColumnDrift, ColumnKind, DriftConfig, DriftSummary, DriftTest, Severity, StatTestChoice,
    LOW_CARDINALITY,
};

// Re-export statistical functions for testing/advanced use
pub use statistical::{
    chi_square_p_value, erf, ks_exact_p_value, ks_p_value, normal_cdf, two_proportion_z_p_value,
    wasserstein_distance,
};
