//! Regression metrics: RMSE, MAE, mean error, MAPE, R², max error, error spread
//!
//! RMSE, MAE and R² delegate to [`aprender::metrics`]; the remaining
//! summaries have no aprender counterpart and are computed here. Every
//! function checks that both slices have the same, non-zero length and
//! returns [`RodarError::ShapeMismatch`] or [`RodarError::EmptyDataset`]
//! otherwise. Errors are `prediction - target`.

use aprender::primitives::Vector;
use rodar_common::{Result, RodarError};
use serde::{Deserialize, Serialize};

fn check(y_true: &[f64], y_pred: &[f64]) -> Result<()> {
    if y_true.len() != y_pred.len() {
        return Err(RodarError::ShapeMismatch { expected: y_true.len(), actual: y_pred.len() });
    }
    if y_true.is_empty() {
        return Err(RodarError::EmptyDataset { context: "no rows to score".into() });
    }
    if let Some(row) = y_true.iter().chain(y_pred).position(|v| !v.is_finite()) {
        return Err(RodarError::Internal {
            message: format!("non-finite value at row {} while scoring", row % y_true.len() + 1),
        });
    }
    Ok(())
}

/// Convert a column to an aprender Vector for delegation.
fn to_vector(values: &[f64]) -> Vector<f32> {
    Vector::from_vec(values.iter().map(|&v| v as f32).collect())
}

fn errors<'a>(y_true: &'a [f64], y_pred: &'a [f64]) -> impl Iterator<Item = f64> + 'a {
    y_true.iter().zip(y_pred).map(|(t, p)| p - t)
}

/// Root Mean Squared Error
///
/// Delegates to [`aprender::metrics::rmse`]. RMSE = sqrt(mean((y_pred - y)²))
///
/// # Example
///
/// ```
/// use rodar::eval::metrics::rmse;
///
/// let value = rmse(&[1.0, 2.0, 3.0], &[1.0, 2.0, 5.0]).unwrap();
/// assert!((value - (4.0f64 / 3.0).sqrt()).abs() < 1e-6);
/// ```
pub fn rmse(y_true: &[f64], y_pred: &[f64]) -> Result<f64> {
    check(y_true, y_pred)?;
    Ok(f64::from(aprender::metrics::rmse(&to_vector(y_pred), &to_vector(y_true))))
}

/// Mean Absolute Error
///
/// Delegates to [`aprender::metrics::mae`].
pub fn mae(y_true: &[f64], y_pred: &[f64]) -> Result<f64> {
    check(y_true, y_pred)?;
    Ok(f64::from(aprender::metrics::mae(&to_vector(y_pred), &to_vector(y_true))))
}

/// Mean signed error; positive when the model over-predicts
pub fn mean_error(y_true: &[f64], y_pred: &[f64]) -> Result<f64> {
    check(y_true, y_pred)?;
    Ok(errors(y_true, y_pred).sum::<f64>() / y_true.len() as f64)
}

/// Mean Absolute Percentage Error, in percent
///
/// Rows with a zero target are skipped. Returns `None` when every target is zero.
pub fn mape(y_true: &[f64], y_pred: &[f64]) -> Result<Option<f64>> {
    check(y_true, y_pred)?;
    let (sum, n) = y_true
        .iter()
        .zip(y_pred.iter())
        .filter(|(t, _)| **t != 0.0)
        .fold((0.0, 0usize), |(sum, n), (t, p)| (sum + ((p - t) / t).abs(), n + 1));
    Ok((n > 0).then(|| 100.0 * sum / n as f64))
}

/// R² (coefficient of determination)
///
/// Delegates to [`aprender::metrics::r_squared`]. aprender scores a constant
/// target as 0.0; an exact prediction of a constant target scores 1.0 here.
pub fn r2(y_true: &[f64], y_pred: &[f64]) -> Result<f64> {
    check(y_true, y_pred)?;
    let r2 = aprender::metrics::r_squared(&to_vector(y_pred), &to_vector(y_true));
    if r2 == 0.0 && errors(y_true, y_pred).all(|e| e == 0.0) {
        return Ok(1.0);
    }
    Ok(f64::from(r2))
}

/// Largest absolute error
pub fn max_abs_error(y_true: &[f64], y_pred: &[f64]) -> Result<f64> {
    check(y_true, y_pred)?;
    Ok(errors(y_true, y_pred).map(f64::abs).fold(0.0, f64::max))
}

/// Sample standard deviation of the errors (0.0 for a single row)
pub fn error_std(y_true: &[f64], y_pred: &[f64]) -> Result<f64> {
    check(y_true, y_pred)?;
    let n = y_true.len();
    if n < 2 {
        return Ok(0.0);
    }
    let mean = errors(y_true, y_pred).sum::<f64>() / n as f64;
    let var = errors(y_true, y_pred).map(|e| (e - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    Ok(var.sqrt())
}

/// Regression quality of one dataset slice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionQuality {
    pub rows: usize,
    pub rmse: f64,
    pub mean_abs_error: f64,
    pub mean_error: f64,
    pub mean_abs_perc_error: Option<f64>,
    pub r2_score: f64,
    pub abs_error_max: f64,
    pub error_std: f64,
}

impl RegressionQuality {
    pub fn compute(y_true: &[f64], y_pred: &[f64]) -> Result<Self> {
        Ok(Self {
            rows: y_true.len(),
            rmse: rmse(y_true, y_pred)?,
            mean_abs_error: mae(y_true, y_pred)?,
            mean_error: mean_error(y_true, y_pred)?,
            mean_abs_perc_error: mape(y_true, y_pred)?,
            r2_score: r2(y_true, y_pred)?,
            abs_error_max: max_abs_error(y_true, y_pred)?,
            error_std: error_std(y_true, y_pred)?,
        })
    }
}
