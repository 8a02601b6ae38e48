//! Row partitioning: the reference/current month slices and the retraining
//! train/test split.

use chrono::Datelike;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rodar_common::{Result, RodarError};

use super::Frame;

/// Latest calendar month split at a day-of-month boundary.
#[derive(Debug, Clone)]
pub struct MonthPartition {
    pub year: i32,
    pub month: u32,
    /// Rows with day-of-month <= split day
    pub reference: Frame,
    /// Rows with day-of-month > split day
    pub current: Frame,
}

impl MonthPartition {
    /// `YYYY-MM` label of the partitioned month.
    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

/// Partition the latest `(year, month)` of `date_column` into reference and
/// current slices.
///
/// Rows of each slice are ordered by date; rows sharing a date keep their
/// source order. Rows outside the latest month are dropped.
pub fn partition_latest_month(
    frame: &Frame,
    date_column: &str,
    split_day: u32,
) -> Result<MonthPartition> {
    let dates = frame.date_column(date_column)?;
    let (year, month) = dates
        .iter()
        .map(|d| (d.year(), d.month()))
        .max()
        .ok_or_else(|| RodarError::EmptyDataset {
            context: format!("{} has no rows to partition", frame.source().display()),
        })?;

    let mut in_month: Vec<usize> =
        (0..dates.len()).filter(|&i| dates[i].year() == year && dates[i].month() == month).collect();
    // Stable: equal dates keep source order
    in_month.sort_by_key(|&i| dates[i]);

    let (reference_rows, current_rows): (Vec<usize>, Vec<usize>) =
        in_month.into_iter().partition(|&i| dates[i].day() <= split_day);

    Ok(MonthPartition {
        year,
        month,
        reference: frame.select_rows(&reference_rows),
        current: frame.select_rows(&current_rows),
    })
}

/// Row indices of a shuffled train/test split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Number of test rows for `n_rows` at `test_ratio`: the ceiling, clamped so
/// both sides keep at least one row whenever `n_rows >= 2`.
pub fn test_size(n_rows: usize, test_ratio: f64) -> usize {
    let raw = (test_ratio * n_rows as f64).ceil() as usize;
    if n_rows >= 2 {
        raw.clamp(1, n_rows - 1)
    } else {
        raw.min(n_rows)
    }
}

/// Shuffle `0..n_rows` with a seeded ChaCha8 RNG; the first `test_size`
/// indices become the test set.
pub fn train_test_split(n_rows: usize, test_ratio: f64, seed: u64) -> SplitIndices {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut indices: Vec<usize> = (0..n_rows).collect();
    indices.shuffle(&mut rng);

    let n_test = test_size(n_rows, test_ratio);
    let (test, train) = indices.split_at(n_test);

    SplitIndices { train: train.to_vec(), test: test.to_vec() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(dates: &[&str]) -> Frame {
        Frame::new(
            vec!["dteday".into(), "id".into()],
            dates.iter().enumerate().map(|(i, d)| vec![d.to_string(), i.to_string()]).collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_partition_latest_month_boundaries() {
        let f = frame(&["2012-11-25", "2012-12-01", "2012-12-20", "2012-12-21", "2012-12-31"]);
        let p = partition_latest_month(&f, "dteday", 20).unwrap();

        assert_eq!((p.year, p.month), (2012, 12));
        assert_eq!(p.label(), "2012-12");
        assert_eq!(p.reference.text_column("id").unwrap(), vec!["1", "2"]);
        assert_eq!(p.current.text_column("id").unwrap(), vec!["3", "4"]);
    }

    #[test]
    fn test_partition_orders_by_date_stably() {
        let f = frame(&["2011-01-05", "2011-01-02", "2011-01-05", "2011-01-25"]);
        let p = partition_latest_month(&f, "dteday", 20).unwrap();
        assert_eq!(p.reference.text_column("id").unwrap(), vec!["1", "0", "2"]);
    }

    #[test]
    fn test_partition_year_beats_month() {
        let f = frame(&["2011-12-28", "2012-01-03"]);
        let p = partition_latest_month(&f, "dteday", 20).unwrap();
        assert_eq!((p.year, p.month), (2012, 1));
        assert_eq!(p.reference.len(), 1);
        assert!(p.current.is_empty());
    }

    #[test]
    fn test_partition_empty_frame() {
        let f = frame(&[]);
        assert!(matches!(
            partition_latest_month(&f, "dteday", 20),
            Err(RodarError::EmptyDataset { .. })
        ));
    }

    #[test]
    fn test_test_size_rounding() {
        assert_eq!(test_size(100, 0.2), 20);
        assert_eq!(test_size(11, 0.2), 3);
        assert_eq!(test_size(2, 0.01), 1);
        assert_eq!(test_size(2, 0.99), 1);
        assert_eq!(test_size(1, 0.2), 1);
        assert_eq!(test_size(0, 0.2), 0);
    }

    #[test]
    fn test_split_is_deterministic() {
        let a = train_test_split(50, 0.2, 42);
        let b = train_test_split(50, 0.2, 42);
        assert_eq!(a, b);
        assert_eq!(a.test.len(), 10);
        assert_eq!(a.train.len(), 40);

        let c = train_test_split(50, 0.2, 7);
        assert_ne!(a, c);
    }
}
