//! Property tests for row partitioning and the retraining split
//!
//! - Month partitions are disjoint, cover the latest month exactly and
//!   respect the split day
//! - Train/test splits are a deterministic partition of the row indices

use chrono::{Datelike, NaiveDate};
use proptest::collection::vec;
use proptest::prelude::*;
use rodar::data::{partition_latest_month, test_size, train_test_split, Frame};
use std::collections::BTreeSet;

// =============================================================================
// Strategy Helpers
// =============================================================================

/// Dates spread over a few months of 2011-2012
fn dates(len: std::ops::Range<usize>) -> impl Strategy<Value = Vec<NaiveDate>> {
    vec((2011i32..=2012, 1u32..=3, 1u32..=28), len).prop_map(|parts| {
        parts
            .into_iter()
            .filter_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d))
            .collect()
    })
}

fn frame(dates: &[NaiveDate]) -> Frame {
    let rows = dates
        .iter()
        .enumerate()
        .map(|(i, d)| vec![d.format("%Y-%m-%d").to_string(), i.to_string()])
        .collect();
    Frame::new(vec!["dteday".into(), "id".into()], rows).unwrap()
}

fn ids(frame: &Frame) -> Vec<usize> {
    frame.text_column("id").unwrap().iter().map(|s| s.parse().unwrap()).collect()
}

// =============================================================================
// Partition Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_partition_covers_latest_month(dates in dates(1..80), split_day in 1u32..=30) {
        let p = partition_latest_month(&frame(&dates), "dteday", split_day).unwrap();

        let latest = dates.iter().map(|d| (d.year(), d.month())).max().unwrap();
        prop_assert_eq!((p.year, p.month), latest);

        let reference = ids(&p.reference);
        let current = ids(&p.current);

        let ref_set: BTreeSet<_> = reference.iter().copied().collect();
        let cur_set: BTreeSet<_> = current.iter().copied().collect();
        prop_assert!(ref_set.is_disjoint(&cur_set));

        let expected: BTreeSet<usize> = dates
            .iter()
            .enumerate()
            .filter(|(_, d)| (d.year(), d.month()) == latest)
            .map(|(i, _)| i)
            .collect();
        let union: BTreeSet<_> = ref_set.union(&cur_set).copied().collect();
        prop_assert_eq!(union, expected);

        prop_assert!(reference.iter().all(|&i| dates[i].day() <= split_day));
        prop_assert!(current.iter().all(|&i| dates[i].day() > split_day));
    }

    #[test]
    fn prop_partition_rows_are_date_ordered(dates in dates(1..80)) {
        let p = partition_latest_month(&frame(&dates), "dteday", 20).unwrap();
        for slice in [&p.reference, &p.current] {
            let ids = ids(slice);
            for pair in ids.windows(2) {
                let (a, b) = (dates[pair[0]], dates[pair[1]]);
                prop_assert!(a < b || (a == b && pair[0] < pair[1]));
            }
        }
    }
}

// =============================================================================
// Split Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_split_partitions_indices(n in 2usize..500, ratio in 0.01f64..0.99, seed in any::<u64>()) {
        let split = train_test_split(n, ratio, seed);

        prop_assert_eq!(split.test.len(), test_size(n, ratio));
        prop_assert!(!split.test.is_empty());
        prop_assert!(!split.train.is_empty());

        let mut all: Vec<usize> = split.train.iter().chain(split.test.iter()).copied().collect();
        all.sort_unstable();
        prop_assert_eq!(all, (0..n).collect::<Vec<_>>());
    }

    #[test]
    fn prop_split_is_deterministic(n in 0usize..300, ratio in 0.01f64..0.99, seed in any::<u64>()) {
        prop_assert_eq!(train_test_split(n, ratio, seed), train_test_split(n, ratio, seed));
    }

    #[test]
    fn prop_test_size_is_ceiling(n in 2usize..10_000, ratio in 0.01f64..0.99) {
        let size = test_size(n, ratio);
        let ceil = (ratio * n as f64).ceil() as usize;
        prop_assert_eq!(size, ceil.clamp(1, n - 1));
    }
}
