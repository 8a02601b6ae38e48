//! Tabular data: CSV frames and the row partitions the jobs work on.

mod frame;
mod split;

pub use frame::Frame;
pub use split::{partition_latest_month, test_size, train_test_split, MonthPartition, SplitIndices};
