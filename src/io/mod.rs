//! File I/O for pipeline artifacts: parent-directory creation, text and
//! pretty-JSON writes, and reads that map a missing file to the caller's
//! error variant.

mod load;
mod save;

pub use load::{read_json, read_text};
pub use save::{ensure_parent_dir, to_json_pretty, write_json, write_text};
