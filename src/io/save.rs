//! Artifact writing

use rodar_common::{Result, RodarError};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Create the parent directory of `path` if it does not exist yet.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)
            .map_err(|e| RodarError::io(format!("creating directory {}", parent.display()), e)),
        _ => Ok(()),
    }
}

/// Write `content` to `path` exactly as given, creating parent directories.
///
/// # Example
///
/// ```no_run
/// use rodar::io::write_text;
///
/// write_text("reports/drift_status.txt", "false").expect("flag written");
/// ```
pub fn write_text(path: impl AsRef<Path>, content: &str) -> Result<()> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;

    let mut file = File::create(path)
        .map_err(|e| RodarError::io(format!("creating {}", path.display()), e))?;
    file.write_all(content.as_bytes())
        .map_err(|e| RodarError::io(format!("writing {}", path.display()), e))?;

    Ok(())
}

/// Serialize `value` as pretty JSON (two-space indent, trailing newline).
pub fn to_json_pretty<T: Serialize>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value)
        .map_err(|e| RodarError::serialization(format!("JSON serialization failed: {e}")))?;
    json.push('\n');
    Ok(json)
}

/// Serialize `value` as pretty JSON and write it to `path`.
pub fn write_json<T: Serialize>(path: impl AsRef<Path>, value: &T) -> Result<()> {
    write_text(path, &to_json_pretty(value)?)
}
