//! Artifact reading

use rodar_common::{Result, RodarError};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Read a text artifact. A missing file is reported through `not_found`,
/// so each artifact kind surfaces its own error variant.
pub fn read_text(
    path: impl AsRef<Path>,
    not_found: impl FnOnce(PathBuf) -> RodarError,
) -> Result<String> {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(not_found(path.to_path_buf())),
        Err(e) => Err(RodarError::io(format!("reading {}", path.display()), e)),
    }
}

/// Read and deserialize a JSON artifact.
///
/// Nesting depth is not limited: a fitted forest stores each tree as nested
/// nodes, one level per split.
pub fn read_json<T: DeserializeOwned>(
    path: impl AsRef<Path>,
    not_found: impl FnOnce(PathBuf) -> RodarError,
) -> Result<T> {
    let path = path.as_ref();
    let content = read_text(path, not_found)?;
    let mut de = serde_json::Deserializer::from_str(&content);
    de.disable_recursion_limit();
    T::deserialize(&mut de).and_then(|value| de.end().map(|()| value)).map_err(|e| {
        RodarError::serialization(format!("JSON deserialization of {} failed: {e}", path.display()))
    })
}
