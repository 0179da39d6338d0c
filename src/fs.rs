//! File system utilities.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Writes content to a file atomically using a temp file and rename.
///
/// Missing parent directories are created. The temp file lives next to the
/// target so the rename stays on one filesystem.
pub fn atomic_write(path: &Path, content: &str) -> Result<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create directory: {}", parent.display()))?;

    let file_name = path.file_name().unwrap_or_default().to_string_lossy();
    let temp_path = parent.join(format!(".{file_name}.tmp"));

    fs::write(&temp_path, content)
        .with_context(|| format!("Failed to write file: {}", temp_path.display()))?;
    fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to move file into place: {}", path.display()))?;

    Ok(())
}
