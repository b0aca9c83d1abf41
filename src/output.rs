//! Step outputs for GitHub Actions
//!
//! Values are appended to the file named by `GITHUB_OUTPUT` using the
//! heredoc form, so multi-line values such as a table survive intact.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::{BioTableError, Result};

/// Output file named by `GITHUB_OUTPUT`, when running in a workflow step
pub fn output_file_from_env() -> Option<PathBuf> {
    std::env::var_os("GITHUB_OUTPUT")
        .filter(|path| !path.is_empty())
        .map(PathBuf::from)
}

/// Append one heredoc-formatted output entry to `path`
pub fn append_output(path: &Path, name: &str, value: &str) -> Result<()> {
    let delimiter = format!("ghadelimiter_{}", Uuid::new_v4());
    if name.contains(&delimiter) || value.contains(&delimiter) {
        return Err(BioTableError::Output(format!(
            "output {} collides with delimiter {}",
            name, delimiter
        )));
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| BioTableError::Output(format!("{}: {}", path.display(), e)))?;

    write!(file, "{}<<{}\n{}\n{}\n", name, delimiter, value, delimiter)?;
    Ok(())
}
