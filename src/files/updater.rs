use std::borrow::Cow;
use std::fs;
use std::path::Path;

use regex::{NoExpand, Regex};

use crate::error::{BioTableError, Result};
use crate::report::UpdateLogger;
use crate::table::escape_regex;

/// Outcome of one `update_files` batch, paths in input order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateSummary {
    pub updated: Vec<String>,
    pub missing: Vec<String>,
    pub failed: Vec<String>,
}

impl UpdateSummary {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Split a comma-separated file list, dropping blank entries.
///
/// Duplicates are kept; each occurrence is processed.
pub fn split_file_list(files: &str) -> Vec<&str> {
    files
        .split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .collect()
}

/// Pattern matching lines that consist of `placeholder` plus optional
/// trailing spaces or tabs. Leading whitespace is not tolerated.
///
/// Both `\n` and `\r\n` end a line; the line terminator itself is kept.
pub fn placeholder_pattern(placeholder: &str) -> Result<Regex> {
    let pattern = format!(r"(?mR)^{}[ \t]*$", escape_regex(placeholder));
    Regex::new(&pattern)
        .map_err(|e| BioTableError::Config(format!("invalid placeholder pattern: {}", e)))
}

/// Replace every matching placeholder line with `table`, inserted verbatim.
pub fn replace_placeholder<'a>(content: &'a str, pattern: &Regex, table: &str) -> Cow<'a, str> {
    pattern.replace_all(content, NoExpand(table))
}

/// Substitute `table` for the placeholder line in every listed file.
///
/// Files are handled independently: a missing file is a warning, an I/O
/// error is a failure for that file only, and the batch always runs to the end.
pub fn update_files(
    table: &str,
    files: &str,
    placeholder: &str,
    logger: &dyn UpdateLogger,
) -> UpdateSummary {
    let mut summary = UpdateSummary::default();
    let file_list = split_file_list(files);

    let pattern = match placeholder_pattern(placeholder) {
        Ok(pattern) => pattern,
        Err(e) => {
            for file in file_list {
                logger.set_failed(&format!("Error updating {}: {}", file, e));
                summary.failed.push(file.to_string());
            }
            return summary;
        }
    };

    for file in file_list {
        let path = Path::new(file);
        if !path.exists() {
            logger.warning(&format!("File {} not found", file));
            summary.missing.push(file.to_string());
            continue;
        }

        match rewrite_file(path, &pattern, table) {
            Ok(()) => {
                logger.info(&format!("Updated {}", file));
                summary.updated.push(file.to_string());
            }
            Err(e) => {
                logger.set_failed(&format!("Error updating {}: {}", file, e));
                summary.failed.push(file.to_string());
            }
        }
    }

    summary
}

fn rewrite_file(path: &Path, pattern: &Regex, table: &str) -> std::io::Result<()> {
    let content = fs::read_to_string(path)?;
    let updated = replace_placeholder(&content, pattern, table);
    fs::write(path, updated.as_bytes())
}
