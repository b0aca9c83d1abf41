use regex::Regex;
use tracing::debug;

/// Delimiter used when the caller supplies an empty one
pub const DEFAULT_DELIMITER: &str = "/";

/// Header lines emitted before any row
pub const TABLE_HEADER: [&str; 2] = ["| | |", "|---:|:---|"];

const REGEX_META: &[char] = &[
    '.', '*', '+', '?', '^', '$', '{', '}', '(', ')', '|', '[', ']', '\\',
];

/// Backslash-escape every regex metacharacter so `literal` matches itself.
pub fn escape_regex(literal: &str) -> String {
    let mut escaped = String::with_capacity(literal.len());
    for c in literal.chars() {
        if REGEX_META.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// One `key: value` entry of a bio
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub key: String,
    pub value: String,
}

impl TableRow {
    /// Parse a single bio segment.
    ///
    /// Splits on the first colon only, so the value keeps any further colons.
    /// Returns `None` for segments without a colon or with an empty key.
    pub fn parse(segment: &str) -> Option<Self> {
        let (key, value) = segment.split_once(':')?;
        let key = key.trim();
        if key.is_empty() {
            return None;
        }

        Some(Self {
            key: key.to_string(),
            value: value.trim().to_string(),
        })
    }

    /// Render as a Markdown table line
    pub fn to_markdown(&self) -> String {
        format!("| **{}** | {} |", self.key, self.value)
    }
}

/// Split `bio` on `delimiter` and parse every well-formed entry, in source order.
pub fn parse_entries(bio: &str, delimiter: &str) -> Vec<TableRow> {
    let sep = if delimiter.is_empty() {
        DEFAULT_DELIMITER
    } else {
        delimiter
    };

    split_segments(bio, sep)
        .into_iter()
        .filter_map(TableRow::parse)
        .collect()
}

/// Convert a delimiter-separated bio into a Markdown table.
///
/// Never fails: malformed entries are skipped and an empty bio yields only
/// the header lines.
pub fn convert_bio_to_table(bio: &str, delimiter: &str) -> String {
    let rows = parse_entries(bio, delimiter);

    TABLE_HEADER
        .iter()
        .map(|line| line.to_string())
        .chain(rows.iter().map(TableRow::to_markdown))
        .collect::<Vec<_>>()
        .join("\n")
}

fn split_segments<'a>(bio: &'a str, sep: &str) -> Vec<&'a str> {
    let pieces: Vec<&str> = match Regex::new(&format!(r"\s*{}\s*", escape_regex(sep))) {
        Ok(splitter) => splitter.split(bio).collect(),
        Err(e) => {
            // Segments are trimmed below, so a plain split yields the same entries
            debug!("Delimiter pattern rejected ({}), splitting literally", e);
            bio.split(sep).collect()
        }
    };

    pieces
        .into_iter()
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect()
}
