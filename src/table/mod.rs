//! Bio to Markdown table conversion
//!
//! Splits a delimiter-separated `key: value` bio into rows and renders them
//! as a two-column pipe table.

pub mod parser;

pub use parser::{
    convert_bio_to_table, escape_regex, parse_entries, TableRow, DEFAULT_DELIMITER, TABLE_HEADER,
};
