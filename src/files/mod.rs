//! In-place placeholder substitution across target files

pub mod updater;

pub use updater::{
    placeholder_pattern, replace_placeholder, split_file_list, update_files, UpdateSummary,
};
