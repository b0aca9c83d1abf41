pub mod config;
pub mod error;
pub mod files;
pub mod github;
pub mod output;
pub mod pipeline;
pub mod report;
pub mod table;

pub use config::{RunConfig, RunInputs};
pub use error::{BioTableError, Result};
pub use files::{update_files, UpdateSummary};
pub use github::{FetchError, GithubClient, GithubClientConfig};
pub use pipeline::RunOutcome;
pub use report::{ActionReporter, RecordingLogger, UpdateLogger};
pub use table::{convert_bio_to_table, TableRow};
