//! Fetch, convert and write: the full bio-to-table run

use std::path::Path;

use tracing::debug;

use crate::config::RunConfig;
use crate::files::{update_files, UpdateSummary};
use crate::github::GithubClient;
use crate::output::append_output;
use crate::report::UpdateLogger;
use crate::table::convert_bio_to_table;

/// Name of the step output carrying the generated table
pub const TABLE_OUTPUT: &str = "table";

/// What a run produced
#[derive(Debug, Clone, Default)]
pub struct RunOutcome {
    /// Generated table, `None` when the bio could not be fetched
    pub table: Option<String>,
    pub summary: UpdateSummary,
}

/// Fetch the bio for `config.user`, render it and update the target files.
///
/// Failures are reported through `logger`; a fetch failure is reported as
/// both a warning and a failure and ends the run before any file is touched.
pub async fn run(
    config: &RunConfig,
    client: &GithubClient,
    output_file: Option<&Path>,
    logger: &dyn UpdateLogger,
) -> RunOutcome {
    logger.info(&format!("Fetching bio for user: {}", config.user));

    let bio = match client.fetch_bio(&config.user).await {
        Ok(bio) => bio,
        Err(e) => {
            let message = e.to_string();
            logger.warning(&message);
            logger.set_failed(&message);
            return RunOutcome::default();
        }
    };

    let table = convert_bio_to_table(&bio, &config.delimiter);

    if let Some(path) = output_file {
        match append_output(path, TABLE_OUTPUT, &table) {
            Ok(()) => debug!("Wrote {} output to {}", TABLE_OUTPUT, path.display()),
            Err(e) => logger.set_failed(&format!("Unable to set output {}: {}", TABLE_OUTPUT, e)),
        }
    }

    logger.info("Generated table:");
    logger.info(&table);

    let summary = update_files(&table, &config.files, &config.placeholder, logger);

    RunOutcome {
        table: Some(table),
        summary,
    }
}
