use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use bio_table::config::{resolve_user, RunConfig, RunInputs, DEFAULT_FILES, DEFAULT_PLACEHOLDER};
use bio_table::error::Result;
use bio_table::github::client::DEFAULT_API_BASE;
use bio_table::output::output_file_from_env;
use bio_table::pipeline;
use bio_table::report::{ActionReporter, UpdateLogger};
use bio_table::table::{convert_bio_to_table, DEFAULT_DELIMITER};
use bio_table::{GithubClient, GithubClientConfig};

#[derive(Parser)]
#[command(name = "bio-table")]
#[command(about = "Render a GitHub profile bio as a Markdown table and write it into files")]
#[command(version)]
#[command(after_long_help = r#"
EXAMPLES:
    # Replace the placeholder line in README.md with your bio table
    bio-table run --user octocat

    # Several files, custom placeholder and delimiter
    bio-table run --files "README.md, docs/about.md" --placeholder "{{bio}}" --delimiter ";"

    # Preview a table without touching the network
    bio-table convert "Role: Programmer / Editor: Neovim"

    # Print the raw bio
    bio-table fetch --user octocat

Inside a GitHub Actions step every option also reads the matching
INPUT_* variable, the user falls back to GITHUB_ACTOR and the token to
GITHUB_TOKEN.
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the bio, convert it and update the target files
    Run {
        #[command(flatten)]
        source: SourceArgs,

        /// Delimiter separating bio entries
        #[arg(long, env = "INPUT_DELIMITER", default_value = DEFAULT_DELIMITER)]
        delimiter: String,

        /// Comma-separated list of files to update
        #[arg(long, env = "INPUT_FILES", default_value = DEFAULT_FILES)]
        files: String,

        /// Line marker replaced by the table
        #[arg(long, env = "INPUT_PLACEHOLDER", default_value = DEFAULT_PLACEHOLDER)]
        placeholder: String,
    },

    /// Convert a bio string to a table and print it
    Convert {
        /// Bio text, e.g. "Role: Programmer / Editor: Neovim"
        bio: String,

        /// Delimiter separating bio entries
        #[arg(long, default_value = DEFAULT_DELIMITER)]
        delimiter: String,
    },

    /// Fetch and print a user's bio
    Fetch {
        #[command(flatten)]
        source: SourceArgs,
    },
}

#[derive(Args)]
pub struct SourceArgs {
    /// GitHub login whose bio is used (defaults to GITHUB_ACTOR)
    #[arg(long, env = "INPUT_USER")]
    pub user: Option<String>,

    /// Token for authenticated API requests (defaults to GITHUB_TOKEN)
    #[arg(long, env = "INPUT_GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Base URL of the GitHub REST API
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_BASE)]
    pub api_url: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "30")]
    pub timeout: u64,
}

impl SourceArgs {
    fn client(&self, token: Option<String>) -> Result<GithubClient> {
        GithubClient::new(GithubClientConfig {
            api_base: self.api_url.clone(),
            token,
            timeout: Duration::from_secs(self.timeout),
            ..GithubClientConfig::default()
        })
    }
}

/// Run the full pipeline. Returns `false` when any failure was reported.
pub async fn run(
    source: SourceArgs,
    delimiter: String,
    files: String,
    placeholder: String,
) -> Result<bool> {
    let reporter = ActionReporter::from_env();

    let inputs = RunInputs {
        user: source.user.clone(),
        delimiter: Some(delimiter),
        files: Some(files),
        placeholder: Some(placeholder),
        github_token: source.github_token.clone(),
    };
    let config = match RunConfig::from_env(inputs) {
        Ok(config) => config,
        Err(e) => {
            reporter.set_failed(&e.to_string());
            return Ok(false);
        }
    };

    let client = source.client(config.token.clone())?;
    let output_file = output_file_from_env();
    let outcome = pipeline::run(&config, &client, output_file.as_deref(), &reporter).await;

    tracing::debug!(
        updated = outcome.summary.updated.len(),
        missing = outcome.summary.missing.len(),
        failed = outcome.summary.failed.len(),
        "Run finished"
    );

    Ok(!reporter.has_failed())
}

pub fn convert(bio: &str, delimiter: &str) {
    println!("{}", convert_bio_to_table(bio, delimiter));
}

/// Print the bio of the resolved user. Returns `false` when it could not be fetched.
pub async fn fetch(source: SourceArgs) -> Result<bool> {
    let reporter = ActionReporter::from_env();
    let env = |key: &str| std::env::var(key).ok();
    let user = match resolve_user(source.user.clone(), &env) {
        Ok(user) => user,
        Err(e) => {
            reporter.set_failed(&e.to_string());
            return Ok(false);
        }
    };
    let token = source
        .github_token
        .clone()
        .filter(|t| !t.is_empty())
        .or_else(|| env("GITHUB_TOKEN").filter(|t| !t.is_empty()));

    let client = source.client(token)?;
    match client.fetch_bio(&user).await {
        Ok(bio) => {
            println!("{}", bio);
            Ok(true)
        }
        Err(e) => {
            reporter.set_failed(&e.to_string());
            Ok(false)
        }
    }
}
