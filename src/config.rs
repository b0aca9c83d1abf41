//! Run configuration resolution
//!
//! Combines explicit inputs with the environment a GitHub Actions runner
//! provides. Empty values count as unset.

use crate::error::{BioTableError, Result};
use crate::table::DEFAULT_DELIMITER;

pub const DEFAULT_FILES: &str = "README.md";
pub const DEFAULT_PLACEHOLDER: &str = "<!-- bio-table -->";

/// Raw inputs as given on the command line or via `INPUT_*` variables
#[derive(Debug, Clone, Default)]
pub struct RunInputs {
    pub user: Option<String>,
    pub delimiter: Option<String>,
    pub files: Option<String>,
    pub placeholder: Option<String>,
    pub github_token: Option<String>,
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub user: String,
    pub token: Option<String>,
    pub delimiter: String,
    pub files: String,
    pub placeholder: String,
}

impl RunConfig {
    /// Resolve inputs, consulting `env` for fallbacks.
    ///
    /// The user falls back to `GITHUB_ACTOR`, then `GITHUB_REPOSITORY_OWNER`;
    /// the token falls back to `GITHUB_TOKEN`.
    pub fn resolve<F>(inputs: RunInputs, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let user = resolve_user(inputs.user, &env)?;
        let token = non_empty(inputs.github_token).or_else(|| non_empty(env("GITHUB_TOKEN")));

        Ok(Self {
            user,
            token,
            delimiter: non_empty(inputs.delimiter).unwrap_or_else(|| DEFAULT_DELIMITER.to_string()),
            files: non_empty(inputs.files).unwrap_or_else(|| DEFAULT_FILES.to_string()),
            placeholder: non_empty(inputs.placeholder)
                .unwrap_or_else(|| DEFAULT_PLACEHOLDER.to_string()),
        })
    }

    /// Resolve against the process environment
    pub fn from_env(inputs: RunInputs) -> Result<Self> {
        Self::resolve(inputs, |key| std::env::var(key).ok())
    }
}

/// Resolve the profile owner from the input or the runner environment
pub fn resolve_user<F>(user: Option<String>, env: &F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    non_empty(user)
        .or_else(|| non_empty(env("GITHUB_ACTOR")))
        .or_else(|| non_empty(env("GITHUB_REPOSITORY_OWNER")))
        .ok_or_else(|| {
            BioTableError::Config("Unable to resolve a username (set input \"user\").".to_string())
        })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let inputs = RunInputs {
            user: Some("octo".to_string()),
            ..Default::default()
        };
        let config = RunConfig::resolve(inputs, env_of(&[])).unwrap();

        assert_eq!(config.user, "octo");
        assert_eq!(config.token, None);
        assert_eq!(config.delimiter, "/");
        assert_eq!(config.files, DEFAULT_FILES);
        assert_eq!(config.placeholder, DEFAULT_PLACEHOLDER);
    }

    #[test]
    fn test_user_fallback_order() {
        let env = env_of(&[("GITHUB_ACTOR", "actor"), ("GITHUB_REPOSITORY_OWNER", "owner")]);
        let config = RunConfig::resolve(RunInputs::default(), &env).unwrap();
        assert_eq!(config.user, "actor");

        let env = env_of(&[("GITHUB_ACTOR", ""), ("GITHUB_REPOSITORY_OWNER", "owner")]);
        let config = RunConfig::resolve(RunInputs::default(), &env).unwrap();
        assert_eq!(config.user, "owner");

        let inputs = RunInputs {
            user: Some("explicit".to_string()),
            ..Default::default()
        };
        let config = RunConfig::resolve(inputs, env_of(&[("GITHUB_ACTOR", "actor")])).unwrap();
        assert_eq!(config.user, "explicit");
    }

    #[test]
    fn test_missing_user_is_error() {
        let err = RunConfig::resolve(RunInputs::default(), env_of(&[])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unable to resolve a username (set input \"user\")."
        );
    }

    #[test]
    fn test_token_fallback() {
        let inputs = RunInputs {
            user: Some("octo".to_string()),
            github_token: Some(String::new()),
            ..Default::default()
        };
        let config = RunConfig::resolve(inputs, env_of(&[("GITHUB_TOKEN", "env-token")])).unwrap();
        assert_eq!(config.token.as_deref(), Some("env-token"));
    }

    #[test]
    fn test_empty_delimiter_uses_default() {
        let inputs = RunInputs {
            user: Some("octo".to_string()),
            delimiter: Some(String::new()),
            files: Some("a.md, b.md".to_string()),
            ..Default::default()
        };
        let config = RunConfig::resolve(inputs, env_of(&[])).unwrap();
        assert_eq!(config.delimiter, "/");
        assert_eq!(config.files, "a.md, b.md");
    }
}
