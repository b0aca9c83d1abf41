use std::fmt;
use std::time::Duration;

use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::Url;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::error::{BioTableError, Result};

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_USER_AGENT: &str = "bio2markdown-table-action";

/// Why a bio could not be obtained
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("GitHub user \"{user}\" not found (status 404).{}", ApiSuffix(.api_message))]
    NotFound {
        user: String,
        api_message: Option<String>,
    },

    #[error("GitHub API request for \"{user}\" was forbidden (status 403).{}", ApiSuffix(.api_message))]
    Forbidden {
        user: String,
        api_message: Option<String>,
    },

    #[error("GitHub API request failed for \"{user}\" (status {status}).{}", ApiSuffix(.api_message))]
    Status {
        user: String,
        status: u16,
        api_message: Option<String>,
    },

    #[error("GitHub user \"{user}\" has no bio set.")]
    NoBio { user: String },

    #[error("Failed to parse bio response: {0}.")]
    InvalidResponse(String),

    #[error("Error fetching bio for \"{user}\": {reason}")]
    Transport { user: String, reason: String },
}

struct ApiSuffix<'a>(&'a Option<String>);

impl fmt::Display for ApiSuffix<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(message) => write!(f, " {}", message),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    #[serde(default)]
    bio: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    #[serde(default)]
    message: Option<serde_json::Value>,
}

/// Connection settings for the GitHub REST API
#[derive(Debug, Clone)]
pub struct GithubClientConfig {
    pub api_base: String,
    pub token: Option<String>,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for GithubClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            token: None,
            timeout: Duration::from_secs(30),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

pub struct GithubClient {
    config: GithubClientConfig,
    http: reqwest::Client,
}

impl GithubClient {
    pub fn new(config: GithubClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self { config, http })
    }

    /// `GET /users/{user}` URL with the login percent-encoded as one path segment
    pub fn user_url(&self, user: &str) -> Result<Url> {
        let mut url = Url::parse(&self.config.api_base).map_err(|e| {
            BioTableError::Config(format!("invalid API URL {:?}: {}", self.config.api_base, e))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                BioTableError::Config(format!(
                    "API URL {:?} cannot take a path",
                    self.config.api_base
                ))
            })?
            .pop_if_empty()
            .push("users")
            .push(user);
        Ok(url)
    }

    /// Fetch the public profile bio of `user`.
    pub async fn fetch_bio(&self, user: &str) -> std::result::Result<String, FetchError> {
        let transport = |reason: String| FetchError::Transport {
            user: user.to_string(),
            reason,
        };

        let url = self.user_url(user).map_err(|e| transport(e.to_string()))?;

        let mut request = self
            .http
            .get(url)
            .header(ACCEPT, "application/vnd.github+json")
            .header(USER_AGENT, &self.config.user_agent);
        if let Some(token) = self.config.token.as_deref() {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                transport(format!("request timed out after {:?}", self.config.timeout))
            } else {
                transport(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| transport(e.to_string()))?;

        interpret_response(user, status, &body)
    }
}

/// Classify a `/users/{user}` response into a bio or a reason for failure.
pub fn interpret_response(
    user: &str,
    status: u16,
    body: &str,
) -> std::result::Result<String, FetchError> {
    if !(200..300).contains(&status) {
        let api_message = parse_api_message(body);
        return Err(match status {
            404 => FetchError::NotFound {
                user: user.to_string(),
                api_message,
            },
            403 => FetchError::Forbidden {
                user: user.to_string(),
                api_message,
            },
            _ => FetchError::Status {
                user: user.to_string(),
                status,
                api_message,
            },
        });
    }

    let parsed: UserResponse =
        serde_json::from_str(body).map_err(|e| FetchError::InvalidResponse(e.to_string()))?;

    match parsed.bio {
        Some(bio) if !bio.trim().is_empty() => Ok(bio),
        _ => Err(FetchError::NoBio {
            user: user.to_string(),
        }),
    }
}

fn parse_api_message(body: &str) -> Option<String> {
    if body.is_empty() {
        return None;
    }

    match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(payload) => match payload.message {
            Some(serde_json::Value::String(message)) if !message.trim().is_empty() => Some(message),
            _ => None,
        },
        Err(e) => {
            debug!("Unable to parse API message: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_returns_bio() {
        let bio = interpret_response("octo", 200, r#"{"login":"octo","bio":"Role: Dev / OS: Linux"}"#);
        assert_eq!(bio, Ok("Role: Dev / OS: Linux".to_string()));
    }

    #[test]
    fn test_blank_or_missing_bio() {
        let expected = Err(FetchError::NoBio {
            user: "octo".to_string(),
        });
        assert_eq!(interpret_response("octo", 200, r#"{"bio":null}"#), expected);
        assert_eq!(interpret_response("octo", 200, r#"{"bio":"   "}"#), expected);
        assert_eq!(interpret_response("octo", 200, r#"{"login":"octo"}"#), expected);
        assert_eq!(
            expected.unwrap_err().to_string(),
            "GitHub user \"octo\" has no bio set."
        );
    }

    #[test]
    fn test_non_string_bio_is_invalid() {
        let result = interpret_response("octo", 200, r#"{"bio":42}"#);
        assert!(matches!(result, Err(FetchError::InvalidResponse(_))));
    }

    #[test]
    fn test_malformed_json() {
        let err = interpret_response("octo", 200, "not json").unwrap_err();
        assert!(matches!(err, FetchError::InvalidResponse(_)));
        let message = err.to_string();
        assert!(message.starts_with("Failed to parse bio response: "));
        assert!(message.ends_with('.'));
    }

    #[test]
    fn test_not_found_message() {
        let err = interpret_response("ghost", 404, r#"{"message":"Not Found"}"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "GitHub user \"ghost\" not found (status 404). Not Found"
        );
    }

    #[test]
    fn test_forbidden_without_api_message() {
        let err = interpret_response("octo", 403, "").unwrap_err();
        assert_eq!(
            err.to_string(),
            "GitHub API request for \"octo\" was forbidden (status 403)."
        );
    }

    #[test]
    fn test_other_status_ignores_unusable_message() {
        let err = interpret_response("octo", 500, r#"{"message":"   "}"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "GitHub API request failed for \"octo\" (status 500)."
        );

        let err = interpret_response("octo", 502, "<html>bad gateway</html>").unwrap_err();
        assert_eq!(
            err,
            FetchError::Status {
                user: "octo".to_string(),
                status: 502,
                api_message: None,
            }
        );

        let err = interpret_response("octo", 422, r#"{"message":7}"#).unwrap_err();
        assert!(!err.to_string().contains('7'));
    }

    #[test]
    fn test_user_url_encodes_login() {
        let client = GithubClient::new(GithubClientConfig::default()).unwrap();
        assert_eq!(
            client.user_url("octocat").unwrap().as_str(),
            "https://api.github.com/users/octocat"
        );
        assert_eq!(
            client.user_url("a b/c").unwrap().as_str(),
            "https://api.github.com/users/a%20b%2Fc"
        );
    }

    #[test]
    fn test_user_url_with_base_path() {
        let client = GithubClient::new(GithubClientConfig {
            api_base: "http://localhost:8080/api/v3/".to_string(),
            ..GithubClientConfig::default()
        })
        .unwrap();
        assert_eq!(
            client.user_url("octo").unwrap().as_str(),
            "http://localhost:8080/api/v3/users/octo"
        );
    }
}
