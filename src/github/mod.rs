//! GitHub REST API access for profile bios

pub mod client;

pub use client::{interpret_response, FetchError, GithubClient, GithubClientConfig};
