use thiserror::Error;

use crate::github::FetchError;

#[derive(Error, Debug)]
pub enum BioTableError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Config(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Output error: {0}")]
    Output(String),
}

pub type Result<T> = std::result::Result<T, BioTableError>;
