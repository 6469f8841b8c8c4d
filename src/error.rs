use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckError {
    /// The service rejected the address (HTTP 400).
    #[error("invalid email address: {address}")]
    InvalidAddress { address: String },

    #[error("service returned HTTP {status} for {target}, try again later")]
    ServerFault { status: u16, target: String },

    #[error("still rate limited on {target} after {attempts} attempts")]
    RetriesExhausted { target: String, attempts: u32 },

    #[error("unexpected response body from {target}")]
    Decode {
        target: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("response from {target} carried the wrong kind of records")]
    PayloadMismatch { target: String },

    #[error("request failed")]
    Transport(#[from] reqwest::Error),

    #[error("cannot read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CheckError>;
