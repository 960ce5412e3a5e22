use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading levels, configuration and assets.
///
/// Physics never fails; everything here is a lookup or I/O problem that the
/// frame driver treats as fatal.
#[derive(Debug, Error)]
pub enum Error {
    #[error("config section `{section}` has no key `{key}`")]
    MissingKey { section: String, key: String },

    #[error("config section `{section}`: key `{key}` has invalid value `{value}`")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
    },

    #[error("unknown animation `{0}`")]
    MissingAnimation(String),

    #[error("unknown sound `{0}`")]
    MissingSound(String),

    #[error("failed to read level {path:?}: {source}")]
    Level {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read config {path:?}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config `{section}`: {source}")]
    ConfigParse {
        section: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse asset manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
