use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Fatal errors. None of these are retried; the run stops at the first one.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Usage(String),

    #[error("unable to load '{}': {reason}", path.display())]
    ConfigFormat { path: PathBuf, reason: String },

    #[error("{}: {error}", path.display())]
    ConfigSemantic { path: PathBuf, error: ConfigError },

    #[error("icon name {0:?} cannot be used as a file name inside the catalog")]
    InvalidIconName(String),

    #[error("unable to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("{program} failed to render {}: {reason}", dest.display())]
    Rasterization {
        program: &'static str,
        dest: PathBuf,
        reason: String,
    },
}
