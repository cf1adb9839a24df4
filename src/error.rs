//! Error types for configuration, compilation and plot generation.

use std::{path::PathBuf, time::Duration};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The configuration file could not be read, or the executable it names is not a file.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A caller-supplied parameter was missing or invalid. Raised before any side effect.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("pdflatex command not found: {}", .0.display())]
    ExecutableNotFound(PathBuf),

    /// The process ran but exited with a failure status.
    #[error("LaTeX compilation failed: {message}")]
    Compile {
        message: String,
        /// `! LaTeX Error:` lines with the marker stripped, in output order. May be empty.
        errors: Vec<String>,
        /// Combined stdout and stderr of the process.
        output: String,
    },

    #[error("pdflatex did not finish within {limit:?}")]
    Timeout { limit: Duration },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Extracted LaTeX errors, if this is a compile failure.
    pub fn latex_errors(&self) -> &[String] {
        match self {
            Self::Compile { errors, .. } => errors,
            _ => &[],
        }
    }
}
