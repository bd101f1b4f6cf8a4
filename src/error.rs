//! Error types for sops-run.
//!
//! Each domain gets its own enum; everything converts into [`Error`] so the
//! front-end has a single abort path.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Dependency(#[from] DependencyError),

    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// External tool availability.
#[derive(Error, Debug)]
pub enum DependencyError {
    #[error("{tool} not found in PATH, install it and try again (see {hint})")]
    Missing { tool: &'static str, hint: &'static str },
}

/// Key discovery and recipient derivation.
#[derive(Error, Debug)]
pub enum KeyError {
    #[error("no age keys found in {}", .0.display())]
    NoKeyFound(PathBuf),

    #[error("failed to extract public key from {}: {reason}", .key.display())]
    ExtractionFailed { key: PathBuf, reason: String },

    #[error("unable to determine home directory")]
    NoHomeDir,
}

/// Manifest store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("could not create store directory {}: {source}", .path.display())]
    CreateDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no store directory exists at {}", .0.display())]
    DirMissing(PathBuf),

    #[error("a manifest for {0} already exists")]
    AlreadyExists(String),

    #[error("no manifest for {0} exists")]
    NotFound(String),

    #[error("invalid manifest name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("sops failed to {action} manifest ({status}){}", format_output(.output))]
    OperationFailed {
        action: &'static str,
        status: String,
        output: String,
    },
}

fn format_output(output: &str) -> String {
    let trimmed = output.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
