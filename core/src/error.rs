//! Error types for token builds.

use std::{io, path::PathBuf};

use itertools::Itertools;
use thiserror::Error;

/// Everything that can stop a build.
///
/// Unresolved references are deliberately absent: they pass through to the
/// rendered output verbatim and are only logged.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to read token source {}: {source}", path.display())]
    ReadSource { path: PathBuf, source: io::Error },

    #[error("failed to parse token source {}: {source}", path.display())]
    ParseSource {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    WriteOutput { path: PathBuf, source: io::Error },

    #[error("invalid source pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },

    #[error("failed to walk source files: {0}")]
    Glob(#[from] glob::GlobError),

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("ambiguous token path `{0}`: more than one token has this path")]
    AmbiguousPath(String),

    #[error("circular reference: {}", .0.iter().join(" -> "))]
    CircularReference(Vec<String>),

    #[error("unknown transform `{0}`")]
    UnknownTransform(String),

    #[error("unknown transform group `{0}`")]
    UnknownTransformGroup(String),

    #[error("unknown format `{0}`")]
    UnknownFormat(String),

    #[error("unknown output `{0}`")]
    UnknownOutput(String),

    #[error("failed to serialize tokens: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
