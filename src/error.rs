//! Error types for configuration loading and simulation runs.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to load or parse a building configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read \"{}\": {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unknown preset \"{name}\", available: {available}")]
    UnknownPreset { name: String, available: String },
}

/// Conditions that abort a simulation run.
///
/// Per-line problems such as an unknown appliance are not errors; they are
/// sequenced into the output as rejections.
#[derive(Debug, Error, PartialEq)]
pub enum SimError {
    #[error("undeclared room \"{room}\" referenced at line {line}")]
    UnknownRoom { room: String, line: usize },

    #[error("malformed event at line {line}: {reason}")]
    MalformedEvent { line: usize, reason: String },

    #[error(
        "sampling exhausted in room \"{room}\": {remaining} pool entries left, {pending} removals pending"
    )]
    SamplingExhausted {
        room: String,
        remaining: usize,
        pending: usize,
    },

    #[error("ranks in room \"{room}\" are too large to weight")]
    RankOverflow { room: String },
}

impl SimError {
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedEvent {
            line,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SimError>;
