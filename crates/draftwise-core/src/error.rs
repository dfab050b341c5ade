//! Error types for draftwise-core.

use thiserror::Error;

/// Errors that can occur when working with configuration or profiles.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors reported by external candidate/topic oracles.
///
/// Pure scoring functions never return these; only the orchestration
/// routines that call out to an oracle do.
#[derive(Error, Debug)]
pub enum OracleError {
    /// The oracle could not be reached or refused the request.
    #[error("oracle request failed: {0}")]
    Request(String),

    /// The oracle answered but the reply carried no usable body.
    #[error("oracle reply incomplete: {0}")]
    Incomplete(String),
}

/// Result type alias using [`OracleError`].
pub type OracleResult<T> = Result<T, OracleError>;
