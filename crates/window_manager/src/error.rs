//! Typed errors for the fallible edges of the window manager.
//!
//! Store commands and gesture interpretation never fail; only configuration loading and
//! deep-link resolution do.

use thiserror::Error;

#[derive(Debug, Error)]
/// Configuration load or validation failure.
pub enum ConfigError {
    /// The TOML document could not be parsed into a config.
    #[error("invalid window manager config: {0}")]
    Parse(#[from] toml::de::Error),
    /// A parsed field holds a value outside its allowed range.
    #[error("config field `{field}` is out of range: {reason}")]
    OutOfRange {
        /// Offending field name.
        field: &'static str,
        /// Human-readable constraint that was violated.
        reason: &'static str,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Deep-link query parameter that cannot be turned into a window.
pub enum DeepLinkError {
    /// No content entry carries the requested id.
    #[error("no content entry with id `{0}`")]
    UnknownEntry(String),
    /// The entry exists but is not of the kind the parameter expects.
    #[error("content entry `{id}` is not a {expected}")]
    KindMismatch {
        /// Requested content id.
        id: String,
        /// Entry kind the parameter requires.
        expected: &'static str,
    },
}
