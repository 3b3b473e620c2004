//! Error types.
//!
//! Host failures are capability-absence conditions: components log them and
//! fall back to their static state, they never reach the page.

use thiserror::Error;

use crate::host::Capabilities;

/// Failure to register with a host primitive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    /// The host does not provide the requested primitive.
    #[error("host capability unavailable: {0:?}")]
    Unavailable(Capabilities),

    /// A repeating timer needs a non-zero period.
    #[error("interval period must be non-zero")]
    ZeroPeriod,
}

/// Invalid or unreadable configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: &'static str) -> Self {
        Self::Invalid { field, reason }
    }
}
