//! Configuration error types.
//!
//! Every variant carries the offending text so an operator can locate the
//! mistake. None of it is ever shown to a rejected client.

use thiserror::Error;

/// Result type for rule parsing.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// A malformed `block_access.intervals` / `block_access.exclude_roles` pair.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The two settings list a different number of `;`-separated groups.
    #[error(
        "number of intervals ({intervals}) and exclude_roles groups ({role_groups}) do not match"
    )]
    GroupCountMismatch { intervals: usize, role_groups: usize },

    /// An entry is not of the form `days - HH:MM - HH:MM`.
    #[error("malformed interval \"{entry}\": {reason}")]
    MalformedInterval { entry: String, reason: &'static str },

    /// A day token is not one of `sun`, `mon`, `tue`, `wed`, `thu`, `fri`, `sat`.
    #[error("unknown week day \"{token}\" in \"{days}\"")]
    UnknownWeekday { token: String, days: String },

    /// A time is not `HH:MM` with hour in 0..=23 and minute in 0..=59.
    #[error("invalid time \"{time}\": {reason}")]
    InvalidTime { time: String, reason: &'static str },
}
