//! Error taxonomy.
//!
//! Only malformed setup is an error. Player interaction that makes no sense
//! in the current state (clicking a matched card, clicking during the
//! preview) is a silent no-op and never reaches this type.

/// Errors raised while setting up a game.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatchError {
    /// Malformed symbol list: empty, odd length, or wrong multiplicities.
    #[error("invalid symbol list: {0}")]
    InvalidInput(String),

    /// Configuration values that cannot drive a game.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MatchError>;
