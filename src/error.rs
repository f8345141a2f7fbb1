//! Error types for the jank tracker
//!
//! The scoring math itself has no recoverable failure modes: malformed
//! rectangles read as empty, a zero viewport yields a zero fraction, and a
//! lost trace record is ignored. Errors only arise at construction time and
//! in the async facade.

use thiserror::Error;

/// Result type alias for tracker operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Invalid tracker configuration
    #[error("Invalid tracker configuration: {0}")]
    Config(String),

    /// The async facade's worker thread is gone or refused the request
    #[error("Tracker worker unavailable: {0}")]
    Worker(String),
}
