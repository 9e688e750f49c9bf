use thiserror::Error;

/// Errors produced by the update-check and download flow.
///
/// The orchestrator converts every one of these into a uniform result for the
/// UI; they only surface as typed values to direct callers of the fetch and
/// download functions.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed release feed response: {0}")]
    Protocol(String),

    #[error("No release found")]
    NoRelease,

    #[error("Download failed: HTTP status {0}")]
    HttpStatus(u16),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type using our Error
pub type Result<T> = std::result::Result<T, Error>;
