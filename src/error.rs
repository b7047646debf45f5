use thiserror::Error;

/// Failures surfaced by the client components.
///
/// Reads (`BroadcastSync::refresh`) swallow these and only log them; writes
/// always hand one back to the caller.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A required input was empty. Raised before any request is sent.
    #[error("{0} is required")]
    Validation(&'static str),

    /// No response, or a response body that could not be read.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The broadcast service refused the write. Usually a wrong admin key.
    #[error("broadcast rejected by the service (status {status})")]
    Authorization { status: u16 },

    #[error("image generation failed")]
    GenerationFailed,

    /// The same component already has a request in flight.
    #[error("a request is already in flight")]
    Busy,

    #[error("{0} is not configured")]
    NotConfigured(&'static str),
}
