use thiserror::Error;

/// Failures surfaced by the provider transport and the request gate.
///
/// Throttling is not an error until the gate gives up on it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RetrievalError {
    #[error("provider rejected the api key (http {status})")]
    Authorization { status: u16 },
    #[error("rate limited after {attempts} attempts")]
    RateLimitExhausted { attempts: u32 },
    #[error("provider returned http {status}: {detail}")]
    HttpStatus { status: u16, detail: String },
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),
    #[error("transport failure: {0}")]
    Transport(String),
}
