//! Error types shared between client and server.
//!
//! The `RateError` enum unifies common failure cases for I/O, HTTP transport,
//! payload decoding, and internal logic, allowing crates to propagate a single
//! error type. Fetch failures additionally classify into a `FailureKind`.
use std::io;
use std::sync::PoisonError;

use thiserror::Error;

use crate::market::Market;

/// Unified error type shared by client and server.
#[derive(Error, Debug)]
pub enum RateError {
    /// I/O error originating from the standard library or sockets.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic formatting/validation error with a human-readable message.
    #[error("Format error: {0}")]
    Format(String),

    /// The HTTP round trip failed before a body could be read.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The round trip completed but carried no body.
    #[error("Response body is empty")]
    EmptyBody,

    /// The body is not a valid rates payload (truncated, wrong types, ...).
    #[error("JSON decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The payload decoded but has no quotation for the requested market.
    #[error("Payload has no `{0}` quotation")]
    MissingMarket(Market),

    /// Error indicating a poisoned mutex/lock was encountered.
    #[error("Mutex Lock Poisoned: {0}")]
    MutexLock(String),
}

impl<T> From<PoisonError<T>> for RateError {
    fn from(err: PoisonError<T>) -> Self {
        RateError::MutexLock(err.to_string())
    }
}

/// Why a fetch produced no rate.
///
/// All kinds collapse to `FetchResult::Absent` for callers of `fetch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Connection, TLS, timeout or body read failure.
    TransportFailure,
    /// A response without body.
    EmptyBody,
    /// A body that does not map onto a `RateRecord`.
    DecodeFailure,
}

impl RateError {
    /// Classifies a fetch failure. Errors unrelated to fetching return `None`.
    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            RateError::Io(_) | RateError::Transport(_) => Some(FailureKind::TransportFailure),
            RateError::EmptyBody => Some(FailureKind::EmptyBody),
            RateError::Decode(_) | RateError::MissingMarket(_) => {
                Some(FailureKind::DecodeFailure)
            }
            RateError::Format(_) | RateError::MutexLock(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_failures_are_classified() {
        let decode = serde_json::from_str::<u32>("\"x\"").unwrap_err();
        assert_eq!(
            RateError::Decode(decode).kind(),
            Some(FailureKind::DecodeFailure)
        );
        assert_eq!(
            RateError::MissingMarket(Market::Blue).kind(),
            Some(FailureKind::DecodeFailure)
        );
        assert_eq!(RateError::EmptyBody.kind(), Some(FailureKind::EmptyBody));
        assert_eq!(
            RateError::Transport("refused".into()).kind(),
            Some(FailureKind::TransportFailure)
        );
        assert_eq!(RateError::Format("bad".into()).kind(), None);
    }

    #[test]
    fn missing_market_names_the_key() {
        let err = RateError::MissingMarket(Market::BlueEuro);
        assert_eq!(err.to_string(), "Payload has no `blue_euro` quotation");
    }
}
