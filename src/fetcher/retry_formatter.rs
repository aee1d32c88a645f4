//! Retry message formatting for tile fetch attempts.
//!
//! Every failed attempt is classified so the warning tells the user what went wrong
//! in plain words. The classification does not change retry behavior: all failures
//! are retried immediately until the attempt limit is reached.

use super::FetcherError;
use crate::TileId;

/// Classification of a failed attempt for user messaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryErrorType {
    /// Request timed out
    Timeout,
    /// Connection refused, DNS failure or similar
    ConnectionFailed,
    /// HTTP 429
    RateLimit,
    /// HTTP 404
    NotFound,
    /// HTTP 5xx
    ServerError(u16),
    /// Any other non-success status
    ClientError(u16),
    /// Response received but could not be stored
    Storage,
    /// Fallback
    Generic,
}

impl RetryErrorType {
    /// Classify a fetcher error
    pub fn classify(error: &FetcherError) -> Self {
        match error {
            FetcherError::Timeout(_) => Self::Timeout,
            FetcherError::Connection(_) => Self::ConnectionFailed,
            FetcherError::HttpStatus { status } => match *status {
                429 => Self::RateLimit,
                404 => Self::NotFound,
                code if code >= 500 => Self::ServerError(code),
                code => Self::ClientError(code),
            },
            FetcherError::Io(_) => Self::Storage,
            FetcherError::Network(_) | FetcherError::InvalidTemplate(_) => Self::Generic,
        }
    }

    /// User-friendly description used inside retry warnings.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Timeout => "request timed out",
            Self::ConnectionFailed => "connection failed",
            Self::RateLimit => "rate limited by tile server",
            Self::NotFound => "tile not found",
            Self::ServerError(code) => match code {
                502 => "bad gateway",
                503 => "service unavailable",
                504 => "gateway timeout",
                _ => "server error",
            },
            Self::ClientError(code) => match code {
                401 | 403 => "access denied",
                _ => "unexpected response status",
            },
            Self::Storage => "failed to store tile",
            Self::Generic => "network error",
        }
    }
}

/// Context for one failed attempt.
#[derive(Debug, Clone)]
pub struct RetryContext<'a> {
    /// Tile being fetched
    pub tile: TileId,
    /// Current attempt number (1-based)
    pub attempt: u32,
    /// Attempt limit
    pub max_attempts: u32,
    /// The error behind this attempt
    pub error: &'a FetcherError,
}

impl RetryContext<'_> {
    /// Classification of the error
    pub fn error_type(&self) -> RetryErrorType {
        RetryErrorType::classify(self.error)
    }

    /// Whether another attempt follows this one
    pub fn will_retry(&self) -> bool {
        self.attempt < self.max_attempts
    }

    /// Warning text naming tile, attempt and limit
    pub fn format_message(&self) -> String {
        let mut message = format!(
            "Failed to fetch tile {} (attempt {}/{}): {} - {}",
            self.tile,
            self.attempt,
            self.max_attempts,
            self.error_type().description(),
            self.error
        );
        if self.will_retry() {
            message.push_str(", retrying");
        }
        message
    }
}
