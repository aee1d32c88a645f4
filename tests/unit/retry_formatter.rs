//! Retry classification as seen in warnings

use tile_fetcher::fetcher::{FetcherError, RetryErrorType};

#[test]
fn test_descriptions_by_status() {
    let cases = [
        (401, "access denied"),
        (403, "access denied"),
        (404, "tile not found"),
        (418, "unexpected response status"),
        (429, "rate limited by tile server"),
        (500, "server error"),
        (502, "bad gateway"),
        (503, "service unavailable"),
        (504, "gateway timeout"),
    ];
    for (status, expected) in cases {
        let kind = RetryErrorType::classify(&FetcherError::HttpStatus { status });
        assert_eq!(kind.description(), expected, "status {status}");
    }
}

#[test]
fn test_non_status_errors() {
    assert_eq!(
        RetryErrorType::classify(&FetcherError::Network("reset".into())),
        RetryErrorType::Generic
    );
    assert_eq!(
        RetryErrorType::classify(&FetcherError::Io("disk full".into())).description(),
        "failed to store tile"
    );
}
