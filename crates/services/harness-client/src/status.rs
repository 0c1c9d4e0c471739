//! HTTP status classification shared by the client and tool error mapping.

use reqwest::{Error as ReqwestError, StatusCode};

/// Coarse classification of a failed HTTP exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpKind {
    /// 401
    Unauthorized,
    /// 403
    Forbidden,
    /// 404
    NotFound,
    /// 429
    RateLimited,
    /// Other 4xx
    ClientError,
    /// 5xx
    ServerError,
    /// Request or connect timeout
    Timeout,
    /// Connection failure
    Network,
    /// Anything else
    Unknown,
}

/// Classify an HTTP status code.
#[must_use]
pub fn classify_status(status: StatusCode) -> HttpKind {
    match status {
        StatusCode::UNAUTHORIZED => HttpKind::Unauthorized,
        StatusCode::FORBIDDEN => HttpKind::Forbidden,
        StatusCode::NOT_FOUND => HttpKind::NotFound,
        StatusCode::TOO_MANY_REQUESTS => HttpKind::RateLimited,
        s if s.is_client_error() => HttpKind::ClientError,
        s if s.is_server_error() => HttpKind::ServerError,
        _ => HttpKind::Unknown,
    }
}

/// Classify a transport-level reqwest error.
#[must_use]
pub fn classify_reqwest_error(err: &ReqwestError) -> HttpKind {
    if err.is_timeout() {
        HttpKind::Timeout
    } else if err.is_connect() {
        HttpKind::Network
    } else {
        err.status().map_or(HttpKind::Unknown, classify_status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_auth_statuses() {
        assert_eq!(
            classify_status(StatusCode::UNAUTHORIZED),
            HttpKind::Unauthorized
        );
        assert_eq!(classify_status(StatusCode::FORBIDDEN), HttpKind::Forbidden);
    }

    #[test]
    fn classify_not_found_and_rate_limit() {
        assert_eq!(classify_status(StatusCode::NOT_FOUND), HttpKind::NotFound);
        assert_eq!(
            classify_status(StatusCode::TOO_MANY_REQUESTS),
            HttpKind::RateLimited
        );
    }

    #[test]
    fn classify_ranges() {
        assert_eq!(
            classify_status(StatusCode::BAD_REQUEST),
            HttpKind::ClientError
        );
        assert_eq!(
            classify_status(StatusCode::SERVICE_UNAVAILABLE),
            HttpKind::ServerError
        );
        // success codes are not failures
        assert_eq!(classify_status(StatusCode::OK), HttpKind::Unknown);
    }
}
