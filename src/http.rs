//! Services for communicating with APIs using HTTP.

use reqwest::{Client, ClientBuilder, header};
use thiserror::Error;

/// A general service for making HTTP calls.
///
/// It might be a bit odd to refer to this trait as a "service", since
/// it appears to be more of a _client_ implementation, but think of
/// this as a proxy for a remote _service_ (even though a _client_ is used
/// to communicate with that remote service). A service might not always
/// be remote, such as when the implementation is a deterministic service
/// used for testing.
pub trait HTTPService {
    /// Default HTTP client that can be used to make HTTP requests.
    ///
    /// Returns an error if the underlying TLS backend or DNS resolver
    /// cannot be initialized.
    fn client() -> HTTPResult<Client> {
        let client = ClientBuilder::new()
            .user_agent(Self::user_agent())
            .build()?;
        Ok(client)
    }

    /// An appropriate user agent to use when making HTTP requests.
    ///
    /// Reddit throttles generic user agents aggressively, so this should
    /// always identify the program and its version.
    fn user_agent() -> String {
        format!("{} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }
}

/// The result of an HTTP request.
pub type HTTPResult<T> = Result<T, HTTPError>;

/// Indicates an error has occurred when making an HTTP call.
#[derive(Debug, Error)]
pub enum HTTPError {
    /// An error retrieving the body of a response.
    #[error("Error retrieving body of HTTP response: {0}")]
    Body(reqwest::Error),

    /// An error that occurred while making an HTTP request.
    #[error("Error while making HTTP request: {0}")]
    Request(#[from] reqwest::Error),

    /// An error that occurred while trying to serialize or deserialize
    /// a JSON body.
    #[error("Error processing JSON body: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An unsuccessful HTTP status code in an HTTP response.
    #[error("Request returned HTTP {0}")]
    Http(reqwest::StatusCode),

    /// A missing Content-Type header in a response.
    #[error("Missing Content-Type header")]
    MissingContentType,

    /// An invalid Content-Type header.
    #[error("Invalid Content-Type header value: {0}")]
    InvalidContentType(#[from] header::ToStrError),

    /// A Content-Type that is not understood by the service.
    #[error("Unexpected content type: {0}")]
    UnexpectedContentType(String),
}

#[cfg(test)]
mod tests {
    use crate::http::{HTTPError, HTTPService};
    use regex::Regex;
    use reqwest::StatusCode;

    #[allow(dead_code)]
    struct UserAgentTestService {}
    impl HTTPService for UserAgentTestService {}

    #[test]
    fn it_returns_user_agent_with_version_number() {
        let user_agent = UserAgentTestService::user_agent();
        let version_re = Regex::new(r"^[a-z-]+ v\d+\.\d+\.\d+(-(alpha|beta)\.\d+)?$").unwrap();
        assert!(
            version_re.is_match(&user_agent),
            "{} does not match {}",
            user_agent,
            version_re,
        );
    }

    #[test]
    fn it_builds_a_client() {
        assert!(UserAgentTestService::client().is_ok());
    }

    #[test]
    fn it_describes_unsuccessful_status_codes() {
        let err = HTTPError::Http(StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Request returned HTTP 404 Not Found");
    }

    #[test]
    fn it_describes_unexpected_content_types() {
        let err = HTTPError::UnexpectedContentType(String::from("text/html"));
        assert_eq!(err.to_string(), "Unexpected content type: text/html");
    }
}
