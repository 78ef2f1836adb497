use http::StatusCode;
use smol_str::SmolStr;
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    /// The `count` argument couldn't be interpreted as an integer.
    ///
    /// Raised before any request is sent
    #[error("count must be an integer, got {0:?}")]
    InvalidCount(SmolStr),

    /// The `result_filter` argument names no known filter.
    ///
    /// Raised before any request is sent
    #[error("unknown result filter {0:?}")]
    UnknownResultFilter(SmolStr),

    /// The raw query override couldn't be parsed as a query string
    #[error("malformed raw query")]
    MalformedRawQuery(#[from] serde_urlencoded::de::Error),

    #[error("failed to encode query parameters")]
    EncodeQuery(#[from] serde_urlencoded::ser::Error),

    #[error(transparent)]
    HttpClient(#[from] karasu_http_client::Error),

    /// The endpoint answered with a non-success status code
    #[error("search request failed with status {0}")]
    RequestFailed(StatusCode),
}
