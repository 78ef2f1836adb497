use crate::{BoxBody, Error, Result};
use http_body_util::BodyExt;
use hyper::{body::Bytes, HeaderMap, Response as HyperResponse, StatusCode, Version};
use serde::de::DeserializeOwned;

/// Response to an executed request
#[derive(Debug)]
pub struct Response {
    inner: HyperResponse<BoxBody>,
}

impl Response {
    pub(crate) fn new(inner: HyperResponse<BoxBody>) -> Self {
        Self { inner }
    }

    /// Buffer the whole body into memory
    ///
    /// # Errors
    ///
    /// - Streaming the body from the server failed
    /// - The body ran over the configured size cap
    pub async fn bytes(self) -> Result<Bytes> {
        let collected = self
            .inner
            .into_body()
            .collect()
            .await
            .map_err(Error::wrap)?;

        Ok(collected.to_bytes())
    }

    /// Headers the server responded with
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }

    /// Unwrap the response into its `hyper` representation
    #[must_use]
    pub fn into_inner(self) -> HyperResponse<BoxBody> {
        self.inner
    }

    /// Buffer the body and decode it as JSON
    ///
    /// # Errors
    ///
    /// - Streaming the body from the server failed
    /// - The body isn't valid JSON for the target type
    pub async fn json<T>(self) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let bytes = self.bytes().await?;
        sonic_rs::from_slice(&bytes).map_err(Error::wrap)
    }

    /// Status code the server responded with
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.inner.status()
    }

    /// Buffer the body and decode it as UTF-8 text
    ///
    /// # Errors
    ///
    /// - Streaming the body from the server failed
    /// - The body isn't UTF-8 encoded
    pub async fn text(self) -> Result<String> {
        let bytes = self.bytes().await?;
        simdutf8::basic::from_utf8(&bytes)
            .map(ToOwned::to_owned)
            .map_err(Error::wrap)
    }

    /// HTTP version the exchange went over
    #[must_use]
    pub fn version(&self) -> Version {
        self.inner.version()
    }
}
