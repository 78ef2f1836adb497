#![doc = include_str!("../README.md")]
#![deny(missing_docs)]

use self::util::BoxCloneService;
use http::HeaderValue;
use http_body::Body as HttpBody;
use http_body_util::{BodyExt, Limited};
use hyper::{
    body::{Bytes, Incoming},
    header::{HeaderName, USER_AGENT},
    HeaderMap, Request, Response as HyperResponse, Uri,
};
use hyper_rustls::HttpsConnectorBuilder;
use hyper_util::{client::legacy::Client as HyperClient, rt::TokioExecutor};
use std::{error::Error as StdError, fmt, time::Duration};
use tower::{layer::util::Identity, util::Either, BoxError, Service, ServiceBuilder, ServiceExt};
use tower_http::{
    decompression::DecompressionLayer, follow_redirect::FollowRedirectLayer,
    map_response_body::MapResponseBodyLayer, timeout::TimeoutLayer,
};

mod body;
mod response;
mod util;

pub use self::body::Body;
pub use self::response::Response;

type BoxBody<E = BoxError> = http_body_util::combinators::BoxBody<Bytes, E>;
type Result<T, E = Error> = std::result::Result<T, E>;

/// Body type of the responses this client hands out
pub type ResponseBody = BoxBody;

/// Bodies over this size are cut off with an error
const DEFAULT_BODY_LIMIT: usize = 1024 * 1024;

/// Requests are abandoned after this long unless overridden
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Error returned by every fallible operation of this crate
///
/// Opaque wrapper around whatever the transport or one of the middlewares produced
pub struct Error(BoxError);

impl Error {
    #[inline]
    fn wrap<E>(inner: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self(inner.into())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

/// Builder for [`Client`]
pub struct ClientBuilder {
    body_limit: Option<usize>,
    default_headers: HeaderMap,
    timeout: Option<Duration>,
}

impl ClientBuilder {
    /// Cap the size of response bodies
    ///
    /// Enforced while the body streams in, whether or not the server announced
    /// a `Content-Length`. `None` lifts the cap entirely.
    ///
    /// Defaults to 1MB
    #[must_use]
    pub fn body_limit(self, body_limit: Option<usize>) -> Self {
        Self { body_limit, ..self }
    }

    /// Attach a header to every request this client sends
    ///
    /// # Errors
    ///
    /// - The name isn't a valid header name
    /// - The value isn't a valid header value
    pub fn default_header<K, V>(mut self, key: K, value: V) -> Result<Self>
    where
        K: TryInto<HeaderName>,
        K::Error: Into<BoxError>,
        V: TryInto<HeaderValue>,
        V::Error: Into<BoxError>,
    {
        self.default_headers.insert(
            key.try_into().map_err(Error::wrap)?,
            value.try_into().map_err(Error::wrap)?,
        );

        Ok(self)
    }

    /// Set the `User-Agent` header
    ///
    /// Defaults to `karasu-http-client/[version]`
    ///
    /// # Errors
    ///
    /// - The value isn't a valid header value
    pub fn user_agent<V>(self, value: V) -> Result<Self>
    where
        V: TryInto<HeaderValue>,
        V::Error: Into<BoxError>,
    {
        self.default_header(USER_AGENT, value)
    }

    /// Abandon requests that take longer than this
    ///
    /// Defaults to 30s
    #[must_use]
    pub fn timeout(self, timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            ..self
        }
    }

    /// Build a client that talks to the network over hyper
    #[must_use]
    pub fn build(self) -> Client {
        let connector = HttpsConnectorBuilder::new()
            .with_native_roots()
            .expect("Failed to load native root certificates")
            .https_or_http()
            .enable_http1()
            .enable_http2()
            .build();

        let transport = HyperClient::builder(TokioExecutor::new())
            .build(connector)
            .map_response(|response: HyperResponse<Incoming>| {
                let (parts, body) = response.into_parts();
                HyperResponse::from_parts(parts, BoxBody::new(body.map_err(BoxError::from)))
            });

        self.service(transport)
    }

    /// Build the client on top of a caller-supplied HTTP service instead of
    /// the hyper transport
    #[must_use]
    pub fn service<S, B>(self, transport: S) -> Client
    where
        S: Service<Request<Body>, Response = HyperResponse<B>> + Clone + Send + Sync + 'static,
        S::Error: Into<BoxError>,
        S::Future: Send,
        B: HttpBody<Data = Bytes> + Default + Send + Sync + 'static,
        B::Error: Into<BoxError> + Send + Sync,
    {
        let map_body = self.body_limit.map_or_else(
            || {
                Either::Left(MapResponseBodyLayer::new(|body| {
                    BoxBody::new(BodyExt::map_err(body, Into::into))
                }))
            },
            |limit| {
                Either::Right(MapResponseBodyLayer::new(move |body| {
                    BoxBody::new(Limited::new(body, limit))
                }))
            },
        );
        let timeout = self.timeout.map_or_else(
            || Either::Left(Identity::new()),
            |timeout| Either::Right(TimeoutLayer::new(timeout)),
        );

        Client {
            default_headers: self.default_headers,
            inner: BoxCloneService::new(
                ServiceBuilder::new()
                    .layer(map_body)
                    .layer(FollowRedirectLayer::new())
                    .layer(DecompressionLayer::default())
                    .layer(timeout)
                    .service(transport)
                    .map_err(Into::into),
            ),
        }
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        let builder = Self {
            body_limit: Some(DEFAULT_BODY_LIMIT),
            default_headers: HeaderMap::default(),
            timeout: Some(DEFAULT_TIMEOUT),
        };

        builder
            .user_agent(concat!("karasu-http-client/", env!("CARGO_PKG_VERSION")))
            .unwrap()
    }
}

/// Asynchronous HTTP client with a fixed middleware stack
///
/// Follows redirects, transparently decompresses the response, caps the body
/// size and times out slow requests
#[derive(Clone)]
pub struct Client {
    default_headers: HeaderMap,
    inner: BoxCloneService<Request<Body>, HyperResponse<BoxBody>, BoxError>,
}

impl Client {
    /// Create a builder with the default configuration
    #[must_use]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Send a request
    ///
    /// The configured default headers are attached before it goes out
    ///
    /// # Errors
    ///
    /// - Executing the request failed
    pub async fn execute(&self, mut req: Request<Body>) -> Result<Response> {
        req.headers_mut().extend(self.default_headers.clone());

        let svc = self.inner.clone();
        let response = svc.oneshot(req).await.map_err(Error::wrap)?;

        Ok(Response::new(response))
    }

    /// Send a GET request to the given URI
    ///
    /// # Errors
    ///
    /// - The URI is invalid
    /// - Executing the request failed
    pub async fn get<U>(&self, uri: U) -> Result<Response>
    where
        Uri: TryFrom<U>,
        <Uri as TryFrom<U>>::Error: Into<http::Error>,
    {
        let req = Request::builder()
            .uri(uri)
            .body(Body::empty())
            .map_err(Error::wrap)?;

        self.execute(req).await
    }
}

impl Default for Client {
    fn default() -> Self {
        ClientBuilder::default().build()
    }
}
