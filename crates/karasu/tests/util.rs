use bytes::Bytes;
use core::convert::Infallible;
use http_body_util::Full;
use hyper::{Request, Response};
use karasu::SearchClient;
use karasu_http_client::{Body, Client};
use std::{collections::BTreeMap, future::Future};
use tower::service_fn;

pub const SEARCH_FIXTURE: &str = include_str!("../../../test-fixtures/get_search_adaptive.json");

pub type MockResponse = Result<Response<Full<Bytes>>, Infallible>;

/// Build a search client on top of a mock transport
pub fn client_from<F, Fut>(handler: F) -> SearchClient
where
    F: FnMut(Request<Body>) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = MockResponse> + Send + 'static,
{
    SearchClient::builder()
        .http_client(Client::builder().service(service_fn(handler)))
        .build()
}

pub fn fixture_response() -> MockResponse {
    Ok(Response::new(Full::new(Bytes::from_static(
        SEARCH_FIXTURE.as_bytes(),
    ))))
}

/// Mock transport for the argument validation tests. Validation failures
/// are supposed to surface before anything reaches the wire
pub async fn refuse_request(_req: Request<Body>) -> MockResponse {
    panic!("no request should have been issued");
}

pub fn query_map(req: &Request<Body>) -> BTreeMap<String, String> {
    serde_urlencoded::from_str::<Vec<(String, String)>>(req.uri().query().unwrap_or_default())
        .unwrap()
        .into_iter()
        .collect()
}
