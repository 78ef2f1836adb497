//! Client bindings for Twitter's pre-v2 search endpoints
//!
//! Queries are assembled through [`SearchParams`], dispatched through a
//! [`SearchClient`], and come back as a flat list of [`SearchItem`]s in the
//! order the backend ranked them.
//!
//! The endpoints themselves sit behind platform credentials. Attaching those
//! is not this crate's business; hand the [`SearchClient`] an HTTP client
//! that carries the right default headers instead:
//!
//! ```rust,no_run
//! use karasu::{SearchClient, SearchParams};
//!
//! # async fn run(bearer_token: &str) -> karasu::Result<()> {
//! let http_client = karasu_http_client::Client::builder()
//!     .default_header("Authorization", format!("Bearer {bearer_token}"))?
//!     .build();
//!
//! let client = SearchClient::builder().http_client(http_client).build();
//! let params = SearchParams::builder()
//!     .term("鎌倉殿の13人")
//!     .count(20)
//!     .expand_user(true)
//!     .build();
//!
//! for item in client.search_adaptive(&params).await? {
//!     if let Some(tweet) = item.as_tweet() {
//!         println!("@{}: {}", tweet.user_id_str, tweet.full_text);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#[macro_use]
extern crate tracing;

use http::{header::ACCEPT, HeaderValue};
use karasu_http_client::{Client, Response};
use karasu_type::SearchResponse;
use smol_str::SmolStr;
use typed_builder::TypedBuilder;

pub use self::error::{Error, Result};
pub use self::params::{Count, ResultFilter, SearchParams, TweetMode};
pub use self::results::SearchItem;
pub use karasu_type::{Tweet, User};

pub mod error;

mod params;
mod results;

/// User agent of the default HTTP client
pub const USER_AGENT: &str = concat!("karasu/", env!("CARGO_PKG_VERSION"));

/// Base URL the client talks to unless configured otherwise
pub const DEFAULT_BASE_URL: &str = "https://api.twitter.com/2";

const SEARCH_ADAPTIVE_PATH: &str = "search/adaptive.json";
const SEARCH_PUBLIC_PATH: &str = "search/public.json";

fn default_http_client() -> Client {
    Client::builder()
        .default_header(ACCEPT, HeaderValue::from_static("application/json"))
        .unwrap()
        .user_agent(USER_AGENT)
        .unwrap()
        .build()
}

/// Client for the search endpoints
#[derive(Clone, TypedBuilder)]
pub struct SearchClient {
    /// HTTP client the requests go out through
    #[builder(default = default_http_client())]
    http_client: Client,

    /// Base URL of the API, without a trailing slash
    #[builder(default = SmolStr::new_static(DEFAULT_BASE_URL), setter(into))]
    base_url: SmolStr,

    /// Rendering mode attached to every outgoing query
    #[builder(default)]
    tweet_mode: TweetMode,
}

impl SearchClient {
    /// Search via the adaptive endpoint
    ///
    /// Returns tweets unless `result_filter` selects users, in the order of
    /// the payload. Without a term and without a raw query no request is
    /// made and the list is empty
    ///
    /// # Errors
    ///
    /// - An argument failed validation
    /// - The request failed or returned a non-success status
    /// - The payload wasn't valid JSON
    #[instrument(skip(self))]
    pub async fn search_adaptive(&self, params: &SearchParams) -> Result<Vec<SearchItem>> {
        self.search(SEARCH_ADAPTIVE_PATH, params).await
    }

    /// Same as [`Self::search_adaptive`], but returns the payload as raw JSON
    ///
    /// When no request is made, the result is an empty JSON array
    ///
    /// # Errors
    ///
    /// - An argument failed validation
    /// - The request failed or returned a non-success status
    /// - The payload wasn't valid JSON
    #[instrument(skip(self))]
    pub async fn search_adaptive_json(&self, params: &SearchParams) -> Result<sonic_rs::Value> {
        self.search_raw(SEARCH_ADAPTIVE_PATH, params).await
    }

    /// Search via the public endpoint
    ///
    /// Query construction and result mapping behave exactly like
    /// [`Self::search_adaptive`]
    ///
    /// # Errors
    ///
    /// - An argument failed validation
    /// - The request failed or returned a non-success status
    /// - The payload wasn't valid JSON
    #[instrument(skip(self))]
    pub async fn search_public(&self, params: &SearchParams) -> Result<Vec<SearchItem>> {
        self.search(SEARCH_PUBLIC_PATH, params).await
    }

    /// Same as [`Self::search_public`], but returns the payload as raw JSON
    ///
    /// When no request is made, the result is an empty JSON array
    ///
    /// # Errors
    ///
    /// - An argument failed validation
    /// - The request failed or returned a non-success status
    /// - The payload wasn't valid JSON
    #[instrument(skip(self))]
    pub async fn search_public_json(&self, params: &SearchParams) -> Result<sonic_rs::Value> {
        self.search_raw(SEARCH_PUBLIC_PATH, params).await
    }

    async fn search(&self, path: &str, params: &SearchParams) -> Result<Vec<SearchItem>> {
        let Some(prepared) = params.prepare(self.tweet_mode)? else {
            return Ok(Vec::new());
        };

        let response: SearchResponse = self.fetch(path, &prepared.query).await?.json().await?;

        Ok(results::map_response(
            response,
            prepared.result_filter,
            params.expand_user,
        ))
    }

    async fn search_raw(&self, path: &str, params: &SearchParams) -> Result<sonic_rs::Value> {
        let Some(prepared) = params.prepare(self.tweet_mode)? else {
            return Ok(sonic_rs::json!([]));
        };

        Ok(self.fetch(path, &prepared.query).await?.json().await?)
    }

    async fn fetch(&self, path: &str, query: &str) -> Result<Response> {
        let url = format!("{}/{path}?{query}", self.base_url.trim_end_matches('/'));
        debug!(%url, "dispatching search request");

        let response = self.http_client.get(url).await?;
        if !response.status().is_success() {
            return Err(Error::RequestFailed(response.status()));
        }

        Ok(response)
    }
}

impl Default for SearchClient {
    fn default() -> Self {
        Self::builder().build()
    }
}
