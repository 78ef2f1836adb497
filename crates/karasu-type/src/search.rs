use crate::{tweet::Tweet, user::User};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use sonic_rs::Value;

/// Payload returned by the search endpoints
///
/// Tweets and users are delivered as maps keyed by their ID. The key order of
/// those maps is the ranking the backend decided on, which is why they
/// deserialise into [`IndexMap`]s instead of plain hash maps.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub global_objects: GlobalObjects,
    #[serde(default)]
    pub timeline: Option<Value>, // Cursor and ranking instructions. Unused
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct GlobalObjects {
    #[serde(default)]
    pub tweets: IndexMap<SmolStr, Tweet>,
    #[serde(default)]
    pub users: IndexMap<SmolStr, User>,
}
