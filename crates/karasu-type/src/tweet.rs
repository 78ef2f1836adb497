use crate::user::User;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Tweet {
    pub id: u64,
    pub id_str: SmolStr,
    /// In `compat` mode the endpoint calls this field `text`
    #[serde(alias = "text")]
    pub full_text: String,
    pub created_at: String,
    pub user_id: u64,
    pub user_id_str: SmolStr,
    #[serde(default)]
    pub conversation_id_str: Option<SmolStr>,
    #[serde(default)]
    pub display_text_range: Option<[u32; 2]>,
    #[serde(default)]
    pub reply_count: u64,
    #[serde(default)]
    pub retweet_count: u64,
    #[serde(default)]
    pub favorite_count: u64,
    #[serde(default)]
    pub lang: Option<SmolStr>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub possibly_sensitive: bool,
    #[serde(default)]
    pub entities: Entities,
    /// Author record, stitched in from the user map of the same payload.
    /// Never present on the wire
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct Entities {
    #[serde(default)]
    pub hashtags: Vec<Hashtag>,
    #[serde(default)]
    pub urls: Vec<UrlEntity>,
    #[serde(default)]
    pub user_mentions: Vec<UserMention>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Hashtag {
    pub text: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct UrlEntity {
    pub url: String,
    #[serde(default)]
    pub expanded_url: Option<String>,
    #[serde(default)]
    pub display_url: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct UserMention {
    pub id: u64,
    pub id_str: SmolStr,
    pub screen_name: SmolStr,
    #[serde(default)]
    pub name: Option<String>,
}
