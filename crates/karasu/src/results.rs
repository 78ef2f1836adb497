use crate::params::ResultFilter;
use karasu_type::{search::GlobalObjects, SearchResponse, Tweet, User};
use serde::{Deserialize, Serialize};

/// Single entry of a search result
///
/// Which of the two variants shows up is decided by the `result_filter`
/// the search was issued with
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum SearchItem {
    Tweet(Tweet),
    User(User),
}

impl SearchItem {
    #[must_use]
    pub fn as_tweet(&self) -> Option<&Tweet> {
        match self {
            Self::Tweet(tweet) => Some(tweet),
            Self::User(..) => None,
        }
    }

    #[must_use]
    pub fn as_user(&self) -> Option<&User> {
        match self {
            Self::User(user) => Some(user),
            Self::Tweet(..) => None,
        }
    }
}

impl From<Tweet> for SearchItem {
    fn from(tweet: Tweet) -> Self {
        Self::Tweet(tweet)
    }
}

impl From<User> for SearchItem {
    fn from(user: User) -> Self {
        Self::User(user)
    }
}

/// Flatten a search payload into result items
///
/// The items come out in the order the payload listed them in. For
/// [`ResultFilter::User`] the user map is returned, every other filter
/// returns the tweet map, optionally with the author records stitched in
pub(crate) fn map_response(
    response: SearchResponse,
    result_filter: ResultFilter,
    expand_user: bool,
) -> Vec<SearchItem> {
    let GlobalObjects { tweets, users } = response.global_objects;

    if result_filter == ResultFilter::User {
        return users.into_values().map(SearchItem::User).collect();
    }

    tweets
        .into_values()
        .map(|mut tweet| {
            if expand_user {
                tweet.user = users.get(tweet.user_id_str.as_str()).cloned();
            }

            SearchItem::Tweet(tweet)
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::{map_response, SearchItem};
    use crate::params::ResultFilter;
    use karasu_type::SearchResponse;
    use pretty_assertions::assert_eq;

    const RESPONSE: &str = r#"
    {
        "globalObjects": {
            "tweets": {
                "30": {
                    "id": 30,
                    "id_str": "30",
                    "full_text": "third",
                    "created_at": "Mon May 02 15:31:14 +0000 2022",
                    "user_id": 2,
                    "user_id_str": "2"
                },
                "10": {
                    "id": 10,
                    "id_str": "10",
                    "full_text": "first",
                    "created_at": "Mon May 02 15:14:35 +0000 2022",
                    "user_id": 1,
                    "user_id_str": "1"
                },
                "20": {
                    "id": 20,
                    "id_str": "20",
                    "full_text": "second",
                    "created_at": "Mon May 02 14:52:27 +0000 2022",
                    "user_id": 404,
                    "user_id_str": "404"
                }
            },
            "users": {
                "2": {
                    "id": 2,
                    "id_str": "2",
                    "name": "second user",
                    "screen_name": "second_user",
                    "created_at": "Sun May 01 14:25:08 +0000 2022"
                },
                "1": {
                    "id": 1,
                    "id_str": "1",
                    "name": "first user",
                    "screen_name": "first_user",
                    "created_at": "Sun May 01 14:25:08 +0000 2022"
                }
            }
        }
    }
    "#;

    fn response() -> SearchResponse {
        sonic_rs::from_str(RESPONSE).unwrap()
    }

    #[test]
    fn tweets_keep_payload_order() {
        let items = map_response(response(), ResultFilter::Default, false);

        let ids: Vec<u64> = items
            .iter()
            .map(|item| item.as_tweet().unwrap().id)
            .collect();
        assert_eq!(ids, [30, 10, 20]);
    }

    #[test]
    fn users_keep_payload_order() {
        let items = map_response(response(), ResultFilter::User, false);

        let ids: Vec<u64> = items
            .iter()
            .map(|item| item.as_user().unwrap().id)
            .collect();
        assert_eq!(ids, [2, 1]);
    }

    #[test]
    fn expansion_tolerates_missing_authors() {
        let items = map_response(response(), ResultFilter::Default, true);

        let authors: Vec<Option<&str>> = items
            .iter()
            .map(|item| {
                let tweet = item.as_tweet().unwrap();
                tweet.user.as_ref().map(|user| user.screen_name.as_str())
            })
            .collect();
        assert_eq!(authors, [Some("second_user"), Some("first_user"), None]);
    }

    #[test]
    fn empty_payload_maps_to_no_items() {
        let response: SearchResponse = sonic_rs::from_str("{}").unwrap();

        assert!(map_response(response, ResultFilter::Default, true).is_empty());
        assert!(map_response(SearchResponse::default(), ResultFilter::User, false).is_empty());
    }

    #[test]
    fn item_conversions() {
        let items = map_response(response(), ResultFilter::Default, false);
        let tweet = items[0].as_tweet().unwrap().clone();

        let item = SearchItem::from(tweet);
        assert!(item.as_user().is_none());
        assert!(item.as_tweet().is_some());
    }
}
