use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use karasu::{Error, ResultFilter, SearchParams};
use pretty_assertions::assert_eq;
use sonic_rs::JsonValueTrait;

mod util;

#[tokio::test]
async fn maps_tweets_by_default() {
    let client = util::client_from(|req| async move {
        assert_eq!(req.uri().path(), "/2/search/adaptive.json");

        let query = util::query_map(&req);
        assert_eq!(query["q"], "鎌倉殿");
        assert_eq!(query["count"], "20");
        assert_eq!(query["tweet_mode"], "extended");

        util::fixture_response()
    });

    let params = SearchParams::builder().term("鎌倉殿").count(20).build();
    let items = client.search_adaptive(&params).await.unwrap();

    assert_eq!(items.len(), 3);

    let first = items[0].as_tweet().unwrap();
    assert_eq!(first.id, 1_521_067_027_032_588_289);
    assert_eq!(first.id_str, "1521067027032588289");
    assert!(first.user.is_none());
    assert!(items[0].as_user().is_none());
}

#[tokio::test]
async fn nothing_to_search_for_issues_no_request() {
    let client = util::client_from(util::refuse_request);

    let items = client
        .search_adaptive(&SearchParams::default())
        .await
        .unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn non_numeric_count_fails_before_any_request() {
    let client = util::client_from(util::refuse_request);
    let params = SearchParams::builder().term("test").count("test").build();

    let err = client.search_adaptive(&params).await.unwrap_err();
    assert!(matches!(err, Error::InvalidCount(..)));
}

#[tokio::test]
async fn unknown_result_filter_fails_before_any_request() {
    let client = util::client_from(util::refuse_request);
    let params = SearchParams::builder()
        .term("test")
        .result_filter("wrongvalue")
        .build();

    let err = client.search_adaptive(&params).await.unwrap_err();
    assert!(matches!(err, Error::UnknownResultFilter(..)));
}

#[tokio::test]
async fn user_filter_maps_users() {
    let client = util::client_from(|req| async move {
        assert_eq!(util::query_map(&req)["result_filter"], "user");
        util::fixture_response()
    });

    let params = SearchParams::builder()
        .term("鎌倉殿")
        .result_filter(ResultFilter::User)
        .build();
    let items = client.search_adaptive(&params).await.unwrap();

    assert_eq!(items.len(), 3);

    let first = items[0].as_user().unwrap();
    assert_eq!(first.id, 1_520_689_095_517_040_640);
    assert_eq!(first.screen_name, "kamakura13_fan");
    assert!(items[0].as_tweet().is_none());
}

#[tokio::test]
async fn expand_user_attaches_the_author() {
    let client = util::client_from(|_req| async move { util::fixture_response() });

    let params = SearchParams::builder()
        .term("鎌倉殿")
        .expand_user(true)
        .build();
    let items = client.search_adaptive(&params).await.unwrap();

    let authors: Vec<&str> = items
        .iter()
        .map(|item| {
            item.as_tweet()
                .unwrap()
                .user
                .as_ref()
                .unwrap()
                .screen_name
                .as_str()
        })
        .collect();
    assert_eq!(authors, ["nhk_dramas", "kamakura13_fan", "drama_memo_jp"]);
}

#[tokio::test]
async fn modifiers_reach_the_wire_in_fixed_order() {
    let client = util::client_from(|req| async move {
        let query = util::query_map(&req);
        assert_eq!(
            query["q"],
            "twitter min_replies:1 min_faves:2 min_retweets:3 lang:en until:2022-01-01 since:2006-06-01"
        );

        util::fixture_response()
    });

    let params = SearchParams::builder()
        .term("twitter")
        .min_replies(1)
        .min_faves(2)
        .min_retweets(3)
        .lang("en")
        .until("2022-01-01")
        .since("2006-06-01")
        .build();

    client.search_adaptive(&params).await.unwrap();
}

#[tokio::test]
async fn raw_query_overrides_the_other_arguments() {
    let client = util::client_from(|req| async move {
        let query = util::query_map(&req);
        assert_eq!(query.len(), 4);
        assert_eq!(query["q"], "twitter");
        assert_eq!(query["count"], "100");
        assert_eq!(query["result_filter"], "image");
        assert_eq!(query["tweet_mode"], "extended");

        util::fixture_response()
    });

    let params = SearchParams::builder()
        .raw_query("q=twitter&count=100&result_filter=image")
        .count(20)
        .build();
    let items = client.search_adaptive(&params).await.unwrap();

    assert_eq!(items.len(), 3);
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let client = util::client_from(|_req| async move {
        Ok(Response::builder()
            .status(StatusCode::TOO_MANY_REQUESTS)
            .body(Full::new(Bytes::from_static(b"{\"errors\":[]}")))
            .unwrap())
    });

    let params = SearchParams::builder().term("test").build();
    let err = client.search_adaptive(&params).await.unwrap_err();

    assert!(matches!(
        err,
        Error::RequestFailed(status) if status == StatusCode::TOO_MANY_REQUESTS
    ));
}

#[tokio::test]
async fn json_variant_returns_the_raw_payload() {
    let client = util::client_from(|_req| async move { util::fixture_response() });

    let params = SearchParams::builder().term("鎌倉殿").build();
    let value = client.search_adaptive_json(&params).await.unwrap();

    assert_eq!(
        value
            .get("globalObjects")
            .get("tweets")
            .get("1521067027032588289")
            .get("id_str")
            .as_str(),
        Some("1521067027032588289")
    );
}

#[tokio::test]
async fn json_variant_without_a_query_returns_an_empty_array() {
    let client = util::client_from(util::refuse_request);

    let value = client
        .search_adaptive_json(&SearchParams::default())
        .await
        .unwrap();
    assert_eq!(value, sonic_rs::json!([]));
}
