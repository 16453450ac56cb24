use super::wire::PostsResponse;
use super::*;
use reqwest::StatusCode;

#[test]
fn posts_url_appends_collection_and_drops_query() {
    for (base, expected) in [
        ("https://dummyjson.com", "https://dummyjson.com/posts"),
        ("https://dummyjson.com/", "https://dummyjson.com/posts"),
        ("http://127.0.0.1:9000/api/", "http://127.0.0.1:9000/api/posts"),
        ("http://host/api?x=1#frag", "http://host/api/posts"),
    ] {
        let url = posts_collection_url(base).expect("valid base");
        assert_eq!(url.as_str(), expected, "base: {}", base);
    }
}

#[test]
fn posts_url_rejects_unusable_bases() {
    for base in ["not a url", "mailto:someone@example.com"] {
        match posts_collection_url(base) {
            Err(AppError::InvalidBaseUrl { url, .. }) => assert_eq!(url, base),
            other => panic!("expected invalid base error for {}, got {:?}", base, other),
        }
    }
}

#[test]
fn client_construction_surfaces_invalid_base() {
    let config = Config {
        api_base_url: "::nope::".to_string(),
        ..Config::default()
    };
    assert!(matches!(
        PostsClient::new(&config),
        Err(AppError::InvalidBaseUrl { .. })
    ));
}

#[test]
fn error_message_prefers_json_fields_then_body_then_reason() {
    assert_eq!(
        error_message_for_response(StatusCode::NOT_FOUND, r#"{"message":"Post not found"}"#),
        "Post not found"
    );
    assert_eq!(
        error_message_for_response(StatusCode::BAD_REQUEST, r#"{"error":"bad skip"}"#),
        "bad skip"
    );
    assert_eq!(
        error_message_for_response(StatusCode::BAD_GATEWAY, " upstream down \n"),
        "upstream down"
    );
    assert_eq!(
        error_message_for_response(StatusCode::SERVICE_UNAVAILABLE, ""),
        "Service Unavailable"
    );
}

#[test]
fn wire_page_uses_total_when_present() {
    let wire: PostsResponse = serde_json::from_str(
        r#"{"posts":[{"id":1,"title":"a","body":"b","tags":["x"]}],"total":251,"skip":0,"limit":1}"#,
    )
    .expect("parse");
    let page = wire.into_page(0);
    assert_eq!(page.total_count, 251);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].tags, vec!["x".to_string()]);
}

#[test]
fn wire_page_estimates_total_when_missing() {
    let wire: PostsResponse =
        serde_json::from_str(r#"{"posts":[{"id":11},{"id":12}]}"#).expect("parse");
    assert_eq!(wire.into_page(10).total_count, 12);

    let empty: PostsResponse = serde_json::from_str("{}").expect("parse");
    let page = empty.into_page(0);
    assert!(page.items.is_empty());
    assert_eq!(page.total_count, 0);
}
