//! End-to-end tests for the request pipeline over a real local server.

use fetchkit::{Fetcher, Payload};
use serde_json::{Value, json};

mod common;
use common::{UreqTransport, server_base, server_uri};

fn api() -> Fetcher<UreqTransport> {
    Fetcher::new(UreqTransport::new())
}

#[async_std::test]
async fn base_prefixes_future_calls() {
    let api = Fetcher::builder()
        .base(server_base())
        .build(UreqTransport::new());

    let response = api.get("json").await.unwrap();

    assert_eq!(response.as_json(), Some(&json!(["apple", "bat", "cat"])));
}

#[async_std::test]
async fn json_responses_decode_to_structured_data() {
    let names: Vec<String> = api().get(server_uri("/json")).await.unwrap().json().unwrap();

    assert_eq!(names, vec!["apple", "bat", "cat"]);
}

#[async_std::test]
async fn non_json_responses_decode_to_text() {
    let resolved = api().get(server_uri("/string")).await.unwrap();

    assert_eq!(resolved.as_text(), Some("some plain text"));
}

#[async_std::test]
async fn auto_parse_disabled_returns_the_raw_response() {
    let api = Fetcher::builder()
        .auto_parse(false)
        .build(UreqTransport::new());

    let raw = api
        .get(server_uri("/json"))
        .await
        .unwrap()
        .into_raw()
        .expect("raw response");

    assert!(raw.ok());
    assert_eq!(raw.body, br#"["apple","bat","cat"]"#);
}

#[async_std::test]
async fn get_payload_travels_as_query_parameters() {
    let echoed: Value = api()
        .get(server_uri("/echo"))
        .payload(json!({"foo": "hello world!", "baz": 10, "biz": true}))
        .await
        .unwrap()
        .json()
        .unwrap();

    assert_eq!(echoed["query"], "foo=hello+world%21&baz=10&biz=true");
    assert_eq!(echoed["body"], "");
}

#[async_std::test]
async fn post_array_payload_travels_as_json_body() {
    let echoed: Value = api()
        .post(server_uri("/echo"))
        .payload(json!(["a", "b", "c"]))
        .await
        .unwrap()
        .json()
        .unwrap();

    assert_eq!(echoed["method"], "POST");
    let body: Value = serde_json::from_str(echoed["body"].as_str().unwrap()).unwrap();
    assert_eq!(body, json!(["a", "b", "c"]));
}

#[async_std::test]
async fn caller_headers_merge_with_the_default_content_type() {
    let echoed: Value = api()
        .patch(server_uri("/echo"))
        .payload(json!({}))
        .header("Authorization", "Bearer of.good.news")
        .await
        .unwrap()
        .json()
        .unwrap();

    assert_eq!(echoed["headers"]["content-type"], "application/json");
    assert_eq!(echoed["headers"]["authorization"], "Bearer of.good.news");
}

#[async_std::test]
async fn query_container_payload_on_post_is_an_urlencoded_body() {
    let echoed: Value = api()
        .post(server_uri("/echo"))
        .payload(Payload::query([("q", "two words"), ("page", "2")]))
        .await
        .unwrap()
        .json()
        .unwrap();

    assert_eq!(echoed["body"], "q=two+words&page=2");
}

#[async_std::test]
async fn delete_without_payload_sends_no_body() {
    let echoed: Value = api()
        .delete(server_uri("/echo/1"))
        .await
        .unwrap()
        .json()
        .unwrap();

    assert_eq!(echoed["method"], "DELETE");
    assert_eq!(echoed["path"], "/echo/1");
    assert_eq!(echoed["body"], "");
}

#[async_std::test]
async fn concurrent_calls_through_one_handle_are_independent() {
    let api = Fetcher::builder()
        .base(server_base())
        .build(UreqTransport::new());

    let first = async_std::task::spawn({
        let api = api.clone();
        async move { api.get("json").await }
    });
    let second = async_std::task::spawn({
        let api = api.clone();
        async move { api.get("string").await }
    });

    assert!(first.await.unwrap().as_json().is_some());
    assert_eq!(second.await.unwrap().as_text(), Some("some plain text"));
}
