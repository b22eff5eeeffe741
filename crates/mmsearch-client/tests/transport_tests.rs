//! HTTP-level tests against a wiremock backend.

use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use mmsearch_client::{HttpTransport, VisionClient};
use mmsearch_core::builders;
use mmsearch_core::error::{Error, TransportError};
use mmsearch_core::traits::Transport;
use mmsearch_core::types::{BinaryPayload, HealthStatus, QueryMode, RawBody, SearchForm, SearchRequest};

fn client(server: &MockServer) -> VisionClient {
    let transport = HttpTransport::new(&format!("{}/", server.uri())).expect("transport");
    VisionClient::new(transport)
}

fn cat() -> BinaryPayload { BinaryPayload::new("cat.jpg", b"fake-jpeg-bytes".to_vec()) }

fn text_search(query: &str) -> SearchRequest {
    let mut form = SearchForm::new(QueryMode::Text);
    form.text = query.to_string();
    SearchRequest::from_form(form).expect("form")
}

#[tokio::test]
async fn trailing_slash_base_joins_cleanly() {
    let server = MockServer::start().await;
    let transport = HttpTransport::new(&format!("{}/", server.uri())).expect("transport");
    assert_eq!(transport.base_url(), server.uri());
}

#[tokio::test]
async fn text_search_posts_json_and_normalizes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/search/text"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "query": "red car", "k": 12 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{ "image_url": "/img/1.jpg", "score": 0.87 }, { "nothing": true }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let items = client(&server).search(&text_search("red car")).await.expect("search");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].url(), "/img/1.jpg");
    assert_eq!(items[0].score(), Some(0.87));
}

#[tokio::test]
async fn image_search_sends_multipart_parts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/search/image"))
        .and(header_exists("content-type"))
        .and(body_string_contains("name=\"image\"; filename=\"cat.jpg\""))
        .and(body_string_contains("Content-Type: image/jpeg"))
        .and(body_string_contains("name=\"k\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["/a.jpg"])))
        .expect(1)
        .mount(&server)
        .await;

    let mut form = SearchForm::new(QueryMode::Image);
    form.image = Some(cat());
    form.k = "4".to_string();
    let items = client(&server).search(&SearchRequest::from_form(form).expect("form")).await.expect("search");
    assert_eq!(items[0].url(), "/a.jpg");
}

#[tokio::test]
async fn non_json_search_body_is_a_format_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/search/text"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy page</html>"))
        .mount(&server)
        .await;

    let err = client(&server).search(&text_search("anything")).await.unwrap_err();
    assert!(matches!(err, Error::Format(_)), "got {err:?}");
}

#[tokio::test]
async fn non_2xx_is_http_error_with_status_only_in_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/vqa/describe"))
        .respond_with(ResponseTemplate::new(503).set_body_string("model warming up"))
        .mount(&server)
        .await;

    let err = client(&server).describe(Some(&cat())).await.unwrap_err();
    let Error::Transport(transport) = &err else { panic!("expected transport error, got {err:?}") };
    assert_eq!(transport.code(), "http");
    assert_eq!(transport.status(), Some(503));
    assert!(matches!(transport, TransportError::Http { detail: Some(d), .. } if d == "model warming up"));
    assert_eq!(err.to_string(), "Request failed: 503");
}

#[tokio::test]
async fn unreachable_backend_is_network_error() {
    let transport = HttpTransport::new("http://127.0.0.1:9").expect("transport");
    let err = transport.send(builders::index_stats()).await.unwrap_err();
    assert_eq!(err.code(), "network");
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn plain_text_answer_is_kept_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/vqa/question"))
        .and(body_string_contains("name=\"question\""))
        .respond_with(ResponseTemplate::new(200).set_body_raw("It is red.", "text/plain"))
        .mount(&server)
        .await;

    let answer = client(&server).ask(Some(&cat()), "What color?").await.expect("ask");
    assert_eq!(answer.as_str(), "It is red.");
}

#[tokio::test]
async fn index_build_omits_blank_dir_on_the_wire() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/index/build"))
        .and(body_json(json!({ "train_index": true })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "building" })))
        .expect(1)
        .mount(&server)
        .await;

    let ack = client(&server).build_index(Some(""), true).await.expect("build");
    assert_eq!(ack.0, Some(json!({ "status": "building" })));
}

#[tokio::test]
async fn index_add_uploads_every_image() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/index/add"))
        .and(body_string_contains("filename=\"cat.jpg\""))
        .and(body_string_contains("filename=\"dog.png\""))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let images = [cat(), BinaryPayload::new("dog.png", b"fake-png".to_vec())];
    let ack = client(&server).add_images(&images).await.expect("add");
    assert_eq!(ack.0, None, "non-JSON acknowledgements are tolerated");
}

#[tokio::test]
async fn stats_metrics_and_health() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/index/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "num_images": 1024 })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/metrics"))
        .respond_with(ResponseTemplate::new(200).set_body_string("# HELP up\nup 1\n"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let c = client(&server);
    assert_eq!(c.stats().await.expect("stats").0, json!({ "num_images": 1024 }));
    assert_eq!(c.metrics().await.expect("metrics").0, "# HELP up\nup 1\n");
    assert_eq!(c.health().await, HealthStatus::Healthy);
}

#[tokio::test]
async fn failing_health_is_unhealthy() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    assert_eq!(client(&server).health().await, HealthStatus::Unhealthy);
}

#[tokio::test]
async fn malformed_json_body_is_kept_as_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/index/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{not json", "application/json"))
        .mount(&server)
        .await;

    let transport = HttpTransport::new(&server.uri()).expect("transport");
    let raw = transport.send(builders::index_stats()).await.expect("raw");
    assert!(raw.is_json());
    assert_eq!(raw.body, RawBody::Text("{not json".to_string()));
    let err = VisionClient::new(transport).stats().await.unwrap_err();
    assert!(matches!(err, Error::Format(_)));
}
