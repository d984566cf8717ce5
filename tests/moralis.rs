use std::time::Duration;
use walletscan::blockchain::{MoralisClient, TransactionSource};
use walletscan::models::{HistoryQuery, SortOrder};
use walletscan::FetchError;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

fn client(server: &MockServer) -> MoralisClient {
    MoralisClient::new(&server.uri(), "test-api-key", Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_fetches_wallet_history_page() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/0xabc"))
        .and(header("X-API-Key", "test-api-key"))
        .and(query_param("chain", "eth"))
        .and(query_param("order", "ASC"))
        .and(query_param("limit", "300"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "cursor": "next-page",
            "page_size": 300,
            "result": [
                {
                    "hash": "0x01",
                    "to_address": "0xC1",
                    "value": "1000",
                    "block_timestamp": "2024-02-01T12:00:00.000Z"
                },
                {
                    "hash": "0x02",
                    "to_address": null,
                    "block_timestamp": "2024-02-02T12:00:00.000Z"
                }
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let query = HistoryQuery::new("0xabc", "eth", SortOrder::Asc, 300);
    let page = client(&mock_server).wallet_transactions(&query).await.unwrap();

    assert_eq!(page.cursor.as_deref(), Some("next-page"));
    assert_eq!(page.result.len(), 2);
    assert_eq!(page.result[0].to_address.as_deref(), Some("0xC1"));
    assert_eq!(page.result[0].value, "1000");
    assert_eq!(page.result[1].to_address, None);
    assert_eq!(page.result[1].value, "0");
}

#[tokio::test]
async fn test_sends_cursor_when_present() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("GET"))
        .and(path("/0xabc"))
        .and(query_param("cursor", "abc123"))
        .and(query_param("order", "DESC"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "result": [] })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut query = HistoryQuery::new("0xabc", "polygon", SortOrder::Desc, 100);
    query.cursor = Some("abc123".to_string());
    let page = client(&mock_server).wallet_transactions(&query).await.unwrap();

    assert!(page.result.is_empty());
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid key"))
        .mount(&mock_server)
        .await;

    let query = HistoryQuery::new("0xabc", "eth", SortOrder::Asc, 300);
    let err = client(&mock_server).wallet_transactions(&query).await.unwrap_err();

    match err {
        FetchError::Status { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "Invalid key");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_a_decode_error() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let query = HistoryQuery::new("0xabc", "eth", SortOrder::Asc, 300);
    let err = client(&mock_server).wallet_transactions(&query).await.unwrap_err();

    assert!(matches!(err, FetchError::Decode(_)));
}
