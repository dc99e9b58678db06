//! Integration tests for cursor pagination against a mock server.

use keap_api::clients::{ApiError, HttpClient};
use keap_api::rest::{PageValidation, Paginator, QueryParams};
use keap_api::{ApiKey, BaseUrl, KeapConfig};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Deserialize, PartialEq)]
struct Contact {
    id: u64,
}

fn create_test_client(server: &MockServer) -> HttpClient {
    let config = KeapConfig::builder()
        .api_key(ApiKey::new("test-api-key").unwrap())
        .base_url(BaseUrl::new(format!("{}/crm/rest/", server.uri())).unwrap())
        .retries(0)
        .build()
        .unwrap();
    HttpClient::new(config).unwrap()
}

fn page_response(server: &MockServer, ids: &[u64], offset: usize, count: u64) -> Value {
    let contacts: Vec<Value> = ids.iter().map(|id| json!({"id": id})).collect();
    json!({
        "contacts": contacts,
        "count": count,
        "next": format!("{}/crm/rest/v1/contacts?limit=2&offset={}", server.uri(), offset + 2),
        "previous": format!("{}/crm/rest/v1/contacts?limit=2&offset={}", server.uri(), offset.saturating_sub(2)),
    })
}

#[tokio::test]
async fn test_next_fetches_cursor_and_keeps_item_key() {
    let server = MockServer::start().await;
    let first = page_response(&server, &[1, 2], 0, 5);
    Mock::given(method("GET"))
        .and(path("/crm/rest/v1/contacts"))
        .and(query_param("offset", "2"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_response(&server, &[3, 4], 2, 5)))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let paginator: Paginator<'_, Contact> = Paginator::wrap(&client, first, "contacts").unwrap();
    let next = paginator.next().await.unwrap().unwrap();

    assert_eq!(next.items(), &[Contact { id: 3 }, Contact { id: 4 }]);
    assert_eq!(next.count(), 5);
    assert_eq!(next.items_key(), "contacts");
    assert_eq!(next.policy(), PageValidation::Strict);

    // The original page is untouched.
    assert_eq!(paginator.items(), &[Contact { id: 1 }, Contact { id: 2 }]);
}

#[tokio::test]
async fn test_previous_fetches_previous_cursor() {
    let server = MockServer::start().await;
    let second = page_response(&server, &[3, 4], 2, 5);
    Mock::given(method("GET"))
        .and(path("/crm/rest/v1/contacts"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_response(&server, &[1, 2], 0, 5)))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let paginator: Paginator<'_, Contact> = Paginator::wrap(&client, second, "contacts").unwrap();
    let previous = paginator.previous().await.unwrap().unwrap();

    assert_eq!(previous.items(), &[Contact { id: 1 }, Contact { id: 2 }]);
}

#[tokio::test]
async fn test_no_cursor_means_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let last_page = json!({"contacts": [{"id": 5}], "count": 5, "next": null, "previous": null});
    let paginator: Paginator<'_, Contact> =
        Paginator::wrap_with_policy(&client, last_page, "contacts", PageValidation::Lenient)
            .unwrap();

    assert!(paginator.next().await.unwrap().is_none());
    assert!(paginator.previous().await.unwrap().is_none());
}

#[tokio::test]
async fn test_malformed_next_page_is_invalid_response() {
    let server = MockServer::start().await;
    let first = page_response(&server, &[1, 2], 0, 5);
    Mock::given(method("GET"))
        .and(path("/crm/rest/v1/contacts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 5})))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let paginator: Paginator<'_, Contact> = Paginator::wrap(&client, first, "contacts").unwrap();
    let result = paginator.next().await;

    assert!(matches!(result, Err(ApiError::InvalidResponse { .. })));
}

#[tokio::test]
async fn test_failed_page_fetch_surfaces_request_error() {
    let server = MockServer::start().await;
    let first = page_response(&server, &[1, 2], 0, 5);
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let paginator: Paginator<'_, Contact> = Paginator::wrap(&client, first, "contacts").unwrap();
    let error = paginator.next().await.unwrap_err();

    assert_eq!(error.status(), Some(502));
}

#[tokio::test]
async fn test_foreign_cursor_is_rejected_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let response = json!({
        "contacts": [],
        "count": 0,
        "next": "https://elsewhere.example.com/crm/rest/v1/contacts?offset=2",
        "previous": ""
    });
    let paginator: Paginator<'_, Contact> =
        Paginator::wrap_with_policy(&client, response, "contacts", PageValidation::Lenient)
            .unwrap();

    let result = paginator.next().await;
    assert!(matches!(result, Err(ApiError::InvalidResponse { .. })));
}

#[test]
fn test_strict_wrap_rejects_empty_previous_cursor() {
    let client = HttpClient::new(
        KeapConfig::builder()
            .api_key(ApiKey::new("test-api-key").unwrap())
            .build()
            .unwrap(),
    )
    .unwrap();
    let first_page = json!({
        "contacts": [{"id": 1}],
        "count": 1,
        "next": "https://api.infusionsoft.com/crm/rest/v1/contacts?offset=1",
        "previous": ""
    });

    let result = Paginator::<Contact>::wrap(&client, first_page, "contacts");
    assert!(matches!(result, Err(ApiError::InvalidResponse { .. })));
}

#[tokio::test]
async fn test_walk_collection_with_filtered_query() {
    #[derive(Serialize)]
    struct ListContactsOptions {
        limit: u32,
        email: Option<String>,
        internal_flag: bool,
    }

    let server = MockServer::start().await;
    let uri = server.uri();
    Mock::given(method("GET"))
        .and(path("/crm/rest/v1/contacts"))
        .and(query_param("limit", "2"))
        .and(query_param("email", "ada@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "contacts": [{"id": 1}, {"id": 2}],
            "count": 3,
            "next": format!("{uri}/crm/rest/v1/contacts?limit=2&offset=2"),
            "previous": ""
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/crm/rest/v1/contacts"))
        .and(query_param("offset", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "contacts": [{"id": 3}],
            "count": 3,
            "next": "",
            "previous": format!("{uri}/crm/rest/v1/contacts?limit=2&offset=0")
        })))
        .mount(&server)
        .await;

    let client = create_test_client(&server);
    let options = ListContactsOptions {
        limit: 2,
        email: Some("ada@example.com".to_string()),
        internal_flag: true,
    };
    let query = QueryParams::from_options(&options, &["limit", "email"]).unwrap();
    assert_eq!(query.to_query_string(), "limit=2&email=ada%40example.com");

    let response = client.get(&query.append_to("v1/contacts")).await.unwrap();
    let mut page: Paginator<'_, Contact> =
        Paginator::wrap_with_policy(&client, response, "contacts", PageValidation::Lenient)
            .unwrap();

    let mut ids = Vec::new();
    loop {
        ids.extend(page.items().iter().map(|c| c.id));
        match page.next().await.unwrap() {
            Some(next) => page = next,
            None => break,
        }
    }

    assert_eq!(ids, vec![1, 2, 3]);
    assert!(page.has_previous());
    assert_eq!(page.policy(), PageValidation::Lenient);
}
