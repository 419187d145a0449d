//! Integration tests for the ontoapp HTTP client

use ontoapp_http::types::{Category, TaxonomyDocument};
use ontoapp_http::{AuthenticatedClient, ClientBuilder, ClientError, PublicClient};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_client_builder() {
    let client = ClientBuilder::new()
        .base_url("http://localhost:8000")
        .timeout(Duration::from_secs(5))
        .user_agent("test-agent")
        .build();

    assert!(client.is_ok());
    let client = client.unwrap();
    assert_eq!(client.base_url(), "http://localhost:8000");
}

#[tokio::test]
async fn test_login_returns_token_pair() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({"username": "alice", "password": "pw"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "acc-1",
            "refresh_token": "ref-1"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = PublicClient::new(mock_server.uri()).unwrap();
    let tokens = client.login("alice", "pw").await.unwrap();

    assert_eq!(tokens.access_token, "acc-1");
    assert_eq!(tokens.refresh_token, "ref-1");
}

#[tokio::test]
async fn test_login_wrong_password_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!("User does not exist or wrong password")),
        )
        .mount(&mock_server)
        .await;

    let client = PublicClient::new(mock_server.uri()).unwrap();
    let err = client.login("alice", "nope").await.unwrap_err();

    match err {
        ClientError::NotFound(message) => {
            assert_eq!(message, "User does not exist or wrong password")
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_add_user_conflict() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/user/add"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!("alice already exists")))
        .mount(&mock_server)
        .await;

    let client = PublicClient::new(mock_server.uri()).unwrap();
    let err = client.add_user("alice", "pw").await.unwrap_err();
    assert!(matches!(err, ClientError::Conflict(_)));
}

#[tokio::test]
async fn test_protected_request_sends_token_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/get"))
        .and(header("jasonWebToken", "acc-1"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "username": "alice",
            "created_at": "2024-05-01T10:00:00",
            "last_login": "2024-05-03T08:30:00"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = AuthenticatedClient::new(format!("{}/", mock_server.uri()), "acc-1").unwrap();
    assert_eq!(client.base_url(), mock_server.uri());
    assert_eq!(client.access_token(), "acc-1");

    let user = client.get_user().await.unwrap();
    assert_eq!(user.username, "alice");
}

#[tokio::test]
async fn test_refresh_does_not_send_token_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .and(header_exists("jasonWebToken"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .and(body_json(json!({"refresh_token": "ref-1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "acc-2",
            "refresh_token": "ref-2"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = PublicClient::new(mock_server.uri()).unwrap();
    let tokens = client.refresh("ref-1").await.unwrap();
    assert_eq!(tokens.access_token, "acc-2");
}

#[tokio::test]
async fn test_logout_accepts_empty_no_content() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .and(header("jasonWebToken", "acc-1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = PublicClient::new(mock_server.uri())
        .unwrap()
        .authenticate("acc-1");
    client.logout().await.unwrap();
}

#[tokio::test]
async fn test_delete_taxonomy_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/taxonomie/delete"))
        .and(header("jasonWebToken", "acc-1"))
        .and(body_json(json!({"id": 7, "password": "pw"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!("Taxonomy successfully deleted")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = PublicClient::new(mock_server.uri())
        .unwrap()
        .authenticate("acc-1");
    let message = client.delete_taxonomy(7, "pw").await.unwrap();
    assert_eq!(message.as_str(), "Taxonomy successfully deleted");
}

#[tokio::test]
async fn test_get_taxonomy_uses_query_param() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/taxonomie/get"))
        .and(query_param("taxonomie_id", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3,
            "user_id": 1,
            "domain": "Biology",
            "description": "Animals",
            "data": {"api_key": "None", "id": "3", "categories": []},
            "created_at": "2024-05-01T10:00:00",
            "last_update": "2024-05-01T10:00:00"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = PublicClient::new(mock_server.uri())
        .unwrap()
        .authenticate("acc-1");
    let taxonomy = client.get_taxonomy(3).await.unwrap();
    assert_eq!(taxonomy.domain, "Biology");
    assert_eq!(taxonomy.document().unwrap().id, "3");
}

#[tokio::test]
async fn test_list_taxonomies() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/taxonomie/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "1": {
                "id": 1, "user_id": 1, "domain": "Biology", "description": "Animals",
                "data": "Only available with single id",
                "created_at": "2024-05-01T10:00:00", "last_update": "2024-05-01T10:00:00"
            },
            "2": {
                "id": 2, "user_id": 1, "domain": "Music", "description": "Genres",
                "data": "Only available with single id",
                "created_at": "2024-05-01T10:00:00", "last_update": "2024-05-01T10:00:00"
            }
        })))
        .mount(&mock_server)
        .await;

    let client = PublicClient::new(mock_server.uri())
        .unwrap()
        .authenticate("acc-1");
    let listing = client.list_taxonomies().await.unwrap();
    assert_eq!(listing.len(), 2);
    assert_eq!(listing["2"].domain, "Music");
}

#[tokio::test]
async fn test_generate_taxonomy_round() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/taxonomie/generate"))
        .and(body_json(json!({
            "api_key": "sk-test",
            "id": "3",
            "categories": []
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "api_key": "None",
            "id": "3",
            "categories": [{"name": "Mammals"}, {"name": "Birds"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = PublicClient::new(mock_server.uri())
        .unwrap()
        .authenticate("acc-1");
    let document = TaxonomyDocument {
        api_key: "sk-test".to_string(),
        id: "3".to_string(),
        categories: vec![],
    };
    let generated = client.generate_taxonomy(&document).await.unwrap();
    assert_eq!(
        generated.categories,
        vec![
            Category { name: "Mammals".into(), subcategories: vec![] },
            Category { name: "Birds".into(), subcategories: vec![] },
        ]
    );
}

#[tokio::test]
async fn test_forbidden_is_access_denied() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/taxonomie/save"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Access Denied"))
        .mount(&mock_server)
        .await;

    let client = PublicClient::new(mock_server.uri())
        .unwrap()
        .authenticate("stale");
    let document = TaxonomyDocument {
        api_key: "None".to_string(),
        id: "3".to_string(),
        categories: vec![],
    };
    let err = client.save_taxonomy(&document).await.unwrap_err();
    assert!(err.is_access_denied());
    assert_eq!(err.status(), Some(403));
}

#[tokio::test]
async fn test_save_taxonomy_puts_document() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/taxonomie/save"))
        .and(header("jasonWebToken", "acc-1"))
        .and(body_json(json!({
            "api_key": "None",
            "id": "3",
            "categories": [{"name": "Mammals"}]
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!("Taxonomy successfully updated")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = PublicClient::new(mock_server.uri())
        .unwrap()
        .authenticate("acc-1");
    let document = TaxonomyDocument {
        api_key: "None".to_string(),
        id: "3".to_string(),
        categories: vec![Category { name: "Mammals".into(), subcategories: vec![] }],
    };
    let message = client.save_taxonomy(&document).await.unwrap();
    assert_eq!(message.as_str(), "Taxonomy successfully updated");
}
