//! Integration tests for DocassembleClient against a mocked server.
//!
//! Each test starts a wiremock server, points a client at it and checks the
//! exact HTTP traffic and the mapping of the response.

use docassemble_core::{
    ApiKeyFilter, ClientConfig, CreateApiKey, CreateUser, DocassembleClient, DocassembleError,
    ExtractTemplateFields, InstallPackage, ListUsers, PackageInstall, RedirectUrl, RetrieveStash,
    SessionRef, SetInterviewVariables, StartInterview, StashData, UpdateApiKey, Upload,
    UserProfile,
};
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{
    body_json, body_string_contains, header, header_regex, method, path, query_param,
    query_param_is_missing,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "test-api-key";

fn client_for(server: &MockServer) -> DocassembleClient {
    DocassembleClient::new(ClientConfig::new(server.uri(), API_KEY)).unwrap()
}

#[tokio::test]
async fn test_requests_carry_api_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user"))
        .and(header("X-API-Key", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "email": "admin@example.com",
            "id": 1,
            "privileges": ["admin"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let user = client_for(&server).get_current_user().await.unwrap();
    assert_eq!(user["email"], "admin@example.com");
}

#[tokio::test]
async fn test_default_flags_are_omitted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user_list"))
        .and(query_param_is_missing("include_inactive"))
        .and(query_param_is_missing("next_id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": [], "next_id": null})))
        .expect(1)
        .mount(&server)
        .await;

    let page = client_for(&server)
        .list_users(&ListUsers::default())
        .await
        .unwrap();
    assert_eq!(page["items"], json!([]));
}

#[tokio::test]
async fn test_flags_sent_when_enabled() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user_list"))
        .and(query_param("include_inactive", "1"))
        .and(query_param("next_id", "42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .expect(1)
        .mount(&server)
        .await;

    let req = ListUsers {
        include_inactive: true,
        next_id: Some("42".to_string()),
    };
    client_for(&server).list_users(&req).await.unwrap();
}

#[tokio::test]
async fn test_create_user_body_contains_only_supplied_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/user/new"))
        .and(body_json(json!({
            "username": "new@example.com",
            "privileges": ["developer"],
            "first_name": "Ada"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user_id": 5,
            "password": "generated"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let req = CreateUser {
        username: "new@example.com".to_string(),
        privileges: Some(vec!["developer".to_string()]),
        first_name: Some("Ada".to_string()),
        last_name: Some(String::new()),
        ..Default::default()
    };
    let created = client_for(&server).create_user(&req).await.unwrap();
    assert_eq!(created["user_id"], 5);
}

#[tokio::test]
async fn test_no_content_maps_to_null() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/user/7"))
        .and(query_param("remove", "account"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .deactivate_user(7, Some("account"))
        .await
        .unwrap();
    assert_eq!(result, Value::Null);
}

#[tokio::test]
async fn test_text_response_maps_to_string() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/secret"))
        .and(query_param("username", "a@example.com"))
        .and(query_param("password", "pw"))
        .respond_with(ResponseTemplate::new(200).set_body_string("abcdef0123456789"))
        .mount(&server)
        .await;

    let secret = client_for(&server)
        .get_user_secret("a@example.com", "pw")
        .await
        .unwrap();
    assert_eq!(secret, json!("abcdef0123456789"));
}

#[tokio::test]
async fn test_error_status_preserves_code_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/privileges"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Access denied."))
        .mount(&server)
        .await;

    let err = client_for(&server).list_privileges().await.unwrap_err();
    match err {
        DocassembleError::Api {
            status_code,
            response_data,
            ..
        } => {
            assert_eq!(status_code, Some(403));
            assert_eq!(response_data.as_deref(), Some("Access denied."));
        }
        other => panic!("expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_redirect_url_expire_and_one_time() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/temp_url"))
        .and(query_param("url", "https://example.com/next"))
        .and(query_param("one_time", "1"))
        .and(query_param_is_missing("expire"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!("https://da.example.com/goto?c=x")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let req = RedirectUrl {
        url: "https://example.com/next".to_string(),
        one_time: true,
        ..Default::default()
    };
    let url = client_for(&server).get_redirect_url(&req).await.unwrap();
    assert_eq!(url, json!("https://da.example.com/goto?c=x"));
}

#[tokio::test]
async fn test_start_interview_forwards_url_args() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/session/new"))
        .and(query_param("i", "docassemble.demo:data/questions/questions.yml"))
        .and(query_param("lang", "de"))
        .and(query_param("reset", "True"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "session": "abc123",
            "encrypted": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut req = StartInterview::new("docassemble.demo:data/questions/questions.yml");
    req.url_args.insert("lang".to_string(), json!("de"));
    req.url_args.insert("reset".to_string(), json!(true));
    let result = client_for(&server).start_interview(&req).await.unwrap();
    assert_eq!(result["session"], "abc123");
}

#[tokio::test]
async fn test_set_variables_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/session"))
        .and(header_regex("content-type", "^application/json"))
        .and(body_json(json!({
            "i": "a.yml",
            "session": "abc",
            "variables": {"first_name": "Ada"},
            "question": "0"
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut variables = serde_json::Map::new();
    variables.insert("first_name".to_string(), json!("Ada"));
    let req = SetInterviewVariables {
        i: "a.yml".to_string(),
        session: "abc".to_string(),
        variables: Some(variables),
        question: false,
        ..Default::default()
    };
    let result = client_for(&server)
        .set_interview_variables(&req, vec![])
        .await
        .unwrap();
    assert!(result.is_null());
}

#[tokio::test]
async fn test_set_variables_multipart_with_files() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/session"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .and(body_string_contains("name=\"variables\""))
        .and(body_string_contains("filename=\"letter.pdf\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"questionText": "Done"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut variables = serde_json::Map::new();
    variables.insert("x".to_string(), json!(1));
    let req = SetInterviewVariables {
        i: "a.yml".to_string(),
        session: "abc".to_string(),
        variables: Some(variables),
        ..Default::default()
    };
    let files = vec![Upload::from_bytes("letter", "letter.pdf", b"%PDF-1.4".to_vec())];
    let result = client_for(&server)
        .set_interview_variables(&req, files)
        .await
        .unwrap();
    assert_eq!(result["questionText"], "Done");
}

#[tokio::test]
async fn test_retrieve_stored_file_returns_bytes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/file/12"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8, 159, 146, 150]))
        .mount(&server)
        .await;

    let bytes = client_for(&server).retrieve_stored_file(12).await.unwrap();
    assert_eq!(bytes.as_ref(), &[0u8, 159, 146, 150]);
}

#[tokio::test]
async fn test_install_package_routes_pip_name() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/package"))
        .and(body_json(json!({"pip": "docassemble.demo", "restart": "0"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"task_id": "t1"})))
        .expect(1)
        .mount(&server)
        .await;

    let req = InstallPackage {
        package: Some("docassemble.demo".to_string()),
        restart: false,
        ..Default::default()
    };
    let result = client_for(&server).install_package(&req, None).await.unwrap();
    assert_eq!(result["task_id"], "t1");
}

#[tokio::test]
async fn test_connect_detects_version_from_config() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"version": "1.4.96"})))
        .mount(&server)
        .await;

    let client = DocassembleClient::connect(ClientConfig::new(server.uri(), API_KEY))
        .await
        .unwrap();
    assert_eq!(client.da_version(), Some("1.4.96"));
    assert!(client.is_feature_supported("get_redirect_url"));
}

#[tokio::test]
async fn test_connect_falls_back_to_landing_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/config"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Access denied."))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<html><head><title>Docassemble 0.9.3</title></head></html>",
        ))
        .mount(&server)
        .await;

    let client = DocassembleClient::connect(ClientConfig::new(server.uri(), API_KEY))
        .await
        .unwrap();
    assert_eq!(client.da_version(), Some("0.9.3"));
    assert!(!client.is_feature_supported("get_redirect_url"));
}

#[tokio::test]
async fn test_connect_unknown_version() {
    let server = MockServer::start().await;

    let client = DocassembleClient::connect(ClientConfig::new(server.uri(), API_KEY))
        .await
        .unwrap();
    assert_eq!(client.da_version(), Some("unknown"));
}

#[tokio::test]
async fn test_enhanced_request_missing_endpoint_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/convert_file"))
        .respond_with(ResponseTemplate::new(404).set_body_string("<html>HTML_ERROR_PAGE</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let value = client
        .enhanced_request(docassemble_core::ApiRequest::get("/api/convert_file"))
        .await
        .unwrap();
    assert_eq!(value["status"], "unsupported");
    assert_eq!(value["feature"], "convert_file");
    assert_eq!(value["fallback"], true);
}

#[tokio::test]
async fn test_enhanced_request_missing_endpoint_without_fallbacks() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/convert_file"))
        .respond_with(ResponseTemplate::new(404).set_body_string("HTML_ERROR_PAGE"))
        .mount(&server)
        .await;

    let client = DocassembleClient::new(
        ClientConfig::new(server.uri(), API_KEY).with_fallbacks(false),
    )
    .unwrap();
    let err = client
        .enhanced_request(docassemble_core::ApiRequest::get("/api/convert_file"))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(404));
}

#[tokio::test]
async fn test_enhanced_request_retries_once_on_gateway_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/restart_status"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/restart_status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "finished"})))
        .expect(1)
        .mount(&server)
        .await;

    let value = client_for(&server)
        .enhanced_request(docassemble_core::ApiRequest::get("/api/restart_status"))
        .await
        .unwrap();
    assert_eq!(value["status"], "finished");
}

#[tokio::test]
async fn test_enhanced_variables_session_expired() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/session"))
        .respond_with(
            ResponseTemplate::new(400).set_body_string("Unable to obtain interview dictionary."),
        )
        .mount(&server)
        .await;

    let value = client_for(&server)
        .enhanced_get_interview_variables(&SessionRef::new("a.yml", "gone"))
        .await
        .unwrap();
    assert_eq!(value["status"], "session_expired");
    assert_eq!(value["session"], "gone");
    assert_eq!(value["variables"], json!({}));
}

#[tokio::test]
async fn test_enhanced_start_interview_adds_metadata() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/session/new"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "session": "abc123",
            "encrypted": true,
            "secret": "s"
        })))
        .mount(&server)
        .await;

    let value = client_for(&server)
        .enhanced_start_interview(&StartInterview::new("a.yml"))
        .await
        .unwrap();
    assert_eq!(value["session"], "abc123");
    assert_eq!(value["enhanced"], true);
    assert_eq!(value["session_timeout"], 3600);
}

#[tokio::test]
async fn test_timeout_reports_configured_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"email": "admin@example.com"}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = ClientConfig::new(server.uri(), API_KEY).with_timeout(Duration::from_millis(300));
    let client = DocassembleClient::new(config).unwrap();
    let err = client.get_current_user().await.unwrap_err();
    match &err {
        DocassembleError::Timeout(limit) => assert_eq!(*limit, Duration::from_millis(300)),
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(err.to_string(), "Request timeout after 300ms");
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_enhanced_request_does_not_retry_client_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/restart_status"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not found"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .enhanced_request(docassemble_core::ApiRequest::get("/api/restart_status"))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(404));
}

#[tokio::test]
async fn test_update_user_sends_inactive_flag() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/user/7"))
        .and(body_json(json!({"active": false})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let profile = UserProfile {
        active: Some(false),
        ..Default::default()
    };
    let result = client_for(&server).update_user(7, &profile).await.unwrap();
    assert!(result.is_null());
}

#[tokio::test]
async fn test_extract_template_fields_uploads_template() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/fields"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .and(body_string_contains("name=\"template\""))
        .and(body_string_contains("filename=\"t.pdf\""))
        .and(|req: &wiremock::Request| {
            !String::from_utf8_lossy(&req.body).contains("name=\"format\"")
        })
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"fields": ["name"]})))
        .expect(1)
        .mount(&server)
        .await;

    let template = Upload::from_bytes("file", "t.pdf", b"%PDF-1.4".to_vec());
    let result = client_for(&server)
        .extract_template_fields(template, &ExtractTemplateFields::default())
        .await
        .unwrap();
    assert_eq!(result["fields"][0], "name");
}

#[tokio::test]
async fn test_extract_template_fields_yaml_format() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/fields"))
        .and(body_string_contains("name=\"format\""))
        .and(body_string_contains("yaml"))
        .respond_with(ResponseTemplate::new(200).set_body_string("fields:\n  - name\n"))
        .expect(1)
        .mount(&server)
        .await;

    let template = Upload::from_bytes("file", "t.docx", b"PK".to_vec());
    let options = ExtractTemplateFields {
        format: "yaml".to_string(),
    };
    let result = client_for(&server)
        .extract_template_fields(template, &options)
        .await
        .unwrap();
    assert_eq!(result, json!("fields:\n  - name\n"));
}

#[tokio::test]
async fn test_install_or_update_package_from_zip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/package"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .and(body_string_contains("name=\"zip\""))
        .and(body_string_contains("filename=\"pkg.zip\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"task_id": "t2"})))
        .expect(1)
        .mount(&server)
        .await;

    let zip = Upload::from_bytes("file", "pkg.zip", b"PK\x03\x04".to_vec());
    let result = client_for(&server)
        .install_or_update_package(&PackageInstall::default(), Some(zip))
        .await
        .unwrap();
    assert_eq!(result["task_id"], "t2");
}

#[tokio::test]
async fn test_own_api_key_endpoints() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user/api"))
        .and(query_param("name", "ci"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "ci"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/user/api"))
        .and(body_json(json!({"name": "ci", "method": "none"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!("NEWKEY")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/user/api"))
        .and(body_json(json!({"api_key": "NEWKEY", "name": "deploy"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/user/api"))
        .and(query_param("api_key", "NEWKEY"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let filter = ApiKeyFilter {
        name: Some("ci".to_string()),
        ..Default::default()
    };
    assert_eq!(client.get_user_api_keys(&filter).await.unwrap()["name"], "ci");

    let create: CreateApiKey = serde_json::from_value(json!({"name": "ci"})).unwrap();
    assert_eq!(client.create_user_api_key(&create).await.unwrap(), "NEWKEY");

    let update = UpdateApiKey {
        api_key: Some("NEWKEY".to_string()),
        name: Some("deploy".to_string()),
        ..Default::default()
    };
    assert!(client.update_user_api_key(&update).await.unwrap().is_null());
    assert!(client.delete_user_api_key("NEWKEY").await.unwrap().is_null());
}

#[tokio::test]
async fn test_other_user_api_key_endpoints() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user/7/api"))
        .and(query_param("api_key", "K7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"key": "K7"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/user/7/api"))
        .and(body_json(json!({"name": "ci", "method": "ip", "allowed": ["10.0.0.1"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!("K7")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/api/user/7/api"))
        .and(body_json(json!({"api_key": "K7", "method": "none"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/user/7/api"))
        .and(query_param("api_key", "K7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let filter = ApiKeyFilter {
        api_key: Some("K7".to_string()),
        ..Default::default()
    };
    assert_eq!(client.get_user_api_keys_by_id(7, &filter).await.unwrap()["key"], "K7");

    let create = CreateApiKey {
        name: "ci".to_string(),
        method: "ip".to_string(),
        allowed: Some(vec!["10.0.0.1".to_string()]),
        permissions: None,
    };
    assert_eq!(client.create_user_api_key_by_id(7, &create).await.unwrap(), "K7");

    let update = UpdateApiKey {
        api_key: Some("K7".to_string()),
        method: Some("none".to_string()),
        ..Default::default()
    };
    assert!(client.update_user_api_key_by_id(7, &update).await.unwrap().is_null());
    assert!(client.delete_user_api_key_by_id(7, "K7").await.unwrap().is_null());
}

#[tokio::test]
async fn test_update_other_user_api_key_requires_key() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/user/7/api"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&server)
        .await;

    let update = UpdateApiKey {
        name: Some("renamed".to_string()),
        ..Default::default()
    };
    let err = client_for(&server)
        .update_user_api_key_by_id(7, &update)
        .await
        .unwrap_err();
    assert!(matches!(err, DocassembleError::InvalidParams { .. }));
}

#[tokio::test]
async fn test_stash_data_sends_raw_flag() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/stash_data"))
        .and(body_json(json!({"data": {"name": "Ann"}, "expire": 3600, "raw": "1"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"stash_key": "sk", "secret": "s"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let req = StashData {
        data: json!({"name": "Ann"}),
        expire: Some(3600),
        raw: true,
    };
    let result = client_for(&server).stash_data(&req).await.unwrap();
    assert_eq!(result["stash_key"], "sk");
}

#[tokio::test]
async fn test_retrieve_stashed_data_delete_and_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/retrieve_stashed_data"))
        .and(query_param("stash_key", "sk"))
        .and(query_param("secret", "s"))
        .and(query_param("delete", "1"))
        .and(query_param("refresh", "60"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "Ann"})))
        .expect(1)
        .mount(&server)
        .await;

    let req = RetrieveStash {
        stash_key: "sk".to_string(),
        secret: "s".to_string(),
        delete: true,
        refresh: Some(60),
    };
    let result = client_for(&server).retrieve_stashed_data(&req).await.unwrap();
    assert_eq!(result["name"], "Ann");
}
