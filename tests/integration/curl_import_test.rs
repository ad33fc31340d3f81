//! Curl-import integration tests.
//!
//! Exercises the tokenizer, interpreter and builder together on realistic
//! commands pasted from browsers and documentation.

use raptor_client::builder::{self, WireBody};
use raptor_client::curl::{parse_command, parse_command_with, tokenize, ParseError};
use raptor_client::models::{AuthKind, BodyKind, HttpMethod, SequentialGenerator};
use raptor_client::variables::Resolver;
use std::collections::HashMap;

#[test]
fn test_method_and_url_survive_import_exactly() {
    for method in ["GET", "POST", "PUT", "DELETE", "PATCH", "HEAD", "OPTIONS"] {
        let command = format!("curl -X {} https://api.example.com/items", method);
        let request = parse_command(&command).unwrap();
        assert_eq!(request.method.to_string(), method);
        assert_eq!(request.url, "https://api.example.com/items");
    }
}

#[test]
fn test_quoted_url_with_spaces_stays_one_token() {
    let tokens = tokenize(r#"curl -X POST "http://a.com/x y""#);
    assert_eq!(tokens, vec!["curl", "-X", "POST", "http://a.com/x y"]);

    let request = parse_command(r#"curl -X POST "http://a.com/x y""#).unwrap();
    assert_eq!(request.url, "http://a.com/x y");
}

#[test]
fn test_browser_copy_as_curl_shape() {
    let command = concat!(
        "curl 'https://api.example.com/v1/search' \\\n",
        "  -H 'accept: application/json' \\\n",
        "  -H 'authorization: Bearer tok-123' \\\n",
        "  --data-raw '{\"query\":\"widgets\"}'"
    );

    let request = parse_command(command).unwrap();
    assert_eq!(request.method, HttpMethod::POST);
    assert_eq!(request.url, "https://api.example.com/v1/search");
    assert_eq!(request.body.kind, BodyKind::Raw);
    assert_eq!(request.body.raw, "{\"query\":\"widgets\"}");

    // The Authorization header is lifted into structured auth
    assert_eq!(request.auth.kind, AuthKind::Bearer);
    assert_eq!(request.auth.bearer_token, "tok-123");
    assert!(!request
        .headers
        .iter()
        .any(|h| h.key.eq_ignore_ascii_case("authorization")));
    assert_eq!(request.headers.len(), 1);
    assert_eq!(request.name, "POST /v1/search");
}

#[test]
fn test_basic_auth_decoded_from_header() {
    // base64("user:pass") = dXNlcjpwYXNz
    let request =
        parse_command("curl -H 'Authorization: Basic dXNlcjpwYXNz' https://x.test/").unwrap();
    assert_eq!(request.auth.kind, AuthKind::Basic);
    assert_eq!(request.auth.basic_username, "user");
    assert_eq!(request.auth.basic_password, "pass");
}

#[test]
fn test_user_flag_sets_basic_auth() {
    let request = parse_command("curl -u admin:s3cret https://x.test/").unwrap();
    assert_eq!(request.auth.kind, AuthKind::Basic);
    assert_eq!(request.auth.basic_username, "admin");
    assert_eq!(request.auth.basic_password, "s3cret");
}

#[test]
fn test_empty_command_is_the_only_error() {
    assert_eq!(parse_command("").unwrap_err(), ParseError::EmptyCommand);
    assert_eq!(parse_command("   \n ").unwrap_err(), ParseError::EmptyCommand);

    // Garbage still imports as something
    assert!(parse_command("curl --bogus-flag").is_ok());
    assert!(parse_command(r#"curl "http://unbalanced.test"#).is_ok());
}

#[test]
fn test_deterministic_ids_with_injected_generator() {
    let ids = SequentialGenerator::new("req");
    let first = parse_command_with("curl http://a.test", &ids).unwrap();
    let second = parse_command_with("curl http://b.test", &ids).unwrap();
    assert_eq!(first.id, "req-1");
    assert_eq!(second.id, "req-2");
}

#[test]
fn test_imported_request_builds_with_variables() {
    let ids = SequentialGenerator::new("req");
    let request =
        parse_command_with("curl -H 'X-Token: {{token}}' '{{base}}/users'", &ids).unwrap();

    let mut vars = HashMap::new();
    vars.insert("base".to_string(), "https://api.example.com".to_string());
    vars.insert("token".to_string(), "abc".to_string());
    let wire = builder::build(&request, &Resolver::new(vars));

    assert_eq!(wire.url, "https://api.example.com/users");
    assert!(wire
        .headers
        .iter()
        .any(|(k, v)| k == "X-Token" && v == "abc"));
    assert_eq!(wire.body, WireBody::None);
}

#[test]
fn test_query_params_merge_after_existing_query() {
    use raptor_client::models::{ApiKeyLocation, AuthConfig, KeyValuePair, RequestItem};

    let mut request = RequestItem::new("merge");
    request.url = "http://x/y?z=1".to_string();
    request.params.push(KeyValuePair::new("a", "b"));
    request.auth = AuthConfig::api_key("k", "v", ApiKeyLocation::Query);

    let wire = builder::build(&request, &Resolver::empty());
    assert_eq!(wire.url, "http://x/y?z=1&a=b&k=v");
}
