//! End-to-end integration tests for Raptor Client
//!
//! These tests verify complete user workflows: importing a curl command,
//! saving it into the collection, switching environments and sending the
//! request against a live mock server.

use raptor_client::collection::{CollectionStore, TreeNode};
use raptor_client::curl::parse_command;
use raptor_client::environment::EnvironmentStore;
use raptor_client::executor;
use raptor_client::models::{FolderItem, HttpMethod, RequestItem};
use raptor_client::session::EditorSession;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};

#[test]
fn test_import_save_and_send_workflow() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/login")
        .match_header("content-type", "application/json")
        .match_body(r#"{"user":"ada"}"#)
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"token":"t1"}"#)
        .create();

    // Step 1: import a pasted curl command
    let command = format!(
        "curl -X POST {}/login -H 'Content-Type: application/json' -d '{{\"user\":\"ada\"}}'",
        server.url()
    );
    let request = parse_command(&command).unwrap();
    assert_eq!(request.method, HttpMethod::POST);

    // Step 2: save it into the collection
    let store = CollectionStore::new();
    store.add_request(request.clone());
    let saved = store.get_request(&request.id).unwrap();

    // Step 3: send it
    let environments = EnvironmentStore::new();
    let response = executor::send(&saved, &environments.resolver());

    mock.assert();
    assert_eq!(response.status_code, 201);
    assert_eq!(response.status_text, "Created");
    assert_eq!(response.body, r#"{"token":"t1"}"#);
    assert!(response.is_success());
}

#[test]
fn test_environment_switch_changes_target_host() {
    let mut server = mockito::Server::new();
    let mock = server.mock("GET", "/health").with_status(200).create();

    let environments = EnvironmentStore::new();
    environments.set_variable("dev", "host", server.url());
    environments.set_variable("prod", "host", "http://127.0.0.1:1");

    let mut request = RequestItem::new("Health");
    request.url = "{{host}}/health".to_string();

    // Against dev the request reaches the mock server
    environments.set_active_environment(Some("dev".to_string()));
    let response = executor::send(&request, &environments.resolver());
    mock.assert();
    assert_eq!(response.status_code, 200);

    // Against prod (an unroutable host) the same request degrades to the
    // transport-failure sentinel
    environments.set_active_environment(Some("prod".to_string()));
    let response = executor::send(&request, &environments.resolver());
    assert_eq!(response.status_code, 0);
    assert_eq!(response.status_text, "Error");
    assert!(response.is_transport_failure());
}

#[test]
fn test_background_dispatch_with_snapshot_isolation() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("GET", "/v")
        .with_status(200)
        .with_body("ok")
        .create();

    let environments = EnvironmentStore::new();
    environments.set_variable("dev", "base", server.url());
    environments.set_active_environment(Some("dev".to_string()));

    let mut request = RequestItem::new("snap");
    request.url = "{{base}}/v".to_string();

    let resolver = environments.resolver();
    // A write after the snapshot is taken must not affect the in-flight send
    environments.set_variable("dev", "base", "http://127.0.0.1:1");

    let (tx, rx) = mpsc::channel();
    let handle = executor::dispatch(request, resolver, move |response| {
        tx.send(response).unwrap();
    });

    let response = rx.recv().unwrap();
    handle.join().unwrap();
    assert_eq!(response.status_code, 200);
    assert_eq!(response.body, "ok");
}

#[test]
fn test_collection_tree_and_persistence_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("collection.json");

    let store = CollectionStore::new();
    let folder = FolderItem::new("Users API");
    let folder_id = folder.id.clone();
    store.add_folder(folder);

    let mut request = parse_command("curl https://api.example.com/users").unwrap();
    request.parent_id = Some(folder_id.clone());
    store.add_request(request);
    store.add_draft(RequestItem::new("scratch"));

    store.save_to(&path).unwrap();

    let restored = CollectionStore::new();
    restored.load_from(&path).unwrap();

    let roots = restored.root_nodes();
    assert!(matches!(roots[0], TreeNode::Folder(_)));
    assert!(roots.iter().any(|n| matches!(n, TreeNode::DraftsMarker)));

    let children = restored.child_nodes(&folder_id);
    assert_eq!(children.len(), 1);
    match &children[0] {
        TreeNode::Request(r) => assert_eq!(r.url, "https://api.example.com/users"),
        other => panic!("unexpected node: {:?}", other),
    }
}

#[test]
fn test_editor_session_tracks_open_requests() {
    let store = CollectionStore::new();
    let request = RequestItem::new("editable");
    let id = request.id.clone();
    store.add_request(request);

    let session = EditorSession::new();
    assert!(session.open(id.clone()));
    assert!(!session.open(id.clone()), "second open focuses, not creates");

    session.close(&id);
    assert!(!session.is_open(&id));
}

#[test]
fn test_store_listeners_drive_ui_refresh() {
    let store = CollectionStore::new();
    let refreshes = Arc::new(AtomicUsize::new(0));
    let seen = refreshes.clone();
    store.add_listener(Box::new(move || {
        seen.fetch_add(1, Ordering::SeqCst);
    }));

    let request = RequestItem::new("watched");
    let id = request.id.clone();
    store.add_request(request);
    store.move_to_drafts(&id);
    store.remove_request(&id);

    assert_eq!(refreshes.load(Ordering::SeqCst), 3);
}
