//! Integration tests for folder/task trees and cascading deletion.

use http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

async fn create_folder(app: &TestApp, token: &str, parent: Option<&str>, name: &str) -> String {
    let response = app
        .request(
            "POST",
            "/api/folders",
            Some(json!({ "parent": parent, "name": name })),
            Some(token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    response.body["data"]["id"].as_str().unwrap().to_string()
}

async fn create_task(app: &TestApp, token: &str, folder: &str, name: &str) -> String {
    let response = app
        .request(
            "POST",
            "/api/tasks",
            Some(json!({ "name": name, "folder": folder })),
            Some(token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    response.body["data"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_root_folder_is_team_shared_and_nested_is_not() {
    let app = TestApp::new();
    let (token, user) = app.signup_user("owner@example.com", "Avery").await;

    let root = create_folder(&app, &token, None, "F1").await;
    let nested = create_folder(&app, &token, Some(&root), "F2").await;

    let root_folder = app
        .request("GET", &format!("/api/folders/{root}"), None, Some(&token))
        .await;
    let grants = root_folder.body["data"]["share_with"].as_array().unwrap();
    assert_eq!(grants.len(), 1);
    assert_eq!(grants[0]["kind"], "team");
    assert_eq!(grants[0]["item"], user["team"]);

    let nested_folder = app
        .request("GET", &format!("/api/folders/{nested}"), None, Some(&token))
        .await;
    assert!(
        nested_folder.body["data"]["share_with"]
            .as_array()
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_folder_tree_nests_children_in_order() {
    let app = TestApp::new();
    let (token, _user) = app.signup_user("owner@example.com", "Avery").await;

    let root = create_folder(&app, &token, None, "root").await;
    let first = create_folder(&app, &token, Some(&root), "first").await;
    let second = create_folder(&app, &token, Some(&root), "second").await;
    create_task(&app, &token, &first, "t1").await;

    let tree = app
        .request("GET", "/api/folders/tree", None, Some(&token))
        .await;
    assert_eq!(tree.status, StatusCode::OK);

    let trees = tree.body["data"].as_array().unwrap();
    let root_node = trees
        .iter()
        .find(|node| node["id"].as_str() == Some(root.as_str()))
        .expect("root should be in the visible forest");

    let subfolders = root_node["subfolders"].as_array().unwrap();
    assert_eq!(subfolders.len(), 2);
    // Creation order is preserved through the monotonic ordering keys.
    assert_eq!(subfolders[0]["id"], json!(first));
    assert_eq!(subfolders[1]["id"], json!(second));
    assert_eq!(subfolders[0]["tasks"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_cascading_delete_and_idempotent_redelete() {
    let app = TestApp::new();
    let (token, _user) = app.signup_user("owner@example.com", "Avery").await;

    let f1 = create_folder(&app, &token, None, "F1").await;
    let f2 = create_folder(&app, &token, Some(&f1), "F2").await;
    let t1 = create_task(&app, &token, &f2, "T1").await;

    let deleted = app
        .request("DELETE", &format!("/api/folders/{f1}"), None, Some(&token))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["data"], json!(true));

    for path in [
        format!("/api/folders/{f1}"),
        format!("/api/folders/{f2}"),
        format!("/api/tasks/{t1}"),
    ] {
        let response = app.request("GET", &path, None, Some(&token)).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{path}");
    }

    // Re-deleting an already-deleted folder succeeds and removes nothing.
    let redeleted = app
        .request("DELETE", &format!("/api/folders/{f1}"), None, Some(&token))
        .await;
    assert_eq!(redeleted.status, StatusCode::OK);
    assert_eq!(redeleted.body["data"], json!(false));
}

#[tokio::test]
async fn test_sort_folders_changes_listing_order() {
    let app = TestApp::new();
    let (token, _user) = app.signup_user("owner@example.com", "Avery").await;

    let a = create_folder(&app, &token, None, "a").await;
    let b = create_folder(&app, &token, None, "b").await;
    let c = create_folder(&app, &token, None, "c").await;

    let sorted = app
        .request(
            "PUT",
            "/api/folders/sort",
            Some(json!({ "folders": [a, b, c], "orders": [30, 10, 20] })),
            Some(&token),
        )
        .await;
    assert_eq!(sorted.status, StatusCode::OK);
    assert_eq!(sorted.body["data"], json!(3));

    let listed = app.request("GET", "/api/folders", None, Some(&token)).await;
    let names: Vec<&str> = listed.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|folder| folder["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["b", "c", "a"]);
}

#[tokio::test]
async fn test_comment_on_task_under_webhook_root_queues_notification() {
    let mut app = TestApp::new();
    let (token, _user) = app.signup_user("owner@example.com", "Avery").await;

    let root = create_folder(&app, &token, None, "root").await;
    let updated = app
        .request(
            "PUT",
            &format!("/api/folders/{root}"),
            Some(json!({ "slack_webhook": "https://hooks.test/T1" })),
            Some(&token),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);

    let nested = create_folder(&app, &token, Some(&root), "nested").await;
    let task = create_task(&app, &token, &nested, "write docs").await;

    let comment = app
        .request(
            "POST",
            "/api/comments",
            Some(json!({
                "target": { "kind": "task", "item": task },
                "body": "how is this going?",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(comment.status, StatusCode::OK);

    // Drain the queue: the welcome email from signup, then the webhook.
    let mut webhook = None;
    while let Ok(message) = app.outbound.try_recv() {
        if let taskhub_worker::queue::Outbound::Webhook { url, payload } = message {
            webhook = Some((url, payload));
        }
    }
    let (url, payload) = webhook.expect("a webhook should have been queued");
    assert_eq!(url, "https://hooks.test/T1");
    assert!(payload["text"].as_str().unwrap().contains("write docs"));
}
