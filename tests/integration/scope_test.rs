//! Integration tests for permission-scoped folder visibility.

use http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

/// Sign up an owner, then invite and sign up a collaborator on the
/// same team. Returns (owner token, collaborator token, collaborator id).
async fn team_with_collaborator(app: &TestApp) -> (String, String, String) {
    let (owner_token, _owner) = app.signup_user("owner@example.com", "Avery").await;

    let invited = app
        .request(
            "POST",
            "/api/auth/invite",
            Some(json!({
                "emails": ["collab@example.com"],
                "groups": [],
                "role": "collaborator",
            })),
            Some(&owner_token),
        )
        .await;
    assert_eq!(invited.status, StatusCode::OK, "{:?}", invited.body);
    let collaborator_id = invited.body["data"]["invited"][0]
        .as_str()
        .unwrap()
        .to_string();

    let (collab_token, _collab) = app.signup_pending(&collaborator_id, "Casey").await;
    (owner_token, collab_token, collaborator_id)
}

#[tokio::test]
async fn test_collaborator_does_not_see_team_shared_folders() {
    let app = TestApp::new();
    let (owner_token, collab_token, _collab_id) = team_with_collaborator(&app).await;

    // Owner creates a root folder: auto-shared with the team only.
    let created = app
        .request(
            "POST",
            "/api/folders",
            Some(json!({ "parent": null, "name": "Team stuff" })),
            Some(&owner_token),
        )
        .await;
    assert_eq!(created.status, StatusCode::OK);

    let owner_view = app
        .request("GET", "/api/folders", None, Some(&owner_token))
        .await;
    assert_eq!(owner_view.body["data"].as_array().unwrap().len(), 2);

    // The collaborator sees neither the team root nor the folder.
    let collab_view = app
        .request("GET", "/api/folders", None, Some(&collab_token))
        .await;
    assert!(collab_view.body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_individual_grant_opens_folder_to_collaborator() {
    let app = TestApp::new();
    let (owner_token, collab_token, collab_id) = team_with_collaborator(&app).await;

    let created = app
        .request(
            "POST",
            "/api/folders",
            Some(json!({
                "parent": null,
                "name": "Shared out",
                "share_with": [{ "kind": "collaborator", "item": collab_id }],
            })),
            Some(&owner_token),
        )
        .await;
    assert_eq!(created.status, StatusCode::OK);
    let folder = created.body["data"]["id"].as_str().unwrap();

    let collab_view = app
        .request("GET", "/api/folders", None, Some(&collab_token))
        .await;
    let visible = collab_view.body["data"].as_array().unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0]["id"], json!(folder));
}

#[tokio::test]
async fn test_collaborator_created_root_is_self_visible() {
    let app = TestApp::new();
    let (_owner_token, collab_token, _collab_id) = team_with_collaborator(&app).await;

    // The share policy grants restricted creators individual access to
    // their own top-level folders.
    let created = app
        .request(
            "POST",
            "/api/folders",
            Some(json!({ "parent": null, "name": "My corner" })),
            Some(&collab_token),
        )
        .await;
    assert_eq!(created.status, StatusCode::OK, "{:?}", created.body);

    let collab_view = app
        .request("GET", "/api/folders", None, Some(&collab_token))
        .await;
    let visible = collab_view.body["data"].as_array().unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0]["name"], "My corner");
}

#[tokio::test]
async fn test_group_grant_opens_folder_to_group_members() {
    let app = TestApp::new();
    let (owner_token, collab_token, collab_id) = team_with_collaborator(&app).await;

    let group = app
        .request(
            "POST",
            "/api/groups",
            Some(json!({ "name": "external reviewers", "users": [collab_id] })),
            Some(&owner_token),
        )
        .await;
    assert_eq!(group.status, StatusCode::OK);
    let group_id = group.body["data"]["id"].as_str().unwrap();

    let created = app
        .request(
            "POST",
            "/api/folders",
            Some(json!({
                "parent": null,
                "name": "Review pile",
                "share_with": [{ "kind": "group", "item": group_id }],
            })),
            Some(&owner_token),
        )
        .await;
    assert_eq!(created.status, StatusCode::OK);

    let collab_view = app
        .request("GET", "/api/folders", None, Some(&collab_token))
        .await;
    let visible = collab_view.body["data"].as_array().unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0]["name"], "Review pile");
}

#[tokio::test]
async fn test_parent_listing_returns_one_level() {
    let app = TestApp::new();
    let (owner_token, _collab_token, _collab_id) = team_with_collaborator(&app).await;

    let root = app
        .request(
            "POST",
            "/api/folders",
            Some(json!({ "parent": null, "name": "root" })),
            Some(&owner_token),
        )
        .await;
    let root_id = root.body["data"]["id"].as_str().unwrap().to_string();

    for name in ["child-a", "child-b"] {
        let child = app
            .request(
                "POST",
                "/api/folders",
                Some(json!({ "parent": root_id, "name": name })),
                Some(&owner_token),
            )
            .await;
        let child_id = child.body["data"]["id"].as_str().unwrap().to_string();
        // A grandchild that must not show up in the one-level listing.
        app.request(
            "POST",
            "/api/folders",
            Some(json!({ "parent": child_id, "name": format!("{name}-grandchild") })),
            Some(&owner_token),
        )
        .await;
    }

    let listed = app
        .request(
            "GET",
            &format!("/api/folders?parent={root_id}"),
            None,
            Some(&owner_token),
        )
        .await;
    let names: Vec<&str> = listed.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|folder| folder["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["child-a", "child-b"]);
}
