//! Integration tests for the account lifecycle.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_capture_signup_login_roundtrip() {
    let app = TestApp::new();
    let (_token, user) = app.signup_user("owner@example.com", "Avery").await;

    assert_eq!(user["role"], "owner");
    assert_eq!(user["status"], "active");
    assert!(user["team"].is_string(), "owner should get a team");

    let login = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "owner@example.com",
                "password": "s3cret-pass",
            })),
            None,
        )
        .await;
    assert_eq!(login.status, StatusCode::OK);
    assert!(login.body["data"]["token"].is_string());
}

#[tokio::test]
async fn test_duplicate_capture_is_conflict() {
    let app = TestApp::new();
    app.signup_user("owner@example.com", "Avery").await;

    let response = app
        .request(
            "POST",
            "/api/auth/capture-email",
            Some(serde_json::json!({ "email": "owner@example.com" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_invalid_email_is_rejected() {
    let app = TestApp::new();
    let response = app
        .request(
            "POST",
            "/api/auth/capture-email",
            Some(serde_json::json!({ "email": "not-an-email" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_wrong_password_is_unauthorized() {
    let app = TestApp::new();
    app.signup_user("owner@example.com", "Avery").await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({
                "email": "owner@example.com",
                "password": "wrong-pass",
            })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_requires_token() {
    let app = TestApp::new();

    let anonymous = app.request("GET", "/api/users/me", None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let (token, _user) = app.signup_user("owner@example.com", "Avery").await;
    let me = app.request("GET", "/api/users/me", None, Some(&token)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["data"]["email"], "owner@example.com");
}

#[tokio::test]
async fn test_invite_and_decline() {
    let mut app = TestApp::new();
    let (token, _owner) = app.signup_user("owner@example.com", "Avery").await;

    let invited = app
        .request(
            "POST",
            "/api/auth/invite",
            Some(serde_json::json!({
                "emails": ["new@example.com", "owner@example.com"],
                "groups": [],
                "role": "member",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(invited.status, StatusCode::OK);
    assert_eq!(
        invited.body["data"]["existing"],
        serde_json::json!(["owner@example.com"])
    );
    let new_user = invited.body["data"]["invited"][0].as_str().unwrap();

    // Invitation emails were queued for delivery.
    let mut queued_emails = 0;
    while let Ok(message) = app.outbound.try_recv() {
        if matches!(message, taskhub_worker::queue::Outbound::Email(_)) {
            queued_emails += 1;
        }
    }
    assert_eq!(queued_emails, 2, "welcome + invitation");

    let declined = app
        .request(
            "POST",
            "/api/auth/decline",
            Some(serde_json::json!({ "id": new_user })),
            None,
        )
        .await;
    assert_eq!(declined.status, StatusCode::OK);
    assert_eq!(declined.body["data"]["status"], "declined");
}
