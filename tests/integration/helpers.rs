//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use taskhub_api::state::AppState;
use taskhub_auth::jwt::{JwtDecoder, JwtEncoder};
use taskhub_auth::password::PasswordHasher;
use taskhub_core::config::{
    AppConfig, AuthConfig, LoggingConfig, MailConfig, ServerConfig, WorkerConfig,
};
use taskhub_core::types::OrderKeyGenerator;
use taskhub_service::comment::CommentService;
use taskhub_service::folder::FolderService;
use taskhub_service::group::GroupService;
use taskhub_service::hierarchy::{Cascade, TreeBuilder};
use taskhub_service::record::RecordService;
use taskhub_service::scope::AccessScope;
use taskhub_service::task::TaskService;
use taskhub_service::user::UserService;
use taskhub_store::{FolderStore, GroupStore, LogStore, RecordStore, TaskStore, UserStore};
use taskhub_worker::queue::{Outbound, OutboundQueue};

/// Test application context.
pub struct TestApp {
    /// The Axum router for making test requests.
    pub router: Router,
    /// Receiver of whatever the app tried to send out.
    pub outbound: tokio::sync::mpsc::Receiver<Outbound>,
}

fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_allowed_origins: Vec::new(),
        },
        auth: AuthConfig {
            jwt_secret: "integration-test-secret".to_string(),
            token_ttl_hours: 24,
            signup_token_ttl_hours: 24 * 365,
        },
        mail: MailConfig {
            client_url: "http://client.test".to_string(),
            from_address: "no-reply@test".to_string(),
            from_name: "TaskHub".to_string(),
            delivery_endpoint: "http://mail.test/send".to_string(),
        },
        worker: WorkerConfig::default(),
        logging: LoggingConfig::default(),
    }
}

impl TestApp {
    /// Create a new test application over fresh in-memory stores.
    pub fn new() -> Self {
        let config = test_config();

        let folders = Arc::new(FolderStore::new());
        let tasks = Arc::new(TaskStore::new());
        let logs = Arc::new(LogStore::new());
        let users = Arc::new(UserStore::new());
        let groups = Arc::new(GroupStore::new());
        let records = Arc::new(RecordStore::new());

        let password_hasher = Arc::new(PasswordHasher::new());
        let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

        let order_keys = Arc::new(OrderKeyGenerator::new());
        let tree = Arc::new(TreeBuilder::new(Arc::clone(&folders), Arc::clone(&tasks)));
        let cascade = Arc::new(Cascade::new(
            Arc::clone(&folders),
            Arc::clone(&tasks),
            Arc::clone(&logs),
        ));
        let scope = Arc::new(AccessScope::new(Arc::clone(&folders), Arc::clone(&groups)));

        // No delivery runner in tests: messages stay on the channel for
        // assertions.
        let (queue, outbound) = OutboundQueue::new(64);

        let folder_service = Arc::new(FolderService::new(
            Arc::clone(&folders),
            Arc::clone(&users),
            Arc::clone(&scope),
            Arc::clone(&tree),
            Arc::clone(&cascade),
            Arc::clone(&order_keys),
        ));
        let task_service = Arc::new(TaskService::new(
            Arc::clone(&tasks),
            Arc::clone(&folders),
            Arc::clone(&logs),
            Arc::clone(&tree),
            Arc::clone(&cascade),
            Arc::clone(&order_keys),
        ));
        let comment_service = Arc::new(CommentService::new(
            Arc::clone(&logs),
            Arc::clone(&tasks),
            Arc::clone(&folders),
            Arc::clone(&users),
            Arc::clone(&tree),
            queue.clone(),
        ));
        let user_service = Arc::new(UserService::new(
            Arc::clone(&users),
            Arc::clone(&folders),
            Arc::clone(&groups),
            password_hasher,
            jwt_encoder,
            queue.clone(),
            config.mail.clone(),
            Arc::clone(&order_keys),
        ));
        let group_service = Arc::new(GroupService::new(Arc::clone(&groups), Arc::clone(&users)));
        let record_service = Arc::new(RecordService::new(records, Arc::clone(&tasks)));

        let state = AppState {
            config: Arc::new(config),
            jwt_decoder,
            folder_service,
            task_service,
            comment_service,
            user_service,
            group_service,
            record_service,
        };

        Self {
            router: taskhub_api::router::build_router(state),
            outbound,
        }
    }

    /// Capture an email, complete the signup, and return the token plus
    /// the user object.
    pub async fn signup_user(&self, email: &str, name: &str) -> (String, Value) {
        let captured = self
            .request(
                "POST",
                "/api/auth/capture-email",
                Some(serde_json::json!({ "email": email })),
                None,
            )
            .await;
        assert_eq!(captured.status, StatusCode::OK, "capture: {:?}", captured.body);
        let id = captured.body["data"]["id"].as_str().unwrap().to_string();

        self.signup_pending(&id, name).await
    }

    /// Complete the signup of an already-created pending user.
    pub async fn signup_pending(&self, id: &str, name: &str) -> (String, Value) {
        let signed = self
            .request(
                "POST",
                "/api/auth/signup",
                Some(serde_json::json!({
                    "id": id,
                    "name": name,
                    "password": "s3cret-pass",
                })),
                None,
            )
            .await;
        assert_eq!(signed.status, StatusCode::OK, "signup: {:?}", signed.body);

        let token = signed.body["data"]["token"].as_str().unwrap().to_string();
        let user = signed.body["data"]["user"].clone();
        (token, user)
    }

    /// Make an HTTP request to the test app.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request.
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Parsed JSON body.
    pub body: Value,
}
