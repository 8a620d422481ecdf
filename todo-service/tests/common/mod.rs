#![allow(dead_code)]

use std::sync::Arc;

use auth::Authenticator;
use auth::AuthorizationGate;
use auth::JwtHandler;
use auth::TokenConfig;
use serde_json::json;
use serde_json::Value;
use todo_service::domain::account::service::AccountService;
use todo_service::domain::task::service::TaskService;
use todo_service::inbound::http::router::create_router;
use todo_service::outbound::repositories::InMemoryAccountRepository;
use todo_service::outbound::repositories::InMemoryTaskRepository;

pub const TEST_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server over in-memory stores
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let token_config =
            TokenConfig::with_defaults(TEST_SECRET).expect("Failed to build token config");

        let account_service = Arc::new(
            AccountService::new(
                Arc::new(InMemoryAccountRepository::new()),
                Authenticator::new(&token_config),
            )
            .expect("Failed to build account service"),
        );
        let task_service = Arc::new(TaskService::new(Arc::new(InMemoryTaskRepository::new())));
        let gate = Arc::new(AuthorizationGate::new(&token_config));

        let router = create_router(account_service, task_service, gate);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(&token_config),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register an account and return the response body
    pub async fn register(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/api/v1/auth/register")
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in and return the response
    pub async fn login(&self, username: &str, password: &str) -> reqwest::Response {
        self.post("/api/v1/auth/login")
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Register an account, log in, and return (account id, token)
    pub async fn signed_in(&self, username: &str, password: &str) -> (i64, String) {
        let body: Value = self
            .register(username, password)
            .await
            .json()
            .await
            .expect("Failed to parse response");
        let id = body["data"]["id"].as_i64().expect("Missing account id");

        let body: Value = self
            .login(username, password)
            .await
            .json()
            .await
            .expect("Failed to parse response");
        let token = body["data"]["token"]
            .as_str()
            .expect("Missing token")
            .to_string();

        (id, token)
    }

    /// Create a task with the given title and return its id
    pub async fn create_task(&self, token: &str, title: &str) -> i64 {
        let body: Value = self
            .post_authenticated("/api/v1/todos", token)
            .json(&json!({ "title": title }))
            .send()
            .await
            .expect("Failed to execute request")
            .json()
            .await
            .expect("Failed to parse response");

        body["data"]["id"].as_i64().expect("Missing task id")
    }
}
