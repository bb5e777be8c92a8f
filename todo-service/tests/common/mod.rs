use std::sync::Arc;

use auth::Authenticator;
use auth::JwtHandler;
use auth::PasswordHasher;
use serde_json::json;
use todo_service::identity::service::IdentityService;
use todo_service::inbound::http::router::create_router;
use todo_service::repositories::InMemoryIdentityRepository;
use todo_service::repositories::InMemoryTodoRepository;
use todo_service::todo::service::TodoService;
use tower_http::cors::CorsLayer;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server over in-memory storage
pub struct TestApp {
    pub address: String,
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

        // Minimum Argon2 cost keeps the suite fast
        let password_hasher =
            PasswordHasher::with_work_factor(8, 1, 1).expect("Failed to build password hasher");
        let authenticator =
            Arc::new(Authenticator::new(JWT_SECRET, 1).with_password_hasher(password_hasher));

        let identity_service = Arc::new(IdentityService::new(
            Arc::new(InMemoryIdentityRepository::new()),
            authenticator,
        ));
        let todo_service = Arc::new(TodoService::new(Arc::new(InMemoryTodoRepository::new())));

        let router = create_router(identity_service, todo_service, CorsLayer::permissive());

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(JWT_SECRET),
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

    /// Helper to make PUT request
    pub fn put(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.put(format!("{}{}", self.address, path))
    }

    /// Helper to make PATCH request
    pub fn patch(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.patch(format!("{}{}", self.address, path))
    }

    /// Helper to make DELETE request
    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(format!("{}{}", self.address, path))
    }

    pub async fn register(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/register")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Register, log in and return the bearer token
    pub async fn token_for(&self, email: &str, password: &str) -> String {
        self.register(email, password).await;
        let body: serde_json::Value = self
            .login(email, password)
            .await
            .json()
            .await
            .expect("Failed to parse response");

        body["token"]
            .as_str()
            .expect("Login response has no token")
            .to_string()
    }

    /// Create a todo and return its id
    pub async fn create_todo(&self, token: &str, body: serde_json::Value) -> String {
        let body: serde_json::Value = self
            .post("/api/todos")
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request")
            .json()
            .await
            .expect("Failed to parse response");

        body["_id"]
            .as_str()
            .expect("Create response has no id")
            .to_string()
    }
}
