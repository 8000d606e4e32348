// Each test binary uses a different subset of these helpers.
#![allow(dead_code)]

use std::sync::Arc;

use auth::Authenticator;
use serde_json::json;
use serde_json::Value;
use sqlx::postgres::PgConnectOptions;
use sqlx::postgres::PgPoolOptions;
use sqlx::Connection;
use sqlx::Executor;
use sqlx::PgConnection;
use sqlx::PgPool;
use task_service::domain::account::ports::AccountRepository;
use task_service::domain::account::service::AccountService;
use task_service::domain::task::ports::TaskRepository;
use task_service::domain::task::service::TaskService;
use task_service::inbound::http::router::create_router;
use task_service::outbound::repositories::InMemoryAccountRepository;
use task_service::outbound::repositories::InMemoryTaskRepository;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub authenticator: Authenticator,
}

impl TestApp {
    /// Spawn the application over in-memory storage
    pub async fn spawn() -> Self {
        Self::spawn_with(
            Arc::new(InMemoryAccountRepository::new()),
            Arc::new(InMemoryTaskRepository::new()),
        )
        .await
    }

    /// Spawn the application over the given repositories in a background task
    pub async fn spawn_with<AR, TR>(account_repository: Arc<AR>, task_repository: Arc<TR>) -> Self
    where
        AR: AccountRepository,
        TR: TaskRepository,
    {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let authenticator =
            Arc::new(Authenticator::new(JWT_SECRET).expect("Failed to create authenticator"));

        let account_service = Arc::new(
            AccountService::new(account_repository, Arc::clone(&authenticator), 24)
                .expect("Failed to create account service"),
        );
        let task_service = Arc::new(TaskService::new(task_repository));

        let router = create_router(account_service, task_service, authenticator);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            authenticator: Authenticator::new(JWT_SECRET).expect("Failed to create authenticator"),
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
    pub async fn register(&self, email: &str, password: &str) -> Value {
        let response = self
            .post("/register")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        response.json().await.expect("Failed to parse response")
    }

    /// Register an account, log in and return the issued token
    pub async fn register_and_login(&self, email: &str, password: &str) -> String {
        self.register(email, password).await;

        let response = self
            .post("/login")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("Missing token")
            .to_string()
    }
}

/// Throwaway PostgreSQL database with migrations applied
pub struct TestDb {
    pub pool: PgPool,
    pub db_name: String,
    server_url: String,
}

impl TestDb {
    /// Create a database with a unique name on the server named by
    /// `DATABASE__URL`. Returns `None` when the variable is unset.
    pub async fn new() -> Option<Self> {
        let server_url = std::env::var("DATABASE__URL").ok()?;

        let db_name = format!(
            "test_task_service_{}",
            uuid::Uuid::new_v4().to_string().replace('-', "_")
        );

        let mut conn = PgConnection::connect(&server_url)
            .await
            .expect("Failed to connect to Postgres");

        conn.execute(format!(r#"CREATE DATABASE "{}";"#, db_name).as_str())
            .await
            .expect("Failed to create test database");

        let options = server_url
            .parse::<PgConnectOptions>()
            .expect("Failed to parse DATABASE__URL")
            .database(&db_name);

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .expect("Failed to connect to test database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        Some(Self {
            pool,
            db_name,
            server_url,
        })
    }

    /// Close the pool and drop the database
    pub async fn cleanup(self) {
        self.pool.close().await;

        if let Ok(mut conn) = PgConnection::connect(&self.server_url).await {
            let _ = conn
                .execute(format!(r#"DROP DATABASE IF EXISTS "{}" WITH (FORCE);"#, self.db_name).as_str())
                .await;
        }
    }
}
