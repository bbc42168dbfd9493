//! Test helper module for frontdesk-service integration tests.
//!
//! Provides common setup utilities for PostgreSQL-based tests. Tests that
//! need a database call `TestApp::spawn()`, which returns `None` (skip) when
//! `TEST_DATABASE_URL` is not set.

#![allow(dead_code)]

use frontdesk_service::config::{Config, DatabaseConfig, ServerConfig};
use frontdesk_service::services::init_metrics;
use frontdesk_service::Application;
use secrecy::Secret;
use std::sync::atomic::{AtomicU32, Ordering};

// Counter for unique schema names
static SCHEMA_COUNTER: AtomicU32 = AtomicU32::new(0);

/// Get the database URL for testing from the environment, if configured.
pub fn get_test_database_url() -> Option<String> {
    std::env::var("TEST_DATABASE_URL").ok()
}

/// Generate a unique schema name for test isolation.
fn unique_schema_name() -> String {
    let counter = SCHEMA_COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("test_frontdesk_{}_{}", std::process::id(), counter)
}

/// Test application wrapper for integration tests.
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub client: reqwest::Client,
    base_url: String,
    schema_name: String,
}

impl TestApp {
    /// Spawn a new test application on a random port, with its own schema.
    ///
    /// Returns `None` when `TEST_DATABASE_URL` is not set so tests can skip
    /// instead of failing on machines without Postgres.
    pub async fn spawn() -> Option<Self> {
        let base_url = match get_test_database_url() {
            Some(url) => url,
            None => {
                eprintln!("TEST_DATABASE_URL not set, skipping integration test");
                return None;
            }
        };

        init_metrics();

        let schema_name = unique_schema_name();

        // Create the schema for test isolation
        let bootstrap = sqlx::postgres::PgPoolOptions::new()
            .max_connections(1)
            .connect(&base_url)
            .await
            .expect("Failed to connect to test database");
        sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", schema_name))
            .execute(&bootstrap)
            .await
            .expect("Failed to create test schema");
        bootstrap.close().await;

        // Point the service at the schema via search_path
        let separator = if base_url.contains('?') { "&" } else { "?" };
        let schema_url = format!(
            "{}{}options=-csearch_path%3D{}",
            base_url, separator, schema_name
        );

        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: DatabaseConfig {
                url: Secret::new(schema_url),
                max_connections: 5,
                min_connections: 1,
            },
            service_name: "frontdesk-service".to_string(),
            log_level: "info".to_string(),
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build application");
        let port = app.port();

        tokio::spawn(async move {
            app.run_until_stopped().await.expect("Server crashed");
        });

        Some(Self {
            address: format!("http://127.0.0.1:{}", port),
            port,
            client: reqwest::Client::new(),
            base_url,
            schema_name,
        })
    }

    /// Drop the test schema.
    pub async fn cleanup(&self) {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(1)
            .connect(&self.base_url)
            .await
            .expect("Failed to connect for cleanup");
        sqlx::query(&format!("DROP SCHEMA IF EXISTS {} CASCADE", self.schema_name))
            .execute(&pool)
            .await
            .expect("Failed to drop test schema");
        pool.close().await;
    }

    /// Create a room, returning its id.
    pub async fn create_room(&self, number: &str, price_per_night: &str) -> String {
        let response = self
            .client
            .post(format!("{}/rooms", self.address))
            .json(&serde_json::json!({
                "number": number,
                "category": "simple",
                "price_per_night": price_per_night,
                "capacity": 2
            }))
            .send()
            .await
            .expect("Failed to create room");
        assert_eq!(response.status(), 201, "room creation failed");
        let body: serde_json::Value = response.json().await.unwrap();
        body["room_id"].as_str().unwrap().to_string()
    }

    /// Register a client, returning their id.
    pub async fn create_client(&self, email: &str) -> String {
        let response = self
            .client
            .post(format!("{}/clients", self.address))
            .json(&serde_json::json!({
                "first_name": "Test",
                "last_name": "Guest",
                "email": email,
                "phone": "00000000",
                "id_document": "CNI-TEST"
            }))
            .send()
            .await
            .expect("Failed to create client");
        assert_eq!(response.status(), 201, "client creation failed");
        let body: serde_json::Value = response.json().await.unwrap();
        body["client_id"].as_str().unwrap().to_string()
    }
}
