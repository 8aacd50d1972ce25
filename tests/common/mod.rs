#![allow(dead_code)]

use std::sync::{Arc, Once};

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use school_api::config::AppConfig;
use school_api::database::{DatabaseError, InMemoryStudentRepository, NewStudent, Student, StudentRepository};
use school_api::search::StudentSearch;
use school_api::{app, AppState};

static TRACING: Once = Once::new();

/// A server on an ephemeral port, stopped when dropped
pub struct TestServer {
    pub base_url: String,
    handle: JoinHandle<()>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn init_tracing() {
    TRACING.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt().with_env_filter(filter).with_test_writer().try_init();
    });
}

/// Serves the full router over `repository` inside the calling test's runtime
pub async fn spawn_server_with(repository: Arc<dyn StudentRepository>) -> Result<TestServer> {
    init_tracing();

    let listener = TcpListener::bind("127.0.0.1:0").await.context("failed to bind test listener")?;
    let base_url = format!("http://{}", listener.local_addr()?);

    let router = app(AppState::new(repository), &AppConfig::development());
    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            eprintln!("test server stopped: {}", e);
        }
    });

    Ok(TestServer { base_url, handle })
}

/// Server over a fresh, empty in-memory store
pub async fn spawn_server() -> Result<(TestServer, Arc<InMemoryStudentRepository>)> {
    let repository = Arc::new(InMemoryStudentRepository::new());
    let server = spawn_server_with(repository.clone()).await?;
    Ok((server, repository))
}

pub fn student(first_name: &str, last_name: &str, date_of_birth: &str, address: &str) -> Value {
    json!({
        "firstName": first_name,
        "lastName": last_name,
        "dateOfBirth": date_of_birth,
        "address": address
    })
}

/// POSTs a student that is expected to be accepted, returning its id
pub async fn create_student(client: &reqwest::Client, server: &TestServer, body: &Value) -> Result<i64> {
    let res = client
        .post(format!("{}/users", server.base_url))
        .json(body)
        .send()
        .await?;
    let status = res.status();
    let text = res.text().await?;
    anyhow::ensure!(status == reqwest::StatusCode::OK, "create failed with {}: {}", status, text);
    serde_json::from_str(&text).with_context(|| format!("id is not a number: {}", text))
}

/// Store whose every call fails, standing in for an unreachable database
pub struct FailingRepository;

fn unavailable() -> DatabaseError {
    DatabaseError::QueryError("connection refused (127.0.0.1:5432)".to_string())
}

#[async_trait]
impl StudentRepository for FailingRepository {
    async fn find_by_id(&self, _id: i64) -> Result<Option<Student>, DatabaseError> {
        Err(unavailable())
    }

    async fn find_all(&self) -> Result<Vec<Student>, DatabaseError> {
        Err(unavailable())
    }

    async fn find_by_name_pair(&self, _first_name: &str, _last_name: &str) -> Result<Vec<Student>, DatabaseError> {
        Err(unavailable())
    }

    async fn find_matching(&self, _search: &StudentSearch) -> Result<Vec<Student>, DatabaseError> {
        Err(unavailable())
    }

    async fn save(&self, _id: Option<i64>, _fields: NewStudent) -> Result<Student, DatabaseError> {
        Err(unavailable())
    }

    async fn delete_by_id(&self, _id: i64) -> Result<bool, DatabaseError> {
        Err(unavailable())
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Err(unavailable())
    }
}
