use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{AppConfig, SecurityConfig};
use crate::database::StudentRepository;
use crate::handlers::{self, students};
use crate::middleware::request_log_middleware;
use crate::services::StudentService;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub students: Arc<StudentService>,
}

impl AppState {
    pub fn new(repository: Arc<dyn StudentRepository>) -> Self {
        Self {
            students: Arc::new(StudentService::new(repository)),
        }
    }
}

pub fn app(state: AppState, config: &AppConfig) -> Router {
    let mut router = Router::new()
        .route("/health", get(handlers::health))
        .merge(student_routes())
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes));

    if config.api.enable_request_logging {
        router = router.layer(middleware::from_fn(request_log_middleware));
    }
    if config.security.enable_cors {
        router = router.layer(cors_layer(&config.security));
    }

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

fn student_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(students::student_list).post(students::student_create))
        // Static segment; takes precedence over /users/:id
        .route("/users/search", get(students::student_search))
        .route(
            "/users/:id",
            get(students::student_show)
                .put(students::student_update)
                .delete(students::student_delete),
        )
}

/// Permissive when no origins are configured, otherwise limited to the list
fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if security.cors_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}
