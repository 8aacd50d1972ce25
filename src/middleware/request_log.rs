use axum::{extract::Request, middleware::Next, response::Response};
use tracing::info;

/// Logs every inbound request before it reaches a handler
pub async fn request_log_middleware(request: Request, next: Next) -> Response {
    info!("Request received : {} {}", request.method(), request.uri().path());
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use axum::{body::Body, http, middleware::from_fn, routing::get, Router};
    use tower::ServiceExt;
    use tracing_subscriber::fmt::MakeWriter;

    use super::*;

    /// In-memory log sink shared with the subscriber
    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl CapturedLog {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLog {
        type Writer = CapturedLog;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[tokio::test]
    async fn logs_method_and_path_of_each_request() {
        let log = CapturedLog::default();
        let subscriber = tracing_subscriber::fmt().with_writer(log.clone()).with_ansi(false).finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let router = Router::new()
            .route("/users", get(|| async { "[]" }))
            .route("/users/:id", axum::routing::delete(|| async { http::StatusCode::BAD_REQUEST }))
            .layer(from_fn(request_log_middleware));

        for (method, uri) in [("GET", "/users?keywords=x"), ("DELETE", "/users/2221")] {
            let request = http::Request::builder().method(method).uri(uri).body(Body::empty()).unwrap();
            router.clone().oneshot(request).await.unwrap();
        }

        let output = log.contents();
        assert!(output.contains("Request received : GET /users"), "log was: {}", output);
        assert!(output.contains("Request received : DELETE /users/2221"), "log was: {}", output);
        assert_eq!(output.matches("Request received :").count(), 2);
    }
}
