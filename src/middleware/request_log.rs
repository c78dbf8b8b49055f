use std::time::Instant;

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use tracing::{debug, error};

pub async fn log_requests(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(req).await;
    let elapsed = started.elapsed();

    if response.status().is_server_error() {
        error!(
            "Server error occurred - {} {} -> {} ({:?})",
            method,
            path,
            response.status(),
            elapsed
        );
    } else {
        debug!("{} {} -> {} ({:?})", method, path, response.status(), elapsed);
    }

    response
}
