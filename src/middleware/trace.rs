//! Per-request structured logging.

use std::time::Instant;

use tracing::{Instrument, info, info_span};

use crate::request::Request;
use crate::response::Response;
use crate::router::Router;

/// Routes `req` inside a `request` span and logs one event with the method,
/// path, status and latency once the response is ready.
pub async fn trace(router: &Router, req: Request) -> Response {
    let method = req.method();
    let path = req.path().to_owned();
    let span = info_span!("request", %method, %path);

    async move {
        let started = Instant::now();
        let response = router.handle(req).await;
        info!(status = response.status_code(), latency = ?started.elapsed(), "request completed");
        response
    }
    .instrument(span)
    .await
}
