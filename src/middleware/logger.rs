use axum::{http::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{Instrument, error, info, info_span, warn};
use uuid::Uuid;

/// Per-request trace id, available to handlers as an extension.
#[derive(Clone, Copy, Debug)]
pub struct TraceId(pub Uuid);

pub async fn logger<B>(mut req: Request<B>, next: Next<B>) -> Response {
    let trace_id = Uuid::new_v4();
    req.extensions_mut().insert(TraceId(trace_id));
    let method = req.method().clone();
    let uri = req.uri().clone();
    let start = Instant::now();

    let span = info_span!("request", trace_id = %trace_id, method = %method, uri = %uri);
    let response = next.run(req).instrument(span).await;
    let status = response.status().as_u16();
    let elapsed = start.elapsed().as_millis();

    match status {
        500..=599 => {
            error!(trace_id = %trace_id, method = %method, uri = %uri, status = status, elapsed_ms = elapsed, "Request failed")
        }
        400..=499 => {
            warn!(trace_id = %trace_id, method = %method, uri = %uri, status = status, elapsed_ms = elapsed, "Request rejected")
        }
        _ => {
            info!(trace_id = %trace_id, method = %method, uri = %uri, status = status, elapsed_ms = elapsed, "Request log")
        }
    }
    response
}
