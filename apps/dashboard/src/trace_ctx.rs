//! Task-local trace id for the request being served.
//!
//! The request middleware opens the scope; error responses and db error
//! logging read it. Outside a request the id is `"unknown"`.

use tokio::task_local;

task_local! {
    static TRACE_ID: String;
}

pub fn trace_id() -> String {
    TRACE_ID
        .try_with(Clone::clone)
        .unwrap_or_else(|_| "unknown".to_string())
}

/// Run `future` with `trace_id` visible through [`trace_id`].
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    TRACE_ID.scope(trace_id, future).await
}
