//! Deadlines for repository calls.

use std::future::Future;
use std::time::Duration;

use projects_types::RepoError;

/// Deadline applied to every repository call unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Runs `op`, failing with `RepoError::Timeout` once `limit` elapses.
///
/// The future is dropped on expiry, so the caller gets control back
/// immediately instead of waiting on a stuck store.
pub async fn within<T, F>(limit: Duration, operation: &'static str, op: F) -> Result<T, RepoError>
where
    F: Future<Output = Result<T, RepoError>>,
{
    match tokio::time::timeout(limit, op).await {
        Ok(result) => result,
        Err(_) => {
            tracing::error!(operation, ?limit, "repository call timed out");
            Err(RepoError::Timeout { operation, limit })
        }
    }
}
