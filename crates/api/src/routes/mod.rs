//! HTTP route handlers.

pub mod auth;
pub mod devices;
pub mod health;
pub mod home;
pub mod reports;
pub mod settings;

use crate::error::ApiError;

/// Runs a store-writing service call on the blocking pool.
///
/// The file store rewrites its file synchronously, so handlers that persist
/// state must not call it on an async worker thread.
pub(crate) async fn run_blocking<F, T>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal(format!("Blocking task failed: {}", e)))?
}
