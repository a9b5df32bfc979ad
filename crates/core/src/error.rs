/// Input rejected by a domain rule outside the lifecycle.
///
/// Lifecycle failures have their own taxonomy in
/// [`LifecycleError`](crate::lifecycle::LifecycleError).
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),
}
