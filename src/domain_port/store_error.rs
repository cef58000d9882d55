#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// The connection to the backing store is down at call time.
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("store error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}
