/// Failures raised while advancing a simulated store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimError {
    #[error("update rule failed: {0}")]
    UpdateFailed(String),

    #[error("update rule panicked: {0}")]
    UpdatePanicked(String),
}

impl SimError {
    /// Convenience constructor for update rules that reject a state.
    pub fn update(reason: impl Into<String>) -> Self {
        Self::UpdateFailed(reason.into())
    }
}
