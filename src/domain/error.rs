//! Error taxonomy shared by the state models

use thiserror::Error;

/// An image resource could not be loaded. Recovered locally by rendering the
/// fallback placeholder; never propagated past the owning screen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct ResourceLoadFailure {
    pub reason: String,
}

impl ResourceLoadFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Misuse of a section/tab selection API
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("unknown section `{0}`")]
    InvalidSelection(String),
}

/// The dashboard data source failed to produce a batch
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("fetch failed: {0}")]
    Failed(String),

    /// The source could not be reached at all (worker gone, channel closed)
    #[error("data source unavailable")]
    Unavailable,
}
