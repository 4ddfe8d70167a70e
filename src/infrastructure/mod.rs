//! Infrastructure layer - External collaborators
//!
//! This layer contains:
//! - the mock dashboard data source
//! - the image loader (HTTP + bundled assets)
//! - Tokio runtime bridge for async operations

pub mod images;
pub mod runtime;
pub mod source;

pub use images::{ImageFetcher, ImageLoader};
pub use runtime::{RuntimeBridge, RuntimeCommand, RuntimeEvent, TimerToken};
pub use source::MockDashboardSource;
