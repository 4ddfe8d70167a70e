//! UI Modules
//!
//! Each screen implements the Module trait and handles its own key input,
//! `:` commands and rendering.
//!
//! Modules:
//! - fundamentals: component tour with Basics / Input / Lists / Advanced sections
//! - gallery: image cards with load, error and reload states
//! - dashboard: refreshable overview cards and the sign-out entry point
//! - signout: sign-out confirmation presets

pub mod dashboard;
pub mod fundamentals;
pub mod gallery;
pub mod signout;

pub use dashboard::DashboardScreen;
pub use fundamentals::Fundamentals;
pub use gallery::{Gallery, ImageRequest};
