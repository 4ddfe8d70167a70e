//! Terminal showcase of stateful UI patterns: image load lifecycle, tab
//! selection, a refreshable dashboard and exactly-once confirmations.

pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod infrastructure;
pub mod logging;
pub mod modules;
pub mod ui;
