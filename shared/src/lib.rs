//! HealthStride Shared Library
//!
//! This crate contains the entities exchanged with the HealthStride backend,
//! the derived-metric calculator and the unit conversions used by the client
//! and WASM modules.

pub mod errors;
pub mod health_metrics;
pub mod models;
pub mod types;
pub mod units;
pub mod validation;

// Re-export commonly used items
pub use errors::*;
pub use health_metrics::*;
pub use models::{Activity, DailyMetrics, DashboardSummary, EntityId, UserProfile, WeeklyStats};
pub use types::*;
pub use units::*;
