//! HealthStride Client Library
//!
//! API access layer for the HealthStride backend: configuration, the request
//! gateway, notifications, typed endpoint groups, the selected-user session
//! and the view loaders used by the `healthstride` binary.

pub mod api;
pub mod config;
pub mod display;
pub mod error;
pub mod gateway;
pub mod notify;
pub mod session;
pub mod views;

pub use api::HealthApi;
pub use error::{ErrorKind, GatewayError, GatewayResult};
pub use gateway::{ApiRequest, Gateway, Payload};
pub use notify::{MemoryNotifier, Notification, Notifier, NotifyPolicy, TracingNotifier};
pub use session::{Session, SessionError};
