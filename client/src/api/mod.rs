//! Typed endpoint groups over the gateway
//!
//! [`HealthApi`] is the adapter between the pure gateway and the user:
//! failed calls raise an error notification (unless the call is silent),
//! and mutating calls raise a fixed success notification once they resolve.
//! Callers propagate errors without notifying again.

pub mod activities;
pub mod dashboard;
pub mod metrics;
pub mod users;

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::error::{GatewayError, GatewayResult};
use crate::gateway::{ApiRequest, Gateway, Payload};
use crate::notify::{Notification, Notifier, NotifyPolicy};

pub use activities::ActivitiesApi;
pub use dashboard::DashboardApi;
pub use metrics::MetricsApi;
pub use users::UsersApi;

/// Backend API with notifications attached
#[derive(Clone)]
pub struct HealthApi {
    gateway: Gateway,
    notifier: Arc<dyn Notifier>,
}

impl HealthApi {
    pub fn new(gateway: Gateway, notifier: Arc<dyn Notifier>) -> Self {
        Self { gateway, notifier }
    }

    #[inline]
    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    pub fn users(&self) -> UsersApi<'_> {
        UsersApi::new(self)
    }

    pub fn metrics(&self) -> MetricsApi<'_> {
        MetricsApi::new(self)
    }

    pub fn activities(&self) -> ActivitiesApi<'_> {
        ActivitiesApi::new(self)
    }

    pub fn dashboard(&self) -> DashboardApi<'_> {
        DashboardApi::new(self)
    }

    /// Call and decode; the empty result comes back as `None`
    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
        policy: NotifyPolicy,
    ) -> GatewayResult<Option<T>> {
        let result = self.gateway.send(request).await.and_then(Payload::decode);
        self.report(result, policy)
    }

    /// Call and decode a body that must be present
    pub(crate) async fn fetch_required<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
        policy: NotifyPolicy,
    ) -> GatewayResult<T> {
        let result = self
            .gateway
            .send(request)
            .await
            .and_then(Payload::decode)
            .and_then(|body| body.ok_or_else(GatewayError::missing_body));
        self.report(result, policy)
    }

    /// Create/update/delete: always notifies, and confirms success with `success_message`
    pub(crate) async fn mutate<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
        success_message: impl Into<String>,
    ) -> GatewayResult<Option<T>> {
        let body = self.fetch(request, NotifyPolicy::Notify).await?;
        self.notifier.notify(Notification::success(success_message));
        Ok(body)
    }

    /// Build a request, notifying if its parameters cannot be encoded
    pub(crate) fn prepare(
        &self,
        request: GatewayResult<ApiRequest>,
        policy: NotifyPolicy,
    ) -> GatewayResult<ApiRequest> {
        self.report(request, policy)
    }

    fn report<T>(&self, result: GatewayResult<T>, policy: NotifyPolicy) -> GatewayResult<T> {
        if let Err(err) = &result {
            if policy == NotifyPolicy::Notify {
                self.notifier.notify(Notification::from_error(err));
            }
        }
        result
    }
}
