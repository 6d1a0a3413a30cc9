//! `/users` endpoints

use healthstride_shared::{DashboardSummary, EntityId, UserProfile};

use super::HealthApi;
use crate::error::GatewayResult;
use crate::gateway::ApiRequest;
use crate::notify::NotifyPolicy;

pub struct UsersApi<'a> {
    api: &'a HealthApi,
}

impl<'a> UsersApi<'a> {
    pub(crate) fn new(api: &'a HealthApi) -> Self {
        Self { api }
    }

    /// GET /users
    pub async fn list(&self) -> GatewayResult<Vec<UserProfile>> {
        let users = self
            .api
            .fetch(ApiRequest::get("/users"), NotifyPolicy::Notify)
            .await?;
        Ok(users.unwrap_or_default())
    }

    /// GET /users/{id}
    pub async fn get(&self, id: EntityId) -> GatewayResult<UserProfile> {
        self.api
            .fetch_required(ApiRequest::get(format!("/users/{id}")), NotifyPolicy::Notify)
            .await
    }

    /// POST /users; `None` when the backend acknowledged without a body
    pub async fn create(&self, user: &UserProfile) -> GatewayResult<Option<UserProfile>> {
        let request = self
            .api
            .prepare(ApiRequest::post("/users").json(user), NotifyPolicy::Notify)?;
        self.api.mutate(request, "User created successfully!").await
    }

    /// PUT /users/{id}
    pub async fn update(&self, id: EntityId, user: &UserProfile) -> GatewayResult<Option<UserProfile>> {
        let request = self.api.prepare(
            ApiRequest::put(format!("/users/{id}")).json(user),
            NotifyPolicy::Notify,
        )?;
        self.api.mutate(request, "User updated successfully!").await
    }

    /// DELETE /users/{id}
    pub async fn delete(&self, id: EntityId) -> GatewayResult<()> {
        self.api
            .mutate::<serde_json::Value>(
                ApiRequest::delete(format!("/users/{id}")),
                "User deleted successfully!",
            )
            .await?;
        Ok(())
    }

    /// GET /users/{id}/bmr (silent)
    pub async fn bmr(&self, id: EntityId) -> GatewayResult<f64> {
        let bmr = self
            .api
            .fetch(ApiRequest::get(format!("/users/{id}/bmr")), NotifyPolicy::Silent)
            .await?;
        Ok(bmr.unwrap_or_default())
    }

    /// GET /users/{id}/tdee (silent)
    pub async fn tdee(&self, id: EntityId) -> GatewayResult<f64> {
        let tdee = self
            .api
            .fetch(ApiRequest::get(format!("/users/{id}/tdee")), NotifyPolicy::Silent)
            .await?;
        Ok(tdee.unwrap_or_default())
    }

    /// GET /users/{id}/dashboard/summary (silent)
    pub async fn dashboard_summary(&self, id: EntityId) -> GatewayResult<DashboardSummary> {
        let summary = self
            .api
            .fetch(
                ApiRequest::get(format!("/users/{id}/dashboard/summary")),
                NotifyPolicy::Silent,
            )
            .await?;
        Ok(summary.unwrap_or_default())
    }
}
