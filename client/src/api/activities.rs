//! `/users/{id}/activities` endpoints

use healthstride_shared::{Activity, DateRange, EntityId};

use super::HealthApi;
use crate::error::GatewayResult;
use crate::gateway::ApiRequest;
use crate::notify::NotifyPolicy;

pub struct ActivitiesApi<'a> {
    api: &'a HealthApi,
}

impl<'a> ActivitiesApi<'a> {
    pub(crate) fn new(api: &'a HealthApi) -> Self {
        Self { api }
    }

    /// GET /users/{id}/activities (silent)
    pub async fn list(&self, user_id: EntityId) -> GatewayResult<Vec<Activity>> {
        let activities = self
            .api
            .fetch(
                ApiRequest::get(format!("/users/{user_id}/activities")),
                NotifyPolicy::Silent,
            )
            .await?;
        Ok(activities.unwrap_or_default())
    }

    /// GET /users/{id}/activities/range?startDate=&endDate= (silent)
    pub async fn range(&self, user_id: EntityId, range: DateRange) -> GatewayResult<Vec<Activity>> {
        let request = self.api.prepare(
            ApiRequest::get(format!("/users/{user_id}/activities/range")).query(&range),
            NotifyPolicy::Silent,
        )?;
        let activities = self.api.fetch(request, NotifyPolicy::Silent).await?;
        Ok(activities.unwrap_or_default())
    }

    /// POST /users/{id}/activities
    pub async fn create(&self, user_id: EntityId, activity: &Activity) -> GatewayResult<Option<Activity>> {
        let request = self.api.prepare(
            ApiRequest::post(format!("/users/{user_id}/activities")).json(activity),
            NotifyPolicy::Notify,
        )?;
        self.api.mutate(request, "Activity logged successfully!").await
    }

    /// PUT /users/{id}/activities/{activityId}
    pub async fn update(
        &self,
        user_id: EntityId,
        activity_id: EntityId,
        activity: &Activity,
    ) -> GatewayResult<Option<Activity>> {
        let request = self.api.prepare(
            ApiRequest::put(format!("/users/{user_id}/activities/{activity_id}")).json(activity),
            NotifyPolicy::Notify,
        )?;
        self.api.mutate(request, "Activity updated successfully!").await
    }

    /// DELETE /users/{id}/activities/{activityId}
    pub async fn delete(&self, user_id: EntityId, activity_id: EntityId) -> GatewayResult<()> {
        self.api
            .mutate::<serde_json::Value>(
                ApiRequest::delete(format!("/users/{user_id}/activities/{activity_id}")),
                "Activity deleted successfully!",
            )
            .await?;
        Ok(())
    }
}
