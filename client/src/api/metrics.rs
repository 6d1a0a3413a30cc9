//! `/users/{id}/metrics` endpoints

use chrono::NaiveDate;
use healthstride_shared::{AddStepsQuery, DailyMetrics, DateRange, EntityId};
use tracing::debug;

use super::HealthApi;
use crate::error::GatewayResult;
use crate::gateway::ApiRequest;
use crate::notify::NotifyPolicy;

pub struct MetricsApi<'a> {
    api: &'a HealthApi,
}

impl<'a> MetricsApi<'a> {
    pub(crate) fn new(api: &'a HealthApi) -> Self {
        Self { api }
    }

    /// Today's metrics, or `None` when nothing is logged yet or the read fails
    pub async fn today(&self, user_id: EntityId) -> Option<DailyMetrics> {
        self.best_effort(format!("/users/{user_id}/metrics/today")).await
    }

    /// Metrics for `date`, or `None` when nothing is logged or the read fails
    pub async fn by_date(&self, user_id: EntityId, date: NaiveDate) -> Option<DailyMetrics> {
        self.best_effort(format!("/users/{user_id}/metrics/date/{date}")).await
    }

    async fn best_effort(&self, path: String) -> Option<DailyMetrics> {
        match self
            .api
            .fetch::<DailyMetrics>(ApiRequest::get(path.as_str()), NotifyPolicy::Silent)
            .await
        {
            Ok(metrics) => metrics,
            Err(err) => {
                debug!(path = %path, error = %err, "No metrics available");
                None
            }
        }
    }

    /// GET /users/{id}/metrics (silent)
    pub async fn list(&self, user_id: EntityId) -> GatewayResult<Vec<DailyMetrics>> {
        let metrics = self
            .api
            .fetch(
                ApiRequest::get(format!("/users/{user_id}/metrics")),
                NotifyPolicy::Silent,
            )
            .await?;
        Ok(metrics.unwrap_or_default())
    }

    /// GET /users/{id}/metrics/range?startDate=&endDate= (silent)
    pub async fn range(&self, user_id: EntityId, range: DateRange) -> GatewayResult<Vec<DailyMetrics>> {
        let request = self.api.prepare(
            ApiRequest::get(format!("/users/{user_id}/metrics/range")).query(&range),
            NotifyPolicy::Silent,
        )?;
        let metrics = self.api.fetch(request, NotifyPolicy::Silent).await?;
        Ok(metrics.unwrap_or_default())
    }

    /// POST /users/{id}/metrics
    pub async fn save(&self, user_id: EntityId, metrics: &DailyMetrics) -> GatewayResult<Option<DailyMetrics>> {
        let request = self.api.prepare(
            ApiRequest::post(format!("/users/{user_id}/metrics")).json(metrics),
            NotifyPolicy::Notify,
        )?;
        self.api
            .mutate(request, "Health metrics saved successfully!")
            .await
    }

    /// POST /users/{id}/metrics/steps?steps=&date=
    pub async fn add_steps(
        &self,
        user_id: EntityId,
        steps: u32,
        date: Option<NaiveDate>,
    ) -> GatewayResult<Option<DailyMetrics>> {
        let request = self.api.prepare(
            ApiRequest::post(format!("/users/{user_id}/metrics/steps"))
                .query(&AddStepsQuery { steps, date }),
            NotifyPolicy::Notify,
        )?;
        self.api
            .mutate(request, format!("Added {steps} steps!"))
            .await
    }
}
