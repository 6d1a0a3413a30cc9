//! `/users/{id}/dashboard` endpoints

use chrono::NaiveDate;
use healthstride_shared::{EntityId, WeeklyStats, WeeklyStatsQuery};

use super::HealthApi;
use crate::error::GatewayResult;
use crate::gateway::ApiRequest;
use crate::notify::NotifyPolicy;

pub struct DashboardApi<'a> {
    api: &'a HealthApi,
}

impl<'a> DashboardApi<'a> {
    pub(crate) fn new(api: &'a HealthApi) -> Self {
        Self { api }
    }

    /// GET /users/{id}/dashboard/weekly[?weekStartDate=] (silent)
    ///
    /// Without a start date the backend picks the current week.
    pub async fn weekly(
        &self,
        user_id: EntityId,
        week_start_date: Option<NaiveDate>,
    ) -> GatewayResult<WeeklyStats> {
        let request = self.api.prepare(
            ApiRequest::get(format!("/users/{user_id}/dashboard/weekly"))
                .query(&WeeklyStatsQuery { week_start_date }),
            NotifyPolicy::Silent,
        )?;
        self.api.fetch_required(request, NotifyPolicy::Silent).await
    }
}
