//! View-model loaders
//!
//! Each loader gathers what one screen shows, issuing its independent calls
//! concurrently. Loaders need a selected user; without one they fail with
//! [`SessionError::NoUserSelected`] so the caller can send the user to
//! profile selection. Error notifications have already been raised by the
//! time an error reaches the caller.

use chrono::{Days, NaiveDate};
use healthstride_shared::{
    kg_to_lb, Activity, BmiResult, DailyMetrics, DashboardSummary, DateRange, EntityId,
    FeetInches, UserProfile, WeeklyStats,
};
use thiserror::Error;

use crate::api::HealthApi;
use crate::error::GatewayError;
use crate::session::{Session, SessionError};

/// How many activities the dashboard lists
pub const RECENT_ACTIVITY_LIMIT: usize = 5;

/// Length of the statistics window, today included
pub const STATISTICS_WINDOW_DAYS: u64 = 7;

#[derive(Error, Debug)]
pub enum ViewError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

pub type ViewResult<T> = Result<T, ViewError>;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub user_id: EntityId,
    /// `None` until something is logged today
    pub today: Option<DailyMetrics>,
    pub summary: DashboardSummary,
    pub recent_activities: Vec<Activity>,
}

/// Today's metrics, server-side summary and the first few activities
pub async fn load_dashboard(api: &HealthApi, session: &Session) -> ViewResult<DashboardView> {
    let user_id = session.require_user()?;

    let metrics = api.metrics();
    let users = api.users();
    let activities = api.activities();
    let (today, summary, mut recent_activities) = tokio::try_join!(
        async { Ok::<_, GatewayError>(metrics.today(user_id).await) },
        users.dashboard_summary(user_id),
        activities.list(user_id),
    )?;
    recent_activities.truncate(RECENT_ACTIVITY_LIMIT);

    Ok(DashboardView {
        user_id,
        today,
        summary,
        recent_activities,
    })
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileView {
    pub user: UserProfile,
    pub bmr: f64,
    pub tdee: f64,
    pub age: u32,
    pub bmi: BmiResult,
    pub height: FeetInches,
    pub weight_lb: f64,
}

/// The selected profile with server BMR/TDEE and locally derived figures
pub async fn load_profile(api: &HealthApi, session: &Session, today: NaiveDate) -> ViewResult<ProfileView> {
    let user_id = session.require_user()?;

    let users = api.users();
    let (user, bmr, tdee) = tokio::try_join!(users.get(user_id), users.bmr(user_id), users.tdee(user_id))?;

    Ok(ProfileView {
        age: user.age_on(today),
        bmi: user.bmi(),
        height: FeetInches::from_cm(user.height_cm),
        weight_lb: kg_to_lb(user.weight_kg),
        user,
        bmr,
        tdee,
    })
}

/// One chart point; missing values are zero
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayPoint {
    pub date: NaiveDate,
    pub steps: u32,
    pub calories_consumed: f64,
    pub calories_burned: f64,
    pub active_minutes: u32,
}

impl From<&DailyMetrics> for DayPoint {
    fn from(metrics: &DailyMetrics) -> Self {
        Self {
            date: metrics.date,
            steps: metrics.steps.unwrap_or_default(),
            calories_consumed: metrics.calories_consumed.unwrap_or_default(),
            calories_burned: metrics.calories_burned.unwrap_or_default(),
            active_minutes: metrics.active_minutes.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsView {
    pub weekly: WeeklyStats,
    pub days: Vec<DayPoint>,
}

/// Weekly totals for the last seven days plus the per-day series
///
/// `week_start` overrides the start of the window; the default is six days
/// before `today`.
pub async fn load_statistics(
    api: &HealthApi,
    session: &Session,
    today: NaiveDate,
    week_start: Option<NaiveDate>,
) -> ViewResult<StatisticsView> {
    let user_id = session.require_user()?;

    let range = match week_start {
        Some(start) => DateRange::new(
            start,
            start
                .checked_add_days(Days::new(STATISTICS_WINDOW_DAYS - 1))
                .unwrap_or(start),
        ),
        None => DateRange::ending_on(today, STATISTICS_WINDOW_DAYS),
    };

    let dashboard = api.dashboard();
    let metrics = api.metrics();
    let (weekly, series) = tokio::try_join!(
        dashboard.weekly(user_id, Some(range.start_date)),
        metrics.range(user_id, range),
    )?;

    Ok(StatisticsView {
        weekly,
        days: series.iter().map(DayPoint::from).collect(),
    })
}

/// Existing metrics for `date` to edit, or a zeroed form
pub async fn load_metrics_form(api: &HealthApi, session: &Session, date: NaiveDate) -> ViewResult<DailyMetrics> {
    let user_id = session.require_user()?;
    Ok(api
        .metrics()
        .by_date(user_id, date)
        .await
        .unwrap_or_else(|| DailyMetrics::zeroed(date)))
}
