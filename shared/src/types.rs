//! Query parameter types for the backend endpoints

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Inclusive date range (`?startDate=&endDate=`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl DateRange {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    /// The `days` calendar days ending on `end_date`, inclusive
    pub fn ending_on(end_date: NaiveDate, days: u64) -> Self {
        let start_date = end_date
            .checked_sub_days(Days::new(days.saturating_sub(1)))
            .unwrap_or(NaiveDate::MIN);
        Self::new(start_date, end_date)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// Quick step entry (`?steps=&date=`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddStepsQuery {
    pub steps: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

/// Weekly stats window (`?weekStartDate=`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyStatsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub week_start_date: Option<NaiveDate>,
}
