//! Terminal rendering of the view models
//!
//! Missing numbers render as `0`. Calories, BMR and TDEE have no decimals,
//! BMI, water and sleep one, distance two on the dashboard and one in the
//! weekly statistics.

use std::fmt::Write;

use healthstride_shared::{Activity, DailyMetrics, EntityId, UnitSystem, UserProfile};

use crate::views::{DashboardView, ProfileView, StatisticsView};

/// `value` with `decimals` places, `0` when missing
pub fn fixed(value: Option<f64>, decimals: usize) -> String {
    format!("{:.*}", decimals, value.unwrap_or_default())
}

/// Whole number with `,` thousands separators
pub fn grouped(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn steps(value: Option<u32>) -> String {
    grouped(value.map(u64::from).unwrap_or_default())
}

pub fn calories(value: Option<f64>) -> String {
    fixed(value, 0)
}

pub fn render_dashboard(view: &DashboardView) -> String {
    let mut out = String::new();
    let today = view.today.as_ref();

    let _ = writeln!(out, "Dashboard");
    let _ = writeln!(out, "  Steps today:      {}", steps(today.and_then(|m| m.steps)));
    let _ = writeln!(out, "  Calories burned:  {}", calories(today.and_then(|m| m.calories_burned)));
    let _ = writeln!(
        out,
        "  Active minutes:   {}",
        today.and_then(|m| m.active_minutes).unwrap_or_default()
    );
    let _ = writeln!(out, "  Net calories:     {}", calories(today.and_then(|m| m.net_calories)));

    let _ = writeln!(out);
    match today {
        Some(metrics) => {
            let _ = writeln!(out, "Today's health");
            let _ = writeln!(out, "  Distance:         {} km", fixed(metrics.distance_km, 2));
            let _ = writeln!(out, "  Water intake:     {} L", fixed(metrics.water_intake_liters, 1));
            let _ = writeln!(out, "  Sleep:            {} h", fixed(metrics.sleep_hours, 1));
            let _ = writeln!(out, "  Heart rate:       {} bpm", metrics.heart_rate_avg.unwrap_or_default());
            let _ = writeln!(out, "  BMR:              {} kcal", calories(Some(view.summary.bmr)));
            let _ = writeln!(out, "  TDEE:             {} kcal", calories(Some(view.summary.tdee)));
        }
        None => {
            let _ = writeln!(out, "No metrics logged today");
        }
    }

    let _ = writeln!(out);
    if view.recent_activities.is_empty() {
        let _ = writeln!(out, "No activities logged yet");
    } else {
        let _ = writeln!(out, "Recent activities");
        for activity in &view.recent_activities {
            let _ = writeln!(out, "  {}", activity_line(activity));
        }
    }
    out
}

pub fn render_profile(view: &ProfileView, units: UnitSystem) -> String {
    let user = &view.user;
    let mut out = String::new();

    let _ = writeln!(out, "{} <{}>", user.name, user.email);
    let _ = writeln!(out, "  Age:              {} years", view.age);
    let _ = writeln!(out, "  Date of birth:    {}", user.date_of_birth.format("%b %-d, %Y"));
    let _ = writeln!(out, "  Gender:           {}", user.gender);
    let (height, weight) = match units {
        UnitSystem::Metric => (
            format!("{} ({})", units.format_height(user.height_cm), view.height),
            format!("{} ({:.1} lb)", units.format_weight(user.weight_kg), view.weight_lb),
        ),
        UnitSystem::Imperial => (
            format!("{} ({} cm)", view.height, user.height_cm),
            format!("{:.1} lb ({} kg)", view.weight_lb, user.weight_kg),
        ),
    };
    let _ = writeln!(out, "  Height:           {}", height);
    let _ = writeln!(out, "  Weight:           {}", weight);
    if let Some(level) = user.activity_level {
        let _ = writeln!(out, "  Activity level:   {}", level.description());
    }
    let _ = writeln!(out, "  BMI:              {:.1} ({})", view.bmi.value, view.bmi.category.label());
    let _ = writeln!(out, "  BMR:              {} kcal/day", calories(Some(view.bmr)));
    let _ = writeln!(out, "  TDEE:             {} kcal/day", calories(Some(view.tdee)));
    out
}

pub fn render_statistics(view: &StatisticsView) -> String {
    let weekly = &view.weekly;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Week of {} - {}",
        weekly.start_date.format("%b %-d"),
        weekly.end_date.format("%b %-d, %Y")
    );
    let _ = writeln!(
        out,
        "  Total steps:      {} (avg {:.0}/day)",
        grouped(weekly.total_steps),
        weekly.average_steps_per_day
    );
    let _ = writeln!(out, "  Calories burned:  {}", calories(Some(weekly.total_calories_burned)));
    let _ = writeln!(
        out,
        "  Active minutes:   {} (avg {:.0}/day)",
        weekly.total_active_minutes, weekly.average_active_minutes_per_day
    );
    let _ = writeln!(out, "  Distance:         {} km", fixed(Some(weekly.total_distance_km), 1));
    let _ = writeln!(out, "  Consumed:         {} kcal", calories(Some(weekly.total_calories_consumed)));
    let _ = writeln!(out, "  Net:              {} kcal", calories(Some(weekly.net_calories)));

    if !view.days.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "  {:<8}{:>10}{:>10}{:>10}{:>8}", "Day", "Steps", "In", "Out", "Active");
        for day in &view.days {
            let _ = writeln!(
                out,
                "  {:<8}{:>10}{:>10.0}{:>10.0}{:>8}",
                day.date.format("%b %-d").to_string(),
                grouped(u64::from(day.steps)),
                day.calories_consumed,
                day.calories_burned,
                day.active_minutes
            );
        }
    }
    out
}

pub fn render_metrics(metrics: &DailyMetrics) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Metrics for {}", metrics.date);
    let _ = writeln!(out, "  Steps:            {}", steps(metrics.steps));
    let _ = writeln!(out, "  Calories in:      {}", calories(metrics.calories_consumed));
    let _ = writeln!(out, "  Calories out:     {}", calories(metrics.calories_burned));
    let _ = writeln!(out, "  Net calories:     {}", calories(Some(metrics.effective_net_calories())));
    let _ = writeln!(out, "  Distance:         {} km", fixed(metrics.distance_km, 2));
    let _ = writeln!(out, "  Active minutes:   {}", metrics.active_minutes.unwrap_or_default());
    let _ = writeln!(out, "  Water intake:     {} L", fixed(metrics.water_intake_liters, 1));
    let _ = writeln!(out, "  Sleep:            {} h", fixed(metrics.sleep_hours, 1));
    let _ = writeln!(out, "  Avg heart rate:   {} bpm", metrics.heart_rate_avg.unwrap_or_default());
    out
}

pub fn render_users(users: &[UserProfile], current: Option<EntityId>) -> String {
    if users.is_empty() {
        return "No profiles yet. Create one with `healthstride users create`\n".to_string();
    }
    let mut out = String::new();
    for user in users {
        let marker = if user.id.is_some() && user.id == current { "*" } else { " " };
        let _ = writeln!(
            out,
            "{} {:>4}  {:<24} {}",
            marker,
            user.id.map(|id| id.to_string()).unwrap_or_default(),
            user.name,
            user.email
        );
    }
    out
}

pub fn render_activities(activities: &[Activity]) -> String {
    if activities.is_empty() {
        return "No activities logged yet\n".to_string();
    }
    let mut out = String::new();
    for activity in activities {
        let _ = writeln!(
            out,
            "{:>4}  {}",
            activity.id.map(|id| id.to_string()).unwrap_or_default(),
            activity_line(activity)
        );
    }
    out
}

fn activity_line(activity: &Activity) -> String {
    let mut line = format!(
        "{}  {}  {:.0} min  {} kcal",
        activity.start_time.format("%b %-d, %-I:%M %p"),
        activity.activity_type,
        activity.effective_duration_minutes(),
        calories(activity.calories_burned)
    );
    if let Some(distance) = activity.distance_km {
        let _ = write!(line, "  {:.2} km", distance);
    }
    line
}
