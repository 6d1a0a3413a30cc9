//! Command-line front end
//!
//! One subcommand per screen of the dashboard: profiles, the dashboard
//! itself, the profile card, daily metrics, activities and weekly
//! statistics. Failed calls have already been reported through the
//! [`ConsoleNotifier`] when a command returns an error.

use std::path::PathBuf;

use anyhow::{bail, Context as _, Result};
use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};
use clap::{Args, Parser, Subcommand};
use healthstride_client::api::HealthApi;
use healthstride_client::config::ClientConfig;
use healthstride_client::display;
use healthstride_client::notify::{Level, Notification, Notifier};
use healthstride_client::session::Session;
use healthstride_client::views;
use healthstride_shared::models::local_datetime;
use healthstride_shared::validation;
use healthstride_shared::{
    Activity, ActivityLevel, DateRange, EntityId, Gender, ParseError, UnitSystem, UserProfile,
};
use validator::Validate;

#[derive(Parser)]
#[command(
    name = "healthstride",
    version,
    about = "HealthStride fitness dashboard",
    long_about = "Track daily health metrics and activities against a HealthStride backend."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Backend API root, e.g. http://localhost:8080/api
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// File remembering the selected profile
    #[arg(long, global = true)]
    pub state_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Command-line flags win over files and environment
    pub fn apply_overrides(&self, config: &mut ClientConfig) {
        if let Some(base_url) = &self.base_url {
            config.api.base_url = base_url.clone();
        }
        if let Some(state_file) = &self.state_file {
            config.session.state_file = state_file.clone();
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Manage user profiles
    Users {
        #[command(subcommand)]
        action: UsersCommand,
    },

    /// Today's overview for the selected profile
    Dashboard,

    /// Profile card with BMI, BMR and TDEE
    Profile,

    /// Daily health metrics
    Metrics {
        #[command(subcommand)]
        action: MetricsCommand,
    },

    /// Logged activities
    Activities {
        #[command(subcommand)]
        action: ActivitiesCommand,
    },

    /// Weekly statistics
    Stats {
        /// First day of the week (defaults to six days ago)
        #[arg(long)]
        week_start: Option<NaiveDate>,
    },
}

#[derive(Subcommand)]
pub enum UsersCommand {
    /// List all profiles; the selected one is marked with `*`
    List,

    /// Create a profile and select it
    Create(NewUserArgs),

    /// Select the profile the other commands act on
    Select { id: EntityId },

    /// Update a profile (defaults to the selected one)
    Update {
        #[arg(long)]
        id: Option<EntityId>,

        #[command(flatten)]
        changes: UserChanges,
    },

    /// Delete a profile
    Delete { id: EntityId },

    /// Show the selected profile id
    Current,
}

#[derive(Args)]
pub struct NewUserArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    /// YYYY-MM-DD
    #[arg(long)]
    pub date_of_birth: NaiveDate,

    /// MALE, FEMALE or OTHER
    #[arg(long, value_parser = parse_gender)]
    pub gender: Gender,

    #[arg(long)]
    pub height_cm: f64,

    #[arg(long)]
    pub weight_kg: f64,

    /// SEDENTARY, LIGHTLY_ACTIVE, MODERATELY_ACTIVE, VERY_ACTIVE or EXTRA_ACTIVE
    #[arg(long, value_parser = parse_activity_level)]
    pub activity_level: Option<ActivityLevel>,
}

impl From<NewUserArgs> for UserProfile {
    fn from(args: NewUserArgs) -> Self {
        UserProfile {
            id: None,
            name: args.name,
            email: args.email,
            date_of_birth: args.date_of_birth,
            gender: args.gender,
            height_cm: args.height_cm,
            weight_kg: args.weight_kg,
            activity_level: args.activity_level,
        }
    }
}

#[derive(Args, Default)]
pub struct UserChanges {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub date_of_birth: Option<NaiveDate>,

    #[arg(long, value_parser = parse_gender)]
    pub gender: Option<Gender>,

    #[arg(long)]
    pub height_cm: Option<f64>,

    #[arg(long)]
    pub weight_kg: Option<f64>,

    #[arg(long, value_parser = parse_activity_level)]
    pub activity_level: Option<ActivityLevel>,
}

impl UserChanges {
    fn apply(self, user: &mut UserProfile) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(date_of_birth) = self.date_of_birth {
            user.date_of_birth = date_of_birth;
        }
        if let Some(gender) = self.gender {
            user.gender = gender;
        }
        if let Some(height_cm) = self.height_cm {
            user.height_cm = height_cm;
        }
        if let Some(weight_kg) = self.weight_kg {
            user.weight_kg = weight_kg;
        }
        if self.activity_level.is_some() {
            user.activity_level = self.activity_level;
        }
    }
}

#[derive(Subcommand)]
pub enum MetricsCommand {
    /// Show the metrics logged for a day
    Show {
        /// YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Log or correct a day's metrics; unset fields keep their current value
    Log(MetricsArgs),

    /// Add steps to a day's count
    AddSteps {
        #[arg(long, default_value_t = 1000)]
        steps: u32,

        /// YYYY-MM-DD (defaults to today on the server)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

#[derive(Args, Default)]
pub struct MetricsArgs {
    /// YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    #[arg(long)]
    pub steps: Option<u32>,

    #[arg(long)]
    pub calories_consumed: Option<f64>,

    #[arg(long)]
    pub calories_burned: Option<f64>,

    #[arg(long)]
    pub distance_km: Option<f64>,

    #[arg(long)]
    pub active_minutes: Option<u32>,

    #[arg(long)]
    pub water_intake_liters: Option<f64>,

    #[arg(long)]
    pub sleep_hours: Option<f64>,

    #[arg(long)]
    pub heart_rate_avg: Option<u32>,
}

#[derive(Subcommand)]
pub enum ActivitiesCommand {
    /// List activities, optionally within a date range
    List {
        #[arg(long, requires = "to")]
        from: Option<NaiveDate>,

        #[arg(long, requires = "from")]
        to: Option<NaiveDate>,
    },

    /// Log a new activity
    Log(NewActivityArgs),

    /// Change a logged activity
    Update {
        id: EntityId,

        #[command(flatten)]
        changes: ActivityChanges,
    },

    /// Delete a logged activity
    Delete { id: EntityId },
}

#[derive(Args)]
pub struct NewActivityArgs {
    /// e.g. Running, Cycling, Yoga
    #[arg(long = "type")]
    pub activity_type: String,

    /// YYYY-MM-DDTHH:MM (defaults to now)
    #[arg(long, value_parser = parse_datetime)]
    pub start: Option<NaiveDateTime>,

    /// YYYY-MM-DDTHH:MM (defaults to now)
    #[arg(long, value_parser = parse_datetime)]
    pub end: Option<NaiveDateTime>,

    #[arg(long)]
    pub distance_km: Option<f64>,

    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Args, Default)]
pub struct ActivityChanges {
    #[arg(long = "type")]
    pub activity_type: Option<String>,

    #[arg(long, value_parser = parse_datetime)]
    pub start: Option<NaiveDateTime>,

    #[arg(long, value_parser = parse_datetime)]
    pub end: Option<NaiveDateTime>,

    #[arg(long)]
    pub distance_km: Option<f64>,

    #[arg(long)]
    pub notes: Option<String>,
}

fn parse_gender(value: &str) -> Result<Gender, ParseError> {
    value.parse()
}

fn parse_activity_level(value: &str) -> Result<ActivityLevel, ParseError> {
    value.parse()
}

fn parse_datetime(value: &str) -> Result<NaiveDateTime, ParseError> {
    local_datetime::parse(value)
}

/// Prints notifications to stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        match (notification.level, notification.description) {
            (Level::Success, _) => eprintln!("✓ {}", notification.title),
            (Level::Error, Some(description)) => {
                eprintln!("✗ {}: {}", notification.title, description)
            }
            (Level::Error, None) => eprintln!("✗ {}", notification.title),
        }
    }
}

/// Everything a command needs
pub struct Context {
    pub api: HealthApi,
    pub session: Session,
    pub units: UnitSystem,
}

pub async fn run(command: Command, ctx: &mut Context) -> Result<()> {
    let today = Local::now().date_naive();

    match command {
        Command::Users { action } => run_users(action, ctx).await,
        Command::Dashboard => {
            let view = views::load_dashboard(&ctx.api, &ctx.session).await?;
            print!("{}", display::render_dashboard(&view));
            Ok(())
        }
        Command::Profile => {
            let view = views::load_profile(&ctx.api, &ctx.session, today).await?;
            print!("{}", display::render_profile(&view, ctx.units));
            Ok(())
        }
        Command::Metrics { action } => run_metrics(action, ctx, today).await,
        Command::Activities { action } => run_activities(action, ctx).await,
        Command::Stats { week_start } => {
            let view = views::load_statistics(&ctx.api, &ctx.session, today, week_start).await?;
            print!("{}", display::render_statistics(&view));
            Ok(())
        }
    }
}

async fn run_users(action: UsersCommand, ctx: &mut Context) -> Result<()> {
    let users = ctx.api.users();

    match action {
        UsersCommand::List => {
            let profiles = users.list().await?;
            print!("{}", display::render_users(&profiles, ctx.session.current_user_id()));
        }
        UsersCommand::Create(args) => {
            let profile = UserProfile::from(args);
            ensure_valid(&profile)?;
            match users.create(&profile).await?.and_then(|created| created.id) {
                Some(id) => {
                    ctx.session.select(id)?;
                    println!("Selected profile {id}");
                }
                None => println!("Profile created; run `healthstride users list` to find its id"),
            }
        }
        UsersCommand::Select { id } => {
            let profile = users.get(id).await?;
            ctx.session.select(id)?;
            println!("Selected {} ({id})", profile.name);
        }
        UsersCommand::Update { id, changes } => {
            let id = match id {
                Some(id) => id,
                None => ctx.session.require_user()?,
            };
            let mut profile = users.get(id).await?;
            changes.apply(&mut profile);
            ensure_valid(&profile)?;
            users.update(id, &profile).await?;
        }
        UsersCommand::Delete { id } => {
            users.delete(id).await?;
            if ctx.session.current_user_id() == Some(id) {
                ctx.session.clear()?;
            }
        }
        UsersCommand::Current => match ctx.session.current_user_id() {
            Some(id) => println!("{id}"),
            None => println!("No user selected"),
        },
    }
    Ok(())
}

async fn run_metrics(action: MetricsCommand, ctx: &mut Context, today: NaiveDate) -> Result<()> {
    match action {
        MetricsCommand::Show { date } => {
            let user_id = ctx.session.require_user()?;
            let date = date.unwrap_or(today);
            match ctx.api.metrics().by_date(user_id, date).await {
                Some(metrics) => print!("{}", display::render_metrics(&metrics)),
                None => println!("No metrics logged for {date}"),
            }
        }
        MetricsCommand::Log(args) => {
            let date = args.date.unwrap_or(today);
            let mut metrics = views::load_metrics_form(&ctx.api, &ctx.session, date).await?;
            let user_id = ctx.session.require_user()?;

            metrics.steps = args.steps.or(metrics.steps);
            metrics.calories_consumed = args.calories_consumed.or(metrics.calories_consumed);
            metrics.calories_burned = args.calories_burned.or(metrics.calories_burned);
            metrics.distance_km = args.distance_km.or(metrics.distance_km);
            metrics.active_minutes = args.active_minutes.or(metrics.active_minutes);
            metrics.water_intake_liters = args.water_intake_liters.or(metrics.water_intake_liters);
            metrics.sleep_hours = args.sleep_hours.or(metrics.sleep_hours);
            metrics.heart_rate_avg = args.heart_rate_avg.or(metrics.heart_rate_avg);
            // recomputed by the backend
            metrics.net_calories = None;

            ensure_valid(&metrics)?;
            ctx.api.metrics().save(user_id, &metrics).await?;
            println!(
                "Net calories: {}",
                display::calories(Some(metrics.effective_net_calories()))
            );
        }
        MetricsCommand::AddSteps { steps, date } => {
            let user_id = ctx.session.require_user()?;
            ctx.api.metrics().add_steps(user_id, steps, date).await?;
        }
    }
    Ok(())
}

async fn run_activities(action: ActivitiesCommand, ctx: &mut Context) -> Result<()> {
    let user_id = ctx.session.require_user()?;
    let activities = ctx.api.activities();

    match action {
        ActivitiesCommand::List { from, to } => {
            let listed = match (from, to) {
                (Some(from), Some(to)) => activities.range(user_id, DateRange::new(from, to)).await?,
                _ => activities.list(user_id).await?,
            };
            print!("{}", display::render_activities(&listed));
        }
        ActivitiesCommand::Log(args) => {
            let now = current_minute();
            let activity = Activity {
                id: None,
                activity_type: args.activity_type,
                start_time: args.start.unwrap_or(now),
                end_time: args.end.unwrap_or(now),
                duration_minutes: None,
                calories_burned: None,
                distance_km: args.distance_km,
                notes: args.notes,
                average_pace: None,
            };
            ensure_valid(&activity)?;
            activities.create(user_id, &activity).await?;
        }
        ActivitiesCommand::Update { id, changes } => {
            let mut activity = activities
                .list(user_id)
                .await?
                .into_iter()
                .find(|activity| activity.id == Some(id))
                .with_context(|| format!("Activity {id} not found"))?;

            if let Some(activity_type) = changes.activity_type {
                activity.activity_type = activity_type;
            }
            if let Some(start) = changes.start {
                activity.start_time = start;
            }
            if let Some(end) = changes.end {
                activity.end_time = end;
            }
            if changes.distance_km.is_some() {
                activity.distance_km = changes.distance_km;
            }
            if changes.notes.is_some() {
                activity.notes = changes.notes;
            }

            ensure_valid(&activity)?;
            activities.update(user_id, id, &activity).await?;
        }
        ActivitiesCommand::Delete { id } => {
            activities.delete(user_id, id).await?;
        }
    }
    Ok(())
}

/// Local time truncated to the minute, as the activity form submits it
fn current_minute() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(now)
}

fn ensure_valid<T: Validate>(value: &T) -> Result<()> {
    if let Err(errors) = validation::check(value) {
        for error in &errors {
            eprintln!("✗ {}", error.message);
        }
        bail!("{} invalid field(s)", errors.len());
    }
    Ok(())
}
