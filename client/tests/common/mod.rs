//! Common test utilities for integration tests
//!
//! Every test gets its own mock backend and an API client whose
//! notifications are captured in memory.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;
use healthstride_client::{Gateway, HealthApi, MemoryNotifier, Notification, Session};
use healthstride_shared::{ActivityLevel, Gender, UserProfile};
use serde_json::{json, Value};
use wiremock::MockServer;

/// Mock backend plus a client pointed at it
pub struct TestApp {
    pub server: MockServer,
    pub api: HealthApi,
    pub notifier: Arc<MemoryNotifier>,
}

impl TestApp {
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let notifier = Arc::new(MemoryNotifier::new());
        let gateway = Gateway::new(format!("{}/api", server.uri())).expect("valid base url");
        let api = HealthApi::new(gateway, notifier.clone());

        Self {
            server,
            api,
            notifier,
        }
    }

    /// Notifications raised so far
    pub fn notifications(&self) -> Vec<Notification> {
        self.notifier.snapshot()
    }
}

/// A client pointed at a port nothing listens on
pub fn unreachable_api() -> (HealthApi, Arc<MemoryNotifier>) {
    let notifier = Arc::new(MemoryNotifier::new());
    let gateway = Gateway::new("http://127.0.0.1:1/api").expect("valid base url");
    (HealthApi::new(gateway, notifier.clone()), notifier)
}

/// Session with `user_id` already selected, not persisted
pub fn session_for(user_id: i64) -> Session {
    let mut session = Session::in_memory();
    session.select(user_id).expect("in-memory select");
    session
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn sample_user() -> UserProfile {
    UserProfile {
        id: None,
        name: "Ana Silva".to_string(),
        email: "ana@example.com".to_string(),
        date_of_birth: date(1990, 5, 15),
        gender: Gender::Female,
        height_cm: 165.0,
        weight_kg: 60.0,
        activity_level: Some(ActivityLevel::ModeratelyActive),
    }
}

pub fn user_json(id: i64) -> Value {
    json!({
        "id": id,
        "name": "Ana Silva",
        "email": "ana@example.com",
        "dateOfBirth": "1990-05-15",
        "gender": "FEMALE",
        "heightCm": 165.0,
        "weightKg": 60.0,
        "activityLevel": "MODERATELY_ACTIVE"
    })
}

pub fn metrics_json(date: &str, steps: u32) -> Value {
    json!({
        "id": 10,
        "date": date,
        "steps": steps,
        "caloriesConsumed": 2200.0,
        "caloriesBurned": 2500.0,
        "distanceKm": 7.5,
        "activeMinutes": 45,
        "waterIntakeLiters": 2.0,
        "sleepHours": 7.5,
        "heartRateAvg": 72,
        "netCalories": -300.0
    })
}

pub fn activity_json(id: i64) -> Value {
    json!({
        "id": id,
        "activityType": "Running",
        "startTime": "2024-03-01T07:00:00",
        "endTime": "2024-03-01T07:30:00",
        "durationMinutes": 30,
        "caloriesBurned": 294.0,
        "distanceKm": 5.0,
        "averagePace": 10.0
    })
}
