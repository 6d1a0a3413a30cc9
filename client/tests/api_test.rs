//! Integration tests for the endpoint groups and their notifications

mod common;

use common::{activity_json, date, metrics_json, sample_user, user_json};
use healthstride_client::notify::{Level, NETWORK_ERROR_DESCRIPTION, SERVER_ERROR_DESCRIPTION};
use healthstride_client::{ErrorKind, Notification};
use healthstride_shared::{DailyMetrics, DateRange};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_create_user_notifies_success() {
    let app = common::TestApp::new().await;

    Mock::given(method("POST"))
        .and(path("/api/users"))
        .and(body_partial_json(json!({
            "name": "Ana Silva",
            "gender": "FEMALE",
            "dateOfBirth": "1990-05-15"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(user_json(1)))
        .expect(1)
        .mount(&app.server)
        .await;

    let created = app.api.users().create(&sample_user()).await.unwrap();
    assert_eq!(created.and_then(|user| user.id), Some(1));
    assert_eq!(
        app.notifications(),
        vec![Notification::success("User created successfully!")]
    );
}

#[tokio::test]
async fn test_create_user_rejected_notifies_invalid_request() {
    let app = common::TestApp::new().await;

    Mock::given(method("POST"))
        .and(path("/api/users"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "email already used"})),
        )
        .mount(&app.server)
        .await;

    let err = app.api.users().create(&sample_user()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidRequest);
    assert!(err.to_string().contains("email already used"));
    assert_eq!(
        app.notifications(),
        vec![Notification::error("Invalid request", "email already used")]
    );
}

#[tokio::test]
async fn test_delete_with_no_content_notifies_success() {
    let app = common::TestApp::new().await;

    Mock::given(method("DELETE"))
        .and(path("/api/users/1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&app.server)
        .await;

    app.api.users().delete(1).await.unwrap();
    assert_eq!(
        app.notifications(),
        vec![Notification::success("User deleted successfully!")]
    );
}

#[tokio::test]
async fn test_server_error_uses_generic_description() {
    let app = common::TestApp::new().await;

    Mock::given(method("PUT"))
        .and(path("/api/users/1"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"message": "NullPointerException"})),
        )
        .mount(&app.server)
        .await;

    let err = app.api.users().update(1, &sample_user()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Server);
    assert_eq!(
        app.notifications(),
        vec![Notification::error("Server error", SERVER_ERROR_DESCRIPTION)]
    );
}

#[tokio::test]
async fn test_get_missing_user_notifies_not_found() {
    let app = common::TestApp::new().await;

    Mock::given(method("GET"))
        .and(path("/api/users/42"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "User not found"})))
        .mount(&app.server)
        .await;

    let err = app.api.users().get(42).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(
        app.notifications(),
        vec![Notification::error("Resource not found", "User not found")]
    );
}

#[tokio::test]
async fn test_unreachable_backend_notifies_network_error() {
    let (api, notifier) = common::unreachable_api();

    let err = api.users().list().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Network);
    assert_eq!(
        notifier.snapshot(),
        vec![Notification::error("Network error", NETWORK_ERROR_DESCRIPTION)]
    );
}

#[tokio::test]
async fn test_silent_reads_never_notify() {
    let app = common::TestApp::new().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "boom"})))
        .mount(&app.server)
        .await;

    assert!(app.api.users().bmr(1).await.is_err());
    assert!(app.api.users().tdee(1).await.is_err());
    assert!(app.api.users().dashboard_summary(1).await.is_err());
    assert!(app.api.metrics().list(1).await.is_err());
    assert!(app.api.activities().list(1).await.is_err());
    assert!(app.api.dashboard().weekly(1, None).await.is_err());
    assert!(app.notifications().is_empty());
}

#[tokio::test]
async fn test_silent_read_of_unreachable_backend_never_notifies() {
    let (api, notifier) = common::unreachable_api();

    let err = api.users().bmr(1).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Network);
    assert_eq!(api.metrics().today(1).await, None);
    assert!(notifier.snapshot().is_empty());
}

#[tokio::test]
async fn test_today_metrics_is_none_on_not_found() {
    let app = common::TestApp::new().await;

    Mock::given(method("GET"))
        .and(path("/api/users/1/metrics/today"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "No metrics"})))
        .mount(&app.server)
        .await;

    assert_eq!(app.api.metrics().today(1).await, None);
    assert!(app.notifications().is_empty());
}

#[tokio::test]
async fn test_metrics_by_date() {
    let app = common::TestApp::new().await;

    Mock::given(method("GET"))
        .and(path("/api/users/1/metrics/date/2024-03-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(metrics_json("2024-03-01", 8000)))
        .mount(&app.server)
        .await;

    let metrics = app.api.metrics().by_date(1, date(2024, 3, 1)).await.unwrap();
    assert_eq!(metrics.steps, Some(8000));
    assert_eq!(metrics.effective_net_calories(), -300.0);
}

#[tokio::test]
async fn test_metrics_by_date_is_none_on_not_found() {
    let app = common::TestApp::new().await;

    Mock::given(method("GET"))
        .and(path("/api/users/1/metrics/date/2024-03-02"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "No metrics"})))
        .expect(1)
        .mount(&app.server)
        .await;

    assert_eq!(app.api.metrics().by_date(1, date(2024, 3, 2)).await, None);
    assert!(app.notifications().is_empty());
}

#[tokio::test]
async fn test_metrics_range_sends_dates() {
    let app = common::TestApp::new().await;

    Mock::given(method("GET"))
        .and(path("/api/users/1/metrics/range"))
        .and(query_param("startDate", "2024-02-24"))
        .and(query_param("endDate", "2024-03-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            metrics_json("2024-02-29", 4000),
            metrics_json("2024-03-01", 8000)
        ])))
        .expect(1)
        .mount(&app.server)
        .await;

    let range = DateRange::ending_on(date(2024, 3, 1), 7);
    let metrics = app.api.metrics().range(1, range).await.unwrap();
    assert_eq!(metrics.len(), 2);
}

#[tokio::test]
async fn test_save_metrics_notifies_success() {
    let app = common::TestApp::new().await;

    Mock::given(method("POST"))
        .and(path("/api/users/1/metrics"))
        .and(body_partial_json(json!({"date": "2024-03-01", "steps": 0})))
        .respond_with(ResponseTemplate::new(200).set_body_json(metrics_json("2024-03-01", 0)))
        .expect(1)
        .mount(&app.server)
        .await;

    let saved = app
        .api
        .metrics()
        .save(1, &DailyMetrics::zeroed(date(2024, 3, 1)))
        .await
        .unwrap();
    assert!(saved.is_some());
    assert_eq!(
        app.notifications(),
        vec![Notification::success("Health metrics saved successfully!")]
    );
}

#[tokio::test]
async fn test_add_steps_sends_query_and_reports_count() {
    let app = common::TestApp::new().await;

    Mock::given(method("POST"))
        .and(path("/api/users/1/metrics/steps"))
        .and(query_param("steps", "1000"))
        .and(query_param("date", "2024-03-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(metrics_json("2024-03-01", 9000)))
        .expect(1)
        .mount(&app.server)
        .await;

    let updated = app
        .api
        .metrics()
        .add_steps(1, 1000, Some(date(2024, 3, 1)))
        .await
        .unwrap();
    assert_eq!(updated.and_then(|m| m.steps), Some(9000));
    assert_eq!(app.notifications(), vec![Notification::success("Added 1000 steps!")]);
}

#[tokio::test]
async fn test_activity_lifecycle_messages() {
    let app = common::TestApp::new().await;

    Mock::given(method("POST"))
        .and(path("/api/users/1/activities"))
        .and(body_partial_json(json!({"activityType": "Running", "startTime": "2024-03-01T07:00:00"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(activity_json(5)))
        .mount(&app.server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/users/1/activities/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(activity_json(5)))
        .mount(&app.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/users/1/activities/5"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&app.server)
        .await;

    let activity: healthstride_shared::Activity = serde_json::from_value(activity_json(5)).unwrap();
    let activities = app.api.activities();
    let created = activities.create(1, &activity).await.unwrap().unwrap();
    assert_eq!(created.effective_duration_minutes(), 30.0);
    activities.update(1, 5, &activity).await.unwrap();
    activities.delete(1, 5).await.unwrap();

    let titles: Vec<String> = app
        .notifications()
        .into_iter()
        .inspect(|n| assert_eq!(n.level, Level::Success))
        .map(|n| n.title)
        .collect();
    assert_eq!(
        titles,
        vec![
            "Activity logged successfully!",
            "Activity updated successfully!",
            "Activity deleted successfully!"
        ]
    );
}

#[tokio::test]
async fn test_weekly_stats_start_date_parameter() {
    let app = common::TestApp::new().await;

    Mock::given(method("GET"))
        .and(path("/api/users/1/dashboard/weekly"))
        .and(query_param("weekStartDate", "2024-02-24"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "startDate": "2024-02-24",
            "endDate": "2024-03-01",
            "totalSteps": 52000,
            "totalCaloriesBurned": 15000.0,
            "totalCaloriesConsumed": 14000.0,
            "netCalories": -1000.0,
            "totalDistanceKm": 35.2,
            "totalActiveMinutes": 300,
            "averageStepsPerDay": 7428.57,
            "averageActiveMinutesPerDay": 42.86
        })))
        .expect(1)
        .mount(&app.server)
        .await;

    let stats = app.api.dashboard().weekly(1, Some(date(2024, 2, 24))).await.unwrap();
    assert_eq!(stats.total_steps, 52000);
    assert_eq!(stats.end_date, date(2024, 3, 1));
}

#[tokio::test]
async fn test_empty_list_body_reads_as_empty() {
    let app = common::TestApp::new().await;

    Mock::given(method("GET"))
        .and(path("/api/users"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&app.server)
        .await;

    assert!(app.api.users().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unexpected_body_is_reported() {
    let app = common::TestApp::new().await;

    Mock::given(method("GET"))
        .and(path("/api/users/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"unexpected": true})))
        .mount(&app.server)
        .await;

    let err = app.api.users().get(1).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unexpected);
    let notifications = app.notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].title, "Request failed");
}
