//! Integration tests for workout logging, dashboards and monthly summaries

mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

const LEG_DAY: &str = "#Legs\n-Back Squat\n-5 sets15 reps\n-30kg\n-10min\n\
                       #Legs\n-Lunges\n-3 sets10 reps\n-20kg\n-5min";

#[tokio::test]
#[ignore = "requires database"]
async fn test_workouts_require_auth() {
    let app = common::TestApp::new().await;

    let (status, body) = app
        .post("/api/v1/workouts", &json!({ "workoutString": LEG_DAY }).to_string())
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let body: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(body["error"]["code"], "UNAUTHENTICATED");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_record_and_list_workouts() {
    let app = common::TestApp::new().await;
    let token = app.new_owner_token();

    let body = json!({ "workoutString": LEG_DAY, "date": "2024-10-15T09:30:00Z" });
    let (status, response) = app
        .post_auth("/api/v1/workouts", &body.to_string(), &token)
        .await;

    assert_eq!(status, StatusCode::CREATED);
    let response: Value = serde_json::from_str(&response).unwrap();
    let created = response["created"].as_array().unwrap();
    assert_eq!(created.len(), 2);
    assert_eq!(created[0]["workoutName"], "Back Squat");
    // trunc(10) * trunc(30) * 5
    assert_eq!(created[0]["caloriesBurned"], 1500.0);
    assert!(created[0].get("ownerId").is_none());

    let (status, day) = app
        .get_auth("/api/v1/workouts?date=2024-10-15", &token)
        .await;
    assert_eq!(status, StatusCode::OK);
    let day: Value = serde_json::from_str(&day).unwrap();
    assert_eq!(day["workouts"].as_array().unwrap().len(), 2);
    assert_eq!(day["totalCaloriesBurned"], 2000.0);

    let (_, other_day) = app
        .get_auth("/api/v1/workouts?date=2024-10-16", &token)
        .await;
    let other_day: Value = serde_json::from_str(&other_day).unwrap();
    assert!(other_day["workouts"].as_array().unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_malformed_text_stores_nothing() {
    let app = common::TestApp::new().await;
    let token = app.new_owner_token();

    let text = "#Legs\n-Back Squat\n-5 sets15 reps\n-30kg\n-10min\n#Arms\n-Curl\n-3 sets";
    let body = json!({ "workoutString": text, "date": "2024-10-15T09:30:00Z" });
    let (status, response) = app
        .post_auth("/api/v1/workouts", &body.to_string(), &token)
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let response: Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["error"]["code"], "MALFORMED_INPUT");
    assert_eq!(response["error"]["unit"], 2);

    let (_, day) = app
        .get_auth("/api/v1/workouts?date=2024-10-15", &token)
        .await;
    let day: Value = serde_json::from_str(&day).unwrap();
    assert!(day["workouts"].as_array().unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_parse_preview_does_not_store() {
    let app = common::TestApp::new().await;
    let token = app.new_owner_token();

    let body = json!({ "workoutString": "#Legs;-Squat;-1 sets1 reps;-10kg;-10min", "delimiter": "semicolon" });
    let (status, response) = app
        .post_auth("/api/v1/workouts/parse", &body.to_string(), &token)
        .await;

    assert_eq!(status, StatusCode::OK);
    let response: Value = serde_json::from_str(&response).unwrap();
    assert_eq!(response["totalCalories"], 500.0);

    let (_, summary) = app.get_auth("/api/v1/workouts/monthly", &token).await;
    let summary: Value = serde_json::from_str(&summary).unwrap();
    assert!(summary.as_array().unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_workouts_are_scoped_to_owner() {
    let app = common::TestApp::new().await;
    let owner = app.new_owner_token();
    let stranger = app.new_owner_token();

    let body = json!({ "workoutString": LEG_DAY, "date": "2024-10-15T09:30:00Z" });
    app.post_auth("/api/v1/workouts", &body.to_string(), &owner)
        .await;

    let (_, day) = app
        .get_auth("/api/v1/workouts?date=2024-10-15", &stranger)
        .await;
    let day: Value = serde_json::from_str(&day).unwrap();
    assert!(day["workouts"].as_array().unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_monthly_summary_and_detail() {
    let app = common::TestApp::new().await;
    let token = app.new_owner_token();

    for (text, date) in [
        (LEG_DAY, "2024-09-03T18:00:00Z"),
        ("#Cardio\n-Run\n-1 sets1 reps\n-0kg\n-30min", "2024-10-01T07:00:00Z"),
    ] {
        let body = json!({ "workoutString": text, "date": date });
        let (status, _) = app
            .post_auth("/api/v1/workouts", &body.to_string(), &token)
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, summary) = app.get_auth("/api/v1/workouts/monthly", &token).await;
    assert_eq!(status, StatusCode::OK);
    let summary: Value = serde_json::from_str(&summary).unwrap();
    let months = summary.as_array().unwrap();
    assert_eq!(months.len(), 2);
    assert_eq!(months[0]["month"], 10);
    assert_eq!(months[1]["month"], 9);
    assert_eq!(months[1]["totalWorkouts"], 2);
    assert_eq!(months[1]["categoryBreakdown"]["Legs"], 2);

    let (status, detail) = app
        .get_auth("/api/v1/workouts/monthly/2024/9", &token)
        .await;
    assert_eq!(status, StatusCode::OK);
    let detail: Value = serde_json::from_str(&detail).unwrap();
    assert_eq!(detail["totalCaloriesBurned"], 2000.0);
    assert_eq!(detail["workouts"].as_array().unwrap().len(), 2);

    let (status, _) = app
        .get_auth("/api/v1/workouts/monthly/2024/13", &token)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_dashboard_for_new_owner() {
    let app = common::TestApp::new().await;
    let token = app.new_owner_token();

    let (status, dashboard) = app.get_auth("/api/v1/dashboard", &token).await;

    assert_eq!(status, StatusCode::OK);
    let dashboard: Value = serde_json::from_str(&dashboard).unwrap();
    assert_eq!(dashboard["totalWorkouts"], 0);
    assert_eq!(dashboard["avgCaloriesBurntPerWorkout"], 0.0);
    assert_eq!(dashboard["weeklySeries"].as_array().unwrap().len(), 7);
    assert!(dashboard["categoryBreakdown"].as_array().unwrap().is_empty());
}
