//! End-to-end workout lifecycle through the HTTP router and the in-memory
//! broker: bind, readings, location, shelter proximity, end.

mod support;

use axum::http::StatusCode;
use serde_json::{json, Value};

use support::{player_body, TestApp};
use trailfit::domain::foundation::{HrmId, Timestamp};

fn at(ms: i64) -> Value {
    serde_json::to_value(Timestamp::from_unix_millis(1_760_000_000_000 + ms)).unwrap()
}

#[tokio::test]
async fn workout_lifecycle_folds_telemetry_and_releases_peripherals() {
    let app = TestApp::spawn().await;
    let hrm = HrmId::new();

    let (status, _) = app
        .post(
            "/trails",
            json!({
                "name": "Eiger Trail",
                "shelters": [{"name": "Mittellegi Hut", "latitude": 46.01, "longitude": 8.0}],
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, player) = app.post("/players", player_body("ueli@example.com")).await;
    assert_eq!(status, StatusCode::CREATED);
    let player_id = player["id"].as_str().unwrap().to_string();

    let (status, workout) = app
        .post(
            "/workouts",
            json!({"player_id": player_id, "hrm_id": hrm, "send_live_location": true, "kind": "dynamic"}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{}", workout);
    assert_eq!(workout["hardcore_mode"], json!(true));
    assert_eq!(workout["active"], json!(true));
    let workout_id = workout["id"].as_str().unwrap().to_string();

    // The HRM binding arrives asynchronously over HR-Workout.
    let hrm_id = hrm.to_string();
    app.eventually(&format!("/peripheral/{}", workout_id), |b| {
        b["bound_hrm_id"].as_str() == Some(hrm_id.as_str())
    })
    .await;

    for (ms, rate) in [(2_000, 130), (1_000, 110), (3_000, 150)] {
        let (status, body) = app
            .post(
                "/hrm",
                json!({"workout_id": workout_id, "hrm_id": hrm, "heart_rate": rate, "created_at": at(ms)}),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
    }

    for (ms, lat) in [(0, 46.0), (1_000, 46.001)] {
        let (status, body) = app
            .post(
                "/peripheral/location",
                json!({"workout_id": workout_id, "latitude": lat, "longitude": 8.0, "time_of_location": at(ms)}),
            )
            .await;
        assert_eq!(status, StatusCode::ACCEPTED);
        assert_eq!(body["forwarded"], json!(true));
    }

    let last_fix = at(1_000);
    let detail = app
        .eventually(&format!("/workouts/{}", workout_id), |b| {
            b["heart_rate"]["samples"] == json!(3)
                && b["shelter"]["observed_at"] == last_fix
                && b["distance_m"].as_f64() > Some(0.0)
        })
        .await;
    assert_eq!(detail["heart_rate"]["latest"], json!(150));
    assert_eq!(detail["heart_rate"]["min"], json!(110));
    assert_eq!(detail["heart_rate"]["max"], json!(150));
    assert_eq!(detail["shelter"]["available"], json!(false));
    let shelter_m = detail["shelter"]["distance_m"].as_f64().unwrap();
    assert!(shelter_m > 900.0 && shelter_m < 1_200.0, "shelter distance {}", shelter_m);
    assert_eq!(detail["average_heart_rate"], json!(130));

    let (status, avg) = app
        .get(&format!("/peripheral/{}/average-heart-rate", workout_id))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(avg["average_heart_rate"], json!(130));

    let (status, ended) = app.put(&format!("/workouts/{}/end", workout_id), None).await;
    assert_eq!(status, StatusCode::OK, "{}", ended);
    assert_eq!(ended["active"], json!(false));
    assert_eq!(ended["peripherals_released"], json!(true));

    let (status, binding) = app.get(&format!("/peripheral/{}", workout_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(binding["bound"], json!(false));
    assert!(binding["bound_hrm_id"].is_null());
    let (_, readings) = app.get(&format!("/hrmss?workout_id={}", workout_id)).await;
    assert!(readings.as_array().unwrap().is_empty());

    let activity = app.app.activity.snapshot();
    assert_eq!(activity.started, 1);
    assert_eq!(activity.ended, 1);

    let stats = app.shutdown().await;
    assert_eq!(stats.iter().map(|s| s.failed).sum::<u64>(), 0);
}

#[tokio::test]
async fn reading_from_unbound_device_is_rejected() {
    let app = TestApp::spawn().await;
    let (_, player) = app.post("/players", player_body("anna@example.com")).await;
    let (_, workout) = app
        .post("/workouts", json!({"player_id": player["id"], "hrm_id": HrmId::new()}))
        .await;

    let (status, body) = app
        .post(
            "/hrm",
            json!({"workout_id": workout["id"], "hrm_id": HrmId::new(), "heart_rate": 120}),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT, "{}", body);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn location_is_not_forwarded_without_live_location() {
    let app = TestApp::spawn().await;
    let (_, player) = app.post("/players", player_body("lea@example.com")).await;
    let (_, workout) = app
        .post("/workouts", json!({"player_id": player["id"], "send_live_location": false}))
        .await;

    let (status, body) = app
        .post(
            "/peripheral/location",
            json!({"workout_id": workout["id"], "latitude": 46.0, "longitude": 8.0}),
        )
        .await;

    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["forwarded"], json!(false));
}

#[tokio::test]
async fn ending_twice_conflicts() {
    let app = TestApp::spawn().await;
    let (_, player) = app.post("/players", player_body("kurt@example.com")).await;
    let (_, workout) = app.post("/workouts", json!({"player_id": player["id"]})).await;
    let uri = format!("/workouts/{}/end", workout["id"].as_str().unwrap());

    let (first, _) = app.put(&uri, None).await;
    let (second, body) = app.put(&uri, None).await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::CONFLICT, "{}", body);
}
