use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use serde_json::{json, Value};
use tower::ServiceExt;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use server::{routes, ServerState};
use service::period::FixedClock;
use service::repository::{mock::InMemoryRepository, MessRepository};

fn today() -> NaiveDate { NaiveDate::from_ymd_opt(2025, 6, 15).unwrap() }

fn app_with(repo: Arc<dyn MessRepository>) -> Router {
    let state = ServerState::new(repo, Arc::new(FixedClock(today())));
    routes::build_router(state, CorsLayer::very_permissive())
}

fn app() -> Router { app_with(Arc::new(InMemoryRepository::default())) }

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let req = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(b) => req.header("content-type", "application/json").body(Body::from(b.to_string())).unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, value)
}

async fn add_member(app: &Router, name: &str) -> String {
    let (status, body) = call(app, Method::POST, "/memberAdd", Some(json!({"name": name, "address": "Hall 2"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["acknowledged"], true);
    body["insertedId"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn liveness_and_health() {
    let app = app();
    let (status, body) = call(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("server is running".into()));

    let (status, body) = call(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn member_lifecycle() {
    let app = app();
    let id = add_member(&app, "Rahim").await;

    let (_, list) = call(&app, Method::GET, "/allMember", None).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["_id"], id.as_str());
    assert_eq!(list[0]["name"], "Rahim");

    let same = json!({"name": "Rahim", "address": "Hall 2"});
    let (status, body) = call(&app, Method::PUT, &format!("/memberUpdate/{id}"), Some(same)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": false, "message": "No changes made"}));

    let moved = json!({"name": "Rahim", "address": "Hall 7", "role": "ignored"});
    let (status, body) = call(&app, Method::PUT, &format!("/memberUpdate/{id}"), Some(moved.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let missing = Uuid::new_v4();
    let (status, body) = call(&app, Method::PUT, &format!("/memberUpdate/{missing}"), Some(moved)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"success": false, "message": "Member not found"}));

    let (status, body) = call(&app, Method::DELETE, &format!("/memberDelete/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deletedCount"], 1);
    let (_, list) = call(&app, Method::GET, "/allMember", None).await;
    assert!(list.as_array().unwrap().is_empty());

    let (status, body) = call(&app, Method::DELETE, &format!("/memberDelete/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deletedCount"], 0);
}

#[tokio::test]
async fn member_input_is_validated() {
    let app = app();
    let (status, _) = call(&app, Method::POST, "/memberAdd", Some(json!({"name": "   "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(&app, Method::PUT, "/memberUpdate/not-a-uuid", Some(json!({"name": "A", "address": ""}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn add_meal_then_duplicate_then_mixed_batch() {
    let app = app();
    let a = add_member(&app, "Amin").await;
    let b = add_member(&app, "Bina").await;

    let (status, body) = call(&app, Method::POST, "/addMeal", Some(json!([{"member_id": a, "memberName": "Amin"}]))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Meals added successfully!");
    assert_eq!(body["addedMeals"][0]["mealDate"], "2025-06-15");
    assert_eq!(body["addedMeals"][0]["guestMeals"], 0);

    let (status, body) = call(&app, Method::POST, "/addMeal", Some(json!([{"member_id": a}]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Meal already added for today!");

    let batch = json!([{"member_id": a}, {"member_id": b, "guestMeals": 2}]);
    let (status, body) = call(&app, Method::POST, "/addMeal", Some(batch)).await;
    assert_eq!(status, StatusCode::CREATED);
    let added = body["addedMeals"].as_array().unwrap();
    assert_eq!(added.len(), 1);
    assert_eq!(added[0]["member_id"], b.as_str());

    let (_, body) = call(&app, Method::GET, "/meals/today", None).await;
    assert_eq!(body["message"], "Today's meals");
    assert_eq!(body["meals"].as_array().unwrap().len(), 2);

    let (_, body) = call(&app, Method::GET, "/guest-meals/weekly", None).await;
    assert_eq!(body, json!({"message": "Weekly Guest Meals", "totalGuestMeals": 2}));

    let (_, groups) = call(&app, Method::GET, "/meals", None).await;
    assert_eq!(groups[0]["_id"], "2025-06-15");
    assert_eq!(groups[0]["totalMeals"], 2);

    let (_, summary) = call(&app, Method::GET, "/meals/monthly/by-member", None).await;
    let names: Vec<&str> = summary.as_array().unwrap().iter().map(|s| s["memberName"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Amin", "Bina"]);
    assert_eq!(summary[1]["totalGuestMeals"], 2);
    assert_eq!(summary[1]["mealDates"], json!(["2025-06-15"]));
}

#[tokio::test]
async fn malformed_meal_batch_is_rejected() {
    let app = app();
    let (status, _) = call(&app, Method::POST, "/addMeal", Some(json!([]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = call(&app, Method::POST, "/addMeal", Some(json!([{"member_id": Uuid::new_v4(), "guestMeals": -1}]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = call(&app, Method::POST, "/addMeal", Some(json!([{"memberName": "no id"}]))).await;
    assert!(status.is_client_error());
}

#[tokio::test]
async fn empty_periods_report_zero_guests() {
    let app = app();
    for (uri, message) in [
        ("/guest-meals/today", "Today's Guest Meals"),
        ("/guest-meals/weekly", "Weekly Guest Meals"),
        ("/guest-meals/monthly", "Monthly Guest Meals"),
    ] {
        let (status, body) = call(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": message, "totalGuestMeals": 0}));
    }
    let (_, body) = call(&app, Method::GET, "/meals/monthly", None).await;
    assert_eq!(body, json!({"message": "Monthly meals", "meals": []}));
}

#[tokio::test]
async fn meal_rate_defaults_to_zero_and_round_trips() {
    let app = app();
    let (status, body) = call(&app, Method::GET, "/mealRate", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"rate": 0.0}));

    let (status, body) = call(&app, Method::POST, "/mealRate", Some(json!({"value": 48.5}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["type"], "mealRate");
    assert_eq!(body["result"]["value"], 48.5);

    let (_, body) = call(&app, Method::GET, "/mealRate", None).await;
    assert_eq!(body, json!({"rate": 48.5}));

    let (status, _) = call(&app, Method::POST, "/mealRate", Some(json!({"value": -3}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn storage_failures_surface_as_generic_500() {
    let app = app_with(Arc::new(InMemoryRepository::unavailable()));

    let (status, body) = call(&app, Method::GET, "/meals/today", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"message": "Internal Server Error"}));

    let (status, body) = call(&app, Method::GET, "/meals", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Error fetching meals");

    let id = Uuid::new_v4();
    let (status, body) = call(&app, Method::PUT, &format!("/memberUpdate/{id}"), Some(json!({"name": "A", "address": "B"}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"success": false, "message": "Server error"}));

    let (status, _) = call(&app, Method::POST, "/addMeal", Some(json!([{"member_id": id}]))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}
