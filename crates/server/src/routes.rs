use axum::{
    routing::{delete, get, post, put},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::{Health, LIVENESS_TEXT};

use crate::openapi::{ApiDoc, HealthResponse};
use crate::state::ServerState;

pub mod meals;
pub mod members;
pub mod rate;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn liveness() -> &'static str {
    LIVENESS_TEXT
}

/// Build the full application router: registry, ledger, rate and docs.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let member_routes = Router::new()
        .route("/memberAdd", post(members::add_member))
        .route("/allMember", get(members::list_members))
        .route("/memberUpdate/:id", put(members::update_member))
        .route("/memberDelete/:id", delete(members::delete_member));

    let meal_routes = Router::new()
        .route("/addMeal", post(meals::add_meals))
        .route("/meals", get(meals::list_grouped))
        .route("/meals/today", get(meals::list_today))
        .route("/meals/weekly", get(meals::list_weekly))
        .route("/meals/monthly", get(meals::list_monthly))
        .route("/meals/monthly/by-member", get(meals::monthly_by_member))
        .route("/guest-meals/today", get(meals::guest_today))
        .route("/guest-meals/weekly", get(meals::guest_weekly))
        .route("/guest-meals/monthly", get(meals::guest_monthly));

    let rate_routes = Router::new()
        .route("/mealRate", get(rate::get_rate).post(rate::set_rate));

    Router::new()
        .route("/", get(liveness))
        .route("/health", get(health))
        .merge(member_routes)
        .merge(meal_routes)
        .merge(rate_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // one INFO span per request with method and path
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // status and latency
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
