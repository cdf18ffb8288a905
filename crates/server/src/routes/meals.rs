use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::{error, info};

use service::domain::{DateGroup, MealDraft, MealEntry, MonthlyMemberSummary};
use service::errors::ServiceError;
use service::period::Period;

use crate::errors::JsonApiError;
use crate::state::ServerState;

#[derive(Debug, Serialize)]
pub struct AddMealsReply {
    pub message: &'static str,
    #[serde(rename = "addedMeals")]
    pub added_meals: Vec<MealEntry>,
}

#[derive(Debug, Serialize)]
pub struct MealsReply {
    pub message: &'static str,
    pub meals: Vec<MealEntry>,
}

#[derive(Debug, Serialize)]
pub struct GuestMealsReply {
    pub message: &'static str,
    #[serde(rename = "totalGuestMeals")]
    pub total_guest_meals: i64,
}

#[utoipa::path(
    post, path = "/addMeal", tag = "meals",
    request_body = [MealDraft],
    responses(
        (status = 201, description = "Meals added"),
        (status = 400, description = "Already added for today, or invalid batch"),
        (status = 500, description = "Internal Server Error")
    )
)]
pub async fn add_meals(
    State(state): State<ServerState>,
    Json(batch): Json<Vec<MealDraft>>,
) -> Result<(StatusCode, Json<AddMealsReply>), JsonApiError> {
    let added_meals = state.meals.add_meals(batch).await?;
    Ok((StatusCode::CREATED, Json(AddMealsReply { message: "Meals added successfully!", added_meals })))
}

#[utoipa::path(get, path = "/meals", tag = "meals", responses((status = 200, description = "Entries grouped by date")))]
pub async fn list_grouped(State(state): State<ServerState>) -> Result<Json<Vec<DateGroup>>, JsonApiError> {
    match state.meals.list_grouped_by_date().await {
        Ok(groups) => { info!(dates = groups.len(), "list meals grouped by date"); Ok(Json(groups)) }
        Err(e) => {
            error!(err = %e, "grouping meals failed");
            Err(JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Error fetching meals"))
        }
    }
}

async fn meals_for(state: &ServerState, period: Period, message: &'static str) -> Result<Json<MealsReply>, JsonApiError> {
    let meals = state.meals.list_for(period).await.map_err(internal)?;
    Ok(Json(MealsReply { message, meals }))
}

async fn guest_meals_for(state: &ServerState, period: Period, message: &'static str) -> Result<Json<GuestMealsReply>, JsonApiError> {
    let total_guest_meals = state.meals.sum_guest_meals_for(period).await.map_err(internal)?;
    Ok(Json(GuestMealsReply { message, total_guest_meals }))
}

/// Read-only views only fail on infrastructure errors.
fn internal(e: ServiceError) -> JsonApiError {
    error!(err = %e, "meal query failed");
    JsonApiError::internal()
}

#[utoipa::path(get, path = "/meals/today", tag = "meals", responses((status = 200, description = "Today's meals")))]
pub async fn list_today(State(state): State<ServerState>) -> Result<Json<MealsReply>, JsonApiError> {
    meals_for(&state, Period::Today, "Today's meals").await
}

#[utoipa::path(get, path = "/meals/weekly", tag = "meals", responses((status = 200, description = "Meals of the last seven days and today")))]
pub async fn list_weekly(State(state): State<ServerState>) -> Result<Json<MealsReply>, JsonApiError> {
    meals_for(&state, Period::Week, "Weekly meals").await
}

#[utoipa::path(get, path = "/meals/monthly", tag = "meals", responses((status = 200, description = "Meals of the current month")))]
pub async fn list_monthly(State(state): State<ServerState>) -> Result<Json<MealsReply>, JsonApiError> {
    meals_for(&state, Period::Month, "Monthly meals").await
}

#[utoipa::path(get, path = "/meals/monthly/by-member", tag = "meals", responses((status = 200, description = "Per-member monthly summaries")))]
pub async fn monthly_by_member(State(state): State<ServerState>) -> Result<Json<Vec<MonthlyMemberSummary>>, JsonApiError> {
    let summaries = state.meals.monthly_by_member().await.map_err(internal)?;
    Ok(Json(summaries))
}

#[utoipa::path(get, path = "/guest-meals/today", tag = "meals", responses((status = 200, description = "Today's guest meal total")))]
pub async fn guest_today(State(state): State<ServerState>) -> Result<Json<GuestMealsReply>, JsonApiError> {
    guest_meals_for(&state, Period::Today, "Today's Guest Meals").await
}

#[utoipa::path(get, path = "/guest-meals/weekly", tag = "meals", responses((status = 200, description = "Weekly guest meal total")))]
pub async fn guest_weekly(State(state): State<ServerState>) -> Result<Json<GuestMealsReply>, JsonApiError> {
    guest_meals_for(&state, Period::Week, "Weekly Guest Meals").await
}

#[utoipa::path(get, path = "/guest-meals/monthly", tag = "meals", responses((status = 200, description = "Monthly guest meal total")))]
pub async fn guest_monthly(State(state): State<ServerState>) -> Result<Json<GuestMealsReply>, JsonApiError> {
    guest_meals_for(&state, Period::Month, "Monthly Guest Meals").await
}
