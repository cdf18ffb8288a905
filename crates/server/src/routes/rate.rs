use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use service::domain::RateSetting;

use crate::errors::JsonApiError;
use crate::state::ServerState;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct RatePayload {
    #[serde(alias = "rate", alias = "mealRate")]
    pub value: f64,
}

#[derive(Debug, Serialize)]
pub struct SetRateReply {
    pub message: &'static str,
    pub result: RateSetting,
}

#[derive(Debug, Serialize)]
pub struct RateReply {
    pub rate: f64,
}

#[utoipa::path(
    post, path = "/mealRate", tag = "rate",
    request_body = RatePayload,
    responses(
        (status = 200, description = "Rate stored"),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn set_rate(State(state): State<ServerState>, Json(payload): Json<RatePayload>) -> Result<Json<SetRateReply>, JsonApiError> {
    let result = state.rate.set_rate(payload.value).await?;
    Ok(Json(SetRateReply { message: "Meal rate updated successfully", result }))
}

#[utoipa::path(get, path = "/mealRate", tag = "rate", responses((status = 200, description = "Current rate, 0 when unset")))]
pub async fn get_rate(State(state): State<ServerState>) -> Result<Json<RateReply>, JsonApiError> {
    let rate = state.rate.get_rate().await?;
    Ok(Json(RateReply { rate }))
}
