use axum::{extract::{Path, State}, http::StatusCode, Json};
use serde::Serialize;
use tracing::{error, info};
use uuid::Uuid;

use service::domain::{DeleteAck, InsertAck, Member, MemberUpdate, NewMember, UpdateOutcome};
use service::errors::ServiceError;

use crate::errors::JsonApiError;
use crate::state::ServerState;

#[derive(Debug, Serialize)]
pub struct MemberUpdateReply {
    pub success: bool,
    pub message: &'static str,
}

#[utoipa::path(
    post, path = "/memberAdd", tag = "members",
    request_body = NewMember,
    responses(
        (status = 200, description = "Insert acknowledgment"),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn add_member(State(state): State<ServerState>, Json(input): Json<NewMember>) -> Result<Json<InsertAck>, JsonApiError> {
    let member = state.members.add_member(input).await?;
    Ok(Json(InsertAck { acknowledged: true, inserted_id: member.id }))
}

#[utoipa::path(get, path = "/allMember", tag = "members", responses((status = 200, description = "All members")))]
pub async fn list_members(State(state): State<ServerState>) -> Result<Json<Vec<Member>>, JsonApiError> {
    let members = state.members.list_members().await?;
    info!(count = members.len(), "list members");
    Ok(Json(members))
}

#[utoipa::path(
    put, path = "/memberUpdate/{id}", tag = "members",
    params(("id" = Uuid, Path, description = "Member ID")),
    request_body = MemberUpdate,
    responses(
        (status = 200, description = "Updated, or success=false when nothing changed"),
        (status = 404, description = "Member not found"),
        (status = 500, description = "Server error")
    )
)]
pub async fn update_member(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(input): Json<MemberUpdate>,
) -> Result<Json<MemberUpdateReply>, JsonApiError> {
    match state.members.update_member(id, input).await {
        Ok(UpdateOutcome::Updated) => Ok(Json(MemberUpdateReply { success: true, message: "Member updated successfully" })),
        Ok(UpdateOutcome::Unchanged) => Ok(Json(MemberUpdateReply { success: false, message: "No changes made" })),
        Ok(UpdateOutcome::NotFound) => Err(JsonApiError::unsuccessful(StatusCode::NOT_FOUND, "Member not found")),
        Err(ServiceError::Validation(msg)) => Err(JsonApiError::unsuccessful(StatusCode::BAD_REQUEST, msg)),
        Err(e) => {
            error!(err = %e, member_id = %id, "Error updating member");
            Err(JsonApiError::unsuccessful(StatusCode::INTERNAL_SERVER_ERROR, "Server error"))
        }
    }
}

#[utoipa::path(
    delete, path = "/memberDelete/{id}", tag = "members",
    params(("id" = Uuid, Path, description = "Member ID")),
    responses((status = 200, description = "Delete acknowledgment"))
)]
pub async fn delete_member(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<Json<DeleteAck>, JsonApiError> {
    let deleted_count = state.members.delete_member(id).await?;
    Ok(Json(DeleteAck { acknowledged: true, deleted_count }))
}
