use utoipa::OpenApi;
use utoipa::ToSchema;

use service::domain::{MealDraft, MemberUpdate, NewMember};

use crate::routes::rate::RatePayload;

/// Body of `GET /health`.
#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::members::add_member,
        crate::routes::members::list_members,
        crate::routes::members::update_member,
        crate::routes::members::delete_member,
        crate::routes::meals::add_meals,
        crate::routes::meals::list_grouped,
        crate::routes::meals::list_today,
        crate::routes::meals::list_weekly,
        crate::routes::meals::list_monthly,
        crate::routes::meals::monthly_by_member,
        crate::routes::meals::guest_today,
        crate::routes::meals::guest_weekly,
        crate::routes::meals::guest_monthly,
        crate::routes::rate::set_rate,
        crate::routes::rate::get_rate,
    ),
    components(
        schemas(
            HealthResponse,
            NewMember,
            MemberUpdate,
            MealDraft,
            RatePayload,
        )
    ),
    tags(
        (name = "health"),
        (name = "members"),
        (name = "meals"),
        (name = "rate")
    )
)]
pub struct ApiDoc;
