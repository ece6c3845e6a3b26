use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use crate::core::error::Result;
use crate::core::extractor::{AppJson, AppPath, AppQuery};
use crate::features::partners::dtos::{
    AddServicesDto, CreatePartnerDto, ListPartnersQuery, PartnerResponseDto, UpdatePartnerDto,
    UpdatePartnerRatingDto, UpdatePartnerStatusDto,
};
use crate::features::partners::services::PartnerService;
use crate::shared::types::ApiResponse;

type PartnerResponse = Result<Json<ApiResponse<PartnerResponseDto>>>;

fn ok(partner: PartnerResponseDto, message: Option<&str>) -> PartnerResponse {
    Ok(Json(ApiResponse::success(
        Some(partner),
        message.map(str::to_string),
        None,
    )))
}

/// Onboard a new partner
///
/// The partner starts as `PENDING` and open, with the service catalog of its category
/// plus any extra services in the request.
#[utoipa::path(
    post,
    path = "/api/partners",
    request_body = CreatePartnerDto,
    responses(
        (status = 201, description = "Partner created", body = ApiResponse<PartnerResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "User already has a partner")
    ),
    tag = "partners"
)]
pub async fn create_partner(
    State(service): State<Arc<PartnerService>>,
    AppJson(dto): AppJson<CreatePartnerDto>,
) -> Result<(StatusCode, Json<ApiResponse<PartnerResponseDto>>)> {
    let partner = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(partner),
            Some("Partner registered and awaiting approval".to_string()),
            None,
        )),
    ))
}

/// List partners
#[utoipa::path(
    get,
    path = "/api/partners",
    params(ListPartnersQuery),
    responses(
        (status = 200, description = "Paginated list of partners", body = ApiResponse<Vec<PartnerResponseDto>>),
        (status = 400, description = "Invalid query")
    ),
    tag = "partners"
)]
pub async fn list_partners(
    State(service): State<Arc<PartnerService>>,
    AppQuery(query): AppQuery<ListPartnersQuery>,
) -> Result<Json<ApiResponse<Vec<PartnerResponseDto>>>> {
    let (partners, meta) = service.list(&query).await?;
    Ok(Json(ApiResponse::success(Some(partners), None, Some(meta))))
}

/// Get partner by ID
#[utoipa::path(
    get,
    path = "/api/partners/{id}",
    params(
        ("id" = i64, Path, description = "Partner ID")
    ),
    responses(
        (status = 200, description = "Partner found", body = ApiResponse<PartnerResponseDto>),
        (status = 404, description = "Partner not found")
    ),
    tag = "partners"
)]
pub async fn get_partner(
    State(service): State<Arc<PartnerService>>,
    AppPath(id): AppPath<i64>,
) -> PartnerResponse {
    ok(service.get(id).await?, None)
}

/// Get the partner owned by a user
#[utoipa::path(
    get,
    path = "/api/users/{user_id}/partner",
    params(
        ("user_id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Partner found", body = ApiResponse<PartnerResponseDto>),
        (status = 404, description = "User has no partner")
    ),
    tag = "partners"
)]
pub async fn get_partner_by_user(
    State(service): State<Arc<PartnerService>>,
    AppPath(user_id): AppPath<i64>,
) -> PartnerResponse {
    ok(service.get_by_user(user_id).await?, None)
}

/// Update partner profile
#[utoipa::path(
    patch,
    path = "/api/partners/{id}",
    params(
        ("id" = i64, Path, description = "Partner ID")
    ),
    request_body = UpdatePartnerDto,
    responses(
        (status = 200, description = "Partner updated", body = ApiResponse<PartnerResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Partner not found")
    ),
    tag = "partners"
)]
pub async fn update_partner(
    State(service): State<Arc<PartnerService>>,
    AppPath(id): AppPath<i64>,
    AppJson(dto): AppJson<UpdatePartnerDto>,
) -> PartnerResponse {
    ok(service.update_profile(id, dto).await?, None)
}

/// Delete partner
#[utoipa::path(
    delete,
    path = "/api/partners/{id}",
    params(
        ("id" = i64, Path, description = "Partner ID")
    ),
    responses(
        (status = 200, description = "Partner deleted"),
        (status = 404, description = "Partner not found")
    ),
    tag = "partners"
)]
pub async fn delete_partner(
    State(service): State<Arc<PartnerService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Partner deleted".to_string()),
        None,
    )))
}

/// Set moderation status
#[utoipa::path(
    patch,
    path = "/api/partners/{id}/status",
    params(
        ("id" = i64, Path, description = "Partner ID")
    ),
    request_body = UpdatePartnerStatusDto,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<PartnerResponseDto>),
        (status = 404, description = "Partner not found")
    ),
    tag = "partners"
)]
pub async fn update_partner_status(
    State(service): State<Arc<PartnerService>>,
    AppPath(id): AppPath<i64>,
    AppJson(dto): AppJson<UpdatePartnerStatusDto>,
) -> PartnerResponse {
    ok(service.update_status(id, dto).await?, None)
}

/// Set aggregated rating
#[utoipa::path(
    patch,
    path = "/api/partners/{id}/rating",
    params(
        ("id" = i64, Path, description = "Partner ID")
    ),
    request_body = UpdatePartnerRatingDto,
    responses(
        (status = 200, description = "Rating updated", body = ApiResponse<PartnerResponseDto>),
        (status = 400, description = "Rating out of range"),
        (status = 404, description = "Partner not found")
    ),
    tag = "partners"
)]
pub async fn update_partner_rating(
    State(service): State<Arc<PartnerService>>,
    AppPath(id): AppPath<i64>,
    AppJson(dto): AppJson<UpdatePartnerRatingDto>,
) -> PartnerResponse {
    ok(service.update_rating(id, dto).await?, None)
}

/// Close the partner for the rest of the day
#[utoipa::path(
    post,
    path = "/api/partners/{id}/close",
    params(
        ("id" = i64, Path, description = "Partner ID")
    ),
    responses(
        (status = 200, description = "Partner closed", body = ApiResponse<PartnerResponseDto>),
        (status = 404, description = "Partner not found")
    ),
    tag = "partners"
)]
pub async fn close_partner(
    State(service): State<Arc<PartnerService>>,
    AppPath(id): AppPath<i64>,
) -> PartnerResponse {
    ok(service.close_early(id).await?, Some("Partner closed"))
}

/// Reopen a closed partner
///
/// Availability is re-checked against operating hours right away, so reopening
/// outside the window leaves the partner closed.
#[utoipa::path(
    post,
    path = "/api/partners/{id}/reopen",
    params(
        ("id" = i64, Path, description = "Partner ID")
    ),
    responses(
        (status = 200, description = "Reopen processed", body = ApiResponse<PartnerResponseDto>),
        (status = 404, description = "Partner not found")
    ),
    tag = "partners"
)]
pub async fn reopen_partner(
    State(service): State<Arc<PartnerService>>,
    AppPath(id): AppPath<i64>,
) -> PartnerResponse {
    let partner = service.reopen(id).await?;
    let message = if partner.is_open {
        "Partner reopened"
    } else {
        "Partner is outside operating hours and remains closed"
    };
    ok(partner, Some(message))
}

/// Re-evaluate availability against operating hours
#[utoipa::path(
    post,
    path = "/api/partners/{id}/availability/refresh",
    params(
        ("id" = i64, Path, description = "Partner ID")
    ),
    responses(
        (status = 200, description = "Availability refreshed", body = ApiResponse<PartnerResponseDto>),
        (status = 404, description = "Partner not found")
    ),
    tag = "partners"
)]
pub async fn refresh_partner_availability(
    State(service): State<Arc<PartnerService>>,
    AppPath(id): AppPath<i64>,
) -> PartnerResponse {
    ok(service.refresh_availability(id).await?, None)
}

/// Add the category's default services
#[utoipa::path(
    post,
    path = "/api/partners/{id}/services/derive",
    params(
        ("id" = i64, Path, description = "Partner ID")
    ),
    responses(
        (status = 200, description = "Services derived", body = ApiResponse<PartnerResponseDto>),
        (status = 404, description = "Partner not found")
    ),
    tag = "partners"
)]
pub async fn derive_partner_services(
    State(service): State<Arc<PartnerService>>,
    AppPath(id): AppPath<i64>,
) -> PartnerResponse {
    ok(service.derive_services(id).await?, None)
}

/// Add extra services
#[utoipa::path(
    post,
    path = "/api/partners/{id}/services",
    params(
        ("id" = i64, Path, description = "Partner ID")
    ),
    request_body = AddServicesDto,
    responses(
        (status = 200, description = "Services added", body = ApiResponse<PartnerResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Partner not found")
    ),
    tag = "partners"
)]
pub async fn add_partner_services(
    State(service): State<Arc<PartnerService>>,
    AppPath(id): AppPath<i64>,
    AppJson(dto): AppJson<AddServicesDto>,
) -> PartnerResponse {
    ok(service.add_services(id, dto).await?, None)
}
