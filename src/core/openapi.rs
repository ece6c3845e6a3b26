use utoipa::{Modify, OpenApi};

use crate::features::partners::{dtos as partners_dtos, handlers as partners_handlers, models};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Partners
        partners_handlers::create_partner,
        partners_handlers::list_partners,
        partners_handlers::get_partner,
        partners_handlers::get_partner_by_user,
        partners_handlers::update_partner,
        partners_handlers::delete_partner,
        partners_handlers::update_partner_status,
        partners_handlers::update_partner_rating,
        partners_handlers::close_partner,
        partners_handlers::reopen_partner,
        partners_handlers::refresh_partner_availability,
        partners_handlers::derive_partner_services,
        partners_handlers::add_partner_services,
    ),
    components(
        schemas(
            Meta,
            models::PartnerStatus,
            models::ServiceCategory,
            models::ServiceType,
            partners_dtos::CreatePartnerDto,
            partners_dtos::UpdatePartnerDto,
            partners_dtos::UpdatePartnerStatusDto,
            partners_dtos::UpdatePartnerRatingDto,
            partners_dtos::AddServicesDto,
            partners_dtos::PartnerResponseDto,
            ApiResponse<partners_dtos::PartnerResponseDto>,
            ApiResponse<Vec<partners_dtos::PartnerResponseDto>>,
        )
    ),
    tags(
        (name = "partners", description = "Pet-care and veterinary partner profiles"),
    ),
    info(
        title = "Pet-care Partners API",
        version = "0.1.0",
        description = "API documentation for pet-care and veterinary partners",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
