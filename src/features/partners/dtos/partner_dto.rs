use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::partners::models::{
    PartnerFilter, PartnerRecord, PartnerStatus, ServiceCategory, ServiceType,
};
use crate::shared::types::Pagination;
use crate::shared::validation::BUSINESS_CODE_REGEX;

/// Request DTO for onboarding a partner
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePartnerDto {
    /// Owning user account (one partner per user)
    #[validate(range(min = 1, message = "User id must be positive"))]
    pub user_id: i64,

    #[validate(length(min = 1, max = 100, message = "Business license must be 1-100 characters"))]
    pub business_license: String,

    #[validate(regex(
        path = *BUSINESS_CODE_REGEX,
        message = "Business code must be alphanumeric segments separated by single hyphens"
    ))]
    pub business_code: Option<String>,

    #[validate(length(min = 1, max = 255, message = "Business name must be 1-255 characters"))]
    pub business_name: String,

    #[validate(length(min = 1, max = 500, message = "Address must be 1-500 characters"))]
    pub address: String,

    #[schema(value_type = String, example = "09:00:00")]
    pub opening_time: NaiveTime,

    #[schema(value_type = String, example = "18:00:00")]
    pub closing_time: NaiveTime,

    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0, message = "Longitude must be between -180 and 180"))]
    pub longitude: f64,

    pub service_category: ServiceCategory,

    /// Extra services on top of the category catalog
    #[serde(default)]
    pub services: Vec<ServiceType>,

    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: Option<String>,
}

/// Reads a present field as `Some`, so an explicit `null` becomes `Some(None)`
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Request DTO for a partial profile update. Absent fields are left unchanged.
///
/// `businessCode` and `imageUrl` are cleared by sending an explicit `null`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePartnerDto {
    #[validate(length(min = 1, max = 100, message = "Business license must be 1-100 characters"))]
    pub business_license: Option<String>,

    #[validate(regex(
        path = *BUSINESS_CODE_REGEX,
        message = "Business code must be alphanumeric segments separated by single hyphens"
    ))]
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>, nullable)]
    pub business_code: Option<Option<String>>,

    #[validate(length(min = 1, max = 255, message = "Business name must be 1-255 characters"))]
    pub business_name: Option<String>,

    #[validate(length(min = 1, max = 500, message = "Address must be 1-500 characters"))]
    pub address: Option<String>,

    #[schema(value_type = Option<String>, example = "09:00:00")]
    pub opening_time: Option<NaiveTime>,

    #[schema(value_type = Option<String>, example = "18:00:00")]
    pub closing_time: Option<NaiveTime>,

    #[validate(range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub latitude: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0, message = "Longitude must be between -180 and 180"))]
    pub longitude: Option<f64>,

    #[validate(url(message = "Image URL must be a valid URL"))]
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>, nullable)]
    pub image_url: Option<Option<String>>,
}

impl UpdatePartnerDto {
    /// Apply the present fields onto `partner`
    pub fn apply_to(self, partner: &mut PartnerRecord) {
        if let Some(business_license) = self.business_license {
            partner.business_license = business_license;
        }
        if let Some(business_code) = self.business_code {
            partner.business_code = business_code;
        }
        if let Some(business_name) = self.business_name {
            partner.business_name = business_name;
        }
        if let Some(address) = self.address {
            partner.address = address;
        }
        if let Some(opening_time) = self.opening_time {
            partner.opening_time = opening_time;
        }
        if let Some(closing_time) = self.closing_time {
            partner.closing_time = closing_time;
        }
        if let Some(latitude) = self.latitude {
            partner.latitude = latitude;
        }
        if let Some(longitude) = self.longitude {
            partner.longitude = longitude;
        }
        if let Some(image_url) = self.image_url {
            partner.image_url = image_url;
        }
    }
}

/// Request DTO for a moderation decision
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePartnerStatusDto {
    pub status: PartnerStatus,
}

/// Request DTO pushed by the rating aggregator
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePartnerRatingDto {
    #[validate(range(min = 0.0, max = 5.0, message = "Rating must be between 0 and 5"))]
    pub average_rating: f64,
}

/// Request DTO for extending a partner's service set
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddServicesDto {
    #[validate(length(min = 1, message = "At least one service is required"))]
    pub services: Vec<ServiceType>,
}

/// Query params for listing partners
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(rename_all = "camelCase")]
pub struct ListPartnersQuery {
    /// Page number (1-indexed, default: 1)
    #[param(minimum = 1)]
    pub page: Option<i64>,

    /// Number of items per page (default: 10, max: 100)
    #[param(minimum = 1, maximum = 100)]
    pub page_size: Option<i64>,

    pub status: Option<PartnerStatus>,

    pub service_category: Option<ServiceCategory>,

    pub is_open: Option<bool>,
}

impl ListPartnersQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.page_size)
    }

    pub fn filter(&self) -> PartnerFilter {
        PartnerFilter {
            status: self.status,
            service_category: self.service_category,
            is_open: self.is_open,
        }
    }
}

/// Response DTO for partner
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PartnerResponseDto {
    pub id: i64,
    pub user_id: i64,
    pub business_license: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_code: Option<String>,
    pub business_name: String,
    pub address: String,
    #[schema(value_type = String, example = "09:00:00")]
    pub opening_time: NaiveTime,
    #[schema(value_type = String, example = "18:00:00")]
    pub closing_time: NaiveTime,
    pub latitude: f64,
    pub longitude: f64,
    pub average_rating: f64,
    pub is_open: bool,
    /// Whether the current time falls inside the operating window
    pub within_operating_hours: bool,
    pub service_category: ServiceCategory,
    pub services: Vec<ServiceType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub status: PartnerStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PartnerResponseDto {
    pub fn new(partner: PartnerRecord, now: NaiveTime) -> Self {
        let within_operating_hours = partner.is_within_operating_hours(now);

        Self {
            id: partner.id,
            user_id: partner.user_id,
            business_license: partner.business_license,
            business_code: partner.business_code,
            business_name: partner.business_name,
            address: partner.address,
            opening_time: partner.opening_time,
            closing_time: partner.closing_time,
            latitude: partner.latitude,
            longitude: partner.longitude,
            average_rating: partner.average_rating,
            is_open: partner.is_open,
            within_operating_hours,
            service_category: partner.service_category,
            services: partner.services.into_iter().collect(),
            image_url: partner.image_url,
            status: partner.status,
            created_at: partner.created_at,
            updated_at: partner.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_body() -> serde_json::Value {
        json!({
            "userId": 7,
            "businessLicense": "LIC-2024-0007",
            "businessCode": "0101234567-001",
            "businessName": "Happy Paws Spa",
            "address": "12 Nguyen Hue, District 1",
            "openingTime": "08:00:00",
            "closingTime": "20:00:00",
            "latitude": 10.7769,
            "longitude": 106.7009,
            "serviceCategory": "PET_CARE"
        })
    }

    #[test]
    fn test_create_dto_parses_and_validates() {
        let dto: CreatePartnerDto = serde_json::from_value(create_body()).unwrap();

        assert!(dto.validate().is_ok());
        assert!(dto.services.is_empty());
        assert_eq!(dto.service_category, ServiceCategory::PetCare);
        assert_eq!(dto.opening_time, NaiveTime::from_hms_opt(8, 0, 0).unwrap());
    }

    #[test]
    fn test_create_dto_rejects_invalid_fields() {
        let mut body = create_body();
        body["businessLicense"] = json!("");
        body["latitude"] = json!(91.0);
        body["businessCode"] = json!("bad code");
        let dto: CreatePartnerDto = serde_json::from_value(body).unwrap();

        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("business_license"));
        assert!(fields.contains_key("latitude"));
        assert!(fields.contains_key("business_code"));
    }

    #[test]
    fn test_unknown_service_category_is_rejected() {
        let mut body = create_body();
        body["serviceCategory"] = json!("GROCERY");
        assert!(serde_json::from_value::<CreatePartnerDto>(body).is_err());
    }

    #[test]
    fn test_rating_dto_bounds() {
        assert!(UpdatePartnerRatingDto { average_rating: 4.5 }.validate().is_ok());
        assert!(UpdatePartnerRatingDto { average_rating: 5.5 }.validate().is_err());
        assert!(UpdatePartnerRatingDto { average_rating: -0.1 }.validate().is_err());
    }

    #[test]
    fn test_add_services_requires_one_entry() {
        let dto = AddServicesDto { services: vec![] };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_update_dto_applies_only_present_fields() {
        let dto: UpdatePartnerDto = serde_json::from_value(json!({
            "businessName": "Happy Paws Clinic",
            "closingTime": "21:30:00"
        }))
        .unwrap();
        assert!(dto.validate().is_ok());

        let before: CreatePartnerDto = serde_json::from_value(create_body()).unwrap();
        let mut partner = PartnerRecord {
            id: 1,
            user_id: before.user_id,
            business_license: before.business_license,
            business_code: before.business_code,
            business_name: before.business_name,
            address: before.address.clone(),
            opening_time: before.opening_time,
            closing_time: before.closing_time,
            latitude: before.latitude,
            longitude: before.longitude,
            average_rating: 0.0,
            is_open: true,
            service_category: before.service_category,
            services: Default::default(),
            image_url: None,
            status: PartnerStatus::Pending,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        dto.apply_to(&mut partner);

        assert_eq!(partner.business_name, "Happy Paws Clinic");
        assert_eq!(partner.closing_time, NaiveTime::from_hms_opt(21, 30, 0).unwrap());
        assert_eq!(partner.address, before.address);
        assert_eq!(partner.opening_time, before.opening_time);
    }

    fn stored_partner() -> PartnerRecord {
        let dto: CreatePartnerDto = serde_json::from_value(create_body()).unwrap();
        PartnerRecord {
            id: 1,
            user_id: dto.user_id,
            business_license: dto.business_license,
            business_code: dto.business_code,
            business_name: dto.business_name,
            address: dto.address,
            opening_time: dto.opening_time,
            closing_time: dto.closing_time,
            latitude: dto.latitude,
            longitude: dto.longitude,
            average_rating: 0.0,
            is_open: true,
            service_category: dto.service_category,
            services: Default::default(),
            image_url: Some("https://cdn.example.com/paws.png".to_string()),
            status: PartnerStatus::Pending,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_update_dto_null_clears_optional_fields() {
        let dto: UpdatePartnerDto = serde_json::from_value(json!({
            "businessCode": null,
            "imageUrl": null
        }))
        .unwrap();
        assert_eq!(dto.business_code, Some(None));
        assert_eq!(dto.image_url, Some(None));
        assert!(dto.validate().is_ok());

        let mut partner = stored_partner();
        dto.apply_to(&mut partner);

        assert_eq!(partner.business_code, None);
        assert_eq!(partner.image_url, None);
    }

    #[test]
    fn test_update_dto_absent_optional_fields_are_kept() {
        let dto: UpdatePartnerDto =
            serde_json::from_value(json!({ "businessName": "Renamed" })).unwrap();
        assert_eq!(dto.business_code, None);

        let mut partner = stored_partner();
        dto.apply_to(&mut partner);

        assert_eq!(partner.business_code.as_deref(), Some("0101234567-001"));
        assert!(partner.image_url.is_some());
    }

    #[test]
    fn test_update_dto_validates_replacement_code() {
        let dto: UpdatePartnerDto =
            serde_json::from_value(json!({ "businessCode": "01--01" })).unwrap();
        assert!(dto.validate().is_err());

        let dto: UpdatePartnerDto =
            serde_json::from_value(json!({ "imageUrl": "https://cdn.example.com/new.png" }))
                .unwrap();
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_list_query_builds_filter_and_pagination() {
        let query = ListPartnersQuery {
            page: Some(2),
            page_size: Some(20),
            status: Some(PartnerStatus::Approved),
            service_category: None,
            is_open: Some(true),
        };

        assert_eq!(query.pagination().offset(), 20);
        let filter = query.filter();
        assert_eq!(filter.status, Some(PartnerStatus::Approved));
        assert_eq!(filter.is_open, Some(true));
        assert!(filter.service_category.is_none());
    }
}
