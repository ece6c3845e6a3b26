use std::collections::BTreeSet;

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Type;
use utoipa::ToSchema;

use crate::features::partners::models::{ServiceCategory, ServiceType};
use crate::shared::clock::Clock;

/// Moderation state of a partner, matching database enum
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "partner_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PartnerStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl std::fmt::Display for PartnerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PartnerStatus::Pending => write!(f, "PENDING"),
            PartnerStatus::Approved => write!(f, "APPROVED"),
            PartnerStatus::Rejected => write!(f, "REJECTED"),
        }
    }
}

/// Pet-care or veterinary business registered on the platform.
///
/// `user_id` is the owning side of the one-to-one link to a user account.
/// The reverse direction is answered by a lookup on `user_id`, never by a
/// back-pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct PartnerRecord {
    pub id: i64,
    pub user_id: i64,
    pub business_license: String,
    pub business_code: Option<String>,
    pub business_name: String,
    pub address: String,
    pub opening_time: NaiveTime,
    pub closing_time: NaiveTime,
    pub latitude: f64,
    pub longitude: f64,
    pub average_rating: f64,
    pub is_open: bool,
    pub service_category: ServiceCategory,
    pub services: BTreeSet<ServiceType>,
    pub image_url: Option<String>,
    pub status: PartnerStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PartnerRecord {
    /// Inclusive check of `now` against the opening/closing window.
    ///
    /// Windows crossing midnight (closing before opening) never match.
    pub fn is_within_operating_hours(&self, now: NaiveTime) -> bool {
        now >= self.opening_time && now <= self.closing_time
    }

    /// True when the closing time is earlier than the opening time
    pub fn has_overnight_hours(&self) -> bool {
        self.closing_time < self.opening_time
    }

    /// Recompute `is_open` against the current time. A closed partner stays closed.
    pub fn update_is_open_status(&mut self, clock: &dyn Clock) {
        if self.is_open {
            self.is_open = self.is_within_operating_hours(clock.time_of_day());
        }
    }

    /// Union the category's default catalog into `services`.
    pub fn derive_services_by_category(&mut self) {
        self.services
            .extend(self.service_category.default_services().iter().copied());
    }

    pub fn close_service_early(&mut self) {
        self.is_open = false;
    }

    /// Reopen a closed partner, then immediately re-check operating hours.
    pub fn reopen_service(&mut self, clock: &dyn Clock) {
        if !self.is_open {
            self.is_open = true;
            self.update_is_open_status(clock);
        }
    }
}

/// Data for onboarding a new partner
#[derive(Debug, Clone)]
pub struct CreatePartner {
    pub user_id: i64,
    pub business_license: String,
    pub business_code: Option<String>,
    pub business_name: String,
    pub address: String,
    pub opening_time: NaiveTime,
    pub closing_time: NaiveTime,
    pub latitude: f64,
    pub longitude: f64,
    pub service_category: ServiceCategory,
    pub services: BTreeSet<ServiceType>,
    pub image_url: Option<String>,
}

/// Optional filters for listing partners
#[derive(Debug, Clone, Default)]
pub struct PartnerFilter {
    pub status: Option<PartnerStatus>,
    pub service_category: Option<ServiceCategory>,
    pub is_open: Option<bool>,
}
