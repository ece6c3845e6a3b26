//! In-memory partner repository for service and handler tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::core::error::{AppError, Result};
use crate::features::partners::models::{
    CreatePartner, PartnerFilter, PartnerRecord, PartnerStatus,
};
use crate::features::partners::repositories::PartnerRepository;
use crate::shared::constants::DEFAULT_AVERAGE_RATING;

#[derive(Default)]
pub struct InMemoryPartnerRepository {
    partners: Mutex<Vec<PartnerRecord>>,
}

fn matches(filter: &PartnerFilter, partner: &PartnerRecord) -> bool {
    filter.status.is_none_or(|s| s == partner.status)
        && filter
            .service_category
            .is_none_or(|c| c == partner.service_category)
        && filter.is_open.is_none_or(|o| o == partner.is_open)
}

#[async_trait]
impl PartnerRepository for InMemoryPartnerRepository {
    async fn create(&self, data: &CreatePartner) -> Result<PartnerRecord> {
        let mut partners = self.partners.lock().unwrap();

        if partners.iter().any(|p| p.user_id == data.user_id) {
            return Err(AppError::Conflict(format!(
                "User {} already has a partner profile",
                data.user_id
            )));
        }

        let now = Utc::now();
        let partner = PartnerRecord {
            id: partners.iter().map(|p| p.id).max().unwrap_or(0) + 1,
            user_id: data.user_id,
            business_license: data.business_license.clone(),
            business_code: data.business_code.clone(),
            business_name: data.business_name.clone(),
            address: data.address.clone(),
            opening_time: data.opening_time,
            closing_time: data.closing_time,
            latitude: data.latitude,
            longitude: data.longitude,
            average_rating: DEFAULT_AVERAGE_RATING,
            is_open: true,
            service_category: data.service_category,
            services: data.services.clone(),
            image_url: data.image_url.clone(),
            status: PartnerStatus::default(),
            created_at: now,
            updated_at: now,
        };
        partners.push(partner.clone());

        Ok(partner)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<PartnerRecord>> {
        let partners = self.partners.lock().unwrap();
        Ok(partners.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_user_id(&self, user_id: i64) -> Result<Option<PartnerRecord>> {
        let partners = self.partners.lock().unwrap();
        Ok(partners.iter().find(|p| p.user_id == user_id).cloned())
    }

    async fn list(
        &self,
        filter: &PartnerFilter,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<PartnerRecord>, i64)> {
        let partners = self.partners.lock().unwrap();
        let matching: Vec<&PartnerRecord> =
            partners.iter().filter(|p| matches(filter, p)).collect();

        let page = matching
            .iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(0))
            .map(|p| (*p).clone())
            .collect();

        Ok((page, matching.len() as i64))
    }

    async fn save(&self, partner: &PartnerRecord) -> Result<PartnerRecord> {
        let mut partners = self.partners.lock().unwrap();
        let stored = partners
            .iter_mut()
            .find(|p| p.id == partner.id)
            .ok_or_else(|| AppError::NotFound(format!("Partner {} not found", partner.id)))?;

        *stored = PartnerRecord {
            user_id: stored.user_id,
            created_at: stored.created_at,
            updated_at: Utc::now(),
            ..partner.clone()
        };

        Ok(stored.clone())
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let mut partners = self.partners.lock().unwrap();
        let before = partners.len();
        partners.retain(|p| p.id != id);
        Ok(partners.len() < before)
    }
}
