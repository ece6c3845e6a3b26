use std::collections::BTreeSet;
use std::sync::Arc;

use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::partners::dtos::{
    AddServicesDto, CreatePartnerDto, ListPartnersQuery, PartnerResponseDto, UpdatePartnerDto,
    UpdatePartnerRatingDto, UpdatePartnerStatusDto,
};
use crate::features::partners::models::{CreatePartner, PartnerRecord};
use crate::features::partners::repositories::PartnerRepository;
use crate::shared::clock::Clock;
use crate::shared::types::Meta;

/// Service for partner onboarding, moderation and availability
pub struct PartnerService {
    repository: Arc<dyn PartnerRepository>,
    clock: Arc<dyn Clock>,
}

impl PartnerService {
    pub fn new(repository: Arc<dyn PartnerRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    fn to_response(&self, partner: PartnerRecord) -> PartnerResponseDto {
        PartnerResponseDto::new(partner, self.clock.time_of_day())
    }

    fn warn_if_overnight(partner_id: i64, partner: &PartnerRecord) {
        if partner.has_overnight_hours() {
            tracing::warn!(
                "Partner {} closes ({}) before it opens ({}); overnight windows are not supported and will always evaluate as closed",
                partner_id,
                partner.closing_time,
                partner.opening_time
            );
        }
    }

    async fn load(&self, id: i64) -> Result<PartnerRecord> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Partner {} not found", id)))
    }

    /// Apply `change` to a stored partner and persist the result
    async fn mutate<F>(&self, id: i64, change: F) -> Result<PartnerResponseDto>
    where
        F: FnOnce(&mut PartnerRecord) + Send,
    {
        let mut partner = self.load(id).await?;
        change(&mut partner);
        let saved = self.repository.save(&partner).await?;
        Ok(self.to_response(saved))
    }

    /// Onboard a new partner. Services start as the category catalog plus any requested extras.
    pub async fn create(&self, dto: CreatePartnerDto) -> Result<PartnerResponseDto> {
        dto.validate()?;

        let mut services: BTreeSet<_> = dto.services.into_iter().collect();
        services.extend(dto.service_category.default_services().iter().copied());

        let data = CreatePartner {
            user_id: dto.user_id,
            business_license: dto.business_license,
            business_code: dto.business_code,
            business_name: dto.business_name,
            address: dto.address,
            opening_time: dto.opening_time,
            closing_time: dto.closing_time,
            latitude: dto.latitude,
            longitude: dto.longitude,
            service_category: dto.service_category,
            services,
            image_url: dto.image_url,
        };

        let partner = self.repository.create(&data).await?;
        Self::warn_if_overnight(partner.id, &partner);

        tracing::info!(
            "Partner created: id={}, user_id={}, category={}",
            partner.id,
            partner.user_id,
            partner.service_category
        );

        Ok(self.to_response(partner))
    }

    pub async fn get(&self, id: i64) -> Result<PartnerResponseDto> {
        let partner = self.load(id).await?;
        Ok(self.to_response(partner))
    }

    /// Look up the partner owned by a user account
    pub async fn get_by_user(&self, user_id: i64) -> Result<PartnerResponseDto> {
        let partner = self
            .repository
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No partner for user {}", user_id)))?;
        Ok(self.to_response(partner))
    }

    pub async fn list(&self, query: &ListPartnersQuery) -> Result<(Vec<PartnerResponseDto>, Meta)> {
        let pagination = query.pagination();
        let (partners, total) = self
            .repository
            .list(&query.filter(), pagination.limit(), pagination.offset())
            .await?;

        let dtos = partners.into_iter().map(|p| self.to_response(p)).collect();
        Ok((dtos, Meta::paginated(total, &pagination)))
    }

    pub async fn update_profile(&self, id: i64, dto: UpdatePartnerDto) -> Result<PartnerResponseDto> {
        dto.validate()?;

        let mut partner = self.load(id).await?;
        dto.apply_to(&mut partner);
        Self::warn_if_overnight(id, &partner);

        let saved = self.repository.save(&partner).await?;
        tracing::info!("Partner profile updated: id={}", id);
        Ok(self.to_response(saved))
    }

    /// Record a moderation decision
    pub async fn update_status(
        &self,
        id: i64,
        dto: UpdatePartnerStatusDto,
    ) -> Result<PartnerResponseDto> {
        let response = self.mutate(id, |p| p.status = dto.status).await?;
        tracing::info!("Partner status updated: id={}, status={}", id, dto.status);
        Ok(response)
    }

    pub async fn update_rating(
        &self,
        id: i64,
        dto: UpdatePartnerRatingDto,
    ) -> Result<PartnerResponseDto> {
        dto.validate()?;
        self.mutate(id, |p| p.average_rating = dto.average_rating)
            .await
    }

    pub async fn close_early(&self, id: i64) -> Result<PartnerResponseDto> {
        let response = self.mutate(id, PartnerRecord::close_service_early).await?;
        tracing::info!("Partner closed early: id={}", id);
        Ok(response)
    }

    pub async fn reopen(&self, id: i64) -> Result<PartnerResponseDto> {
        let clock = Arc::clone(&self.clock);
        let response = self
            .mutate(id, move |p| p.reopen_service(&*clock))
            .await?;

        if response.is_open {
            tracing::info!("Partner reopened: id={}", id);
        } else {
            tracing::info!("Partner reopen requested outside operating hours: id={}", id);
        }
        Ok(response)
    }

    /// Re-evaluate `is_open` against operating hours
    pub async fn refresh_availability(&self, id: i64) -> Result<PartnerResponseDto> {
        let clock = Arc::clone(&self.clock);
        self.mutate(id, move |p| p.update_is_open_status(&*clock))
            .await
    }

    pub async fn derive_services(&self, id: i64) -> Result<PartnerResponseDto> {
        self.mutate(id, PartnerRecord::derive_services_by_category)
            .await
    }

    pub async fn add_services(&self, id: i64, dto: AddServicesDto) -> Result<PartnerResponseDto> {
        dto.validate()?;
        self.mutate(id, |p| p.services.extend(dto.services)).await
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        if !self.repository.delete(id).await? {
            return Err(AppError::NotFound(format!("Partner {} not found", id)));
        }

        tracing::info!("Partner deleted: id={}", id);
        Ok(())
    }
}
