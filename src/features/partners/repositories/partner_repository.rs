use async_trait::async_trait;
use sqlx::{postgres::PgRow, FromRow, PgPool, Postgres, Row};

use crate::core::database::is_unique_violation;
use crate::core::error::{AppError, Result};
use crate::features::partners::models::{
    CreatePartner, PartnerFilter, PartnerRecord, PartnerStatus, ServiceType,
};
use crate::shared::constants::DEFAULT_AVERAGE_RATING;

const PARTNER_COLUMNS: &str = r#"
    id, user_id, business_license, business_code, business_name, address,
    opening_time, closing_time, latitude, longitude, average_rating, is_open,
    service_category, services, image_url, status, created_at, updated_at
"#;

// $1 status, $2 service_category, $3 is_open; NULL disables a filter
const PARTNER_FILTER: &str = r#"
    ($1::partner_status IS NULL OR status = $1)
    AND ($2::service_category IS NULL OR service_category = $2)
    AND ($3::boolean IS NULL OR is_open = $3)
"#;

/// Persistence operations for partners
#[async_trait]
pub trait PartnerRepository: Send + Sync {
    async fn create(&self, data: &CreatePartner) -> Result<PartnerRecord>;

    async fn find_by_id(&self, id: i64) -> Result<Option<PartnerRecord>>;

    /// Inverse of the partner -> user link, answered by the unique `user_id` index
    async fn find_by_user_id(&self, user_id: i64) -> Result<Option<PartnerRecord>>;

    /// Returns one page of partners and the total matching the filter
    async fn list(
        &self,
        filter: &PartnerFilter,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<PartnerRecord>, i64)>;

    /// Overwrite every mutable column of an existing partner. Last write wins.
    async fn save(&self, partner: &PartnerRecord) -> Result<PartnerRecord>;

    /// Returns false when no row matched
    async fn delete(&self, id: i64) -> Result<bool>;
}

/// PostgreSQL-backed partner repository
pub struct PgPartnerRepository {
    pool: PgPool,
}

impl PgPartnerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PartnerRepository for PgPartnerRepository {
    async fn create(&self, data: &CreatePartner) -> Result<PartnerRecord> {
        let services: Vec<ServiceType> = data.services.iter().copied().collect();

        let sql = format!(
            r#"
            INSERT INTO partners (
                user_id, business_license, business_code, business_name, address,
                opening_time, closing_time, latitude, longitude, average_rating, is_open,
                service_category, services, image_url, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, TRUE, $11, $12, $13, $14)
            RETURNING {PARTNER_COLUMNS}
            "#
        );

        let partner = sqlx::query_as::<Postgres, PartnerRecord>(&sql)
            .bind(data.user_id)
            .bind(&data.business_license)
            .bind(&data.business_code)
            .bind(&data.business_name)
            .bind(&data.address)
            .bind(data.opening_time)
            .bind(data.closing_time)
            .bind(data.latitude)
            .bind(data.longitude)
            .bind(DEFAULT_AVERAGE_RATING)
            .bind(data.service_category)
            .bind(services)
            .bind(&data.image_url)
            .bind(PartnerStatus::default())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    return AppError::Conflict(format!(
                        "User {} already has a partner profile",
                        data.user_id
                    ));
                }
                tracing::error!("Failed to create partner: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(partner)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<PartnerRecord>> {
        let sql = format!("SELECT {PARTNER_COLUMNS} FROM partners WHERE id = $1");

        sqlx::query_as::<Postgres, PartnerRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get partner by id: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn find_by_user_id(&self, user_id: i64) -> Result<Option<PartnerRecord>> {
        let sql = format!("SELECT {PARTNER_COLUMNS} FROM partners WHERE user_id = $1");

        sqlx::query_as::<Postgres, PartnerRecord>(&sql)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get partner by user id: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn list(
        &self,
        filter: &PartnerFilter,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<PartnerRecord>, i64)> {
        let count_sql = format!("SELECT COUNT(*) FROM partners WHERE {PARTNER_FILTER}");
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(filter.status)
            .bind(filter.service_category)
            .bind(filter.is_open)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to count partners: {:?}", e);
                AppError::Database(e)
            })?;

        let list_sql = format!(
            r#"
            SELECT {PARTNER_COLUMNS}
            FROM partners
            WHERE {PARTNER_FILTER}
            ORDER BY id
            LIMIT $4 OFFSET $5
            "#
        );
        let partners = sqlx::query_as::<Postgres, PartnerRecord>(&list_sql)
            .bind(filter.status)
            .bind(filter.service_category)
            .bind(filter.is_open)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list partners: {:?}", e);
                AppError::Database(e)
            })?;

        Ok((partners, total))
    }

    async fn save(&self, partner: &PartnerRecord) -> Result<PartnerRecord> {
        let services: Vec<ServiceType> = partner.services.iter().copied().collect();

        let sql = format!(
            r#"
            UPDATE partners
            SET
                business_license = $2,
                business_code = $3,
                business_name = $4,
                address = $5,
                opening_time = $6,
                closing_time = $7,
                latitude = $8,
                longitude = $9,
                average_rating = $10,
                is_open = $11,
                service_category = $12,
                services = $13,
                image_url = $14,
                status = $15,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {PARTNER_COLUMNS}
            "#
        );

        sqlx::query_as::<Postgres, PartnerRecord>(&sql)
            .bind(partner.id)
            .bind(&partner.business_license)
            .bind(&partner.business_code)
            .bind(&partner.business_name)
            .bind(&partner.address)
            .bind(partner.opening_time)
            .bind(partner.closing_time)
            .bind(partner.latitude)
            .bind(partner.longitude)
            .bind(partner.average_rating)
            .bind(partner.is_open)
            .bind(partner.service_category)
            .bind(services)
            .bind(&partner.image_url)
            .bind(partner.status)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update partner: {:?}", e);
                AppError::Database(e)
            })?
            .ok_or_else(|| AppError::NotFound(format!("Partner {} not found", partner.id)))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM partners WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete partner: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(result.rows_affected() > 0)
    }
}

impl<'r> FromRow<'r, PgRow> for PartnerRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            business_license: row.try_get("business_license")?,
            business_code: row.try_get("business_code")?,
            business_name: row.try_get("business_name")?,
            address: row.try_get("address")?,
            opening_time: row.try_get("opening_time")?,
            closing_time: row.try_get("closing_time")?,
            latitude: row.try_get("latitude")?,
            longitude: row.try_get("longitude")?,
            average_rating: row.try_get("average_rating")?,
            is_open: row.try_get("is_open")?,
            service_category: row.try_get("service_category")?,
            services: row
                .try_get::<Vec<ServiceType>, _>("services")?
                .into_iter()
                .collect(),
            image_url: row.try_get("image_url")?,
            status: row.try_get("status")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}
