//! PostgreSQL Repository Implementations

use crate::domain::entities::{AuditRecord, Farmer};
use crate::domain::repository::{AuditRepository, FarmerRepository};
use crate::domain::value_objects::{Height, ResponseHash};
use crate::error::FarmerResult;
use chrono::{DateTime, Utc};
use platform::address::Address;
use sqlx::PgPool;

/// PostgreSQL-backed repository
#[derive(Clone)]
pub struct PgFarmerRepository {
    pool: PgPool,
}

impl PgFarmerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl FarmerRepository for PgFarmerRepository {
    async fn insert_farmer(&self, farmer: &Farmer) -> FarmerResult<bool> {
        let inserted = sqlx::query(
            r#"
            INSERT INTO farmers (
                address,
                payout_address,
                height,
                last_seen,
                registered_at
            ) VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (address) DO NOTHING
            "#,
        )
        .bind(farmer.address.as_str())
        .bind(farmer.payout_address.as_str())
        .bind(farmer.height.to_db())
        .bind(farmer.last_seen)
        .bind(farmer.registered_at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(inserted == 1)
    }

    async fn find_farmer(&self, address: &Address) -> FarmerResult<Option<Farmer>> {
        let row = sqlx::query_as::<_, FarmerRow>(
            r#"
            SELECT address, payout_address, height, last_seen, registered_at
            FROM farmers
            WHERE address = $1
            "#,
        )
        .bind(address.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(FarmerRow::into_farmer))
    }

    async fn touch_farmer(&self, address: &Address, seen_at: DateTime<Utc>) -> FarmerResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE farmers
            SET last_seen = GREATEST(last_seen, $2)
            WHERE address = $1
            "#,
        )
        .bind(address.as_str())
        .bind(seen_at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated == 1)
    }

    async fn update_height(
        &self,
        address: &Address,
        height: Height,
        seen_at: DateTime<Utc>,
    ) -> FarmerResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE farmers
            SET height = $2, last_seen = GREATEST(last_seen, $3)
            WHERE address = $1
            "#,
        )
        .bind(address.as_str())
        .bind(height.to_db())
        .bind(seen_at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated == 1)
    }

    async fn list_farmers(&self) -> FarmerResult<Vec<Farmer>> {
        let rows = sqlx::query_as::<_, FarmerRow>(
            r#"
            SELECT address, payout_address, height, last_seen, registered_at
            FROM farmers
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(FarmerRow::into_farmer).collect())
    }

    async fn count_farmers(&self) -> FarmerResult<u64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM farmers")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.max(0) as u64)
    }
}

impl AuditRepository for PgFarmerRepository {
    async fn insert_audit(&self, audit: &AuditRecord) -> FarmerResult<bool> {
        let inserted = sqlx::query(
            r#"
            INSERT INTO audits (
                address,
                height,
                response_hash,
                recorded_at
            ) VALUES ($1, $2, $3, $4)
            ON CONFLICT (address, height) DO NOTHING
            "#,
        )
        .bind(audit.address.as_str())
        .bind(audit.height.to_db())
        .bind(audit.response_hash.as_str())
        .bind(audit.recorded_at)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(inserted == 1)
    }

    async fn find_audit(
        &self,
        address: &Address,
        height: Height,
    ) -> FarmerResult<Option<AuditRecord>> {
        let row = sqlx::query_as::<_, AuditRow>(
            r#"
            SELECT address, height, response_hash, recorded_at
            FROM audits
            WHERE address = $1 AND height = $2
            "#,
        )
        .bind(address.as_str())
        .bind(height.to_db())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(AuditRow::into_audit))
    }
}

// Internal row types for sqlx mapping
#[derive(sqlx::FromRow)]
struct FarmerRow {
    address: String,
    payout_address: String,
    height: i64,
    last_seen: Option<DateTime<Utc>>,
    registered_at: DateTime<Utc>,
}

impl FarmerRow {
    fn into_farmer(self) -> Farmer {
        Farmer {
            address: Address::from_db(self.address),
            payout_address: Address::from_db(self.payout_address),
            height: Height::from_db(self.height),
            last_seen: self.last_seen,
            registered_at: self.registered_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AuditRow {
    address: String,
    height: i64,
    response_hash: String,
    recorded_at: DateTime<Utc>,
}

impl AuditRow {
    fn into_audit(self) -> AuditRecord {
        AuditRecord {
            address: Address::from_db(self.address),
            height: Height::from_db(self.height),
            response_hash: ResponseHash::from_db(self.response_hash),
            recorded_at: self.recorded_at,
        }
    }
}
