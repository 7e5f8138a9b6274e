//! # Bank Code Repository
//!
//! Database operations for SWIFT code records.
//!
//! ## Key Operations
//! - Exact lookup by code (primary key)
//! - Branch expansion by 8-character prefix
//! - Country listing
//! - Single and batched inserts
//!
//! ## Prefix Lookup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  get_branches_by_prefix("BPKOPLPWXXX")                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  WHERE substr(code, 1, 8) = 'BPKOPLPW'   ← idx_swift_codes_prefix      │
//! │    AND code <> 'BPKOPLPWXXX'                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BPKOPLPWKAT ✓   BPKOPLPWWAR ✓   BPKOPLPWXXX ✗ (the HQ itself)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Listings are ordered by code so responses are stable.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use swift_core::{BankCode, BankCodeSummary, RecordStore, StoreError, StoreResult};

use crate::error::{DbError, DbResult};

// =============================================================================
// Row Types
// =============================================================================

#[derive(Debug, FromRow)]
struct BankCodeRow {
    code: String,
    bank_name: String,
    address: String,
    country_iso2: String,
    country_name: String,
    is_headquarter: bool,
    town_name: Option<String>,
}

impl From<BankCodeRow> for BankCode {
    fn from(row: BankCodeRow) -> Self {
        BankCode {
            code: row.code,
            bank_name: row.bank_name,
            address: row.address,
            country_iso2: row.country_iso2,
            country_name: row.country_name,
            is_headquarter: row.is_headquarter,
            town_name: row.town_name,
        }
    }
}

#[derive(Debug, FromRow)]
struct SummaryRow {
    code: String,
    bank_name: String,
    address: String,
    country_iso2: String,
    is_headquarter: bool,
}

impl From<SummaryRow> for BankCodeSummary {
    fn from(row: SummaryRow) -> Self {
        BankCodeSummary {
            code: row.code,
            bank_name: row.bank_name,
            address: row.address,
            country_iso2: row.country_iso2,
            is_headquarter: row.is_headquarter,
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for SWIFT code records.
///
/// Stores exactly what it is given: normalization and validation happen in
/// `swift_core::RegistryService` before any write reaches this type.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.bank_codes();
///
/// let hq = repo.find_by_code("BPKOPLPWXXX").await?;
/// let total = repo.count().await?;
/// ```
#[derive(Debug, Clone)]
pub struct BankCodeRepository {
    pool: SqlitePool,
}

impl BankCodeRepository {
    /// Creates a new BankCodeRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BankCodeRepository { pool }
    }

    /// Gets a record by exact code.
    ///
    /// ## Returns
    /// * `Ok(Some(BankCode))` - Record found
    /// * `Ok(None)` - No such code
    pub async fn find_by_code(&self, code: &str) -> DbResult<Option<BankCode>> {
        let row = sqlx::query_as::<_, BankCodeRow>(
            r#"
            SELECT code, bank_name, address, country_iso2, country_name,
                   is_headquarter, town_name
            FROM swift_codes
            WHERE code = ?1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(BankCode::from))
    }

    /// Lists records sharing `code`'s 8-character prefix, excluding `code`.
    pub async fn list_branches(&self, code: &str) -> DbResult<Vec<BankCodeSummary>> {
        let rows = sqlx::query_as::<_, SummaryRow>(
            r#"
            SELECT code, bank_name, address, country_iso2, is_headquarter
            FROM swift_codes
            WHERE substr(code, 1, 8) = substr(?1, 1, 8)
              AND code <> ?1
            ORDER BY code
            "#,
        )
        .bind(code)
        .fetch_all(&self.pool)
        .await?;

        debug!(code = %code, count = rows.len(), "Listed branches");
        Ok(rows.into_iter().map(BankCodeSummary::from).collect())
    }

    /// Lists every record for a country.
    pub async fn list_by_country(&self, iso2: &str) -> DbResult<Vec<BankCodeSummary>> {
        let rows = sqlx::query_as::<_, SummaryRow>(
            r#"
            SELECT code, bank_name, address, country_iso2, is_headquarter
            FROM swift_codes
            WHERE country_iso2 = ?1
            ORDER BY code
            "#,
        )
        .bind(iso2)
        .fetch_all(&self.pool)
        .await?;

        debug!(country = %iso2, count = rows.len(), "Listed country");
        Ok(rows.into_iter().map(BankCodeSummary::from).collect())
    }

    /// Returns the country name stored with `iso2`, if any row has it.
    pub async fn find_country_name(&self, iso2: &str) -> DbResult<Option<String>> {
        let name: Option<String> = sqlx::query_scalar(
            r#"
            SELECT country_name
            FROM swift_codes
            WHERE country_iso2 = ?1
            ORDER BY code
            LIMIT 1
            "#,
        )
        .bind(iso2)
        .fetch_optional(&self.pool)
        .await?;

        Ok(name)
    }

    /// Inserts a single record.
    ///
    /// ## Errors
    /// * `DbError::UniqueViolation` - The code is already stored
    pub async fn create(&self, record: &BankCode) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO swift_codes (
                code, bank_name, address, country_iso2, country_name,
                is_headquarter, town_name, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&record.code)
        .bind(&record.bank_name)
        .bind(&record.address)
        .bind(&record.country_iso2)
        .bind(&record.country_name)
        .bind(record.is_headquarter)
        .bind(&record.town_name)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { field, .. } => DbError::duplicate(field, &record.code),
            other => other,
        })?;

        debug!(code = %record.code, "Inserted SWIFT code");
        Ok(())
    }

    /// Inserts many records in one transaction, skipping codes already stored.
    ///
    /// ## Returns
    /// Number of rows actually inserted.
    pub async fn insert_batch(&self, records: &[BankCode]) -> DbResult<u64> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;

        for record in records {
            let result = sqlx::query(
                r#"
                INSERT INTO swift_codes (
                    code, bank_name, address, country_iso2, country_name,
                    is_headquarter, town_name, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                ON CONFLICT(code) DO NOTHING
                "#,
            )
            .bind(&record.code)
            .bind(&record.bank_name)
            .bind(&record.address)
            .bind(&record.country_iso2)
            .bind(&record.country_name)
            .bind(record.is_headquarter)
            .bind(&record.town_name)
            .bind(now)
            .execute(&mut *tx)
            .await?;

            inserted += result.rows_affected();
        }

        tx.commit().await?;

        debug!(
            offered = records.len(),
            inserted = inserted,
            "Batch insert committed"
        );
        Ok(inserted)
    }

    /// Deletes by exact code.
    ///
    /// ## Returns
    /// Number of rows removed (0 or 1).
    pub async fn remove(&self, code: &str) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM swift_codes WHERE code = ?1")
            .bind(code)
            .execute(&self.pool)
            .await?;

        debug!(code = %code, removed = result.rows_affected(), "Deleted SWIFT code");
        Ok(result.rows_affected())
    }

    /// Counts stored records.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM swift_codes")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// RecordStore Port
// =============================================================================

#[async_trait]
impl RecordStore for BankCodeRepository {
    async fn get_by_code(&self, code: &str) -> StoreResult<BankCode> {
        self.find_by_code(code)
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn get_branches_by_prefix(&self, code: &str) -> StoreResult<Vec<BankCodeSummary>> {
        Ok(self.list_branches(code).await?)
    }

    async fn get_by_country(&self, iso2: &str) -> StoreResult<Vec<BankCodeSummary>> {
        Ok(self.list_by_country(iso2).await?)
    }

    async fn get_country_name(&self, iso2: &str) -> StoreResult<String> {
        self.find_country_name(iso2)
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn insert(&self, record: &BankCode) -> StoreResult<()> {
        Ok(self.create(record).await?)
    }

    async fn delete_by_code(&self, code: &str) -> StoreResult<()> {
        self.remove(code).await?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
