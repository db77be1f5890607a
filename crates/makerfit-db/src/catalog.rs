//! Database operations for the `software_catalog` table.

use chrono::{DateTime, Utc};
use makerfit_core::SoftwareCatalogItem;
use sqlx::PgPool;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// A row from the `software_catalog` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SoftwareRow {
    pub id: String,
    pub name: String,
    pub category: String,
    pub target_roles: Vec<String>,
    pub tags: Vec<String>,
    pub description: String,
    pub pricing_model: Option<String>,
    pub website_url: Option<String>,
    pub key_features: Vec<String>,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SoftwareRow> for SoftwareCatalogItem {
    fn from(row: SoftwareRow) -> Self {
        SoftwareCatalogItem {
            id: row.id,
            name: row.name,
            category: row.category,
            target_roles: row.target_roles,
            tags: row.tags,
            description: row.description,
            pricing_model: row.pricing_model,
            website_url: row.website_url,
            key_features: row.key_features,
            pros: row.pros,
            cons: row.cons,
            active: row.is_active,
        }
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Returns every active catalog entry, ordered by id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_active_software(pool: &PgPool) -> Result<Vec<SoftwareRow>, DbError> {
    let rows = sqlx::query_as::<_, SoftwareRow>(
        "SELECT id, name, category, target_roles, tags, description, pricing_model, \
                website_url, key_features, pros, cons, is_active, created_at, updated_at \
         FROM software_catalog \
         WHERE is_active = true \
         ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Insert or update a catalog entry keyed by its id.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the statement fails, including when another
/// entry already uses the same name.
pub async fn upsert_software(pool: &PgPool, item: &SoftwareCatalogItem) -> Result<(), DbError> {
    sqlx::query(
        "INSERT INTO software_catalog \
             (id, name, category, target_roles, tags, description, pricing_model, \
              website_url, key_features, pros, cons, is_active) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
         ON CONFLICT (id) DO UPDATE SET \
             name          = EXCLUDED.name, \
             category      = EXCLUDED.category, \
             target_roles  = EXCLUDED.target_roles, \
             tags          = EXCLUDED.tags, \
             description   = EXCLUDED.description, \
             pricing_model = EXCLUDED.pricing_model, \
             website_url   = EXCLUDED.website_url, \
             key_features  = EXCLUDED.key_features, \
             pros          = EXCLUDED.pros, \
             cons          = EXCLUDED.cons, \
             is_active     = EXCLUDED.is_active, \
             updated_at    = NOW()",
    )
    .bind(&item.id)
    .bind(&item.name)
    .bind(&item.category)
    .bind(&item.target_roles)
    .bind(&item.tags)
    .bind(&item.description)
    .bind(&item.pricing_model)
    .bind(&item.website_url)
    .bind(&item.key_features)
    .bind(&item.pros)
    .bind(&item.cons)
    .bind(item.active)
    .execute(pool)
    .await?;

    Ok(())
}
