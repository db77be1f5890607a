//! Database operations for the `recommendations` table.
//!
//! One row per `(user_id, fingerprint)`; the unique constraint makes a
//! concurrent duplicate insert resolve to the row that won.

use chrono::{DateTime, Utc};
use makerfit_core::{FitDecision, NewRecommendation, Recommendation};
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

const COLUMNS: &str = "id, user_id, fingerprint, profile, candidate_ids, items, fit_decision, \
                       fit_reason, fit_analysis, created_at, updated_at";

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// A row from the `recommendations` table. JSONB columns stay untyped until
/// [`RecommendationRow::into_domain`].
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RecommendationRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub fingerprint: String,
    pub profile: Value,
    pub candidate_ids: Vec<String>,
    pub items: Value,
    /// `software_fit` or `custom_build`.
    pub fit_decision: String,
    pub fit_reason: String,
    pub fit_analysis: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RecommendationRow {
    /// Decode the JSONB columns into domain types.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Decode`] if a stored document no longer matches its type.
    pub fn into_domain(self) -> Result<Recommendation, DbError> {
        let fit_decision: FitDecision = self
            .fit_decision
            .parse()
            .map_err(|e: makerfit_core::CoreError| DbError::Decode(e.to_string()))?;

        Ok(Recommendation {
            id: self.id,
            user_id: self.user_id,
            fingerprint: self.fingerprint,
            profile: decode("profile", self.profile)?,
            candidate_ids: self.candidate_ids,
            items: decode("items", self.items)?,
            fit_decision,
            fit_reason: self.fit_reason,
            fit_analysis: decode("fit_analysis", self.fit_analysis)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn decode<T: serde::de::DeserializeOwned>(column: &str, value: Value) -> Result<T, DbError> {
    serde_json::from_value(value).map_err(|e| DbError::Decode(format!("{column}: {e}")))
}

fn encode<T: serde::Serialize>(column: &str, value: &T) -> Result<Value, DbError> {
    serde_json::to_value(value).map_err(|e| DbError::Decode(format!("{column}: {e}")))
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Returns the recommendation for this user and fingerprint, or `None`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn find_recommendation(
    pool: &PgPool,
    user_id: Uuid,
    fingerprint: &str,
) -> Result<Option<RecommendationRow>, DbError> {
    let row = sqlx::query_as::<_, RecommendationRow>(&format!(
        "SELECT {COLUMNS} FROM recommendations WHERE user_id = $1 AND fingerprint = $2"
    ))
    .bind(user_id)
    .bind(fingerprint)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Sets `updated_at = NOW()` and returns the refreshed row.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no row has this id, or [`DbError::Sqlx`]
/// if the query fails.
pub async fn touch_recommendation(pool: &PgPool, id: Uuid) -> Result<RecommendationRow, DbError> {
    sqlx::query_as::<_, RecommendationRow>(&format!(
        "UPDATE recommendations SET updated_at = NOW() WHERE id = $1 RETURNING {COLUMNS}"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(DbError::NotFound)
}

/// Inserts a recommendation, or returns the existing row when one already
/// exists for the same `(user_id, fingerprint)`.
///
/// # Errors
///
/// Returns [`DbError::Decode`] if a document cannot be serialized,
/// [`DbError::NotFound`] if the conflicting row vanished before it could be
/// read back, or [`DbError::Sqlx`] if a query fails.
pub async fn insert_recommendation(
    pool: &PgPool,
    new: &NewRecommendation,
) -> Result<RecommendationRow, DbError> {
    let profile = encode("profile", &new.profile)?;
    let items = encode("items", &new.items)?;
    let fit_analysis = encode("fit_analysis", &new.fit_analysis)?;

    let inserted = sqlx::query_as::<_, RecommendationRow>(&format!(
        "INSERT INTO recommendations \
             (user_id, fingerprint, profile, candidate_ids, items, fit_decision, \
              fit_reason, fit_analysis) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
         ON CONFLICT (user_id, fingerprint) DO NOTHING \
         RETURNING {COLUMNS}"
    ))
    .bind(new.user_id)
    .bind(&new.fingerprint)
    .bind(profile)
    .bind(&new.candidate_ids)
    .bind(items)
    .bind(new.fit_decision.as_str())
    .bind(&new.fit_reason)
    .bind(fit_analysis)
    .fetch_optional(pool)
    .await?;

    if let Some(row) = inserted {
        return Ok(row);
    }

    tracing::debug!(
        user_id = %new.user_id,
        fingerprint = %new.fingerprint,
        "recommendation already stored; returning existing row"
    );
    find_recommendation(pool, new.user_id, &new.fingerprint)
        .await?
        .ok_or(DbError::NotFound)
}
