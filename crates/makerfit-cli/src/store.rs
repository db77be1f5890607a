//! Postgres-backed collaborators for the recommendation pipeline.

use async_trait::async_trait;
use makerfit_core::{NewRecommendation, Recommendation, SoftwareCatalogItem};
use makerfit_db::DbError;
use makerfit_engine::{CatalogSource, RecommendationStore};
use sqlx::PgPool;
use uuid::Uuid;

/// Active rows of `software_catalog`.
pub(crate) struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogSource for PgCatalog {
    type Error = DbError;

    async fn active_items(&self) -> Result<Vec<SoftwareCatalogItem>, DbError> {
        let rows = makerfit_db::list_active_software(&self.pool).await?;
        Ok(rows.into_iter().map(SoftwareCatalogItem::from).collect())
    }
}

/// The `recommendations` table.
pub(crate) struct PgRecommendationStore {
    pool: PgPool,
}

impl PgRecommendationStore {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecommendationStore for PgRecommendationStore {
    type Error = DbError;

    async fn find(
        &self,
        user_id: Uuid,
        fingerprint: &str,
    ) -> Result<Option<Recommendation>, DbError> {
        makerfit_db::find_recommendation(&self.pool, user_id, fingerprint)
            .await?
            .map(makerfit_db::RecommendationRow::into_domain)
            .transpose()
    }

    async fn touch(&self, id: Uuid) -> Result<Recommendation, DbError> {
        makerfit_db::touch_recommendation(&self.pool, id)
            .await?
            .into_domain()
    }

    async fn insert(&self, recommendation: NewRecommendation) -> Result<Recommendation, DbError> {
        makerfit_db::insert_recommendation(&self.pool, &recommendation)
            .await?
            .into_domain()
    }
}
