//! Collaborator seams: where the catalog comes from and where
//! recommendations are cached.

use std::convert::Infallible;

use async_trait::async_trait;
use makerfit_core::{NewRecommendation, Recommendation, SoftwareCatalogItem};
use uuid::Uuid;

/// A snapshot source of active catalog items.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Every active item, in full. An empty catalog is not an error.
    async fn active_items(&self) -> Result<Vec<SoftwareCatalogItem>, Self::Error>;
}

/// Persistence of recommendations keyed by `(user_id, fingerprint)`.
#[async_trait]
pub trait RecommendationStore: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// The stored recommendation for this user and profile fingerprint, if any.
    async fn find(
        &self,
        user_id: Uuid,
        fingerprint: &str,
    ) -> Result<Option<Recommendation>, Self::Error>;

    /// Refresh `updated_at` and return the refreshed record.
    async fn touch(&self, id: Uuid) -> Result<Recommendation, Self::Error>;

    /// Persist a new recommendation.
    ///
    /// When a record for the same `(user_id, fingerprint)` already exists,
    /// implementations return that record instead of creating a duplicate.
    async fn insert(
        &self,
        recommendation: NewRecommendation,
    ) -> Result<Recommendation, Self::Error>;
}

/// An in-memory catalog, typically loaded from the YAML catalog file.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    items: Vec<SoftwareCatalogItem>,
}

impl StaticCatalog {
    #[must_use]
    pub fn new(items: Vec<SoftwareCatalogItem>) -> Self {
        Self { items }
    }

    /// Active items only.
    #[must_use]
    pub fn active(&self) -> Vec<SoftwareCatalogItem> {
        self.items.iter().filter(|item| item.active).cloned().collect()
    }
}

#[async_trait]
impl CatalogSource for StaticCatalog {
    type Error = Infallible;

    async fn active_items(&self) -> Result<Vec<SoftwareCatalogItem>, Infallible> {
        Ok(self.active())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, active: bool) -> SoftwareCatalogItem {
        SoftwareCatalogItem {
            id: id.to_string(),
            name: id.to_uppercase(),
            category: String::new(),
            target_roles: vec![],
            tags: vec![],
            description: String::new(),
            pricing_model: None,
            website_url: None,
            key_features: vec![],
            pros: vec![],
            cons: vec![],
            active,
        }
    }

    #[tokio::test]
    async fn static_catalog_skips_inactive_items() {
        let catalog = StaticCatalog::new(vec![item("a", true), item("b", false), item("c", true)]);
        let items = catalog.active_items().await.unwrap();
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }
}
