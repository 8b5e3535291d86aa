//! # Catalog Service
//!
//! Orchestrates validation, query building and repository calls for the
//! HTTP handlers, and classifies every outcome into an [`ApiError`].
//!
//! ## Mutation Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Received ──► Validated ──► Applied ──┬──► Committed                  │
//! │      │             │                   ├──► Conflict   (409)           │
//! │      │             │                   └──► NotFound   (404)           │
//! │      └─────────────┴──────────────────────► Rejected   (400)           │
//! │                                                                         │
//! │   No automatic retries: a conflict goes back to the client, which      │
//! │   re-reads the product and decides.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, info, warn};

use crate::error::{ApiError, ApiResult};
use catalog_core::query::{ProductQuery, ProductQueryParams, QueryLimits, QueryProfile};
use catalog_core::validation::{validate_product, validate_replacement};
use catalog_core::{Category, CoreError, Product, ProductPayload};
use catalog_db::Database;

/// One page of a product listing plus the number of matching products.
#[derive(Debug, Clone)]
pub struct ProductPage {
    pub items: Vec<Product>,
    pub total: i64,
}

/// Application service shared by all route sets.
#[derive(Debug, Clone)]
pub struct CatalogService {
    db: Database,
    limits: QueryLimits,
}

impl CatalogService {
    /// Creates a service over `db` with the given page-size policy.
    pub fn new(db: Database, limits: QueryLimits) -> Self {
        CatalogService { db, limits }
    }

    /// The underlying database handle.
    pub fn database(&self) -> &Database {
        &self.db
    }

    // =========================================================================
    // Products: reads
    // =========================================================================

    /// Builds a query from raw parameters and runs it.
    pub async fn list(&self, params: &ProductQueryParams, profile: QueryProfile) -> ApiResult<ProductPage> {
        let query = ProductQuery::build(params, profile, self.limits)?;

        let (items, total) = self.db.products().list_with_total(&query).await?;

        Ok(ProductPage { items, total })
    }

    /// Gets one product or `404`.
    pub async fn get(&self, id: i64) -> ApiResult<Product> {
        self.db
            .products()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Product", id))
    }

    /// Every product with `isAvailable = true`.
    pub async fn list_available(&self) -> ApiResult<Vec<Product>> {
        Ok(self.db.products().list_available().await?)
    }

    // =========================================================================
    // Products: mutations
    // =========================================================================

    /// Validates and stores a new product. Any `id` in the payload is ignored.
    pub async fn create(&self, payload: ProductPayload) -> ApiResult<Product> {
        if let Some(id) = payload.id {
            debug!(body_id = id, "Ignoring client-supplied id on create");
        }

        let draft = validate_product(&payload)?;
        let product = self.db.products().insert(&draft).await?;

        info!(id = product.id, sku = %product.sku, "Product created");
        Ok(product)
    }

    /// Replaces product `id` with `payload`.
    ///
    /// The body id must equal `id`; this is checked before the store is
    /// touched. A body `version` turns on the optimistic check.
    pub async fn replace(&self, id: i64, payload: ProductPayload) -> ApiResult<Product> {
        let draft = validate_replacement(id, &payload).map_err(|err| {
            if let CoreError::IdMismatch { body_id, .. } = &err {
                warn!(path_id = id, body_id = ?body_id, "Rejected replace with mismatched id");
            }
            ApiError::from(err)
        })?;
        let product = self.db.products().update(id, &draft).await?;

        info!(id, version = product.version, "Product replaced");
        Ok(product)
    }

    /// Removes one product and returns it.
    pub async fn delete(&self, id: i64) -> ApiResult<Product> {
        let product = self.db.products().delete(id).await?;

        info!(id, "Product deleted");
        Ok(product)
    }

    /// Removes all of `ids` or none of them.
    pub async fn delete_many(&self, ids: &[i64]) -> ApiResult<Vec<Product>> {
        let removed = self.db.products().delete_many(ids).await?;

        info!(requested = ids.len(), removed = removed.len(), "Products deleted");
        Ok(removed)
    }

    // =========================================================================
    // Categories
    // =========================================================================

    /// All categories.
    pub async fn categories(&self) -> ApiResult<Vec<Category>> {
        Ok(self.db.categories().list().await?)
    }

    /// One category or `404`.
    pub async fn category(&self, id: i64) -> ApiResult<Category> {
        self.db
            .categories()
            .get_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found("Category", id))
    }

    /// Products of an existing category; `404` when the category is unknown.
    pub async fn category_products(&self, id: i64) -> ApiResult<Vec<Product>> {
        let category = self.category(id).await?;
        Ok(self.db.products().list_by_category(category.id).await?)
    }
}
