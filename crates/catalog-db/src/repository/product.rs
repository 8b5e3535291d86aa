//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - Listing driven by a [`ProductQuery`] (filter → sort → page in one statement)
//! - CRUD operations with an optimistic `version` check on replace
//! - All-or-nothing batch delete
//!
//! ## Query Push-Down
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 ProductQuery → SQL                                      │
//! │                                                                         │
//! │  filters  [AvailableOnly, MinPrice(10.00), NameContains("jacket")]     │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  WHERE is_available = 1                                                │
//! │    AND price_cents >= ?            ← 1000                              │
//! │    AND instr(name_folded, ?) > 0   ← fold_case("Jacket")               │
//! │                                                                         │
//! │  sort     Some(Price, Descending)                                      │
//! │     ▼                                                                   │
//! │  ORDER BY price_cents DESC, id DESC                                    │
//! │                                                                         │
//! │  window   page 2, size 10                                              │
//! │     ▼                                                                   │
//! │  LIMIT ? OFFSET ?                  ← 10, 10                            │
//! │                                                                         │
//! │  Column names come from SortField, values are always bound.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! SQLite's `lower()` folds ASCII only, so text filters compare against the
//! `sku_folded` / `name_folded` columns, written with catalog-core's
//! `fold_case` on every insert and update. Bound terms are folded the same
//! way, which keeps SQL and the in-memory evaluator in agreement.
//!
//! ## Optimistic Replace
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  UPDATE products SET ..., version = version + 1                        │
//! │  WHERE id = ? [AND version = ?]                                        │
//! │       │                                                                 │
//! │       ├── 1 row  → updated product                                     │
//! │       └── 0 rows → check: SELECT version WHERE id = ?                  │
//! │                      ├── no row  → DbError::NotFound                   │
//! │                      └── row     → DbError::Conflict                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};
use catalog_core::query::{fold_case, Filter, ProductQuery};
use catalog_core::{Money, Product, ProductDraft};

const PRODUCT_COLUMNS: &str =
    "id, sku, name, description, price_cents, is_available, category_id, version, created_at, updated_at";

/// A `products` row as stored.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i64,
    sku: String,
    name: String,
    description: String,
    price_cents: i64,
    is_available: bool,
    category_id: i64,
    version: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            sku: row.sku,
            name: row.name,
            description: row.description,
            price: Money::from_cents(row.price_cents),
            is_available: row.is_available,
            category_id: row.category_id,
            version: row.version,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// let page = repo.list(&query).await?;
/// let total = repo.count_matching(&query).await?;
/// let product = repo.get_by_id(42).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Returns the page of products described by `query`.
    pub async fn list(&self, query: &ProductQuery) -> DbResult<Vec<Product>> {
        let mut conn = self.pool.acquire().await?;
        select_page(&mut conn, query).await
    }

    /// Counts products matching the filters of `query`, ignoring sort and
    /// window.
    pub async fn count_matching(&self, query: &ProductQuery) -> DbResult<i64> {
        let mut conn = self.pool.acquire().await?;
        select_count(&mut conn, query).await
    }

    /// Page plus matching total, read inside one transaction so a concurrent
    /// write cannot land between the two statements.
    pub async fn list_with_total(&self, query: &ProductQuery) -> DbResult<(Vec<Product>, i64)> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let items = select_page(&mut tx, query).await?;
        let total = select_count(&mut tx, query).await?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        Ok((items, total))
    }

    /// Lists every available product in id order.
    pub async fn list_available(&self) -> DbResult<Vec<Product>> {
        let sql = format!(
            "SELECT {} FROM products WHERE is_available = 1 ORDER BY id",
            PRODUCT_COLUMNS
        );

        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Lists the products of one category in id order.
    pub async fn list_by_category(&self, category_id: i64) -> DbResult<Vec<Product>> {
        let sql = format!(
            "SELECT {} FROM products WHERE category_id = ?1 ORDER BY id",
            PRODUCT_COLUMNS
        );

        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(category_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let sql = format!("SELECT {} FROM products WHERE id = ?1", PRODUCT_COLUMNS);

        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Product::from))
    }

    /// Counts all products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Inserts a new product. The store assigns the id; version starts at 1.
    ///
    /// ## Returns
    /// * `Ok(Product)` - Stored product with generated fields
    /// * `Err(DbError::ForeignKeyViolation)` - `category_id` doesn't exist
    pub async fn insert(&self, draft: &ProductDraft) -> DbResult<Product> {
        debug!(sku = %draft.sku, category_id = draft.category_id, "Inserting product");

        let now = Utc::now();
        let sql = format!(
            r#"
            INSERT INTO products (
                sku, name, description, price_cents, is_available,
                category_id, version, created_at, updated_at,
                sku_folded, name_folded
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, 1, ?7, ?8, ?9, ?10)
            RETURNING {}
            "#,
            PRODUCT_COLUMNS
        );

        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(&draft.sku)
            .bind(&draft.name)
            .bind(&draft.description)
            .bind(draft.price.cents())
            .bind(draft.is_available)
            .bind(draft.category_id)
            .bind(now)
            .bind(now)
            .bind(fold_case(&draft.sku))
            .bind(fold_case(&draft.name))
            .fetch_one(&self.pool)
            .await?;

        debug!(id = row.id, "Product inserted");
        Ok(row.into())
    }

    /// Replaces every mutable field of product `id`.
    ///
    /// When `draft.expected_version` is set the write only applies if the
    /// stored version still equals it; either way the version is bumped.
    ///
    /// ## Returns
    /// * `Ok(Product)` - The product as stored after the update
    /// * `Err(DbError::NotFound)` - No product with this id
    /// * `Err(DbError::Conflict)` - Version moved on since the client read it
    /// * `Err(DbError::ForeignKeyViolation)` - `category_id` doesn't exist
    pub async fn update(&self, id: i64, draft: &ProductDraft) -> DbResult<Product> {
        debug!(id, expected_version = ?draft.expected_version, "Updating product");

        let now = Utc::now();
        let version_guard = if draft.expected_version.is_some() {
            " AND version = ?11"
        } else {
            ""
        };
        let sql = format!(
            r#"
            UPDATE products SET
                sku = ?2,
                name = ?3,
                description = ?4,
                price_cents = ?5,
                is_available = ?6,
                category_id = ?7,
                updated_at = ?8,
                sku_folded = ?9,
                name_folded = ?10,
                version = version + 1
            WHERE id = ?1{}
            RETURNING {}
            "#,
            version_guard, PRODUCT_COLUMNS
        );

        let mut query = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(id)
            .bind(&draft.sku)
            .bind(&draft.name)
            .bind(&draft.description)
            .bind(draft.price.cents())
            .bind(draft.is_available)
            .bind(draft.category_id)
            .bind(now)
            .bind(fold_case(&draft.sku))
            .bind(fold_case(&draft.name));

        if let Some(expected) = draft.expected_version {
            query = query.bind(expected);
        }

        if let Some(row) = query.fetch_optional(&self.pool).await? {
            return Ok(row.into());
        }

        // Zero rows: tell a vanished row apart from a stale version
        let current: Option<i64> = sqlx::query_scalar("SELECT version FROM products WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match current {
            None => Err(DbError::not_found("Product", id)),
            Some(actual) => {
                warn!(
                    id,
                    expected = ?draft.expected_version,
                    actual,
                    "Rejected stale product update"
                );
                Err(DbError::conflict("Product", id))
            }
        }
    }

    /// Deletes one product and returns it.
    pub async fn delete(&self, id: i64) -> DbResult<Product> {
        let mut removed = self.delete_many(&[id]).await?;
        removed
            .pop()
            .ok_or_else(|| DbError::Internal(format!("delete of product {} returned nothing", id)))
    }

    /// Deletes a set of products atomically and returns them in request order.
    ///
    /// Every id is looked up before anything is removed. The first missing
    /// id aborts with [`DbError::NotFound`] and the transaction is rolled
    /// back, so either all products are removed or none are. Duplicate ids
    /// are resolved once.
    pub async fn delete_many(&self, ids: &[i64]) -> DbResult<Vec<Product>> {
        let mut seen = HashSet::new();
        let unique: Vec<i64> = ids.iter().copied().filter(|id| seen.insert(*id)).collect();

        if unique.is_empty() {
            return Ok(Vec::new());
        }

        debug!(ids = ?unique, "Deleting products");

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let select = format!("SELECT {} FROM products WHERE id = ?1", PRODUCT_COLUMNS);
        let mut removed = Vec::with_capacity(unique.len());

        for &id in &unique {
            let row = sqlx::query_as::<_, ProductRow>(&select)
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

            match row {
                Some(row) => removed.push(Product::from(row)),
                // Dropping `tx` rolls back
                None => return Err(DbError::not_found("Product", id)),
            }
        }

        for &id in &unique {
            sqlx::query("DELETE FROM products WHERE id = ?1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        debug!(count = removed.len(), "Products deleted");
        Ok(removed)
    }
}

async fn select_page(conn: &mut SqliteConnection, query: &ProductQuery) -> DbResult<Vec<Product>> {
    debug!(
        filters = query.filters.len(),
        sort = ?query.sort,
        page = query.window.page,
        size = query.window.size,
        "Listing products"
    );

    let mut builder = QueryBuilder::<Sqlite>::new(format!("SELECT {} FROM products", PRODUCT_COLUMNS));
    push_filters(&mut builder, &query.filters);

    match query.sort {
        Some(sort) => {
            let dir = sort.order.keyword();
            builder.push(format!(" ORDER BY {} {}, id {}", sort.field.column(), dir, dir));
        }
        None => {
            builder.push(" ORDER BY id ASC");
        }
    }

    builder.push(" LIMIT ");
    builder.push_bind(query.window.limit());
    builder.push(" OFFSET ");
    builder.push_bind(query.window.offset());

    let rows = builder
        .build_query_as::<ProductRow>()
        .fetch_all(&mut *conn)
        .await?;

    debug!(count = rows.len(), "Listing returned products");
    Ok(rows.into_iter().map(Product::from).collect())
}

async fn select_count(conn: &mut SqliteConnection, query: &ProductQuery) -> DbResult<i64> {
    let mut builder = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM products");
    push_filters(&mut builder, &query.filters);

    let count = builder
        .build_query_scalar::<i64>()
        .fetch_one(&mut *conn)
        .await?;

    Ok(count)
}

/// Appends the `WHERE` clause for `filters`, binding every value.
fn push_filters(builder: &mut QueryBuilder<'_, Sqlite>, filters: &[Filter]) {
    for (i, filter) in filters.iter().enumerate() {
        builder.push(if i == 0 { " WHERE " } else { " AND " });

        match filter {
            Filter::AvailableOnly => {
                builder.push("is_available = 1");
            }
            Filter::MinPrice(bound) => {
                builder.push("price_cents >= ");
                builder.push_bind(bound.cents());
            }
            Filter::MaxPrice(bound) => {
                builder.push("price_cents <= ");
                builder.push_bind(bound.cents());
            }
            Filter::SearchTerm(term) => {
                let folded = fold_case(term);
                builder.push("(sku_folded = ");
                builder.push_bind(folded.clone());
                builder.push(" OR name_folded = ");
                builder.push_bind(folded);
                builder.push(")");
            }
            Filter::SkuEquals(sku) => {
                builder.push("sku = ");
                builder.push_bind(sku.clone());
            }
            Filter::NameContains(fragment) => {
                builder.push("instr(name_folded, ");
                builder.push_bind(fold_case(fragment));
                builder.push(") > 0");
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
