//! # Demo Seed Data
//!
//! Populates an empty database with a small demo catalog.
//!
//! ## When It Runs
//! ```text
//! catalog-api startup
//!     │
//!     ├── CATALOG_SEED_DEMO_DATA=false ──► skip
//!     │
//!     ▼
//! SELECT COUNT(*) FROM categories
//!     │
//!     ├── > 0 ──► skip (never touches existing data)
//!     │
//!     ▼
//! BEGIN
//!   INSERT 5 categories
//!   INSERT products for each
//! COMMIT
//! ```
//!
//! Everything is inserted in one transaction: a half-seeded database would
//! be skipped on the next start and stay half-seeded.

use chrono::Utc;
use tracing::info;

use crate::error::{DbError, DbResult};
use crate::pool::Database;
use catalog_core::query::fold_case;

/// (sku, name, description, price in cents, available)
type DemoProduct = (&'static str, &'static str, &'static str, i64, bool);

const DEMO_CATALOG: &[(&str, &[DemoProduct])] = &[
    (
        "Active Wear - Men",
        &[
            ("AWMGSJ", "Grunge Skater Jeans", "Relaxed fit denim with a washed finish", 6800, true),
            ("AWMPS", "Polo Shirt", "Breathable cotton pique polo", 3500, true),
            ("AWMSGT", "Skater Graphic T-Shirt", "Heavyweight tee with front print", 3300, true),
            ("AWMSTS", "Slicker Jacket", "Water-resistant shell with hood", 12500, true),
            ("AWMTJ", "Thermal Fleece Jacket", "Midweight fleece for cold mornings", 6000, true),
            ("AWMCTS", "Unisex Thermal Vest", "Sleeveless insulated layer", 9500, false),
            ("AWMHCT", "V-Neck Pullover", "Fine-knit merino pullover", 6500, true),
        ],
    ),
    (
        "Active Wear - Women",
        &[
            ("AWWDSD", "Dri-Fit Sports Dress", "Lightweight dress for court sports", 7000, true),
            ("AWWLT", "Long Sleeve Running Top", "Quick-dry top with thumbholes", 4200, true),
            ("AWWPL", "Performance Leggings", "High-rise leggings with side pocket", 5500, true),
            ("AWWWJ", "Windbreaker Jacket", "Packable windbreaker", 8900, false),
        ],
    ),
    (
        "Mineral Water",
        &[
            ("MWSP500", "Sparkling Mineral Water 500ml", "Naturally carbonated spring water", 150, true),
            ("MWST1L", "Still Mineral Water 1L", "Low-sodium still water", 120, true),
            ("MWLEM500", "Lemon Sparkling Water 500ml", "Sparkling water with lemon essence", 180, true),
        ],
    ),
    (
        "Publications",
        &[
            ("PUBRUN", "Running Fundamentals", "Training guide for new runners", 2499, true),
            ("PUBYOGA", "Yoga for Athletes", "Mobility routines for recovery", 1999, true),
        ],
    ),
    (
        "Supplements",
        &[
            ("SUPWHEY", "Whey Protein 1kg", "Vanilla whey isolate", 3999, true),
            ("SUPELEC", "Electrolyte Tablets", "Tube of 20 effervescent tablets", 799, false),
        ],
    ),
];

/// Seeds the demo catalog when the database has no categories yet.
///
/// ## Returns
/// * `Ok(true)` - Demo data was inserted
/// * `Ok(false)` - Database already had categories; nothing changed
pub async fn seed_demo_catalog(db: &Database) -> DbResult<bool> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
        .fetch_one(db.pool())
        .await?;

    if existing > 0 {
        info!(categories = existing, "Database already populated, skipping demo seed");
        return Ok(false);
    }

    let mut tx = db
        .pool()
        .begin()
        .await
        .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

    let now = Utc::now();
    let mut product_count = 0usize;

    for (category_name, products) in DEMO_CATALOG {
        let category_id: i64 =
            sqlx::query_scalar("INSERT INTO categories (name) VALUES (?1) RETURNING id")
                .bind(*category_name)
                .fetch_one(&mut *tx)
                .await?;

        for &(sku, name, description, price_cents, is_available) in products.iter() {
            sqlx::query(
                r#"
                INSERT INTO products (
                    sku, name, description, price_cents, is_available,
                    category_id, version, created_at, updated_at,
                    sku_folded, name_folded
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, 1, ?7, ?8, ?9, ?10)
                "#,
            )
            .bind(sku)
            .bind(name)
            .bind(description)
            .bind(price_cents)
            .bind(is_available)
            .bind(category_id)
            .bind(now)
            .bind(now)
            .bind(fold_case(sku))
            .bind(fold_case(name))
            .execute(&mut *tx)
            .await?;

            product_count += 1;
        }
    }

    tx.commit()
        .await
        .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

    info!(
        categories = DEMO_CATALOG.len(),
        products = product_count,
        "Seeded demo catalog"
    );
    Ok(true)
}
