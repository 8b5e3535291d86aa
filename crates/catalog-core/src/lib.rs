//! # catalog-core: Pure Business Logic for the Catalog Service
//!
//! This crate holds the domain model and the query-composition pipeline
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Catalog Service Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  catalog-api (axum routes)                      │   │
//! │  │    /api/products  ·  /api/v2/products  ·  /products             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ catalog-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   query   │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │ Filters   │  │  payload  │  │   │
//! │  │   │ Category  │  │  parsing  │  │ Sort/Page │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  catalog-db (Database Layer)                    │   │
//! │  │           SQLite queries, migrations, repositories              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Category, ProductPayload)
//! - [`money`] - Money type with integer cents
//! - [`error`] - Domain error types
//! - [`validation`] - Payload validation
//! - [`query`] - Query builder and reference evaluator
//!
//! ## Example Usage
//!
//! ```rust
//! use catalog_core::query::{ProductQuery, ProductQueryParams, QueryLimits, QueryProfile};
//!
//! let params = ProductQueryParams::from_pairs([("minPrice", "10"), ("sortBy", "Price")]);
//! let query = ProductQuery::build(&params, QueryProfile::Extended, QueryLimits::default()).unwrap();
//!
//! assert_eq!(query.window.offset(), 0);
//! assert!(query.sort.is_some());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod query;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Page size used when a listing request does not specify `Size`.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Upper bound for `Size`; larger requests are clamped to this value.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Maximum length of SKU values.
pub const MAX_SKU_LEN: usize = 50;

/// Maximum length of product and category names.
pub const MAX_NAME_LEN: usize = 200;
