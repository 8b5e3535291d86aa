//! # Repository Module
//!
//! Database repository implementations for the catalog.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  axum handler                                                          │
//! │       │                                                                 │
//! │       │  db.products().list(&query)                                    │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── list / count_matching   (ProductQuery pushed down to SQL)         │
//! │  ├── get_by_id / list_available / list_by_category                     │
//! │  ├── insert / update         (optimistic version check)                │
//! │  └── delete / delete_many    (transactional)                           │
//! │       │                                                                 │
//! │  CategoryRepository                                                    │
//! │  └── list / get_by_id / insert / count                                 │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Product listing and mutations
//! - [`CategoryRepository`](category::CategoryRepository) - Category lookups

pub mod category;
pub mod product;
