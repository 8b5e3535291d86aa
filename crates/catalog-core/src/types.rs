//! # Domain Types
//!
//! Core domain types used throughout the catalog service.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐          ┌─────────────────┐                       │
//! │  │    Category     │  1 ── n  │     Product     │                       │
//! │  │  ─────────────  │◄─────────│  ─────────────  │                       │
//! │  │  id             │          │  id             │                       │
//! │  │  name           │          │  sku (business) │                       │
//! │  └─────────────────┘          │  category_id FK │                       │
//! │                               │  price (Money)  │                       │
//! │                               │  version        │                       │
//! │                               └─────────────────┘                       │
//! │                                                                         │
//! │  ┌─────────────────┐                                                    │
//! │  │ ProductPayload  │  Untrusted request body, validated into           │
//! │  │  (all optional) │  ProductDraft before it reaches the store         │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Relationship Model
//! A product points at its category through `category_id` only. There is no
//! in-memory collection of products on `Category`; "products of a category"
//! is a query against the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Category
// =============================================================================

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Store-assigned identifier.
    pub id: i64,

    /// Display name.
    pub name: String,
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Store-assigned identifier, immutable after creation.
    pub id: i64,

    /// Stock Keeping Unit - business identifier (not unique).
    pub sku: String,

    /// Display name.
    pub name: String,

    /// Free-text description.
    pub description: String,

    /// Unit price, never negative.
    pub price: Money,

    /// Whether the product is currently offered.
    pub is_available: bool,

    /// Owning category.
    pub category_id: i64,

    /// Optimistic concurrency token.
    ///
    /// Starts at 1 and is incremented by every successful update. An update
    /// carrying a stale version is rejected as a conflict.
    pub version: i64,

    /// When the product was created.
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Product Payload
// =============================================================================

/// A product as received in a create or replace request.
///
/// Every field is optional at this level so that a missing field surfaces as
/// a validation error naming the field, not as a JSON decoding failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    /// Ignored on create; must match the route id on replace.
    pub id: Option<i64>,
    pub sku: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Money>,
    #[serde(default)]
    pub is_available: bool,
    pub category_id: Option<i64>,
    /// Version the client last read; enables the conflict check on replace.
    pub version: Option<i64>,
}

// =============================================================================
// Product Draft
// =============================================================================

/// A validated product payload, ready to be written to the store.
///
/// Only [`crate::validation::validate_product`] produces drafts, so holding
/// one means every required field is present and well-formed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub sku: String,
    pub name: String,
    pub description: String,
    pub price: Money,
    pub is_available: bool,
    pub category_id: i64,
    /// Expected current version for the optimistic check, if the client sent one.
    pub expected_version: Option<i64>,
}
