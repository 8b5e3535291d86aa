//! # Error Types
//!
//! Domain-specific error types for catalog-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  catalog-core errors (this file)                                       │
//! │  ├── CoreError        - Request-level rule violations                  │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  catalog-db errors (separate crate)                                    │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  catalog-api errors (app)                                              │
//! │  └── ApiError         - What HTTP clients see (serialized)             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → 400 Bad Request        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// Every variant is a caller error: the API layer answers them with
/// `400 Bad Request`.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The identity in the route does not match the identity in the body.
    ///
    /// ## When This Occurs
    /// - `PUT /products/1` with a body carrying `"id": 2`
    /// - `PUT /products/1` with a body that has no `id` at all
    #[error("Route id {path_id} does not match {}", describe_body_id(*body_id))]
    IdMismatch { path_id: i64, body_id: Option<i64> },

    #[error("Invalid product: {0}")]
    Validation(#[from] ValidationError),
}

fn describe_body_id(body_id: Option<i64>) -> String {
    match body_id {
        Some(id) => format!("body id {}", id),
        None => "a body without an id".to_string(),
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// A payload field or listing parameter that fails its rule.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Absent, or blank after trimming.
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// `page` / `size` of zero or less.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g., non-numeric page, price with three decimals).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Result alias for catalog-core operations.
pub type CoreResult<T> = Result<T, CoreError>;
