//! # Validation Module
//!
//! Input validation for product payloads and query parameters.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP extraction (axum)                                       │
//! │  └── JSON syntax, path id is an integer                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Required fields present and non-empty                             │
//! │  └── Price non-negative, lengths bounded                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  └── Foreign key: category_id → categories.id                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use catalog_core::types::ProductPayload;
//! use catalog_core::validation::validate_product;
//!
//! let payload = ProductPayload {
//!     sku: Some("A1".into()),
//!     name: Some("Widget".into()),
//!     description: Some("A widget".into()),
//!     price: Some("9.99".parse().unwrap()),
//!     category_id: Some(1),
//!     ..Default::default()
//! };
//! assert!(validate_product(&payload).is_ok());
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{ProductDraft, ProductPayload};
use crate::{MAX_NAME_LEN, MAX_SKU_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates that a required text field is present and not blank.
///
/// Returns the value untouched; blank-checking uses the trimmed form but the
/// stored value is whatever the client sent.
fn require_text<'a>(field: &str, value: Option<&'a str>) -> ValidationResult<&'a str> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ValidationError::required(field)),
    }
}

fn check_max_len(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    if value.trim().chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }
    Ok(())
}

/// Validates a SKU (Stock Keeping Unit).
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 50 characters
///
/// ## Example
/// ```rust
/// use catalog_core::validation::validate_sku;
///
/// assert!(validate_sku("AWMGSJ").is_ok());
/// assert!(validate_sku("").is_err());
/// assert!(validate_sku("A".repeat(100).as_str()).is_err());
/// ```
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    require_text("sku", Some(sku))?;
    check_max_len("sku", sku, MAX_SKU_LEN)
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    require_text("name", Some(name))?;
    check_max_len("name", name, MAX_NAME_LEN)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a product price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
///
/// ## Example
/// ```rust
/// use catalog_core::money::Money;
/// use catalog_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_cents(999)).is_ok());
/// assert!(validate_price(Money::zero()).is_ok());
/// assert!(validate_price(Money::from_cents(-1)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }
    Ok(())
}

/// Parses a strictly positive integer query parameter (`page`, `size`).
///
/// ## Rules
/// - Must be a base-10 integer, optionally signed
/// - Must be greater than zero
/// - Values beyond `u32::MAX` saturate; callers clamp or page past the end
pub fn parse_positive(field: &str, raw: &str) -> ValidationResult<u32> {
    let trimmed = raw.trim();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::invalid_format(
            field,
            format!("'{}' is not an integer", raw),
        ));
    }

    if negative || digits.bytes().all(|b| b == b'0') {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(digits.parse::<u32>().unwrap_or(u32::MAX))
}

// =============================================================================
// Payload Validators
// =============================================================================

/// Validates a create/replace payload and turns it into a [`ProductDraft`].
///
/// ## Rules
/// - `sku`, `name`, `description` present and non-blank
/// - `categoryId` present
/// - `price` non-negative (absent means 0, like an unset decimal)
///
/// The payload `id` is not checked here; identity rules belong to the
/// operation (ignored on create, must match the route on replace).
pub fn validate_product(payload: &ProductPayload) -> ValidationResult<ProductDraft> {
    let sku = require_text("sku", payload.sku.as_deref())?;
    validate_sku(sku)?;

    let name = require_text("name", payload.name.as_deref())?;
    validate_product_name(name)?;

    let description = require_text("description", payload.description.as_deref())?;

    let price = payload.price.unwrap_or_default();
    validate_price(price)?;

    let category_id = payload
        .category_id
        .ok_or_else(|| ValidationError::required("categoryId"))?;

    Ok(ProductDraft {
        sku: sku.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price,
        is_available: payload.is_available,
        category_id,
        expected_version: payload.version,
    })
}

/// Validates a replace of product `path_id`.
///
/// The body must carry the same id as the route (a missing id is a
/// mismatch); the identity check runs before field validation.
pub fn validate_replacement(path_id: i64, payload: &ProductPayload) -> CoreResult<ProductDraft> {
    if payload.id != Some(path_id) {
        return Err(CoreError::IdMismatch {
            path_id,
            body_id: payload.id,
        });
    }

    Ok(validate_product(payload)?)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> ProductPayload {
        ProductPayload {
            id: None,
            sku: Some("A1".to_string()),
            name: Some("Widget".to_string()),
            description: Some("A very useful widget".to_string()),
            price: Some(Money::from_cents(999)),
            is_available: true,
            category_id: Some(1),
            version: None,
        }
    }

    #[test]
    fn test_validate_sku() {
        assert!(validate_sku("A1").is_ok());
        assert!(validate_sku("has space").is_ok());

        assert!(validate_sku("").is_err());
        assert!(validate_sku("   ").is_err());
        assert!(validate_sku(&"A".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Grunge Skater Jeans").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_parse_positive() {
        assert_eq!(parse_positive("page", "1").unwrap(), 1);
        assert_eq!(parse_positive("size", " 25 ").unwrap(), 25);

        assert!(matches!(
            parse_positive("page", "0"),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            parse_positive("page", "-3"),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            parse_positive("size", "ten"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            parse_positive("size", "1.5"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            parse_positive("page", "-"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            parse_positive("page", "-99999999999999999999"),
            Err(ValidationError::MustBePositive { .. })
        ));

        assert_eq!(parse_positive("page", "4294967296").unwrap(), u32::MAX);
        assert_eq!(parse_positive("size", "99999999999999999999999").unwrap(), u32::MAX);
        assert_eq!(parse_positive("page", "+7").unwrap(), 7);
    }

    #[test]
    fn test_validate_product_accepts_complete_payload() {
        let draft = validate_product(&widget()).unwrap();
        assert_eq!(draft.sku, "A1");
        assert_eq!(draft.price.cents(), 999);
        assert_eq!(draft.category_id, 1);
        assert!(draft.is_available);
        assert_eq!(draft.expected_version, None);
    }

    #[test]
    fn test_validate_replacement_checks_identity_first() {
        let matching = ProductPayload {
            id: Some(7),
            version: Some(3),
            ..widget()
        };
        let draft = validate_replacement(7, &matching).unwrap();
        assert_eq!(draft.expected_version, Some(3));

        // Mismatch wins even when the fields are also invalid
        let other = ProductPayload {
            id: Some(8),
            sku: None,
            ..widget()
        };
        assert!(matches!(
            validate_replacement(7, &other),
            Err(CoreError::IdMismatch { path_id: 7, body_id: Some(8) })
        ));
        assert!(matches!(
            validate_replacement(7, &widget()),
            Err(CoreError::IdMismatch { body_id: None, .. })
        ));

        let blank = ProductPayload {
            id: Some(7),
            name: Some("  ".to_string()),
            ..widget()
        };
        assert!(matches!(validate_replacement(7, &blank), Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_validate_product_reports_missing_fields() {
        let missing_sku = ProductPayload {
            sku: None,
            ..widget()
        };
        let err = validate_product(&missing_sku).unwrap_err();
        assert_eq!(err.to_string(), "sku is required");

        let blank_description = ProductPayload {
            description: Some("  ".to_string()),
            ..widget()
        };
        assert!(validate_product(&blank_description).is_err());

        let no_category = ProductPayload {
            category_id: None,
            ..widget()
        };
        assert_eq!(
            validate_product(&no_category).unwrap_err().to_string(),
            "categoryId is required"
        );
    }

    #[test]
    fn test_validate_product_rejects_negative_price() {
        let payload = ProductPayload {
            price: Some(Money::from_cents(-100)),
            ..widget()
        };
        assert!(matches!(
            validate_product(&payload),
            Err(ValidationError::Negative { .. })
        ));
    }

    #[test]
    fn test_missing_price_defaults_to_zero() {
        let payload = ProductPayload {
            price: None,
            ..widget()
        };
        assert_eq!(validate_product(&payload).unwrap().price, Money::zero());
    }
}
