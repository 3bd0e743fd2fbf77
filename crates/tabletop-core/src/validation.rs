//! # Validation Module
//!
//! Input validation utilities for Tabletop POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend                                                     │
//! │  ├── Disables "Create" on a blank name                                 │
//! │  └── Marks the email field invalid while typing                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Ledger: table names, item templates                               │
//! │  └── Settlement: customer email, currency code                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Billing provider                                             │
//! │  └── Rejects what it cannot invoice (surfaced as a gateway error)      │
//! │                                                                         │
//! │  Everything here runs before any state change or network call.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tabletop_core::validation::{validate_email, validate_table_name};
//!
//! assert_eq!(validate_table_name("  Patio 2 ").unwrap(), "Patio 2");
//! assert!(validate_email("guest@example.com").is_ok());
//! assert!(validate_email("not-an-email").is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::ItemTemplate;
use crate::{MAX_EMAIL_LEN, MAX_TABLE_NAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a table name and returns it trimmed.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most [`MAX_TABLE_NAME_LEN`] characters
pub fn validate_table_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "table name".to_string(),
        });
    }

    if name.chars().count() > MAX_TABLE_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "table name".to_string(),
            max: MAX_TABLE_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

/// Validates a customer email address.
///
/// ## Rules
/// ```text
///   guest.name@mail.example.com
///   └───┬────┘ └──────┬───────┘
///     local         domain
///
///   - no whitespace anywhere
///   - exactly one '@', with a non-empty local part
///   - the domain has a '.' with text on both sides
///   - at most 255 characters
/// ```
///
/// Blank emails are handled by the caller (they mean "no receipt"), so an
/// empty string here is an error.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let invalid = || ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: "must look like name@example.com".to_string(),
    };

    if email.chars().count() > MAX_EMAIL_LEN {
        return Err(ValidationError::TooLong {
            field: "email".to_string(),
            max: MAX_EMAIL_LEN,
        });
    }

    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid());
    };

    if local.is_empty() {
        return Err(invalid());
    }

    // Some '.' must split the domain into two non-empty halves.
    let dotted = domain
        .match_indices('.')
        .any(|(i, _)| i > 0 && i + 1 < domain.len());
    if !dotted {
        return Err(invalid());
    }

    Ok(())
}

/// Validates an ISO-4217 style currency code and returns it uppercased.
///
/// ## Example
/// ```rust
/// use tabletop_core::validation::validate_currency_code;
///
/// assert_eq!(validate_currency_code("usd").unwrap(), "USD");
/// assert!(validate_currency_code("US").is_err());
/// ```
pub fn validate_currency_code(code: &str) -> ValidationResult<String> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "currency".to_string(),
        });
    }

    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::InvalidFormat {
            field: "currency".to_string(),
            reason: "must be a 3-letter code such as USD or MXN".to_string(),
        });
    }

    Ok(code.to_ascii_uppercase())
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (matches everything)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Item Validators
// =============================================================================

/// Validates a unit price.
///
/// Zero is allowed (complimentary items); negative prices are not.
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: "unit price".to_string(),
        });
    }

    Ok(())
}

/// Validates an item template before it goes on a table.
pub fn validate_item_template(template: &ItemTemplate) -> ValidationResult<()> {
    if template.description.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "item description".to_string(),
        });
    }

    validate_price(template.unit_price)
}

// =============================================================================
// Unit Tests
// =============================================================================
