//! Input validation for aid-planning problems.
//!
//! Checks structural integrity of households and requests before
//! planning. Detects:
//! - Empty household or request sets
//! - Duplicate IDs
//! - Requests referencing unknown households
//! - Non-positive request hours and negative household history
//!
//! The optimizer itself assumes validated input; this is the caller-side
//! gate the service facade runs first.

use std::collections::HashSet;
use std::fmt;

use crate::models::{Household, Request};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// No households were supplied.
    NoHouseholds,
    /// No requests were supplied.
    NoRequests,
    /// Two entities share the same ID.
    DuplicateId,
    /// A request references a household that doesn't exist.
    UnknownHousehold,
    /// A request asks for zero, negative or non-finite hours.
    InvalidHours,
    /// A household carries negative or non-finite history.
    InvalidHistory,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates the input data for a planning run.
///
/// Checks:
/// 1. At least one household and one request
/// 2. No duplicate household IDs
/// 3. No duplicate request IDs
/// 4. Household history hours are finite and non-negative
/// 5. Every request references an existing household
/// 6. Every request asks for a positive, finite number of hours
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(households: &[Household], requests: &[Request]) -> ValidationResult {
    let mut errors = Vec::new();

    if households.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoHouseholds,
            "No households were provided",
        ));
    }
    if requests.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoRequests,
            "No requests were provided",
        ));
    }

    let mut household_ids = HashSet::new();
    for h in households {
        if !household_ids.insert(h.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate household ID: {}", h.id),
            ));
        }
        let history_ok = [h.hours_given, h.hours_received]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0);
        if !history_ok {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidHistory,
                format!(
                    "Household {} has invalid history (given {}, received {})",
                    h.id, h.hours_given, h.hours_received
                ),
            ));
        }
    }

    let mut request_ids = HashSet::new();
    for r in requests {
        if !request_ids.insert(r.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate request ID: {}", r.id),
            ));
        }
        if !household_ids.contains(&r.household_id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownHousehold,
                format!(
                    "Request {} references unknown household {}",
                    r.id, r.household_id
                ),
            ));
        }
        if !(r.estimated_hours.is_finite() && r.estimated_hours > 0.0) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidHours,
                format!(
                    "Request {} must ask for a positive number of hours, got {}",
                    r.id, r.estimated_hours
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
