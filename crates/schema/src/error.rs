//! Validation error types.

use serde::Serialize;
use thiserror::Error;

/// A single rejected field with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Wire name of the offending field.
    pub field: &'static str,
    /// Human-readable reason.
    pub message: String,
}

/// Payload validation failure naming the offending field(s).
#[derive(Debug, Clone, Error)]
#[error("validation failed: {}", summarize(.errors))]
pub struct ValidationError {
    /// Field-level failures, in declaration order.
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    /// Creates a validation error for a single field.
    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError {
                field,
                message: message.into(),
            }],
        }
    }
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{} {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Accumulates field errors while a payload is checked.
#[derive(Debug, Default)]
pub(crate) struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    pub(crate) fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    /// Returns `Ok(value)` if no field was rejected.
    pub(crate) fn finish<T>(self, value: T) -> Result<T, ValidationError> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(ValidationError {
                errors: self.errors,
            })
        }
    }
}
