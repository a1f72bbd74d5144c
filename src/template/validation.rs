//! Input validation for the processing endpoint.
//!
//! Collects every problem with a request into one descriptive message so the
//! caller can fix all fields in a single resubmission.

use std::fmt;

/// Validation error with a field reference and a user-facing message.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// The field that failed validation
    pub field: String,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create error for a missing or empty required field
    pub fn empty_field(field: &str, label: &str) -> Self {
        Self::new(field, format!("{} is required and must not be empty", label))
    }

    /// Create error for a date that is not ISO-8601
    pub fn invalid_date(field: &str, value: &str) -> Self {
        Self::new(
            field,
            format!("'{}' is not a valid ISO-8601 date (expected YYYY-MM-DD)", value),
        )
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Collection of validation errors with formatted output.
#[derive(Debug, Default)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// One message naming every failed field.
    pub fn to_message(&self) -> String {
        let parts: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
        format!("Validation failed: {}", parts.join("; "))
    }

    /// Convert to Result - Ok if no errors, Err with the combined message.
    pub fn into_result(self) -> Result<(), String> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self.to_message())
        }
    }
}

/// Validate that a string is not empty after trimming
pub fn validate_required(value: &str, field: &str, label: &str, errors: &mut ValidationErrors) {
    if value.trim().is_empty() {
        errors.add(ValidationError::empty_field(field, label));
    }
}
