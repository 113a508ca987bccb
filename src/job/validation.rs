//! Request validation for job records.
//!
//! Creation payloads are checked here before any record is stored, so the
//! document-generation core never sees a job missing its caller-level
//! preconditions.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use super::models::{CreateAirSampleRequest, CreateJobRequest, CreateMoistureReadingRequest};

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

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

    /// Create error for an empty required field
    pub fn empty_field(field: &str, label: &str) -> Self {
        Self::new(field, format!("{label} must not be empty"))
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

    /// Formatted message listing every failure, one per line.
    pub fn to_message(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }

        let mut parts = vec![format!(
            "Validation failed: {} error(s) found",
            self.errors.len()
        )];
        for (i, error) in self.errors.iter().enumerate() {
            parts.push(format!("{}. {}", i + 1, error));
        }
        parts.join("\n")
    }

    /// Convert to Result - Ok if no errors, Err with formatted message otherwise
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

/// Validate an email address
pub fn validate_email(value: &str, field: &str, errors: &mut ValidationErrors) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(ValidationError::empty_field(field, "Email"));
        return;
    }
    if !EMAIL_RE.is_match(trimmed) {
        errors.add(ValidationError::new(
            field,
            format!("'{trimmed}' is not a valid email address"),
        ));
    }
}

/// Validate a phone number (10-11 digits, separators allowed)
pub fn validate_phone(value: &str, field: &str, errors: &mut ValidationErrors) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(ValidationError::empty_field(field, "Phone"));
        return;
    }

    let digits: String = trimmed.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() < 10 || digits.len() > 11 {
        errors.add(ValidationError::new(field, "Phone number is not valid"));
    }
}

/// Validate a ZIP code (5 digits, optional +4)
pub fn validate_zip(value: &str, field: &str, errors: &mut ValidationErrors) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(ValidationError::empty_field(field, "ZIP code"));
        return;
    }

    let valid = match trimmed.split_once('-') {
        Some((five, four)) => {
            five.len() == 5
                && four.len() == 4
                && five.chars().all(|c| c.is_ascii_digit())
                && four.chars().all(|c| c.is_ascii_digit())
        }
        None => trimmed.len() == 5 && trimmed.chars().all(|c| c.is_ascii_digit()),
    };
    if !valid {
        errors.add(ValidationError::new(field, "ZIP code is not valid"));
    }
}

impl CreateJobRequest {
    /// Validate all creation input and return descriptive errors if invalid.
    pub fn validate(&self) -> Result<(), String> {
        let mut errors = ValidationErrors::new();

        validate_required(
            &self.customer.name,
            "customer.name",
            "Customer name",
            &mut errors,
        );
        validate_phone(&self.customer.phone, "customer.phone", &mut errors);
        validate_email(&self.customer.email, "customer.email", &mut errors);

        validate_required(
            &self.property.street,
            "property.street",
            "Street address",
            &mut errors,
        );
        validate_required(&self.property.city, "property.city", "City", &mut errors);
        validate_required(&self.property.state, "property.state", "State", &mut errors);
        validate_zip(&self.property.zip, "property.zip", &mut errors);

        errors.into_result()
    }
}

impl CreateMoistureReadingRequest {
    pub fn validate(&self) -> Result<(), String> {
        let mut errors = ValidationErrors::new();
        validate_required(&self.room, "room", "Room", &mut errors);
        validate_required(
            &self.inspector_initials,
            "inspectorInitials",
            "Inspector initials",
            &mut errors,
        );
        if !(0.0..=100.0).contains(&self.moisture_percentage) {
            errors.add(ValidationError::new(
                "moisturePercentage",
                "Moisture percentage must be between 0 and 100",
            ));
        }
        errors.into_result()
    }
}

impl CreateAirSampleRequest {
    pub fn validate(&self) -> Result<(), String> {
        let mut errors = ValidationErrors::new();
        validate_required(&self.location, "location", "Sample location", &mut errors);
        validate_required(&self.lab_name, "labName", "Lab name", &mut errors);
        errors.into_result()
    }
}
