//! Field validation for the form boundary
//!
//! Validation failures are caught before any network call is made; each
//! failing field carries a user-visible message.

use std::fmt::Display;

/// Trait for field validators
pub trait FieldValidator<T> {
    /// Validate a field value
    fn validate(&self, value: &T) -> Result<(), String>;
}

/// String validator with length/pattern constraints
#[derive(Debug, Clone, Default)]
pub struct StringValidator {
    min_length: Option<usize>,
    max_length: Option<usize>,
    pattern: Option<regex::Regex>,
    not_empty: bool,
}

impl StringValidator {
    /// Create a new string validator with no constraints
    pub fn new() -> Self {
        Self::default()
    }

    /// Require a non-empty (after trimming) string
    pub fn not_empty(mut self) -> Self {
        self.not_empty = true;
        self
    }

    /// Set minimum length
    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    /// Set maximum length
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Set a regex pattern the value must match
    ///
    /// # Errors
    /// Returns the regex compilation error for an invalid pattern.
    pub fn pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.pattern = Some(regex::Regex::new(pattern)?);
        Ok(self)
    }
}

impl FieldValidator<String> for StringValidator {
    fn validate(&self, value: &String) -> Result<(), String> {
        let val = value.trim();

        if self.not_empty && val.is_empty() {
            return Err("Value cannot be empty".to_string());
        }

        if let Some(min) = self.min_length {
            if val.len() < min {
                return Err(format!("Length must be at least {min} characters"));
            }
        }

        if let Some(max) = self.max_length {
            if val.len() > max {
                return Err(format!("Length must not exceed {max} characters"));
            }
        }

        if let Some(ref pattern) = self.pattern {
            if !pattern.is_match(val) {
                return Err(format!("Value does not match expected format ({})", pattern.as_str()));
            }
        }

        Ok(())
    }
}

/// Range validator for ordered types
#[derive(Debug, Clone, Default)]
pub struct RangeValidator<T> {
    min: Option<T>,
    max: Option<T>,
}

impl<T> RangeValidator<T>
where
    T: PartialOrd + Display + Clone,
{
    /// Create a new range validator with no constraints
    pub fn new() -> Self {
        Self { min: None, max: None }
    }

    /// Set minimum value
    pub fn min(mut self, min: T) -> Self {
        self.min = Some(min);
        self
    }

    /// Set maximum value
    pub fn max(mut self, max: T) -> Self {
        self.max = Some(max);
        self
    }
}

impl<T> FieldValidator<T> for RangeValidator<T>
where
    T: PartialOrd + Display + Clone,
{
    fn validate(&self, value: &T) -> Result<(), String> {
        if let Some(ref min) = self.min {
            if value < min {
                return Err(format!("Value must be at least {min}"));
            }
        }

        if let Some(ref max) = self.max {
            if value > max {
                return Err(format!("Value must not exceed {max}"));
            }
        }

        Ok(())
    }
}

/// Accumulates per-field validation failures for one form submission
#[derive(Debug, Default)]
pub struct ValidationErrors {
    errors: Vec<(String, String)>,
}

impl ValidationErrors {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure for `field`
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push((field.into(), message.into()));
    }

    /// Run a validator against a value, recording any failure under `field`
    pub fn check<T>(&mut self, field: &str, value: &T, validator: &impl FieldValidator<T>) {
        if let Err(message) = validator.validate(value) {
            self.add(field, message);
        }
    }

    /// True when no failure was recorded
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// The recorded failures, in submission order
    pub fn entries(&self) -> &[(String, String)] {
        &self.errors
    }

    /// Collapse all failures into a single user-visible message
    pub fn into_message(self) -> Option<String> {
        if self.errors.is_empty() {
            return None;
        }
        let joined = self
            .errors
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect::<Vec<_>>()
            .join("; ");
        Some(joined)
    }
}
