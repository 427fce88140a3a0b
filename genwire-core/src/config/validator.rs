//! Configuration validation utilities

use super::error::ValidationError;
use super::schema::GenwireConfig;
use crate::protocol::ResponseFormat;
use regex::Regex;

/// Schema names accepted by the API
const SCHEMA_NAME_PATTERN: &str = r"^[A-Za-z0-9_-]{1,64}$";

/// Configuration validator with additional validation rules
pub struct ConfigValidator {
    schema_name_pattern: Regex,
}

impl Default for ConfigValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigValidator {
    /// Create a new validator
    pub fn new() -> Self {
        Self {
            schema_name_pattern: Regex::new(SCHEMA_NAME_PATTERN)
                .expect("schema name pattern is a valid regex"),
        }
    }

    /// Validate a configuration with extended rules
    pub fn validate(&self, config: &GenwireConfig) -> Result<(), ValidationError> {
        // Built-in structural checks first
        config.validate()?;

        self.validate_schema_names(config)?;
        self.validate_response_format(config)?;

        Ok(())
    }

    /// Check if a name is acceptable as a structured-output schema name
    pub fn is_valid_schema_name(&self, name: &str) -> bool {
        self.schema_name_pattern.is_match(name)
    }

    fn validate_schema_names(&self, config: &GenwireConfig) -> Result<(), ValidationError> {
        for (i, schema) in config.schemas.iter().enumerate() {
            if !self.is_valid_schema_name(&schema.name) {
                return Err(ValidationError::invalid_format(
                    format!("schemas[{i}].name"),
                    format!("'{}' does not match {}", schema.name, SCHEMA_NAME_PATTERN),
                ));
            }
        }
        Ok(())
    }

    /// A bare `json_schema` type cannot carry a schema, so the API would reject it.
    fn validate_response_format(&self, config: &GenwireConfig) -> Result<(), ValidationError> {
        if let ResponseFormat::Type(name) = &config.response_format {
            if name == "json_schema" {
                return Err(ValidationError::invalid_value(
                    "response_format.type",
                    "text, json_object or another schema-less type",
                    name.clone(),
                )
                .with_context("Use a named entry under `schemas` for structured output"));
            }
        }
        Ok(())
    }
}
