//! Configuration schema structures with serde support

use super::error::{ValidationError, ValidationErrorKind};
use crate::codec::{EncoderOptions, JsonEncoder};
use crate::protocol::{ChatRequest, JsonSchema, Message, Model, ResponseFormat};
use serde::Deserialize;
use std::collections::HashSet;

/// Supported configuration schema version
pub const CONFIG_VERSION: &str = "0.1";

/// Root configuration structure.
///
/// Load-only: `response_format: auto` would write back as `{type: text}`,
/// which loads as `Type("text")`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenwireConfig {
    /// Schema version (required - no default)
    pub version: String,

    /// Default model for new requests
    #[serde(default = "default_model")]
    pub model: Model,

    /// Default response format for new requests
    #[serde(default)]
    pub response_format: ResponseFormat,

    /// Encoder settings for request bodies
    #[serde(default)]
    pub encoding: EncoderOptions,

    /// Named structured-output schemas
    #[serde(default)]
    pub schemas: Vec<JsonSchema>,
}

fn default_model() -> Model {
    Model::Gpt4oMini
}

impl GenwireConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.version.is_empty() {
            return Err(ValidationError::required("version"));
        }

        if self.version != CONFIG_VERSION {
            return Err(ValidationError::new(
                "version",
                ValidationErrorKind::InvalidVersion {
                    expected: CONFIG_VERSION.to_string(),
                    actual: self.version.clone(),
                },
            ));
        }

        if self.model.as_str().is_empty() {
            return Err(ValidationError::required("model"));
        }

        if let ResponseFormat::Type(name) = &self.response_format {
            if name.is_empty() {
                return Err(ValidationError::required("response_format.type"));
            }
        }

        let mut seen_names = HashSet::new();
        for (i, schema) in self.schemas.iter().enumerate() {
            if !seen_names.insert(&schema.name) {
                return Err(ValidationError::new(
                    format!("schemas[{}].name", i),
                    ValidationErrorKind::DuplicateValue {
                        value: schema.name.clone(),
                    },
                ));
            }

            if !schema.schema.is_object() {
                return Err(ValidationError::invalid_format(
                    format!("schemas[{}].schema", i),
                    "schema document must be a JSON object",
                ));
            }
        }

        Ok(())
    }

    /// A fresh encoder configured from `encoding`
    pub fn encoder(&self) -> JsonEncoder {
        JsonEncoder::new(self.encoding)
    }

    /// Structured-output format for a named schema
    pub fn structured_output(&self, name: &str) -> Option<ResponseFormat> {
        self.schemas
            .iter()
            .find(|schema| schema.name == name)
            .cloned()
            .map(ResponseFormat::StructuredOutput)
    }

    /// A chat request seeded with the default model and response format
    pub fn chat_request(&self, messages: Vec<Message>) -> ChatRequest {
        ChatRequest::new(self.model.clone(), messages)
            .with_response_format(self.response_format.clone())
    }
}
