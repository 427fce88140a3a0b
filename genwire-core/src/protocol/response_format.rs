//! Response format selection
//!
//! `ResponseFormat` tells the API how to shape generated output. It has a
//! bespoke wire encoding:
//!
//! ```json
//! {"type": "text"}                                   // Auto
//! {"type": "json_object"}                            // Type("json_object")
//! {"type": "json_schema", "json_schema": {...}}      // StructuredOutput(..)
//! ```
//!
//! Decoding accepts an object with a string `type` field, which always yields
//! `Type(..)`, or the bare string `"auto"`. A structured-output object decodes
//! to `Type("json_schema")`: the nested schema is not read back.

use crate::codec::{is_sorted, CodecResult, JsonEncoder, KeyOrder};
use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

const TYPE_KEY: &str = "type";
const JSON_SCHEMA_KEY: &str = "json_schema";
const TEXT_TYPE: &str = "text";
const JSON_OBJECT_TYPE: &str = "json_object";
const JSON_SCHEMA_TYPE: &str = "json_schema";
const AUTO_LITERAL: &str = "auto";

const INVALID_STRUCTURE: &str = "invalid response_format structure: expected an object \
                                 with a string \"type\" field or the string \"auto\"";

/// How the API should format generated output
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResponseFormat {
    /// No explicit format; sent as `{"type": "text"}`
    #[default]
    Auto,
    /// A named format such as `json_object`
    Type(String),
    /// Output constrained to a caller-supplied JSON schema
    StructuredOutput(JsonSchema),
}

impl ResponseFormat {
    /// JSON mode
    pub fn json_object() -> Self {
        Self::Type(JSON_OBJECT_TYPE.to_string())
    }

    /// Schema-constrained output
    pub fn structured_output(schema: JsonSchema) -> Self {
        Self::StructuredOutput(schema)
    }

    /// The value written under the `type` key
    pub fn wire_type(&self) -> &str {
        match self {
            Self::Auto => TEXT_TYPE,
            Self::Type(name) => name,
            Self::StructuredOutput(_) => JSON_SCHEMA_TYPE,
        }
    }

    /// The schema, for structured output
    pub fn schema(&self) -> Option<&JsonSchema> {
        match self {
            Self::StructuredOutput(schema) => Some(schema),
            _ => None,
        }
    }
}

impl Serialize for ResponseFormat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Auto | Self::Type(_) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(TYPE_KEY, self.wire_type())?;
                map.end()
            }
            Self::StructuredOutput(schema) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry(TYPE_KEY, JSON_SCHEMA_TYPE)?;
                map.serialize_entry(JSON_SCHEMA_KEY, schema)?;
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for ResponseFormat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ResponseFormatVisitor)
    }
}

struct ResponseFormatVisitor;

impl<'de> Visitor<'de> for ResponseFormatVisitor {
    type Value = ResponseFormat;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a response_format object with a string \"type\" field or the string \"auto\"")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<ResponseFormat, E> {
        if value == AUTO_LITERAL {
            Ok(ResponseFormat::Auto)
        } else {
            Err(E::custom(format!(
                "invalid response_format structure: unsupported value {value:?}"
            )))
        }
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<ResponseFormat, A::Error> {
        let mut kind: Option<TypeField> = None;
        while let Some(key) = map.next_key::<String>()? {
            if key == TYPE_KEY {
                if kind.is_some() {
                    return Err(de::Error::duplicate_field(TYPE_KEY));
                }
                kind = Some(map.next_value()?);
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }

        match kind {
            Some(TypeField::Name(name)) => Ok(ResponseFormat::Type(name)),
            _ => Err(de::Error::custom(INVALID_STRUCTURE)),
        }
    }
}

/// The `type` entry: a string, or anything else (rejected after the map is drained)
#[derive(Deserialize)]
#[serde(untagged)]
enum TypeField {
    Name(String),
    #[allow(dead_code)]
    Other(IgnoredAny),
}

/// A named JSON schema for structured output
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JsonSchema {
    /// Schema identifier
    pub name: String,

    /// The schema document, opaque to this crate
    pub schema: Value,

    /// Ask the API to enforce the schema exactly
    #[serde(default = "default_true")]
    pub strict: bool,
}

impl JsonSchema {
    /// Create a strict schema from a rendered document
    pub fn new(name: impl Into<String>, schema: Value) -> Self {
        Self {
            name: name.into(),
            schema,
            strict: true,
        }
    }

    /// Create a strict schema from any serializable payload
    pub fn from_serializable<T: Serialize + ?Sized>(
        name: impl Into<String>,
        schema: &T,
    ) -> CodecResult<Self> {
        let schema = JsonEncoder::default().to_value(schema)?;
        Ok(Self::new(name, schema))
    }

    /// Set strict mode
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

impl Serialize for JsonSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // The schema document always goes out with sorted keys.
        let mut encoder = JsonEncoder::default();
        let schema = {
            let scope = encoder.with_key_order(KeyOrder::Sorted);
            debug_assert_eq!(scope.key_order(), KeyOrder::Sorted);
            scope.arrange(&self.schema)
        };
        debug_assert!(
            is_sorted(&schema),
            "json_schema.schema for {:?} was not emitted with sorted keys",
            self.name
        );

        // name < schema < strict
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("schema", &schema)?;
        map.serialize_entry("strict", &self.strict)?;
        map.end()
    }
}

fn default_true() -> bool {
    true
}
