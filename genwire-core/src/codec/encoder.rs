//! Per-call JSON encoder context
//!
//! Some payloads (strict structured-output schemas in particular) must reach
//! the API with every object's keys in ascending order. `serde_json` emits
//! struct fields in declaration order and, depending on crate features, maps
//! in insertion order, so sorting is an explicit encoder setting here.
//!
//! The setting lives on a `JsonEncoder` value owned by the caller, never in
//! global state. Temporary overrides go through [`JsonEncoder::with_key_order`],
//! which hands back a guard that restores the previous order when dropped.

use super::error::CodecResult;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::ops::{Deref, DerefMut};
use tracing::trace;

/// How object keys are ordered in encoded output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyOrder {
    /// Whatever order the backend produces. `to_string`/`to_vec` stream struct
    /// fields and hand-written maps in the order they are emitted. `to_value`
    /// and `arrange` go through `serde_json::Map`, which is key-sorted under
    /// serde_json's default features and insertion-ordered with `preserve_order`.
    #[default]
    Preserve,
    /// Keys of every object, at every depth, in ascending order
    Sorted,
}

/// Encoder settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EncoderOptions {
    /// Object key ordering
    #[serde(default)]
    pub key_order: KeyOrder,

    /// Emit indented output from `to_string`/`to_vec`
    #[serde(default)]
    pub pretty: bool,
}

/// An encoder context. Create one per encode call.
#[derive(Debug, Clone, Default)]
pub struct JsonEncoder {
    options: EncoderOptions,
}

impl JsonEncoder {
    /// Create an encoder with the given options
    pub fn new(options: EncoderOptions) -> Self {
        Self { options }
    }

    /// Current options
    pub fn options(&self) -> &EncoderOptions {
        &self.options
    }

    /// Current key order
    pub fn key_order(&self) -> KeyOrder {
        self.options.key_order
    }

    /// Override the key order until the returned scope is dropped.
    pub fn with_key_order(&mut self, order: KeyOrder) -> KeyOrderScope<'_> {
        let previous = self.options.key_order;
        trace!(?previous, ?order, "entering key order scope");
        self.options.key_order = order;
        KeyOrderScope {
            encoder: self,
            previous,
        }
    }

    /// Lay out an already-rendered document according to the current key order.
    pub fn arrange(&self, value: &Value) -> Value {
        match self.options.key_order {
            KeyOrder::Preserve => value.clone(),
            KeyOrder::Sorted => sort_keys(value.clone()),
        }
    }

    /// Encode into a `serde_json::Value`.
    ///
    /// Under `Preserve` the map order is the `serde_json::Map` backend's, not
    /// emission order.
    pub fn to_value<T: Serialize + ?Sized>(&self, value: &T) -> CodecResult<Value> {
        let rendered = serde_json::to_value(value)?;
        Ok(match self.options.key_order {
            KeyOrder::Preserve => rendered,
            KeyOrder::Sorted => sort_keys(rendered),
        })
    }

    /// Encode into a JSON string
    pub fn to_string<T: Serialize + ?Sized>(&self, value: &T) -> CodecResult<String> {
        let out = match (self.options.key_order, self.options.pretty) {
            (KeyOrder::Preserve, false) => serde_json::to_string(value)?,
            (KeyOrder::Preserve, true) => serde_json::to_string_pretty(value)?,
            (KeyOrder::Sorted, false) => serde_json::to_string(&self.to_value(value)?)?,
            (KeyOrder::Sorted, true) => serde_json::to_string_pretty(&self.to_value(value)?)?,
        };
        Ok(out)
    }

    /// Encode into JSON bytes
    pub fn to_vec<T: Serialize + ?Sized>(&self, value: &T) -> CodecResult<Vec<u8>> {
        self.to_string(value).map(String::into_bytes)
    }
}

/// Guard returned by [`JsonEncoder::with_key_order`].
///
/// Derefs to the encoder. Restores the replaced key order on drop.
#[derive(Debug)]
pub struct KeyOrderScope<'a> {
    encoder: &'a mut JsonEncoder,
    previous: KeyOrder,
}

impl Deref for KeyOrderScope<'_> {
    type Target = JsonEncoder;

    fn deref(&self) -> &JsonEncoder {
        self.encoder
    }
}

impl DerefMut for KeyOrderScope<'_> {
    fn deref_mut(&mut self) -> &mut JsonEncoder {
        self.encoder
    }
}

impl Drop for KeyOrderScope<'_> {
    fn drop(&mut self) {
        trace!(restored = ?self.previous, "leaving key order scope");
        self.encoder.options.key_order = self.previous;
    }
}

/// Rebuild a document so every object has its keys in ascending order.
///
/// Works whether or not `serde_json`'s `preserve_order` feature is enabled:
/// entries are re-inserted in sorted order.
pub fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let mut sorted = Map::with_capacity(entries.len());
            for (key, inner) in entries {
                sorted.insert(key, sort_keys(inner));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

/// Check that every object in the document iterates its keys in ascending order.
pub fn is_sorted(value: &Value) -> bool {
    match value {
        Value::Object(map) => {
            let keys: Vec<&String> = map.keys().collect();
            keys.windows(2).all(|pair| pair[0] <= pair[1]) && map.values().all(is_sorted)
        }
        Value::Array(items) => items.iter().all(is_sorted),
        _ => true,
    }
}
