//! Codec module
//!
//! Entry points for turning `response_format` values into wire JSON and back,
//! plus the encoder context that controls key ordering.

mod encoder;
mod error;

pub use encoder::{is_sorted, sort_keys, EncoderOptions, JsonEncoder, KeyOrder, KeyOrderScope};
pub use error::{CodecError, CodecResult};

use crate::protocol::ResponseFormat;
use serde_json::Value;
use tracing::{debug, warn};

/// Encode a response format into its wire object
pub fn encode_response_format(format: &ResponseFormat) -> CodecResult<Value> {
    JsonEncoder::default().to_value(format)
}

/// Decode a response format from an already-parsed JSON value
pub fn decode_response_format(value: Value) -> CodecResult<ResponseFormat> {
    finish_decode(serde_json::from_value(value))
}

/// Decode a response format from JSON text
pub fn decode_response_format_str(json: &str) -> CodecResult<ResponseFormat> {
    finish_decode(serde_json::from_str(json))
}

/// Decode a response format from JSON bytes
pub fn decode_response_format_slice(bytes: &[u8]) -> CodecResult<ResponseFormat> {
    finish_decode(serde_json::from_slice(bytes))
}

fn finish_decode(
    result: Result<ResponseFormat, serde_json::Error>,
) -> CodecResult<ResponseFormat> {
    match result {
        Ok(format) => {
            debug!(wire_type = format.wire_type(), "decoded response_format");
            Ok(format)
        }
        Err(err) => {
            let err = CodecError::from_decode(err);
            warn!(error = %err, "rejected response_format");
            Err(err)
        }
    }
}
