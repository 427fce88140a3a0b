//! Genwire Core Library
//!
//! Wire-level data models for a generative-AI HTTP API: model identifiers,
//! response-format selection, chat and embedding payloads, and the JSON
//! encoder context those payloads are rendered with.

pub mod codec;
pub mod config;
pub mod protocol;

/// Returns the version of the Genwire Core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
