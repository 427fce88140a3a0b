//! Protocol module for API payload types
//!
//! This module defines the wire-level data models exchanged with a
//! generative-AI HTTP API:
//! - Model identifiers
//! - Response format selection (with its custom JSON encoding)
//! - Chat request bodies
//! - Embedding requests and responses

pub mod chat;
pub mod embedding;
pub mod model;
pub mod response_format;

pub use chat::{ChatRequest, Message, MessageRole};
pub use embedding::{
    EmbeddingInput, EmbeddingObject, EmbeddingUsage, EmbeddingsRequest, EmbeddingsResponse,
};
pub use model::Model;
pub use response_format::{JsonSchema, ResponseFormat};
