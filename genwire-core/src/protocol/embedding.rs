//! Embedding request and response records

use super::model::Model;
use serde::{Deserialize, Serialize};

/// One embedding vector in a response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingObject {
    /// Object type (always "embedding")
    pub object: String,

    /// The vector
    pub embedding: Vec<f64>,

    /// Position of the matching input
    pub index: usize,
}

impl EmbeddingObject {
    /// Length of the vector
    pub fn dimensions(&self) -> usize {
        self.embedding.len()
    }
}

/// Input text for an embeddings call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EmbeddingInput {
    /// A single string
    Text(String),
    /// Several strings embedded in one call
    Batch(Vec<String>),
}

impl EmbeddingInput {
    /// Number of inputs
    pub fn len(&self) -> usize {
        match self {
            EmbeddingInput::Text(_) => 1,
            EmbeddingInput::Batch(items) => items.len(),
        }
    }

    /// Check if there is nothing to embed
    pub fn is_empty(&self) -> bool {
        match self {
            EmbeddingInput::Text(_) => false,
            EmbeddingInput::Batch(items) => items.is_empty(),
        }
    }
}

impl From<&str> for EmbeddingInput {
    fn from(text: &str) -> Self {
        EmbeddingInput::Text(text.to_string())
    }
}

impl From<String> for EmbeddingInput {
    fn from(text: String) -> Self {
        EmbeddingInput::Text(text)
    }
}

impl From<Vec<String>> for EmbeddingInput {
    fn from(items: Vec<String>) -> Self {
        EmbeddingInput::Batch(items)
    }
}

/// Embeddings request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingsRequest {
    /// Embedding model
    pub model: Model,

    /// Text to embed
    pub input: EmbeddingInput,

    /// Requested vector length (supported by newer models)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<u32>,

    /// User identifier for abuse detection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl EmbeddingsRequest {
    /// Create a request for the given model and input
    pub fn new(model: impl Into<Model>, input: impl Into<EmbeddingInput>) -> Self {
        Self {
            model: model.into(),
            input: input.into(),
            dimensions: None,
            user: None,
        }
    }

    /// Set the vector length
    pub fn with_dimensions(mut self, dimensions: u32) -> Self {
        self.dimensions = Some(dimensions);
        self
    }
}

/// Token usage for an embeddings call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddingUsage {
    /// Tokens in the input
    pub prompt_tokens: u32,

    /// Total tokens billed
    pub total_tokens: u32,
}

/// Embeddings response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingsResponse {
    /// Object type (usually "list")
    pub object: String,

    /// One entry per input
    pub data: Vec<EmbeddingObject>,

    /// Model that produced the vectors
    pub model: String,

    /// Token usage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<EmbeddingUsage>,
}

impl EmbeddingsResponse {
    /// The vectors ordered by input position
    pub fn into_vectors(mut self) -> Vec<Vec<f64>> {
        self.data.sort_by_key(|item| item.index);
        self.data.into_iter().map(|item| item.embedding).collect()
    }
}
