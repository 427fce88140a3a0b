//! Model identifiers

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// A model identifier.
///
/// Well-known ids get their own variant; anything else is carried verbatim in
/// `Custom`. On the wire every model is its id string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Model {
    Gpt4o,
    Gpt4oMini,
    Gpt4Turbo,
    Gpt4,
    Gpt35Turbo,
    O1,
    O1Mini,
    O3Mini,
    TextEmbedding3Small,
    TextEmbedding3Large,
    TextEmbeddingAda002,
    /// Any id without a dedicated variant
    Custom(String),
}

impl Model {
    /// The wire id
    pub fn as_str(&self) -> &str {
        match self {
            Self::Gpt4o => "gpt-4o",
            Self::Gpt4oMini => "gpt-4o-mini",
            Self::Gpt4Turbo => "gpt-4-turbo",
            Self::Gpt4 => "gpt-4",
            Self::Gpt35Turbo => "gpt-3.5-turbo",
            Self::O1 => "o1",
            Self::O1Mini => "o1-mini",
            Self::O3Mini => "o3-mini",
            Self::TextEmbedding3Small => "text-embedding-3-small",
            Self::TextEmbedding3Large => "text-embedding-3-large",
            Self::TextEmbeddingAda002 => "text-embedding-ada-002",
            Self::Custom(id) => id,
        }
    }

    /// Whether this is an embedding model
    pub fn is_embedding(&self) -> bool {
        match self {
            Self::TextEmbedding3Small | Self::TextEmbedding3Large | Self::TextEmbeddingAda002 => {
                true
            }
            Self::Custom(id) => id.starts_with("text-embedding-"),
            _ => false,
        }
    }

    fn parse(id: &str) -> Option<Self> {
        let model = match id {
            "gpt-4o" => Self::Gpt4o,
            "gpt-4o-mini" => Self::Gpt4oMini,
            "gpt-4-turbo" => Self::Gpt4Turbo,
            "gpt-4" => Self::Gpt4,
            "gpt-3.5-turbo" => Self::Gpt35Turbo,
            "o1" => Self::O1,
            "o1-mini" => Self::O1Mini,
            "o3-mini" => Self::O3Mini,
            "text-embedding-3-small" => Self::TextEmbedding3Small,
            "text-embedding-3-large" => Self::TextEmbedding3Large,
            "text-embedding-ada-002" => Self::TextEmbeddingAda002,
            _ => return None,
        };
        Some(model)
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Model {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s).unwrap_or_else(|| Self::Custom(s.to_string())))
    }
}

impl From<&str> for Model {
    fn from(id: &str) -> Self {
        Self::parse(id).unwrap_or_else(|| Self::Custom(id.to_string()))
    }
}

impl From<String> for Model {
    fn from(id: String) -> Self {
        Self::parse(&id).unwrap_or(Self::Custom(id))
    }
}

impl From<Model> for String {
    fn from(model: Model) -> Self {
        match model {
            Model::Custom(id) => id,
            known => known.as_str().to_string(),
        }
    }
}
