//! Translation catalogue document model.
//!
//! A catalogue groups message entries under named contexts. Each entry
//! records a verbatim source string, its translation, and an optional
//! source-location reference that is informational only and never takes
//! part in lookup. Lookup is by (context, exact source string).
//!
//! The on-disk representation is JSON via serde; the Japanese catalogue
//! shipped with the crate is embedded at compile time.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Embedded Japanese catalogue document.
const JA_CATALOG_JSON: &str = include_str!("locale/ja.json");

/// Errors raised while loading a catalogue document.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The document is not valid catalogue JSON.
    #[error("Malformed catalogue document: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The document could not be read.
    #[error("Failed to read catalogue: {0}")]
    Io(#[from] std::io::Error),
}

/// Informational reference to where a message originates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    /// Originating file, relative to the crate root.
    pub file: String,
    /// Line number within the file.
    pub line: u32,
}

/// One translatable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEntry {
    /// Where the message is emitted from (informational only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,

    /// Verbatim source string, possibly containing positional placeholders.
    pub source: String,

    /// Translation in the catalogue's target locale.
    pub translation: String,
}

/// Ordered list of messages belonging to one component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextBlock {
    /// Context (component) name, e.g. `TileLayer`.
    pub name: String,

    /// Message entries in document order.
    pub messages: Vec<MessageEntry>,
}

/// A translation catalogue for one target locale.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    /// Locale identifier, e.g. `ja_JP`.
    pub language: String,

    /// Context blocks in document order.
    pub contexts: Vec<ContextBlock>,

    /// Lookup index: context name -> source string -> translation.
    #[serde(skip)]
    index: HashMap<String, HashMap<String, String>>,
}

impl Catalog {
    /// Parses a catalogue from its JSON document form.
    pub fn from_json(document: &str) -> Result<Self, CatalogError> {
        let mut catalog: Catalog = serde_json::from_str(document)?;
        catalog.rebuild_index();
        Ok(catalog)
    }

    /// Serializes the catalogue back to its JSON document form.
    pub fn to_json(&self) -> Result<String, CatalogError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Returns the catalogue shipped with the crate for Japanese.
    pub fn japanese() -> Self {
        // The embedded document is covered by the catalogue tests
        Self::from_json(JA_CATALOG_JSON).expect("embedded ja catalogue is valid")
    }

    /// Looks up the recorded translation for (context, source).
    pub fn lookup(&self, context: &str, source: &str) -> Option<&str> {
        self.index
            .get(context)?
            .get(source)
            .map(String::as_str)
    }

    /// Returns the context block with the given name, if present.
    pub fn context(&self, name: &str) -> Option<&ContextBlock> {
        self.contexts.iter().find(|c| c.name == name)
    }

    /// Total number of message entries across all contexts.
    pub fn message_count(&self) -> usize {
        self.contexts.iter().map(|c| c.messages.len()).sum()
    }

    fn rebuild_index(&mut self) {
        self.index.clear();
        for context in &self.contexts {
            let by_source = self.index.entry(context.name.clone()).or_default();
            for message in &context.messages {
                by_source
                    .entry(message.source.clone())
                    .or_insert_with(|| message.translation.clone());
            }
        }
    }
}
