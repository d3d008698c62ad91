//! Record types for the four memory kinds.
//!
//! Field names are the wire contract with the remote table backend
//! (case-sensitive). Extra fields returned by the backend, such as a
//! server-assigned row id, are ignored on deserialize.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::num::NonZeroU32;

/// Backend table holding semantic facts.
pub const SEMANTIC_TABLE: &str = "semantic_memory";
/// Backend table holding the episodic interaction log.
pub const EPISODIC_TABLE: &str = "episodic_memory";
/// Backend table holding procedural habit records.
pub const PROCEDURAL_TABLE: &str = "procedural_memory";

/// Category of a semantic fact.
///
/// The wire form is the PascalCase variant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FactCategory {
    /// Facts about the user themselves.
    Personal,
    /// Facts about ongoing projects.
    Project,
    /// Facts about people the user knows.
    Contact,
    /// User preferences.
    Preference,
}

impl FactCategory {
    /// The wire-contract name of this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            FactCategory::Personal => "Personal",
            FactCategory::Project => "Project",
            FactCategory::Contact => "Contact",
            FactCategory::Preference => "Preference",
        }
    }
}

impl std::fmt::Display for FactCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A durable, categorized key/value fact.
///
/// Append-only: `key` uniqueness is NOT enforced and duplicates are
/// permitted. Once inserted, facts are never updated or deleted by the
/// substrate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticFact {
    /// Category of the fact.
    pub category: FactCategory,
    /// Fact key. Not unique.
    pub key: String,
    /// Fact value.
    pub value: String,
    /// When the fact was stored.
    pub created_at: DateTime<Utc>,
}

/// One entry in the timestamped interaction log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodicEntry {
    /// Kind of interaction (conversation, action, ...). Free-form.
    pub interaction_type: String,
    /// Textual content of the interaction.
    pub content: String,
    /// Metadata mapping, serialized to a JSON string (`"{}"` when absent).
    pub metadata: String,
    /// When the interaction happened.
    pub timestamp: DateTime<Utc>,
}

impl EpisodicEntry {
    /// Deserialize the metadata payload back into a mapping.
    pub fn parsed_metadata(&self) -> HashMap<String, serde_json::Value> {
        serde_json::from_str(&self.metadata).unwrap_or_default()
    }
}

/// A recorded habitual action.
///
/// Append-only: repeated recordings of the same action create new rows, they
/// never merge with or update an existing row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProceduralHabit {
    /// Description of the action.
    pub action: String,
    /// Executions per period. Always at least 1.
    pub frequency: NonZeroU32,
    /// Context the action happens in.
    pub context: String,
    /// When the action was last executed.
    pub last_executed: DateTime<Utc>,
}
