//! Deck dump records, as written by the deck export.

use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// A stored deck, reduced to what is needed to restore it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckRecord {
    #[serde(default)]
    pub id: Option<u64>,
    /// The deck code
    pub string: String,
    /// Creation time, kept verbatim
    pub created: String,
    /// Empty for decks which were only looked at, not saved
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub author: Option<u64>,
}

impl DeckRecord {
    #[must_use]
    pub fn is_named(&self) -> bool {
        !self.name.is_empty() && self.author.is_some()
    }
}

/// Remove records which repeat the code, author and creation time of an earlier record.
pub fn deduplicate(records: impl IntoIterator<Item = DeckRecord>) -> Vec<DeckRecord> {
    records
        .into_iter()
        .unique_by(|record| (record.string.clone(), record.author, record.created.clone()))
        .collect()
}
