use std::{borrow::Cow, ops::Index};

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::{
    card::{Card, DbfId},
    deck::Deck,
    deckstring::{DeckDescriptor, FormatCode},
};

/// Format names used when no other table is provided.
pub const DEFAULT_FORMATS: [(FormatCode, &str); 4] =
    [(1, "Wild"), (2, "Standard"), (3, "Classic"), (4, "Twist")];

/// Reasons a well-formed deck code can not be turned into a [`Deck`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("deck code contains no hero")]
    MissingHero,
    #[error("unknown hero: {0}")]
    UnknownHero(DbfId),
    #[error("unsupported card: {0}")]
    UnsupportedCard(DbfId),
}

/// The card database.
#[derive(Debug, Clone)]
pub struct CardData {
    entries: FxHashMap<DbfId, Card>,
    formats: FxHashMap<FormatCode, String>,
}

impl Default for CardData {
    fn default() -> Self {
        Self::new([])
    }
}

impl CardData {
    #[must_use]
    pub fn new(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            entries: cards.into_iter().map(|card| (card.dbf_id, card)).collect(),
            formats: DEFAULT_FORMATS
                .iter()
                .map(|&(code, name)| (code, name.to_owned()))
                .collect(),
        }
    }

    /// Replace the format name table.
    #[must_use]
    pub fn with_formats(mut self, formats: impl IntoIterator<Item = (FormatCode, String)>) -> Self {
        self.formats = formats.into_iter().collect();
        self
    }

    #[must_use]
    pub fn entries(&self) -> &FxHashMap<DbfId, Card> {
        &self.entries
    }

    #[must_use]
    pub fn get(&self, id: DbfId) -> Option<&Card> {
        self.entries.get(&id)
    }

    #[must_use]
    pub fn format_name(&self, format: FormatCode) -> Option<&str> {
        self.formats.get(&format).map(String::as_str)
    }

    /// Name of a format, falling back to its number for unknown formats.
    #[must_use]
    pub fn format_label(&self, format: FormatCode) -> Cow<'_, str> {
        self.format_name(format)
            .map_or_else(|| Cow::Owned(format!("Format {format}")), Cow::Borrowed)
    }

    /// Look up hero and cards of a decoded deck code.
    ///
    /// The class of the deck is taken from the first hero. Every card must be includible in a
    /// deck; the format is kept as-is.
    pub fn resolve(&self, descriptor: &DeckDescriptor) -> Result<Deck, LookupError> {
        let &hero = descriptor.heroes.first().ok_or(LookupError::MissingHero)?;
        let class = self
            .get(hero)
            .ok_or(LookupError::UnknownHero(hero))?
            .card_class;

        let mut deck = Deck::new(descriptor.format, hero, class);
        for &(id, count) in &descriptor.cards {
            if !self.get(id).is_some_and(Card::is_includible) {
                return Err(LookupError::UnsupportedCard(id));
            }

            deck.increment(id, count);
        }

        Ok(deck)
    }
}

impl Index<DbfId> for CardData {
    type Output = Card;

    fn index(&self, index: DbfId) -> &Self::Output {
        &self.entries[&index]
    }
}
