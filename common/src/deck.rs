use itertools::{EitherOrBoth, Itertools};

use crate::{
    card::{CardClass, DbfId},
    deckstring::{DeckDescriptor, FormatCode},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeckEntry {
    /// The card id of this entry
    id: DbfId,
    /// Number of copies
    count: u32,
}

impl DeckEntry {
    fn new(id: DbfId) -> Self {
        Self { id, count: 0 }
    }

    #[must_use]
    pub fn id(&self) -> DbfId {
        self.id
    }

    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }
}

/// A deck whose hero and cards are known to the card database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    format: FormatCode,
    hero: DbfId,
    class: CardClass,
    /// Sorted by id, without empty entries
    entries: Vec<DeckEntry>,
}

impl Deck {
    #[must_use]
    pub fn new(format: FormatCode, hero: DbfId, class: CardClass) -> Self {
        Self {
            format,
            hero,
            class,
            entries: Vec::new(),
        }
    }

    #[must_use]
    pub fn format(&self) -> FormatCode {
        self.format
    }

    #[must_use]
    pub fn hero(&self) -> DbfId {
        self.hero
    }

    #[must_use]
    pub fn class(&self) -> CardClass {
        self.class
    }

    /// Add copies of a card, saturating at [`u32::MAX`]. Returns the actual change.
    pub fn increment(&mut self, id: DbfId, amount: u32) -> u32 {
        let idx = self
            .entries
            .binary_search_by_key(&id, DeckEntry::id)
            .unwrap_or_else(|idx| {
                self.entries.insert(idx, DeckEntry::new(id));
                idx
            });

        let entry = &mut self.entries[idx];
        let ret = u32::MAX.saturating_sub(entry.count).min(amount);
        entry.count += ret;

        if entry.count == 0 {
            self.entries.remove(idx);
        }

        ret
    }

    /// Remove copies of a card, saturating at zero. Returns the actual change.
    pub fn decrement(&mut self, id: DbfId, amount: u32) -> u32 {
        let Ok(idx) = self.entries.binary_search_by_key(&id, DeckEntry::id) else {
            return 0;
        };

        let entry = &mut self.entries[idx];
        let ret = entry.count.min(amount);
        entry.count -= ret;

        if entry.count == 0 {
            self.entries.remove(idx);
        }

        ret
    }

    #[must_use]
    pub fn count(&self, id: DbfId) -> u32 {
        self.entries
            .binary_search_by_key(&id, DeckEntry::id)
            .map_or(0, |idx| self.entries[idx].count)
    }

    pub fn entries(&self) -> impl Iterator<Item = &DeckEntry> {
        self.entries.iter()
    }

    /// Total number of card copies.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.entries
            .iter()
            .fold(0, |total, entry| total.saturating_add(entry.count))
    }

    /// Number of card copies this deck has in common with `other`.
    #[must_use]
    pub fn matches(&self, other: &Deck) -> u32 {
        self.entries()
            .merge_join_by(other.entries(), |lhs, rhs| lhs.id.cmp(&rhs.id))
            .filter_map(|entry| match entry {
                EitherOrBoth::Both(lhs, rhs) => Some(lhs.count.min(rhs.count)),
                EitherOrBoth::Left(_) | EitherOrBoth::Right(_) => None,
            })
            .sum()
    }

    /// Content of the deck as needed for a deck code.
    #[must_use]
    pub fn descriptor(&self) -> DeckDescriptor {
        DeckDescriptor {
            format: self.format,
            heroes: vec![self.hero],
            cards: self
                .entries
                .iter()
                .map(|entry| (entry.id, entry.count))
                .collect(),
        }
    }
}

#[cfg(test)]
mod test {
    use itertools::iproduct;

    use super::*;
    use crate::deckstring;

    fn deck(cards: &[(DbfId, u32)]) -> Deck {
        let mut deck = Deck::new(2, 7, CardClass::Rogue);
        for &(id, count) in cards {
            deck.increment(id, count);
        }
        deck
    }

    #[test]
    fn entries_stay_sorted() {
        let deck = deck(&[(30, 1), (10, 2), (20, 1), (10, 1)]);

        itertools::assert_equal(
            deck.entries().map(|entry| (entry.id(), entry.count())),
            [(10, 3), (20, 1), (30, 1)],
        );
        assert_eq!(deck.total(), 5);
    }

    #[test]
    fn increment_and_decrement() {
        for (start, change) in iproduct!(0..4, 0..4) {
            let mut deck = deck(&[(1, start)]);

            assert_eq!(deck.increment(1, change), change);
            assert_eq!(deck.count(1), start + change);

            assert_eq!(deck.decrement(1, change), change);
            assert_eq!(deck.count(1), start);

            assert_eq!(deck.decrement(1, 10), start);
            assert_eq!(deck.count(1), 0);
            assert_eq!(deck.entries().count(), 0);
        }
    }

    #[test]
    fn saturation() {
        let mut deck = deck(&[(1, u32::MAX - 1)]);
        assert_eq!(deck.increment(1, 5), 1);
        assert_eq!(deck.count(1), u32::MAX);

        assert_eq!(deck.decrement(2, 1), 0);
        assert_eq!(deck.increment(3, 0), 0);
        assert_eq!(deck.entries().count(), 1);
    }

    #[test]
    fn matches() {
        let lhs = deck(&[(1, 2), (2, 2), (3, 1), (4, 1)]);
        let rhs = deck(&[(1, 2), (2, 1), (3, 2), (5, 2)]);

        assert_eq!(lhs.matches(&rhs), 4);
        assert_eq!(rhs.matches(&lhs), 4);
        assert_eq!(lhs.matches(&lhs), lhs.total());
    }

    #[test]
    fn descriptor() {
        let deck = deck(&[(56677, 2), (59253, 1), (61503, 5)]);
        let decoded = deckstring::decode(&deckstring::encode(&deck.descriptor())).unwrap();

        assert_eq!(decoded.format, 2);
        assert_eq!(decoded.heroes, [7]);
        assert_eq!(decoded.cards, [(59253, 1), (56677, 2), (61503, 5)]);
    }
}
