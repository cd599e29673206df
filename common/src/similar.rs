//! Search for decks which share most of their cards.

use itertools::Itertools;

use crate::deck::Deck;

/// Smallest number of shared card copies for two decks to count as similar.
pub const MIN_MATCHES: u32 = 20;

/// Find decks similar to `target`.
///
/// Only decks of the same format and class are considered, and decks identical to `target` are
/// skipped. Returns the indices of the similar candidates together with their number of shared
/// card copies, most similar first.
pub fn find_similar<'a>(
    target: &Deck,
    candidates: impl IntoIterator<Item = &'a Deck>,
) -> Vec<(usize, u32)> {
    candidates
        .into_iter()
        .enumerate()
        .filter(|(_, deck)| {
            deck.format() == target.format() && deck.class() == target.class() && *deck != target
        })
        .map(|(idx, deck)| (idx, target.matches(deck)))
        .filter(|&(_, matches)| matches >= MIN_MATCHES)
        .sorted_by(|lhs, rhs| rhs.1.cmp(&lhs.1).then(lhs.0.cmp(&rhs.0)))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::card::{CardClass, DbfId};

    fn deck(format: u32, class: CardClass, cards: impl IntoIterator<Item = (DbfId, u32)>) -> Deck {
        let mut deck = Deck::new(format, 7, class);
        for (id, count) in cards {
            deck.increment(id, count);
        }
        deck
    }

    /// Fifteen pairs, with the first `replaced` ids swapped for fresh ones.
    fn variant(replaced: u32) -> Deck {
        deck(
            2,
            CardClass::Rogue,
            (0..15).map(|idx| if idx < replaced { (100 + idx, 2) } else { (idx, 2) }),
        )
    }

    #[test]
    fn ordered_by_matches() {
        let target = variant(0);
        let candidates = [variant(3), variant(1), variant(6), variant(2)];

        assert_eq!(
            find_similar(&target, &candidates),
            [(1, 28), (3, 26), (0, 24)]
        );
    }

    #[test]
    fn same_format_and_class_only() {
        let target = variant(0);
        let cards = variant(1)
            .entries()
            .map(|entry| (entry.id(), entry.count()))
            .collect::<Vec<_>>();
        let other_format = deck(1, CardClass::Rogue, cards.clone());
        let other_class = deck(2, CardClass::Mage, cards);

        assert!(find_similar(&target, &[other_format, other_class]).is_empty());
    }

    #[test]
    fn identical_deck_is_skipped() {
        let target = variant(0);
        assert_eq!(find_similar(&target, &[variant(0), variant(1)]), [(1, 28)]);
    }

    #[test]
    fn threshold() {
        let target = variant(0);
        // 10 shared pairs
        assert_eq!(find_similar(&target, &[variant(5)]), [(0, 20)]);
        // 9 shared pairs
        assert!(find_similar(&target, &[variant(6)]).is_empty());
    }
}
