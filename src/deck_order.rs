//! Order by cost, then name

use std::cmp::Ordering;

use common::{card::Card, card_data::CardData, deck::Deck};

#[must_use]
pub fn deck_order(lhs: &Card, rhs: &Card) -> Ordering {
    Ordering::Equal
        .then(lhs.cost.cmp(&rhs.cost))
        .then(lhs.name.cmp(&rhs.name))
        .then(lhs.dbf_id.cmp(&rhs.dbf_id))
}

/// Cards of a deck with their number of copies, in deck order.
///
/// Entries missing from the card database are skipped.
#[must_use]
pub fn ordered_cards<'a>(deck: &Deck, cards: &'a CardData) -> Vec<(&'a Card, u32)> {
    let mut result: Vec<_> = deck
        .entries()
        .filter_map(|entry| Some((cards.get(entry.id())?, entry.count())))
        .collect();
    result.sort_by(|(lhs, _), (rhs, _)| deck_order(lhs, rhs));
    result
}

#[cfg(test)]
mod test {
    use common::card::{Card, CardClass, CardType, Rarity};

    use super::*;

    fn card(dbf_id: u32, cost: u32, name: &str) -> Card {
        Card {
            dbf_id,
            card_id: format!("TEST_{dbf_id}"),
            name: name.to_owned(),
            cost,
            card_class: CardClass::Neutral,
            card_type: CardType::Minion,
            rarity: Rarity::Common,
            set: "CORE".to_owned(),
            collectible: true,
        }
    }

    #[test]
    fn cost_then_name() {
        let cards = CardData::new([
            card(1, 3, "Apple"),
            card(2, 1, "Zebra"),
            card(3, 1, "Bear"),
            card(4, 0, "Coin"),
        ]);

        let mut deck = Deck::new(2, 100, CardClass::Rogue);
        for id in 1..=5 {
            deck.increment(id, 2);
        }

        let names: Vec<_> = ordered_cards(&deck, &cards)
            .into_iter()
            .map(|(card, count)| (card.name.as_str(), count))
            .collect();
        assert_eq!(
            names,
            [("Coin", 2), ("Bear", 2), ("Zebra", 2), ("Apple", 2)]
        );
    }

    #[test]
    fn same_name() {
        let lhs = card(2, 1, "Twin");
        let rhs = card(1, 1, "Twin");
        assert_eq!(deck_order(&lhs, &rhs), Ordering::Greater);
        assert_eq!(deck_order(&lhs, &lhs), Ordering::Equal);
    }
}
