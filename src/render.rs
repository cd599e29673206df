//! Human readable output of decks.

use std::{fmt, io};

use common::{
    card_data::CardData,
    deck::Deck,
    deckstring::{self, DeckDescriptor},
    share::{self, ListedCard, ShareHeader},
};
use itertools::Itertools;

use crate::deck_order::ordered_cards;

/// Write the raw content of a deck code.
pub fn write_descriptor(out: &mut impl io::Write, descriptor: &DeckDescriptor) -> io::Result<()> {
    writeln!(out, "Format: {}", descriptor.format)?;
    writeln!(out, "Heroes: {}", descriptor.heroes.iter().join(", "))?;
    writeln!(out, "Cards: {}", descriptor.total_cards())?;

    for &(id, count) in &descriptor.cards {
        writeln!(out, "  {count}x {id}")?;
    }

    Ok(())
}

/// Write a resolved deck as a list of card names.
pub fn write_decklist(out: &mut impl io::Write, deck: &Deck, cards: &CardData) -> io::Result<()> {
    let hero = cards
        .get(deck.hero())
        .map_or_else(|| deck.hero().to_string(), |card| card.name.clone());

    writeln!(out, "Format: {}", cards.format_label(deck.format()))?;
    writeln!(out, "Class: {} ({hero})", deck.class())?;
    writeln!(out, "Cards: {}", deck.total())?;

    for (card, count) in ordered_cards(deck, cards) {
        writeln!(out, "  {count}x ({}) {}", card.cost, card.name)?;
    }

    Ok(())
}

/// A deck in the format the game uses when copying a deck.
///
/// # Errors
///
/// See [`share::write`].
pub fn share_text(deck: &Deck, cards: &CardData, name: &str) -> Result<String, fmt::Error> {
    let class = deck.class().to_string();
    let format = cards.format_label(deck.format());
    let header = ShareHeader {
        name,
        class: &class,
        format: &format,
    };
    let listed = ordered_cards(deck, cards)
        .into_iter()
        .map(|(card, count)| ListedCard {
            count,
            cost: card.cost,
            name: &card.name,
        });

    let mut text = String::new();
    share::write(
        &mut text,
        &header,
        listed,
        &deckstring::encode(&deck.descriptor()),
    )?;
    Ok(text)
}
