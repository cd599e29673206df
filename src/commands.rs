use std::{
    fmt::{self, Display},
    fs::File,
    io::{self, BufReader, Read},
    path::Path,
};

use anyhow::{Context, Result};
use common::{
    card::DbfId,
    card_data::CardData,
    deck::Deck,
    deckstring::{self, DeckDescriptor, FormatCode},
    record::{self, DeckRecord},
    share,
    similar::find_similar,
};
use log::{debug, info, warn};

use crate::{
    error_handling::{ErrorKind, user_message},
    render::{share_text, write_decklist, write_descriptor},
    ui::UiManager,
};

/// Decode a deck code and print its content.
///
/// With a card database the deck is resolved and printed as a decklist, or in the share format if
/// `share_name` is given.
pub fn decode(
    out: &mut impl io::Write,
    code: &str,
    cards: Option<&CardData>,
    share_name: Option<&str>,
) -> Result<()> {
    let descriptor = deckstring::decode(code)?;

    if let Some(shared) = share::parse(code) {
        debug!("Deck name: {}", shared.name.unwrap_or("<none>"));
        let listed = shared.listed_total();
        if listed != 0 && listed != descriptor.total_cards() {
            warn!(
                "Text lists {listed} cards, but the deck code contains {}",
                descriptor.total_cards()
            );
        }
    }

    let Some(cards) = cards else {
        return Ok(write_descriptor(out, &descriptor)?);
    };

    let deck = cards.resolve(&descriptor)?;
    match share_name {
        Some(name) => write!(out, "{}", share_text(&deck, cards, name)?)?,
        None => write_decklist(out, &deck, cards)?,
    }

    Ok(())
}

/// Print the canonical deck code of a deck.
pub fn encode(
    out: &mut impl io::Write,
    format: FormatCode,
    heroes: Vec<DbfId>,
    cards: Vec<(DbfId, u32)>,
) -> Result<()> {
    let descriptor = DeckDescriptor {
        format,
        heroes,
        cards,
    };
    debug!("Encoding {} cards", descriptor.total_cards());

    writeln!(out, "{}", deckstring::encode(&descriptor))?;
    Ok(())
}

/// Read a deck dump, dropping repeated records.
///
/// Returns the remaining records and the number of dropped ones.
pub fn parse_records(reader: impl Read) -> Result<(Vec<DeckRecord>, usize)> {
    let records: Vec<DeckRecord> = serde_json::from_reader(reader)?;
    let count = records.len();
    let records = record::deduplicate(records);
    let duplicates = count - records.len();

    Ok((records, duplicates))
}

pub fn read_records(path: &Path) -> Result<(Vec<DeckRecord>, usize)> {
    let file = File::open(path).with_context(|| format!("Could not open {}", path.display()))?;
    parse_records(BufReader::new(file))
        .with_context(|| format!("Invalid deck dump {}", path.display()))
}

/// Outcome of loading a deck dump.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub loaded: usize,
    pub corrupted: usize,
    pub invalid: usize,
    pub unsupported: usize,
    pub duplicates: usize,
}

impl Display for LoadSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Loaded {} decks ({} corrupted, {} invalid, {} with unsupported cards, {} duplicates \
             skipped)",
            self.loaded, self.corrupted, self.invalid, self.unsupported, self.duplicates
        )
    }
}

fn resolve_record(record: &DeckRecord, cards: &CardData) -> Result<Deck> {
    let descriptor = deckstring::decode(&record.string)?;
    Ok(cards.resolve(&descriptor)?)
}

/// Resolve every record, skipping the ones which fail.
pub fn resolve_records(
    records: impl IntoIterator<Item = DeckRecord>,
    cards: &CardData,
) -> (Vec<(DeckRecord, Deck)>, LoadSummary) {
    let mut summary = LoadSummary::default();
    let mut decks = Vec::new();

    for record in records {
        match resolve_record(&record, cards) {
            Ok(deck) => {
                summary.loaded += 1;
                decks.push((record, deck));
            }
            Err(err) => {
                match ErrorKind::of(&err) {
                    ErrorKind::Corrupted => summary.corrupted += 1,
                    ErrorKind::InvalidDeck => summary.invalid += 1,
                    ErrorKind::UnsupportedCards | ErrorKind::Other => summary.unsupported += 1,
                }

                let label = record
                    .id
                    .map_or_else(|| record.string.clone(), |id| format!("#{id}"));
                warn!("Skipping deck {label}\n{}", user_message(&err));
            }
        }
    }

    (decks, summary)
}

fn load_dump(
    ui: &UiManager,
    dump: &Path,
    cards: &CardData,
) -> Result<(Vec<(DeckRecord, Deck)>, LoadSummary)> {
    info!("Loading decks from {}", dump.display());
    let (records, duplicates) = read_records(dump)?;
    if duplicates > 0 {
        debug!("Dropped {duplicates} repeated records");
    }

    let (decks, summary) = resolve_records(ui.iter(records.into_iter()), cards);
    Ok((
        decks,
        LoadSummary {
            duplicates,
            ..summary
        },
    ))
}

/// Check every deck of a dump against the card database.
pub fn load(
    out: &mut impl io::Write,
    ui: &UiManager,
    dump: &Path,
    cards: &CardData,
) -> Result<LoadSummary> {
    let (decks, summary) = load_dump(ui, dump, cards)?;
    info!(
        "{} of them are named",
        decks.iter().filter(|(record, _)| record.is_named()).count()
    );

    writeln!(out, "{summary}")?;
    Ok(summary)
}

/// Print unnamed decks of a dump which are similar to a deck code.
pub fn similar(
    out: &mut impl io::Write,
    ui: &UiManager,
    code: &str,
    dump: &Path,
    cards: &CardData,
) -> Result<()> {
    let target = cards.resolve(&deckstring::decode(code)?)?;
    let (decks, summary) = load_dump(ui, dump, cards)?;
    info!("{summary}");

    write_similar(out, &target, &decks)
}

fn write_similar(
    out: &mut impl io::Write,
    target: &Deck,
    decks: &[(DeckRecord, Deck)],
) -> Result<()> {
    let candidates: Vec<_> = decks
        .iter()
        .filter(|(record, _)| record.name.is_empty())
        .collect();

    let similar = find_similar(target, candidates.iter().map(|(_, deck)| deck));
    if similar.is_empty() {
        info!("No similar decks found");
    }

    for (idx, matches) in similar {
        let record = &candidates[idx].0;
        let id = record.id.map_or_else(|| "-".to_owned(), |id| format!("#{id}"));
        writeln!(out, "{matches:>2} {id} {}", record.string)?;
    }

    Ok(())
}
