//! Loading the card database from disk.

use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use anyhow::{Context, Result};
use common::{card::Card, card_data::CardData, deckstring::FormatCode};
use indicatif::HumanCount;
use log::{debug, info};
use serde::Deserialize;

use crate::cli::CatalogArgs;

/// Entry of a format name table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FormatEntry {
    pub num: FormatCode,
    #[serde(alias = "name_en")]
    pub name: String,
}

pub fn parse_cards(reader: impl Read) -> Result<Vec<Card>> {
    Ok(serde_json::from_reader(reader)?)
}

pub fn parse_formats(reader: impl Read) -> Result<Vec<FormatEntry>> {
    Ok(serde_json::from_reader(reader)?)
}

fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("Could not open {}", path.display()))?;
    Ok(BufReader::new(file))
}

/// Load the card database named by the command line.
pub fn load(args: &CatalogArgs) -> Result<CardData> {
    info!("Loading cards from {}", args.catalog.display());
    let cards = parse_cards(open(&args.catalog)?)
        .with_context(|| format!("Invalid card database {}", args.catalog.display()))?;
    let count = cards.len();

    let mut data = CardData::new(cards);
    if let Some(path) = &args.formats {
        let formats = parse_formats(open(path)?)
            .with_context(|| format!("Invalid format table {}", path.display()))?;
        debug!("Loaded {} format names", formats.len());
        data = data.with_formats(formats.into_iter().map(|entry| (entry.num, entry.name)));
    }

    info!("Loaded {} cards", HumanCount(u64::try_from(count)?));
    Ok(data)
}
