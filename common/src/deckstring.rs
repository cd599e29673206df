//! Hearthstone deck codes ("deckstrings").
//!
//! A deck code is a base64 encoded byte stream. After a reserved zero byte, everything is a
//! [variable-length integer](crate::varint):
//!
//! | Field      | Content                                          |
//! |------------|--------------------------------------------------|
//! | version    | always `1`                                       |
//! | format     | game format code                                 |
//! | heroes     | count, then one id per hero                      |
//! | single     | count, then one id per card included once        |
//! | double     | count, then one id per card included twice       |
//! | extended   | count, then `(id, count)` for every other card   |
//!
//! Bytes following the extended section are ignored.

use std::fmt::{self, Display};

use base64::{Engine, engine::general_purpose::STANDARD};
use itertools::Itertools;
use thiserror::Error;

use crate::{
    card::DbfId,
    share,
    text_encoding::TextEncoding,
    varint::{self, Reader},
};

/// Numeric game format designation, e.g. `2` for Standard.
pub type FormatCode = u32;

/// The only supported deck code version.
pub const VERSION: u32 = 1;

const RESERVED: u8 = 0;

/// Content of a deck code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeckDescriptor {
    pub format: FormatCode,
    pub heroes: Vec<DbfId>,
    /// Cards with their number of copies.
    pub cards: Vec<(DbfId, u32)>,
}

impl DeckDescriptor {
    /// Total number of card copies.
    #[must_use]
    pub fn total_cards(&self) -> u32 {
        self.cards
            .iter()
            .fold(0, |total, &(_, count)| total.saturating_add(count))
    }

    /// Split into `(cards, heroes, format)`.
    #[must_use]
    pub fn into_parts(self) -> (Vec<(DbfId, u32)>, Vec<DbfId>, FormatCode) {
        (self.cards, self.heroes, self.format)
    }
}

/// Sections of the frame which start with a length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Heroes,
    Single,
    Double,
    Extended,
}

impl Section {
    /// Smallest number of bytes a single entry can occupy.
    fn min_entry_len(self) -> usize {
        match self {
            Self::Heroes | Self::Single | Self::Double => 1,
            Self::Extended => 2,
        }
    }
}

impl Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Heroes => "hero",
            Self::Single => "single copy",
            Self::Double => "double copy",
            Self::Extended => "extended count",
        };

        write!(f, "{name}")
    }
}

/// Structural errors in decoded bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    #[error("unrecognized frame (reserved byte is {0:#04x})")]
    UnrecognizedFrame(u8),
    #[error("unsupported version {0}")]
    UnsupportedVersion(u32),
    #[error("unexpected end of data at offset {offset}")]
    Truncated { offset: usize },
    #[error("truncated varint at offset {offset}")]
    TruncatedVarInt { offset: usize },
    #[error("varint overflow at offset {offset}")]
    VarIntOverflow { offset: usize },
    #[error("{section} section declares {declared} entries, but only {remaining} bytes remain")]
    TruncatedSection {
        section: Section,
        declared: u32,
        remaining: usize,
    },
}

/// Possible errors when decoding a deck code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("deck code is empty")]
    Empty,
    #[error("malformed base64")]
    Base64(#[from] base64::DecodeError),
    #[error("malformed deck code")]
    Frame(#[from] FrameError),
}

impl Error {
    /// Whether the text itself is damaged, as opposed to describing an impossible deck.
    #[must_use]
    pub fn is_corrupted(&self) -> bool {
        matches!(self, Self::Empty | Self::Base64(_))
    }
}

/// Decode a deck code, which may be wrapped in the game's share format.
///
/// # Errors
///
/// Fails if the code is not valid base64 or the decoded bytes are not a valid frame. There is no
/// partial result.
pub fn decode(code: &str) -> Result<DeckDescriptor, Error> {
    let token = share::normalize(code);
    if token.is_empty() {
        return Err(Error::Empty);
    }

    let data = STANDARD.decode(token)?;
    Ok(decode_bytes(&data)?)
}

/// Decode the binary frame of a deck code.
pub fn decode_bytes(data: &[u8]) -> Result<DeckDescriptor, FrameError> {
    let mut reader = Reader::new(data);

    let reserved = reader.read_byte()?;
    if reserved != RESERVED {
        return Err(FrameError::UnrecognizedFrame(reserved));
    }

    let version = reader.read()?;
    if version != VERSION {
        return Err(FrameError::UnsupportedVersion(version));
    }

    let format = reader.read()?;
    let heroes = read_section(&mut reader, Section::Heroes, Reader::read)?;

    let mut cards = read_section(&mut reader, Section::Single, |reader| {
        Ok((reader.read()?, 1))
    })?;
    cards.extend(read_section(&mut reader, Section::Double, |reader| {
        Ok((reader.read()?, 2))
    })?);
    cards.extend(read_section(&mut reader, Section::Extended, |reader| {
        Ok((reader.read()?, reader.read()?))
    })?);

    Ok(DeckDescriptor {
        format,
        heroes,
        cards,
    })
}

fn read_section<'a, T>(
    reader: &mut Reader<'a>,
    section: Section,
    mut entry: impl FnMut(&mut Reader<'a>) -> Result<T, FrameError>,
) -> Result<Vec<T>, FrameError> {
    let declared = reader.read()?;

    // Bound the declared length by the input before allocating anything for it.
    let required = usize::try_from(declared)
        .unwrap_or(usize::MAX)
        .saturating_mul(section.min_entry_len());
    if required > reader.remaining() {
        return Err(FrameError::TruncatedSection {
            section,
            declared,
            remaining: reader.remaining(),
        });
    }

    let mut entries = Vec::with_capacity(required / section.min_entry_len());
    for _ in 0..declared {
        entries.push(entry(reader)?);
    }
    Ok(entries)
}

/// Encode a deck into its canonical deck code.
///
/// Cards are merged by id, and entries without copies are dropped. Every section is sorted by id.
#[must_use]
pub fn encode(deck: &DeckDescriptor) -> String {
    STANDARD.encode(encode_bytes(deck))
}

/// Encode a deck into the binary frame of its canonical deck code.
#[must_use]
pub fn encode_bytes(deck: &DeckDescriptor) -> Vec<u8> {
    let mut single = Vec::new();
    let mut double = Vec::new();
    let mut extended = Vec::new();

    let cards = deck
        .cards
        .iter()
        .copied()
        .filter(|&(_, count)| count > 0)
        .sorted_unstable_by_key(|&(id, _)| id)
        .coalesce(|(lhs, lhs_count), (rhs, rhs_count)| {
            if lhs == rhs {
                Ok((lhs, lhs_count.saturating_add(rhs_count)))
            } else {
                Err(((lhs, lhs_count), (rhs, rhs_count)))
            }
        });

    for (id, count) in cards {
        match count {
            1 => single.push(id),
            2 => double.push(id),
            _ => extended.push((id, count)),
        }
    }

    let mut out = vec![RESERVED];
    varint::write(VERSION, &mut out);
    varint::write(deck.format, &mut out);

    write_section(&mut out, &deck.heroes, |out, &id| varint::write(id, out));
    write_section(&mut out, &single, |out, &id| varint::write(id, out));
    write_section(&mut out, &double, |out, &id| varint::write(id, out));
    write_section(&mut out, &extended, |out, &(id, count)| {
        varint::write(id, out);
        varint::write(count, out);
    });

    out
}

fn write_section<T>(out: &mut Vec<u8>, entries: &[T], mut entry: impl FnMut(&mut Vec<u8>, &T)) {
    // Sections longer than a varint can count are cut off
    let len = u32::try_from(entries.len()).unwrap_or(u32::MAX);
    varint::write(len, out);
    for (item, _) in entries.iter().zip(0..len) {
        entry(out, item);
    }
}

impl TextEncoding for DeckDescriptor {
    type Error = Error;

    fn encode(&self, writer: &mut impl fmt::Write) -> fmt::Result {
        writer.write_str(&encode(self))
    }

    fn decode(text: &str) -> Result<Self, Self::Error> {
        decode(text)
    }
}
