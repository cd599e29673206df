//! The text the game client produces when copying a deck.
//!
//! ```text
//! ### Deck name
//! # Class: Rogue
//! # Format: Standard
//! #
//! # 2x (1) Deadly Poison
//! # ...
//! #
//! AAECAaIHBq8Q...
//! #
//! # To use this deck, copy it to your clipboard and create a new deck in Hearthstone
//! ```

use std::fmt;

/// Start of a wrapped deck code.
pub const MARKER: &str = "###";

const FOOTER: &str =
    "To use this deck, copy it to your clipboard and create a new deck in Hearthstone";

/// Extract the bare deck code from text which may be wrapped in the share format.
///
/// Well-formedness of the code itself is not checked.
#[must_use]
pub fn normalize(code: &str) -> &str {
    let code = code.trim();
    if !code.starts_with(MARKER) {
        return code;
    }

    code.rsplit('#').nth(2).map_or("", str::trim)
}

/// A card line (`# 2x (1) Name`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListedCard<'a> {
    pub count: u32,
    pub cost: u32,
    pub name: &'a str,
}

/// Everything readable from a wrapped deck code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SharedDeck<'a> {
    pub name: Option<&'a str>,
    /// `# Key: Value` lines in order of appearance.
    pub properties: Vec<(&'a str, &'a str)>,
    pub cards: Vec<ListedCard<'a>>,
    pub code: &'a str,
}

impl SharedDeck<'_> {
    /// Look up a property, ignoring ASCII case of the key.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .map(|&(_, value)| value)
    }

    /// Number of card copies listed in the text.
    #[must_use]
    pub fn listed_total(&self) -> u32 {
        self.cards
            .iter()
            .fold(0, |total, card| total.saturating_add(card.count))
    }
}

/// Parse text in the share format.
///
/// Returns `None` if the text is a bare deck code. Lines which are not understood are skipped.
#[must_use]
pub fn parse(text: &str) -> Option<SharedDeck<'_>> {
    let text = text.trim();
    if !text.starts_with(MARKER) {
        return None;
    }

    let mut deck = SharedDeck {
        code: normalize(text),
        ..SharedDeck::default()
    };

    for line in text.lines() {
        match parse::line(line.trim()) {
            parse::Line::Name(name) if deck.name.is_none() => deck.name = Some(name),
            parse::Line::Property(key, value) => deck.properties.push((key, value)),
            parse::Line::Card(card) => deck.cards.push(card),
            _ => {}
        }
    }

    Some(deck)
}

/// Header of a deck in the share format.
#[derive(Debug, Clone, Copy)]
pub struct ShareHeader<'a> {
    pub name: &'a str,
    pub class: &'a str,
    pub format: &'a str,
}

/// Write a deck code in the share format.
///
/// # Errors
///
/// See [`writeln!`].
pub fn write<'a>(
    writer: &mut impl fmt::Write,
    header: &ShareHeader<'_>,
    cards: impl IntoIterator<Item = ListedCard<'a>>,
    code: &str,
) -> fmt::Result {
    writeln!(writer, "{MARKER} {}", header.name)?;
    writeln!(writer, "# Class: {}", header.class)?;
    writeln!(writer, "# Format: {}", header.format)?;
    writeln!(writer, "#")?;

    for card in cards {
        writeln!(writer, "# {}x ({}) {}", card.count, card.cost, card.name)?;
    }

    writeln!(writer, "#")?;
    writeln!(writer, "{code}")?;
    writeln!(writer, "#")?;
    writeln!(writer, "# {FOOTER}")
}

mod parse {
    use nom::{
        Parser,
        branch::alt,
        bytes::complete::{tag, take_till1},
        character::complete::{self as character, char, space0, space1},
        combinator::rest,
        sequence::{delimited, preceded, separated_pair, terminated},
    };

    use super::{ListedCard, MARKER};

    type IResult<'a, T> = nom::IResult<&'a str, T>;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Line<'a> {
        Name(&'a str),
        Property(&'a str, &'a str),
        Card(ListedCard<'a>),
        Other,
    }

    fn comment(input: &str) -> IResult<()> {
        (char('#'), space0).map(|_| ()).parse(input)
    }

    fn name(input: &str) -> IResult<Line<'_>> {
        preceded(tag(MARKER), rest)
            .map(|name: &str| Line::Name(name.trim()))
            .parse(input)
    }

    fn count(input: &str) -> IResult<u32> {
        terminated(character::u32, char('x')).parse(input)
    }

    fn cost(input: &str) -> IResult<u32> {
        delimited(char('('), character::u32, char(')')).parse(input)
    }

    fn card(input: &str) -> IResult<Line<'_>> {
        preceded(comment, (count, space1, cost, space1, rest))
            .map(|(count, _, cost, _, name): (u32, &str, u32, &str, &str)| {
                Line::Card(ListedCard {
                    count,
                    cost,
                    name: name.trim(),
                })
            })
            .parse(input)
    }

    fn property(input: &str) -> IResult<Line<'_>> {
        preceded(
            comment,
            separated_pair(take_till1(|c: char| c == ':'), (char(':'), space0), rest),
        )
        .map(|(key, value): (&str, &str)| Line::Property(key.trim(), value.trim()))
        .parse(input)
    }

    pub fn line(input: &str) -> Line<'_> {
        alt((name, card, property))
            .parse(input)
            .map_or(Line::Other, |(_, line)| line)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const CODE: &str =
        "AAEBAaIHBq8QmxSRvAKA0wL+mgOs6wMMm8gC5dEC6vMC+5oDragDqssDiNADpNED99QDkp8E7qAE+6UEAA==";

    fn shared_text() -> String {
        [
            "### Poison Rogue",
            "# Class: Rogue",
            "# Format: Wild",
            "# Year of the Gryphon",
            "#",
            "# 2x (1) Deadly Poison",
            "# 1x (1) Patches the Pirate",
            "# 2x (4) Tinker's Sharpsword Oil",
            "#",
            CODE,
            "#",
            "# To use this deck, copy it to your clipboard and create a new deck in Hearthstone",
        ]
        .join("\n")
    }

    #[test]
    fn bare_code() {
        assert_eq!(normalize(CODE), CODE);
        assert_eq!(normalize(&format!("  {CODE}\n")), CODE);
        assert_eq!(parse(CODE), None);
    }

    #[test]
    fn wrapped_code() {
        assert_eq!(normalize(&shared_text()), CODE);
        assert_eq!(normalize(&format!("\n\n{}\n", shared_text())), CODE);
    }

    #[test]
    fn marker_only() {
        assert_eq!(normalize("###"), "");
        assert_eq!(normalize("### name"), "");
    }

    #[test]
    fn parsed_metadata() {
        let text = shared_text();
        let deck = parse(&text).unwrap();

        assert_eq!(deck.name, Some("Poison Rogue"));
        assert_eq!(deck.property("class"), Some("Rogue"));
        assert_eq!(deck.property("Format"), Some("Wild"));
        assert_eq!(deck.property("Year of the Gryphon"), None);
        assert_eq!(deck.code, CODE);
        assert_eq!(
            deck.cards,
            [
                ListedCard {
                    count: 2,
                    cost: 1,
                    name: "Deadly Poison"
                },
                ListedCard {
                    count: 1,
                    cost: 1,
                    name: "Patches the Pirate"
                },
                ListedCard {
                    count: 2,
                    cost: 4,
                    name: "Tinker's Sharpsword Oil"
                },
            ]
        );
        assert_eq!(deck.listed_total(), 5);
    }

    #[test]
    fn card_names_with_colons() {
        let text = format!("### Test\n# 1x (3) Card: With Colon\n#\n{CODE}\n#\n# footer");
        let deck = parse(&text).unwrap();

        assert_eq!(deck.cards[0].name, "Card: With Colon");
        assert!(deck.properties.is_empty());
    }

    #[test]
    fn written_text_is_readable() {
        let cards = [
            ListedCard {
                count: 2,
                cost: 1,
                name: "Deadly Poison",
            },
            ListedCard {
                count: 1,
                cost: 9,
                name: "Valeera the Hollow",
            },
        ];
        let header = ShareHeader {
            name: "Poison Rogue",
            class: "Rogue",
            format: "Wild",
        };

        let mut text = String::new();
        write(&mut text, &header, cards, CODE).unwrap();

        assert_eq!(normalize(&text), CODE);

        let deck = parse(&text).unwrap();
        assert_eq!(deck.name, Some("Poison Rogue"));
        assert_eq!(deck.property("Class"), Some("Rogue"));
        assert_eq!(deck.cards, cards);
    }
}
