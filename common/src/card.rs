use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// Type used for database ids (`dbfId`) of cards and heroes.
pub type DbfId = u32;

/// Set containing alternative hero portraits, which can never be part of a deck.
pub const HERO_SKINS: &str = "HERO_SKINS";

/// Card data as provided by `HearthstoneJSON`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub dbf_id: DbfId,
    #[serde(rename = "id", default)]
    pub card_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub cost: u32,
    #[serde(default)]
    pub card_class: CardClass,
    #[serde(rename = "type", default)]
    pub card_type: CardType,
    #[serde(default)]
    pub rarity: Rarity,
    #[serde(default)]
    pub set: String,
    #[serde(default)]
    pub collectible: bool,
}

impl Card {
    /// Whether the card can be part of a deck.
    #[must_use]
    pub fn is_includible(&self) -> bool {
        self.collectible && self.set != HERO_SKINS
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardClass {
    #[serde(rename = "DEATHKNIGHT")]
    DeathKnight,
    #[serde(rename = "DEMONHUNTER")]
    DemonHunter,
    Druid,
    Hunter,
    Mage,
    Paladin,
    Priest,
    Rogue,
    Shaman,
    Warlock,
    Warrior,
    Neutral,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Display for CardClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::DeathKnight => "Death Knight",
            Self::DemonHunter => "Demon Hunter",
            Self::Druid => "Druid",
            Self::Hunter => "Hunter",
            Self::Mage => "Mage",
            Self::Paladin => "Paladin",
            Self::Priest => "Priest",
            Self::Rogue => "Rogue",
            Self::Shaman => "Shaman",
            Self::Warlock => "Warlock",
            Self::Warrior => "Warrior",
            Self::Neutral => "Neutral",
            Self::Unknown => "Unknown",
        };

        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardType {
    Minion,
    Spell,
    Weapon,
    Hero,
    HeroPower,
    Location,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rarity {
    Free,
    Common,
    Rare,
    Epic,
    Legendary,
    #[default]
    #[serde(other)]
    Unknown,
}

#[cfg(test)]
pub mod test_util {
    use super::*;

    pub fn make_card(dbf_id: DbfId, cost: u32, name: &str) -> Card {
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

    pub fn make_hero(dbf_id: DbfId, card_class: CardClass) -> Card {
        Card {
            card_class,
            card_type: CardType::Hero,
            rarity: Rarity::Free,
            ..make_card(dbf_id, 0, &format!("{card_class} hero"))
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn includible() {
        let mut card = test_util::make_card(1, 1, "Card");
        assert!(card.is_includible());

        card.set = HERO_SKINS.to_owned();
        assert!(!card.is_includible());

        card.set = "CORE".to_owned();
        card.collectible = false;
        assert!(!card.is_includible());
    }

    #[test]
    fn class_names() {
        assert_eq!(CardClass::DemonHunter.to_string(), "Demon Hunter");
        assert_eq!(CardClass::Rogue.to_string(), "Rogue");
    }
}
