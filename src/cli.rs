use std::path::PathBuf;

use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand};
use common::{card::DbfId, deckstring::FormatCode};
use log::LevelFilter;

use crate::{CATALOG_ENV, DEFAULT_CATALOG};

#[derive(Debug, Parser)]
#[command(version, about = "Inspect and convert Hearthstone deck codes")]
pub struct Args {
    #[arg(short, long, action = ArgAction::Count, global = true, help = "More output (repeatable)")]
    pub verbose: u8,
    #[arg(short, long, global = true, conflicts_with = "verbose", help = "Only print errors")]
    pub quiet: bool,
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    #[must_use]
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }

        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, ClapArgs)]
pub struct CatalogArgs {
    #[arg(
        long,
        env = CATALOG_ENV,
        default_value = DEFAULT_CATALOG,
        help = "Card database in HearthstoneJSON format"
    )]
    pub catalog: PathBuf,
    #[arg(long, help = "Format names as a JSON list of {\"num\", \"name\"} objects")]
    pub formats: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the content of a deck code
    Decode {
        /// Deck code, bare or as copied from the game
        code: String,
        #[arg(long, help = "Look up hero and cards in the card database")]
        resolve: bool,
        #[arg(
            long,
            value_name = "NAME",
            requires = "resolve",
            help = "Print the deck as copied from the game"
        )]
        share: Option<String>,
        #[command(flatten)]
        catalog: CatalogArgs,
    },
    /// Build a deck code
    Encode {
        #[arg(long)]
        format: FormatCode,
        #[arg(long = "hero", required = true)]
        heroes: Vec<DbfId>,
        #[arg(long = "card", value_name = "ID[:COUNT]", value_parser = parse_card)]
        cards: Vec<(DbfId, u32)>,
    },
    /// Check every deck of a deck dump against the card database
    Load {
        dump: PathBuf,
        #[command(flatten)]
        catalog: CatalogArgs,
    },
    /// List decks of a deck dump which are similar to a deck code
    Similar {
        code: String,
        #[arg(long)]
        dump: PathBuf,
        #[command(flatten)]
        catalog: CatalogArgs,
    },
}

fn parse_card(text: &str) -> Result<(DbfId, u32), String> {
    let (id, count) = text.split_once(':').unwrap_or((text, "1"));
    let id = id.parse().map_err(|err| format!("invalid card id {id:?}: {err}"))?;
    let count = count
        .parse()
        .map_err(|err| format!("invalid count {count:?}: {err}"))?;
    Ok((id, count))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn card_arguments() {
        assert_eq!(parse_card("59253"), Ok((59253, 1)));
        assert_eq!(parse_card("59253:2"), Ok((59253, 2)));
        assert!(parse_card("59253:").is_err());
        assert!(parse_card("x:1").is_err());
    }

    #[test]
    fn encode_arguments() {
        let args = Args::try_parse_from([
            "hs-deck-tools",
            "encode",
            "--format",
            "2",
            "--hero",
            "57761",
            "--card",
            "59253",
            "--card",
            "56677:2",
        ])
        .unwrap();

        let Command::Encode {
            format,
            heroes,
            cards,
        } = args.command
        else {
            panic!("expected the encode command");
        };
        assert_eq!(format, 2);
        assert_eq!(heroes, [57761]);
        assert_eq!(cards, [(59253, 1), (56677, 2)]);
    }

    #[test]
    fn share_requires_resolve() {
        assert!(Args::try_parse_from(["hs-deck-tools", "decode", "AAE", "--share", "x"]).is_err());
        assert!(
            Args::try_parse_from(["hs-deck-tools", "decode", "AAE", "--resolve", "--share", "x"])
                .is_ok()
        );
    }

    #[test]
    fn log_levels() {
        let level = |flags: &[&str]| {
            let mut args = vec!["hs-deck-tools"];
            args.extend(flags);
            args.extend(["encode", "--format", "1", "--hero", "1"]);
            Args::try_parse_from(args).unwrap().log_level()
        };

        assert_eq!(level(&[]), LevelFilter::Info);
        assert_eq!(level(&["-v"]), LevelFilter::Debug);
        assert_eq!(level(&["-vv"]), LevelFilter::Trace);
        assert_eq!(level(&["-q"]), LevelFilter::Error);
    }
}
