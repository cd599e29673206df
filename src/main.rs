use std::{io, process::ExitCode};

use anyhow::Result;
use clap::Parser;
use hs_deck_tools::{
    catalog,
    cli::{Args, Command},
    commands,
    error_handling::print_err,
    ui::UiManager,
};

fn run(args: Args, ui: &UiManager) -> Result<()> {
    let mut out = io::stdout().lock();

    match args.command {
        Command::Decode {
            code,
            resolve,
            share,
            catalog,
        } => {
            let cards = if resolve {
                Some(catalog::load(&catalog)?)
            } else {
                None
            };
            commands::decode(&mut out, &code, cards.as_ref(), share.as_deref())
        }
        Command::Encode {
            format,
            heroes,
            cards,
        } => commands::encode(&mut out, format, heroes, cards),
        Command::Load { dump, catalog } => {
            let cards = catalog::load(&catalog)?;
            commands::load(&mut out, ui, &dump, &cards).map(|_| ())
        }
        Command::Similar {
            code,
            dump,
            catalog,
        } => {
            let cards = catalog::load(&catalog)?;
            commands::similar(&mut out, ui, &code, &dump, &cards)
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let ui = match UiManager::new(args.log_level()) {
        Ok(ui) => ui,
        Err(err) => {
            eprintln!("{err:#}");
            return ExitCode::FAILURE;
        }
    };

    match run(args, &ui) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            print_err(&err);
            ExitCode::FAILURE
        }
    }
}
