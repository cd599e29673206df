use common::{card_data::LookupError, deckstring};
use log::{debug, error};

/// What went wrong, as far as a user of the tool is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The text is empty or not base64.
    Corrupted,
    /// The text decodes, but not to a valid deck.
    InvalidDeck,
    /// The deck code is fine, but the card database does not know some of its content.
    UnsupportedCards,
    Other,
}

impl ErrorKind {
    #[must_use]
    pub fn of(err: &anyhow::Error) -> Self {
        if let Some(err) = err
            .chain()
            .find_map(|cause| cause.downcast_ref::<deckstring::Error>())
        {
            if err.is_corrupted() {
                Self::Corrupted
            } else {
                Self::InvalidDeck
            }
        } else if err.chain().any(|cause| cause.is::<LookupError>()) {
            Self::UnsupportedCards
        } else {
            Self::Other
        }
    }
}

/// Message to show instead of the error itself.
#[must_use]
pub fn user_message(err: &anyhow::Error) -> String {
    match ErrorKind::of(err) {
        ErrorKind::Corrupted => format!("This deck code looks corrupted: {err:#}"),
        ErrorKind::InvalidDeck => format!("This deck code looks invalid: {err:#}"),
        ErrorKind::UnsupportedCards => format!(
            "This deck uses cards not in the card database yet ({err:#}). Try again later."
        ),
        ErrorKind::Other => format!("{err:#}"),
    }
}

pub fn print_err(err: &anyhow::Error) {
    error!("{}", user_message(err));
    debug!("{err:?}");
}
