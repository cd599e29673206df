pub mod card;
pub mod card_data;
pub mod deck;
pub mod deckstring;
pub mod record;
pub mod share;
pub mod similar;
pub mod text_encoding;
pub mod varint;
