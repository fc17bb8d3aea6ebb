use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::bot::{processor::Sender, Quote};

use super::constants::UNKNOWN_SENDER;

/* Common utilites for handlers. */

// Make a keyboard, button menu. Each option is a (label, callback data) pair on its own row.
pub fn make_keyboard(options: &[(&str, &str)]) -> InlineKeyboardMarkup {
    let keyboard: Vec<Vec<InlineKeyboardButton>> = options
        .iter()
        .map(|(label, data)| vec![InlineKeyboardButton::callback(*label, *data)])
        .collect();

    InlineKeyboardMarkup::new(keyboard)
}

// Caption for a quote photo, in HTML parse mode.
pub fn format_caption(quote: &Quote) -> String {
    format!("{}\n<b>© {}</b>", quote.quote, quote.character)
}

// Name used in log lines for whoever sent an update.
pub fn sender_name(sender: Option<&Sender>) -> String {
    match sender {
        Some(sender) => sender.display_name(),
        None => UNKNOWN_SENDER.to_string(),
    }
}
