use teloxide::types::ChatId;

use crate::bot::{
    api::{Quote, QuoteSource},
    dispatcher::BotError,
    outbox::Reply,
    processor::Sender,
};

use super::{
    constants::{
        MAGIC_BUTTON_LABEL, MAGIC_PROMPT_MESSAGE, SHOW_MAGIC, TOO_MANY_REQUESTS_MESSAGE,
    },
    utils::{format_caption, make_keyboard},
};

// The prompt with the single magic button.
pub fn magic_menu(chat_id: ChatId) -> Reply {
    Reply::Menu {
        chat_id,
        text: MAGIC_PROMPT_MESSAGE.to_string(),
        keyboard: make_keyboard(&[(MAGIC_BUTTON_LABEL, SHOW_MAGIC)]),
    }
}

/* Renders a fetched quote as a photo with caption.
 * Without a quote, the user is told to try again later.
 */
pub fn render_quote(chat_id: ChatId, quote: Option<Quote>) -> Reply {
    match quote {
        Some(quote) => Reply::Photo {
            chat_id,
            caption: format_caption(&quote),
            url: quote.image,
        },
        None => Reply::Text {
            chat_id,
            text: TOO_MANY_REQUESTS_MESSAGE.to_string(),
        },
    }
}

/* Magic button.
 * Bot receives a callback query from the button menu, already acknowledged by the processor.
 * On show_magic, fetches one quote, renders it, then shows the button again.
 * Anything else is only logged.
 */
pub async fn on_callback<S: QuoteSource>(
    source: &S,
    chat_id: Option<ChatId>,
    sender: &Sender,
    data: Option<&str>,
) -> Result<Vec<Reply>, BotError> {
    let name = sender.display_name();
    let data = data.unwrap_or_default();
    log::info!("{}: {}", name, data);

    if data != SHOW_MAGIC {
        return Ok(Vec::new());
    }

    let Some(chat_id) = chat_id else {
        log::warn!("Magic callback from {} has no message attached, skipping", name);
        return Ok(Vec::new());
    };

    let quote = source.fetch_quote().await?;
    Ok(vec![render_quote(chat_id, quote), magic_menu(chat_id)])
}
