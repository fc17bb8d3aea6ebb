use std::future::Future;

use reqwest::Url;
use teloxide::{
    prelude::*,
    types::{InlineKeyboardMarkup, InputFile, ParseMode},
};

use super::dispatcher::{BotError, HandlerResult};

/* Outbox is the only place where the bot talks back to Telegram.
 * Handlers describe what to send as a list of Replies, and the Outbox executes them in order.
 * The teloxide Bot is the real Outbox, tests substitute a recording one.
 */

#[derive(Clone, Debug, PartialEq)]
pub enum Reply {
    // A text message with a button menu attached.
    Menu {
        chat_id: ChatId,
        text: String,
        keyboard: InlineKeyboardMarkup,
    },
    // A photo fetched by Telegram from the given URL, caption in HTML.
    Photo {
        chat_id: ChatId,
        url: String,
        caption: String,
    },
    Text {
        chat_id: ChatId,
        text: String,
    },
    AnswerCallback {
        query_id: String,
    },
}

pub trait Outbox {
    fn deliver(&self, reply: Reply) -> impl Future<Output = HandlerResult> + Send;
}

impl Outbox for Bot {
    async fn deliver(&self, reply: Reply) -> HandlerResult {
        match reply {
            Reply::Menu {
                chat_id,
                text,
                keyboard,
            } => {
                self.send_message(chat_id, text)
                    .reply_markup(keyboard)
                    .await?;
            }
            Reply::Photo {
                chat_id,
                url,
                caption,
            } => {
                let photo = Url::parse(&url).map_err(|_| BotError::InvalidPhotoUrl(url.clone()))?;
                self.send_photo(chat_id, InputFile::url(photo))
                    .caption(caption)
                    .parse_mode(ParseMode::Html)
                    .await?;
            }
            Reply::Text { chat_id, text } => {
                self.send_message(chat_id, text).await?;
            }
            Reply::AnswerCallback { query_id } => {
                self.answer_callback_query(query_id).await?;
            }
        }
        Ok(())
    }
}
