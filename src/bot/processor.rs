use teloxide::types::{ChatId, User};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio_util::sync::CancellationToken;

use super::{
    api::QuoteSource,
    dispatcher::{Command, HandlerResult},
    handler::{on_callback, on_command, on_text},
    outbox::{Outbox, Reply},
};

/* Processor is the overall logic center of the bot.
 * The dispatcher hands it every update as a TriggerEvent, and it handles them one at a time,
 * in the order Telegram delivered them.
 * It runs the matching handler, then delivers the handler's replies through the Outbox.
 * Errors from a single event are logged, and the processor moves on to the next one.
 */

#[derive(Clone, Debug, PartialEq)]
pub struct Sender {
    pub first_name: String,
    pub last_name: Option<String>,
}

impl Sender {
    pub fn new(first_name: &str, last_name: Option<&str>) -> Self {
        Sender {
            first_name: first_name.to_string(),
            last_name: last_name.map(str::to_string),
        }
    }

    pub fn display_name(&self) -> String {
        match &self.last_name {
            Some(last_name) => format!("{} {}", self.first_name, last_name),
            None => self.first_name.clone(),
        }
    }
}

impl From<&User> for Sender {
    fn from(user: &User) -> Sender {
        Sender::new(&user.first_name, user.last_name.as_deref())
    }
}

#[derive(Clone, Debug)]
pub enum TriggerEvent {
    Command {
        chat_id: ChatId,
        command: Command,
    },
    TextMessage {
        chat_id: ChatId,
        sender: Option<Sender>,
        text: String,
    },
    ButtonCallback {
        query_id: String,
        chat_id: Option<ChatId>,
        sender: Sender,
        data: Option<String>,
    },
}

pub struct Processor<S, O> {
    source: S,
    outbox: O,
}

impl<S, O> Processor<S, O>
where
    S: QuoteSource + Send + Sync,
    O: Outbox + Send + Sync,
{
    pub fn new(source: S, outbox: O) -> Self {
        Processor { source, outbox }
    }

    // Handles one event to completion, replies included.
    pub async fn handle_event(&self, event: TriggerEvent) -> HandlerResult {
        let replies = match event {
            TriggerEvent::Command { chat_id, command } => on_command(chat_id, command),
            TriggerEvent::TextMessage { sender, text, .. } => on_text(sender.as_ref(), &text),
            TriggerEvent::ButtonCallback {
                query_id,
                chat_id,
                sender,
                data,
            } => {
                // Answered up front, so the button stops loading even if the handler fails.
                self.outbox
                    .deliver(Reply::AnswerCallback { query_id })
                    .await?;
                on_callback(&self.source, chat_id, &sender, data.as_deref()).await?
            }
        };

        for reply in replies {
            self.outbox.deliver(reply).await?;
        }
        Ok(())
    }

    /* Main loop.
     * Pulls events until the channel closes or shutdown is cancelled.
     * Cancellation is checked before every event, an event already in progress is finished.
     */
    pub async fn run(self, mut events: UnboundedReceiver<TriggerEvent>, shutdown: CancellationToken) {
        loop {
            let event = tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                event = events.recv() => match event {
                    Some(event) => event,
                    None => break,
                },
            };

            if let Err(err) = self.handle_event(event).await {
                log::error!("Failed to handle update: {}", err);
            }
        }

        log::info!("Processor stopped");
    }
}
