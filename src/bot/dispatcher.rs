use teloxide::{dispatching::UpdateHandler, prelude::*, utils::command::BotCommands, RequestError};
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio_util::sync::CancellationToken;

use super::{
    api::{ApiError, QuoteClient},
    config::BotConfig,
    processor::{Processor, Sender, TriggerEvent},
};

/* Dispatcher is the front-facing agent of the bot.
 * It long-polls Telegram for updates and sorts them by kind: commands, other text, button presses.
 * Every update is turned into a TriggerEvent and queued for the Processor,
 * which handles them strictly one after another.
 */

/* Types */
pub type HandlerResult = Result<(), BotError>;
type EventQueue = UnboundedSender<TriggerEvent>;

#[derive(thiserror::Error, Debug)]
pub enum BotError {
    #[error("Request error: {0}")]
    RequestError(RequestError),
    #[error("API error: {0}")]
    ApiError(ApiError),
    #[error("Invalid photo URL: {0}")]
    InvalidPhotoUrl(String),
    #[error("Processor is no longer accepting updates")]
    ProcessorStopped,
}

impl From<RequestError> for BotError {
    fn from(request_error: RequestError) -> BotError {
        BotError::RequestError(request_error)
    }
}

impl From<ApiError> for BotError {
    fn from(api_error: ApiError) -> BotError {
        BotError::ApiError(api_error)
    }
}

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    #[command(description = "Show the magic button.")]
    Help,
    #[command(description = "Start the bot.")]
    Start,
}

/* Endpoint functions.
 * They only translate teloxide types into TriggerEvents, no user interaction happens here.
 */
fn queue_event(queue: &EventQueue, event: TriggerEvent) -> HandlerResult {
    queue.send(event).map_err(|_| BotError::ProcessorStopped)
}

async fn queue_command(queue: EventQueue, msg: Message, cmd: Command) -> HandlerResult {
    queue_event(
        &queue,
        TriggerEvent::Command {
            chat_id: msg.chat.id,
            command: cmd,
        },
    )
}

// Non-text messages (stickers, photos, service messages) are ignored.
async fn queue_text(queue: EventQueue, msg: Message) -> HandlerResult {
    if let Some(text) = msg.text() {
        queue_event(
            &queue,
            TriggerEvent::TextMessage {
                chat_id: msg.chat.id,
                sender: msg.from().map(Sender::from),
                text: text.to_string(),
            },
        )?;
    }
    Ok(())
}

async fn queue_callback(queue: EventQueue, query: CallbackQuery) -> HandlerResult {
    let chat_id = query.message.as_ref().map(|message| message.chat.id);
    let sender = Sender::from(&query.from);
    queue_event(
        &queue,
        TriggerEvent::ButtonCallback {
            query_id: query.id,
            chat_id,
            sender,
            data: query.data,
        },
    )
}

// Every update shares one key, so teloxide runs a single worker and keeps delivery order across chats.
fn single_worker(_update: &Update) -> Option<()> {
    Some(())
}

fn schema() -> UpdateHandler<BotError> {
    let command_handler = teloxide::filter_command::<Command, _>().endpoint(queue_command);

    let message_handler = Update::filter_message()
        .branch(command_handler)
        .branch(dptree::endpoint(queue_text));

    let callback_query_handler = Update::filter_callback_query().endpoint(queue_callback);

    dptree::entry()
        .branch(message_handler)
        .branch(callback_query_handler)
}

/* Main Dispatch function.
 * Runs until Ctrl-C or until shutdown is cancelled, then stops the processor.
 */
pub async fn run_dispatcher(bot: Bot, config: BotConfig, shutdown: CancellationToken) -> HandlerResult {
    let quotes = QuoteClient::new(config.quotes_url)?;

    let (queue, events) = mpsc::unbounded_channel::<TriggerEvent>();
    let processor = Processor::new(quotes, bot.clone());
    let worker = tokio::spawn(processor.run(events, shutdown.clone()));

    let mut dispatcher = Dispatcher::builder(bot, schema())
        .dependencies(dptree::deps![queue])
        .distribution_function(single_worker)
        .enable_ctrlc_handler()
        .build();

    let shutdown_token = dispatcher.shutdown_token();
    let watcher = shutdown.clone();
    tokio::spawn(async move {
        watcher.cancelled().await;
        // Fails only if polling already stopped, nothing left to do then.
        if let Ok(stopped) = shutdown_token.shutdown() {
            stopped.await;
        }
    });

    dispatcher.dispatch().await;

    shutdown.cancel();
    if let Err(err) = worker.await {
        log::error!("Processor task failed: {}", err);
    }
    log::info!("MagicBot stopped");
    Ok(())
}
