use teloxide::types::ChatId;

use crate::bot::{dispatcher::Command, outbox::Reply, processor::Sender};

use super::{magic::magic_menu, utils::sender_name};

/* Start and Help commands.
 * Both simply offer the magic button, the bot has nothing else to explain.
 */
pub fn on_command(chat_id: ChatId, command: Command) -> Vec<Reply> {
    match command {
        Command::Start | Command::Help => vec![magic_menu(chat_id)],
    }
}

/* Any other text message addressed to the bot.
 * Only logged, never answered. Reduces spam.
 */
pub fn on_text(sender: Option<&Sender>, text: &str) -> Vec<Reply> {
    log::info!("{}: {}", sender_name(sender), text);
    Vec::new()
}
