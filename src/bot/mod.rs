// bot/mod.rs

// Exported functions
pub use self::dispatcher::run_dispatcher;

// Exported structs and types
pub use self::api::{ApiError, Quote, QuoteClient, QuoteSource};
pub use self::config::{BotConfig, ConfigError};
pub use self::dispatcher::{BotError, Command, HandlerResult};
pub use self::outbox::{Outbox, Reply};
pub use self::processor::{Processor, Sender, TriggerEvent};

// Declare submodules
mod api;
mod config;
mod dispatcher;
mod handler;
mod outbox;
mod processor;

#[cfg(test)]
mod test_utils;
