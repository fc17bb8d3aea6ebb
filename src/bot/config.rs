use reqwest::Url;

/* Config holds everything the bot reads from its environment.
 * The bot token itself is read by teloxide (TELOXIDE_TOKEN), everything else lives here.
 * Values may come from the process environment or a .env file loaded in main.
 */

pub const QUOTES_API_URL_VAR: &str = "QUOTES_API_URL";
pub const QUOTES_API_URL_DEFAULT: &str = "https://thesimpsonsquoteapi.glitch.me/quotes";

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{key} is not a valid URL: {value}")]
    InvalidUrl { key: String, value: String },
}

#[derive(Clone, Debug)]
pub struct BotConfig {
    pub quotes_url: Url,
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    // Builds the config from any key lookup, so tests don't need to touch the environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_url = lookup(QUOTES_API_URL_VAR)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| QUOTES_API_URL_DEFAULT.to_string());

        let quotes_url = Url::parse(&raw_url).map_err(|_| ConfigError::InvalidUrl {
            key: QUOTES_API_URL_VAR.to_string(),
            value: raw_url.clone(),
        })?;

        Ok(BotConfig { quotes_url })
    }
}
