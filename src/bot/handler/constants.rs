/* Fixed strings shared by the handlers. */

// Callback data carried by the magic button.
pub const SHOW_MAGIC: &str = "show_magic";
pub const MAGIC_BUTTON_LABEL: &str = "Magic";

pub const MAGIC_PROMPT_MESSAGE: &str = "Do you want some magic?";
pub const TOO_MANY_REQUESTS_MESSAGE: &str =
    "Sorry, I have received too many requests, please try again later.";

pub const UNKNOWN_SENDER: &str = "Unknown";
