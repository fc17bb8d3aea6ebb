// Exported functions
pub use self::general::{on_command, on_text};
pub use self::magic::on_callback;

// Submodules
mod constants;
mod general;
mod magic;
mod utils;
