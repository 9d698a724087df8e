mod common;
pub mod config;
mod logging;
mod source;
pub mod tui;

pub use common::{PROJECT_NAME, PROJECT_VERSION, PROJECT_VERSION_HASH};
pub use config::{Config, ConfigureArgs, PromptConfig, configure, show_configuration};
pub use logging::Logging;
pub use source::LineSource;
