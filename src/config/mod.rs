mod loader;
pub use loader::{
    Config, ConfigureArgs, DEFAULT_PAGE_SIZE, PromptConfig, configure, show_configuration,
};
