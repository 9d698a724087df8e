use std::{fs, io::Write, path::Path};

use anyhow::{Context, Result, bail};
use bon::Builder;
use log::info;
use serde::{Deserialize, Serialize};
use tabled::{
    Table, Tabled,
    settings::{Margin, Rotate, Style},
};

use crate::{
    common::{print_header, project_config_dir},
    tui::KeyBindings,
};

const CONFIG_FILE_NAME: &str = "config.json";

pub const DEFAULT_PAGE_SIZE: usize = 7;

#[derive(clap::Args)]
pub struct ConfigureArgs {
    /// Rows shown before the list paginates
    #[arg(long)]
    pub(crate) page_size: Option<usize>,

    /// Toggle key scheme
    #[arg(long, value_enum)]
    pub(crate) bindings: Option<KeyBindings>,

    /// Show the key summary until the first key press
    #[arg(long)]
    pub(crate) show_hint: Option<bool>,
}

/// Presentation and key settings for the search-select prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
pub struct PromptConfig {
    #[serde(default = "default_page_size")]
    #[builder(default = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,
    #[serde(default)]
    #[builder(default)]
    pub bindings: KeyBindings,
    #[serde(default = "default_true")]
    #[builder(default = true)]
    pub show_hint: bool,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_true() -> bool {
    true
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            bindings: KeyBindings::default(),
            show_hint: true,
        }
    }
}

impl PromptConfig {
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            bail!("page_size must be at least 1");
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub prompt: PromptConfig,
}

#[derive(Tabled)]
struct ConfigDisplay {
    page_size: usize,
    bindings: KeyBindings,
    show_hint: bool,
}

impl From<&Config> for ConfigDisplay {
    fn from(config: &Config) -> Self {
        Self {
            page_size: config.prompt.page_size,
            bindings: config.prompt.bindings,
            show_hint: config.prompt.show_hint,
        }
    }
}

impl Config {
    pub(crate) fn load_existing(config_file: &Path) -> Result<Self> {
        let config_string = fs::read_to_string(config_file)
            .with_context(|| format!("Unable to read {}", config_file.display()))?;

        let config: Config = serde_json::from_str(&config_string)
            .context("Unable to deserialize configuration data")?;
        config
            .prompt
            .validate()
            .with_context(|| format!("Invalid configuration in {}", config_file.display()))?;

        Ok(config)
    }

    pub(crate) fn save_to(&self, config_file: &Path) -> Result<()> {
        let config_string =
            serde_json::to_string_pretty(self).context("Unable to serialize configuration data")?;

        let mut fd = fs::OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(config_file)
            .with_context(|| format!("Unable to write {}", config_file.display()))?;

        fd.write_all(config_string.as_bytes()).with_context(|| {
            format!("Failed to write configuration to {}", config_file.display())
        })?;

        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        let config_file = project_config_dir()?.join(CONFIG_FILE_NAME);
        self.save_to(&config_file)?;
        info!("configuration saved to {}", config_file.display());
        Ok(())
    }

    pub fn load() -> Result<Self> {
        let config_file = project_config_dir()?.join(CONFIG_FILE_NAME);

        if config_file.exists() {
            Config::load_existing(&config_file)
        } else {
            //
            // doesn't exist yet
            //
            Ok(Config::default())
        }
    }

    /// Overwrites the fields given on the command line.
    pub(crate) fn apply(&mut self, args: &ConfigureArgs) -> Result<()> {
        if let Some(page_size) = args.page_size {
            self.prompt.page_size = page_size;
        }
        if let Some(bindings) = args.bindings {
            self.prompt.bindings = bindings;
        }
        if let Some(show_hint) = args.show_hint {
            self.prompt.show_hint = show_hint;
        }
        self.prompt.validate()
    }
}

fn display_configuration(config: &Config) {
    let display = ConfigDisplay::from(config);
    let mut table = Table::new([display]);
    table
        .with(Rotate::Left)
        .with(Style::modern())
        .with(Margin::new(4, 0, 0, 0));

    print_header();
    println!("{table}");
}

////////////////////////////////////////////////////////////////////////////////
// PUBLIC
////////////////////////////////////////////////////////////////////////////////

pub fn show_configuration() -> Result<()> {
    let config = Config::load()?;

    display_configuration(&config);

    Ok(())
}

pub fn configure(args: &ConfigureArgs) -> Result<()> {
    let mut config = Config::load()?;

    config.apply(args)?;
    config.save()?;

    display_configuration(&config);

    Ok(())
}
