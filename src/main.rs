use std::{env, path::PathBuf, time::Duration};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use checkbox_search::{
    Config, ConfigureArgs, LineSource, Logging, PROJECT_NAME, PROJECT_VERSION, configure,
    show_configuration,
    tui::{KeyBindings, min_selected, search_select_prompt},
};

#[derive(Parser)]
#[command(version = PROJECT_VERSION, about, long_about = None)]
pub struct UserArgs {
    #[command(subcommand)]
    command: Command,

    /// Verbose
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Pick entries from a file, or from the current directory
    Pick(PickArgs),

    /// Update prompt settings
    Configure(ConfigureArgs),

    /// Show Config
    #[command(visible_alias = "show-config")]
    ShowConfiguration,
}

#[derive(clap::Args)]
struct PickArgs {
    /// One choice per line. `---` separates, `!` disables, `*` pre-checks
    file: Option<PathBuf>,

    /// Question shown in front of the filter
    #[arg(short, long, default_value = "Select:")]
    question: String,

    /// Delay applied to every search
    #[arg(long, default_value_t = 0)]
    latency_ms: u64,

    /// Print the selection as a JSON array
    #[arg(long)]
    json: bool,

    /// Minimum number of checked choices
    #[arg(long)]
    min: Option<usize>,

    /// Overrides the configured page size
    #[arg(long)]
    page_size: Option<usize>,

    /// Overrides the configured key bindings
    #[arg(long, value_enum)]
    bindings: Option<KeyBindings>,
}

fn init_logging(verbose: bool) -> Result<()> {
    let file_name = format!("{PROJECT_NAME}.log");
    Logging::new()
        .with_file(file_name)
        .with_debug_mode(verbose)
        .start()
}

fn pick(args: PickArgs) -> Result<()> {
    let mut config = Config::load()?.prompt;
    if let Some(page_size) = args.page_size {
        config.page_size = page_size;
    }
    if let Some(bindings) = args.bindings {
        config.bindings = bindings;
    }
    config.validate()?;

    let source = match &args.file {
        Some(file) => LineSource::from_file(file)?,
        None => {
            let cwd = env::current_dir().context("Unable to determine current directory")?;
            LineSource::from_dir(&cwd)?
        }
    };
    let source = source.with_latency(Duration::from_millis(args.latency_ms));
    info!("pick over {} entries", source.len());

    let selection = search_select_prompt(
        &args.question,
        source,
        config,
        args.min.map(min_selected::<String>),
    )?;

    let Some(selection) = selection else {
        return Ok(());
    };

    if args.json {
        let json = serde_json::to_string(&selection.values)
            .context("Unable to serialize selection")?;
        println!("{json}");
    } else {
        for value in &selection.values {
            println!("{value}");
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = UserArgs::parse();

    init_logging(args.verbose)?;

    match args.command {
        Command::Pick(pick_args) => pick(pick_args),
        Command::Configure(configure_args) => configure(&configure_args),
        Command::ShowConfiguration => show_configuration(),
    }
}
