use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use env_logger::Target;
use log::LevelFilter;

use crate::common::project_data_dir;

/// Logger setup. The prompt owns the terminal, so records go to a file when one is given.
#[derive(Debug, Default)]
pub struct Logging {
    file_name: Option<PathBuf>,
    debug_mode: bool,
}

impl Logging {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Relative names are placed in the project data directory.
    #[must_use]
    pub fn with_file<P>(mut self, file_name: P) -> Self
    where
        P: Into<PathBuf>,
    {
        self.file_name = Some(file_name.into());
        self
    }

    /// Raises the level to `Debug` for search issue/accept/discard tracing.
    #[must_use]
    pub fn with_debug_mode(mut self, enable: bool) -> Self {
        self.debug_mode = enable;
        self
    }

    #[must_use]
    pub fn level(&self) -> LevelFilter {
        if self.debug_mode {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }

    pub fn start(&self) -> Result<()> {
        let mut b = env_logger::builder();
        b.filter_level(self.level());

        if let Some(file_name) = &self.file_name {
            let log_file = resolve_log_file(file_name)?;

            let fd = fs::OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&log_file)
                .with_context(|| format!("Unable to open {} for writing", log_file.display()))?;

            b.target(Target::Pipe(Box::new(fd)));
        }

        b.try_init().context("Logger already initialized")?;

        Ok(())
    }
}

fn resolve_log_file(file_name: &Path) -> Result<PathBuf> {
    if file_name.is_absolute() {
        return Ok(file_name.to_path_buf());
    }
    Ok(project_data_dir()?.join(file_name))
}
