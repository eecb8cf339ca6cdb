//! Core CLI loop, dispatch, and shell context helpers.

use std::{
    io,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use bookly_config::{ConfigError, ConfigManager};
use bookly_core::{storage::snapshot_warnings, storage::SnapshotSource, Clock, CoreError, Paginator};
use bookly_domain::{VendorSnapshot, WindowError};
use bookly_storage_json::{load_snapshot_from_path, CachedSnapshotSource, JsonSnapshotStore};
use chrono::{NaiveDate, NaiveDateTime};
use dialoguer::theme::ColorfulTheme;
use strsim::levenshtein;
use tracing::{info, warn};

use super::commands;
use super::formatters::CliFormatters;
use super::io as cli_io;
use super::output::{self, OutputPreferences};
use super::registry::{CommandEntry, CommandRegistry};
pub use super::shell_context::{CliMode, LoadedSnapshot, ShellContext};
use super::system_clock::SystemClock;
pub use crate::errors::CliError;
use crate::utils::app_data_dir;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_base_dir(mode, app_data_dir())
    }

    /// Builds a context whose config lives under `base`.
    pub fn with_base_dir(mode: CliMode, base: PathBuf) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config_manager = ConfigManager::with_base_dir(base)?;
        let config = config_manager.load()?;
        let store = build_store(&config.resolve_snapshot_root(), config.cache_ttl_secs)?;
        let formatters = CliFormatters::from_config(&config);
        let page_size = config.default_page_size;

        let mut context = Self {
            mode,
            registry,
            theme: ColorfulTheme::default(),
            config_manager,
            config,
            store,
            clock: Arc::new(SystemClock),
            formatters,
            loaded: None,
            bookings_pager: Paginator::new(page_size),
            ledger_pager: Paginator::new(page_size),
            ledger_window: None,
            last_command: None,
            running: true,
        };
        context.apply_output_preferences();
        context.auto_load_last();
        Ok(context)
    }

    /// Replaces the wall clock, e.g. with a fixed clock in tests.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    fn auto_load_last(&mut self) {
        if self.mode != CliMode::Interactive {
            return;
        }
        let Some(reference) = self.config.last_opened_snapshot.clone() else {
            return;
        };
        match self.open_snapshot(&reference) {
            Ok(()) => {
                cli_io::print_success(format!("Automatically loaded last snapshot `{}`.", reference));
            }
            Err(err) => {
                warn!(snapshot = %reference, error = %err, "could not reopen last snapshot");
            }
        }
    }

    pub(crate) fn apply_output_preferences(&self) {
        output::set_preferences(OutputPreferences {
            color_enabled: self.mode == CliMode::Interactive && self.config.ui_color_enabled,
        });
    }

    /// Reopens the snapshot store after the root or cache TTL changed.
    pub(crate) fn rebuild_store(&mut self) -> Result<(), CommandError> {
        self.store = build_store(&self.config.resolve_snapshot_root(), self.config.cache_ttl_secs)?;
        Ok(())
    }

    pub(crate) fn persist_config(&self) -> CommandResult {
        self.config_manager.save(&self.config)?;
        Ok(())
    }

    /// Loads a snapshot by store name or file path and makes it current.
    pub(crate) fn open_snapshot(&mut self, reference: &str) -> CommandResult {
        let path = Path::new(reference);
        let (name, snapshot) = if looks_like_path(reference) && path.exists() {
            let name = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or(reference)
                .to_string();
            (name, load_snapshot_from_path(path)?)
        } else {
            (reference.to_string(), self.store.load_snapshot(reference)?)
        };

        for warning in snapshot_warnings(&snapshot) {
            cli_io::print_warning(warning);
        }
        info!(
            snapshot = %name,
            bookings = snapshot.bookings.len(),
            "snapshot opened"
        );

        self.bookings_pager.reset();
        self.ledger_pager.reset();
        self.ledger_window = None;
        self.loaded = Some(LoadedSnapshot { name, snapshot });
        Ok(())
    }

    pub(crate) fn snapshot(&self) -> Result<&VendorSnapshot, CommandError> {
        self.snapshot_opt().ok_or(CommandError::SnapshotNotLoaded)
    }

    pub(crate) fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let needle = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|key| (levenshtein(key, &needle), key))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, best)) = best {
            if distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", best));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(cli_io::confirm_action(&self.theme, "Exit shell?", true)?)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(message);
                cli_io::print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::SnapshotNotLoaded => {
                cli_io::print_error("No snapshot loaded.");
                cli_io::print_hint("Use `load` to list snapshots, then `load <name>` to open one.");
                Ok(())
            }
            other => {
                cli_io::print_error(other);
                Ok(())
            }
        }
    }

    pub(crate) fn prompt(&self) -> String {
        match &self.loaded {
            Some(loaded) => format!("bookly({})> ", loaded.name),
            None => "bookly> ".to_string(),
        }
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }
}

fn build_store(
    root: &Path,
    ttl_secs: u64,
) -> Result<CachedSnapshotSource<JsonSnapshotStore>, CoreError> {
    let store = JsonSnapshotStore::new(root.to_path_buf())?;
    Ok(CachedSnapshotSource::new(store, Duration::from_secs(ttl_secs)))
}

fn looks_like_path(reference: &str) -> bool {
    reference.contains(std::path::MAIN_SEPARATOR)
        || reference.contains('/')
        || reference.ends_with(".json")
}

pub(crate) fn parse_date(input: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| {
        CommandError::InvalidArguments(format!("invalid date `{}` (use YYYY-MM-DD)", input))
    })
}

/// Page navigation requested by a paged command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PageRequest {
    Current,
    Next,
    Prev,
    Number(i64),
}

impl PageRequest {
    pub(crate) fn parse(input: Option<&str>) -> Result<Self, CommandError> {
        match input.map(str::to_ascii_lowercase).as_deref() {
            None => Ok(PageRequest::Current),
            Some("next" | "n") => Ok(PageRequest::Next),
            Some("prev" | "p") => Ok(PageRequest::Prev),
            Some(other) => other.parse().map(PageRequest::Number).map_err(|_| {
                CommandError::InvalidArguments(format!(
                    "invalid page `{}` (use a number, `next`, or `prev`)",
                    other
                ))
            }),
        }
    }

    /// Moves `pager` and warns when the request runs past either end.
    pub(crate) fn apply(self, pager: &mut Paginator, total_items: usize) {
        match self {
            PageRequest::Current => {
                pager.go_to(i64::try_from(pager.page()).unwrap_or(i64::MAX), total_items);
            }
            PageRequest::Next => {
                if !pager.next(total_items) {
                    cli_io::print_warning("Already on the last page.");
                }
            }
            PageRequest::Prev => {
                if !pager.prev() {
                    cli_io::print_warning("Already on the first page.");
                }
            }
            PageRequest::Number(number) => {
                pager.go_to(number, total_items);
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("No snapshot loaded. Use `load <name>` first.")]
    SnapshotNotLoaded,
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<WindowError> for CommandError {
    fn from(err: WindowError) -> Self {
        CommandError::InvalidArguments(err.to_string())
    }
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

#[cfg(test)]
use crate::cli::shell::handle_line;

#[cfg(test)]
pub(crate) fn process_script(base: &Path, lines: &[&str]) -> Result<ShellContext, CliError> {
    let mut app = ShellContext::with_base_dir(CliMode::Script, base.to_path_buf())?;
    for line in lines {
        match handle_line(&mut app, line)? {
            LoopControl::Continue => {}
            LoopControl::Exit => break,
        }
    }
    Ok(app)
}
