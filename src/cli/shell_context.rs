use std::sync::Arc;

use bookly_config::{Config, ConfigManager};
use bookly_core::{Clock, Paginator};
use bookly_domain::{LedgerWindow, VendorSnapshot};
use bookly_storage_json::{CachedSnapshotSource, JsonSnapshotStore};
use dialoguer::theme::ColorfulTheme;

use super::{formatters::CliFormatters, registry::CommandRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// Snapshot currently open in the shell, with the reference it was loaded by.
#[derive(Debug, Clone)]
pub struct LoadedSnapshot {
    pub name: String,
    pub snapshot: VendorSnapshot,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub theme: ColorfulTheme,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub store: CachedSnapshotSource<JsonSnapshotStore>,
    pub clock: Arc<dyn Clock>,
    pub formatters: CliFormatters,
    pub loaded: Option<LoadedSnapshot>,
    pub bookings_pager: Paginator,
    pub ledger_pager: Paginator,
    pub ledger_window: Option<LedgerWindow>,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn snapshot_opt(&self) -> Option<&VendorSnapshot> {
        self.loaded.as_ref().map(|loaded| &loaded.snapshot)
    }
}
