pub mod bookings;
pub mod config;
pub mod dashboard;
pub mod ledger;
pub mod report;
pub mod snapshot;
pub mod system;

use crate::cli::registry::{CommandEntry, CommandRegistry};

pub(crate) fn all_definitions() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(system::definitions());
    commands.extend(snapshot::definitions());
    commands.extend(bookings::definitions());
    commands.extend(dashboard::definitions());
    commands.extend(ledger::definitions());
    commands.extend(report::definitions());
    commands.extend(config::definitions());
    commands
}

/// Registers every shell command in help order.
pub fn register_all(registry: &mut CommandRegistry) {
    for entry in all_definitions() {
        registry.register(entry);
    }
}
