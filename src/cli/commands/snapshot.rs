use bookly_core::storage::SnapshotSource;

use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "load",
        "List snapshots, or open one by name or file path",
        "load [name|path]",
        cmd_load,
    )
    .with_aliases(&["open"])]
}

fn cmd_load(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(reference) = args.first() else {
        return list_snapshots(context);
    };

    context.open_snapshot(reference)?;
    if let Some(loaded) = &context.loaded {
        io::print_success(format!(
            "Loaded snapshot `{}` ({} bookings, {} payments, {} expenses).",
            loaded.name,
            loaded.snapshot.bookings.len(),
            loaded.snapshot.payments.len(),
            loaded.snapshot.expenses.len()
        ));
    }

    context.config.last_opened_snapshot = Some(reference.to_string());
    context.persist_config()
}

fn list_snapshots(context: &ShellContext) -> CommandResult {
    let names = context.store.list_snapshots()?;
    let root = context.store.inner().root().display().to_string();
    if names.is_empty() {
        io::print_info(format!("No snapshots found in {}.", root));
        return Ok(());
    }

    output_section(format!("Snapshots in {}", root));
    for name in names {
        let marker = match &context.loaded {
            Some(loaded) if loaded.name == name => "*",
            _ => " ",
        };
        io::print_info(format!(" {} {}", marker, name));
    }
    io::print_hint("Use `load <name>` to open one.");
    Ok(())
}
