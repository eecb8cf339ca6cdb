use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::cli::ui::table::{Table, TableColumn, TableRenderer};

pub fn print_overview(registry: &CommandRegistry) {
    let mut table = Table::new(
        Some("Available commands"),
        vec![TableColumn::left("Command"), TableColumn::left("Description")],
    );
    for entry in registry.list() {
        table.add_row(vec![entry.name, entry.description]);
    }
    TableRenderer::render(&table);
    io::print_hint("Use `help <command>` for usage.");
}

pub fn print_command(entry: &CommandEntry) {
    output_section(format!("Help: {}", entry.name));
    io::print_field("Description", 11, entry.description);
    io::print_field("Usage", 11, entry.usage);
    if !entry.aliases.is_empty() {
        io::print_field("Aliases", 11, entry.aliases.join(", "));
    }
}
