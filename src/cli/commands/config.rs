use bookly_config::model::CONFIG_KEYS;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::formatters::CliFormatters;
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::cli::ui::table::{Table, TableColumn, TableRenderer};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "config",
            "View and change persistent preferences",
            "config [show|set <key> <value>]",
            cmd_config,
        ),
        CommandEntry::new(
            "pagesize",
            "Set rows per page for this session and return to page 1",
            "pagesize <n>",
            cmd_pagesize,
        ),
    ]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args.split_first() {
        None => show_config(context),
        Some((action, _)) if action.eq_ignore_ascii_case("show") => show_config(context),
        Some((action, rest)) if action.eq_ignore_ascii_case("set") => {
            let [key, value @ ..] = rest else {
                return Err(CommandError::InvalidArguments(format!(
                    "usage: config set <{}> <value>",
                    CONFIG_KEYS.join("|")
                )));
            };
            set_config_value(context, key, value.join(" ").trim())
        }
        Some((other, _)) => Err(CommandError::InvalidArguments(format!(
            "unknown config action `{}` (use show or set)",
            other
        ))),
    }
}

fn show_config(context: &ShellContext) -> CommandResult {
    let mut table = Table::new(
        Some(format!(
            "Configuration ({})",
            context.config_manager.config_path().display()
        )),
        vec![TableColumn::left("Key"), TableColumn::left("Value")],
    );
    for key in CONFIG_KEYS {
        table.add_row(vec![key.to_string(), context.config.get(key)?]);
    }
    TableRenderer::render(&table);
    Ok(())
}

fn set_config_value(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    let key = key.to_ascii_lowercase();
    context.config.set(&key, value)?;
    context.persist_config()?;

    match key.as_str() {
        "currency" | "currency_precision" => {
            context.formatters = CliFormatters::from_config(&context.config);
        }
        "ui_color_enabled" => context.apply_output_preferences(),
        "default_page_size" => {
            let size = context.config.default_page_size;
            context.bookings_pager.set_page_size(size);
            context.ledger_pager.set_page_size(size);
        }
        "snapshot_root" | "cache_ttl_secs" => context.rebuild_store()?,
        _ => {}
    }

    io::print_success(format!("Set `{}` to `{}`.", key, context.config.get(&key)?));
    Ok(())
}

fn cmd_pagesize(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let size = args
        .first()
        .and_then(|raw| raw.parse::<usize>().ok())
        .ok_or_else(|| CommandError::InvalidArguments("usage: pagesize <n>".into()))?;

    context.bookings_pager.set_page_size(size);
    context.ledger_pager.set_page_size(size);
    io::print_success(format!(
        "Showing {} rows per page, starting from page 1.",
        context.bookings_pager.page_size()
    ));
    Ok(())
}
