//! `ledger` command: chronological credits and debits with a running balance.

use bookly_core::LedgerService;
use bookly_domain::LedgerWindow;
use rust_decimal::Decimal;

use crate::cli::core::{parse_date, CommandError, CommandResult, PageRequest, ShellContext};
use crate::cli::formatters::CliFormatters;
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::cli::ui::table::{Table, TableColumn, TableRenderer};

const USAGE: &str = "ledger [YYYY-MM | <from> <to> | all] [page|next|prev]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "ledger",
        "Show payments and expenses with a running balance",
        USAGE,
        cmd_ledger,
    )]
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum WindowArg {
    Keep,
    Clear,
    Set(LedgerWindow),
}

fn cmd_ledger(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    context.snapshot()?;
    let (window, page) = parse_args(args)?;
    let request = PageRequest::parse(page)?;

    match window {
        WindowArg::Keep => {}
        WindowArg::Clear => {
            context.ledger_window = None;
            context.ledger_pager.reset();
        }
        WindowArg::Set(window) => {
            context.ledger_window = Some(window);
            context.ledger_pager.reset();
        }
    }

    let snapshot = context.snapshot()?;
    let entries = LedgerService::build(
        &snapshot.payments,
        &snapshot.expenses,
        context.ledger_window.as_ref(),
    );
    let totals = LedgerService::totals(&entries);
    let label = context
        .ledger_window
        .map_or_else(|| "all time".to_string(), |window| window.label());

    request.apply(&mut context.ledger_pager, entries.len());
    let page = context.ledger_pager.window(&entries);
    if page.is_empty() {
        io::print_info(format!("No ledger entries for {}.", label));
        return Ok(());
    }

    let fmt = &context.formatters;
    let mut table = Table::new(
        Some(format!(
            "Ledger: {} (page {} of {})",
            label, page.page, page.total_pages
        )),
        vec![
            TableColumn::left("Date"),
            TableColumn::left("Particulars").truncate_at(32),
            TableColumn::right("Debit"),
            TableColumn::right("Credit"),
            TableColumn::right("Balance"),
        ],
    );
    for entry in page.items {
        table.add_row(vec![
            fmt.date_or_dash(Some(entry.date)),
            entry.particulars.clone(),
            amount_or_dash(fmt, entry.debit),
            amount_or_dash(fmt, entry.credit),
            fmt.number(entry.running_balance),
        ]);
    }
    table.set_footer(vec![
        String::new(),
        "Totals".to_string(),
        fmt.number(totals.total_debit),
        fmt.number(totals.total_credit),
        fmt.number(totals.closing_balance),
    ]);
    TableRenderer::render(&table);

    if page.has_next {
        io::print_hint("Use `ledger next` for more.");
    }
    Ok(())
}

fn amount_or_dash(fmt: &CliFormatters, amount: Decimal) -> String {
    if amount.is_zero() {
        "-".to_string()
    } else {
        fmt.number(amount)
    }
}

fn parse_args<'a>(args: &[&'a str]) -> Result<(WindowArg, Option<&'a str>), CommandError> {
    let (window, rest) = match args {
        [] => (WindowArg::Keep, args),
        [first, rest @ ..] if first.eq_ignore_ascii_case("all") => (WindowArg::Clear, rest),
        [first, rest @ ..] if looks_like_month(first) => {
            (WindowArg::Set(parse_month(first)?), rest)
        }
        [from, to, rest @ ..] if looks_like_bound(from) && looks_like_bound(to) => {
            let window = LedgerWindow::range(parse_bound(from)?, parse_bound(to)?)?;
            (WindowArg::Set(window), rest)
        }
        _ => (WindowArg::Keep, args),
    };

    match rest {
        [] => Ok((window, None)),
        [page] => Ok((window, Some(*page))),
        _ => Err(CommandError::InvalidArguments(format!("usage: {}", USAGE))),
    }
}

fn looks_like_month(input: &str) -> bool {
    input.len() == 7 && input.as_bytes()[4] == b'-'
}

fn looks_like_bound(input: &str) -> bool {
    input == "-" || (input.len() == 10 && input.as_bytes()[4] == b'-')
}

fn parse_month(input: &str) -> Result<LedgerWindow, CommandError> {
    let invalid = || CommandError::InvalidArguments(format!("invalid month `{}` (use YYYY-MM)", input));
    let (year, month) = input.split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    Ok(LedgerWindow::month(year, month)?)
}

/// `-` leaves the bound open.
fn parse_bound(input: &str) -> Result<Option<chrono::NaiveDate>, CommandError> {
    if input == "-" {
        Ok(None)
    } else {
        parse_date(input).map(Some)
    }
}
