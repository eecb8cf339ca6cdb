use bookly_core::{DashboardService, PeriodQuery, PeriodService};
use bookly_domain::{PeriodComparison, VendorSnapshot};
use chrono::{Datelike, NaiveDate};

use crate::cli::core::{CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "dashboard",
        "Show booking counts, totals, and this month's income trend",
        "dashboard",
        cmd_dashboard,
    )
    .with_aliases(&["summary"])]
}

fn cmd_dashboard(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let snapshot = context.snapshot()?;
    let now = context.now();
    let summary = DashboardService::summarize(snapshot, now);
    let fmt = &context.formatters;

    output_section("Dashboard");
    io::print_field("Upcoming", 14, summary.upcoming);
    io::print_field("Completed", 14, summary.completed);
    io::print_field("Cancelled", 14, summary.cancelled);
    io::print_field("Total booked", 14, fmt.money(summary.total_booked));
    io::print_field("Total received", 14, fmt.money(summary.total_received));
    io::print_field("Total pending", 14, fmt.money(summary.total_pending));

    if let Some(trend) = month_over_month(snapshot, now.date()) {
        let change = trend
            .change_percent
            .map_or_else(|| "n/a".to_string(), |percent| fmt.percent(percent));
        io::print_field(
            &format!("Income {}", trend.current.period_label),
            14,
            format!(
                "{} (vs {} in {}, change {})",
                fmt.money(trend.current.income),
                fmt.money(trend.previous.income),
                trend.previous.period_label,
                change
            ),
        );
    }
    Ok(())
}

/// Compares the month containing `today` with the one before it.
fn month_over_month(snapshot: &VendorSnapshot, today: NaiveDate) -> Option<PeriodComparison> {
    let months = PeriodService::aggregate_snapshot(snapshot, &PeriodQuery::monthly(today.year()));
    let index = today.month0() as usize;
    let current = months.get(index)?;
    let previous = match index.checked_sub(1) {
        Some(prev) => months.get(prev)?.clone(),
        None => PeriodService::aggregate_snapshot(snapshot, &PeriodQuery::monthly(today.year() - 1))
            .pop()?,
    };
    Some(PeriodService::compare(current, &previous))
}
