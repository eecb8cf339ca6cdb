use bookly_core::{DashboardService, ReconciliationService, StatusService};
use bookly_domain::{short_id, Displayable};

use crate::cli::core::{CommandError, CommandResult, PageRequest, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::cli::ui::table::{Table, TableColumn, TableRenderer};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "bookings",
            "List bookings with derived status and pending balance",
            "bookings [page|next|prev]",
            cmd_bookings,
        ),
        CommandEntry::new(
            "booking",
            "Show status and payment reconciliation for one booking",
            "booking <id-prefix>",
            cmd_booking,
        ),
    ]
}

fn cmd_bookings(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let request = PageRequest::parse(args.first().copied())?;
    let rows = DashboardService::overview(context.snapshot()?, context.now());
    request.apply(&mut context.bookings_pager, rows.len());
    let page = context.bookings_pager.window(&rows);

    if page.total_items == 0 {
        io::print_info("No bookings in this snapshot.");
        return Ok(());
    }

    let fmt = &context.formatters;
    let mut table = Table::new(
        Some(format!("Bookings (page {} of {})", page.page, page.total_pages)),
        vec![
            TableColumn::left("Id"),
            TableColumn::left("Booking").truncate_at(24),
            TableColumn::left("Date"),
            TableColumn::left("Status"),
            TableColumn::right("Total"),
            TableColumn::right("Paid"),
            TableColumn::right("Pending"),
            TableColumn::left("State"),
        ],
    );
    for row in page.items {
        let result = &row.reconciliation;
        table.add_row(vec![
            short_id(row.booking_id),
            row.label.clone(),
            fmt.date_or_dash(row.event_date),
            row.status.to_string(),
            fmt.number(result.total_amount),
            fmt.number(result.net_paid),
            fmt.number(result.pending),
            row.payment_state.to_string(),
        ]);
    }
    TableRenderer::render(&table);

    io::print_info(format!(
        "{} bookings; showing {}-{}.",
        page.total_items,
        page.first_index(),
        (page.first_index() + page.items.len()).saturating_sub(1)
    ));
    if page.has_next {
        io::print_hint("Use `bookings next` for more.");
    }
    Ok(())
}

fn cmd_booking(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(reference) = args.first() else {
        return Err(CommandError::InvalidArguments("usage: booking <id-prefix>".into()));
    };
    let snapshot = context.snapshot()?;
    let booking = snapshot.find_booking(reference).ok_or_else(|| {
        CommandError::InvalidArguments(format!(
            "no single booking matches `{}`; use more of the id",
            reference
        ))
    })?;

    let payments = snapshot.payments_for(booking.id);
    let result = ReconciliationService::reconcile(booking.total_amount, &payments);
    let status = StatusService::derive_with_clock(booking, context.clock.as_ref());
    let fmt = &context.formatters;

    output_section(booking.display_label());
    io::print_field("Id", 10, booking.id);
    io::print_field("Event date", 10, fmt.date_or_dash(booking.event_date));
    if booking.from_time.is_some() || booking.to_time.is_some() {
        let show = |time: Option<chrono::NaiveTime>| {
            time.map_or_else(|| "--:--".to_string(), |t| t.format("%H:%M").to_string())
        };
        io::print_field(
            "Time",
            10,
            format!("{} - {}", show(booking.from_time), show(booking.to_time)),
        );
    }
    io::print_field("Status", 10, status);
    io::print_field("Total", 10, fmt.money(result.total_amount));
    io::print_field("Paid", 10, fmt.money(result.total_paid));
    io::print_field("Refunded", 10, fmt.money(result.total_refunded));
    io::print_field("Net paid", 10, fmt.money(result.net_paid));
    io::print_field("Pending", 10, fmt.money(result.pending));
    io::print_field(
        "Progress",
        10,
        format!("{} ({})", fmt.percent(result.progress_percent), result.payment_state()),
    );

    if payments.is_empty() {
        io::print_info("No payments recorded.");
        return Ok(());
    }

    let mut table = Table::new(
        Some("Payments"),
        vec![
            TableColumn::left("Date"),
            TableColumn::left("Type"),
            TableColumn::right("Amount"),
            TableColumn::right("Refund"),
            TableColumn::left("Notes").truncate_at(32),
        ],
    );
    for payment in &payments {
        table.add_row(vec![
            fmt.date_or_dash(Some(payment.date)),
            payment.payment_type.to_string(),
            fmt.number(payment.amount),
            payment
                .refund_amount
                .map_or_else(|| "-".to_string(), |amount| fmt.number(amount)),
            payment.notes.clone().unwrap_or_default(),
        ]);
    }
    TableRenderer::render(&table);
    Ok(())
}
