use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use bookly_domain::{
    DerivedStatus, Displayable, PaymentState, ReconciliationResult, VendorSnapshot,
};

use crate::{ReconciliationService, StatusService};

/// Per-booking row shown on overview screens and calendars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingOverview {
    pub booking_id: Uuid,
    pub label: String,
    pub event_date: Option<NaiveDate>,
    pub status: DerivedStatus,
    pub reconciliation: ReconciliationResult,
    pub payment_state: PaymentState,
}

/// Headline figures for the dashboard cards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub upcoming: usize,
    pub completed: usize,
    pub cancelled: usize,
    pub total_booked: Decimal,
    pub total_pending: Decimal,
    pub total_received: Decimal,
}

pub struct DashboardService;

impl DashboardService {
    /// Derives status and reconciliation for every booking in the snapshot.
    ///
    /// Rows are ordered by event date with undated bookings last; equal keys
    /// keep snapshot order.
    pub fn overview(snapshot: &VendorSnapshot, now: NaiveDateTime) -> Vec<BookingOverview> {
        let mut rows: Vec<BookingOverview> = snapshot
            .bookings
            .iter()
            .map(|booking| {
                let reconciliation =
                    ReconciliationService::reconcile_booking(booking, &snapshot.payments);
                BookingOverview {
                    booking_id: booking.id,
                    label: booking.display_label(),
                    event_date: booking.event_date,
                    status: StatusService::derive(booking, now),
                    payment_state: reconciliation.payment_state(),
                    reconciliation,
                }
            })
            .collect();
        rows.sort_by_key(|row| (row.event_date.is_none(), row.event_date));
        rows
    }

    /// Cancelled bookings count towards `cancelled` and `total_received` only.
    pub fn summarize(snapshot: &VendorSnapshot, now: NaiveDateTime) -> DashboardSummary {
        Self::overview(snapshot, now)
            .iter()
            .fold(DashboardSummary::default(), |mut summary, row| {
                match row.status {
                    DerivedStatus::Confirmed => summary.upcoming += 1,
                    DerivedStatus::Completed => summary.completed += 1,
                    DerivedStatus::Cancelled => summary.cancelled += 1,
                }
                if row.status != DerivedStatus::Cancelled {
                    summary.total_booked =
                        summary.total_booked.saturating_add(row.reconciliation.total_amount);
                    summary.total_pending =
                        summary.total_pending.saturating_add(row.reconciliation.pending);
                }
                summary.total_received =
                    summary.total_received.saturating_add(row.reconciliation.net_paid);
                summary
            })
    }
}
