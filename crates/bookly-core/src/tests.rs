use chrono::{Duration, NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::{
    dashboard_service::DashboardService, ledger_service::LedgerService, pagination::paginate,
    period_service::{PeriodQuery, PeriodService},
    reconciliation_service::ReconciliationService, status_service::StatusService,
};
use bookly_domain::{
    Booking, DerivedStatus, Expense, LedgerWindow, Payment, PaymentType, VendorSnapshot,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn wedding_season() -> VendorSnapshot {
    let spring = Booking::new(dec!(10000), Some(date(2024, 3, 20))).with_client("Spring Wedding");
    let summer = Booking::new(dec!(10000), Some(date(2024, 7, 4))).with_client("Summer Gala");
    let payments = vec![
        Payment::new(spring.id, dec!(4000), date(2024, 2, 1), PaymentType::Advance),
        Payment::new(spring.id, dec!(6000), date(2024, 3, 5), PaymentType::Full),
        Payment::new(summer.id, dec!(10000), date(2024, 3, 12), PaymentType::Full),
        Payment::new(summer.id, dec!(2000), date(2024, 3, 15), PaymentType::Refund),
    ];
    let expenses = vec![
        Expense::new(date(2024, 2, 10), dec!(1200), "Florist"),
        Expense::new(date(2024, 3, 10), dec!(2000), "Catering"),
    ];
    VendorSnapshot::new(vec![spring, summer], payments, expenses)
}

#[test]
fn partial_payment_scenario() {
    let booking = Booking::new(dec!(10000), None);
    let payments = vec![Payment::new(booking.id, dec!(4000), date(2024, 1, 1), PaymentType::Partial)];
    let result = ReconciliationService::reconcile_booking(&booking, &payments);
    assert_eq!(result.net_paid, dec!(4000));
    assert_eq!(result.pending, dec!(6000));
    assert_eq!(result.progress_percent, dec!(40));
}

#[test]
fn refund_scenario_leaves_two_thousand_pending() {
    let snapshot = wedding_season();
    let summer = &snapshot.bookings[1];
    let result = ReconciliationService::reconcile_booking(summer, &snapshot.payments);
    assert_eq!(result.net_paid, dec!(8000));
    assert_eq!(result.pending, dec!(2000));
}

#[test]
fn yesterday_without_end_time_is_completed() {
    let today = date(2024, 8, 1);
    let booking = Booking::new(dec!(500), Some(today - Duration::days(1)));
    let now = today.and_hms_opt(0, 5, 0).unwrap();
    assert_eq!(StatusService::derive(&booking, now), DerivedStatus::Completed);
}

#[test]
fn today_before_late_end_time_is_confirmed() {
    let today = date(2024, 8, 1);
    let booking =
        Booking::new(dec!(500), Some(today)).with_times(None, NaiveTime::from_hms_opt(23, 59, 0));
    let now = today.and_hms_opt(10, 0, 0).unwrap();
    assert_eq!(StatusService::derive(&booking, now), DerivedStatus::Confirmed);
}

#[test]
fn march_ledger_scenario_excludes_refunds_and_february() {
    let snapshot = wedding_season();
    let march = LedgerWindow::month(2024, 3).unwrap();
    let entries = LedgerService::build(&snapshot.payments, &snapshot.expenses, Some(&march));

    let balances: Vec<Decimal> = entries.iter().map(|e| e.running_balance).collect();
    assert_eq!(balances, vec![dec!(6000), dec!(4000), dec!(14000)]);
}

#[test]
fn refund_reduces_net_paid_but_not_income() {
    let snapshot = wedding_season();
    let buckets = PeriodService::aggregate_snapshot(&snapshot, &PeriodQuery::monthly(2024));
    assert_eq!(buckets[2].income, dec!(16000));

    let summary = DashboardService::summarize(&snapshot, date(2024, 4, 1).and_hms_opt(9, 0, 0).unwrap());
    assert_eq!(summary.total_received, dec!(18000));
}

#[test]
fn ledger_pages_through_paginator() {
    let snapshot = wedding_season();
    let entries = LedgerService::build(&snapshot.payments, &snapshot.expenses, None);
    assert_eq!(entries.len(), 5);

    let last = paginate(&entries, 2, 10);
    assert_eq!(last.page, 3);
    assert_eq!(last.items.len(), 1);
    assert_eq!(last.items[0].running_balance, dec!(16800));
}
