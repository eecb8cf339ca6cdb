use bookly_core::{DashboardService, LedgerService, PeriodQuery, PeriodService};
use bookly_domain::{Booking, Expense, LedgerWindow, Payment, PaymentType, VendorSnapshot};
use bookly_storage_json::{load_snapshot_from_path, save_snapshot_to_path};
use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rust_decimal::Decimal;
use tempfile::tempdir;
use uuid::Uuid;

fn build_sample_snapshot(booking_count: usize) -> VendorSnapshot {
    let start_date = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    let entities = [Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];

    let mut bookings = Vec::with_capacity(booking_count);
    let mut payments = Vec::with_capacity(booking_count * 3);
    let mut expenses = Vec::with_capacity(booking_count);

    for idx in 0..booking_count {
        let event = start_date + Duration::days((idx % 730) as i64);
        let total = Decimal::from(1_000 + (idx % 50) as i64 * 100);
        let mut booking = Booking::new(total, Some(event)).with_entity(entities[idx % entities.len()]);
        if idx % 17 == 0 {
            booking.cancel();
        }

        let advance = event - Duration::days(30);
        payments.push(Payment::new(booking.id, total / Decimal::from(4), advance, PaymentType::Advance));
        payments.push(Payment::new(booking.id, total / Decimal::from(2), event, PaymentType::Partial));
        if idx % 9 == 0 {
            payments.push(Payment::refund(booking.id, Decimal::from(100), None, event + Duration::days(3)));
        }
        expenses.push(Expense::new(event, Decimal::from(50 + (idx % 20) as i64), "Supplies"));
        bookings.push(booking);
    }

    VendorSnapshot::new(bookings, payments, expenses)
}

fn bench_ledger(c: &mut Criterion) {
    let snapshot = build_sample_snapshot(black_box(10_000));
    let march = LedgerWindow::month(2024, 3).unwrap();

    c.bench_function("ledger_build_all_time_10k", |b| {
        b.iter(|| {
            let entries = LedgerService::build(&snapshot.payments, &snapshot.expenses, None);
            black_box(LedgerService::totals(&entries));
        })
    });

    c.bench_function("ledger_build_month_10k", |b| {
        b.iter(|| {
            let entries = LedgerService::build(&snapshot.payments, &snapshot.expenses, Some(&march));
            black_box(entries);
        })
    });
}

fn bench_reports(c: &mut Criterion) {
    let snapshot = build_sample_snapshot(black_box(10_000));
    let now = NaiveDate::from_ymd_opt(2024, 6, 15)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();
    let filtered = PeriodQuery::monthly(2024).with_entities([snapshot.bookings[0].entity_id.unwrap()]);

    c.bench_function("aggregate_monthly_10k", |b| {
        b.iter(|| black_box(PeriodService::aggregate_snapshot(&snapshot, &PeriodQuery::monthly(2024))))
    });

    c.bench_function("aggregate_monthly_one_entity_10k", |b| {
        b.iter(|| black_box(PeriodService::aggregate_snapshot(&snapshot, &filtered)))
    });

    c.bench_function("dashboard_summary_10k", |b| {
        b.iter(|| black_box(DashboardService::summarize(&snapshot, now)))
    });
}

fn bench_snapshot_io(c: &mut Criterion) {
    let snapshot = build_sample_snapshot(black_box(10_000));
    let dir = tempdir().expect("tempdir");
    let file_path = dir.path().join("vendor.json");

    c.bench_function("snapshot_save_10k", |b| {
        b.iter(|| {
            save_snapshot_to_path(&snapshot, &file_path).expect("save snapshot");
        })
    });

    save_snapshot_to_path(&snapshot, &file_path).expect("seed");

    c.bench_function("snapshot_load_10k", |b| {
        b.iter(|| {
            let loaded = load_snapshot_from_path(&file_path).expect("load snapshot");
            black_box(loaded);
        })
    });
}

criterion_group!(benches, bench_ledger, bench_reports, bench_snapshot_io);
criterion_main!(benches);
