use std::{
    fs,
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

use bookly_core::{storage::SnapshotSource, CoreError};
use bookly_domain::{Booking, BookingStatus, Expense, Payment, PaymentType, VendorSnapshot};
use bookly_storage_json::{load_snapshot_from_path, CachedSnapshotSource, JsonSnapshotStore};
use chrono::NaiveDate;
use rust_decimal_macros::dec;
use tempfile::tempdir;

fn sample_snapshot() -> VendorSnapshot {
    let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
    let booking = Booking::new(dec!(10000), Some(date)).with_client("Rivera");
    let payment = Payment::new(booking.id, dec!(4000), date, PaymentType::Partial);
    let expense = Expense::new(date, dec!(250.50), "Florist");
    VendorSnapshot::new(vec![booking], vec![payment], vec![expense])
}

#[test]
fn json_store_can_save_and_load_snapshot() {
    let dir = tempdir().expect("tempdir");
    let store = JsonSnapshotStore::new(dir.path().join("snapshots")).expect("create store");
    let snapshot = sample_snapshot();

    let path = store.save_snapshot("Spring Weddings", &snapshot).expect("save snapshot");
    assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("spring_weddings.json"));
    assert!(!path.with_extension("json.tmp").exists());

    let loaded = store.load_snapshot("Spring Weddings").expect("load snapshot");
    assert_eq!(loaded, snapshot);
    assert_eq!(store.list_snapshots().expect("list"), vec!["spring_weddings".to_string()]);
}

#[test]
fn missing_snapshot_is_reported_by_name() {
    let dir = tempdir().expect("tempdir");
    let store = JsonSnapshotStore::new(dir.path().to_path_buf()).expect("create store");

    let err = store.load_snapshot("nowhere").expect_err("missing snapshot");
    assert!(matches!(err, CoreError::SnapshotNotFound(name) if name == "nowhere"));
}

#[test]
fn hand_edited_files_are_sanitized_on_load() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("export.json");
    fs::write(
        &path,
        r#"{
            "bookings": [{
                "id": "6f1c1f1e-8d8a-4a54-9a43-2a3f1f6b9d10",
                "totalAmount": "-20",
                "eventDate": "someday",
                "toTime": "25:99",
                "explicitStatus": "CANCELED"
            }],
            "payments": [{
                "id": "0b8f2c59-4a0e-4a3b-9a7e-7c3d1d3f0a11",
                "bookingId": "6f1c1f1e-8d8a-4a54-9a43-2a3f1f6b9d10",
                "amount": "abc",
                "date": "2024-03-05T10:00:00Z",
                "type": "advance"
            }]
        }"#,
    )
    .expect("write export");

    let snapshot = load_snapshot_from_path(&path).expect("load export");
    let booking = &snapshot.bookings[0];
    assert_eq!(booking.total_amount, dec!(0));
    assert_eq!(booking.event_date, None);
    assert_eq!(booking.to_time, None);
    assert_eq!(booking.explicit_status, BookingStatus::Cancelled);
    assert_eq!(snapshot.payments[0].amount, dec!(0));
    assert!(snapshot.expenses.is_empty());
}

#[test]
fn payment_with_unreadable_date_is_skipped_not_fatal() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("export.json");
    fs::write(
        &path,
        r#"{
            "bookings": [{
                "id": "6f1c1f1e-8d8a-4a54-9a43-2a3f1f6b9d10",
                "totalAmount": 1200,
                "eventDate": "2024-06-01"
            }],
            "payments": [{
                "id": "0b8f2c59-4a0e-4a3b-9a7e-7c3d1d3f0a11",
                "bookingId": "6f1c1f1e-8d8a-4a54-9a43-2a3f1f6b9d10",
                "amount": 300,
                "date": "31/02/2024",
                "type": "advance"
            }]
        }"#,
    )
    .expect("write export");

    let snapshot = load_snapshot_from_path(&path).expect("load export");
    assert_eq!(snapshot.bookings.len(), 1);
    assert!(snapshot.payments.is_empty());
    assert_eq!(snapshot.dropped_rows, 1);
}

struct CountingSource {
    snapshot: VendorSnapshot,
    loads: AtomicUsize,
}

impl SnapshotSource for CountingSource {
    fn load_snapshot(&self, _name: &str) -> Result<VendorSnapshot, CoreError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(self.snapshot.clone())
    }

    fn list_snapshots(&self) -> Result<Vec<String>, CoreError> {
        Ok(vec!["vendor".into()])
    }
}

fn counting_source() -> CountingSource {
    CountingSource {
        snapshot: sample_snapshot(),
        loads: AtomicUsize::new(0),
    }
}

#[test]
fn cache_serves_repeat_reads_within_ttl() {
    let cache = CachedSnapshotSource::new(counting_source(), Duration::from_secs(300));

    let first = cache.load_snapshot("vendor").expect("first load");
    let second = cache.load_snapshot("vendor").expect("second load");
    assert_eq!(first, second);
    assert_eq!(cache.inner().loads.load(Ordering::SeqCst), 1);
    assert_eq!(cache.cached_len(), 1);
}

#[test]
fn zero_ttl_always_reloads() {
    let cache = CachedSnapshotSource::new(counting_source(), Duration::ZERO);

    cache.load_snapshot("vendor").expect("first load");
    cache.load_snapshot("vendor").expect("second load");
    assert_eq!(cache.inner().loads.load(Ordering::SeqCst), 2);
}

#[test]
fn invalidate_forces_reload() {
    let cache = CachedSnapshotSource::new(counting_source(), Duration::from_secs(300));

    cache.load_snapshot("vendor").expect("first load");
    assert!(cache.invalidate("vendor"));
    assert!(!cache.invalidate("vendor"));
    cache.load_snapshot("vendor").expect("reload");
    assert_eq!(cache.inner().loads.load(Ordering::SeqCst), 2);
}

#[test]
fn expired_entries_reload_from_source() {
    let cache = CachedSnapshotSource::new(counting_source(), Duration::from_millis(50));

    cache.load_snapshot("vendor").expect("first load");
    std::thread::sleep(Duration::from_millis(150));
    cache.load_snapshot("vendor").expect("load after expiry");
    assert_eq!(cache.inner().loads.load(Ordering::SeqCst), 2);
}

#[test]
fn cache_holds_at_most_its_capacity() {
    let cache = CachedSnapshotSource::with_capacity(counting_source(), Duration::from_secs(300), 2);

    for name in ["march", "april", "may", "june", "july"] {
        cache.load_snapshot(name).expect("load");
    }
    assert!(cache.cached_len() <= 2);
}

#[test]
fn cache_wraps_json_store() {
    let dir = tempdir().expect("tempdir");
    let store = JsonSnapshotStore::new(dir.path().to_path_buf()).expect("create store");
    store.save_snapshot("vendor", &sample_snapshot()).expect("save");

    let cache = CachedSnapshotSource::new(store, Duration::from_secs(60));
    let loaded = cache.load_snapshot("vendor").expect("load through cache");
    assert_eq!(loaded.bookings.len(), 1);

    cache.inner().delete_snapshot("vendor").expect("delete");
    assert!(cache.load_snapshot("vendor").is_ok(), "cached copy survives deletion");
    cache.clear();
    assert!(cache.load_snapshot("vendor").is_err());
}
