use std::collections::HashSet;

use bookly_domain::VendorSnapshot;

use crate::CoreError;

/// Abstraction over the data-access collaborator that fetches vendor records.
///
/// Implementations must return one consistent read per call; the services in
/// this crate never re-query mid-computation.
pub trait SnapshotSource: Send + Sync {
    fn load_snapshot(&self, name: &str) -> Result<VendorSnapshot, CoreError>;
    fn list_snapshots(&self) -> Result<Vec<String>, CoreError>;
}

/// Detects dangling references and other anomalies within a vendor snapshot.
pub fn snapshot_warnings(snapshot: &VendorSnapshot) -> Vec<String> {
    let booking_ids: HashSet<_> = snapshot.bookings.iter().map(|b| b.id).collect();
    let mut warnings = Vec::new();

    if snapshot.dropped_rows > 0 {
        warnings.push(format!(
            "{} unreadable record(s) skipped while loading",
            snapshot.dropped_rows
        ));
    }

    for booking in &snapshot.bookings {
        if booking.event_date.is_none() {
            warnings.push(format!(
                "booking {} has no usable event date; treated as confirmed",
                booking.id
            ));
        }
    }

    for payment in &snapshot.payments {
        if !booking_ids.contains(&payment.booking_id) {
            warnings.push(format!(
                "payment {} references unknown booking {}",
                payment.id, payment.booking_id
            ));
        }
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookly_domain::{Booking, Payment, PaymentType};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    #[test]
    fn warns_about_orphaned_payments_and_undated_bookings() {
        let booking = Booking::new(dec!(100), None);
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let orphan = Payment::new(Uuid::new_v4(), dec!(10), date, PaymentType::Advance);
        let snapshot = VendorSnapshot::new(vec![booking], vec![orphan], Vec::new());

        let warnings = snapshot_warnings(&snapshot);
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().any(|w| w.contains("unknown booking")));
        assert!(warnings.iter().any(|w| w.contains("no usable event date")));
    }

    #[test]
    fn reports_rows_dropped_while_loading() {
        let mut snapshot = VendorSnapshot::default();
        snapshot.dropped_rows = 3;
        assert_eq!(
            snapshot_warnings(&snapshot),
            vec!["3 unreadable record(s) skipped while loading".to_string()]
        );
    }
}
