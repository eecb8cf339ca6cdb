//! Immutable per-call view of a vendor's records.

use std::collections::HashMap;

use serde::{de::IgnoredAny, Deserialize, Serialize};
use uuid::Uuid;

use crate::{booking::Booking, expense::Expense, payment::Payment};

/// Bookings, payments, and expenses fetched together as one consistent read.
///
/// Rows that cannot be read at all (a payment without a usable date, a
/// malformed id) are dropped while loading and counted in `dropped_rows`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(from = "RawSnapshot")]
pub struct VendorSnapshot {
    pub bookings: Vec<Booking>,
    pub payments: Vec<Payment>,
    pub expenses: Vec<Expense>,
    #[serde(skip)]
    pub dropped_rows: usize,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Row<T> {
    Kept(T),
    Dropped(#[allow(dead_code)] IgnoredAny),
}

#[derive(Deserialize)]
struct RawSnapshot {
    #[serde(default)]
    bookings: Vec<Row<Booking>>,
    #[serde(default)]
    payments: Vec<Row<Payment>>,
    #[serde(default)]
    expenses: Vec<Row<Expense>>,
}

fn keep<T>(rows: Vec<Row<T>>, dropped: &mut usize) -> Vec<T> {
    rows.into_iter()
        .filter_map(|row| match row {
            Row::Kept(value) => Some(value),
            Row::Dropped(_) => {
                *dropped += 1;
                None
            }
        })
        .collect()
}

impl From<RawSnapshot> for VendorSnapshot {
    fn from(raw: RawSnapshot) -> Self {
        let mut dropped_rows = 0;
        Self {
            bookings: keep(raw.bookings, &mut dropped_rows),
            payments: keep(raw.payments, &mut dropped_rows),
            expenses: keep(raw.expenses, &mut dropped_rows),
            dropped_rows,
        }
    }
}

impl VendorSnapshot {
    pub fn new(bookings: Vec<Booking>, payments: Vec<Payment>, expenses: Vec<Expense>) -> Self {
        Self {
            bookings,
            payments,
            expenses,
            dropped_rows: 0,
        }
    }

    /// Resolves a booking from a full id or a unique id prefix.
    pub fn find_booking(&self, reference: &str) -> Option<&Booking> {
        let needle = reference.trim().to_ascii_lowercase().replace('-', "");
        if needle.is_empty() {
            return None;
        }
        let mut matches = self
            .bookings
            .iter()
            .filter(|booking| booking.id.simple().to_string().starts_with(&needle));
        let first = matches.next()?;
        if matches.next().is_some() {
            return None;
        }
        Some(first)
    }

    /// Payments attached to `booking_id`, in input order.
    pub fn payments_for(&self, booking_id: Uuid) -> Vec<Payment> {
        self.payments
            .iter()
            .filter(|payment| payment.booking_id == booking_id)
            .cloned()
            .collect()
    }

    /// Maps each booking that carries an entity to that entity.
    pub fn booking_entities(&self) -> HashMap<Uuid, Uuid> {
        self.bookings
            .iter()
            .filter_map(|booking| booking.entity_id.map(|entity| (booking.id, entity)))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty() && self.payments.is_empty() && self.expenses.is_empty()
    }
}
