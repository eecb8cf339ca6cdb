//! Lifecycle status derivation for bookings.

use chrono::NaiveDateTime;
use uuid::Uuid;

use bookly_domain::{Booking, DerivedStatus};

use crate::time::Clock;

/// Stateless status derivation. Results are never cached; call again as time advances.
pub struct StatusService;

impl StatusService {
    /// Derives the effective status of `booking` at the local instant `now`.
    ///
    /// An explicit cancellation always wins. A booking without a usable event
    /// date stays `Confirmed`. Otherwise the booking is `Completed` once its
    /// event date is on or before today (no end time) or once `now` reaches the
    /// end instant `event_date at to_time`.
    ///
    /// Without an end time a same-day event counts as completed from midnight,
    /// not from the end of the day.
    pub fn derive(booking: &Booking, now: NaiveDateTime) -> DerivedStatus {
        if booking.is_cancelled() {
            return DerivedStatus::Cancelled;
        }
        let Some(event_date) = booking.event_date else {
            return DerivedStatus::Confirmed;
        };
        if event_date > now.date() {
            return DerivedStatus::Confirmed;
        }
        match booking.to_time {
            None => DerivedStatus::Completed,
            Some(end_time) => {
                if now >= event_date.and_time(end_time) {
                    DerivedStatus::Completed
                } else {
                    DerivedStatus::Confirmed
                }
            }
        }
    }

    /// Reads the clock once and derives the status.
    pub fn derive_with_clock(booking: &Booking, clock: &dyn Clock) -> DerivedStatus {
        Self::derive(booking, clock.now())
    }

    /// Derives every booking's status against the same instant, in input order.
    pub fn derive_all(bookings: &[Booking], now: NaiveDateTime) -> Vec<(Uuid, DerivedStatus)> {
        bookings
            .iter()
            .map(|booking| (booking.id, Self::derive(booking, now)))
            .collect()
    }
}
