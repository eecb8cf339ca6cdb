use rust_decimal::Decimal;

use bookly_domain::{non_negative, percent_of, Booking, Payment, ReconciliationResult};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Nets payments against refunds for a single booking.
pub struct ReconciliationService;

impl ReconciliationService {
    /// Reconciles `payments` against a booking total.
    ///
    /// Refunds contribute `refund_amount ?? amount` to the refunded sum and
    /// never to the paid sum. Net paid is floored at zero and pending is held
    /// within `[0, total_amount]`.
    pub fn reconcile(total_amount: Decimal, payments: &[Payment]) -> ReconciliationResult {
        let (total_paid, total_refunded) =
            payments
                .iter()
                .fold((Decimal::ZERO, Decimal::ZERO), |(paid, refunded), payment| {
                    if payment.is_refund() {
                        (paid, refunded.saturating_add(payment.effective_amount()))
                    } else {
                        (paid.saturating_add(payment.amount), refunded)
                    }
                });

        let net_paid = non_negative(total_paid.saturating_sub(total_refunded));
        let pending = non_negative(total_amount.min(total_amount.saturating_sub(net_paid)));
        let progress_percent = if total_amount <= Decimal::ZERO {
            Decimal::ZERO
        } else if net_paid >= total_amount {
            HUNDRED
        } else {
            percent_of(net_paid, total_amount).clamp(Decimal::ZERO, HUNDRED)
        };

        ReconciliationResult {
            total_amount,
            total_paid,
            total_refunded,
            net_paid,
            pending,
            progress_percent,
        }
    }

    /// Picks the booking's own payments out of `payments` and reconciles them.
    pub fn reconcile_booking(booking: &Booking, payments: &[Payment]) -> ReconciliationResult {
        let own: Vec<Payment> = payments
            .iter()
            .filter(|payment| payment.booking_id == booking.id)
            .cloned()
            .collect();
        Self::reconcile(booking.total_amount, &own)
    }
}
