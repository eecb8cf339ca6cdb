use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::non_negative;
use crate::lenient;

/// Classifies a payment record. Only `Refund` moves money back to the client.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    Full,
    Partial,
    Advance,
    Overpaid,
    Refund,
}

impl PaymentType {
    pub fn is_refund(self) -> bool {
        matches!(self, PaymentType::Refund)
    }
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentType::Full => "full",
            PaymentType::Partial => "partial",
            PaymentType::Advance => "advance",
            PaymentType::Overpaid => "overpaid",
            PaymentType::Refund => "refund",
        };
        f.write_str(label)
    }
}

/// A payment (or refund) recorded against a booking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,
    pub booking_id: Uuid,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub amount: Decimal,
    #[serde(deserialize_with = "lenient::date")]
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub payment_type: PaymentType,
    #[serde(
        default,
        deserialize_with = "lenient::optional_amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub refund_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Payment {
    pub fn new(booking_id: Uuid, amount: Decimal, date: NaiveDate, payment_type: PaymentType) -> Self {
        Self {
            id: Uuid::new_v4(),
            booking_id,
            amount: non_negative(amount),
            date,
            payment_type,
            refund_amount: None,
            method: None,
            notes: None,
        }
    }

    /// Builds a refund whose netting magnitude overrides the recorded amount.
    pub fn refund(booking_id: Uuid, amount: Decimal, refund_amount: Option<Decimal>, date: NaiveDate) -> Self {
        let mut payment = Self::new(booking_id, amount, date, PaymentType::Refund);
        payment.refund_amount = refund_amount.map(non_negative);
        payment
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn is_refund(&self) -> bool {
        self.payment_type.is_refund()
    }

    /// Magnitude used when netting this record: `refund_amount ?? amount` for refunds.
    pub fn effective_amount(&self) -> Decimal {
        if self.is_refund() {
            self.refund_amount.unwrap_or(self.amount)
        } else {
            self.amount
        }
    }
}
