//! Derived, never-persisted facts produced by the core services.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::percent_of;
use crate::window::month_abbrev;

/// Effective lifecycle state of a booking, recomputed on every read.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DerivedStatus {
    Confirmed,
    Completed,
    Cancelled,
}

impl DerivedStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DerivedStatus::Confirmed => "confirmed",
            DerivedStatus::Completed => "completed",
            DerivedStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for DerivedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Badge-level payment state for a reconciled booking.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentState {
    Unpaid,
    Partial,
    Paid,
}

impl fmt::Display for PaymentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentState::Unpaid => "unpaid",
            PaymentState::Partial => "partial",
            PaymentState::Paid => "paid",
        };
        f.write_str(label)
    }
}

/// Net payment position of a single booking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationResult {
    pub total_amount: Decimal,
    pub total_paid: Decimal,
    pub total_refunded: Decimal,
    pub net_paid: Decimal,
    pub pending: Decimal,
    pub progress_percent: Decimal,
}

impl ReconciliationResult {
    pub fn payment_state(&self) -> PaymentState {
        if self.pending.is_zero() {
            PaymentState::Paid
        } else if self.net_paid.is_zero() {
            PaymentState::Unpaid
        } else {
            PaymentState::Partial
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LedgerEntryKind {
    Credit,
    Debit,
}

/// One chronological ledger line; the balance is local to the ledger window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    pub date: NaiveDate,
    pub particulars: String,
    pub debit: Decimal,
    pub credit: Decimal,
    pub running_balance: Decimal,
    pub kind: LedgerEntryKind,
    pub source_id: Uuid,
}

/// Column totals for a built ledger.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LedgerTotals {
    pub total_credit: Decimal,
    pub total_debit: Decimal,
    pub closing_balance: Decimal,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Monthly,
    Yearly,
}

impl Granularity {
    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "monthly" | "month" | "m" => Some(Granularity::Monthly),
            "yearly" | "year" | "y" => Some(Granularity::Yearly),
            _ => None,
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Granularity::Monthly => "monthly",
            Granularity::Yearly => "yearly",
        };
        f.write_str(label)
    }
}

/// Identifies a calendar month (`month = Some`) or a whole year.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PeriodKey {
    pub year: i32,
    pub month: Option<u32>,
}

impl PeriodKey {
    pub fn month(year: i32, month: u32) -> Self {
        Self {
            year,
            month: Some(month),
        }
    }

    pub fn year(year: i32) -> Self {
        Self { year, month: None }
    }

    pub fn label(&self) -> String {
        match self.month {
            Some(month) => format!("{} {}", month_abbrev(month), self.year),
            None => self.year.to_string(),
        }
    }
}

/// Computes `profit / income * 100`, reporting zero when there is no income.
pub fn margin_percent(income: Decimal, profit: Decimal) -> Decimal {
    percent_of(profit, income)
}

/// Aggregated income and expenses for one month or year.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PeriodBucket {
    pub key: PeriodKey,
    pub period_label: String,
    pub income: Decimal,
    pub expenses: Decimal,
    pub profit: Decimal,
    pub margin_percent: Decimal,
}

impl PeriodBucket {
    pub fn from_totals(key: PeriodKey, income: Decimal, expenses: Decimal) -> Self {
        let profit = income.saturating_sub(expenses);
        Self {
            key,
            period_label: key.label(),
            income,
            expenses,
            profit,
            margin_percent: margin_percent(income, profit),
        }
    }
}

/// Sums across a bucket sequence, with profit and margin recomputed from the sums.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PeriodTotals {
    pub income: Decimal,
    pub expenses: Decimal,
    pub profit: Decimal,
    pub margin_percent: Decimal,
}

impl PeriodTotals {
    pub fn from_parts(income: Decimal, expenses: Decimal) -> Self {
        let profit = income.saturating_sub(expenses);
        Self {
            income,
            expenses,
            profit,
            margin_percent: margin_percent(income, profit),
        }
    }
}

/// Income trend between two buckets, used by dashboard trend cards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PeriodComparison {
    pub current: PeriodBucket,
    pub previous: PeriodBucket,
    pub income_change: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_percent: Option<Decimal>,
}
