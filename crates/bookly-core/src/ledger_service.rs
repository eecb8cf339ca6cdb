//! Chronological credit/debit ledger with a window-local running balance.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use bookly_domain::{Expense, LedgerEntry, LedgerEntryKind, LedgerTotals, LedgerWindow, Payment};

/// A ledger line before the running balance is known.
#[derive(Debug, Clone)]
struct Movement {
    date: NaiveDate,
    particulars: String,
    amount: Decimal,
    kind: LedgerEntryKind,
    source_id: Uuid,
}

impl Movement {
    fn from_payment(payment: &Payment) -> Self {
        let particulars = match payment.notes.as_deref().map(str::trim) {
            Some(notes) if !notes.is_empty() => notes.to_string(),
            _ => format!("Payment received ({})", payment.payment_type),
        };
        Self {
            date: payment.date,
            particulars,
            amount: payment.amount,
            kind: LedgerEntryKind::Credit,
            source_id: payment.id,
        }
    }

    fn from_expense(expense: &Expense) -> Self {
        let particulars = match expense.description.as_deref().map(str::trim) {
            Some(description) if !description.is_empty() => description.to_string(),
            _ => expense.category.clone(),
        };
        Self {
            date: expense.date,
            particulars,
            amount: expense.amount,
            kind: LedgerEntryKind::Debit,
            source_id: expense.id,
        }
    }
}

pub struct LedgerService;

impl LedgerService {
    /// Lazily yields ledger entries for `payments` (credits) and `expenses` (debits).
    ///
    /// Refund payments are left out. Entries are ordered by date; equal dates
    /// keep payments ahead of expenses, each in input order. When a window is
    /// given it is applied before balancing, so the balance starts at zero on
    /// the first entry inside the window. Every call starts a fresh pass.
    pub fn iter<'a>(
        payments: &'a [Payment],
        expenses: &'a [Expense],
        window: Option<&'a LedgerWindow>,
    ) -> impl Iterator<Item = LedgerEntry> + 'a {
        let in_window = move |date: NaiveDate| window.map_or(true, |w| w.contains(date));

        let mut movements: Vec<Movement> = payments
            .iter()
            .filter(|payment| !payment.is_refund() && in_window(payment.date))
            .map(Movement::from_payment)
            .chain(
                expenses
                    .iter()
                    .filter(|expense| in_window(expense.date))
                    .map(Movement::from_expense),
            )
            .collect();
        // stable: keeps the payments-then-expenses input order for equal dates
        movements.sort_by_key(|movement| movement.date);

        movements
            .into_iter()
            .scan(Decimal::ZERO, |balance, movement| {
                let (credit, debit) = match movement.kind {
                    LedgerEntryKind::Credit => (movement.amount, Decimal::ZERO),
                    LedgerEntryKind::Debit => (Decimal::ZERO, movement.amount),
                };
                *balance = balance.saturating_add(credit).saturating_sub(debit);
                Some(LedgerEntry {
                    date: movement.date,
                    particulars: movement.particulars,
                    debit,
                    credit,
                    running_balance: *balance,
                    kind: movement.kind,
                    source_id: movement.source_id,
                })
            })
    }

    /// Collects [`LedgerService::iter`] into a vector.
    pub fn build(
        payments: &[Payment],
        expenses: &[Expense],
        window: Option<&LedgerWindow>,
    ) -> Vec<LedgerEntry> {
        let entries: Vec<LedgerEntry> = Self::iter(payments, expenses, window).collect();
        debug!(
            entries = entries.len(),
            window = %window.map_or_else(|| "all time".to_string(), LedgerWindow::label),
            "built ledger"
        );
        entries
    }

    pub fn totals(entries: &[LedgerEntry]) -> LedgerTotals {
        entries.iter().fold(LedgerTotals::default(), |mut totals, entry| {
            totals.total_credit = totals.total_credit.saturating_add(entry.credit);
            totals.total_debit = totals.total_debit.saturating_add(entry.debit);
            totals.closing_balance = entry.running_balance;
            totals
        })
    }
}
