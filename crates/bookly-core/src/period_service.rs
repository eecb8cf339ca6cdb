//! Month and year income/expense aggregation for profit-and-loss reporting.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::Datelike;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use bookly_domain::{
    percent_of, Expense, Granularity, Payment, PeriodBucket, PeriodComparison, PeriodKey, PeriodTotals,
    VendorSnapshot,
};

/// Parameters of one aggregation request.
///
/// `year` selects the twelve months for [`Granularity::Monthly`] and is not
/// consulted for [`Granularity::Yearly`]. An empty `entities` set disables
/// entity filtering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PeriodQuery {
    pub granularity: Granularity,
    pub year: i32,
    #[serde(default)]
    pub entities: HashSet<Uuid>,
}

impl PeriodQuery {
    pub fn monthly(year: i32) -> Self {
        Self {
            granularity: Granularity::Monthly,
            year,
            entities: HashSet::new(),
        }
    }

    pub fn yearly(year: i32) -> Self {
        Self {
            granularity: Granularity::Yearly,
            year,
            entities: HashSet::new(),
        }
    }

    pub fn with_entities(mut self, entities: impl IntoIterator<Item = Uuid>) -> Self {
        self.entities.extend(entities);
        self
    }

    fn admits(&self, entity: Option<Uuid>) -> bool {
        if self.entities.is_empty() {
            return true;
        }
        entity.is_some_and(|id| self.entities.contains(&id))
    }
}

pub struct PeriodService;

impl PeriodService {
    /// Buckets income (non-refund payments) and expenses by month or year.
    ///
    /// Payments are attributed to an entity through `booking_entities`
    /// (booking id to entity id). Refunds are never counted as income and are
    /// not subtracted either.
    pub fn aggregate(
        payments: &[Payment],
        expenses: &[Expense],
        booking_entities: &HashMap<Uuid, Uuid>,
        query: &PeriodQuery,
    ) -> Vec<PeriodBucket> {
        let income = payments.iter().filter(|payment| {
            !payment.is_refund() && query.admits(booking_entities.get(&payment.booking_id).copied())
        });
        let spending = expenses
            .iter()
            .filter(|expense| query.admits(expense.entity_id));

        let buckets = match query.granularity {
            Granularity::Monthly => {
                let mut months = [(Decimal::ZERO, Decimal::ZERO); 12];
                for payment in income.filter(|p| p.date.year() == query.year) {
                    let slot = &mut months[payment.date.month0() as usize].0;
                    *slot = slot.saturating_add(payment.amount);
                }
                for expense in spending.filter(|e| e.date.year() == query.year) {
                    let slot = &mut months[expense.date.month0() as usize].1;
                    *slot = slot.saturating_add(expense.amount);
                }
                months
                    .iter()
                    .zip(1u32..)
                    .map(|(&(inc, exp), month)| {
                        PeriodBucket::from_totals(PeriodKey::month(query.year, month), inc, exp)
                    })
                    .collect::<Vec<_>>()
            }
            Granularity::Yearly => {
                let mut years: BTreeMap<i32, (Decimal, Decimal)> = BTreeMap::new();
                for payment in income {
                    let slot = &mut years.entry(payment.date.year()).or_default().0;
                    *slot = slot.saturating_add(payment.amount);
                }
                for expense in spending {
                    let slot = &mut years.entry(expense.date.year()).or_default().1;
                    *slot = slot.saturating_add(expense.amount);
                }
                years
                    .into_iter()
                    .map(|(year, (inc, exp))| PeriodBucket::from_totals(PeriodKey::year(year), inc, exp))
                    .collect()
            }
        };

        debug!(
            granularity = %query.granularity,
            year = query.year,
            entities = query.entities.len(),
            buckets = buckets.len(),
            "aggregated periods"
        );
        buckets
    }

    /// Aggregates a snapshot, deriving entity attribution from its bookings.
    pub fn aggregate_snapshot(snapshot: &VendorSnapshot, query: &PeriodQuery) -> Vec<PeriodBucket> {
        Self::aggregate(
            &snapshot.payments,
            &snapshot.expenses,
            &snapshot.booking_entities(),
            query,
        )
    }

    pub fn totals(buckets: &[PeriodBucket]) -> PeriodTotals {
        let (income, expenses) = buckets
            .iter()
            .fold((Decimal::ZERO, Decimal::ZERO), |(inc, exp), bucket| {
                (inc.saturating_add(bucket.income), exp.saturating_add(bucket.expenses))
            });
        PeriodTotals::from_parts(income, expenses)
    }

    /// Income trend from `previous` to `current`; no percentage without prior income.
    pub fn compare(current: &PeriodBucket, previous: &PeriodBucket) -> PeriodComparison {
        let income_change = current.income.saturating_sub(previous.income);
        let change_percent =
            (!previous.income.is_zero()).then(|| percent_of(income_change, previous.income));
        PeriodComparison {
            current: current.clone(),
            previous: previous.clone(),
            income_change,
            change_percent,
        }
    }
}
