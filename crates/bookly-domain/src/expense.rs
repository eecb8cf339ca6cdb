use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::non_negative;
use crate::lenient;

/// An operating expense, optionally attributed to a venue/branch entity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: Uuid,
    #[serde(deserialize_with = "lenient::date")]
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub amount: Decimal,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Expense {
    pub fn new(date: NaiveDate, amount: Decimal, category: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            amount: non_negative(amount),
            category: category.into(),
            entity_id: None,
            description: None,
        }
    }

    pub fn with_entity(mut self, entity_id: Uuid) -> Self {
        self.entity_id = Some(entity_id);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
