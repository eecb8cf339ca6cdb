use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{de::Deserializer, Deserialize, Serialize};
use uuid::Uuid;

use crate::common::{non_negative, short_id, Displayable};
use crate::lenient;

/// Status flag stored on a booking. Only an explicit vendor action sets `Cancelled`.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Active,
    Cancelled,
}

impl BookingStatus {
    fn from_value(value: Option<String>) -> Self {
        value
            .map(|v| BookingStatus::from_label(&v))
            .unwrap_or_default()
    }

    /// Maps a stored label onto a status; unknown labels fall back to `Active`.
    pub fn from_label(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "cancelled" | "canceled" => BookingStatus::Cancelled,
            _ => BookingStatus::Active,
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BookingStatus::Active => "active",
            BookingStatus::Cancelled => "cancelled",
        };
        f.write_str(label)
    }
}

impl<'de> Deserialize<'de> for BookingStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(BookingStatus::from_value(value))
    }
}

/// A booked event as read from the data store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub total_amount: Decimal,
    #[serde(default, deserialize_with = "lenient::optional_date")]
    pub event_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient::optional_time")]
    pub from_time: Option<NaiveTime>,
    #[serde(default, deserialize_with = "lenient::optional_time")]
    pub to_time: Option<NaiveTime>,
    #[serde(default)]
    pub explicit_status: BookingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Booking {
    pub fn new(total_amount: Decimal, event_date: Option<NaiveDate>) -> Self {
        Self {
            id: Uuid::new_v4(),
            total_amount: non_negative(total_amount),
            event_date,
            from_time: None,
            to_time: None,
            explicit_status: BookingStatus::Active,
            entity_id: None,
            client_name: None,
            title: None,
        }
    }

    pub fn with_times(mut self, from_time: Option<NaiveTime>, to_time: Option<NaiveTime>) -> Self {
        self.from_time = from_time;
        self.to_time = to_time;
        self
    }

    pub fn with_entity(mut self, entity_id: Uuid) -> Self {
        self.entity_id = Some(entity_id);
        self
    }

    pub fn with_client(mut self, client_name: impl Into<String>) -> Self {
        self.client_name = Some(client_name.into());
        self
    }

    pub fn cancel(&mut self) {
        self.explicit_status = BookingStatus::Cancelled;
    }

    pub fn is_cancelled(&self) -> bool {
        self.explicit_status == BookingStatus::Cancelled
    }
}

impl Displayable for Booking {
    fn display_label(&self) -> String {
        self.title
            .as_deref()
            .or(self.client_name.as_deref())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Booking {}", short_id(self.id)))
    }
}
