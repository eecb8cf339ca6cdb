use bookly_config::Config;
use bookly_core::{CurrencyFormatter, DateFormatter};
use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

/// Presentation formatters derived from the active configuration.
#[derive(Debug, Clone)]
pub struct CliFormatters {
    currency: String,
    precision: usize,
}

impl CliFormatters {
    pub fn from_config(config: &Config) -> Self {
        Self {
            currency: config.currency.clone(),
            precision: config.precision() as usize,
        }
    }

    /// Amount in the configured currency.
    pub fn money(&self, amount: Decimal) -> String {
        self.format_amount(amount, "")
    }

    /// Bare amount at the configured precision, for table cells.
    pub fn number(&self, amount: Decimal) -> String {
        fixed(amount, self.precision)
    }

    pub fn percent(&self, value: Decimal) -> String {
        format!("{}%", fixed(value, 1))
    }

    pub fn date_or_dash(&self, date: Option<NaiveDate>) -> String {
        date.map_or_else(|| "-".to_string(), |value| self.format_date(value))
    }
}

impl CurrencyFormatter for CliFormatters {
    fn format_amount(&self, amount: Decimal, currency: &str) -> String {
        let code = if currency.is_empty() {
            self.currency.as_str()
        } else {
            currency
        };
        format!("{} {code}", fixed(amount, self.precision))
    }
}

impl DateFormatter for CliFormatters {
    fn format_date(&self, date: NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }
}

/// Rounds half away from zero, then pads to exactly `precision` decimals.
fn fixed(amount: Decimal, precision: usize) -> String {
    let dp = u32::try_from(precision).unwrap_or(u32::MAX);
    let rounded = amount.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.precision$}")
}
