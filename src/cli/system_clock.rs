use chrono::{Local, NaiveDateTime};

use bookly_core::Clock;

/// Real-time clock reading the machine's local wall-clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}
