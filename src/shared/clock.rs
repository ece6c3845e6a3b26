//! Time-of-day source for operating-hour checks.

use chrono::{FixedOffset, Local, NaiveTime, Utc};

/// Supplies the current wall-clock time of day.
pub trait Clock: Send + Sync {
    fn time_of_day(&self) -> NaiveTime;
}

/// Reads the system clock, optionally shifted to a fixed UTC offset.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    utc_offset: Option<FixedOffset>,
}

impl SystemClock {
    pub fn new(utc_offset: Option<FixedOffset>) -> Self {
        Self { utc_offset }
    }
}

impl Clock for SystemClock {
    fn time_of_day(&self) -> NaiveTime {
        match self.utc_offset {
            Some(offset) => Utc::now().with_timezone(&offset).time(),
            None => Local::now().time(),
        }
    }
}

/// Clock pinned to a single instant, for tests.
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveTime);

#[cfg(test)]
impl FixedClock {
    pub fn at(hour: u32, minute: u32) -> Self {
        Self(NaiveTime::from_hms_opt(hour, minute, 0).unwrap())
    }
}

#[cfg(test)]
impl Clock for FixedClock {
    fn time_of_day(&self) -> NaiveTime {
        self.0
    }
}
