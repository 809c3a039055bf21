//! Time source abstraction
//!
//! Everything that needs "now" (date-range filters, the current-month total,
//! `createdAt` stamps, the future-date check) takes a [`Clock`] instead of
//! reading the system time directly.

use chrono::{DateTime, Local, NaiveDate, NaiveTime, Utc};

/// Source of the current instant and the current calendar day
pub trait Clock {
    /// Current instant, used for `createdAt` stamps
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar day
    ///
    /// The system clock answers in local time. A [`FixedClock`] answers with
    /// the UTC date of its frozen instant, so `today` and `now` always agree.
    fn today(&self) -> NaiveDate;
}

/// Clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock frozen at a given instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// Clock frozen at noon (UTC) of the given day
    pub fn on(date: NaiveDate) -> Self {
        let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default();
        Self::new(date.and_time(noon).and_utc())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    // No local offset is applied.
    fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_today() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let clock = FixedClock::on(date);
        assert_eq!(clock.today(), date);
        assert_eq!(clock.now().date_naive(), date);
    }

    #[test]
    fn test_fixed_clock_today_is_utc_date_near_midnight() {
        let late = NaiveDate::from_ymd_opt(2024, 3, 31)
            .unwrap()
            .and_hms_opt(23, 59, 30)
            .unwrap()
            .and_utc();
        let clock = FixedClock::new(late);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
    }

    #[test]
    fn test_system_clock_is_close_to_now() {
        let clock = SystemClock;
        let delta = Utc::now() - clock.now();
        assert!(delta.num_seconds().abs() < 5);
    }
}
