use crate::domain::ports::Clock;
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Offset, TimeZone, Utc};

/// Wall clock, with "today" taken in a fixed UTC offset.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn utc() -> Self {
        Self::new(Utc.fix())
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::utc()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn offset(&self) -> FixedOffset {
        self.offset
    }
}

/// Clock pinned to one instant; used by tests and dry runs.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    instant: DateTime<Utc>,
    offset: FixedOffset,
}

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self {
            instant,
            offset: Utc.fix(),
        }
    }

    /// Noon UTC on `date`.
    pub fn on(date: NaiveDate) -> Self {
        Self::on_in(date, Utc.fix())
    }

    /// Local noon on `date` in `offset`, so `today()` is `date` for any offset.
    pub fn on_in(date: NaiveDate, offset: FixedOffset) -> Self {
        let noon = date.and_hms_opt(12, 0, 0).unwrap_or_default();
        let utc = noon - Duration::seconds(i64::from(offset.local_minus_utc()));
        Self::new(Utc.from_utc_datetime(&utc)).with_offset(offset)
    }

    pub fn with_offset(self, offset: FixedOffset) -> Self {
        Self { offset, ..self }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }

    fn offset(&self) -> FixedOffset {
        self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_fixed_clock_today() {
        let day = date(2026, 10, 19);
        let clock = FixedClock::on(day);
        assert_eq!(clock.today(), day);
        assert_eq!(clock.now().date_naive(), day);
    }

    #[test]
    fn test_fixed_clock_on_in_keeps_local_date() {
        let day = date(2026, 10, 19);
        for hours in [-12, -5, 0, 8, 14] {
            let offset = FixedOffset::east_opt(hours * 3600).unwrap();
            assert_eq!(FixedClock::on_in(day, offset).today(), day, "offset {}h", hours);
        }
    }

    #[test]
    fn test_local_date_follows_offset() {
        let instant = Utc.with_ymd_and_hms(2026, 6, 14, 23, 30, 0).unwrap();
        let utc = FixedClock::new(instant);
        let taipei = utc.with_offset(FixedOffset::east_opt(8 * 3600).unwrap());

        assert_eq!(utc.today(), date(2026, 6, 14));
        assert_eq!(taipei.today(), date(2026, 6, 15));
        assert_eq!(taipei.local_date(instant), date(2026, 6, 15));
    }

    #[test]
    fn test_system_clock_offset_shifts_date_by_at_most_one_day() {
        let east = SystemClock::new(FixedOffset::east_opt(14 * 3600).unwrap());
        let west = SystemClock::new(FixedOffset::west_opt(12 * 3600).unwrap());
        let diff = (east.today() - west.today()).num_days();
        assert!((0..=2).contains(&diff));
    }
}
