use jiff::{
    Timestamp,
    civil::{Date, Weekday},
    tz::TimeZone,
};

// Bit layout, low bits first.
const TYPE: (u32, u32) = (0, 1);
const DOW: (u32, u32) = (1, 7);
const BEGIN_MONTH: (u32, u32) = (8, 4);
const BEGIN_DAY_DOW: (u32, u32) = (12, 5);
const BEGIN_WEEK: (u32, u32) = (17, 3);
const BEGIN_HRS: (u32, u32) = (20, 5);
const BEGIN_MINS: (u32, u32) = (25, 6);
const END_MONTH: (u32, u32) = (31, 4);
const END_DAY_DOW: (u32, u32) = (35, 5);
const END_WEEK: (u32, u32) = (40, 3);
const END_HRS: (u32, u32) = (43, 5);
const END_MINS: (u32, u32) = (48, 6);

const LAST_WEEK_OF_MONTH: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainType {
    /// Begin and end days are days of the month.
    YearMonthDay,
    /// Begin and end days are weekdays (Sunday = 1) in the nth week of the month.
    NthDayOfWeek,
}

/// Recurring activation window of a conditional restriction, packed in a u64.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeDomain(u64);

const fn get(value: u64, (shift, bits): (u32, u32)) -> u32 {
    ((value >> shift) & ((1 << bits) - 1)) as u32
}

const fn set(value: u64, (shift, bits): (u32, u32), field: u32) -> u64 {
    let mask = ((1u64 << bits) - 1) << shift;
    (value & !mask) | (((field as u64) << shift) & mask)
}

impl TimeDomain {
    pub const fn from_value(value: u64) -> Self {
        TimeDomain(value)
    }

    pub fn builder() -> TimeDomainBuilder {
        TimeDomainBuilder::default()
    }

    pub const fn value(&self) -> u64 {
        self.0
    }

    pub fn domain_type(&self) -> DomainType {
        match get(self.0, TYPE) {
            0 => DomainType::YearMonthDay,
            _ => DomainType::NthDayOfWeek,
        }
    }

    /// Day-of-week mask, bit 0 is Sunday.
    pub fn dow(&self) -> u32 {
        get(self.0, DOW)
    }

    pub fn begin_month(&self) -> u32 {
        get(self.0, BEGIN_MONTH)
    }

    pub fn begin_day_dow(&self) -> u32 {
        get(self.0, BEGIN_DAY_DOW)
    }

    pub fn begin_week(&self) -> u32 {
        get(self.0, BEGIN_WEEK)
    }

    pub fn begin_hrs(&self) -> u32 {
        get(self.0, BEGIN_HRS)
    }

    pub fn begin_mins(&self) -> u32 {
        get(self.0, BEGIN_MINS)
    }

    pub fn end_month(&self) -> u32 {
        get(self.0, END_MONTH)
    }

    pub fn end_day_dow(&self) -> u32 {
        get(self.0, END_DAY_DOW)
    }

    pub fn end_week(&self) -> u32 {
        get(self.0, END_WEEK)
    }

    pub fn end_hrs(&self) -> u32 {
        get(self.0, END_HRS)
    }

    pub fn end_mins(&self) -> u32 {
        get(self.0, END_MINS)
    }

    fn has_date_range(&self) -> bool {
        self.begin_month() != 0
            || self.end_month() != 0
            || (self.domain_type() == DomainType::NthDayOfWeek && self.begin_week() != 0)
    }

    /// Whether the window contains `local_time` (seconds since the epoch)
    /// observed in `time_zone`. A domain without any time or date field is
    /// always active.
    pub fn is_active(&self, local_time: i64, time_zone: &TimeZone) -> bool {
        let Ok(timestamp) = Timestamp::from_second(local_time) else {
            return false;
        };
        let now = timestamp.to_zoned(time_zone.clone());

        let dow = self.dow();
        if dow != 0 && dow & (1 << now.weekday().to_sunday_zero_offset()) == 0 {
            return false;
        }

        let minute = now.hour() as u32 * 60 + now.minute() as u32;
        let begin = self.begin_hrs() * 60 + self.begin_mins();
        let end = self.end_hrs() * 60 + self.end_mins();
        let in_time = (begin == 0 && end == 0) || within(minute, begin, end);

        if !self.has_date_range() {
            return in_time;
        }

        let today = now.date();
        match self.date_range(today) {
            Some((first, last)) => in_time && within(today, first, last),
            None => false,
        }
    }

    /// First and last day of the window in the year of `today`.
    fn date_range(&self, today: Date) -> Option<(Date, Date)> {
        let year = today.year();
        let month_or_current = |month: u32| {
            if month == 0 {
                today.month()
            } else {
                month as i8
            }
        };
        let begin_month = month_or_current(self.begin_month());
        let end_month = month_or_current(self.end_month());

        match self.domain_type() {
            DomainType::YearMonthDay => {
                let first = Date::new(year, begin_month, self.begin_day_dow().max(1) as i8).ok()?;
                let last = match self.end_day_dow() {
                    0 => Date::new(year, end_month, 1).ok()?.last_of_month(),
                    day => Date::new(year, end_month, day as i8).ok()?,
                };
                Some((first, last))
            }
            DomainType::NthDayOfWeek => {
                let first = nth_weekday(year, begin_month, self.begin_week(), self.begin_day_dow())?;
                let last = nth_weekday(year, end_month, self.end_week(), self.end_day_dow())?;
                Some((first, last))
            }
        }
    }
}

fn nth_weekday(year: i16, month: i8, week: u32, day: u32) -> Option<Date> {
    let month_start = Date::new(year, month, 1).ok()?;
    if week == 0 || day == 0 {
        return Some(month_start);
    }
    let weekday = Weekday::from_sunday_one_offset(day as i8).ok()?;
    let nth = if week >= LAST_WEEK_OF_MONTH {
        -1
    } else {
        week as i8
    };
    month_start.nth_weekday_of_month(nth, weekday).ok()
}

/// Inclusive range test that wraps around when `begin` is after `end`.
fn within<T: PartialOrd>(value: T, begin: T, end: T) -> bool {
    if begin <= end {
        begin <= value && value <= end
    } else {
        value >= begin || value <= end
    }
}

#[derive(Default)]
pub struct TimeDomainBuilder {
    value: u64,
}

impl TimeDomainBuilder {
    pub fn with_type(mut self, domain_type: DomainType) -> Self {
        let flag = match domain_type {
            DomainType::YearMonthDay => 0,
            DomainType::NthDayOfWeek => 1,
        };
        self.value = set(self.value, TYPE, flag);
        self
    }

    pub fn with_weekdays(mut self, weekdays: &[Weekday]) -> Self {
        let mask = weekdays
            .iter()
            .fold(0, |mask, day| mask | (1 << day.to_sunday_zero_offset()));
        self.value = set(self.value, DOW, mask);
        self
    }

    pub fn with_begin_time(mut self, hours: u32, minutes: u32) -> Self {
        self.value = set(self.value, BEGIN_HRS, hours);
        self.value = set(self.value, BEGIN_MINS, minutes);
        self
    }

    pub fn with_end_time(mut self, hours: u32, minutes: u32) -> Self {
        self.value = set(self.value, END_HRS, hours);
        self.value = set(self.value, END_MINS, minutes);
        self
    }

    pub fn with_begin_date(mut self, month: u32, day_dow: u32, week: u32) -> Self {
        self.value = set(self.value, BEGIN_MONTH, month);
        self.value = set(self.value, BEGIN_DAY_DOW, day_dow);
        self.value = set(self.value, BEGIN_WEEK, week);
        self
    }

    pub fn with_end_date(mut self, month: u32, day_dow: u32, week: u32) -> Self {
        self.value = set(self.value, END_MONTH, month);
        self.value = set(self.value, END_DAY_DOW, day_dow);
        self.value = set(self.value, END_WEEK, week);
        self
    }

    pub fn build(self) -> TimeDomain {
        TimeDomain(self.value)
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    fn at(year: i16, month: i8, day: i8, hour: i8, minute: i8) -> i64 {
        date(year, month, day)
            .at(hour, minute, 0, 0)
            .to_zoned(TimeZone::UTC)
            .unwrap()
            .timestamp()
            .as_second()
    }

    #[test]
    fn test_fields_round_trip_through_packing() {
        let domain = TimeDomain::builder()
            .with_type(DomainType::NthDayOfWeek)
            .with_weekdays(&[Weekday::Monday, Weekday::Friday])
            .with_begin_time(7, 30)
            .with_end_time(19, 45)
            .with_begin_date(3, 1, 2)
            .with_end_date(10, 7, 5)
            .build();

        let decoded = TimeDomain::from_value(domain.value());
        assert_eq!(decoded.domain_type(), DomainType::NthDayOfWeek);
        assert_eq!(decoded.dow(), 0b0100010);
        assert_eq!((decoded.begin_hrs(), decoded.begin_mins()), (7, 30));
        assert_eq!((decoded.end_hrs(), decoded.end_mins()), (19, 45));
        assert_eq!(
            (decoded.begin_month(), decoded.begin_day_dow(), decoded.begin_week()),
            (3, 1, 2)
        );
        assert_eq!(
            (decoded.end_month(), decoded.end_day_dow(), decoded.end_week()),
            (10, 7, 5)
        );
    }

    #[test]
    fn test_empty_domain_is_always_active() {
        let domain = TimeDomain::default();
        assert!(domain.is_active(at(2024, 6, 12, 3, 0), &TimeZone::UTC));
    }

    #[test]
    fn test_daily_hours_with_weekdays() {
        let domain = TimeDomain::builder()
            .with_weekdays(&[
                Weekday::Monday,
                Weekday::Tuesday,
                Weekday::Wednesday,
                Weekday::Thursday,
                Weekday::Friday,
            ])
            .with_begin_time(7, 0)
            .with_end_time(9, 0)
            .build();

        // 2024-06-12 is a Wednesday, 2024-06-15 a Saturday.
        assert!(domain.is_active(at(2024, 6, 12, 8, 15), &TimeZone::UTC));
        assert!(!domain.is_active(at(2024, 6, 12, 10, 0), &TimeZone::UTC));
        assert!(!domain.is_active(at(2024, 6, 15, 8, 15), &TimeZone::UTC));
    }

    #[test]
    fn test_overnight_hours_wrap() {
        let domain = TimeDomain::builder()
            .with_begin_time(22, 0)
            .with_end_time(6, 0)
            .build();

        assert!(domain.is_active(at(2024, 6, 12, 23, 30), &TimeZone::UTC));
        assert!(domain.is_active(at(2024, 6, 12, 5, 0), &TimeZone::UTC));
        assert!(!domain.is_active(at(2024, 6, 12, 12, 0), &TimeZone::UTC));
    }

    #[test]
    fn test_nth_weekday_month_range() {
        // From the second Sunday of March to the last Saturday of October.
        let domain = TimeDomain::builder()
            .with_type(DomainType::NthDayOfWeek)
            .with_begin_date(3, 1, 2)
            .with_end_date(10, 7, 5)
            .build();

        assert!(!domain.is_active(at(2024, 3, 9, 12, 0), &TimeZone::UTC));
        assert!(domain.is_active(at(2024, 3, 10, 12, 0), &TimeZone::UTC));
        assert!(domain.is_active(at(2024, 7, 1, 12, 0), &TimeZone::UTC));
        assert!(domain.is_active(at(2024, 10, 26, 12, 0), &TimeZone::UTC));
        assert!(!domain.is_active(at(2024, 10, 27, 12, 0), &TimeZone::UTC));
    }

    #[test]
    fn test_month_day_range_wrapping_new_year() {
        let domain = TimeDomain::builder()
            .with_begin_date(11, 15, 0)
            .with_end_date(2, 28, 0)
            .build();

        assert!(domain.is_active(at(2024, 12, 24, 12, 0), &TimeZone::UTC));
        assert!(domain.is_active(at(2024, 1, 10, 12, 0), &TimeZone::UTC));
        assert!(!domain.is_active(at(2024, 6, 1, 12, 0), &TimeZone::UTC));
    }

    #[test]
    fn test_evaluated_in_local_time() {
        let tz = TimeZone::get("America/New_York").unwrap();
        let domain = TimeDomain::builder()
            .with_begin_time(7, 0)
            .with_end_time(9, 0)
            .build();

        // 12:00 UTC is 08:00 in New York during daylight saving time.
        assert!(domain.is_active(at(2024, 6, 12, 12, 0), &tz));
        assert!(!domain.is_active(at(2024, 6, 12, 12, 0), &TimeZone::UTC));
    }
}
