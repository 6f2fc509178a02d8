use jiff::{Timestamp, Zoned, civil, tz::TimeZone};
use tracing::warn;

use super::timezone_db::TimezoneDb;
use crate::constants::{DEFAULT_SECOND_OF_WEEK, SECONDS_PER_DAY, SECONDS_PER_WEEK};

/// Wall clock state at a point of the leg, derived from the origin date time
/// and the seconds elapsed since the origin.
#[derive(Debug, Clone)]
pub struct TimeInfo {
    origin: Option<Zoned>,
    timezone_index: u32,
    local_time: Option<i64>,
    second_of_week: u32,
    seconds_from_origin: f64,
}

impl TimeInfo {
    /// Time info of a request without a date time.
    pub fn invalid() -> Self {
        TimeInfo {
            origin: None,
            timezone_index: 0,
            local_time: None,
            second_of_week: DEFAULT_SECOND_OF_WEEK,
            seconds_from_origin: 0.0,
        }
    }

    /// Parses a local `YYYY-MM-DDTHH:MM` date time in the origin timezone.
    pub fn make(date_time: Option<&str>, timezone_index: u32, tz_db: &TimezoneDb) -> Self {
        let Some(date_time) = date_time else {
            return TimeInfo::invalid();
        };
        let Some(time_zone) = tz_db.time_zone(timezone_index) else {
            warn!(date_time, timezone_index, "No timezone for origin, ignoring date time");
            return TimeInfo::invalid();
        };

        let origin = date_time
            .parse::<civil::DateTime>()
            .and_then(|dt| dt.to_zoned(time_zone));
        match origin {
            Ok(origin) => TimeInfo::at(&origin, origin.clone(), timezone_index, 0.0),
            Err(error) => {
                warn!(date_time, %error, "Invalid origin date time, ignoring it");
                TimeInfo::invalid()
            }
        }
    }

    fn at(origin: &Zoned, zoned: Zoned, timezone_index: u32, seconds_from_origin: f64) -> Self {
        let second_of_day =
            zoned.hour() as u32 * 3600 + zoned.minute() as u32 * 60 + zoned.second() as u32;
        let second_of_week =
            zoned.weekday().to_sunday_zero_offset() as u32 * SECONDS_PER_DAY + second_of_day;

        TimeInfo {
            local_time: Some(zoned.timestamp().as_second()),
            origin: Some(origin.clone()),
            timezone_index,
            second_of_week,
            seconds_from_origin,
        }
    }

    /// Time info `seconds` after the origin, observed in the timezone at
    /// `timezone_index`. Falls back to the origin timezone when the index is
    /// unknown.
    pub fn forward(&self, seconds: f64, timezone_index: u32, tz_db: &TimezoneDb) -> TimeInfo {
        let Some(origin) = self.origin.as_ref() else {
            return TimeInfo {
                second_of_week: (DEFAULT_SECOND_OF_WEEK + seconds.max(0.0).round() as u32)
                    % SECONDS_PER_WEEK,
                seconds_from_origin: seconds,
                ..TimeInfo::invalid()
            };
        };

        let (time_zone, timezone_index) = match tz_db.time_zone(timezone_index) {
            Some(tz) => (tz, timezone_index),
            None => (origin.time_zone().clone(), self.timezone_index),
        };

        match Timestamp::from_second(origin.timestamp().as_second() + seconds.round() as i64) {
            Ok(timestamp) => TimeInfo::at(
                origin,
                timestamp.to_zoned(time_zone),
                timezone_index,
                seconds,
            ),
            Err(_) => TimeInfo::invalid(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.local_time.is_some()
    }

    /// Seconds since the epoch at this point, when the request has a date time.
    pub fn local_time(&self) -> Option<i64> {
        self.local_time
    }

    pub fn timezone_index(&self) -> u32 {
        self.timezone_index
    }

    /// Seconds since Sunday midnight.
    pub fn second_of_week(&self) -> u32 {
        self.second_of_week
    }

    pub fn seconds_from_origin(&self) -> f64 {
        self.seconds_from_origin
    }

    /// Wall clock `seconds` after the origin in `time_zone`, formatted as
    /// `YYYY-MM-DDTHH:MM±hh:mm ABBR`.
    pub fn format_after_origin(&self, seconds: i64, time_zone: &TimeZone) -> Option<String> {
        let origin = self.origin.as_ref()?;
        let timestamp = Timestamp::from_second(origin.timestamp().as_second() + seconds).ok()?;
        Some(
            timestamp
                .to_zoned(time_zone.clone())
                .strftime("%Y-%m-%dT%H:%M%:z %Z")
                .to_string(),
        )
    }

    /// Date at the origin, in the origin timezone.
    pub fn origin_date(&self) -> Option<civil::Date> {
        self.origin.as_ref().map(Zoned::date)
    }
}
