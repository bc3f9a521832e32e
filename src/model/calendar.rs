use chrono::{
    DateTime, Datelike, Duration, Local, LocalResult, NaiveDate, NaiveDateTime, TimeZone, Timelike,
    Utc,
};
use std::fmt::Display;

const HOUR_MILLIS: i64 = 1000 * 60 * 60;

/// Calendar bucket sizes, finest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Granularity {
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl Granularity {
    /// Approximate bucket length, used only when a calendar step cannot be
    /// resolved (out-of-range instants).
    fn nominal_millis(self) -> i64 {
        match self {
            Granularity::Hour => HOUR_MILLIS,
            Granularity::Day => 24 * HOUR_MILLIS,
            Granularity::Week => 7 * 24 * HOUR_MILLIS,
            Granularity::Month => 30 * 24 * HOUR_MILLIS,
            Granularity::Year => 365 * 24 * HOUR_MILLIS,
        }
    }
}

/// The calendar used to interpret canonical time (milliseconds since the Unix
/// epoch) for header labels and day snapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Calendar {
    #[default]
    Local,
    Utc,
}

impl Calendar {
    /// Start of the bucket containing `millis`.
    pub fn truncate(self, millis: i64, granularity: Granularity) -> i64 {
        match self {
            Calendar::Local => truncate_in(&Local, millis, granularity),
            Calendar::Utc => truncate_in(&Utc, millis, granularity),
        }
    }

    /// Start of the bucket after the one beginning at `millis`. Always
    /// returns a value greater than `millis`.
    pub fn advance(self, millis: i64, granularity: Granularity) -> i64 {
        let next = match self {
            Calendar::Local => advance_in(&Local, millis, granularity),
            Calendar::Utc => advance_in(&Utc, millis, granularity),
        };
        match next {
            Some(next) if next > millis => next,
            _ => millis.saturating_add(granularity.nominal_millis()),
        }
    }

    /// Smallest bucket boundary that is not before `millis`.
    pub fn ceil(self, millis: i64, granularity: Granularity) -> i64 {
        let floor = self.truncate(millis, granularity);
        if floor == millis {
            floor
        } else {
            self.advance(floor, granularity)
        }
    }

    /// Format `millis` with a chrono `strftime` pattern.
    pub fn format(self, millis: i64, pattern: &str) -> String {
        match self {
            Calendar::Local => format_in(&Local, millis, pattern),
            Calendar::Utc => format_in(&Utc, millis, pattern),
        }
    }
}

fn to_datetime<Tz: TimeZone>(tz: &Tz, millis: i64) -> Option<DateTime<Tz>> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .map(|utc| utc.with_timezone(tz))
}

fn from_naive<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> Option<i64> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt.timestamp_millis()),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.timestamp_millis()),
        // Local midnight can fall in a DST gap; the bucket then starts one
        // wall-clock hour later.
        LocalResult::None => tz
            .from_local_datetime(&(naive + Duration::hours(1)))
            .earliest()
            .map(|dt| dt.timestamp_millis()),
    }
}

fn bucket_start(naive: NaiveDateTime, granularity: Granularity) -> Option<NaiveDateTime> {
    let date = naive.date();
    match granularity {
        Granularity::Hour => date.and_hms_opt(naive.hour(), 0, 0),
        Granularity::Day => date.and_hms_opt(0, 0, 0),
        Granularity::Week => {
            let monday =
                date - Duration::days(i64::from(date.weekday().num_days_from_monday()));
            monday.and_hms_opt(0, 0, 0)
        }
        Granularity::Month => {
            NaiveDate::from_ymd_opt(date.year(), date.month(), 1)?.and_hms_opt(0, 0, 0)
        }
        Granularity::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1)?.and_hms_opt(0, 0, 0),
    }
}

fn next_bucket(start: NaiveDateTime, granularity: Granularity) -> Option<NaiveDateTime> {
    let date = start.date();
    match granularity {
        Granularity::Hour => Some(start + Duration::hours(1)),
        Granularity::Day => (date + Duration::days(1)).and_hms_opt(0, 0, 0),
        Granularity::Week => (date + Duration::days(7)).and_hms_opt(0, 0, 0),
        Granularity::Month => {
            let (y, m) = if date.month() == 12 {
                (date.year() + 1, 1)
            } else {
                (date.year(), date.month() + 1)
            };
            NaiveDate::from_ymd_opt(y, m, 1)?.and_hms_opt(0, 0, 0)
        }
        Granularity::Year => NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)?.and_hms_opt(0, 0, 0),
    }
}

fn truncate_in<Tz: TimeZone>(tz: &Tz, millis: i64, granularity: Granularity) -> i64 {
    to_datetime(tz, millis)
        .and_then(|dt| bucket_start(dt.naive_local(), granularity))
        .and_then(|naive| from_naive(tz, naive))
        .unwrap_or(millis)
}

fn advance_in<Tz: TimeZone>(tz: &Tz, millis: i64, granularity: Granularity) -> Option<i64> {
    if granularity == Granularity::Hour {
        // Hours are absolute; stepping local wall time would repeat or skip
        // an hour across DST transitions.
        let start = truncate_in(tz, millis, Granularity::Hour);
        return start.checked_add(HOUR_MILLIS);
    }
    let dt = to_datetime(tz, millis)?;
    let start = bucket_start(dt.naive_local(), granularity)?;
    from_naive(tz, next_bucket(start, granularity)?)
}

fn format_in<Tz>(tz: &Tz, millis: i64, pattern: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    to_datetime(tz, millis)
        .map(|dt| dt.format(pattern).to_string())
        .unwrap_or_default()
}
