use crate::shared::error::AlarmError;
use chrono::{DateTime, Days, LocalResult, NaiveDateTime, NaiveTime, TimeZone, Timelike};
use std::fmt;
use std::time::Duration;

// Accepted clock-time layouts, tried in order. Meridiem parsing is case-insensitive.
const CLOCK_FORMATS: [&str; 3] = ["%I:%M%p", "%I:%M %p", "%H:%M"];

// Resolved alarm: when it rings and how long until then.
#[derive(Debug, Clone)]
pub struct AlarmSchedule<Tz: TimeZone> {
    pub at: DateTime<Tz>,
    pub wait: Duration,
}

pub fn parse_clock_time(input: &str) -> Result<NaiveTime, AlarmError> {
    let trimmed = input.trim();
    CLOCK_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| AlarmError::TimeParse(input.to_owned()))
}

// Today at `at`, or tomorrow when that moment is at or before `now` (compared to the second).
pub fn next_occurrence(now: NaiveDateTime, at: NaiveTime) -> NaiveDateTime {
    let now = now.with_nanosecond(0).unwrap_or(now);
    let today = now.date().and_time(at);
    if today > now {
        return today;
    }
    now.date()
        .checked_add_days(Days::new(1))
        .map(|tomorrow| tomorrow.and_time(at))
        .unwrap_or(today)
}

pub fn schedule_alarm<Tz: TimeZone>(
    input: &str,
    now: DateTime<Tz>,
) -> Result<AlarmSchedule<Tz>, AlarmError> {
    let at = parse_clock_time(input)?;
    let target = next_occurrence(now.naive_local(), at);
    let at = resolve_local(now.timezone().from_local_datetime(&target), &now)
        .ok_or_else(|| AlarmError::NonexistentLocalTime(target.to_string()))?;
    // A zero wait is rejected when the countdown is built.
    let wait = (at.clone() - now).to_std().unwrap_or(Duration::ZERO);
    Ok(AlarmSchedule { at, wait })
}

// A repeated local time (clocks going back) maps to two instants; take the first one
// still ahead of `now`.
fn resolve_local<Tz: TimeZone>(
    mapped: LocalResult<DateTime<Tz>>,
    now: &DateTime<Tz>,
) -> Option<DateTime<Tz>> {
    match mapped {
        LocalResult::Single(at) => Some(at),
        LocalResult::Ambiguous(earliest, latest) => {
            Some(if earliest > *now { earliest } else { latest })
        }
        LocalResult::None => None,
    }
}

// Human readable wait, e.g. `7h 05m 12s`.
pub struct WaitDisplay(pub Duration);

impl fmt::Display for WaitDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let secs = self.0.as_secs();
        write!(
            f,
            "{}h {:02}m {:02}s",
            secs / 3600,
            (secs % 3600) / 60,
            secs % 60
        )
    }
}
