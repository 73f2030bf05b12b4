use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc, Weekday};
use chrono_tz::Tz;
use regex::{Regex, RegexBuilder};

use crate::types::TimeReading;

const OPENING_HOUR: u32 = 9;
const CLOSING_HOUR: u32 = 18;

/// Finds every known zone whose name matches `query`.
///
/// The query is trimmed, inner whitespace becomes `_`, and the result is used
/// as a case-insensitive unanchored regex, so "seoul" finds `Asia/Seoul` and
/// "new york" finds `America/New_York`. Matches keep the order of `known`.
///
/// An empty query or one that is not a valid regex yields no matches; the
/// caller cannot tell that apart from a query that simply matched nothing.
/// Names in `known` that are not in the time-zone database are skipped.
pub fn resolve(query: &str, known: &[&str]) -> Vec<Tz> {
    let Some(pattern) = compile_query(query) else {
        return Vec::new();
    };

    known
        .iter()
        .filter(|name| pattern.is_match(name))
        .filter_map(|name| match name.parse::<Tz>() {
            Ok(tz) => Some(tz),
            Err(_) => {
                tracing::warn!(zone = %name, "skipping unknown time zone");
                None
            }
        })
        .collect()
}

fn compile_query(query: &str) -> Option<Regex> {
    let canonical = query.split_whitespace().collect::<Vec<_>>().join("_");
    if canonical.is_empty() {
        return None;
    }

    match RegexBuilder::new(&canonical).case_insensitive(true).build() {
        Ok(pattern) => Some(pattern),
        Err(e) => {
            tracing::warn!(query = %canonical, error = %e, "time zone query is not a valid pattern");
            None
        }
    }
}

/// Monday to Friday, 09:00 up to but not including 18:00, on the local clock.
pub fn is_business_hour<T: TimeZone>(local: &DateTime<T>) -> bool {
    let weekday = !matches!(local.weekday(), Weekday::Sat | Weekday::Sun);
    weekday && (OPENING_HOUR..CLOSING_HOUR).contains(&local.hour())
}

pub fn read_time(zone: Tz, now: DateTime<Utc>) -> TimeReading {
    let local = now.with_timezone(&zone);
    TimeReading {
        zone,
        is_business_hour: is_business_hour(&local),
        local,
    }
}
