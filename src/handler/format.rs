use crate::types::TimeReading;

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S %A %Z";

pub fn format_reading(reading: &TimeReading) -> String {
    let status = if reading.is_business_hour {
        format!("*:tada: {} is in business hours*", reading.zone.name())
    } else {
        format!("*:warning: {} is outside business hours*", reading.zone.name())
    };

    format!("{}\n{}", status, reading.local.format(DATETIME_FORMAT))
}

/// Text for the whole reply. Several readings are quoted block by block so
/// they stay apart in the channel.
pub fn render(query: &str, readings: &[TimeReading]) -> String {
    match readings {
        [] => format!("No match for {}", query),
        [reading] => format_reading(reading),
        _ => readings
            .iter()
            .map(|reading| quote(&format_reading(reading)))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn quote(block: &str) -> String {
    block
        .lines()
        .map(|line| format!("> {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timezone::read_time;
    use chrono::{TimeZone, Utc};
    use chrono_tz::{America, Asia};

    #[test]
    fn new_york_in_winter() {
        // Wednesday 10:00 EST
        let now = Utc.with_ymd_and_hms(2024, 1, 3, 15, 0, 0).unwrap();
        let text = format_reading(&read_time(America::New_York, now));
        assert_eq!(
            text,
            "*:tada: America/New_York is in business hours*\n2024-01-03 10:00:00 Wednesday EST"
        );
    }

    #[test]
    fn new_york_in_summer_uses_daylight_abbreviation() {
        let now = Utc.with_ymd_and_hms(2024, 7, 1, 16, 30, 5).unwrap();
        let text = format_reading(&read_time(America::New_York, now));
        let datetime_line = text.lines().nth(1).unwrap();
        assert_eq!(datetime_line, "2024-07-01 12:30:05 Monday EDT");
    }

    #[test]
    fn outside_business_hours_is_flagged() {
        // Saturday 10:00 KST
        let now = Utc.with_ymd_and_hms(2024, 1, 6, 1, 0, 0).unwrap();
        let text = format_reading(&read_time(Asia::Seoul, now));
        assert_eq!(
            text,
            "*:warning: Asia/Seoul is outside business hours*\n2024-01-06 10:00:00 Saturday KST"
        );
    }

    #[test]
    fn no_readings_reports_the_query() {
        assert_eq!(render("zzz_no_such_zone", &[]), "No match for zzz_no_such_zone");
    }

    #[test]
    fn single_reading_is_not_quoted() {
        let now = Utc.with_ymd_and_hms(2024, 1, 3, 15, 0, 0).unwrap();
        let reading = read_time(Asia::Seoul, now);
        assert_eq!(render("seoul", &[reading.clone()]), format_reading(&reading));
    }

    #[test]
    fn several_readings_are_quoted_in_order() {
        let now = Utc.with_ymd_and_hms(2024, 1, 3, 15, 0, 0).unwrap();
        let readings = [read_time(America::New_York, now), read_time(Asia::Seoul, now)];
        let text = render("new_york|seoul", &readings);

        assert_eq!(
            text,
            "> *:tada: America/New_York is in business hours*\n\
             > 2024-01-03 10:00:00 Wednesday EST\n\
             > *:warning: Asia/Seoul is outside business hours*\n\
             > 2024-01-04 00:00:00 Thursday KST"
        );
    }
}
