use time::{Month, Weekday};

use crate::entities::Timestamp;

/// Format a date like `Dienstag, 20. Oktober 2026 um 19:30`.
///
/// The time is shown in the offset the timestamp was created with.
pub fn format_date_de(ts: Timestamp) -> String {
    let dt = ts.to_offset_date_time();
    format!(
        "{}, {}. {} {} um {:02}:{:02}",
        weekday_de(dt.weekday()),
        dt.day(),
        month_de(dt.month()),
        dt.year(),
        dt.hour(),
        dt.minute()
    )
}

const fn weekday_de(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Monday => "Montag",
        Weekday::Tuesday => "Dienstag",
        Weekday::Wednesday => "Mittwoch",
        Weekday::Thursday => "Donnerstag",
        Weekday::Friday => "Freitag",
        Weekday::Saturday => "Samstag",
        Weekday::Sunday => "Sonntag",
    }
}

const fn month_de(month: Month) -> &'static str {
    match month {
        Month::January => "Januar",
        Month::February => "Februar",
        Month::March => "März",
        Month::April => "April",
        Month::May => "Mai",
        Month::June => "Juni",
        Month::July => "Juli",
        Month::August => "August",
        Month::September => "September",
        Month::October => "Oktober",
        Month::November => "November",
        Month::December => "Dezember",
    }
}

pub fn event_count_label(count: usize) -> String {
    format!("{count} events")
}
