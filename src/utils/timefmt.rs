use chrono::NaiveTime;

/// Zero-padded time-of-day, the format used for `checkInTime`/`checkOutTime`
/// and the submission record's `time` field.
pub const TIME_OF_DAY: &str = "%H:%M:%S";

pub fn format_time_of_day(time: NaiveTime) -> String {
    time.format(TIME_OF_DAY).to_string()
}

pub fn parse_time_of_day(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, TIME_OF_DAY).ok()
}
