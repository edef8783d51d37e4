use chrono::{DateTime, Local, TimeZone};

/// Current local time as `HH:MM` (24-hour), used for message timestamps.
pub fn current_time() -> String {
    format_clock(&Local::now())
}

pub fn format_clock<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn test_format_clock_zero_pads() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 59).unwrap();
        assert_eq!(format_clock(&at), "07:05");
    }

    #[test]
    fn test_format_clock_is_24_hour() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let at = offset.with_ymd_and_hms(2024, 3, 9, 23, 41, 0).unwrap();
        assert_eq!(format_clock(&at), "23:41");
    }

    #[test]
    fn test_current_time_shape() {
        let now = current_time();
        assert_eq!(now.len(), 5);
        assert_eq!(now.as_bytes()[2], b':');
    }
}
