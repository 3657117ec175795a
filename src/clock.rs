//! All things time-related.

use chrono::{DateTime, Local, Utc};

/// Format used to render creation dates in tool output.
///
/// Note that the "UTC" suffix is a literal: dates are rendered in the
/// _local_ time zone of the server process, but always labeled "UTC".
/// Agents consuming the output have come to expect this exact format, so
/// it is kept as is until someone decides otherwise.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Marks a thing that knows when it was created.
pub trait HasTimestamp {
    /// The Unix timestamp, in seconds, at which the item was created.
    fn created_ut(&self) -> i64;

    /// The creation date formatted for display.
    fn formatted_date(&self) -> String {
        format_date(self.created_ut())
    }
}

/// Formats a Unix timestamp as a local date labeled with [`DATE_FORMAT`].
pub fn format_date(timestamp: i64) -> String {
    from_timestamp(timestamp)
        .with_timezone(&Local)
        .format(DATE_FORMAT)
        .to_string()
}

// Out-of-range timestamps collapse to the epoch rather than failing.
fn from_timestamp(timestamp: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(timestamp, 0).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[derive(Debug)]
    struct ThingWithTimestamp {
        created_ut: i64,
    }

    impl HasTimestamp for ThingWithTimestamp {
        fn created_ut(&self) -> i64 {
            self.created_ut
        }
    }

    #[test]
    fn it_formats_dates_with_a_literal_utc_suffix() {
        let date = format_date(1700000000);
        let re = Regex::new(r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2} UTC$").unwrap();
        assert!(re.is_match(&date), "{date} does not match {re}");
    }

    #[test]
    fn it_formats_dates_in_local_time() {
        let expected = DateTime::from_timestamp(1700000000, 0)
            .unwrap()
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();
        assert_eq!(format_date(1700000000), format!("{expected} UTC"));
    }

    #[test]
    fn it_formats_its_own_creation_date() {
        let thing = ThingWithTimestamp { created_ut: 0 };
        assert_eq!(thing.formatted_date(), format_date(0));
    }

    #[test]
    fn it_falls_back_to_the_epoch_for_out_of_range_timestamps() {
        assert_eq!(format_date(i64::MAX), format_date(0));
    }
}
