//! Shared utility functions for GTD dashboard crates.

/// Date utility functions
pub mod dates {
    use crate::error::DateError;
    use chrono::NaiveDate;

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s, "%Y-%m-%d")?)
    }

    /// Format a date the way hover labels show it, e.g. "05 March 2014".
    pub fn format_long_date(date: &NaiveDate) -> String {
        date.format("%d %B %Y").to_string()
    }

    /// Build a calendar date from the separate year/month/day fields of an
    /// incident row.
    ///
    /// The source dataset encodes an unknown month or day as `0`; those
    /// combinations, and any that do not exist on the calendar, are errors.
    pub fn compose_date(year: i32, month: u32, day: u32) -> Result<NaiveDate, DateError> {
        if month == 0 || day == 0 {
            return Err(DateError(format!(
                "unknown month or day in {}-{:02}-{:02}",
                year, month, day
            )));
        }
        NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            DateError(format!("{}-{:02}-{:02} is not a calendar date", year, month, day))
        })
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::NaiveDate;

        #[test]
        fn test_compose_date() {
            let date = compose_date(2014, 6, 10).unwrap();
            assert_eq!(date, NaiveDate::from_ymd_opt(2014, 6, 10).unwrap());
        }

        #[test]
        fn test_compose_date_rejects_zero_fields() {
            assert!(compose_date(1970, 0, 1).is_err());
            assert!(compose_date(1970, 1, 0).is_err());
        }

        #[test]
        fn test_compose_date_rejects_impossible_dates() {
            assert!(compose_date(2015, 2, 31).is_err());
            assert!(compose_date(2015, 13, 1).is_err());
            // 2016 is a leap year
            assert!(compose_date(2016, 2, 29).is_ok());
        }

        #[test]
        fn test_format_long_date() {
            let date = NaiveDate::from_ymd_opt(2014, 3, 5).unwrap();
            assert_eq!(format_long_date(&date), "05 March 2014");
        }

        #[test]
        fn test_format_and_parse() {
            let date = NaiveDate::from_ymd_opt(2017, 12, 31).unwrap();
            let formatted = format_date(&date);
            assert_eq!(formatted, "2017-12-31");
            let parsed = parse_date(&formatted).unwrap();
            assert_eq!(parsed, date);
        }
    }
}

/// Text helpers for chart hover labels
pub mod text {
    /// Greedy word wrap to at most `width` characters per line.
    ///
    /// Words longer than `width` are split across lines. Runs of whitespace
    /// collapse to a single space, and empty input yields no lines.
    pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
        let width = width.max(1);
        let mut lines = Vec::new();
        let mut current = String::new();
        let mut current_len = 0usize;

        for word in text.split_whitespace() {
            let mut chars: Vec<char> = word.chars().collect();

            // Break words that cannot fit on any line
            while chars.len() > width {
                if current_len > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                let rest = chars.split_off(width);
                lines.push(chars.into_iter().collect());
                chars = rest;
            }
            if chars.is_empty() {
                continue;
            }

            let needed = if current_len == 0 {
                chars.len()
            } else {
                current_len + 1 + chars.len()
            };
            if needed > width {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current_len += chars.len();
            current.extend(chars);
        }

        if current_len > 0 {
            lines.push(current);
        }
        lines
    }

    /// Wrap free text at `width` columns and join the lines with `<br>`
    /// for a chart hover label.
    pub fn wrap_for_hover(text: &str, width: usize) -> String {
        wrap_words(text, width).join("<br>")
    }

}

/// Range slider mark labels
pub mod marks {
    /// Marks for a year slider: one entry every `step` years from `min`
    /// through `max`.
    ///
    /// With `short` set, labels use the two-digit form (`'14`), otherwise the
    /// full year.
    pub fn year_marks(min: i32, max: i32, step: usize, short: bool) -> Vec<(i32, String)> {
        (min..=max)
            .step_by(step.max(1))
            .map(|year| {
                let label = if short {
                    format!("'{:02}", year.rem_euclid(100))
                } else {
                    year.to_string()
                };
                (year, label)
            })
            .collect()
    }

}

/// Error types
pub mod error {
    use std::fmt;

    #[derive(Debug)]
    pub struct DateError(pub String);

    impl fmt::Display for DateError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "Date error: {}", self.0)
        }
    }

    impl std::error::Error for DateError {}
}
