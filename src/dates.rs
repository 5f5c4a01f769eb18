use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::debug;

use crate::matcher::value_after_colon;
use crate::normalize::NormalizedText;

/// Date formats commonly found in whois data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateLayout {
    /// 2020-01-02T03:04:05.6+02:00
    Rfc3339,
    /// 2020-01-02T03:04:05Z
    UtcDateTime,
    /// 2020-01-02
    IsoDate,
    /// January 2, 2020
    LongMonthDate,
    /// 02-Jan-2020
    DayMonthYear,
}

/// Layouts tried by the timestamp extractors, in order.
pub const DEFAULT_LAYOUTS: &[DateLayout] = &[
    DateLayout::Rfc3339,
    DateLayout::UtcDateTime,
    DateLayout::IsoDate,
    DateLayout::LongMonthDate,
    DateLayout::DayMonthYear,
];

impl DateLayout {
    pub fn parse(self, value: &str) -> Option<DateTime<Utc>> {
        match self {
            DateLayout::Rfc3339 => DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
            DateLayout::UtcDateTime => NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%SZ")
                .ok()
                .map(|dt| dt.and_utc()),
            DateLayout::IsoDate => midnight_utc(value, "%Y-%m-%d"),
            DateLayout::LongMonthDate => midnight_utc(value, "%B %d, %Y"),
            DateLayout::DayMonthYear => midnight_utc(value, "%d-%b-%Y"),
        }
    }
}

fn midnight_utc(value: &str, format: &str) -> Option<DateTime<Utc>> {
    NaiveDate::parse_from_str(value, format)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Try each layout in turn, returning the first successful parse.
pub fn parse_date(value: &str, layouts: &[DateLayout]) -> Option<DateTime<Utc>> {
    let value = value.trim();
    layouts.iter().find_map(|layout| layout.parse(value))
}

/// Unix timestamp of the first line containing one of `keywords`.
///
/// Keywords match anywhere in the line, case-insensitively. Only the first
/// matching line is considered: if it has no colon or its value fits none of
/// the `layouts`, the result is `None` and later lines are not tried.
pub fn find_date(text: &NormalizedText, keywords: &[&str], layouts: &[DateLayout]) -> Option<i64> {
    let folded_keywords: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();

    let line = text
        .lines()
        .iter()
        .zip(text.folded_lines())
        .find(|(_, folded)| folded_keywords.iter().any(|k| folded.contains(k.as_str())))
        .map(|(line, _)| line)?;

    let value = value_after_colon(line)?;
    match parse_date(&value, layouts) {
        Some(dt) => Some(dt.timestamp()),
        None => {
            debug!("Failed to parse date: {}", value);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(lines: &[&str]) -> NormalizedText {
        NormalizedText::new(&lines.join("\n"))
    }

    #[test]
    fn test_each_layout() {
        let cases = [
            ("2020-01-02T03:04:05Z", 1577934245),
            ("2020-01-02T05:04:05+02:00", 1577934245),
            ("2020-01-02T03:04:05.123Z", 1577934245),
            ("2020-01-02", 1577923200),
            ("January 2, 2020", 1577923200),
            ("02-Jan-2020", 1577923200),
        ];
        for (value, expected) in cases {
            let parsed = parse_date(value, DEFAULT_LAYOUTS).map(|dt| dt.timestamp());
            assert_eq!(parsed, Some(expected), "layout for {value}");
        }
    }

    #[test]
    fn test_unknown_layouts_are_rejected() {
        for value in ["not-a-date", "2020/01/02", "02.01.2020", ""] {
            assert_eq!(parse_date(value, DEFAULT_LAYOUTS), None, "{value}");
        }
    }

    #[test]
    fn test_layout_order_is_respected() {
        assert_eq!(parse_date("2020-01-02", &[DateLayout::Rfc3339]), None);
        assert!(parse_date("2020-01-02", &[DateLayout::Rfc3339, DateLayout::IsoDate]).is_some());
    }

    #[test]
    fn test_find_date_round_trip() {
        let text = text(&["Domain Name: example.com", "Creation Date: 2020-01-02T03:04:05Z"]);
        assert_eq!(
            find_date(&text, &["Creation Date"], DEFAULT_LAYOUTS),
            Some(1577934245)
        );
    }

    #[test]
    fn test_find_date_matches_substring() {
        let text = text(&["Registry Expiry Date: 2030-06-01"]);
        assert_eq!(find_date(&text, &["expiry date"], DEFAULT_LAYOUTS), Some(1906502400));
    }

    #[test]
    fn test_unparsable_first_match_stops_search() {
        let text = text(&[
            "Creation Date: not-a-date",
            "Created On: 2020-01-02T03:04:05Z",
        ]);
        assert_eq!(
            find_date(&text, &["Creation Date", "Created On"], DEFAULT_LAYOUTS),
            None
        );
    }

    #[test]
    fn test_first_match_without_colon_stops_search() {
        let text = text(&["created by the registry", "Created On: 2020-01-02"]);
        assert_eq!(find_date(&text, &["created"], DEFAULT_LAYOUTS), None);
    }

    #[test]
    fn test_no_keyword_match() {
        let text = text(&["Domain Name: example.com"]);
        assert_eq!(find_date(&text, &["Creation Date"], DEFAULT_LAYOUTS), None);
    }
}
