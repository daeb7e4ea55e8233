//! Free-text and date transforms applied when mapping a local article to
//! its registry representation

use chrono::{DateTime, Datelike, Utc};
use regex::Regex;
use std::sync::OnceLock;

fn tag_pattern() -> &'static Regex {
    static TAG_RE: OnceLock<Regex> = OnceLock::new();
    TAG_RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"))
}

/// Removes markup tags from a free-text field
///
/// DOAJ expects plain text for titles and abstracts; locally stored values
/// may carry HTML from the editor.
pub fn strip_tags(text: &str) -> String {
    tag_pattern().replace_all(text, "").trim().to_string()
}

/// Publication year as the string the DOAJ schema expects
pub fn year_string(date: &DateTime<Utc>) -> String {
    date.year().to_string()
}

/// Publication month, string-encoded without zero padding ("7", "12")
pub fn month_string(date: &DateTime<Utc>) -> String {
    date.month().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_strip_tags() {
        assert_eq!(strip_tags("<p>The <em>test</em> abstract</p>"), "The test abstract");
        assert_eq!(strip_tags("No markup here"), "No markup here");
        assert_eq!(strip_tags("<br/>"), "");
    }

    #[test]
    fn test_strip_tags_trims_whitespace() {
        assert_eq!(strip_tags("  <p>Title</p>  "), "Title");
    }

    #[test]
    fn test_date_parts() {
        let date = Utc.with_ymd_and_hms(2019, 7, 1, 0, 0, 0).unwrap();
        assert_eq!(year_string(&date), "2019");
        assert_eq!(month_string(&date), "7");

        let december = Utc.with_ymd_and_hms(2020, 12, 31, 0, 0, 0).unwrap();
        assert_eq!(month_string(&december), "12");
    }
}
