//! Shared helpers: HTTP dates and object key escaping.

use chrono::{DateTime, NaiveDateTime, Utc};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters left unescaped in an object key path.
///
/// Unreserved characters (`A-Z a-z 0-9 - _ . ~`) and the `/` separator stay
/// as they are; everything else is percent-encoded.
const KEY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

/// HTTP date format (RFC 7231 IMF-fixdate).
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Percent-escape an object key for use as a URL path.
///
/// # Examples
///
/// ```
/// use bucketput_core::utils::escape_object_key;
///
/// assert_eq!(escape_object_key("photos/2024/cat.jpg"), "photos/2024/cat.jpg");
/// assert_eq!(escape_object_key("a b+c"), "a%20b%2Bc");
/// ```
#[must_use]
pub fn escape_object_key(key: &str) -> String {
    utf8_percent_encode(key, KEY_ENCODE_SET).to_string()
}

/// Format a timestamp as an HTTP date.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use bucketput_core::utils::format_http_date;
///
/// let ts = Utc.with_ymd_and_hms(2015, 10, 21, 7, 28, 0).unwrap();
/// assert_eq!(format_http_date(&ts), "Wed, 21 Oct 2015 07:28:00 GMT");
/// ```
#[must_use]
pub fn format_http_date(ts: &DateTime<Utc>) -> String {
    ts.format(HTTP_DATE_FORMAT).to_string()
}

/// Parse an HTTP date, accepting the RFC 7231 form and RFC 2822 variants.
#[must_use]
pub fn parse_http_date(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, HTTP_DATE_FORMAT) {
        return Some(dt.and_utc());
    }
    DateTime::parse_from_rfc2822(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Timelike};

    use super::*;

    #[test]
    fn test_should_keep_unreserved_characters_and_slashes() {
        let key = "AZaz09-_.~/nested/key";
        assert_eq!(escape_object_key(key), key);
    }

    #[test]
    fn test_should_escape_reserved_and_non_ascii() {
        assert_eq!(escape_object_key("a&b=c?d#e"), "a%26b%3Dc%3Fd%23e");
        assert_eq!(escape_object_key("caf\u{e9}.txt"), "caf%C3%A9.txt");
        assert_eq!(escape_object_key("100%"), "100%25");
    }

    #[test]
    fn test_should_roundtrip_http_date() {
        let ts = Utc.with_ymd_and_hms(2024, 2, 29, 23, 59, 1).unwrap();
        let formatted = format_http_date(&ts);
        assert_eq!(formatted, "Thu, 29 Feb 2024 23:59:01 GMT");
        assert_eq!(parse_http_date(&formatted), Some(ts));
    }

    #[test]
    fn test_should_parse_rfc2822_offset_date() {
        let parsed = parse_http_date("Wed, 21 Oct 2015 09:28:00 +0200").expect("rfc2822");
        assert_eq!(parsed.hour(), 7);
    }

    #[test]
    fn test_should_reject_garbage_date() {
        assert!(parse_http_date("yesterday").is_none());
    }
}
