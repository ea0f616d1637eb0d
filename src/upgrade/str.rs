use chrono::{FixedOffset, NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use url::Url;

use crate::schema::DateFormat;

// ------- Recognized date formats -------

/// A fixed date format: a strict textual shape plus a calendar check on the
/// captured fields.
pub struct DatePattern {
    pub format: DateFormat,
    shape: Regex,
    valid: fn(&Captures) -> bool,
}

impl DatePattern {
    pub fn matches(&self, s: &str) -> bool {
        self.shape.captures(s).is_some_and(|caps| (self.valid)(&caps))
    }
}

/// `yyyy-MM-dd'T'HH:mm:ss.SSSSSSZ`, zone as `Z`, `+hhmm` or `+hh:mm`.
pub static TIMESTAMP: Lazy<DatePattern> = Lazy::new(|| DatePattern {
    format: DateFormat::Timestamp,
    shape: Regex::new(
        r"^(?<y>[0-9]{4})-(?<m>[0-9]{2})-(?<d>[0-9]{2})T(?<hh>[0-9]{2}):(?<mm>[0-9]{2}):(?<ss>[0-9]{2})\.(?<us>[0-9]{6})(?<tz>Z|[+-][0-9]{2}:?[0-9]{2})$",
    )
    .unwrap(),
    valid: |caps| valid_date(caps) && valid_time(caps) && valid_zone(&caps["tz"]),
});

/// `yyyy-MM-dd`
pub static DATE_ONLY: Lazy<DatePattern> = Lazy::new(|| DatePattern {
    format: DateFormat::DateOnly,
    shape: Regex::new(r"^(?<y>[0-9]{4})-(?<m>[0-9]{2})-(?<d>[0-9]{2})$").unwrap(),
    valid: valid_date,
});

fn field<T: std::str::FromStr>(caps: &Captures, name: &str) -> Option<T> {
    caps.name(name)?.as_str().parse().ok()
}

fn valid_date(caps: &Captures) -> bool {
    let ymd = (field::<i32>(caps, "y"), field::<u32>(caps, "m"), field::<u32>(caps, "d"));
    match ymd {
        (Some(y), Some(m), Some(d)) => NaiveDate::from_ymd_opt(y, m, d).is_some(),
        _ => false,
    }
}

fn valid_time(caps: &Captures) -> bool {
    let hms = (
        field::<u32>(caps, "hh"),
        field::<u32>(caps, "mm"),
        field::<u32>(caps, "ss"),
        field::<u32>(caps, "us"),
    );
    match hms {
        (Some(h), Some(m), Some(s), Some(us)) => NaiveTime::from_hms_micro_opt(h, m, s, us).is_some(),
        _ => false,
    }
}

fn valid_zone(tz: &str) -> bool {
    if tz == "Z" {
        return true;
    }
    let sign = if tz.starts_with('-') { -1 } else { 1 };
    let digits: String = tz[1..].chars().filter(char::is_ascii_digit).collect();
    let (Ok(hours), Ok(minutes)) = (digits[..2].parse::<i32>(), digits[2..].parse::<i32>()) else {
        return false;
    };
    hours <= 23 && minutes <= 59 && FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).is_some()
}

// ------- Detection -------

/// Absolute URL with a non-empty host. `mailto:` and friends stay strings,
/// as does anything with whitespace, which the parser would otherwise trim
/// or percent-encode. The literal itself is returned untouched.
pub fn as_url(s: &str) -> Option<String> {
    if s.chars().any(char::is_whitespace) {
        return None;
    }
    let url = Url::parse(s).ok()?;
    match url.host_str() {
        Some(host) if !host.is_empty() => Some(s.to_string()),
        _ => None,
    }
}

/// First date format (timestamp, then date-only) that `s` matches.
pub fn date_format_of(s: &str) -> Option<DateFormat> {
    [&*TIMESTAMP, &*DATE_ONLY]
        .into_iter()
        .find(|pattern| pattern.matches(s))
        .map(|pattern| pattern.format)
}
