use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use chrono_tz::Tz;
use std::fmt;

/// Sales are bucketed by the shop's local calendar day (UTC+2, Lusaka).
pub const DEFAULT_UTC_OFFSET_SECS: i32 = 2 * 3600;

/// Calendar used to turn sale timestamps into business days.
/// Either a fixed UTC offset (`+02:00`) or an IANA zone (`Africa/Lusaka`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocalZone {
    Fixed(FixedOffset),
    Named(Tz),
}

impl LocalZone {
    pub fn parse(s: &str) -> Option<LocalZone> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }
        if let Ok(tz) = s.parse::<Tz>() {
            return Some(LocalZone::Named(tz));
        }
        parse_offset(s).map(LocalZone::Fixed)
    }

    pub fn date_of(&self, ts: DateTime<Utc>) -> NaiveDate {
        match self {
            LocalZone::Fixed(offset) => ts.with_timezone(offset).date_naive(),
            LocalZone::Named(tz) => ts.with_timezone(tz).date_naive(),
        }
    }

    pub fn name(&self) -> String {
        match self {
            LocalZone::Fixed(offset) => offset.to_string(),
            LocalZone::Named(tz) => tz.name().to_string(),
        }
    }
}

impl Default for LocalZone {
    fn default() -> Self {
        let offset = FixedOffset::east_opt(DEFAULT_UTC_OFFSET_SECS).unwrap_or_else(|| Utc.fix());
        LocalZone::Fixed(offset)
    }
}

impl fmt::Display for LocalZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Accepts `UTC`, `Z`, `+02:00`, `-0530` and `+2`.
fn parse_offset(s: &str) -> Option<FixedOffset> {
    if s.eq_ignore_ascii_case("utc") || s == "Z" {
        return FixedOffset::east_opt(0);
    }

    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };

    let (hours, minutes) = match rest.split_once(':') {
        Some(parts) => parts,
        None if rest.len() == 4 => rest.split_at(2),
        None => (rest, "0"),
    };

    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if !(0..=14).contains(&hours) || !(0..60).contains(&minutes) {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
