//! Timestamp formats.
//!
//! Patterns use the familiar `dd.MM.yyyy` token style and are compiled once
//! into a chrono strftime string. Supported tokens:
//!
//! | token | meaning | | token | meaning |
//! |---|---|---|---|---|
//! | `yyyy` `yy` | year | | `HH` `H` | hour 0-23 |
//! | `MMMM` `MMM` | month name | | `hh` `h` | hour 1-12 |
//! | `MM` `M` | month number | | `mm` `m` | minute |
//! | `dddd` `ddd` | weekday name | | `ss` `s` | second |
//! | `dd` `d` | day of month | | `fff` `ffffff` `fffffffff` | fraction |
//! | `tt` | AM/PM | | `'text'` `\c` | literal |
//!
//! Any other letter is rejected so that a typo fails at configuration time
//! rather than producing odd output. A pattern must also read back what it
//! writes: the date in full, and hour plus minute when it carries a time
//! (`hh` needs `tt`).

use std::fmt::Write as _;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const ISO_UTC: &str = "%Y-%m-%dT%H:%M:%SZ";
const ISO_LOCAL: &str = "%Y-%m-%dT%H:%M:%S";

/// How timestamps are written.
///
/// In configuration text this is a single string: `"iso8601"`,
/// `"iso8601Local"`, or anything else as a pattern (`"dd.MM.yyyy"`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DateFormat {
    /// `1995-07-20T14:30:00Z`; timestamps are taken to be UTC.
    #[default]
    Iso8601,
    /// `1995-07-20T14:30:00`, no zone designator.
    Iso8601Local,
    /// Custom token pattern.
    Pattern(String),
}

impl From<String> for DateFormat {
    fn from(s: String) -> Self {
        match s.as_str() {
            "iso8601" => DateFormat::Iso8601,
            "iso8601Local" => DateFormat::Iso8601Local,
            _ => DateFormat::Pattern(s),
        }
    }
}

impl From<DateFormat> for String {
    fn from(f: DateFormat) -> Self {
        match f {
            DateFormat::Iso8601 => "iso8601".to_string(),
            DateFormat::Iso8601Local => "iso8601Local".to_string(),
            DateFormat::Pattern(p) => p,
        }
    }
}

/// A validated pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePattern {
    source: String,
    strftime: String,
    has_time: bool,
}

impl DatePattern {
    pub fn compile(pattern: &str) -> Result<Self, ConfigError> {
        let fail = |reason: String| ConfigError::InvalidDatePattern {
            pattern: pattern.to_string(),
            reason,
        };
        if pattern.is_empty() {
            return Err(fail("pattern is empty".to_string()));
        }
        let chars: Vec<char> = pattern.chars().collect();
        let mut strftime = String::new();
        let mut has_time = false;
        let mut i = 0;
        while i < chars.len() {
            let c = chars[i];
            match c {
                '\'' | '"' => {
                    let close = chars[i + 1..]
                        .iter()
                        .position(|&q| q == c)
                        .ok_or_else(|| fail(format!("unterminated literal at {i}")))?;
                    for &lit in &chars[i + 1..i + 1 + close] {
                        push_literal(&mut strftime, lit);
                    }
                    i += close + 2;
                }
                '\\' => {
                    let lit = chars
                        .get(i + 1)
                        .ok_or_else(|| fail("dangling escape".to_string()))?;
                    push_literal(&mut strftime, *lit);
                    i += 2;
                }
                c if c.is_ascii_alphabetic() => {
                    let run = chars[i..].iter().take_while(|&&n| n == c).count();
                    let spec = token(c, run).ok_or_else(|| {
                        fail(format!("unsupported token `{}`", c.to_string().repeat(run)))
                    })?;
                    has_time |= matches!(c, 'H' | 'h' | 'm' | 's' | 'f' | 't');
                    strftime.push_str(spec);
                    i += run;
                }
                c => {
                    push_literal(&mut strftime, c);
                    i += 1;
                }
            }
        }
        if StrftimeItems::new(&strftime).any(|item| matches!(item, Item::Error)) {
            return Err(fail("not representable".to_string()));
        }
        let compiled = Self {
            source: pattern.to_string(),
            strftime,
            has_time,
        };
        if !compiled.reads_back() {
            return Err(fail("formatted output cannot be read back".to_string()));
        }
        Ok(compiled)
    }

    /// Formats a sample instant and checks that parsing recovers its date,
    /// and its hour and minute when the pattern has a time part.
    fn reads_back(&self) -> bool {
        let Some(sample) = NaiveDate::from_ymd_opt(2024, 11, 23)
            .and_then(|d| d.and_hms_opt(13, 45, 56))
        else {
            return false;
        };
        let Some(back) = self.format(&sample).and_then(|text| self.parse(&text)) else {
            return false;
        };
        back.date() == sample.date()
            && (!self.has_time || (back.hour(), back.minute()) == (sample.hour(), sample.minute()))
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn format(&self, ts: &NaiveDateTime) -> Option<String> {
        let mut out = String::new();
        write!(out, "{}", ts.format(&self.strftime)).ok()?;
        Some(out)
    }

    /// Components the pattern does not carry come back as zero/midnight.
    pub fn parse(&self, text: &str) -> Option<NaiveDateTime> {
        if self.has_time {
            NaiveDateTime::parse_from_str(text, &self.strftime).ok()
        } else {
            NaiveDate::parse_from_str(text, &self.strftime)
                .ok()
                .map(|d| d.and_time(NaiveTime::MIN))
        }
    }
}

fn token(c: char, run: usize) -> Option<&'static str> {
    Some(match (c, run) {
        ('y', 4) => "%Y",
        ('y', 2) => "%y",
        ('M', 4) => "%B",
        ('M', 3) => "%b",
        ('M', 2) => "%m",
        ('M', 1) => "%-m",
        ('d', 4) => "%A",
        ('d', 3) => "%a",
        ('d', 2) => "%d",
        ('d', 1) => "%-d",
        ('H', 2) => "%H",
        ('H', 1) => "%-H",
        ('h', 2) => "%I",
        ('h', 1) => "%-I",
        ('m', 2) => "%M",
        ('m', 1) => "%-M",
        ('s', 2) => "%S",
        ('s', 1) => "%-S",
        ('f', 3) => "%3f",
        ('f', 6) => "%6f",
        ('f', 9) => "%9f",
        ('t', 2) => "%p",
        _ => return None,
    })
}

fn push_literal(out: &mut String, c: char) {
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}

/// Compiled form of a [`DateFormat`].
#[derive(Debug, Clone)]
pub(crate) enum DateCodec {
    Iso8601,
    Iso8601Local,
    Pattern(DatePattern),
}

impl DateCodec {
    pub(crate) fn new(format: &DateFormat) -> Result<Self, ConfigError> {
        Ok(match format {
            DateFormat::Iso8601 => DateCodec::Iso8601,
            DateFormat::Iso8601Local => DateCodec::Iso8601Local,
            DateFormat::Pattern(p) => DateCodec::Pattern(DatePattern::compile(p)?),
        })
    }

    pub(crate) fn format(&self, ts: &NaiveDateTime) -> Option<String> {
        match self {
            DateCodec::Iso8601 => Some(ts.format(ISO_UTC).to_string()),
            DateCodec::Iso8601Local => Some(ts.format(ISO_LOCAL).to_string()),
            DateCodec::Pattern(p) => p.format(ts),
        }
    }

    pub(crate) fn parse(&self, text: &str) -> Option<NaiveDateTime> {
        match self {
            DateCodec::Iso8601 | DateCodec::Iso8601Local => parse_iso(text),
            DateCodec::Pattern(p) => p.parse(text),
        }
    }

    pub(crate) fn describe(&self) -> &str {
        match self {
            DateCodec::Iso8601 => "iso8601",
            DateCodec::Iso8601Local => "iso8601Local",
            DateCodec::Pattern(p) => p.source(),
        }
    }
}

/// RFC 3339 with any offset (normalized to UTC), a bare local date-time, or
/// a bare date.
fn parse_iso(text: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(NaiveTime::MIN))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(1995, 7, 20)
            .and_then(|d| d.and_hms_opt(14, 30, 0))
            .unwrap()
    }

    fn fmt(pattern: &str) -> String {
        DatePattern::compile(pattern).unwrap().format(&ts()).unwrap()
    }

    #[test]
    fn reference_patterns() {
        assert_eq!(fmt("dd.MM.yyyy"), "20.07.1995");
        assert_eq!(fmt("yyyy-MM-dd"), "1995-07-20");
        assert_eq!(fmt("dd/MM/yyyy HH:mm:ss"), "20/07/1995 14:30:00");
        assert_eq!(fmt("MMMM dd, yyyy"), "July 20, 1995");
        assert_eq!(fmt("dd/MM/yyyy HH:mm"), "20/07/1995 14:30");
    }

    #[test]
    fn other_tokens_and_literals() {
        assert_eq!(fmt("d MMM yy"), "20 Jul 95");
        assert_eq!(fmt("dddd dd.MM.yyyy"), "Thursday 20.07.1995");
        assert_eq!(fmt("dd.MM.yyyy hh:mm tt"), "20.07.1995 02:30 PM");
        assert_eq!(fmt("yyyy-MM-dd 'at' HH\\hmm"), "1995-07-20 at 14h30");
        assert_eq!(fmt("dd.MM.yyyy '100%'"), "20.07.1995 100%");
        assert_eq!(fmt("yyyy-MM-dd HH:mm:ss.fff"), "1995-07-20 14:30:00.000");
    }

    #[test]
    fn rejects_unknown_tokens() {
        for bad in ["", "yyy", "dd.QQ.yyyy", "'open", "x\\", "zzz"] {
            assert!(
                matches!(
                    DatePattern::compile(bad),
                    Err(ConfigError::InvalidDatePattern { .. })
                ),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn rejects_patterns_that_lose_the_date() {
        for bad in [
            "MMMM yyyy",
            "yyyy",
            "dddd",
            "HH:mm",
            "hh:mm dd.MM.yyyy",
            "dd.MM.yyyy HH",
        ] {
            match DatePattern::compile(bad) {
                Err(ConfigError::InvalidDatePattern { pattern, reason }) => {
                    assert_eq!(pattern, bad);
                    assert!(reason.contains("read back"), "{bad:?}: {reason}");
                }
                other => panic!("{bad:?} should be rejected, got {other:?}"),
            }
        }
        assert!(DatePattern::compile("hh:mm tt dd.MM.yyyy").is_ok());
    }

    #[test]
    fn patterns_parse_back() {
        for pattern in ["dd/MM/yyyy HH:mm:ss", "yyyy-MM-dd'T'HH:mm"] {
            let p = DatePattern::compile(pattern).unwrap();
            assert_eq!(p.parse(&p.format(&ts()).unwrap()), Some(ts()), "{pattern}");
        }
        for pattern in ["dd.MM.yyyy", "yyyy-MM-dd", "MMMM dd, yyyy"] {
            let p = DatePattern::compile(pattern).unwrap();
            let back = p.parse(&p.format(&ts()).unwrap()).unwrap();
            assert_eq!(back.date(), ts().date(), "{pattern}");
            assert_eq!(back.time(), NaiveTime::MIN);
        }
    }

    #[test]
    fn iso_profiles() {
        let utc = DateCodec::new(&DateFormat::Iso8601).unwrap();
        let local = DateCodec::new(&DateFormat::Iso8601Local).unwrap();
        assert_eq!(utc.format(&ts()).unwrap(), "1995-07-20T14:30:00Z");
        assert_eq!(local.format(&ts()).unwrap(), "1995-07-20T14:30:00");
        assert_eq!(utc.parse("1995-07-20T14:30:00Z"), Some(ts()));
        assert_eq!(utc.parse("1995-07-20T16:30:00+02:00"), Some(ts()));
        assert_eq!(local.parse("1995-07-20T14:30:00"), Some(ts()));
        assert_eq!(utc.parse("1995-07-20"), ts().date().and_hms_opt(0, 0, 0));
        assert_eq!(utc.parse("20.07.1995"), None);
    }

    #[test]
    fn config_text_form() {
        let f: DateFormat = serde_json::from_str(r#""dd.MM.yyyy""#).unwrap();
        assert_eq!(f, DateFormat::Pattern("dd.MM.yyyy".into()));
        let f: DateFormat = serde_json::from_str(r#""iso8601Local""#).unwrap();
        assert_eq!(f, DateFormat::Iso8601Local);
        assert_eq!(serde_json::to_string(&DateFormat::Iso8601).unwrap(), r#""iso8601""#);
    }
}
