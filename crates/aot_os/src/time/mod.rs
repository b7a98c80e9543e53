//! XSD date-time rendering and the fixed-profile parser.
//!
//! Values are written in the canonical `yyyy-MM-ddTHH:mm:ss[.fffffff]Z`
//! form and read back through a fixed, ordered list of profiles covering
//! full timestamps, bare times, and partial dates.

// -----------------------------------------------------------------------------
// Modules

mod error;
mod profile;

// -----------------------------------------------------------------------------
// Exports

pub use error::FormatError;

use chrono::format::{Parsed, StrftimeItems, parse};
use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Timelike, Utc};

use profile::{Fields, PROFILES, Profile, Zone, fits_layout};

/// Nanoseconds per tick of the 7-digit fraction.
const NANOS_PER_TICK: u32 = 100;

// -----------------------------------------------------------------------------
// DateTimeProfileParser

/// Parses date-time text against the fixed profile list.
///
/// Components a profile does not carry are filled in: time-only input
/// takes the reference date, a missing year takes the reference year and
/// a missing month or day becomes `1`. The reference date is today in UTC
/// unless fixed with [`with_reference_date`](Self::with_reference_date).
///
/// # Examples
///
/// ```
/// use aot_os::time::DateTimeProfileParser;
/// use chrono::{NaiveDate, TimeZone, Utc};
///
/// let parser = DateTimeProfileParser::new();
/// let dt = parser.parse_utc("2024-03-01T12:30:00+02:00").unwrap();
/// assert_eq!(dt, Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap());
///
/// let fixed = DateTimeProfileParser::new()
///     .with_reference_date(NaiveDate::from_ymd_opt(2020, 6, 15).unwrap());
/// let dt = fixed.parse_utc("08:00:00").unwrap();
/// assert_eq!(dt, Utc.with_ymd_and_hms(2020, 6, 15, 8, 0, 0).unwrap());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DateTimeProfileParser {
    reference: Option<NaiveDate>,
}

impl DateTimeProfileParser {
    /// Creates a parser whose reference date is today (UTC).
    pub const fn new() -> Self {
        Self { reference: None }
    }

    /// Fixes the date used to fill in missing components.
    pub const fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference = Some(date);
        self
    }

    fn reference_date(&self) -> NaiveDate {
        self.reference.unwrap_or_else(|| Utc::now().date_naive())
    }

    /// Parses `text` and adjusts it to UTC.
    ///
    /// Leading and trailing whitespace is ignored. Text without a zone
    /// designator is taken as UTC.
    pub fn parse_utc(&self, text: &str) -> Result<DateTime<Utc>, FormatError> {
        let trimmed = text.trim();
        let reference = self.reference_date();

        PROFILES
            .iter()
            .find_map(|profile| try_profile(profile, trimmed, reference))
            .ok_or_else(|| FormatError {
                text: text.to_owned(),
            })
    }
}

fn try_profile(profile: &Profile, text: &str, reference: NaiveDate) -> Option<DateTime<Utc>> {
    // chrono reads numbers of any width, the layout pins them down.
    if !fits_layout(profile.layout, text) {
        return None;
    }

    let mut parsed = Parsed::new();
    parse(&mut parsed, text, StrftimeItems::new(profile.pattern)).ok()?;

    let year = i64::from(reference.year());
    match profile.fields {
        Fields::DateTime => {}
        Fields::Time => {
            parsed.set_year(year).ok()?;
            parsed.set_month(i64::from(reference.month())).ok()?;
            parsed.set_day(i64::from(reference.day())).ok()?;
        }
        Fields::Date => {}
        Fields::YearMonth => parsed.set_day(1).ok()?,
        Fields::Year => {
            parsed.set_month(1).ok()?;
            parsed.set_day(1).ok()?;
        }
        Fields::MonthDay => parsed.set_year(year).ok()?,
        Fields::Day => {
            parsed.set_year(year).ok()?;
            parsed.set_month(1).ok()?;
        }
        Fields::Month => {
            parsed.set_year(year).ok()?;
            parsed.set_day(1).ok()?;
        }
    }
    if !matches!(profile.fields, Fields::DateTime | Fields::Time) {
        parsed.set_hour(0).ok()?;
        parsed.set_minute(0).ok()?;
        parsed.set_second(0).ok()?;
    }

    let naive = parsed
        .to_naive_date()
        .ok()?
        .and_time(parsed.to_naive_time().ok()?);

    match profile.zone {
        Zone::Absent | Zone::Utc => Some(naive.and_utc()),
        Zone::Offset => {
            let offset = parsed.to_fixed_offset().ok()?;
            let local = offset.from_local_datetime(&naive).single()?;
            Some(local.with_timezone(&Utc))
        }
    }
}

// -----------------------------------------------------------------------------
// Formatting

/// Renders `value` in UTC as `yyyy-MM-ddTHH:mm:ss[.fffffff]Z`.
///
/// The fraction has at most 7 digits, trailing zeros trimmed, and is
/// omitted when zero.
///
/// # Examples
///
/// ```
/// use aot_os::time::format_xsd;
/// use chrono::{TimeZone, Utc};
///
/// let dt = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
/// assert_eq!(format_xsd(&dt), "2024-01-02T03:04:05Z");
///
/// let dt = dt + chrono::Duration::milliseconds(250);
/// assert_eq!(format_xsd(&dt), "2024-01-02T03:04:05.25Z");
/// ```
pub fn format_xsd<Tz: TimeZone>(value: &DateTime<Tz>) -> String {
    let utc = value.with_timezone(&Utc);
    let mut out = utc.format("%Y-%m-%dT%H:%M:%S").to_string();

    let ticks = (utc.nanosecond() % 1_000_000_000) / NANOS_PER_TICK;
    if ticks != 0 {
        let fraction = format!("{ticks:07}");
        out.push('.');
        out.push_str(fraction.trim_end_matches('0'));
    }

    out.push('Z');
    out
}

/// Parses `text` with today's date as reference.
///
/// Shorthand for `DateTimeProfileParser::new().parse_utc(text)`.
#[inline]
pub fn parse_xsd_utc(text: &str) -> Result<DateTime<Utc>, FormatError> {
    DateTimeProfileParser::new().parse_utc(text)
}

// -----------------------------------------------------------------------------
// Tests
