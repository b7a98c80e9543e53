/// Which calendar and clock fields a profile carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Fields {
    /// Date and time of day.
    DateTime,
    /// Time of day only.
    Time,
    Date,
    YearMonth,
    Year,
    MonthDay,
    Day,
    Month,
}

/// How the zone designator is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Zone {
    /// No designator, read as UTC.
    Absent,
    /// A literal `Z`.
    Utc,
    /// `+hh:mm` / `-hh:mm`.
    Offset,
}

#[derive(Debug, Clone, Copy)]
pub(super) struct Profile {
    /// Fixed-width layout the text must fit, e.g. `yyyy-MM-dd`.
    pub layout: &'static str,
    /// chrono pattern reading the same fields.
    pub pattern: &'static str,
    pub fields: Fields,
    pub zone: Zone,
}

const fn p(layout: &'static str, pattern: &'static str, fields: Fields, zone: Zone) -> Profile {
    Profile {
        layout,
        pattern,
        fields,
        zone,
    }
}

/// Accepted input shapes, tried in order. The first exact match wins.
///
/// `.FFFFFFF` and `%.f` both accept an absent fraction, so each
/// time-bearing entry also covers whole seconds.
#[rustfmt::skip]
pub(super) const PROFILES: [Profile; 24] = [
    p("yyyy-MM-ddTHH:mm:ss.FFFFFFFzzzzzz", "%Y-%m-%dT%H:%M:%S%.f%:z", Fields::DateTime, Zone::Offset),
    p("yyyy-MM-ddTHH:mm:ss.FFFFFFF", "%Y-%m-%dT%H:%M:%S%.f", Fields::DateTime, Zone::Absent),
    p("yyyy-MM-ddTHH:mm:ss.FFFFFFFZ", "%Y-%m-%dT%H:%M:%S%.fZ", Fields::DateTime, Zone::Utc),
    p("HH:mm:ss.FFFFFFF", "%H:%M:%S%.f", Fields::Time, Zone::Absent),
    p("HH:mm:ss.FFFFFFFZ", "%H:%M:%S%.fZ", Fields::Time, Zone::Utc),
    p("HH:mm:ss.FFFFFFFzzzzzz", "%H:%M:%S%.f%:z", Fields::Time, Zone::Offset),
    p("yyyy-MM-dd", "%Y-%m-%d", Fields::Date, Zone::Absent),
    p("yyyy-MM-ddZ", "%Y-%m-%dZ", Fields::Date, Zone::Utc),
    p("yyyy-MM-ddzzzzzz", "%Y-%m-%d%:z", Fields::Date, Zone::Offset),
    p("yyyy-MM", "%Y-%m", Fields::YearMonth, Zone::Absent),
    p("yyyy-MMZ", "%Y-%mZ", Fields::YearMonth, Zone::Utc),
    p("yyyy-MMzzzzzz", "%Y-%m%:z", Fields::YearMonth, Zone::Offset),
    p("yyyy", "%Y", Fields::Year, Zone::Absent),
    p("yyyyZ", "%YZ", Fields::Year, Zone::Utc),
    p("yyyyzzzzzz", "%Y%:z", Fields::Year, Zone::Offset),
    p("--MM-dd", "--%m-%d", Fields::MonthDay, Zone::Absent),
    p("--MM-ddZ", "--%m-%dZ", Fields::MonthDay, Zone::Utc),
    p("--MM-ddzzzzzz", "--%m-%d%:z", Fields::MonthDay, Zone::Offset),
    p("---dd", "---%d", Fields::Day, Zone::Absent),
    p("---ddZ", "---%dZ", Fields::Day, Zone::Utc),
    p("---ddzzzzzz", "---%d%:z", Fields::Day, Zone::Offset),
    p("--MM--", "--%m--", Fields::Month, Zone::Absent),
    p("--MM--Z", "--%m--Z", Fields::Month, Zone::Utc),
    p("--MM--zzzzzz", "--%m--%:z", Fields::Month, Zone::Offset),
];

/// Checks `text` against a fixed-width `layout`.
///
/// `y M d H m s` each stand for one ASCII digit. `.F..F` is an optional
/// `.` followed by one to as many digits as there are `F`s. `zzzzzz` is
/// `+hh:mm` or `-hh:mm`. Anything else is matched literally.
pub(super) fn fits_layout(layout: &str, text: &str) -> bool {
    let layout = layout.as_bytes();
    let text = text.as_bytes();
    let (mut li, mut ti) = (0, 0);

    while li < layout.len() {
        match layout[li] {
            b'y' | b'M' | b'd' | b'H' | b'm' | b's' => {
                if !text.get(ti).is_some_and(u8::is_ascii_digit) {
                    return false;
                }
                li += 1;
                ti += 1;
            }
            b'.' if layout.get(li + 1) == Some(&b'F') => {
                let max = layout[li + 1..].iter().take_while(|&&b| b == b'F').count();
                li += 1 + max;
                if text.get(ti) != Some(&b'.') {
                    continue;
                }
                let digits = text[ti + 1..].iter().take_while(|b| b.is_ascii_digit()).count();
                if digits == 0 || digits > max {
                    return false;
                }
                ti += 1 + digits;
            }
            b'z' => {
                if !text.get(ti..ti + 6).is_some_and(is_offset) {
                    return false;
                }
                li += layout[li..].iter().take_while(|&&b| b == b'z').count();
                ti += 6;
            }
            literal => {
                if text.get(ti) != Some(&literal) {
                    return false;
                }
                li += 1;
                ti += 1;
            }
        }
    }

    ti == text.len()
}

/// `+hh:mm` or `-hh:mm`.
fn is_offset(text: &[u8]) -> bool {
    matches!(
        text,
        [b'+' | b'-', h1, h2, b':', m1, m2]
            if [h1, h2, m1, m2].iter().all(|b| b.is_ascii_digit())
    )
}

#[cfg(test)]
mod tests {
    use super::fits_layout;

    #[test]
    fn layout_digits_and_literals() {
        assert!(fits_layout("yyyy-MM-dd", "2024-05-06"));
        assert!(!fits_layout("yyyy-MM-dd", "2024-05-06 "));
        assert!(!fits_layout("yyyy-MM-dd", "2024/05/06"));
        assert!(!fits_layout("yyyy", "+024"));
    }

    #[test]
    fn layout_fraction_is_optional_and_bounded() {
        let layout = "HH:mm:ss.FFFFFFF";
        assert!(fits_layout(layout, "08:15:00"));
        assert!(fits_layout(layout, "08:15:00.1"));
        assert!(fits_layout(layout, "08:15:00.1234567"));
        assert!(!fits_layout(layout, "08:15:00."));
        assert!(!fits_layout(layout, "08:15:00.12345678"));
    }

    #[test]
    fn layout_offset() {
        assert!(fits_layout("yyyyzzzzzz", "2024+05:30"));
        assert!(fits_layout("yyyyzzzzzz", "2024-03:00"));
        assert!(!fits_layout("yyyyzzzzzz", "2024+0530"));
        assert!(!fits_layout("yyyyzzzzzz", "2024Z"));
        assert!(!fits_layout("yyyyzzzzzz", "2024+05:3"));
    }
}
