//! The canonical units a [`Duration`](crate::Duration) is decomposed into and
//! the textual aliases the parser recognizes for each of them.

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// The number of milliseconds in a second.
pub const MILLIS_PER_SECOND: f64 = 1_000.0;
/// The number of seconds in a minute.
pub const SECONDS_PER_MINUTE: f64 = 60.0;
/// The number of minutes in an hour.
pub const MINUTES_PER_HOUR: f64 = 60.0;
/// The number of hours in a day. Days are always exactly 24 hours long.
pub const HOURS_PER_DAY: f64 = 24.0;
/// The number of milliseconds in a minute.
pub const MILLIS_PER_MINUTE: f64 = MILLIS_PER_SECOND * SECONDS_PER_MINUTE;
/// The number of milliseconds in an hour.
pub const MILLIS_PER_HOUR: f64 = MILLIS_PER_MINUTE * MINUTES_PER_HOUR;
/// The number of milliseconds in a day.
pub const MILLIS_PER_DAY: f64 = MILLIS_PER_HOUR * HOURS_PER_DAY;

/// A canonical unit of time.
///
/// Units are ordered from smallest to largest, so `Unit::Millisecond <
/// Unit::Day`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Unit {
    /// Milliseconds.
    Millisecond,
    /// Seconds.
    Second,
    /// Minutes.
    Minute,
    /// Hours.
    Hour,
    /// Days of exactly 24 hours.
    Day,
}

impl Unit {
    /// Every unit, smallest first.
    pub const ALL: [Unit; 5] = [
        Unit::Millisecond,
        Unit::Second,
        Unit::Minute,
        Unit::Hour,
        Unit::Day,
    ];

    /// The number of milliseconds in one of `self`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use udur::Unit;
    ///
    /// assert_eq!(Unit::Minute.millis(), 60_000.0);
    /// assert_eq!(Unit::Day.millis(), 86_400_000.0);
    /// ```
    #[inline]
    pub const fn millis(self) -> f64 {
        match self {
            Unit::Millisecond => 1.0,
            Unit::Second => MILLIS_PER_SECOND,
            Unit::Minute => MILLIS_PER_MINUTE,
            Unit::Hour => MILLIS_PER_HOUR,
            Unit::Day => MILLIS_PER_DAY,
        }
    }

    /// The canonical English name of the unit, in the plural.
    pub const fn name(self) -> &'static str {
        match self {
            Unit::Millisecond => "milliseconds",
            Unit::Second => "seconds",
            Unit::Minute => "minutes",
            Unit::Hour => "hours",
            Unit::Day => "days",
        }
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }

    /// Looks up the unit named by `alias`, ignoring ASCII case. The whole of
    /// `alias` must match one of the recognized spellings.
    ///
    /// # Example
    ///
    /// ```rust
    /// use udur::Unit;
    ///
    /// assert_eq!(Unit::from_alias("HRS"), Some(Unit::Hour));
    /// assert_eq!(Unit::from_alias("millis"), Some(Unit::Millisecond));
    /// assert_eq!(Unit::from_alias("fortnight"), None);
    /// ```
    pub fn from_alias(alias: &str) -> Option<Unit> {
        ALIASES.iter()
            .find(|(needle, _)| needle.eq_ignore_ascii_case(alias))
            .map(|&(_, unit)| unit)
    }

    /// Returns the unit and the length of the longest alias at the very start
    /// of `input`, ignoring ASCII case.
    pub(crate) fn match_prefix(input: &[u8]) -> Option<(Unit, usize)> {
        // `ALIASES` is sorted by descending length, so the first hit is the
        // longest one.
        ALIASES.iter().find_map(|&(needle, unit)| {
            let candidate = input.get(..needle.len())?;
            if candidate.eq_ignore_ascii_case(needle.as_bytes()) {
                Some((unit, needle.len()))
            } else {
                None
            }
        })
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Unit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Unit, Error> {
        Unit::from_alias(s.trim()).ok_or_else(|| Error::UnsupportedUnit(s.to_string()))
    }
}

/// Every accepted spelling of every unit, longest first so that a scan never
/// settles for `m` when `min` or `ms` is present.
static ALIASES: &[(&str, Unit)] = &[
    ("milliseconds", Unit::Millisecond),
    ("millisecond", Unit::Millisecond),
    ("minutes", Unit::Minute),
    ("seconds", Unit::Second),
    ("millis", Unit::Millisecond),
    ("minute", Unit::Minute),
    ("second", Unit::Second),
    ("hours", Unit::Hour),
    ("milli", Unit::Millisecond),
    ("hour", Unit::Hour),
    ("mins", Unit::Minute),
    ("secs", Unit::Second),
    ("days", Unit::Day),
    ("day", Unit::Day),
    ("hrs", Unit::Hour),
    ("min", Unit::Minute),
    ("sec", Unit::Second),
    ("hr", Unit::Hour),
    ("ms", Unit::Millisecond),
    ("d", Unit::Day),
    ("h", Unit::Hour),
    ("m", Unit::Minute),
    ("s", Unit::Second),
];
