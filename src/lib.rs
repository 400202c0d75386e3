//! A millisecond duration value that parses from and formats to human text.
//!
//! This crate provides the [`Duration`] type, a signed, possibly fractional
//! count of milliseconds, along with a [`Parser`] that reads free-form text
//! such as `"1h 30m"`, `"1.5 hours"`, or `"1day2hours3minutes"` and a
//! [`Formatter`] that renders durations back as short (`"1h 30m"`), medium
//! (`"1 hr 30 mins"`), long (`"1 hour 30 minutes"`), or custom pattern text in
//! any of the supported [`Locale`]s.
//!
//! # Usage
//!
//! Add the following to the `[dependencies]` section of your `Cargo.toml`:
//!
//! ```toml
//! udur = "0.3"
//! ```
//!
//! Then parse, compute, and format:
//!
//! ```rust
//! use udur::{Components, Duration, Locale};
//!
//! let d = Duration::parse("1h 30m 2h 15m")?;
//! assert_eq!(d.in_minutes(), 225.0);
//! assert_eq!(d.short(), "3h 45m");
//!
//! let d = d.add(Components { minutes: 15.0, ..Components::default() });
//! assert_eq!(d.long(), "4 hours");
//! assert_eq!(d.with_locale(Locale::De).long(), "4 Stunden");
//! # Ok::<(), udur::Error>(())
//! ```
//!
//! # Features
//!
//! This crate exposes several features, all of which are disabled by default:
//!
//! * **`serde`**
//!
//!   Implements `Serialize` and `Deserialize` for [`Duration`] (as a
//!   `"<n>ms"` string, read back through the parser), `Serialize` for
//!   [`Totals`], and both for [`UnitEntry`] and [`UnitTable`] so custom locale
//!   tables can be loaded from configuration.
//!
//! * **`cli`**
//!
//!   Builds the `udur` command-line tool. Implies `serde`.
//!
//! You can enable features via `Cargo.toml`:
//!
//! ```toml
//! [dependencies.udur]
//! features = ["serde"]
//! ```

#![cfg_attr(all(nightly, doc), feature(doc_cfg))]
#![warn(missing_docs)]

mod components;
mod error;
mod format;
mod locale;
mod parse;
mod time;
mod totals;
mod unit;

#[cfg(feature = "serde")]
mod ser;

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

pub use crate::components::{Components, DurationLike};
pub use crate::error::Error;
pub use crate::format::{Formatter, Style, Styled};
pub use crate::locale::{Locale, Locales, UnitEntry, UnitTable};
pub use crate::parse::Parser;
pub use crate::totals::Totals;
pub use crate::unit::*;

/// A span of elapsed time, stored as a single signed count of milliseconds.
///
/// A `Duration` is fully determined by that count: however it was built (from
/// [`Components`], a unit, parsed text, or arithmetic), two durations with the
/// same count are equal and order the same way. Each duration also carries a
/// display [`Locale`], defaulting to English, which only affects formatting
/// and never equality or ordering.
///
/// Every operation returns a new value; a `Duration` is never mutated.
///
/// # Constructing a `Duration`
///
/// ```rust
/// use udur::{Components, Duration};
///
/// let a = Duration::new(Components { hours: 1.0, minutes: 30.0, ..Components::default() });
/// let b = Duration::from_unit(90.0, "minutes");
/// let c: Duration = "1.5 hours".parse()?;
/// let d = Duration::from_millis(5_400_000.0);
///
/// assert!(a == b && b == c && c == d);
/// # Ok::<(), udur::Error>(())
/// ```
///
/// # Accessors
///
/// The `in_*` methods return the _total_ amount of a unit in the duration,
/// while [`days()`](Duration::days()), [`hours()`](Duration::hours()),
/// [`minutes()`](Duration::minutes()), [`seconds()`](Duration::seconds()), and
/// [`milliseconds()`](Duration::milliseconds()) return the _remainder_ left in
/// each unit after the larger units are taken out:
///
/// ```rust
/// use udur::Duration;
///
/// let d = Duration::parse("1d 2h 3m")?;
/// assert_eq!(d.in_hours(), 26.05);
/// assert_eq!((d.days(), d.hours(), d.minutes()), (1, 2, 3));
/// # Ok::<(), udur::Error>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Duration {
    millis: f64,
    locale: Locale,
}

impl Duration {
    /// The zero duration.
    ///
    /// # Example
    ///
    /// ```rust
    /// use udur::Duration;
    ///
    /// assert!(Duration::ZERO.is_zero());
    /// assert_eq!(Duration::ZERO.short(), "");
    /// ```
    pub const ZERO: Duration = Duration { millis: 0.0, locale: Locale::En };

    /// The longest representable duration: `f64::MAX` milliseconds.
    pub const MAX: Duration = Duration { millis: f64::MAX, locale: Locale::En };

    /// The most negative representable duration: `f64::MIN` milliseconds.
    pub const MIN: Duration = Duration { millis: f64::MIN, locale: Locale::En };

    /// Creates a new `Duration` from per-unit components. Every component
    /// may be fractional or negative; they are summed into one count of
    /// milliseconds.
    ///
    /// # Example
    ///
    /// ```rust
    /// use udur::{Components, Duration};
    ///
    /// let d = Duration::new(Components { hours: 2.5, ..Components::default() });
    /// assert_eq!((d.hours(), d.minutes()), (2, 30));
    /// ```
    pub fn new(components: Components) -> Duration {
        Duration::from_millis(components.total_millis())
    }

    /// Creates a new `Duration` of `millis` milliseconds.
    ///
    /// Non-finite values saturate the way an `as` cast does: infinities clamp
    /// to [`Duration::MAX`] and [`Duration::MIN`], and NaN becomes
    /// [`Duration::ZERO`]. Every constructor and arithmetic operation goes
    /// through here, so a `Duration` always holds a finite count.
    ///
    /// # Example
    ///
    /// ```rust
    /// use udur::Duration;
    ///
    /// let d = Duration::from_millis(1500.0);
    /// assert_eq!(d.in_seconds(), 1.5);
    ///
    /// assert_eq!(Duration::from_millis(f64::INFINITY), Duration::MAX);
    /// assert_eq!(Duration::from_millis(1e308).multiply(10.0), Duration::MAX);
    /// assert!(Duration::from_millis(f64::NAN).is_zero());
    /// ```
    #[inline]
    pub fn from_millis(millis: f64) -> Duration {
        let millis = if millis.is_nan() { 0.0 } else { millis.clamp(f64::MIN, f64::MAX) };

        // `-0.0 + 0.0` is `0.0`, so zero has a single representation.
        Duration { millis: millis + 0.0, locale: Locale::En }
    }

    /// Creates a new `Duration` of `value` in the unit named `unit`, which
    /// may be any alias accepted by the [`Parser`] (`"s"`, `"hrs"`,
    /// `"minutes"`, ...).
    ///
    /// An unrecognized `unit` is treated as milliseconds and logged as a
    /// warning. Use [`Duration::try_from_unit()`] to reject it instead.
    ///
    /// # Example
    ///
    /// ```rust
    /// use udur::Duration;
    ///
    /// assert_eq!(Duration::from_unit(3600.0, "s").long(), "1 hour");
    /// assert_eq!(Duration::from_unit(3600.0, "fortnights").short(), "3s 600ms");
    /// ```
    pub fn from_unit(value: f64, unit: &str) -> Duration {
        Duration::try_from_unit(value, unit).unwrap_or_else(|_| {
            tracing::warn!(unit, "unknown duration unit; using milliseconds");
            Duration::from_millis(value)
        })
    }

    /// Creates a new `Duration` of `value` in the unit named `unit`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedUnit`] if `unit` isn't a recognized alias.
    ///
    /// # Example
    ///
    /// ```rust
    /// use udur::{Duration, Error};
    ///
    /// assert_eq!(Duration::try_from_unit(2.0, "h")?.in_minutes(), 120.0);
    /// assert!(matches!(Duration::try_from_unit(2.0, "weeks"), Err(Error::UnsupportedUnit(_))));
    /// # Ok::<(), udur::Error>(())
    /// ```
    pub fn try_from_unit(value: f64, unit: &str) -> Result<Duration, Error> {
        let unit = unit.parse::<Unit>()?;
        Ok(Duration::from_millis(value * unit.millis()))
    }

    /// Parses free-form duration text such as `"1h 30m"` or `"2.5 days"`.
    ///
    /// See [`Parser`] for the accepted grammar. This is equivalent to
    /// `Parser::new().parse(text)` and to `text.parse::<Duration>()`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParseFailure`] if `text` is not entirely made up of
    /// `<number><unit>` tokens, a bare number, or whitespace.
    ///
    /// # Example
    ///
    /// ```rust
    /// use udur::Duration;
    ///
    /// assert_eq!(Duration::parse("1000")?.seconds(), 1);
    /// assert!(Duration::parse("").unwrap().is_zero());
    /// assert!(Duration::parse("hello world").is_err());
    /// # Ok::<(), udur::Error>(())
    /// ```
    pub fn parse(text: &str) -> Result<Duration, Error> {
        Parser::new().parse(text)
    }

    /// The total number of milliseconds.
    #[inline]
    pub fn in_milliseconds(&self) -> f64 {
        self.millis
    }

    /// The total number of seconds, possibly fractional.
    #[inline]
    pub fn in_seconds(&self) -> f64 {
        self.millis / MILLIS_PER_SECOND
    }

    /// The total number of minutes, possibly fractional.
    #[inline]
    pub fn in_minutes(&self) -> f64 {
        self.millis / MILLIS_PER_MINUTE
    }

    /// The total number of hours, possibly fractional.
    #[inline]
    pub fn in_hours(&self) -> f64 {
        self.millis / MILLIS_PER_HOUR
    }

    /// The total number of days, possibly fractional.
    #[inline]
    pub fn in_days(&self) -> f64 {
        self.millis / MILLIS_PER_DAY
    }

    /// The whole number of days, rounded towards negative infinity.
    ///
    /// Durations longer than `i64::MAX` days saturate; the formatter prints
    /// the exact count regardless.
    pub fn days(&self) -> i64 {
        self.in_days().floor() as i64
    }

    /// The whole hours left over after taking out [`days()`](Duration::days()).
    ///
    /// The result has the sign of the duration and lies in `-23..=23`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use udur::Duration;
    ///
    /// let d = Duration::parse("10000000000000000000000")?;
    /// assert_eq!((d.hours(), d.minutes(), d.seconds()), (17, 46, 40));
    /// # Ok::<(), udur::Error>(())
    /// ```
    pub fn hours(&self) -> i64 {
        self.remainder(MILLIS_PER_HOUR, MILLIS_PER_DAY) as i64
    }

    /// The whole minutes left over after taking out whole hours.
    pub fn minutes(&self) -> i64 {
        self.remainder(MILLIS_PER_MINUTE, MILLIS_PER_HOUR) as i64
    }

    /// The whole seconds left over after taking out whole minutes.
    pub fn seconds(&self) -> i64 {
        self.remainder(MILLIS_PER_SECOND, MILLIS_PER_MINUTE) as i64
    }

    /// `floor(millis / unit)` reduced modulo `next / unit`, keeping the sign
    /// of `millis`. Reducing by `next` first keeps the division exact for any
    /// magnitude, since `%` on `f64` never rounds.
    fn remainder(&self, unit: f64, next: f64) -> f64 {
        (self.millis % next / unit).floor() % (next / unit) + 0.0
    }

    /// The milliseconds left over after taking out whole seconds. Unlike the
    /// other remainders, this one keeps any fractional part.
    ///
    /// # Example
    ///
    /// ```rust
    /// use udur::Duration;
    ///
    /// let d = Duration::parse("15.25s")?;
    /// assert_eq!(d.seconds(), 15);
    /// assert_eq!(d.milliseconds(), 250.0);
    /// assert_eq!(Duration::from_millis(1.5).milliseconds(), 1.5);
    /// # Ok::<(), udur::Error>(())
    /// ```
    pub fn milliseconds(&self) -> f64 {
        self.millis % MILLIS_PER_SECOND + 0.0
    }

    /// Every whole remainder component, indexed by [`Unit::index()`]. Days
    /// are not bounded by `i64`.
    pub(crate) fn remainders(&self) -> [f64; 5] {
        let mut parts = [0.0; 5];
        parts[Unit::Millisecond.index()] = self.milliseconds().floor() + 0.0;
        parts[Unit::Second.index()] = self.remainder(MILLIS_PER_SECOND, MILLIS_PER_MINUTE);
        parts[Unit::Minute.index()] = self.remainder(MILLIS_PER_MINUTE, MILLIS_PER_HOUR);
        parts[Unit::Hour.index()] = self.remainder(MILLIS_PER_HOUR, MILLIS_PER_DAY);
        parts[Unit::Day.index()] = self.in_days().floor() + 0.0;
        parts
    }

    /// Returns `true` if `self` is shorter than zero.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.millis < 0.0
    }

    /// Returns `true` if `self` is exactly zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.millis == 0.0
    }

    /// Returns `true` if `self` is longer than zero.
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.millis > 0.0
    }

    /// The locale `self` is formatted in.
    #[inline]
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Returns a copy of `self` that formats in `locale`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use udur::{Duration, Locale};
    ///
    /// let d = Duration::from_unit(3.0, "d").with_locale(Locale::Fr);
    /// assert_eq!(d.locale(), Locale::Fr);
    /// assert_eq!(d.long(), "3 jours");
    /// ```
    #[inline]
    pub fn with_locale(self, locale: Locale) -> Duration {
        Duration { locale, ..self }
    }

    /// Returns a copy of `self` that formats in the locale with code `code`.
    ///
    /// Codes are matched by their primary language subtag, so `"es-MX"`
    /// selects Spanish. Unknown codes fall back to English; see
    /// [`Locale::from_code()`].
    pub fn with_locale_code(self, code: &str) -> Duration {
        self.with_locale(Locale::from_code(code))
    }

    /// Renders `self` in [`Style::Short`]: `"1h 30m 15s"`.
    pub fn short(&self) -> String {
        Formatter::default().short(self)
    }

    /// Renders `self` in [`Style::Medium`]: `"1 hr 30 mins 15 secs"`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use udur::{Components, Duration};
    ///
    /// let d = Duration::new(Components { hours: 1.0, minutes: 30.0, seconds: 15.25, ..Components::default() });
    /// assert_eq!(d.medium(), "1 hr 30 mins 15 secs 250 ms");
    /// ```
    pub fn medium(&self) -> String {
        Formatter::default().medium(self)
    }

    /// Renders `self` in [`Style::Long`]: `"1 hour 30 minutes 15 seconds"`.
    pub fn long(&self) -> String {
        Formatter::default().long(self)
    }

    /// Renders `self` in a named style or through a `%d %h %m %s %l` pattern.
    /// See [`Formatter::format()`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use udur::{Components, Duration};
    ///
    /// let d = Duration::new(Components { hours: 2.5, ..Components::default() });
    /// assert_eq!(d.format("%hhrs %mmins ago"), "2hrs 30mins ago");
    /// assert_eq!(d.format("medium"), "2 hrs 30 mins");
    /// ```
    pub fn format(&self, pattern: &str) -> String {
        Formatter::default().format(self, pattern)
    }

    /// Returns the sum of `self` and `other`, which is either a `Duration` or
    /// [`Components`]. The result keeps the locale of `self`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use udur::{Components, Duration};
    ///
    /// let d = Duration::from_unit(1.0, "h");
    /// assert_eq!(d.add(Duration::from_unit(30.0, "m")).in_minutes(), 90.0);
    /// assert_eq!(d.add(Components { minutes: 15.0, ..Components::default() }).in_minutes(), 75.0);
    /// ```
    pub fn add<D: Into<DurationLike>>(&self, other: D) -> Duration {
        self.map(|millis| millis + other.into().millis())
    }

    /// Returns `self` minus `other`, which is either a `Duration` or
    /// [`Components`]. The result keeps the locale of `self`.
    pub fn subtract<D: Into<DurationLike>>(&self, other: D) -> Duration {
        self.map(|millis| millis - other.into().millis())
    }

    /// Returns `self` scaled by `factor`.
    pub fn multiply(&self, factor: f64) -> Duration {
        self.map(|millis| millis * factor)
    }

    /// Returns `self` divided by `divisor`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `divisor` is zero or not finite.
    ///
    /// # Example
    ///
    /// ```rust
    /// use udur::{Duration, Error};
    ///
    /// let d = Duration::from_millis(7_200_000.0);
    /// assert_eq!(d.divide(2.0)?.in_hours(), 1.0);
    /// assert!(matches!(d.divide(0.0), Err(Error::InvalidArgument(_))));
    /// # Ok::<(), udur::Error>(())
    /// ```
    pub fn divide(&self, divisor: f64) -> Result<Duration, Error> {
        if divisor == 0.0 {
            return Err(Error::InvalidArgument("division by zero is not allowed"));
        }

        if !divisor.is_finite() {
            return Err(Error::InvalidArgument("divisor must be a finite number"));
        }

        Ok(self.map(|millis| millis / divisor))
    }

    /// Returns `self` with the opposite sign.
    pub fn negate(&self) -> Duration {
        self.multiply(-1.0)
    }

    /// Compares `self` and `other` by length alone.
    ///
    /// This is a total order and agrees with `Ord`. Use `as i8` on the result
    /// for the usual `-1`, `0`, `1`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::cmp::Ordering;
    /// use udur::{Duration, Locale};
    ///
    /// let short = Duration::from_unit(1.0, "m");
    /// let long = Duration::from_unit(1.0, "h").with_locale(Locale::Es);
    /// assert_eq!(short.compare_to(&long), Ordering::Less);
    /// assert_eq!(long.compare_to(&short) as i8, 1);
    /// ```
    pub fn compare_to(&self, other: &Duration) -> Ordering {
        self.millis.total_cmp(&other.millis)
    }

    /// Returns the total amount of every unit in `self`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use udur::Duration;
    ///
    /// let totals = Duration::from_unit(1.0, "day").to_json();
    /// assert_eq!(totals.hours, 24.0);
    /// assert_eq!(totals.milliseconds, 86_400_000.0);
    /// ```
    pub fn to_json(&self) -> Totals {
        Totals {
            milliseconds: self.in_milliseconds(),
            seconds: self.in_seconds(),
            minutes: self.in_minutes(),
            hours: self.in_hours(),
            days: self.in_days(),
        }
    }

    fn map<F: FnOnce(f64) -> f64>(&self, f: F) -> Duration {
        Duration::from_millis(f(self.millis)).with_locale(self.locale)
    }
}

impl Default for Duration {
    fn default() -> Self {
        Duration::ZERO
    }
}

impl fmt::Display for Duration {
    /// Writes `"Duration in milliseconds: <n>"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Duration in milliseconds: {}", self.millis)
    }
}

impl FromStr for Duration {
    type Err = Error;

    fn from_str(s: &str) -> Result<Duration, Error> {
        Duration::parse(s)
    }
}

impl PartialEq for Duration {
    fn eq(&self, other: &Duration) -> bool {
        self.compare_to(other) == Ordering::Equal
    }
}

impl Eq for Duration {}

impl PartialOrd for Duration {
    fn partial_cmp(&self, other: &Duration) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Duration {
    fn cmp(&self, other: &Duration) -> Ordering {
        self.compare_to(other)
    }
}

impl Hash for Duration {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.millis.to_bits().hash(state);
    }
}

impl<D: Into<DurationLike>> Add<D> for Duration {
    type Output = Duration;

    fn add(self, other: D) -> Duration {
        Duration::add(&self, other)
    }
}

impl<D: Into<DurationLike>> Sub<D> for Duration {
    type Output = Duration;

    fn sub(self, other: D) -> Duration {
        self.subtract(other)
    }
}

impl Mul<f64> for Duration {
    type Output = Duration;

    fn mul(self, factor: f64) -> Duration {
        self.multiply(factor)
    }
}

impl Neg for Duration {
    type Output = Duration;

    fn neg(self) -> Duration {
        self.negate()
    }
}
