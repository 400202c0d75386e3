//! Rendering durations as text.
//!
//! A [`Formatter`] renders the _remainder decomposition_ of a duration (its
//! days, hours, minutes, seconds, and milliseconds components, see
//! [`Duration::days()`] and friends) either in one of three [`Style`]s or
//! through a pattern with `%d %h %m %s %l` placeholders.
//!
//! Styles only print nonzero components, largest first, separated by a single
//! space. A zero duration renders as the empty string.
//!
//! The sign of the duration is printed as-is. Components are floored, so a
//! negative duration decomposes into surprising pieces: `-90s` renders as
//! `"-1d -1h -2m -30s"`. To print `"1m 30s ago"`,
//! [`negate`](Duration::negate()) the duration first and add the suffix
//! yourself.

use std::fmt;
use std::str::FromStr;

use crate::{Duration, Error, Locales, Unit};

/// The three built-in renderings of a duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Style {
    /// Fixed abbreviations glued to their value: `"1h 30m 15s"`.
    #[default]
    Short,
    /// Abbreviations that pluralize: `"1 hr 30 mins 15 secs"`.
    Medium,
    /// Full unit names: `"1 hour 30 minutes 15 seconds"`.
    Long,
}

impl Style {
    /// Every style.
    pub const ALL: [Style; 3] = [Style::Short, Style::Medium, Style::Long];

    /// The name of the style: `"short"`, `"medium"`, or `"long"`.
    pub const fn name(self) -> &'static str {
        match self {
            Style::Short => "short",
            Style::Medium => "medium",
            Style::Long => "long",
        }
    }

    /// Returns the style called `name`, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Style> {
        Style::ALL.into_iter().find(|style| style.name().eq_ignore_ascii_case(name))
    }

    fn spaced(self) -> bool {
        !matches!(self, Style::Short)
    }
}

impl FromStr for Style {
    type Err = Error;

    fn from_str(s: &str) -> Result<Style, Error> {
        Style::from_name(s).ok_or(Error::InvalidArgument("expected one of short, medium, or long"))
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Renders durations using the unit names of a [`Locales`] registry.
///
/// Each duration carries its own [`Locale`](crate::Locale); the formatter
/// decides which tables that locale is looked up in. [`Formatter::default()`]
/// uses [`Locales::builtin()`].
///
/// # Example
///
/// ```rust
/// use udur::{Components, Duration, Formatter, Locale, Locales};
///
/// let locales = Locales::new();
/// let formatter = Formatter::with_locales(&locales);
///
/// let d = Duration::new(Components { hours: 2.0, minutes: 1.0, ..Components::default() });
/// assert_eq!(formatter.long(&d), "2 hours 1 minute");
/// assert_eq!(formatter.long(&d.with_locale(Locale::Es)), "2 horas 1 minuto");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Formatter<'r> {
    locales: &'r Locales,
}

impl<'r> Formatter<'r> {
    /// A formatter looking unit names up in `locales`.
    pub fn with_locales(locales: &'r Locales) -> Formatter<'r> {
        Formatter { locales }
    }

    /// Returns a value whose `Display` implementation renders `duration` in
    /// `style` without allocating.
    ///
    /// # Example
    ///
    /// ```rust
    /// use udur::{Duration, Formatter, Style};
    ///
    /// let d = Duration::from_millis(61_000.0);
    /// let line = format!("took {}", Formatter::default().display(&d, Style::Medium));
    /// assert_eq!(line, "took 1 min 1 sec");
    /// ```
    pub fn display<'a>(&self, duration: &'a Duration, style: Style) -> Styled<'a, 'r> {
        Styled { duration, style, locales: self.locales }
    }

    /// Renders `duration` in `style`.
    pub fn styled(&self, duration: &Duration, style: Style) -> String {
        self.display(duration, style).to_string()
    }

    /// Renders `duration` in [`Style::Short`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use udur::{Duration, Formatter};
    ///
    /// let d = Duration::from_millis(5_415_250.0);
    /// assert_eq!(Formatter::default().short(&d), "1h 30m 15s 250ms");
    /// ```
    pub fn short(&self, duration: &Duration) -> String {
        self.styled(duration, Style::Short)
    }

    /// Renders `duration` in [`Style::Medium`].
    pub fn medium(&self, duration: &Duration) -> String {
        self.styled(duration, Style::Medium)
    }

    /// Renders `duration` in [`Style::Long`].
    pub fn long(&self, duration: &Duration) -> String {
        self.styled(duration, Style::Long)
    }

    /// Renders `duration` according to `pattern`.
    ///
    /// `"short"`, `"medium"`, and `"long"` (in any ASCII case) select the
    /// corresponding [`Style`]. Anything else is treated as a pattern, see
    /// [`Formatter::pattern()`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use udur::{Duration, Formatter};
    ///
    /// let d = Duration::from_millis(5_400_000.0);
    /// assert_eq!(Formatter::default().format(&d, "LONG"), "1 hour 30 minutes");
    /// assert_eq!(Formatter::default().format(&d, "%h hr %m min ago"), "1 hr 30 min ago");
    /// ```
    pub fn format(&self, duration: &Duration, pattern: &str) -> String {
        match Style::from_name(pattern) {
            Some(style) => self.styled(duration, style),
            None => self.pattern(duration, pattern),
        }
    }

    /// Substitutes the remainder components of `duration` into `pattern`.
    ///
    /// | placeholder | component                        |
    /// |-------------|----------------------------------|
    /// | `%d`        | [`days`](Duration::days())       |
    /// | `%h`        | [`hours`](Duration::hours())     |
    /// | `%m`        | [`minutes`](Duration::minutes()) |
    /// | `%s`        | [`seconds`](Duration::seconds()) |
    /// | `%l`        | whole [`milliseconds`](Duration::milliseconds()) |
    ///
    /// Values are not padded. Every other character, including a `%` that
    /// isn't followed by one of the letters above, is copied unchanged.
    pub fn pattern(&self, duration: &Duration, pattern: &str) -> String {
        let parts = duration.remainders();
        let mut out = String::with_capacity(pattern.len() + 8);
        let mut chars = pattern.chars().peekable();
        while let Some(c) = chars.next() {
            let unit = match (c, chars.peek()) {
                ('%', Some('d')) => Unit::Day,
                ('%', Some('h')) => Unit::Hour,
                ('%', Some('m')) => Unit::Minute,
                ('%', Some('s')) => Unit::Second,
                ('%', Some('l')) => Unit::Millisecond,
                _ => {
                    out.push(c);
                    continue;
                }
            };

            chars.next();
            out.push_str(&parts[unit.index()].to_string());
        }

        out
    }
}

impl Default for Formatter<'static> {
    fn default() -> Self {
        Formatter::with_locales(Locales::builtin())
    }
}

/// A [`Duration`] paired with a [`Style`], rendered by its `Display`
/// implementation. Obtained via [`Formatter::display()`].
#[derive(Debug, Clone, Copy)]
pub struct Styled<'a, 'r> {
    duration: &'a Duration,
    style: Style,
    locales: &'r Locales,
}

impl fmt::Display for Styled<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = self.duration.remainders();
        let table = self.locales.table(self.duration.locale());
        let mut first = true;
        for unit in Unit::ALL.into_iter().rev() {
            let value = parts[unit.index()];
            if value == 0.0 {
                continue;
            }

            if !first {
                f.write_str(" ")?;
            }

            // Only the singular/plural choice depends on the count.
            let label = table.get(unit).label(value as i64, self.style);
            if self.style.spaced() {
                write!(f, "{} {}", value, label)?;
            } else {
                write!(f, "{}{}", value, label)?;
            }

            first = false;
        }

        Ok(())
    }
}
