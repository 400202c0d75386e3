use crate::unit::{MILLIS_PER_DAY, MILLIS_PER_HOUR, MILLIS_PER_MINUTE, MILLIS_PER_SECOND};
use crate::Duration;

/// A record of per-unit amounts, each of which may be fractional or negative.
///
/// `Components` is only a way to _describe_ a duration: converting it into a
/// [`Duration`] sums every field into a single count of milliseconds, and
/// which fields produced that count is forgotten.
///
/// # Example
///
/// ```rust
/// use udur::{Components, Duration};
///
/// let a = Duration::new(Components { hours: 1.5, ..Components::default() });
/// let b = Duration::new(Components { minutes: 90.0, ..Components::default() });
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Components {
    /// Days of exactly 24 hours.
    pub days: f64,
    /// Hours.
    pub hours: f64,
    /// Minutes.
    pub minutes: f64,
    /// Seconds.
    pub seconds: f64,
    /// Milliseconds.
    pub milliseconds: f64,
}

impl Components {
    /// The total number of milliseconds described by `self`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use udur::Components;
    ///
    /// let c = Components { minutes: 1.0, seconds: 0.5, ..Components::default() };
    /// assert_eq!(c.total_millis(), 60_500.0);
    /// ```
    pub fn total_millis(&self) -> f64 {
        self.milliseconds
            + MILLIS_PER_SECOND * self.seconds
            + MILLIS_PER_MINUTE * self.minutes
            + MILLIS_PER_HOUR * self.hours
            + MILLIS_PER_DAY * self.days
    }
}

/// Either a [`Duration`] or a [`Components`] record: the argument type of
/// [`Duration::add()`] and [`Duration::subtract()`].
///
/// Both convert into `DurationLike` via `From`, so callers pass either one
/// directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DurationLike {
    /// An existing duration.
    Duration(Duration),
    /// A record to be collapsed into milliseconds.
    Components(Components),
}

impl DurationLike {
    /// Normalizes `self` to a count of milliseconds.
    #[inline]
    pub fn millis(&self) -> f64 {
        match *self {
            DurationLike::Duration(ref duration) => duration.in_milliseconds(),
            DurationLike::Components(ref components) => components.total_millis(),
        }
    }
}

impl From<Duration> for DurationLike {
    #[inline]
    fn from(duration: Duration) -> Self {
        DurationLike::Duration(duration)
    }
}

impl From<&Duration> for DurationLike {
    #[inline]
    fn from(duration: &Duration) -> Self {
        DurationLike::Duration(*duration)
    }
}

impl From<Components> for DurationLike {
    #[inline]
    fn from(components: Components) -> Self {
        DurationLike::Components(components)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals() {
        let c = Components { days: 1.0, hours: 1.0, minutes: 1.0, seconds: 1.0, milliseconds: 1.0 };
        assert_eq!(c.total_millis(), 90_061_001.0);
        assert_eq!(Components::default().total_millis(), 0.0);

        let c = Components { hours: -1.0, minutes: 30.0, ..Components::default() };
        assert_eq!(c.total_millis(), -1_800_000.0);
    }

    #[test]
    fn normalization() {
        let d = Duration::from_millis(1500.0);
        assert_eq!(DurationLike::from(d).millis(), 1500.0);
        assert_eq!(DurationLike::from(&d).millis(), 1500.0);

        let c = Components { seconds: 1.5, ..Components::default() };
        assert_eq!(DurationLike::from(c).millis(), 1500.0);
    }
}
