//! Conversions between [`Duration`] and the durations and timestamps of the
//! `time` crate and the standard library.

use ::time::OffsetDateTime;

use crate::Duration;

impl Duration {
    /// Returns the signed span from `now` until `date`: positive when `date`
    /// lies in the future, negative when it lies in the past.
    ///
    /// When `now` is `None`, the current UTC time is used.
    ///
    /// # Example
    ///
    /// ```rust
    /// use time::macros::datetime;
    /// use udur::Duration;
    ///
    /// let now = datetime!(2024-03-01 12:00 UTC);
    /// let d = Duration::from_date(datetime!(2024-03-02 13:30 UTC), Some(now));
    /// assert_eq!(d.short(), "1d 1h 30m");
    ///
    /// let d = Duration::from_date(datetime!(2024-03-01 11:00 UTC), Some(now));
    /// assert_eq!(d.in_hours(), -1.0);
    /// ```
    pub fn from_date(date: OffsetDateTime, now: Option<OffsetDateTime>) -> Duration {
        let now = now.unwrap_or_else(OffsetDateTime::now_utc);
        Duration::from(date - now)
    }

    /// Converts `self` into a [`time::Duration`](::time::Duration), truncated
    /// to whole milliseconds. Values beyond the range of an `i64` saturate.
    ///
    /// # Example
    ///
    /// ```rust
    /// use udur::Duration;
    ///
    /// let d = Duration::from_millis(1500.75);
    /// assert_eq!(d.as_time(), time::Duration::milliseconds(1500));
    /// ```
    pub fn as_time(&self) -> ::time::Duration {
        ::time::Duration::milliseconds(self.in_milliseconds() as i64)
    }
}

impl From<::time::Duration> for Duration {
    fn from(value: ::time::Duration) -> Self {
        Duration::from_millis(value.whole_microseconds() as f64 / 1000.0)
    }
}

impl From<std::time::Duration> for Duration {
    fn from(value: std::time::Duration) -> Self {
        Duration::from_millis(value.as_micros() as f64 / 1000.0)
    }
}

impl From<Duration> for ::time::Duration {
    fn from(value: Duration) -> Self {
        value.as_time()
    }
}

impl PartialEq<::time::Duration> for Duration {
    fn eq(&self, other: &::time::Duration) -> bool {
        *self == Duration::from(*other)
    }
}

impl PartialEq<Duration> for ::time::Duration {
    fn eq(&self, other: &Duration) -> bool {
        Duration::from(*self) == *other
    }
}
