/// The total amount of every canonical unit in a [`Duration`], as returned by
/// [`Duration::to_json()`].
///
/// Each field is a _total_ view of the same duration, not a remainder, so the
/// fields must not be summed back together.
///
/// [`Duration`]: crate::Duration
/// [`Duration::to_json()`]: crate::Duration::to_json()
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Totals {
    /// Total milliseconds.
    pub milliseconds: f64,
    /// Total seconds.
    pub seconds: f64,
    /// Total minutes.
    pub minutes: f64,
    /// Total hours.
    pub hours: f64,
    /// Total days.
    pub days: f64,
}

impl Totals {
    /// The field names, in declaration order.
    pub const FIELDS: [&'static str; 5] = ["milliseconds", "seconds", "minutes", "hours", "days"];

    /// The field values, in the same order as [`Totals::FIELDS`].
    pub fn values(&self) -> [f64; 5] {
        [self.milliseconds, self.seconds, self.minutes, self.hours, self.days]
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use serde_test::{assert_ser_tokens, Token};

    use crate::Duration;

    #[test]
    fn serialize() {
        let totals = Duration::from_millis(90_000.0).to_json();
        assert_ser_tokens(&totals, &[
            Token::Struct { name: "Totals", len: 5 },
            Token::Str("milliseconds"),
            Token::F64(90_000.0),
            Token::Str("seconds"),
            Token::F64(90.0),
            Token::Str("minutes"),
            Token::F64(1.5),
            Token::Str("hours"),
            Token::F64(0.025),
            Token::Str("days"),
            Token::F64(90_000.0 / 86_400_000.0),
            Token::StructEnd,
        ]);
    }
}
