//! Parsing free-form duration text.
//!
//! The grammar, informally:
//!
//! ```text
//! input   = ws* | ws* number ws* | ws* token (ws* token)* ws*
//! token   = number ws* unit
//! number  = sign? ( digit+ ( '.' digit+ )? | '.' digit+ )
//! sign    = '+' | '-'
//! unit    = 'milliseconds' | 'millisecond' | 'millis' | 'milli' | 'ms'
//!         | 'seconds' | 'second' | 'secs' | 'sec' | 's'
//!         | 'minutes' | 'minute' | 'mins' | 'min' | 'm'
//!         | 'hours' | 'hour' | 'hrs' | 'hr' | 'h'
//!         | 'days' | 'day' | 'd'
//! ws      = U+0020 | U+0009 | U+000A | U+000C | U+000D
//! ```
//!
//! Units are matched without regard to ASCII case, longest spelling first,
//! and must not run into further letters (`"3 months"` is rejected rather
//! than read as three minutes followed by garbage). Tokens may repeat units;
//! repeated units add up. A bare number is a count of milliseconds.

use crate::{Duration, Error, Unit};

/// A value parsed from the front of some input, along with the input that
/// remains after it.
#[derive(Debug)]
struct Parsed<'i, V> {
    value: V,
    input: &'i [u8],
}

/// Parses duration text into a [`Duration`].
///
/// This is what [`Duration::parse()`] and `str::parse::<Duration>()` use.
///
/// # Example
///
/// ```rust
/// use udur::Parser;
///
/// let p = Parser::new();
/// assert_eq!(p.parse("1h 30m")?.in_minutes(), 90.0);
/// assert_eq!(p.parse("1day2hours3minutes")?.minutes(), 3);
/// assert_eq!(p.parse("250")?.in_milliseconds(), 250.0);
/// assert!(p.parse("2 invalid units").is_err());
/// # Ok::<(), udur::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Parser {
    _private: (),
}

impl Parser {
    /// Creates a new parser.
    pub const fn new() -> Parser {
        Parser { _private: () }
    }

    /// Parses `input` into a single summed [`Duration`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::ParseFailure`] if any part of `input` other than
    /// whitespace isn't covered by a `<number><unit>` token. Nothing is
    /// returned for the parts that did parse.
    pub fn parse(&self, input: &str) -> Result<Duration, Error> {
        self.parse_bytes(input.as_bytes()).map_err(|(offset, reason)| {
            tracing::trace!(input, offset, reason, "failed to parse duration");
            Error::parse_failure(input, offset, reason)
        })
    }

    fn parse_bytes(&self, input: &[u8]) -> Result<Duration, (usize, &'static str)> {
        let offset = |rest: &[u8]| input.len() - rest.len();
        let trimmed = trim_whitespace(input);
        if trimmed.is_empty() {
            return Ok(Duration::ZERO);
        }

        // A lone number is a count of milliseconds. Anything else, including
        // a number that fails to parse, goes through the token loop below,
        // which reports errors with their offsets.
        if let Ok(Some(Parsed { value, input: tail })) = self.parse_number(trimmed) {
            if tail.is_empty() {
                return Ok(Duration::from_millis(value));
            }
        }

        let mut totals = [0.0_f64; 5];
        let mut rest = self.parse_optional_whitespace(input).input;
        while !rest.is_empty() {
            let parsed = self.parse_number(rest).map_err(|reason| (offset(rest), reason))?;
            let Some(Parsed { value, input }) = parsed else {
                return Err((offset(rest), "expected a number"));
            };

            let input = self.parse_optional_whitespace(input).input;
            let Parsed { value: unit, input } = self.parse_unit(input)
                .map_err(|reason| (offset(input), reason))?;

            totals[unit.index()] += value;
            rest = self.parse_optional_whitespace(input).input;
        }

        let millis = Unit::ALL.iter().map(|unit| totals[unit.index()] * unit.millis()).sum::<f64>();
        if !millis.is_finite() {
            return Err((0, "duration is out of range"));
        }

        Ok(Duration::from_millis(millis))
    }

    /// Parses an optionally signed decimal number from the start of `input`.
    ///
    /// Returns `Ok(None)` when `input` doesn't start with a number at all.
    fn parse_number<'i>(&self, input: &'i [u8]) -> Result<Option<Parsed<'i, f64>>, &'static str> {
        let mut end = match input.first() {
            Some(b'+' | b'-') => 1,
            _ => 0,
        };

        let integer_digits = count_digits(&input[end..]);
        end += integer_digits;

        let mut fraction_digits = 0;
        if input.get(end) == Some(&b'.') {
            fraction_digits = count_digits(&input[end + 1..]);
            if fraction_digits > 0 {
                end += 1 + fraction_digits;
            }
        }

        if integer_digits == 0 && fraction_digits == 0 {
            return Ok(None);
        }

        // Only ASCII signs, digits, and a dot were consumed.
        let text = std::str::from_utf8(&input[..end]).map_err(|_| "expected a number")?;
        match text.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(Some(Parsed { value, input: &input[end..] })),
            _ => Err("number is out of range"),
        }
    }

    /// Parses the longest unit alias at the start of `input`.
    fn parse_unit<'i>(&self, input: &'i [u8]) -> Result<Parsed<'i, Unit>, &'static str> {
        if input.is_empty() {
            return Err("expected a unit, but found end of input");
        }

        let (unit, len) = Unit::match_prefix(input).ok_or("expected a unit")?;
        let rest = &input[len..];
        if rest.first().map_or(false, u8::is_ascii_alphabetic) {
            return Err("unrecognized unit");
        }

        Ok(Parsed { value: unit, input: rest })
    }

    /// Parses zero or more bytes of ASCII whitespace.
    #[inline(always)]
    fn parse_optional_whitespace<'i>(&self, mut input: &'i [u8]) -> Parsed<'i, ()> {
        while input.first().map_or(false, is_whitespace) {
            input = &input[1..];
        }

        Parsed { value: (), input }
    }
}

fn count_digits(input: &[u8]) -> usize {
    input.iter().take_while(|b| b.is_ascii_digit()).count()
}

fn trim_whitespace(mut input: &[u8]) -> &[u8] {
    while input.first().map_or(false, is_whitespace) {
        input = &input[1..];
    }

    while input.last().map_or(false, is_whitespace) {
        input = &input[..input.len() - 1];
    }

    input
}

/// Returns true if the byte is ASCII whitespace.
fn is_whitespace(byte: &u8) -> bool {
    matches!(*byte, b' ' | b'\t' | b'\n' | b'\r' | b'\x0C')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> Duration {
        Parser::new().parse(s).unwrap()
    }

    fn fail(s: &str) -> (usize, &'static str) {
        match Parser::new().parse(s) {
            Err(Error::ParseFailure { input, offset, reason }) => {
                assert_eq!(input, s);
                (offset, reason)
            }
            other => panic!("expected {:?} to fail, got {:?}", s, other),
        }
    }

    #[test]
    fn empty_is_zero() {
        assert!(p("").is_zero());
        assert!(p("   ").is_zero());
        assert!(p("\t\n").is_zero());
    }

    #[test]
    fn bare_numbers_are_milliseconds() {
        assert_eq!(p("1000").in_milliseconds(), 1000.0);
        assert_eq!(p("1000").seconds(), 1);
        assert_eq!(p(" 1.5 ").in_milliseconds(), 1.5);
        assert_eq!(p("-250").in_milliseconds(), -250.0);
        assert_eq!(p("+.5").in_milliseconds(), 0.5);
        assert_eq!(p("0").in_milliseconds(), 0.0);
    }

    #[test]
    fn single_tokens() {
        assert_eq!(p("5ms").in_milliseconds(), 5.0);
        assert_eq!(p("5 milli").in_milliseconds(), 5.0);
        assert_eq!(p("5 millis").in_milliseconds(), 5.0);
        assert_eq!(p("5 millisecond").in_milliseconds(), 5.0);
        assert_eq!(p("5s").in_seconds(), 5.0);
        assert_eq!(p("5 SECS").in_seconds(), 5.0);
        assert_eq!(p("5m").in_minutes(), 5.0);
        assert_eq!(p("5 Minutes").in_minutes(), 5.0);
        assert_eq!(p("5hr").in_hours(), 5.0);
        assert_eq!(p("5 hrs").in_hours(), 5.0);
        assert_eq!(p("5d").in_days(), 5.0);
        assert_eq!(p("1 day").in_days(), 1.0);
    }

    #[test]
    fn tokens_sum() {
        let d = p("1h 30m 2h 15m");
        assert_eq!(d.hours(), 3);
        assert_eq!(d.minutes(), 45);
        assert_eq!(d.in_minutes(), 225.0);

        let d = p("1day2hours3minutes");
        assert_eq!((d.days(), d.hours(), d.minutes()), (1, 2, 3));

        let d = p("  2d\t4h   5 m 6s 7ms  ");
        assert_eq!((d.days(), d.hours(), d.minutes(), d.seconds()), (2, 4, 5, 6));
        assert_eq!(d.milliseconds(), 7.0);

        assert_eq!(p("1s2000ms").in_seconds(), 3.0);
        assert_eq!(p("1h -30m").in_minutes(), 30.0);
    }

    #[test]
    fn decimals_convert_by_ratio() {
        let d = p("1.5 hours");
        assert_eq!(d.in_hours(), 1.5);
        assert_eq!(d.hours(), 1);
        assert_eq!(d.minutes(), 30);

        let d = p("2.5d 0.25s");
        assert_eq!((d.days(), d.hours()), (2, 12));
        assert_eq!(d.milliseconds(), 250.0);

        assert_eq!(p(".5m").in_seconds(), 30.0);
    }

    #[test]
    fn longest_alias_wins() {
        assert_eq!(p("3ms").in_milliseconds(), 3.0);
        assert_eq!(p("3min").in_minutes(), 3.0);
        assert_eq!(p("3m3s").in_seconds(), 183.0);
        assert_eq!(p("3mins3ms").in_milliseconds(), 180_003.0);
    }

    #[test]
    fn failures() {
        assert_eq!(fail("hello world"), (0, "expected a number"));
        assert_eq!(fail("2 invalid units"), (2, "expected a unit"));
        assert_eq!(fail("1h 30"), (5, "expected a unit, but found end of input"));
        assert_eq!(fail("1h30m extra"), (6, "expected a number"));
        assert_eq!(fail("3 months"), (2, "unrecognized unit"));
        assert_eq!(fail("1hours2"), (7, "expected a unit, but found end of input"));
        assert_eq!(fail("1h, 30m"), (2, "expected a number"));
        assert_eq!(fail("5."), (1, "expected a unit"));
        assert_eq!(fail("h"), (0, "expected a number"));
        assert_eq!(fail("- 5s"), (0, "expected a number"));
        assert_eq!(fail("1 week"), (2, "expected a unit"));
    }

    #[test]
    fn failures_are_all_or_nothing() {
        let err = Parser::new().parse("1h 2x").unwrap_err();
        assert!(err.is_parse_failure());
    }

    #[test]
    fn huge_numbers_are_rejected() {
        let digits = "9".repeat(400);
        assert_eq!(fail(&digits), (0, "number is out of range"));
        assert_eq!(fail(&format!("{}d", digits)), (0, "number is out of range"));
        assert_eq!(fail(&format!("1h {}d", digits)), (3, "number is out of range"));
    }

    #[test]
    fn non_ascii_input() {
        assert_eq!(fail("5 ñs"), (2, "expected a unit"));
        assert_eq!(fail("５s"), (0, "expected a number"));
    }
}
