use thiserror::Error;

use crate::Unit;

/// Every way an operation on a [`Duration`](crate::Duration) can fail.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// An argument was outside of the operation's domain, such as a divisor of
    /// zero.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Something other than text was handed to the parser.
    #[error("expected a duration string, found {found}")]
    InvalidInputType {
        /// A description of the value that was found instead.
        found: String,
    },

    /// The input was text, but not text that is entirely made up of
    /// `<number><unit>` tokens.
    #[error("failed to parse {input:?} as a duration: {reason} at offset {offset}")]
    ParseFailure {
        /// The complete, original input.
        input: String,
        /// Byte offset into `input` where parsing stopped.
        offset: usize,
        /// What was expected at `offset`.
        reason: &'static str,
    },

    /// The unit name isn't one of the recognized aliases.
    #[error("unsupported unit {0:?}")]
    UnsupportedUnit(String),

    /// The locale code isn't one of the supported locales.
    #[error("unsupported locale {0:?}")]
    UnsupportedLocale(String),

    /// A locale table doesn't provide display strings for `unit`.
    #[error("locale table has no entry for {unit}")]
    MissingUnit {
        /// The unit without an entry.
        unit: Unit,
    },
}

impl Error {
    /// Returns `true` if `self` is a [`Error::ParseFailure`].
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, Error::ParseFailure { .. })
    }

    pub(crate) fn parse_failure(input: &str, offset: usize, reason: &'static str) -> Error {
        Error::ParseFailure { input: input.to_string(), offset, reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let err = Error::parse_failure("2 invalid units", 2, "expected a unit");
        assert!(err.is_parse_failure());
        assert_eq!(
            err.to_string(),
            "failed to parse \"2 invalid units\" as a duration: expected a unit at offset 2"
        );

        let err = Error::InvalidArgument("division by zero is not allowed");
        assert!(!err.is_parse_failure());
        assert_eq!(err.to_string(), "invalid argument: division by zero is not allowed");

        let err = Error::MissingUnit { unit: Unit::Hour };
        assert_eq!(err.to_string(), "locale table has no entry for hours");
    }
}
