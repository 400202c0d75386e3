use std::fmt;

use serde::de::{self, Deserialize, Deserializer, EnumAccess, MapAccess, SeqAccess, Unexpected, Visitor};
use serde::ser::{Serialize, Serializer};

use crate::{Duration, Error};

#[cfg_attr(all(nightly, doc), doc(cfg(feature = "serde")))]
impl Serialize for Duration {
    /// Serializes as a string of milliseconds, `"<n>ms"`, which the parser
    /// reads back unchanged.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&format_args!("{}ms", self.in_milliseconds()))
    }
}

#[cfg_attr(all(nightly, doc), doc(cfg(feature = "serde")))]
impl<'de> Deserialize<'de> for Duration {
    /// Deserializes from any duration text the [`Parser`](crate::Parser)
    /// accepts. Non-string values fail with [`Error::InvalidInputType`].
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(DurationVisitor)
    }
}

struct DurationVisitor;

impl DurationVisitor {
    fn invalid<E: de::Error>(found: impl fmt::Display) -> E {
        E::custom(Error::InvalidInputType { found: found.to_string() })
    }
}

impl<'de> Visitor<'de> for DurationVisitor {
    type Value = Duration;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a duration string such as \"1h 30m\"")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Duration, E> {
        Duration::parse(v).map_err(E::custom)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Duration, E> {
        Err(Self::invalid(Unexpected::Bool(v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Duration, E> {
        Err(Self::invalid(Unexpected::Signed(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Duration, E> {
        Err(Self::invalid(Unexpected::Unsigned(v)))
    }

    fn visit_i128<E: de::Error>(self, v: i128) -> Result<Duration, E> {
        Err(Self::invalid(format_args!("integer `{}`", v)))
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<Duration, E> {
        Err(Self::invalid(format_args!("integer `{}`", v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Duration, E> {
        Err(Self::invalid(Unexpected::Float(v)))
    }

    fn visit_char<E: de::Error>(self, v: char) -> Result<Duration, E> {
        Err(Self::invalid(Unexpected::Char(v)))
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Duration, E> {
        Err(Self::invalid(Unexpected::Bytes(v)))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Duration, E> {
        Err(Self::invalid(Unexpected::Unit))
    }

    fn visit_none<E: de::Error>(self) -> Result<Duration, E> {
        Err(Self::invalid(Unexpected::Option))
    }

    fn visit_some<D: Deserializer<'de>>(self, _: D) -> Result<Duration, D::Error> {
        Err(Self::invalid(Unexpected::Option))
    }

    fn visit_newtype_struct<D: Deserializer<'de>>(self, _: D) -> Result<Duration, D::Error> {
        Err(Self::invalid(Unexpected::NewtypeStruct))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, _: A) -> Result<Duration, A::Error> {
        Err(Self::invalid(Unexpected::Seq))
    }

    fn visit_map<A: MapAccess<'de>>(self, _: A) -> Result<Duration, A::Error> {
        Err(Self::invalid(Unexpected::Map))
    }

    fn visit_enum<A: EnumAccess<'de>>(self, _: A) -> Result<Duration, A::Error> {
        Err(Self::invalid(Unexpected::Enum))
    }
}

#[cfg(test)]
mod tests {
    use serde::de::value::{self, StrDeserializer};
    use serde::de::{IntoDeserializer, Visitor};
    use serde_test::{assert_de_tokens, assert_de_tokens_error, assert_tokens, Token};

    use super::DurationVisitor;
    use crate::{Components, Duration};

    #[test]
    fn round_trip() {
        let d = Duration::new(Components { hours: 1.0, minutes: 30.0, ..Components::default() });
        assert_tokens(&d, &[Token::Str("5400000ms")]);
        assert_tokens(&Duration::from_millis(-1.5), &[Token::Str("-1.5ms")]);
        assert_tokens(&Duration::ZERO, &[Token::Str("0ms")]);
    }

    #[test]
    fn deserialize_text() {
        let d = Duration::new(Components { hours: 1.0, minutes: 30.0, ..Components::default() });
        assert_de_tokens(&d, &[Token::Str("1h 30m")]);
        assert_de_tokens(&d, &[Token::BorrowedStr("1.5 hours")]);
        assert_de_tokens(&d, &[Token::String("90 minutes")]);
        assert_de_tokens(&Duration::from_millis(250.0), &[Token::Str("250")]);
    }

    #[test]
    fn deserialize_errors() {
        assert_de_tokens_error::<Duration>(
            &[Token::Str("2 invalid units")],
            "failed to parse \"2 invalid units\" as a duration: expected a unit at offset 2",
        );

        assert_de_tokens_error::<Duration>(
            &[Token::I64(5)],
            "expected a duration string, found integer `5`",
        );

        assert_de_tokens_error::<Duration>(
            &[Token::Bool(true)],
            "expected a duration string, found boolean `true`",
        );

        assert_de_tokens_error::<Duration>(
            &[Token::Unit],
            "expected a duration string, found unit value",
        );

        assert_de_tokens_error::<Duration>(
            &[Token::Seq { len: Some(0) }, Token::SeqEnd],
            "expected a duration string, found sequence",
        );

        assert_de_tokens_error::<Duration>(
            &[Token::Map { len: Some(0) }, Token::MapEnd],
            "expected a duration string, found map",
        );
    }

    #[test]
    fn deserialize_wrapped_and_exotic_values() {
        assert_de_tokens_error::<Duration>(
            &[Token::Char('5')],
            "expected a duration string, found character `5`",
        );

        assert_de_tokens_error::<Duration>(
            &[Token::Some, Token::Str("1h")],
            "expected a duration string, found Option value",
        );

        assert_de_tokens_error::<Duration>(
            &[Token::None],
            "expected a duration string, found Option value",
        );

        assert_de_tokens_error::<Duration>(
            &[Token::NewtypeStruct { name: "Wrapper" }, Token::Str("1h")],
            "expected a duration string, found newtype struct",
        );

        let variant: StrDeserializer<'_, value::Error> = "A".into_deserializer();
        let err = DurationVisitor.visit_enum(variant).unwrap_err();
        assert_eq!(err.to_string(), "expected a duration string, found enum");

        let err = DurationVisitor.visit_i128::<value::Error>(-(1 << 100)).unwrap_err();
        assert_eq!(err.to_string(), "expected a duration string, found integer `-1267650600228229401496703205376`");
        let err = DurationVisitor.visit_u128::<value::Error>(u128::MAX).unwrap_err();
        assert_eq!(err.to_string(), format!("expected a duration string, found integer `{}`", u128::MAX));
    }

    #[test]
    fn saturated_durations_round_trip() {
        let text = format!("{}ms", f64::MAX);
        assert_eq!(Duration::parse(&text).unwrap(), Duration::MAX);

        let text: &'static str = Box::leak(text.into_boxed_str());
        assert_tokens(&Duration::MAX, &[Token::Str(text)]);
        assert_tokens(&Duration::from_millis(f64::INFINITY), &[Token::Str(text)]);
    }
}
