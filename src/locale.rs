//! Localized unit names.
//!
//! Formatting looks unit labels up in a [`Locales`] registry: a table of
//! [`UnitEntry`] values per [`Locale`]. The registry always holds an English
//! table, and lookups for any locale the registry doesn't hold fall back to
//! it. A [`UnitTable`] can only be built when every [`Unit`] has an entry, so a
//! lookup never comes back blank.
//!
//! The built-in registry, available through [`Locales::builtin()`], covers
//! English, Spanish, French, and German. Custom registries start from
//! [`Locales::new()`] or [`Locales::from_english()`] and are handed to a
//! [`Formatter`](crate::Formatter).

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::{Error, Style, Unit};

/// A display locale for formatting.
///
/// The default locale is [`Locale::En`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Locale {
    /// English, `en`.
    #[default]
    En,
    /// Spanish, `es`.
    Es,
    /// French, `fr`.
    Fr,
    /// German, `de`.
    De,
}

impl Locale {
    /// Every supported locale.
    pub const ALL: [Locale; 4] = [Locale::En, Locale::Es, Locale::Fr, Locale::De];

    /// The two-letter language code of `self`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use udur::Locale;
    ///
    /// assert_eq!(Locale::Fr.code(), "fr");
    /// ```
    pub const fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Es => "es",
            Locale::Fr => "fr",
            Locale::De => "de",
        }
    }

    /// Resolves `code` to a locale, falling back to [`Locale::En`] when the
    /// code isn't recognized. Use [`str::parse()`] for a fallible lookup.
    ///
    /// Region subtags are ignored, so `"fr-CA"` and `"es_MX"` resolve to
    /// French and Spanish.
    ///
    /// # Example
    ///
    /// ```rust
    /// use udur::Locale;
    ///
    /// assert_eq!(Locale::from_code("de"), Locale::De);
    /// assert_eq!(Locale::from_code("pt-BR"), Locale::En);
    /// ```
    pub fn from_code(code: &str) -> Locale {
        code.parse().unwrap_or_else(|_| {
            tracing::debug!(code, "unsupported locale, falling back to en");
            Locale::En
        })
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Locale, Error> {
        let language = s.trim().split(['-', '_']).next().unwrap_or("");
        Locale::ALL.iter()
            .copied()
            .find(|locale| locale.code().eq_ignore_ascii_case(language))
            .ok_or_else(|| Error::UnsupportedLocale(s.to_string()))
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The display strings for one unit in one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitEntry {
    /// Long form, used when the count is exactly one: `"hour"`.
    pub singular: Cow<'static, str>,
    /// Long form for every other count: `"hours"`.
    pub plural: Cow<'static, str>,
    /// Fixed abbreviation that never pluralizes: `"h"`.
    pub short: Cow<'static, str>,
    /// Abbreviation used when the count is exactly one: `"hr"`.
    pub medium: Cow<'static, str>,
    /// Abbreviation for every other count. When absent, it is derived from
    /// `medium`, see [`UnitEntry::medium_plural()`].
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub medium_plural: Option<Cow<'static, str>>,
}

impl UnitEntry {
    /// Creates an entry whose medium plural is derived from `medium`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use udur::UnitEntry;
    ///
    /// let entry = UnitEntry::new("hour", "hours", "h", "hr");
    /// assert_eq!(entry.medium_plural(), "hrs");
    /// ```
    pub const fn new(
        singular: &'static str,
        plural: &'static str,
        short: &'static str,
        medium: &'static str,
    ) -> UnitEntry {
        UnitEntry {
            singular: Cow::Borrowed(singular),
            plural: Cow::Borrowed(plural),
            short: Cow::Borrowed(short),
            medium: Cow::Borrowed(medium),
            medium_plural: None,
        }
    }

    /// Creates an entry with an explicit medium plural, for abbreviations that
    /// don't take an `s`.
    pub const fn inflected(
        singular: &'static str,
        plural: &'static str,
        short: &'static str,
        medium: &'static str,
        medium_plural: &'static str,
    ) -> UnitEntry {
        UnitEntry {
            singular: Cow::Borrowed(singular),
            plural: Cow::Borrowed(plural),
            short: Cow::Borrowed(short),
            medium: Cow::Borrowed(medium),
            medium_plural: Some(Cow::Borrowed(medium_plural)),
        }
    }

    /// The medium abbreviation for counts other than one.
    ///
    /// Without an explicit value, an `s` is appended to `medium` unless it
    /// already ends in one, so `"sec"` becomes `"secs"` and `"ms"` stays
    /// `"ms"`.
    pub fn medium_plural(&self) -> Cow<'_, str> {
        match self.medium_plural {
            Some(ref plural) => Cow::Borrowed(&**plural),
            None if self.medium.ends_with(['s', 'S']) => Cow::Borrowed(&*self.medium),
            None => Cow::Owned(format!("{}s", self.medium)),
        }
    }

    /// The label for `count` of this unit in the given `style`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use udur::{Style, UnitEntry};
    ///
    /// let entry = UnitEntry::new("minute", "minutes", "m", "min");
    /// assert_eq!(entry.label(1, Style::Long), "minute");
    /// assert_eq!(entry.label(2, Style::Long), "minutes");
    /// assert_eq!(entry.label(2, Style::Medium), "mins");
    /// assert_eq!(entry.label(2, Style::Short), "m");
    /// ```
    pub fn label(&self, count: i64, style: Style) -> Cow<'_, str> {
        match (style, count == 1) {
            (Style::Short, _) => Cow::Borrowed(&*self.short),
            (Style::Medium, true) => Cow::Borrowed(&*self.medium),
            (Style::Medium, false) => self.medium_plural(),
            (Style::Long, true) => Cow::Borrowed(&*self.singular),
            (Style::Long, false) => Cow::Borrowed(&*self.plural),
        }
    }
}

/// A complete set of [`UnitEntry`] values: exactly one per [`Unit`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(
    try_from = "HashMap<Unit, UnitEntry>",
    into = "std::collections::BTreeMap<Unit, UnitEntry>"
))]
pub struct UnitTable {
    entries: [UnitEntry; 5],
}

impl UnitTable {
    /// Builds a table from `(unit, entry)` pairs. A later pair for the same
    /// unit replaces an earlier one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingUnit`] naming the smallest unit without an
    /// entry.
    ///
    /// # Example
    ///
    /// ```rust
    /// use udur::{Error, Unit, UnitEntry, UnitTable};
    ///
    /// let partial = [(Unit::Hour, UnitEntry::new("hour", "hours", "h", "hr"))];
    /// let err = UnitTable::from_entries(partial).unwrap_err();
    /// assert_eq!(err, Error::MissingUnit { unit: Unit::Millisecond });
    /// ```
    pub fn from_entries<I>(entries: I) -> Result<UnitTable, Error>
        where I: IntoIterator<Item = (Unit, UnitEntry)>
    {
        let mut slots: [Option<UnitEntry>; 5] = Default::default();
        for (unit, entry) in entries {
            slots[unit.index()] = Some(entry);
        }

        let take = |slot: Option<UnitEntry>, unit| slot.ok_or(Error::MissingUnit { unit });
        let [ms, s, m, h, d] = slots;
        Ok(UnitTable {
            entries: [
                take(ms, Unit::Millisecond)?,
                take(s, Unit::Second)?,
                take(m, Unit::Minute)?,
                take(h, Unit::Hour)?,
                take(d, Unit::Day)?,
            ],
        })
    }

    /// The entry for `unit`.
    #[inline]
    pub fn get(&self, unit: Unit) -> &UnitEntry {
        &self.entries[unit.index()]
    }

    /// Iterates over `(unit, entry)` pairs, smallest unit first.
    pub fn iter(&self) -> impl Iterator<Item = (Unit, &UnitEntry)> + '_ {
        Unit::ALL.into_iter().zip(self.entries.iter())
    }
}

impl TryFrom<HashMap<Unit, UnitEntry>> for UnitTable {
    type Error = Error;

    fn try_from(map: HashMap<Unit, UnitEntry>) -> Result<UnitTable, Error> {
        UnitTable::from_entries(map)
    }
}

impl From<UnitTable> for std::collections::BTreeMap<Unit, UnitEntry> {
    fn from(table: UnitTable) -> Self {
        Unit::ALL.into_iter().zip(table.entries).collect()
    }
}

/// A registry of unit tables keyed by [`Locale`].
///
/// The English table is always present; lookups for a locale without a table
/// use it instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locales {
    en: UnitTable,
    others: HashMap<Locale, UnitTable>,
}

impl Locales {
    /// A registry holding the built-in tables for every [`Locale`].
    pub fn new() -> Locales {
        let mut locales = Locales::from_english(EN.clone());
        locales.insert(Locale::Es, ES.clone());
        locales.insert(Locale::Fr, FR.clone());
        locales.insert(Locale::De, DE.clone());
        locales
    }

    /// A registry holding only `en` as its English table. Every other locale
    /// falls back to it until a table is [inserted](Locales::insert()).
    ///
    /// # Example
    ///
    /// ```rust
    /// use udur::{Locale, Locales};
    ///
    /// let locales = Locales::from_english(Locales::builtin().table(Locale::En).clone());
    /// assert!(locales.is_supported("en"));
    /// assert!(!locales.is_supported("fr"));
    /// ```
    pub fn from_english(en: UnitTable) -> Locales {
        Locales { en, others: HashMap::new() }
    }

    /// The shared registry of built-in tables. It is built on first use and
    /// never changes afterwards.
    pub fn builtin() -> &'static Locales {
        static BUILTIN: OnceLock<Locales> = OnceLock::new();
        BUILTIN.get_or_init(Locales::new)
    }

    /// Adds or replaces the table for `locale`, returning the previous one.
    pub fn insert(&mut self, locale: Locale, table: UnitTable) -> Option<UnitTable> {
        match locale {
            Locale::En => Some(std::mem::replace(&mut self.en, table)),
            other => self.others.insert(other, table),
        }
    }

    /// Returns `true` if the registry holds a table for `locale`.
    pub fn contains(&self, locale: Locale) -> bool {
        locale == Locale::En || self.others.contains_key(&locale)
    }

    /// Returns `true` if `code` names a locale the registry holds a table for.
    ///
    /// # Example
    ///
    /// ```rust
    /// use udur::Locales;
    ///
    /// let locales = Locales::builtin();
    /// assert!(locales.is_supported("es"));
    /// assert!(locales.is_supported("DE"));
    /// assert!(!locales.is_supported("ja"));
    /// ```
    pub fn is_supported(&self, code: &str) -> bool {
        code.parse::<Locale>().map_or(false, |locale| self.contains(locale))
    }

    /// The locales with a table in the registry.
    pub fn supported(&self) -> impl Iterator<Item = Locale> + '_ {
        Locale::ALL.into_iter().filter(move |&locale| self.contains(locale))
    }

    /// The table for `locale`, or the English table if there is none.
    pub fn table(&self, locale: Locale) -> &UnitTable {
        match locale {
            Locale::En => &self.en,
            other => self.others.get(&other).unwrap_or(&self.en),
        }
    }

    /// The label for `count` of `unit` in `style` and `locale`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use udur::{Locale, Locales, Style, Unit};
    ///
    /// let locales = Locales::builtin();
    /// assert_eq!(locales.unit_label(Unit::Hour, 2, Style::Long, Locale::Es), "horas");
    /// assert_eq!(locales.unit_label(Unit::Day, 1, Style::Short, Locale::Fr), "j");
    /// assert_eq!(locales.unit_label(Unit::Day, 2, Style::Medium, Locale::De), "Tage");
    /// ```
    pub fn unit_label(&self, unit: Unit, count: i64, style: Style, locale: Locale) -> Cow<'_, str> {
        self.table(locale).get(unit).label(count, style)
    }
}

impl Default for Locales {
    fn default() -> Self {
        Locales::new()
    }
}

static EN: UnitTable = UnitTable {
    entries: [
        UnitEntry::new("millisecond", "milliseconds", "ms", "ms"),
        UnitEntry::new("second", "seconds", "s", "sec"),
        UnitEntry::new("minute", "minutes", "m", "min"),
        UnitEntry::new("hour", "hours", "h", "hr"),
        UnitEntry::new("day", "days", "d", "day"),
    ],
};

static ES: UnitTable = UnitTable {
    entries: [
        UnitEntry::new("milisegundo", "milisegundos", "ms", "ms"),
        UnitEntry::new("segundo", "segundos", "s", "seg"),
        UnitEntry::new("minuto", "minutos", "m", "min"),
        UnitEntry::new("hora", "horas", "h", "hr"),
        UnitEntry::new("día", "días", "d", "día"),
    ],
};

static FR: UnitTable = UnitTable {
    entries: [
        UnitEntry::new("milliseconde", "millisecondes", "ms", "ms"),
        UnitEntry::new("seconde", "secondes", "s", "sec"),
        UnitEntry::new("minute", "minutes", "m", "min"),
        UnitEntry::new("heure", "heures", "h", "hr"),
        UnitEntry::new("jour", "jours", "j", "jr"),
    ],
};

// German abbreviations don't inflect, except for "Tag".
static DE: UnitTable = UnitTable {
    entries: [
        UnitEntry::new("Millisekunde", "Millisekunden", "Ms", "Ms"),
        UnitEntry::inflected("Sekunde", "Sekunden", "S", "Sek", "Sek"),
        UnitEntry::inflected("Minute", "Minuten", "M", "Min", "Min"),
        UnitEntry::inflected("Stunde", "Stunden", "St", "Std", "Std"),
        UnitEntry::inflected("Tag", "Tage", "T", "Tag", "Tage"),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_codes() {
        assert_eq!("en".parse::<Locale>(), Ok(Locale::En));
        assert_eq!("FR".parse::<Locale>(), Ok(Locale::Fr));
        assert_eq!("es_MX".parse::<Locale>(), Ok(Locale::Es));
        assert_eq!("de-AT".parse::<Locale>(), Ok(Locale::De));
        assert_eq!("xx".parse::<Locale>(), Err(Error::UnsupportedLocale("xx".into())));
        assert_eq!("".parse::<Locale>(), Err(Error::UnsupportedLocale("".into())));

        assert_eq!(Locale::from_code("xx"), Locale::En);
        assert_eq!(Locale::from_code("es"), Locale::Es);
        assert_eq!(Locale::default(), Locale::En);
    }

    #[test]
    fn medium_pluralization() {
        let locales = Locales::builtin();
        let label = |unit, count| locales.unit_label(unit, count, Style::Medium, Locale::En);

        assert_eq!(label(Unit::Millisecond, 250), "ms");
        assert_eq!(label(Unit::Second, 1), "sec");
        assert_eq!(label(Unit::Second, 15), "secs");
        assert_eq!(label(Unit::Minute, 30), "mins");
        assert_eq!(label(Unit::Hour, 2), "hrs");
        assert_eq!(label(Unit::Day, 1), "day");
        assert_eq!(label(Unit::Day, 0), "days");

        let label = |unit, count| locales.unit_label(unit, count, Style::Medium, Locale::De);
        assert_eq!(label(Unit::Hour, 2), "Std");
        assert_eq!(label(Unit::Millisecond, 2), "Ms");
    }

    #[test]
    fn long_pluralization() {
        let locales = Locales::builtin();
        assert_eq!(locales.unit_label(Unit::Day, 1, Style::Long, Locale::Fr), "jour");
        assert_eq!(locales.unit_label(Unit::Day, 3, Style::Long, Locale::Fr), "jours");
        assert_eq!(locales.unit_label(Unit::Second, -1, Style::Long, Locale::Es), "segundos");
        assert_eq!(locales.unit_label(Unit::Minute, 1, Style::Long, Locale::De), "Minute");
    }

    #[test]
    fn missing_locale_falls_back_to_english() {
        let mut locales = Locales::from_english(EN.clone());
        assert!(!locales.contains(Locale::Es));
        assert_eq!(locales.unit_label(Unit::Hour, 2, Style::Long, Locale::Es), "hours");
        assert_eq!(locales.supported().collect::<Vec<_>>(), vec![Locale::En]);

        assert!(locales.insert(Locale::Es, ES.clone()).is_none());
        assert_eq!(locales.unit_label(Unit::Hour, 2, Style::Long, Locale::Es), "horas");
        assert!(locales.is_supported("es"));
    }

    #[test]
    fn replacing_english() {
        let mut locales = Locales::new();
        let shouting = UnitTable::from_entries(EN.iter().map(|(unit, entry)| {
            let mut entry = entry.clone();
            entry.plural = entry.plural.to_uppercase().into();
            (unit, entry)
        })).unwrap();

        let previous = locales.insert(Locale::En, shouting);
        assert_eq!(previous.as_ref(), Some(&EN));
        assert_eq!(locales.unit_label(Unit::Hour, 2, Style::Long, Locale::En), "HOURS");
    }

    #[test]
    fn incomplete_tables_are_rejected() {
        let entries = EN.iter()
            .filter(|&(unit, _)| unit != Unit::Minute)
            .map(|(unit, entry)| (unit, entry.clone()));

        assert_eq!(UnitTable::from_entries(entries), Err(Error::MissingUnit { unit: Unit::Minute }));
        assert_eq!(UnitTable::from_entries(std::iter::empty()), Err(Error::MissingUnit { unit: Unit::Millisecond }));

        let complete = EN.iter().map(|(unit, entry)| (unit, entry.clone()));
        assert_eq!(UnitTable::from_entries(complete).as_ref(), Ok(&EN));
    }

    #[test]
    fn builtin_has_every_locale() {
        let locales = Locales::builtin();
        for locale in Locale::ALL {
            assert!(locales.contains(locale));
            assert!(locales.is_supported(locale.code()));
        }
    }

    #[test]
    #[cfg(feature = "serde")]
    fn deserialize_tables() {
        use serde_test::{assert_de_tokens_error, Token};

        let entry = [
            Token::Struct { name: "UnitEntry", len: 4 },
            Token::Str("singular"), Token::Str("heure"),
            Token::Str("plural"), Token::Str("heures"),
            Token::Str("short"), Token::Str("h"),
            Token::Str("medium"), Token::Str("hr"),
            Token::StructEnd,
        ];

        let mut tokens = vec![Token::Map { len: Some(1) }, Token::UnitVariant { name: "Unit", variant: "hour" }];
        tokens.extend_from_slice(&entry);
        tokens.push(Token::MapEnd);

        assert_de_tokens_error::<UnitTable>(&tokens, "locale table has no entry for milliseconds");
    }
}
