//! Strongly typed values appearing in fixture lines.

mod lang;
mod person;

pub use lang::*;
pub use person::*;

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use strum::{AsRefStr, Display, EnumIter, EnumString};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::FixtureErrorKind;

/// The closed enumerations a fixture token can be matched against.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum KeywordKind {
    /// See [`NameField`].
    NameField,
    /// See [`FieldModifier`].
    FieldModifier,
    /// See [`Length`].
    Length,
    /// See [`Usage`].
    Usage,
    /// See [`Formality`].
    Formality,
}

impl fmt::Display for KeywordKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Self::NameField => "name field",
            Self::FieldModifier => "field modifier",
            Self::Length => "length",
            Self::Usage => "usage",
            Self::Formality => "formality",
        })
    }
}

/// A member of a closed, case-insensitively matched enumeration.
pub trait Keyword: FromStr {
    /// The enumeration this keyword belongs to.
    const KIND: KeywordKind;
}

/// Match `token` against the members of `K`, ignoring ASCII case.
pub fn parse_keyword<K: Keyword>(token: &str) -> Result<K, FixtureErrorKind> {
    K::from_str(token).map_err(|_| FixtureErrorKind::UnknownKeyword {
        kind: K::KIND,
        token: token.to_string(),
    })
}

macro_rules! keywords {
    ($($(#[$attr:meta])* $name:ident => $kind:ident { $($variant:ident),* $(,)? })*) => {
        $(
            $(#[$attr])*
            #[derive(
                Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash,
                Display, EnumString, EnumIter, AsRefStr,
            )]
            #[strum(serialize_all = "camelCase", ascii_case_insensitive)]
            #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
            #[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
            #[allow(missing_docs)]
            pub enum $name {
                $($variant),*
            }

            impl Keyword for $name {
                const KIND: KeywordKind = KeywordKind::$kind;
            }
        )*
    };
}

keywords! {
    /// The role of a field in a person name.
    NameField => NameField {
        Title,
        Given,
        Given2,
        Surname,
        Surname2,
        Generation,
        Credentials,
    }

    /// A qualifier on a name field, e.g. the informal variant of a given name.
    FieldModifier => FieldModifier {
        Informal,
        Prefix,
        Core,
        AllCaps,
        InitialCap,
        Initial,
        Monogram,
        Retain,
    }

    /// How much of a name the formatter should produce.
    Length => Length {
        Long,
        Medium,
        Short,
    }

    /// What the formatted name is used for.
    Usage => Usage {
        Referring,
        Addressing,
        Monogram,
    }

    /// The register of the formatted name.
    Formality => Formality {
        Formal,
        Informal,
    }
}

/// An option changing the order of the formatted fields.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FormatOption {
    /// Surname first, for use in sorted lists.
    Sorting,
}

/// The parameters of one formatter invocation.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FormattingParameters {
    /// Either empty or `{sorting}`.
    pub options: BTreeSet<FormatOption>,
    /// The requested length.
    pub length: Length,
    /// The requested usage.
    pub usage: Usage,
    /// The requested formality.
    pub formality: Formality,
}

impl FormattingParameters {
    /// Parse the four arguments of a `parameters` line.
    pub fn parse(
        order: &str,
        length: &str,
        usage: &str,
        formality: &str,
    ) -> Result<Self, FixtureErrorKind> {
        Ok(Self {
            options: parse_order(order)?,
            length: parse_keyword(length)?,
            usage: parse_keyword(usage)?,
            formality: parse_keyword(formality)?,
        })
    }

    /// Whether surname-first sorting order is requested.
    pub fn is_sorting(&self) -> bool {
        self.options.contains(&FormatOption::Sorting)
    }
}

/// Map the order argument of a `parameters` line to its option set.
///
/// This is a closed choice between `sorting` and `n/a`, matched exactly.
pub fn parse_order(token: &str) -> Result<BTreeSet<FormatOption>, FixtureErrorKind> {
    match token {
        "sorting" => Ok(BTreeSet::from([FormatOption::Sorting])),
        "n/a" => Ok(BTreeSet::new()),
        _ => Err(FixtureErrorKind::UnknownOrderToken(token.to_string())),
    }
}

/// Displays an option set as `[sorting]` or `[]`.
pub struct DisplayOptions<'a>(pub &'a BTreeSet<FormatOption>);

impl fmt::Display for DisplayOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("[")?;
        for (i, option) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{option}")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use strum::IntoEnumIterator;

    use super::*;

    #[rstest]
    #[case("formal", Formality::Formal)]
    #[case("FORMAL", Formality::Formal)]
    #[case("Informal", Formality::Informal)]
    fn test_formality_case(#[case] token: &str, #[case] expected: Formality) {
        assert_eq!(parse_keyword::<Formality>(token), Ok(expected));
    }

    #[test]
    fn test_camel_case_members() {
        assert_eq!(parse_keyword::<FieldModifier>("allCaps"), Ok(FieldModifier::AllCaps));
        assert_eq!(parse_keyword::<FieldModifier>("ALLCAPS"), Ok(FieldModifier::AllCaps));
        assert_eq!(parse_keyword::<FieldModifier>("initialcap"), Ok(FieldModifier::InitialCap));
        assert_eq!(parse_keyword::<NameField>("Given2"), Ok(NameField::Given2));
        assert_eq!(FieldModifier::InitialCap.to_string(), "initialCap");
        assert_eq!(NameField::Surname2.as_ref(), "surname2");
    }

    #[test]
    fn test_every_member_round_trips() {
        for field in NameField::iter() {
            assert_eq!(parse_keyword::<NameField>(&field.to_string()), Ok(field));
        }
        for modifier in FieldModifier::iter() {
            assert_eq!(parse_keyword::<FieldModifier>(modifier.as_ref()), Ok(modifier));
        }
    }

    #[test]
    fn test_unknown_keyword() {
        assert_eq!(
            parse_keyword::<Usage>("shouting"),
            Err(FixtureErrorKind::UnknownKeyword {
                kind: KeywordKind::Usage,
                token: "shouting".into(),
            })
        );
        let err = parse_keyword::<NameField>("unknownfield").unwrap_err();
        assert_eq!(err.to_string(), "unknown name field `unknownfield`");
    }

    #[test]
    fn test_order() {
        assert_eq!(parse_order("sorting"), Ok(BTreeSet::from([FormatOption::Sorting])));
        assert_eq!(parse_order("n/a"), Ok(BTreeSet::new()));
        assert_eq!(
            parse_order("givenFirst"),
            Err(FixtureErrorKind::UnknownOrderToken("givenFirst".into()))
        );
        assert!(parse_order("SORTING").is_err());
    }

    #[test]
    fn test_parameters() {
        let params = FormattingParameters::parse("sorting", "short", "addressing", "informal")
            .unwrap();
        assert!(params.is_sorting());
        assert_eq!(params.length, Length::Short);
        assert_eq!(params.usage, Usage::Addressing);
        assert_eq!(params.formality, Formality::Informal);

        let upper = FormattingParameters::parse("n/a", "LONG", "Referring", "FORMAL").unwrap();
        let lower = FormattingParameters::parse("n/a", "long", "referring", "formal").unwrap();
        assert_eq!(upper, lower);
        assert!(!lower.is_sorting());
    }

    #[test]
    fn test_display_options() {
        let sorting = BTreeSet::from([FormatOption::Sorting]);
        assert_eq!(DisplayOptions(&sorting).to_string(), "[sorting]");
        assert_eq!(DisplayOptions(&BTreeSet::new()).to_string(), "[]");
    }
}
