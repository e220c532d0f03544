use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{parse_keyword, FieldModifier, LocaleTag, NameField};
use crate::tokenize::{split_subtokens, MODIFIER_SEPARATOR};
use crate::FixtureErrorKind;

/// One `name` line: a value for a field, qualified by a set of modifiers.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FieldAssignment {
    /// The base field, e.g. `given`.
    pub field: NameField,
    /// The modifiers, e.g. `{informal}` for `given-informal`.
    pub modifiers: BTreeSet<FieldModifier>,
    /// The field value.
    pub value: String,
}

impl FieldAssignment {
    /// Parse a field specifier such as `given-informal` and attach `value`.
    ///
    /// The first dash-separated part is the base field, every further part is
    /// a modifier. Repeated modifiers collapse.
    pub fn parse(spec: &str, value: &str) -> Result<Self, FixtureErrorKind> {
        let mut parts = split_subtokens(spec, MODIFIER_SEPARATOR).into_iter();
        let field = parse_keyword(parts.next().unwrap_or_default())?;
        let modifiers = parts
            .map(parse_keyword::<FieldModifier>)
            .collect::<Result<_, _>>()?;
        Ok(Self { field, modifiers, value: value.to_string() })
    }

    /// Whether this assignment carries no modifiers.
    pub fn is_plain(&self) -> bool {
        self.modifiers.is_empty()
    }
}

impl Display for FieldAssignment {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.field)?;
        for modifier in &self.modifiers {
            write!(f, "-{modifier}")?;
        }
        write!(f, "={}", self.value)
    }
}

/// A structured person name as declared by a run of `name` lines.
///
/// Built by a [`PersonNameBuilder`] and immutable afterwards.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PersonName {
    locale: LocaleTag,
    fields: Vec<FieldAssignment>,
}

impl PersonName {
    /// Start building a name whose locale defaults to `locale`.
    pub fn builder(locale: LocaleTag) -> PersonNameBuilder {
        PersonNameBuilder::new(locale)
    }

    /// The locale of the name itself.
    pub fn locale(&self) -> &LocaleTag {
        &self.locale
    }

    /// All field assignments, in declaration order.
    pub fn fields(&self) -> &[FieldAssignment] {
        &self.fields
    }

    /// The value of the last assignment with exactly this field and these
    /// modifiers.
    pub fn get(&self, field: NameField, modifiers: &BTreeSet<FieldModifier>) -> Option<&str> {
        self.fields
            .iter()
            .rev()
            .find(|a| a.field == field && &a.modifiers == modifiers)
            .map(|a| a.value.as_str())
    }

    /// The value of a field, preferring an unmodified assignment and falling
    /// back to any modified one.
    pub fn field(&self, field: NameField) -> Option<&str> {
        let mut matching = self.fields.iter().rev().filter(|a| a.field == field);
        let fallback = matching.clone().next();
        matching.find(|a| a.is_plain()).or(fallback).map(|a| a.value.as_str())
    }

    /// The value of a field with a single modifier, if declared.
    pub fn field_with(&self, field: NameField, modifier: FieldModifier) -> Option<&str> {
        self.get(field, &BTreeSet::from([modifier]))
    }
}

impl Display for PersonName {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}{{", self.locale)?;
        for (i, assignment) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{assignment}")?;
        }
        f.write_str("}")
    }
}

/// Accumulates `name` lines for one test subject.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PersonNameBuilder {
    locale: LocaleTag,
    fields: Vec<FieldAssignment>,
}

impl PersonNameBuilder {
    /// Create an empty builder with a default locale.
    pub fn new(locale: LocaleTag) -> Self {
        Self { locale, fields: vec![] }
    }

    /// Override the locale of the name.
    pub fn set_locale(&mut self, locale: LocaleTag) -> &mut Self {
        self.locale = locale;
        self
    }

    /// Append a field assignment.
    pub fn add_field(&mut self, assignment: FieldAssignment) -> &mut Self {
        self.fields.push(assignment);
        self
    }

    /// The assignments collected so far.
    pub fn fields(&self) -> &[FieldAssignment] {
        &self.fields
    }

    /// Snapshot the collected fields into a name.
    ///
    /// The builder keeps its contents, so later `name` lines extend the same
    /// subject until it is reset.
    pub fn build(&self) -> PersonName {
        PersonName {
            locale: self.locale.clone(),
            fields: self.fields.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::KeywordKind;

    fn en() -> LocaleTag {
        "en".parse().unwrap()
    }

    #[test]
    fn test_plain_field() {
        let a = FieldAssignment::parse("surname", "Smith").unwrap();
        assert_eq!(a.field, NameField::Surname);
        assert!(a.is_plain());
        assert_eq!(a.value, "Smith");
    }

    #[test]
    fn test_modifier_order_is_irrelevant() {
        let a = FieldAssignment::parse("given-informal-initial", "J").unwrap();
        let b = FieldAssignment::parse("given-initial-informal", "J").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.field, NameField::Given);
        assert_eq!(
            a.modifiers,
            BTreeSet::from([FieldModifier::Informal, FieldModifier::Initial])
        );
    }

    #[test]
    fn test_repeated_modifier_collapses() {
        let a = FieldAssignment::parse("surname-CORE-core", "Stöber").unwrap();
        assert_eq!(a.modifiers, BTreeSet::from([FieldModifier::Core]));
        assert_eq!(a.to_string(), "surname-core=Stöber");
    }

    #[test]
    fn test_unknown_parts() {
        assert_eq!(
            FieldAssignment::parse("unknownfield", "X"),
            Err(FixtureErrorKind::UnknownKeyword {
                kind: KeywordKind::NameField,
                token: "unknownfield".into(),
            })
        );
        assert_eq!(
            FieldAssignment::parse("given-shouty", "X"),
            Err(FixtureErrorKind::UnknownKeyword {
                kind: KeywordKind::FieldModifier,
                token: "shouty".into(),
            })
        );
        assert!(FieldAssignment::parse("given-", "X").is_err());
    }

    #[test]
    fn test_builder_snapshots() {
        let mut builder = PersonName::builder(en());
        builder
            .add_field(FieldAssignment::parse("given", "John").unwrap())
            .add_field(FieldAssignment::parse("surname", "Smith").unwrap());
        let first = builder.build();

        builder.add_field(FieldAssignment::parse("title", "Dr.").unwrap());
        let second = builder.build();

        assert_eq!(first.fields().len(), 2);
        assert_eq!(second.fields().len(), 3);
        assert_eq!(first.locale(), &en());
    }

    #[test]
    fn test_locale_override() {
        let mut builder = PersonName::builder(en());
        builder.set_locale("ja".parse().unwrap());
        assert_eq!(builder.build().locale().to_string(), "ja");
    }

    #[test]
    fn test_lookup() {
        let mut builder = PersonName::builder(en());
        builder
            .add_field(FieldAssignment::parse("given-informal", "Bob").unwrap())
            .add_field(FieldAssignment::parse("given", "Robert").unwrap())
            .add_field(FieldAssignment::parse("surname-prefix", "van").unwrap())
            .add_field(FieldAssignment::parse("surname-core", "Dyke").unwrap());
        let name = builder.build();

        assert_eq!(name.field(NameField::Given), Some("Robert"));
        assert_eq!(name.field_with(NameField::Given, FieldModifier::Informal), Some("Bob"));
        assert_eq!(name.field(NameField::Surname), Some("Dyke"));
        assert_eq!(name.field_with(NameField::Surname, FieldModifier::Prefix), Some("van"));
        assert_eq!(name.field(NameField::Title), None);
        assert_eq!(
            name.to_string(),
            "en{given-informal=Bob, given=Robert, surname-prefix=van, surname-core=Dyke}"
        );
    }
}
