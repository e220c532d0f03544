//! The formatter under test.

use crate::types::{
    FieldModifier, Formality, FormattingParameters, LocaleTag, NameField, PersonName, Usage,
};

/// Formats a person name; the engine whose output fixtures are checked
/// against.
///
/// `locale` is the locale of the fixture file, which is the locale the
/// formatter is configured for. The name carries its own locale too.
pub trait NameFormatter {
    /// Format `name` according to `params`.
    fn format(&self, locale: &LocaleTag, name: &PersonName, params: &FormattingParameters)
        -> String;
}

impl<F> NameFormatter for F
where
    F: Fn(&LocaleTag, &PersonName, &FormattingParameters) -> String,
{
    fn format(
        &self,
        locale: &LocaleTag,
        name: &PersonName,
        params: &FormattingParameters,
    ) -> String {
        self(locale, name, params)
    }
}

/// A locale-agnostic formatter for running the harness end to end without a
/// real engine.
///
/// Produces `title given given2 prefix surname surname2 generation`, or
/// `prefix surname surname2, given given2` when sorting, or uppercase initials
/// for monograms. Informal formality prefers `given-informal` values.
#[derive(Debug, Default, Copy, Clone)]
pub struct BaselineFormatter;

impl BaselineFormatter {
    fn given<'a>(name: &'a PersonName, formality: Formality) -> Option<&'a str> {
        let informal = match formality {
            Formality::Informal => name.field_with(NameField::Given, FieldModifier::Informal),
            Formality::Formal => None,
        };
        informal.or_else(|| name.field(NameField::Given))
    }

    fn surname(name: &PersonName) -> Option<String> {
        let prefix = name.field_with(NameField::Surname, FieldModifier::Prefix);
        let core = name.field_with(NameField::Surname, FieldModifier::Core);
        match (prefix, core) {
            (Some(prefix), Some(core)) => Some(format!("{prefix} {core}")),
            (None, Some(core)) => Some(core.to_string()),
            _ => name.field(NameField::Surname).map(ToString::to_string),
        }
    }
}

impl NameFormatter for BaselineFormatter {
    fn format(
        &self,
        _: &LocaleTag,
        name: &PersonName,
        params: &FormattingParameters,
    ) -> String {
        let given = Self::given(name, params.formality);
        let given2 = name.field(NameField::Given2);
        let surname = Self::surname(name);
        let surname2 = name.field(NameField::Surname2);

        if params.usage == Usage::Monogram {
            return [given, surname.as_deref()]
                .into_iter()
                .flatten()
                .filter_map(|part| part.chars().next())
                .flat_map(char::to_uppercase)
                .collect();
        }

        if params.is_sorting() {
            let family = join([surname.as_deref(), surname2]);
            let personal = join([given, given2]);
            return match (family.is_empty(), personal.is_empty()) {
                (false, false) => format!("{family}, {personal}"),
                (true, _) => personal,
                (_, true) => family,
            };
        }

        join([
            name.field(NameField::Title),
            given,
            given2,
            surname.as_deref(),
            surname2,
            name.field(NameField::Generation),
        ])
    }
}

fn join<'a>(parts: impl IntoIterator<Item = Option<&'a str>>) -> String {
    parts
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
