//! The per-file state carried from one fixture line to the next.

use std::collections::BTreeMap;

use crate::command::Command;
use crate::format::NameFormatter;
use crate::report::Mismatch;
use crate::types::{
    FormattingParameters, LocaleTag, NameField, PersonName, PersonNameBuilder,
};
use crate::FixtureErrorKind;

/// What a fixture file has declared so far.
///
/// Each [`Command`] is one transition. A transition that fails leaves the
/// state as it was.
#[derive(Debug, Clone)]
pub struct RunState {
    locale: LocaleTag,
    builder: PersonNameBuilder,
    last_field: Option<NameField>,
    name: Option<PersonName>,
    expected: Option<String>,
    suppress: bool,
    suppress_duplicates: bool,
    declared_enums: BTreeMap<String, Vec<String>>,
}

/// The outcome of a transition.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Outcome {
    /// The command only changed the state.
    Updated,
    /// The formatter was run and agreed with the expectation, or a mismatch
    /// was already reported for this expectation.
    Checked,
    /// The formatter was run and disagreed with the expectation.
    Mismatch(Box<Mismatch>),
}

impl RunState {
    /// A fresh state for a fixture file of the given locale.
    pub fn new(locale: LocaleTag) -> Self {
        Self {
            builder: PersonNameBuilder::new(locale.clone()),
            locale,
            last_field: None,
            name: None,
            expected: None,
            suppress: false,
            suppress_duplicates: true,
            declared_enums: BTreeMap::new(),
        }
    }

    /// Whether only the first mismatch per expected result is reported.
    /// Enabled by default.
    pub fn with_suppress_duplicates(mut self, enabled: bool) -> Self {
        self.suppress_duplicates = enabled;
        self
    }

    /// The locale of the fixture file.
    pub fn locale(&self) -> &LocaleTag {
        &self.locale
    }

    /// The name under construction.
    pub fn builder(&self) -> &PersonNameBuilder {
        &self.builder
    }

    /// The base field of the last `name` line of the current subject.
    pub fn last_field(&self) -> Option<NameField> {
        self.last_field
    }

    /// The name built by the last `expectedResult`.
    pub fn name(&self) -> Option<&PersonName> {
        self.name.as_ref()
    }

    /// The last declared expected result.
    pub fn expected(&self) -> Option<&str> {
        self.expected.as_deref()
    }

    /// Whether mismatches are currently suppressed.
    pub fn is_suppressing(&self) -> bool {
        self.suppress
    }

    /// The value lists declared by `enum` lines.
    pub fn declared_enums(&self) -> &BTreeMap<String, Vec<String>> {
        &self.declared_enums
    }

    /// Apply one command.
    pub fn apply<F>(
        &mut self,
        command: Command,
        formatter: &F,
    ) -> Result<Outcome, FixtureErrorKind>
    where
        F: NameFormatter + ?Sized,
    {
        match command {
            Command::Enum { kind, values } => {
                log::debug!("{}: enum `{kind}` declares {values:?}", self.locale);
                self.declared_enums.insert(kind, values);
            }
            Command::NameLocale(locale) => {
                self.builder.set_locale(locale);
            }
            Command::NameField(assignment) => {
                self.last_field = Some(assignment.field);
                self.builder.add_field(assignment);
            }
            Command::ExpectedResult(expected) => {
                self.name = Some(self.builder.build());
                self.expected = Some(expected);
                self.suppress = false;
            }
            Command::Parameters(params) => return self.check(&params, formatter),
            Command::EndName => {
                self.builder = PersonNameBuilder::new(self.locale.clone());
                self.last_field = None;
            }
        }

        Ok(Outcome::Updated)
    }

    /// Format the current name and compare it against the expectation.
    fn check<F>(
        &mut self,
        params: &FormattingParameters,
        formatter: &F,
    ) -> Result<Outcome, FixtureErrorKind>
    where
        F: NameFormatter + ?Sized,
    {
        let (Some(name), Some(expected)) = (&self.name, &self.expected) else {
            return Err(FixtureErrorKind::NoExpectedResult);
        };

        let actual = formatter.format(&self.locale, name, params);
        if actual == *expected || self.suppress {
            return Ok(Outcome::Checked);
        }

        let mismatch = Mismatch {
            locale: self.locale.clone(),
            name_locale: name.locale().clone(),
            params: params.clone(),
            expected: expected.clone(),
            actual,
        };
        self.suppress = self.suppress_duplicates;

        Ok(Outcome::Mismatch(Box::new(mismatch)))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::types::{FieldAssignment, FormatOption, PersonName};

    fn en() -> LocaleTag {
        "en".parse().unwrap()
    }

    fn field(spec: &str, value: &str) -> Command {
        Command::NameField(FieldAssignment::parse(spec, value).unwrap())
    }

    fn params(order: &str, length: &str, usage: &str, formality: &str) -> Command {
        Command::Parameters(FormattingParameters::parse(order, length, usage, formality).unwrap())
    }

    fn constant(
        out: &'static str,
    ) -> impl Fn(&LocaleTag, &PersonName, &FormattingParameters) -> String {
        move |_: &LocaleTag, _: &PersonName, _: &FormattingParameters| out.to_string()
    }

    fn john_smith(state: &mut RunState) {
        let f = constant("");
        state.apply(Command::NameLocale(en()), &f).unwrap();
        state.apply(field("given", "John"), &f).unwrap();
        state.apply(field("surname", "Smith"), &f).unwrap();
        state.apply(Command::ExpectedResult("John Smith".into()), &f).unwrap();
    }

    #[test]
    fn test_matching_output() {
        let mut state = RunState::new(en());
        john_smith(&mut state);
        let outcome = state
            .apply(params("n/a", "long", "referring", "formal"), &constant("John Smith"))
            .unwrap();
        assert_eq!(outcome, Outcome::Checked);
        assert!(!state.is_suppressing());
    }

    #[test]
    fn test_first_mismatch_only() {
        let mut state = RunState::new(en());
        john_smith(&mut state);
        let wrong = constant("Smith, John");

        let outcome = state.apply(params("n/a", "long", "referring", "formal"), &wrong);
        let Outcome::Mismatch(m) = outcome.unwrap() else {
            panic!("expected a mismatch");
        };
        assert_eq!(m.expected, "John Smith");
        assert_eq!(m.actual, "Smith, John");
        assert!(state.is_suppressing());

        let outcome = state.apply(params("n/a", "short", "referring", "formal"), &wrong).unwrap();
        assert_eq!(outcome, Outcome::Checked);

        // A new expectation re-enables reporting.
        state.apply(Command::ExpectedResult("J. Smith".into()), &wrong).unwrap();
        assert!(!state.is_suppressing());
        let outcome = state.apply(params("n/a", "short", "referring", "formal"), &wrong).unwrap();
        assert!(matches!(outcome, Outcome::Mismatch(_)));
    }

    #[test]
    fn test_report_all() {
        let mut state = RunState::new(en()).with_suppress_duplicates(false);
        john_smith(&mut state);
        let wrong = constant("Smith, John");
        for _ in 0..3 {
            let outcome = state.apply(params("n/a", "long", "referring", "formal"), &wrong).unwrap();
            assert!(matches!(outcome, Outcome::Mismatch(_)));
        }
    }

    #[test]
    fn test_sorting_reaches_formatter() {
        let seen = RefCell::new(vec![]);
        let recording = |_: &LocaleTag, _: &PersonName, p: &FormattingParameters| {
            seen.borrow_mut().push(p.clone());
            "John Smith".to_string()
        };

        let mut state = RunState::new(en());
        john_smith(&mut state);
        state.apply(params("sorting", "short", "addressing", "informal"), &recording).unwrap();
        state.apply(params("n/a", "short", "addressing", "INFORMAL"), &recording).unwrap();

        let seen = seen.into_inner();
        assert!(seen[0].options.contains(&FormatOption::Sorting));
        assert!(seen[1].options.is_empty());
        assert_eq!(seen[0].formality, seen[1].formality);
    }

    #[test]
    fn test_case_insensitive_params_format_alike() {
        let seen = RefCell::new(vec![]);
        let recording = |l: &LocaleTag, n: &PersonName, p: &FormattingParameters| {
            seen.borrow_mut().push((l.clone(), n.clone(), p.clone()));
            String::new()
        };

        let mut state = RunState::new(en());
        john_smith(&mut state);
        state.apply(params("n/a", "long", "referring", "FORMAL"), &recording).unwrap();
        state.apply(params("n/a", "long", "referring", "formal"), &recording).unwrap();

        let seen = seen.into_inner();
        assert_eq!(seen[0], seen[1]);
    }

    #[test]
    fn test_end_name_resets_fields() {
        let f = constant("");
        let mut state = RunState::new(en());
        john_smith(&mut state);
        assert_eq!(state.last_field(), Some(NameField::Surname));
        state.apply(Command::EndName, &f).unwrap();
        assert!(state.builder().fields().is_empty());
        assert_eq!(state.last_field(), None);
        assert_eq!(state.expected(), Some("John Smith"));

        state.apply(field("given", "Jane"), &f).unwrap();
        state.apply(Command::ExpectedResult("Jane".into()), &f).unwrap();
        let name = state.name().unwrap();
        assert_eq!(name.fields().len(), 1);
        assert_eq!(name.fields()[0].value, "Jane");
    }

    #[test]
    fn test_end_name_resets_locale() {
        let f = constant("");
        let mut state = RunState::new(en());
        state.apply(Command::NameLocale("fr".parse().unwrap()), &f).unwrap();
        state.apply(Command::EndName, &f).unwrap();
        state.apply(Command::ExpectedResult(String::new()), &f).unwrap();
        assert_eq!(state.name().unwrap().locale(), &en());
    }

    #[test]
    fn test_fields_accumulate_without_end_name() {
        let f = constant("");
        let mut state = RunState::new(en());
        john_smith(&mut state);
        let first = state.name().cloned().unwrap();

        state.apply(field("title", "Dr."), &f).unwrap();
        state.apply(Command::ExpectedResult("Dr. John Smith".into()), &f).unwrap();

        assert_eq!(first.fields().len(), 2);
        assert_eq!(state.name().unwrap().fields().len(), 3);
    }

    #[test]
    fn test_parameters_need_expectation() {
        let mut state = RunState::new(en());
        state.apply(field("given", "John"), &constant("")).unwrap();
        let before = state.builder().clone();
        assert_eq!(
            state.apply(params("n/a", "long", "referring", "formal"), &constant("")),
            Err(FixtureErrorKind::NoExpectedResult)
        );
        assert_eq!(state.builder(), &before);
    }

    #[test]
    fn test_enum_declarations() {
        let mut state = RunState::new(en());
        let command = Command::Enum { kind: "length".into(), values: vec!["long".into()] };
        assert_eq!(state.apply(command, &constant("")), Ok(Outcome::Updated));
        assert_eq!(state.declared_enums()["length"], ["long"]);
    }
}
