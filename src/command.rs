//! Typed representation of a single fixture line.
//!
//! A line is `command ; arg1 ; arg2 ; …`. Five commands are understood:
//!
//! ```text
//! enum ; <type> ; <value>, <value>, …
//! name ; <field>(-<modifier>)* ; <value>
//! name ; locale ; <tag>
//! expectedResult ; <formatted name>
//! parameters ; <order> ; <length> ; <usage> ; <formality>
//! endName
//! ```
//!
//! Any other command is ignored so that the fixture format can grow. Its
//! arguments are dropped with it: unlike recognized commands, an unknown
//! one never produces a trailing-token report, so `include ; more.txt`
//! passes silently.
//!
//! A `name ; locale` value that is not a well-formed tag selects the root
//! locale `und` instead of failing the line.

use crate::tokenize::{split_trimmed, tokenize, LIST_SEPARATOR};
use crate::types::{FieldAssignment, FormattingParameters, LocaleTag};
use crate::FixtureErrorKind;

/// The pseudo-field of a `name` line overriding the name's locale.
pub const LOCALE_FIELD: &str = "locale";

/// Command keywords and the number of arguments each takes.
const COMMANDS: &[(&str, usize)] = &[
    ("enum", 2),
    ("name", 2),
    ("expectedResult", 1),
    ("parameters", 4),
    ("endName", 0),
];

/// A parsed fixture command.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Command {
    /// Declares the values of an enumeration.
    Enum {
        /// The enumeration's name.
        kind: String,
        /// The declared members.
        values: Vec<String>,
    },
    /// Overrides the locale of the name under construction.
    NameLocale(LocaleTag),
    /// Adds a field to the name under construction.
    NameField(FieldAssignment),
    /// Finalizes the name and declares the expected formatting.
    ExpectedResult(String),
    /// Formats the current name and compares against the expectation.
    Parameters(FormattingParameters),
    /// Discards the name under construction.
    EndName,
}

/// A recognized line: its command and the first unconsumed argument, if any.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ParsedLine {
    /// The command.
    pub command: Command,
    /// The first token left over after the command took its arguments.
    pub trailing: Option<String>,
}

impl Command {
    /// The number of arguments a command keyword takes, or `None` for
    /// unknown commands.
    pub fn arity(keyword: &str) -> Option<usize> {
        lookup(keyword).map(|(_, arity)| arity)
    }

    /// The keyword this command is written with.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Enum { .. } => "enum",
            Self::NameLocale(_) | Self::NameField(_) => "name",
            Self::ExpectedResult(_) => "expectedResult",
            Self::Parameters(_) => "parameters",
            Self::EndName => "endName",
        }
    }

    /// Parse a tokenized line.
    ///
    /// Returns `Ok(None)` for unknown commands.
    pub fn parse(tokens: &[&str]) -> Result<Option<ParsedLine>, FixtureErrorKind> {
        let Some((&keyword, args)) = tokens.split_first() else {
            return Ok(None);
        };
        let Some((keyword, arity)) = lookup(keyword) else {
            return Ok(None);
        };

        if args.len() < arity {
            return Err(FixtureErrorKind::MissingArguments {
                command: keyword,
                expected: arity,
                found: args.len(),
            });
        }

        let (args, rest) = args.split_at(arity);
        let command = match (keyword, args) {
            ("enum", &[kind, values]) => Self::Enum {
                kind: kind.to_string(),
                values: split_trimmed(values, LIST_SEPARATOR)
                    .into_iter()
                    .map(ToString::to_string)
                    .collect(),
            },
            ("name", &[LOCALE_FIELD, tag]) => {
                Self::NameLocale(LocaleTag::parse_or_root(tag))
            }
            ("name", &[spec, value]) => Self::NameField(FieldAssignment::parse(spec, value)?),
            ("expectedResult", &[expected]) => Self::ExpectedResult(expected.to_string()),
            ("parameters", &[order, length, usage, formality]) => Self::Parameters(
                FormattingParameters::parse(order, length, usage, formality)?,
            ),
            ("endName", &[]) => Self::EndName,
            _ => return Ok(None),
        };

        Ok(Some(ParsedLine {
            command,
            trailing: rest.first().map(ToString::to_string),
        }))
    }

    /// Tokenize and parse a raw line.
    pub fn parse_line(line: &str) -> Result<Option<ParsedLine>, FixtureErrorKind> {
        Self::parse(&tokenize(line))
    }
}

fn lookup(keyword: &str) -> Option<(&'static str, usize)> {
    COMMANDS.iter().copied().find(|&(k, _)| k == keyword)
}
