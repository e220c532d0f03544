//! Failure reports and the sinks that receive them.

use std::fmt;
use std::io::Write;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::types::{DisplayOptions, FormattingParameters, LocaleTag};
use crate::CheckError;

/// The formatter disagreed with a fixture's expected result.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Mismatch {
    /// The locale the formatter was configured for.
    pub locale: LocaleTag,
    /// The locale of the name being formatted.
    pub name_locale: LocaleTag,
    /// The formatting parameters.
    pub params: FormattingParameters,
    /// The declared expectation.
    pub expected: String,
    /// What the formatter produced.
    pub actual: String,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}, {}, {}: expected: \"{}\" actual: \"{}\"",
            self.locale,
            self.name_locale,
            DisplayOptions(&self.params.options),
            self.params.length,
            self.params.usage,
            self.params.formality,
            self.expected,
            self.actual,
        )
    }
}

/// Something a fixture line revealed.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum Failure {
    /// The formatter output differs from the expectation.
    Mismatch(Mismatch),
    /// The line had more arguments than its command takes.
    TrailingToken(String),
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Mismatch(mismatch) => mismatch.fmt(f),
            Self::TrailingToken(token) => {
                write!(f, "handled all fields: expected: \"\" actual: \"{token}\"")
            }
        }
    }
}

/// A failure located in a fixture file.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Report {
    /// The locale of the fixture file.
    pub locale: LocaleTag,
    /// The 1-based line number.
    pub line: usize,
    /// What went wrong.
    pub failure: Failure,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}: {}", self.locale, self.line, self.failure)
    }
}

/// Receives failures and errors as fixtures are checked.
pub trait Reporter {
    /// Record a failure.
    fn report(&mut self, report: &Report);

    /// Record an error that stopped a file or a line from being checked.
    fn error(&mut self, error: &CheckError);
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn report(&mut self, report: &Report) {
        (**self).report(report);
    }

    fn error(&mut self, error: &CheckError) {
        (**self).error(error);
    }
}

/// Keeps everything it receives in memory.
#[derive(Debug, Default)]
pub struct CollectReporter {
    /// The recorded failures, in order.
    pub reports: Vec<Report>,
    /// The recorded errors, rendered, in order.
    pub errors: Vec<String>,
}

impl CollectReporter {
    /// Create an empty reporter.
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded mismatches.
    pub fn mismatches(&self) -> impl Iterator<Item = &Mismatch> {
        self.reports.iter().filter_map(|r| match &r.failure {
            Failure::Mismatch(m) => Some(m),
            Failure::TrailingToken(_) => None,
        })
    }

    /// Whether nothing was recorded.
    pub fn is_clean(&self) -> bool {
        self.reports.is_empty() && self.errors.is_empty()
    }
}

impl Reporter for CollectReporter {
    fn report(&mut self, report: &Report) {
        self.reports.push(report.clone());
    }

    fn error(&mut self, error: &CheckError) {
        self.errors.push(error.to_string());
    }
}

/// Prints one `Error <message>` line per failure or error.
#[derive(Debug)]
pub struct WriteReporter<W> {
    sink: W,
    written: usize,
}

impl<W: Write> WriteReporter<W> {
    /// Report into `sink`.
    pub fn new(sink: W) -> Self {
        Self { sink, written: 0 }
    }

    /// How many lines were written.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Return the sink.
    pub fn into_inner(self) -> W {
        self.sink
    }

    fn line(&mut self, message: &dyn fmt::Display) {
        match writeln!(self.sink, "Error {message}") {
            Ok(()) => self.written += 1,
            Err(err) => log::error!("failed to write report: {err}"),
        }
    }
}

impl<W: Write> Reporter for WriteReporter<W> {
    fn report(&mut self, report: &Report) {
        self.line(report);
    }

    fn error(&mut self, error: &CheckError) {
        self.line(error);
    }
}
