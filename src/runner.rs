//! Drives one fixture file through a [`RunState`].

use camino::{Utf8Path, Utf8PathBuf};

use crate::command::Command;
use crate::config::{CheckOptions, ErrorPolicy};
use crate::format::NameFormatter;
use crate::report::{Failure, Report, Reporter};
use crate::state::{Outcome, RunState};
use crate::tokenize::{is_trivia, tokenize};
use crate::types::LocaleTag;
use crate::{CheckError, FixtureError};

/// Counts collected while checking one fixture file.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct FileSummary {
    /// The file's locale.
    pub locale: LocaleTag,
    /// The file.
    pub path: Utf8PathBuf,
    /// How many `parameters` lines ran the formatter.
    pub cases: usize,
    /// How many mismatches were reported.
    pub mismatches: usize,
    /// How many lines had unconsumed arguments.
    pub trailing_tokens: usize,
    /// How many lines could not be processed.
    pub errors: usize,
    /// The line that stopped the file, if any.
    pub aborted_at: Option<usize>,
}

impl FileSummary {
    fn new(locale: LocaleTag, path: Utf8PathBuf) -> Self {
        Self {
            locale,
            path,
            cases: 0,
            mismatches: 0,
            trailing_tokens: 0,
            errors: 0,
            aborted_at: None,
        }
    }

    /// Whether anything was reported for this file.
    pub fn has_failures(&self) -> bool {
        self.mismatches > 0 || self.trailing_tokens > 0 || self.errors > 0
    }
}

/// Feeds the lines of one fixture file to a fresh [`RunState`].
pub struct FileRunner<'a, F: ?Sized, R> {
    state: RunState,
    formatter: &'a F,
    reporter: R,
    policy: ErrorPolicy,
    summary: FileSummary,
}

impl<'a, F, R> FileRunner<'a, F, R>
where
    F: NameFormatter + ?Sized,
    R: Reporter,
{
    /// Create a runner for the file at `path`, whose locale is `locale`.
    pub fn new(
        path: &Utf8Path,
        locale: LocaleTag,
        formatter: &'a F,
        reporter: R,
        options: &CheckOptions,
    ) -> Self {
        Self {
            state: RunState::new(locale.clone())
                .with_suppress_duplicates(options.suppress_duplicates),
            formatter,
            reporter,
            policy: options.error_policy,
            summary: FileSummary::new(locale, path.to_owned()),
        }
    }

    /// The state after the lines handled so far.
    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// Handle one line. `line_no` is 1-based.
    ///
    /// Failures go to the reporter; the error is returned if the line could
    /// not be processed, in which case the state is unchanged.
    pub fn handle_line(&mut self, line_no: usize, line: &str) -> Result<(), FixtureError> {
        if is_trivia(line) {
            return Ok(());
        }

        let tokens = tokenize(line);
        let error = |kind| FixtureError {
            path: self.summary.path.clone(),
            line: line_no,
            command: tokens[0].to_string(),
            kind,
        };

        let parsed = match Command::parse(&tokens) {
            Ok(Some(parsed)) => parsed,
            Ok(None) => {
                log::debug!("{}:{line_no}: ignoring `{}`", self.summary.path, tokens[0]);
                return Ok(());
            }
            Err(kind) => return Err(error(kind)),
        };

        match self.state.apply(parsed.command, self.formatter).map_err(error)? {
            Outcome::Updated => {}
            Outcome::Checked => self.summary.cases += 1,
            Outcome::Mismatch(mismatch) => {
                self.summary.cases += 1;
                self.summary.mismatches += 1;
                self.report(line_no, Failure::Mismatch(*mismatch));
            }
        }

        if let Some(token) = parsed.trailing {
            self.summary.trailing_tokens += 1;
            self.report(line_no, Failure::TrailingToken(token));
        }

        Ok(())
    }

    /// Handle all lines of a file and return its summary.
    pub fn run<'l, I>(mut self, lines: I) -> FileSummary
    where
        I: IntoIterator<Item = &'l str>,
    {
        for (line_no, line) in (1..).zip(lines) {
            let Err(err) = self.handle_line(line_no, line) else {
                continue;
            };

            log::warn!("{err}");
            self.summary.errors += 1;
            self.reporter.error(&CheckError::Fixture(err));

            if self.policy == ErrorPolicy::AbortFile {
                self.summary.aborted_at = Some(line_no);
                break;
            }
        }

        log::info!(
            "{}: {} case(s), {} mismatch(es), {} error(s)",
            self.summary.locale,
            self.summary.cases,
            self.summary.mismatches,
            self.summary.errors,
        );
        self.summary
    }

    fn report(&mut self, line: usize, failure: Failure) {
        self.reporter.report(&Report {
            locale: self.summary.locale.clone(),
            line,
            failure,
        });
    }
}

/// Check the contents of a fixture file held in memory.
pub fn check_source<F, R>(
    path: &Utf8Path,
    locale: LocaleTag,
    source: &str,
    formatter: &F,
    reporter: R,
    options: &CheckOptions,
) -> FileSummary
where
    F: NameFormatter + ?Sized,
    R: Reporter,
{
    FileRunner::new(path, locale, formatter, reporter, options).run(source.lines())
}
