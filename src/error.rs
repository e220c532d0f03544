//! Errors raised while reading and interpreting fixture files.

use std::io;

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::types::KeywordKind;

/// What is wrong with a single fixture line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum FixtureErrorKind {
    /// The line ended before the command received all of its arguments.
    #[error("`{command}` expects {expected} argument(s), found {found}")]
    MissingArguments {
        /// The command keyword.
        command: &'static str,
        /// How many arguments the command takes.
        expected: usize,
        /// How many arguments the line had.
        found: usize,
    },
    /// A token is not a member of its closed enumeration.
    #[error("unknown {kind} `{token}`")]
    UnknownKeyword {
        /// Which enumeration the token was matched against.
        kind: KeywordKind,
        /// The offending token.
        token: String,
    },
    /// The order argument of `parameters` was neither `sorting` nor `n/a`.
    #[error("unknown order `{0}`, expected `sorting` or `n/a`")]
    UnknownOrderToken(String),
    /// A locale tag could not be parsed.
    #[error("invalid locale `{0}`")]
    InvalidLocale(String),
    /// A `parameters` line appeared before any `expectedResult`.
    #[error("`parameters` without a preceding `expectedResult`")]
    NoExpectedResult,
}

/// A fixture line that could not be processed, with its location.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path}:{line}: `{command}`: {kind}")]
pub struct FixtureError {
    /// The fixture file.
    pub path: Utf8PathBuf,
    /// The 1-based line number.
    pub line: usize,
    /// The command keyword of the line.
    pub command: String,
    /// What went wrong.
    pub kind: FixtureErrorKind,
}

/// Errors surfaced while checking a fixture corpus.
#[derive(Debug, Error)]
pub enum CheckError {
    /// The fixture directory could not be listed.
    #[error("failed to list {path}: {source}")]
    ReadDir {
        /// The directory.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A fixture file could not be read.
    #[error("failure with {path}: {source}")]
    ReadFile {
        /// The file.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A fixture line could not be processed.
    #[error(transparent)]
    Fixture(#[from] FixtureError),
}

/// A result whose error is a [`CheckError`].
pub type Result<T, E = CheckError> = std::result::Result<T, E>;
