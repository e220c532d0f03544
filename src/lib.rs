//! Replay person name formatting fixtures against a formatter.
//!
//! A fixture corpus is a directory with one file per locale (`en.txt`,
//! `zh_Hant.txt`, …). Each file declares person names field by field, the
//! formatting each name is expected to receive, and the parameters to format
//! it with:
//!
//! ```text
//! name ; locale ; en
//! name ; given ; John
//! name ; surname ; Smith
//! expectedResult ; John Smith
//! parameters ; n/a ; long ; referring ; formal
//! endName
//! ```
//!
//! Every `parameters` line runs the [`NameFormatter`] and compares its output
//! with the last `expectedResult`. Only the first mismatch per expected
//! result is reported.
//!
//! ```
//! use camino::Utf8Path;
//! use personname_check::{check_source, BaselineFormatter, CheckOptions, CollectReporter};
//!
//! let source = "name; given; John\nname; surname; Smith\n\
//!               expectedResult; John Smith\nparameters; n/a; long; referring; formal\n";
//!
//! let mut reporter = CollectReporter::new();
//! let summary = check_source(
//!     Utf8Path::new("en.txt"),
//!     "en".parse().unwrap(),
//!     source,
//!     &BaselineFormatter,
//!     &mut reporter,
//!     &CheckOptions::default(),
//! );
//!
//! assert_eq!(summary.cases, 1);
//! assert!(reporter.is_clean());
//! ```

#![deny(missing_docs)]

pub mod command;
pub mod config;
pub mod corpus;
pub mod state;
pub mod tokenize;
pub mod types;

mod error;
mod format;
mod report;
mod runner;

pub use config::{CheckOptions, ErrorPolicy};
pub use corpus::{check_dir, check_file, CorpusSummary};
pub use error::{CheckError, FixtureError, FixtureErrorKind, Result};
pub use format::{BaselineFormatter, NameFormatter};
pub use report::{CollectReporter, Failure, Mismatch, Report, Reporter, WriteReporter};
pub use runner::{check_source, FileRunner, FileSummary};
pub use types::{
    FieldAssignment, FieldModifier, FormatOption, Formality, FormattingParameters, Length,
    LocaleTag, NameField, PersonName, PersonNameBuilder, Usage,
};
