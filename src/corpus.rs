//! Checking a directory of fixture files, one file per locale.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};

use crate::config::CheckOptions;
use crate::format::NameFormatter;
use crate::report::Reporter;
use crate::runner::{FileRunner, FileSummary};
use crate::types::LocaleTag;
use crate::{CheckError, Result};

/// The outcome of checking a fixture directory.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct CorpusSummary {
    /// One summary per checked file, in file name order.
    pub files: Vec<FileSummary>,
    /// Files that could not be read.
    pub unreadable: Vec<Utf8PathBuf>,
}

impl CorpusSummary {
    /// Whether any failure or error was reported.
    pub fn has_failures(&self) -> bool {
        !self.unreadable.is_empty() || self.files.iter().any(FileSummary::has_failures)
    }

    /// The number of test cases run over all files.
    pub fn cases(&self) -> usize {
        self.files.iter().map(|f| f.cases).sum()
    }

    /// The number of mismatches reported over all files.
    pub fn mismatches(&self) -> usize {
        self.files.iter().map(|f| f.mismatches).sum()
    }
}

/// Derive the locale of a fixture file from its name, e.g. `de_CH.txt`.
///
/// Returns `None` if the name does not end in `.{extension}`.
pub fn locale_stem<'a>(file_name: &'a str, extension: &str) -> Option<&'a str> {
    file_name
        .strip_suffix(extension)
        .and_then(|stem| stem.strip_suffix('.'))
        .filter(|stem| !stem.is_empty())
}

/// List the fixture files of a directory in file name order.
pub fn fixture_files(dir: &Utf8Path, extension: &str) -> Result<Vec<Utf8PathBuf>> {
    let read_dir = |source: std::io::Error| CheckError::ReadDir { path: dir.to_owned(), source };

    let mut files = vec![];
    for entry in dir.read_dir_utf8().map_err(read_dir)? {
        let entry = entry.map_err(read_dir)?;
        if locale_stem(entry.file_name(), extension).is_some() {
            files.push(entry.into_path());
        }
    }

    files.sort_unstable();
    Ok(files)
}

/// Check a single fixture file with a fresh run state.
///
/// A file name that is not a locale tag is checked under the root locale.
pub fn check_file<F, R>(
    path: &Utf8Path,
    formatter: &F,
    reporter: &mut R,
    options: &CheckOptions,
) -> Result<FileSummary>
where
    F: NameFormatter + ?Sized,
    R: Reporter + ?Sized,
{
    let file_name = path.file_name().unwrap_or_default();
    let stem = locale_stem(file_name, &options.extension).unwrap_or(file_name);
    let locale = LocaleTag::parse_or_root(stem);

    let source = fs::read_to_string(path).map_err(|source| CheckError::ReadFile {
        path: path.to_owned(),
        source,
    })?;

    log::debug!("checking {path} as `{locale}`");
    Ok(FileRunner::new(path, locale, formatter, reporter, options).run(source.lines()))
}

/// Check every fixture file in `dir`.
///
/// A file that cannot be read is reported and skipped; the remaining files
/// are still checked. Only failing to list the directory is an error.
pub fn check_dir<F, R>(
    dir: &Utf8Path,
    formatter: &F,
    reporter: &mut R,
    options: &CheckOptions,
) -> Result<CorpusSummary>
where
    F: NameFormatter + ?Sized,
    R: Reporter + ?Sized,
{
    let mut summary = CorpusSummary::default();

    for path in fixture_files(dir, &options.extension)? {
        if options.locales.is_some() {
            let selected = locale_stem(path.file_name().unwrap_or_default(), &options.extension)
                .and_then(|stem| stem.parse::<LocaleTag>().ok())
                .is_some_and(|locale| options.includes(&locale));
            if !selected {
                log::debug!("skipping {path}");
                continue;
            }
        }

        match check_file(&path, formatter, reporter, options) {
            Ok(file) => summary.files.push(file),
            Err(err) => {
                log::warn!("{err}");
                reporter.error(&err);
                summary.unreadable.push(path);
            }
        }
    }

    log::info!(
        "{dir}: {} file(s), {} case(s), {} mismatch(es)",
        summary.files.len(),
        summary.cases(),
        summary.mismatches(),
    );
    Ok(summary)
}
