//! Settings for a check run.

use crate::types::LocaleTag;

/// The default extension of fixture files.
pub const FIXTURE_EXTENSION: &str = "txt";

/// What to do when a fixture line cannot be processed.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub enum ErrorPolicy {
    /// Report the error and stop checking the rest of the file.
    #[default]
    AbortFile,
    /// Report the error and continue with the next line.
    SkipLine,
}

/// Settings for a check run.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CheckOptions {
    /// Report only the first mismatch per expected result.
    pub suppress_duplicates: bool,
    /// What to do with lines that cannot be processed.
    pub error_policy: ErrorPolicy,
    /// Only check the fixture files of these locales, if set.
    pub locales: Option<Vec<LocaleTag>>,
    /// The extension fixture files end in, without the dot.
    pub extension: String,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            suppress_duplicates: true,
            error_policy: ErrorPolicy::default(),
            locales: None,
            extension: FIXTURE_EXTENSION.to_string(),
        }
    }
}

impl CheckOptions {
    /// Whether the fixture file of `locale` should be checked.
    pub fn includes(&self, locale: &LocaleTag) -> bool {
        self.locales.as_ref().map_or(true, |locales| locales.contains(locale))
    }
}
