use std::fmt;
use std::str::FromStr;

use unic_langid::LanguageIdentifier;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::FixtureErrorKind;

/// A locale, such as `en`, `de-CH`, or `zh-Hant`.
///
/// Fixture file names use underscores (`zh_Hant.txt`), so both `_` and `-`
/// are accepted as separators. The tag is displayed in canonical form.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct LocaleTag(LanguageIdentifier);

impl LocaleTag {
    /// The root locale, `und`.
    pub fn root() -> Self {
        Self(LanguageIdentifier::default())
    }

    /// Parse a tag, falling back to the root locale if it is malformed.
    ///
    /// Fixture locales never fail a run; a bad tag is only logged.
    pub fn parse_or_root(s: &str) -> Self {
        s.parse().unwrap_or_else(|err| {
            log::warn!("{err}, using `und`");
            Self::root()
        })
    }

    /// The language subtag, e.g. `zh` for `zh-Hant`.
    pub fn language(&self) -> &str {
        self.0.language.as_str()
    }
}

impl FromStr for LocaleTag {
    type Err = FixtureErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<LanguageIdentifier>()
            .map(Self)
            .map_err(|_| FixtureErrorKind::InvalidLocale(s.to_string()))
    }
}

impl fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}
