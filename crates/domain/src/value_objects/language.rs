//! Language value object
//!
//! The dashboard speaks English and Telugu. Tags coming from hosts and
//! servers vary in shape (`te`, `te-IN`, `TE_in`), so parsing goes through
//! the primary subtag only.
//!
//! # Examples
//!
//! ```
//! use domain::value_objects::Language;
//!
//! let lang: Language = "te-IN".parse().expect("supported tag");
//! assert_eq!(lang, Language::Telugu);
//! assert_eq!(lang.code(), "te");
//! assert_eq!(lang.locale_tag(), "te-IN");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::DomainError;

/// Language a summary is composed and spoken in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    /// English, numbers spoken as digits
    #[default]
    #[serde(rename = "en", alias = "en-US")]
    English,
    /// Telugu, numbers spoken as words
    #[serde(rename = "te", alias = "te-IN")]
    Telugu,
}

impl Language {
    /// All supported languages
    pub const ALL: [Self; 2] = [Self::English, Self::Telugu];

    /// Short ISO 639-1 code (`en`, `te`)
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Telugu => "te",
        }
    }

    /// Regional locale tag handed to synthesis engines (`en-US`, `te-IN`)
    #[must_use]
    pub const fn locale_tag(self) -> &'static str {
        match self {
            Self::English => "en-US",
            Self::Telugu => "te-IN",
        }
    }

    /// Lowercase English name, as it appears in host voice names
    #[must_use]
    pub const fn english_name(self) -> &'static str {
        match self {
            Self::English => "english",
            Self::Telugu => "telugu",
        }
    }

    /// Broader region a voice name may mention when no voice names the language
    #[must_use]
    pub const fn region_marker(self) -> Option<&'static str> {
        match self {
            Self::English => None,
            Self::Telugu => Some("india"),
        }
    }

    /// Resolve a BCP 47-ish tag by its primary subtag (case-insensitive)
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        let primary = primary_subtag(tag);
        Self::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(primary))
    }
}

/// Primary subtag of a language tag (`te` for `te-IN` or `te_IN`)
#[must_use]
pub fn primary_subtag(tag: &str) -> &str {
    let tag = tag.trim();
    tag.split(['-', '_']).next().unwrap_or(tag)
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| DomainError::UnsupportedLanguage(s.to_string()))
    }
}
