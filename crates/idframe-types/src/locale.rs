//! Widget locale and visual scheme.

use serde::{Deserialize, Serialize};

/// Interface language requested for the embedded surface.
///
/// Forwarded verbatim to the hosted page through the frame URL; the
/// hosted surface owns the actual translation tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    /// English.
    #[default]
    En,
    /// Russian.
    Ru,
    /// Ukrainian.
    Uk,
    /// Kazakh.
    Kk,
    /// Uzbek.
    Uz,
}

impl Language {
    /// Returns the wire code used in frame URLs.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ru => "ru",
            Self::Uk => "uk",
            Self::Kk => "kk",
            Self::Uz => "uz",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Visual color scheme for the embedded surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scheme {
    /// Light theme.
    #[default]
    Light,
    /// Dark theme.
    Dark,
}

impl Scheme {
    /// Returns the wire code used in frame URLs.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl std::fmt::Display for Scheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_codes() {
        assert_eq!(Language::En.code(), "en");
        assert_eq!(Language::Ru.code(), "ru");
        assert_eq!(Language::En.to_string(), "en");
    }

    #[test]
    fn scheme_codes() {
        assert_eq!(Scheme::Light.code(), "light");
        assert_eq!(Scheme::Dark.code(), "dark");
    }

    #[test]
    fn scheme_serde() {
        let json = serde_json::to_string(&Scheme::Dark).expect("serialize");
        assert_eq!(json, "\"dark\"");
    }
}
