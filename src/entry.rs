//! Brewfile entry types
//!
//! A Brewfile line declares at most one entry: a tap, a formula (`brew`), a
//! cask, or some other directive (`mas`, `whalebrew`, `vscode`, ...) that is
//! kept verbatim but never managed here.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a parsed Brewfile entry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    Tap,
    Formula,
    Cask,
    /// Recognized-but-unmanaged directive, e.g. `mas` or `whalebrew`
    Other(String),
}

impl EntryKind {
    /// Map a directive keyword to its entry kind
    pub fn from_keyword(keyword: &str) -> Self {
        match keyword {
            "tap" => EntryKind::Tap,
            "brew" => EntryKind::Formula,
            "cask" => EntryKind::Cask,
            other => EntryKind::Other(other.to_string()),
        }
    }

    /// The directive keyword as written in a Brewfile
    pub fn keyword(&self) -> &str {
        match self {
            EntryKind::Tap => "tap",
            EntryKind::Formula => PackageKind::Formula.keyword(),
            EntryKind::Cask => PackageKind::Cask.keyword(),
            EntryKind::Other(keyword) => keyword,
        }
    }
}

/// One parsed directive line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub kind: EntryKind,
    /// Identifier exactly as written between the quotes
    pub name: String,
}

impl ManifestEntry {
    pub fn new(kind: EntryKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}

/// Kinds of package that can be added to or dropped from a Brewfile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PackageKind {
    Formula,
    Cask,
}

struct KindInfo {
    keyword: &'static str,
    label: &'static str,
    core_tap: &'static str,
}

const FORMULA_INFO: KindInfo = KindInfo {
    keyword: "brew",
    label: "Formula",
    core_tap: "homebrew/core",
};

const CASK_INFO: KindInfo = KindInfo {
    keyword: "cask",
    label: "Cask",
    core_tap: "homebrew/cask",
};

impl PackageKind {
    fn info(self) -> &'static KindInfo {
        match self {
            PackageKind::Formula => &FORMULA_INFO,
            PackageKind::Cask => &CASK_INFO,
        }
    }

    /// Directive keyword (`brew` or `cask`)
    pub fn keyword(self) -> &'static str {
        self.info().keyword
    }

    /// Label used in user-facing messages (`Formula` or `Cask`)
    pub fn label(self) -> &'static str {
        self.info().label
    }

    /// Homebrew's own tap for this kind
    pub fn core_tap(self) -> &'static str {
        self.info().core_tap
    }

    pub fn entry_kind(self) -> EntryKind {
        match self {
            PackageKind::Formula => EntryKind::Formula,
            PackageKind::Cask => EntryKind::Cask,
        }
    }
}

impl fmt::Display for PackageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Quote character used when writing new lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QuoteStyle {
    #[default]
    Double,
    Single,
}

impl QuoteStyle {
    pub fn quote_char(self) -> char {
        match self {
            QuoteStyle::Double => '"',
            QuoteStyle::Single => '\'',
        }
    }

    /// Render `<keyword> "<name>"` (without a line terminator)
    pub fn directive(self, keyword: &str, name: &str) -> String {
        let q = self.quote_char();
        format!("{keyword} {q}{name}{q}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_mapping() {
        assert_eq!(EntryKind::from_keyword("tap"), EntryKind::Tap);
        assert_eq!(EntryKind::from_keyword("brew"), EntryKind::Formula);
        assert_eq!(EntryKind::from_keyword("cask"), EntryKind::Cask);
        assert_eq!(
            EntryKind::from_keyword("mas"),
            EntryKind::Other("mas".to_string())
        );
        assert_eq!(EntryKind::Other("whalebrew".into()).keyword(), "whalebrew");
    }

    #[test]
    fn test_package_kind_table() {
        assert_eq!(PackageKind::Formula.keyword(), "brew");
        assert_eq!(PackageKind::Cask.keyword(), "cask");
        assert_eq!(PackageKind::Formula.label(), "Formula");
        assert_eq!(PackageKind::Cask.core_tap(), "homebrew/cask");
        assert_eq!(PackageKind::Cask.entry_kind(), EntryKind::Cask);
    }

    #[test]
    fn test_directive_quotes() {
        assert_eq!(QuoteStyle::Double.directive("brew", "wget"), "brew \"wget\"");
        assert_eq!(QuoteStyle::Single.directive("tap", "a/b"), "tap 'a/b'");
    }
}
