//! Brewfile parsing
//!
//! Parsing is read-only: every physical line is kept byte-for-byte next to
//! the entry (if any) it declares, so a parsed Brewfile renders back to the
//! exact text it came from.

use crate::entry::{EntryKind, ManifestEntry};

/// One physical line of a Brewfile, terminator included
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrewfileLine {
    pub text: String,
    pub entry: Option<ManifestEntry>,
}

/// A parsed Brewfile
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Brewfile {
    lines: Vec<BrewfileLine>,
}

impl Brewfile {
    pub fn parse(text: &str) -> Self {
        let lines = text
            .split_inclusive('\n')
            .map(|line| BrewfileLine {
                text: line.to_string(),
                entry: parse_line(line),
            })
            .collect();
        Self { lines }
    }

    pub fn lines(&self) -> &[BrewfileLine] {
        &self.lines
    }

    /// Entries in file order
    pub fn entries(&self) -> impl Iterator<Item = &ManifestEntry> {
        self.lines.iter().filter_map(|line| line.entry.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// True when there is content whose last line lacks a `\n`
    pub fn missing_trailing_newline(&self) -> bool {
        self.lines
            .last()
            .is_some_and(|line| !line.text.ends_with('\n'))
    }

    pub fn render(&self) -> String {
        self.lines.iter().map(|line| line.text.as_str()).collect()
    }
}

/// Parse Brewfile text into its entries, in file order
pub fn parse(text: &str) -> Vec<ManifestEntry> {
    text.lines().filter_map(parse_line).collect()
}

/// Parse a single line: `<keyword> <quoted identifier> [anything]`
///
/// Blank lines, comments and malformed directives yield `None`.
pub fn parse_line(line: &str) -> Option<ManifestEntry> {
    let line = line.trim_start();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let keyword_len = line
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(line.len());
    let keyword = &line[..keyword_len];
    if !keyword.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return None;
    }

    let rest = &line[keyword_len..];
    if !rest.starts_with(|c: char| c.is_whitespace()) {
        return None;
    }

    let name = extract_quoted_string(rest)?;
    Some(ManifestEntry::new(EntryKind::from_keyword(keyword), name))
}

/// Extract the leading quoted string: "string" or 'string'
///
/// Anything after the closing quote is ignored.
fn extract_quoted_string(s: &str) -> Option<&str> {
    let s = s.trim_start();
    let quote = s.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let body = &s[1..];
    let end = body.find(quote)?;
    let name = &body[..end];
    if name.is_empty() { None } else { Some(name) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_directives() {
        let text = "tap \"homebrew/bundle\"\nbrew 'wget'\ncask \"firefox\"\n";
        let entries = parse(text);
        assert_eq!(
            entries,
            vec![
                ManifestEntry::new(EntryKind::Tap, "homebrew/bundle"),
                ManifestEntry::new(EntryKind::Formula, "wget"),
                ManifestEntry::new(EntryKind::Cask, "firefox"),
            ]
        );
    }

    #[test]
    fn test_parse_skips_comments_and_blank_lines() {
        let text = "# Brewfile\n\n   # indented comment\nbrew \"jq\"\n";
        assert_eq!(
            parse(text),
            vec![ManifestEntry::new(EntryKind::Formula, "jq")]
        );
    }

    #[test]
    fn test_parse_trailing_content_ignored() {
        let entry = parse_line("  brew \"mysql@8.0\", restart_service: true, link: true").unwrap();
        assert_eq!(entry, ManifestEntry::new(EntryKind::Formula, "mysql@8.0"));

        let entry = parse_line("cask 'font-fira-code' # fonts").unwrap();
        assert_eq!(entry.name, "font-fira-code");
    }

    #[test]
    fn test_parse_other_keywords() {
        let entry = parse_line("mas \"Xcode\", id: 497799835").unwrap();
        assert_eq!(entry.kind, EntryKind::Other("mas".to_string()));
        assert_eq!(entry.name, "Xcode");

        let entry = parse_line("whalebrew \"whalebrew/wget\"").unwrap();
        assert_eq!(entry.kind, EntryKind::Other("whalebrew".to_string()));
    }

    #[test]
    fn test_parse_malformed_lines() {
        assert!(parse_line("brew").is_none());
        assert!(parse_line("brew wget").is_none());
        assert!(parse_line("brew \"wget").is_none());
        assert!(parse_line("brew \"\"").is_none());
        assert!(parse_line("brew\"wget\"").is_none());
        assert!(parse_line("\"wget\"").is_none());
        assert!(parse_line("cask_args appdir: \"/Applications\"").is_none());
    }

    #[test]
    fn test_mismatched_quotes_are_not_an_identifier() {
        assert!(parse_line("brew \"wget'").is_none());
        assert_eq!(parse_line("brew 'it\"s'").unwrap().name, "it\"s");
    }

    #[test]
    fn test_brewfile_round_trip() {
        let inputs = [
            "",
            "tap \"a/b\"\nbrew \"a/b/c\"\n",
            "brew 'x'\r\n  cask \"y\"  \n\n# comment\nnot a directive\nbrew \"z\"",
            "\n\n\n",
        ];
        for text in inputs {
            assert_eq!(Brewfile::parse(text).render(), text);
        }
    }

    #[test]
    fn test_missing_trailing_newline() {
        assert!(!Brewfile::parse("").missing_trailing_newline());
        assert!(!Brewfile::parse("brew \"a\"\n").missing_trailing_newline());
        assert!(Brewfile::parse("brew \"a\"").missing_trailing_newline());
        assert!(Brewfile::parse("brew \"a\"\n# end").missing_trailing_newline());
    }

    #[test]
    fn test_brewfile_entries_keep_line_association() {
        let brewfile = Brewfile::parse("# deps\nbrew \"a\"\n\ncask \"b\"\n");
        assert_eq!(brewfile.lines().len(), 4);
        assert!(brewfile.lines()[0].entry.is_none());
        assert_eq!(brewfile.lines()[3].entry.as_ref().unwrap().name, "b");
        assert_eq!(brewfile.entries().count(), 2);
    }
}
