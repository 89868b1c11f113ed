//! Local tap inspection - which taps are installed and which packages they carry

use crate::entry::PackageKind;
use crate::parser::parse_line;
use anyhow::{Result, anyhow};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Parse a tap name into (user, repo) components
/// Input: "user/repo" → Output: ("user", "homebrew-repo")
fn parse_tap_name(tap: &str) -> Result<(String, String)> {
    let parts: Vec<&str> = tap.split('/').collect();
    if parts.len() != 2 || parts.iter().any(|p| p.is_empty()) {
        return Err(anyhow!(
            "Invalid tap name format. Expected 'user/repo', got '{}'",
            tap
        ));
    }

    let user = parts[0].to_lowercase();
    let repo = parts[1].to_lowercase();
    let repo = if repo.starts_with("homebrew-") {
        repo
    } else {
        format!("homebrew-{}", repo)
    };

    Ok((user, repo))
}

/// Canonical `user/repo` form of a tap name, as Homebrew writes it
pub fn normalize_tap_name(tap: &str) -> Result<String> {
    let (user, repo) = parse_tap_name(tap)?;
    let repo = repo.strip_prefix("homebrew-").unwrap_or(&repo);
    Ok(format!("{}/{}", user, repo))
}

/// Get the directory path for a tap
pub fn tap_directory(taps_dir: &Path, tap: &str) -> Result<PathBuf> {
    let (user, repo) = parse_tap_name(tap)?;
    Ok(taps_dir.join(user).join(repo))
}

pub fn is_tapped(taps_dir: &Path, tap: &str) -> bool {
    tap_directory(taps_dir, tap).is_ok_and(|dir| dir.is_dir())
}

/// List all installed taps as `user/repo`
pub fn list_taps(taps_dir: &Path) -> Result<Vec<String>> {
    if !taps_dir.exists() {
        return Ok(vec![]);
    }

    let mut taps = Vec::new();

    for user_entry in fs::read_dir(taps_dir)? {
        let user_entry = user_entry?;
        let user = user_entry.file_name().to_string_lossy().to_string();
        let user_path = user_entry.path();
        if user.starts_with('.') || !user_path.is_dir() {
            continue;
        }

        for repo_entry in fs::read_dir(user_path)? {
            let repo_entry = repo_entry?;
            let repo = repo_entry.file_name().to_string_lossy().to_string();
            if repo.starts_with('.') || !repo_entry.path().is_dir() {
                continue;
            }

            let display_repo = repo.strip_prefix("homebrew-").unwrap_or(&repo);
            taps.push(format!("{}/{}", user, display_repo));
        }
    }

    taps.sort();
    Ok(taps)
}

/// Where a tap keeps definitions of each kind, with how deep to look
/// (letter-organized taps nest one level down)
fn package_dirs(kind: PackageKind) -> &'static [(&'static str, usize)] {
    match kind {
        PackageKind::Formula => &[("Formula", 2), ("HomebrewFormula", 2), (".", 1)],
        PackageKind::Cask => &[("Casks", 2)],
    }
}

/// Find `<name>.rb` for a package inside a local tap
pub fn find_package_file(
    taps_dir: &Path,
    tap: &str,
    kind: PackageKind,
    name: &str,
) -> Option<PathBuf> {
    let tap_dir = tap_directory(taps_dir, tap).ok()?;
    let file_name = format!("{}.rb", name);

    package_dirs(kind).iter().find_map(|(subdir, depth)| {
        let dir = tap_dir.join(subdir);
        if !dir.is_dir() {
            return None;
        }
        WalkDir::new(&dir)
            .max_depth(*depth)
            .follow_links(false)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .find(|entry| entry.file_type().is_file() && entry.file_name() == file_name.as_str())
            .map(|entry| entry.into_path())
    })
}

/// Taps (other than Homebrew's own) that provide a package with this name
pub fn taps_providing(taps_dir: &Path, kind: PackageKind, name: &str) -> Result<Vec<String>> {
    Ok(list_taps(taps_dir)?
        .into_iter()
        .filter(|tap| tap != kind.core_tap())
        .filter(|tap| find_package_file(taps_dir, tap, kind, name).is_some())
        .collect())
}

/// Read the `desc "..."` line of a formula or cask definition
pub fn read_description(path: &Path) -> Option<String> {
    let content = fs::read_to_string(path).ok()?;
    content
        .lines()
        .filter_map(parse_line)
        .find(|entry| entry.kind.keyword() == "desc")
        .map(|entry| entry.name)
}
