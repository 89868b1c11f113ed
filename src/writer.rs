//! Brewfile I/O
//!
//! Appends go out as one write of the whole block. Rewrites go to a temporary
//! file beside the target and are renamed over it, so a reader sees either
//! the old Brewfile or the new one.
//!
//! There is no cross-process locking: two invocations racing on the same
//! Brewfile can lose one of the updates (last writer wins).

use crate::error::Result;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

/// Create an empty Brewfile if none exists. Returns true if one was created.
pub fn ensure_exists(path: &Path) -> Result<bool> {
    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(_) => {
            tracing::debug!("created empty Brewfile at {}", path.display());
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(e.into()),
    }
}

pub fn read(path: &Path) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}

/// Append `lines` (each gets a `\n`), optionally repairing a missing final
/// newline first. Returns the number of lines appended.
pub fn append_lines(path: &Path, repair_newline: bool, lines: &[String]) -> Result<usize> {
    if lines.is_empty() {
        return Ok(0);
    }

    let mut block = String::new();
    if repair_newline {
        block.push('\n');
    }
    for line in lines {
        block.push_str(line);
        block.push('\n');
    }

    let mut file = OpenOptions::new().append(true).open(path)?;
    file.write_all(block.as_bytes())?;
    file.flush()?;

    tracing::debug!("appended {} lines to {}", lines.len(), path.display());
    Ok(lines.len())
}

/// Replace the Brewfile with `retained`, each item a line with its own
/// terminator (the last may lack one)
pub fn rewrite_file<I>(path: &Path, retained: I) -> Result<()>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    // Follow symlinks so a linked ~/.Brewfile stays a link
    let target = fs::canonicalize(path)?;
    let dir = target.parent().unwrap_or_else(|| Path::new("."));

    let mut tmp = tempfile::Builder::new()
        .prefix(".Brewfile.")
        .suffix(".tmp")
        .tempfile_in(dir)?;
    for line in retained {
        tmp.write_all(line.as_ref().as_bytes())?;
    }
    tmp.as_file().sync_all()?;

    let permissions = fs::metadata(&target)?.permissions();
    fs::set_permissions(tmp.path(), permissions)?;

    tmp.persist(&target).map_err(|e| e.error)?;
    tracing::debug!("rewrote {}", target.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_exists_creates_empty_file_once() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Brewfile");

        assert!(ensure_exists(&path).unwrap());
        assert_eq!(fs::read(&path).unwrap().len(), 0);

        fs::write(&path, "brew \"a\"\n").unwrap();
        assert!(!ensure_exists(&path).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "brew \"a\"\n");
    }

    #[test]
    fn test_append_repairs_newline() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Brewfile");
        fs::write(&path, "brew \"a\"").unwrap();

        let n = append_lines(&path, true, &["brew \"b\"".to_string()]).unwrap();
        assert_eq!(n, 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), "brew \"a\"\nbrew \"b\"\n");
    }

    #[test]
    fn test_append_nothing_leaves_file_alone() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Brewfile");
        fs::write(&path, "brew \"a\"").unwrap();

        assert_eq!(append_lines(&path, true, &[]).unwrap(), 0);
        assert_eq!(fs::read_to_string(&path).unwrap(), "brew \"a\"");
    }

    #[test]
    fn test_rewrite_replaces_contents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Brewfile");
        fs::write(&path, "tap \"x/y\"\nbrew \"x/y/z\"\n").unwrap();

        rewrite_file(&path, ["tap \"x/y\"\n"]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "tap \"x/y\"\n");

        // No temporary files left behind
        let leftovers: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(leftovers.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_rewrite_through_symlink() {
        let dir = TempDir::new().unwrap();
        let real = dir.path().join("dotfiles.Brewfile");
        let link = dir.path().join(".Brewfile");
        fs::write(&real, "brew \"a\"\nbrew \"b\"\n").unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();

        rewrite_file(&link, vec!["brew \"a\"\n".to_string()]).unwrap();

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_to_string(&real).unwrap(), "brew \"a\"\n");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent");
        assert!(read(&path).is_err());
        assert!(append_lines(&path, false, &["brew \"a\"".to_string()]).is_err());
        assert!(rewrite_file(&path, Vec::<String>::new()).is_err());
    }
}
