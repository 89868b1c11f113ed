//! Brewfile location

use crate::config::Config;
use crate::error::{BrufileError, Result};
use std::path::{Path, PathBuf};

/// Which Brewfile the user asked for
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// `--file`
    pub file: Option<PathBuf>,
    /// `--global`
    pub global: bool,
}

/// Resolve the Brewfile path: `--file`, then `--global`, then
/// `HOMEBREW_BUNDLE_FILE`, then `./Brewfile`
pub fn locate(selection: &Selection, config: &Config) -> Result<PathBuf> {
    if selection.global && selection.file.is_some() {
        return Err(BrufileError::InvalidLocation(
            "--global and --file cannot be used together".to_string(),
        ));
    }

    let path = if let Some(file) = &selection.file {
        file.clone()
    } else if selection.global {
        config.global_file.clone()
    } else if let Some(file) = &config.bundle_file {
        file.clone()
    } else {
        PathBuf::from("Brewfile")
    };

    if path == Path::new("-") {
        return Err(BrufileError::InvalidLocation(
            "stdin/stdout ('-') cannot be edited in place; pass a file path".to_string(),
        ));
    }

    Ok(path)
}
