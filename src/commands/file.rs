//! `brufile file` - open the Brewfile in an editor

use super::utils::ohai;
use brufile::config::Config;
use brufile::error::{BrufileError, Result};
use brufile::locate::{self, Selection};
use std::path::Path;
use std::process::Command;

/// Editor command for a path; the editor setting may carry its own arguments
/// (e.g. `code -w`)
pub(super) fn editor_command(editor: &str, path: &Path) -> Result<Command> {
    let mut words = editor.split_whitespace();
    let program = words
        .next()
        .ok_or_else(|| BrufileError::CommandFailed("no editor configured".to_string()))?;

    let mut command = Command::new(program);
    command.args(words).arg(path);
    Ok(command)
}

pub fn file(config: &Config, selection: &Selection, quiet: bool) -> Result<()> {
    let path = locate::locate(selection, config)?;
    ohai(quiet, &format!("Opened '{}'", path.display()));

    let status = editor_command(&config.editor, &path)?.status()?;
    if !status.success() {
        return Err(BrufileError::CommandFailed(format!(
            "{} exited with {}",
            config.editor, status
        )));
    }
    Ok(())
}
