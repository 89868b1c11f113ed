//! `brufile view` - print the Brewfile with `cat`, or `bat` when HOMEBREW_BAT is set

use brufile::config::Config;
use brufile::error::{BrufileError, Result};
use brufile::locate::{self, Selection};
use std::path::Path;
use std::process::Command;

fn bat_available() -> bool {
    Command::new("bat")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

pub(super) fn pager_command(config: &Config, path: &Path) -> Command {
    let mut command = if config.use_bat {
        let mut bat = Command::new("bat");
        if let Some(bat_config) = &config.bat_config_path {
            bat.env("BAT_CONFIG_PATH", bat_config);
        }
        bat
    } else {
        Command::new("cat")
    };
    command.arg(path);
    command
}

pub fn view(config: &Config, selection: &Selection) -> Result<()> {
    let path = locate::locate(selection, config)?;
    if !path.is_file() {
        return Err(BrufileError::InvalidLocation(format!(
            "No Brewfile found at '{}'",
            path.display()
        )));
    }

    if config.use_bat && !bat_available() {
        return Err(BrufileError::CommandFailed(
            "HOMEBREW_BAT is set but bat is not installed (brew install bat)".to_string(),
        ));
    }

    let status = pager_command(config, &path).status()?;
    if !status.success() {
        return Err(BrufileError::CommandFailed(format!("pager exited with {}", status)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    #[test]
    fn test_cat_by_default() {
        let command = pager_command(&Config::default(), Path::new("Brewfile"));
        assert_eq!(command.get_program(), "cat");
        assert_eq!(command.get_args().collect::<Vec<_>>(), vec!["Brewfile"]);
    }

    #[test]
    fn test_bat_with_config_path() {
        let config = Config {
            use_bat: true,
            bat_config_path: Some("/etc/bat.conf".to_string()),
            ..Config::default()
        };
        let command = pager_command(&config, Path::new("Brewfile"));
        assert_eq!(command.get_program(), "bat");
        let envs: Vec<_> = command.get_envs().collect();
        assert_eq!(
            envs,
            vec![(OsStr::new("BAT_CONFIG_PATH"), Some(OsStr::new("/etc/bat.conf")))]
        );
    }
}
