/// Color support with NO_COLOR and CLICOLOR environment variable handling
///
/// Implements the NO_COLOR standard (https://no-color.org/) and traditional
/// CLICOLOR conventions. Colors are off when stdout is not a terminal unless
/// CLICOLOR_FORCE is set.
use colored::control;

/// Decide whether to colorize from the environment and TTY status
pub fn should_colorize<F>(var: F, is_tty: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    // NO_COLOR takes precedence over everything
    if var("NO_COLOR").is_some() {
        return false;
    }

    if var("CLICOLOR_FORCE").is_some_and(|v| v != "0") {
        return true;
    }

    if var("CLICOLOR").is_some_and(|v| v == "0") {
        return false;
    }

    is_tty
}

/// Configure `colored` for the whole process. Call early in main().
pub fn init_colors() {
    let is_tty = std::io::IsTerminal::is_terminal(&std::io::stdout());
    control::set_override(should_colorize(|key| std::env::var(key).ok(), is_tty));
}
