//! Shared output and lookup helpers for command implementations

use brufile::config::Config;
use brufile::engine::PackageRequest;
use brufile::entry::PackageKind;
use brufile::lookup::Lookup;
use brufile::resolver::Catalog;
use brufile::BrewApi;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// `==> message`, suppressed by --quiet
pub(super) fn ohai(quiet: bool, message: &str) {
    if !quiet {
        println!("{} {}", "==>".bold().blue(), message.bold());
    }
}

/// Success line, suppressed by --quiet
pub(super) fn success(quiet: bool, message: &str) {
    if !quiet {
        println!("{} {}", "✓".green(), message);
    }
}

/// Warning on stderr, suppressed by --quiet
pub(super) fn warn(quiet: bool, message: &str) {
    if !quiet {
        eprintln!("{} {}", "⚠".yellow(), message);
    }
}

/// Error on stderr; always shown
pub(super) fn error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

pub(super) fn identifier(name: &str) -> String {
    name.cyan().to_string()
}

fn spinner(quiet: bool, message: String) -> ProgressBar {
    let is_tty = std::io::IsTerminal::is_terminal(&std::io::stdout());
    if quiet || !is_tty {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Look up every requested name before the Brewfile is touched
pub(super) async fn resolve_packages(
    api: &BrewApi,
    config: &Config,
    names: &[String],
    kind: Option<PackageKind>,
    quiet: bool,
) -> (Vec<PackageRequest>, Catalog) {
    let pb = spinner(quiet, format!("Resolving {} packages...", names.len()));
    let resolved = Lookup::new(api, &config.taps_path())
        .prefetch(names, kind)
        .await;
    pb.finish_and_clear();
    resolved
}

/// "1 package" / "2 packages"
pub(super) fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}
