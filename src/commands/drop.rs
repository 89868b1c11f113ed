//! `brufile drop` - remove formulae and casks from a Brewfile

use super::utils::{error, identifier, ohai, plural, resolve_packages, success, warn};
use brufile::config::Config;
use brufile::engine::{self, DropOutcome, DropReport};
use brufile::entry::PackageKind;
use brufile::error::{BrufileError, Result};
use brufile::locate::{self, Selection};
use brufile::BrewApi;

pub struct DropArgs {
    pub names: Vec<String>,
    pub kind: Option<PackageKind>,
    pub selection: Selection,
    pub quiet: bool,
}

pub async fn drop(api: &BrewApi, config: &Config, args: &DropArgs) -> Result<()> {
    let path = locate::locate(&args.selection, config)?;
    if !path.is_file() {
        return Err(BrufileError::InvalidLocation(format!(
            "No Brewfile found at '{}'",
            path.display()
        )));
    }

    ohai(args.quiet, &format!("Using Brewfile at '{}'", path.display()));

    let (requests, catalog) =
        resolve_packages(api, config, &args.names, args.kind, args.quiet).await;
    let report = engine::drop(&path, &requests, &catalog)?;
    render(&report, args.quiet);

    let failed = report
        .outcomes
        .iter()
        .filter(|o| {
            matches!(
                o,
                DropOutcome::RemovalMismatch { .. } | DropOutcome::Unresolved(_)
            )
        })
        .count();
    if failed > 0 {
        return Err(BrufileError::CommandFailed(format!(
            "{} could not be dropped",
            plural(failed, "package")
        )));
    }
    Ok(())
}

fn render(report: &DropReport, quiet: bool) {
    for outcome in &report.outcomes {
        match outcome {
            DropOutcome::Dropped { kind, full_name, .. } => success(
                quiet,
                &format!("Dropped {} {} from Brewfile", kind, identifier(full_name)),
            ),
            DropOutcome::NotPresent { kind, full_name } => warn(
                quiet,
                &format!("{} '{}' is not present in the Brewfile. Skipping.", kind, full_name),
            ),
            DropOutcome::RemovalMismatch { kind, full_name } => error(&format!(
                "{} '{}' is listed in the Brewfile but no line matched it; nothing was removed. \
                 Please report this bug.",
                kind, full_name
            )),
            DropOutcome::Unresolved(e) => error(&e.to_string()),
        }
    }
}
