//! `brufile add` - append formulae and casks to a Brewfile

use super::utils::{error, identifier, ohai, plural, resolve_packages, success, warn};
use brufile::config::Config;
use brufile::engine::{self, AddOptions, AddOutcome, AddReport};
use brufile::entry::PackageKind;
use brufile::error::{BrufileError, Result};
use brufile::locate::{self, Selection};
use brufile::BrewApi;

pub struct AddArgs {
    pub names: Vec<String>,
    pub kind: Option<PackageKind>,
    pub describe: bool,
    pub selection: Selection,
    pub quiet: bool,
}

pub async fn add(api: &BrewApi, config: &Config, args: &AddArgs) -> Result<()> {
    let path = locate::locate(&args.selection, config)?;
    let (requests, catalog) =
        resolve_packages(api, config, &args.names, args.kind, args.quiet).await;

    let options = AddOptions {
        quote_style: config.quote_style,
        describe: args.describe || config.describe,
        ..AddOptions::default()
    };
    let report = engine::add(&path, &requests, &catalog, &options)?;

    if report.created_file {
        warn(false, &format!("'{}' did not exist and was created", path.display()));
    }
    ohai(args.quiet, &format!("Using Brewfile at '{}'", path.display()));
    render(&report, args.quiet);

    let failed = report
        .outcomes
        .iter()
        .filter(|o| matches!(o, AddOutcome::Unresolved(_)))
        .count();
    if failed > 0 {
        return Err(BrufileError::CommandFailed(format!(
            "{} could not be added",
            plural(failed, "package")
        )));
    }
    Ok(())
}

fn render(report: &AddReport, quiet: bool) {
    for outcome in &report.outcomes {
        match outcome {
            AddOutcome::TapAdded { namespace } => success(
                quiet,
                &format!("Added Tap {} to Brewfile", identifier(namespace)),
            ),
            AddOutcome::Added { kind, full_name } => success(
                quiet,
                &format!("Added {} {} to Brewfile", kind, identifier(full_name)),
            ),
            AddOutcome::AlreadyPresent { kind, full_name } => warn(
                quiet,
                &format!("{} '{}' is already in the Brewfile. Skipping.", kind, full_name),
            ),
            AddOutcome::Unresolved(e) => error(&e.to_string()),
        }
    }
}
