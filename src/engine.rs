//! Brewfile mutation engine
//!
//! `add` appends new lines to the end of the Brewfile and `drop` rewrites it
//! without the matching lines. Both work from one snapshot of the file taken
//! at the start of the call: a batch is planned entirely in memory against
//! that snapshot (plus an index updated as the batch goes) and written once.
//!
//! Per-package problems (unknown names, a drop that matches no line) are
//! recorded in the report and never stop the rest of the batch. I/O errors
//! abort the whole call.

use crate::entry::{PackageKind, QuoteStyle};
use crate::error::Result;
use crate::index::MembershipIndex;
use crate::parser::Brewfile;
use crate::resolver::{NameResolver, PackageReference, PackageResolver, ResolveError};
use crate::writer;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Taps whose packages install without a `tap` line
pub const DEFAULT_IMPLICIT_NAMESPACES: &[&str] = &["homebrew/core", "homebrew/cask"];

/// A package named on the command line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRequest {
    pub kind: PackageKind,
    /// Short or fully-qualified name as the user typed it
    pub identifier: String,
}

impl PackageRequest {
    pub fn new(kind: PackageKind, identifier: impl Into<String>) -> Self {
        Self {
            kind,
            identifier: identifier.into(),
        }
    }

    pub fn formula(identifier: impl Into<String>) -> Self {
        Self::new(PackageKind::Formula, identifier)
    }

    pub fn cask(identifier: impl Into<String>) -> Self {
        Self::new(PackageKind::Cask, identifier)
    }
}

#[derive(Debug, Clone)]
pub struct AddOptions {
    pub quote_style: QuoteStyle,
    /// Write the package description as `#` comments above its line
    pub describe: bool,
    pub implicit_namespaces: Vec<String>,
}

impl Default for AddOptions {
    fn default() -> Self {
        Self {
            quote_style: QuoteStyle::Double,
            describe: false,
            implicit_namespaces: DEFAULT_IMPLICIT_NAMESPACES
                .iter()
                .map(|ns| ns.to_string())
                .collect(),
        }
    }
}

impl AddOptions {
    fn is_implicit(&self, namespace: &str) -> bool {
        self.implicit_namespaces.iter().any(|ns| ns == namespace)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddOutcome {
    /// A `tap` line was written ahead of the package that needed it
    TapAdded { namespace: String },
    Added { kind: PackageKind, full_name: String },
    AlreadyPresent { kind: PackageKind, full_name: String },
    Unresolved(ResolveError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddReport {
    /// The Brewfile did not exist and was created empty
    pub created_file: bool,
    pub lines_appended: usize,
    /// In request order; a `TapAdded` precedes the outcome of its package
    pub outcomes: Vec<AddOutcome>,
}

impl AddReport {
    pub fn has_failures(&self) -> bool {
        self.outcomes
            .iter()
            .any(|o| matches!(o, AddOutcome::Unresolved(_)))
    }
}

/// Lines to append and the outcome of each request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddPlan {
    pub lines: Vec<String>,
    pub outcomes: Vec<AddOutcome>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropOutcome {
    Dropped {
        kind: PackageKind,
        full_name: String,
        lines_removed: usize,
    },
    NotPresent { kind: PackageKind, full_name: String },
    /// The index saw the package but no physical line matched its pattern
    RemovalMismatch { kind: PackageKind, full_name: String },
    Unresolved(ResolveError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropReport {
    pub lines_removed: usize,
    pub outcomes: Vec<DropOutcome>,
}

impl DropReport {
    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(|o| {
            matches!(
                o,
                DropOutcome::RemovalMismatch { .. } | DropOutcome::Unresolved(_)
            )
        })
    }
}

/// Lines to keep and the outcome of each request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropPlan {
    pub retained: Vec<String>,
    pub lines_removed: usize,
    pub outcomes: Vec<DropOutcome>,
}

/// Resolve a request and decide whether a bare short-name line counts as it
fn resolve_request(
    names: &NameResolver<'_>,
    request: &PackageRequest,
) -> std::result::Result<(PackageReference, bool), ResolveError> {
    let package = names.resolve(request.kind, &request.identifier)?;
    let short_matches = names.short_name_matches(&package)?;
    Ok((package, short_matches))
}

/// Plan an add against a parsed Brewfile
pub fn plan_add(
    brewfile: &Brewfile,
    requests: &[PackageRequest],
    resolver: &dyn PackageResolver,
    options: &AddOptions,
) -> AddPlan {
    let names = NameResolver::new(resolver);
    let mut index = MembershipIndex::build(brewfile.entries());
    let mut plan = AddPlan::default();

    for request in requests {
        let (package, short_matches) = match resolve_request(&names, request) {
            Ok(resolved) => resolved,
            Err(e) => {
                tracing::debug!("skipping {}: {}", request.identifier, e);
                plan.outcomes.push(AddOutcome::Unresolved(e));
                continue;
            }
        };

        let namespace = &package.namespace;
        if !index.has_tap(namespace) && !options.is_implicit(namespace) {
            plan.lines.push(options.quote_style.directive("tap", namespace));
            index.insert_tap(namespace);
            plan.outcomes.push(AddOutcome::TapAdded {
                namespace: namespace.clone(),
            });
        }

        let kind = package.kind;
        if index.contains(kind, &package.full_name, &package.short_name, short_matches) {
            tracing::debug!("{} {} already present", kind, package.full_name);
            plan.outcomes.push(AddOutcome::AlreadyPresent {
                kind,
                full_name: package.full_name,
            });
            continue;
        }

        if options.describe
            && let Some(desc) = &package.description
        {
            plan.lines.extend(desc.lines().map(|line| format!("# {line}")));
        }
        plan.lines.push(options.quote_style.directive(kind.keyword(), &package.full_name));
        index.insert(kind, &package.full_name);
        plan.outcomes.push(AddOutcome::Added {
            kind,
            full_name: package.full_name,
        });
    }

    plan
}

/// Add packages to the Brewfile at `path`, creating it if needed
pub fn add(
    path: &Path,
    requests: &[PackageRequest],
    resolver: &dyn PackageResolver,
    options: &AddOptions,
) -> Result<AddReport> {
    let created_file = writer::ensure_exists(path)?;
    let brewfile = Brewfile::parse(&writer::read(path)?);

    let plan = plan_add(&brewfile, requests, resolver, options);
    let lines_appended =
        writer::append_lines(path, brewfile.missing_trailing_newline(), &plan.lines)?;

    Ok(AddReport {
        created_file,
        lines_appended,
        outcomes: plan.outcomes,
    })
}

/// Pattern for the lines declaring a package
///
/// Anchored on the directive keyword so a cask never matches a formula line
/// of the same name. Either quote may close the name, so a malformed
/// `brew "foo'` line the parser skips is still removed along with `foo`.
fn removal_pattern(package: &PackageReference, short_matches: bool) -> Result<Regex> {
    let mut names = regex::escape(&package.full_name);
    if short_matches && package.short_name != package.full_name {
        names.push('|');
        names.push_str(&regex::escape(&package.short_name));
    }
    let pattern = format!(
        r#"^\s*{}\s+["']({})["']"#,
        regex::escape(package.kind.keyword()),
        names
    );
    Ok(Regex::new(&pattern)?)
}

struct PendingRemoval {
    slot: usize,
    kind: PackageKind,
    full_name: String,
    pattern: Regex,
    matched: usize,
}

/// Plan a drop against a parsed Brewfile
pub fn plan_drop(
    brewfile: &Brewfile,
    requests: &[PackageRequest],
    resolver: &dyn PackageResolver,
) -> Result<DropPlan> {
    let index = MembershipIndex::build(brewfile.entries());
    plan_drop_with_index(brewfile, index, requests, resolver)
}

pub(crate) fn plan_drop_with_index(
    brewfile: &Brewfile,
    mut index: MembershipIndex,
    requests: &[PackageRequest],
    resolver: &dyn PackageResolver,
) -> Result<DropPlan> {
    let names = NameResolver::new(resolver);
    let mut outcomes = Vec::with_capacity(requests.len());
    let mut pending = Vec::new();

    for request in requests {
        let (package, short_matches) = match resolve_request(&names, request) {
            Ok(resolved) => resolved,
            Err(e) => {
                tracing::debug!("skipping {}: {}", request.identifier, e);
                outcomes.push(DropOutcome::Unresolved(e));
                continue;
            }
        };

        let kind = package.kind;
        if !index.contains(kind, &package.full_name, &package.short_name, short_matches) {
            outcomes.push(DropOutcome::NotPresent {
                kind,
                full_name: package.full_name,
            });
            continue;
        }

        // A repeat of this package later in the batch is then NotPresent
        index.remove(kind, &package.full_name);
        if short_matches {
            index.remove(kind, &package.short_name);
        }

        pending.push(PendingRemoval {
            slot: outcomes.len(),
            kind,
            pattern: removal_pattern(&package, short_matches)?,
            full_name: package.full_name.clone(),
            matched: 0,
        });

        // Stays a mismatch unless some line matches
        outcomes.push(DropOutcome::RemovalMismatch {
            kind,
            full_name: package.full_name,
        });
    }

    let mut retained = Vec::with_capacity(brewfile.lines().len());
    let mut lines_removed = 0;
    for line in brewfile.lines() {
        let mut matched = false;
        for removal in pending.iter_mut() {
            if removal.pattern.is_match(&line.text) {
                removal.matched += 1;
                matched = true;
            }
        }
        if matched {
            lines_removed += 1;
        } else {
            retained.push(line.text.clone());
        }
    }

    for removal in pending {
        if removal.matched == 0 {
            tracing::warn!(
                "{} {} is indexed but no line matched {}",
                removal.kind,
                removal.full_name,
                removal.pattern.as_str()
            );
            continue;
        }
        outcomes[removal.slot] = DropOutcome::Dropped {
            kind: removal.kind,
            full_name: removal.full_name,
            lines_removed: removal.matched,
        };
    }

    Ok(DropPlan {
        retained,
        lines_removed,
        outcomes,
    })
}

/// Drop packages from the Brewfile at `path`
pub fn drop(
    path: &Path,
    requests: &[PackageRequest],
    resolver: &dyn PackageResolver,
) -> Result<DropReport> {
    let brewfile = Brewfile::parse(&writer::read(path)?);
    let plan = plan_drop(&brewfile, requests, resolver)?;

    if plan.lines_removed > 0 {
        writer::rewrite_file(path, &plan.retained)?;
    }

    Ok(DropReport {
        lines_removed: plan.lines_removed,
        outcomes: plan.outcomes,
    })
}
