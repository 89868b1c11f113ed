//! Live package lookup
//!
//! Builds the per-invocation [`Catalog`] the engine resolves against. Every
//! requested name is looked up as given, and so is its short name, so the
//! engine can tell whether a bare `brew "foo"` line means this package.
//!
//! Sources, in order: the Homebrew JSON API (Homebrew's own taps), then the
//! locally installed taps, then the qualified names in the same batch (a tap
//! named there is about to be written to the Brewfile).

use crate::api::BrewApi;
use crate::engine::PackageRequest;
use crate::entry::PackageKind;
use crate::error::BrufileError;
use crate::resolver::{Catalog, PackageReference, ResolveError};
use crate::tap;
use futures::future::join_all;
use std::path::{Path, PathBuf};

/// A name split into optional tap and short name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedName {
    pub tap: Option<String>,
    pub short_name: String,
}

impl QualifiedName {
    /// `user/repo/name` → tap `user/repo`; anything else is a short name
    pub fn parse(name: &str) -> Self {
        let parts: Vec<&str> = name.split('/').collect();
        if parts.len() == 3 && parts.iter().all(|p| !p.is_empty()) {
            let tap = tap::normalize_tap_name(&format!("{}/{}", parts[0], parts[1]))
                .unwrap_or_else(|_| format!("{}/{}", parts[0], parts[1]));
            Self {
                tap: Some(tap),
                short_name: parts[2].to_string(),
            }
        } else {
            Self {
                tap: None,
                short_name: name.to_string(),
            }
        }
    }
}

/// Lookups made while resolving one request: (kind, name as looked up, outcome)
type Lookups = Vec<(PackageKind, String, Result<PackageReference, ResolveError>)>;

pub struct Lookup<'a> {
    api: &'a BrewApi,
    taps_dir: PathBuf,
    /// Qualified names in the current batch
    batch: Vec<QualifiedName>,
}

impl<'a> Lookup<'a> {
    pub fn new(api: &'a BrewApi, taps_dir: &Path) -> Self {
        Self {
            api,
            taps_dir: taps_dir.to_path_buf(),
            batch: Vec::new(),
        }
    }

    fn api_error(kind: PackageKind, name: &str, err: BrufileError) -> ResolveError {
        match err {
            BrufileError::FormulaNotFound(_) | BrufileError::CaskNotFound(_) => {
                ResolveError::not_found(kind, name)
            }
            other => ResolveError {
                kind,
                name: name.to_string(),
                reason: other.to_string(),
            },
        }
    }

    /// Resolve a bare short name
    async fn resolve_short(
        &self,
        kind: PackageKind,
        name: &str,
    ) -> Result<PackageReference, ResolveError> {
        match self.api.fetch_package(kind, name).await {
            Ok(package) => return Ok(package),
            Err(e @ (BrufileError::FormulaNotFound(_) | BrufileError::CaskNotFound(_))) => {
                tracing::debug!("{}", e);
            }
            Err(e) => return Err(Self::api_error(kind, name, e)),
        }

        let local = tap::taps_providing(&self.taps_dir, kind, name).unwrap_or_else(|e| {
            tracing::warn!("could not read taps: {}", e);
            Vec::new()
        });
        match local.as_slice() {
            [only] => return Ok(self.tapped(kind, only, name)),
            [] => {}
            many => {
                return Err(ResolveError {
                    kind,
                    name: name.to_string(),
                    reason: format!(
                        "{} \"{}\" exists in multiple taps: {}",
                        kind.label(),
                        name,
                        many.join(", ")
                    ),
                });
            }
        }

        let mut batch_taps: Vec<&str> = self
            .batch
            .iter()
            .filter(|q| q.short_name == name)
            .filter_map(|q| q.tap.as_deref())
            .filter(|t| *t != kind.core_tap())
            .collect();
        batch_taps.sort_unstable();
        batch_taps.dedup();
        match batch_taps.as_slice() {
            [only] => Ok(self.tapped(kind, only, name)),
            _ => Err(ResolveError::not_found(kind, name)),
        }
    }

    /// Resolve a name as the user typed it
    async fn resolve_name(
        &self,
        kind: PackageKind,
        name: &str,
    ) -> Result<PackageReference, ResolveError> {
        let qualified = QualifiedName::parse(name);
        let Some(tap_name) = qualified.tap else {
            return self.resolve_short(kind, name).await;
        };

        if tap_name == kind.core_tap() {
            return self
                .api
                .fetch_package(kind, &qualified.short_name)
                .await
                .map_err(|e| Self::api_error(kind, name, e));
        }

        if tap::is_tapped(&self.taps_dir, &tap_name) {
            let file =
                tap::find_package_file(&self.taps_dir, &tap_name, kind, &qualified.short_name);
            return match file {
                Some(_) => Ok(self.tapped(kind, &tap_name, &qualified.short_name)),
                None => Err(ResolveError::not_found(kind, name)),
            };
        }

        // Not tapped locally: taken on trust, the tap line makes it installable
        Ok(PackageReference::tapped(kind, &tap_name, &qualified.short_name))
    }

    fn tapped(&self, kind: PackageKind, tap_name: &str, name: &str) -> PackageReference {
        let package = PackageReference::tapped(kind, tap_name, name);
        match tap::find_package_file(&self.taps_dir, tap_name, kind, name)
            .and_then(|path| tap::read_description(&path))
        {
            Some(desc) => package.with_description(desc),
            None => package,
        }
    }

    /// A qualified name in a tap that is not installed cannot be told apart
    /// as formula or cask; the user has to say which.
    fn unknown_kind(&self, name: &str) -> Option<ResolveError> {
        let tap_name = QualifiedName::parse(name).tap?;
        let core = [PackageKind::Formula.core_tap(), PackageKind::Cask.core_tap()];
        if core.contains(&tap_name.as_str()) || tap::is_tapped(&self.taps_dir, &tap_name) {
            return None;
        }
        Some(ResolveError {
            kind: PackageKind::Formula,
            name: name.to_string(),
            reason: format!(
                "Tap {} is not installed, so \"{}\" could be a formula or a cask; \
                 pass --formula or --cask",
                tap_name, name
            ),
        })
    }

    /// Resolve one requested name, trying formula before cask when no kind
    /// is given. Returns the request to hand the engine and every lookup
    /// made along the way.
    async fn resolve_request(
        &self,
        name: &str,
        kind: Option<PackageKind>,
    ) -> (PackageRequest, Lookups) {
        let kinds = match kind {
            Some(kind) => vec![kind],
            None => {
                if let Some(error) = self.unknown_kind(name) {
                    let kind = PackageKind::Formula;
                    return (
                        PackageRequest::new(kind, name),
                        vec![(kind, name.to_string(), Err(error))],
                    );
                }
                vec![PackageKind::Formula, PackageKind::Cask]
            }
        };

        let mut first_error = None;
        for kind in kinds {
            match self.resolve_name(kind, name).await {
                Ok(package) => {
                    let mut found = Vec::new();
                    if package.short_name != name {
                        let short = self.resolve_short(kind, &package.short_name).await;
                        found.push((kind, package.short_name.clone(), short));
                    }
                    found.push((kind, name.to_string(), Ok(package)));
                    return (PackageRequest::new(kind, name), found);
                }
                Err(e) => {
                    first_error.get_or_insert((kind, e));
                }
            }
        }

        let (kind, error) = first_error.unwrap_or_else(|| {
            (
                PackageKind::Formula,
                ResolveError::not_found(PackageKind::Formula, name),
            )
        });
        (
            PackageRequest::new(kind, name),
            vec![(kind, name.to_string(), Err(error))],
        )
    }

    /// Resolve a whole batch concurrently
    pub async fn prefetch(
        mut self,
        names: &[String],
        kind: Option<PackageKind>,
    ) -> (Vec<PackageRequest>, Catalog) {
        self.batch = names
            .iter()
            .map(|name| QualifiedName::parse(name))
            .filter(|q| q.tap.is_some())
            .collect();

        let resolved = join_all(names.iter().map(|name| self.resolve_request(name, kind))).await;

        let mut requests = Vec::with_capacity(names.len());
        let mut catalog = Catalog::new();
        for (request, lookups) in resolved {
            for (kind, name, outcome) in lookups {
                catalog.insert(kind, &name, outcome);
            }
            requests.push(request);
        }
        (requests, catalog)
    }
}
