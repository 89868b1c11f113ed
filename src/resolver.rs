//! Package resolution seam
//!
//! The mutation engine never looks packages up itself. It asks a
//! [`PackageResolver`] for canonical records and uses [`NameResolver`] to
//! decide whether a bare short name still points at a given full name.

use crate::entry::PackageKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Canonical record for a formula or cask
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageReference {
    pub kind: PackageKind,
    /// Name without the tap, e.g. `wget` or `foo`
    pub short_name: String,
    /// Canonical name; core packages are unqualified (`wget`), tap packages
    /// carry their tap (`user/repo/foo`)
    pub full_name: String,
    /// Tap the package lives in, e.g. `homebrew/core`
    pub namespace: String,
    pub description: Option<String>,
}

impl PackageReference {
    /// A package from Homebrew's own tap for its kind
    pub fn core(kind: PackageKind, name: &str) -> Self {
        Self {
            kind,
            short_name: name.to_string(),
            full_name: name.to_string(),
            namespace: kind.core_tap().to_string(),
            description: None,
        }
    }

    /// A package from a third-party tap
    pub fn tapped(kind: PackageKind, namespace: &str, name: &str) -> Self {
        Self {
            kind,
            short_name: name.to_string(),
            full_name: format!("{namespace}/{name}"),
            namespace: namespace.to_string(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Name the resolver could not map to a package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveError {
    pub kind: PackageKind,
    pub name: String,
    pub reason: String,
}

impl ResolveError {
    pub fn not_found(kind: PackageKind, name: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
            reason: format!(
                "No available {} with the name \"{}\"",
                kind.label().to_lowercase(),
                name
            ),
        }
    }
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.reason)
    }
}

impl std::error::Error for ResolveError {}

/// Maps a name (short or fully-qualified) to a canonical package record
pub trait PackageResolver {
    fn resolve(&self, kind: PackageKind, name: &str) -> Result<PackageReference, ResolveError>;
}

/// In-memory resolver built fresh for each invocation
///
/// The live lookup fills one from the Homebrew API and local taps before any
/// mutation starts; tests fill one by hand.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: HashMap<(PackageKind, String), Result<PackageReference, ResolveError>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of resolving `name`
    pub fn insert(
        &mut self,
        kind: PackageKind,
        name: &str,
        outcome: Result<PackageReference, ResolveError>,
    ) {
        self.entries.insert((kind, name.to_string()), outcome);
    }

    /// Register a package under its full name, and under its short name
    /// unless that short name already resolves elsewhere
    pub fn register(&mut self, package: PackageReference) {
        let kind = package.kind;
        self.entries
            .entry((kind, package.short_name.clone()))
            .or_insert_with(|| Ok(package.clone()));
        self.entries
            .insert((kind, package.full_name.clone()), Ok(package));
    }

    pub fn with(mut self, package: PackageReference) -> Self {
        self.register(package);
        self
    }

    pub fn contains(&self, kind: PackageKind, name: &str) -> bool {
        self.entries.contains_key(&(kind, name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PackageResolver for Catalog {
    fn resolve(&self, kind: PackageKind, name: &str) -> Result<PackageReference, ResolveError> {
        self.entries
            .get(&(kind, name.to_string()))
            .cloned()
            .unwrap_or_else(|| Err(ResolveError::not_found(kind, name)))
    }
}

/// Adapter answering the short-name question for the engine
pub struct NameResolver<'a> {
    inner: &'a dyn PackageResolver,
}

impl<'a> NameResolver<'a> {
    pub fn new(inner: &'a dyn PackageResolver) -> Self {
        Self { inner }
    }

    pub fn resolve(&self, kind: PackageKind, name: &str) -> Result<PackageReference, ResolveError> {
        self.inner.resolve(kind, name)
    }

    /// Full name that `short_name` resolves to right now
    pub fn resolves_to_full_name(
        &self,
        kind: PackageKind,
        short_name: &str,
    ) -> Result<String, ResolveError> {
        self.inner
            .resolve(kind, short_name)
            .map(|package| package.full_name)
    }

    /// Whether a bare `brew "<short>"` line refers to this exact package
    pub fn short_name_matches(&self, package: &PackageReference) -> Result<bool, ResolveError> {
        let full_name = self.resolves_to_full_name(package.kind, &package.short_name)?;
        Ok(full_name == package.full_name)
    }
}
