//! Membership index over a parsed Brewfile
//!
//! Answers "is this package already declared?" per kind. A short-name match
//! only counts when the short name resolves today to the same full name;
//! otherwise `brew "foo"` could belong to a different tap's `foo`.

use crate::entry::{EntryKind, ManifestEntry, PackageKind};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MembershipIndex {
    taps: HashSet<String>,
    formulae: HashSet<String>,
    casks: HashSet<String>,
}

impl MembershipIndex {
    /// Build from entries in a single pass; `Other` entries are ignored
    pub fn build<'a>(entries: impl IntoIterator<Item = &'a ManifestEntry>) -> Self {
        let mut index = Self::default();
        for entry in entries {
            match &entry.kind {
                EntryKind::Tap => {
                    index.taps.insert(entry.name.clone());
                }
                EntryKind::Formula => {
                    index.formulae.insert(entry.name.clone());
                }
                EntryKind::Cask => {
                    index.casks.insert(entry.name.clone());
                }
                EntryKind::Other(_) => {}
            }
        }
        index
    }

    fn names(&self, kind: PackageKind) -> &HashSet<String> {
        match kind {
            PackageKind::Formula => &self.formulae,
            PackageKind::Cask => &self.casks,
        }
    }

    fn names_mut(&mut self, kind: PackageKind) -> &mut HashSet<String> {
        match kind {
            PackageKind::Formula => &mut self.formulae,
            PackageKind::Cask => &mut self.casks,
        }
    }

    /// The name-disambiguation rule shared by add and drop
    pub fn contains(
        &self,
        kind: PackageKind,
        full_name: &str,
        short_name: &str,
        short_name_resolves_to_full_name: bool,
    ) -> bool {
        let names = self.names(kind);
        names.contains(full_name)
            || (short_name_resolves_to_full_name && names.contains(short_name))
    }

    pub fn has_tap(&self, namespace: &str) -> bool {
        self.taps.contains(namespace)
    }

    pub fn insert_tap(&mut self, namespace: &str) {
        self.taps.insert(namespace.to_string());
    }

    pub fn insert(&mut self, kind: PackageKind, name: &str) {
        self.names_mut(kind).insert(name.to_string());
    }

    pub fn remove(&mut self, kind: PackageKind, name: &str) {
        self.names_mut(kind).remove(name);
    }
}
