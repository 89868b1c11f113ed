//! Library interface for brufile
//!
//! The core is the Brewfile mutation engine: [`parser`] reads a Brewfile into
//! typed entries, [`index`] answers membership questions, [`resolver`] is the
//! seam to package lookup, [`engine`] plans and applies add/drop, and
//! [`writer`] does the file I/O. [`api`], [`tap`] and [`lookup`] provide a
//! live resolver backed by the Homebrew API and local taps.
//!
//! ```no_run
//! use brufile::engine::{self, AddOptions, PackageRequest};
//! use brufile::entry::PackageKind;
//! use brufile::resolver::{Catalog, PackageReference};
//! use std::path::Path;
//!
//! let catalog = Catalog::new().with(PackageReference::core(PackageKind::Formula, "wget"));
//! let report = engine::add(
//!     Path::new("Brewfile"),
//!     &[PackageRequest::formula("wget")],
//!     &catalog,
//!     &AddOptions::default(),
//! )?;
//! println!("{:?}", report.outcomes);
//! # Ok::<(), brufile::BrufileError>(())
//! ```

pub mod api;
pub mod config;
pub mod engine;
pub mod entry;
pub mod error;
pub mod index;
pub mod locate;
pub mod lookup;
pub mod parser;
pub mod resolver;
pub mod tap;
pub mod writer;

// Re-export commonly used types
pub use api::BrewApi;
pub use engine::{
    AddOptions, AddOutcome, AddReport, DropOutcome, DropReport, PackageRequest, add, drop,
};
pub use entry::{EntryKind, ManifestEntry, PackageKind, QuoteStyle};
pub use error::{BrufileError, Result};
pub use parser::{Brewfile, parse};
pub use resolver::{Catalog, PackageReference, PackageResolver, ResolveError};
