//! Command implementations for the brufile CLI
//!
//! - **add**: Append formulae and casks (and the taps they need) to a Brewfile
//! - **drop**: Remove formulae and casks from a Brewfile
//! - **file**: Open the Brewfile in an editor
//! - **view**: Print the Brewfile
//! - **utils**: Shared output and lookup helpers (internal)

pub mod add;
pub mod drop;
pub mod file;
pub mod view;
pub(crate) mod utils;

pub use add::{AddArgs, add};
pub use drop::{DropArgs, drop};
pub use file::file;
pub use view::view;
