//! Host architecture classification for archid.
//!
//! [`ArchResolver`] turns the string a host reports for its machine type
//! into an [`Arch`] and says which other architectures' artifacts it can run.

pub mod config;
pub mod error;
pub mod glob;
pub mod resolver;
pub mod table;

pub use archid_schema::{Arch, DEFAULT_ARCH};
pub use error::{ConfigError, TableError};
pub use glob::Glob;
pub use resolver::{ArchResolver, Resolution};
pub use table::{ArchTable, ArchTableBuilder, PatternEntry};
