//! Errors raised while building or loading architecture tables.
//!
//! Resolving never fails; these only cover table construction.

use archid_schema::{Arch, ParseArchError};
use std::path::PathBuf;
use thiserror::Error;

/// A table failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// The pattern at this position is the empty string.
    #[error("Pattern #{0} is empty")]
    EmptyPattern(usize),

    /// The same pattern text was declared twice.
    #[error("Duplicate pattern: {0}")]
    DuplicatePattern(String),

    /// `Arch::Unknown` was used where a real architecture is required.
    #[error("Unknown architecture used as {0}")]
    UnknownTarget(String),

    /// An architecture listed itself as compatible.
    #[error("{0} lists itself as compatible")]
    SelfCompatible(Arch),

    /// Two compatibility lists were given for the same architecture.
    #[error("Compatibility for {0} declared more than once")]
    DuplicateCompat(Arch),

    /// A compatibility list names the same architecture twice.
    #[error("Compatibility list of {target} repeats {arch}")]
    DuplicateCompatEntry {
        /// Key of the offending list.
        target: Arch,
        /// The repeated entry.
        arch: Arch,
    },
}

/// A table could not be loaded from configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },

    /// The contents are not valid TOML for a table.
    #[error("Failed to parse architecture table: {0}")]
    Parse(#[from] toml::de::Error),

    /// An architecture name was not recognised.
    #[error("Invalid architecture table: {location}: {source}")]
    Arch {
        /// Where the name appeared, e.g. "pattern #2".
        location: String,
        /// The rejected name.
        #[source]
        source: ParseArchError,
    },

    /// The table parsed but failed validation.
    #[error("Invalid architecture table: {0}")]
    Table(#[from] TableError),
}
