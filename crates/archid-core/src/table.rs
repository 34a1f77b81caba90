//! Pattern and compatibility tables.
//!
//! An [`ArchTable`] is built once and never modified. The built-in table
//! covers the strings `uname -m` reports on common Linux hosts; custom
//! tables go through [`ArchTableBuilder`] so they are validated the same way.

use crate::error::TableError;
use crate::glob::Glob;
use archid_schema::{Arch, DEFAULT_ARCH};
use std::collections::{BTreeMap, HashSet};

/// One row of the pattern table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternEntry {
    /// Glob tested against the raw architecture string.
    pub glob: Glob,
    /// Architecture reported when the glob matches.
    pub arch: Arch,
}

/// Immutable lookup data owned by a resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchTable {
    patterns: Vec<PatternEntry>,
    compat: BTreeMap<Arch, Vec<Arch>>,
    default_arch: Arch,
}

/// Built-in patterns, in match order.
const BUILTIN_PATTERNS: &[(&str, Arch)] = &[
    ("arm", Arch::ArmV6),
    ("armv6l", Arch::ArmV6),
    ("armv7l", Arch::ArmV7),
    ("aarch64", Arch::ArmV8),
    ("armv8*", Arch::ArmV8),
    ("x86_64", Arch::Amd64),
    ("amd64", Arch::Amd64),
    // 32-bit, but images for it are scarce; treated as amd64
    ("i386", Arch::Amd64),
];

/// Built-in compatibility lists. Each list is complete, nothing is inferred.
const BUILTIN_COMPAT: &[(Arch, &[Arch])] = &[
    // ARMv8 can run every ARM image.
    (Arch::ArmV8, &[Arch::ArmV6, Arch::ArmV7]),
    (Arch::ArmV7, &[Arch::ArmV6]),
];

impl ArchTable {
    /// The built-in table.
    pub fn builtin() -> Self {
        Self {
            patterns: BUILTIN_PATTERNS
                .iter()
                .map(|&(glob, arch)| PatternEntry {
                    glob: Glob::new(glob),
                    arch,
                })
                .collect(),
            compat: BUILTIN_COMPAT
                .iter()
                .map(|&(target, list)| (target, list.to_vec()))
                .collect(),
            default_arch: DEFAULT_ARCH,
        }
    }

    /// Start an empty table.
    pub fn builder() -> ArchTableBuilder {
        ArchTableBuilder::default()
    }

    /// Patterns in match order.
    pub fn patterns(&self) -> &[PatternEntry] {
        &self.patterns
    }

    /// First pattern matching `raw`, if any.
    pub fn find(&self, raw: &str) -> Option<&PatternEntry> {
        self.patterns.iter().find(|entry| entry.glob.matches(raw))
    }

    /// Architectures whose images run on `target`, excluding `target` itself.
    pub fn compat(&self, target: Arch) -> &[Arch] {
        self.compat.get(&target).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Architecture reported for input no pattern matches.
    pub fn default_arch(&self) -> Arch {
        self.default_arch
    }
}

impl Default for ArchTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Assembles and validates an [`ArchTable`].
///
/// Patterns keep the order they are added in; the first match wins.
#[derive(Debug, Clone)]
pub struct ArchTableBuilder {
    patterns: Vec<PatternEntry>,
    compat: BTreeMap<Arch, Vec<Arch>>,
    default_arch: Arch,
}

impl Default for ArchTableBuilder {
    fn default() -> Self {
        Self {
            patterns: Vec::new(),
            compat: BTreeMap::new(),
            default_arch: DEFAULT_ARCH,
        }
    }
}

impl ArchTableBuilder {
    /// Append a pattern after every pattern added so far.
    pub fn pattern(mut self, glob: impl Into<Glob>, arch: Arch) -> Self {
        self.patterns.push(PatternEntry {
            glob: glob.into(),
            arch,
        });
        self
    }

    /// Set the full compatibility list for `target`, replacing any earlier one.
    pub fn compat(mut self, target: Arch, compatible: impl IntoIterator<Item = Arch>) -> Self {
        self.compat.insert(target, compatible.into_iter().collect());
        self
    }

    /// Override the fallback architecture.
    pub fn default_arch(mut self, arch: Arch) -> Self {
        self.default_arch = arch;
        self
    }

    /// Validate and freeze the table.
    ///
    /// # Errors
    ///
    /// Returns [`TableError`] if a pattern is empty or repeated, if
    /// `Arch::Unknown` appears anywhere, or if a compatibility list names
    /// its own key or repeats an entry.
    pub fn build(self) -> Result<ArchTable, TableError> {
        let mut seen = HashSet::new();
        for (i, entry) in self.patterns.iter().enumerate() {
            if entry.glob.as_str().is_empty() {
                return Err(TableError::EmptyPattern(i));
            }
            if !seen.insert(entry.glob.as_str()) {
                return Err(TableError::DuplicatePattern(entry.glob.to_string()));
            }
            if !entry.arch.is_known() {
                return Err(TableError::UnknownTarget(format!(
                    "target of pattern '{}'",
                    entry.glob
                )));
            }
        }

        for (&target, list) in &self.compat {
            if !target.is_known() {
                return Err(TableError::UnknownTarget("compatibility key".to_string()));
            }
            if list.contains(&Arch::Unknown) {
                return Err(TableError::UnknownTarget(format!(
                    "compatible architecture of {target}"
                )));
            }
            if list.contains(&target) {
                return Err(TableError::SelfCompatible(target));
            }
            let mut entries = HashSet::new();
            if let Some(&arch) = list.iter().find(|&&arch| !entries.insert(arch)) {
                return Err(TableError::DuplicateCompatEntry { target, arch });
            }
        }

        if !self.default_arch.is_known() {
            return Err(TableError::UnknownTarget(
                "default architecture".to_string(),
            ));
        }

        Ok(ArchTable {
            patterns: self.patterns,
            compat: self.compat,
            default_arch: self.default_arch,
        })
    }
}
