//! Classify raw architecture strings and answer compatibility questions.

use crate::table::ArchTable;
use archid_schema::Arch;

/// Outcome of [`ArchResolver::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// The recognised architecture, or the table default when nothing matched.
    pub arch: Arch,
    /// Whether a pattern matched. `false` means `arch` is only the fallback.
    pub matched: bool,
}

impl From<Resolution> for (Arch, bool) {
    fn from(r: Resolution) -> Self {
        (r.arch, r.matched)
    }
}

/// Maps host architecture strings (`uname -m` output) onto [`Arch`].
///
/// Holds an immutable [`ArchTable`]; every method is a pure lookup, so a
/// single resolver can be shared across threads freely.
///
/// # Example
///
/// ```
/// use archid_core::ArchResolver;
/// use archid_schema::Arch;
///
/// let resolver = ArchResolver::default();
/// let r = resolver.resolve("armv7l");
/// assert_eq!((r.arch, r.matched), (Arch::ArmV7, true));
/// assert!(resolver.accepts(Arch::ArmV8, Arch::ArmV6));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ArchResolver {
    table: ArchTable,
}

impl ArchResolver {
    /// Create a resolver over `table`.
    pub fn new(table: ArchTable) -> Self {
        Self { table }
    }

    /// The table this resolver consults.
    pub fn table(&self) -> &ArchTable {
        &self.table
    }

    /// Classify `raw` using the first matching pattern.
    ///
    /// Unrecognised input (including the empty string) yields the table's
    /// default architecture with `matched == false`. Callers that must reject
    /// unknown hosts should check the flag or use [`Self::resolve_strict`].
    pub fn resolve(&self, raw: &str) -> Resolution {
        if let Some(entry) = self.table.find(raw) {
            tracing::trace!("Resolved {raw:?} to {} via '{}'", entry.arch, entry.glob);
            return Resolution {
                arch: entry.arch,
                matched: true,
            };
        }

        let arch = self.table.default_arch();
        tracing::debug!("Unrecognised architecture {raw:?}, assuming {arch}");
        Resolution {
            arch,
            matched: false,
        }
    }

    /// Like [`Self::resolve`], but `None` instead of the fallback.
    pub fn resolve_strict(&self, raw: &str) -> Option<Arch> {
        self.table.find(raw).map(|entry| entry.arch)
    }

    /// Architectures whose images run on `target`.
    ///
    /// Does not include `target` itself, and is empty for architectures with
    /// no declared compatibility.
    pub fn compatible_with(&self, target: Arch) -> &[Arch] {
        self.table.compat(target)
    }

    /// Whether an artifact built for `candidate` runs on `target`.
    pub fn accepts(&self, target: Arch, candidate: Arch) -> bool {
        if !target.is_known() || !candidate.is_known() {
            return false;
        }
        candidate == target || self.compatible_with(target).contains(&candidate)
    }

    /// Acceptable architectures for `target`, exact match first.
    ///
    /// This is the order to try when choosing between published artifacts.
    pub fn candidates(&self, target: Arch) -> Vec<Arch> {
        if !target.is_known() {
            return Vec::new();
        }
        std::iter::once(target)
            .chain(self.compatible_with(target).iter().copied())
            .collect()
    }
}
