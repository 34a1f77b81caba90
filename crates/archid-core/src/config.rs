//! Loading custom architecture tables from TOML.
//!
//! ```toml
//! default = "amd64"
//!
//! [[pattern]]
//! glob = "armv8*"
//! arch = "armv8"
//!
//! [compat]
//! armv8 = ["armv6", "armv7"]
//! ```
//!
//! Patterns are matched in the order they appear in the file.

use crate::error::{ConfigError, TableError};
use crate::table::ArchTable;
use archid_schema::Arch;
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TableFile {
    default: Option<String>,
    #[serde(default)]
    pattern: Vec<PatternFile>,
    #[serde(default)]
    compat: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PatternFile {
    glob: String,
    arch: String,
}

impl ArchTable {
    /// Parse a table from TOML text.
    ///
    /// Architecture names accept the same spellings as [`Arch`]'s `FromStr`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML,
    /// [`ConfigError::Arch`] for an unrecognised architecture name, and
    /// [`ConfigError::Table`] if the result fails validation. Two compat keys
    /// naming the same architecture through aliases are a
    /// [`TableError::DuplicateCompat`].
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: TableFile = toml::from_str(content)?;

        let mut builder = ArchTable::builder();
        if let Some(default) = &file.default {
            builder = builder.default_arch(parse_arch(default, "default")?);
        }
        for (i, p) in file.pattern.into_iter().enumerate() {
            let arch = parse_arch(&p.arch, &format!("pattern #{i}"))?;
            builder = builder.pattern(p.glob, arch);
        }
        // Aliases collapse onto one key, e.g. `armv8` and `arm64`.
        let mut targets = HashSet::new();
        for (key, list) in &file.compat {
            let target = parse_arch(key, "compat key")?;
            if !targets.insert(target) {
                return Err(TableError::DuplicateCompat(target).into());
            }
            let list = list
                .iter()
                .map(|name| parse_arch(name, &format!("compat list of {key}")))
                .collect::<Result<Vec<_>, _>>()?;
            builder = builder.compat(target, list);
        }

        Ok(builder.build()?)
    }

    /// Read and parse a table file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the
    /// same errors as [`ArchTable::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_toml_str(&content)?;
        tracing::debug!(
            "Loaded architecture table from {} ({} patterns)",
            path.display(),
            table.patterns().len()
        );
        Ok(table)
    }
}

fn parse_arch(name: &str, location: &str) -> Result<Arch, ConfigError> {
    name.parse().map_err(|source| ConfigError::Arch {
        location: location.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_table() {
        let table = ArchTable::from_toml_str(
            r#"
            default = "armv7"

            [[pattern]]
            glob = "armv8*"
            arch = "armv8"

            [[pattern]]
            glob = "arm*"
            arch = "armhf"

            [compat]
            armv8 = ["armv6", "armv7"]
            "#,
        )
        .unwrap();

        assert_eq!(table.default_arch(), Arch::ArmV7);
        assert_eq!(table.patterns().len(), 2);
        assert_eq!(table.find("armv8l").unwrap().arch, Arch::ArmV8);
        assert_eq!(table.find("armv7l").unwrap().arch, Arch::ArmV7);
        assert_eq!(table.compat(Arch::ArmV8), &[Arch::ArmV6, Arch::ArmV7]);
    }

    #[test]
    fn test_parse_empty_uses_defaults() {
        let table = ArchTable::from_toml_str("").unwrap();
        assert_eq!(table.default_arch(), Arch::Amd64);
        assert!(table.patterns().is_empty());
    }

    #[test]
    fn test_parse_unknown_arch_name() {
        let err = ArchTable::from_toml_str(
            r#"
            [[pattern]]
            glob = "mips"
            arch = "mips"
            "#,
        )
        .unwrap_err();
        assert!(matches!(&err, ConfigError::Arch { location, .. } if location == "pattern #0"));
        assert_eq!(
            err.to_string(),
            "Invalid architecture table: pattern #0: Unknown architecture: mips"
        );
    }

    #[test]
    fn test_parse_bad_name_in_compat_list() {
        let err = ArchTable::from_toml_str(
            r#"
            [compat]
            armv7 = ["armv6", "sparc"]
            "#,
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid architecture table: compat list of armv7: Unknown architecture: sparc"
        );
    }

    #[test]
    fn test_parse_rejects_aliased_compat_keys() {
        let err = ArchTable::from_toml_str(
            r#"
            [compat]
            armv8 = ["armv6", "armv7"]
            arm64 = ["armv7"]
            "#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Table(TableError::DuplicateCompat(Arch::ArmV8))
        ));

        let err = ArchTable::from_toml_str(
            r#"
            [compat]
            arm64 = ["armv7"]
            aarch64 = ["armv6"]
            "#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Table(TableError::DuplicateCompat(Arch::ArmV8))
        ));
    }

    #[test]
    fn test_parse_rejects_aliased_compat_entries() {
        let err = ArchTable::from_toml_str(
            r#"
            [compat]
            armv7 = ["armv6", "armel"]
            "#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Table(TableError::DuplicateCompatEntry {
                target: Arch::ArmV7,
                arch: Arch::ArmV6
            })
        ));
    }

    #[test]
    fn test_parse_rejects_unknown_fields() {
        let err = ArchTable::from_toml_str("fallback = \"amd64\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_parse_validation_error() {
        let err = ArchTable::from_toml_str(
            r#"
            [compat]
            armv7 = ["armv7"]
            "#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Table(TableError::SelfCompatible(Arch::ArmV7))
        ));
    }
}
