//! CPU architecture identifiers.

/// A known CPU architecture.
///
/// Binaries and container images are published per architecture; this is
/// the closed set the resolver classifies host strings into. `Unknown` is a
/// placeholder and is never produced by a successful resolve.
///
/// # Example
///
/// ```
/// use archid_schema::Arch;
///
/// let arch: Arch = "armv7".parse().unwrap();
/// assert_eq!(arch.platform(), Some("linux/arm/v7"));
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    /// Not a real architecture.
    Unknown,
    /// `x86_64` / AMD64 (64-bit)
    #[default]
    Amd64,
    /// `ARMv6` (32-bit), e.g. the first Raspberry Pi generation
    ArmV6,
    /// `ARMv7` (32-bit, hard-float)
    ArmV7,
    /// `ARMv8` / `AArch64` (64-bit)
    ArmV8,
}

/// The architecture most published images are built for.
///
/// Input that no pattern recognises resolves to this.
pub const DEFAULT_ARCH: Arch = Arch::Amd64;

/// Error returned when a string is not an architecture name.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown architecture: {0}")]
pub struct ParseArchError(pub String);

impl Arch {
    /// Every known architecture, excluding `Unknown`.
    pub const ALL: [Arch; 4] = [Self::Amd64, Self::ArmV6, Self::ArmV7, Self::ArmV8];

    /// Convert to the canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Amd64 => "amd64",
            Self::ArmV6 => "armv6",
            Self::ArmV7 => "armv7",
            Self::ArmV8 => "armv8",
        }
    }

    /// Docker/OCI platform string for images built for this architecture.
    ///
    /// Returns `None` for [`Arch::Unknown`].
    pub fn platform(self) -> Option<&'static str> {
        match self {
            Self::Unknown => None,
            Self::Amd64 => Some("linux/amd64"),
            Self::ArmV6 => Some("linux/arm/v6"),
            Self::ArmV7 => Some("linux/arm/v7"),
            Self::ArmV8 => Some("linux/arm64"),
        }
    }

    /// Whether this is one of [`Arch::ALL`].
    pub fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl std::fmt::Display for Arch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parses canonical names and the usual aliases.
///
/// This is meant for configuration and user input. Raw `uname -m` output
/// should go through the resolver's pattern table instead.
impl std::str::FromStr for Arch {
    type Err = ParseArchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unknown" | "none" => Ok(Self::Unknown),
            "amd64" | "x86_64" | "x86-64" => Ok(Self::Amd64),
            "armv6" | "armel" => Ok(Self::ArmV6),
            "armv7" | "armhf" => Ok(Self::ArmV7),
            "armv8" | "arm64" | "aarch64" => Ok(Self::ArmV8),
            _ => Err(ParseArchError(s.to_string())),
        }
    }
}
