//! Domain value objects: ProjectName, ToolchainVersion, UniqueIdentifier.
//!
//! # Design
//!
//! These are pure value types with equality-by-value and no identity. Each
//! one enforces its invariant at construction, so the rest of the pipeline
//! never re-validates a name, a version, or an identifier.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use uuid::Uuid;

use crate::domain::{
    entities::layout::{APP_FOLDER, COMMON_FOLDER},
    entities::template::Mark,
    error::DomainError,
};

// ── ProjectName ──────────────────────────────────────────────────────────────

/// Characters that cannot appear in a Windows file or folder name.
const RESERVED_PATH_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// The solution / driver name.
///
/// Used verbatim as a folder name, as a file stem, and as the value bound to
/// the project-name mark, so it must be valid in all three roles.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectName(String);

impl ProjectName {
    pub fn parse(input: impl Into<String>) -> Result<Self, DomainError> {
        let name = input.into();
        let reject = |reason: &str| {
            Err(DomainError::InvalidProjectName {
                name: name.clone(),
                reason: reason.into(),
            })
        };

        if name.trim().is_empty() {
            return reject("name cannot be empty");
        }
        if name == "." || name == ".." {
            return reject("name cannot be a relative path component");
        }
        if let Some(c) = name.chars().find(|c| RESERVED_PATH_CHARS.contains(c)) {
            return reject(&format!("name cannot contain '{c}'"));
        }
        if name.chars().any(char::is_control) {
            return reject("name cannot contain control characters");
        }
        if name.ends_with('.') || name.ends_with(' ') {
            return reject("name cannot end with '.' or a space");
        }
        // The driver folder sits next to the fixed app and common folders.
        if let Some(folder) = [APP_FOLDER, COMMON_FOLDER]
            .into_iter()
            .find(|folder| name.eq_ignore_ascii_case(folder))
        {
            return reject(&format!("name collides with the '{folder}' folder"));
        }
        if let Some(mark) = Mark::ALL.iter().find(|m| name.contains(m.token())) {
            return reject(&format!("name cannot contain the mark token {}", mark.token()));
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for ProjectName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

// ── ToolchainVersion ─────────────────────────────────────────────────────────

/// Four-component file version (`W.X.Y.Z`), each component 16 bits.
///
/// The host stores it as one 64-bit word: `W` in the top 16 bits down to `Z`
/// in the bottom 16.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ToolchainVersion {
    pub major: u16,
    pub minor: u16,
    pub build: u16,
    pub revision: u16,
}

impl ToolchainVersion {
    pub const fn new(major: u16, minor: u16, build: u16, revision: u16) -> Self {
        Self {
            major,
            minor,
            build,
            revision,
        }
    }

    /// Unpack a 64-bit version word.
    pub const fn from_packed(word: u64) -> Self {
        Self {
            major: ((word >> 48) & 0xFFFF) as u16,
            minor: ((word >> 32) & 0xFFFF) as u16,
            build: ((word >> 16) & 0xFFFF) as u16,
            revision: (word & 0xFFFF) as u16,
        }
    }

    /// Build from the most- and least-significant halves, as stored in a
    /// version resource.
    pub const fn from_words(ms: u32, ls: u32) -> Self {
        Self::from_packed(((ms as u64) << 32) | ls as u64)
    }

    pub const fn packed(&self) -> u64 {
        ((self.major as u64) << 48)
            | ((self.minor as u64) << 32)
            | ((self.build as u64) << 16)
            | self.revision as u64
    }
}

impl fmt::Display for ToolchainVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.build, self.revision
        )
    }
}

impl FromStr for ToolchainVersion {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| DomainError::InvalidVersion {
            input: s.into(),
            reason: reason.into(),
        };

        let parts: Vec<&str> = s.trim().split('.').collect();
        if parts.len() != 4 {
            return Err(invalid("expected four dot-separated components"));
        }

        let mut components = [0u16; 4];
        for (slot, part) in components.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .map_err(|_| invalid(&format!("'{part}' is not a 16-bit unsigned value")))?;
        }

        let [major, minor, build, revision] = components;
        Ok(Self::new(major, minor, build, revision))
    }
}

impl Serialize for ToolchainVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ── UniqueIdentifier ─────────────────────────────────────────────────────────

/// 128-bit identifier used to cross-link generated manifests.
///
/// Rendered as `{XXXXXXXX-XXXX-XXXX-XXXX-XXXXXXXXXXXX}` in uppercase hex. The
/// nil value is reserved: allocators return it when their entropy or clock
/// source is unavailable, and callers must treat it as a fatal failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UniqueIdentifier(Uuid);

impl UniqueIdentifier {
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub const fn nil() -> Self {
        Self(Uuid::nil())
    }

    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UniqueIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buffer = Uuid::encode_buffer();
        let hex = self.0.hyphenated().encode_upper(&mut buffer);
        write!(f, "{{{hex}}}")
    }
}

impl FromStr for UniqueIdentifier {
    type Err = DomainError;

    /// Accepts the braced form produced by `Display`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidIdentifier { input: s.into() };

        let inner = s
            .strip_prefix('{')
            .and_then(|rest| rest.strip_suffix('}'))
            .ok_or_else(invalid)?;

        Uuid::try_parse(inner).map(Self).map_err(|_| invalid())
    }
}

impl Serialize for UniqueIdentifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
