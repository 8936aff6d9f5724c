//! Templates, mark tokens, and the substitution engine.
//!
//! ## Model
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  Template                                                │
//! │  ├── artifact: Artifact      (which output file)         │
//! │  ├── source: TemplateSource  (opaque text blob)          │
//! │  └── marks: Vec<Mark>        (tokens this text accepts)  │
//! ├──────────────────────────────────────────────────────────┤
//! │  Bindings (Value Object)                                 │
//! │  └── Mark -> String:  $PROJECTNAME_SYS$ -> "MyDriver"     │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Substitution rules
//!
//! - Every occurrence of a bound token is replaced, not only the first.
//! - A single left-to-right pass: text produced by a replacement is never
//!   scanned again, so a value that happens to contain a token is emitted
//!   verbatim.
//! - Tokens that are not bound are left untouched.
//! - Order of bindings does not matter as long as no token is a substring of
//!   another. [`Mark::verify_disjoint`] checks that for any token set.

use std::collections::BTreeMap;
use std::fmt;

use crate::domain::{entities::layout::Artifact, error::DomainError};

// ── Mark ─────────────────────────────────────────────────────────────────────

/// A literal placeholder embedded in a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Mark {
    ToolchainVersion,
    ProjectName,
    SolutionId,
    DriverProjectId,
    AppProjectId,
    RandomGroupId,
}

impl Mark {
    pub const ALL: [Mark; 6] = [
        Mark::ToolchainVersion,
        Mark::ProjectName,
        Mark::SolutionId,
        Mark::DriverProjectId,
        Mark::AppProjectId,
        Mark::RandomGroupId,
    ];

    /// The literal text of the token as it appears in template sources.
    pub const fn token(self) -> &'static str {
        match self {
            Self::ToolchainVersion => "$VSVERSION$",
            Self::ProjectName => "$PROJECTNAME_SYS$",
            Self::SolutionId => "$GUID_SOLUTION$",
            Self::DriverProjectId => "$GUID_SYS$",
            Self::AppProjectId => "$GUID_EXE$",
            Self::RandomGroupId => "$GUID_RANDOM$",
        }
    }

    /// Static disjointness check: no token may be a substring of another.
    pub fn verify_disjoint(marks: &[Mark]) -> Result<(), DomainError> {
        for outer in marks {
            for inner in marks {
                if outer != inner && outer.token().contains(inner.token()) {
                    return Err(DomainError::OverlappingMarks {
                        outer: outer.token(),
                        inner: inner.token(),
                    });
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

// ── TemplateSource ───────────────────────────────────────────────────────────

/// Template text, either compiled into the binary or owned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Static(&'static str),
    Owned(String),
}

impl TemplateSource {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Static(s) => s,
            Self::Owned(s) => s,
        }
    }
}

impl From<&'static str> for TemplateSource {
    fn from(s: &'static str) -> Self {
        Self::Static(s)
    }
}

impl From<String> for TemplateSource {
    fn from(s: String) -> Self {
        Self::Owned(s)
    }
}

// ── Template ─────────────────────────────────────────────────────────────────

/// An immutable text blob plus the finite set of marks it accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    artifact: Artifact,
    source: TemplateSource,
    marks: Vec<Mark>,
}

impl Template {
    /// Create a template, enforcing non-empty text and a disjoint mark set.
    pub fn new(
        artifact: Artifact,
        source: impl Into<TemplateSource>,
        marks: impl Into<Vec<Mark>>,
    ) -> Result<Self, DomainError> {
        let template = Self {
            artifact,
            source: source.into(),
            marks: marks.into(),
        };
        template.validate()?;
        Ok(template)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.source.as_str().is_empty() {
            return Err(DomainError::EmptyTemplate {
                artifact: self.artifact.to_string(),
            });
        }
        Mark::verify_disjoint(&self.marks)
    }

    pub fn artifact(&self) -> Artifact {
        self.artifact
    }

    pub fn source(&self) -> &str {
        self.source.as_str()
    }

    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    pub fn accepts(&self, mark: Mark) -> bool {
        self.marks.contains(&mark)
    }

    /// Render this template with the given bindings.
    pub fn render(&self, bindings: &Bindings) -> String {
        substitute(self.source.as_str(), bindings)
    }

    /// Accepted marks whose token still appears in `rendered`.
    pub fn unresolved_marks(&self, rendered: &str) -> Vec<Mark> {
        self.marks
            .iter()
            .copied()
            .filter(|m| rendered.contains(m.token()))
            .collect()
    }
}

// ── Bindings ─────────────────────────────────────────────────────────────────

/// Mapping from mark to replacement value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    values: BTreeMap<Mark, String>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, mark: Mark, value: impl Into<String>) {
        self.values.insert(mark, value.into());
    }

    pub fn with(mut self, mark: Mark, value: impl Into<String>) -> Self {
        self.insert(mark, value);
        self
    }

    pub fn get(&self, mark: Mark) -> Option<&str> {
        self.values.get(&mark).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Mark, &str)> {
        self.values.iter().map(|(m, v)| (*m, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// No bound value may contain any known mark token.
    pub fn validate(&self) -> Result<(), DomainError> {
        for (mark, value) in self.iter() {
            if let Some(found) = Mark::ALL.iter().find(|m| value.contains(m.token())) {
                return Err(DomainError::MarkInBindingValue {
                    mark: mark.token(),
                    token: found.token(),
                });
            }
        }
        Ok(())
    }
}

// ── Engine ───────────────────────────────────────────────────────────────────

/// Single-pass literal substitution of every bound token in `text`.
pub fn substitute(text: &str, bindings: &Bindings) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    loop {
        // Earliest match wins; on a tie the longer token wins.
        let next = bindings
            .iter()
            .filter_map(|(mark, value)| {
                rest.find(mark.token())
                    .map(|at| (at, mark.token().len(), value))
            })
            .min_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));

        match next {
            Some((at, token_len, value)) => {
                out.push_str(&rest[..at]);
                out.push_str(value);
                rest = &rest[at + token_len..];
            }
            None => {
                out.push_str(rest);
                return out;
            }
        }
    }
}
