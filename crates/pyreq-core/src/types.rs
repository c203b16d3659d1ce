//! Data model for parsed dependency declarations.
//!
//! A [`Requirement`] is produced by the specifier parser for one line and by
//! the manifest parser for one entry. All records serialize with `serde` so
//! the dispatcher can print them as JSON.

use std::collections::BTreeSet;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::error::{ParseError, Result};

static SEPARATOR_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-_.]+").unwrap());

/// Normalizes a package or extra name: runs of `-`, `_`, `.` collapse to a
/// single `-` and ASCII letters case-fold, so `Django_REST.framework` and
/// `django-rest-framework` refer to the same package.
///
/// # Examples
///
/// ```
/// use pyreq_core::types::normalize_name;
///
/// assert_eq!(normalize_name("Django_REST.framework"), "django-rest-framework");
/// assert_eq!(normalize_name("requests"), "requests");
/// ```
pub fn normalize_name(raw: &str) -> String {
    SEPARATOR_RUNS.replace_all(raw, "-").to_ascii_lowercase()
}

/// Version comparison operator in a constraint.
///
/// Serializes as its operator text (`"=="`, `">="`, ...). The parser only
/// records the operator; no version ordering is computed in this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Comparator {
    #[serde(rename = "==")]
    Equal,
    #[serde(rename = "!=")]
    NotEqual,
    #[serde(rename = "<=")]
    LessEqual,
    #[serde(rename = ">=")]
    GreaterEqual,
    #[serde(rename = "<")]
    Less,
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = "~=")]
    Compatible,
    #[serde(rename = "===")]
    Arbitrary,
}

impl Comparator {
    /// Operator spellings, longest first so `===` wins over `==` and two-char
    /// operators win over `<`/`>`.
    pub const OPERATORS: [(&'static str, Self); 8] = [
        ("===", Self::Arbitrary),
        ("==", Self::Equal),
        ("~=", Self::Compatible),
        ("!=", Self::NotEqual),
        ("<=", Self::LessEqual),
        (">=", Self::GreaterEqual),
        ("<", Self::Less),
        (">", Self::Greater),
    ];

    /// The operator text.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::Compatible => "~=",
            Self::Arbitrary => "===",
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `comparator version` pair. Constraint lists are conjunctive and keep
/// their written order; version text is preserved verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Constraint {
    pub op: Comparator,
    pub version: String,
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.op, self.version)
    }
}

/// Version-control scheme of a VCS reference (`git+...`, `hg+...`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VcsScheme {
    Git,
    Hg,
    Svn,
    Bzr,
}

impl VcsScheme {
    /// The scheme name without the `+` separator.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Git => "git",
            Self::Hg => "hg",
            Self::Svn => "svn",
            Self::Bzr => "bzr",
        }
    }

    /// Splits a `scheme+location` URL, returning the scheme and the text
    /// after the `+`. Returns `None` when no scheme prefix is present or the
    /// remainder is empty.
    pub fn from_prefix(url: &str) -> Option<(Self, &str)> {
        for scheme in [Self::Git, Self::Hg, Self::Svn, Self::Bzr] {
            if let Some(rest) = url.strip_prefix(scheme.as_str())
                && let Some(rest) = rest.strip_prefix('+')
                && !rest.is_empty()
            {
                return Some((scheme, rest));
            }
        }
        None
    }
}

impl fmt::Display for VcsScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a requirement's artifact comes from when it is not resolved against
/// a package index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RequirementSource {
    /// Direct URL to an archive or wheel.
    Url { url: String },
    /// Local filesystem path (manifest `path` attribute).
    Path { path: String },
    /// Version-control reference with optional revision.
    Vcs {
        scheme: VcsScheme,
        location: String,
        reference: Option<String>,
    },
}

impl RequirementSource {
    /// The source rendered as specifier-line text (`git+location@ref`, a
    /// plain URL, or a path).
    pub fn specifier_text(&self) -> String {
        match self {
            Self::Url { url } => url.clone(),
            Self::Path { path } => path.clone(),
            Self::Vcs {
                scheme,
                location,
                reference,
            } => match reference {
                Some(reference) => format!("{scheme}+{location}@{reference}"),
                None => format!("{scheme}+{location}"),
            },
        }
    }
}

/// One parsed dependency declaration.
///
/// Produced by [`crate::specifier::parse`] for a specifier line and by the
/// manifest parser for each section entry. Exactly one of a non-empty
/// `constraints` list or a `source` is the version origin; declaring both is
/// rejected.
///
/// # Examples
///
/// ```
/// let requirement = pyreq_core::specifier::parse("requests[security]>=2.25,<3.0").unwrap();
///
/// assert_eq!(requirement.name.as_deref(), Some("requests"));
/// assert!(requirement.extras.contains("security"));
/// assert_eq!(requirement.constraints.len(), 2);
/// assert!(requirement.source.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Requirement {
    /// Normalized package name; `None` only for bare VCS-URL specifiers.
    pub name: Option<String>,
    /// Requested extra feature sets, normalized, duplicates collapsed.
    pub extras: BTreeSet<String>,
    /// Version constraints in written order; empty means "any version".
    pub constraints: Vec<Constraint>,
    /// Environment-marker text after `;`, captured verbatim, never evaluated.
    pub marker: Option<String>,
    /// Direct URL/path/VCS source; `None` means index-resolved.
    pub source: Option<RequirementSource>,
    /// Named source index (manifest `index` attribute).
    pub index: Option<String>,
}

impl Requirement {
    /// A requirement on `raw_name` (normalized) with no constraints, meaning
    /// "any version".
    pub fn named(raw_name: &str) -> Self {
        Self {
            name: Some(normalize_name(raw_name)),
            extras: BTreeSet::new(),
            constraints: Vec::new(),
            marker: None,
            source: None,
            index: None,
        }
    }

    /// Enforces the single-version-origin invariant: version constraints and
    /// a direct source are mutually exclusive.
    pub fn validate_origin(&self) -> Result<()> {
        if self.source.is_some() && !self.constraints.is_empty() {
            return Err(ParseError::conflicting_source(
                self.name.as_deref().unwrap_or_default(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Requirement {
    /// Canonical re-rendering: normalized name, sorted extras, constraints
    /// joined with `,`, `@` form for direct sources. Re-parsing a rendering
    /// yields an equal requirement.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(name) = &self.name else {
            // Bare VCS reference.
            if let Some(source) = &self.source {
                return f.write_str(&source.specifier_text());
            }
            return Ok(());
        };

        f.write_str(name)?;
        if !self.extras.is_empty() {
            let extras: Vec<&str> = self.extras.iter().map(String::as_str).collect();
            write!(f, "[{}]", extras.join(","))?;
        }
        if let Some(source) = &self.source {
            write!(f, " @ {}", source.specifier_text())?;
        } else if !self.constraints.is_empty() {
            let constraints: Vec<String> =
                self.constraints.iter().map(ToString::to_string).collect();
            f.write_str(&constraints.join(","))?;
        }
        if let Some(marker) = &self.marker {
            // A direct reference needs whitespace before `;` so the URL token
            // does not swallow the marker separator.
            if self.source.is_some() {
                write!(f, " ; {marker}")?;
            } else {
                write!(f, "; {marker}")?;
            }
        }
        Ok(())
    }
}
