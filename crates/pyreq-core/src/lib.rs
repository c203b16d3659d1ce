//! Requirement-specifier grammar and data model for pyreq.
//!
//! This crate owns the low-level parsing surface shared by the pyreq tools:
//!
//! - **Scanner**: offset-tracking lexical primitives (identifiers,
//!   comparator operators, version tokens, URL tokens)
//! - **Specifier parser**: one dependency-specifier line into a
//!   [`Requirement`] (name, extras, constraints, marker, direct source)
//! - **Constraint grammar**: [`specifier::parse_constraints`], reused by the
//!   Pipfile manifest parser for entry version strings
//! - **Error taxonomy**: [`ParseError`] with typed kinds and byte offsets
//!
//! Parsing is pure and synchronous: no I/O, no shared state, linear in the
//! input. Version text is preserved verbatim — comparing or ordering
//! versions is a consumer concern.
//!
//! # Examples
//!
//! ```
//! use pyreq_core::specifier;
//!
//! let requirement = specifier::parse("requests[security]>=2.25,<3.0").unwrap();
//! assert_eq!(requirement.name.as_deref(), Some("requests"));
//! assert_eq!(requirement.constraints.len(), 2);
//!
//! let vcs = specifier::parse("flask @ git+https://example.com/flask.git@v1.0").unwrap();
//! assert!(vcs.source.is_some());
//! assert!(vcs.constraints.is_empty());
//! ```

pub mod error;
pub mod scanner;
pub mod specifier;
pub mod types;

// Re-export commonly used types
pub use error::{ParseError, Result};
pub use types::{
    Comparator, Constraint, Requirement, RequirementSource, VcsScheme, normalize_name,
};
