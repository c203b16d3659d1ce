//! Error taxonomy shared by the specifier and manifest parsers.
//!
//! Parsers never recover internally: the first malformed construct aborts
//! the parse and surfaces one of the kinds below. There is no partial-result
//! mode, because a partially parsed dependency declaration is unsafe to act
//! upon.

use thiserror::Error;

/// Parse failure for a specifier line or a manifest document.
///
/// Each variant carries the offending substring or byte offset where the
/// input makes one available.
///
/// # Examples
///
/// ```
/// use pyreq_core::error::ParseError;
///
/// let err = pyreq_core::specifier::parse("").unwrap_err();
/// assert!(matches!(err, ParseError::EmptyInput));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Input was empty or whitespace-only.
    #[error("empty requirement input")]
    EmptyInput,

    /// Unexpected bytes remained after all recognized productions.
    #[error("unexpected input at byte {offset}: '{fragment}'")]
    TrailingInput { offset: usize, fragment: String },

    /// A version-constraint list that does not match the comparator grammar.
    #[error("malformed version constraint '{fragment}'")]
    MalformedConstraint { fragment: String },

    /// A requirement declaring both version constraints and a direct source.
    #[error("'{name}' declares both version constraints and a direct source")]
    ConflictingSource { name: String },

    /// A package name appearing twice within one manifest section.
    #[error("duplicate package '{name}' in section '{section}'")]
    DuplicateEntry { section: String, name: String },

    /// A manifest-document syntax violation unrelated to dependency semantics.
    #[error("manifest structure error: {message}")]
    StructuralError { message: String },
}

impl ParseError {
    /// Create a trailing-input error at `offset`.
    pub fn trailing_input(offset: usize, fragment: impl Into<String>) -> Self {
        Self::TrailingInput {
            offset,
            fragment: fragment.into(),
        }
    }

    /// Create a malformed-constraint error for `fragment`.
    pub fn malformed_constraint(fragment: impl Into<String>) -> Self {
        Self::MalformedConstraint {
            fragment: fragment.into(),
        }
    }

    /// Create a conflicting-source error for `name`.
    pub fn conflicting_source(name: impl Into<String>) -> Self {
        Self::ConflictingSource { name: name.into() }
    }

    /// Create a duplicate-entry error for `name` within `section`.
    pub fn duplicate_entry(section: impl Into<String>, name: impl Into<String>) -> Self {
        Self::DuplicateEntry {
            section: section.into(),
            name: name.into(),
        }
    }

    /// Create a structural error with `message`.
    pub fn structural(message: impl Into<String>) -> Self {
        Self::StructuralError {
            message: message.into(),
        }
    }
}

/// Convenience type alias for `Result<T, ParseError>`.
pub type Result<T> = std::result::Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_display() {
        assert_eq!(ParseError::EmptyInput.to_string(), "empty requirement input");
    }

    #[test]
    fn test_trailing_input_display() {
        let err = ParseError::trailing_input(12, "???");
        assert_eq!(err.to_string(), "unexpected input at byte 12: '???'");
    }

    #[test]
    fn test_malformed_constraint_display() {
        let err = ParseError::malformed_constraint("=>1.0");
        assert_eq!(err.to_string(), "malformed version constraint '=>1.0'");
    }

    #[test]
    fn test_conflicting_source_display() {
        let err = ParseError::conflicting_source("flask");
        assert_eq!(
            err.to_string(),
            "'flask' declares both version constraints and a direct source"
        );
    }

    #[test]
    fn test_duplicate_entry_display() {
        let err = ParseError::duplicate_entry("packages", "requests");
        assert_eq!(
            err.to_string(),
            "duplicate package 'requests' in section 'packages'"
        );
    }

    #[test]
    fn test_structural_display() {
        let err = ParseError::structural("expected newline");
        assert_eq!(
            err.to_string(),
            "manifest structure error: expected newline"
        );
    }
}
