//! Dependency-specifier parsing.
//!
//! Parses one specifier line into a [`Requirement`]: a package name with
//! optional extras, version constraints and an environment marker, a direct
//! reference (`name @ url`), or a bare VCS URL (`git+...`, `hg+...`,
//! `svn+...`, `bzr+...`). Version and marker text is captured verbatim; no
//! version ordering is computed here.
//!
//! # Examples
//!
//! ```
//! let requirement = pyreq_core::specifier::parse("flask[async]>=3.0").unwrap();
//! assert_eq!(requirement.name.as_deref(), Some("flask"));
//! assert!(requirement.extras.contains("async"));
//! ```

use std::collections::BTreeSet;

use crate::error::{ParseError, Result};
use crate::scanner::Cursor;
use crate::types::{
    Constraint, Requirement, RequirementSource, VcsScheme, normalize_name,
};

/// Parses one dependency-specifier line.
///
/// # Errors
///
/// - `EmptyInput` for an empty or whitespace-only line
/// - `MalformedConstraint` for comparator-grammar violations
/// - `ConflictingSource` when a direct reference is combined with version
///   constraints
/// - `TrailingInput` for unrecognized bytes after the recognized productions,
///   reported with their byte offset
pub fn parse(line: &str) -> Result<Requirement> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(ParseError::EmptyInput);
    }
    tracing::debug!(input = trimmed, "parsing requirement specifier");

    if VcsScheme::from_prefix(trimmed).is_some() {
        return bare_vcs_reference(line);
    }

    let mut cursor = Cursor::new(line);
    cursor.eat_whitespace();
    let Some(raw_name) = cursor.take_identifier() else {
        return Err(ParseError::trailing_input(cursor.offset(), cursor.rest()));
    };
    let name = normalize_name(raw_name);

    cursor.eat_whitespace();
    let extras = if cursor.eat_char('[') {
        extras_list(&mut cursor)?
    } else {
        BTreeSet::new()
    };

    cursor.eat_whitespace();
    if cursor.eat_char('@') {
        return direct_reference(name, extras, &mut cursor);
    }

    let constraints = constraint_list(&mut cursor)?;

    cursor.eat_whitespace();
    if cursor.peek() == Some('@') {
        return Err(ParseError::conflicting_source(name));
    }

    let marker = marker_text(&mut cursor)?;

    cursor.eat_whitespace();
    if !cursor.is_at_end() {
        return Err(ParseError::trailing_input(cursor.offset(), cursor.rest()));
    }

    Ok(Requirement {
        name: Some(name),
        extras,
        constraints,
        marker,
        source: None,
        index: None,
    })
}

/// Parses a bare constraint list (`">=2.25,<3.0"`), the tail of a specifier
/// line with no name prefix. This is the grammar manifest entries delegate
/// their version strings to.
///
/// # Errors
///
/// `MalformedConstraint` when the text contains no valid pair, and
/// `TrailingInput` for unrecognized bytes after a valid list.
pub fn parse_constraints(text: &str) -> Result<Vec<Constraint>> {
    let mut cursor = Cursor::new(text);
    cursor.eat_whitespace();
    let constraints = constraint_list(&mut cursor)?;
    if constraints.is_empty() {
        return Err(ParseError::malformed_constraint(text.trim()));
    }
    cursor.eat_whitespace();
    if !cursor.is_at_end() {
        return Err(ParseError::trailing_input(cursor.offset(), cursor.rest()));
    }
    Ok(constraints)
}

/// A specifier that is nothing but a VCS URL: no name, the URL is the whole
/// line.
fn bare_vcs_reference(line: &str) -> Result<Requirement> {
    let mut cursor = Cursor::new(line);
    cursor.eat_whitespace();
    let Some(url) = cursor.take_url() else {
        return Err(ParseError::EmptyInput);
    };
    cursor.eat_whitespace();
    if !cursor.is_at_end() {
        return Err(ParseError::trailing_input(cursor.offset(), cursor.rest()));
    }

    Ok(Requirement {
        name: None,
        extras: BTreeSet::new(),
        constraints: Vec::new(),
        marker: None,
        source: Some(source_from_url(url)),
        index: None,
    })
}

/// Parses the remainder of a `name @ url` direct reference. Version
/// constraints may not follow the URL; a whitespace-separated `; marker`
/// still may.
fn direct_reference(
    name: String,
    extras: BTreeSet<String>,
    cursor: &mut Cursor<'_>,
) -> Result<Requirement> {
    cursor.eat_whitespace();
    let Some(url) = cursor.take_url() else {
        return Err(ParseError::trailing_input(cursor.offset(), cursor.rest()));
    };
    let source = source_from_url(url);

    cursor.eat_whitespace();
    if cursor.at_comparator_start() {
        return Err(ParseError::conflicting_source(name));
    }

    let marker = marker_text(cursor)?;
    cursor.eat_whitespace();
    if !cursor.is_at_end() {
        return Err(ParseError::trailing_input(cursor.offset(), cursor.rest()));
    }

    Ok(Requirement {
        name: Some(name),
        extras,
        constraints: Vec::new(),
        marker,
        source: Some(source),
        index: None,
    })
}

/// Classifies a direct-reference URL: scheme-prefixed text is a VCS
/// reference with an optional `@revision` fragment, anything else a plain
/// URL.
fn source_from_url(url: &str) -> RequirementSource {
    match VcsScheme::from_prefix(url) {
        Some((scheme, rest)) => {
            let (location, reference) = split_revision(rest);
            RequirementSource::Vcs {
                scheme,
                location: location.to_string(),
                reference: reference.map(String::from),
            }
        }
        None => RequirementSource::Url {
            url: url.to_string(),
        },
    }
}

/// Splits a trailing `@revision` fragment from a VCS location. The `@` only
/// introduces a revision when the text after it contains no `/`, so ssh
/// user-info (`git@host/...`) is left alone.
fn split_revision(location: &str) -> (&str, Option<&str>) {
    match location.rsplit_once('@') {
        Some((head, tail)) if !tail.is_empty() && !tail.contains('/') => (head, Some(tail)),
        _ => (location, None),
    }
}

/// Bracketed extras list; the opening `[` is already consumed. Empty
/// brackets are accepted; duplicates collapse via set semantics.
fn extras_list(cursor: &mut Cursor<'_>) -> Result<BTreeSet<String>> {
    let mut extras = BTreeSet::new();
    cursor.eat_whitespace();
    if cursor.eat_char(']') {
        return Ok(extras);
    }
    loop {
        cursor.eat_whitespace();
        let Some(extra) = cursor.take_identifier() else {
            return Err(ParseError::trailing_input(cursor.offset(), cursor.rest()));
        };
        extras.insert(normalize_name(extra));
        cursor.eat_whitespace();
        if cursor.eat_char(',') {
            continue;
        }
        if cursor.eat_char(']') {
            return Ok(extras);
        }
        return Err(ParseError::trailing_input(cursor.offset(), cursor.rest()));
    }
}

/// Comma-separated `comparator version` pairs. Returns an empty list when
/// the input starts with something that cannot open a constraint (end of
/// line, `;` marker, `@`, trailing junk — the caller decides what those
/// mean).
fn constraint_list(cursor: &mut Cursor<'_>) -> Result<Vec<Constraint>> {
    let mut constraints = Vec::new();
    loop {
        cursor.eat_whitespace();
        let Some(op) = cursor.take_comparator() else {
            if cursor.at_comparator_start() {
                // Operator-like token that is not one of the eight
                // comparators, e.g. `=>` or a lone `=`.
                return Err(ParseError::malformed_constraint(cursor.rest()));
            }
            if constraints.is_empty() {
                if cursor.peek() == Some(',') {
                    // Leading comma with no constraint before it.
                    return Err(ParseError::malformed_constraint(cursor.rest()));
                }
                return Ok(constraints);
            }
            // A consumed comma promised another pair.
            let fragment = if cursor.rest().is_empty() {
                ","
            } else {
                cursor.rest()
            };
            return Err(ParseError::malformed_constraint(fragment));
        };

        cursor.eat_whitespace();
        let Some(version) = cursor.take_version() else {
            return Err(ParseError::malformed_constraint(op.as_str()));
        };
        constraints.push(Constraint {
            op,
            version: version.to_string(),
        });

        cursor.eat_whitespace();
        if !cursor.eat_char(',') {
            return Ok(constraints);
        }
    }
}

/// Environment marker: everything after a `;`, captured verbatim (trimmed).
/// A `;` with no marker text is unconsumable input.
fn marker_text(cursor: &mut Cursor<'_>) -> Result<Option<String>> {
    cursor.eat_whitespace();
    if !cursor.eat_char(';') {
        return Ok(None);
    }
    let semi_offset = cursor.offset() - 1;
    let text = cursor.take_rest().trim();
    if text.is_empty() {
        return Err(ParseError::trailing_input(semi_offset, ";"));
    }
    Ok(Some(text.to_string()))
}
