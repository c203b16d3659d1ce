//! Pipfile manifest parser.
//!
//! Walks the TOML document with `toml_edit`, turning `[packages]` and
//! `[dev-packages]` into dependency sections and preserving every other
//! block as opaque metadata. Entry version strings and attribute tables are
//! validated with the same constraint grammar and invariants as specifier
//! lines, so `requests = ">=2.25"` and the line `requests>=2.25` produce the
//! same record.
//!
//! The parse is fail-fast: the first structural or per-entry error aborts
//! the whole document — a partially parsed manifest is never returned.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use pyreq_core::error::{ParseError, Result};
use pyreq_core::{Requirement, RequirementSource, VcsScheme, normalize_name, specifier};
use regex::Regex;
use toml_edit::{DocumentMut, Item, Table, TomlError, Value};

use crate::types::{Manifest, ManifestSection, MetadataBlock};

/// Sections holding dependency entries; everything else is opaque metadata.
const DEPENDENCY_SECTIONS: [&str; 2] = ["packages", "dev-packages"];

static DUPLICATE_KEY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"duplicate key `([^`]+)`(?: in (?:table `([^`]+)`|document root))?").unwrap()
});

/// Parses a Pipfile document.
///
/// # Errors
///
/// - `StructuralError` for TOML syntax violations and unsupported shapes
/// - `DuplicateEntry` when a package name (after normalization) repeats
///   within one section
/// - `MalformedConstraint` / `ConflictingSource` from entry validation
///
/// # Examples
///
/// ```
/// let manifest = pyreq_pipfile::parse(r#"
/// [packages]
/// requests = { version = ">=2.25", extras = ["security"] }
/// flask = "*"
/// "#).unwrap();
///
/// let packages = manifest.section("packages").unwrap();
/// assert_eq!(packages.packages.len(), 2);
/// assert!(packages.packages[1].constraints.is_empty());
/// ```
pub fn parse(document: &str) -> Result<Manifest> {
    tracing::debug!(bytes = document.len(), "parsing Pipfile manifest");

    let doc: DocumentMut = document
        .parse()
        .map_err(|error: TomlError| classify_toml_error(&error))?;

    let mut sections = Vec::new();
    let mut metadata = Vec::new();

    for (key, item) in doc.iter() {
        if DEPENDENCY_SECTIONS.contains(&key) {
            let Some(table) = item.as_table() else {
                return Err(ParseError::structural(format!(
                    "section '{key}' must be a table"
                )));
            };
            sections.push(parse_section(key, table)?);
        } else {
            metadata.push(MetadataBlock {
                name: key.to_string(),
                value: item_to_json(item),
            });
        }
    }

    tracing::debug!(
        sections = sections.len(),
        metadata = metadata.len(),
        "parsed Pipfile manifest"
    );

    Ok(Manifest { sections, metadata })
}

/// One dependency section: entries in document order, normalized names
/// unique.
fn parse_section(section: &str, table: &Table) -> Result<ManifestSection> {
    let mut packages = Vec::new();
    let mut seen = HashSet::new();

    for (key, item) in table.iter() {
        let name = normalize_name(key);
        if !seen.insert(name.clone()) {
            return Err(ParseError::duplicate_entry(section, name));
        }
        packages.push(entry_requirement(section, &name, item)?);
    }

    Ok(ManifestSection {
        name: section.to_string(),
        packages,
    })
}

/// One section entry: a plain version string, the `"*"` wildcard, or an
/// attribute table (inline or `[packages.name]` sub-table).
fn entry_requirement(section: &str, name: &str, item: &Item) -> Result<Requirement> {
    match item {
        Item::Value(Value::String(version)) => {
            let mut requirement = Requirement::named(name);
            apply_version(&mut requirement, version.value())?;
            Ok(requirement)
        }
        Item::Value(Value::InlineTable(table)) => {
            let mut attributes = EntryAttributes::default();
            for (key, value) in table.iter() {
                attributes.collect(name, key, value)?;
            }
            attributes.build(name)
        }
        Item::Table(table) => {
            let mut attributes = EntryAttributes::default();
            for (key, inner) in table.iter() {
                let Item::Value(value) = inner else {
                    return Err(ParseError::structural(format!(
                        "attribute '{key}' of '{name}' in [{section}] has an unsupported shape"
                    )));
                };
                attributes.collect(name, key, value)?;
            }
            attributes.build(name)
        }
        _ => Err(ParseError::structural(format!(
            "entry '{name}' in [{section}] must be a version string or an attribute table"
        ))),
    }
}

/// `"*"` means unconstrained; anything else must be a valid constraint list.
fn apply_version(requirement: &mut Requirement, text: &str) -> Result<()> {
    if text.trim() == "*" {
        return Ok(());
    }
    requirement.constraints = specifier::parse_constraints(text)?;
    Ok(())
}

/// Recognized attributes of one entry table, collected before the
/// requirement is assembled so attribute order in the document does not
/// matter (`ref` may precede `git`).
#[derive(Default)]
struct EntryAttributes<'a> {
    version: Option<&'a str>,
    extras: Vec<&'a str>,
    marker: Option<&'a str>,
    vcs: Option<(VcsScheme, &'a str)>,
    file: Option<&'a str>,
    path: Option<&'a str>,
    reference: Option<&'a str>,
    index: Option<&'a str>,
}

impl<'a> EntryAttributes<'a> {
    fn collect(&mut self, name: &str, key: &str, value: &'a Value) -> Result<()> {
        match key {
            "version" => self.version = Some(expect_str(name, key, value)?),
            "extras" => {
                let Some(array) = value.as_array() else {
                    return Err(ParseError::structural(format!(
                        "attribute 'extras' of '{name}' must be an array of strings"
                    )));
                };
                for entry in array.iter() {
                    let Some(extra) = entry.as_str() else {
                        return Err(ParseError::structural(format!(
                            "attribute 'extras' of '{name}' must be an array of strings"
                        )));
                    };
                    self.extras.push(extra);
                }
            }
            "markers" => self.marker = Some(expect_str(name, key, value)?),
            "git" | "hg" | "svn" | "bzr" => {
                let scheme = match key {
                    "git" => VcsScheme::Git,
                    "hg" => VcsScheme::Hg,
                    "svn" => VcsScheme::Svn,
                    _ => VcsScheme::Bzr,
                };
                let location = expect_str(name, key, value)?;
                if self.vcs.is_some() {
                    return Err(ParseError::conflicting_source(name));
                }
                self.vcs = Some((scheme, location));
            }
            "file" => self.file = Some(expect_str(name, key, value)?),
            "path" => self.path = Some(expect_str(name, key, value)?),
            "ref" => self.reference = Some(expect_str(name, key, value)?),
            "index" => self.index = Some(expect_str(name, key, value)?),
            other => {
                tracing::debug!(
                    package = name,
                    attribute = other,
                    "ignoring unrecognized package attribute"
                );
            }
        }
        Ok(())
    }

    fn build(self, name: &str) -> Result<Requirement> {
        let mut requirement = Requirement::named(name);

        if let Some(text) = self.version {
            apply_version(&mut requirement, text)?;
        }
        for extra in self.extras {
            requirement.extras.insert(normalize_name(extra));
        }
        requirement.marker = self.marker.map(str::to_string);
        requirement.index = self.index.map(str::to_string);

        let mut sources = Vec::new();
        if let Some((scheme, location)) = self.vcs {
            sources.push(RequirementSource::Vcs {
                scheme,
                location: location.to_string(),
                reference: self.reference.map(str::to_string),
            });
        } else if self.reference.is_some() {
            tracing::debug!(package = name, "ignoring 'ref' without a VCS attribute");
        }
        if let Some(url) = self.file {
            sources.push(RequirementSource::Url {
                url: url.to_string(),
            });
        }
        if let Some(path) = self.path {
            sources.push(RequirementSource::Path {
                path: path.to_string(),
            });
        }
        if sources.len() > 1 {
            return Err(ParseError::conflicting_source(name));
        }
        requirement.source = sources.pop();

        requirement.validate_origin()?;
        Ok(requirement)
    }
}

fn expect_str<'a>(name: &str, key: &str, value: &'a Value) -> Result<&'a str> {
    value.as_str().ok_or_else(|| {
        ParseError::structural(format!("attribute '{key}' of '{name}' must be a string"))
    })
}

/// Maps toml_edit syntax failures onto the parse-error taxonomy. TOML itself
/// rejects literal duplicate keys, so that rejection is reported as
/// `DuplicateEntry` (key and table recovered from the rendering when
/// present); everything else is structural.
fn classify_toml_error(error: &TomlError) -> ParseError {
    let message = error.to_string();
    if message.contains("duplicate key") {
        let (name, section) = DUPLICATE_KEY.captures(&message).map_or_else(
            || (String::new(), String::new()),
            |caps| {
                (
                    normalize_name(&caps[1]),
                    caps.get(2)
                        .map_or_else(String::new, |m| m.as_str().to_string()),
                )
            },
        );
        return ParseError::duplicate_entry(section, name);
    }
    let last_line = message.lines().last().unwrap_or(message.as_str());
    ParseError::structural(last_line.trim())
}

/// Structural TOML-to-JSON conversion for opaque metadata blocks.
fn item_to_json(item: &Item) -> serde_json::Value {
    match item {
        Item::None => serde_json::Value::Null,
        Item::Value(value) => value_to_json(value),
        Item::Table(table) => table_to_json(table),
        Item::ArrayOfTables(tables) => {
            serde_json::Value::Array(tables.iter().map(table_to_json).collect())
        }
    }
}

fn table_to_json(table: &Table) -> serde_json::Value {
    let mut map = serde_json::Map::new();
    for (key, item) in table.iter() {
        map.insert(key.to_string(), item_to_json(item));
    }
    serde_json::Value::Object(map)
}

fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::String(s) => serde_json::Value::String(s.value().clone()),
        Value::Integer(i) => serde_json::Value::Number((*i.value()).into()),
        Value::Float(f) => serde_json::Number::from_f64(*f.value())
            .map_or(serde_json::Value::Null, serde_json::Value::Number),
        Value::Boolean(b) => serde_json::Value::Bool(*b.value()),
        Value::Datetime(d) => serde_json::Value::String(d.value().to_string()),
        Value::Array(array) => {
            serde_json::Value::Array(array.iter().map(value_to_json).collect())
        }
        Value::InlineTable(table) => {
            let mut map = serde_json::Map::new();
            for (key, value) in table.iter() {
                map.insert(key.to_string(), value_to_json(value));
            }
            serde_json::Value::Object(map)
        }
    }
}
