//! Parsed-manifest model.

use pyreq_core::Requirement;
use serde::Serialize;

/// A parsed Pipfile: dependency sections plus opaque metadata blocks, both
/// in document order.
///
/// # Examples
///
/// ```
/// let manifest = pyreq_pipfile::parse(r#"
/// [packages]
/// requests = ">=2.25"
///
/// [dev-packages]
/// pytest = "*"
/// "#).unwrap();
///
/// assert_eq!(manifest.sections.len(), 2);
/// assert_eq!(manifest.sections[0].name, "packages");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Manifest {
    /// Recognized dependency sections in document order.
    pub sections: Vec<ManifestSection>,
    /// Everything else, preserved structurally without validation.
    pub metadata: Vec<MetadataBlock>,
}

impl Manifest {
    /// Looks up a dependency section by name.
    pub fn section(&self, name: &str) -> Option<&ManifestSection> {
        self.sections.iter().find(|section| section.name == name)
    }
}

/// One dependency section (`[packages]` or `[dev-packages]`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManifestSection {
    pub name: String,
    /// Entries in document order; normalized names are unique within the
    /// section.
    pub packages: Vec<Requirement>,
}

/// A non-dependency block kept as opaque key-value data: `[[source]]`
/// registries, `[requires]` interpreter pins, `[scripts]`, and any unknown
/// section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetadataBlock {
    pub name: String,
    pub value: serde_json::Value,
}
