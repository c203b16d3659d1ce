//! Pipfile manifest parsing for pyreq.
//!
//! Parses a full Pipfile document into a [`Manifest`]: the `[packages]` and
//! `[dev-packages]` sections become ordered lists of
//! [`pyreq_core::Requirement`] records, validated with the same constraint
//! grammar as specifier lines, while every other block (`[[source]]`
//! registries, `[requires]`, unknown sections) is preserved as opaque
//! metadata rather than rejected.
//!
//! # Examples
//!
//! ```
//! let manifest = pyreq_pipfile::parse(r#"
//! [[source]]
//! name = "pypi"
//! url = "https://pypi.org/simple"
//! verify_ssl = true
//!
//! [packages]
//! requests = { version = ">=2.25", extras = ["security"] }
//! flask = "*"
//!
//! [dev-packages]
//! pytest = ">=7.0"
//! "#).unwrap();
//!
//! assert_eq!(manifest.sections.len(), 2);
//! assert_eq!(manifest.metadata[0].name, "source");
//! ```

pub mod parser;
pub mod types;

// Re-export commonly used types
pub use parser::parse;
pub use types::{Manifest, ManifestSection, MetadataBlock};
