use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A `PackageReference` item as declared in a project file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageReference {
    /// Package id, from `Include` (or `Update` when no `Include` is present).
    pub name: String,

    /// Declared version, from the `Version` attribute or a `<Version>` child element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Remaining attributes and child elements, keyed by name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}
