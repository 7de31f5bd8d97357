use crate::element::Element;
use crate::error::ProjectFileError;
use crate::names;
use buildscope_types::framework::DEFAULT_LEGACY_IDENTIFIER;
use buildscope_types::summary::ProjectSummary;
use buildscope_types::{FrameworkParseError, PackageReference, TargetFramework, schema};
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use std::collections::{BTreeMap, HashSet};
use std::sync::OnceLock;
use tracing::debug;

/// Imports that are known to need a .NET Framework host and build tools.
pub const IMPORTS_THAT_REQUIRE_NET_FRAMEWORK: &[&str] = &[
    "Microsoft.Portable.CSharp.targets",
    "Microsoft.Windows.UI.Xaml.CSharp.targets",
];

/// An MSBuild project file, parsed but not evaluated.
///
/// Derived values are computed on first access and cached for the lifetime of the value.
#[derive(Debug)]
pub struct ProjectFile {
    path: Utf8PathBuf,
    name: String,
    project: Element,
    target_frameworks: OnceLock<Result<Vec<TargetFramework>, FrameworkParseError>>,
    package_references: OnceLock<Vec<PackageReference>>,
    uses_sdk: OnceLock<bool>,
    requires_net_framework: OnceLock<bool>,
}

impl ProjectFile {
    /// Load and parse the project file at `path`.
    pub fn open(path: impl AsRef<Utf8Path>) -> Result<Self, ProjectFileError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ProjectFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_str(path, &contents)
    }

    /// Parse project file contents that were loaded from `path`.
    pub fn from_str(path: impl AsRef<Utf8Path>, contents: &str) -> Result<Self, ProjectFileError> {
        let path = path.as_ref().to_path_buf();
        let contents = contents.strip_prefix('\u{feff}').unwrap_or(contents);

        let options = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..roxmltree::ParsingOptions::default()
        };
        let doc = roxmltree::Document::parse_with_options(contents, options).map_err(|e| {
            ProjectFileError::Xml {
                path: path.clone(),
                message: e.to_string(),
            }
        })?;

        let project = Element::find_project(&doc)
            .ok_or_else(|| ProjectFileError::Format { path: path.clone() })?;

        let name = path.file_name().unwrap_or(path.as_str()).to_string();
        debug!(path = %path, "parsed project file");

        Ok(Self {
            path,
            name,
            project,
            target_frameworks: OnceLock::new(),
            package_references: OnceLock::new(),
            uses_sdk: OnceLock::new(),
            requires_net_framework: OnceLock::new(),
        })
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// File name of the project, e.g. `App.csproj`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared target frameworks.
    ///
    /// `TargetFrameworks` and `TargetFramework` win when either declares anything; otherwise the
    /// legacy `TargetFrameworkIdentifier`/`TargetFrameworkVersion` pairs are used. A project with
    /// no framework information yields an empty slice. A malformed legacy version is an error,
    /// and stays one on every call.
    pub fn target_frameworks(&self) -> Result<&[TargetFramework], ProjectFileError> {
        self.target_frameworks
            .get_or_init(|| {
                let multi = self
                    .project
                    .descendants_named(names::TARGET_FRAMEWORKS)
                    .map(|e| e.text().to_string())
                    .collect::<Vec<_>>();
                let single = self
                    .project
                    .descendants_named(names::TARGET_FRAMEWORK)
                    .map(|e| e.text().to_string())
                    .collect::<Vec<_>>();
                let legacy = self
                    .project
                    .descendants_named_with_parent(names::TARGET_FRAMEWORK_VERSION)
                    .into_iter()
                    .map(|(parent, version)| {
                        let identifier = parent
                            .descendants_named(names::TARGET_FRAMEWORK_IDENTIFIER)
                            .next()
                            .map(|e| e.text().to_string())
                            .unwrap_or_else(|| DEFAULT_LEGACY_IDENTIFIER.to_string());
                        (identifier, version.text().to_string())
                    })
                    .collect::<Vec<_>>();

                let resolved = resolve_target_frameworks(&multi, &single, &legacy);
                match &resolved {
                    Ok(frameworks) => debug!(
                        path = %self.path,
                        count = frameworks.len(),
                        "resolved target frameworks"
                    ),
                    Err(e) => debug!(path = %self.path, error = %e, "invalid target framework"),
                }
                resolved
            })
            .as_ref()
            .map(Vec::as_slice)
            .map_err(|e| ProjectFileError::Framework(e.clone()))
    }

    /// True if the project element or any `Import` carries an `Sdk` attribute.
    pub fn uses_sdk(&self) -> bool {
        *self.uses_sdk.get_or_init(|| {
            self.project.attribute(names::SDK).is_some()
                || self
                    .project
                    .descendants_named(names::IMPORT)
                    .any(|e| e.attribute(names::SDK).is_some())
        })
    }

    /// True if the project needs a .NET Framework host to build.
    pub fn requires_net_framework(&self) -> bool {
        *self.requires_net_framework.get_or_init(|| {
            let imports = self
                .project
                .descendants_named(names::IMPORT)
                .filter_map(|e| e.attribute(names::PROJECT))
                .any(is_net_framework_import);
            let language_targets = self
                .project
                .descendants_named(names::LANGUAGE_TARGETS)
                .any(|e| is_net_framework_import(e.text()));
            imports || language_targets || self.tools_version().is_some()
        })
    }

    /// True if a `TargetFrameworks` element is present, whatever it contains.
    pub fn is_multi_targeted(&self) -> bool {
        self.project
            .descendants_named(names::TARGET_FRAMEWORKS)
            .next()
            .is_some()
    }

    pub fn output_type(&self) -> Option<&str> {
        self.project
            .descendants_named(names::OUTPUT_TYPE)
            .next()
            .map(|e| e.text())
    }

    pub fn contains_package_references(&self) -> bool {
        self.project
            .descendants_named(names::PACKAGE_REFERENCE)
            .next()
            .is_some()
    }

    pub fn package_references(&self) -> &[PackageReference] {
        self.package_references.get_or_init(|| {
            self.project
                .descendants_named(names::PACKAGE_REFERENCE)
                .map(package_reference)
                .collect()
        })
    }

    /// `ToolsVersion` attribute of the project element (legacy projects only).
    pub fn tools_version(&self) -> Option<&str> {
        self.project.attribute(names::TOOLS_VERSION)
    }

    pub fn summary(&self) -> Result<ProjectSummary, ProjectFileError> {
        Ok(ProjectSummary {
            schema: schema::BUILDSCOPE_PROJECT_V1.to_string(),
            path: self.path.to_string(),
            name: self.name.clone(),
            target_frameworks: self.target_frameworks()?.to_vec(),
            uses_sdk: self.uses_sdk(),
            requires_net_framework: self.requires_net_framework(),
            is_multi_targeted: self.is_multi_targeted(),
            output_type: self.output_type().map(str::to_string),
            tools_version: self.tools_version().map(str::to_string),
            package_references: self.package_references().to_vec(),
        })
    }
}

/// Resolve target frameworks from the raw values of `TargetFrameworks`, `TargetFramework` and
/// legacy `(identifier, version)` pairs.
pub fn resolve_target_frameworks<S, L>(
    target_frameworks: &[S],
    target_framework: &[S],
    legacy: &[(L, L)],
) -> Result<Vec<TargetFramework>, FrameworkParseError>
where
    S: AsRef<str>,
    L: AsRef<str>,
{
    let multi = target_frameworks
        .iter()
        .flat_map(|v| v.as_ref().split(';'))
        .map(str::trim)
        .filter(|m| !m.is_empty());
    // An empty singular element still counts as a declaration and suppresses the legacy pairs.
    let single = target_framework.iter().map(|v| v.as_ref().trim());

    // Spellings of one framework collapse to a single entry, first occurrence wins.
    let mut seen = HashSet::new();
    let declared: Vec<TargetFramework> = multi
        .chain(single)
        .map(TargetFramework::parse)
        .filter(|f| seen.insert(f.clone()))
        .collect();
    if !declared.is_empty() {
        return Ok(declared);
    }

    legacy
        .iter()
        .map(|(identifier, version)| {
            TargetFramework::from_legacy(identifier.as_ref(), version.as_ref())
        })
        .collect()
}

fn is_net_framework_import(value: &str) -> bool {
    let value = value.to_ascii_lowercase();
    IMPORTS_THAT_REQUIRE_NET_FRAMEWORK
        .iter()
        .any(|import| value.ends_with(&import.to_ascii_lowercase()))
}

fn package_reference(element: &Element) -> PackageReference {
    let name = element
        .attribute(names::INCLUDE)
        .or_else(|| element.attribute(names::UPDATE))
        .unwrap_or_default()
        .trim()
        .to_string();

    let version = element
        .attribute(names::VERSION)
        .or_else(|| {
            element
                .children()
                .iter()
                .find(|c| c.is_named(names::VERSION))
                .map(Element::text)
        })
        .map(|v| v.trim().to_string());

    let mut metadata = BTreeMap::new();
    for (key, value) in element.attributes() {
        if [names::INCLUDE, names::UPDATE, names::VERSION]
            .iter()
            .any(|n| n.eq_ignore_ascii_case(key))
        {
            continue;
        }
        metadata.insert(key.to_string(), value.to_string());
    }
    for child in element.children() {
        if child.is_named(names::VERSION) {
            continue;
        }
        metadata
            .entry(child.name().to_string())
            .or_insert_with(|| child.text().trim().to_string());
    }

    PackageReference {
        name,
        version,
        metadata,
    }
}
