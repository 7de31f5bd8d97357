//! Element and attribute names recognized in project files.
//!
//! Matching is by local name and ignores ASCII case.

pub const PROJECT: &str = "Project";
pub const TARGET_FRAMEWORKS: &str = "TargetFrameworks";
pub const TARGET_FRAMEWORK: &str = "TargetFramework";
pub const TARGET_FRAMEWORK_VERSION: &str = "TargetFrameworkVersion";
pub const TARGET_FRAMEWORK_IDENTIFIER: &str = "TargetFrameworkIdentifier";
pub const IMPORT: &str = "Import";
pub const LANGUAGE_TARGETS: &str = "LanguageTargets";
pub const OUTPUT_TYPE: &str = "OutputType";
pub const PACKAGE_REFERENCE: &str = "PackageReference";

pub const SDK: &str = "Sdk";
pub const TOOLS_VERSION: &str = "ToolsVersion";
pub const INCLUDE: &str = "Include";
pub const UPDATE: &str = "Update";
pub const VERSION: &str = "Version";
