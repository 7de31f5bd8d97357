//! Serializable views printed by the CLI.

use crate::framework::TargetFramework;
use crate::package::PackageReference;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub schema: String,
    pub path: String,
    pub name: String,
    pub target_frameworks: Vec<TargetFramework>,
    pub uses_sdk: bool,
    pub requires_net_framework: bool,
    pub is_multi_targeted: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools_version: Option<String>,

    #[serde(default)]
    pub package_references: Vec<PackageReference>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsSummary {
    pub schema: String,
    pub overall_success: bool,
    pub count: usize,
    pub frameworks: Vec<FrameworkResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameworkResult {
    pub target_framework: TargetFramework,
    pub project_path: String,
    pub succeeded: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<String>,
}
