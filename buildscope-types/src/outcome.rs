use crate::framework::TargetFramework;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// A build outcome for one target framework.
///
/// buildscope treats the record as opaque; the only thing it reads is the framework the outcome
/// belongs to.
pub trait BuildOutcome {
    /// The framework this outcome was produced for, if the producer recorded one.
    fn target_framework(&self) -> Option<&TargetFramework>;
}

impl<T: BuildOutcome + ?Sized> BuildOutcome for &T {
    fn target_framework(&self) -> Option<&TargetFramework> {
        (**self).target_framework()
    }
}

impl<T: BuildOutcome + ?Sized> BuildOutcome for Box<T> {
    fn target_framework(&self) -> Option<&TargetFramework> {
        (**self).target_framework()
    }
}

impl<T: BuildOutcome + ?Sized> BuildOutcome for Arc<T> {
    fn target_framework(&self) -> Option<&TargetFramework> {
        (**self).target_framework()
    }
}

/// Outcome record as written by external build tooling (`outcome.json`).
///
/// Reading is tolerant: unknown fields are ignored and everything except the project path is
/// optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectOutcome {
    pub project_path: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_framework: Option<TargetFramework>,

    #[serde(default)]
    pub succeeded: bool,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub items: BTreeMap<String, Vec<String>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
}

impl ProjectOutcome {
    pub fn new(project_path: impl Into<String>, target_framework: Option<TargetFramework>) -> Self {
        Self {
            project_path: project_path.into(),
            target_framework,
            succeeded: false,
            properties: BTreeMap::new(),
            items: BTreeMap::new(),
            diagnostics: Vec::new(),
            finished_at: None,
        }
    }

    pub fn with_success(mut self, succeeded: bool) -> Self {
        self.succeeded = succeeded;
        self
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }
}

impl BuildOutcome for ProjectOutcome {
    fn target_framework(&self) -> Option<&TargetFramework> {
        self.target_framework.as_ref()
    }
}
