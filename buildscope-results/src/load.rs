use crate::set::ResultSet;
use anyhow::Context;
use buildscope_types::summary::{FrameworkResult, ResultsSummary};
use buildscope_types::{BuildOutcome, ProjectOutcome, schema};
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use glob::glob;
use std::iter;
use thiserror::Error;
use tracing::{debug, warn};

/// File name external tooling uses for persisted outcomes.
pub const OUTCOME_FILE_NAME: &str = "outcome.json";

#[derive(Debug, Clone)]
pub struct LoadedOutcome {
    pub path: Utf8PathBuf,
    pub outcome: Result<ProjectOutcome, OutcomeLoadError>,
}

#[derive(Debug, Error, Clone)]
pub enum OutcomeLoadError {
    #[error("io error: {message}")]
    Io { message: String },

    #[error("json parse error: {message}")]
    Json { message: String },
}

/// Find and parse every `outcome.json` under `dir`.
///
/// Unreadable or malformed files are returned with an error instead of failing the scan. A
/// missing directory yields no outcomes.
pub fn load_outcomes(dir: &Utf8Path) -> anyhow::Result<Vec<LoadedOutcome>> {
    let pattern = dir.join("**").join(OUTCOME_FILE_NAME);
    let pattern_str = pattern.as_str();

    debug!(pattern = %pattern_str, "scanning for build outcomes");

    let mut out = Vec::new();
    for entry in glob(pattern_str).context("glob **/outcome.json")? {
        let path = entry
            .map_err(|e| anyhow::anyhow!("glob error: {e}"))?
            .to_string_lossy()
            .to_string();
        let utf8_path = Utf8PathBuf::from(path);

        let outcome = match fs::read_to_string(&utf8_path) {
            Ok(s) => serde_json::from_str::<ProjectOutcome>(&s).map_err(|e| {
                OutcomeLoadError::Json {
                    message: e.to_string(),
                }
            }),
            Err(e) => Err(OutcomeLoadError::Io {
                message: e.to_string(),
            }),
        };

        if let Err(e) = &outcome {
            warn!(path = %utf8_path, error = %e, "unusable outcome file");
        }

        out.push(LoadedOutcome {
            path: utf8_path,
            outcome,
        });
    }

    // Deterministic order matters.
    out.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(out)
}

/// Aggregate loaded outcomes into a [`ResultSet`], one producer thread per outcome.
///
/// A parsed outcome contributes its own `succeeded` flag. An unusable file stores nothing and
/// counts as a failed build.
pub fn collect_outcomes(loaded: &[LoadedOutcome]) -> ResultSet<ProjectOutcome> {
    let set = ResultSet::new();
    std::thread::scope(|scope| {
        for item in loaded {
            let set = &set;
            scope.spawn(move || match &item.outcome {
                Ok(outcome) => {
                    match outcome.target_framework() {
                        None => warn!(path = %item.path, "outcome has no target framework"),
                        Some(framework) if framework.is_unsupported() => warn!(
                            path = %item.path,
                            framework = %framework,
                            "outcome has an unrecognized target framework"
                        ),
                        Some(_) => {}
                    }
                    set.add(iter::once(outcome.clone()), outcome.succeeded);
                }
                Err(_) => set.add(iter::empty(), false),
            });
        }
    });
    debug!(count = set.len(), success = set.overall_success(), "collected outcomes");
    set
}

/// Serializable view of a result set, in framework order.
pub fn summarize(set: &ResultSet<ProjectOutcome>) -> ResultsSummary {
    let frameworks = set
        .target_frameworks()
        .into_iter()
        .filter_map(|framework| {
            set.try_get(&framework).map(|outcome| FrameworkResult {
                target_framework: framework,
                project_path: outcome.project_path.clone(),
                succeeded: outcome.succeeded,
                diagnostics: outcome.diagnostics.clone(),
            })
        })
        .collect::<Vec<_>>();

    ResultsSummary {
        schema: schema::BUILDSCOPE_RESULTS_V1.to_string(),
        overall_success: set.overall_success(),
        count: frameworks.len(),
        frameworks,
    }
}
