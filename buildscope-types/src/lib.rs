//! Shared DTOs for the buildscope workspace.
//!
//! # Design constraints
//! - Target frameworks have exactly one canonical representation; every moniker spelling of the
//!   same framework normalizes to an equal value.
//! - Outcome and summary types are serialized to disk and stdout; prefer adding optional fields
//!   over changing semantics.

pub mod framework;
pub mod outcome;
pub mod package;
pub mod summary;
pub mod version;

pub use framework::{FrameworkName, FrameworkParseError, TargetFramework};
pub use outcome::{BuildOutcome, ProjectOutcome};
pub use package::PackageReference;
pub use version::FrameworkVersion;

/// Schema identifiers.
pub mod schema {
    pub const BUILDSCOPE_PROJECT_V1: &str = "buildscope.project.v1";
    pub const BUILDSCOPE_RESULTS_V1: &str = "buildscope.results.v1";
}
