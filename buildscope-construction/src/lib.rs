//! Project file construction: parse an MSBuild project document and answer questions about it.
//!
//! Nothing here evaluates MSBuild. Properties are not substituted, imports are not followed and
//! conditions are not considered; every answer comes from structural lookups over the XML as
//! written.

mod element;
mod error;
pub mod names;
mod project_file;

pub use error::ProjectFileError;
pub use project_file::{IMPORTS_THAT_REQUIRE_NET_FRAMEWORK, ProjectFile, resolve_target_frameworks};
