//! Build outcome aggregation.
//!
//! An external build engine produces one outcome per target framework, often in parallel.
//! [`ResultSet`] collects them under their framework key and reduces the per-build success flags
//! into one overall verdict. [`load_outcomes`] and [`collect_outcomes`] read outcomes that the
//! engine persisted as `outcome.json` files.

mod load;
mod set;

pub use load::{LoadedOutcome, OutcomeLoadError, collect_outcomes, load_outcomes, summarize};
pub use set::{Iter, LookupError, ResultSet};
