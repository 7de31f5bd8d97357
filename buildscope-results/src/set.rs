use buildscope_types::{BuildOutcome, TargetFramework};
use dashmap::DashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("no result for target framework '{framework}'")]
    NotFound { framework: TargetFramework },
}

const UNSET: u8 = 0;
const SUCCEEDED: u8 = 1;
const FAILED: u8 = 2;

/// Tri-state overall success: unset until the first report, then the AND of every report.
#[derive(Debug, Default)]
struct SuccessFlag(AtomicU8);

impl SuccessFlag {
    fn record(&self, succeeded: bool) {
        // The closure always returns Some, so the update cannot fail.
        let _ = self
            .0
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                Some(match (current, succeeded) {
                    (FAILED, _) | (_, false) => FAILED,
                    _ => SUCCEEDED,
                })
            });
    }

    fn get(&self) -> bool {
        self.0.load(Ordering::Acquire) == SUCCEEDED
    }
}

/// Build outcomes keyed by target framework.
///
/// Safe to share between threads: writers may call [`ResultSet::add`] concurrently while readers
/// query. Each key holds the most recently added outcome for that framework.
pub struct ResultSet<T> {
    results: DashMap<TargetFramework, Arc<T>>,
    overall_success: SuccessFlag,
}

impl<T> Default for ResultSet<T> {
    fn default() -> Self {
        Self {
            results: DashMap::new(),
            overall_success: SuccessFlag::default(),
        }
    }
}

impl<T> fmt::Debug for ResultSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultSet")
            .field("target_frameworks", &self.target_frameworks())
            .field("overall_success", &self.overall_success())
            .finish()
    }
}

impl<T> ResultSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Outcome for exactly `framework`.
    pub fn get(&self, framework: &TargetFramework) -> Result<Arc<T>, LookupError> {
        self.try_get(framework).ok_or_else(|| LookupError::NotFound {
            framework: framework.clone(),
        })
    }

    pub fn try_get(&self, framework: &TargetFramework) -> Option<Arc<T>> {
        self.results.get(framework).map(|entry| Arc::clone(entry.value()))
    }

    pub fn contains(&self, framework: &TargetFramework) -> bool {
        self.results.contains_key(framework)
    }

    /// Stored framework keys in sorted order.
    pub fn target_frameworks(&self) -> Vec<TargetFramework> {
        let mut keys: Vec<TargetFramework> =
            self.results.iter().map(|entry| entry.key().clone()).collect();
        keys.sort();
        keys
    }

    /// Outcomes in the order of [`ResultSet::target_frameworks`].
    pub fn results(&self) -> Vec<Arc<T>> {
        self.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// True only if at least one batch was added and every batch succeeded.
    pub fn overall_success(&self) -> bool {
        self.overall_success.get()
    }

    /// Iterate outcomes in framework order.
    ///
    /// The key snapshot is taken when iteration starts, not when `iter` is called, so a fresh
    /// iterator always sees everything added before its first `next`.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            set: self,
            keys: None,
        }
    }
}

impl<T: BuildOutcome> ResultSet<T> {
    /// Store a batch of outcomes and fold `succeeded` into the overall verdict.
    ///
    /// Outcomes without a framework are stored under [`TargetFramework::Any`]. A later outcome
    /// for the same framework replaces the earlier one.
    pub fn add<I>(&self, outcomes: I, succeeded: bool)
    where
        I: IntoIterator<Item = T>,
    {
        for outcome in outcomes {
            let key = outcome
                .target_framework()
                .cloned()
                .unwrap_or(TargetFramework::Any);
            debug!(framework = %key, "storing build outcome");
            self.results.insert(key, Arc::new(outcome));
        }
        self.overall_success.record(succeeded);
    }
}

pub struct Iter<'a, T> {
    set: &'a ResultSet<T>,
    keys: Option<std::vec::IntoIter<TargetFramework>>,
}

impl<T> Iterator for Iter<'_, T> {
    type Item = Arc<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let set = self.set;
        let keys = self
            .keys
            .get_or_insert_with(|| set.target_frameworks().into_iter());
        // Entries are never removed, so every snapshotted key resolves.
        keys.find_map(|key| set.try_get(&key))
    }
}

impl<'a, T> IntoIterator for &'a ResultSet<T> {
    type Item = Arc<T>;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
