//! Short-term suppression of duplicate pull request evaluations.
//!
//! GitHub often sends several `pull_request` deliveries for one push (for
//! example `synchronize` and `edited` together). Evaluating each of them would
//! race on stub issue creation, so an evaluation first claims the pull request
//! here. The claim expires after a short window; there is no background
//! sweeper, expired entries are dropped by the next call.
//!
//! This only guards a single process. Across processes, duplicate stub issues
//! are avoided by looking for an existing stub before creating one.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::types::PrKey;

/// Default window during which a repeated evaluation is skipped.
pub const DEFAULT_DEBOUNCE_INTERVAL: Duration = Duration::from_secs(5);

/// A mutex-guarded map from pull request to the time it was last claimed.
#[derive(Debug)]
pub struct DebounceCache {
    interval: chrono::Duration,
    entries: Mutex<HashMap<PrKey, DateTime<Utc>>>,
}

impl DebounceCache {
    pub fn new(interval: Duration) -> Self {
        DebounceCache {
            interval: chrono::Duration::from_std(interval).unwrap_or(chrono::Duration::MAX),
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Claims `key` at time `now`, reporting whether evaluation should be skipped.
    ///
    /// Purging, lookup and insertion happen under one lock, so two concurrent
    /// callers for the same key cannot both see it absent. A skipped call does
    /// not extend the existing claim.
    pub fn should_skip(&self, key: &PrKey, now: DateTime<Utc>) -> bool {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

        let interval = self.interval;
        entries.retain(|_, then| now.signed_duration_since(*then) <= interval);

        match entries.get(key) {
            Some(_) => true,
            None => {
                entries.insert(key.clone(), now);
                false
            }
        }
    }

    /// Number of live entries, as of the last call to [`should_skip`](Self::should_skip).
    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Default for DebounceCache {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PrNumber, RepoId};
    use std::sync::Arc;

    fn key(n: u64) -> PrKey {
        PrKey {
            repo: RepoId::new("octocat", "hello"),
            number: PrNumber(n),
        }
    }

    fn t0() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[test]
    fn second_call_within_window_is_skipped() {
        let cache = DebounceCache::default();
        assert!(!cache.should_skip(&key(1), t0()));
        assert!(cache.should_skip(&key(1), t0() + chrono::Duration::seconds(2)));
    }

    #[test]
    fn boundary_is_inclusive() {
        let cache = DebounceCache::default();
        assert!(!cache.should_skip(&key(1), t0()));
        assert!(cache.should_skip(&key(1), t0() + chrono::Duration::seconds(5)));
    }

    #[test]
    fn calls_beyond_window_both_proceed() {
        let cache = DebounceCache::default();
        assert!(!cache.should_skip(&key(1), t0()));
        assert!(!cache.should_skip(
            &key(1),
            t0() + chrono::Duration::milliseconds(5_001)
        ));
    }

    #[test]
    fn skip_does_not_refresh_timestamp() {
        let cache = DebounceCache::default();
        assert!(!cache.should_skip(&key(1), t0()));
        assert!(cache.should_skip(&key(1), t0() + chrono::Duration::seconds(4)));
        // Measured from the first claim, not the skipped one.
        assert!(!cache.should_skip(&key(1), t0() + chrono::Duration::seconds(6)));
    }

    #[test]
    fn different_keys_are_independent() {
        let cache = DebounceCache::default();
        assert!(!cache.should_skip(&key(1), t0()));
        assert!(!cache.should_skip(&key(2), t0()));
        let other_repo = PrKey {
            repo: RepoId::new("octocat", "other"),
            number: PrNumber(1),
        };
        assert!(!cache.should_skip(&other_repo, t0()));
    }

    #[test]
    fn stale_entries_purged_on_any_call() {
        let cache = DebounceCache::default();
        assert!(!cache.should_skip(&key(1), t0()));
        assert!(!cache.should_skip(&key(2), t0()));
        assert_eq!(cache.len(), 2);

        assert!(!cache.should_skip(&key(3), t0() + chrono::Duration::seconds(10)));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn concurrent_claims_admit_exactly_one() {
        let cache = Arc::new(DebounceCache::default());
        let now = t0();
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || cache.should_skip(&key(7), now))
            })
            .collect();
        let proceeded = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|skipped| !skipped)
            .count();
        assert_eq!(proceeded, 1);
    }
}
