//! Load lifecycle for remote-backed collections: tri-state status, fallback
//! application, and a per-view epoch that discards results arriving after the
//! view has reloaded or been torn down.

use tracing::{debug, warn};

use crate::remote::ApiError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadState {
    Pending,
    Ready,
    /// Terminal until a new load is explicitly triggered; the client never
    /// auto-retries.
    Unavailable,
}

/// What to render when the loader fails or legitimately returns nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Restaurant list: failures render as an empty list.
    Never,
    /// Substitute the sample collection on transport/protocol failure only.
    OnFailure,
    /// Community feed and recipes: substitute on failure or on an empty
    /// success.
    OnFailureOrEmpty,
}

/// A remote-backed collection owned by a single view. Created at view entry,
/// mutated in place by optimistic operations, discarded with the view.
#[derive(Debug)]
pub struct Loaded<T> {
    collection: &'static str,
    policy: FallbackPolicy,
    state: LoadState,
    items: Vec<T>,
    last_error: Option<String>,
    epoch: u64,
}

impl<T> Loaded<T> {
    pub fn new(collection: &'static str, policy: FallbackPolicy) -> Self {
        Self {
            collection,
            policy,
            state: LoadState::Pending,
            items: Vec::new(),
            last_error: None,
            epoch: 0,
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut Vec<T> {
        &mut self.items
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Start (or restart) a load. Returns the epoch the eventual result must
    /// present to be accepted; results from earlier epochs are stale.
    pub fn begin_load(&mut self) -> u64 {
        self.state = LoadState::Pending;
        self.epoch += 1;
        self.epoch
    }

    /// Invalidate outstanding results without starting a new load; used on
    /// view teardown so late arrivals cannot mutate a dead view.
    pub fn invalidate(&mut self) {
        self.epoch += 1;
    }

    pub fn current_epoch(&self) -> u64 {
        self.epoch
    }

    /// Apply a load outcome. Fallback is applied exactly once per failed (or,
    /// per policy, empty) load; failures are logged with their extracted
    /// cause and never propagated.
    pub fn resolve(
        &mut self,
        epoch: u64,
        outcome: Result<Vec<T>, ApiError>,
        fallback: impl FnOnce() -> Vec<T>,
    ) {
        if epoch != self.epoch {
            debug!(
                collection = self.collection,
                stale = epoch,
                current = self.epoch,
                "dropping stale load result"
            );
            return;
        }
        match outcome {
            Ok(items) => {
                self.last_error = None;
                self.state = LoadState::Ready;
                self.items = if items.is_empty() && self.policy == FallbackPolicy::OnFailureOrEmpty
                {
                    fallback()
                } else {
                    items
                };
            }
            Err(err) => {
                let cause = err.cause();
                warn!(collection = self.collection, cause = %cause, "load failed");
                self.last_error = Some(cause);
                self.state = LoadState::Unavailable;
                self.items = match self.policy {
                    FallbackPolicy::Never => Vec::new(),
                    FallbackPolicy::OnFailure | FallbackPolicy::OnFailureOrEmpty => fallback(),
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure() -> ApiError {
        ApiError::Status {
            status: 429,
            message: "rate limited".to_string(),
        }
    }

    #[test]
    fn starts_pending_and_becomes_ready() {
        let mut list: Loaded<u32> = Loaded::new("restaurants", FallbackPolicy::Never);
        assert_eq!(list.state(), LoadState::Pending);
        let epoch = list.begin_load();
        list.resolve(epoch, Ok(vec![1, 2]), Vec::new);
        assert_eq!(list.state(), LoadState::Ready);
        assert_eq!(list.items(), &[1, 2]);
        assert!(list.last_error().is_none());
    }

    #[test]
    fn failure_without_fallback_renders_empty() {
        let mut list: Loaded<u32> = Loaded::new("restaurants", FallbackPolicy::Never);
        let epoch = list.begin_load();
        list.resolve(epoch, Err(failure()), || vec![7]);
        assert_eq!(list.state(), LoadState::Unavailable);
        assert!(list.items().is_empty());
        assert_eq!(list.last_error(), Some("rate limited"));
    }

    #[test]
    fn failure_with_fallback_substitutes_samples() {
        let mut list: Loaded<u32> = Loaded::new("community", FallbackPolicy::OnFailure);
        let epoch = list.begin_load();
        list.resolve(epoch, Err(failure()), || vec![7, 8]);
        assert_eq!(list.state(), LoadState::Unavailable);
        assert_eq!(list.items(), &[7, 8]);
    }

    #[test]
    fn empty_success_falls_back_only_when_policy_says_so() {
        let mut feed: Loaded<u32> = Loaded::new("community", FallbackPolicy::OnFailureOrEmpty);
        let epoch = feed.begin_load();
        feed.resolve(epoch, Ok(Vec::new()), || vec![9]);
        assert_eq!(feed.state(), LoadState::Ready);
        assert_eq!(feed.items(), &[9]);

        let mut eats: Loaded<u32> = Loaded::new("restaurants", FallbackPolicy::Never);
        let epoch = eats.begin_load();
        eats.resolve(epoch, Ok(Vec::new()), || vec![9]);
        assert_eq!(eats.state(), LoadState::Ready);
        assert!(eats.items().is_empty());
    }

    #[test]
    fn stale_epoch_results_are_dropped() {
        let mut list: Loaded<u32> = Loaded::new("restaurants", FallbackPolicy::Never);
        let first = list.begin_load();
        let second = list.begin_load();
        list.resolve(first, Ok(vec![1]), Vec::new);
        assert_eq!(list.state(), LoadState::Pending);
        assert!(list.items().is_empty());
        list.resolve(second, Ok(vec![2]), Vec::new);
        assert_eq!(list.items(), &[2]);
    }

    #[test]
    fn invalidate_blocks_post_teardown_mutation() {
        let mut list: Loaded<u32> = Loaded::new("restaurants", FallbackPolicy::Never);
        let epoch = list.begin_load();
        list.invalidate();
        list.resolve(epoch, Ok(vec![1]), Vec::new);
        assert!(list.items().is_empty());
    }

    #[test]
    fn reload_after_failure_is_pending_again() {
        let mut list: Loaded<u32> = Loaded::new("restaurants", FallbackPolicy::Never);
        let epoch = list.begin_load();
        list.resolve(epoch, Err(failure()), Vec::new);
        assert_eq!(list.state(), LoadState::Unavailable);
        list.begin_load();
        assert_eq!(list.state(), LoadState::Pending);
    }
}
