//! Snapshot-and-subscribe state container shared by both stores.
//!
//! [`StateCell`] owns one state value behind a `tokio::sync::watch` channel.
//! Every mutation is a single closure applied under the channel's write lock,
//! so readers observe either the state before a commit or the state after it,
//! never a partial update. Subscribers are woken once per visible commit.

use std::fmt;
use tokio::sync::watch;

/// Single-writer-at-a-time cell with observable commits.
pub struct StateCell<S> {
    tx: watch::Sender<S>,
}

impl<S: fmt::Debug> fmt::Debug for StateCell<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateCell")
            .field("state", &*self.tx.borrow())
            .field("subscribers", &self.tx.receiver_count())
            .finish()
    }
}

impl<S: Default> Default for StateCell<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S> StateCell<S> {
    /// Creates a cell holding `initial`.
    #[must_use]
    pub fn new(initial: S) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Applies `mutate` atomically.
    ///
    /// `mutate` returns whether the change is visible; subscribers are only
    /// notified when it returns `true`. The mutation is kept either way.
    pub fn commit<F>(&self, mutate: F) -> bool
    where
        F: FnOnce(&mut S) -> bool,
    {
        self.tx.send_if_modified(mutate)
    }

    /// Reads the current state without cloning it.
    pub fn read<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.tx.borrow())
    }

    /// Returns a receiver that is notified on every visible commit.
    ///
    /// The receiver starts with the current state marked as seen.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.tx.subscribe()
    }
}

impl<S: Clone> StateCell<S> {
    /// Returns a copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> S {
        self.tx.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_without_subscribers_still_mutates() {
        let cell = StateCell::new(0_u32);
        cell.commit(|n| {
            *n += 1;
            true
        });
        assert_eq!(cell.snapshot(), 1);
    }

    #[tokio::test]
    async fn subscribers_see_only_visible_commits() {
        let cell = StateCell::new(0_u32);
        let mut rx = cell.subscribe();

        cell.commit(|n| {
            *n = 5;
            false
        });
        assert!(!rx.has_changed().unwrap_or(true));

        cell.commit(|n| {
            *n = 7;
            true
        });
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), 7);
    }
}
