//! Fixed-delay deferral queue for Arbor Picker.
//!
//! The picker defers a small number of UI effects until after the current
//! input event has finished propagating (re-checking activation after a blur,
//! re-running search after a paste). [`DeferredQueue`] holds those pending
//! actions as typed payloads with a fire time; the host drains expired
//! payloads from its event loop.
//!
//! Deferred actions are fire-and-forget: a superseding user action does not
//! need to cancel a pending deferral, because the handler re-checks current
//! state when it runs. Explicit cancellation is still available per handle.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use slotmap::{SlotMap, new_key_type};

use crate::error::{DeferralError, Result};

new_key_type! {
    /// A unique identifier for a pending deferral.
    pub struct DeferralId;
}

/// Internal deferral data.
struct DeferralData<T> {
    /// When this deferral should fire.
    fire_at: Instant,
    /// The payload handed back to the host on expiry.
    payload: T,
}

/// An entry in the deferral queue (min-heap by fire time).
#[derive(Debug, Clone, Copy)]
struct QueueEntry {
    id: DeferralId,
    fire_at: Instant,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.fire_at == other.fire_at
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap (BinaryHeap is max-heap by default).
        other.fire_at.cmp(&self.fire_at)
    }
}

/// A queue of one-shot deferred actions with typed payloads.
///
/// # Example
///
/// ```
/// use std::time::{Duration, Instant};
/// use arbor_picker_core::DeferredQueue;
///
/// #[derive(Debug, PartialEq)]
/// enum Action {
///     Refresh,
/// }
///
/// let mut queue = DeferredQueue::new();
/// queue.defer(Duration::from_millis(50), Action::Refresh);
///
/// // Nothing fires before the delay has elapsed.
/// assert!(queue.drain_expired_at(Instant::now()).is_empty());
///
/// let later = Instant::now() + Duration::from_millis(60);
/// assert_eq!(queue.drain_expired_at(later), vec![Action::Refresh]);
/// ```
pub struct DeferredQueue<T> {
    /// All pending deferrals.
    deferrals: SlotMap<DeferralId, DeferralData<T>>,
    /// Priority queue of fire times (min-heap).
    queue: BinaryHeap<QueueEntry>,
}

impl<T> Default for DeferredQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DeferredQueue<T> {
    /// Create an empty deferral queue.
    pub fn new() -> Self {
        Self {
            deferrals: SlotMap::with_key(),
            queue: BinaryHeap::new(),
        }
    }

    /// Schedule a payload to fire after the given delay.
    ///
    /// Returns the deferral ID that can be used to cancel it.
    pub fn defer(&mut self, delay: Duration, payload: T) -> DeferralId {
        let fire_at = Instant::now() + delay;
        let id = self.deferrals.insert(DeferralData { fire_at, payload });
        self.queue.push(QueueEntry { id, fire_at });
        tracing::trace!(target: "arbor_picker_core::deferral", ?id, ?delay, "deferral scheduled");
        id
    }

    /// Cancel a pending deferral.
    ///
    /// Returns an error if the deferral already fired or was cancelled.
    pub fn cancel(&mut self, id: DeferralId) -> Result<()> {
        if self.deferrals.remove(id).is_some() {
            Ok(())
        } else {
            Err(DeferralError::InvalidDeferralId.into())
        }
    }

    /// Check whether a deferral is still pending.
    pub fn is_pending(&self, id: DeferralId) -> bool {
        self.deferrals.contains_key(id)
    }

    /// The number of pending deferrals.
    pub fn len(&self) -> usize {
        self.deferrals.len()
    }

    /// Returns `true` if no deferrals are pending.
    pub fn is_empty(&self) -> bool {
        self.deferrals.is_empty()
    }

    /// The duration until the next deferral fires, if any.
    ///
    /// Returns `Duration::ZERO` when a deferral is already overdue.
    pub fn time_until_next(&mut self) -> Option<Duration> {
        // Drop cancelled entries from the front of the queue.
        while let Some(entry) = self.queue.peek() {
            if self.deferrals.contains_key(entry.id) {
                break;
            }
            self.queue.pop();
        }

        self.queue
            .peek()
            .map(|entry| entry.fire_at.saturating_duration_since(Instant::now()))
    }

    /// Remove and return the payloads of all deferrals that have expired.
    ///
    /// Payloads come back in fire-time order.
    pub fn drain_expired(&mut self) -> Vec<T> {
        self.drain_expired_at(Instant::now())
    }

    /// Remove and return the payloads of all deferrals expired as of `now`.
    ///
    /// Taking the clock as an argument lets hosts (and tests) drive the queue
    /// with virtual time.
    pub fn drain_expired_at(&mut self, now: Instant) -> Vec<T> {
        let mut fired = Vec::new();

        while let Some(entry) = self.queue.peek() {
            if entry.fire_at > now {
                break;
            }
            let entry = *entry;
            self.queue.pop();

            // Cancelled deferrals leave stale queue entries behind.
            let Some(data) = self.deferrals.remove(entry.id) else {
                continue;
            };

            tracing::trace!(target: "arbor_picker_core::deferral", id = ?entry.id, "deferral fired");
            fired.push(data.payload);
        }

        fired
    }
}

impl<T> std::fmt::Debug for DeferredQueue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeferredQueue")
            .field("pending", &self.deferrals.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defer_and_drain() {
        let mut queue = DeferredQueue::new();
        queue.defer(Duration::from_millis(10), "a");

        assert_eq!(queue.len(), 1);
        assert!(queue.drain_expired_at(Instant::now()).is_empty());

        let later = Instant::now() + Duration::from_millis(20);
        assert_eq!(queue.drain_expired_at(later), vec!["a"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_drain_order_follows_fire_time() {
        let mut queue = DeferredQueue::new();
        queue.defer(Duration::from_millis(30), "slow");
        queue.defer(Duration::from_millis(10), "fast");
        queue.defer(Duration::from_millis(20), "middle");

        let later = Instant::now() + Duration::from_millis(50);
        assert_eq!(queue.drain_expired_at(later), vec!["fast", "middle", "slow"]);
    }

    #[test]
    fn test_partial_drain() {
        let mut queue = DeferredQueue::new();
        queue.defer(Duration::from_millis(10), "soon");
        queue.defer(Duration::from_millis(500), "later");

        let soon = Instant::now() + Duration::from_millis(20);
        assert_eq!(queue.drain_expired_at(soon), vec!["soon"]);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_cancel() {
        let mut queue = DeferredQueue::new();
        let id = queue.defer(Duration::from_millis(10), "cancelled");

        assert!(queue.is_pending(id));
        queue.cancel(id).unwrap();
        assert!(!queue.is_pending(id));

        let later = Instant::now() + Duration::from_millis(20);
        assert!(queue.drain_expired_at(later).is_empty());

        // Cancelling twice reports the stale handle.
        assert!(queue.cancel(id).is_err());
    }

    #[test]
    fn test_time_until_next() {
        let mut queue: DeferredQueue<()> = DeferredQueue::new();
        assert!(queue.time_until_next().is_none());

        let id = queue.defer(Duration::from_secs(60), ());
        let remaining = queue.time_until_next().unwrap();
        assert!(remaining <= Duration::from_secs(60));
        assert!(remaining > Duration::from_secs(59));

        queue.cancel(id).unwrap();
        assert!(queue.time_until_next().is_none());
    }
}
