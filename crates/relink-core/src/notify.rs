//! Observer registry for connection lifecycle notifications.
//!
//! Each [`Notifier`] holds an ordered list of callbacks. Dispatch copies the
//! list under the lock, releases it, then invokes the copy, so a callback may
//! subscribe or unsubscribe (itself included) while a dispatch is running.
//! A panicking callback is caught and logged; the remaining callbacks still run.
//!
//! ```text
//!  notify()
//!     │ lock ─► clone Vec<(id, Arc<cb>)> ─► unlock
//!     ├─► cb #1
//!     ├─► cb #2   (may call unsubscribe(#2) / subscribe(..))
//!     └─► cb #N
//! ```

use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type Callback = Arc<dyn Fn() + Send + Sync>;

/// Lifecycle notifications a retry policy can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyEvent {
    /// A lost connection was re-established.
    Restored,
    /// A connect/disconnect did not complete within the timeout interval.
    TimedOut,
}

impl PolicyEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            PolicyEvent::Restored => "restored",
            PolicyEvent::TimedOut => "timed_out",
        }
    }
}

/// Handle returned by [`Notifier::subscribe`], used to detach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Inner {
    event: PolicyEvent,
    next_id: AtomicU64,
    subscribers: Mutex<Vec<(SubscriptionId, Callback)>>,
}

/// Shared registry of callbacks for one [`PolicyEvent`].
///
/// Cloning yields another handle to the same registry.
#[derive(Clone)]
pub struct Notifier {
    inner: Arc<Inner>,
}

impl Notifier {
    pub fn new(event: PolicyEvent) -> Self {
        Self {
            inner: Arc::new(Inner {
                event,
                next_id: AtomicU64::new(1),
                subscribers: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn event(&self) -> PolicyEvent {
        self.inner.event
    }

    fn subscribers(&self) -> MutexGuard<'_, Vec<(SubscriptionId, Callback)>> {
        self.inner
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Attach a callback; it runs on every later dispatch until detached.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscribers().push((id, Arc::new(callback)));
        id
    }

    /// Detach a callback. Returns `false` if it was not attached.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subs = self.subscribers();
        let before = subs.len();
        subs.retain(|(sub_id, _)| *sub_id != id);
        subs.len() != before
    }

    pub fn len(&self) -> usize {
        self.subscribers().len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers().is_empty()
    }

    /// Invoke every callback attached at the moment of the call.
    ///
    /// Returns the number of callbacks that ran without panicking. With no
    /// subscribers this is a no-op returning 0.
    pub fn notify(&self) -> usize {
        let snapshot: Vec<Callback> = self
            .subscribers()
            .iter()
            .map(|(_, cb)| Arc::clone(cb))
            .collect();

        if snapshot.is_empty() {
            return 0;
        }
        tracing::debug!(
            event = self.inner.event.as_str(),
            subscribers = snapshot.len(),
            "dispatching policy event"
        );

        let mut delivered = 0;
        for cb in snapshot {
            match catch_unwind(AssertUnwindSafe(|| cb())) {
                Ok(()) => delivered += 1,
                Err(_) => tracing::warn!(
                    event = self.inner.event.as_str(),
                    "policy event subscriber panicked"
                ),
            }
        }
        delivered
    }
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("event", &self.inner.event)
            .field("subscribers", &self.len())
            .finish()
    }
}
