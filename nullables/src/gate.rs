use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tokio::sync::Notify;

/// Handle for a call that is being held open. Dropping it without calling
/// [`release`](Gate::release) keeps the call parked.
#[derive(Clone)]
pub struct Gate(Arc<Notify>);

impl Gate {
    /// Let the held call finish. Safe to call before the call has started.
    pub fn release(&self) {
        self.0.notify_one();
    }
}

/// FIFO of gates waiting to be attached to the next calls.
#[derive(Default)]
pub(crate) struct GateQueue(Mutex<VecDeque<Arc<Notify>>>);

impl GateQueue {
    pub(crate) fn push(&self) -> Gate {
        let notify = Arc::new(Notify::new());
        lock(&self.0).push_back(Arc::clone(&notify));
        Gate(notify)
    }

    /// Wait on the next queued gate, if any.
    pub(crate) async fn pass(&self) {
        let next = lock(&self.0).pop_front();
        if let Some(notify) = next {
            notify.notified().await;
        }
    }
}

/// Lock, recovering the guard from a poisoned mutex.
pub(crate) fn lock<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}
