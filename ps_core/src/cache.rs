//! The two deferred-message FIFOs `SyncServer` defers `Get`s and `Add`s
//! onto while they wait for the opposite clock to advance.
//!
//! State touched here is only ever popped from the single server thread,
//! but pushes may come from a dispatcher thread feeding the mailbox, so
//! each queue is behind a `parking_lot::Mutex` rather than left as a bare
//! `VecDeque`, the same trade `fantoch` makes for its `Shared` clocks map
//! (`protocol/common/shared.rs`): a lock cheap enough that single-threaded
//! access pays nothing meaningful for it.

use crate::message::Message;
use parking_lot::Mutex;
use std::collections::VecDeque;

/// A single FIFO of deferred messages.
#[derive(Debug, Default)]
pub struct Cache {
    queue: Mutex<VecDeque<Message>>,
}

impl Cache {
    pub fn new() -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
        }
    }

    pub fn push(&self, msg: Message) {
        self.queue.lock().push_back(msg);
    }

    /// Pops the oldest deferred message, if any.
    pub fn pop(&self) -> Option<Message> {
        self.queue.lock().pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }

    /// Drains every currently-queued message, in FIFO order, into a
    /// `Vec`. Returning an owned `Vec` (rather than taking a per-message
    /// callback) lets callers drive the drain with a plain `for` loop and
    /// still mutate other fields of their own state per message, without
    /// fighting the borrow checker over a closure that captures `self`.
    pub fn drain_all(&self) -> Vec<Message> {
        let mut queue = self.queue.lock();
        queue.drain(..).collect()
    }
}

/// The pair of caches a [`crate::sync_server::SyncServer`] defers onto:
/// `get` holds `Get`s waiting on a write phase to close, `add` holds
/// `Add`s waiting on a read phase to close.
#[derive(Debug, Default)]
pub struct MessageCache {
    pub get: Cache,
    pub add: Cache,
}

impl MessageCache {
    pub fn new() -> Self {
        Self {
            get: Cache::new(),
            add: Cache::new(),
        }
    }
}
