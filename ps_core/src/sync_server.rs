//! The BSP coordination engine. Wraps [`AsyncServer`] with two
//! [`VectorClock`]s (one for reads, one for writes), the [`MessageCache`]
//! pair, and a per-worker pending-add counter, so that every worker's i-th
//! `Get` observes the state produced by *all* workers' i-th `Add` without
//! a central barrier.
//!
//! `SyncServer` holds an `AsyncServer` and delegates the final "apply"
//! step to it once its own admission checks pass, rather than subclassing
//! it.

use crate::async_server::AsyncServer;
use crate::cache::MessageCache;
use crate::clock::VectorClock;
use crate::collab::{Communicator, Membership};
use crate::id::{TableId, WorkerId};
use crate::message::Message;
use crate::table::ServerTable;
use crate::{log, warn};

/// Wraps [`AsyncServer`] with the coordination protocol below. Generic
/// over `M: Membership` because rank-to-worker translation is needed on
/// every message, including ones drained from a cache long after the
/// connection that sent them handled anything else.
pub struct SyncServer<M> {
    inner: AsyncServer,
    membership: M,
    get_clock: VectorClock,
    add_clock: VectorClock,
    cache: MessageCache,
    /// `pending_adds[i]`: count of worker `i`'s own `Add`s currently
    /// parked in `cache.add`. Gates worker `i`'s next `Get`.
    pending_adds: Vec<u64>,
}

impl<M: Membership> SyncServer<M> {
    pub fn new(membership: M) -> Self {
        let num_workers = membership.num_workers();
        Self {
            inner: AsyncServer::new(),
            membership,
            get_clock: VectorClock::new(num_workers),
            add_clock: VectorClock::new(num_workers),
            cache: MessageCache::new(),
            pending_adds: vec![0; num_workers],
        }
    }

    pub fn register_table(&mut self, table: Box<dyn ServerTable>) -> TableId {
        self.inner.register_table(table)
    }

    fn worker_of(&self, msg: &Message) -> WorkerId {
        self.membership.rank_to_worker_id(msg.src)
    }

    /// Handles an `Add` from a worker, caching it if the worker has
    /// already read ahead of the pack in the current read phase.
    pub fn process_add(&mut self, msg: Message, comm: &mut dyn Communicator) {
        let worker = self.worker_of(&msg);

        // admission check: worker already read ahead of the pack in the
        // current read phase, so this Add belongs to the next write phase.
        if self.get_clock.local(worker) > self.get_clock.global() {
            log!("[sync] caching Add from {} (read-ahead)", worker);
            self.pending_adds[worker.0] += 1;
            self.cache.add.push(msg);
            return;
        }

        // apply.
        self.inner.process_add(msg, comm);

        // post-advance: closing the write phase releases cached Gets.
        if self.add_clock.update(worker) {
            debug_assert!(
                self.cache.add.is_empty(),
                "write phase closed with adds still cached"
            );
            for get_msg in self.cache.get.drain_all() {
                let get_worker = self.worker_of(&get_msg);
                log!("[sync] draining cached Get from {}", get_worker);
                self.inner.process_get(get_msg, comm);
                let closed = self.get_clock.update(get_worker);
                debug_assert!(
                    !closed,
                    "draining the get cache must not itself close the read phase"
                );
            }
        }
    }

    /// Handles a `Get` from a worker, caching it if the worker is
    /// write-ahead or still has Adds of its own parked.
    pub fn process_get(&mut self, msg: Message, comm: &mut dyn Communicator) {
        let worker = self.worker_of(&msg);

        // admission check: worker is write-ahead, or has Adds of its own
        // still parked, so it must not race ahead with a Get.
        if self.add_clock.local(worker) > self.add_clock.global()
            || self.pending_adds[worker.0] > 0
        {
            log!("[sync] caching Get from {} (write-ahead or pending add)", worker);
            self.cache.get.push(msg);
            return;
        }

        // serve.
        self.inner.process_get(msg, comm);

        // post-advance: closing the read phase releases cached Adds.
        if self.get_clock.update(worker) {
            for add_msg in self.cache.add.drain_all() {
                let add_worker = self.worker_of(&add_msg);
                log!("[sync] draining cached Add from {}", add_worker);
                self.inner.process_add(add_msg, comm);
                let closed = self.add_clock.update(add_worker);
                debug_assert!(
                    !closed,
                    "draining the add cache must not itself close the write phase"
                );
                self.pending_adds[add_worker.0] -= 1;
            }
        }
    }

    /// Handles a worker's end-of-training signal. A worker that has no
    /// more Adds/Gets to submit sends this once; afterwards its slot in
    /// both clocks is the finished sentinel and it no longer pins phase
    /// closure.
    pub fn process_finish_train(&mut self, msg: Message, comm: &mut dyn Communicator) {
        let worker = self.worker_of(&msg);
        log!("[sync] worker {} finished training", worker);

        if self.get_clock.finish_train(worker) {
            debug_assert!(
                self.cache.get.is_empty(),
                "a finished worker cannot have a Get outstanding"
            );
            for add_msg in self.cache.add.drain_all() {
                let add_worker = self.worker_of(&add_msg);
                self.inner.process_add(add_msg, comm);
                // a worker may finish exactly at the phase boundary, so
                // unlike the normal-path drains this closing is allowed.
                self.add_clock.update(add_worker);
            }
        }

        if self.add_clock.finish_train(worker) {
            debug_assert!(
                self.cache.add.is_empty(),
                "write phase closed with adds still cached after finish train"
            );
            for get_msg in self.cache.get.drain_all() {
                let get_worker = self.worker_of(&get_msg);
                self.inner.process_get(get_msg, comm);
                self.get_clock.update(get_worker);
            }
        }
    }

    /// Logs both clocks and any residual cache contents, for the
    /// diagnostic dump on shutdown.
    pub fn log_shutdown_state(&self) {
        warn!("get clock: {}", self.get_clock);
        warn!("add clock: {}", self.add_clock);
        warn!("get cache size: {}", self.cache.get.len());
        warn!("add cache size: {}", self.cache.add.len());
    }

    #[cfg(test)]
    fn invariants_hold(&self) {
        let add_min = (0..self.add_clock.num_workers())
            .map(|i| self.add_clock.local(WorkerId(i)))
            .min()
            .unwrap_or(0);
        let get_min = (0..self.get_clock.num_workers())
            .map(|i| self.get_clock.local(WorkerId(i)))
            .min()
            .unwrap_or(0);
        assert!(self.add_clock.global() <= add_min);
        assert!(self.get_clock.global() <= get_min);
        let diff = self.add_clock.global().abs_diff(self.get_clock.global());
        assert!(diff <= 1, "clocks drifted by {}", diff);
        assert!(self.pending_adds.iter().all(|&p| p < u64::MAX));
        if self.add_clock.all_equal() {
            assert!(self.cache.add.is_empty());
        }
        if self.get_clock.all_equal() {
            assert!(self.cache.get.is_empty());
        }
        assert!(self.cache.get.is_empty() || self.cache.add.is_empty());
    }
}
