//! In-memory stand-ins for the [`crate::collab`] traits and a toy
//! [`crate::table::ServerTable`], used by this crate's own tests the way
//! `fantoch::run::tests` ships a reusable `Simulation`-backed harness for
//! its own protocol tests. Not gated behind `#[cfg(test)]` so integration
//! tests under `tests/` can use it too.

use crate::collab::{Communicator, Control, Mailbox, Membership};
use crate::id::{Rank, WorkerId};
use crate::message::Message;
use crate::table::ServerTable;
use std::collections::VecDeque;

/// Collects every message sent to it, in order. Never drops or reorders
/// anything, so tests can assert on exact reply sequences.
#[derive(Debug, Default)]
pub struct InMemoryCommunicator {
    pub sent: Vec<Message>,
}

impl InMemoryCommunicator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Communicator for InMemoryCommunicator {
    fn send(&mut self, msg: Message) {
        self.sent.push(msg);
    }
}

/// A FIFO-backed [`Mailbox`], for feeding a scripted sequence of inbound
/// messages through [`crate::run::dispatch`] / the full consume loop.
#[derive(Debug, Default)]
pub struct InMemoryMailbox {
    queue: VecDeque<Message>,
}

impl InMemoryMailbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, msg: Message) {
        self.queue.push_back(msg);
    }
}

impl Mailbox for InMemoryMailbox {
    fn try_pop(&mut self) -> Option<Message> {
        self.queue.pop_front()
    }
}

/// A direct `rank.0 == worker_id.0` mapping over a fixed-size cluster.
/// Good enough for tests, which never need a non-trivial rank scheme.
#[derive(Debug, Clone, Copy)]
pub struct FixedMembership {
    num_workers: usize,
}

impl FixedMembership {
    pub fn new(num_workers: usize) -> Self {
        Self { num_workers }
    }
}

impl Membership for FixedMembership {
    fn num_workers(&self) -> usize {
        self.num_workers
    }

    fn rank_to_worker_id(&self, rank: Rank) -> WorkerId {
        WorkerId(rank.0 as usize)
    }

    fn server_id(&self) -> usize {
        0
    }
}

/// A [`Control`] that reports `running() == true` until flipped off, for
/// scripting exactly one pass through the shutdown path.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlagControl {
    running: bool,
}

impl FlagControl {
    pub fn new() -> Self {
        Self { running: true }
    }

    pub fn stop(&mut self) {
        self.running = false;
    }
}

impl Control for FlagControl {
    fn running(&self) -> bool {
        self.running
    }
}

/// A table that sums every `Add`ed `i64` delta and echoes the running sum
/// on `Get`, ignoring the request payload beyond requiring it be
/// non-empty (enforced upstream, not here).
#[derive(Debug, Default)]
pub struct SumTable {
    sum: i64,
}

impl SumTable {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ServerTable for SumTable {
    fn process_add(&mut self, delta: &[u8]) {
        let delta = i64::from_le_bytes(delta.try_into().expect("8-byte i64 delta"));
        self.sum += delta;
    }

    fn process_get(&mut self, _request: &[u8], out: &mut Vec<u8>) {
        out.extend_from_slice(&self.sum.to_le_bytes());
    }
}
