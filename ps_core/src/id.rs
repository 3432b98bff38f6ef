//! Small `Copy` integer newtypes used throughout the core, the same role
//! `fantoch::id` plays for `ProcessId`/`ShardId`/`Dot`.

use std::fmt;

/// A training worker, numbered `0..W-1`. Stable for the lifetime of the
/// process (the worker set is fixed at startup).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WorkerId(pub usize);

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "w{}", self.0)
    }
}

/// An opaque transport-level sender identifier. Translated to a
/// [`WorkerId`] via [`crate::collab::Membership::rank_to_worker_id`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rank(pub u64);

/// A dense table identifier, issued monotonically by
/// [`crate::async_server::AsyncServer::register_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TableId(pub usize);

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}
