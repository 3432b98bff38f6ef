//! The collaborator boundary: traits for everything this core treats as
//! external, namely the mailbox runtime, the outbound transport, cluster
//! membership, and the shutdown signal. Production implementations of
//! these (real sockets, a real actor mailbox, a rank service) live outside
//! this crate; [`crate::testkit`] ships in-memory ones for tests, the same
//! split `fantoch::run` draws between `Protocol` and the reader/writer
//! tasks that actually own sockets.

use crate::id::{Rank, WorkerId};
use crate::message::Message;

/// Delivers messages from the actor runtime into this server's handler
/// loop. `try_pop` is non-blocking by design: try to pop one message, and
/// if none is available the caller yields and retries.
pub trait Mailbox {
    fn try_pop(&mut self) -> Option<Message>;
}

/// Hands a reply to the transport-facing actor for delivery back to the
/// worker that sent the original request.
pub trait Communicator {
    fn send(&mut self, msg: Message);
}

/// Cluster membership / rank service.
pub trait Membership {
    fn num_workers(&self) -> usize;
    fn rank_to_worker_id(&self, rank: Rank) -> WorkerId;
    fn server_id(&self) -> usize;
}

/// The shutdown signal. `true` while the process should keep consuming
/// its mailbox.
pub trait Control {
    fn running(&self) -> bool;
}
