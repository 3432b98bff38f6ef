//! Synchronous parameter server core.
//!
//! Mediates `Get`/`Add` traffic between a fixed set of training workers and
//! a local shard of parameter tables. The interesting part is
//! [`sync_server::SyncServer`]: it enforces bulk-synchronous-parallel (BSP)
//! semantics, so every worker's i-th `Get` observes the state produced by
//! *all* workers' i-th `Add`, without a central barrier, using only a pair
//! of [`clock::VectorClock`]s and two FIFO caches.
//!
//! The mailbox runtime, cluster membership, wire transport, table storage
//! engine and config loading are external collaborators: this crate defines
//! the traits in [`collab`] and [`table`] that they must satisfy, and ships
//! in-memory implementations in [`testkit`] for tests.

mod macros;
pub(crate) use macros::{log, trace, warn};

pub mod async_server;
pub mod cache;
pub mod clock;
pub mod collab;
pub mod config;
pub mod factory;
pub mod id;
pub mod message;
pub mod run;
pub mod sync_server;
pub mod table;
pub mod testkit;

pub use async_server::AsyncServer;
pub use clock::VectorClock;
pub use config::Config;
pub use factory::ServerFactory;
pub use message::{Message, MsgKind};
pub use sync_server::SyncServer;
