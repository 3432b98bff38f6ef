//! Picks the concrete server type from [`Config`], the same role a
//! `fantoch` binary's `match protocol { ... }` dispatch plays for choosing
//! between protocol implementations at startup.

use crate::async_server::AsyncServer;
use crate::collab::Membership;
use crate::config::Config;
use crate::sync_server::SyncServer;

/// The two server shapes a process can run, selected once at startup and
/// never switched at runtime.
pub enum Server<M> {
    Async(AsyncServer),
    Sync(SyncServer<M>),
}

/// Builds the right [`Server`] variant for `config.sync()`.
pub struct ServerFactory;

impl ServerFactory {
    pub fn build<M: Membership>(config: &Config, membership: M) -> Server<M> {
        if config.sync() {
            Server::Sync(SyncServer::new(membership))
        } else {
            Server::Async(AsyncServer::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::FixedMembership;

    #[test]
    fn picks_async_by_default() {
        let config = Config::new();
        let server = ServerFactory::build(&config, FixedMembership::new(2));
        assert!(matches!(server, Server::Async(_)));
    }

    #[test]
    fn picks_sync_when_configured() {
        let mut config = Config::new();
        config.set_sync(true);
        let server = ServerFactory::build(&config, FixedMembership::new(2));
        assert!(matches!(server, Server::Sync(_)));
    }
}
