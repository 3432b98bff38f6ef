//! The stateless base dispatcher: routes one `Get`/`Add` to its table and
//! emits a reply. This is the whole server when sync mode is disabled, and
//! the final "apply" step [`crate::sync_server::SyncServer`] delegates to
//! once its admission checks pass.

use crate::collab::Communicator;
use crate::id::TableId;
use crate::message::Message;
use crate::table::{ServerTable, TableStore};
use crate::{log, trace};

/// Routes `Get`/`Add` messages to the local table store. Holds no
/// coordination state; see [`crate::sync_server::SyncServer`] for that.
#[derive(Default)]
pub struct AsyncServer {
    store: TableStore,
}

impl AsyncServer {
    pub fn new() -> Self {
        Self {
            store: TableStore::new(),
        }
    }

    /// Registers a new table, returning the dense id it was assigned.
    pub fn register_table(&mut self, table: Box<dyn ServerTable>) -> TableId {
        self.store.register(table)
    }

    pub fn table_count(&self) -> usize {
        self.store.len()
    }

    /// Serves `msg` (must be a `Get`) against its table and sends the
    /// reply. An empty payload is treated as a no-op probe: silently
    /// dropped, no reply sent.
    pub fn process_get(&mut self, msg: Message, comm: &mut dyn Communicator) {
        if msg.payload.is_empty() {
            trace!("[async] empty Get payload from {:?}, dropping", msg.src);
            return;
        }
        let mut reply = msg.reply();
        self.store
            .get_mut(msg.table_id)
            .process_get(&msg.payload, &mut reply.payload);
        log!("[async] served Get from {:?} on {}", msg.src, msg.table_id);
        comm.send(reply);
    }

    /// Applies `msg`'s delta (must be an `Add`) and sends an empty
    /// acknowledgement. An empty payload is dropped, same as `process_get`.
    pub fn process_add(&mut self, msg: Message, comm: &mut dyn Communicator) {
        if msg.payload.is_empty() {
            trace!("[async] empty Add payload from {:?}, dropping", msg.src);
            return;
        }
        self.store.get_mut(msg.table_id).process_add(&msg.payload);
        log!("[async] applied Add from {:?} on {}", msg.src, msg.table_id);
        comm.send(msg.reply());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::{Rank, TableId};
    use crate::testkit::{InMemoryCommunicator, SumTable};

    #[test]
    fn get_and_add_round_trip() {
        let mut server = AsyncServer::new();
        let table_id = server.register_table(Box::new(SumTable::new()));
        let mut comm = InMemoryCommunicator::new();

        server.process_add(
            Message::add(Rank(0), table_id, 5i64.to_le_bytes().to_vec()),
            &mut comm,
        );
        server.process_get(
            Message::get(Rank(0), table_id, vec![0]),
            &mut comm,
        );

        assert_eq!(comm.sent.len(), 2);
        assert!(comm.sent[0].payload.is_empty());
        assert_eq!(
            i64::from_le_bytes(comm.sent[1].payload.clone().try_into().unwrap()),
            5
        );
    }

    #[test]
    fn empty_payload_is_dropped_silently() {
        let mut server = AsyncServer::new();
        let table_id = server.register_table(Box::new(SumTable::new()));
        let mut comm = InMemoryCommunicator::new();

        server.process_get(Message::get(Rank(0), table_id, vec![]), &mut comm);
        server.process_add(Message::add(Rank(0), table_id, vec![]), &mut comm);

        assert!(comm.sent.is_empty());
    }

    #[test]
    #[should_panic(expected = "invalid table id")]
    fn invalid_table_id_is_fatal() {
        let mut server = AsyncServer::new();
        let mut comm = InMemoryCommunicator::new();
        server.process_get(Message::get(Rank(0), TableId(0), vec![1]), &mut comm);
    }
}
