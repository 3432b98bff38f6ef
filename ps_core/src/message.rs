//! The message envelope the server dispatches on.

use crate::id::{Rank, TableId};
use serde::{Deserialize, Serialize};

/// Message kind. `Reply` is never dispatched to a handler; it's only ever
/// the kind of a message this server *sends*.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MsgKind {
    RequestGet,
    RequestAdd,
    ServerFinishTrain,
    Reply,
}

/// An envelope carrying a message kind, its source rank, the target table,
/// and an opaque payload. Reply messages are derived from a request via
/// [`Message::reply`], inheriting routing metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub kind: MsgKind,
    pub src: Rank,
    pub table_id: TableId,
    pub payload: Vec<u8>,
}

impl Message {
    pub fn new(kind: MsgKind, src: Rank, table_id: TableId, payload: Vec<u8>) -> Self {
        Self {
            kind,
            src,
            table_id,
            payload,
        }
    }

    pub fn get(src: Rank, table_id: TableId, payload: Vec<u8>) -> Self {
        Self::new(MsgKind::RequestGet, src, table_id, payload)
    }

    pub fn add(src: Rank, table_id: TableId, payload: Vec<u8>) -> Self {
        Self::new(MsgKind::RequestAdd, src, table_id, payload)
    }

    pub fn finish_train(src: Rank) -> Self {
        Self::new(MsgKind::ServerFinishTrain, src, TableId(0), Vec::new())
    }

    /// Builds the reply envelope for this request, inheriting `src` and
    /// `table_id`; the reply's payload starts empty and is filled in by the
    /// handler (for `Get`) or left empty (a plain ack, for `Add`).
    pub fn reply(&self) -> Message {
        Message::new(MsgKind::Reply, self.src, self.table_id, Vec::new())
    }
}
