//! The mailbox consume loop. Pops one message at a time, dispatches it by
//! [`MsgKind`], and keeps going until [`Control::running`] turns false,
//! mirroring `fantoch::run::task::process::process_task`'s `select!`-driven
//! loop, collapsed to a single blocking source since this core's mailbox is
//! a plain collaborator rather than a set of tokio channels.

use crate::collab::{Communicator, Control, Mailbox, Membership};
use crate::factory::Server;
use crate::message::{Message, MsgKind};
use crate::{trace, warn};

/// Dispatches one message to `server`. `Get`/`Add` route to the matching
/// handler; `ServerFinishTrain` is only meaningful for [`Server::Sync`] and
/// is a no-op under [`Server::Async`], since async mode has no phases to
/// close. A `Reply` arriving here is a protocol violation elsewhere in the
/// system, since this server never receives its own replies, and is
/// logged rather than silently dropped.
pub fn dispatch<M: Membership>(
    server: &mut Server<M>,
    msg: Message,
    comm: &mut dyn Communicator,
) {
    match (server, msg.kind) {
        (Server::Async(s), MsgKind::RequestGet) => s.process_get(msg, comm),
        (Server::Async(s), MsgKind::RequestAdd) => s.process_add(msg, comm),
        (Server::Async(_), MsgKind::ServerFinishTrain) => {
            trace!("async server ignoring ServerFinishTrain from {:?}", msg.src);
        }
        (Server::Sync(s), MsgKind::RequestGet) => s.process_get(msg, comm),
        (Server::Sync(s), MsgKind::RequestAdd) => s.process_add(msg, comm),
        (Server::Sync(s), MsgKind::ServerFinishTrain) => s.process_finish_train(msg, comm),
        (_, MsgKind::Reply) => {
            warn!("server received a Reply-kind message from {:?}, dropping", msg.src);
        }
    }
}

/// Runs the consume loop until `control` reports the process should stop.
/// On exit, logs the coordination state for diagnosis before returning;
/// callers that want the original `exit(1)` behavior can do so after this
/// returns.
pub fn serve<M, B, C, D>(server: &mut Server<M>, mailbox: &mut B, comm: &mut C, control: &D)
where
    M: Membership,
    B: Mailbox,
    C: Communicator,
    D: Control,
{
    while control.running() {
        match mailbox.try_pop() {
            Some(msg) => dispatch(server, msg, comm),
            None => trace!("mailbox empty, yielding"),
        }
    }
    log_shutdown_state(server);
}

fn log_shutdown_state<M: Membership>(server: &Server<M>) {
    match server {
        Server::Async(_) => warn!("async server shutting down, no coordination state to report"),
        Server::Sync(s) => s.log_shutdown_state(),
    }
}
