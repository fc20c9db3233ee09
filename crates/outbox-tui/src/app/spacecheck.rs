//! Background free-space check.

use std::sync::Arc;

use tokio::sync::mpsc;

use outbox_core::{SpaceCheck, SpaceCheckRequest, SpaceCheckTicket};

use super::constants::CHECK_CHANNEL_SIZE;

/// Result of one background space check, tagged with the ticket it
/// was launched under.
#[derive(Debug, Clone, Copy)]
pub struct CheckMessage {
    pub ticket: SpaceCheckTicket,
    pub has_enough: bool,
}

/// Start a space check in the background.
///
/// Returns a receiver that will receive exactly one message. The probe
/// touches the filesystem, so it runs on the blocking pool.
pub fn start_check(
    request: SpaceCheckRequest,
    checker: Arc<dyn SpaceCheck>,
) -> mpsc::Receiver<CheckMessage> {
    let (tx, rx) = mpsc::channel(CHECK_CHANNEL_SIZE);

    tokio::spawn(async move {
        let ticket = request.ticket;
        let has_enough = tokio::task::spawn_blocking(move || {
            checker.has_enough_space(&request.paths, request.is_move)
        })
        .await
        .unwrap_or(false);

        let _ = tx.send(CheckMessage { ticket, has_enough }).await;
    });

    rx
}
