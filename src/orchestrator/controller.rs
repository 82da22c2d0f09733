//! Request lifecycle controller.
//!
//! Owns validation and request dispatch, and emits events for presentation
//! layers. Each request runs in its own detached task: requests of different
//! kinds interleave freely, a request cannot be cancelled once issued, and no
//! ordering is enforced between two in-flight requests of the same kind.

use crate::api::ApiClient;
use crate::model::{ClientConfig, ClientEvent, Priority};
use crate::parse::parse_ids;
use anyhow::Result;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

/// Shown when the ID field holds no parseable integers.
pub(crate) const INVALID_IDS_MSG: &str = "Please enter valid IDs";
/// Shown when the status field is blank.
pub(crate) const MISSING_STATUS_ID_MSG: &str = "Please enter an ingestion ID";

/// Commands emitted by UI layers to drive requests.
#[derive(Debug, Clone)]
pub(crate) enum UiCommand {
    SubmitBatch { raw_ids: String, priority: Priority },
    CheckStatus { raw_id: String },
    Quit,
}

/// Dispatch commands from presentation layers until `Quit` or channel close.
pub(crate) async fn run_controller(
    cfg: &ClientConfig,
    event_tx: UnboundedSender<ClientEvent>,
    mut cmd_rx: UnboundedReceiver<UiCommand>,
) -> Result<()> {
    let client = ApiClient::new(cfg)?;

    loop {
        match cmd_rx.recv().await {
            Some(UiCommand::SubmitBatch { raw_ids, priority }) => {
                let _ = event_tx.send(ClientEvent::IngestStarted);
                let ids = parse_ids(&raw_ids);
                if ids.is_empty() {
                    let _ = event_tx.send(ClientEvent::IngestFailed {
                        message: INVALID_IDS_MSG.into(),
                    });
                    continue;
                }
                let client = client.clone();
                let tx = event_tx.clone();
                tokio::spawn(async move {
                    let ev = match client.submit_batch(&ids, priority).await {
                        Ok(accepted) => ClientEvent::IngestAccepted {
                            ingestion_id: accepted.ingestion_id,
                            ids,
                            priority,
                        },
                        Err(e) => ClientEvent::IngestFailed {
                            message: format!("{e:#}"),
                        },
                    };
                    let _ = tx.send(ev);
                });
            }
            Some(UiCommand::CheckStatus { raw_id }) => {
                let _ = event_tx.send(ClientEvent::StatusStarted);
                let ingestion_id = raw_id.trim().to_string();
                if ingestion_id.is_empty() {
                    let _ = event_tx.send(ClientEvent::StatusFailed {
                        message: MISSING_STATUS_ID_MSG.into(),
                    });
                    continue;
                }
                let client = client.clone();
                let tx = event_tx.clone();
                tokio::spawn(async move {
                    let ev = match client.fetch_status(&ingestion_id).await {
                        Ok(report) => ClientEvent::StatusReceived {
                            report: Box::new(report),
                        },
                        Err(e) => ClientEvent::StatusFailed {
                            message: format!("{e:#}"),
                        },
                    };
                    let _ = tx.send(ev);
                });
            }
            // In-flight tasks are left to run; events after shutdown land on
            // a closed channel and are dropped.
            Some(UiCommand::Quit) | None => break Ok(()),
        }
    }
}
