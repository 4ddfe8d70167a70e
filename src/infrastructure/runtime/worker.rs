//! Async worker - runs in Tokio runtime and performs fetches, image probes and timers

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info};

use crate::domain::{DashboardSource, ImageEvent};
use crate::infrastructure::images::ImageLoader;
use crate::infrastructure::runtime::bridge::{EventSender, RuntimeCommand, RuntimeEvent};

/// Run the async worker loop until `Shutdown` or until the bridge is dropped
pub async fn run_async_worker(
    source: Arc<dyn DashboardSource>,
    images: Arc<dyn ImageLoader>,
    mut cmd_rx: UnboundedReceiver<RuntimeCommand>,
    evt_tx: EventSender,
) -> Result<()> {
    info!("runtime worker started");

    while let Some(cmd) = cmd_rx.recv().await {
        match cmd {
            RuntimeCommand::Shutdown => break,

            RuntimeCommand::FetchDashboard { mount, ticket } => {
                let source = Arc::clone(&source);
                let evt_tx = evt_tx.clone();
                tokio::spawn(async move {
                    let outcome = source.fetch_batch().await;
                    let _ = evt_tx.send(RuntimeEvent::DashboardSettled {
                        mount,
                        ticket,
                        outcome,
                    });
                });
            }

            RuntimeCommand::LoadImage {
                slot,
                attempt,
                source,
            } => {
                let images = Arc::clone(&images);
                let evt_tx = evt_tx.clone();
                tokio::spawn(async move {
                    let _ = evt_tx.send(RuntimeEvent::Image {
                        slot,
                        attempt,
                        event: ImageEvent::LoadStarted,
                    });
                    let event = match images.load(&source).await {
                        Ok(bytes) => {
                            debug!(slot, attempt, bytes, "image payload received");
                            ImageEvent::LoadSucceeded
                        }
                        Err(failure) => ImageEvent::LoadFailed(failure.reason),
                    };
                    let _ = evt_tx.send(RuntimeEvent::Image {
                        slot,
                        attempt,
                        event,
                    });
                });
            }

            RuntimeCommand::StartTimer { token, after } => {
                let evt_tx = evt_tx.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(after).await;
                    let _ = evt_tx.send(RuntimeEvent::TimerElapsed { token });
                });
            }
        }
    }

    info!("runtime worker stopped");
    Ok(())
}
