//! Runtime bridge - connects sync TUI thread with async Tokio runtime
//!
//! The TUI thread owns all state. It sends commands to a worker running on
//! its own Tokio runtime and drains the resulting events once per frame.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};
use tracing::error;

use crate::domain::{
    DashboardItem, DashboardSource, FetchError, ImageEvent, ImageSource, LoadTicket,
};
use crate::infrastructure::images::ImageLoader;
use crate::infrastructure::runtime::worker::run_async_worker;

/// Timers the app can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerToken {
    /// "Start Loading" on the Advanced section
    LoadingDemo,
}

/// Commands sent from the TUI to the async worker
#[derive(Debug, Clone)]
pub enum RuntimeCommand {
    /// Fetch a dashboard batch for the mounted dashboard `mount`
    FetchDashboard { mount: u64, ticket: LoadTicket },
    /// Load one image; signals are tagged with `slot` and `attempt`
    LoadImage {
        slot: usize,
        attempt: u64,
        source: ImageSource,
    },
    /// Fire `token` after `after`
    StartTimer { token: TimerToken, after: Duration },
    /// Shutdown the worker
    Shutdown,
}

/// Events sent from the async worker to the TUI
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    /// A dashboard fetch settled
    DashboardSettled {
        mount: u64,
        ticket: LoadTicket,
        outcome: Result<Vec<DashboardItem>, FetchError>,
    },
    /// Load signal for an image slot
    Image {
        slot: usize,
        attempt: u64,
        event: ImageEvent,
    },
    /// A timer elapsed
    TimerElapsed { token: TimerToken },
    /// Error occurred
    Error { message: String },
}

/// Bridge between sync TUI thread and async Tokio runtime
pub struct RuntimeBridge {
    cmd_tx: UnboundedSender<RuntimeCommand>,
    evt_rx: Receiver<RuntimeEvent>,
}

impl RuntimeBridge {
    /// Start the worker thread with its own Tokio runtime
    pub fn new(source: Arc<dyn DashboardSource>, images: Arc<dyn ImageLoader>) -> Result<Self> {
        let (cmd_tx, cmd_rx) = unbounded_channel::<RuntimeCommand>();
        let (evt_tx, evt_rx) = mpsc::channel::<RuntimeEvent>();

        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .context("create Tokio runtime")?;

        thread::Builder::new()
            .name("showcase-runtime".to_string())
            .spawn(move || {
                rt.block_on(async {
                    if let Err(err) = run_async_worker(source, images, cmd_rx, evt_tx.clone()).await
                    {
                        error!("worker exited: {err:#}");
                        let _ = evt_tx.send(RuntimeEvent::Error {
                            message: format!("Worker exited: {:#}", err),
                        });
                    }
                });
            })
            .context("spawn runtime thread")?;

        Ok(Self { cmd_tx, evt_rx })
    }

    /// Send a command to the async worker
    pub fn send(&self, cmd: RuntimeCommand) -> Result<()> {
        self.cmd_tx
            .send(cmd)
            .map_err(|_| anyhow::anyhow!("Worker channel closed"))
    }

    /// Poll for events (non-blocking)
    pub fn poll_events(&self) -> Vec<RuntimeEvent> {
        let mut events = Vec::new();
        while let Ok(evt) = self.evt_rx.try_recv() {
            events.push(evt);
        }
        events
    }
}

impl Drop for RuntimeBridge {
    fn drop(&mut self) {
        // Try to send shutdown command
        let _ = self.cmd_tx.send(RuntimeCommand::Shutdown);
    }
}

/// Event sink handed to worker tasks
pub type EventSender = Sender<RuntimeEvent>;
