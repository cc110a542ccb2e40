//! Background worker for remote catalog calls
//!
//! The UI thread owns every controller and never blocks on the network:
//! 1. A background thread runs a tokio runtime
//! 2. Commands and events cross between the two over channels
//! 3. Each command runs on its own task, so requests overlap freely
//! 4. Events carry the ticket they were issued with; the owning controller
//!    decides whether the result is still current

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crossbeam_channel::{bounded, unbounded, Receiver, RecvTimeoutError, Sender, TrySendError};
use recos_client::{CatalogApi, ClientError};
use recos_core::{AnalyticsSummary, CatalogItem};
use tokio::runtime::Runtime;
use tracing::{debug, error};

use crate::analytics::AnalyticsTicket;
use crate::error::{Result, SessionError};
use crate::search::SearchTicket;
use crate::selection::DerivedTicket;

/// Commands sent from the UI to the worker
#[derive(Debug, Clone)]
pub enum BackendCommand {
    Search { ticket: SearchTicket, limit: usize },
    Recommend { ticket: DerivedTicket, limit: usize },
    Generate { ticket: DerivedTicket },
    AnalyticsSummary { ticket: AnalyticsTicket },
}

impl BackendCommand {
    /// The completion this command would produce had its request failed
    pub fn into_failure(self, error: ClientError) -> BackendEvent {
        match self {
            BackendCommand::Search { ticket, .. } => BackendEvent::SearchCompleted {
                ticket,
                result: Err(error),
            },
            BackendCommand::Recommend { ticket, .. } => BackendEvent::RecommendationsCompleted {
                ticket,
                result: Err(error),
            },
            BackendCommand::Generate { ticket } => BackendEvent::DescriptionCompleted {
                ticket,
                result: Err(error),
            },
            BackendCommand::AnalyticsSummary { ticket } => BackendEvent::AnalyticsCompleted {
                ticket,
                result: Err(error),
            },
        }
    }
}

/// Events sent from the worker back to the UI
#[derive(Debug, Clone)]
pub enum BackendEvent {
    SearchCompleted {
        ticket: SearchTicket,
        result: std::result::Result<Vec<CatalogItem>, ClientError>,
    },
    RecommendationsCompleted {
        ticket: DerivedTicket,
        result: std::result::Result<Vec<CatalogItem>, ClientError>,
    },
    DescriptionCompleted {
        ticket: DerivedTicket,
        result: std::result::Result<String, ClientError>,
    },
    AnalyticsCompleted {
        ticket: AnalyticsTicket,
        result: std::result::Result<AnalyticsSummary, ClientError>,
    },
}

/// Handle to communicate with the worker
pub struct BackendHandle {
    cmd_tx: Sender<BackendCommand>,
    event_rx: Receiver<BackendEvent>,
}

impl BackendHandle {
    /// Spawn the worker thread; `signal_ui` runs after every event is queued
    pub fn spawn(
        api: Arc<dyn CatalogApi>,
        signal_ui: impl Fn() + Send + Sync + 'static,
    ) -> Result<Self> {
        let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(100);
        // Completions are never dropped, or a controller would stay loading
        let (event_tx, event_rx) = unbounded::<BackendEvent>();

        let rt = Runtime::new()?;
        let signal_ui: Arc<dyn Fn() + Send + Sync> = Arc::new(signal_ui);

        thread::Builder::new()
            .name("recos-backend".into())
            .spawn(move || rt.block_on(backend_loop(api, cmd_rx, event_tx, signal_ui)))?;

        Ok(Self { cmd_tx, event_rx })
    }

    /// Queue a command for the worker (non-blocking)
    ///
    /// A rejected command never runs, so its controller is still loading;
    /// hand it to `Screen::abandon` to settle it.
    pub fn send(&self, cmd: BackendCommand) -> Result<()> {
        self.cmd_tx.try_send(cmd).map_err(queue_error)
    }

    /// Try to receive an event (non-blocking)
    pub fn try_recv(&self) -> Option<BackendEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Wait up to `timeout` for the next event
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<BackendEvent>> {
        match self.event_rx.recv_timeout(timeout) {
            Ok(event) => Ok(Some(event)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(SessionError::Disconnected),
        }
    }
}

fn queue_error<T>(e: TrySendError<T>) -> SessionError {
    error!("Failed to queue backend command: {}", e);
    match e {
        TrySendError::Full(_) => SessionError::QueueFull,
        TrySendError::Disconnected(_) => SessionError::Disconnected,
    }
}

async fn backend_loop(
    api: Arc<dyn CatalogApi>,
    cmd_rx: Receiver<BackendCommand>,
    event_tx: Sender<BackendEvent>,
    signal_ui: Arc<dyn Fn() + Send + Sync>,
) {
    // Blocks this thread between commands; requests run on the runtime's workers
    while let Ok(cmd) = cmd_rx.recv() {
        let api = Arc::clone(&api);
        let event_tx = event_tx.clone();
        let signal_ui = Arc::clone(&signal_ui);

        tokio::spawn(async move {
            let event = process_command(api.as_ref(), cmd).await;
            if event_tx.send(event).is_ok() {
                signal_ui();
            }
        });
    }

    debug!("Backend command channel closed, worker exiting");
}

async fn process_command(api: &dyn CatalogApi, cmd: BackendCommand) -> BackendEvent {
    match cmd {
        BackendCommand::Search { ticket, limit } => {
            let result = api.search(ticket.query(), limit).await;
            BackendEvent::SearchCompleted { ticket, result }
        }

        BackendCommand::Recommend { ticket, limit } => {
            let result = api.recommend(ticket.item_id(), limit).await;
            BackendEvent::RecommendationsCompleted { ticket, result }
        }

        BackendCommand::Generate { ticket } => {
            let result = api.generate(ticket.item_id()).await;
            BackendEvent::DescriptionCompleted { ticket, result }
        }

        BackendCommand::AnalyticsSummary { ticket } => {
            let result = api.analytics_summary().await;
            BackendEvent::AnalyticsCompleted { ticket, result }
        }
    }
}
