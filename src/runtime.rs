//! Runtime for the background refresh worker

use crate::analytics::AnalyticsSource;
use crate::consts::cli_consts::REFRESH_QUEUE_SIZE;
use crate::events::Event;
use crate::workers::core::{EventSender, WorkerConfig};
use crate::workers::{AnalyticsRefresher, RefreshReason};
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

/// Start the analytics refresher on the tokio runtime.
///
/// Returns the request channel; the worker exits once every clone of it is
/// dropped or `shutdown` fires.
pub fn start_refresh_worker(
    source: Box<dyn AnalyticsSource>,
    config: WorkerConfig,
    event_sender: mpsc::Sender<Event>,
    shutdown: broadcast::Receiver<()>,
) -> (mpsc::Sender<RefreshReason>, JoinHandle<()>) {
    let (request_sender, request_receiver) = mpsc::channel(REFRESH_QUEUE_SIZE);

    let refresher = AnalyticsRefresher::new(source, EventSender::new(event_sender), &config);
    let handle = tokio::spawn(refresher.run(request_receiver, shutdown));

    (request_sender, handle)
}
