//! Background thread that performs API calls so the UI thread never blocks.

use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use feedhub_platform::{Feedback, FeedbackApi, NewFeedback, Result};
use tracing::{debug, info, warn};

/// How long `shutdown` waits for the worker before detaching it.
const SHUTDOWN_GRACE: Duration = Duration::from_millis(250);

pub enum ApiCommand {
    FetchRecent,
    Submit(NewFeedback),
    Shutdown,
}

pub enum ApiEvent {
    Recent(Result<Vec<Feedback>>),
    Submitted(Result<Feedback>),
}

pub struct ApiHandles {
    pub command_sender: Sender<ApiCommand>,
    pub event_receiver: Receiver<ApiEvent>,
    join_handle: Option<JoinHandle<()>>,
    // Disconnects when the worker thread exits.
    stopped: Receiver<()>,
}

impl ApiHandles {
    pub fn send(&self, command: ApiCommand) {
        if self.command_sender.send(command).is_err() {
            warn!("API worker is gone; dropping command");
        }
    }

    /// Asks the worker to stop. An idle worker is joined; one stuck in a
    /// request is detached and its result discarded.
    pub fn shutdown(&mut self) {
        let Some(handle) = self.join_handle.take() else {
            return;
        };
        let _ = self.command_sender.send(ApiCommand::Shutdown);
        match self.stopped.recv_timeout(SHUTDOWN_GRACE) {
            Err(RecvTimeoutError::Timeout) => {
                debug!("API worker busy; detaching it");
            }
            _ => {
                if handle.join().is_err() {
                    warn!("API worker panicked");
                }
            }
        }
    }
}

impl Drop for ApiHandles {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// `waker` runs after every event so the UI can repaint and drain it.
pub fn spawn_api_worker<W>(api: Arc<dyn FeedbackApi>, waker: W) -> ApiHandles
where
    W: Fn() + Send + 'static,
{
    let (command_sender, command_receiver) = crossbeam_channel::unbounded::<ApiCommand>();
    let (event_sender, event_receiver) = crossbeam_channel::unbounded::<ApiEvent>();
    let (alive, stopped) = crossbeam_channel::bounded::<()>(0);

    let join_handle = std::thread::Builder::new()
        .name("feedhub-api".into())
        .spawn(move || {
            let _alive = alive;
            while let Ok(incoming) = command_receiver.recv() {
                let event = match incoming {
                    ApiCommand::FetchRecent => ApiEvent::Recent(api.list()),
                    ApiCommand::Submit(record) => ApiEvent::Submitted(api.create(&record)),
                    ApiCommand::Shutdown => break,
                };
                if event_sender.send(event).is_err() {
                    break;
                }
                waker();
            }
            info!("API worker stopped");
        });

    let join_handle = match join_handle {
        Ok(handle) => Some(handle),
        Err(err) => {
            warn!("could not start API worker: {err}");
            None
        }
    };

    ApiHandles {
        command_sender,
        event_receiver,
        join_handle,
        stopped,
    }
}
