use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;

use client_logging::client_error;

use crate::preview::render_preview;
use crate::upload::{ReqwestUploader, UploadSettings, Uploader};
use crate::{EngineEvent, RequestId};

enum EngineCommand {
    RenderPreview {
        request_id: RequestId,
        path: PathBuf,
    },
    Upload {
        request_id: RequestId,
        path: PathBuf,
    },
}

/// Command side of the engine. Cheap to clone; all work happens on a
/// background thread owning a tokio runtime.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    /// Spawns the engine thread. Events for every command arrive on the
    /// returned receiver, in completion order.
    pub fn new(settings: UploadSettings) -> (Self, mpsc::Receiver<EngineEvent>) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let uploader = Arc::new(ReqwestUploader::new(settings));

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    client_error!("engine: could not start tokio runtime: {}", err);
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let uploader = uploader.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(uploader.as_ref(), command, event_tx).await;
                });
            }
        });

        (Self { cmd_tx }, event_rx)
    }

    pub fn render_preview(&self, request_id: RequestId, path: PathBuf) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::RenderPreview { request_id, path });
    }

    pub fn upload(&self, request_id: RequestId, path: PathBuf) {
        let _ = self.cmd_tx.send(EngineCommand::Upload { request_id, path });
    }
}

async fn handle_command(
    uploader: &dyn Uploader,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::RenderPreview { request_id, path } => {
            let event = match tokio::fs::read(&path).await {
                Ok(bytes) => match render_preview(&bytes) {
                    Ok(bitmap) => EngineEvent::PreviewReady { request_id, bitmap },
                    Err(err) => EngineEvent::PreviewFailed {
                        request_id,
                        reason: err.to_string(),
                    },
                },
                Err(err) => EngineEvent::PreviewFailed {
                    request_id,
                    reason: err.to_string(),
                },
            };
            let _ = event_tx.send(event);
        }
        EngineCommand::Upload { request_id, path } => {
            let result = uploader.upload(request_id, &path).await;
            let _ = event_tx.send(EngineEvent::UploadCompleted { request_id, result });
        }
    }
}
