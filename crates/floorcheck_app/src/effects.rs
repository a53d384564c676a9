use std::sync::{mpsc, Arc};
use std::thread;

use client_logging::{client_info, client_warn};
use eframe::egui;
use floorcheck_core::{CalculationResult, Effect, Msg, PreviewImage};
use floorcheck_engine::{EngineEvent, EngineHandle, UploadSettings};

/// Executes core effects against the engine and feeds engine events back
/// into the message loop.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(msg_tx: mpsc::Sender<Msg>, repaint: egui::Context, settings: UploadSettings) -> Self {
        let (engine, event_rx) = EngineHandle::new(settings);
        spawn_event_loop(event_rx, msg_tx, repaint);
        Self { engine }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::RenderPreview { request_id, path } => {
                    client_info!("RenderPreview request_id={} path={:?}", request_id, path);
                    self.engine.render_preview(request_id, path);
                }
                Effect::UploadFile { request_id, path } => {
                    client_info!("UploadFile request_id={} path={:?}", request_id, path);
                    self.engine.upload(request_id, path);
                }
            }
        }
    }
}

fn spawn_event_loop(
    event_rx: mpsc::Receiver<EngineEvent>,
    msg_tx: mpsc::Sender<Msg>,
    repaint: egui::Context,
) {
    thread::spawn(move || {
        while let Ok(event) = event_rx.recv() {
            let msg = map_event(event);
            if msg_tx.send(msg).is_err() {
                break;
            }
            // Wake the UI; engine events arrive while egui is idle.
            repaint.request_repaint();
        }
    });
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::PreviewReady { request_id, bitmap } => Msg::PreviewReady {
            request_id,
            image: PreviewImage {
                width: bitmap.width,
                height: bitmap.height,
                rgba: Arc::new(bitmap.rgba),
            },
        },
        EngineEvent::PreviewFailed { request_id, reason } => {
            client_warn!("preview {} failed: {}", request_id, reason);
            Msg::PreviewFailed { request_id, reason }
        }
        EngineEvent::UploadCompleted { request_id, result } => {
            let result = match result {
                Ok(figures) => Ok(CalculationResult {
                    square_foot: figures.square_foot,
                    variance: figures.variance,
                }),
                Err(err) => {
                    client_warn!("upload {} failed ({}): {}", request_id, err.kind, err.message);
                    Err(err.message)
                }
            };
            Msg::UploadSettled { request_id, result }
        }
    }
}
