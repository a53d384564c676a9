use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::time::Duration;

use eframe::egui;
use floorcheck_core::{update, AppState, AppViewModel, Msg};
use floorcheck_engine::UploadSettings;

use crate::config;
use crate::effects::EffectRunner;
use crate::ui;

pub struct FloorcheckApp {
    state: AppState,
    runner: EffectRunner,
    msg_tx: mpsc::Sender<Msg>,
    msg_rx: mpsc::Receiver<Msg>,
    /// Uploaded GPU copy of the current preview, keyed by the pixel buffer
    /// it was built from.
    preview_texture: Option<(Arc<Vec<u8>>, egui::TextureHandle)>,
}

impl FloorcheckApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        let settings = UploadSettings::new(config::endpoint_url());
        let runner = EffectRunner::new(msg_tx.clone(), cc.egui_ctx.clone(), settings);
        Self {
            state: AppState::new(),
            runner,
            msg_tx,
            msg_rx,
            preview_texture: None,
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.run(effects);
    }

    fn collect_dropped_files(&self, ctx: &egui::Context) {
        if !self.state.view().selection_enabled {
            return;
        }
        let dropped: Vec<PathBuf> = ctx.input(|input| {
            input
                .raw
                .dropped_files
                .iter()
                .filter_map(|file| file.path.clone())
                .collect()
        });
        if !dropped.is_empty() {
            let _ = self.msg_tx.send(Msg::FilesDropped(dropped));
        }
    }

    fn sync_preview_texture(&mut self, ctx: &egui::Context, view: &AppViewModel) {
        let Some(preview) = &view.preview else {
            self.preview_texture = None;
            return;
        };
        let stale = match &self.preview_texture {
            Some((rgba, _)) => !Arc::ptr_eq(rgba, &preview.rgba),
            None => true,
        };
        if stale {
            let color_image = egui::ColorImage::from_rgba_unmultiplied(
                [preview.width as usize, preview.height as usize],
                &preview.rgba,
            );
            let handle =
                ctx.load_texture("floorplan_preview", color_image, egui::TextureOptions::LINEAR);
            self.preview_texture = Some((preview.rgba.clone(), handle));
        }
    }
}

impl eframe::App for FloorcheckApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.collect_dropped_files(ctx);

        let mut inbox = Vec::new();
        while let Ok(msg) = self.msg_rx.try_recv() {
            inbox.push(msg);
        }
        for msg in inbox {
            self.dispatch(msg);
        }
        if self.state.consume_dirty() {
            ctx.request_repaint();
        }

        let view = self.state.view();
        self.sync_preview_texture(ctx, &view);
        let texture = self.preview_texture.as_ref().map(|(_, handle)| handle);
        let drop_active = ctx.input(|input| !input.raw.hovered_files.is_empty());

        for msg in ui::render(ctx, &view, texture, drop_active) {
            let _ = self.msg_tx.send(msg);
        }

        if view.loading {
            // Keep the spinner animating while we wait on the service.
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
