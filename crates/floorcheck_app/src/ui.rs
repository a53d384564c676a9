use eframe::egui;
use floorcheck_core::{AppViewModel, Msg, ResultView, SessionState, SUPPORTED_EXTENSIONS};

const TITLE: &str = "Floor Plan Carpet Area Checker";
const DROP_IDLE_TEXT: &str = "Drag & drop a floor plan here, or click to select";
const DROP_ACTIVE_TEXT: &str = "Drop the file here";
const PREVIEW_PENDING_TEXT: &str = "Rendering preview\u{2026}";
const LOADING_NOTE: &str =
    "The calculation model is large; uploads generally take up to 5 minutes.\n\
     Thanks for your patience.";

const DROP_ZONE_HEIGHT: f32 = 220.0;
const PREVIEW_MAX_SIZE: egui::Vec2 = egui::Vec2::new(560.0, 420.0);

/// Draws one frame from the view model and returns the messages produced by
/// user interaction.
pub fn render(
    ctx: &egui::Context,
    view: &AppViewModel,
    preview: Option<&egui::TextureHandle>,
    drop_active: bool,
) -> Vec<Msg> {
    let mut msgs = Vec::new();

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(16.0);
            ui.heading(TITLE);
            ui.add_space(16.0);

            if view.session == SessionState::Idle {
                drop_zone(ui, view, drop_active, &mut msgs);
            } else {
                preview_panel(ui, preview);
                if let Some(error) = &view.error {
                    error_banner(ui, error);
                }
                if let (Some(result), false) = (&view.result, view.loading) {
                    result_panel(ui, result);
                }
            }

            if view.can_reset {
                ui.add_space(16.0);
                if ui.button("Reset").clicked() {
                    msgs.push(Msg::ResetClicked);
                }
            }
        });
    });

    if view.loading {
        loading_overlay(ctx);
    }

    msgs
}

fn drop_zone(ui: &mut egui::Ui, view: &AppViewModel, drop_active: bool, msgs: &mut Vec<Msg>) {
    let text = if drop_active {
        DROP_ACTIVE_TEXT
    } else {
        DROP_IDLE_TEXT
    };
    let width = ui.available_width().min(560.0);
    let button = egui::Button::new(egui::RichText::new(text).size(16.0))
        .min_size(egui::vec2(width, DROP_ZONE_HEIGHT));

    // Clicking the zone is the browse entry point; both funnel into the
    // same FilesDropped message.
    let response = ui.add_enabled(view.selection_enabled, button);
    if response.clicked() {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Floor plan images", SUPPORTED_EXTENSIONS)
            .pick_file()
        {
            msgs.push(Msg::FilesDropped(vec![path]));
        }
    }
}

fn preview_panel(ui: &mut egui::Ui, preview: Option<&egui::TextureHandle>) {
    match preview {
        Some(texture) => {
            ui.add(egui::Image::new(texture).max_size(PREVIEW_MAX_SIZE));
        }
        None => {
            ui.add_space(32.0);
            ui.weak(PREVIEW_PENDING_TEXT);
            ui.add_space(32.0);
        }
    }
}

fn error_banner(ui: &mut egui::Ui, error: &str) {
    ui.add_space(12.0);
    egui::Frame::default()
        .fill(egui::Color32::from_rgb(64, 18, 18))
        .rounding(4.0)
        .inner_margin(egui::Margin::same(10.0))
        .show(ui, |ui| {
            ui.colored_label(egui::Color32::from_rgb(255, 160, 160), error);
        });
}

fn result_panel(ui: &mut egui::Ui, result: &ResultView) {
    ui.add_space(12.0);
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.heading("Result");
        ui.add_space(8.0);
        egui::Grid::new("result_grid")
            .num_columns(2)
            .spacing([24.0, 8.0])
            .show(ui, |ui| {
                ui.label("Square foot:");
                ui.strong(result.square_foot_text.as_str());
                ui.end_row();
                ui.label("Variance:");
                ui.strong(result.variance_text.as_str());
                ui.end_row();
            });
    });
}

fn loading_overlay(ctx: &egui::Context) {
    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Foreground,
        egui::Id::new("loading_dim"),
    ));
    painter.rect_filled(
        ctx.screen_rect(),
        0.0,
        egui::Color32::from_black_alpha(160),
    );

    egui::Area::new(egui::Id::new("loading_overlay"))
        .order(egui::Order::Foreground)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            egui::Frame::default()
                .fill(ui.visuals().panel_fill)
                .rounding(8.0)
                .inner_margin(egui::Margin::same(24.0))
                .show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add(egui::Spinner::new().size(48.0));
                        ui.add_space(12.0);
                        ui.label(LOADING_NOTE);
                    });
                });
        });
}
