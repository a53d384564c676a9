use crate::{is_supported_image, AppState, Effect, Msg, SessionState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FilesDropped(paths) => {
            // Single-flight: a selection made while an upload is in flight is
            // refused outright, so the engine never sees two live requests.
            if state.session() == SessionState::Uploading {
                return (state, Vec::new());
            }
            // One file per session; extra entries of a multi-file drop and
            // unsupported file types are ignored.
            let Some(path) = paths.into_iter().find(|path| is_supported_image(path)) else {
                return (state, Vec::new());
            };
            let request_id = state.begin_upload(path.clone());
            vec![
                Effect::RenderPreview {
                    request_id,
                    path: path.clone(),
                },
                Effect::UploadFile { request_id, path },
            ]
        }
        Msg::PreviewReady { request_id, image } => {
            state.apply_preview(request_id, image);
            Vec::new()
        }
        Msg::PreviewFailed { .. } => {
            // A broken preview never blocks the upload; the session simply
            // runs without a thumbnail.
            Vec::new()
        }
        Msg::UploadSettled { request_id, result } => {
            state.settle(request_id, result);
            Vec::new()
        }
        Msg::ResetClicked => {
            // Disabled while loading; a no-op in Idle keeps reset idempotent.
            if state.session() == SessionState::Settled {
                state.reset();
            }
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
