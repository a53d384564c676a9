use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::view_model::{AppViewModel, ResultView};

pub type RequestId = u64;

/// File extensions accepted by the drop zone and the file picker.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp"];

/// Returns true when the path carries one of the supported raster image
/// extensions (case-insensitive).
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No selection, nothing to show.
    #[default]
    Idle,
    /// A file is selected and its upload is in flight.
    Uploading,
    /// The upload produced a result or an error.
    Settled,
}

/// Area figures returned by the calculation service.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculationResult {
    pub square_foot: f64,
    pub variance: f64,
}

/// Locally decoded RGBA bitmap of the selected file.
///
/// The pixel buffer sits behind an `Arc` so cloning state snapshots stays
/// cheap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Arc<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    session: SessionState,
    selected: Option<PathBuf>,
    preview: Option<PreviewImage>,
    outcome: Option<Result<CalculationResult, String>>,
    /// Generation counter for the current selection. Engine events carrying
    /// any other id are stale and must be dropped.
    request_id: RequestId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> SessionState {
        self.session
    }

    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    pub fn view(&self) -> AppViewModel {
        let (result, error) = match &self.outcome {
            Some(Ok(result)) => (Some(ResultView::from_result(result)), None),
            Some(Err(message)) => (None, Some(message.clone())),
            None => (None, None),
        };
        let loading = self.session == SessionState::Uploading;
        AppViewModel {
            session: self.session,
            loading,
            preview: self.preview.clone(),
            result,
            error,
            can_reset: self.session == SessionState::Settled,
            selection_enabled: !loading,
            dirty: self.dirty,
        }
    }

    /// Returns the dirty flag and clears it. The renderer uses this to skip
    /// frames where nothing changed.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Starts a new session for `path`: prior preview, result and error are
    /// discarded and the generation counter is bumped so late events from a
    /// previous selection cannot land.
    pub(crate) fn begin_upload(&mut self, path: PathBuf) -> RequestId {
        self.request_id += 1;
        self.session = SessionState::Uploading;
        self.selected = Some(path);
        self.preview = None;
        self.outcome = None;
        self.dirty = true;
        self.request_id
    }

    /// Stores a finished preview. Only the preview field is touched: a
    /// settled result or error must survive a preview arriving late.
    /// Returns false for stale generations.
    pub(crate) fn apply_preview(&mut self, request_id: RequestId, image: PreviewImage) -> bool {
        if request_id != self.request_id || self.selected.is_none() {
            return false;
        }
        self.preview = Some(image);
        self.dirty = true;
        true
    }

    /// Applies the upload outcome. Returns false for stale generations.
    pub(crate) fn settle(
        &mut self,
        request_id: RequestId,
        result: Result<CalculationResult, String>,
    ) -> bool {
        if request_id != self.request_id || self.session != SessionState::Uploading {
            return false;
        }
        self.session = SessionState::Settled;
        self.outcome = Some(result);
        self.dirty = true;
        true
    }

    /// Clears the whole session back to `Idle`.
    pub(crate) fn reset(&mut self) {
        self.session = SessionState::Idle;
        self.selected = None;
        self.preview = None;
        self.outcome = None;
        self.dirty = true;
    }
}
