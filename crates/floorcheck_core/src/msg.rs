use std::path::PathBuf;

use crate::{CalculationResult, PreviewImage, RequestId};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User dropped files on the drop zone or picked them in the file dialog.
    /// Only the first supported image is accepted; the rest are ignored.
    FilesDropped(Vec<PathBuf>),
    /// Engine finished decoding the local preview for a selection.
    PreviewReady {
        request_id: RequestId,
        image: PreviewImage,
    },
    /// Engine could not decode the selected file into a preview.
    /// The upload proceeds regardless.
    PreviewFailed {
        request_id: RequestId,
        reason: String,
    },
    /// Engine completed the upload request, successfully or not.
    UploadSettled {
        request_id: RequestId,
        result: Result<CalculationResult, String>,
    },
    /// User clicked Reset.
    ResetClicked,
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
