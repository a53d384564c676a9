//! Floorcheck engine: upload client, preview rendering and effect execution.
mod engine;
mod preview;
mod types;
mod upload;

pub use engine::EngineHandle;
pub use preview::{render_preview, PreviewError, MAX_PREVIEW_EDGE};
pub use types::{
    CalculationResult, EngineEvent, FailureKind, PreviewBitmap, RequestId, UploadError,
    GENERIC_UPLOAD_ERROR,
};
pub use upload::{ReqwestUploader, UploadSettings, Uploader, FILE_FIELD_NAME};
