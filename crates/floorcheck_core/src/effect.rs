use std::path::PathBuf;

use crate::RequestId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Decode the selected file into a displayable preview bitmap.
    RenderPreview {
        request_id: RequestId,
        path: PathBuf,
    },
    /// Upload the selected file to the calculation service.
    UploadFile {
        request_id: RequestId,
        path: PathBuf,
    },
}
