//! Floorcheck core: pure session state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{
    is_supported_image, AppState, CalculationResult, PreviewImage, RequestId, SessionState,
    SUPPORTED_EXTENSIONS,
};
pub use update::update;
pub use view_model::{AppViewModel, ResultView};
