pub mod actions;
pub mod engine;
pub mod events;
pub mod input;
mod machine;
pub mod session;

pub use actions::{UiAction, UiApplyStatus};
pub use engine::{UiApplyResult, UiEngine};
pub use events::{KeyAction, UiEvent};
pub use session::Session;
