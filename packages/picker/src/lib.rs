#![cfg_attr(not(test), no_std)]

pub mod catalog;
pub mod connect;
pub mod keyboard;
mod picker;
pub mod policy;
pub mod radio;
pub mod render;
pub mod scan;
pub mod selection;
pub mod types;
pub mod ui;

pub use catalog::{Catalog, InsertOutcome};
pub use connect::{ConnectAttempt, ConnectRequest};
pub use keyboard::{KeyMatrix, KeyboardDecoder, KeysState};
pub use picker::{Picker, TickOutcome};
pub use policy::PickerPolicy;
pub use radio::{AccessPoint, ConnectFailure, LinkInfo, LinkPoll, Radio};
pub use render::{Frame, Panel, Viewport};
pub use scan::ScanReport;
pub use selection::{PasswordBuffer, SelectionState};
pub use types::{NetworkRecord, PickerFault, SecurityKind, Ssid, UiState};
pub use ui::{Session, UiEngine};
