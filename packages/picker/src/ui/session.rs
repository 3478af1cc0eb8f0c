use crate::catalog::Catalog;
use crate::radio::LinkInfo;
use crate::selection::SelectionState;
use crate::types::{NetworkRecord, PickerFault};

/// Everything the screens draw from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub catalog: Catalog,
    pub selection: SelectionState,
    pub fault: Option<PickerFault>,
    pub link: Option<LinkInfo>,
}

impl Session {
    pub const fn new() -> Self {
        Self {
            catalog: Catalog::new(),
            selection: SelectionState::new(),
            fault: None,
            link: None,
        }
    }

    pub fn highlighted(&self) -> Option<&NetworkRecord> {
        self.catalog.get(self.selection.selected_index)
    }

    /// Forgets the list and everything derived from it.
    pub fn reset(&mut self) {
        self.catalog.clear();
        self.selection.reset();
        self.fault = None;
        self.link = None;
    }
}
