use crate::connect::ConnectRequest;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum UiApplyStatus {
    Applied,
    Unchanged,
    /// The current screen has no use for the event.
    Ignored,
}

/// Radio work the state machine asks its owner to carry out.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum UiAction {
    Scan,
    Connect(ConnectRequest),
}
