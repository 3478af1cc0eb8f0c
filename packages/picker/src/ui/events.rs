use crate::radio::LinkPoll;
use crate::scan::ScanReport;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum KeyAction {
    Rescan,
    Up,
    Down,
    Confirm,
    Back,
    Type(char),
    Erase,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum UiEvent {
    Key(KeyAction),
    ScanFinished(ScanReport),
    Link(LinkPoll),
}
