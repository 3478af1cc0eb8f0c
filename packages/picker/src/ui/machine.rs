use statig::prelude::*;

use super::actions::{UiAction, UiApplyStatus};
use super::events::{KeyAction, UiEvent};
use super::session::Session;
use crate::connect::ConnectRequest;
use crate::radio::LinkPoll;
use crate::types::UiState;

#[derive(Clone, Debug)]
pub(super) struct UiMachine {
    pub(super) session: Session,
    pub(super) screen: UiState,
}

#[derive(Clone, Debug)]
pub(super) struct DispatchContext {
    pub(super) status: UiApplyStatus,
    pub(super) action: Option<UiAction>,
}

impl Default for DispatchContext {
    fn default() -> Self {
        Self {
            status: UiApplyStatus::Unchanged,
            action: None,
        }
    }
}

impl UiMachine {
    pub(super) fn new() -> Self {
        Self {
            session: Session::new(),
            screen: UiState::NoNetworks,
        }
    }

    fn go(&mut self, context: &mut DispatchContext, screen: UiState) {
        self.screen = screen;
        context.status = UiApplyStatus::Applied;
    }

    fn mark(context: &mut DispatchContext, changed: bool) {
        context.status = if changed {
            UiApplyStatus::Applied
        } else {
            UiApplyStatus::Unchanged
        };
    }
}

#[state_machine(initial = "State::no_networks()")]
impl UiMachine {
    #[state(superstate = "session")]
    fn no_networks(&mut self) -> Outcome<State> {
        Super
    }

    #[state(superstate = "session")]
    fn selecting_network(
        &mut self,
        context: &mut DispatchContext,
        event: &UiEvent,
    ) -> Outcome<State> {
        let count = self.session.catalog.len();
        match event {
            UiEvent::Key(KeyAction::Up) => {
                Self::mark(context, self.session.selection.move_up(count));
                Handled
            }
            UiEvent::Key(KeyAction::Down) => {
                Self::mark(context, self.session.selection.move_down(count));
                Handled
            }
            UiEvent::Key(KeyAction::Confirm) => {
                let index = self.session.selection.selected_index;
                let Some(record) = self.session.catalog.get(index) else {
                    return Handled;
                };
                self.session.selection.choose(record);
                log::info!(
                    "ui: chosen ssid={} open={}",
                    self.session.selection.chosen_name.as_str(),
                    self.session.selection.chosen_is_open
                );
                self.go(context, UiState::EnteringPassword);
                Transition(State::entering_password())
            }
            _ => Super,
        }
    }

    #[state(superstate = "session")]
    fn entering_password(
        &mut self,
        context: &mut DispatchContext,
        event: &UiEvent,
    ) -> Outcome<State> {
        let open = self.session.selection.chosen_is_open;
        match event {
            UiEvent::Key(KeyAction::Back) => {
                self.session.selection.clear_choice();
                self.go(context, UiState::SelectingNetwork);
                Transition(State::selecting_network())
            }
            UiEvent::Key(KeyAction::Confirm) => {
                let request = ConnectRequest::from_selection(&self.session.selection);
                context.action = Some(UiAction::Connect(request));
                self.session.link = None;
                self.go(context, UiState::Connecting);
                Transition(State::connecting())
            }
            UiEvent::Key(KeyAction::Type(_) | KeyAction::Erase) if open => {
                context.status = UiApplyStatus::Ignored;
                Handled
            }
            UiEvent::Key(KeyAction::Type(ch)) => {
                Self::mark(context, self.session.selection.push_char(*ch));
                Handled
            }
            UiEvent::Key(KeyAction::Erase) => {
                Self::mark(context, self.session.selection.pop_char());
                Handled
            }
            _ => Super,
        }
    }

    #[state(superstate = "session")]
    fn connecting(&mut self, context: &mut DispatchContext, event: &UiEvent) -> Outcome<State> {
        match event {
            UiEvent::Link(LinkPoll::Pending) => Handled,
            UiEvent::Link(LinkPoll::Connected(info)) => {
                log::info!(
                    "ui: connected ssid={} address={:?}",
                    info.ssid.as_str(),
                    info.address
                );
                self.session.link = Some(info.clone());
                self.session.fault = None;
                self.go(context, UiState::Connected);
                Transition(State::connected())
            }
            UiEvent::Link(LinkPoll::Failed(reason)) => {
                log::warn!("ui: connect_failed reason={}", reason.as_str());
                self.session.fault = Some(reason.fault());
                self.go(context, UiState::ConnectFailed);
                Transition(State::connect_failed())
            }
            _ => Super,
        }
    }

    #[state(superstate = "session")]
    fn connected(&mut self) -> Outcome<State> {
        Super
    }

    #[state(superstate = "session")]
    fn connect_failed(&mut self) -> Outcome<State> {
        Super
    }

    /// Rescan and scan completion behave the same on every screen.
    #[superstate]
    fn session(&mut self, context: &mut DispatchContext, event: &UiEvent) -> Outcome<State> {
        match event {
            UiEvent::Key(KeyAction::Rescan) => {
                self.session.reset();
                context.action = Some(UiAction::Scan);
                context.status = UiApplyStatus::Applied;
                Handled
            }
            UiEvent::ScanFinished(report) => {
                self.session.catalog.clone_from(&report.catalog);
                self.session.selection.reset();
                self.session.link = None;
                self.session.fault = report.fault();
                if let Some(fault) = self.session.fault {
                    log::info!("ui: no_networks fault={}", fault.as_str());
                    self.go(context, UiState::NoNetworks);
                    Transition(State::no_networks())
                } else {
                    self.go(context, UiState::SelectingNetwork);
                    Transition(State::selecting_network())
                }
            }
            _ => {
                context.status = UiApplyStatus::Ignored;
                Handled
            }
        }
    }
}
