use statig::blocking::IntoStateMachineExt as _;

use super::actions::{UiAction, UiApplyStatus};
use super::events::UiEvent;
use super::machine::{DispatchContext, UiMachine};
use super::session::Session;
use crate::types::UiState;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UiApplyResult {
    pub before: UiState,
    pub after: UiState,
    pub status: UiApplyStatus,
    pub action: Option<UiAction>,
}

impl UiApplyResult {
    /// The screen needs repainting.
    pub fn changed(&self) -> bool {
        matches!(self.status, UiApplyStatus::Applied)
    }

    pub fn transitioned(&self) -> bool {
        self.before != self.after
    }
}

pub struct UiEngine {
    machine: statig::blocking::StateMachine<UiMachine>,
}

impl Default for UiEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl UiEngine {
    pub fn new() -> Self {
        Self {
            machine: UiMachine::new().state_machine(),
        }
    }

    pub fn state(&self) -> UiState {
        self.machine.inner().screen
    }

    pub fn session(&self) -> &Session {
        &self.machine.inner().session
    }

    pub fn apply(&mut self, event: &UiEvent) -> UiApplyResult {
        let before = self.state();
        let mut context = DispatchContext::default();
        self.machine.handle_with_context(event, &mut context);
        let after = self.state();
        if before != after {
            log::debug!("ui: state from={} to={}", before.as_str(), after.as_str());
        }
        UiApplyResult {
            before,
            after,
            status: context.status,
            action: context.action,
        }
    }
}
