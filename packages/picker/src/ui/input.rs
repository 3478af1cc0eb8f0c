use heapless::Vec;

use super::events::KeyAction;
use crate::keyboard::{KeysState, TYPED_MAX};
use crate::types::UiState;

pub const ACTIONS_MAX: usize = TYPED_MAX + 2;

pub type KeyActions = Vec<KeyAction, ACTIONS_MAX>;

fn is_key(ch: char, key: char) -> bool {
    ch.eq_ignore_ascii_case(&key)
}

/// Maps one tick of keyboard input onto UI actions for `state`.
///
/// `r`/`R` anywhere in the tick preempts everything else, and `q`/`Q` does
/// the same on the password screen. Callers are expected to skip ticks that
/// carry no fresh key-down.
pub fn translate(keys: &KeysState, state: UiState, chosen_is_open: bool) -> KeyActions {
    let mut actions = KeyActions::new();

    if keys.word.iter().any(|&ch| is_key(ch, 'r')) {
        let _ = actions.push(KeyAction::Rescan);
        return actions;
    }

    match state {
        UiState::SelectingNetwork => {
            for &ch in &keys.word {
                let action = if is_key(ch, 'w') {
                    KeyAction::Up
                } else if is_key(ch, 's') {
                    KeyAction::Down
                } else {
                    continue;
                };
                let _ = actions.push(action);
            }
            if keys.enter {
                let _ = actions.push(KeyAction::Confirm);
            }
        }
        UiState::EnteringPassword => {
            if keys.word.iter().any(|&ch| is_key(ch, 'q')) {
                let _ = actions.push(KeyAction::Back);
                return actions;
            }
            if !chosen_is_open {
                for &ch in &keys.word {
                    let _ = actions.push(KeyAction::Type(ch));
                }
                if keys.delete {
                    let _ = actions.push(KeyAction::Erase);
                }
            }
            if keys.enter {
                let _ = actions.push(KeyAction::Confirm);
            }
        }
        UiState::NoNetworks | UiState::Connecting | UiState::Connected | UiState::ConnectFailed => {}
    }
    actions
}
