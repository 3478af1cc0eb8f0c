use heapless::String;

use crate::types::{NetworkRecord, Ssid, PASSWORD_MAX};

pub type PasswordBuffer = String<PASSWORD_MAX>;

/// Cursor into the catalog plus the network the user committed to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub selected_index: usize,
    pub chosen_name: Ssid,
    pub chosen_is_open: bool,
    pub password: PasswordBuffer,
}

impl SelectionState {
    pub const fn new() -> Self {
        Self {
            selected_index: 0,
            chosen_name: String::new(),
            chosen_is_open: false,
            password: String::new(),
        }
    }

    /// Start-of-scan reset: cursor back to the top, nothing chosen.
    pub fn reset(&mut self) {
        self.selected_index = 0;
        self.clear_choice();
    }

    pub fn clear_choice(&mut self) {
        self.chosen_name.clear();
        self.chosen_is_open = false;
        self.password.clear();
    }

    pub fn choose(&mut self, record: &NetworkRecord) {
        self.chosen_name.clone_from(&record.name);
        self.chosen_is_open = record.security.is_open();
        self.password.clear();
    }

    /// Moves up with wrap-around; returns `false` when there is nothing to move over.
    pub fn move_up(&mut self, count: usize) -> bool {
        if count == 0 {
            return false;
        }
        self.selected_index = if self.selected_index == 0 || self.selected_index >= count {
            count - 1
        } else {
            self.selected_index - 1
        };
        true
    }

    pub fn move_down(&mut self, count: usize) -> bool {
        if count == 0 {
            return false;
        }
        self.selected_index = if self.selected_index + 1 >= count {
            0
        } else {
            self.selected_index + 1
        };
        true
    }

    /// Appends to the password; a full buffer leaves it unchanged.
    pub fn push_char(&mut self, ch: char) -> bool {
        self.password.push(ch).is_ok()
    }

    pub fn pop_char(&mut self) -> bool {
        self.password.pop().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SecurityKind;

    #[test]
    fn wrap_up_from_top_lands_on_last() {
        let mut selection = SelectionState::new();
        assert!(selection.move_up(4));
        assert_eq!(selection.selected_index, 3);
    }

    #[test]
    fn wrap_down_from_last_lands_on_top() {
        let mut selection = SelectionState::new();
        selection.selected_index = 3;
        assert!(selection.move_down(4));
        assert_eq!(selection.selected_index, 0);
    }

    #[test]
    fn navigation_is_a_no_op_on_empty_catalog() {
        let mut selection = SelectionState::new();
        assert!(!selection.move_up(0));
        assert!(!selection.move_down(0));
        assert_eq!(selection.selected_index, 0);
    }

    #[test]
    fn append_then_delete_restores_password() {
        let mut selection = SelectionState::new();
        for ch in "hunter".chars() {
            selection.push_char(ch);
        }
        let before = selection.password.clone();
        assert!(selection.push_char('2'));
        assert!(selection.pop_char());
        assert_eq!(selection.password, before);
    }

    #[test]
    fn delete_on_empty_password_keeps_it_empty() {
        let mut selection = SelectionState::new();
        assert!(!selection.pop_char());
        assert!(selection.password.is_empty());
    }

    #[test]
    fn password_stops_growing_at_capacity() {
        let mut selection = SelectionState::new();
        for _ in 0..PASSWORD_MAX {
            assert!(selection.push_char('a'));
        }
        assert!(!selection.push_char('b'));
        assert_eq!(selection.password.len(), PASSWORD_MAX);
    }

    #[test]
    fn choose_captures_name_and_openness() {
        let mut selection = SelectionState::new();
        selection.push_char('x');
        let cafe = NetworkRecord::new("Cafe", -70, SecurityKind::Open).unwrap();
        selection.choose(&cafe);
        assert_eq!(selection.chosen_name.as_str(), "Cafe");
        assert!(selection.chosen_is_open);
        assert!(selection.password.is_empty());

        selection.reset();
        assert!(selection.chosen_name.is_empty());
        assert!(!selection.chosen_is_open);
    }
}
