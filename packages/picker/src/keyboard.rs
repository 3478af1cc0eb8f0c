//! Cardputer-style 4x14 keyboard decoding.
//!
//! The board multiplexes the matrix through a 3-to-8 line decoder: each of the
//! eight scan lines exposes seven input pins, and every (line, input) pair maps
//! onto one cell of the 4x14 layout below. The firmware driver only reports
//! which inputs read low per line; everything after that lives here so it can
//! be checked on the host.

use heapless::Vec;

pub const MATRIX_ROWS: usize = 4;
pub const MATRIX_COLS: usize = 14;
pub const SCAN_LINES: u8 = 8;
pub const SCAN_INPUTS: usize = 7;
pub const TYPED_MAX: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Key {
    Char(char, char),
    Backspace,
    Tab,
    Fn,
    Shift,
    Ctrl,
    Opt,
    Alt,
    Enter,
}

use Key::Char as C;

const LAYOUT: [[Key; MATRIX_COLS]; MATRIX_ROWS] = [
    [
        C('`', '~'),
        C('1', '!'),
        C('2', '@'),
        C('3', '#'),
        C('4', '$'),
        C('5', '%'),
        C('6', '^'),
        C('7', '&'),
        C('8', '*'),
        C('9', '('),
        C('0', ')'),
        C('-', '_'),
        C('=', '+'),
        Key::Backspace,
    ],
    [
        Key::Tab,
        C('q', 'Q'),
        C('w', 'W'),
        C('e', 'E'),
        C('r', 'R'),
        C('t', 'T'),
        C('y', 'Y'),
        C('u', 'U'),
        C('i', 'I'),
        C('o', 'O'),
        C('p', 'P'),
        C('[', '{'),
        C(']', '}'),
        C('\\', '|'),
    ],
    [
        Key::Fn,
        Key::Shift,
        C('a', 'A'),
        C('s', 'S'),
        C('d', 'D'),
        C('f', 'F'),
        C('g', 'G'),
        C('h', 'H'),
        C('j', 'J'),
        C('k', 'K'),
        C('l', 'L'),
        C(';', ':'),
        C('\'', '"'),
        Key::Enter,
    ],
    [
        Key::Ctrl,
        Key::Opt,
        Key::Alt,
        C('z', 'Z'),
        C('x', 'X'),
        C('c', 'C'),
        C('v', 'V'),
        C('b', 'B'),
        C('n', 'N'),
        C('m', 'M'),
        C(',', '<'),
        C('.', '>'),
        C('/', '?'),
        C(' ', ' '),
    ],
];

/// Snapshot of held keys, one bit per layout cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyMatrix(u64);

impl KeyMatrix {
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Records the inputs that read active on one decoder line.
    ///
    /// Lines 4..8 drive the even columns, lines 0..4 the odd ones; rows are
    /// numbered bottom-up on the decoder so they are flipped here.
    pub fn set_scan_line(&mut self, line: u8, active_inputs: u8) {
        if line >= SCAN_LINES {
            return;
        }
        let upper = line > 3;
        let row = 3 - (line % 4) as usize;
        for input in 0..SCAN_INPUTS {
            if active_inputs & (1 << input) == 0 {
                continue;
            }
            let col = if upper { input * 2 } else { input * 2 + 1 };
            self.press(row, col);
        }
    }

    pub fn press(&mut self, row: usize, col: usize) {
        if row < MATRIX_ROWS && col < MATRIX_COLS {
            self.0 |= 1 << (row * MATRIX_COLS + col);
        }
    }

    pub const fn is_pressed(self, row: usize, col: usize) -> bool {
        row < MATRIX_ROWS && col < MATRIX_COLS && self.0 & (1 << (row * MATRIX_COLS + col)) != 0
    }

    pub const fn any(self) -> bool {
        self.0 != 0
    }

    fn cells(self) -> impl Iterator<Item = (usize, usize)> {
        (0..MATRIX_ROWS)
            .flat_map(|row| (0..MATRIX_COLS).map(move |col| (row, col)))
            .filter(move |&(row, col)| self.is_pressed(row, col))
    }

    fn holds(self, key: Key) -> bool {
        self.cells().any(|(row, col)| LAYOUT[row][col] == key)
    }
}

/// Keyboard delta for one poll tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeysState {
    /// The held set differs from the previous tick.
    pub changed: bool,
    /// At least one key is held.
    pub pressed: bool,
    /// Characters whose keys went down this tick, shift applied.
    pub word: Vec<char, TYPED_MAX>,
    pub enter: bool,
    pub delete: bool,
}

impl KeysState {
    /// A fresh key-down carrying `text`, as a scripted input source would report it.
    pub fn typed(text: &str) -> Self {
        let mut state = Self {
            changed: true,
            pressed: true,
            ..Self::default()
        };
        for ch in text.chars() {
            if state.word.push(ch).is_err() {
                break;
            }
        }
        state
    }

    pub fn with_enter(mut self) -> Self {
        self.changed = true;
        self.pressed = true;
        self.enter = true;
        self
    }

    pub fn with_delete(mut self) -> Self {
        self.changed = true;
        self.pressed = true;
        self.delete = true;
        self
    }

    pub fn idle() -> Self {
        Self::default()
    }
}

/// Edge detector turning successive matrix snapshots into [`KeysState`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeyboardDecoder {
    previous: KeyMatrix,
}

impl KeyboardDecoder {
    pub const fn new() -> Self {
        Self {
            previous: KeyMatrix::empty(),
        }
    }

    pub fn update(&mut self, matrix: KeyMatrix) -> KeysState {
        let previous = core::mem::replace(&mut self.previous, matrix);
        let mut state = KeysState {
            changed: matrix != previous,
            pressed: matrix.any(),
            ..KeysState::default()
        };
        if !state.changed {
            return state;
        }

        let shifted = matrix.holds(Key::Shift);
        for (row, col) in matrix.cells() {
            if previous.is_pressed(row, col) {
                continue;
            }
            match LAYOUT[row][col] {
                Key::Char(plain, shift) => {
                    let ch = if shifted { shift } else { plain };
                    if state.word.push(ch).is_err() {
                        log::debug!("keyboard: dropped key row={} col={}", row, col);
                    }
                }
                Key::Enter => state.enter = true,
                Key::Backspace => state.delete = true,
                Key::Tab | Key::Fn | Key::Shift | Key::Ctrl | Key::Opt | Key::Alt => {}
            }
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix_with(cells: &[(usize, usize)]) -> KeyMatrix {
        let mut matrix = KeyMatrix::empty();
        for &(row, col) in cells {
            matrix.press(row, col);
        }
        matrix
    }

    #[test]
    fn scan_lines_cover_every_cell_exactly_once() {
        let mut seen = [[0u8; MATRIX_COLS]; MATRIX_ROWS];
        for line in 0..SCAN_LINES {
            for input in 0..SCAN_INPUTS {
                let mut matrix = KeyMatrix::empty();
                matrix.set_scan_line(line, 1 << input);
                for (row, col) in matrix.cells() {
                    seen[row][col] += 1;
                }
            }
        }
        assert!(seen.iter().flatten().all(|&count| count == 1));
    }

    #[test]
    fn enter_sits_on_scan_line_one() {
        let mut matrix = KeyMatrix::empty();
        // Line 1 selects row 2 (counted from the top); lower lines take odd columns.
        matrix.set_scan_line(1, 1 << 6);
        assert!(matrix.is_pressed(2, 13));
        assert_eq!(LAYOUT[2][13], Key::Enter);
    }

    #[test]
    fn new_key_down_reports_character_once() {
        let mut decoder = KeyboardDecoder::new();
        let w = matrix_with(&[(1, 2)]);

        let first = decoder.update(w);
        assert!(first.changed && first.pressed);
        assert_eq!(first.word.as_slice(), &['w']);

        let held = decoder.update(w);
        assert!(!held.changed);
        assert!(held.word.is_empty());

        let released = decoder.update(KeyMatrix::empty());
        assert!(released.changed);
        assert!(!released.pressed);
        assert!(released.word.is_empty());
    }

    #[test]
    fn shift_selects_upper_symbol() {
        let mut decoder = KeyboardDecoder::new();
        let state = decoder.update(matrix_with(&[(2, 1), (1, 4), (0, 1)]));
        assert_eq!(state.word.as_slice(), &['!', 'R']);
    }

    #[test]
    fn enter_and_backspace_raise_flags_without_text() {
        let mut decoder = KeyboardDecoder::new();
        let state = decoder.update(matrix_with(&[(2, 13), (0, 13)]));
        assert!(state.enter);
        assert!(state.delete);
        assert!(state.word.is_empty());
    }

    #[test]
    fn only_newly_pressed_keys_are_typed() {
        let mut decoder = KeyboardDecoder::new();
        decoder.update(matrix_with(&[(2, 2)]));
        let state = decoder.update(matrix_with(&[(2, 2), (2, 3)]));
        assert_eq!(state.word.as_slice(), &['s']);
    }

    #[test]
    fn typed_helper_marks_fresh_press() {
        let keys = KeysState::typed("ab").with_enter();
        assert!(keys.changed && keys.pressed && keys.enter);
        assert_eq!(keys.word.as_slice(), &['a', 'b']);
        assert!(!KeysState::idle().changed);
    }
}
