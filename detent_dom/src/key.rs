// Copyright 2025 the Detent Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named keyboard keys and their legacy numeric codes.

/// A keyboard key, as delivered with key-down/key-up events.
///
/// Hosts that only have legacy numeric codes can use [`Key::from_code`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Key {
    /// Backspace (8).
    Backspace,
    /// Tab (9).
    Tab,
    /// Enter (13).
    Enter,
    /// Shift (16).
    Shift,
    /// Control (17).
    Control,
    /// Caps Lock (20).
    CapsLock,
    /// Escape (27).
    Escape,
    /// Space (32).
    Space,
    /// Page Up (33).
    PageUp,
    /// Page Down (34).
    PageDown,
    /// End (35).
    End,
    /// Home (36).
    Home,
    /// Left arrow (37).
    Left,
    /// Up arrow (38).
    Up,
    /// Right arrow (39).
    Right,
    /// Down arrow (40).
    Down,
    /// Insert (45).
    Insert,
    /// Delete (46).
    Delete,
    /// Numpad `*` (106).
    NumpadMultiply,
    /// Numpad `+` (107).
    NumpadAdd,
    /// Numpad Enter (108).
    NumpadEnter,
    /// Numpad `-` (109).
    NumpadSubtract,
    /// Numpad `.` (110).
    NumpadDecimal,
    /// Numpad `/` (111).
    NumpadDivide,
    /// Comma (188).
    Comma,
    /// Period (190).
    Period,
    /// Any other key, by code.
    Other(u16),
}

const TABLE: &[(u16, Key)] = &[
    (8, Key::Backspace),
    (9, Key::Tab),
    (13, Key::Enter),
    (16, Key::Shift),
    (17, Key::Control),
    (20, Key::CapsLock),
    (27, Key::Escape),
    (32, Key::Space),
    (33, Key::PageUp),
    (34, Key::PageDown),
    (35, Key::End),
    (36, Key::Home),
    (37, Key::Left),
    (38, Key::Up),
    (39, Key::Right),
    (40, Key::Down),
    (45, Key::Insert),
    (46, Key::Delete),
    (106, Key::NumpadMultiply),
    (107, Key::NumpadAdd),
    (108, Key::NumpadEnter),
    (109, Key::NumpadSubtract),
    (110, Key::NumpadDecimal),
    (111, Key::NumpadDivide),
    (188, Key::Comma),
    (190, Key::Period),
];

impl Key {
    /// Map a legacy key code to a named key.
    pub fn from_code(code: u16) -> Self {
        TABLE
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, k)| *k)
            .unwrap_or(Self::Other(code))
    }

    /// The legacy key code for this key.
    pub fn code(self) -> u16 {
        if let Self::Other(code) = self {
            return code;
        }
        TABLE
            .iter()
            .find(|(_, k)| *k == self)
            .map(|(c, _)| *c)
            .unwrap_or(0)
    }

    /// Returns true for the four arrow keys.
    pub fn is_arrow(self) -> bool {
        matches!(self, Self::Left | Self::Up | Self::Right | Self::Down)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_map_both_ways() {
        assert_eq!(Key::from_code(36), Key::Home);
        assert_eq!(Key::from_code(40), Key::Down);
        assert_eq!(Key::Up.code(), 38);
        assert_eq!(Key::from_code(65), Key::Other(65));
        assert_eq!(Key::Other(65).code(), 65);
        for (code, key) in TABLE {
            assert_eq!(Key::from_code(*code), *key, "code {code} should round-trip");
        }
    }
}
