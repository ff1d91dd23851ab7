//! HID keyboard usage codes as understood by the pedal firmware.
//!
//! Two independent lookups live here:
//!
//! *   a named-key table used for single keys and combinations, and
//! *   the character mapping used by typed strings, which is a small table of
//!     printable aliases plus two arithmetic letter banks. Lowercase letters
//!     start at [`LOWERCASE_BASE`](crate::LOWERCASE_BASE), uppercase
//!     letters at [`UPPERCASE_BASE`](crate::UPPERCASE_BASE), 128 higher.
//!
//! The printable table is consulted before the letter banks in both
//! directions. No printable alias currently falls inside a letter bank.

use crate::consts::{ALPHABET_LEN, LOWERCASE_BASE, UPPERCASE_BASE};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// A single-byte HID keyboard usage code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct KeyCode(pub u8);

impl KeyCode {
    /// No key.
    pub const NONE: KeyCode = KeyCode(0x00);

    /// Looks up a key by name. See [`code_for_name`].
    pub fn from_name(name: &str) -> Option<KeyCode> {
        code_for_name(name)
    }

    /// Returns the raw usage code.
    #[inline]
    pub fn code(&self) -> u8 {
        self.0
    }

    /// Returns the canonical name of this key, if it has one.
    pub fn name(&self) -> Option<&'static str> {
        name_for_code(*self)
    }
}

impl From<u8> for KeyCode {
    fn from(code: u8) -> Self {
        KeyCode(code)
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "0x{:02X}", self.0),
        }
    }
}

/// Modifier keys held together with a key or combination.
///
/// The device stores the mask as one byte. Bits outside the four defined
/// flags are kept as read so that a decoded action re-encodes unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const CTRL: Modifiers = Modifiers(1 << 0);
    pub const SHIFT: Modifiers = Modifiers(1 << 1);
    pub const ALT: Modifiers = Modifiers(1 << 2);
    pub const SUPER: Modifiers = Modifiers(1 << 3);

    const NAMED: [(Modifiers, &'static str); 4] = [
        (Modifiers::CTRL, "ctrl"),
        (Modifiers::SHIFT, "shift"),
        (Modifiers::ALT, "alt"),
        (Modifiers::SUPER, "super"),
    ];

    /// Wraps a raw mask byte as read from the device.
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        Modifiers(bits)
    }

    #[inline]
    pub const fn bits(&self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn contains(&self, other: Modifiers) -> bool {
        self.0 & other.0 == other.0
    }

    /// Parses a single modifier name (`ctrl`, `shift`, `alt`, `super`), ignoring case.
    pub fn from_name(name: &str) -> Option<Modifiers> {
        Self::NAMED
            .iter()
            .find(|(_, n)| n.eq_ignore_ascii_case(name))
            .map(|(m, _)| *m)
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Modifiers) -> Modifiers {
        Modifiers(self.0 | rhs.0)
    }
}

impl BitOrAssign for Modifiers {
    fn bitor_assign(&mut self, rhs: Modifiers) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        let mut parts: Vec<String> = Self::NAMED
            .iter()
            .filter(|(m, _)| self.contains(*m))
            .map(|(_, n)| n.to_string())
            .collect();
        let known = Self::NAMED.iter().fold(0u8, |acc, (m, _)| acc | m.0);
        if self.0 & !known != 0 {
            parts.push(format!("0x{:02X}", self.0 & !known));
        }
        f.write_str(&parts.join("+"))
    }
}

/// Named keys. The first entry for a code is its canonical name.
#[rustfmt::skip]
const NAMED_KEYS: &[(&str, u8)] = &[
    ("NONE", 0x00),
    ("A", 0x04), ("B", 0x05), ("C", 0x06), ("D", 0x07), ("E", 0x08), ("F", 0x09),
    ("G", 0x0A), ("H", 0x0B), ("I", 0x0C), ("J", 0x0D), ("K", 0x0E), ("L", 0x0F),
    ("M", 0x10), ("N", 0x11), ("O", 0x12), ("P", 0x13), ("Q", 0x14), ("R", 0x15),
    ("S", 0x16), ("T", 0x17), ("U", 0x18), ("V", 0x19), ("W", 0x1A), ("X", 0x1B),
    ("Y", 0x1C), ("Z", 0x1D),
    ("1", 0x1E), ("2", 0x1F), ("3", 0x20), ("4", 0x21), ("5", 0x22),
    ("6", 0x23), ("7", 0x24), ("8", 0x25), ("9", 0x26), ("0", 0x27),
    ("ENTER", 0x28), ("ESC", 0x29), ("BACKSPACE", 0x2A), ("TAB", 0x2B), ("SPACE", 0x2C),
    ("MINUS", 0x2D), ("EQUAL", 0x2E), ("LEFTBRACE", 0x2F), ("RIGHTBRACE", 0x30),
    ("BACKSLASH", 0x31), ("HASHTILDE", 0x32), ("SEMICOLON", 0x33), ("APOSTROPHE", 0x34),
    ("GRAVE", 0x35), ("COMMA", 0x36), ("DOT", 0x37), ("SLASH", 0x38), ("CAPSLOCK", 0x39),
    ("F1", 0x3A), ("F2", 0x3B), ("F3", 0x3C), ("F4", 0x3D), ("F5", 0x3E), ("F6", 0x3F),
    ("F7", 0x40), ("F8", 0x41), ("F9", 0x42), ("F10", 0x43), ("F11", 0x44), ("F12", 0x45),
    ("SYSRQ", 0x46), ("SCROLLLOCK", 0x47), ("PAUSE", 0x48), ("INSERT", 0x49),
    ("HOME", 0x4A), ("PAGEUP", 0x4B), ("DELETE", 0x4C), ("END", 0x4D), ("PAGEDOWN", 0x4E),
    ("RIGHT", 0x4F), ("LEFT", 0x50), ("DOWN", 0x51), ("UP", 0x52),
    ("NUMLOCK", 0x53), ("KPSLASH", 0x54), ("KPASTERISK", 0x55), ("KPMINUS", 0x56),
    ("KPPLUS", 0x57), ("KPENTER", 0x58),
    ("KP1", 0x59), ("KP2", 0x5A), ("KP3", 0x5B), ("KP4", 0x5C), ("KP5", 0x5D),
    ("KP6", 0x5E), ("KP7", 0x5F), ("KP8", 0x60), ("KP9", 0x61), ("KP0", 0x62),
    ("KPDOT", 0x63), ("102ND", 0x64), ("COMPOSE", 0x65), ("POWER", 0x66), ("KPEQUAL", 0x67),
    ("F13", 0x68), ("F14", 0x69), ("F15", 0x6A), ("F16", 0x6B), ("F17", 0x6C), ("F18", 0x6D),
    ("F19", 0x6E), ("F20", 0x6F), ("F21", 0x70), ("F22", 0x71), ("F23", 0x72), ("F24", 0x73),
    ("OPEN", 0x74), ("HELP", 0x75), ("PROPS", 0x76), ("FRONT", 0x77), ("STOP", 0x78),
    ("AGAIN", 0x79), ("UNDO", 0x7A), ("CUT", 0x7B), ("COPY", 0x7C), ("PASTE", 0x7D),
    ("FIND", 0x7E), ("MUTE", 0x7F), ("VOLUMEUP", 0x80), ("VOLUMEDOWN", 0x81),
    ("KPCOMMA", 0x85), ("RO", 0x87), ("KATAKANAHIRAGANA", 0x88), ("YEN", 0x89),
    ("HENKAN", 0x8A), ("MUHENKAN", 0x8B), ("KPJPCOMMA", 0x8C),
    ("HANGEUL", 0x90), ("HANJA", 0x91), ("KATAKANA", 0x92), ("HIRAGANA", 0x93),
    ("ZENKAKUHANKAKU", 0x94),
    ("KPLEFTPAREN", 0xB6), ("KPRIGHTPAREN", 0xB7),
    ("LEFTCTRL", 0xE0), ("LEFTSHIFT", 0xE1), ("LEFTALT", 0xE2), ("LEFTMETA", 0xE3),
    ("RIGHTCTRL", 0xE4), ("RIGHTSHIFT", 0xE5), ("RIGHTALT", 0xE6), ("RIGHTMETA", 0xE7),
    ("MEDIA_PLAYPAUSE", 0xE8), ("MEDIA_STOPCD", 0xE9), ("MEDIA_PREVIOUSSONG", 0xEA),
    ("MEDIA_NEXTSONG", 0xEB), ("MEDIA_EJECTCD", 0xEC), ("MEDIA_VOLUMEUP", 0xED),
    ("MEDIA_VOLUMEDOWN", 0xEE), ("MEDIA_MUTE", 0xEF), ("MEDIA_WWW", 0xF0),
    ("MEDIA_BACK", 0xF1), ("MEDIA_FORWARD", 0xF2), ("MEDIA_STOP", 0xF3),
    ("MEDIA_FIND", 0xF4), ("MEDIA_SCROLLUP", 0xF5), ("MEDIA_SCROLLDOWN", 0xF6),
    ("MEDIA_EDIT", 0xF7), ("MEDIA_SLEEP", 0xF8), ("MEDIA_COFFEE", 0xF9),
    ("MEDIA_REFRESH", 0xFA), ("MEDIA_CALC", 0xFB),
];

/// Modifier-bit names sharing byte values with ordinary keys (`MOD_LALT` is
/// `A`, `MOD_RMETA` is `VOLUMEUP`). Accepted as input, never used for display.
#[rustfmt::skip]
const MODIFIER_BIT_KEYS: &[(&str, u8)] = &[
    ("MOD_LCTRL", 0x01), ("MOD_LSHIFT", 0x02), ("MOD_LALT", 0x04), ("MOD_LMETA", 0x08),
    ("MOD_RCTRL", 0x10), ("MOD_RSHIFT", 0x20), ("MOD_RALT", 0x40), ("MOD_RMETA", 0x80),
    ("ERR_OVF", 0x01),
];

/// Characters a typed string can contain besides letters.
#[rustfmt::skip]
const PRINTABLE: &[(char, u8)] = &[
    ('1', 0x1E), ('2', 0x1F), ('3', 0x20), ('4', 0x21), ('5', 0x22),
    ('6', 0x23), ('7', 0x24), ('8', 0x25), ('9', 0x26), ('0', 0x27),
    ('\t', 0x2B), (' ', 0x2C), ('-', 0x2D), ('=', 0x2E), ('{', 0x2F), ('}', 0x30),
    ('\\', 0x31), (';', 0x33), ('\'', 0x34), (',', 0x36), ('.', 0x37), ('/', 0x38),
];

/// Looks up a key by name, ignoring case.
///
/// Accepts the canonical names (`A`, `F13`, `MEDIA_PLAYPAUSE`), the modifier-bit
/// names (`MOD_LCTRL`), and any single printable character (`-`, `,`).
pub fn code_for_name(name: &str) -> Option<KeyCode> {
    NAMED_KEYS
        .iter()
        .chain(MODIFIER_BIT_KEYS)
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|&(_, code)| KeyCode(code))
        .or_else(|| {
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => printable_code(c),
                _ => None,
            }
        })
}

/// Returns the canonical name of a key code, if it has one.
pub fn name_for_code(code: KeyCode) -> Option<&'static str> {
    NAMED_KEYS
        .iter()
        .find(|&&(_, c)| c == code.0)
        .map(|&(n, _)| n)
}

/// Maps a character of a typed string to the code the device stores for it.
///
/// Printable aliases are consulted first, then the lowercase and uppercase
/// letter banks.
pub fn code_for_char(c: char) -> Option<KeyCode> {
    if let Some(code) = printable_code(c) {
        return Some(code);
    }
    match c {
        'a'..='z' => Some(KeyCode(LOWERCASE_BASE + (c as u8 - b'a'))),
        'A'..='Z' => Some(KeyCode(UPPERCASE_BASE + (c as u8 - b'A'))),
        _ => None,
    }
}

/// Inverse of [`code_for_char`].
///
/// Returns `None` for codes that only name a non-printable key (such as
/// `ENTER`) or nothing at all.
pub fn char_for_code(code: KeyCode) -> Option<char> {
    if let Some(&(c, _)) = PRINTABLE.iter().find(|&&(_, k)| k == code.0) {
        return Some(c);
    }
    let b = code.0;
    if (LOWERCASE_BASE..LOWERCASE_BASE + ALPHABET_LEN).contains(&b) {
        return Some(char::from(b'a' + (b - LOWERCASE_BASE)));
    }
    if (UPPERCASE_BASE..UPPERCASE_BASE + ALPHABET_LEN).contains(&b) {
        return Some(char::from(b'A' + (b - UPPERCASE_BASE)));
    }
    None
}

fn printable_code(c: char) -> Option<KeyCode> {
    PRINTABLE
        .iter()
        .find(|&&(p, _)| p == c)
        .map(|&(_, code)| KeyCode(code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    #[rstest]
    #[case("A", 0x04)]
    #[case("a", 0x04)]
    #[case("z", 0x1D)]
    #[case("1", 0x1E)]
    #[case("0", 0x27)]
    #[case("enter", 0x28)]
    #[case("F24", 0x73)]
    #[case("media_calc", 0xFB)]
    #[case("-", 0x2D)]
    #[case(",", 0x36)]
    #[case("MOD_LCTRL", 0x01)]
    fn test_code_for_name(#[case] name: &str, #[case] expected: u8) {
        assert_eq!(code_for_name(name), Some(KeyCode(expected)), "name {name}");
    }

    #[test]
    fn test_unknown_names() {
        assert_eq!(code_for_name("NOPE"), None);
        assert_eq!(code_for_name("+"), None);
        assert_eq!(code_for_name(""), None);
    }

    #[test]
    fn test_named_keys_are_unique() {
        let mut seen: HashMap<u8, &str> = HashMap::new();
        for &(name, code) in NAMED_KEYS {
            if let Some(prev) = seen.insert(code, name) {
                panic!("{name} and {prev} share code 0x{code:02X}");
            }
        }
    }

    #[test]
    fn test_modifier_bit_names_alias_keys() {
        // Documented overlap: these byte values double as modifier bits.
        assert_eq!(code_for_name("MOD_LALT"), code_for_name("A"));
        assert_eq!(code_for_name("MOD_RMETA"), code_for_name("VOLUMEUP"));
        assert_eq!(name_for_code(KeyCode(0x04)), Some("A"));
        assert_eq!(name_for_code(KeyCode(0x01)), None);
    }

    #[rstest]
    #[case('a', 0x04)]
    #[case('b', 0x05)]
    #[case('z', 0x1D)]
    #[case('A', 0x84)]
    #[case('B', 0x85)]
    #[case('Z', 0x9D)]
    #[case('3', 0x20)]
    #[case(' ', 0x2C)]
    #[case('\t', 0x2B)]
    #[case('/', 0x38)]
    fn test_char_round_trip(#[case] c: char, #[case] code: u8) {
        assert_eq!(code_for_char(c), Some(KeyCode(code)));
        assert_eq!(char_for_code(KeyCode(code)), Some(c));
    }

    #[test]
    fn test_every_encodable_char_decodes() {
        for c in (0u8..=127).map(char::from) {
            if let Some(code) = code_for_char(c) {
                assert_eq!(char_for_code(code), Some(c), "char {c:?}");
            }
        }
    }

    #[test]
    fn test_unencodable_chars() {
        assert_eq!(code_for_char('!'), None);
        assert_eq!(code_for_char('\n'), None);
        assert_eq!(code_for_char('é'), None);
    }

    #[test]
    fn test_non_printable_codes() {
        // ENTER and KPCOMMA have names but no character.
        assert_eq!(char_for_code(KeyCode(0x28)), None);
        assert_eq!(char_for_code(KeyCode(0x00)), None);
        assert_eq!(char_for_code(KeyCode(0xFB)), None);
        // KPCOMMA shares its byte with uppercase B; typed strings read it as B.
        assert_eq!(char_for_code(KeyCode(0x85)), Some('B'));
    }

    #[test]
    fn test_modifier_display() {
        assert_eq!(Modifiers::NONE.to_string(), "none");
        assert_eq!((Modifiers::CTRL | Modifiers::ALT).to_string(), "ctrl+alt");
        assert_eq!(Modifiers::from_bits(0x11).to_string(), "ctrl+0x10");
    }

    #[test]
    fn test_modifier_from_name() {
        assert_eq!(Modifiers::from_name("CTRL"), Some(Modifiers::CTRL));
        assert_eq!(Modifiers::from_name("super"), Some(Modifiers::SUPER));
        assert_eq!(Modifiers::from_name("meta"), None);
        let mut m = Modifiers::NONE;
        m |= Modifiers::SHIFT;
        assert!(m.contains(Modifiers::SHIFT));
        assert!(!m.contains(Modifiers::CTRL));
        assert_eq!(m.bits(), 2);
    }

    #[test]
    fn test_keycode_display() {
        assert_eq!(KeyCode(0x04).to_string(), "A");
        assert_eq!(KeyCode(0x83).to_string(), "0x83");
    }
}
