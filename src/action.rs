//! What a pedal does when pressed, and how that is laid out in bytes.
//!
//! Every action has a stored form, its [`payload`](Action::payload): the
//! bytes the device keeps for the slot and sends back when the slot is read.
//! Writing an action sends [`encode`](Action::encode), which for single keys
//! and strings is an intro report naming the slot followed by the payload.
//! Combinations are sent as the bare payload.
//!
//! ```text
//! single key   intro  01 81 08 slot 00 00 00 00
//!              data   08 kind mods key 00 00 00 00     kind: 81 short, 03 long
//! combination  data   len 06 mods key0 .. keyN  [zero pad]
//! string       intro  01 81 len slot 00 00 00 00
//!              data   len 04 code0 .. codeN     [zero pad]
//! ```
//!
//! `slot` is the 1-based pedal number. Payloads are always padded to a whole
//! number of 8-byte reports.

use crate::consts::{self, cmd, kind, MAX_COMBINATION_KEYS, REPORT_SIZE};
use crate::error::{Error, Result};
use crate::framer::pad_to_report;
use crate::keycode::{char_for_code, code_for_char, KeyCode, Modifiers};
use crate::slot::Slot;
use log::trace;
use std::fmt;

/// Longest typed string whose length byte (`len + 2`) still fits in a `u8`.
pub const MAX_STRING_LEN: usize = u8::MAX as usize - 2;

/// A single key with modifiers, used by both press variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyPress {
    pub key: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyPress {
    pub fn new(key: KeyCode, modifiers: Modifiers) -> Self {
        KeyPress { key, modifiers }
    }

    fn payload(&self, kind_tag: u8) -> Vec<u8> {
        vec![
            consts::SINGLE_KEY_LENGTH,
            kind_tag,
            self.modifiers.bits(),
            self.key.code(),
            0,
            0,
            0,
            0,
        ]
    }

    /// Decodes a single-key payload carrying `kind_tag`.
    ///
    /// **Acceptance is deliberately loose.** A payload is rejected only when
    /// its length byte is not 8 *and* its kind byte differs from `kind_tag`.
    /// Any payload declaring length 8 is therefore accepted whatever its kind
    /// byte says, so a long-press payload also decodes as a short press and
    /// [`DECODE_ORDER`](crate::dispatch::DECODE_ORDER) decides the winner.
    /// Whether the device relies on this is unconfirmed; do not tighten it
    /// without checking against hardware.
    fn decode(buf: &[u8], kind_tag: u8) -> Option<KeyPress> {
        if buf.len() < 4 {
            return None;
        }
        let (length, tag) = (buf[0], buf[1]);
        if length != consts::SINGLE_KEY_LENGTH && tag != kind_tag {
            return None;
        }
        Some(KeyPress {
            key: KeyCode(buf[3]),
            modifiers: Modifiers::from_bits(buf[2]),
        })
    }
}

impl fmt::Display for KeyPress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.is_empty() {
            write!(f, "{}", self.key)
        } else {
            write!(f, "{}+{}", self.modifiers, self.key)
        }
    }
}

/// Up to six keys pressed together, plus modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Combination {
    keys: Vec<KeyCode>,
    modifiers: Modifiers,
}

impl Combination {
    /// Creates a combination, rejecting more than six keys.
    pub fn new(keys: Vec<KeyCode>, modifiers: Modifiers) -> Result<Self> {
        if keys.len() > MAX_COMBINATION_KEYS {
            return Err(Error::TooManyKeys {
                max: MAX_COMBINATION_KEYS,
                actual: keys.len(),
            });
        }
        Ok(Combination { keys, modifiers })
    }

    pub fn keys(&self) -> &[KeyCode] {
        &self.keys
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    // The modifier byte counts towards the declared length only when set.
    fn declared_len(&self) -> u8 {
        let extra = u8::from(!self.modifiers.is_empty());
        self.keys.len() as u8 + extra
    }

    fn payload(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(REPORT_SIZE);
        buf.push(self.declared_len());
        buf.push(kind::COMBINATION);
        buf.push(self.modifiers.bits());
        buf.extend(self.keys.iter().map(KeyCode::code));
        pad_to_report(&mut buf);
        buf
    }

    fn decode(buf: &[u8]) -> Option<Combination> {
        if buf.len() < 3 || buf[1] != kind::COMBINATION {
            return None;
        }
        let modifiers = Modifiers::from_bits(buf[2]);
        let count = usize::from(buf[0]).saturating_sub(usize::from(!modifiers.is_empty()));
        let end = 3 + count;
        if count > MAX_COMBINATION_KEYS || end > buf.len() {
            trace!("Combination declares {} keys in {} bytes", count, buf.len());
            return None;
        }
        let keys = buf[3..end].iter().copied().map(KeyCode).collect();
        Some(Combination { keys, modifiers })
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<String> = self.keys.iter().map(ToString::to_string).collect();
        if self.modifiers.is_empty() {
            write!(f, "[{}]", keys.join(", "))
        } else {
            write!(f, "{}+[{}]", self.modifiers, keys.join(", "))
        }
    }
}

/// Text the pedal types out when pressed.
///
/// Only characters with a code in the key table can be typed: ASCII letters,
/// digits, tab, space, and `- = { } \ ; ' , . /`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct TypedString {
    text: String,
    codes: Vec<u8>,
}

impl TypedString {
    /// Creates a typed string, rejecting characters the device cannot type.
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        let codes = text
            .chars()
            .map(|c| {
                code_for_char(c)
                    .map(|k| k.code())
                    .ok_or(Error::UnencodableChar(c))
            })
            .collect::<Result<Vec<u8>>>()?;
        if codes.len() > MAX_STRING_LEN {
            return Err(Error::StringTooLong {
                max: MAX_STRING_LEN,
                actual: codes.len(),
            });
        }
        Ok(TypedString { text, codes })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Value of the length byte in both the intro and the payload.
    fn declared_len(&self) -> u8 {
        (self.codes.len() + 2) as u8
    }

    fn intro(&self, slot: Slot) -> Vec<u8> {
        vec![
            cmd::PREFIX,
            cmd::WRITE_SLOT,
            self.declared_len(),
            slot.wire(),
            0,
            0,
            0,
            0,
        ]
    }

    fn payload(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.codes.len() + 2);
        buf.push(self.declared_len());
        buf.push(kind::TYPED_STRING);
        buf.extend_from_slice(&self.codes);
        pad_to_report(&mut buf);
        buf
    }

    fn decode(buf: &[u8]) -> Option<TypedString> {
        if buf.len() < 2 || buf[1] != kind::TYPED_STRING {
            return None;
        }
        let end = usize::from(buf[0]);
        if end < 2 || end > buf.len() {
            trace!("String declares length {} in {} bytes", end, buf.len());
            return None;
        }
        let codes = buf[2..end].to_vec();
        let mut text = String::with_capacity(codes.len());
        for &code in &codes {
            match char_for_code(KeyCode(code)) {
                Some(c) => text.push(c),
                None => {
                    trace!("String contains untypeable code 0x{:02X}", code);
                    return None;
                }
            }
        }
        Some(TypedString { text, codes })
    }
}

impl fmt::Display for TypedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.text)
    }
}

/// A configured pedal behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    /// Key sent once per press.
    ShortPress(KeyPress),
    /// Key held for as long as the pedal is held.
    LongPress(KeyPress),
    /// Several keys pressed together.
    Combination(Combination),
    /// Text typed out character by character.
    TypedString(TypedString),
}

impl Action {
    /// Which variant this is.
    pub fn variant(&self) -> Variant {
        match self {
            Action::ShortPress(_) => Variant::ShortPress,
            Action::LongPress(_) => Variant::LongPress,
            Action::Combination(_) => Variant::Combination,
            Action::TypedString(_) => Variant::TypedString,
        }
    }

    /// The stored form of this action, as the device reports it on a read.
    pub fn payload(&self) -> Vec<u8> {
        match self {
            Action::ShortPress(k) => k.payload(kind::SHORT_PRESS),
            Action::LongPress(k) => k.payload(kind::LONG_PRESS),
            Action::Combination(c) => c.payload(),
            Action::TypedString(s) => s.payload(),
        }
    }

    /// The full byte stream that configures `slot` with this action.
    pub fn encode(&self, slot: Slot) -> Vec<u8> {
        let mut buf = match self {
            Action::ShortPress(_) | Action::LongPress(_) => single_key_intro(slot),
            Action::Combination(_) => Vec::new(),
            Action::TypedString(s) => s.intro(slot),
        };
        buf.extend(self.payload());
        buf
    }
}

fn single_key_intro(slot: Slot) -> Vec<u8> {
    vec![
        cmd::PREFIX,
        cmd::WRITE_SLOT,
        consts::SINGLE_KEY_LENGTH,
        slot.wire(),
        0,
        0,
        0,
        0,
    ]
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::ShortPress(k) => write!(f, "short-press {}", k),
            Action::LongPress(k) => write!(f, "long-press {}", k),
            Action::Combination(c) => write!(f, "combination {}", c),
            Action::TypedString(s) => write!(f, "string {}", s),
        }
    }
}

/// The action shapes, each with its own decode rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    ShortPress,
    LongPress,
    Combination,
    TypedString,
}

impl Variant {
    /// Tries to read `buf` as this variant. `None` means "not this shape".
    pub fn decode(self, buf: &[u8]) -> Option<Action> {
        match self {
            Variant::ShortPress => {
                KeyPress::decode(buf, kind::SHORT_PRESS).map(Action::ShortPress)
            }
            Variant::LongPress => KeyPress::decode(buf, kind::LONG_PRESS).map(Action::LongPress),
            Variant::Combination => Combination::decode(buf).map(Action::Combination),
            Variant::TypedString => TypedString::decode(buf).map(Action::TypedString),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(name: &str) -> KeyCode {
        KeyCode::from_name(name).unwrap()
    }

    #[test]
    fn test_short_press_encoding() {
        let action = Action::ShortPress(KeyPress::new(key("A"), Modifiers::CTRL));
        let slot = Slot::new(0).unwrap();
        assert_eq!(
            action.encode(slot),
            vec![
                0x01, 0x81, 0x08, 0x01, 0x00, 0x00, 0x00, 0x00, //
                0x08, 0x81, 0x01, 0x04, 0x00, 0x00, 0x00, 0x00,
            ]
        );
    }

    #[test]
    fn test_long_press_encoding() {
        let action = Action::LongPress(KeyPress::new(key("F5"), Modifiers::SHIFT | Modifiers::ALT));
        let bytes = action.encode(Slot::new(2).unwrap());
        assert_eq!(&bytes[..8], &[0x01, 0x81, 0x08, 0x03, 0, 0, 0, 0]);
        assert_eq!(&bytes[8..], &[0x08, 0x03, 0x06, 0x3E, 0, 0, 0, 0]);
    }

    #[test]
    fn test_combination_encoding() {
        let combo = Combination::new(vec![key("A"), key("B")], Modifiers::CTRL).unwrap();
        let bytes = Action::Combination(combo).encode(Slot::new(1).unwrap());
        assert_eq!(bytes, vec![0x03, 0x06, 0x01, 0x04, 0x05, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_combination_without_modifiers() {
        let combo = Combination::new(vec![key("X")], Modifiers::NONE).unwrap();
        assert_eq!(
            Action::Combination(combo).payload(),
            vec![0x01, 0x06, 0x00, 0x1B, 0, 0, 0, 0]
        );
    }

    #[test]
    fn test_full_combination_spills_into_second_report() {
        let keys: Vec<KeyCode> = ["A", "B", "C", "D", "E", "F"].iter().map(|k| key(k)).collect();
        let combo = Combination::new(keys, Modifiers::SUPER).unwrap();
        let payload = Action::Combination(combo.clone()).payload();
        assert_eq!(payload.len(), 16);
        assert_eq!(&payload[..3], &[0x07, 0x06, 0x08]);
        assert_eq!(Combination::decode(&payload), Some(combo));
    }

    #[test]
    fn test_combination_bound() {
        let seven = vec![KeyCode(0x04); 7];
        assert!(matches!(
            Combination::new(seven, Modifiers::NONE),
            Err(Error::TooManyKeys { max: 6, actual: 7 })
        ));
        assert!(Combination::new(vec![KeyCode(0x04); 6], Modifiers::NONE).is_ok());
    }

    #[test]
    fn test_string_encoding() {
        let s = TypedString::new("Ab3").unwrap();
        let bytes = Action::TypedString(s).encode(Slot::new(0).unwrap());
        assert_eq!(&bytes[..8], &[0x01, 0x81, 0x05, 0x01, 0, 0, 0, 0]);
        assert_eq!(&bytes[8..], &[0x05, 0x04, 0x84, 0x05, 0x20, 0, 0, 0]);
    }

    #[test]
    fn test_string_rejects_untypeable_chars() {
        assert!(matches!(
            TypedString::new("hi!"),
            Err(Error::UnencodableChar('!'))
        ));
        assert!(matches!(
            TypedString::new("a\nb"),
            Err(Error::UnencodableChar('\n'))
        ));
    }

    #[test]
    fn test_string_length_limit() {
        assert!(TypedString::new("a".repeat(MAX_STRING_LEN)).is_ok());
        assert!(matches!(
            TypedString::new("a".repeat(MAX_STRING_LEN + 1)),
            Err(Error::StringTooLong { .. })
        ));
    }

    #[test]
    fn test_string_decode_rejects_named_key() {
        // ENTER (0x28) has no character.
        let buf = [0x04, 0x04, 0x04, 0x28, 0, 0, 0, 0];
        assert_eq!(TypedString::decode(&buf), None);
    }

    #[test]
    fn test_string_decode_rejects_truncated_payload() {
        let buf = [0x0A, 0x04, 0x04, 0x05, 0, 0, 0, 0];
        assert_eq!(TypedString::decode(&buf), None);
    }

    #[test]
    fn test_single_key_guard_accepts_length_eight_with_any_kind() {
        // Wrong kind byte, but length 8: still accepted.
        let buf = [0x08, 0x03, 0x00, 0x04, 0, 0, 0, 0];
        assert_eq!(
            KeyPress::decode(&buf, kind::SHORT_PRESS),
            Some(KeyPress::new(KeyCode(0x04), Modifiers::NONE))
        );
        // Right kind byte, wrong length: also accepted.
        let buf = [0x05, 0x81, 0x02, 0x05, 0, 0, 0, 0];
        assert_eq!(
            KeyPress::decode(&buf, kind::SHORT_PRESS),
            Some(KeyPress::new(KeyCode(0x05), Modifiers::SHIFT))
        );
        // Both wrong: rejected.
        let buf = [0x05, 0x04, 0x00, 0x04, 0, 0, 0, 0];
        assert_eq!(KeyPress::decode(&buf, kind::SHORT_PRESS), None);
    }

    #[test]
    fn test_variant_decode_own_payload() {
        let long = Action::LongPress(KeyPress::new(key("ESC"), Modifiers::NONE));
        assert_eq!(Variant::LongPress.decode(&long.payload()), Some(long));
    }

    #[test]
    fn test_short_buffers_do_not_decode() {
        for variant in [
            Variant::ShortPress,
            Variant::LongPress,
            Variant::Combination,
            Variant::TypedString,
        ] {
            assert_eq!(variant.decode(&[]), None);
            assert_eq!(variant.decode(&[0x08]), None);
        }
    }

    #[test]
    fn test_display() {
        let a = Action::ShortPress(KeyPress::new(key("A"), Modifiers::CTRL));
        assert_eq!(a.to_string(), "short-press ctrl+A");
        let c = Action::Combination(
            Combination::new(vec![key("A"), key("B")], Modifiers::NONE).unwrap(),
        );
        assert_eq!(c.to_string(), "combination [A, B]");
        let s = Action::TypedString(TypedString::new("Ab3").unwrap());
        assert_eq!(s.to_string(), "string \"Ab3\"");
    }
}
