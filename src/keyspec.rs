//! Parsing of human key specs such as `ctrl+shift+F5` or `alt+a+b`.
//!
//! Tokens are separated by `+` and compared without regard to case.
//! `ctrl`, `shift`, `alt` and `super` add modifier bits; every other token
//! must be a key name known to [`code_for_name`].

use crate::error::{Error, Result};
use crate::keycode::{code_for_name, KeyCode, Modifiers};

/// Parses a spec naming at most one key.
///
/// An empty spec yields `KeyCode::NONE` with no modifiers, which programs the
/// slot to send modifiers only (or nothing).
pub fn parse_key(spec: &str) -> Result<(KeyCode, Modifiers)> {
    let (keys, modifiers) = parse_keys(spec)?;
    match keys.as_slice() {
        [] => Ok((KeyCode::NONE, modifiers)),
        [key] => Ok((*key, modifiers)),
        _ => Err(Error::InvalidKeySpec(format!(
            "'{}' names {} keys, expected one",
            spec,
            keys.len()
        ))),
    }
}

/// Parses a spec naming any number of keys, in the order given.
pub fn parse_keys(spec: &str) -> Result<(Vec<KeyCode>, Modifiers)> {
    let mut keys = Vec::new();
    let mut modifiers = Modifiers::NONE;
    if spec.is_empty() {
        return Ok((keys, modifiers));
    }
    for token in spec.split('+') {
        if token.is_empty() {
            return Err(Error::InvalidKeySpec(format!(
                "'{}' has an empty token; the '+' key cannot be assigned",
                spec
            )));
        }
        if let Some(m) = Modifiers::from_name(token) {
            modifiers |= m;
        } else {
            let key = code_for_name(token)
                .ok_or_else(|| Error::UnknownKeyName(token.to_string()))?;
            keys.push(key);
        }
    }
    Ok((keys, modifiers))
}
