//! Turning a reassembled reply into an [`Action`].
//!
//! Payloads carry no variant tag the decoder can trust on its own, so each
//! variant's rule is tried in [`DECODE_ORDER`] and the first match wins.

use crate::action::{Action, Variant};
use log::{debug, warn};

/// Order in which decode rules are tried. Earlier entries win ties.
///
/// `ShortPress` precedes `LongPress`; because the single-key rule accepts any
/// payload declaring length 8, long-press payloads read back as short presses.
pub const DECODE_ORDER: [Variant; 4] = [
    Variant::ShortPress,
    Variant::LongPress,
    Variant::Combination,
    Variant::TypedString,
];

/// Decodes a reply payload.
///
/// Returns `None` when no rule matches, which is how an unconfigured slot
/// reads back.
pub fn decode(payload: &[u8]) -> Option<Action> {
    let action = DECODE_ORDER
        .iter()
        .find_map(|variant| variant.decode(payload));
    match &action {
        Some(a) => debug!("Decoded {:?} from {} bytes", a.variant(), payload.len()),
        None if payload.is_empty() => debug!("Empty reply, slot has no action"),
        None => warn!("Unrecognised payload: {:02X?}", payload),
    }
    action
}
