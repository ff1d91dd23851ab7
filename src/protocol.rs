//! Slot-level requests built on the report framer.
//!
//! These are generic over [`ReportTransport`] and perform no retries: a
//! dropped report cannot be recovered mid-message, so the caller re-issues
//! the whole operation.

use crate::action::Action;
use crate::consts::{cmd, REPORT_SIZE};
use crate::dispatch;
use crate::error::Result;
use crate::framer::{self, Report, ReportTransport};
use crate::slot::Slot;
use log::debug;

/// Report asking the device for the stored configuration of `slot`.
pub fn read_request(slot: Slot) -> Report {
    [
        cmd::PREFIX,
        cmd::READ_SLOT,
        REPORT_SIZE as u8,
        slot.wire(),
        0,
        0,
        0,
        0,
    ]
}

/// Identify request.
pub fn hello_request() -> Report {
    [cmd::PREFIX, cmd::HELLO, REPORT_SIZE as u8, 0, 0, 0, 0, 0]
}

/// Reads and decodes the action stored in `slot`.
///
/// `Ok(None)` means the slot holds nothing this crate recognises.
pub fn read_slot<T: ReportTransport + ?Sized>(
    transport: &T,
    slot: Slot,
) -> Result<Option<Action>> {
    debug!("Reading configuration of {}", slot);
    framer::write_all(transport, &read_request(slot))?;
    let payload = framer::read_all(transport)?;
    Ok(dispatch::decode(&payload))
}

/// Stores `action` in `slot`.
pub fn write_slot<T: ReportTransport + ?Sized>(
    transport: &T,
    slot: Slot,
    action: &Action,
) -> Result<()> {
    debug!("Writing {} to {}", action, slot);
    framer::write_all(transport, &action.encode(slot))
}

/// Sends the identify request and returns the raw reply.
pub fn hello<T: ReportTransport + ?Sized>(transport: &T) -> Result<Vec<u8>> {
    framer::write_all(transport, &hello_request())?;
    framer::read_all(transport)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_request_bytes() {
        let slot = Slot::new(1).unwrap();
        assert_eq!(read_request(slot), [0x01, 0x82, 0x08, 0x02, 0, 0, 0, 0]);
    }

    #[test]
    fn test_hello_request_bytes() {
        assert_eq!(hello_request(), [0x01, 0x83, 0x08, 0, 0, 0, 0, 0]);
    }
}
