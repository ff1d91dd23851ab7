//! Splitting payloads into reports and reassembling replies.
//!
//! The transport moves fixed 8-byte reports. A message written to the device
//! is a sequence of reports sent back to back. A reply has no length prefix
//! at this level: the host keeps reading until one read produces nothing
//! within [`READ_TIMEOUT_MS`](crate::READ_TIMEOUT_MS).

use crate::consts::{READ_TIMEOUT_MS, REPORT_SIZE};
use crate::error::Result;
use log::{debug, trace};

/// One transport transfer.
pub type Report = [u8; REPORT_SIZE];

/// Outcome of a single report read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadStatus {
    /// The device returned this many bytes into the buffer.
    Data(usize),
    /// Nothing arrived before the timeout.
    TimedOut,
}

/// A pipe that moves single reports to and from the device.
///
/// Implemented by [`Pedal`](crate::Pedal) over hidapi. Any other
/// implementation (a recording or scripted transport) can drive the same
/// framing and protocol code.
pub trait ReportTransport {
    /// Sends one report.
    fn write_report(&self, report: &Report) -> Result<()>;

    /// Waits up to `timeout_ms` for one report.
    fn read_report(&self, buf: &mut Report, timeout_ms: i32) -> Result<ReadStatus>;
}

/// Zero-pads `buf` up to the next whole report.
pub fn pad_to_report(buf: &mut Vec<u8>) {
    let rem = buf.len() % REPORT_SIZE;
    if rem != 0 {
        buf.resize(buf.len() + REPORT_SIZE - rem, 0);
    }
}

/// Splits a payload into consecutive reports.
/// A trailing partial report is zero-padded.
pub fn chunk(payload: &[u8]) -> impl Iterator<Item = Report> + '_ {
    payload.chunks(REPORT_SIZE).map(|part| {
        let mut report = [0u8; REPORT_SIZE];
        report[..part.len()].copy_from_slice(part);
        report
    })
}

/// Writes a payload as a sequence of reports, in order.
pub fn write_all<T: ReportTransport + ?Sized>(transport: &T, payload: &[u8]) -> Result<()> {
    debug!(
        "Writing {} byte message ({} reports)",
        payload.len(),
        payload.len().div_ceil(REPORT_SIZE)
    );
    for report in chunk(payload) {
        trace!("Writing report: {:02X?}", &report[..]);
        transport.write_report(&report)?;
    }
    Ok(())
}

/// Reads reports until one read times out and returns everything received.
///
/// An immediate timeout yields an empty payload. Transport faults other than
/// the timeout abort the read and are returned as-is.
pub fn read_all<T: ReportTransport + ?Sized>(transport: &T) -> Result<Vec<u8>> {
    let mut payload = Vec::new();
    let mut buf = [0u8; REPORT_SIZE];
    loop {
        match transport.read_report(&mut buf, READ_TIMEOUT_MS)? {
            ReadStatus::Data(n) => {
                let n = n.min(REPORT_SIZE);
                trace!("Read report ({} bytes): {:02X?}", n, &buf[..n]);
                payload.extend_from_slice(&buf[..n]);
            }
            ReadStatus::TimedOut => {
                debug!("Read {} byte message", payload.len());
                return Ok(payload);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_to_report() {
        let mut buf = vec![1, 2, 3];
        pad_to_report(&mut buf);
        assert_eq!(buf, vec![1, 2, 3, 0, 0, 0, 0, 0]);

        let mut full = vec![7u8; 16];
        pad_to_report(&mut full);
        assert_eq!(full.len(), 16);

        let mut empty = Vec::new();
        pad_to_report(&mut empty);
        assert!(empty.is_empty());
    }

    #[test]
    fn test_chunk_splits_in_order() {
        let payload: Vec<u8> = (0..16).collect();
        let reports: Vec<Report> = chunk(&payload).collect();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0], [0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(reports[1], [8, 9, 10, 11, 12, 13, 14, 15]);
    }

    #[test]
    fn test_chunk_pads_tail() {
        let reports: Vec<Report> = chunk(&[0xAA; 9]).collect();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[1], [0xAA, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(chunk(&[]).count(), 0);
    }
}
