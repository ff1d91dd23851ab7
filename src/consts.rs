//! Device identity, wire bytes, and protocol limits.

// Default Vendor/Product IDs
/// USB vendor ID of the foot switch.
pub const PEDAL_VID: u16 = 0x413D;
/// USB product ID of the foot switch.
pub const PEDAL_PID: u16 = 0x2107;

/// HID interface carrying the configuration reports.
/// Interface 0 is the keyboard the pedal presents to the OS.
pub const CONFIG_INTERFACE: i32 = 1;

/// Every transfer in either direction is exactly one report of this size.
pub const REPORT_SIZE: usize = 8;

/// A read that produces nothing within this window ends the message.
pub const READ_TIMEOUT_MS: i32 = 100;

/// Number of physical switches (slots 0..=2).
pub const SLOT_COUNT: u8 = 3;

/// Largest chord the device accepts, same as a boot keyboard report.
pub const MAX_COMBINATION_KEYS: usize = 6;

// --- Command reports (host -> device) ---
pub mod cmd {
    /// First byte of every command report.
    pub const PREFIX: u8 = 0x01;
    /// Announces an upcoming slot configuration.
    pub const WRITE_SLOT: u8 = 0x81;
    /// Requests the stored configuration of a slot.
    pub const READ_SLOT: u8 = 0x82;
    /// Identify request.
    pub const HELLO: u8 = 0x83;
}

// --- Payload markers (byte 1 of a stored action) ---
pub mod kind {
    pub const SHORT_PRESS: u8 = 0x81;
    pub const LONG_PRESS: u8 = 0x03;
    pub const COMBINATION: u8 = 0x06;
    pub const TYPED_STRING: u8 = 0x04;
}

/// Declared length of a single-key payload.
pub const SINGLE_KEY_LENGTH: u8 = 0x08;

// --- Letter ranges in typed strings ---
/// Code of `a`; `b`..`z` follow consecutively.
pub const LOWERCASE_BASE: u8 = 0x04;
/// Code of `A`; the shifted bank sits 128 above the lowercase one.
pub const UPPERCASE_BASE: u8 = LOWERCASE_BASE + 128;
/// Letters per bank.
pub const ALPHABET_LEN: u8 = 26;
