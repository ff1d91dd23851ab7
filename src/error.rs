use thiserror::Error;

/// Errors that can occur while configuring a foot switch.
///
/// Covers transport faults reported by the HID layer as well as actions that
/// cannot be represented on the wire. A read timeout is not an error: it is
/// how the device signals the end of a message.
#[derive(Error, Debug)]
pub enum Error {
    /// Error from the underlying HID API layer.
    #[error("HID API error: {0}")]
    Hid(#[from] hidapi::HidError),
    /// No pedal was found with the expected vendor/product ID.
    #[error("Device not found with specified VID/PID")]
    DeviceNotFound,
    /// No pedal was found with the specified serial number.
    #[error("Device not found with serial number '{serial}'")]
    DeviceNotFoundBySerial {
        /// The serial number that was searched for.
        serial: String,
    },
    /// The device accepted only part of a report.
    #[error("Short write to device (expected {expected} bytes, wrote {actual})")]
    ShortWrite {
        /// Bytes handed to the transport, including the report ID.
        expected: usize,
        /// Bytes the transport reported as written.
        actual: usize,
    },
    /// Slot index is outside the range of physical switches.
    #[error("Slot {slot} out of range (0-2)")]
    SlotOutOfRange {
        /// The rejected slot index.
        slot: u8,
    },
    /// A key combination holds more keys than the device can store.
    #[error("Combination has too many keys (max {max}, got {actual})")]
    TooManyKeys {
        /// Maximum allowed number of keys.
        max: usize,
        /// Number of keys requested.
        actual: usize,
    },
    /// A typed string is longer than its one-byte length field allows.
    #[error("String too long (max {max} characters, got {actual})")]
    StringTooLong {
        /// Maximum number of characters.
        max: usize,
        /// Number of characters requested.
        actual: usize,
    },
    /// A typed string contains a character with no key code.
    #[error("Character {0:?} cannot be typed by the device")]
    UnencodableChar(char),
    /// A key name is not in the key table.
    #[error("Unknown key name '{0}'")]
    UnknownKeyName(String),
    /// A key spec such as `ctrl+a` is malformed.
    #[error("Invalid key spec: {0}")]
    InvalidKeySpec(String),
}

/// Result type alias for foot switch operations.
pub type Result<T> = std::result::Result<T, Error>;
