//! # cupidfoot
//!
//! A Rust crate for reading and programming the three switches of a USB
//! foot pedal (VID `0x413D`, PID `0x2107`) via its HID configuration
//! interface.
//!
//! This crate uses the `hidapi` crate for cross-platform USB HID communication.
//!
//! ## Features
//!
//! *   Device discovery (`find_all`, `find_first`, `find_devices`).
//! *   Device opening (`Pedal::open`, `Pedal::open_first`, `Pedal::open_by_path`,
//!     `Pedal::open_by_serial`).
//! *   Four action shapes a pedal can be programmed with:
//!     *   Short press of one key with modifiers.
//!     *   Long press (key held while the pedal is held).
//!     *   Combination of up to six keys with modifiers.
//!     *   Typed string of letters, digits, and a few punctuation marks.
//! *   Reading the current action of a slot (`Pedal::get_switch_config`).
//! *   Writing an action to a slot (`Pedal::set_switch_config`).
//! *   Key-spec parsing (`ctrl+shift+F5`) in [`keyspec`].
//! *   Transport-independent framing and protocol code ([`framer`],
//!     [`protocol`]) that runs against any [`ReportTransport`].
//!
//! ## Protocol Notes
//!
//! *   Every transfer is an 8-byte report. Multi-report messages are written
//!     back to back.
//! *   Replies carry no transport-level length. The host reads until a read
//!     times out (100 ms) and treats everything received as one message.
//! *   Replies carry no reliable variant tag either. [`dispatch::decode`] tries
//!     each variant in [`dispatch::DECODE_ORDER`]. The single-key rule
//!     accepts any payload that declares length 8, so a long-press slot reads
//!     back as a short press. See [`action`] for the byte layouts.
//!
//! ## Basic Usage
//!
//! ```no_run
//! use cupidfoot::{Action, KeyCode, KeyPress, Modifiers, Pedal, Result, Slot};
//! use hidapi::HidApi;
//!
//! fn main() -> Result<()> {
//!     // Optional: Initialize logging
//!     // env_logger::init();
//!
//!     let hid_api = HidApi::new()?;
//!     let pedal = Pedal::open_first(&hid_api)?;
//!
//!     // Left pedal sends Ctrl+A.
//!     let slot = Slot::from_pedal(1)?;
//!     let key = KeyCode::from_name("A").expect("A is a known key");
//!     pedal.set_switch_config(slot, &Action::ShortPress(KeyPress::new(key, Modifiers::CTRL)))?;
//!
//!     match pedal.get_switch_config(slot)? {
//!         Some(action) => println!("{}: {}", slot, action),
//!         None => println!("{}: no action configured", slot),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Hardware Setup Notes
//!
//! *   **Linux udev Rules:** Grant user permission to the HID interfaces. Create `/etc/udev/rules.d/99-cupidfoot.rules`:
//!     ```udev
//!     SUBSYSTEM=="hidraw", ATTRS{idVendor}=="413d", ATTRS{idProduct}=="2107", MODE="0666", GROUP="plugdev"
//!     SUBSYSTEM=="usb", ATTRS{idVendor}=="413d", ATTRS{idProduct}=="2107", MODE="0666", GROUP="plugdev"
//!     ```
//!     *(Adjust `GROUP` if needed)*. Reload: `sudo udevadm control --reload-rules && sudo udevadm trigger`
//!
//! ## License
//!
//! This project is licensed under the WTFPL.

pub mod action;
mod consts;
pub mod device;
pub mod dispatch;
mod error;
pub mod framer;
pub mod keycode;
pub mod keyspec;
pub mod protocol;
mod slot;

pub use action::{Action, Combination, KeyPress, TypedString, Variant};
pub use device::{find_all, find_devices, find_first, Pedal, PedalDetails, PedalDeviceInfo};
pub use error::{Error, Result};
pub use framer::{ReadStatus, Report, ReportTransport};
pub use keycode::{KeyCode, Modifiers};
pub use slot::Slot;
// Re-export only essential public constants
pub use consts::{
    CONFIG_INTERFACE, LOWERCASE_BASE, MAX_COMBINATION_KEYS, PEDAL_PID, PEDAL_VID, READ_TIMEOUT_MS,
    REPORT_SIZE, SLOT_COUNT, UPPERCASE_BASE,
};
