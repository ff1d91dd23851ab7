//! Device discovery and the hidapi-backed report transport.

use crate::action::Action;
use crate::consts;
use crate::error::{Error, Result};
use crate::framer::{ReadStatus, Report, ReportTransport};
use crate::protocol;
use crate::slot::Slot;
use hidapi::{HidApi, HidDevice};
use log::{debug, trace};
use std::ffi::{CStr, CString};

/// Information about a discovered pedal configuration interface.
/// Can be used with `Pedal::open` to connect to a specific device.
#[derive(Debug, Clone)]
pub struct PedalDeviceInfo {
    pub vid: u16,
    pub pid: u16,
    /// The unique, platform-specific path to the HID interface. Use this for reliable opening.
    pub path: CString,
    pub serial_number: Option<String>,
    pub product_string: Option<String>,
    pub interface_number: i32,
}

/// Finds all connected pedals with the default VID/PID.
pub fn find_all(hid_api: &HidApi) -> Result<Vec<PedalDeviceInfo>> {
    find_devices(hid_api, consts::PEDAL_VID, consts::PEDAL_PID)
}

/// Finds the first connected pedal.
///
/// **Warning:** If several pedals are connected, which one is "first" is up
/// to the OS and `hidapi`. Use `find_all` and `Pedal::open` to choose.
pub fn find_first(hid_api: &HidApi) -> Result<PedalDeviceInfo> {
    find_all(hid_api)?
        .into_iter()
        .next()
        .ok_or(Error::DeviceNotFound)
}

/// Finds configuration interfaces of devices matching `vid`/`pid`.
///
/// Only the configuration interface is returned; the keyboard interface of
/// the same device is skipped.
pub fn find_devices(hid_api: &HidApi, vid: u16, pid: u16) -> Result<Vec<PedalDeviceInfo>> {
    let devices = hid_api
        .device_list()
        .filter(|info| {
            info.vendor_id() == vid
                && info.product_id() == pid
                && info.interface_number() == consts::CONFIG_INTERFACE
        })
        .map(|info| {
            debug!(
                "Found pedal: VID={:04X}, PID={:04X}, Path={:?}, Interface={}",
                info.vendor_id(),
                info.product_id(),
                info.path(),
                info.interface_number()
            );
            PedalDeviceInfo {
                vid: info.vendor_id(),
                pid: info.product_id(),
                path: info.path().to_owned(),
                serial_number: info.serial_number().map(String::from),
                product_string: info.product_string().map(String::from),
                interface_number: info.interface_number(),
            }
        })
        .collect();
    Ok(devices)
}

/// Details read from an opened pedal.
#[derive(Debug, Clone)]
pub struct PedalDetails {
    pub vendor_id: u16,
    pub product_id: u16,
    pub serial_number: Option<String>,
    pub product_string: Option<String>,
    pub manufacturer_string: Option<String>,
}

/// A claimed pedal configuration interface.
///
/// Opening the handle claims the interface. With hidapi's libusb backend
/// this detaches the kernel driver, which is reattached when the handle is
/// dropped; the hidraw backend shares the interface with the kernel and
/// needs no detaching. Either way the claim lasts exactly as long as this
/// value, so early returns and `?` release it too.
/// **Note:** This handle is not thread-safe (`!Sync`).
#[derive(Debug)]
pub struct Pedal {
    device: HidDevice,
    info: PedalDetails,
}

impl Pedal {
    /// Opens a pedal using its discovery info. Recommended method.
    pub fn open(hid_api: &HidApi, info: &PedalDeviceInfo) -> Result<Self> {
        let device = hid_api.open_path(&info.path)?;
        Self::from_hid_device(device, info.vid, info.pid)
    }

    /// Opens the first discovered pedal. **Warning:** Ambiguous if multiple pedals exist.
    pub fn open_first(hid_api: &HidApi) -> Result<Self> {
        let info = find_first(hid_api)?;
        Self::open(hid_api, &info)
    }

    /// Opens a pedal by its platform-specific path.
    pub fn open_by_path(hid_api: &HidApi, path: &CStr) -> Result<Self> {
        let device = hid_api.open_path(path)?;
        let hid_info = device.get_device_info()?;
        Self::from_hid_device(device, hid_info.vendor_id(), hid_info.product_id())
    }

    /// Opens the pedal with the given serial number.
    pub fn open_by_serial(hid_api: &HidApi, serial: &str) -> Result<Self> {
        let info = find_all(hid_api)?
            .into_iter()
            .find(|info| info.serial_number.as_deref() == Some(serial))
            .ok_or_else(|| Error::DeviceNotFoundBySerial {
                serial: serial.to_string(),
            })?;
        Self::open(hid_api, &info)
    }

    fn from_hid_device(device: HidDevice, vid: u16, pid: u16) -> Result<Self> {
        debug!("Opened pedal: VID={:04X}, PID={:04X}", vid, pid);
        let manufacturer_string = device.get_manufacturer_string()?;
        let product_string = device.get_product_string()?;
        let serial_number = device.get_serial_number_string()?;
        let info = PedalDetails {
            vendor_id: vid,
            product_id: pid,
            serial_number,
            product_string,
            manufacturer_string,
        };
        trace!("Device Info: {:?}", info);
        Ok(Pedal { device, info })
    }

    /// Gets basic information about the opened pedal.
    pub fn get_device_info(&self) -> &PedalDetails {
        &self.info
    }

    /// Reads the action stored in `slot`. `Ok(None)` means no action is configured.
    pub fn get_switch_config(&self, slot: Slot) -> Result<Option<Action>> {
        protocol::read_slot(self, slot)
    }

    /// Stores `action` in `slot`.
    pub fn set_switch_config(&self, slot: Slot, action: &Action) -> Result<()> {
        protocol::write_slot(self, slot, action)
    }

    /// Sends the identify request and returns the raw reply.
    pub fn hello(&self) -> Result<Vec<u8>> {
        protocol::hello(self)
    }
}

impl ReportTransport for Pedal {
    fn write_report(&self, report: &Report) -> Result<()> {
        // hidapi expects the report ID first; this device uses none.
        let mut buf = [0u8; consts::REPORT_SIZE + 1];
        buf[1..].copy_from_slice(report);
        let written = self.device.write(&buf)?;
        if written < buf.len() {
            return Err(Error::ShortWrite {
                expected: buf.len(),
                actual: written,
            });
        }
        Ok(())
    }

    fn read_report(&self, buf: &mut Report, timeout_ms: i32) -> Result<ReadStatus> {
        match self.device.read_timeout(buf, timeout_ms)? {
            0 => Ok(ReadStatus::TimedOut),
            n => Ok(ReadStatus::Data(n)),
        }
    }
}

impl Drop for Pedal {
    fn drop(&mut self) {
        debug!(
            "Releasing pedal: VID={:04X}, PID={:04X}",
            self.info.vendor_id, self.info.product_id
        );
    }
}
