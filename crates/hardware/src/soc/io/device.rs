//! Simulated devices and their request flags.

use crate::soc::io::request::IoOperation;

/// A device that can raise I/O requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Device {
    /// Line printer.
    Printer,
    /// Disk drive.
    Disk,
}

impl Device {
    /// Every device in service priority order.
    pub const PRIORITY: [Self; 2] = [Self::Printer, Self::Disk];

    /// Operation performed when this device serves a process with no request of its own.
    pub const fn operation(self) -> IoOperation {
        match self {
            Self::Printer => IoOperation::PrintJob,
            Self::Disk => IoOperation::ReadFromDisk,
        }
    }

    /// Payload used for device-originated requests.
    pub const fn default_message(self) -> &'static str {
        match self {
            Self::Printer => "Printing document...",
            Self::Disk => "Reading data from disk...",
        }
    }
}

/// Per-device "requesting" flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceFlags {
    printer: bool,
    disk: bool,
}

impl DeviceFlags {
    fn slot(&mut self, device: Device) -> &mut bool {
        match device {
            Device::Printer => &mut self.printer,
            Device::Disk => &mut self.disk,
        }
    }

    /// Flags `device` as requesting.
    ///
    /// # Returns
    ///
    /// `true` if the flag was newly raised.
    pub fn raise(&mut self, device: Device) -> bool {
        let slot = self.slot(device);
        let raised = !*slot;
        *slot = true;
        raised
    }

    /// Returns `true` if `device` is requesting.
    pub const fn is_raised(&self, device: Device) -> bool {
        match device {
            Device::Printer => self.printer,
            Device::Disk => self.disk,
        }
    }

    /// Returns `true` if any device is requesting.
    pub const fn any(&self) -> bool {
        self.printer || self.disk
    }

    /// Clears and returns the highest-priority requesting device.
    pub fn take(&mut self) -> Option<Device> {
        let device = Device::PRIORITY.into_iter().find(|d| self.is_raised(*d))?;
        *self.slot(device) = false;
        Some(device)
    }
}
