//! Type definitions shared across the register and EEPROM models.

use std::fmt;
use std::str::FromStr;

use crate::eeprom::EepromControllerConfig;
use crate::error::Error;
use crate::registers::RegisterMap;

/// Register access mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Access {
    /// Read-only.
    #[default]
    Ro,
    /// Read-write.
    Rw,
    /// Write-only.
    Wo,
}

impl Access {
    /// Whether the register may be read.
    #[inline]
    pub fn is_readable(self) -> bool {
        matches!(self, Self::Ro | Self::Rw)
    }

    /// Whether the register may be written.
    #[inline]
    pub fn is_writable(self) -> bool {
        matches!(self, Self::Rw | Self::Wo)
    }

    /// Short lowercase name as used in device definitions.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ro => "ro",
            Self::Rw => "rw",
            Self::Wo => "wo",
        }
    }
}

impl FromStr for Access {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ro" => Ok(Self::Ro),
            "rw" => Ok(Self::Rw),
            "wo" => Ok(Self::Wo),
            _ => Err(Error::InvalidAccess(s.to_owned())),
        }
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identification and capabilities of a switch model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    /// PCI vendor ID.
    pub vendor_id: u16,
    /// PCI device ID.
    pub device_id: u16,
    /// Part name, e.g. `PEX8733`.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Number of ports.
    pub ports: u8,
    /// Number of PCIe lanes.
    pub lanes: u8,
    /// PCIe generation.
    pub pcie_gen: u8,
}

/// Everything known about one switch model: identity, registers, and
/// EEPROM controller layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDefinition {
    /// Identification and capabilities.
    pub info: DeviceInfo,
    /// Register definitions, used to name decoded EEPROM records.
    pub registers: RegisterMap,
    /// EEPROM controller parameters.
    pub eeprom: EepromControllerConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_parse() {
        assert_eq!("ro".parse::<Access>().unwrap(), Access::Ro);
        assert_eq!("RW".parse::<Access>().unwrap(), Access::Rw);
        assert_eq!("wo".parse::<Access>().unwrap(), Access::Wo);
        assert!(matches!("rx".parse::<Access>(), Err(Error::InvalidAccess(s)) if s == "rx"));
    }

    #[test]
    fn access_capabilities() {
        assert!(Access::Ro.is_readable() && !Access::Ro.is_writable());
        assert!(Access::Rw.is_readable() && Access::Rw.is_writable());
        assert!(!Access::Wo.is_readable() && Access::Wo.is_writable());
        assert_eq!(Access::Rw.to_string(), "rw");
    }
}
