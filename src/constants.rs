//! Protocol constants for PLX switch EEPROM access.
//!
//! These define the default EEPROM controller register layout used by the
//! PEX8xxx family, the command/status bits, and the on-EEPROM image format.
//! Device-specific values are carried in
//! [`EepromControllerConfig`](crate::eeprom::EepromControllerConfig).

// ---- PCI vendor IDs ----

/// PLX Technology vendor ID.
pub const PLX_VID: u16 = 0x10B5;
/// Broadcom vendor ID (PEX88xxx / PEX89xxx parts).
pub const BROADCOM_VID: u16 = 0x1000;

// ---- EEPROM controller defaults ----

/// EEPROM control/status register offset.
pub const DEFAULT_CTRL_OFFSET: u32 = 0x260;
/// EEPROM data register offset.
pub const DEFAULT_DATA_OFFSET: u32 = 0x264;
/// Read command pattern OR'ed with the EEPROM byte address.
pub const DEFAULT_READ_CMD: u32 = 0x00A0_6000;
/// Mask applied to EEPROM byte addresses (8 KiB address space).
pub const DEFAULT_ADDR_MASK: u32 = 0x1FFF;
/// Signature byte of a valid EEPROM image.
pub const DEFAULT_SIGNATURE: u8 = 0x5A;
/// Maximum EEPROM image size in bytes.
pub const DEFAULT_MAX_SIZE: usize = 8192;

// ---- Control register bits ----

/// Set by hardware while an EEPROM read is in flight.
pub const EEPROM_BUSY: u32 = 0x8000_0000;
/// Command bits of the control register (everything above the address).
pub const EEPROM_CMD_MASK: u32 = 0xFFFF_E000;

/// Number of busy-bit polls before a read is declared timed out.
pub const EEPROM_POLL_ATTEMPTS: usize = 100;

// ---- Image format ----

/// Size of the image header (signature, reserved, payload length).
pub const EEPROM_HEADER_SIZE: usize = 4;
/// Size of one register-write record (u16 address + u32 value).
pub const EEPROM_ENTRY_SIZE: usize = 6;

/// Register offset bits of a record address field (offset >> 2).
pub(crate) const RECORD_OFFSET_MASK: u16 = 0x03FF;
/// Port number shift within a record address field.
pub(crate) const RECORD_PORT_SHIFT: u16 = 10;
/// Port number bits after shifting.
pub(crate) const RECORD_PORT_MASK: u16 = 0x3F;
