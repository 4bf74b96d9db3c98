//! EEPROM data types and structures.

use crate::constants::*;

/// EEPROM controller parameters of a switch model.
///
/// [`Default`] gives the generic PLX layout (ctrl 0x260, data 0x264).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EepromControllerConfig {
    /// Control/status register offset.
    pub ctrl_offset: u32,
    /// Data register offset.
    pub data_offset: u32,
    /// Read command OR'ed with the masked byte address.
    pub read_cmd: u32,
    /// Mask applied to EEPROM byte addresses.
    pub addr_mask: u32,
    /// Signature byte of a valid image.
    pub signature: u8,
    /// Largest image the device can hold, in bytes.
    pub max_size: usize,
}

impl Default for EepromControllerConfig {
    fn default() -> Self {
        Self {
            ctrl_offset: DEFAULT_CTRL_OFFSET,
            data_offset: DEFAULT_DATA_OFFSET,
            read_cmd: DEFAULT_READ_CMD,
            addr_mask: DEFAULT_ADDR_MASK,
            signature: DEFAULT_SIGNATURE,
            max_size: DEFAULT_MAX_SIZE,
        }
    }
}

/// The 4-byte header at the start of every EEPROM image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EepromHeader {
    /// Signature byte (0x5A when valid).
    pub signature: u8,
    /// Reserved byte (0x00 when valid).
    pub reserved: u8,
    /// Length of the record table in bytes.
    pub payload_length: u16,
}

impl EepromHeader {
    /// Parse the header from the first four bytes of `data`.
    pub fn parse(data: &[u8]) -> Option<Self> {
        match *data {
            [signature, reserved, lo, hi, ..] => Some(Self {
                signature,
                reserved,
                payload_length: u16::from_le_bytes([lo, hi]),
            }),
            _ => None,
        }
    }

    /// Parse the header from the first EEPROM dword (little-endian).
    pub fn from_dword(dword: u32) -> Self {
        let [signature, reserved, lo, hi] = dword.to_le_bytes();
        Self {
            signature,
            reserved,
            payload_length: u16::from_le_bytes([lo, hi]),
        }
    }

    /// Whether the header marks a valid image for the given signature byte.
    #[inline]
    pub fn is_valid_for(&self, signature: u8) -> bool {
        self.signature == signature && self.reserved == 0x00
    }

    /// Whether the header marks a valid image with the standard signature.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.is_valid_for(DEFAULT_SIGNATURE)
    }
}

/// One register write from the EEPROM record table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterWriteRecord {
    /// Packed 16-bit address field as stored.
    pub raw_address: u16,
    /// Register byte offset, `(raw_address & 0x3FF) << 2`.
    pub register_offset: u32,
    /// Port number, `(raw_address >> 10) & 0x3F`.
    pub port: u32,
    /// Value written at boot.
    pub value: u32,
    /// Register name, if a register map resolved it.
    pub register_name: Option<String>,
}

impl RegisterWriteRecord {
    /// Unpack a raw address field and value. The name is left unresolved.
    pub fn new(raw_address: u16, value: u32) -> Self {
        Self {
            raw_address,
            register_offset: u32::from(raw_address & RECORD_OFFSET_MASK) << 2,
            port: u32::from((raw_address >> RECORD_PORT_SHIFT) & RECORD_PORT_MASK),
            value,
            register_name: None,
        }
    }
}

/// A decoded EEPROM image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EepromContents {
    /// Whether the header carried a valid signature.
    pub valid: bool,
    /// Signature byte (0 for an empty buffer).
    pub signature: u8,
    /// Payload length from the header (0 when shorter than a header).
    pub payload_length: u16,
    /// Decoded register writes, in table order.
    pub records: Vec<RegisterWriteRecord>,
    /// The bytes that were decoded.
    pub raw: Vec<u8>,
}

impl EepromContents {
    /// Number of decoded register writes.
    #[inline]
    pub fn num_writes(&self) -> usize {
        self.records.len()
    }
}

/// Result of probing the EEPROM header through the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EepromDetectionResult {
    /// Whether the header is valid.
    pub valid: bool,
    /// Signature byte read.
    pub signature: u8,
    /// Payload length read.
    pub payload_length: u16,
    /// Address width in bytes: 2 when valid, else 1. This is a fixed
    /// heuristic, not a probe of the EEPROM part.
    pub address_width: u8,
    /// Header plus payload length when valid, else 0.
    pub total_size: usize,
}
