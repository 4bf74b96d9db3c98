//! In-memory register backends.
//!
//! [`MockBackend`] is a plain register file that records every access.
//! [`MockEepromBackend`] additionally answers the EEPROM controller
//! protocol from a simulated EEPROM image, completing every read instantly.

use std::collections::HashMap;

use crate::constants::*;
use crate::error::{Error, Result};

use super::RegisterAccess;

/// A register file with access logging.
///
/// Unset registers read as zero. Every access through [`RegisterAccess`]
/// is appended to `read_log` / `write_log`.
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    registers: HashMap<u32, u32>,
    /// Offsets of every `read32`, in order.
    pub read_log: Vec<u32>,
    /// `(offset, value)` of every `write32`, in order.
    pub write_log: Vec<(u32, u32)>,
}

impl MockBackend {
    /// An empty register file.
    pub fn new() -> Self {
        Self::default()
    }

    /// A register file pre-populated with `(offset, value)` pairs.
    pub fn with_registers<I>(registers: I) -> Self
    where
        I: IntoIterator<Item = (u32, u32)>,
    {
        Self {
            registers: registers.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Clear the read and write logs.
    pub fn reset_logs(&mut self) {
        self.read_log.clear();
        self.write_log.clear();
    }

    /// Set a register without logging.
    pub fn set_register(&mut self, offset: u32, value: u32) -> Result<()> {
        check_aligned(offset)?;
        self.registers.insert(offset, value);
        Ok(())
    }

    /// Get a register without logging.
    pub fn register(&self, offset: u32) -> Result<u32> {
        check_aligned(offset)?;
        Ok(self.registers.get(&offset).copied().unwrap_or(0))
    }
}

impl RegisterAccess for MockBackend {
    fn read32(&mut self, offset: u32) -> Result<u32> {
        check_aligned(offset)?;
        self.read_log.push(offset);
        Ok(self.registers.get(&offset).copied().unwrap_or(0))
    }

    fn write32(&mut self, offset: u32, value: u32) -> Result<()> {
        check_aligned(offset)?;
        self.write_log.push((offset, value));
        self.registers.insert(offset, value);
        Ok(())
    }
}

fn check_aligned(offset: u32) -> Result<()> {
    if offset % 4 != 0 {
        return Err(Error::UnalignedOffset(offset));
    }
    Ok(())
}

/// A [`MockBackend`] that simulates the EEPROM controller at the default
/// ctrl/data offsets.
///
/// Writing a read command to ctrl latches the address; the next data read
/// returns the four image bytes at that address, little-endian, with bytes
/// past the end of the image reading as zero. Ctrl never reports busy.
#[derive(Debug, Clone)]
pub struct MockEepromBackend {
    inner: MockBackend,
    eeprom: Vec<u8>,
    pending_addr: Option<u32>,
}

impl Default for MockEepromBackend {
    fn default() -> Self {
        Self::new(&[0u8; DEFAULT_MAX_SIZE])
    }
}

impl MockEepromBackend {
    /// Simulate an EEPROM holding `image`.
    pub fn new(image: &[u8]) -> Self {
        Self {
            inner: MockBackend::new(),
            eeprom: image.to_vec(),
            pending_addr: None,
        }
    }

    /// The underlying register file and its access logs.
    pub fn backend(&self) -> &MockBackend {
        &self.inner
    }

    /// Mutable access to the underlying register file.
    pub fn backend_mut(&mut self) -> &mut MockBackend {
        &mut self.inner
    }

    /// The simulated EEPROM image.
    pub fn eeprom(&self) -> &[u8] {
        &self.eeprom
    }

    /// Number of completed EEPROM dword transactions (data register reads).
    pub fn dword_reads(&self) -> usize {
        self.inner
            .read_log
            .iter()
            .filter(|&&o| o == DEFAULT_DATA_OFFSET)
            .count()
    }

    /// Overwrite one byte of the image.
    pub fn set_eeprom_byte(&mut self, addr: usize, value: u8) -> Result<()> {
        let slot = self
            .eeprom
            .get_mut(addr)
            .ok_or(Error::InvalidArgument("EEPROM address out of range"))?;
        *slot = value;
        Ok(())
    }

    /// Overwrite a range of the image starting at `start`.
    pub fn set_eeprom_data(&mut self, data: &[u8], start: usize) -> Result<()> {
        let end = start
            .checked_add(data.len())
            .filter(|&end| end <= self.eeprom.len())
            .ok_or(Error::InvalidArgument("EEPROM range out of bounds"))?;
        self.eeprom[start..end].copy_from_slice(data);
        Ok(())
    }

    fn image_dword(&self, addr: u32) -> u32 {
        let mut bytes = [0u8; 4];
        for (i, b) in bytes.iter_mut().enumerate() {
            if let Some(&v) = self.eeprom.get(addr as usize + i) {
                *b = v;
            }
        }
        u32::from_le_bytes(bytes)
    }
}

impl RegisterAccess for MockEepromBackend {
    fn read32(&mut self, offset: u32) -> Result<u32> {
        if offset == DEFAULT_DATA_OFFSET {
            if let Some(addr) = self.pending_addr.take() {
                check_aligned(offset)?;
                self.inner.read_log.push(offset);
                return Ok(self.image_dword(addr));
            }
        }
        if offset == DEFAULT_CTRL_OFFSET {
            return Ok(self.inner.read32(offset)? & !EEPROM_BUSY);
        }
        self.inner.read32(offset)
    }

    fn write32(&mut self, offset: u32, value: u32) -> Result<()> {
        self.inner.write32(offset, value)?;
        if offset == DEFAULT_CTRL_OFFSET
            && value & EEPROM_CMD_MASK == DEFAULT_READ_CMD & EEPROM_CMD_MASK
        {
            self.pending_addr = Some(value & DEFAULT_ADDR_MASK);
        }
        Ok(())
    }
}
