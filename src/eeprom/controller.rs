//! Reading the EEPROM through the switch's EEPROM controller registers.
//!
//! The switch exposes two registers: ctrl and data. A read is started by
//! writing `read_cmd | addr` to ctrl, waiting for the busy bit (bit 31) to
//! clear, then reading the addressed dword from data. Each transaction
//! costs at least three register accesses, so [`EepromController::read_bytes`]
//! uses whole dwords wherever alignment allows.

use std::path::Path;
use std::thread;
use std::time::Duration;

use crate::backend::RegisterAccess;
use crate::constants::*;
use crate::error::{Error, Result};
use crate::types::DeviceDefinition;

use super::types::{EepromControllerConfig, EepromDetectionResult, EepromHeader};

/// Default sleep between busy-bit polls.
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Drives the EEPROM read protocol over a register transport.
///
/// The controller owns (or exclusively borrows, via `&mut T`) its
/// transport for the duration of a read session.
#[derive(Debug)]
pub struct EepromController<T> {
    backend: T,
    config: EepromControllerConfig,
    poll_interval: Duration,
}

impl<T: RegisterAccess> EepromController<T> {
    /// A controller using the generic PLX register layout.
    pub fn new(backend: T) -> Self {
        Self::with_config(backend, EepromControllerConfig::default())
    }

    /// A controller using an explicit register layout.
    pub fn with_config(backend: T, config: EepromControllerConfig) -> Self {
        Self {
            backend,
            config,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// A controller using the layout of a known switch model.
    pub fn for_device(backend: T, device: &DeviceDefinition) -> Self {
        Self::with_config(backend, device.eeprom)
    }

    /// Override the sleep between busy-bit polls. The poll count is fixed.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &EepromControllerConfig {
        &self.config
    }

    /// Get a reference to the transport.
    pub fn backend(&self) -> &T {
        &self.backend
    }

    /// Get a mutable reference to the transport.
    pub fn backend_mut(&mut self) -> &mut T {
        &mut self.backend
    }

    /// Release the transport.
    pub fn into_inner(self) -> T {
        self.backend
    }

    /// Read the 32-bit EEPROM word at byte address `addr`.
    ///
    /// The address is masked with `addr_mask`. Fails with
    /// [`Error::Timeout`] if the busy bit is still set after
    /// [`EEPROM_POLL_ATTEMPTS`] polls. Transport errors are returned as-is.
    pub fn read_dword(&mut self, addr: u32) -> Result<u32> {
        let addr = addr & self.config.addr_mask;
        let cmd = self.config.read_cmd | addr;
        self.backend.write32(self.config.ctrl_offset, cmd)?;

        let mut done = false;
        for _ in 0..EEPROM_POLL_ATTEMPTS {
            let status = self.backend.read32(self.config.ctrl_offset)?;
            if status & EEPROM_BUSY == 0 {
                done = true;
                break;
            }
            thread::sleep(self.poll_interval);
        }
        if !done {
            log::warn!("EEPROM controller stuck busy at address {addr:#06x}");
            return Err(Error::Timeout { addr });
        }

        let dword = self.backend.read32(self.config.data_offset)?;
        log::trace!("EEPROM[{addr:#06x}] = {dword:#010x}");
        Ok(dword)
    }

    /// Read one byte from the containing dword.
    pub fn read_byte(&mut self, addr: u32) -> Result<u8> {
        let dword = self.read_dword(addr & !0x3)?;
        Ok(dword.to_le_bytes()[(addr & 0x3) as usize])
    }

    /// Read a little-endian 16-bit word as two byte reads.
    pub fn read_word16(&mut self, addr: u32) -> Result<u16> {
        let low = self.read_byte(addr)?;
        let high = self.read_byte(addr.wrapping_add(1))?;
        Ok(u16::from_le_bytes([low, high]))
    }

    /// Read `length` bytes starting at `addr`.
    ///
    /// Aligned positions with at least four bytes left are read as one
    /// dword; everything else falls back to [`read_byte`](Self::read_byte).
    /// Any failed transaction aborts the whole read.
    pub fn read_bytes(&mut self, addr: u32, length: usize) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(length);
        while buf.len() < length {
            let current = addr.wrapping_add(buf.len() as u32);
            if current & 0x3 == 0 && length - buf.len() >= 4 {
                let dword = self.read_dword(current)?;
                buf.extend_from_slice(&dword.to_le_bytes());
            } else {
                buf.push(self.read_byte(current)?);
            }
        }
        Ok(buf)
    }

    /// Probe the image header at address 0.
    pub fn detect(&mut self) -> Result<EepromDetectionResult> {
        let header = EepromHeader::from_dword(self.read_dword(0)?);
        let valid = header.is_valid_for(self.config.signature);

        let result = EepromDetectionResult {
            valid,
            signature: header.signature,
            payload_length: header.payload_length,
            address_width: if valid { 2 } else { 1 },
            total_size: if valid {
                EEPROM_HEADER_SIZE + header.payload_length as usize
            } else {
                0
            },
        };
        log::debug!(
            "EEPROM detect: valid={} signature={:#04x} payload_length={}",
            result.valid,
            result.signature,
            result.payload_length
        );
        Ok(result)
    }

    /// Read the whole image.
    ///
    /// A valid image is read up to its header-declared size, capped at
    /// `max_size` (or the configured maximum). An invalid or blank EEPROM
    /// is read up to the cap so its raw contents can still be inspected.
    pub fn read_all(&mut self, max_size: Option<usize>) -> Result<Vec<u8>> {
        let max_size = max_size.unwrap_or(self.config.max_size);
        let info = self.detect()?;

        let size = if info.valid && info.total_size > 0 {
            info.total_size.min(max_size)
        } else {
            max_size
        };
        log::debug!("reading {size} EEPROM bytes");
        self.read_bytes(0, size)
    }

    /// Read the whole image and write it to `path`.
    ///
    /// Returns the number of bytes written.
    pub fn dump_to_file<P: AsRef<Path>>(
        &mut self,
        path: P,
        max_size: Option<usize>,
    ) -> Result<usize> {
        let data = self.read_all(max_size)?;
        std::fs::write(path, &data)?;
        Ok(data.len())
    }
}

/// Read the whole EEPROM image from `backend`.
///
/// Uses `config` when given, the generic PLX layout otherwise.
pub fn read_eeprom<T: RegisterAccess>(
    backend: T,
    config: Option<&EepromControllerConfig>,
) -> Result<Vec<u8>> {
    let config = config.copied().unwrap_or_default();
    EepromController::with_config(backend, config).read_all(None)
}
