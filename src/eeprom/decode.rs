//! EEPROM decoding: parse a binary EEPROM image into [`EepromContents`].
//!
//! Image layout:
//!
//! | Offset | Size | Field                               |
//! |--------|------|-------------------------------------|
//! | 0      | 1    | signature (0x5A)                    |
//! | 1      | 1    | reserved (0x00)                     |
//! | 2      | 2    | payload length, LE                  |
//! | 4      | 6·n  | records: u16 address LE, u32 value LE |
//!
//! Record address: `(register_offset >> 2) | (port << 10)`.
//!
//! Decoding is best-effort and never fails: a bad header yields
//! `valid == false`, and a record table running past the end of the buffer
//! is cut short. A payload length that is not a multiple of six drops the
//! trailing bytes.

use std::path::Path;

use crate::constants::*;
use crate::error::Result;
use crate::registers::RegisterMap;

use super::types::{EepromContents, EepromHeader, RegisterWriteRecord};

/// Decoder for PLX EEPROM images, optionally naming records from a
/// register map.
///
/// Holds no mutable state; one decoder can be shared across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct EepromDecoder<'a> {
    registers: Option<&'a RegisterMap>,
}

impl<'a> EepromDecoder<'a> {
    /// A decoder that leaves record names unresolved.
    pub fn new() -> Self {
        Self { registers: None }
    }

    /// A decoder that names records from `registers`.
    pub fn with_registers(registers: &'a RegisterMap) -> Self {
        Self {
            registers: Some(registers),
        }
    }

    /// Decode a raw EEPROM image.
    pub fn decode(&self, data: &[u8]) -> EepromContents {
        let Some(header) = EepromHeader::parse(data) else {
            log::debug!("EEPROM image too short for a header ({} bytes)", data.len());
            return EepromContents {
                valid: false,
                signature: data.first().copied().unwrap_or(0),
                payload_length: 0,
                records: Vec::new(),
                raw: data.to_vec(),
            };
        };

        if !header.is_valid() {
            log::debug!(
                "invalid EEPROM header: signature={:#04x} reserved={:#04x}",
                header.signature,
                header.reserved
            );
            return EepromContents {
                valid: false,
                signature: header.signature,
                payload_length: header.payload_length,
                records: Vec::new(),
                raw: data.to_vec(),
            };
        }

        let num_entries = header.payload_length as usize / EEPROM_ENTRY_SIZE;
        let mut records = Vec::with_capacity(num_entries);
        for i in 0..num_entries {
            let offset = EEPROM_HEADER_SIZE + i * EEPROM_ENTRY_SIZE;
            let Some(entry) = data.get(offset..offset + EEPROM_ENTRY_SIZE) else {
                log::warn!(
                    "EEPROM record table truncated: {} of {} records present",
                    i,
                    num_entries
                );
                break;
            };

            let raw_address = u16::from_le_bytes([entry[0], entry[1]]);
            let value = u32::from_le_bytes([entry[2], entry[3], entry[4], entry[5]]);
            let mut record = RegisterWriteRecord::new(raw_address, value);
            record.register_name = self.resolve_name(record.register_offset, record.port);
            records.push(record);
        }

        log::debug!(
            "decoded EEPROM: payload_length={} records={}",
            header.payload_length,
            records.len()
        );
        EepromContents {
            valid: true,
            signature: header.signature,
            payload_length: header.payload_length,
            records,
            raw: data.to_vec(),
        }
    }

    /// Read a file and decode its contents.
    pub fn decode_file<P: AsRef<Path>>(&self, path: P) -> Result<EepromContents> {
        let data = std::fs::read(path)?;
        Ok(self.decode(&data))
    }

    /// Name the register a record targets. First match wins.
    fn resolve_name(&self, offset: u32, port: u32) -> Option<String> {
        self.registers?.iter().find_map(|reg| {
            if reg.per_port {
                (reg.port_offset(port) == offset).then(|| format!("{}[port{}]", reg.name, port))
            } else {
                (reg.offset == offset).then(|| reg.name.clone())
            }
        })
    }
}

/// Decode a raw EEPROM image, naming records from `registers` if given.
pub fn decode_eeprom(data: &[u8], registers: Option<&RegisterMap>) -> EepromContents {
    EepromDecoder { registers }.decode(data)
}

/// Read and decode an EEPROM image file.
pub fn decode_eeprom_file<P: AsRef<Path>>(
    path: P,
    registers: Option<&RegisterMap>,
) -> Result<EepromContents> {
    EepromDecoder { registers }.decode_file(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registers::RegisterDefinition;

    fn image(records: &[(u16, u32)]) -> Vec<u8> {
        let payload_len = (records.len() * EEPROM_ENTRY_SIZE) as u16;
        let mut buf = vec![0x5A, 0x00];
        buf.extend_from_slice(&payload_len.to_le_bytes());
        for &(addr, value) in records {
            buf.extend_from_slice(&addr.to_le_bytes());
            buf.extend_from_slice(&value.to_le_bytes());
        }
        buf
    }

    fn registers() -> RegisterMap {
        RegisterMap::from_registers([
            RegisterDefinition::new("command_status", 0x004),
            RegisterDefinition::new("link_ctrl", 0x078).per_port(0x1000),
            RegisterDefinition::new("scratch", 0x100),
            RegisterDefinition::new("port_scratch", 0x100).per_port(0x4),
        ])
        .unwrap()
    }

    #[test]
    fn single_record_image() {
        let data = [0x5A, 0x00, 0x06, 0x00, 0x40, 0x00, 0x78, 0x56, 0x34, 0x12];
        let c = EepromDecoder::new().decode(&data);
        assert!(c.valid);
        assert_eq!(c.signature, 0x5A);
        assert_eq!(c.payload_length, 6);
        assert_eq!(c.num_writes(), 1);
        assert_eq!(
            c.records[0],
            RegisterWriteRecord {
                raw_address: 0x0040,
                register_offset: 0x100,
                port: 0,
                value: 0x1234_5678,
                register_name: None,
            }
        );
        assert_eq!(c.raw, data);
    }

    #[test]
    fn empty_buffer() {
        let c = decode_eeprom(b"", None);
        assert!(!c.valid);
        assert_eq!(c.signature, 0);
        assert_eq!(c.payload_length, 0);
        assert!(c.records.is_empty());
    }

    #[test]
    fn shorter_than_header_keeps_first_byte() {
        let c = decode_eeprom(&[0x5A, 0x00, 0x06], None);
        assert!(!c.valid);
        assert_eq!(c.signature, 0x5A);
        assert_eq!(c.payload_length, 0);
        assert_eq!(c.raw, [0x5A, 0x00, 0x06]);
    }

    #[test]
    fn invalid_signature_keeps_header_fields() {
        let c = decode_eeprom(&[0xFF, 0x00, 0x00, 0x00], None);
        assert!(!c.valid);
        assert_eq!(c.signature, 0xFF);

        let c = decode_eeprom(&[0x5A, 0x01, 0x0C, 0x00, 0, 0, 0, 0, 0, 0], None);
        assert!(!c.valid);
        assert_eq!(c.payload_length, 12);
        assert_eq!(c.num_writes(), 0);
    }

    #[test]
    fn truncated_table_stops_early() {
        // Header promises one record, only four payload bytes follow.
        let c = decode_eeprom(&[0x5A, 0x00, 0x06, 0x00, 0x40, 0x00, 0x78, 0x56], None);
        assert!(c.valid);
        assert_eq!(c.num_writes(), 0);

        let mut data = image(&[(0x0040, 1), (0x0041, 2), (0x0042, 3)]);
        data.truncate(data.len() - 1);
        let c = decode_eeprom(&data, None);
        assert_eq!(c.payload_length, 18);
        assert_eq!(c.num_writes(), 2);
    }

    #[test]
    fn payload_length_not_multiple_of_six_drops_tail() {
        let mut data = image(&[(0x0040, 1), (0x0041, 2)]);
        data[2] = 11;
        let c = decode_eeprom(&data, None);
        assert_eq!(c.payload_length, 11);
        assert_eq!(c.num_writes(), 1);
    }

    #[test]
    fn ignores_bytes_past_payload() {
        let mut data = image(&[(0x0040, 0xAA)]);
        data.extend_from_slice(&[0xFF; 12]);
        assert_eq!(decode_eeprom(&data, None).num_writes(), 1);
    }

    #[test]
    fn address_packing() {
        let c = decode_eeprom(&image(&[(0x0040, 0), (0x0480, 0), (0xFC01, 0)]), None);
        let got: Vec<_> = c.records.iter().map(|r| (r.register_offset, r.port)).collect();
        assert_eq!(got, [(0x100, 0), (0x200, 1), (0x004, 63)]);
    }

    #[test]
    fn names_resolved_from_register_map() {
        let regs = registers();
        let decoder = EepromDecoder::with_registers(&regs);
        let c = decoder.decode(&image(&[
            (0x0001, 0),                     // 0x004, port 0
            (0x001E | (2 << 10), 0),         // 0x078, port 2: no match (needs 0x2078)
            (0x0040, 0),                     // 0x100, port 0: first match is "scratch"
            (0x0041 | (1 << 10), 0),         // 0x104, port 1: port_scratch[port1]
            (0x0010, 0),                     // 0x040: unknown
        ]));
        let names: Vec<_> = c.records.iter().map(|r| r.register_name.as_deref()).collect();
        assert_eq!(
            names,
            [
                Some("command_status"),
                None,
                Some("scratch"),
                Some("port_scratch[port1]"),
                None,
            ]
        );
    }

    #[test]
    fn per_port_name_at_port_zero() {
        let regs = registers();
        let c = decode_eeprom(&image(&[(0x001E, 0)]), Some(&regs));
        assert_eq!(c.records[0].register_name.as_deref(), Some("link_ctrl[port0]"));
    }

    #[test]
    fn decode_is_pure() {
        let regs = registers();
        let decoder = EepromDecoder::with_registers(&regs);
        let data = image(&[(0x0001, 7), (0x0480, 9)]);
        let first = decoder.decode(&data);
        assert_eq!(first, decoder.decode(&data));
        assert_eq!(first, decoder.decode(&first.raw));
    }

    #[test]
    fn decode_file_reads_whole_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, &image(&[(0x0040, 0x1234_5678)])).unwrap();
        let c = decode_eeprom_file(file.path(), None).unwrap();
        assert!(c.valid);
        assert_eq!(c.records[0].value, 0x1234_5678);

        assert!(decode_eeprom_file("/nonexistent/eeprom.bin", None)
            .unwrap_err()
            .is_hardware());
    }
}
