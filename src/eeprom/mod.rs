//! PLX switch EEPROM support: reading and decoding.
//!
//! At boot a PLX switch replays a table of register writes from its
//! EEPROM. This module provides:
//!
//! - [`EepromController`] - Reads raw EEPROM bytes through the switch's
//!   EEPROM controller registers over any [`RegisterAccess`](crate::backend::RegisterAccess).
//! - [`EepromDecoder`] - Decodes an image into [`EepromContents`], naming
//!   records from a [`RegisterMap`](crate::registers::RegisterMap).
//! - Rendering of decoded contents as JSON or a text table.
//!
//! The controller and decoder are independent; they meet only at the byte
//! buffer.

mod controller;
mod decode;
mod report;
mod types;

pub use controller::{read_eeprom, EepromController};
pub use decode::{decode_eeprom, decode_eeprom_file, EepromDecoder};
pub use report::{EepromReport, RecordReport};
pub use types::{
    EepromContents, EepromControllerConfig, EepromDetectionResult, EepromHeader,
    RegisterWriteRecord,
};
