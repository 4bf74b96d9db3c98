//! Diagnostic access to Broadcom/PLX PCIe switch EEPROMs.
//!
//! A PLX switch configures itself at boot from an EEPROM holding a table of
//! register writes. This crate reads that EEPROM through the switch's
//! EEPROM controller registers and decodes the image, naming each write
//! from a register map when one is available.
//!
//! # Quick Start
//!
//! ```
//! use plxtools::backend::mock::MockEepromBackend;
//! use plxtools::eeprom::{EepromController, EepromDecoder};
//!
//! let image = [0x5A, 0x00, 0x06, 0x00, 0x40, 0x00, 0x78, 0x56, 0x34, 0x12];
//! let mut ctrl = EepromController::new(MockEepromBackend::new(&image));
//! let raw = ctrl.read_all(None)?;
//!
//! let contents = EepromDecoder::new().decode(&raw);
//! assert!(contents.valid);
//! assert_eq!(contents.records[0].register_offset, 0x100);
//! println!("{contents}");
//! # Ok::<(), plxtools::Error>(())
//! ```
//!
//! # Features
//!
//! - **Transport seam**: anything implementing
//!   [`RegisterAccess`](backend::RegisterAccess) (PCIe config space, BAR0,
//!   I2C, serial CLI) can drive the EEPROM controller.
//! - **EEPROM reads**: polled command/status protocol with a fixed busy-bit
//!   budget and dword batching ([`eeprom::EepromController`]).
//! - **Decoding**: best-effort parsing of the header and record table
//!   ([`eeprom::EepromDecoder`]).
//! - **Register model**: bit fields, per-port registers, and name/offset
//!   lookup ([`registers`]).
//! - **Reporting**: JSON and text rendering of decoded images.

pub mod backend;
pub mod constants;
pub mod eeprom;
pub mod error;
pub mod registers;
pub mod types;

// ---- Convenience re-exports ----

pub use backend::RegisterAccess;
pub use eeprom::{EepromContents, EepromController, EepromControllerConfig, EepromDecoder};
pub use error::{Error, Result};
pub use registers::{BitField, RegisterDefinition, RegisterMap};
pub use types::*;
