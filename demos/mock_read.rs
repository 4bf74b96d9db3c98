//! EEPROM read and decode against a simulated switch.
//!
//! Builds an EEPROM image, serves it through the mock EEPROM controller,
//! reads it back with the polled register protocol, and prints the decoded
//! table with register names from a small register map.
//!
//! Usage: RUST_LOG=trace cargo run --example mock_read

use plxtools::backend::mock::MockEepromBackend;
use plxtools::eeprom::{EepromController, EepromDecoder};
use plxtools::registers::{BitField, RegisterDefinition, RegisterMap};
use plxtools::types::Access;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let registers = RegisterMap::from_registers([
        RegisterDefinition::new("device_ctrl", 0x070)
            .access(Access::Rw)
            .field("max_payload", BitField::range(5, 7)?),
        RegisterDefinition::new("link_ctrl", 0x078)
            .access(Access::Rw)
            .per_port(0x1000),
    ])?;

    // Header + two writes: device_ctrl = 0x20, link_ctrl on port 0 = 0x3.
    let image = [
        0x5A, 0x00, 0x0C, 0x00, //
        0x1C, 0x00, 0x20, 0x00, 0x00, 0x00, //
        0x1E, 0x00, 0x03, 0x00, 0x00, 0x00,
    ];

    let mut ctrl = EepromController::new(MockEepromBackend::new(&image));
    let info = ctrl.detect()?;
    println!(
        "EEPROM: valid={} signature=0x{:02X} size={} bytes",
        info.valid, info.signature, info.total_size
    );

    let raw = ctrl.read_all(None)?;
    println!(
        "Read {} bytes in {} dword transactions",
        raw.len(),
        ctrl.backend().dword_reads()
    );

    let contents = EepromDecoder::with_registers(&registers).decode(&raw);
    println!("\n{contents}");

    Ok(())
}
