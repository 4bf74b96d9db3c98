//! Decode a PLX EEPROM image file.
//!
//! Prints the decoded register writes as a text table, or as JSON with
//! `--json`.
//!
//! Usage: cargo run --example decode_eeprom -- [--json] <eeprom.bin>

use plxtools::eeprom::decode_eeprom_file;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut json = false;
    let mut path = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => json = true,
            _ => path = Some(arg),
        }
    }
    let Some(path) = path else {
        eprintln!("usage: decode_eeprom [--json] <eeprom.bin>");
        std::process::exit(2);
    };

    let contents = decode_eeprom_file(&path, None)?;
    if json {
        println!("{}", contents.to_json()?);
    } else {
        println!("{contents}");
    }

    Ok(())
}
