//! Rendering decoded EEPROM contents as JSON and as a text table.

use std::fmt;

use serde::Serialize;

use super::types::{EepromContents, RegisterWriteRecord};

/// Serializable view of [`EepromContents`] with integers as hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EepromReport<'a> {
    /// Header validity.
    pub valid: bool,
    /// Signature, e.g. `"0x5A"`.
    pub signature: String,
    /// Payload length in bytes.
    pub payload_length: u16,
    /// Number of decoded records.
    pub num_writes: usize,
    /// Decoded records.
    pub register_writes: Vec<RecordReport<'a>>,
}

/// Serializable view of one [`RegisterWriteRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordReport<'a> {
    /// Raw address field, e.g. `"0x0040"`.
    pub raw_address: String,
    /// Register offset, e.g. `"0x100"`.
    pub register_offset: String,
    /// Port number.
    pub port: u32,
    /// Value, e.g. `"0x12345678"`.
    pub value: String,
    /// Resolved register name; `null` when unknown.
    pub register_name: Option<&'a str>,
}

impl<'a> From<&'a RegisterWriteRecord> for RecordReport<'a> {
    fn from(r: &'a RegisterWriteRecord) -> Self {
        Self {
            raw_address: format!("0x{:04X}", r.raw_address),
            register_offset: format!("0x{:03X}", r.register_offset),
            port: r.port,
            value: format!("0x{:08X}", r.value),
            register_name: r.register_name.as_deref(),
        }
    }
}

const RULE_WIDTH: usize = 60;

impl EepromContents {
    /// Build the serializable view.
    pub fn to_report(&self) -> EepromReport<'_> {
        EepromReport {
            valid: self.valid,
            signature: format!("0x{:02X}", self.signature),
            payload_length: self.payload_length,
            num_writes: self.num_writes(),
            register_writes: self.records.iter().map(RecordReport::from).collect(),
        }
    }

    /// Pretty-printed JSON of [`to_report`](Self::to_report).
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.to_report())
    }

    /// Header block followed by a table of register writes.
    pub fn format_human_readable(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for EepromContents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "=".repeat(RULE_WIDTH);
        let thin = "-".repeat(RULE_WIDTH);

        writeln!(f, "EEPROM Contents")?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Valid:          {}", if self.valid { "Yes" } else { "No" })?;
        writeln!(f, "Signature:      0x{:02X}", self.signature)?;
        writeln!(f, "Payload length: {} bytes", self.payload_length)?;
        writeln!(f, "Register writes: {}", self.num_writes())?;
        writeln!(f)?;

        if !self.valid {
            return write!(f, "EEPROM is invalid or empty.");
        }

        writeln!(f, "Register Writes:")?;
        writeln!(f, "{thin}")?;
        writeln!(f, "{:>3}  {:>4}  {:>8}  {:>10}  Name", "#", "Port", "Offset", "Value")?;
        write!(f, "{thin}")?;
        for (i, r) in self.records.iter().enumerate() {
            let name = r.register_name.as_deref().unwrap_or("(unknown)");
            write!(
                f,
                "\n{i:>3}  {:>4}  0x{:04X}    0x{:08X}  {name}",
                r.port, r.register_offset, r.value
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eeprom::decode::decode_eeprom;
    use crate::registers::{RegisterDefinition, RegisterMap};

    const IMAGE: [u8; 16] = [
        0x5A, 0x00, 0x0C, 0x00, // header, two records
        0x40, 0x00, 0x78, 0x56, 0x34, 0x12, // 0x100 port 0
        0x81, 0x04, 0xEF, 0xBE, 0xAD, 0xDE, // 0x204 port 1
    ];

    #[test]
    fn json_shape() {
        let regs =
            RegisterMap::from_registers([RegisterDefinition::new("scratch", 0x100)]).unwrap();
        let c = decode_eeprom(&IMAGE, Some(&regs));
        let v: serde_json::Value = serde_json::from_str(&c.to_json().unwrap()).unwrap();

        assert_eq!(v["valid"], true);
        assert_eq!(v["signature"], "0x5A");
        assert_eq!(v["payload_length"], 12);
        assert_eq!(v["num_writes"], 2);
        let w = &v["register_writes"];
        assert_eq!(w[0]["raw_address"], "0x0040");
        assert_eq!(w[0]["register_offset"], "0x100");
        assert_eq!(w[0]["port"], 0);
        assert_eq!(w[0]["value"], "0x12345678");
        assert_eq!(w[0]["register_name"], "scratch");
        assert_eq!(w[1]["raw_address"], "0x0481");
        assert_eq!(w[1]["register_offset"], "0x204");
        assert_eq!(w[1]["port"], 1);
        assert_eq!(w[1]["value"], "0xDEADBEEF");
        assert!(w[1]["register_name"].is_null());
    }

    #[test]
    fn text_table() {
        let c = decode_eeprom(&IMAGE, None);
        let text = c.format_human_readable();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "EEPROM Contents");
        assert_eq!(lines[2], "Valid:          Yes");
        assert_eq!(lines[3], "Signature:      0x5A");
        assert_eq!(lines[4], "Payload length: 12 bytes");
        assert_eq!(lines[5], "Register writes: 2");
        assert_eq!(lines[7], "Register Writes:");
        assert_eq!(lines[9], "  #  Port    Offset       Value  Name");
        assert_eq!(lines[11], "  0     0  0x0100    0x12345678  (unknown)");
        assert_eq!(lines[12], "  1     1  0x0204    0xDEADBEEF  (unknown)");
        assert_eq!(lines.len(), 13);
    }

    #[test]
    fn text_for_invalid_image() {
        let text = decode_eeprom(&[0xFF, 0, 0, 0], None).to_string();
        assert!(text.contains("Valid:          No"));
        assert!(text.contains("Signature:      0xFF"));
        assert!(text.ends_with("EEPROM is invalid or empty."));
        assert!(!text.contains("Register Writes:"));
    }
}
