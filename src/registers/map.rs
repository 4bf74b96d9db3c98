//! Register definitions and maps.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::types::Access;

use super::BitField;

/// A named 32-bit register, optionally replicated once per switch port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterDefinition {
    /// Register name.
    pub name: String,
    /// Byte offset of the register (port 0 for per-port registers).
    pub offset: u32,
    /// Register size in bytes.
    pub size: u32,
    /// Access mode.
    pub access: Access,
    /// Free-form description.
    pub description: String,
    /// Named bit fields.
    pub fields: BTreeMap<String, BitField>,
    /// Whether the register exists once per port.
    pub per_port: bool,
    /// Distance between consecutive ports' copies. Unused unless `per_port`.
    pub port_stride: u32,
}

impl RegisterDefinition {
    /// A 4-byte read-only register with no fields.
    pub fn new(name: impl Into<String>, offset: u32) -> Self {
        Self {
            name: name.into(),
            offset,
            size: 4,
            access: Access::Ro,
            description: String::new(),
            fields: BTreeMap::new(),
            per_port: false,
            port_stride: 0,
        }
    }

    /// Set the register size in bytes.
    pub fn size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    /// Set the access mode.
    pub fn access(mut self, access: Access) -> Self {
        self.access = access;
        self
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add a named bit field.
    pub fn field(mut self, name: impl Into<String>, field: BitField) -> Self {
        self.fields.insert(name.into(), field);
        self
    }

    /// Mark the register as per-port with the given stride.
    pub fn per_port(mut self, port_stride: u32) -> Self {
        self.per_port = true;
        self.port_stride = port_stride;
        self
    }

    /// Offset of this register for `port`.
    ///
    /// `offset + port * port_stride` for per-port registers, `offset`
    /// otherwise. The port number is not range-checked.
    pub fn port_offset(&self, port: u32) -> u32 {
        if !self.per_port {
            return self.offset;
        }
        self.offset.wrapping_add(port.wrapping_mul(self.port_stride))
    }

    /// Extract a named field from a raw register value.
    pub fn field_value(&self, register_value: u32, field: &str) -> Option<u32> {
        self.fields.get(field).map(|f| f.extract(register_value))
    }
}

/// An ordered collection of register definitions with unique names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterMap {
    registers: Vec<RegisterDefinition>,
}

impl RegisterMap {
    /// An empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from definitions, rejecting duplicate names.
    pub fn from_registers<I>(registers: I) -> Result<Self>
    where
        I: IntoIterator<Item = RegisterDefinition>,
    {
        let mut map = Self::new();
        for reg in registers {
            map.insert(reg)?;
        }
        Ok(map)
    }

    /// Append a definition. Fails if a register with the same name exists.
    pub fn insert(&mut self, register: RegisterDefinition) -> Result<()> {
        if self.find_by_name(&register.name).is_some() {
            return Err(Error::DuplicateRegister(register.name));
        }
        self.registers.push(register);
        Ok(())
    }

    /// Number of registers.
    pub fn len(&self) -> usize {
        self.registers.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.registers.is_empty()
    }

    /// Iterate over definitions in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, RegisterDefinition> {
        self.registers.iter()
    }

    /// Look up a register by name.
    pub fn find_by_name(&self, name: &str) -> Option<&RegisterDefinition> {
        self.registers.iter().find(|r| r.name == name)
    }

    /// Look up a non-per-port register by its exact offset. First match wins.
    ///
    /// Per-port registers are resolved by the EEPROM decoder, which knows
    /// the port of each record.
    pub fn find_by_offset(&self, offset: u32) -> Option<&RegisterDefinition> {
        self.registers.iter().find(|r| !r.per_port && r.offset == offset)
    }

    /// Offset of the named register for `port`.
    pub fn port_offset(&self, name: &str, port: u32) -> Option<u32> {
        self.find_by_name(name).map(|r| r.port_offset(port))
    }
}

impl<'a> IntoIterator for &'a RegisterMap {
    type Item = &'a RegisterDefinition;
    type IntoIter = std::slice::Iter<'a, RegisterDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_map() -> RegisterMap {
        RegisterMap::from_registers([
            RegisterDefinition::new("vendor_device_id", 0x000),
            RegisterDefinition::new("eeprom_ctrl", 0x260)
                .access(Access::Rw)
                .field("busy", BitField::single(31).unwrap())
                .field("addr", BitField::range(0, 12).unwrap()),
            RegisterDefinition::new("link_status", 0x078).per_port(0x1000),
        ])
        .unwrap()
    }

    #[test]
    fn port_offset_only_applies_to_per_port() {
        let map = sample_map();
        let link = map.find_by_name("link_status").unwrap();
        assert_eq!(link.port_offset(0), 0x078);
        assert_eq!(link.port_offset(3), 0x3078);

        let ctrl = map.find_by_name("eeprom_ctrl").unwrap();
        assert_eq!(ctrl.port_offset(5), 0x260);
        assert_eq!(map.port_offset("link_status", 1), Some(0x1078));
        assert_eq!(map.port_offset("missing", 1), None);
    }

    #[test]
    fn find_by_offset_skips_per_port() {
        let map = sample_map();
        assert_eq!(map.find_by_offset(0x260).unwrap().name, "eeprom_ctrl");
        assert!(map.find_by_offset(0x078).is_none());
        assert!(map.find_by_offset(0x264).is_none());
    }

    #[test]
    fn duplicate_names_rejected() {
        let mut map = sample_map();
        let err = map
            .insert(RegisterDefinition::new("eeprom_ctrl", 0x300))
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateRegister(ref n) if n == "eeprom_ctrl"));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn field_values() {
        let map = sample_map();
        let ctrl = map.find_by_name("eeprom_ctrl").unwrap();
        assert_eq!(ctrl.field_value(0x8000_0123, "busy"), Some(1));
        assert_eq!(ctrl.field_value(0x8000_0123, "addr"), Some(0x123));
        assert_eq!(ctrl.field_value(0, "nope"), None);
    }

    #[test]
    fn iteration_keeps_insertion_order() {
        let map = sample_map();
        let names: Vec<_> = map.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["vendor_device_id", "eeprom_ctrl", "link_status"]);
        assert!(!map.is_empty());
    }
}
