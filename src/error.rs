//! Error types for the plxtools crate.

/// The error type for register and EEPROM operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A register field was given neither or both of `bit` and `bits`.
    #[error("register field '{field}' must specify exactly one of 'bit' or 'bits'")]
    AmbiguousFieldSpec {
        /// Name of the offending field.
        field: String,
    },

    /// A bit index or range does not fit a 32-bit register.
    #[error("invalid bit range {low}..={high} for a 32-bit register")]
    InvalidBitRange {
        /// Low bit (inclusive).
        low: u8,
        /// High bit (inclusive).
        high: u8,
    },

    /// Two registers in one map share a name.
    #[error("duplicate register name: {0}")]
    DuplicateRegister(String),

    /// A register access mode string was not one of `ro`, `rw`, `wo`.
    #[error("unknown register access mode: {0}")]
    InvalidAccess(String),

    /// Invalid argument(s) were provided.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The transport failed to read or write a register.
    #[error("hardware access failed: {0}")]
    Hardware(String),

    /// A register offset passed to a backend was not 4-byte aligned.
    #[error("register offset {0:#x} is not 4-byte aligned")]
    UnalignedOffset(u32),

    /// The EEPROM controller busy bit never cleared.
    #[error("EEPROM read timeout at address {addr:#x}: busy bit did not clear")]
    Timeout {
        /// EEPROM byte address (after masking) of the stalled read.
        addr: u32,
    },

    /// An I/O error from a file or OS-backed transport.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error came from constructing a register model.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Self::AmbiguousFieldSpec { .. }
                | Self::InvalidBitRange { .. }
                | Self::DuplicateRegister(_)
                | Self::InvalidAccess(_)
                | Self::InvalidArgument(_)
        )
    }

    /// Whether this error was raised by a transport.
    pub fn is_hardware(&self) -> bool {
        matches!(self, Self::Hardware(_) | Self::UnalignedOffset(_) | Self::Io(_))
    }

    /// Whether this is an EEPROM busy-bit timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// A specialized `Result` type for plxtools operations.
pub type Result<T> = std::result::Result<T, Error>;
