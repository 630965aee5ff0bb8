//! Shared constants for cell layout and payload decoding.

/// Maximum number of data bits a single cell may hold.
pub const MAX_CELL_BITS: usize = 1023;

/// Maximum number of child references a single cell may hold.
pub const MAX_CELL_REFS: usize = 4;

/// Width of the operation code at the start of a message body.
pub const OPCODE_BITS: u32 = 32;

/// Implied fractional digits when formatting nanoton values.
pub const COINS_DECIMALS: usize = 9;

/// Payload placeholder when no schema is available or decoding fails.
pub const RAW_CALLDATA: &str = "Calldata";
