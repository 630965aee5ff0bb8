//! Sequential, bounds-checked reader over a cell's bits and references.

use crate::cell::Cell;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CursorError {
    #[error("Buffer underrun: needed {needed} bits, {remaining} remaining")]
    BufferUnderrun { needed: usize, remaining: usize },

    #[error("No more references to load")]
    NoMoreRefs,

    #[error("Unsupported integer width: {0} bits (max 128)")]
    UnsupportedWidth(u32),

    #[error("Not an internal address (tag {tag:#04b})")]
    InvalidAddress { tag: u8 },
}

/// Read cursor over one [`Cell`].
///
/// Every successful read advances the bit offset or reference index
/// monotonically and never past its bound. After a failed read the cursor
/// position is undefined; the slice must be discarded, not retried.
#[derive(Debug)]
pub struct CellSlice<'a> {
    cell: &'a Cell,
    bit_pos: usize,
    ref_pos: usize,
}

impl<'a> CellSlice<'a> {
    pub fn new(cell: &'a Cell) -> Self {
        Self {
            cell,
            bit_pos: 0,
            ref_pos: 0,
        }
    }

    pub fn remaining_bits(&self) -> usize {
        self.cell.bit_len() - self.bit_pos
    }

    pub fn remaining_refs(&self) -> usize {
        self.cell.refs().len() - self.ref_pos
    }

    /// Advance past `bits` bits without interpreting them.
    pub fn skip(&mut self, bits: usize) -> Result<(), CursorError> {
        if bits > self.remaining_bits() {
            return Err(CursorError::BufferUnderrun {
                needed: bits,
                remaining: self.remaining_bits(),
            });
        }
        self.bit_pos += bits;
        Ok(())
    }

    pub fn load_bit(&mut self) -> Result<bool, CursorError> {
        Ok(self.load_uint(1)? == 1)
    }

    /// Read `bits` bits as a big-endian unsigned integer.
    pub fn load_uint(&mut self, bits: u32) -> Result<u128, CursorError> {
        if bits > 128 {
            return Err(CursorError::UnsupportedWidth(bits));
        }
        let needed = bits as usize;
        if needed > self.remaining_bits() {
            return Err(CursorError::BufferUnderrun {
                needed,
                remaining: self.remaining_bits(),
            });
        }
        let mut value = 0u128;
        for _ in 0..needed {
            value = value << 1 | u128::from(self.cell.bit(self.bit_pos));
            self.bit_pos += 1;
        }
        Ok(value)
    }

    /// Read `bits` bits as a big-endian two's-complement integer.
    pub fn load_int(&mut self, bits: u32) -> Result<i128, CursorError> {
        if bits == 0 {
            return Ok(0);
        }
        let raw = self.load_uint(bits)?;
        let shift = 128 - bits;
        Ok(((raw << shift) as i128) >> shift)
    }

    /// Read a variable-length "coins" value: a 4-bit byte-length prefix
    /// followed by that many big-endian bytes.
    pub fn load_coins(&mut self) -> Result<u128, CursorError> {
        let byte_len = self.load_uint(4)? as u32;
        self.load_uint(byte_len * 8)
    }

    /// Read a canonical internal address (2-bit tag `0b10`, anycast bit,
    /// signed 8-bit workchain, 256-bit account hash) and render it as
    /// `<workchain>:<hash hex>`.
    pub fn load_address(&mut self) -> Result<String, CursorError> {
        let tag = self.load_uint(2)? as u8;
        if tag != 0b10 {
            return Err(CursorError::InvalidAddress { tag });
        }
        let _anycast = self.load_bit()?;
        let workchain = self.load_int(8)?;
        let mut hash = [0u8; 32];
        for byte in hash.iter_mut() {
            *byte = self.load_uint(8)? as u8;
        }
        Ok(format!("{}:{}", workchain, hex::encode(hash)))
    }

    /// Take the next child cell reference.
    pub fn load_ref(&mut self) -> Result<&'a Cell, CursorError> {
        let cell = self
            .cell
            .refs()
            .get(self.ref_pos)
            .ok_or(CursorError::NoMoreRefs)?;
        self.ref_pos += 1;
        Ok(cell)
    }
}
