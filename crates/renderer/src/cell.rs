//! Immutable bit-packed cells and the builder used to construct them.

use crate::consts::{MAX_CELL_BITS, MAX_CELL_REFS};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CellError {
    #[error("Cell capacity exceeded: {0} bits (max {MAX_CELL_BITS})")]
    TooManyBits(usize),

    #[error("Cell reference capacity exceeded: {0} refs (max {MAX_CELL_REFS})")]
    TooManyRefs(usize),

    #[error("Bit data length mismatch: {actual} bytes cannot hold {bit_len} bits")]
    DataLengthMismatch { actual: usize, bit_len: usize },

    #[error("Value {value} does not fit in {bits} bits")]
    ValueOutOfRange { value: u128, bits: u32 },

    #[error("Value {value} does not fit in {bits} signed bits")]
    IntOutOfRange { value: i128, bits: u32 },
}

/// Immutable bit-packed binary unit with up to four child references.
///
/// Bits are stored big-endian within each byte. Unused trailing bits in the
/// last byte are always zero, so two cells with the same content compare
/// equal and `encode()` is canonical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    data: Vec<u8>,
    bit_len: usize,
    refs: Vec<Cell>,
}

impl Cell {
    /// Construct a cell from packed bytes, validating the size limits.
    pub fn new(mut data: Vec<u8>, bit_len: usize, refs: Vec<Cell>) -> Result<Self, CellError> {
        if bit_len > MAX_CELL_BITS {
            return Err(CellError::TooManyBits(bit_len));
        }
        if refs.len() > MAX_CELL_REFS {
            return Err(CellError::TooManyRefs(refs.len()));
        }
        let expected = bit_len.div_ceil(8);
        if data.len() != expected {
            return Err(CellError::DataLengthMismatch {
                actual: data.len(),
                bit_len,
            });
        }
        // Zero the padding bits so equality and encoding are canonical
        if bit_len % 8 != 0 {
            if let Some(last) = data.last_mut() {
                *last &= 0xffu8 << (8 - bit_len % 8);
            }
        }
        Ok(Self {
            data,
            bit_len,
            refs,
        })
    }

    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            bit_len: 0,
            refs: Vec::new(),
        }
    }

    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    pub fn refs(&self) -> &[Cell] {
        &self.refs
    }

    /// Read a single bit. Callers must stay within `bit_len`.
    pub(crate) fn bit(&self, index: usize) -> bool {
        debug_assert!(index < self.bit_len);
        self.data[index / 8] >> (7 - index % 8) & 1 == 1
    }

    /// Canonical byte serialization: big-endian packed bits, zero-padded to a
    /// whole number of bytes.
    pub fn encode(&self) -> &[u8] {
        &self.data
    }
}

/// JSON shape of a cell: hex-packed bits plus nested refs.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CellRepr {
    bits: String,
    bit_len: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    refs: Vec<Cell>,
}

impl Serialize for Cell {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        CellRepr {
            bits: hex::encode(&self.data),
            bit_len: self.bit_len,
            refs: self.refs.clone(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let repr = CellRepr::deserialize(deserializer)?;
        let data = hex::decode(&repr.bits).map_err(D::Error::custom)?;
        Cell::new(data, repr.bit_len, repr.refs).map_err(D::Error::custom)
    }
}

/// Fluent builder for cells, mirroring the read operations of
/// [`CellSlice`](crate::slice::CellSlice). Enforces the same size limits as
/// [`Cell::new`] on every store.
#[derive(Debug, Default, Clone)]
pub struct CellBuilder {
    data: Vec<u8>,
    bit_len: usize,
    refs: Vec<Cell>,
}

impl CellBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store_bit(mut self, bit: bool) -> Result<Self, CellError> {
        if self.bit_len + 1 > MAX_CELL_BITS {
            return Err(CellError::TooManyBits(self.bit_len + 1));
        }
        if self.bit_len % 8 == 0 {
            self.data.push(0);
        }
        if bit {
            let last = self.data.len() - 1;
            self.data[last] |= 1 << (7 - self.bit_len % 8);
        }
        self.bit_len += 1;
        Ok(self)
    }

    /// Store `value` big-endian in exactly `bits` bits.
    pub fn store_uint(mut self, value: u128, bits: u32) -> Result<Self, CellError> {
        if bits > 128 || (bits < 128 && value >> bits != 0) {
            return Err(CellError::ValueOutOfRange { value, bits });
        }
        for i in (0..bits).rev() {
            self = self.store_bit(value >> i & 1 == 1)?;
        }
        Ok(self)
    }

    /// Store `value` as two's complement in exactly `bits` bits.
    pub fn store_int(self, value: i128, bits: u32) -> Result<Self, CellError> {
        if bits == 0 {
            return if value == 0 {
                Ok(self)
            } else {
                Err(CellError::IntOutOfRange { value, bits })
            };
        }
        if bits < 128 {
            let min = -(1i128 << (bits - 1));
            let max = (1i128 << (bits - 1)) - 1;
            if value < min || value > max {
                return Err(CellError::IntOutOfRange { value, bits });
            }
        }
        let mask = if bits == 128 {
            u128::MAX
        } else {
            (1u128 << bits) - 1
        };
        self.store_uint(value as u128 & mask, bits)
    }

    /// Store a variable-length "coins" value: a 4-bit byte-length prefix
    /// followed by that many big-endian bytes.
    pub fn store_coins(self, value: u128) -> Result<Self, CellError> {
        let byte_len = (128 - value.leading_zeros()).div_ceil(8);
        self.store_uint(byte_len as u128, 4)?
            .store_uint(value, byte_len * 8)
    }

    /// Store a canonical internal address: 2-bit tag `0b10`, anycast bit,
    /// signed 8-bit workchain, 256-bit account hash.
    pub fn store_address(mut self, workchain: i8, hash: &[u8; 32]) -> Result<Self, CellError> {
        self = self.store_uint(0b10, 2)?.store_bit(false)?;
        self = self.store_int(workchain as i128, 8)?;
        for byte in hash {
            self = self.store_uint(*byte as u128, 8)?;
        }
        Ok(self)
    }

    pub fn store_ref(mut self, cell: Cell) -> Result<Self, CellError> {
        if self.refs.len() + 1 > MAX_CELL_REFS {
            return Err(CellError::TooManyRefs(self.refs.len() + 1));
        }
        self.refs.push(cell);
        Ok(self)
    }

    pub fn build(self) -> Cell {
        // Limits are enforced on every store, so this cannot fail
        Cell {
            data: self.data,
            bit_len: self.bit_len,
            refs: self.refs,
        }
    }
}
