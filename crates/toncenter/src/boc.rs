// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Minimal bag-of-cells reader for pulling an address out of a get-method payload.
//!
//! Only what is needed to reach the data bits of the first root cell is parsed.
//! References and stored hashes are skipped. A crc32c trailer, when flagged, must match.

use crate::address::{Address, AddressError};
use crate::crc::crc32c;
use thiserror::Error;

const BOC_GENERIC_MAGIC: [u8; 4] = [0xb5, 0xee, 0x9c, 0x72];

/// Lowercase hex prefix of every serialized bag of cells.
pub const BOC_MAGIC_HEX: &str = "b5ee9c72";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CellError {
    #[error("Unexpected end of cell data: needed {needed} bits, {available} available")]
    UnexpectedEnd { needed: usize, available: usize },

    #[error("Invalid bag of cells: {0}")]
    InvalidBoc(String),

    #[error("Address is addr_none")]
    NoneAddress,

    #[error("External addresses are not supported")]
    ExternalAddress,

    #[error("Variable-length addresses are not supported")]
    VarAddress,

    #[error("Anycast addresses are not supported")]
    AnycastAddress,

    #[error(transparent)]
    Address(#[from] AddressError),
}

/// Data bits of a single cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellData {
    pub data: Vec<u8>,
    pub bit_len: usize,
}

impl CellData {
    pub fn reader(&self) -> BitReader<'_> {
        BitReader::new(&self.data, self.bit_len)
    }
}

/// Big-endian bit cursor over a byte slice.
#[derive(Debug)]
pub struct BitReader<'a> {
    data: &'a [u8],
    bit_len: usize,
    pos: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8], bit_len: usize) -> Self {
        Self {
            data,
            bit_len: bit_len.min(data.len() * 8),
            pos: 0,
        }
    }

    pub fn remaining(&self) -> usize {
        self.bit_len - self.pos
    }

    fn ensure(&self, needed: usize) -> Result<(), CellError> {
        if needed > self.remaining() {
            return Err(CellError::UnexpectedEnd {
                needed,
                available: self.remaining(),
            });
        }
        Ok(())
    }

    pub fn load_bit(&mut self) -> Result<bool, CellError> {
        self.ensure(1)?;
        let byte = self.data[self.pos / 8];
        let bit = (byte >> (7 - self.pos % 8)) & 1 == 1;
        self.pos += 1;
        Ok(bit)
    }

    /// Read `bits` (at most 64) as an unsigned big-endian integer.
    pub fn load_uint(&mut self, bits: usize) -> Result<u64, CellError> {
        if bits > 64 {
            return Err(CellError::InvalidBoc(format!(
                "cannot load {} bits into u64",
                bits
            )));
        }
        self.ensure(bits)?;
        let mut value = 0u64;
        for _ in 0..bits {
            value = (value << 1) | self.load_bit()? as u64;
        }
        Ok(value)
    }

    pub fn load_i8(&mut self) -> Result<i8, CellError> {
        Ok(self.load_uint(8)? as u8 as i8)
    }

    pub fn load_bytes(&mut self, len: usize) -> Result<Vec<u8>, CellError> {
        self.ensure(len * 8)?;
        (0..len).map(|_| self.load_uint(8).map(|b| b as u8)).collect()
    }
}

/// Byte cursor for the container header and cell descriptors.
struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    fn take(&mut self, len: usize) -> Result<&'a [u8], CellError> {
        let end = self.pos.checked_add(len).filter(|end| *end <= self.data.len());
        match end {
            Some(end) => {
                let slice = &self.data[self.pos..end];
                self.pos = end;
                Ok(slice)
            }
            None => Err(CellError::InvalidBoc(format!(
                "truncated at offset {} (needed {} more bytes)",
                self.pos, len
            ))),
        }
    }

    fn byte(&mut self) -> Result<u8, CellError> {
        Ok(self.take(1)?[0])
    }

    fn uint(&mut self, len: usize) -> Result<usize, CellError> {
        let bytes = self.take(len)?;
        Ok(bytes.iter().fold(0usize, |acc, b| (acc << 8) | *b as usize))
    }
}

/// Parse a serialized bag of cells and return the data of its first root cell.
pub fn parse_root_cell(boc: &[u8]) -> Result<CellData, CellError> {
    let mut cur = ByteCursor { data: boc, pos: 0 };

    if cur.take(4)? != BOC_GENERIC_MAGIC {
        return Err(CellError::InvalidBoc("unknown magic".to_string()));
    }

    let flags = cur.byte()?;
    let has_idx = flags & 0x80 != 0;
    if flags & 0x40 != 0 {
        verify_crc32c(boc)?;
    }
    let ref_size = (flags & 0x07) as usize;
    let off_size = cur.byte()? as usize;
    if ref_size == 0 || ref_size > 4 || off_size == 0 || off_size > 8 {
        return Err(CellError::InvalidBoc(format!(
            "unsupported size header (ref {}, offset {})",
            ref_size, off_size
        )));
    }

    let cells = cur.uint(ref_size)?;
    let roots = cur.uint(ref_size)?;
    let _absent = cur.uint(ref_size)?;
    let _total_cells_size = cur.uint(off_size)?;
    if roots == 0 {
        return Err(CellError::InvalidBoc("no root cells".to_string()));
    }

    let root = cur.uint(ref_size)?;
    // Remaining root indices
    cur.take((roots - 1) * ref_size)?;
    if root >= cells {
        return Err(CellError::InvalidBoc(format!(
            "root index {} out of {} cells",
            root, cells
        )));
    }

    if has_idx {
        cur.take(cells * off_size)?;
    }

    for index in 0..=root {
        let d1 = cur.byte()?;
        let d2 = cur.byte()?;
        let refs = (d1 & 0x07) as usize;
        let with_hashes = d1 & 0x10 != 0;
        let level_mask = d1 >> 5;

        if with_hashes {
            let hash_count = level_mask.count_ones() as usize + 1;
            cur.take(hash_count * (32 + 2))?;
        }

        let data_len = (d2 as usize).div_ceil(2);
        let data = cur.take(data_len)?;

        if index == root {
            let bit_len = data_bit_len(data, d2)?;
            return Ok(CellData {
                data: data.to_vec(),
                bit_len,
            });
        }

        cur.take(refs * ref_size)?;
    }

    Err(CellError::InvalidBoc("root cell not found".to_string()))
}

fn verify_crc32c(boc: &[u8]) -> Result<(), CellError> {
    let Some(split) = boc.len().checked_sub(4) else {
        return Err(CellError::InvalidBoc("missing crc32c trailer".to_string()));
    };
    let (body, trailer) = boc.split_at(split);
    if crc32c(body) != trailer {
        return Err(CellError::InvalidBoc("crc32c mismatch".to_string()));
    }
    Ok(())
}

/// Bit length of a cell's data, honouring the completion tag of an odd descriptor.
fn data_bit_len(data: &[u8], d2: u8) -> Result<usize, CellError> {
    if d2 % 2 == 0 {
        return Ok(data.len() * 8);
    }

    let last = *data
        .last()
        .ok_or_else(|| CellError::InvalidBoc("empty padded cell".to_string()))?;
    if last == 0 {
        return Err(CellError::InvalidBoc("missing completion tag".to_string()));
    }
    let padding = last.trailing_zeros() as usize + 1;
    Ok(data.len() * 8 - padding)
}

/// Read a `MsgAddressInt` (`addr_std` without anycast).
pub fn load_address(reader: &mut BitReader<'_>) -> Result<Address, CellError> {
    match reader.load_uint(2)? {
        0b00 => return Err(CellError::NoneAddress),
        0b01 => return Err(CellError::ExternalAddress),
        0b11 => return Err(CellError::VarAddress),
        _ => {}
    }

    if reader.load_bit()? {
        return Err(CellError::AnycastAddress);
    }

    let workchain = reader.load_i8()? as i32;
    let mut hash_part = [0u8; 32];
    hash_part.copy_from_slice(&reader.load_bytes(32)?);

    Ok(Address::from_parts(workchain, hash_part)?)
}

/// Parse a serialized bag of cells whose root cell starts with an address.
pub fn parse_address_from_boc(boc: &[u8]) -> Result<Address, CellError> {
    let root = parse_root_cell(boc)?;
    load_address(&mut root.reader())
}
