// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Checksums of the TON wire formats: CRC-16/XMODEM for user-friendly addresses and
//! CRC-32C for the bag-of-cells trailer.

use crc::{CRC_16_XMODEM, CRC_32_ISCSI, Crc};

const XMODEM: Crc<u16> = Crc::<u16>::new(&CRC_16_XMODEM);
const CASTAGNOLI: Crc<u32> = Crc::<u32>::new(&CRC_32_ISCSI);

/// CRC-16/XMODEM of `data`, big-endian, as appended to the 34-byte address payload.
pub fn crc16(data: &[u8]) -> [u8; 2] {
    XMODEM.checksum(data).to_be_bytes()
}

/// CRC-32C of `data`, little-endian, as appended to a serialized bag of cells.
pub fn crc32c(data: &[u8]) -> [u8; 4] {
    CASTAGNOLI.checksum(data).to_le_bytes()
}
