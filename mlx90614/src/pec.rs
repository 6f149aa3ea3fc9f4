//! SMBus packet error code.

use crc::{Crc, CRC_8_SMBUS};

const SMBUS: Crc<u8> = Crc::<u8>::new(&CRC_8_SMBUS);

/// CRC-8 (x^8 + x^2 + x + 1, initial value zero) over `bytes`, as used for
/// the SMBus PEC byte.
pub fn crc8(bytes: &[u8]) -> u8 {
    SMBUS.checksum(bytes)
}

/* The PEC covers every byte on the wire, address bytes included, so the
R/W bit of each address phase must be folded in by the caller. */
pub(crate) fn write_addr(address: u8) -> u8 {
    address << 1
}

pub(crate) fn read_addr(address: u8) -> u8 {
    (address << 1) | 1
}
