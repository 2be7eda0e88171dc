// Copyright 2016 Walter Kuppens.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use byteorder::{ByteOrder, LittleEndian};

/// Returns true if the bit at the given position (0 being the least
/// significant bit) is set.
#[inline(always)]
pub fn is_bit_set(byte: u8, bit: u8) -> bool {
    byte & (1 << bit) != 0
}

/// Returns a copy of the byte with the bit at the given position set or
/// cleared depending on `value`.
#[inline(always)]
pub fn set_bit(byte: u8, bit: u8, value: bool) -> u8 {
    if value {
        byte | (1 << bit)
    } else {
        byte & !(1 << bit)
    }
}

/// Assembles a 16-bit value from its low and high bytes. The 6502 stores
/// every 16-bit quantity in little-endian order.
#[inline(always)]
pub fn combine_low_high(low: u8, high: u8) -> u16 {
    LittleEndian::read_u16(&[low, high])
}

/// Splits a 16-bit value into its (low, high) bytes.
#[inline(always)]
pub fn split_low_high(value: u16) -> (u8, u8) {
    let mut buf = [0; 2];
    LittleEndian::write_u16(&mut buf, value);
    (buf[0], buf[1])
}
