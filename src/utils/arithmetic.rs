// Copyright 2016 Walter Kuppens.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

const SIGN_BITMASK: u8 = 0b10000000;

/// Checks if an unsigned number would be negative if it was signed. This is
/// done by checking if the 7th bit is set.
#[inline(always)]
pub fn is_negative(arg: u8) -> bool {
    arg & SIGN_BITMASK == SIGN_BITMASK
}

/// Adds a relative displacement to an address. This is useful for operations
/// using relative addressing that allow branching forwards or backwards.
#[inline(always)]
pub fn add_relative(base_addr: u16, displacement: i8) -> u16 {
    if displacement < 0 {
        base_addr.wrapping_sub((displacement as i16).abs() as u16)
    } else {
        base_addr.wrapping_add(displacement as u16)
    }
}

/// Adds two bytes and a carry the way the 6502 ALU does. Returns the
/// truncated result along with the carry out of bit 7 and the signed overflow
/// condition (both operands share a sign that the result does not).
#[inline(always)]
pub fn add_with_carry(a: u8, operand: u8, carry: bool) -> (u8, bool, bool) {
    let sum = a as u16 + operand as u16 + carry as u16;
    let result = sum as u8;
    let overflow = (a ^ result) & (operand ^ result) & SIGN_BITMASK != 0;
    (result, sum > 0xFF, overflow)
}
