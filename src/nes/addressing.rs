// Copyright 2016 Walter Kuppens.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use nes::cpu::CPU;
use nes::instruction::Instruction;
use nes::memory::Memory;
use utils::arithmetic;
use utils::bits;
use utils::paging;

/// The rule an instruction uses to locate its operand from the bytes that
/// follow the opcode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AddressingMode {
    // No operand, or the operand is implied by the instruction (e.g. CLC).
    Implied,
    // The instruction operates on the accumulator (e.g. ASL A).
    Accumulator,
    // The operand is the byte following the opcode.
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    // Only used by JMP. The operand is a pointer to the jump target.
    Indirect,
    // (zp,X): the pointer is located at the zero page address plus X.
    IndexedIndirect,
    // (zp),Y: the pointer is located at the zero page address and Y is added
    // to the address it points to.
    IndirectIndexed,
    // Only used by branches. The operand is a signed displacement.
    Relative,
}

impl AddressingMode {
    /// Length in bytes of an instruction using this mode, opcode included.
    pub fn len(&self) -> u8 {
        use self::AddressingMode::*;

        match *self {
            Implied | Accumulator => 1,
            Immediate | ZeroPage | ZeroPageX | ZeroPageY | IndexedIndirect | IndirectIndexed |
            Relative => 2,
            Absolute | AbsoluteX | AbsoluteY | Indirect => 3,
        }
    }
}

/// What an addressing mode resolved to. Instructions read (and possibly
/// write back) through this rather than holding references into memory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand {
    None,
    Accumulator,
    Immediate(u8),
    Address(u16),
}

/// Resolves the operand of an instruction located at the program counter.
/// Along with the operand, returns whether indexing crossed a page boundary.
/// For relative addressing the address is the branch target and the page
/// check compares it against the address of the next instruction.
pub fn resolve(mode: AddressingMode, instr: &Instruction, cpu: &CPU, memory: &Memory) -> (Operand, bool) {
    use self::AddressingMode::*;

    let Instruction(_, arg1, arg2) = *instr;
    let absolute = bits::combine_low_high(arg1, arg2);

    match mode {
        Implied => (Operand::None, false),
        Accumulator => (Operand::Accumulator, false),
        Immediate => (Operand::Immediate(arg1), false),
        ZeroPage => (Operand::Address(arg1 as u16), false),
        ZeroPageX => (Operand::Address(arg1.wrapping_add(cpu.x) as u16), false),
        ZeroPageY => (Operand::Address(arg1.wrapping_add(cpu.y) as u16), false),
        Absolute => (Operand::Address(absolute), false),
        AbsoluteX => indexed(absolute, cpu.x),
        AbsoluteY => indexed(absolute, cpu.y),
        Indirect => (Operand::Address(memory.read_u16_wrapped_msb(absolute)), false),
        IndexedIndirect => {
            let ptr = arg1.wrapping_add(cpu.x);
            (Operand::Address(memory.read_u16_zero_page(ptr)), false)
        },
        IndirectIndexed => indexed(memory.read_u16_zero_page(arg1), cpu.y),
        Relative => {
            let next = cpu.pc.wrapping_add(mode.len() as u16);
            let target = arithmetic::add_relative(next, arg1 as i8);
            (Operand::Address(target), paging::crosses_page(next, target))
        },
    }
}

#[inline(always)]
fn indexed(base: u16, index: u8) -> (Operand, bool) {
    let addr = base.wrapping_add(index as u16);
    (Operand::Address(addr), paging::crosses_page(base, addr))
}
