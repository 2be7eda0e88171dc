// Copyright 2016 Walter Kuppens.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use nes::cpu::CPU;
use std::cmp;
use std::fmt::Write;
use utils::bits;

// Memory partition sizes.
pub const MEMORY_SIZE : usize = 0x10000;
pub const PRG_ROM_SIZE: usize = 0x4000;
pub const TRAINER_SIZE: usize = 512;

// Virtual memory map bounds with fixed meaning to the CPU. Everything else
// (PPU and APU registers, expansion ROM, SRAM) is treated as plain RAM.
pub const ZERO_PAGE_START: u16 = 0x0000;
pub const ZERO_PAGE_END  : u16 = 0x00FF;
pub const STACK_START    : u16 = 0x0100;
pub const STACK_END      : u16 = 0x01FF;
pub const TRAINER_START  : u16 = 0x7000;
pub const PRG_ROM_1_START: u16 = 0x8000;
pub const PRG_ROM_2_START: u16 = 0xC000;

// Interrupt vectors. Each one holds a little-endian pointer.
pub const NMI_VECTOR  : u16 = 0xFFFA;
pub const RESET_VECTOR: u16 = 0xFFFC;
pub const IRQ_VECTOR  : u16 = 0xFFFE;

// Location of the first byte on the bottom of the stack. The stack starts on
// memory page 2 (0x100).
const STACK_OFFSET: u16 = STACK_START;

// Default amount of bytes shown per row in memory dumps.
const DUMP_ROW_SIZE: usize = 16;

/// The CPU's view of memory: a single flat 64KB address space. Addresses are
/// 16-bit so every address is a valid index and all pointer arithmetic wraps
/// around the end of memory the same way the 6502 does.
pub struct Memory {
    data: Vec<u8>,
}

impl Memory {
    pub fn new() -> Memory {
        Memory {
            data: vec![0; MEMORY_SIZE],
        }
    }

    /// Reads an unsigned 8-bit byte value located at the given address.
    #[inline(always)]
    pub fn read_u8(&self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    /// Writes an unsigned 8-bit byte value to the given address.
    #[inline(always)]
    pub fn write_u8(&mut self, addr: u16, val: u8) {
        self.data[addr as usize] = val;
    }

    /// Reads an unsigned 16-bit value at the given address (little-endian).
    /// The high byte wraps around to 0x0000 when reading at 0xFFFF.
    #[inline(always)]
    pub fn read_u16(&self, addr: u16) -> u16 {
        bits::combine_low_high(self.read_u8(addr), self.read_u8(addr.wrapping_add(1)))
    }

    /// Reads an unsigned 16-bit value stored in the zero page. A pointer at
    /// 0xFF takes its high byte from 0x00 as the address never leaves page 0.
    #[inline(always)]
    pub fn read_u16_zero_page(&self, ptr: u8) -> u16 {
        bits::combine_low_high(self.read_u8(ptr as u16), self.read_u8(ptr.wrapping_add(1) as u16))
    }

    /// Reads an unsigned 16-bit value at the given address (little-endian)
    /// where the MSB is read at page start if the LSB is at the end of a page.
    /// This exists to properly emulate a hardware bug in the 2A03 where
    /// indirect jumps cannot fetch addresses outside it's own page.
    #[inline(always)]
    pub fn read_u16_wrapped_msb(&self, addr: u16) -> u16 {
        let lsb = self.read_u8(addr);
        let msb = if addr & 0xFF == 0xFF {
            self.read_u8(addr & 0xFF00)
        } else {
            self.read_u8(addr.wrapping_add(1))
        };

        bits::combine_low_high(lsb, msb)
    }

    /// Writes an unsigned 16-bit value to the given address (little-endian).
    #[inline(always)]
    pub fn write_u16(&mut self, addr: u16, val: u16) {
        let (low, high) = bits::split_low_high(val);
        self.write_u8(addr, low);
        self.write_u8(addr.wrapping_add(1), high);
    }

    /// Copies the contents of a slice starting at a given address. Writes past
    /// 0xFFFF wrap around to the start of memory.
    pub fn memdump(&mut self, addr: u16, buf: &[u8]) {
        for (i, byte) in buf.iter().enumerate() {
            self.write_u8(addr.wrapping_add(i as u16), *byte);
        }
    }

    /// Maps cartridge program data into the PRG-ROM window. The first bank
    /// always lands at 0x8000. The upper window at 0xC000 receives the last
    /// bank, or a mirror of the first one on single bank cartridges.
    ///
    /// The loader guarantees at least one full bank; a short buffer is mapped
    /// as far as it goes.
    pub fn load_program(&mut self, prg_rom: &[u8], banks: u8) {
        let first_bank = &prg_rom[..cmp::min(prg_rom.len(), PRG_ROM_SIZE)];
        let last_bank = if banks <= 1 {
            first_bank
        } else {
            let start = (banks as usize - 1) * PRG_ROM_SIZE;
            let end = cmp::min(prg_rom.len(), start + PRG_ROM_SIZE);
            prg_rom.get(start..end).unwrap_or(first_bank)
        };

        self.memdump(PRG_ROM_1_START, first_bank);
        self.memdump(PRG_ROM_2_START, last_bank);
    }

    /// Renders a window of memory as rows of hex bytes prefixed with their
    /// address, e.g. `C000: 4C F5 C5 60 ...`. At most the whole address space
    /// is shown, wrapping around the end of memory.
    pub fn dump(&self, addr: u16, len: usize) -> String {
        let len = cmp::min(len, MEMORY_SIZE);
        let rows = len / DUMP_ROW_SIZE + if len % DUMP_ROW_SIZE == 0 { 0 } else { 1 };

        let mut out = String::new();
        for row in 0..rows {
            let row_addr = addr.wrapping_add((row * DUMP_ROW_SIZE) as u16);
            let _ = write!(out, "{:04X}:", row_addr);

            let remaining = cmp::min(DUMP_ROW_SIZE, len - row * DUMP_ROW_SIZE);
            for i in 0..remaining {
                let _ = write!(out, " {:02X}", self.read_u8(row_addr.wrapping_add(i as u16)));
            }
            out.push('\n');
        }
        out
    }

    // Utility functions for managing the stack.

    /// Pushes an 8-bit number onto the stack. The stack pointer is moved down
    /// first so it always points at the most recently pushed byte.
    pub fn stack_push_u8(&mut self, cpu: &mut CPU, value: u8) {
        cpu.sp = cpu.sp.wrapping_sub(1);
        self.write_u8(STACK_OFFSET + cpu.sp as u16, value);
    }

    /// Pops an 8-bit number off the stack.
    pub fn stack_pop_u8(&mut self, cpu: &mut CPU) -> u8 {
        let value = self.read_u8(STACK_OFFSET + cpu.sp as u16);
        cpu.sp = cpu.sp.wrapping_add(1);
        value
    }

    /// Pushes a 16-bit number (usually an address) onto the stack, high byte
    /// first so it ends up little-endian in memory.
    pub fn stack_push_u16(&mut self, cpu: &mut CPU, value: u16) {
        let (low, high) = bits::split_low_high(value);
        self.stack_push_u8(cpu, high);
        self.stack_push_u8(cpu, low);
    }

    /// Pops a 16-bit number (usually an address) off the stack.
    pub fn stack_pop_u16(&mut self, cpu: &mut CPU) -> u16 {
        let low = self.stack_pop_u8(cpu);
        let high = self.stack_pop_u8(cpu);
        bits::combine_low_high(low, high)
    }
}
