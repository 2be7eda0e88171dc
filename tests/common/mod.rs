// Copyright 2016 Walter Kuppens.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#![allow(dead_code)]

use nes_cpu::io::binutils::Rom;
use nes_cpu::nes::memory::{IRQ_VECTOR, PRG_ROM_SIZE, RESET_VECTOR};
use nes_cpu::nes::nes::{NES, NESRuntimeOptions};

/// Builds iNES images in memory. Code is placed by CPU address so tests read
/// the way the program will be laid out once mapped.
pub struct RomBuilder {
    banks: Vec<Vec<u8>>,
}

impl RomBuilder {
    pub fn new(banks: u8) -> RomBuilder {
        RomBuilder {
            banks: vec![vec![0; PRG_ROM_SIZE]; banks as usize],
        }
    }

    /// Writes bytes at a CPU address in the PRG-ROM window. Addresses from
    /// 0xC000 go to the last bank, everything below to the first one.
    pub fn code(mut self, addr: u16, bytes: &[u8]) -> RomBuilder {
        assert!(addr >= 0x8000, "{:04X} is outside of PRG-ROM", addr);

        let last = self.banks.len() - 1;
        let (bank, offset) = if addr >= 0xC000 {
            (last, (addr - 0xC000) as usize)
        } else {
            (0, (addr - 0x8000) as usize)
        };
        self.banks[bank][offset..offset + bytes.len()].copy_from_slice(bytes);
        self
    }

    pub fn vector(self, vector: u16, target: u16) -> RomBuilder {
        self.code(vector, &[target as u8, (target >> 8) as u8])
    }

    /// Shorthand for a program starting at 0xC000 with BRK/IRQ handled at
    /// 0xD000.
    pub fn program(bytes: &[u8]) -> RomBuilder {
        RomBuilder::new(1)
            .code(0xC000, bytes)
            .vector(RESET_VECTOR, 0xC000)
            .vector(IRQ_VECTOR, 0xD000)
    }

    pub fn build(&self) -> Vec<u8> {
        let mut data = vec![0x4E, 0x45, 0x53, 0x1A, self.banks.len() as u8, 0, 0, 0,
                            0, 0, 0, 0, 0, 0, 0, 0];
        for bank in self.banks.iter() {
            data.extend_from_slice(bank);
        }
        data
    }

    pub fn rom(&self) -> Rom {
        Rom::parse(&self.build()).unwrap()
    }

    pub fn nes(&self) -> NES {
        NES::new(self.rom(), NESRuntimeOptions::default())
    }
}
