// Copyright 2016 Walter Kuppens.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use io::errors::LoadError;
use nes::memory::{PRG_ROM_SIZE, TRAINER_SIZE};
use std::fs::File;
use std::io;
use std::io::Read;
use std::path::Path;
use utils::bits;

// Used to identify a rom as being in the iNES format. This byte sequence should
// be at the start of every rom.
const INES_IDENTIFIER: [u8; 4] = [0x4E, 0x45, 0x53, 0x1A];

pub const INES_HEADER_SIZE: usize = 0x10;
pub const CHR_ROM_SIZE: usize = 0x2000;

/// Nametable arrangement wired on the cartridge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mirroring {
    Horizontal,
    Vertical,
    FourScreen,
}

/// Structure that represents the 16 byte header of an iNES rom. Only missing
/// the zero fill as it's unused space.
#[derive(Debug, Clone, PartialEq)]
pub struct INESHeader {
    prg_rom_size: u8,    // Size of PRG ROM in 16 KB units.
    chr_rom_size: u8,    // Size of CHR ROM in 8 KB units.
    flags_6: u8,
    flags_7: u8,
    prg_ram_size: u8,    // Size of PRG RAM in 8 KB units (0 infers 8 KB for
                         // compatibility).
    flags_9: u8,
}

impl INESHeader {
    /// Number of 16KB PRG-ROM banks.
    pub fn prg_banks(&self) -> u8 {
        self.prg_rom_size
    }

    /// Number of 8KB CHR-ROM banks.
    pub fn chr_banks(&self) -> u8 {
        self.chr_rom_size
    }

    /// Number of 8KB PRG-RAM banks. Old roms leave this at zero which means
    /// one bank.
    pub fn prg_ram_banks(&self) -> u8 {
        if self.prg_ram_size == 0 { 1 } else { self.prg_ram_size }
    }

    pub fn mirroring(&self) -> Mirroring {
        if bits::is_bit_set(self.flags_6, 3) {
            Mirroring::FourScreen
        } else if bits::is_bit_set(self.flags_6, 0) {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        }
    }

    pub fn has_battery_ram(&self) -> bool {
        bits::is_bit_set(self.flags_6, 1)
    }

    /// A 512 byte trainer sits between the header and PRG-ROM when set.
    pub fn has_trainer(&self) -> bool {
        bits::is_bit_set(self.flags_6, 2)
    }

    /// Mapper number. The low nibble lives in flags 6 and the high nibble in
    /// flags 7.
    pub fn mapper(&self) -> u8 {
        (self.flags_7 & 0xF0) | (self.flags_6 >> 4)
    }

    pub fn is_pal(&self) -> bool {
        bits::is_bit_set(self.flags_9, 0)
    }
}

/// A parsed cartridge image. Only `prg_rom` is consumed by the CPU.
#[derive(Debug)]
pub struct Rom {
    pub header: INESHeader,
    pub trainer: Option<Vec<u8>>,
    pub prg_rom: Vec<u8>,
    pub chr_rom: Vec<u8>,
}

impl Rom {
    /// Splits an iNES image into its trainer, PRG-ROM and CHR-ROM sections.
    pub fn parse(data: &[u8]) -> Result<Rom, LoadError> {
        let header = parse_rom_header(data)?;
        if header.prg_banks() == 0 {
            return Err(LoadError::MissingProgram);
        }

        let trainer_size = if header.has_trainer() { TRAINER_SIZE } else { 0 };
        let prg_start = INES_HEADER_SIZE + trainer_size;
        let chr_start = prg_start + header.prg_banks() as usize * PRG_ROM_SIZE;
        let end = chr_start + header.chr_banks() as usize * CHR_ROM_SIZE;

        if data.len() < end {
            return Err(LoadError::Truncated { expected: end, actual: data.len() });
        }

        let trainer = if header.has_trainer() {
            Some(data[INES_HEADER_SIZE..prg_start].to_vec())
        } else {
            None
        };

        Ok(Rom {
            header: header,
            trainer: trainer,
            prg_rom: data[prg_start..chr_start].to_vec(),
            chr_rom: data[chr_start..end].to_vec(),
        })
    }

    /// Reads and parses the rom located at the given path.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Rom, LoadError> {
        let data = read_bin(path)?;
        Rom::parse(&data)
    }
}

/// Reads a binary file at a given path and stores it in a vector of bytes.
pub fn read_bin<P: AsRef<Path>>(path: P) -> io::Result<Vec<u8>> {
    let mut buffer: Vec<u8> = Vec::new();
    let mut file = File::open(path)?;
    file.read_to_end(&mut buffer)?;
    Ok(buffer)
}

/// Parses the header of a rom (assumed to be in the iNES format).
///
/// The first 16 bytes of the rom contain the header. The iNES format is
/// identified by the literal byte string "NES<0x1A>". If the rom is not in the
/// iNES format, then it cannot be executed by the emulator.
pub fn parse_rom_header(rom: &[u8]) -> Result<INESHeader, LoadError> {
    if rom.len() < INES_HEADER_SIZE || rom[0x0..0x4] != INES_IDENTIFIER {
        return Err(LoadError::InvalidHeader);
    }

    Ok(INESHeader {
        prg_rom_size: rom[0x4],
        chr_rom_size: rom[0x5],
        flags_6: rom[0x6],
        flags_7: rom[0x7],
        prg_ram_size: rom[0x8],
        flags_9: rom[0x9],
    })
}
