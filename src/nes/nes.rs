// Copyright 2016 Walter Kuppens.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use io::binutils::{INESHeader, Rom};
use io::errors::CpuError;
use io::log;
use nes::cpu::CPU;
use nes::memory::{Memory, TRAINER_START};
use nes::trace::{CpuFrame, LogComparator};
use std::io::BufRead;

/// Options the emulator was started with.
#[derive(Debug, Clone, Default)]
pub struct NESRuntimeOptions {
    pub verbose: bool,

    // Nintendulator log that execution is compared against.
    pub cpu_log: Option<String>,

    // Overrides the program counter loaded from the reset vector. nestest is
    // started at 0xC000 to run without a PPU.
    pub start_pc: Option<u16>,

    pub step_limit: Option<u64>,
    pub debug: bool,
}

/// A cartridge plugged into the CPU and its memory. Everything besides the
/// CPU (picture, sound, input, mappers) is left out.
pub struct NES {
    pub runtime_options: NESRuntimeOptions,
    pub header: INESHeader,
    pub cpu: CPU,
    pub memory: Memory,
}

impl NES {
    /// Maps the rom into memory and resets the CPU, leaving it ready to
    /// execute the first instruction.
    pub fn new(rom: Rom, runtime_options: NESRuntimeOptions) -> NES {
        let mut cpu = CPU::new();
        let mut memory = Memory::new();

        // Copy the trainer data to 0x7000 if it exists.
        if let Some(ref trainer) = rom.trainer {
            log::log("nes", "Trainer data found", &runtime_options);
            memory.memdump(TRAINER_START, trainer);
        }

        log::log("nes", format!("{} PRG-ROM bank(s) detected, mapper {}",
                                rom.header.prg_banks(), rom.header.mapper()), &runtime_options);
        memory.load_program(&rom.prg_rom, rom.header.prg_banks());

        cpu.reset(&memory);
        if let Some(pc) = runtime_options.start_pc {
            log::log("nes", format!("Starting execution at {:04X}", pc), &runtime_options);
            cpu.pc = pc;
        }

        let mut nes = NES {
            runtime_options: runtime_options,
            header: rom.header,
            cpu: cpu,
            memory: memory,
        };

        if nes.runtime_options.verbose {
            nes.enable_logging();
        }

        nes
    }

    /// Executes a single instruction and returns the cycles it took.
    #[inline(always)]
    pub fn step(&mut self) -> Result<u8, CpuError> {
        self.cpu.execute(&mut self.memory)
    }

    /// Steps the CPU until an error occurs or the step limit is reached.
    /// Returns the amount of instructions executed.
    pub fn run(&mut self) -> Result<u64, CpuError> {
        let mut steps: u64 = 0;
        loop {
            if let Some(limit) = self.runtime_options.step_limit {
                if steps >= limit {
                    return Ok(steps);
                }
            }

            self.step()?;
            steps += 1;
        }
    }

    /// Compares every instruction executed from here on against a
    /// Nintendulator log. The first difference stops execution with a
    /// `TraceError`; so does running past the end of the log.
    pub fn begin_testing<R: BufRead + 'static>(&mut self, reader: R) {
        let mut comparator = LogComparator::new(reader);
        let options = self.runtime_options.clone();

        self.cpu.set_trace_hook(Box::new(move |frame: &CpuFrame| {
            log::log("cpu", frame.to_string(), &options);
            comparator.check(frame)
        }));
    }

    /// Logs every instruction executed in Nintendulator's format.
    pub fn enable_logging(&mut self) {
        let options = self.runtime_options.clone();

        self.cpu.set_trace_hook(Box::new(move |frame: &CpuFrame| {
            log::log("cpu", frame.to_string(), &options);
            Ok(())
        }));
    }
}
