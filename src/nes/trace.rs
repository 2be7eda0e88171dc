// Copyright 2016 Walter Kuppens.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use io::errors::TraceError;
use nes::cpu::{CPU, BREAK_COMMAND, UNUSED_FLAG};
use nes::instruction::Instruction;
use nes::memory::Memory;
use nes::opcode::Opcode;
use std::fmt;
use std::io::BufRead;

// Status bits with no storage in the 2A03. Logs always show the unused bit set
// and the break bit clear, whatever a pulled status byte carried.
const UNSTORED_STATUS_BITS: u8 = BREAK_COMMAND | UNUSED_FLAG;

// The PPU runs 3 dots per CPU cycle over 341 dots per scanline and 262
// scanlines per frame.
const PPU_DOTS_PER_CYCLE: u64 = 3;
const PPU_DOTS_PER_SCANLINE: u64 = 341;
const PPU_SCANLINES_PER_FRAME: u64 = 262;

/// A snapshot of the CPU taken right before an instruction executes, in the
/// shape of a single line of a Nintendulator log:
///
/// ```text
/// C000  4C F5 C5  JMP $C5F5                       A:00 X:00 Y:00 P:24 SP:FD PPU:  0, 21 CYC:7
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CpuFrame {
    pub pc: u16,
    pub bytes: Vec<u8>,
    pub disassembly: String,
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub p: u8,
    pub sp: u8,
    // Logs that predate PPU columns count something other than CPU cycles so
    // cycles are only known for logs that have them.
    pub cycles: Option<u64>,
}

impl CpuFrame {
    /// Records the state of the CPU and the instruction it's about to execute.
    pub fn capture(cpu: &CPU, instr: &Instruction, opcode: Opcode, memory: &Memory) -> CpuFrame {
        CpuFrame {
            pc: cpu.pc,
            bytes: instr.bytes(opcode.len()),
            disassembly: instr.disassemble(opcode, cpu, memory),
            a: cpu.a,
            x: cpu.x,
            y: cpu.y,
            p: cpu.p,
            sp: cpu.sp,
            cycles: Some(cpu.cycles),
        }
    }

    /// Parses a single line of a Nintendulator log. Columns are fixed width so
    /// fields are sliced out by position. `line` is only used for errors.
    pub fn parse(text: &str, line: usize) -> Result<CpuFrame, TraceError> {
        let malformed = || TraceError::Malformed { line: line, text: String::from(text) };

        let field = |start: usize, end: usize| text.get(start..end).ok_or_else(malformed);
        let hex_u8 = |start: usize| {
            field(start, start + 2).and_then(|s| u8::from_str_radix(s, 16).map_err(|_| malformed()))
        };

        let pc = field(0, 4).and_then(|s| u16::from_str_radix(s, 16).map_err(|_| malformed()))?;

        let mut bytes = Vec::new();
        for byte in field(6, 14)?.split_whitespace() {
            bytes.push(u8::from_str_radix(byte, 16).map_err(|_| malformed())?);
        }
        if bytes.is_empty() {
            return Err(malformed());
        }

        let marker = field(15, 16)?;
        let disassembly = match marker {
            "*" => format!("*{}", field(16, 48)?.trim_end()),
            _ => String::from(field(16, 48)?.trim_end()),
        };

        let cycles = match (text.find("PPU:"), text.find("CYC:")) {
            (Some(_), Some(pos)) => {
                let count = text[pos + 4..].trim();
                Some(count.parse::<u64>().map_err(|_| malformed())?)
            },
            _ => None,
        };

        Ok(CpuFrame {
            pc: pc,
            bytes: bytes,
            disassembly: disassembly,
            a: hex_u8(50)?,
            x: hex_u8(55)?,
            y: hex_u8(60)?,
            p: hex_u8(65)?,
            sp: hex_u8(71)?,
            cycles: cycles,
        })
    }

    /// Compares the register state of two frames. Disassembly text is left
    /// out as logs disagree on how some unofficial opcodes are written, and
    /// cycles are only compared when both frames carry them. The break and
    /// unused status bits are ignored.
    pub fn matches(&self, other: &CpuFrame) -> bool {
        let cycles_match = match (self.cycles, other.cycles) {
            (Some(a), Some(b)) => a == b,
            _ => true,
        };

        self.pc == other.pc &&
            self.a == other.a &&
            self.x == other.x &&
            self.y == other.y &&
            (self.p & !UNSTORED_STATUS_BITS) == (other.p & !UNSTORED_STATUS_BITS) &&
            self.sp == other.sp &&
            cycles_match
    }
}

impl fmt::Display for CpuFrame {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let bytes: Vec<String> = self.bytes.iter().map(|b| format!("{:02X}", b)).collect();
        let (marker, disassembly) = if self.disassembly.starts_with('*') {
            ("*", &self.disassembly[1..])
        } else {
            (" ", &self.disassembly[..])
        };

        write!(f, "{:04X}  {:<8} {}{:<32}A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X}",
               self.pc, bytes.join(" "), marker, disassembly,
               self.a, self.x, self.y, self.p, self.sp)?;

        if let Some(cycles) = self.cycles {
            let dots = cycles * PPU_DOTS_PER_CYCLE;
            write!(f, " PPU:{:>3},{:>3} CYC:{}",
                   (dots / PPU_DOTS_PER_SCANLINE) % PPU_SCANLINES_PER_FRAME,
                   dots % PPU_DOTS_PER_SCANLINE,
                   cycles)?;
        }

        Ok(())
    }
}

/// Walks a Nintendulator log one line per executed instruction and checks
/// every frame the emulator produces against it.
pub struct LogComparator<R: BufRead> {
    reader: R,
    line: usize,
}

impl<R: BufRead> LogComparator<R> {
    pub fn new(reader: R) -> LogComparator<R> {
        LogComparator {
            reader: reader,
            line: 0,
        }
    }

    /// Reads the next frame of the log and compares it against the frame
    /// produced by the emulator. Blank lines are skipped.
    pub fn check(&mut self, actual: &CpuFrame) -> Result<(), TraceError> {
        let mut text = String::new();
        loop {
            text.clear();
            if self.reader.read_line(&mut text)? == 0 {
                return Err(TraceError::Exhausted { line: self.line });
            }
            self.line += 1;

            if !text.trim().is_empty() {
                break;
            }
        }

        let text = text.trim_end();
        let expected = CpuFrame::parse(text, self.line)?;
        if expected.matches(actual) {
            Ok(())
        } else {
            Err(TraceError::Mismatch {
                line: self.line,
                expected: String::from(text),
                actual: actual.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use io::errors::TraceError;
    use std::io::Cursor;

    const FIRST: &'static str =
        "C000  4C F5 C5  JMP $C5F5                       A:00 X:00 Y:00 P:24 SP:FD PPU:  0, 21 CYC:7";
    const UNOFFICIAL: &'static str =
        "DBB5  04 A9    *NOP $A9 = 00                    A:AA X:97 Y:4E P:EF SP:F5 PPU:235,268 CYC:26801";

    #[test]
    fn parses_official_frame() {
        let frame = CpuFrame::parse(FIRST, 1).unwrap();
        assert_eq!(frame.pc, 0xC000);
        assert_eq!(frame.bytes, vec![0x4C, 0xF5, 0xC5]);
        assert_eq!(frame.disassembly, "JMP $C5F5");
        assert_eq!((frame.a, frame.x, frame.y, frame.p, frame.sp), (0x00, 0x00, 0x00, 0x24, 0xFD));
        assert_eq!(frame.cycles, Some(7));
    }

    #[test]
    fn parses_unofficial_frame() {
        let frame = CpuFrame::parse(UNOFFICIAL, 1).unwrap();
        assert_eq!(frame.disassembly, "*NOP $A9 = 00");
        assert_eq!(frame.bytes, vec![0x04, 0xA9]);
        assert_eq!(frame.sp, 0xF5);
        assert_eq!(frame.cycles, Some(26801));
    }

    #[test]
    fn display_matches_log_format() {
        assert_eq!(CpuFrame::parse(FIRST, 1).unwrap().to_string(), FIRST);
        assert_eq!(CpuFrame::parse(UNOFFICIAL, 1).unwrap().to_string(), UNOFFICIAL);
    }

    #[test]
    fn cycles_need_ppu_columns() {
        let old = "C000  4C F5 C5  JMP $C5F5                       A:00 X:00 Y:00 P:24 SP:FD CYC:  0";
        assert_eq!(CpuFrame::parse(old, 1).unwrap().cycles, None);
    }

    #[test]
    fn short_lines_are_malformed() {
        match CpuFrame::parse("C000  4C F5", 9) {
            Err(TraceError::Malformed { line, .. }) => assert_eq!(line, 9),
            other => panic!("expected malformed frame, got {:?}", other),
        }
        assert!(CpuFrame::parse(&FIRST.replace("A:00", "A:ZZ"), 1).is_err());
    }

    #[test]
    fn matching_ignores_disassembly_and_missing_cycles() {
        let expected = CpuFrame::parse(FIRST, 1).unwrap();
        let mut actual = expected.clone();
        actual.disassembly = String::from("JMP $0000");
        assert!(expected.matches(&actual));

        actual.cycles = None;
        assert!(expected.matches(&actual));

        actual.cycles = Some(8);
        assert!(!expected.matches(&actual));

        actual.cycles = Some(7);
        actual.p = 0x25;
        assert!(!expected.matches(&actual));
    }

    #[test]
    fn matching_ignores_break_and_unused_bits() {
        let expected = CpuFrame::parse(FIRST, 1).unwrap();
        let mut actual = expected.clone();

        // Status restored by RTI after a BRK.
        actual.p = 0x34;
        assert!(expected.matches(&actual));

        // Status pulled by PLP from a byte without bit 5.
        actual.p = 0x04;
        assert!(expected.matches(&actual));

        actual.p = 0x14 | 0x80;
        assert!(!expected.matches(&actual));
    }

    #[test]
    fn comparator_walks_log() {
        let log = format!("{}\n\n{}\n", FIRST, UNOFFICIAL);
        let mut comparator = LogComparator::new(Cursor::new(log.into_bytes()));

        let first = CpuFrame::parse(FIRST, 1).unwrap();
        let mut second = CpuFrame::parse(UNOFFICIAL, 1).unwrap();
        assert_eq!(comparator.check(&first), Ok(()));

        second.a = 0x00;
        match comparator.check(&second) {
            Err(TraceError::Mismatch { line, expected, .. }) => {
                assert_eq!(line, 3);
                assert_eq!(expected, UNOFFICIAL);
            },
            other => panic!("expected mismatch, got {:?}", other),
        }

        assert_eq!(comparator.check(&first), Err(TraceError::Exhausted { line: 3 }));
    }
}
