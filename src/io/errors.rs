// Copyright 2016 Walter Kuppens.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::error::Error;
use std::fmt;
use std::io;

// Exit codes used throughout the application. These exit codes has specific
// meanings and are used when no OS error codes are available.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1; // Generic error ¯\_(ツ)_/¯.
pub const EXIT_INVALID_ROM: i32 = 2; // Invalid rom passed.
pub const EXIT_CPU_LOG_NOT_FOUND: i32 = 3;
pub const EXIT_INVALID_PC: i32 = 4;
pub const EXIT_RUNTIME_FAILURE: i32 = 101;

/// Errors that stop the CPU from executing an instruction. In both cases the
/// CPU and memory are left exactly as they were before the failed step.
#[derive(Debug, PartialEq)]
pub enum CpuError {
    // The opcode at `pc` has no instruction assigned to it.
    Decode { opcode: u8, pc: u16 },

    // The attached trace hook rejected the instruction about to execute.
    Trace(TraceError),
}

impl fmt::Display for CpuError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            CpuError::Decode { opcode, pc } =>
                write!(f, "unknown opcode {:02X} at {:04X}", opcode, pc),
            CpuError::Trace(ref e) => write!(f, "trace failed: {}", e),
        }
    }
}

impl Error for CpuError {}

/// Errors raised while comparing execution against a Nintendulator log.
#[derive(Debug, PartialEq)]
pub enum TraceError {
    Io(String),
    Exhausted { line: usize },
    Malformed { line: usize, text: String },
    Mismatch { line: usize, expected: String, actual: String },
}

impl fmt::Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            TraceError::Io(ref e) => write!(f, "unable to read cpu log: {}", e),
            TraceError::Exhausted { line } => write!(f, "cpu log ended after line {}", line),
            TraceError::Malformed { line, ref text } =>
                write!(f, "malformed cpu log frame on line {}: {:?}", line, text),
            TraceError::Mismatch { line, ref expected, ref actual } =>
                write!(f, "mismatched cpu frames on line {}\nEmulator Frame: {}\nLog Frame:      {}",
                       line, actual, expected),
        }
    }
}

impl Error for TraceError {}

impl From<io::Error> for TraceError {
    fn from(e: io::Error) -> TraceError {
        TraceError::Io(e.to_string())
    }
}

/// Errors raised by the rom loader. None of these can happen once a rom has
/// been handed to the CPU.
#[derive(Debug)]
pub enum LoadError {
    Io(io::Error),

    // The file is not in the iNES format.
    InvalidHeader,

    // The header declares no PRG-ROM banks so there is nothing to execute.
    MissingProgram,

    // The file is shorter than its header says it should be.
    Truncated { expected: usize, actual: usize },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            LoadError::Io(ref e) => write!(f, "unable to read rom: {}", e),
            LoadError::InvalidHeader =>
                write!(f, "rom does not contain iNES identifier and is invalid"),
            LoadError::MissingProgram => write!(f, "rom does not contain any PRG-ROM banks"),
            LoadError::Truncated { expected, actual } =>
                write!(f, "rom is truncated: expected {} bytes but found {}", expected, actual),
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            LoadError::Io(ref e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(e: io::Error) -> LoadError {
        LoadError::Io(e)
    }
}
