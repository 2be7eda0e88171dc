// Copyright 2016 Walter Kuppens.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

extern crate getopts;
extern crate nes_cpu;

use getopts::Options;
use nes_cpu::debugger::debugger::{self, Debugger};
use nes_cpu::io::binutils::Rom;
use nes_cpu::io::errors::*;
use nes_cpu::io::log;
use nes_cpu::nes::nes::{NES, NESRuntimeOptions};
use std::env;
use std::fs::File;
use std::io::BufReader;

/// Prints usage information with an optional reason.
fn print_usage(program: &str, opts: Options, reason: Option<&str>) {
    let brief = format!("Usage: {} [options] ROM", program);
    if let Some(reason) = reason {
        log::error(reason);
    }
    print!("{}", opts.usage(&brief));
}

/// Parses a program counter given in hex, with or without a `$` or `0x`
/// prefix.
fn parse_pc(raw: &str) -> Option<u16> {
    let digits = raw.trim_start_matches('$').trim_start_matches("0x").trim_start_matches("0X");
    u16::from_str_radix(digits, 16).ok()
}

/// Initializes and starts the emulator. Returns an exit code after which the
/// program unwinds and stops executing. Once the emulator starts executing, the
/// application should only stop due to user input, an error, or reaching the
/// step limit.
fn init() -> i32 {
    let args: Vec<String> = env::args().collect();
    let program = args[0].clone();

    let mut opts = Options::new();
    opts.optflag("v", "verbose", "log every instruction executed");
    opts.optopt("t", "test", "compare execution against a Nintendulator log", "LOG");
    opts.optopt("p", "pc", "start execution at this address instead of the reset vector", "HEX");
    opts.optopt("n", "steps", "stop after executing this many instructions", "N");
    opts.optflag("d", "debug", "start paused in the debugger");
    opts.optflag("h", "help", "print this help menu");

    let matches = match opts.parse(&args[1..]) {
        Ok(matches) => matches,
        Err(e) => {
            let reason = e.to_string();
            print_usage(&program, opts, Some(reason.as_str()));
            return EXIT_FAILURE;
        },
    };

    if matches.opt_present("h") {
        print_usage(&program, opts, None);
        return EXIT_SUCCESS;
    }

    let rom_path = match matches.free.first() {
        Some(rom_path) => rom_path.clone(),
        None => {
            print_usage(&program, opts, Some("no rom specified"));
            return EXIT_FAILURE;
        },
    };

    let start_pc = match matches.opt_str("p") {
        Some(raw) => match parse_pc(&raw) {
            Some(pc) => Some(pc),
            None => {
                log::error(format!("invalid program counter: {}", raw));
                return EXIT_INVALID_PC;
            },
        },
        None => None,
    };

    let step_limit = match matches.opt_str("n") {
        Some(raw) => match raw.parse::<u64>() {
            Ok(limit) => Some(limit),
            Err(_) => {
                log::error(format!("invalid step count: {}", raw));
                return EXIT_FAILURE;
            },
        },
        None => None,
    };

    let runtime_options = NESRuntimeOptions {
        verbose: matches.opt_present("v"),
        cpu_log: matches.opt_str("t"),
        start_pc: start_pc,
        step_limit: step_limit,
        debug: matches.opt_present("d"),
    };

    let rom = match Rom::load(&rom_path) {
        Ok(rom) => rom,
        Err(e) => {
            log::error(format!("{}: {}", rom_path, e));
            return EXIT_INVALID_ROM;
        },
    };

    let mut nes = NES::new(rom, runtime_options.clone());

    if let Some(ref cpu_log) = runtime_options.cpu_log {
        match File::open(cpu_log) {
            Ok(file) => nes.begin_testing(BufReader::new(file)),
            Err(e) => {
                log::error(format!("{}: {}", cpu_log, e));
                return EXIT_CPU_LOG_NOT_FOUND;
            },
        }
    }

    if runtime_options.debug {
        let mut debugger = Debugger::new(debugger::spawn_prompt());
        while debugger.step(&mut nes) {}
        return EXIT_SUCCESS;
    }

    match nes.run() {
        Ok(steps) => {
            log::log("nes", format!("Stopped after {} instructions", steps), &runtime_options);
            EXIT_SUCCESS
        },
        // Running off the end of the comparison log means every line matched.
        Err(CpuError::Trace(TraceError::Exhausted { line })) => {
            println!("All {} lines of the cpu log matched", line);
            EXIT_SUCCESS
        },
        Err(e) => {
            log::error(&e);
            eprintln!("{}", nes.cpu);
            EXIT_RUNTIME_FAILURE
        },
    }
}

/// Entry point of the program and wrapper of init. Takes the exit code returned
/// from init and exits with it.
fn main() {
    let exit_code = init();
    std::process::exit(exit_code); // Unwinding done, safe to exit.
}
