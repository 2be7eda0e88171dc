// Copyright 2016 Walter Kuppens.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use debugger::parser;
use io::log;
use nes::memory::MEMORY_SIZE;
use nes::nes::NES;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::cmp;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

// Bytes shown by `dump` when no length is given.
const DEFAULT_DUMP_LENGTH: usize = 0x40;

#[derive(Debug, PartialEq)]
enum Command {
    Stop,
    Continue,
    Step(u64),
    Registers,
    Dump(u16, usize),
    Quit,
}

/// Reads debugger commands on a separate thread so the emulator can keep
/// running while the prompt blocks. The channel disconnects when the prompt
/// is closed (Ctrl-D) or fails.
pub fn spawn_prompt() -> Receiver<String> {
    let (sender, receiver) = mpsc::channel();

    thread::spawn(move || {
        let mut editor = match DefaultEditor::new() {
            Ok(editor) => editor,
            Err(e) => {
                log::error(format!("unable to start debugger prompt: {}", e));
                return;
            },
        };

        loop {
            match editor.readline("(nes) ") {
                Ok(line) => {
                    let _ = editor.add_history_entry(line.as_str());
                    if sender.send(line).is_err() {
                        break;
                    }
                },
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => break,
                Err(e) => {
                    log::error(format!("debugger prompt failed: {}", e));
                    break;
                },
            }
        }
    });

    receiver
}

pub struct Debugger {
    receiver: Receiver<String>,
    stepping: bool,
    pending_steps: u64,
}

impl Debugger {
    /// Creates a debugger with execution paused.
    pub fn new(receiver: Receiver<String>) -> Self {
        Debugger {
            receiver: receiver,
            stepping: false,
            pending_steps: 0,
        }
    }

    /// Handles any commands that came in and steps the CPU forward a single
    /// instruction unless execution is paused. Returns false once the user
    /// quits.
    ///
    /// Errors raised by the CPU pause execution instead of ending the session
    /// so the state that caused them can be inspected.
    pub fn step(&mut self, nes: &mut NES) -> bool {
        // Input is received from another thread so the emulator can run without
        // the debugger prompt blocking it.
        loop {
            match self.receiver.try_recv() {
                Ok(input) => {
                    if let Some(command) = self.interpret(&input) {
                        if !self.execute_command(command, nes) {
                            return false;
                        }
                    }
                },
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    // Nothing can resume a paused session without a prompt.
                    if !self.stepping && self.pending_steps == 0 {
                        return false;
                    }
                    break;
                },
            }
        }

        // If the debugger is in stepping mode, continue execution like normal,
        // otherwise the CPU should not update. In the meantime, sleep the host
        // CPU while we wait for input.
        if self.stepping || self.pending_steps > 0 {
            self.pending_steps = self.pending_steps.saturating_sub(1);
            if let Err(e) = nes.step() {
                log::error(&e);
                println!("{}", nes.cpu);
                self.stepping = false;
                self.pending_steps = 0;
            }
        } else {
            thread::sleep(Duration::from_millis(16));
        }

        true
    }

    /// Parse a raw input string into a list of arguments and a command. This
    /// function also maps command names to their respective enums. Problems
    /// are reported on stderr.
    fn interpret(&self, input: &str) -> Option<Command> {
        let args = match parser::parse_raw_input(input) {
            Ok(args) => args,
            Err(e) => {
                log::error(e);
                return None;
            },
        };

        let raw_command = match args.first() {
            Some(raw_command) => raw_command.to_lowercase(),
            None => return None,
        };

        let parsed = match raw_command.as_str() {
            "stop"           => Ok(Command::Stop),
            "continue" | "c" => Ok(Command::Continue),
            "regs" | "r"     => Ok(Command::Registers),
            "quit" | "q"     => Ok(Command::Quit),
            "step" | "s"     => match args.get(1) {
                Some(count) => count.parse::<u64>()
                    .map(Command::Step)
                    .map_err(|_| format!("invalid step count: {}", count)),
                None => Ok(Command::Step(1)),
            },
            "dump" | "d"     => parse_dump_arguments(&args[1..]),
            _ => Err(format!("unknown command: {}", raw_command)),
        };

        match parsed {
            Ok(command) => Some(command),
            Err(e) => {
                log::error(e);
                None
            },
        }
    }

    /// Executes the correct debugger command based on the enum passed. Returns
    /// false when the debugger should exit.
    fn execute_command(&mut self, command: Command, nes: &mut NES) -> bool {
        match command {
            Command::Stop => {
                log::log("debugger", "Stopping execution now...", &nes.runtime_options);
                self.stepping = false;
                self.pending_steps = 0;
            },
            Command::Continue => {
                log::log("debugger", "Starting execution now...", &nes.runtime_options);
                self.stepping = true;
            },
            Command::Step(count) => self.pending_steps += count,
            Command::Registers => println!("{}", nes.cpu),
            Command::Dump(addr, len) => print!("{}", nes.memory.dump(addr, len)),
            Command::Quit => return false,
        }

        true
    }
}

/// Parses `ADDR [LEN]`. Addresses are hex and may be written as `C000`,
/// `$C000` or `0xC000`; lengths are decimal and capped at the size of memory.
fn parse_dump_arguments(args: &[String]) -> Result<Command, String> {
    let raw_addr = match args.first() {
        Some(raw_addr) => raw_addr,
        None => return Err(String::from("dump requires an address")),
    };

    let digits = raw_addr.trim_start_matches('$').trim_start_matches("0x").trim_start_matches("0X");
    let addr = u16::from_str_radix(digits, 16)
        .map_err(|_| format!("invalid address: {}", raw_addr))?;

    let len = match args.get(1) {
        Some(raw_len) => raw_len.parse::<usize>()
            .map(|len| cmp::min(len, MEMORY_SIZE))
            .map_err(|_| format!("invalid length: {}", raw_len))?,
        None => DEFAULT_DUMP_LENGTH,
    };

    Ok(Command::Dump(addr, len))
}

#[cfg(test)]
mod tests {
    use super::*;
    use io::binutils::Rom;
    use nes::memory::PRG_ROM_SIZE;
    use nes::nes::{NES, NESRuntimeOptions};
    use std::sync::mpsc::{self, Sender};

    // INX forever, starting at 0xC000.
    fn setup() -> (Sender<String>, Debugger, NES) {
        let mut data = vec![0x4E, 0x45, 0x53, 0x1A, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];
        let mut prg = vec![0xE8; PRG_ROM_SIZE];
        prg[0x3FFC] = 0x00;
        prg[0x3FFD] = 0xC0;
        data.extend(prg);

        let nes = NES::new(Rom::parse(&data).unwrap(), NESRuntimeOptions::default());
        let (sender, receiver) = mpsc::channel();
        (sender, Debugger::new(receiver), nes)
    }

    #[test]
    fn starts_paused() {
        let (_sender, mut debugger, mut nes) = setup();
        assert!(debugger.step(&mut nes));
        assert_eq!(nes.cpu.pc, 0xC000);
    }

    #[test]
    fn steps_requested_amount() {
        let (sender, mut debugger, mut nes) = setup();
        sender.send(String::from("step 2")).unwrap();
        for _ in 0..4 {
            assert!(debugger.step(&mut nes));
        }
        assert_eq!(nes.cpu.x, 2);

        sender.send(String::from("s")).unwrap();
        assert!(debugger.step(&mut nes));
        assert_eq!(nes.cpu.x, 3);
    }

    #[test]
    fn continue_and_stop() {
        let (sender, mut debugger, mut nes) = setup();
        sender.send(String::from("continue")).unwrap();
        for _ in 0..5 {
            debugger.step(&mut nes);
        }
        assert_eq!(nes.cpu.x, 5);

        sender.send(String::from("stop")).unwrap();
        debugger.step(&mut nes);
        assert_eq!(nes.cpu.x, 5);
    }

    #[test]
    fn quit_and_disconnect_end_session() {
        let (sender, mut debugger, mut nes) = setup();
        sender.send(String::from("q")).unwrap();
        assert!(!debugger.step(&mut nes));

        let (sender, mut debugger, mut nes) = setup();
        drop(sender);
        assert!(!debugger.step(&mut nes));
    }

    #[test]
    fn bad_input_is_ignored() {
        let (sender, mut debugger, mut nes) = setup();
        sender.send(String::from("frobnicate")).unwrap();
        sender.send(String::from("step many")).unwrap();
        sender.send(String::from("dump \"C000")).unwrap();
        assert!(debugger.step(&mut nes));
        assert_eq!(nes.cpu.pc, 0xC000);
    }

    #[test]
    fn interprets_commands() {
        let (_sender, debugger, _nes) = setup();
        assert_eq!(debugger.interpret("STEP"), Some(Command::Step(1)));
        assert_eq!(debugger.interpret("r"), Some(Command::Registers));
        assert_eq!(debugger.interpret("d $C000 16"), Some(Command::Dump(0xC000, 16)));
        assert_eq!(debugger.interpret("dump 0x10"), Some(Command::Dump(0x0010, DEFAULT_DUMP_LENGTH)));
        assert_eq!(debugger.interpret("dump C000 18446744073709551615"), Some(Command::Dump(0xC000, MEMORY_SIZE)));
        assert_eq!(debugger.interpret("dump"), None);
        assert_eq!(debugger.interpret(""), None);
    }
}
