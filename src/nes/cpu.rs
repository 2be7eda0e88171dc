// Copyright 2016 Walter Kuppens.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use io::errors::{CpuError, TraceError};
use nes::instruction::Instruction;
use nes::memory::{Memory, IRQ_VECTOR, NMI_VECTOR, RESET_VECTOR};
use nes::trace::CpuFrame;
use std::fmt;
use utils::arithmetic;
use utils::bits;

// Flag constants that allow easy bitwise getting and setting of flag values.
pub const CARRY_FLAG       : u8 = 0x1;
pub const ZERO_FLAG        : u8 = 0x2;
pub const INTERRUPT_DISABLE: u8 = 0x4;
pub const DECIMAL_MODE     : u8 = 0x8;
pub const BREAK_COMMAND    : u8 = 0x10;
pub const UNUSED_FLAG      : u8 = 0x20;
pub const OVERFLOW_FLAG    : u8 = 0x40;
pub const NEGATIVE_FLAG    : u8 = 0x80;

// Register values after power-on and reset.
pub const POWER_ON_SP    : u8 = 0xFD;
pub const POWER_ON_STATUS: u8 = 0x24;

// The reset sequence takes 7 cycles before the first instruction is fetched.
pub const RESET_CYCLES: u64 = 7;
const INTERRUPT_CYCLES: u8 = 7;

/// Callback invoked before every instruction with the state the CPU is in
/// right before executing it. Returning an error aborts the step without
/// touching any state.
pub type TraceHook = Box<dyn FnMut(&CpuFrame) -> Result<(), TraceError>>;

/// This is an implementation of 2A03 processor used in the NES. The 2A03 is
/// based off the 6502 processor with some minor changes such as having no
/// binary-coded decimal mode.
///
/// Much of the information and comments are due credit to www.obelisk.me.uk,
/// which has really good information about the 6502 processor.
pub struct CPU {
    // The program counter is a 16-bit register which points to the next
    // instruction to be executed. The value of program counter is modified
    // automatically as instructions are executed.
    //
    // The value of the program counter can be modified by executing a jump, a
    // relative branch, a subroutine call to another memory address, by
    // returning from a subroutine, or by an interrupt.
    pub pc: u16,

    // The processor supports a 256 byte stack located between $0100 and $01FF.
    // The stack pointer is an 8-bit register and holds the next free location
    // on the stack. The location of the stack is fixed and cannot be moved and
    // grows downwards.
    pub sp: u8,

    // The 8-bit accumulator is used all arithmetic and logical operations (with
    // the exception of increments and decrements).
    pub a: u8,

    // The X register can additionally get a copy of the stack pointer or
    // change its value.
    pub x: u8,

    pub y: u8,

    // The Processor Status register contains a list of flags that are set and
    // cleared by instructions to record the results of operations:
    //
    //   7 6 5 4 3 2 1 0
    //   N V - B D I Z C
    //
    // The decimal mode flag can be set and cleared but has no effect on the
    // 2A03. Bit 5 is unused and reads back as set.
    pub p: u8,

    // The amount of cycles accumulated since reset. A cycle represents a unit
    // of time (the time it takes for the CPU clock to fire).
    pub cycles: u64,

    // Optional callback that observes every instruction before it executes.
    trace_hook: Option<TraceHook>,
}

impl CPU {
    pub fn new() -> CPU {
        CPU {
            pc: 0,
            sp: POWER_ON_SP,
            a: 0,
            x: 0,
            y: 0,
            p: POWER_ON_STATUS,
            cycles: 0,
            trace_hook: None,
        }
    }

    /// Puts the registers into their power-on state and loads the program
    /// counter from the reset vector.
    pub fn reset(&mut self, memory: &Memory) {
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.sp = POWER_ON_SP;
        self.p = POWER_ON_STATUS;
        self.pc = memory.read_u16(RESET_VECTOR);
        self.cycles = RESET_CYCLES;
    }

    /// Attaches a callback that is handed a snapshot of the CPU before every
    /// instruction. Replaces any hook set previously.
    pub fn set_trace_hook(&mut self, hook: TraceHook) {
        self.trace_hook = Some(hook);
    }

    /// Detaches the trace hook, if any.
    pub fn clear_trace_hook(&mut self) {
        self.trace_hook = None;
    }

    #[inline(always)]
    fn toggle_flag(&mut self, flag: u8, value: bool) {
        self.p = bits::set_bit(self.p, flag.trailing_zeros() as u8, value);
    }

    /// Sets or clears the carry flag.
    #[inline(always)]
    pub fn toggle_carry_flag(&mut self, value: bool) {
        self.toggle_flag(CARRY_FLAG, value);
    }

    /// Sets the zero flag if the value passed (typically a register) is zero,
    /// otherwise it's unset.
    #[inline(always)]
    pub fn toggle_zero_flag(&mut self, value: u8) {
        self.toggle_flag(ZERO_FLAG, value == 0);
    }

    #[inline(always)]
    pub fn toggle_interrupt_disable(&mut self, value: bool) {
        self.toggle_flag(INTERRUPT_DISABLE, value);
    }

    /// NOTE: This flag is disabled in the 2A03 variation of the 6502.
    #[inline(always)]
    pub fn toggle_decimal_mode(&mut self, value: bool) {
        self.toggle_flag(DECIMAL_MODE, value);
    }

    #[inline(always)]
    pub fn toggle_break_command(&mut self, value: bool) {
        self.toggle_flag(BREAK_COMMAND, value);
    }

    #[inline(always)]
    pub fn toggle_overflow_flag(&mut self, value: bool) {
        self.toggle_flag(OVERFLOW_FLAG, value);
    }

    /// Sets the negative flag if the value passed (typically a register) is
    /// negative, otherwise it's unset.
    #[inline(always)]
    pub fn toggle_negative_flag(&mut self, value: u8) {
        self.toggle_flag(NEGATIVE_FLAG, arithmetic::is_negative(value));
    }

    /// Updates both the zero and negative flags from a result. Nearly every
    /// instruction that produces a value does this.
    #[inline(always)]
    pub fn toggle_zero_negative(&mut self, value: u8) {
        self.toggle_zero_flag(value);
        self.toggle_negative_flag(value);
    }

    #[inline(always)]
    pub fn carry_flag_set(&self) -> bool {
        self.p & CARRY_FLAG == CARRY_FLAG
    }

    #[inline(always)]
    pub fn zero_flag_set(&self) -> bool {
        self.p & ZERO_FLAG == ZERO_FLAG
    }

    #[inline(always)]
    pub fn interrupt_disable_set(&self) -> bool {
        self.p & INTERRUPT_DISABLE == INTERRUPT_DISABLE
    }

    #[inline(always)]
    pub fn decimal_mode_set(&self) -> bool {
        self.p & DECIMAL_MODE == DECIMAL_MODE
    }

    #[inline(always)]
    pub fn break_command_set(&self) -> bool {
        self.p & BREAK_COMMAND == BREAK_COMMAND
    }

    #[inline(always)]
    pub fn overflow_flag_set(&self) -> bool {
        self.p & OVERFLOW_FLAG == OVERFLOW_FLAG
    }

    #[inline(always)]
    pub fn negative_flag_set(&self) -> bool {
        self.p & NEGATIVE_FLAG == NEGATIVE_FLAG
    }

    /// Parse an instruction from memory at the address the program counter
    /// currently points to and execute it. Returns the amount of cycles the
    /// instruction took. All instruction logic is in instruction.rs.
    ///
    /// Decoding happens before anything is mutated, so on error the CPU and
    /// memory are exactly as they were before the call.
    pub fn execute(&mut self, memory: &mut Memory) -> Result<u8, CpuError> {
        let instr = Instruction::parse(self.pc, memory);
        let opcode = match instr.opcode() {
            Some(opcode) => opcode,
            None => return Err(CpuError::Decode { opcode: instr.0, pc: self.pc }),
        };

        if self.trace_hook.is_some() {
            let frame = CpuFrame::capture(self, &instr, opcode, memory);
            if let Some(ref mut hook) = self.trace_hook {
                hook(&frame).map_err(CpuError::Trace)?;
            }
        }

        let cycles = instr.execute(opcode, self, memory);
        self.cycles += cycles as u64;
        Ok(cycles)
    }

    /// Forces a non-maskable interrupt. The driver is responsible for
    /// deciding when one happens (the PPU raises it at the start of vblank on
    /// real hardware).
    pub fn nmi(&mut self, memory: &mut Memory) -> u8 {
        self.interrupt(memory, NMI_VECTOR)
    }

    /// Requests a maskable interrupt. Ignored while the interrupt disable flag
    /// is set, in which case no cycles are spent.
    pub fn irq(&mut self, memory: &mut Memory) -> u8 {
        if self.interrupt_disable_set() {
            return 0;
        }
        self.interrupt(memory, IRQ_VECTOR)
    }

    /// Hardware interrupt entry. Identical to BRK except that the pushed
    /// status has the break bit clear and the current pc is saved as is.
    fn interrupt(&mut self, memory: &mut Memory, vector: u16) -> u8 {
        let pc = self.pc;
        let status = (self.p & !BREAK_COMMAND) | UNUSED_FLAG;
        memory.stack_push_u16(self, pc);
        memory.stack_push_u8(self, status);
        self.toggle_interrupt_disable(true);
        self.pc = memory.read_u16(vector);
        self.cycles += INTERRUPT_CYCLES as u64;
        INTERRUPT_CYCLES
    }

    /// Returns "SET" if the passed boolean is true, otherwise "UNSET". This
    /// function is used to display flags when the CPU crashes.
    fn fmt_flag(flag: bool) -> &'static str {
        if flag { "SET" } else { "UNSET" }
    }
}

impl fmt::Display for CPU {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "CPU State:")?;
        writeln!(f, "    Program Counter: {:#06X}", self.pc)?;
        writeln!(f, "    Stack Pointer:   {:#04X}", self.sp)?;
        writeln!(f, "    Accumulator:     {:#04X}", self.a)?;
        writeln!(f, "    X Register:      {:#04X}", self.x)?;
        writeln!(f, "    Y Register:      {:#04X}", self.y)?;
        writeln!(f, "    Cycles:          {}", self.cycles)?;
        writeln!(f, "")?;
        writeln!(f, "Status Register: {:#04X}", self.p)?;
        writeln!(f, "    Carry Flag:        {}", CPU::fmt_flag(self.carry_flag_set()))?;
        writeln!(f, "    Zero Flag:         {}", CPU::fmt_flag(self.zero_flag_set()))?;
        writeln!(f, "    Interrupt Disable: {}", CPU::fmt_flag(self.interrupt_disable_set()))?;
        writeln!(f, "    Decimal Mode:      {}", CPU::fmt_flag(self.decimal_mode_set()))?;
        writeln!(f, "    Break Command:     {}", CPU::fmt_flag(self.break_command_set()))?;
        writeln!(f, "    Overflow Flag:     {}", CPU::fmt_flag(self.overflow_flag_set()))?;
        write!(f, "    Negative Flag:     {}", CPU::fmt_flag(self.negative_flag_set()))
    }
}
