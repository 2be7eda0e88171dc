// Copyright 2016 Walter Kuppens.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use nes::addressing::{self, AddressingMode, Operand};
use nes::cpu::{CPU, BREAK_COMMAND, UNUSED_FLAG};
use nes::memory::{Memory, IRQ_VECTOR};
use nes::opcode::{decode_opcode, Mnemonic, Opcode};
use utils::arithmetic;
use utils::bits;

/// All 6502 instructions are a maximum size of 3 bytes. The first byte is the
/// opcode which is determines the action of the instruction. The following 2
/// bytes are the arguments and are present depending on the opcode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Instruction(pub u8, pub u8, pub u8);

impl Instruction {
    /// The decoder will store all bytes in the instruction regardless if they
    /// are needed or not.
    pub fn parse(addr: u16, memory: &Memory) -> Instruction {
        Instruction(memory.read_u8(addr),
                    memory.read_u8(addr.wrapping_add(1)),
                    memory.read_u8(addr.wrapping_add(2)))
    }

    #[inline(always)]
    pub fn opcode(&self) -> Option<Opcode> {
        decode_opcode(self.0)
    }

    /// The bytes making up the instruction, trimmed to its actual length.
    pub fn bytes(&self, len: u8) -> Vec<u8> {
        let all = [self.0, self.1, self.2];
        all[..len as usize].to_vec()
    }

    /// Executes the instruction, which is expected to be located at the
    /// program counter. The program counter is moved past the instruction
    /// unless the instruction transfers control elsewhere. Returns the amount
    /// of cycles spent, including page crossing and branch penalties.
    pub fn execute(&self, opcode: Opcode, cpu: &mut CPU, memory: &mut Memory) -> u8 {
        use nes::opcode::Mnemonic::*;

        let info = opcode.info();
        let (operand, page_crossed) = addressing::resolve(info.mode, self, cpu, memory);

        // Add an additional cycle when page boundaries are crossed while
        // resolving the operand (only if the opcode is susceptible to it).
        let mut cycles = info.cycles;
        if info.boundary_sensitive && page_crossed {
            cycles += 1;
        }

        let pc = cpu.pc;
        cpu.pc = pc.wrapping_add(info.mode.len() as u16);

        match info.mnemonic {
            // Loads, stores and transfers.
            LDA => {
                let value = read(operand, cpu, memory);
                cpu.a = value;
                cpu.toggle_zero_negative(value);
            },
            LDX => {
                let value = read(operand, cpu, memory);
                cpu.x = value;
                cpu.toggle_zero_negative(value);
            },
            LDY => {
                let value = read(operand, cpu, memory);
                cpu.y = value;
                cpu.toggle_zero_negative(value);
            },
            STA => {
                let value = cpu.a;
                write(operand, value, cpu, memory);
            },
            STX => {
                let value = cpu.x;
                write(operand, value, cpu, memory);
            },
            STY => {
                let value = cpu.y;
                write(operand, value, cpu, memory);
            },
            TAX => {
                cpu.x = cpu.a;
                cpu.toggle_zero_negative(cpu.x);
            },
            TAY => {
                cpu.y = cpu.a;
                cpu.toggle_zero_negative(cpu.y);
            },
            TXA => {
                cpu.a = cpu.x;
                cpu.toggle_zero_negative(cpu.a);
            },
            TYA => {
                cpu.a = cpu.y;
                cpu.toggle_zero_negative(cpu.a);
            },
            TSX => {
                cpu.x = cpu.sp;
                cpu.toggle_zero_negative(cpu.x);
            },
            TXS => cpu.sp = cpu.x,

            // Arithmetic and logic. The 2A03 has no decimal mode so ADC and SBC
            // are always binary.
            ADC => {
                let value = read(operand, cpu, memory);
                add_with_carry(cpu, value);
            },
            SBC => {
                let value = read(operand, cpu, memory);
                add_with_carry(cpu, !value);
            },
            AND => {
                let result = cpu.a & read(operand, cpu, memory);
                cpu.a = result;
                cpu.toggle_zero_negative(result);
            },
            ORA => {
                let result = cpu.a | read(operand, cpu, memory);
                cpu.a = result;
                cpu.toggle_zero_negative(result);
            },
            EOR => {
                let result = cpu.a ^ read(operand, cpu, memory);
                cpu.a = result;
                cpu.toggle_zero_negative(result);
            },
            BIT => {
                let value = read(operand, cpu, memory);
                cpu.toggle_zero_flag(cpu.a & value);
                cpu.toggle_overflow_flag(bits::is_bit_set(value, 6));
                cpu.toggle_negative_flag(value);
            },
            CMP => {
                let (register, value) = (cpu.a, read(operand, cpu, memory));
                compare(cpu, register, value);
            },
            CPX => {
                let (register, value) = (cpu.x, read(operand, cpu, memory));
                compare(cpu, register, value);
            },
            CPY => {
                let (register, value) = (cpu.y, read(operand, cpu, memory));
                compare(cpu, register, value);
            },

            // Shifts and rotates, either on the accumulator or in memory.
            ASL => {
                let value = read(operand, cpu, memory);
                let result = shift_left(cpu, value, false);
                write(operand, result, cpu, memory);
            },
            LSR => {
                let value = read(operand, cpu, memory);
                let result = shift_right(cpu, value, false);
                write(operand, result, cpu, memory);
            },
            ROL => {
                let (value, carry) = (read(operand, cpu, memory), cpu.carry_flag_set());
                let result = shift_left(cpu, value, carry);
                write(operand, result, cpu, memory);
            },
            ROR => {
                let (value, carry) = (read(operand, cpu, memory), cpu.carry_flag_set());
                let result = shift_right(cpu, value, carry);
                write(operand, result, cpu, memory);
            },

            // Increments and decrements.
            INC => {
                let result = read(operand, cpu, memory).wrapping_add(1);
                write(operand, result, cpu, memory);
                cpu.toggle_zero_negative(result);
            },
            DEC => {
                let result = read(operand, cpu, memory).wrapping_sub(1);
                write(operand, result, cpu, memory);
                cpu.toggle_zero_negative(result);
            },
            INX => {
                cpu.x = cpu.x.wrapping_add(1);
                cpu.toggle_zero_negative(cpu.x);
            },
            INY => {
                cpu.y = cpu.y.wrapping_add(1);
                cpu.toggle_zero_negative(cpu.y);
            },
            DEX => {
                cpu.x = cpu.x.wrapping_sub(1);
                cpu.toggle_zero_negative(cpu.x);
            },
            DEY => {
                cpu.y = cpu.y.wrapping_sub(1);
                cpu.toggle_zero_negative(cpu.y);
            },

            // Stack operations. PHP always pushes the break and unused bits set;
            // PLP takes whatever byte it pulls.
            PHA => {
                let value = cpu.a;
                memory.stack_push_u8(cpu, value);
            },
            PHP => {
                let status = cpu.p | BREAK_COMMAND | UNUSED_FLAG;
                memory.stack_push_u8(cpu, status);
            },
            PLA => {
                let value = memory.stack_pop_u8(cpu);
                cpu.a = value;
                cpu.toggle_zero_negative(value);
            },
            PLP => {
                let status = memory.stack_pop_u8(cpu);
                cpu.p = status;
            },

            // Jumps, subroutines and interrupts.
            JMP => cpu.pc = address(operand),
            JSR => {
                // The return address pushed is the last byte of the JSR, which
                // is why RTS has to add one to it.
                let return_addr = pc.wrapping_add(2);
                memory.stack_push_u16(cpu, return_addr);
                cpu.pc = address(operand);
            },
            RTS => cpu.pc = memory.stack_pop_u16(cpu).wrapping_add(1),
            BRK => {
                // BRK is followed by a padding byte that is skipped on return.
                let return_addr = pc.wrapping_add(2);
                let status = cpu.p | BREAK_COMMAND | UNUSED_FLAG;
                memory.stack_push_u16(cpu, return_addr);
                memory.stack_push_u8(cpu, status);
                cpu.toggle_break_command(true);
                cpu.toggle_interrupt_disable(true);
                cpu.pc = memory.read_u16(IRQ_VECTOR);
            },
            RTI => {
                let status = memory.stack_pop_u8(cpu);
                cpu.p = status;
                cpu.pc = memory.stack_pop_u16(cpu);
            },

            // Branches.
            BCC => {
                let taken = !cpu.carry_flag_set();
                cycles += branch(cpu, taken, operand, page_crossed);
            },
            BCS => {
                let taken = cpu.carry_flag_set();
                cycles += branch(cpu, taken, operand, page_crossed);
            },
            BEQ => {
                let taken = cpu.zero_flag_set();
                cycles += branch(cpu, taken, operand, page_crossed);
            },
            BNE => {
                let taken = !cpu.zero_flag_set();
                cycles += branch(cpu, taken, operand, page_crossed);
            },
            BMI => {
                let taken = cpu.negative_flag_set();
                cycles += branch(cpu, taken, operand, page_crossed);
            },
            BPL => {
                let taken = !cpu.negative_flag_set();
                cycles += branch(cpu, taken, operand, page_crossed);
            },
            BVC => {
                let taken = !cpu.overflow_flag_set();
                cycles += branch(cpu, taken, operand, page_crossed);
            },
            BVS => {
                let taken = cpu.overflow_flag_set();
                cycles += branch(cpu, taken, operand, page_crossed);
            },

            // Flag instructions.
            CLC => cpu.toggle_carry_flag(false),
            SEC => cpu.toggle_carry_flag(true),
            CLI => cpu.toggle_interrupt_disable(false),
            SEI => cpu.toggle_interrupt_disable(true),
            CLV => cpu.toggle_overflow_flag(false),
            CLD => cpu.toggle_decimal_mode(false),
            SED => cpu.toggle_decimal_mode(true),

            // The operand of unofficial NOPs is fetched and discarded, which
            // has no effect on plain memory. KIL would lock up the real CPU;
            // here it only burns its cycles.
            NOP | KIL => {},

            // Unofficial read-modify-write combinations.
            SLO => {
                let value = read(operand, cpu, memory);
                let result = shift_left(cpu, value, false);
                write(operand, result, cpu, memory);
                cpu.a |= result;
                cpu.toggle_zero_negative(cpu.a);
            },
            RLA => {
                let (value, carry) = (read(operand, cpu, memory), cpu.carry_flag_set());
                let result = shift_left(cpu, value, carry);
                write(operand, result, cpu, memory);
                cpu.a &= result;
                cpu.toggle_zero_negative(cpu.a);
            },
            SRE => {
                let value = read(operand, cpu, memory);
                let result = shift_right(cpu, value, false);
                write(operand, result, cpu, memory);
                cpu.a ^= result;
                cpu.toggle_zero_negative(cpu.a);
            },
            RRA => {
                let (value, carry) = (read(operand, cpu, memory), cpu.carry_flag_set());
                let result = shift_right(cpu, value, carry);
                write(operand, result, cpu, memory);
                add_with_carry(cpu, result);
            },
            DCP => {
                let result = read(operand, cpu, memory).wrapping_sub(1);
                write(operand, result, cpu, memory);
                let register = cpu.a;
                compare(cpu, register, result);
            },
            ISB => {
                let result = read(operand, cpu, memory).wrapping_add(1);
                write(operand, result, cpu, memory);
                add_with_carry(cpu, !result);
            },

            // Unofficial loads and stores.
            LAX => {
                let value = read(operand, cpu, memory);
                cpu.a = value;
                cpu.x = value;
                cpu.toggle_zero_negative(value);
            },
            SAX => {
                let value = cpu.a & cpu.x;
                write(operand, value, cpu, memory);
            },
            LAS => {
                let value = read(operand, cpu, memory) & cpu.sp;
                cpu.a = value;
                cpu.x = value;
                cpu.sp = value;
                cpu.toggle_zero_negative(value);
            },
            AHX => {
                let value = high_byte_mask(cpu.a & cpu.x, operand);
                write(operand, value, cpu, memory);
            },
            SHX => {
                let value = high_byte_mask(cpu.x, operand);
                write(operand, value, cpu, memory);
            },
            SHY => {
                let value = high_byte_mask(cpu.y, operand);
                write(operand, value, cpu, memory);
            },
            TAS => {
                cpu.sp = cpu.a & cpu.x;
                let value = high_byte_mask(cpu.sp, operand);
                write(operand, value, cpu, memory);
            },

            // Unofficial immediate operations.
            ANC => {
                let result = cpu.a & read(operand, cpu, memory);
                cpu.a = result;
                cpu.toggle_zero_negative(result);
                cpu.toggle_carry_flag(arithmetic::is_negative(result));
            },
            ALR => {
                let value = cpu.a & read(operand, cpu, memory);
                cpu.a = shift_right(cpu, value, false);
            },
            ARR => {
                let value = cpu.a & read(operand, cpu, memory);
                let result = (value >> 1) | ((cpu.carry_flag_set() as u8) << 7);
                cpu.a = result;
                cpu.toggle_zero_negative(result);
                cpu.toggle_carry_flag(bits::is_bit_set(result, 6));
                cpu.toggle_overflow_flag(bits::is_bit_set(result, 6) != bits::is_bit_set(result, 5));
            },
            AXS => {
                let (register, value) = (cpu.a & cpu.x, read(operand, cpu, memory));
                let result = register.wrapping_sub(value);
                cpu.toggle_carry_flag(register >= value);
                cpu.x = result;
                cpu.toggle_zero_negative(result);
            },
            XAA => {
                let result = cpu.x & read(operand, cpu, memory);
                cpu.a = result;
                cpu.toggle_zero_negative(result);
            },
        }

        cycles
    }

    /// Disassembles the instruction the way Nintendulator logs do, including
    /// the effective address and the value stored there, e.g.
    /// `LDA ($80,X) @ 80 = 0200 = 5A`. Unofficial opcodes are prefixed with an
    /// asterisk. Memory is only read, so this is safe to call before executing.
    pub fn disassemble(&self, opcode: Opcode, cpu: &CPU, memory: &Memory) -> String {
        let info = opcode.info();
        let Instruction(_, arg1, arg2) = *self;
        let absolute = bits::combine_low_high(arg1, arg2);
        let (operand, _) = addressing::resolve(info.mode, self, cpu, memory);
        let addr = address(operand);
        let value = memory.read_u8(addr);

        let args = match info.mode {
            AddressingMode::Implied => String::new(),
            AddressingMode::Accumulator => String::from("A"),
            AddressingMode::Immediate => format!("#${:02X}", arg1),
            AddressingMode::ZeroPage => format!("${:02X} = {:02X}", arg1, value),
            AddressingMode::ZeroPageX => format!("${:02X},X @ {:02X} = {:02X}", arg1, addr, value),
            AddressingMode::ZeroPageY => format!("${:02X},Y @ {:02X} = {:02X}", arg1, addr, value),
            AddressingMode::Absolute => match info.mnemonic {
                Mnemonic::JMP | Mnemonic::JSR => format!("${:04X}", absolute),
                _ => format!("${:04X} = {:02X}", absolute, value),
            },
            AddressingMode::AbsoluteX => format!("${:04X},X @ {:04X} = {:02X}", absolute, addr, value),
            AddressingMode::AbsoluteY => format!("${:04X},Y @ {:04X} = {:02X}", absolute, addr, value),
            AddressingMode::Indirect => format!("(${:04X}) = {:04X}", absolute, addr),
            AddressingMode::IndexedIndirect =>
                format!("(${:02X},X) @ {:02X} = {:04X} = {:02X}", arg1, arg1.wrapping_add(cpu.x), addr, value),
            AddressingMode::IndirectIndexed =>
                format!("(${:02X}),Y = {:04X} @ {:04X} = {:02X}",
                        arg1, memory.read_u16_zero_page(arg1), addr, value),
            AddressingMode::Relative => format!("${:04X}", addr),
        };

        let prefix = if opcode.is_official() { "" } else { "*" };
        if args.is_empty() {
            format!("{}{}", prefix, info.mnemonic)
        } else {
            format!("{}{} {}", prefix, info.mnemonic, args)
        }
    }
}

/// Reads the value an operand refers to.
#[inline(always)]
fn read(operand: Operand, cpu: &CPU, memory: &Memory) -> u8 {
    match operand {
        Operand::Immediate(value) => value,
        Operand::Address(addr) => memory.read_u8(addr),
        Operand::Accumulator => cpu.a,
        Operand::None => 0,
    }
}

/// Writes a value back to where an operand was read from. Immediate and
/// implied operands have nowhere to write to.
#[inline(always)]
fn write(operand: Operand, value: u8, cpu: &mut CPU, memory: &mut Memory) {
    match operand {
        Operand::Address(addr) => memory.write_u8(addr, value),
        Operand::Accumulator => cpu.a = value,
        Operand::Immediate(_) | Operand::None => {},
    }
}

#[inline(always)]
fn address(operand: Operand) -> u16 {
    match operand {
        Operand::Address(addr) => addr,
        _ => 0,
    }
}

/// A + M + C, setting carry, overflow, zero and negative. SBC goes through
/// here with the operand inverted.
fn add_with_carry(cpu: &mut CPU, value: u8) {
    let (result, carry, overflow) = arithmetic::add_with_carry(cpu.a, value, cpu.carry_flag_set());
    cpu.a = result;
    cpu.toggle_carry_flag(carry);
    cpu.toggle_overflow_flag(overflow);
    cpu.toggle_zero_negative(result);
}

fn compare(cpu: &mut CPU, register: u8, value: u8) {
    cpu.toggle_carry_flag(register >= value);
    cpu.toggle_zero_negative(register.wrapping_sub(value));
}

/// Shifts left, moving bit 7 into carry and `carry_in` into bit 0.
fn shift_left(cpu: &mut CPU, value: u8, carry_in: bool) -> u8 {
    let result = (value << 1) | carry_in as u8;
    cpu.toggle_carry_flag(arithmetic::is_negative(value));
    cpu.toggle_zero_negative(result);
    result
}

/// Shifts right, moving bit 0 into carry and `carry_in` into bit 7.
fn shift_right(cpu: &mut CPU, value: u8, carry_in: bool) -> u8 {
    let result = (value >> 1) | ((carry_in as u8) << 7);
    cpu.toggle_carry_flag(bits::is_bit_set(value, 0));
    cpu.toggle_zero_negative(result);
    result
}

/// Takes a branch if the condition holds. Returns the extra cycles: one for
/// taking the branch and another if the target is on a different page.
fn branch(cpu: &mut CPU, condition: bool, operand: Operand, page_crossed: bool) -> u8 {
    if !condition {
        return 0;
    }

    cpu.pc = address(operand);
    if page_crossed { 2 } else { 1 }
}

/// The unstable stores (AHX, SHX, SHY, TAS) AND the stored value with the
/// high byte of the target address plus one.
#[inline(always)]
fn high_byte_mask(value: u8, operand: Operand) -> u8 {
    let (_, high) = bits::split_low_high(address(operand));
    value & high.wrapping_add(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nes::cpu::CPU;
    use nes::memory::Memory;
    use nes::opcode::{decode_opcode, Mnemonic, Opcode};

    const ORIGIN: u16 = 0x0600;

    fn cpu_with_program(program: &[u8]) -> (CPU, Memory) {
        let mut memory = Memory::new();
        memory.memdump(ORIGIN, program);
        let mut cpu = CPU::new();
        cpu.pc = ORIGIN;
        (cpu, memory)
    }

    fn step(cpu: &mut CPU, memory: &mut Memory) -> u8 {
        cpu.execute(memory).unwrap()
    }

    #[test]
    fn adc_flags_for_every_input() {
        let mut cpu = CPU::new();
        let mut memory = Memory::new();

        for a in 0..256u16 {
            for m in 0..256u16 {
                for c in 0..2u16 {
                    cpu.a = a as u8;
                    cpu.p = 0x24 | c as u8;
                    Instruction(0x69, m as u8, 0).execute(Opcode::ADCImm, &mut cpu, &mut memory);

                    let sum = a + m + c;
                    let signed = a as u8 as i8 as i16 + m as u8 as i8 as i16 + c as i16;
                    assert_eq!(cpu.a, sum as u8);
                    assert_eq!(cpu.carry_flag_set(), sum > 0xFF);
                    assert_eq!(cpu.overflow_flag_set(), signed < -128 || signed > 127,
                               "ADC {:02X} + {:02X} + {}", a, m, c);
                    assert_eq!(cpu.zero_flag_set(), sum as u8 == 0);
                    assert_eq!(cpu.negative_flag_set(), sum as u8 & 0x80 != 0);
                }
            }
        }
    }

    #[test]
    fn sbc_flags_for_every_input() {
        let mut cpu = CPU::new();
        let mut memory = Memory::new();

        for a in 0..256i16 {
            for m in 0..256i16 {
                for c in 0..2i16 {
                    cpu.a = a as u8;
                    cpu.p = 0x24 | c as u8;
                    Instruction(0xE9, m as u8, 0).execute(Opcode::SBCImm, &mut cpu, &mut memory);

                    let diff = a - m - (1 - c);
                    let signed = a as u8 as i8 as i16 - m as u8 as i8 as i16 - (1 - c);
                    assert_eq!(cpu.a, diff as u8);
                    assert_eq!(cpu.carry_flag_set(), diff >= 0);
                    assert_eq!(cpu.overflow_flag_set(), signed < -128 || signed > 127,
                               "SBC {:02X} - {:02X} - {}", a, m, 1 - c);
                    assert_eq!(cpu.zero_flag_set(), diff as u8 == 0);
                    assert_eq!(cpu.negative_flag_set(), diff as u8 & 0x80 != 0);
                }
            }
        }
    }

    #[test]
    fn adc_is_uniform_across_addressing_modes() {
        let programs: [&[u8]; 8] = [
            &[0x69, 0x50],
            &[0x65, 0x10],
            &[0x75, 0x10],
            &[0x6D, 0x00, 0x03],
            &[0x7D, 0x00, 0x03],
            &[0x79, 0x00, 0x03],
            &[0x61, 0x20],
            &[0x71, 0x30],
        ];

        for program in programs.iter() {
            let (mut cpu, mut memory) = cpu_with_program(program);
            cpu.x = 0x01;
            cpu.y = 0x02;
            cpu.a = 0x50;
            memory.write_u8(0x0010, 0x50);
            memory.write_u8(0x0011, 0x50);
            memory.write_u8(0x0300, 0x50);
            memory.write_u8(0x0301, 0x50);
            memory.write_u8(0x0302, 0x50);
            memory.write_u16(0x0021, 0x0400);
            memory.write_u8(0x0400, 0x50);
            memory.write_u16(0x0030, 0x0500);
            memory.write_u8(0x0502, 0x50);

            step(&mut cpu, &mut memory);
            assert_eq!(cpu.a, 0xA0, "opcode {:02X}", program[0]);
            assert!(cpu.overflow_flag_set());
            assert!(cpu.negative_flag_set());
            assert!(!cpu.carry_flag_set());
            assert_eq!(cpu.pc, ORIGIN + program.len() as u16);
        }
    }

    #[test]
    fn decimal_mode_is_ignored() {
        let (mut cpu, mut memory) = cpu_with_program(&[0xF8, 0x69, 0x09]);
        cpu.a = 0x09;
        step(&mut cpu, &mut memory);
        step(&mut cpu, &mut memory);
        assert!(cpu.decimal_mode_set());
        assert_eq!(cpu.a, 0x12);
    }

    #[test]
    fn logical_operations() {
        let (mut cpu, mut memory) = cpu_with_program(&[0x29, 0x0F, 0x09, 0x80, 0x49, 0xFF]);
        cpu.a = 0xF0;
        step(&mut cpu, &mut memory);
        assert_eq!(cpu.a, 0x00);
        assert!(cpu.zero_flag_set());
        step(&mut cpu, &mut memory);
        assert_eq!(cpu.a, 0x80);
        assert!(cpu.negative_flag_set() && !cpu.zero_flag_set());
        step(&mut cpu, &mut memory);
        assert_eq!(cpu.a, 0x7F);
        assert!(!cpu.negative_flag_set());
    }

    #[test]
    fn shifts_and_rotates() {
        // ASL A; LSR $10; ROL A; ROR $11
        let (mut cpu, mut memory) = cpu_with_program(&[0x0A, 0x46, 0x10, 0x2A, 0x66, 0x11]);
        cpu.a = 0x81;
        memory.write_u8(0x0010, 0x01);
        memory.write_u8(0x0011, 0x02);

        step(&mut cpu, &mut memory);
        assert_eq!(cpu.a, 0x02);
        assert!(cpu.carry_flag_set());

        assert_eq!(step(&mut cpu, &mut memory), 5);
        assert_eq!(memory.read_u8(0x0010), 0x00);
        assert!(cpu.carry_flag_set() && cpu.zero_flag_set());

        step(&mut cpu, &mut memory);
        assert_eq!(cpu.a, 0x05);
        assert!(!cpu.carry_flag_set());

        cpu.toggle_carry_flag(true);
        step(&mut cpu, &mut memory);
        assert_eq!(memory.read_u8(0x0011), 0x81);
        assert!(!cpu.carry_flag_set() && cpu.negative_flag_set());
    }

    #[test]
    fn bit_tests_without_changing_a() {
        let (mut cpu, mut memory) = cpu_with_program(&[0x24, 0x10, 0x2C, 0x11, 0x00]);
        memory.write_u8(0x0010, 0xC0);
        memory.write_u8(0x0011, 0x01);
        cpu.a = 0x01;

        step(&mut cpu, &mut memory);
        assert!(cpu.zero_flag_set() && cpu.overflow_flag_set() && cpu.negative_flag_set());
        step(&mut cpu, &mut memory);
        assert!(!cpu.zero_flag_set() && !cpu.overflow_flag_set() && !cpu.negative_flag_set());
        assert_eq!(cpu.a, 0x01);
    }

    #[test]
    fn compares() {
        let (mut cpu, mut memory) = cpu_with_program(&[0xC9, 0x20, 0xE0, 0x05, 0xC0, 0x01]);
        cpu.a = 0x10;
        cpu.x = 0x05;
        cpu.y = 0x80;

        step(&mut cpu, &mut memory);
        assert!(!cpu.carry_flag_set() && !cpu.zero_flag_set() && cpu.negative_flag_set());
        step(&mut cpu, &mut memory);
        assert!(cpu.carry_flag_set() && cpu.zero_flag_set() && !cpu.negative_flag_set());
        step(&mut cpu, &mut memory);
        assert!(cpu.carry_flag_set() && !cpu.zero_flag_set() && !cpu.negative_flag_set());
    }

    #[test]
    fn increments_and_decrements_wrap() {
        let (mut cpu, mut memory) = cpu_with_program(&[0xC6, 0x10, 0xE8, 0xEE, 0x00, 0x03, 0x88]);
        cpu.x = 0xFF;
        cpu.y = 0x00;
        memory.write_u8(0x0300, 0x7F);

        step(&mut cpu, &mut memory);
        assert_eq!(memory.read_u8(0x0010), 0xFF);
        assert!(cpu.negative_flag_set());
        step(&mut cpu, &mut memory);
        assert_eq!(cpu.x, 0x00);
        assert!(cpu.zero_flag_set());
        assert_eq!(step(&mut cpu, &mut memory), 6);
        assert_eq!(memory.read_u8(0x0300), 0x80);
        step(&mut cpu, &mut memory);
        assert_eq!(cpu.y, 0xFF);
    }

    #[test]
    fn stores_leave_flags_alone() {
        let (mut cpu, mut memory) = cpu_with_program(&[0xA9, 0x00, 0x8D, 0x00, 0x03, 0x86, 0x10, 0x8C, 0x01, 0x03]);
        cpu.x = 0x80;
        cpu.y = 0x7F;
        step(&mut cpu, &mut memory);
        assert!(cpu.zero_flag_set());
        step(&mut cpu, &mut memory);
        step(&mut cpu, &mut memory);
        step(&mut cpu, &mut memory);
        assert!(cpu.zero_flag_set() && !cpu.negative_flag_set());
        assert_eq!(memory.read_u8(0x0010), 0x80);
        assert_eq!(memory.read_u8(0x0301), 0x7F);
    }

    #[test]
    fn transfers() {
        let (mut cpu, mut memory) = cpu_with_program(&[0x9A, 0xBA, 0xAA, 0xA8, 0x8A, 0x98]);
        cpu.x = 0x00;
        cpu.a = 0x90;
        cpu.p = 0x24;

        step(&mut cpu, &mut memory);
        assert_eq!(cpu.sp, 0x00);
        assert!(!cpu.zero_flag_set());
        step(&mut cpu, &mut memory);
        assert!(cpu.zero_flag_set());
        step(&mut cpu, &mut memory);
        assert_eq!(cpu.x, 0x90);
        assert!(cpu.negative_flag_set());
        step(&mut cpu, &mut memory);
        assert_eq!(cpu.y, 0x90);

        cpu.x = 0x01;
        cpu.y = 0x00;
        step(&mut cpu, &mut memory);
        assert_eq!(cpu.a, 0x01);
        step(&mut cpu, &mut memory);
        assert_eq!(cpu.a, 0x00);
        assert!(cpu.zero_flag_set());
    }

    #[test]
    fn branch_cycles() {
        // Not taken.
        let (mut cpu, mut memory) = cpu_with_program(&[0xD0, 0x04]);
        cpu.toggle_zero_flag(0);
        assert_eq!(step(&mut cpu, &mut memory), 2);
        assert_eq!(cpu.pc, 0x0602);

        // Taken, same page.
        let (mut cpu, mut memory) = cpu_with_program(&[0xD0, 0x04]);
        cpu.toggle_zero_flag(1);
        assert_eq!(step(&mut cpu, &mut memory), 3);
        assert_eq!(cpu.pc, 0x0606);

        // Taken backwards into the previous page.
        let (mut cpu, mut memory) = cpu_with_program(&[0x90, 0xFC]);
        assert_eq!(step(&mut cpu, &mut memory), 4);
        assert_eq!(cpu.pc, 0x05FE);

        // Taken forwards across a page.
        let mut memory = Memory::new();
        memory.memdump(0x06FD, &[0x10, 0x04]);
        let mut cpu = CPU::new();
        cpu.pc = 0x06FD;
        assert_eq!(step(&mut cpu, &mut memory), 4);
        assert_eq!(cpu.pc, 0x0703);
    }

    #[test]
    fn every_branch_tests_its_flag() {
        let cases = [
            (0x90, 0x01, false), (0xB0, 0x01, true),
            (0xF0, 0x02, true),  (0xD0, 0x02, false),
            (0x30, 0x80, true),  (0x10, 0x80, false),
            (0x70, 0x40, true),  (0x50, 0x40, false),
        ];

        for &(opcode, flag, taken_when_set) in cases.iter() {
            for &set in [true, false].iter() {
                let (mut cpu, mut memory) = cpu_with_program(&[opcode, 0x10]);
                cpu.p = if set { 0x20 | flag } else { 0x20 };
                step(&mut cpu, &mut memory);
                let expected = if set == taken_when_set { 0x0612 } else { 0x0602 };
                assert_eq!(cpu.pc, expected, "opcode {:02X} with flag set: {}", opcode, set);
            }
        }
    }

    #[test]
    fn page_cross_penalty_applies_to_reads_only() {
        let (mut cpu, mut memory) = cpu_with_program(&[0xBD, 0xFF, 0x02, 0xBD, 0x00, 0x02, 0x9D, 0x00, 0x02,
                                                       0x1C, 0xFF, 0x02]);
        cpu.x = 0x01;
        assert_eq!(step(&mut cpu, &mut memory), 5);
        assert_eq!(step(&mut cpu, &mut memory), 4);
        assert_eq!(step(&mut cpu, &mut memory), 5);
        assert_eq!(step(&mut cpu, &mut memory), 5);
    }

    #[test]
    fn php_sets_break_bits_and_plp_restores_them_verbatim() {
        let (mut cpu, mut memory) = cpu_with_program(&[0x08, 0x28, 0x28]);
        cpu.p = 0xC3;
        step(&mut cpu, &mut memory);
        assert_eq!(memory.read_u8(0x01FC), 0xF3);
        assert_eq!(memory.read_u8(0x01FD), 0x00);
        assert_eq!(cpu.sp, 0xFC);

        step(&mut cpu, &mut memory);
        assert_eq!(cpu.p, 0xF3);
        assert_eq!(cpu.sp, 0xFD);

        // The unused bit is not forced on.
        memory.write_u8(0x01FC, 0x00);
        cpu.sp = 0xFC;
        step(&mut cpu, &mut memory);
        assert_eq!(cpu.p, 0x00);
    }

    #[test]
    fn pla_then_plp_takes_the_pulled_byte() {
        // LDA #$00; PHA; PLP
        let (mut cpu, mut memory) = cpu_with_program(&[0xA9, 0x00, 0x48, 0x28]);
        cpu.p = 0x24;
        for _ in 0..3 {
            step(&mut cpu, &mut memory);
        }
        assert_eq!(cpu.p, 0x00);
        assert!(!cpu.break_command_set());
    }

    #[test]
    fn pha_and_pla() {
        let (mut cpu, mut memory) = cpu_with_program(&[0x48, 0xA9, 0x01, 0x68]);
        cpu.a = 0x80;
        assert_eq!(step(&mut cpu, &mut memory), 3);
        step(&mut cpu, &mut memory);
        assert_eq!(step(&mut cpu, &mut memory), 4);
        assert_eq!(cpu.a, 0x80);
        assert!(cpu.negative_flag_set());
        assert_eq!(cpu.sp, 0xFD);
    }

    #[test]
    fn jsr_pushes_last_byte_and_rts_returns_after_it() {
        let (mut cpu, mut memory) = cpu_with_program(&[0x20, 0x00, 0x07]);
        memory.write_u8(0x0700, 0x60);

        assert_eq!(step(&mut cpu, &mut memory), 6);
        assert_eq!(cpu.pc, 0x0700);
        assert_eq!(memory.read_u8(0x01FC), 0x06);
        assert_eq!(memory.read_u8(0x01FB), 0x02);

        assert_eq!(step(&mut cpu, &mut memory), 6);
        assert_eq!(cpu.pc, 0x0603);
        assert_eq!(cpu.sp, 0xFD);
    }

    #[test]
    fn brk_and_rti() {
        let (mut cpu, mut memory) = cpu_with_program(&[0x00, 0xFF]);
        memory.write_u16(IRQ_VECTOR, 0x0800);
        memory.write_u8(0x0800, 0x40);
        cpu.p = 0xA5;

        assert_eq!(step(&mut cpu, &mut memory), 7);
        assert_eq!(cpu.pc, 0x0800);
        assert!(cpu.break_command_set() && cpu.interrupt_disable_set());
        assert_eq!(memory.read_u16(0x01FB), 0x0602);
        assert_eq!(memory.read_u8(0x01FA), 0xB5);

        // The status comes back as BRK pushed it, break bit included.
        assert_eq!(step(&mut cpu, &mut memory), 6);
        assert_eq!(cpu.pc, 0x0602);
        assert_eq!(cpu.p, 0xB5);
        assert!(cpu.break_command_set());
        assert_eq!(cpu.sp, 0xFD);
    }

    #[test]
    fn indirect_jump_reads_high_byte_from_same_page() {
        let (mut cpu, mut memory) = cpu_with_program(&[0x6C, 0xFF, 0x02]);
        memory.write_u8(0x02FF, 0x34);
        memory.write_u8(0x0200, 0x12);
        memory.write_u8(0x0300, 0x56);
        assert_eq!(step(&mut cpu, &mut memory), 5);
        assert_eq!(cpu.pc, 0x1234);
    }

    #[test]
    fn unofficial_loads_and_stores() {
        // LAX $10; SAX $11; LAX #$0F
        let (mut cpu, mut memory) = cpu_with_program(&[0xA7, 0x10, 0x87, 0x11, 0xAB, 0x0F]);
        memory.write_u8(0x0010, 0x8F);
        step(&mut cpu, &mut memory);
        assert_eq!((cpu.a, cpu.x), (0x8F, 0x8F));
        assert!(cpu.negative_flag_set());

        cpu.x = 0xF1;
        step(&mut cpu, &mut memory);
        assert_eq!(memory.read_u8(0x0011), 0x81);

        step(&mut cpu, &mut memory);
        assert_eq!((cpu.a, cpu.x), (0x0F, 0x0F));
    }

    #[test]
    fn unofficial_read_modify_write() {
        // DCP $10; ISB $11; SLO $12; RLA $13; SRE $14; RRA $15
        let program = [0xC7, 0x10, 0xE7, 0x11, 0x07, 0x12, 0x27, 0x13, 0x47, 0x14, 0x67, 0x15];
        let (mut cpu, mut memory) = cpu_with_program(&program);
        memory.memdump(0x0010, &[0x41, 0x0F, 0x81, 0x40, 0x03, 0x02]);

        cpu.a = 0x40;
        assert_eq!(step(&mut cpu, &mut memory), 5);
        assert_eq!(memory.read_u8(0x0010), 0x40);
        assert!(cpu.zero_flag_set() && cpu.carry_flag_set());

        // 0x40 - 0x10 with carry set.
        step(&mut cpu, &mut memory);
        assert_eq!(memory.read_u8(0x0011), 0x10);
        assert_eq!(cpu.a, 0x30);
        assert!(cpu.carry_flag_set());

        step(&mut cpu, &mut memory);
        assert_eq!(memory.read_u8(0x0012), 0x02);
        assert_eq!(cpu.a, 0x32);
        assert!(cpu.carry_flag_set());

        // Rotates the carry in: 0x40 -> 0x81.
        step(&mut cpu, &mut memory);
        assert_eq!(memory.read_u8(0x0013), 0x81);
        assert_eq!(cpu.a, 0x00);
        assert!(!cpu.carry_flag_set() && cpu.zero_flag_set());

        step(&mut cpu, &mut memory);
        assert_eq!(memory.read_u8(0x0014), 0x01);
        assert_eq!(cpu.a, 0x01);
        assert!(cpu.carry_flag_set());

        // 0x02 rotated right with carry in is 0x81, then 0x01 + 0x81 + 0.
        step(&mut cpu, &mut memory);
        assert_eq!(memory.read_u8(0x0015), 0x81);
        assert_eq!(cpu.a, 0x82);
        assert!(!cpu.carry_flag_set() && cpu.negative_flag_set());
    }

    #[test]
    fn unofficial_immediates() {
        // ANC #$80; ALR #$03; ARR #$FF; AXS #$01
        let (mut cpu, mut memory) = cpu_with_program(&[0x0B, 0x80, 0x4B, 0x03, 0x6B, 0xFF, 0xCB, 0x01]);
        cpu.a = 0xC0;
        step(&mut cpu, &mut memory);
        assert_eq!(cpu.a, 0x80);
        assert!(cpu.carry_flag_set() && cpu.negative_flag_set());

        cpu.a = 0x07;
        step(&mut cpu, &mut memory);
        assert_eq!(cpu.a, 0x01);
        assert!(cpu.carry_flag_set());

        cpu.a = 0xC0;
        step(&mut cpu, &mut memory);
        assert_eq!(cpu.a, 0xE0);
        assert!(cpu.carry_flag_set() && !cpu.overflow_flag_set());

        cpu.a = 0x0F;
        cpu.x = 0x03;
        step(&mut cpu, &mut memory);
        assert_eq!(cpu.x, 0x02);
        assert!(cpu.carry_flag_set());
    }

    #[test]
    fn unofficial_nops_consume_operands() {
        let cases: [(&[u8], u16, u8); 6] = [
            (&[0x04, 0x10], 2, 3),
            (&[0x14, 0x10], 2, 4),
            (&[0x0C, 0x00, 0x03], 3, 4),
            (&[0x80, 0x10], 2, 2),
            (&[0x1A], 1, 2),
            (&[0x02], 1, 2),
        ];

        for &(program, len, cycles) in cases.iter() {
            let (mut cpu, mut memory) = cpu_with_program(program);
            assert_eq!(step(&mut cpu, &mut memory), cycles, "opcode {:02X}", program[0]);
            assert_eq!(cpu.pc, ORIGIN + len);
            assert_eq!((cpu.a, cpu.x, cpu.y, cpu.p, cpu.sp), (0, 0, 0, 0x24, 0xFD));
        }
    }

    #[test]
    fn every_opcode_advances_pc_by_its_length() {
        for byte in 0..256u16 {
            let opcode = decode_opcode(byte as u8).unwrap();
            let info = opcode.info();
            let transfers = match info.mnemonic {
                Mnemonic::JMP | Mnemonic::JSR | Mnemonic::RTS | Mnemonic::RTI | Mnemonic::BRK => true,
                _ => info.mode == AddressingMode::Relative,
            };
            if transfers {
                continue;
            }

            let (mut cpu, mut memory) = cpu_with_program(&[byte as u8, 0x10, 0x03]);
            let cycles = step(&mut cpu, &mut memory);
            assert_eq!(cpu.pc, ORIGIN + opcode.len() as u16, "opcode {:02X}", byte);
            assert!(cycles >= 2 && cycles <= 8, "opcode {:02X} took {} cycles", byte, cycles);
        }
    }

    #[test]
    fn disassembles_like_nintendulator() {
        let mut memory = Memory::new();
        let mut cpu = CPU::new();
        cpu.x = 0x01;
        cpu.y = 0x02;
        memory.write_u8(0x0010, 0xAB);
        memory.write_u16(0x0080, 0x0200);
        memory.write_u8(0x0200, 0x5A);
        memory.write_u16(0x0090, 0x0300);
        memory.write_u8(0x0302, 0x89);
        memory.write_u16(0x0400, 0xDB7E);

        let cases: [(Instruction, &str); 10] = [
            (Instruction(0x4C, 0xF5, 0xC5), "JMP $C5F5"),
            (Instruction(0xA9, 0x05, 0x00), "LDA #$05"),
            (Instruction(0x85, 0x10, 0x00), "STA $10 = AB"),
            (Instruction(0xB5, 0x0F, 0x00), "LDA $0F,X @ 10 = AB"),
            (Instruction(0xAD, 0x00, 0x02), "LDA $0200 = 5A"),
            (Instruction(0xA1, 0x7F, 0x00), "LDA ($7F,X) @ 80 = 0200 = 5A"),
            (Instruction(0xB1, 0x90, 0x00), "LDA ($90),Y = 0300 @ 0302 = 89"),
            (Instruction(0x6C, 0x00, 0x04), "JMP ($0400) = DB7E"),
            (Instruction(0x4A, 0x00, 0x00), "LSR A"),
            (Instruction(0x04, 0x10, 0x00), "*NOP $10 = AB"),
        ];

        for &(instr, expected) in cases.iter() {
            let opcode = instr.opcode().unwrap();
            assert_eq!(instr.disassemble(opcode, &cpu, &memory), expected);
        }

        cpu.pc = 0xC72A;
        let branch = Instruction(0xB0, 0x04, 0x00);
        assert_eq!(branch.disassemble(branch.opcode().unwrap(), &cpu, &memory), "BCS $C730");
        assert_eq!(branch.bytes(2), vec![0xB0, 0x04]);
    }
}
