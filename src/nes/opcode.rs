// Copyright 2016 Walter Kuppens.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use enum_primitive::FromPrimitive;
use nes::addressing::AddressingMode;
use std::fmt;

// Every byte value maps to an opcode. Variants are named after their mnemonic
// and addressing mode; unofficial opcodes that share both with another opcode
// carry their value as a suffix (e.g. `NOPImp1A`).
enum_from_primitive! {
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub enum Opcode {
        BRKImp     = 0x00,
        ORAIndX    = 0x01,
        KIL02      = 0x02,
        SLOIndX    = 0x03,
        NOPZero04  = 0x04,
        ORAZero    = 0x05,
        ASLZero    = 0x06,
        SLOZero    = 0x07,
        PHPImp     = 0x08,
        ORAImm     = 0x09,
        ASLAcc     = 0x0A,
        ANCImm0B   = 0x0B,
        NOPAbs0C   = 0x0C,
        ORAAbs     = 0x0D,
        ASLAbs     = 0x0E,
        SLOAbs     = 0x0F,

        BPLRel     = 0x10,
        ORAIndY    = 0x11,
        KIL12      = 0x12,
        SLOIndY    = 0x13,
        NOPZeroX14 = 0x14,
        ORAZeroX   = 0x15,
        ASLZeroX   = 0x16,
        SLOZeroX   = 0x17,
        CLCImp     = 0x18,
        ORAAbsY    = 0x19,
        NOPImp1A   = 0x1A,
        SLOAbsY    = 0x1B,
        NOPAbsX1C  = 0x1C,
        ORAAbsX    = 0x1D,
        ASLAbsX    = 0x1E,
        SLOAbsX    = 0x1F,

        JSRAbs     = 0x20,
        ANDIndX    = 0x21,
        KIL22      = 0x22,
        RLAIndX    = 0x23,
        BITZero    = 0x24,
        ANDZero    = 0x25,
        ROLZero    = 0x26,
        RLAZero    = 0x27,
        PLPImp     = 0x28,
        ANDImm     = 0x29,
        ROLAcc     = 0x2A,
        ANCImm2B   = 0x2B,
        BITAbs     = 0x2C,
        ANDAbs     = 0x2D,
        ROLAbs     = 0x2E,
        RLAAbs     = 0x2F,

        BMIRel     = 0x30,
        ANDIndY    = 0x31,
        KIL32      = 0x32,
        RLAIndY    = 0x33,
        NOPZeroX34 = 0x34,
        ANDZeroX   = 0x35,
        ROLZeroX   = 0x36,
        RLAZeroX   = 0x37,
        SECImp     = 0x38,
        ANDAbsY    = 0x39,
        NOPImp3A   = 0x3A,
        RLAAbsY    = 0x3B,
        NOPAbsX3C  = 0x3C,
        ANDAbsX    = 0x3D,
        ROLAbsX    = 0x3E,
        RLAAbsX    = 0x3F,

        RTIImp     = 0x40,
        EORIndX    = 0x41,
        KIL42      = 0x42,
        SREIndX    = 0x43,
        NOPZero44  = 0x44,
        EORZero    = 0x45,
        LSRZero    = 0x46,
        SREZero    = 0x47,
        PHAImp     = 0x48,
        EORImm     = 0x49,
        LSRAcc     = 0x4A,
        ALRImm     = 0x4B,
        JMPAbs     = 0x4C,
        EORAbs     = 0x4D,
        LSRAbs     = 0x4E,
        SREAbs     = 0x4F,

        BVCRel     = 0x50,
        EORIndY    = 0x51,
        KIL52      = 0x52,
        SREIndY    = 0x53,
        NOPZeroX54 = 0x54,
        EORZeroX   = 0x55,
        LSRZeroX   = 0x56,
        SREZeroX   = 0x57,
        CLIImp     = 0x58,
        EORAbsY    = 0x59,
        NOPImp5A   = 0x5A,
        SREAbsY    = 0x5B,
        NOPAbsX5C  = 0x5C,
        EORAbsX    = 0x5D,
        LSRAbsX    = 0x5E,
        SREAbsX    = 0x5F,

        RTSImp     = 0x60,
        ADCIndX    = 0x61,
        KIL62      = 0x62,
        RRAIndX    = 0x63,
        NOPZero64  = 0x64,
        ADCZero    = 0x65,
        RORZero    = 0x66,
        RRAZero    = 0x67,
        PLAImp     = 0x68,
        ADCImm     = 0x69,
        RORAcc     = 0x6A,
        ARRImm     = 0x6B,
        JMPInd     = 0x6C,
        ADCAbs     = 0x6D,
        RORAbs     = 0x6E,
        RRAAbs     = 0x6F,

        BVSRel     = 0x70,
        ADCIndY    = 0x71,
        KIL72      = 0x72,
        RRAIndY    = 0x73,
        NOPZeroX74 = 0x74,
        ADCZeroX   = 0x75,
        RORZeroX   = 0x76,
        RRAZeroX   = 0x77,
        SEIImp     = 0x78,
        ADCAbsY    = 0x79,
        NOPImp7A   = 0x7A,
        RRAAbsY    = 0x7B,
        NOPAbsX7C  = 0x7C,
        ADCAbsX    = 0x7D,
        RORAbsX    = 0x7E,
        RRAAbsX    = 0x7F,

        NOPImm80   = 0x80,
        STAIndX    = 0x81,
        NOPImm82   = 0x82,
        SAXIndX    = 0x83,
        STYZero    = 0x84,
        STAZero    = 0x85,
        STXZero    = 0x86,
        SAXZero    = 0x87,
        DEYImp     = 0x88,
        NOPImm89   = 0x89,
        TXAImp     = 0x8A,
        XAAImm     = 0x8B,
        STYAbs     = 0x8C,
        STAAbs     = 0x8D,
        STXAbs     = 0x8E,
        SAXAbs     = 0x8F,

        BCCRel     = 0x90,
        STAIndY    = 0x91,
        KIL92      = 0x92,
        AHXIndY    = 0x93,
        STYZeroX   = 0x94,
        STAZeroX   = 0x95,
        STXZeroY   = 0x96,
        SAXZeroY   = 0x97,
        TYAImp     = 0x98,
        STAAbsY    = 0x99,
        TXSImp     = 0x9A,
        TASAbsY    = 0x9B,
        SHYAbsX    = 0x9C,
        STAAbsX    = 0x9D,
        SHXAbsY    = 0x9E,
        AHXAbsY    = 0x9F,

        LDYImm     = 0xA0,
        LDAIndX    = 0xA1,
        LDXImm     = 0xA2,
        LAXIndX    = 0xA3,
        LDYZero    = 0xA4,
        LDAZero    = 0xA5,
        LDXZero    = 0xA6,
        LAXZero    = 0xA7,
        TAYImp     = 0xA8,
        LDAImm     = 0xA9,
        TAXImp     = 0xAA,
        LAXImm     = 0xAB,
        LDYAbs     = 0xAC,
        LDAAbs     = 0xAD,
        LDXAbs     = 0xAE,
        LAXAbs     = 0xAF,

        BCSRel     = 0xB0,
        LDAIndY    = 0xB1,
        KILB2      = 0xB2,
        LAXIndY    = 0xB3,
        LDYZeroX   = 0xB4,
        LDAZeroX   = 0xB5,
        LDXZeroY   = 0xB6,
        LAXZeroY   = 0xB7,
        CLVImp     = 0xB8,
        LDAAbsY    = 0xB9,
        TSXImp     = 0xBA,
        LASAbsY    = 0xBB,
        LDYAbsX    = 0xBC,
        LDAAbsX    = 0xBD,
        LDXAbsY    = 0xBE,
        LAXAbsY    = 0xBF,

        CPYImm     = 0xC0,
        CMPIndX    = 0xC1,
        NOPImmC2   = 0xC2,
        DCPIndX    = 0xC3,
        CPYZero    = 0xC4,
        CMPZero    = 0xC5,
        DECZero    = 0xC6,
        DCPZero    = 0xC7,
        INYImp     = 0xC8,
        CMPImm     = 0xC9,
        DEXImp     = 0xCA,
        AXSImm     = 0xCB,
        CPYAbs     = 0xCC,
        CMPAbs     = 0xCD,
        DECAbs     = 0xCE,
        DCPAbs     = 0xCF,

        BNERel     = 0xD0,
        CMPIndY    = 0xD1,
        KILD2      = 0xD2,
        DCPIndY    = 0xD3,
        NOPZeroXD4 = 0xD4,
        CMPZeroX   = 0xD5,
        DECZeroX   = 0xD6,
        DCPZeroX   = 0xD7,
        CLDImp     = 0xD8,
        CMPAbsY    = 0xD9,
        NOPImpDA   = 0xDA,
        DCPAbsY    = 0xDB,
        NOPAbsXDC  = 0xDC,
        CMPAbsX    = 0xDD,
        DECAbsX    = 0xDE,
        DCPAbsX    = 0xDF,

        CPXImm     = 0xE0,
        SBCIndX    = 0xE1,
        NOPImmE2   = 0xE2,
        ISBIndX    = 0xE3,
        CPXZero    = 0xE4,
        SBCZero    = 0xE5,
        INCZero    = 0xE6,
        ISBZero    = 0xE7,
        INXImp     = 0xE8,
        SBCImm     = 0xE9,
        NOPImp     = 0xEA,
        SBCImmEB   = 0xEB,
        CPXAbs     = 0xEC,
        SBCAbs     = 0xED,
        INCAbs     = 0xEE,
        ISBAbs     = 0xEF,

        BEQRel     = 0xF0,
        SBCIndY    = 0xF1,
        KILF2      = 0xF2,
        ISBIndY    = 0xF3,
        NOPZeroXF4 = 0xF4,
        SBCZeroX   = 0xF5,
        INCZeroX   = 0xF6,
        ISBZeroX   = 0xF7,
        SEDImp     = 0xF8,
        SBCAbsY    = 0xF9,
        NOPImpFA   = 0xFA,
        ISBAbsY    = 0xFB,
        NOPAbsXFC  = 0xFC,
        SBCAbsX    = 0xFD,
        INCAbsX    = 0xFE,
        ISBAbsX    = 0xFF,
    }
}

/// Instruction families. Opcodes sharing a mnemonic share their semantics and
/// differ only by addressing mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mnemonic {
    ADC,
    AHX,
    ALR,
    ANC,
    AND,
    ARR,
    ASL,
    AXS,
    BCC,
    BCS,
    BEQ,
    BIT,
    BMI,
    BNE,
    BPL,
    BRK,
    BVC,
    BVS,
    CLC,
    CLD,
    CLI,
    CLV,
    CMP,
    CPX,
    CPY,
    DCP,
    DEC,
    DEX,
    DEY,
    EOR,
    INC,
    INX,
    INY,
    ISB,
    JMP,
    JSR,
    KIL,
    LAS,
    LAX,
    LDA,
    LDX,
    LDY,
    LSR,
    NOP,
    ORA,
    PHA,
    PHP,
    PLA,
    PLP,
    RLA,
    ROL,
    ROR,
    RRA,
    RTI,
    RTS,
    SAX,
    SBC,
    SEC,
    SED,
    SEI,
    SHX,
    SHY,
    SLO,
    SRE,
    STA,
    STX,
    STY,
    TAS,
    TAX,
    TAY,
    TSX,
    TXA,
    TXS,
    TYA,
    XAA,
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Static properties of an opcode needed to execute it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpcodeInfo {
    pub mnemonic: Mnemonic,
    pub mode: AddressingMode,

    // Base amount of cycles, not counting page crossing or taken branches.
    pub cycles: u8,

    // Set for instructions that take an additional cycle when indexing
    // crosses a page boundary while resolving the operand.
    pub boundary_sensitive: bool,
}

/// Decodes an opcode by converting an opcode number to an enum value.
#[inline(always)]
pub fn decode_opcode(opcode: u8) -> Option<Opcode> {
    Opcode::from_u8(opcode)
}

impl Opcode {
    /// Looks up the mnemonic, addressing mode and timing of the opcode.
    pub fn info(&self) -> OpcodeInfo {
        use nes::addressing::AddressingMode::*;
        use self::Mnemonic::*;
        use self::Opcode::*;

        let (mnemonic, mode, cycles, boundary_sensitive) = match *self {
            BRKImp     => (BRK, Implied,         7, false),
            ORAIndX    => (ORA, IndexedIndirect, 6, false),
            KIL02      => (KIL, Implied,         2, false),
            SLOIndX    => (SLO, IndexedIndirect, 8, false),
            NOPZero04  => (NOP, ZeroPage,        3, false),
            ORAZero    => (ORA, ZeroPage,        3, false),
            ASLZero    => (ASL, ZeroPage,        5, false),
            SLOZero    => (SLO, ZeroPage,        5, false),
            PHPImp     => (PHP, Implied,         3, false),
            ORAImm     => (ORA, Immediate,       2, false),
            ASLAcc     => (ASL, Accumulator,     2, false),
            ANCImm0B   => (ANC, Immediate,       2, false),
            NOPAbs0C   => (NOP, Absolute,        4, false),
            ORAAbs     => (ORA, Absolute,        4, false),
            ASLAbs     => (ASL, Absolute,        6, false),
            SLOAbs     => (SLO, Absolute,        6, false),

            BPLRel     => (BPL, Relative,        2, false),
            ORAIndY    => (ORA, IndirectIndexed, 5, true ),
            KIL12      => (KIL, Implied,         2, false),
            SLOIndY    => (SLO, IndirectIndexed, 8, false),
            NOPZeroX14 => (NOP, ZeroPageX,       4, false),
            ORAZeroX   => (ORA, ZeroPageX,       4, false),
            ASLZeroX   => (ASL, ZeroPageX,       6, false),
            SLOZeroX   => (SLO, ZeroPageX,       6, false),
            CLCImp     => (CLC, Implied,         2, false),
            ORAAbsY    => (ORA, AbsoluteY,       4, true ),
            NOPImp1A   => (NOP, Implied,         2, false),
            SLOAbsY    => (SLO, AbsoluteY,       7, false),
            NOPAbsX1C  => (NOP, AbsoluteX,       4, true ),
            ORAAbsX    => (ORA, AbsoluteX,       4, true ),
            ASLAbsX    => (ASL, AbsoluteX,       7, false),
            SLOAbsX    => (SLO, AbsoluteX,       7, false),

            JSRAbs     => (JSR, Absolute,        6, false),
            ANDIndX    => (AND, IndexedIndirect, 6, false),
            KIL22      => (KIL, Implied,         2, false),
            RLAIndX    => (RLA, IndexedIndirect, 8, false),
            BITZero    => (BIT, ZeroPage,        3, false),
            ANDZero    => (AND, ZeroPage,        3, false),
            ROLZero    => (ROL, ZeroPage,        5, false),
            RLAZero    => (RLA, ZeroPage,        5, false),
            PLPImp     => (PLP, Implied,         4, false),
            ANDImm     => (AND, Immediate,       2, false),
            ROLAcc     => (ROL, Accumulator,     2, false),
            ANCImm2B   => (ANC, Immediate,       2, false),
            BITAbs     => (BIT, Absolute,        4, false),
            ANDAbs     => (AND, Absolute,        4, false),
            ROLAbs     => (ROL, Absolute,        6, false),
            RLAAbs     => (RLA, Absolute,        6, false),

            BMIRel     => (BMI, Relative,        2, false),
            ANDIndY    => (AND, IndirectIndexed, 5, true ),
            KIL32      => (KIL, Implied,         2, false),
            RLAIndY    => (RLA, IndirectIndexed, 8, false),
            NOPZeroX34 => (NOP, ZeroPageX,       4, false),
            ANDZeroX   => (AND, ZeroPageX,       4, false),
            ROLZeroX   => (ROL, ZeroPageX,       6, false),
            RLAZeroX   => (RLA, ZeroPageX,       6, false),
            SECImp     => (SEC, Implied,         2, false),
            ANDAbsY    => (AND, AbsoluteY,       4, true ),
            NOPImp3A   => (NOP, Implied,         2, false),
            RLAAbsY    => (RLA, AbsoluteY,       7, false),
            NOPAbsX3C  => (NOP, AbsoluteX,       4, true ),
            ANDAbsX    => (AND, AbsoluteX,       4, true ),
            ROLAbsX    => (ROL, AbsoluteX,       7, false),
            RLAAbsX    => (RLA, AbsoluteX,       7, false),

            RTIImp     => (RTI, Implied,         6, false),
            EORIndX    => (EOR, IndexedIndirect, 6, false),
            KIL42      => (KIL, Implied,         2, false),
            SREIndX    => (SRE, IndexedIndirect, 8, false),
            NOPZero44  => (NOP, ZeroPage,        3, false),
            EORZero    => (EOR, ZeroPage,        3, false),
            LSRZero    => (LSR, ZeroPage,        5, false),
            SREZero    => (SRE, ZeroPage,        5, false),
            PHAImp     => (PHA, Implied,         3, false),
            EORImm     => (EOR, Immediate,       2, false),
            LSRAcc     => (LSR, Accumulator,     2, false),
            ALRImm     => (ALR, Immediate,       2, false),
            JMPAbs     => (JMP, Absolute,        3, false),
            EORAbs     => (EOR, Absolute,        4, false),
            LSRAbs     => (LSR, Absolute,        6, false),
            SREAbs     => (SRE, Absolute,        6, false),

            BVCRel     => (BVC, Relative,        2, false),
            EORIndY    => (EOR, IndirectIndexed, 5, true ),
            KIL52      => (KIL, Implied,         2, false),
            SREIndY    => (SRE, IndirectIndexed, 8, false),
            NOPZeroX54 => (NOP, ZeroPageX,       4, false),
            EORZeroX   => (EOR, ZeroPageX,       4, false),
            LSRZeroX   => (LSR, ZeroPageX,       6, false),
            SREZeroX   => (SRE, ZeroPageX,       6, false),
            CLIImp     => (CLI, Implied,         2, false),
            EORAbsY    => (EOR, AbsoluteY,       4, true ),
            NOPImp5A   => (NOP, Implied,         2, false),
            SREAbsY    => (SRE, AbsoluteY,       7, false),
            NOPAbsX5C  => (NOP, AbsoluteX,       4, true ),
            EORAbsX    => (EOR, AbsoluteX,       4, true ),
            LSRAbsX    => (LSR, AbsoluteX,       7, false),
            SREAbsX    => (SRE, AbsoluteX,       7, false),

            RTSImp     => (RTS, Implied,         6, false),
            ADCIndX    => (ADC, IndexedIndirect, 6, false),
            KIL62      => (KIL, Implied,         2, false),
            RRAIndX    => (RRA, IndexedIndirect, 8, false),
            NOPZero64  => (NOP, ZeroPage,        3, false),
            ADCZero    => (ADC, ZeroPage,        3, false),
            RORZero    => (ROR, ZeroPage,        5, false),
            RRAZero    => (RRA, ZeroPage,        5, false),
            PLAImp     => (PLA, Implied,         4, false),
            ADCImm     => (ADC, Immediate,       2, false),
            RORAcc     => (ROR, Accumulator,     2, false),
            ARRImm     => (ARR, Immediate,       2, false),
            JMPInd     => (JMP, Indirect,        5, false),
            ADCAbs     => (ADC, Absolute,        4, false),
            RORAbs     => (ROR, Absolute,        6, false),
            RRAAbs     => (RRA, Absolute,        6, false),

            BVSRel     => (BVS, Relative,        2, false),
            ADCIndY    => (ADC, IndirectIndexed, 5, true ),
            KIL72      => (KIL, Implied,         2, false),
            RRAIndY    => (RRA, IndirectIndexed, 8, false),
            NOPZeroX74 => (NOP, ZeroPageX,       4, false),
            ADCZeroX   => (ADC, ZeroPageX,       4, false),
            RORZeroX   => (ROR, ZeroPageX,       6, false),
            RRAZeroX   => (RRA, ZeroPageX,       6, false),
            SEIImp     => (SEI, Implied,         2, false),
            ADCAbsY    => (ADC, AbsoluteY,       4, true ),
            NOPImp7A   => (NOP, Implied,         2, false),
            RRAAbsY    => (RRA, AbsoluteY,       7, false),
            NOPAbsX7C  => (NOP, AbsoluteX,       4, true ),
            ADCAbsX    => (ADC, AbsoluteX,       4, true ),
            RORAbsX    => (ROR, AbsoluteX,       7, false),
            RRAAbsX    => (RRA, AbsoluteX,       7, false),

            NOPImm80   => (NOP, Immediate,       2, false),
            STAIndX    => (STA, IndexedIndirect, 6, false),
            NOPImm82   => (NOP, Immediate,       2, false),
            SAXIndX    => (SAX, IndexedIndirect, 6, false),
            STYZero    => (STY, ZeroPage,        3, false),
            STAZero    => (STA, ZeroPage,        3, false),
            STXZero    => (STX, ZeroPage,        3, false),
            SAXZero    => (SAX, ZeroPage,        3, false),
            DEYImp     => (DEY, Implied,         2, false),
            NOPImm89   => (NOP, Immediate,       2, false),
            TXAImp     => (TXA, Implied,         2, false),
            XAAImm     => (XAA, Immediate,       2, false),
            STYAbs     => (STY, Absolute,        4, false),
            STAAbs     => (STA, Absolute,        4, false),
            STXAbs     => (STX, Absolute,        4, false),
            SAXAbs     => (SAX, Absolute,        4, false),

            BCCRel     => (BCC, Relative,        2, false),
            STAIndY    => (STA, IndirectIndexed, 6, false),
            KIL92      => (KIL, Implied,         2, false),
            AHXIndY    => (AHX, IndirectIndexed, 6, false),
            STYZeroX   => (STY, ZeroPageX,       4, false),
            STAZeroX   => (STA, ZeroPageX,       4, false),
            STXZeroY   => (STX, ZeroPageY,       4, false),
            SAXZeroY   => (SAX, ZeroPageY,       4, false),
            TYAImp     => (TYA, Implied,         2, false),
            STAAbsY    => (STA, AbsoluteY,       5, false),
            TXSImp     => (TXS, Implied,         2, false),
            TASAbsY    => (TAS, AbsoluteY,       5, false),
            SHYAbsX    => (SHY, AbsoluteX,       5, false),
            STAAbsX    => (STA, AbsoluteX,       5, false),
            SHXAbsY    => (SHX, AbsoluteY,       5, false),
            AHXAbsY    => (AHX, AbsoluteY,       5, false),

            LDYImm     => (LDY, Immediate,       2, false),
            LDAIndX    => (LDA, IndexedIndirect, 6, false),
            LDXImm     => (LDX, Immediate,       2, false),
            LAXIndX    => (LAX, IndexedIndirect, 6, false),
            LDYZero    => (LDY, ZeroPage,        3, false),
            LDAZero    => (LDA, ZeroPage,        3, false),
            LDXZero    => (LDX, ZeroPage,        3, false),
            LAXZero    => (LAX, ZeroPage,        3, false),
            TAYImp     => (TAY, Implied,         2, false),
            LDAImm     => (LDA, Immediate,       2, false),
            TAXImp     => (TAX, Implied,         2, false),
            LAXImm     => (LAX, Immediate,       2, false),
            LDYAbs     => (LDY, Absolute,        4, false),
            LDAAbs     => (LDA, Absolute,        4, false),
            LDXAbs     => (LDX, Absolute,        4, false),
            LAXAbs     => (LAX, Absolute,        4, false),

            BCSRel     => (BCS, Relative,        2, false),
            LDAIndY    => (LDA, IndirectIndexed, 5, true ),
            KILB2      => (KIL, Implied,         2, false),
            LAXIndY    => (LAX, IndirectIndexed, 5, true ),
            LDYZeroX   => (LDY, ZeroPageX,       4, false),
            LDAZeroX   => (LDA, ZeroPageX,       4, false),
            LDXZeroY   => (LDX, ZeroPageY,       4, false),
            LAXZeroY   => (LAX, ZeroPageY,       4, false),
            CLVImp     => (CLV, Implied,         2, false),
            LDAAbsY    => (LDA, AbsoluteY,       4, true ),
            TSXImp     => (TSX, Implied,         2, false),
            LASAbsY    => (LAS, AbsoluteY,       4, true ),
            LDYAbsX    => (LDY, AbsoluteX,       4, true ),
            LDAAbsX    => (LDA, AbsoluteX,       4, true ),
            LDXAbsY    => (LDX, AbsoluteY,       4, true ),
            LAXAbsY    => (LAX, AbsoluteY,       4, true ),

            CPYImm     => (CPY, Immediate,       2, false),
            CMPIndX    => (CMP, IndexedIndirect, 6, false),
            NOPImmC2   => (NOP, Immediate,       2, false),
            DCPIndX    => (DCP, IndexedIndirect, 8, false),
            CPYZero    => (CPY, ZeroPage,        3, false),
            CMPZero    => (CMP, ZeroPage,        3, false),
            DECZero    => (DEC, ZeroPage,        5, false),
            DCPZero    => (DCP, ZeroPage,        5, false),
            INYImp     => (INY, Implied,         2, false),
            CMPImm     => (CMP, Immediate,       2, false),
            DEXImp     => (DEX, Implied,         2, false),
            AXSImm     => (AXS, Immediate,       2, false),
            CPYAbs     => (CPY, Absolute,        4, false),
            CMPAbs     => (CMP, Absolute,        4, false),
            DECAbs     => (DEC, Absolute,        6, false),
            DCPAbs     => (DCP, Absolute,        6, false),

            BNERel     => (BNE, Relative,        2, false),
            CMPIndY    => (CMP, IndirectIndexed, 5, true ),
            KILD2      => (KIL, Implied,         2, false),
            DCPIndY    => (DCP, IndirectIndexed, 8, false),
            NOPZeroXD4 => (NOP, ZeroPageX,       4, false),
            CMPZeroX   => (CMP, ZeroPageX,       4, false),
            DECZeroX   => (DEC, ZeroPageX,       6, false),
            DCPZeroX   => (DCP, ZeroPageX,       6, false),
            CLDImp     => (CLD, Implied,         2, false),
            CMPAbsY    => (CMP, AbsoluteY,       4, true ),
            NOPImpDA   => (NOP, Implied,         2, false),
            DCPAbsY    => (DCP, AbsoluteY,       7, false),
            NOPAbsXDC  => (NOP, AbsoluteX,       4, true ),
            CMPAbsX    => (CMP, AbsoluteX,       4, true ),
            DECAbsX    => (DEC, AbsoluteX,       7, false),
            DCPAbsX    => (DCP, AbsoluteX,       7, false),

            CPXImm     => (CPX, Immediate,       2, false),
            SBCIndX    => (SBC, IndexedIndirect, 6, false),
            NOPImmE2   => (NOP, Immediate,       2, false),
            ISBIndX    => (ISB, IndexedIndirect, 8, false),
            CPXZero    => (CPX, ZeroPage,        3, false),
            SBCZero    => (SBC, ZeroPage,        3, false),
            INCZero    => (INC, ZeroPage,        5, false),
            ISBZero    => (ISB, ZeroPage,        5, false),
            INXImp     => (INX, Implied,         2, false),
            SBCImm     => (SBC, Immediate,       2, false),
            NOPImp     => (NOP, Implied,         2, false),
            SBCImmEB   => (SBC, Immediate,       2, false),
            CPXAbs     => (CPX, Absolute,        4, false),
            SBCAbs     => (SBC, Absolute,        4, false),
            INCAbs     => (INC, Absolute,        6, false),
            ISBAbs     => (ISB, Absolute,        6, false),

            BEQRel     => (BEQ, Relative,        2, false),
            SBCIndY    => (SBC, IndirectIndexed, 5, true ),
            KILF2      => (KIL, Implied,         2, false),
            ISBIndY    => (ISB, IndirectIndexed, 8, false),
            NOPZeroXF4 => (NOP, ZeroPageX,       4, false),
            SBCZeroX   => (SBC, ZeroPageX,       4, false),
            INCZeroX   => (INC, ZeroPageX,       6, false),
            ISBZeroX   => (ISB, ZeroPageX,       6, false),
            SEDImp     => (SED, Implied,         2, false),
            SBCAbsY    => (SBC, AbsoluteY,       4, true ),
            NOPImpFA   => (NOP, Implied,         2, false),
            ISBAbsY    => (ISB, AbsoluteY,       7, false),
            NOPAbsXFC  => (NOP, AbsoluteX,       4, true ),
            SBCAbsX    => (SBC, AbsoluteX,       4, true ),
            INCAbsX    => (INC, AbsoluteX,       7, false),
            ISBAbsX    => (ISB, AbsoluteX,       7, false),
        };

        OpcodeInfo {
            mnemonic: mnemonic,
            mode: mode,
            cycles: cycles,
            boundary_sensitive: boundary_sensitive,
        }
    }

    /// Determine the length of an instruction with the given opcode.
    #[inline(always)]
    pub fn len(&self) -> u8 {
        self.info().mode.len()
    }

    /// Returns false for opcodes that are not part of the documented 6502
    /// instruction set. Disassembly marks these with an asterisk.
    pub fn is_official(&self) -> bool {
        use self::Mnemonic::*;

        match *self {
            Opcode::NOPImp => true,
            Opcode::SBCImmEB => false,
            _ => match self.info().mnemonic {
                NOP | KIL | SLO | RLA | SRE | RRA | SAX | LAX | DCP | ISB | ANC | ALR | ARR |
                AXS | XAA | LAS | AHX | SHX | SHY | TAS => false,
                _ => true,
            },
        }
    }
}
