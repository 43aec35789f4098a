// Opcode decode table for the 6502 CPU
//
// A fixed 256-entry table keyed by opcode byte. Each entry records the
// mnemonic, addressing mode, base cycle count, and whether the instruction
// pays an extra cycle when its operand fetch crosses a page boundary.
//
// Undocumented opcodes carry the "???" mnemonic and execute as NOPs with the
// canonical cycle counts; the dispatcher emits a diagnostic when one runs.

use crate::cpu::addressing::AddressingMode;

/// Decode table entry for one opcode
pub struct OpcodeInfo {
    /// Three-character mnemonic ("???" for undocumented opcodes)
    pub mnemonic: &'static str,
    /// Addressing mode used to form the effective address
    pub mode: AddressingMode,
    /// Base cycle count before penalties
    pub cycles: u8,
    /// Whether a crossed page during addressing adds one cycle
    pub page_cycle: bool,
    /// Total instruction length in bytes (opcode + operand bytes)
    pub bytes: u8,
}

/// Instruction length implied by an addressing mode
const fn mode_bytes(mode: AddressingMode) -> u8 {
    match mode {
        AddressingMode::Implied | AddressingMode::Accumulator => 1,
        AddressingMode::Immediate
        | AddressingMode::ZeroPage
        | AddressingMode::ZeroPageX
        | AddressingMode::ZeroPageY
        | AddressingMode::Relative
        | AddressingMode::IndexedIndirect
        | AddressingMode::IndirectIndexed => 2,
        AddressingMode::Absolute
        | AddressingMode::AbsoluteX
        | AddressingMode::AbsoluteY
        | AddressingMode::Indirect => 3,
    }
}

/// Table entry without a page-cross penalty
const fn op(mnemonic: &'static str, mode: AddressingMode, cycles: u8) -> OpcodeInfo {
    OpcodeInfo {
        mnemonic,
        mode,
        cycles,
        page_cycle: false,
        bytes: mode_bytes(mode),
    }
}

/// Table entry that pays one extra cycle on a crossed page
const fn op_pg(mnemonic: &'static str, mode: AddressingMode, cycles: u8) -> OpcodeInfo {
    OpcodeInfo {
        mnemonic,
        mode,
        cycles,
        page_cycle: true,
        bytes: mode_bytes(mode),
    }
}

use crate::cpu::addressing::AddressingMode::{
    Absolute as ABS, AbsoluteX as ABX, AbsoluteY as ABY, Accumulator as ACC, Immediate as IMM,
    Implied as IMP, IndexedIndirect as IZX, Indirect as IND, IndirectIndexed as IZY,
    Relative as REL, ZeroPage as ZP0, ZeroPageX as ZPX, ZeroPageY as ZPY,
};

/// The 256-entry opcode table, indexed by opcode byte.
///
/// Cycle counts follow the canonical NES 6502 opcode map. Page-cross
/// penalties apply to the read instructions ADC, AND, CMP, EOR, LDA, LDX,
/// LDY, ORA, SBC; taken branches account for their own penalties.
#[rustfmt::skip]
pub static OPCODE_TABLE: [OpcodeInfo; 256] = [
    // 0x00-0x0F
    op("BRK", IMP, 7), op("ORA", IZX, 6), op("???", IMP, 2), op("???", IMP, 8),
    op("???", IMP, 3), op("ORA", ZP0, 3), op("ASL", ZP0, 5), op("???", IMP, 5),
    op("PHP", IMP, 3), op("ORA", IMM, 2), op("ASL", ACC, 2), op("???", IMP, 2),
    op("???", IMP, 4), op("ORA", ABS, 4), op("ASL", ABS, 6), op("???", IMP, 6),
    // 0x10-0x1F
    op("BPL", REL, 2), op_pg("ORA", IZY, 5), op("???", IMP, 2), op("???", IMP, 8),
    op("???", IMP, 4), op("ORA", ZPX, 4), op("ASL", ZPX, 6), op("???", IMP, 6),
    op("CLC", IMP, 2), op_pg("ORA", ABY, 4), op("???", IMP, 2), op("???", IMP, 7),
    op("???", IMP, 4), op_pg("ORA", ABX, 4), op("ASL", ABX, 7), op("???", IMP, 7),
    // 0x20-0x2F
    op("JSR", ABS, 6), op("AND", IZX, 6), op("???", IMP, 2), op("???", IMP, 8),
    op("BIT", ZP0, 3), op("AND", ZP0, 3), op("ROL", ZP0, 5), op("???", IMP, 5),
    op("PLP", IMP, 4), op("AND", IMM, 2), op("ROL", ACC, 2), op("???", IMP, 2),
    op("BIT", ABS, 4), op("AND", ABS, 4), op("ROL", ABS, 6), op("???", IMP, 6),
    // 0x30-0x3F
    op("BMI", REL, 2), op_pg("AND", IZY, 5), op("???", IMP, 2), op("???", IMP, 8),
    op("???", IMP, 4), op("AND", ZPX, 4), op("ROL", ZPX, 6), op("???", IMP, 6),
    op("SEC", IMP, 2), op_pg("AND", ABY, 4), op("???", IMP, 2), op("???", IMP, 7),
    op("???", IMP, 4), op_pg("AND", ABX, 4), op("ROL", ABX, 7), op("???", IMP, 7),
    // 0x40-0x4F
    op("RTI", IMP, 6), op("EOR", IZX, 6), op("???", IMP, 2), op("???", IMP, 8),
    op("???", IMP, 3), op("EOR", ZP0, 3), op("LSR", ZP0, 5), op("???", IMP, 5),
    op("PHA", IMP, 3), op("EOR", IMM, 2), op("LSR", ACC, 2), op("???", IMP, 2),
    op("JMP", ABS, 3), op("EOR", ABS, 4), op("LSR", ABS, 6), op("???", IMP, 6),
    // 0x50-0x5F
    op("BVC", REL, 2), op_pg("EOR", IZY, 5), op("???", IMP, 2), op("???", IMP, 8),
    op("???", IMP, 4), op("EOR", ZPX, 4), op("LSR", ZPX, 6), op("???", IMP, 6),
    op("CLI", IMP, 2), op_pg("EOR", ABY, 4), op("???", IMP, 2), op("???", IMP, 7),
    op("???", IMP, 4), op_pg("EOR", ABX, 4), op("LSR", ABX, 7), op("???", IMP, 7),
    // 0x60-0x6F
    op("RTS", IMP, 6), op("ADC", IZX, 6), op("???", IMP, 2), op("???", IMP, 8),
    op("???", IMP, 3), op("ADC", ZP0, 3), op("ROR", ZP0, 5), op("???", IMP, 5),
    op("PLA", IMP, 4), op("ADC", IMM, 2), op("ROR", ACC, 2), op("???", IMP, 2),
    op("JMP", IND, 5), op("ADC", ABS, 4), op("ROR", ABS, 6), op("???", IMP, 6),
    // 0x70-0x7F
    op("BVS", REL, 2), op_pg("ADC", IZY, 5), op("???", IMP, 2), op("???", IMP, 8),
    op("???", IMP, 4), op("ADC", ZPX, 4), op("ROR", ZPX, 6), op("???", IMP, 6),
    op("SEI", IMP, 2), op_pg("ADC", ABY, 4), op("???", IMP, 2), op("???", IMP, 7),
    op("???", IMP, 4), op_pg("ADC", ABX, 4), op("ROR", ABX, 7), op("???", IMP, 7),
    // 0x80-0x8F
    op("???", IMP, 2), op("STA", IZX, 6), op("???", IMP, 2), op("???", IMP, 6),
    op("STY", ZP0, 3), op("STA", ZP0, 3), op("STX", ZP0, 3), op("???", IMP, 3),
    op("DEY", IMP, 2), op("???", IMP, 2), op("TXA", IMP, 2), op("???", IMP, 2),
    op("STY", ABS, 4), op("STA", ABS, 4), op("STX", ABS, 4), op("???", IMP, 4),
    // 0x90-0x9F
    op("BCC", REL, 2), op("STA", IZY, 6), op("???", IMP, 2), op("???", IMP, 6),
    op("STY", ZPX, 4), op("STA", ZPX, 4), op("STX", ZPY, 4), op("???", IMP, 4),
    op("TYA", IMP, 2), op("STA", ABY, 5), op("TXS", IMP, 2), op("???", IMP, 5),
    op("???", IMP, 5), op("STA", ABX, 5), op("???", IMP, 5), op("???", IMP, 5),
    // 0xA0-0xAF
    op("LDY", IMM, 2), op("LDA", IZX, 6), op("LDX", IMM, 2), op("???", IMP, 6),
    op("LDY", ZP0, 3), op("LDA", ZP0, 3), op("LDX", ZP0, 3), op("???", IMP, 3),
    op("TAY", IMP, 2), op("LDA", IMM, 2), op("TAX", IMP, 2), op("???", IMP, 2),
    op("LDY", ABS, 4), op("LDA", ABS, 4), op("LDX", ABS, 4), op("???", IMP, 4),
    // 0xB0-0xBF
    op("BCS", REL, 2), op_pg("LDA", IZY, 5), op("???", IMP, 2), op("???", IMP, 5),
    op("LDY", ZPX, 4), op("LDA", ZPX, 4), op("LDX", ZPY, 4), op("???", IMP, 4),
    op("CLV", IMP, 2), op_pg("LDA", ABY, 4), op("TSX", IMP, 2), op("???", IMP, 4),
    op_pg("LDY", ABX, 4), op_pg("LDA", ABX, 4), op_pg("LDX", ABY, 4), op("???", IMP, 4),
    // 0xC0-0xCF
    op("CPY", IMM, 2), op("CMP", IZX, 6), op("???", IMP, 2), op("???", IMP, 8),
    op("CPY", ZP0, 3), op("CMP", ZP0, 3), op("DEC", ZP0, 5), op("???", IMP, 5),
    op("INY", IMP, 2), op("CMP", IMM, 2), op("DEX", IMP, 2), op("???", IMP, 2),
    op("CPY", ABS, 4), op("CMP", ABS, 4), op("DEC", ABS, 6), op("???", IMP, 6),
    // 0xD0-0xDF
    op("BNE", REL, 2), op_pg("CMP", IZY, 5), op("???", IMP, 2), op("???", IMP, 8),
    op("???", IMP, 4), op("CMP", ZPX, 4), op("DEC", ZPX, 6), op("???", IMP, 6),
    op("CLD", IMP, 2), op_pg("CMP", ABY, 4), op("NOP", IMP, 2), op("???", IMP, 7),
    op("???", IMP, 4), op_pg("CMP", ABX, 4), op("DEC", ABX, 7), op("???", IMP, 7),
    // 0xE0-0xEF
    op("CPX", IMM, 2), op("SBC", IZX, 6), op("???", IMP, 2), op("???", IMP, 8),
    op("CPX", ZP0, 3), op("SBC", ZP0, 3), op("INC", ZP0, 5), op("???", IMP, 5),
    op("INX", IMP, 2), op("SBC", IMM, 2), op("NOP", IMP, 2), op("???", IMP, 2),
    op("CPX", ABS, 4), op("SBC", ABS, 4), op("INC", ABS, 6), op("???", IMP, 6),
    // 0xF0-0xFF
    op("BEQ", REL, 2), op_pg("SBC", IZY, 5), op("???", IMP, 2), op("???", IMP, 8),
    op("???", IMP, 4), op("SBC", ZPX, 4), op("INC", ZPX, 6), op("???", IMP, 6),
    op("SED", IMP, 2), op_pg("SBC", ABY, 4), op("NOP", IMP, 2), op("???", IMP, 7),
    op("???", IMP, 4), op_pg("SBC", ABX, 4), op("INC", ABX, 7), op("???", IMP, 7),
];
