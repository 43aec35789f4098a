// CPU execution and trace logging

use crate::bus::Bus;
use crate::cpu::addressing::{AddressingMode, AddressingResult, ReadFn};
use crate::cpu::opcodes::{OpcodeInfo, OPCODE_TABLE};
use crate::cpu::Cpu;

impl Cpu {
    /// Execute one instruction: fetch the opcode at PC, resolve its
    /// operand, dispatch the operation, and account cycles.
    ///
    /// Returns the total cycles consumed, including page-crossing and
    /// branch penalties.
    pub fn step(&mut self, bus: &mut Bus) -> u8 {
        let opcode = bus.read(self.pc);
        let opcode_info = &OPCODE_TABLE[opcode as usize];

        self.pc = self.pc.wrapping_add(1);

        let addr_result = self.resolve_operand(opcode_info.mode, bus);

        let extra_cycles = self.execute_instruction(opcode, &addr_result, bus);

        // Base cycles, plus the page penalty for the read instructions that
        // pay it. Branches report their own penalties via extra_cycles.
        let mut cycles = opcode_info.cycles;
        if opcode_info.page_cycle && addr_result.page_crossed {
            cycles += 1;
        }
        cycles += extra_cycles;

        self.cycles = self.cycles.wrapping_add(cycles as u64);

        cycles
    }

    /// Dispatch one opcode. Returns extra cycles (branches only).
    #[allow(clippy::too_many_lines)]
    fn execute_instruction(
        &mut self,
        opcode: u8,
        addr_result: &AddressingResult,
        bus: &mut Bus,
    ) -> u8 {
        match opcode {
            // Load/Store instructions
            0xA9 | 0xA5 | 0xB5 | 0xAD | 0xBD | 0xB9 | 0xA1 | 0xB1 => self.lda(bus, addr_result),
            0xA2 | 0xA6 | 0xB6 | 0xAE | 0xBE => self.ldx(bus, addr_result),
            0xA0 | 0xA4 | 0xB4 | 0xAC | 0xBC => self.ldy(bus, addr_result),
            0x85 | 0x95 | 0x8D | 0x9D | 0x99 | 0x81 | 0x91 => self.sta(bus, addr_result),
            0x86 | 0x96 | 0x8E => self.stx(bus, addr_result),
            0x84 | 0x94 | 0x8C => self.sty(bus, addr_result),

            // Arithmetic instructions
            0x69 | 0x65 | 0x75 | 0x6D | 0x7D | 0x79 | 0x61 | 0x71 => self.adc(bus, addr_result),
            0xE9 | 0xE5 | 0xF5 | 0xED | 0xFD | 0xF9 | 0xE1 | 0xF1 => self.sbc(bus, addr_result),
            0xE6 | 0xF6 | 0xEE | 0xFE => self.inc(bus, addr_result),
            0xE8 => self.inx(),
            0xC8 => self.iny(),
            0xC6 | 0xD6 | 0xCE | 0xDE => self.dec(bus, addr_result),
            0xCA => self.dex(),
            0x88 => self.dey(),

            // Logical instructions
            0x29 | 0x25 | 0x35 | 0x2D | 0x3D | 0x39 | 0x21 | 0x31 => self.and(bus, addr_result),
            0x09 | 0x05 | 0x15 | 0x0D | 0x1D | 0x19 | 0x01 | 0x11 => self.ora(bus, addr_result),
            0x49 | 0x45 | 0x55 | 0x4D | 0x5D | 0x59 | 0x41 | 0x51 => self.eor(bus, addr_result),
            0x24 | 0x2C => self.bit(bus, addr_result),

            // Shift/Rotate instructions
            0x0A => self.asl(bus, addr_result, true),
            0x06 | 0x16 | 0x0E | 0x1E => self.asl(bus, addr_result, false),
            0x4A => self.lsr(bus, addr_result, true),
            0x46 | 0x56 | 0x4E | 0x5E => self.lsr(bus, addr_result, false),
            0x2A => self.rol(bus, addr_result, true),
            0x26 | 0x36 | 0x2E | 0x3E => self.rol(bus, addr_result, false),
            0x6A => self.ror(bus, addr_result, true),
            0x66 | 0x76 | 0x6E | 0x7E => self.ror(bus, addr_result, false),

            // Compare instructions
            0xC9 | 0xC5 | 0xD5 | 0xCD | 0xDD | 0xD9 | 0xC1 | 0xD1 => self.cmp(bus, addr_result),
            0xE0 | 0xE4 | 0xEC => self.cpx(bus, addr_result),
            0xC0 | 0xC4 | 0xCC => self.cpy(bus, addr_result),

            // Branch instructions (return extra cycles)
            0x90 => return self.bcc(addr_result),
            0xB0 => return self.bcs(addr_result),
            0xF0 => return self.beq(addr_result),
            0x30 => return self.bmi(addr_result),
            0xD0 => return self.bne(addr_result),
            0x10 => return self.bpl(addr_result),
            0x50 => return self.bvc(addr_result),
            0x70 => return self.bvs(addr_result),

            // Jump/Subroutine instructions
            0x4C | 0x6C => self.jmp(addr_result),
            0x20 => self.jsr(bus, addr_result),
            0x60 => self.rts(bus),

            // Stack instructions
            0x48 => self.pha(bus),
            0x68 => self.pla(bus),
            0x08 => self.php(bus),
            0x28 => self.plp(bus),
            0x9A => self.txs(),
            0xBA => self.tsx(),

            // Transfer instructions
            0xAA => self.tax(),
            0xA8 => self.tay(),
            0x8A => self.txa(),
            0x98 => self.tya(),

            // Flag instructions
            0x18 => self.clc(),
            0xD8 => self.cld(),
            0x58 => self.cli(),
            0xB8 => self.clv(),
            0x38 => self.sec(),
            0xF8 => self.sed(),
            0x78 => self.sei(),

            // Miscellaneous instructions
            0x00 => self.brk(bus),
            0x40 => self.rti(bus),
            0xEA | 0xDA | 0xFA => self.nop(),

            // Undocumented opcodes alias to NOP; cycle counts come from
            // the table, and execution continues.
            _ => {
                if self.log_illegal_opcodes {
                    log::debug!(
                        "undocumented opcode {:02X} at {:04X} executed as NOP",
                        opcode,
                        self.pc.wrapping_sub(1)
                    );
                }
            }
        }
        0
    }

    /// Generate a trace log line in nestest format.
    ///
    /// Format: `PC  OP OP OP  MNEMONIC $ADDR  A:XX X:XX Y:XX P:XX SP:XX CYC:N`
    ///
    /// The operand is resolved through the same resolver execution uses,
    /// but against `Bus::peek`, so tracing a PPU register never perturbs
    /// it and the printed effective address is exactly the one the
    /// instruction is about to touch.
    pub fn trace(&self, bus: &Bus) -> String {
        let pc = self.pc;
        let opcode = bus.peek(pc);
        let opcode_info = &OPCODE_TABLE[opcode as usize];

        let byte1 = opcode;
        let byte2 = if opcode_info.bytes >= 2 {
            bus.peek(pc.wrapping_add(1))
        } else {
            0
        };
        let byte3 = if opcode_info.bytes >= 3 {
            bus.peek(pc.wrapping_add(2))
        } else {
            0
        };

        let hex_bytes = match opcode_info.bytes {
            2 => format!("{:02X} {:02X}   ", byte1, byte2),
            3 => format!("{:02X} {:02X} {:02X}", byte1, byte2, byte3),
            _ => format!("{:02X}      ", byte1),
        };

        let mut peek = |addr: u16| bus.peek(addr);
        let (operand, _) = self.resolve_with(opcode_info.mode, pc.wrapping_add(1), &mut peek);
        let disassembly = self.format_operand(opcode_info, byte2, byte3, &operand, &mut peek);

        format!(
            "{:04X}  {}  {:<32}A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X} CYC:{}",
            pc, hex_bytes, disassembly, self.a, self.x, self.y, self.status, self.sp, self.cycles
        )
    }

    /// Render one instruction's operand field from its resolved form.
    ///
    /// The effective address and branch target come straight out of the
    /// `AddressingResult`; the raw operand bytes only supply the base
    /// address / pointer notation the nestest format prints alongside it.
    fn format_operand(
        &self,
        opcode_info: &OpcodeInfo,
        byte2: u8,
        byte3: u8,
        operand: &AddressingResult,
        peek: &mut ReadFn,
    ) -> String {
        let mnemonic = opcode_info.mnemonic;
        let base_word = u16::from_le_bytes([byte2, byte3]);

        match opcode_info.mode {
            AddressingMode::Implied => mnemonic.to_string(),

            AddressingMode::Accumulator => format!("{} A", mnemonic),

            AddressingMode::Immediate => {
                format!("{} #${:02X}", mnemonic, operand.value.unwrap_or(byte2))
            }

            AddressingMode::ZeroPage => {
                format!("{} ${:02X} = {:02X}", mnemonic, byte2, peek(operand.address))
            }

            AddressingMode::ZeroPageX => format!(
                "{} ${:02X},X @ {:02X} = {:02X}",
                mnemonic,
                byte2,
                operand.address as u8,
                peek(operand.address)
            ),

            AddressingMode::ZeroPageY => format!(
                "{} ${:02X},Y @ {:02X} = {:02X}",
                mnemonic,
                byte2,
                operand.address as u8,
                peek(operand.address)
            ),

            // The resolver already computed the branch target
            AddressingMode::Relative => format!("{} ${:04X}", mnemonic, operand.address),

            AddressingMode::Absolute => {
                if mnemonic == "JMP" || mnemonic == "JSR" {
                    format!("{} ${:04X}", mnemonic, operand.address)
                } else {
                    format!(
                        "{} ${:04X} = {:02X}",
                        mnemonic,
                        operand.address,
                        peek(operand.address)
                    )
                }
            }

            AddressingMode::AbsoluteX => format!(
                "{} ${:04X},X @ {:04X} = {:02X}",
                mnemonic,
                base_word,
                operand.address,
                peek(operand.address)
            ),

            AddressingMode::AbsoluteY => format!(
                "{} ${:04X},Y @ {:04X} = {:02X}",
                mnemonic,
                base_word,
                operand.address,
                peek(operand.address)
            ),

            // The resolved address is the quirk-accurate jump target
            AddressingMode::Indirect => {
                format!("{} (${:04X}) = {:04X}", mnemonic, base_word, operand.address)
            }

            AddressingMode::IndexedIndirect => format!(
                "{} (${:02X},X) @ {:02X} = {:04X} = {:02X}",
                mnemonic,
                byte2,
                byte2.wrapping_add(self.x),
                operand.address,
                peek(operand.address)
            ),

            AddressingMode::IndirectIndexed => format!(
                "{} (${:02X}),Y = {:04X} @ {:04X} = {:02X}",
                mnemonic,
                byte2,
                operand.address.wrapping_sub(self.y as u16),
                operand.address,
                peek(operand.address)
            ),
        }
    }
}
