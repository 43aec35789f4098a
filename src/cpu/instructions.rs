// Instruction semantics for the 6502 CPU
//
// One method per operation, grouped the way the opcode map groups them.
// Addressing has already run: each method receives the `AddressingResult`
// and reads or writes memory through the bus as needed. Branch instructions
// return their extra cycle count; everything else accounts for cycles
// through the decode table alone.

use crate::bus::Bus;
use crate::cpu::addressing::AddressingResult;
use crate::cpu::flags;
use crate::cpu::vectors;

impl super::Cpu {
    // ========================================
    // Helpers
    // ========================================

    /// Operand fetch: immediate/accumulator value if present, memory
    /// otherwise.
    #[inline]
    fn read_operand(&self, bus: &mut Bus, addr_result: &AddressingResult) -> u8 {
        match addr_result.value {
            Some(value) => value,
            None => bus.read(addr_result.address),
        }
    }

    /// Shared add core for ADC and SBC (SBC feeds the complemented operand).
    ///
    /// C is carry out of bit 7; V is signed overflow:
    /// `((~(A ^ M)) & (A ^ R)) & 0x80`.
    fn add_with_carry(&mut self, operand: u8) {
        let a = self.a as u16;
        let m = operand as u16;
        let carry = self.get_flag(flags::CARRY) as u16;
        let result = a + m + carry;

        self.update_flag(flags::CARRY, result > 0xFF);
        self.update_flag(flags::OVERFLOW, (!(a ^ m) & (a ^ result)) & 0x80 != 0);

        self.a = (result & 0xFF) as u8;
        self.update_zero_and_negative_flags(self.a);
    }

    /// Shared compare core for CMP/CPX/CPY.
    fn compare(&mut self, reg: u8, operand: u8) {
        self.update_flag(flags::CARRY, reg >= operand);
        self.update_flag(flags::ZERO, reg == operand);
        self.update_flag(flags::NEGATIVE, reg.wrapping_sub(operand) & 0x80 != 0);
    }

    /// Shared taken-branch core: jump to the target and report the cycle
    /// penalty (1 for taking the branch, 2 if the target is on another page).
    fn branch(&mut self, addr_result: &AddressingResult, condition: bool) -> u8 {
        if condition {
            self.pc = addr_result.address;
            if addr_result.page_crossed {
                2
            } else {
                1
            }
        } else {
            0
        }
    }

    // ========================================
    // Load / Store
    // ========================================

    /// LDA - load accumulator. Flags: Z, N.
    pub fn lda(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        self.a = self.read_operand(bus, addr_result);
        self.update_zero_and_negative_flags(self.a);
    }

    /// LDX - load X register. Flags: Z, N.
    pub fn ldx(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        self.x = self.read_operand(bus, addr_result);
        self.update_zero_and_negative_flags(self.x);
    }

    /// LDY - load Y register. Flags: Z, N.
    pub fn ldy(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        self.y = self.read_operand(bus, addr_result);
        self.update_zero_and_negative_flags(self.y);
    }

    /// STA - store accumulator. No flags.
    pub fn sta(&self, bus: &mut Bus, addr_result: &AddressingResult) {
        bus.write(addr_result.address, self.a);
    }

    /// STX - store X register. No flags.
    pub fn stx(&self, bus: &mut Bus, addr_result: &AddressingResult) {
        bus.write(addr_result.address, self.x);
    }

    /// STY - store Y register. No flags.
    pub fn sty(&self, bus: &mut Bus, addr_result: &AddressingResult) {
        bus.write(addr_result.address, self.y);
    }

    // ========================================
    // Arithmetic
    // ========================================

    /// ADC - add with carry: `A = A + M + C`. Flags: C, Z, V, N.
    pub fn adc(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let operand = self.read_operand(bus, addr_result);
        self.add_with_carry(operand);
    }

    /// SBC - subtract with carry, computed as ADC of the complemented
    /// operand (no decimal mode on the 2A03). Flags: C, Z, V, N.
    pub fn sbc(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let operand = self.read_operand(bus, addr_result);
        self.add_with_carry(operand ^ 0xFF);
    }

    /// INC - increment memory. Flags: Z, N.
    pub fn inc(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let result = bus.read(addr_result.address).wrapping_add(1);
        bus.write(addr_result.address, result);
        self.update_zero_and_negative_flags(result);
    }

    /// DEC - decrement memory. Flags: Z, N.
    pub fn dec(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let result = bus.read(addr_result.address).wrapping_sub(1);
        bus.write(addr_result.address, result);
        self.update_zero_and_negative_flags(result);
    }

    /// INX / INY / DEX / DEY - register increments and decrements.
    pub fn inx(&mut self) {
        self.x = self.x.wrapping_add(1);
        self.update_zero_and_negative_flags(self.x);
    }

    pub fn iny(&mut self) {
        self.y = self.y.wrapping_add(1);
        self.update_zero_and_negative_flags(self.y);
    }

    pub fn dex(&mut self) {
        self.x = self.x.wrapping_sub(1);
        self.update_zero_and_negative_flags(self.x);
    }

    pub fn dey(&mut self) {
        self.y = self.y.wrapping_sub(1);
        self.update_zero_and_negative_flags(self.y);
    }

    // ========================================
    // Logical
    // ========================================

    /// AND - bitwise AND into A. Flags: Z, N.
    pub fn and(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        self.a &= self.read_operand(bus, addr_result);
        self.update_zero_and_negative_flags(self.a);
    }

    /// ORA - bitwise OR into A. Flags: Z, N.
    pub fn ora(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        self.a |= self.read_operand(bus, addr_result);
        self.update_zero_and_negative_flags(self.a);
    }

    /// EOR - bitwise XOR into A. Flags: Z, N.
    pub fn eor(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        self.a ^= self.read_operand(bus, addr_result);
        self.update_zero_and_negative_flags(self.a);
    }

    /// BIT - Z from `A & M`, V from bit 6 of M, N from bit 7 of M.
    pub fn bit(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let operand = self.read_operand(bus, addr_result);
        self.update_flag(flags::ZERO, self.a & operand == 0);
        self.update_flag(flags::OVERFLOW, operand & 0x40 != 0);
        self.update_flag(flags::NEGATIVE, operand & 0x80 != 0);
    }

    // ========================================
    // Shifts / Rotates
    // ========================================
    // All four operate on A in accumulator mode and read-modify-write memory
    // otherwise. C takes the bit shifted out; Z/N come from the result.

    /// ASL - arithmetic shift left.
    pub fn asl(&mut self, bus: &mut Bus, addr_result: &AddressingResult, accumulator: bool) {
        let value = if accumulator {
            self.a
        } else {
            bus.read(addr_result.address)
        };

        let result = value << 1;
        self.update_flag(flags::CARRY, value & 0x80 != 0);
        self.update_zero_and_negative_flags(result);

        if accumulator {
            self.a = result;
        } else {
            bus.write(addr_result.address, result);
        }
    }

    /// LSR - logical shift right.
    pub fn lsr(&mut self, bus: &mut Bus, addr_result: &AddressingResult, accumulator: bool) {
        let value = if accumulator {
            self.a
        } else {
            bus.read(addr_result.address)
        };

        let result = value >> 1;
        self.update_flag(flags::CARRY, value & 0x01 != 0);
        self.update_zero_and_negative_flags(result);

        if accumulator {
            self.a = result;
        } else {
            bus.write(addr_result.address, result);
        }
    }

    /// ROL - rotate left through carry.
    pub fn rol(&mut self, bus: &mut Bus, addr_result: &AddressingResult, accumulator: bool) {
        let value = if accumulator {
            self.a
        } else {
            bus.read(addr_result.address)
        };

        let result = (value << 1) | self.get_flag(flags::CARRY) as u8;
        self.update_flag(flags::CARRY, value & 0x80 != 0);
        self.update_zero_and_negative_flags(result);

        if accumulator {
            self.a = result;
        } else {
            bus.write(addr_result.address, result);
        }
    }

    /// ROR - rotate right through carry.
    pub fn ror(&mut self, bus: &mut Bus, addr_result: &AddressingResult, accumulator: bool) {
        let value = if accumulator {
            self.a
        } else {
            bus.read(addr_result.address)
        };

        let result = (value >> 1) | ((self.get_flag(flags::CARRY) as u8) << 7);
        self.update_flag(flags::CARRY, value & 0x01 != 0);
        self.update_zero_and_negative_flags(result);

        if accumulator {
            self.a = result;
        } else {
            bus.write(addr_result.address, result);
        }
    }

    // ========================================
    // Compares
    // ========================================

    /// CMP - compare A. C = A >= M, Z = A == M, N from the difference.
    pub fn cmp(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let operand = self.read_operand(bus, addr_result);
        self.compare(self.a, operand);
    }

    /// CPX - compare X.
    pub fn cpx(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let operand = self.read_operand(bus, addr_result);
        self.compare(self.x, operand);
    }

    /// CPY - compare Y.
    pub fn cpy(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let operand = self.read_operand(bus, addr_result);
        self.compare(self.y, operand);
    }

    // ========================================
    // Branches
    // ========================================
    // Taken branches cost 1 extra cycle, 2 when the target is on a
    // different page than the instruction following the branch.

    /// BCC - branch if carry clear.
    pub fn bcc(&mut self, addr_result: &AddressingResult) -> u8 {
        self.branch(addr_result, !self.get_flag(flags::CARRY))
    }

    /// BCS - branch if carry set.
    pub fn bcs(&mut self, addr_result: &AddressingResult) -> u8 {
        self.branch(addr_result, self.get_flag(flags::CARRY))
    }

    /// BEQ - branch if zero set.
    pub fn beq(&mut self, addr_result: &AddressingResult) -> u8 {
        self.branch(addr_result, self.get_flag(flags::ZERO))
    }

    /// BNE - branch if zero clear.
    pub fn bne(&mut self, addr_result: &AddressingResult) -> u8 {
        self.branch(addr_result, !self.get_flag(flags::ZERO))
    }

    /// BMI - branch if negative set.
    pub fn bmi(&mut self, addr_result: &AddressingResult) -> u8 {
        self.branch(addr_result, self.get_flag(flags::NEGATIVE))
    }

    /// BPL - branch if negative clear.
    pub fn bpl(&mut self, addr_result: &AddressingResult) -> u8 {
        self.branch(addr_result, !self.get_flag(flags::NEGATIVE))
    }

    /// BVS - branch if overflow set.
    pub fn bvs(&mut self, addr_result: &AddressingResult) -> u8 {
        self.branch(addr_result, self.get_flag(flags::OVERFLOW))
    }

    /// BVC - branch if overflow clear.
    pub fn bvc(&mut self, addr_result: &AddressingResult) -> u8 {
        self.branch(addr_result, !self.get_flag(flags::OVERFLOW))
    }

    // ========================================
    // Jumps / Subroutines
    // ========================================

    /// JMP - load PC with the effective address.
    ///
    /// The indirect addressing mode resolves the pointer (including the
    /// page-wrap quirk) before this runs, so absolute and indirect jumps
    /// share one implementation.
    pub fn jmp(&mut self, addr_result: &AddressingResult) {
        self.pc = addr_result.address;
    }

    /// JSR - push the address of the last byte of the JSR, then jump.
    pub fn jsr(&mut self, bus: &mut Bus, addr_result: &AddressingResult) {
        let return_addr = self.pc.wrapping_sub(1);
        self.stack_push_u16(bus, return_addr);
        self.pc = addr_result.address;
    }

    /// RTS - pull PC (low then high) and resume at PC + 1.
    pub fn rts(&mut self, bus: &mut Bus) {
        self.pc = self.stack_pop_u16(bus).wrapping_add(1);
    }

    /// RTI - pull status, then PC. Unlike RTS, no +1: the pushed address
    /// is the interrupted instruction itself.
    pub fn rti(&mut self, bus: &mut Bus) {
        let status = self.stack_pop(bus);
        self.status = (status & !flags::BREAK) | flags::UNUSED;
        self.pc = self.stack_pop_u16(bus);
    }

    // ========================================
    // Stack
    // ========================================

    /// PHA - push accumulator.
    pub fn pha(&mut self, bus: &mut Bus) {
        self.stack_push(bus, self.a);
    }

    /// PHP - push status with bits 4 and 5 set in the pushed byte.
    pub fn php(&mut self, bus: &mut Bus) {
        let pushed = self.status | flags::BREAK | flags::UNUSED;
        self.stack_push(bus, pushed);
    }

    /// PLA - pull accumulator. Flags: Z, N.
    pub fn pla(&mut self, bus: &mut Bus) {
        self.a = self.stack_pop(bus);
        self.update_zero_and_negative_flags(self.a);
    }

    /// PLP - pull status; bits 4 and 5 of the pulled byte are discarded.
    pub fn plp(&mut self, bus: &mut Bus) {
        let status = self.stack_pop(bus);
        self.status = (status & !flags::BREAK) | flags::UNUSED;
    }

    // ========================================
    // Transfers
    // ========================================

    /// TAX / TAY / TSX / TXA / TYA update Z/N; TXS does not.
    pub fn tax(&mut self) {
        self.x = self.a;
        self.update_zero_and_negative_flags(self.x);
    }

    pub fn tay(&mut self) {
        self.y = self.a;
        self.update_zero_and_negative_flags(self.y);
    }

    pub fn tsx(&mut self) {
        self.x = self.sp;
        self.update_zero_and_negative_flags(self.x);
    }

    pub fn txa(&mut self) {
        self.a = self.x;
        self.update_zero_and_negative_flags(self.a);
    }

    pub fn tya(&mut self) {
        self.a = self.y;
        self.update_zero_and_negative_flags(self.a);
    }

    pub fn txs(&mut self) {
        self.sp = self.x;
    }

    // ========================================
    // Flag Set / Clear
    // ========================================

    pub fn clc(&mut self) {
        self.clear_flag(flags::CARRY);
    }

    pub fn sec(&mut self) {
        self.set_flag(flags::CARRY);
    }

    pub fn cli(&mut self) {
        self.clear_flag(flags::INTERRUPT_DISABLE);
    }

    pub fn sei(&mut self) {
        self.set_flag(flags::INTERRUPT_DISABLE);
    }

    pub fn cld(&mut self) {
        self.clear_flag(flags::DECIMAL);
    }

    pub fn sed(&mut self) {
        self.set_flag(flags::DECIMAL);
    }

    pub fn clv(&mut self) {
        self.clear_flag(flags::OVERFLOW);
    }

    // ========================================
    // Miscellaneous
    // ========================================

    /// NOP - no operation.
    pub fn nop(&self) {}

    /// BRK - software interrupt.
    ///
    /// The byte after the opcode is a padding/signature byte: PC is bumped
    /// past it before the push, so the pushed address is BRK + 2. The status
    /// byte goes onto the stack with bits 4 and 5 set, and execution
    /// continues at the IRQ/BRK vector with interrupts disabled.
    pub fn brk(&mut self, bus: &mut Bus) {
        self.pc = self.pc.wrapping_add(1);

        self.stack_push_u16(bus, self.pc);
        let pushed = self.status | flags::BREAK | flags::UNUSED;
        self.stack_push(bus, pushed);

        self.set_flag(flags::INTERRUPT_DISABLE);

        let lo = bus.read(vectors::IRQ) as u16;
        let hi = bus.read(vectors::IRQ.wrapping_add(1)) as u16;
        self.pc = (hi << 8) | lo;
    }
}
