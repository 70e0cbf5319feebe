use crate::error::{InvalidHandlerSnafu, PocketError, UnresolvedTargetSnafu};
use crate::lr35902::cpu::Cpu;
use crate::lr35902::registers::Flags;
use crate::lr35902::sm83::{AddressingMode, Condition, Instruction, Opcode, Operand, Register};
use crate::memory::mmu::Mmu;
use log::debug;
use snafu::OptionExt;

const HIGH_PAGE: u16 = 0xff00;

pub struct Handlers {}

#[allow(unused_variables)]
impl Handlers {
    pub fn nop(cpu: &mut Cpu, mmu: &mut Mmu, instruction: &Instruction) -> Result<usize, PocketError> {
        Ok(instruction.cycles.0)
    }

    pub fn load(cpu: &mut Cpu, mmu: &mut Mmu, instruction: &Instruction) -> Result<usize, PocketError> {
        let (dst, src) = Handlers::operands(instruction)?;

        match (dst, src) {
            // ld r16, imm16 / ld sp, hl
            (Operand::Reg16(reg, mode), Operand::Imm16(_) | Operand::Reg16(..))
                if mode.contains(AddressingMode::Direct) =>
            {
                let value = Handlers::read_operand16(cpu, mmu, &src)?;
                cpu.write_register16(&reg, value);
            }
            // ld hl, sp+e8
            (Operand::Reg16(reg, _), Operand::DisplacedReg16(base)) => {
                let value = Handlers::add_signed_offset(cpu, mmu, &base);
                cpu.write_register16(&reg, value);
            }
            // ld (imm16), sp
            (Operand::Imm16(_), Operand::Reg16(reg, _)) => {
                let value = cpu.read_register16(&reg);
                let addr = cpu.fetch16(mmu);
                mmu.write16(addr, value);
            }
            _ => {
                let value = Handlers::read_operand(cpu, mmu, &src)?;
                Handlers::write_operand(cpu, mmu, &dst, value)?;
            }
        }

        Ok(instruction.cycles.0)
    }

    pub fn increment(cpu: &mut Cpu, mmu: &mut Mmu, instruction: &Instruction) -> Result<usize, PocketError> {
        let dst = Handlers::destination(instruction)?;

        match dst {
            Operand::Reg16(reg, mode) if mode.contains(AddressingMode::Direct) => {
                let value = cpu.read_register16(&reg).wrapping_add(1);
                cpu.write_register16(&reg, value);
            }
            _ => {
                let value = Handlers::read_operand(cpu, mmu, &dst)?;
                let result = value.wrapping_add(1);
                Handlers::write_operand(cpu, mmu, &dst, result)?;

                cpu.update_flag(Flags::ZERO, result == 0);
                cpu.update_flag(Flags::SUBTRACT, false);
                cpu.update_flag(Flags::HALF_CARRY, value & 0x0f == 0x0f);
            }
        }

        Ok(instruction.cycles.0)
    }

    pub fn decrement(cpu: &mut Cpu, mmu: &mut Mmu, instruction: &Instruction) -> Result<usize, PocketError> {
        let dst = Handlers::destination(instruction)?;

        match dst {
            Operand::Reg16(reg, mode) if mode.contains(AddressingMode::Direct) => {
                let value = cpu.read_register16(&reg).wrapping_sub(1);
                cpu.write_register16(&reg, value);
            }
            _ => {
                let value = Handlers::read_operand(cpu, mmu, &dst)?;
                let result = value.wrapping_sub(1);
                Handlers::write_operand(cpu, mmu, &dst, result)?;

                cpu.update_flag(Flags::ZERO, result == 0);
                cpu.update_flag(Flags::SUBTRACT, true);
                cpu.update_flag(Flags::HALF_CARRY, value & 0x0f == 0);
            }
        }

        Ok(instruction.cycles.0)
    }

    pub fn add(cpu: &mut Cpu, mmu: &mut Mmu, instruction: &Instruction) -> Result<usize, PocketError> {
        let (dst, src) = Handlers::operands(instruction)?;

        match (dst, src) {
            // add hl, r16
            (Operand::Reg16(Register::HL, _), Operand::Reg16(reg, _)) => {
                let hl = cpu.read_register16(&Register::HL);
                let value = cpu.read_register16(&reg);
                let result = hl.wrapping_add(value);

                cpu.write_register16(&Register::HL, result);
                cpu.update_flag(Flags::SUBTRACT, false);
                cpu.update_flag(Flags::HALF_CARRY, (hl & 0x0fff) + (value & 0x0fff) > 0x0fff);
                cpu.update_flag(Flags::CARRY, hl as u32 + value as u32 > 0xffff);
            }
            // add sp, e8
            (Operand::Reg16(Register::SP, _), Operand::Offset) => {
                let result = Handlers::add_signed_offset(cpu, mmu, &Register::SP);
                cpu.write_register16(&Register::SP, result);
            }
            _ => {
                let value = Handlers::read_operand(cpu, mmu, &src)?;
                let a = cpu.read_register(&Register::A);
                let result = Handlers::add8(cpu, a, value, false);
                cpu.write_register(&Register::A, result);
            }
        }

        Ok(instruction.cycles.0)
    }

    pub fn add_with_carry(cpu: &mut Cpu, mmu: &mut Mmu, instruction: &Instruction) -> Result<usize, PocketError> {
        let src = Handlers::source(instruction)?;
        let value = Handlers::read_operand(cpu, mmu, &src)?;
        let a = cpu.read_register(&Register::A);
        let carry = cpu.read_flag(Flags::CARRY);

        let result = Handlers::add8(cpu, a, value, carry);
        cpu.write_register(&Register::A, result);

        Ok(instruction.cycles.0)
    }

    pub fn sub(cpu: &mut Cpu, mmu: &mut Mmu, instruction: &Instruction) -> Result<usize, PocketError> {
        let src = Handlers::source(instruction)?;
        let value = Handlers::read_operand(cpu, mmu, &src)?;
        let a = cpu.read_register(&Register::A);

        let result = Handlers::sub8(cpu, a, value, false);
        cpu.write_register(&Register::A, result);

        Ok(instruction.cycles.0)
    }

    pub fn sub_with_carry(cpu: &mut Cpu, mmu: &mut Mmu, instruction: &Instruction) -> Result<usize, PocketError> {
        let src = Handlers::source(instruction)?;
        let value = Handlers::read_operand(cpu, mmu, &src)?;
        let a = cpu.read_register(&Register::A);
        let carry = cpu.read_flag(Flags::CARRY);

        let result = Handlers::sub8(cpu, a, value, carry);
        cpu.write_register(&Register::A, result);

        Ok(instruction.cycles.0)
    }

    pub fn compare(cpu: &mut Cpu, mmu: &mut Mmu, instruction: &Instruction) -> Result<usize, PocketError> {
        let src = Handlers::source(instruction)?;
        let value = Handlers::read_operand(cpu, mmu, &src)?;
        let a = cpu.read_register(&Register::A);

        // Flags only; A is left alone.
        Handlers::sub8(cpu, a, value, false);

        Ok(instruction.cycles.0)
    }

    pub fn and(cpu: &mut Cpu, mmu: &mut Mmu, instruction: &Instruction) -> Result<usize, PocketError> {
        let src = Handlers::source(instruction)?;
        let value = Handlers::read_operand(cpu, mmu, &src)?;
        let result = cpu.read_register(&Register::A) & value;

        cpu.write_register(&Register::A, result);
        Handlers::set_logic_flags(cpu, result, true);

        Ok(instruction.cycles.0)
    }

    pub fn xor(cpu: &mut Cpu, mmu: &mut Mmu, instruction: &Instruction) -> Result<usize, PocketError> {
        let src = Handlers::source(instruction)?;
        let value = Handlers::read_operand(cpu, mmu, &src)?;
        let result = cpu.read_register(&Register::A) ^ value;

        cpu.write_register(&Register::A, result);
        Handlers::set_logic_flags(cpu, result, false);

        Ok(instruction.cycles.0)
    }

    pub fn or(cpu: &mut Cpu, mmu: &mut Mmu, instruction: &Instruction) -> Result<usize, PocketError> {
        let src = Handlers::source(instruction)?;
        let value = Handlers::read_operand(cpu, mmu, &src)?;
        let result = cpu.read_register(&Register::A) | value;

        cpu.write_register(&Register::A, result);
        Handlers::set_logic_flags(cpu, result, false);

        Ok(instruction.cycles.0)
    }

    /// rlca, rrca, rla, rra: like their prefixed forms, except Z is always
    /// cleared.
    pub fn rotate_accumulator(cpu: &mut Cpu, mmu: &mut Mmu, instruction: &Instruction) -> Result<usize, PocketError> {
        let opcode = match instruction.opcode {
            Opcode::Rlca => Opcode::Rlc,
            Opcode::Rrca => Opcode::Rrc,
            Opcode::Rla => Opcode::Rl,
            Opcode::Rra => Opcode::Rr,
            _ => return InvalidHandlerSnafu { instruction: *instruction }.fail(),
        };

        let value = cpu.read_register(&Register::A);
        let result = Handlers::shift_value(cpu, opcode, value);
        cpu.write_register(&Register::A, result);
        cpu.update_flag(Flags::ZERO, false);

        Ok(instruction.cycles.0)
    }

    pub fn shift(cpu: &mut Cpu, mmu: &mut Mmu, instruction: &Instruction) -> Result<usize, PocketError> {
        let dst = Handlers::destination(instruction)?;
        let value = Handlers::read_operand(cpu, mmu, &dst)?;
        let result = Handlers::shift_value(cpu, instruction.opcode, value);
        Handlers::write_operand(cpu, mmu, &dst, result)?;

        Ok(instruction.cycles.0)
    }

    pub fn test_bit(cpu: &mut Cpu, mmu: &mut Mmu, instruction: &Instruction) -> Result<usize, PocketError> {
        let (bit, src) = Handlers::bit_operands(instruction)?;
        let value = Handlers::read_operand(cpu, mmu, &src)?;

        cpu.update_flag(Flags::ZERO, value & (1 << bit) == 0);
        cpu.update_flag(Flags::SUBTRACT, false);
        cpu.update_flag(Flags::HALF_CARRY, true);

        Ok(instruction.cycles.0)
    }

    pub fn reset_bit(cpu: &mut Cpu, mmu: &mut Mmu, instruction: &Instruction) -> Result<usize, PocketError> {
        let (bit, dst) = Handlers::bit_operands(instruction)?;
        let value = Handlers::read_operand(cpu, mmu, &dst)?;
        Handlers::write_operand(cpu, mmu, &dst, value & !(1 << bit))?;

        Ok(instruction.cycles.0)
    }

    pub fn set_bit(cpu: &mut Cpu, mmu: &mut Mmu, instruction: &Instruction) -> Result<usize, PocketError> {
        let (bit, dst) = Handlers::bit_operands(instruction)?;
        let value = Handlers::read_operand(cpu, mmu, &dst)?;
        Handlers::write_operand(cpu, mmu, &dst, value | (1 << bit))?;

        Ok(instruction.cycles.0)
    }

    pub fn decimal_adjust(cpu: &mut Cpu, mmu: &mut Mmu, instruction: &Instruction) -> Result<usize, PocketError> {
        let mut a = cpu.read_register(&Register::A);
        let mut carry = cpu.read_flag(Flags::CARRY);
        let half_carry = cpu.read_flag(Flags::HALF_CARRY);

        if !cpu.read_flag(Flags::SUBTRACT) {
            if carry || a > 0x99 {
                a = a.wrapping_add(0x60);
                carry = true;
            }
            if half_carry || a & 0x0f > 0x09 {
                a = a.wrapping_add(0x06);
            }
        } else {
            if carry {
                a = a.wrapping_sub(0x60);
            }
            if half_carry {
                a = a.wrapping_sub(0x06);
            }
        }

        cpu.write_register(&Register::A, a);
        cpu.update_flag(Flags::ZERO, a == 0);
        cpu.update_flag(Flags::HALF_CARRY, false);
        cpu.update_flag(Flags::CARRY, carry);

        Ok(instruction.cycles.0)
    }

    pub fn complement(cpu: &mut Cpu, mmu: &mut Mmu, instruction: &Instruction) -> Result<usize, PocketError> {
        let a = cpu.read_register(&Register::A);
        cpu.write_register(&Register::A, !a);
        cpu.update_flag(Flags::SUBTRACT, true);
        cpu.update_flag(Flags::HALF_CARRY, true);

        Ok(instruction.cycles.0)
    }

    pub fn set_carry(cpu: &mut Cpu, mmu: &mut Mmu, instruction: &Instruction) -> Result<usize, PocketError> {
        cpu.update_flag(Flags::SUBTRACT, false);
        cpu.update_flag(Flags::HALF_CARRY, false);
        cpu.update_flag(Flags::CARRY, true);

        Ok(instruction.cycles.0)
    }

    pub fn complement_carry(cpu: &mut Cpu, mmu: &mut Mmu, instruction: &Instruction) -> Result<usize, PocketError> {
        let carry = cpu.read_flag(Flags::CARRY);
        cpu.update_flag(Flags::SUBTRACT, false);
        cpu.update_flag(Flags::HALF_CARRY, false);
        cpu.update_flag(Flags::CARRY, !carry);

        Ok(instruction.cycles.0)
    }

    pub fn jump(cpu: &mut Cpu, mmu: &mut Mmu, instruction: &Instruction) -> Result<usize, PocketError> {
        let (cond, src) = Handlers::operands(instruction)?;
        // The target is always consumed, taken or not.
        let target = Handlers::read_operand16(cpu, mmu, &src)?;

        if Handlers::check_condition(cpu, &cond) {
            cpu.write_register16(&Register::PC, target);
            Ok(instruction.cycles.0)
        } else {
            Ok(Handlers::not_taken(instruction))
        }
    }

    pub fn jump_relative(cpu: &mut Cpu, mmu: &mut Mmu, instruction: &Instruction) -> Result<usize, PocketError> {
        let cond = Handlers::destination(instruction)?;
        let offset = cpu.fetch(mmu) as i8;

        if Handlers::check_condition(cpu, &cond) {
            let pc = cpu.read_register16(&Register::PC).wrapping_add_signed(offset as i16);
            cpu.write_register16(&Register::PC, pc);
            Ok(instruction.cycles.0)
        } else {
            Ok(Handlers::not_taken(instruction))
        }
    }

    pub fn call(cpu: &mut Cpu, mmu: &mut Mmu, instruction: &Instruction) -> Result<usize, PocketError> {
        let (cond, src) = Handlers::operands(instruction)?;
        let target = Handlers::read_operand16(cpu, mmu, &src)?;

        if Handlers::check_condition(cpu, &cond) {
            let pc = cpu.read_register16(&Register::PC);
            cpu.push_stack(mmu, pc);
            cpu.write_register16(&Register::PC, target);
            Ok(instruction.cycles.0)
        } else {
            Ok(Handlers::not_taken(instruction))
        }
    }

    pub fn ret(cpu: &mut Cpu, mmu: &mut Mmu, instruction: &Instruction) -> Result<usize, PocketError> {
        let cond = Handlers::destination(instruction)?;

        if Handlers::check_condition(cpu, &cond) {
            let pc = cpu.pop_stack(mmu);
            cpu.write_register16(&Register::PC, pc);
            Ok(instruction.cycles.0)
        } else {
            Ok(Handlers::not_taken(instruction))
        }
    }

    pub fn reti(cpu: &mut Cpu, mmu: &mut Mmu, instruction: &Instruction) -> Result<usize, PocketError> {
        let pc = cpu.pop_stack(mmu);
        cpu.write_register16(&Register::PC, pc);
        cpu.ime.enabled = true;

        Ok(instruction.cycles.0)
    }

    pub fn restart(cpu: &mut Cpu, mmu: &mut Mmu, instruction: &Instruction) -> Result<usize, PocketError> {
        let target = match Handlers::destination(instruction)? {
            Operand::Vector(target) => target,
            _ => return InvalidHandlerSnafu { instruction: *instruction }.fail(),
        };

        let pc = cpu.read_register16(&Register::PC);
        cpu.push_stack(mmu, pc);
        cpu.write_register16(&Register::PC, target);

        Ok(instruction.cycles.0)
    }

    pub fn push(cpu: &mut Cpu, mmu: &mut Mmu, instruction: &Instruction) -> Result<usize, PocketError> {
        let src = Handlers::destination(instruction)?;
        let value = Handlers::read_operand16(cpu, mmu, &src)?;
        cpu.push_stack(mmu, value);

        Ok(instruction.cycles.0)
    }

    pub fn pop(cpu: &mut Cpu, mmu: &mut Mmu, instruction: &Instruction) -> Result<usize, PocketError> {
        let reg = match Handlers::destination(instruction)? {
            Operand::Reg16(reg, _) => reg,
            _ => return InvalidHandlerSnafu { instruction: *instruction }.fail(),
        };

        let value = cpu.pop_stack(mmu);
        cpu.write_register16(&reg, value);

        Ok(instruction.cycles.0)
    }

    pub fn halt(cpu: &mut Cpu, mmu: &mut Mmu, instruction: &Instruction) -> Result<usize, PocketError> {
        cpu.halted = true;
        Ok(instruction.cycles.0)
    }

    // Low-power mode is not modelled; only the padding byte is consumed.
    pub fn stop(cpu: &mut Cpu, mmu: &mut Mmu, instruction: &Instruction) -> Result<usize, PocketError> {
        cpu.fetch(mmu);
        debug!("stop at ${:04x}", cpu.read_register16(&Register::PC).wrapping_sub(2));
        Ok(instruction.cycles.0)
    }

    pub fn disable_interrupts(cpu: &mut Cpu, mmu: &mut Mmu, instruction: &Instruction) -> Result<usize, PocketError> {
        cpu.ime.schedule(false);
        Ok(instruction.cycles.0)
    }

    pub fn enable_interrupts(cpu: &mut Cpu, mmu: &mut Mmu, instruction: &Instruction) -> Result<usize, PocketError> {
        cpu.ime.schedule(true);
        Ok(instruction.cycles.0)
    }

    fn read_operand(cpu: &mut Cpu, mmu: &mut Mmu, operand: &Operand) -> Result<u8, PocketError> {
        let value = match operand {
            Operand::Reg8(reg, mode) if mode.contains(AddressingMode::Indirect) => {
                mmu.read(HIGH_PAGE | cpu.read_register(reg) as u16)
            }
            Operand::Reg8(reg, _) => cpu.read_register(reg),
            Operand::Reg16(reg, mode) if mode.contains(AddressingMode::Indirect) => {
                let addr = Handlers::indirect_address(cpu, reg, *mode);
                mmu.read(addr)
            }
            Operand::Imm8(mode) if mode.contains(AddressingMode::Indirect) => {
                let offset = cpu.fetch(mmu);
                mmu.read(HIGH_PAGE | offset as u16)
            }
            Operand::Imm8(_) => cpu.fetch(mmu),
            Operand::Imm16(mode) if mode.contains(AddressingMode::Indirect) => {
                let addr = cpu.fetch16(mmu);
                mmu.read(addr)
            }
            _ => return UnresolvedTargetSnafu { target: *operand }.fail(),
        };

        Ok(value)
    }

    fn write_operand(cpu: &mut Cpu, mmu: &mut Mmu, operand: &Operand, value: u8) -> Result<(), PocketError> {
        match operand {
            Operand::Reg8(reg, mode) if mode.contains(AddressingMode::Indirect) => {
                mmu.write(HIGH_PAGE | cpu.read_register(reg) as u16, value)
            }
            Operand::Reg8(reg, _) => cpu.write_register(reg, value),
            Operand::Reg16(reg, mode) if mode.contains(AddressingMode::Indirect) => {
                let addr = Handlers::indirect_address(cpu, reg, *mode);
                mmu.write(addr, value);
            }
            Operand::Imm8(mode) if mode.contains(AddressingMode::Indirect) => {
                let offset = cpu.fetch(mmu);
                mmu.write(HIGH_PAGE | offset as u16, value);
            }
            Operand::Imm16(mode) if mode.contains(AddressingMode::Indirect) => {
                let addr = cpu.fetch16(mmu);
                mmu.write(addr, value);
            }
            _ => return UnresolvedTargetSnafu { target: *operand }.fail(),
        }

        Ok(())
    }

    fn read_operand16(cpu: &mut Cpu, mmu: &mut Mmu, operand: &Operand) -> Result<u16, PocketError> {
        match operand {
            Operand::Reg16(reg, mode) if mode.contains(AddressingMode::Direct) => Ok(cpu.read_register16(reg)),
            Operand::Imm16(mode) if mode.contains(AddressingMode::Direct) => Ok(cpu.fetch16(mmu)),
            _ => UnresolvedTargetSnafu { target: *operand }.fail(),
        }
    }

    // (hl+) and (hl-) adjust the pair after yielding the address.
    fn indirect_address(cpu: &mut Cpu, reg: &Register, mode: AddressingMode) -> u16 {
        let addr = cpu.read_register16(reg);

        if mode.contains(AddressingMode::Increment) {
            cpu.write_register16(reg, addr.wrapping_add(1));
        } else if mode.contains(AddressingMode::Decrement) {
            cpu.write_register16(reg, addr.wrapping_sub(1));
        }

        addr
    }

    /// Shared by `add sp, e8` and `ld hl, sp+e8`: Z and N clear, H and C from
    /// the unsigned add on the low byte.
    fn add_signed_offset(cpu: &mut Cpu, mmu: &mut Mmu, base: &Register) -> u16 {
        let value = cpu.read_register16(base);
        let offset = cpu.fetch(mmu) as i8 as i16 as u16;

        cpu.update_flag(Flags::ZERO, false);
        cpu.update_flag(Flags::SUBTRACT, false);
        cpu.update_flag(Flags::HALF_CARRY, (value & 0x000f) + (offset & 0x000f) > 0x000f);
        cpu.update_flag(Flags::CARRY, (value & 0x00ff) + (offset & 0x00ff) > 0x00ff);

        value.wrapping_add(offset)
    }

    fn add8(cpu: &mut Cpu, a: u8, b: u8, carry: bool) -> u8 {
        let carry = carry as u8;
        let result = a.wrapping_add(b).wrapping_add(carry);

        cpu.update_flag(Flags::ZERO, result == 0);
        cpu.update_flag(Flags::SUBTRACT, false);
        cpu.update_flag(Flags::HALF_CARRY, (a & 0x0f) + (b & 0x0f) + carry > 0x0f);
        cpu.update_flag(Flags::CARRY, a as u16 + b as u16 + carry as u16 > 0xff);

        result
    }

    fn sub8(cpu: &mut Cpu, a: u8, b: u8, carry: bool) -> u8 {
        let carry = carry as u8;
        let result = a.wrapping_sub(b).wrapping_sub(carry);

        cpu.update_flag(Flags::ZERO, result == 0);
        cpu.update_flag(Flags::SUBTRACT, true);
        cpu.update_flag(Flags::HALF_CARRY, (a & 0x0f) < (b & 0x0f) + carry);
        cpu.update_flag(Flags::CARRY, (a as u16) < b as u16 + carry as u16);

        result
    }

    fn set_logic_flags(cpu: &mut Cpu, result: u8, half_carry: bool) {
        cpu.update_flag(Flags::ZERO, result == 0);
        cpu.update_flag(Flags::SUBTRACT, false);
        cpu.update_flag(Flags::HALF_CARRY, half_carry);
        cpu.update_flag(Flags::CARRY, false);
    }

    // Prefixed rotate/shift family. Z from the result, N and H clear.
    fn shift_value(cpu: &mut Cpu, opcode: Opcode, value: u8) -> u8 {
        let carry_in = cpu.read_flag(Flags::CARRY) as u8;

        let (result, carry) = match opcode {
            Opcode::Rlc => (value.rotate_left(1), value & 0x80 != 0),
            Opcode::Rrc => (value.rotate_right(1), value & 0x01 != 0),
            Opcode::Rl => ((value << 1) | carry_in, value & 0x80 != 0),
            Opcode::Rr => ((value >> 1) | (carry_in << 7), value & 0x01 != 0),
            Opcode::Sla => (value << 1, value & 0x80 != 0),
            Opcode::Sra => ((value >> 1) | (value & 0x80), value & 0x01 != 0),
            Opcode::Swap => (value.rotate_left(4), false),
            _ => (value >> 1, value & 0x01 != 0),
        };

        cpu.update_flag(Flags::ZERO, result == 0);
        cpu.update_flag(Flags::SUBTRACT, false);
        cpu.update_flag(Flags::HALF_CARRY, false);
        cpu.update_flag(Flags::CARRY, carry);

        result
    }

    fn check_condition(cpu: &Cpu, operand: &Operand) -> bool {
        match operand {
            Operand::Conditional(Condition::NZ) => !cpu.read_flag(Flags::ZERO),
            Operand::Conditional(Condition::Z) => cpu.read_flag(Flags::ZERO),
            Operand::Conditional(Condition::NC) => !cpu.read_flag(Flags::CARRY),
            Operand::Conditional(Condition::C) => cpu.read_flag(Flags::CARRY),
            _ => true,
        }
    }

    #[inline]
    fn not_taken(instruction: &Instruction) -> usize {
        instruction.cycles.1.unwrap_or(instruction.cycles.0)
    }

    #[inline]
    fn destination(instruction: &Instruction) -> Result<Operand, PocketError> {
        instruction.lhs.context(InvalidHandlerSnafu { instruction: *instruction })
    }

    #[inline]
    fn source(instruction: &Instruction) -> Result<Operand, PocketError> {
        instruction.rhs.context(InvalidHandlerSnafu { instruction: *instruction })
    }

    #[inline]
    fn operands(instruction: &Instruction) -> Result<(Operand, Operand), PocketError> {
        Ok((Handlers::destination(instruction)?, Handlers::source(instruction)?))
    }

    fn bit_operands(instruction: &Instruction) -> Result<(u8, Operand), PocketError> {
        match Handlers::operands(instruction)? {
            (Operand::Bit(bit), operand) => Ok((bit, operand)),
            _ => InvalidHandlerSnafu { instruction: *instruction }.fail(),
        }
    }
}
