use crate::error::{IllegalOpcodeSnafu, IllegalPrefixedOpcodeSnafu, PocketError};
use crate::lr35902::handlers::Handlers;
use crate::lr35902::irq::Ime;
use crate::lr35902::registers::{Flags, Registers};
use crate::lr35902::sm83::{Instruction, Opcode, Register, Sm83};
use crate::memory::mmu::Mmu;
use log::trace;
use snafu::OptionExt;

/// Cost of a step spent halted, waiting for an interrupt.
pub const HALTED_CYCLES: usize = 4;

#[derive(Clone)]
pub struct Cpu {
    sm83: Sm83,
    pub(super) registers: Registers,
    pub(super) ime: Ime,
    pub(super) halted: bool,
}

impl Cpu {
    /// Power-on state, for running with a boot ROM.
    pub fn new() -> Cpu {
        Cpu {
            sm83: Sm83::new(),
            registers: Registers::default(),
            ime: Ime::new(),
            halted: false,
        }
    }

    /// State right after the boot ROM hands over to the cartridge.
    pub fn post_boot() -> Cpu {
        Cpu {
            registers: Registers::post_boot(),
            ..Cpu::new()
        }
    }

    /// Runs one step: services a pending interrupt, idles while halted, or
    /// fetches and executes a single instruction. Returns the t-cycles spent.
    pub fn step(&mut self, mmu: &mut Mmu) -> Result<usize, PocketError> {
        if let Some(cycles) = self.handle_interrupts(mmu) {
            return Ok(cycles);
        }

        if self.halted {
            return Ok(HALTED_CYCLES);
        }

        // EI and DI land once the instruction after them has run.
        let scheduled = self.ime.take_scheduled();

        let address = self.registers.pc;
        let opcode = self.fetch(mmu);
        let instruction = *self.sm83.lookup(opcode).context(IllegalOpcodeSnafu { opcode, address })?;

        trace!("[{:#06x}] {}", address, instruction);
        let cycles = self.execute(mmu, &instruction, address)?;

        if let Some(enabled) = scheduled {
            self.ime.enabled = enabled;
        }

        Ok(cycles)
    }

    fn execute(&mut self, mmu: &mut Mmu, instruction: &Instruction, address: u16) -> Result<usize, PocketError> {
        match instruction.opcode {
            Opcode::Prefix => {
                let opcode = self.fetch(mmu);
                let instruction = *self
                    .sm83
                    .lookup_prefixed(opcode)
                    .context(IllegalPrefixedOpcodeSnafu { opcode, address })?;
                trace!("[{:#06x}] {}", address, instruction);
                self.execute(mmu, &instruction, address)
            }
            Opcode::Nop => Handlers::nop(self, mmu, instruction),
            Opcode::Ld | Opcode::Ldh => Handlers::load(self, mmu, instruction),
            Opcode::Inc => Handlers::increment(self, mmu, instruction),
            Opcode::Dec => Handlers::decrement(self, mmu, instruction),
            Opcode::Add => Handlers::add(self, mmu, instruction),
            Opcode::Adc => Handlers::add_with_carry(self, mmu, instruction),
            Opcode::Sub => Handlers::sub(self, mmu, instruction),
            Opcode::Sbc => Handlers::sub_with_carry(self, mmu, instruction),
            Opcode::And => Handlers::and(self, mmu, instruction),
            Opcode::Xor => Handlers::xor(self, mmu, instruction),
            Opcode::Or => Handlers::or(self, mmu, instruction),
            Opcode::Cp => Handlers::compare(self, mmu, instruction),
            Opcode::Rlca | Opcode::Rrca | Opcode::Rla | Opcode::Rra => {
                Handlers::rotate_accumulator(self, mmu, instruction)
            }
            Opcode::Rlc
            | Opcode::Rrc
            | Opcode::Rl
            | Opcode::Rr
            | Opcode::Sla
            | Opcode::Sra
            | Opcode::Swap
            | Opcode::Srl => Handlers::shift(self, mmu, instruction),
            Opcode::Bit => Handlers::test_bit(self, mmu, instruction),
            Opcode::Res => Handlers::reset_bit(self, mmu, instruction),
            Opcode::Set => Handlers::set_bit(self, mmu, instruction),
            Opcode::Daa => Handlers::decimal_adjust(self, mmu, instruction),
            Opcode::Cpl => Handlers::complement(self, mmu, instruction),
            Opcode::Scf => Handlers::set_carry(self, mmu, instruction),
            Opcode::Ccf => Handlers::complement_carry(self, mmu, instruction),
            Opcode::Jp => Handlers::jump(self, mmu, instruction),
            Opcode::Jr => Handlers::jump_relative(self, mmu, instruction),
            Opcode::Call => Handlers::call(self, mmu, instruction),
            Opcode::Ret => Handlers::ret(self, mmu, instruction),
            Opcode::Reti => Handlers::reti(self, mmu, instruction),
            Opcode::Rst => Handlers::restart(self, mmu, instruction),
            Opcode::Push => Handlers::push(self, mmu, instruction),
            Opcode::Pop => Handlers::pop(self, mmu, instruction),
            Opcode::Halt => Handlers::halt(self, mmu, instruction),
            Opcode::Stop => Handlers::stop(self, mmu, instruction),
            Opcode::Di => Handlers::disable_interrupts(self, mmu, instruction),
            Opcode::Ei => Handlers::enable_interrupts(self, mmu, instruction),
        }
    }

    #[inline]
    pub fn fetch(&mut self, mmu: &Mmu) -> u8 {
        let data = mmu.read(self.registers.pc);
        self.registers.pc = self.registers.pc.wrapping_add(1);
        data
    }

    #[inline]
    pub fn fetch16(&mut self, mmu: &Mmu) -> u16 {
        let low = self.fetch(mmu);
        let high = self.fetch(mmu);
        u16::from_le_bytes([low, high])
    }

    pub fn push_stack(&mut self, mmu: &mut Mmu, value: u16) {
        let [high, low] = value.to_be_bytes();
        self.registers.sp = self.registers.sp.wrapping_sub(1);
        mmu.write(self.registers.sp, high);
        self.registers.sp = self.registers.sp.wrapping_sub(1);
        mmu.write(self.registers.sp, low);
    }

    pub fn pop_stack(&mut self, mmu: &mut Mmu) -> u16 {
        let low = mmu.read(self.registers.sp);
        self.registers.sp = self.registers.sp.wrapping_add(1);
        let high = mmu.read(self.registers.sp);
        self.registers.sp = self.registers.sp.wrapping_add(1);
        u16::from_le_bytes([low, high])
    }

    #[inline]
    pub fn read_flag(&self, flag: Flags) -> bool {
        self.registers.flag(flag)
    }

    #[inline]
    pub fn update_flag(&mut self, flag: Flags, value: bool) {
        self.registers.set_flag(flag, value);
    }

    pub fn read_register(&self, register: &Register) -> u8 {
        match register {
            Register::A => self.registers.a,
            Register::B => self.registers.b,
            Register::C => self.registers.c,
            Register::D => self.registers.d,
            Register::E => self.registers.e,
            Register::H => self.registers.h,
            Register::L => self.registers.l,
            Register::F => self.registers.f.bits(),
            _ => self.read_register16(register) as u8,
        }
    }

    pub fn read_register16(&self, register: &Register) -> u16 {
        match register {
            Register::AF => self.registers.af(),
            Register::BC => self.registers.bc(),
            Register::DE => self.registers.de(),
            Register::HL => self.registers.hl(),
            Register::SP => self.registers.sp,
            Register::PC => self.registers.pc,
            _ => self.read_register(register) as u16,
        }
    }

    pub fn write_register(&mut self, register: &Register, data: u8) {
        match register {
            Register::A => self.registers.a = data,
            Register::B => self.registers.b = data,
            Register::C => self.registers.c = data,
            Register::D => self.registers.d = data,
            Register::E => self.registers.e = data,
            Register::H => self.registers.h = data,
            Register::L => self.registers.l = data,
            Register::F => self.registers.f = Flags::from_bits_truncate(data),
            _ => self.write_register16(register, data as u16),
        }
    }

    pub fn write_register16(&mut self, register: &Register, value: u16) {
        match register {
            Register::AF => self.registers.set_af(value),
            Register::BC => self.registers.set_bc(value),
            Register::DE => self.registers.set_de(value),
            Register::HL => self.registers.set_hl(value),
            Register::SP => self.registers.sp = value,
            Register::PC => self.registers.pc = value,
            _ => self.write_register(register, value as u8),
        }
    }

    #[inline]
    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    #[inline]
    pub fn registers_mut(&mut self) -> &mut Registers {
        &mut self.registers
    }

    #[inline]
    pub fn ime(&self) -> bool {
        self.ime.enabled
    }

    #[inline]
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn disassemble(&self, mmu: &Mmu, addr: u16) -> String {
        self.sm83.disassemble(mmu, addr)
    }
}

impl std::fmt::Display for Cpu {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}  IME: {}  HALT: {}", self.registers, self.ime.enabled as u8, self.halted as u8)
    }
}
