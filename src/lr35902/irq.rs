use crate::lr35902::cpu::Cpu;
use crate::memory::mmu::Mmu;
use crate::memory::registers::InterruptFlags;
use log::trace;

/// Cost of dispatching to an interrupt vector.
pub const INTERRUPT_SERVICE_CYCLES: usize = 20;

/// Master enable plus the change EI/DI scheduled for after the next
/// instruction.
#[derive(Clone, Debug, Default)]
pub struct Ime {
    pub enabled: bool,
    pub scheduled: Option<bool>,
}

impl Ime {
    pub fn new() -> Ime {
        Ime::default()
    }

    #[inline]
    pub fn schedule(&mut self, enabled: bool) {
        self.scheduled = Some(enabled);
    }

    #[inline]
    pub fn take_scheduled(&mut self) -> Option<bool> {
        self.scheduled.take()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Vector {
    VBlank,
    Stat,
    Timer,
    Serial,
    Joypad,
}

impl Vector {
    pub fn from_flags(flags: InterruptFlags) -> Option<Vector> {
        let vector = match flags.highest_priority()? {
            InterruptFlags::VBLANK => Vector::VBlank,
            InterruptFlags::LCD_STAT => Vector::Stat,
            InterruptFlags::TIMER => Vector::Timer,
            InterruptFlags::SERIAL => Vector::Serial,
            _ => Vector::Joypad,
        };

        Some(vector)
    }

    pub fn to_flag(self) -> InterruptFlags {
        match self {
            Vector::VBlank => InterruptFlags::VBLANK,
            Vector::Stat => InterruptFlags::LCD_STAT,
            Vector::Timer => InterruptFlags::TIMER,
            Vector::Serial => InterruptFlags::SERIAL,
            Vector::Joypad => InterruptFlags::JOYPAD,
        }
    }

    pub fn to_address(self) -> u16 {
        match self {
            Vector::VBlank => 0x0040,
            Vector::Stat => 0x0048,
            Vector::Timer => 0x0050,
            Vector::Serial => 0x0058,
            Vector::Joypad => 0x0060,
        }
    }
}

impl Cpu {
    /// Checked before every fetch. Any pending source ends HALT, but only an
    /// enabled IME dispatches to a vector. Returns the cost when dispatched.
    pub fn handle_interrupts(&mut self, mmu: &mut Mmu) -> Option<usize> {
        let pending = mmu.pending_interrupts();
        if pending.is_empty() {
            return None;
        }

        self.halted = false;

        if !self.ime.enabled {
            return None;
        }

        let vector = Vector::from_flags(pending)?;
        trace!("Servicing {} interrupt", vector);

        // A pending EI must not reopen IME inside the handler.
        self.ime.enabled = false;
        self.ime.scheduled = None;
        mmu.set_interrupt_flags(mmu.interrupt_flags() - vector.to_flag());

        let pc = self.registers.pc;
        self.push_stack(mmu, pc);
        self.registers.pc = vector.to_address();

        Some(INTERRUPT_SERVICE_CYCLES)
    }
}

impl std::fmt::Display for Vector {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Vector::VBlank => write!(f, "VBLANK"),
            Vector::Stat => write!(f, "STAT"),
            Vector::Timer => write!(f, "TIMER"),
            Vector::Serial => write!(f, "SERIAL"),
            Vector::Joypad => write!(f, "JOYPAD"),
        }
    }
}
