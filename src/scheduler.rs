use crate::lr35902::timer::Timer;
use crate::lr35902::T_CYCLES_PER_M_CYCLE;
use crate::memory::mmu::Mmu;
use crate::video::ppu::Ppu;
use crate::video::state::State;

/// Hands the cycles each CPU step consumed to the timer and the PPU, and
/// keeps the running totals.
#[derive(Clone)]
pub struct Scheduler {
    timer: Timer,
    ppu: Ppu,
    total_t_cycles: u64,
}

impl Scheduler {
    pub fn new() -> Scheduler {
        Scheduler {
            timer: Timer::new(),
            ppu: Ppu::new(),
            total_t_cycles: 0,
        }
    }

    /// Returns true when this advance completed a frame.
    pub fn advance(&mut self, mmu: &mut Mmu, cycles: usize) -> bool {
        self.total_t_cycles += cycles as u64;
        self.timer.tick(mmu, cycles);
        self.ppu.tick(mmu, cycles)
    }

    #[inline]
    pub fn total_t_cycles(&self) -> u64 {
        self.total_t_cycles
    }

    #[inline]
    pub fn total_m_cycles(&self) -> u64 {
        self.total_t_cycles / T_CYCLES_PER_M_CYCLE as u64
    }

    #[inline]
    pub fn ppu_state(&self) -> State {
        self.ppu.state()
    }

    #[inline]
    pub fn frame(&self) -> &[u8] {
        self.ppu.pull_frame()
    }
}
