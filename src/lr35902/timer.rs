use crate::memory::mmu::Mmu;
use crate::memory::registers::{InterruptFlags, TimerControl};
use crate::memory::{DIV_REGISTER, TAC_REGISTER, TIMA_REGISTER, TMA_REGISTER};

const DIVIDER_PERIOD: usize = 256;

#[derive(Clone)]
pub struct Timer {
    divider: usize,
    counter: usize,
    period: usize,
}

impl Timer {
    pub fn new() -> Timer {
        Timer {
            divider: 0,
            counter: 1024,
            period: 1024,
        }
    }

    pub fn tick(&mut self, mmu: &mut Mmu, cycles: usize) {
        if mmu.take_divider_reset() {
            self.divider = 0;
        }

        self.divider += cycles;
        while self.divider >= DIVIDER_PERIOD {
            self.divider -= DIVIDER_PERIOD;
            mmu.set_io(DIV_REGISTER, mmu.io(DIV_REGISTER).wrapping_add(1));
        }

        let tac = TimerControl::from(mmu.io(TAC_REGISTER));

        let period = Timer::period(tac);
        if period != self.period {
            self.period = period;
            self.counter = period;
        }

        if !tac.contains(TimerControl::ENABLE) {
            return;
        }

        let mut cycles = cycles;
        while cycles >= self.counter {
            cycles -= self.counter;
            self.counter = self.period;
            self.increment_tima(mmu);
        }
        self.counter -= cycles;
    }

    fn increment_tima(&mut self, mmu: &mut Mmu) {
        let tima = mmu.io(TIMA_REGISTER);
        if tima == 0xff {
            mmu.set_io(TIMA_REGISTER, mmu.io(TMA_REGISTER));
            mmu.request_interrupt(InterruptFlags::TIMER);
        } else {
            mmu.set_io(TIMA_REGISTER, tima + 1);
        }
    }

    #[inline]
    fn period(tac: TimerControl) -> usize {
        match (tac & TimerControl::FREQUENCY).bits() {
            0b00 => 1024,
            0b01 => 16,
            0b10 => 64,
            _ => 256,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::mapper;

    fn mmu() -> Mmu {
        Mmu::new(None, mapper::from_image(vec![0u8; 0x8000]))
    }

    #[test]
    fn divider_counts_every_256_cycles() {
        let mut mmu = mmu();
        let mut timer = Timer::new();

        timer.tick(&mut mmu, 255);
        assert_eq!(mmu.read(DIV_REGISTER), 0);
        timer.tick(&mut mmu, 1);
        assert_eq!(mmu.read(DIV_REGISTER), 1);
        timer.tick(&mut mmu, 512);
        assert_eq!(mmu.read(DIV_REGISTER), 3);
    }

    #[test]
    fn divider_write_restarts_count() {
        let mut mmu = mmu();
        let mut timer = Timer::new();

        timer.tick(&mut mmu, 200);
        mmu.write(DIV_REGISTER, 0x42);
        assert_eq!(mmu.read(DIV_REGISTER), 0);

        timer.tick(&mut mmu, 100);
        assert_eq!(mmu.read(DIV_REGISTER), 0);
        timer.tick(&mut mmu, 156);
        assert_eq!(mmu.read(DIV_REGISTER), 1);
    }

    #[test]
    fn disabled_timer_holds_tima() {
        let mut mmu = mmu();
        let mut timer = Timer::new();
        mmu.write(TAC_REGISTER, 0b001);

        timer.tick(&mut mmu, 1024);
        assert_eq!(mmu.read(TIMA_REGISTER), 0);
    }

    #[test]
    fn tima_counts_at_selected_rate() {
        let mut mmu = mmu();
        let mut timer = Timer::new();
        mmu.write(TAC_REGISTER, 0b101);

        timer.tick(&mut mmu, 15);
        assert_eq!(mmu.read(TIMA_REGISTER), 0);
        timer.tick(&mut mmu, 1);
        assert_eq!(mmu.read(TIMA_REGISTER), 1);
        timer.tick(&mut mmu, 64);
        assert_eq!(mmu.read(TIMA_REGISTER), 5);
    }

    #[test]
    fn overflow_reloads_from_tma() {
        let mut mmu = mmu();
        let mut timer = Timer::new();
        mmu.write(TAC_REGISTER, 0b101);
        mmu.write(TIMA_REGISTER, 0xff);
        mmu.write(TMA_REGISTER, 0xab);

        timer.tick(&mut mmu, 16);
        assert_eq!(mmu.read(TIMA_REGISTER), 0xab);
        assert!(mmu.interrupt_flags().contains(InterruptFlags::TIMER));
    }
}
