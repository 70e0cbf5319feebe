use crate::memory::mmu::Mmu;
use crate::memory::registers::{InterruptFlags, LcdControl, LcdStatus};
use crate::video::renderer::Renderer;
use crate::video::state::State;
use crate::video::{
    FRAME_SIZE, LCD_CONTROL_REGISTER, LCD_STATUS_REGISTER, SCANLINE_Y_COMPARE_REGISTER, SCANLINE_Y_REGISTER,
};
use log::trace;

pub const VISIBLE_SCANLINES: u8 = 144;
pub const LAST_SCANLINE: u8 = 153;

#[derive(Clone)]
pub struct Ppu {
    state: State,
    line_ticks: usize,
    lcd_enabled: bool,
    frame: Vec<u8>,
}

impl Ppu {
    pub fn new() -> Ppu {
        Ppu {
            state: State::OamScan,
            line_ticks: 0,
            lcd_enabled: true,
            frame: vec![0xff; FRAME_SIZE],
        }
    }

    /// Advances the mode machine by `cycles` dots. Returns true when the
    /// machine entered VBlank during this call, i.e. a frame is complete.
    pub fn tick(&mut self, mmu: &mut Mmu, cycles: usize) -> bool {
        let lcdc = LcdControl::from(mmu.io(LCD_CONTROL_REGISTER));
        if !lcdc.contains(LcdControl::LCD_DISPLAY) {
            self.disable(mmu);
            return false;
        }

        if !self.lcd_enabled {
            self.enter(mmu, State::OamScan);
        }

        let mut frame_ready = false;
        self.line_ticks += cycles;

        while self.line_ticks >= self.state.duration() {
            self.line_ticks -= self.state.duration();

            let next = match self.state {
                State::OamScan => State::Drawing,
                State::Drawing => {
                    Renderer::render_scanline(mmu, &mut self.frame);
                    State::HBlank
                }
                State::HBlank => {
                    let ly = self.next_scanline(mmu);
                    if ly == VISIBLE_SCANLINES {
                        mmu.request_interrupt(InterruptFlags::VBLANK);
                        frame_ready = true;
                        State::VBlank
                    } else {
                        State::OamScan
                    }
                }
                State::VBlank => {
                    let ly = self.next_scanline(mmu);
                    if ly > LAST_SCANLINE {
                        mmu.set_io(SCANLINE_Y_REGISTER, 0);
                        State::OamScan
                    } else {
                        State::VBlank
                    }
                }
            };

            self.enter(mmu, next);
        }

        frame_ready
    }

    fn next_scanline(&mut self, mmu: &mut Mmu) -> u8 {
        let ly = mmu.io(SCANLINE_Y_REGISTER).wrapping_add(1);
        mmu.set_io(SCANLINE_Y_REGISTER, ly);
        ly
    }

    // Mode bits, mode interrupts and the LY=LYC comparison, after every
    // transition. Mode interrupts only fire when the mode actually changes,
    // or on the first line after the LCD is switched back on.
    fn enter(&mut self, mmu: &mut Mmu, state: State) {
        let entered = state != self.state || !self.lcd_enabled;
        if entered {
            trace!("PPU {:?} -> {:?} at LY {}", self.state, state, mmu.io(SCANLINE_Y_REGISTER));
        }
        self.state = state;
        self.lcd_enabled = true;

        let mut status = LcdStatus::from(mmu.io(LCD_STATUS_REGISTER));
        let mode_interrupt = match state {
            State::HBlank => LcdStatus::HBLANK_INTERRUPT,
            State::VBlank => LcdStatus::VBLANK_INTERRUPT,
            State::OamScan => LcdStatus::OAM_INTERRUPT,
            State::Drawing => LcdStatus::empty(),
        };
        let mut request = entered && !mode_interrupt.is_empty() && status.contains(mode_interrupt);

        let coincidence = mmu.io(SCANLINE_Y_REGISTER) == mmu.io(SCANLINE_Y_COMPARE_REGISTER);
        if coincidence && status.contains(LcdStatus::COINCIDENCE_INTERRUPT) {
            request = true;
        }

        status.set(LcdStatus::COINCIDENCE, coincidence);
        status = (status - LcdStatus::MODE) | LcdStatus::from_bits_truncate(state.as_u8());
        mmu.set_io(LCD_STATUS_REGISTER, status.bits());

        if request {
            mmu.request_interrupt(InterruptFlags::LCD_STAT);
        }
    }

    fn disable(&mut self, mmu: &mut Mmu) {
        self.state = State::OamScan;
        self.line_ticks = 0;
        self.lcd_enabled = false;
        mmu.set_io(SCANLINE_Y_REGISTER, 0);

        let status = LcdStatus::from(mmu.io(LCD_STATUS_REGISTER)) - LcdStatus::MODE;
        mmu.set_io(LCD_STATUS_REGISTER, status.bits());
    }

    #[inline]
    pub fn state(&self) -> State {
        self.state
    }

    #[cfg(test)]
    pub fn line_ticks(&self) -> usize {
        self.line_ticks
    }

    #[inline]
    pub fn pull_frame(&self) -> &[u8] {
        &self.frame
    }
}
