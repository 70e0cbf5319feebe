/// PPU mode, in the order a visible scanline walks through them.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum State {
    HBlank,  // H-Blank
    VBlank,  // V-Blank
    OamScan, // OAM Scan
    Drawing, // Drawing
}

impl State {
    /// Dots spent in the mode before the next transition.
    pub fn duration(self) -> usize {
        match self {
            State::OamScan => 80,
            State::Drawing => 172,
            State::HBlank => 204,
            State::VBlank => 456,
        }
    }

    /// Value of the STAT mode bits.
    pub fn as_u8(self) -> u8 {
        match self {
            State::HBlank => 0,
            State::VBlank => 1,
            State::OamScan => 2,
            State::Drawing => 3,
        }
    }
}
