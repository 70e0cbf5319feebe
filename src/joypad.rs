const DIRECTION_SELECT: u8 = 0b0001_0000;
const BUTTON_SELECT: u8 = 0b0010_0000;

#[derive(Debug, Clone, Copy, PartialEq, clap::ValueEnum)]
pub enum Button {
    Right = 0,
    Left = 1,
    Up = 2,
    Down = 3,
    A = 4,
    B = 5,
    Select = 6,
    Start = 7,
}

impl Button {
    #[inline]
    fn mask(self) -> u8 {
        1 << self as u8
    }

    #[inline]
    fn select_line(self) -> u8 {
        match self {
            Button::Right | Button::Left | Button::Up | Button::Down => DIRECTION_SELECT,
            _ => BUTTON_SELECT,
        }
    }
}

/// Live button state, one bit per button in `Button` order. A set bit means
/// the button is released.
#[derive(Clone)]
pub struct Joypad {
    state: u8,
}

impl Joypad {
    pub fn new() -> Joypad {
        Joypad { state: 0xff }
    }

    #[inline]
    pub fn state(&self) -> u8 {
        self.state
    }

    /// Returns true when the press should raise the joypad interrupt: the
    /// button was released before and its select line is driven low.
    pub fn press(&mut self, button: Button, p1: u8) -> bool {
        let was_released = self.state & button.mask() != 0;
        self.state &= !button.mask();

        was_released && p1 & button.select_line() == 0
    }

    pub fn release(&mut self, button: Button) {
        self.state |= button.mask();
    }

    /// Combines the select bits written by software with the button matrix.
    /// Both groups may be selected at once, in which case they are ANDed.
    pub fn as_u8(&self, p1: u8) -> u8 {
        let mut low = 0x0f;
        if p1 & DIRECTION_SELECT == 0 {
            low &= self.state & 0x0f;
        }
        if p1 & BUTTON_SELECT == 0 {
            low &= self.state >> 4;
        }

        0b1100_0000 | (p1 & (DIRECTION_SELECT | BUTTON_SELECT)) | low
    }
}
