pub type Color = [u8; 4];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Palette {
    White,
    LightGray,
    DarkGray,
    Black,
}

impl Palette {
    /// Maps a 2-bit colour index through a BGP/OBP-style palette register.
    pub fn from_register(index: u8, register: u8) -> Palette {
        let shade = (register >> ((index & 0b11) * 2)) & 0b11;

        match shade {
            0b00 => Palette::White,
            0b01 => Palette::LightGray,
            0b10 => Palette::DarkGray,
            _ => Palette::Black,
        }
    }
}

impl From<Palette> for Color {
    fn from(palette: Palette) -> Color {
        match palette {
            Palette::White => [0xff, 0xff, 0xff, 0xff],
            Palette::LightGray => [0xaa, 0xaa, 0xaa, 0xff],
            Palette::DarkGray => [0x55, 0x55, 0x55, 0xff],
            Palette::Black => [0x00, 0x00, 0x00, 0xff],
        }
    }
}
