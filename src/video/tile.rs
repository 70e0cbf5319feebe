use crate::memory::mmu::Mmu;
use crate::memory::registers::LcdControl;
use crate::video::{TILESET_0_ADDRESS, TILESET_1_ADDRESS};

const TILE_SIZE: u16 = 16;

/// One 8-pixel row of a tile: two bitplanes, leftmost pixel in bit 7.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileRow {
    low: u8,
    high: u8,
}

impl TileRow {
    pub fn from(mmu: &Mmu, tile_address: u16, row: u16) -> TileRow {
        let address = tile_address + row * 2;
        TileRow {
            low: mmu.read(address),
            high: mmu.read(address + 1),
        }
    }

    /// Colour index of the pixel `x` columns from the left.
    #[inline]
    pub fn color_index(&self, x: u8) -> u8 {
        let bit = 7 - (x & 0b111);
        (((self.high >> bit) & 1) << 1) | ((self.low >> bit) & 1)
    }
}

/// Address of a background/window tile. With LCDC bit 4 clear the index is
/// signed and block 0x8800 is centred on 0x9000.
pub fn tile_address(lcdc: LcdControl, index: u8) -> u16 {
    if lcdc.contains(LcdControl::BG_TILE_DATA) {
        TILESET_0_ADDRESS + index as u16 * TILE_SIZE
    } else {
        TILESET_1_ADDRESS + (index as i8 as i16 + 128) as u16 * TILE_SIZE
    }
}

/// Sprites always use unsigned addressing from 0x8000.
#[inline]
pub fn sprite_tile_address(index: u8) -> u16 {
    TILESET_0_ADDRESS + index as u16 * TILE_SIZE
}
