use crate::memory::mmu::Mmu;
use crate::video::OAM_ADDRESS;
use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct SpriteAttributes: u8 {
        const PALETTE   = 0b0001_0000;
        const FLIP_X    = 0b0010_0000;
        const FLIP_Y    = 0b0100_0000;
        const PRIORITY  = 0b1000_0000;
    }
}

/// One OAM entry. Coordinates are stored offset by (8, 16) so sprites can
/// sit partially off-screen.
#[derive(Debug, Clone, Copy)]
pub struct Sprite {
    pub x: u8,
    pub y: u8,
    pub tile_index: u8,
    pub attributes: SpriteAttributes,
}

impl Sprite {
    pub fn from_oam(mmu: &Mmu, index: u16) -> Self {
        let sprite_addr = OAM_ADDRESS + (index * 4);

        Sprite {
            y: mmu.read(sprite_addr),
            x: mmu.read(sprite_addr + 1),
            tile_index: mmu.read(sprite_addr + 2),
            attributes: SpriteAttributes::from_bits_truncate(mmu.read(sprite_addr + 3)),
        }
    }

    /// Row of the sprite covered by `scanline`, if any, with Y-flip applied.
    pub fn row_on_scanline(&self, scanline: usize, height: usize) -> Option<usize> {
        let top = self.y as isize - 16;
        let row = scanline as isize - top;
        if row < 0 || row >= height as isize {
            return None;
        }

        let row = row as usize;
        if self.attributes.contains(SpriteAttributes::FLIP_Y) {
            Some(height - 1 - row)
        } else {
            Some(row)
        }
    }
}
