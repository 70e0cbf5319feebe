use crate::memory::mmu::Mmu;
use crate::memory::registers::LcdControl;
use crate::video::palette::{Color, Palette};
use crate::video::sprite::{Sprite, SpriteAttributes};
use crate::video::tile::{self, TileRow};
use crate::video::{
    BG_PALETTE_REGISTER, BYTES_PER_PIXEL, LCD_CONTROL_REGISTER, OBJ0_PALETTE_REGISTER, OBJ1_PALETTE_REGISTER,
    SCANLINE_Y_REGISTER, SCREEN_HEIGHT, SCREEN_WIDTH, SCROLL_X_REGISTER, SCROLL_Y_REGISTER, SPRITE_COUNT,
    TILEMAP_0_ADDRESS, TILEMAP_1_ADDRESS, TILEMAP_WIDTH, WINDOW_X_REGISTER, WINDOW_Y_REGISTER,
};

/// Draws scanline LY into an RGBA frame buffer. Holds no state between
/// lines; everything comes from VRAM, OAM and the LCD registers.
pub struct Renderer {}

impl Renderer {
    pub fn render_scanline(mmu: &Mmu, frame: &mut [u8]) {
        let ly = mmu.io(SCANLINE_Y_REGISTER) as usize;
        if ly >= SCREEN_HEIGHT {
            return;
        }

        let lcdc = LcdControl::from(mmu.io(LCD_CONTROL_REGISTER));
        let line = &mut frame[ly * SCREEN_WIDTH * BYTES_PER_PIXEL..(ly + 1) * SCREEN_WIDTH * BYTES_PER_PIXEL];

        // Colour indices before palette mapping, for sprite priority.
        let mut bg_indices = [0u8; SCREEN_WIDTH];

        Renderer::render_background(mmu, lcdc, ly, line, &mut bg_indices);

        if lcdc.contains(LcdControl::OBJ_DISPLAY) {
            Renderer::render_sprites(mmu, lcdc, ly, line, &bg_indices);
        }
    }

    fn render_background(mmu: &Mmu, lcdc: LcdControl, ly: usize, line: &mut [u8], bg_indices: &mut [u8]) {
        if !lcdc.contains(LcdControl::BG_DISPLAY) {
            for x in 0..SCREEN_WIDTH {
                Renderer::put_pixel(line, x, Palette::White.into());
            }
            return;
        }

        let palette = mmu.io(BG_PALETTE_REGISTER);
        let scroll_y = mmu.io(SCROLL_Y_REGISTER) as usize;
        let scroll_x = mmu.io(SCROLL_X_REGISTER) as usize;
        let window_y = mmu.io(WINDOW_Y_REGISTER) as usize;
        let window_x = mmu.io(WINDOW_X_REGISTER) as usize;

        let window_visible = lcdc.contains(LcdControl::WINDOW_DISPLAY) && window_y <= ly;
        let bg_map = Renderer::tilemap(lcdc.contains(LcdControl::BG_TILE_MAP));
        let window_map = Renderer::tilemap(lcdc.contains(LcdControl::WINDOW_TILE_MAP));

        for x in 0..SCREEN_WIDTH {
            // WX is offset by 7 so the window can start left of the screen.
            let (map, map_x, map_y) = if window_visible && x + 7 >= window_x {
                (window_map, x + 7 - window_x, ly - window_y)
            } else {
                (bg_map, (x + scroll_x) & 0xff, (ly + scroll_y) & 0xff)
            };

            let entry = map + (map_y as u16 / 8) * TILEMAP_WIDTH + map_x as u16 / 8;
            let tile_address = tile::tile_address(lcdc, mmu.read(entry));
            let row = TileRow::from(mmu, tile_address, map_y as u16 % 8);

            let index = row.color_index(map_x as u8);
            bg_indices[x] = index;
            Renderer::put_pixel(line, x, Palette::from_register(index, palette).into());
        }
    }

    fn render_sprites(mmu: &Mmu, lcdc: LcdControl, ly: usize, line: &mut [u8], bg_indices: &[u8]) {
        let height = if lcdc.contains(LcdControl::OBJ_SIZE) { 16 } else { 8 };

        // Drawn from the highest OAM slot down so lower slots end on top.
        for index in (0..SPRITE_COUNT).rev() {
            let sprite = Sprite::from_oam(mmu, index);
            let row = match sprite.row_on_scanline(ly, height) {
                Some(row) => row,
                None => continue,
            };

            let tile_index = if height == 16 { sprite.tile_index & 0xfe } else { sprite.tile_index };
            let pixels = TileRow::from(mmu, tile::sprite_tile_address(tile_index), row as u16);

            let palette = if sprite.attributes.contains(SpriteAttributes::PALETTE) {
                mmu.io(OBJ1_PALETTE_REGISTER)
            } else {
                mmu.io(OBJ0_PALETTE_REGISTER)
            };

            for column in 0..8u8 {
                let x = sprite.x as isize - 8 + column as isize;
                if x < 0 || x >= SCREEN_WIDTH as isize {
                    continue;
                }
                let x = x as usize;

                let column = if sprite.attributes.contains(SpriteAttributes::FLIP_X) { 7 - column } else { column };
                let index = pixels.color_index(column);
                if index == 0 {
                    continue;
                }

                if sprite.attributes.contains(SpriteAttributes::PRIORITY) && bg_indices[x] != 0 {
                    continue;
                }

                Renderer::put_pixel(line, x, Palette::from_register(index, palette).into());
            }
        }
    }

    #[inline]
    fn tilemap(high: bool) -> u16 {
        if high {
            TILEMAP_1_ADDRESS
        } else {
            TILEMAP_0_ADDRESS
        }
    }

    #[inline]
    fn put_pixel(line: &mut [u8], x: usize, color: Color) {
        let offset = x * BYTES_PER_PIXEL;
        line[offset..offset + BYTES_PER_PIXEL].copy_from_slice(&color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::mapper;
    use crate::video::{FRAME_SIZE, OAM_ADDRESS};

    const BLACK: Color = [0x00, 0x00, 0x00, 0xff];
    const WHITE: Color = [0xff, 0xff, 0xff, 0xff];
    const LIGHT: Color = [0xaa, 0xaa, 0xaa, 0xff];

    fn mmu() -> Mmu {
        let mut mmu = Mmu::new(None, mapper::from_image(vec![0u8; 0x8000]));
        mmu.write(LCD_CONTROL_REGISTER, 0x91);
        mmu.write(BG_PALETTE_REGISTER, 0b1110_0100);
        mmu.write(OBJ0_PALETTE_REGISTER, 0b1110_0100);
        mmu.write(OBJ1_PALETTE_REGISTER, 0b0101_0100);
        mmu
    }

    fn pixel(frame: &[u8], x: usize, y: usize) -> Color {
        let offset = (y * SCREEN_WIDTH + x) * BYTES_PER_PIXEL;
        let mut color = [0u8; 4];
        color.copy_from_slice(&frame[offset..offset + 4]);
        color
    }

    fn render_line(mmu: &mut Mmu, ly: u8) -> Vec<u8> {
        let mut frame = vec![0u8; FRAME_SIZE];
        mmu.set_io(SCANLINE_Y_REGISTER, ly);
        Renderer::render_scanline(mmu, &mut frame);
        frame
    }

    #[test]
    fn background_uses_tile_map_and_palette() {
        let mut mmu = mmu();
        // Tile 1 row 0: colour 3 on the leftmost pixel, colour 1 on the second.
        mmu.write(0x8010, 0b1100_0000);
        mmu.write(0x8011, 0b1000_0000);
        mmu.write(0x9801, 0x01);

        let frame = render_line(&mut mmu, 0);
        assert_eq!(pixel(&frame, 0, 0), WHITE);
        assert_eq!(pixel(&frame, 8, 0), BLACK);
        assert_eq!(pixel(&frame, 9, 0), LIGHT);
        assert_eq!(pixel(&frame, 10, 0), WHITE);
    }

    #[test]
    fn scroll_shifts_background() {
        let mut mmu = mmu();
        mmu.write(0x8010, 0xff);
        mmu.write(0x8011, 0xff);
        mmu.write(0x9801, 0x01);
        mmu.write(SCROLL_X_REGISTER, 4);

        let frame = render_line(&mut mmu, 0);
        assert_eq!(pixel(&frame, 3, 0), WHITE);
        assert_eq!(pixel(&frame, 4, 0), BLACK);
        assert_eq!(pixel(&frame, 11, 0), BLACK);
        assert_eq!(pixel(&frame, 12, 0), WHITE);
    }

    #[test]
    fn window_covers_background() {
        let mut mmu = mmu();
        mmu.write(0x8010, 0xff);
        mmu.write(0x8011, 0xff);
        // Window map at 0x9c00 filled with tile 1.
        for i in 0..32 {
            mmu.write(0x9c00 + i, 0x01);
        }
        mmu.write(LCD_CONTROL_REGISTER, 0x91 | 0x20 | 0x40);
        mmu.write(WINDOW_Y_REGISTER, 2);
        mmu.write(WINDOW_X_REGISTER, 7 + 80);

        let frame = render_line(&mut mmu, 1);
        assert_eq!(pixel(&frame, 100, 1), WHITE);

        let frame = render_line(&mut mmu, 2);
        assert_eq!(pixel(&frame, 79, 2), WHITE);
        assert_eq!(pixel(&frame, 80, 2), BLACK);
    }

    #[test]
    fn sprites_are_transparent_and_prioritised() {
        let mut mmu = mmu();
        mmu.write(LCD_CONTROL_REGISTER, 0x91 | 0x02);
        // Tile 2: colours 1,1,0,0,... on every row.
        for row in 0..8 {
            mmu.write(0x8020 + row * 2, 0b1100_0000);
        }
        // Tile 3: solid colour 3.
        for row in 0..16 {
            mmu.write(0x8030 + row, 0xff);
        }

        // Slot 0 at x=10 uses OBP1, slot 1 overlaps it at x=9.
        for (slot, data) in [[16, 18, 2, 0x10], [16, 17, 3, 0x00]].iter().enumerate() {
            for (i, byte) in data.iter().enumerate() {
                mmu.write(OAM_ADDRESS + slot as u16 * 4 + i as u16, *byte);
            }
        }

        let frame = render_line(&mut mmu, 0);
        // OBP1 maps colour 1 to light gray; slot 0 wins where both draw.
        assert_eq!(pixel(&frame, 10, 0), LIGHT);
        assert_eq!(pixel(&frame, 11, 0), LIGHT);
        // Transparent pixels of slot 0 show slot 1 underneath.
        assert_eq!(pixel(&frame, 12, 0), BLACK);
        assert_eq!(pixel(&frame, 9, 0), BLACK);
        assert_eq!(pixel(&frame, 17, 0), WHITE);
    }

    #[test]
    fn behind_background_sprite_shows_only_over_colour_zero() {
        let mut mmu = mmu();
        mmu.write(LCD_CONTROL_REGISTER, 0x91 | 0x02);
        // Background tile 1: left half colour 1.
        mmu.write(0x8010, 0xf0);
        mmu.write(0x9800, 0x01);
        // Sprite tile 2: solid colour 3, behind background.
        mmu.write(0x8020, 0xff);
        mmu.write(0x8021, 0xff);
        for (i, byte) in [16u8, 8, 2, 0x80].iter().enumerate() {
            mmu.write(OAM_ADDRESS + i as u16, *byte);
        }

        let frame = render_line(&mut mmu, 0);
        assert_eq!(pixel(&frame, 0, 0), LIGHT);
        assert_eq!(pixel(&frame, 4, 0), BLACK);
    }

    #[test]
    fn disabled_background_is_blank() {
        let mut mmu = mmu();
        mmu.write(0x8000, 0xff);
        mmu.write(0x8001, 0xff);
        mmu.write(LCD_CONTROL_REGISTER, 0x90);

        let frame = render_line(&mut mmu, 0);
        assert_eq!(pixel(&frame, 0, 0), WHITE);
    }
}
