use crate::memory::mapper::{read_rom, rom_offset, BankController, Mapper};
use crate::memory::EXTERNAL_RAM_START;
use log::debug;

// 512 half-bytes at 0xa000-0xa1ff, nothing above.
const RAM_SIZE: usize = 0x200;

#[derive(Clone)]
pub struct Mbc2 {
    rom: Vec<u8>,
    rom_bank: u8,
    ram: Vec<u8>,
    ram_enabled: bool,
}

impl Mbc2 {
    pub fn new(memory: Vec<u8>) -> Mbc2 {
        Mbc2 {
            rom: memory,
            rom_bank: 1,
            ram: vec![0; RAM_SIZE],
            ram_enabled: false,
        }
    }

    #[inline]
    fn ram_offset(&self, addr: u16) -> Option<usize> {
        match addr {
            0xa000..=0xa1ff if self.ram_enabled => Some((addr - EXTERNAL_RAM_START) as usize),
            _ => None,
        }
    }
}

impl Mapper for Mbc2 {
    #[inline]
    fn read(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x7fff => read_rom(&self.rom, rom_offset(addr, self.rom_bank)),
            _ => match self.ram_offset(addr) {
                Some(offset) => 0xf0 | self.ram[offset],
                None => 0xff,
            },
        }
    }

    #[inline]
    fn write(&mut self, addr: u16, data: u8) {
        match addr {
            0x0000..=0x1fff => {
                if addr & 0b0001_0000 != 0 {
                    return;
                }
                match data & 0x0f {
                    0x0a => self.ram_enabled = true,
                    0x00 => self.ram_enabled = false,
                    _ => {}
                }
            }
            0x2000..=0x3fff => {
                self.rom_bank = match data & 0x0f {
                    0 => 1,
                    bank => bank,
                };
                debug!("MBC2: Switched to ROM bank {}", self.rom_bank);
            }
            0x4000..=0x7fff => debug!("MBC2: Ignoring banking command {:02x} at {:04x}", data, addr),
            _ => {
                if let Some(offset) = self.ram_offset(addr) {
                    self.ram[offset] = data & 0x0f;
                }
            }
        }
    }

    #[inline]
    fn current_rom_bank(&self) -> u8 {
        self.rom_bank
    }

    #[inline]
    fn current_ram_bank(&self) -> u8 {
        0
    }

    #[inline]
    fn ram_enabled(&self) -> bool {
        self.ram_enabled
    }

    #[inline]
    fn controller(&self) -> BankController {
        BankController::Type2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::ROM_BANK_SIZE;

    fn banked_rom(banks: usize) -> Vec<u8> {
        (0..banks * ROM_BANK_SIZE).map(|i| (i / ROM_BANK_SIZE) as u8).collect()
    }

    #[test]
    fn rom_bank_uses_low_nibble() {
        let mut mbc = Mbc2::new(banked_rom(16));
        mbc.write(0x2000, 0xf7);
        assert_eq!(mbc.current_rom_bank(), 7);
        assert_eq!(mbc.read(0x4000), 7);

        mbc.write(0x2000, 0x10);
        assert_eq!(mbc.current_rom_bank(), 1);
    }

    #[test]
    fn ram_enable_ignored_with_address_bit_four() {
        let mut mbc = Mbc2::new(banked_rom(2));
        mbc.write(0x0010, 0x0a);
        assert!(!mbc.ram_enabled());

        mbc.write(0x0000, 0x0a);
        assert!(mbc.ram_enabled());
    }

    #[test]
    fn ram_holds_nibbles_below_a200() {
        let mut mbc = Mbc2::new(banked_rom(2));
        mbc.write(0x0000, 0x0a);
        mbc.write(0xa1ff, 0xab);
        assert_eq!(mbc.read(0xa1ff), 0xfb);

        mbc.write(0xa200, 0x05);
        assert_eq!(mbc.read(0xa200), 0xff);
    }

    #[test]
    fn ram_bank_never_changes() {
        let mut mbc = Mbc2::new(banked_rom(2));
        mbc.write(0x4000, 0x03);
        mbc.write(0x6000, 0x01);
        assert_eq!(mbc.current_ram_bank(), 0);
        assert_eq!(mbc.current_rom_bank(), 1);
    }
}
