use crate::memory::mapper::{read_rom, rom_offset, BankController, Mapper};
use crate::memory::{EXTERNAL_RAM_END, EXTERNAL_RAM_START, RAM_BANK_SIZE};
use log::debug;

const RAM_ENABLE_RANGE: std::ops::RangeInclusive<u16> = 0x0000..=0x1fff;
const ROM_BANK_RANGE: std::ops::RangeInclusive<u16> = 0x2000..=0x3fff;
const SECONDARY_BANK_REGISTER: std::ops::RangeInclusive<u16> = 0x4000..=0x5fff;
const BANKING_MODE_REGISTER: std::ops::RangeInclusive<u16> = 0x6000..=0x7fff;
const ROM_RANGE: std::ops::RangeInclusive<u16> = 0x0000..=0x7fff;
const EXTERNAL_RAM_RANGE: std::ops::RangeInclusive<u16> = EXTERNAL_RAM_START..=EXTERNAL_RAM_END;

#[derive(Clone)]
pub struct Mbc1 {
    rom: Vec<u8>,
    rom_bank: u8,
    ram: Vec<u8>,
    ram_bank: u8,
    ram_enabled: bool,
    rom_banking: bool,
}

impl Mbc1 {
    pub fn new(memory: Vec<u8>) -> Mbc1 {
        Mbc1 {
            rom: memory,
            rom_bank: 1,
            ram: vec![0; 4 * RAM_BANK_SIZE],
            ram_bank: 0,
            ram_enabled: false,
            rom_banking: true,
        }
    }

    #[inline]
    fn ram_offset(&self, addr: u16) -> usize {
        (addr - EXTERNAL_RAM_START) as usize + self.ram_bank as usize * RAM_BANK_SIZE
    }
}

impl Mapper for Mbc1 {
    #[inline]
    fn read(&self, addr: u16) -> u8 {
        match addr {
            addr if ROM_RANGE.contains(&addr) => read_rom(&self.rom, rom_offset(addr, self.rom_bank)),
            addr if EXTERNAL_RAM_RANGE.contains(&addr) && self.ram_enabled => self.ram[self.ram_offset(addr)],
            _ => 0xff,
        }
    }

    #[inline]
    fn write(&mut self, addr: u16, data: u8) {
        match addr {
            addr if RAM_ENABLE_RANGE.contains(&addr) => match data & 0x0f {
                0x0a => self.ram_enabled = true,
                0x00 => self.ram_enabled = false,
                _ => {}
            },
            addr if ROM_BANK_RANGE.contains(&addr) => {
                // Only the low 5 bits are wired; bank 0 cannot be selected here.
                let low = match data & 0b0001_1111 {
                    0 => 1,
                    low => low,
                };
                self.rom_bank = (self.rom_bank & 0b0110_0000) | low;
                debug!("MBC1: Switched to ROM bank {}", self.rom_bank);
            }
            addr if SECONDARY_BANK_REGISTER.contains(&addr) && self.rom_banking => {
                self.rom_bank = (self.rom_bank & 0b0001_1111) | ((data & 0b11) << 5);
                debug!("MBC1: Switched to ROM bank {}", self.rom_bank);
            }
            addr if SECONDARY_BANK_REGISTER.contains(&addr) => {
                self.ram_bank = data & 0b11;
                debug!("MBC1: Switched to RAM bank {}", self.ram_bank);
            }
            addr if BANKING_MODE_REGISTER.contains(&addr) => {
                self.rom_banking = data & 0b1 == 0;
                if !self.rom_banking {
                    self.ram_bank = 0;
                }
                debug!("MBC1: Switched to ROM banking mode: {}", self.rom_banking);
            }
            addr if EXTERNAL_RAM_RANGE.contains(&addr) => {
                if self.ram_enabled {
                    let offset = self.ram_offset(addr);
                    self.ram[offset] = data;
                }
            }
            _ => {}
        }
    }

    #[inline]
    fn current_rom_bank(&self) -> u8 {
        self.rom_bank
    }

    #[inline]
    fn current_ram_bank(&self) -> u8 {
        self.ram_bank
    }

    #[inline]
    fn ram_enabled(&self) -> bool {
        self.ram_enabled
    }

    #[inline]
    fn controller(&self) -> BankController {
        BankController::Type1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::ROM_BANK_SIZE;

    // Every byte of a bank holds its bank number.
    fn banked_rom(banks: usize) -> Vec<u8> {
        (0..banks * ROM_BANK_SIZE).map(|i| (i / ROM_BANK_SIZE) as u8).collect()
    }

    #[test]
    fn rom_bank_zero_is_coerced_to_one() {
        let mut mbc = Mbc1::new(banked_rom(4));
        mbc.write(0x2000, 0x00);
        assert_eq!(mbc.current_rom_bank(), 1);
        assert_eq!(mbc.read(0x4000), 1);
    }

    #[test]
    fn switchable_window_follows_bank() {
        let mut mbc = Mbc1::new(banked_rom(8));
        mbc.write(0x2100, 0x03);
        assert_eq!(mbc.read(0x4000), 3);
        assert_eq!(mbc.read(0x7fff), 3);
        assert_eq!(mbc.read(0x0000), 0);

        // Upper bits of the write are discarded.
        mbc.write(0x3fff, 0xe5);
        assert_eq!(mbc.current_rom_bank(), 5);
    }

    #[test]
    fn secondary_register_sets_upper_rom_bits() {
        let mut mbc = Mbc1::new(banked_rom(128));
        mbc.write(0x2000, 0x02);
        mbc.write(0x4000, 0x01);
        assert_eq!(mbc.current_rom_bank(), 0x22);
        assert_eq!(mbc.read(0x4000), 0x22);
    }

    #[test]
    fn ram_is_gated_by_enable_latch() {
        let mut mbc = Mbc1::new(banked_rom(2));
        mbc.write(0xa000, 0x42);
        assert_eq!(mbc.read(0xa000), 0xff);

        mbc.write(0x0000, 0x0a);
        mbc.write(0xa000, 0x42);
        assert_eq!(mbc.read(0xa000), 0x42);

        // Neither 0x0a nor 0x00 in the low nibble: latch unchanged.
        mbc.write(0x1000, 0x05);
        assert!(mbc.ram_enabled());

        mbc.write(0x1000, 0xf0);
        assert!(!mbc.ram_enabled());
        assert_eq!(mbc.read(0xa000), 0xff);
    }

    #[test]
    fn ram_banking_mode_selects_ram_bank() {
        let mut mbc = Mbc1::new(banked_rom(2));
        mbc.write(0x0000, 0x0a);
        mbc.write(0x6000, 0x01);
        assert_eq!(mbc.current_ram_bank(), 0);

        mbc.write(0x4000, 0x02);
        assert_eq!(mbc.current_ram_bank(), 2);
        mbc.write(0xa010, 0x77);

        mbc.write(0x4000, 0x00);
        assert_eq!(mbc.read(0xa010), 0x00);
        mbc.write(0x4000, 0x02);
        assert_eq!(mbc.read(0xa010), 0x77);
    }

    #[test]
    fn entering_ram_banking_resets_ram_bank() {
        let mut mbc = Mbc1::new(banked_rom(2));
        mbc.write(0x6000, 0x01);
        mbc.write(0x4000, 0x03);
        assert_eq!(mbc.current_ram_bank(), 3);

        mbc.write(0x6000, 0x00);
        mbc.write(0x6000, 0x01);
        assert_eq!(mbc.current_ram_bank(), 0);
    }
}
