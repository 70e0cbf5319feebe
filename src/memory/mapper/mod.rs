use crate::memory::{CARTRIDGE_TITLE, CARTRIDGE_TYPE, ROM_BANK_SIZE};
use dyn_clone::DynClone;
use log::{info, warn};

pub mod mbc1;
pub mod mbc2;
pub mod rom;

use mbc1::Mbc1;
use mbc2::Mbc2;
use rom::Rom;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BankController {
    None,
    Type1,
    Type2,
}

/// Cartridge hardware behind 0x0000-0x7fff and 0xa000-0xbfff. Writes below
/// 0x8000 are banking commands, never stores.
pub trait Mapper: DynClone {
    fn read(&self, addr: u16) -> u8;
    fn write(&mut self, addr: u16, data: u8);
    fn current_rom_bank(&self) -> u8;
    fn current_ram_bank(&self) -> u8;
    fn ram_enabled(&self) -> bool;
    fn controller(&self) -> BankController;

    fn name(&self) -> String {
        format!("{:?}", self.controller())
    }
}

dyn_clone::clone_trait_object!(Mapper);

/// Translates a ROM window address to an offset into cartridge storage.
#[inline]
pub fn rom_offset(addr: u16, rom_bank: u8) -> usize {
    match addr {
        0x0000..=0x3fff => addr as usize,
        _ => addr as usize + (rom_bank as usize - 1) * ROM_BANK_SIZE,
    }
}

/// Images smaller than the selected bank mirror, as on real cartridges.
#[inline]
pub fn read_rom(rom: &[u8], offset: usize) -> u8 {
    if rom.is_empty() {
        0xff
    } else {
        rom[offset % rom.len()]
    }
}

pub fn title(rom: &[u8]) -> String {
    rom.get(CARTRIDGE_TITLE)
        .unwrap_or_default()
        .iter()
        .take_while(|&&c| c != 0)
        .map(|&c| if c.is_ascii_graphic() || c == b' ' { c as char } else { '?' })
        .collect()
}

pub fn from_image(rom: Vec<u8>) -> Box<dyn Mapper> {
    let cartridge_type = rom.get(CARTRIDGE_TYPE).copied().unwrap_or(0);
    info!("Cartridge \"{}\" of type {:#04x} ({} bytes)", title(&rom), cartridge_type, rom.len());

    match cartridge_type {
        0x00 => Box::new(Rom::new(rom)),
        0x01..=0x03 => Box::new(Mbc1::new(rom)),
        0x05..=0x06 => Box::new(Mbc2::new(rom)),
        _ if rom.len() > 2 * ROM_BANK_SIZE => {
            warn!("Unsupported cartridge type {:#04x}, falling back to MBC1", cartridge_type);
            Box::new(Mbc1::new(rom))
        }
        _ => {
            warn!("Unsupported cartridge type {:#04x}, mapping as plain ROM", cartridge_type);
            Box::new(Rom::new(rom))
        }
    }
}
