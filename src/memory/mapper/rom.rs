use crate::memory::mapper::{read_rom, rom_offset, BankController, Mapper};
use log::debug;

#[derive(Clone)]
pub struct Rom {
    memory: Vec<u8>,
}

impl Rom {
    pub fn new(memory: Vec<u8>) -> Rom {
        Rom { memory }
    }
}

impl Mapper for Rom {
    #[inline]
    fn read(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x7fff => read_rom(&self.memory, rom_offset(addr, 1)),
            _ => 0xff,
        }
    }

    #[inline]
    fn write(&mut self, addr: u16, data: u8) {
        // No controller: banking commands and external RAM go nowhere.
        if addr < 0x8000 {
            debug!("ROM: Ignoring banking command {:02x} at {:04x}", data, addr);
        }
    }

    #[inline]
    fn current_rom_bank(&self) -> u8 {
        1
    }

    #[inline]
    fn current_ram_bank(&self) -> u8 {
        0
    }

    #[inline]
    fn ram_enabled(&self) -> bool {
        false
    }

    #[inline]
    fn controller(&self) -> BankController {
        BankController::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_are_ignored() {
        let mut rom = Rom::new((0..0x8000).map(|i| (i >> 8) as u8).collect());
        rom.write(0x2000, 0x03);
        rom.write(0x4100, 0xaa);
        rom.write(0xa000, 0x12);

        assert_eq!(rom.read(0x4100), 0x41);
        assert_eq!(rom.current_rom_bank(), 1);
        assert_eq!(rom.read(0xa000), 0xff);
    }
}
