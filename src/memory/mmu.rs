use crate::joypad::{Button, Joypad};
use crate::memory::mapper::Mapper;
use crate::memory::registers::InterruptFlags;
use crate::memory::{
    BOOTROM_MAPPER_REGISTER, BOOTROM_SIZE, DIV_REGISTER, ECHO_RAM_END, ECHO_RAM_START, INTERRUPT_ENABLE_REGISTER,
    INTERRUPT_FLAGS_REGISTER, JOYPAD_REGISTER, OAM_DMA_REGISTER, OAM_SIZE, OAM_START, UNUSABLE_END, UNUSABLE_START,
    WORK_RAM_START,
};
use crate::video::{
    BG_PALETTE_REGISTER, LCD_CONTROL_REGISTER, LCD_STATUS_REGISTER, OBJ0_PALETTE_REGISTER, OBJ1_PALETTE_REGISTER,
    SCANLINE_Y_REGISTER,
};
use log::debug;

const ECHO_OFFSET: u16 = ECHO_RAM_START - WORK_RAM_START;

/// Physical backing for a logical address.
#[derive(Debug, PartialEq)]
enum Region {
    BootRom(usize),
    Cartridge(u16),
    Internal(usize),
    Unusable,
}

#[derive(Clone)]
pub struct Mmu {
    cartridge: Box<dyn Mapper>,
    memory: Vec<u8>,
    bootrom: Vec<u8>,
    bootrom_mapped: bool,
    divider_reset: bool,
    joypad: Joypad,
}

impl Mmu {
    /// Without a boot image the machine starts with the I/O state the boot
    /// ROM would have left behind.
    pub fn new(bootrom: Option<Vec<u8>>, cartridge: Box<dyn Mapper>) -> Mmu {
        let mut mmu = Mmu {
            cartridge,
            memory: vec![0; 0x10000],
            bootrom: bootrom.clone().unwrap_or_default(),
            bootrom_mapped: bootrom.is_some(),
            divider_reset: false,
            joypad: Joypad::new(),
        };

        mmu.memory[JOYPAD_REGISTER as usize] = 0x30;
        if !mmu.bootrom_mapped {
            mmu.memory[LCD_CONTROL_REGISTER as usize] = 0x91;
            mmu.memory[BG_PALETTE_REGISTER as usize] = 0xfc;
            mmu.memory[OBJ0_PALETTE_REGISTER as usize] = 0xff;
            mmu.memory[OBJ1_PALETTE_REGISTER as usize] = 0xff;
            mmu.memory[BOOTROM_MAPPER_REGISTER as usize] = 0x01;
        }

        mmu
    }

    #[inline]
    fn translate(&self, addr: u16) -> Region {
        match addr {
            addr if (addr as usize) < BOOTROM_SIZE && self.bootrom_mapped => Region::BootRom(addr as usize),
            0x0000..=0x7fff | 0xa000..=0xbfff => Region::Cartridge(addr),
            ECHO_RAM_START..=ECHO_RAM_END => Region::Internal((addr - ECHO_OFFSET) as usize),
            UNUSABLE_START..=UNUSABLE_END => Region::Unusable,
            _ => Region::Internal(addr as usize),
        }
    }

    pub fn read(&self, addr: u16) -> u8 {
        match addr {
            JOYPAD_REGISTER => self.joypad.as_u8(self.memory[addr as usize]),
            INTERRUPT_FLAGS_REGISTER => self.memory[addr as usize] | 0b1110_0000,
            _ => match self.translate(addr) {
                Region::BootRom(offset) => self.bootrom.get(offset).copied().unwrap_or(0xff),
                Region::Cartridge(addr) => self.cartridge.read(addr),
                Region::Internal(offset) => self.memory[offset],
                Region::Unusable => 0xff,
            },
        }
    }

    pub fn write(&mut self, addr: u16, data: u8) {
        match addr {
            JOYPAD_REGISTER => self.memory[addr as usize] = data & 0b0011_0000,
            DIV_REGISTER => {
                self.memory[addr as usize] = 0;
                self.divider_reset = true;
            }
            SCANLINE_Y_REGISTER => self.memory[addr as usize] = 0,
            LCD_STATUS_REGISTER => {
                let status = self.memory[addr as usize];
                self.memory[addr as usize] = (data & 0b0111_1000) | (status & 0b0000_0111);
            }
            OAM_DMA_REGISTER => {
                self.memory[addr as usize] = data;
                self.oam_dma(data);
            }
            BOOTROM_MAPPER_REGISTER => {
                self.memory[addr as usize] = data;
                if data == 0x01 && self.bootrom_mapped {
                    self.bootrom_mapped = false;
                    debug!("Boot ROM unmapped");
                }
            }
            _ => match self.translate(addr) {
                Region::BootRom(_) | Region::Cartridge(_) => self.cartridge.write(addr, data),
                Region::Internal(offset) => self.memory[offset] = data,
                Region::Unusable => {}
            },
        }
    }

    pub fn read16(&self, addr: u16) -> u16 {
        u16::from_le_bytes([self.read(addr), self.read(addr.wrapping_add(1))])
    }

    pub fn write16(&mut self, addr: u16, data: u16) {
        let [lo, hi] = data.to_le_bytes();
        self.write(addr, lo);
        self.write(addr.wrapping_add(1), hi);
    }

    // Byte by byte through the normal path so banking and echo apply.
    fn oam_dma(&mut self, page: u8) {
        let source = (page as u16) << 8;
        for i in 0..OAM_SIZE {
            let data = self.read(source.wrapping_add(i));
            self.write(OAM_START + i, data);
        }
    }

    /// Hardware-side access to I/O registers, bypassing the write quirks
    /// software sees.
    #[inline]
    pub fn io(&self, addr: u16) -> u8 {
        self.memory[addr as usize]
    }

    #[inline]
    pub fn set_io(&mut self, addr: u16, data: u8) {
        self.memory[addr as usize] = data;
    }

    #[inline]
    pub fn interrupt_flags(&self) -> InterruptFlags {
        InterruptFlags::from(self.memory[INTERRUPT_FLAGS_REGISTER as usize])
    }

    #[inline]
    pub fn interrupt_enable(&self) -> InterruptFlags {
        InterruptFlags::from(self.memory[INTERRUPT_ENABLE_REGISTER as usize])
    }

    #[inline]
    pub fn set_interrupt_flags(&mut self, flags: InterruptFlags) {
        self.memory[INTERRUPT_FLAGS_REGISTER as usize] = flags.bits();
    }

    #[inline]
    pub fn request_interrupt(&mut self, source: InterruptFlags) {
        self.memory[INTERRUPT_FLAGS_REGISTER as usize] |= source.bits();
    }

    /// Requested and enabled sources.
    #[inline]
    pub fn pending_interrupts(&self) -> InterruptFlags {
        self.interrupt_flags() & self.interrupt_enable()
    }

    /// Reports (once) whether software wrote DIV since the last call.
    pub fn take_divider_reset(&mut self) -> bool {
        std::mem::take(&mut self.divider_reset)
    }

    pub fn key_pressed(&mut self, button: Button) {
        if self.joypad.press(button, self.memory[JOYPAD_REGISTER as usize]) {
            self.request_interrupt(InterruptFlags::JOYPAD);
        }
    }

    pub fn key_released(&mut self, button: Button) {
        self.joypad.release(button);
    }

    #[inline]
    pub fn joypad_state(&self) -> u8 {
        self.joypad.state()
    }

    #[inline]
    pub fn is_bootrom_mapped(&self) -> bool {
        self.bootrom_mapped
    }

    #[inline]
    pub fn current_rom_bank(&self) -> u8 {
        self.cartridge.current_rom_bank()
    }

    #[inline]
    pub fn current_ram_bank(&self) -> u8 {
        self.cartridge.current_ram_bank()
    }

    #[inline]
    pub fn cartridge_ram_enabled(&self) -> bool {
        self.cartridge.ram_enabled()
    }

    pub fn cartridge_name(&self) -> String {
        self.cartridge.name()
    }
}
