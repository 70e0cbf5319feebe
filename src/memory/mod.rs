pub mod mapper;
pub mod mmu;
pub mod registers;

pub const BOOTROM_SIZE: usize = 0x100;

pub const ROM_BANK_SIZE: usize = 0x4000;
pub const RAM_BANK_SIZE: usize = 0x2000;

pub const EXTERNAL_RAM_START: u16 = 0xa000;
pub const EXTERNAL_RAM_END: u16 = 0xbfff;
pub const WORK_RAM_START: u16 = 0xc000;
pub const ECHO_RAM_START: u16 = 0xe000;
pub const ECHO_RAM_END: u16 = 0xfdff;
pub const OAM_START: u16 = 0xfe00;
pub const OAM_SIZE: u16 = 0xa0;
pub const UNUSABLE_START: u16 = 0xfea0;
pub const UNUSABLE_END: u16 = 0xfeff;

pub const JOYPAD_REGISTER: u16 = 0xff00;
pub const DIV_REGISTER: u16 = 0xff04;
pub const TIMA_REGISTER: u16 = 0xff05;
pub const TMA_REGISTER: u16 = 0xff06;
pub const TAC_REGISTER: u16 = 0xff07;
pub const INTERRUPT_FLAGS_REGISTER: u16 = 0xff0f;
pub const OAM_DMA_REGISTER: u16 = 0xff46;
pub const BOOTROM_MAPPER_REGISTER: u16 = 0xff50;
pub const INTERRUPT_ENABLE_REGISTER: u16 = 0xffff;

pub const CARTRIDGE_TITLE: std::ops::RangeInclusive<usize> = 0x0134..=0x0143;
pub const CARTRIDGE_TYPE: usize = 0x0147;
