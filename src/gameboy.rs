use crate::error::PocketError;
use crate::joypad::Button;
use crate::lr35902::cpu::Cpu;
use crate::memory::mapper;
use crate::memory::mmu::Mmu;
use crate::memory::registers::LcdControl;
use crate::scheduler::Scheduler;
use crate::video::{LCD_CONTROL_REGISTER, SCANLINE_Y_REGISTER};
use log::info;

/// Dots in a full frame, VBlank included.
pub const CYCLES_PER_FRAME: usize = 70224;

/// The whole machine. Components only reach each other through the
/// references handed out by `step`.
#[derive(Clone)]
pub struct GameBoy {
    cpu: Cpu,
    mmu: Mmu,
    scheduler: Scheduler,
}

impl GameBoy {
    /// Without a boot image the machine starts in the state the boot ROM
    /// would have left behind.
    pub fn new(rom: Vec<u8>, bootrom: Option<Vec<u8>>) -> GameBoy {
        let cpu = if bootrom.is_some() { Cpu::new() } else { Cpu::post_boot() };
        let mmu = Mmu::new(bootrom, mapper::from_image(rom));
        info!("Cartridge mapper: {}", mmu.cartridge_name());

        GameBoy {
            cpu,
            mmu,
            scheduler: Scheduler::new(),
        }
    }

    /// Runs one CPU step and lets the timer and display catch up. Returns
    /// true when a frame was completed.
    pub fn step(&mut self) -> Result<bool, PocketError> {
        let cycles = self.cpu.step(&mut self.mmu)?;
        Ok(self.scheduler.advance(&mut self.mmu, cycles))
    }

    /// Steps until the display enters VBlank. With the LCD switched off no
    /// frame ever completes, so that case gives up after one frame's worth
    /// of cycles.
    pub fn run_frame(&mut self) -> Result<(), PocketError> {
        let deadline = self.scheduler.total_t_cycles() + CYCLES_PER_FRAME as u64;

        loop {
            if self.step()? {
                return Ok(());
            }

            if !self.lcd_enabled() && self.scheduler.total_t_cycles() >= deadline {
                return Ok(());
            }
        }
    }

    pub fn key_pressed(&mut self, button: Button) {
        self.mmu.key_pressed(button);
    }

    pub fn key_released(&mut self, button: Button) {
        self.mmu.key_released(button);
    }

    /// RGBA, 160x144, row-major.
    #[inline]
    pub fn frame(&self) -> &[u8] {
        self.scheduler.frame()
    }

    #[inline]
    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    #[inline]
    pub fn mmu(&self) -> &Mmu {
        &self.mmu
    }

    #[inline]
    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    #[inline]
    pub fn pc(&self) -> u16 {
        self.cpu.registers().pc
    }

    pub fn disassemble_at_pc(&self) -> String {
        self.cpu.disassemble(&self.mmu, self.pc())
    }

    fn lcd_enabled(&self) -> bool {
        LcdControl::from(self.mmu.io(LCD_CONTROL_REGISTER)).contains(LcdControl::LCD_DISPLAY)
    }
}

impl std::fmt::Display for GameBoy {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "{}", self.cpu)?;
        writeln!(
            f,
            "PPU: {:?}  LY: {}  ROM bank: {}  RAM bank: {} ({})  Boot ROM: {}",
            self.scheduler.ppu_state(),
            self.mmu.io(SCANLINE_Y_REGISTER),
            self.mmu.current_rom_bank(),
            self.mmu.current_ram_bank(),
            if self.mmu.cartridge_ram_enabled() { "enabled" } else { "disabled" },
            if self.mmu.is_bootrom_mapped() { "mapped" } else { "unmapped" }
        )?;
        writeln!(
            f,
            "IE: {:?}  IF: {:?}  Joypad: ${:02x}  Cycles: {}",
            self.mmu.interrupt_enable(),
            self.mmu.interrupt_flags(),
            self.mmu.joypad_state(),
            self.scheduler.total_t_cycles()
        )?;
        write!(f, "{}", self.disassemble_at_pc())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lr35902::registers::Registers;
    use crate::memory::registers::InterruptFlags;
    use crate::memory::{BOOTROM_SIZE, INTERRUPT_ENABLE_REGISTER};

    // jr -2 at the cartridge entry point
    fn spin_rom() -> Vec<u8> {
        let mut rom = vec![0u8; 0x8000];
        rom[0x100] = 0x18;
        rom[0x101] = 0xfe;
        rom
    }

    #[test]
    fn nop_from_reset_costs_one_m_cycle() {
        let mut gb = GameBoy::new(spin_rom(), Some(vec![0u8; BOOTROM_SIZE]));

        assert!(!gb.step().unwrap());
        assert_eq!(gb.pc(), 0x0001);
        assert_eq!(gb.scheduler().total_t_cycles(), 4);
        assert_eq!(gb.scheduler().total_m_cycles(), 1);

        let mut expected = Registers::default();
        expected.pc = 0x0001;
        assert_eq!(gb.cpu().registers(), &expected);
    }

    #[test]
    fn starts_in_post_boot_state_without_boot_image() {
        let gb = GameBoy::new(spin_rom(), None);

        assert_eq!(gb.pc(), 0x0100);
        assert_eq!(gb.cpu().registers().af(), 0x01b0);
        assert_eq!(gb.cpu().registers().sp, 0xfffe);
        assert!(!gb.mmu().is_bootrom_mapped());
        assert_eq!(gb.mmu().read(LCD_CONTROL_REGISTER), 0x91);
    }

    #[test]
    fn run_frame_stops_at_vblank() {
        let mut gb = GameBoy::new(spin_rom(), None);

        gb.run_frame().unwrap();
        assert_eq!(gb.scheduler().total_t_cycles(), 144 * 456);
        assert!(gb.mmu().interrupt_flags().contains(InterruptFlags::VBLANK));

        gb.run_frame().unwrap();
        assert_eq!(gb.scheduler().total_t_cycles(), 144 * 456 + CYCLES_PER_FRAME as u64);
        assert_eq!(gb.frame().len(), 160 * 144 * 4);
    }

    #[test]
    fn run_frame_returns_with_lcd_off() {
        let mut rom = spin_rom();
        // ld a, 0 ; ldh (0x40), a ; jr -2
        rom[0x100..0x106].copy_from_slice(&[0x3e, 0x00, 0xe0, 0x40, 0x18, 0xfe]);
        let mut gb = GameBoy::new(rom, None);

        gb.run_frame().unwrap();
        assert!(gb.scheduler().total_t_cycles() >= CYCLES_PER_FRAME as u64);
        assert_eq!(gb.pc(), 0x0104);
    }

    #[test]
    fn joypad_press_wakes_halt() {
        let mut rom = spin_rom();
        // ld a, 0x10 ; ldh (0x00), a ; halt ; nop
        rom[0x100..0x106].copy_from_slice(&[0x3e, 0x10, 0xe0, 0x00, 0x76, 0x00]);
        let mut gb = GameBoy::new(rom, None);
        gb.mmu.write(INTERRUPT_ENABLE_REGISTER, InterruptFlags::JOYPAD.bits());

        for _ in 0..3 {
            gb.step().unwrap();
        }
        assert!(gb.cpu().is_halted());

        gb.key_pressed(Button::Start);
        gb.step().unwrap();
        assert!(!gb.cpu().is_halted());
        assert_eq!(gb.pc(), 0x0106);
    }
}
