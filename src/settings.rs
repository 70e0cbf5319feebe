use crate::joypad::Button;
use clap::Parser;
use log::LevelFilter;
use std::num::ParseIntError;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "pocketboy", about = "Headless DMG emulator core")]
pub struct Settings {
    /// Cartridge image to run.
    #[arg(value_name = "ROM")]
    pub rom: PathBuf,

    /// 256-byte boot image. Without one the machine starts at $0100 in the
    /// post-boot state.
    #[arg(long, value_name = "PATH")]
    pub bootrom: Option<PathBuf>,

    /// Stop after this many frames.
    #[arg(long, value_name = "N")]
    pub frames: Option<u64>,

    /// Stop and dump the CPU state when PC reaches this address (hex).
    #[arg(long, value_name = "ADDR", value_parser = parse_address)]
    pub break_at: Option<u16>,

    /// Write the last completed frame to this path as a binary PPM.
    #[arg(long, value_name = "PATH")]
    pub dump: Option<PathBuf>,

    /// Buttons held down for the whole run, comma separated.
    #[arg(long, value_name = "BUTTON", value_enum, value_delimiter = ',')]
    pub hold: Vec<Button>,

    /// Release the held buttons after this many frames.
    #[arg(long, value_name = "N", requires = "hold")]
    pub hold_frames: Option<u64>,

    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub log_level: LevelFilter,

    /// Log every executed instruction. Implies trace level.
    #[arg(long, default_value_t = false)]
    pub trace: bool,
}

impl Settings {
    pub fn effective_log_level(&self) -> LevelFilter {
        if self.trace {
            LevelFilter::Trace
        } else {
            self.log_level
        }
    }
}

/// Accepts `0150`, `0x0150` and `$0150`.
pub fn parse_address(value: &str) -> Result<u16, ParseIntError> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .or_else(|| value.strip_prefix('$'))
        .unwrap_or(value);

    u16::from_str_radix(digits, 16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addresses_are_hex() {
        assert_eq!(parse_address("0150"), Ok(0x0150));
        assert_eq!(parse_address("0xC000"), Ok(0xc000));
        assert_eq!(parse_address("$ff80"), Ok(0xff80));
        assert!(parse_address("10000").is_err());
        assert!(parse_address("zz").is_err());
    }

    #[test]
    fn parses_command_line() {
        let settings = Settings::try_parse_from([
            "pocketboy",
            "game.gb",
            "--frames",
            "60",
            "--break-at",
            "0x0150",
            "--dump",
            "out.ppm",
            "--hold",
            "start,a",
        ])
        .unwrap();

        assert_eq!(settings.rom, PathBuf::from("game.gb"));
        assert_eq!(settings.frames, Some(60));
        assert_eq!(settings.break_at, Some(0x0150));
        assert_eq!(settings.dump, Some(PathBuf::from("out.ppm")));
        assert_eq!(settings.effective_log_level(), LevelFilter::Info);
        assert_eq!(settings.hold, vec![Button::Start, Button::A]);
        assert!(settings.bootrom.is_none());
    }

    #[test]
    fn trace_overrides_level() {
        let settings = Settings::try_parse_from(["pocketboy", "game.gb", "--log-level", "warn", "--trace"]).unwrap();
        assert_eq!(settings.effective_log_level(), LevelFilter::Trace);
    }
}
