use crate::error::{FrameDumpSnafu, ImageLoadSnafu, PocketError};
use crate::gameboy::GameBoy;
use crate::lr35902::T_CYCLES_PER_SECOND;
use crate::settings::Settings;
use crate::video::{BYTES_PER_PIXEL, SCREEN_HEIGHT, SCREEN_WIDTH};
use clap::Parser;
use log::{error, info, LevelFilter};
use snafu::ResultExt;
use std::path::Path;

mod error;
mod gameboy;
mod joypad;
mod lr35902;
mod memory;
mod scheduler;
mod settings;
#[cfg(test)]
mod tests;
mod video;

fn main() {
    let settings = Settings::parse();

    if let Err(e) = setup_logger(settings.effective_log_level()) {
        eprintln!("Failed to install logger: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(&settings) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn setup_logger(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{}] [{}] {}", record.level(), record.target(), message))
        })
        .level(level)
        .chain(std::io::stdout())
        .apply()
}

fn run(settings: &Settings) -> Result<(), PocketError> {
    let rom = std::fs::read(&settings.rom).context(ImageLoadSnafu { path: &settings.rom })?;
    let bootrom = match &settings.bootrom {
        Some(path) => Some(std::fs::read(path).context(ImageLoadSnafu { path })?),
        None => None,
    };

    let mut gb = GameBoy::new(rom, bootrom);
    for button in &settings.hold {
        gb.key_pressed(*button);
    }
    let mut frames = 0u64;

    loop {
        if settings.break_at == Some(gb.pc()) {
            info!("Breakpoint hit after {} frames\n{}", frames, gb);
            break;
        }

        // Breakpoints need instruction granularity, otherwise run whole frames.
        let result = if settings.break_at.is_some() {
            gb.step()
        } else {
            gb.run_frame().map(|_| true)
        };

        let frame_completed = match result {
            Ok(frame_completed) => frame_completed,
            Err(e) => {
                error!("{}", gb);
                return Err(e);
            }
        };

        if frame_completed {
            frames += 1;
            if settings.hold_frames == Some(frames) {
                for button in &settings.hold {
                    gb.key_released(*button);
                }
            }
            if settings.frames.is_some_and(|limit| frames >= limit) {
                let seconds = gb.scheduler().total_t_cycles() as f64 / T_CYCLES_PER_SECOND as f64;
                info!("Stopped after {} frames ({:.2}s emulated)", frames, seconds);
                break;
            }
        }
    }

    if let Some(path) = &settings.dump {
        dump_frame(path, gb.frame())?;
        info!("Frame written to {}", path.display());
    }

    Ok(())
}

// Binary PPM (P6); the alpha channel is dropped.
fn dump_frame(path: &Path, frame: &[u8]) -> Result<(), PocketError> {
    let mut image = format!("P6\n{} {}\n255\n", SCREEN_WIDTH, SCREEN_HEIGHT).into_bytes();
    for pixel in frame.chunks_exact(BYTES_PER_PIXEL) {
        image.extend_from_slice(&pixel[..3]);
    }

    std::fs::write(path, image).context(FrameDumpSnafu { path })
}
