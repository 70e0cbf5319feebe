use crate::lr35902::sm83::{Instruction, Operand};
use snafu::prelude::*;
use std::path::PathBuf;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum PocketError {
    #[snafu(display("Illegal opcode ({:02x}) at address: ${:04x}", opcode, address))]
    IllegalOpcode { opcode: u8, address: u16 },
    #[snafu(display("Illegal prefixed opcode (cb {:02x}) at address: ${:04x}", opcode, address))]
    IllegalPrefixedOpcode { opcode: u8, address: u16 },
    #[snafu(display("Invalid instruction handler implementation: {}", instruction))]
    InvalidHandler { instruction: Instruction },
    #[snafu(display("Unresolved target: {}", target))]
    UnresolvedTarget { target: Operand },
    #[snafu(display("Failed to load image {}", path.display()))]
    ImageLoad { path: PathBuf, source: std::io::Error },
    #[snafu(display("Failed to write frame dump {}", path.display()))]
    FrameDump { path: PathBuf, source: std::io::Error },
}
