use crate::memory::mmu::Mmu;
use bitflags::bitflags;

type FDecode = fn(u8) -> Instruction;

pub const PREFIX_OPCODE: u8 = 0xcb;

#[derive(PartialEq, Debug, Clone, Copy)]
pub enum Register {
    A,
    B,
    C,
    D,
    E,
    H,
    L,
    F,
    AF,
    BC,
    DE,
    HL,
    SP,
    PC,
}

bitflags! {
    #[derive(PartialEq, Debug, Clone, Copy)]
    pub struct AddressingMode: u8 {
        const Direct    = 0b0001;
        const Indirect  = 0b0010;
        const Increment = 0b0100;
        const Decrement = 0b1000;
    }
}

#[derive(PartialEq, Debug, Clone, Copy)]
pub enum Condition {
    None,
    NZ,
    Z,
    NC,
    C,
}

/// Immediate operands carry no value: handlers fetch them from PC while
/// executing, so the descriptors stay static.
#[derive(PartialEq, Debug, Clone, Copy)]
pub enum Operand {
    /// Indirect means the high page, `(0xff00 + reg)`.
    Reg8(Register, AddressingMode),
    Reg16(Register, AddressingMode),
    /// Indirect means the high page, `(0xff00 + n)`.
    Imm8(AddressingMode),
    Imm16(AddressingMode),
    Conditional(Condition),
    DisplacedReg16(Register),
    Offset,
    Bit(u8),
    Vector(u16),
}

#[derive(PartialEq, Debug, Copy, Clone)]
pub enum Opcode {
    Nop,
    Ld,
    Ldh,
    Inc,
    Dec,
    Rlc,
    Rrc,
    Swap,
    Rr,
    Srl,
    Bit,
    Res,
    Set,
    Jp,
    Jr,
    Call,
    Ret,
    Rst,
    Push,
    Pop,
    Add,
    Adc,
    Sub,
    Sbc,
    And,
    Xor,
    Or,
    Cp,
    Reti,
    Halt,
    Stop,
    Di,
    Ei,
    Rl,
    Sla,
    Sra,
    Ccf,
    Scf,
    Cpl,
    Daa,
    Rra,
    Rla,
    Rrca,
    Rlca,
    Prefix,
}

/// Static description of one opcode: what it does, where its operands come
/// from, its encoded length and its cost in t-cycles (taken, not taken).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Instruction {
    pub opcode: Opcode,
    pub lhs: Option<Operand>,
    pub rhs: Option<Operand>,
    pub length: usize,
    pub cycles: (usize, Option<usize>),
}

impl Instruction {
    fn new(opcode: Opcode, lhs: Option<Operand>, rhs: Option<Operand>, length: usize, cycles: usize) -> Instruction {
        Instruction {
            opcode,
            lhs,
            rhs,
            length,
            cycles: (cycles, None),
        }
    }

    fn conditional(
        opcode: Opcode, lhs: Option<Operand>, rhs: Option<Operand>, length: usize, cycles: (usize, Option<usize>),
    ) -> Instruction {
        Instruction {
            opcode,
            lhs,
            rhs,
            length,
            cycles,
        }
    }

    fn implied(opcode: Opcode, cycles: usize) -> Instruction {
        Instruction::new(opcode, None, None, 1, cycles)
    }
}

macro_rules! define_decoder {
    ( $pattern:expr, $function:expr ) => {{
        ($pattern, $function as FDecode)
    }};
}

/// The two dispatch tables. Empty slots are illegal encodings.
#[derive(Clone)]
pub struct Sm83 {
    lut: [Option<Instruction>; 256],
    lut_prefixed: [Option<Instruction>; 256],
}

impl Sm83 {
    pub fn new() -> Sm83 {
        let mut decoders = Vec::new();
        let mut decoders_prefixed = Vec::new();

        Sm83::propagate_decoders(&mut decoders);
        Sm83::propagate_decoders_prefixed(&mut decoders_prefixed);

        Sm83 {
            lut: Sm83::expand(&decoders),
            lut_prefixed: Sm83::expand(&decoders_prefixed),
        }
    }

    #[inline]
    pub fn lookup(&self, opcode: u8) -> Option<&Instruction> {
        self.lut[opcode as usize].as_ref()
    }

    #[inline]
    pub fn lookup_prefixed(&self, opcode: u8) -> Option<&Instruction> {
        self.lut_prefixed[opcode as usize].as_ref()
    }

    /// Renders the instruction at `addr` with its raw bytes, without side
    /// effects on the machine.
    pub fn disassemble(&self, mmu: &Mmu, addr: u16) -> String {
        let opcode = mmu.read(addr);
        let instruction = if opcode == PREFIX_OPCODE {
            self.lookup_prefixed(mmu.read(addr.wrapping_add(1)))
        } else {
            self.lookup(opcode)
        };

        match instruction {
            Some(instruction) => {
                let bytes = (0..instruction.length as u16)
                    .map(|i| format!("{:02x}", mmu.read(addr.wrapping_add(i))))
                    .collect::<Vec<_>>()
                    .join(" ");
                format!("${:04x}: {:<8}  {}", addr, bytes, instruction)
            }
            None => format!("${:04x}: {:02x}        <illegal>", addr, opcode),
        }
    }

    // First matching pattern wins, so specific encodings are listed before
    // the generic ones that overlap them.
    fn expand(decoders: &[(&'static str, FDecode)]) -> [Option<Instruction>; 256] {
        let mut lut = [None; 256];
        for (byte, slot) in lut.iter_mut().enumerate() {
            let byte = byte as u8;
            if let Some((_, decoder_fn)) = decoders.iter().find(|(pattern, _)| Sm83::matches(pattern, byte)) {
                *slot = Some(decoder_fn(byte));
            }
        }
        lut
    }

    fn matches(pattern: &str, byte: u8) -> bool {
        pattern.len() == 8
            && pattern.chars().enumerate().all(|(i, c)| {
                let bit = (byte >> (7 - i)) & 1;
                match c {
                    'x' => true,
                    '0' => bit == 0,
                    '1' => bit == 1,
                    _ => false,
                }
            })
    }

    fn lookup_register(data: u8) -> Register {
        match data & 0b111 {
            0b000 => Register::B,
            0b001 => Register::C,
            0b010 => Register::D,
            0b011 => Register::E,
            0b100 => Register::H,
            0b101 => Register::L,
            0b110 => Register::HL,
            _ => Register::A,
        }
    }

    fn lookup_register_16(data: u8) -> Register {
        match data & 0b11 {
            0b00 => Register::BC,
            0b01 => Register::DE,
            0b10 => Register::HL,
            _ => Register::SP,
        }
    }

    // push/pop swap SP for AF
    fn lookup_register_16_stack(data: u8) -> Register {
        match data & 0b11 {
            0b00 => Register::BC,
            0b01 => Register::DE,
            0b10 => Register::HL,
            _ => Register::AF,
        }
    }

    fn lookup_condition_2bits(data: u8) -> Condition {
        match data & 0b11 {
            0b00 => Condition::NZ,
            0b01 => Condition::Z,
            0b10 => Condition::NC,
            _ => Condition::C,
        }
    }

    fn lookup_alu(data: u8) -> Opcode {
        match data & 0b111 {
            0b000 => Opcode::Add,
            0b001 => Opcode::Adc,
            0b010 => Opcode::Sub,
            0b011 => Opcode::Sbc,
            0b100 => Opcode::And,
            0b101 => Opcode::Xor,
            0b110 => Opcode::Or,
            _ => Opcode::Cp,
        }
    }

    fn lookup_shift(data: u8) -> Opcode {
        match data & 0b111 {
            0b000 => Opcode::Rlc,
            0b001 => Opcode::Rrc,
            0b010 => Opcode::Rl,
            0b011 => Opcode::Rr,
            0b100 => Opcode::Sla,
            0b101 => Opcode::Sra,
            0b110 => Opcode::Swap,
            _ => Opcode::Srl,
        }
    }

    // (BC), (DE), (HL+), (HL-)
    fn lookup_indirect_16(data: u8) -> Operand {
        match data & 0b11 {
            0b00 => Operand::Reg16(Register::BC, AddressingMode::Indirect),
            0b01 => Operand::Reg16(Register::DE, AddressingMode::Indirect),
            0b10 => Operand::Reg16(Register::HL, AddressingMode::Indirect | AddressingMode::Increment),
            _ => Operand::Reg16(Register::HL, AddressingMode::Indirect | AddressingMode::Decrement),
        }
    }

    fn decode_8bit_operand(value: u8, base_cycles: usize, hl_cycles: usize) -> (Operand, usize) {
        match Sm83::lookup_register(value) {
            Register::HL => (Operand::Reg16(Register::HL, AddressingMode::Indirect), hl_cycles),
            register => (Operand::Reg8(register, AddressingMode::Direct), base_cycles),
        }
    }

    fn propagate_decoders(lut: &mut Vec<(&'static str, FDecode)>) {
        // nop
        lut.push(define_decoder!("00000000", |_| Instruction::implied(Opcode::Nop, 4)));

        // ld (imm16), sp
        lut.push(define_decoder!("00001000", |_| {
            Instruction::new(
                Opcode::Ld,
                Some(Operand::Imm16(AddressingMode::Indirect)),
                Some(Operand::Reg16(Register::SP, AddressingMode::Direct)),
                3,
                20,
            )
        }));

        // stop imm8
        lut.push(define_decoder!("00010000", |_| {
            Instruction::new(Opcode::Stop, Some(Operand::Imm8(AddressingMode::Direct)), None, 2, 4)
        }));

        // jr imm8
        lut.push(define_decoder!("00011000", |_| {
            Instruction::new(
                Opcode::Jr,
                Some(Operand::Conditional(Condition::None)),
                Some(Operand::Offset),
                2,
                12,
            )
        }));

        // jr cond, imm8
        lut.push(define_decoder!("001xx000", |byte| {
            Instruction::conditional(
                Opcode::Jr,
                Some(Operand::Conditional(Sm83::lookup_condition_2bits(byte >> 3))),
                Some(Operand::Offset),
                2,
                (12, Some(8)),
            )
        }));

        // ld r16, imm16
        lut.push(define_decoder!("00xx0001", |byte| {
            Instruction::new(
                Opcode::Ld,
                Some(Operand::Reg16(Sm83::lookup_register_16(byte >> 4), AddressingMode::Direct)),
                Some(Operand::Imm16(AddressingMode::Direct)),
                3,
                12,
            )
        }));

        // ld (r16), a
        lut.push(define_decoder!("00xx0010", |byte| {
            Instruction::new(
                Opcode::Ld,
                Some(Sm83::lookup_indirect_16(byte >> 4)),
                Some(Operand::Reg8(Register::A, AddressingMode::Direct)),
                1,
                8,
            )
        }));

        // ld a, (r16)
        lut.push(define_decoder!("00xx1010", |byte| {
            Instruction::new(
                Opcode::Ld,
                Some(Operand::Reg8(Register::A, AddressingMode::Direct)),
                Some(Sm83::lookup_indirect_16(byte >> 4)),
                1,
                8,
            )
        }));

        // inc r16
        lut.push(define_decoder!("00xx0011", |byte| {
            Instruction::new(
                Opcode::Inc,
                Some(Operand::Reg16(Sm83::lookup_register_16(byte >> 4), AddressingMode::Direct)),
                None,
                1,
                8,
            )
        }));

        // dec r16
        lut.push(define_decoder!("00xx1011", |byte| {
            Instruction::new(
                Opcode::Dec,
                Some(Operand::Reg16(Sm83::lookup_register_16(byte >> 4), AddressingMode::Direct)),
                None,
                1,
                8,
            )
        }));

        // add hl, r16
        lut.push(define_decoder!("00xx1001", |byte| {
            Instruction::new(
                Opcode::Add,
                Some(Operand::Reg16(Register::HL, AddressingMode::Direct)),
                Some(Operand::Reg16(Sm83::lookup_register_16(byte >> 4), AddressingMode::Direct)),
                1,
                8,
            )
        }));

        // inc r8
        lut.push(define_decoder!("00xxx100", |byte| {
            let (operand, cycles) = Sm83::decode_8bit_operand(byte >> 3, 4, 12);
            Instruction::new(Opcode::Inc, Some(operand), None, 1, cycles)
        }));

        // dec r8
        lut.push(define_decoder!("00xxx101", |byte| {
            let (operand, cycles) = Sm83::decode_8bit_operand(byte >> 3, 4, 12);
            Instruction::new(Opcode::Dec, Some(operand), None, 1, cycles)
        }));

        // ld r8, imm8
        lut.push(define_decoder!("00xxx110", |byte| {
            let (operand, cycles) = Sm83::decode_8bit_operand(byte >> 3, 8, 12);
            Instruction::new(
                Opcode::Ld,
                Some(operand),
                Some(Operand::Imm8(AddressingMode::Direct)),
                2,
                cycles,
            )
        }));

        // accumulator rotates and flag ops
        lut.push(define_decoder!("00000111", |_| Instruction::implied(Opcode::Rlca, 4)));
        lut.push(define_decoder!("00001111", |_| Instruction::implied(Opcode::Rrca, 4)));
        lut.push(define_decoder!("00010111", |_| Instruction::implied(Opcode::Rla, 4)));
        lut.push(define_decoder!("00011111", |_| Instruction::implied(Opcode::Rra, 4)));
        lut.push(define_decoder!("00100111", |_| Instruction::implied(Opcode::Daa, 4)));
        lut.push(define_decoder!("00101111", |_| Instruction::implied(Opcode::Cpl, 4)));
        lut.push(define_decoder!("00110111", |_| Instruction::implied(Opcode::Scf, 4)));
        lut.push(define_decoder!("00111111", |_| Instruction::implied(Opcode::Ccf, 4)));

        // halt, which sits where ld (hl), (hl) would be
        lut.push(define_decoder!("01110110", |_| Instruction::implied(Opcode::Halt, 4)));

        // ld r8, r8
        lut.push(define_decoder!("01xxxxxx", |byte| {
            let (dst, dst_cycles) = Sm83::decode_8bit_operand(byte >> 3, 4, 8);
            let (src, src_cycles) = Sm83::decode_8bit_operand(byte, 4, 8);
            Instruction::new(Opcode::Ld, Some(dst), Some(src), 1, dst_cycles.max(src_cycles))
        }));

        // alu a, r8
        lut.push(define_decoder!("10xxxxxx", |byte| {
            let (operand, cycles) = Sm83::decode_8bit_operand(byte, 4, 8);
            Instruction::new(
                Sm83::lookup_alu(byte >> 3),
                Some(Operand::Reg8(Register::A, AddressingMode::Direct)),
                Some(operand),
                1,
                cycles,
            )
        }));

        // ret cond
        lut.push(define_decoder!("110xx000", |byte| {
            Instruction::conditional(
                Opcode::Ret,
                Some(Operand::Conditional(Sm83::lookup_condition_2bits(byte >> 3))),
                None,
                1,
                (20, Some(8)),
            )
        }));

        // ret
        lut.push(define_decoder!("11001001", |_| {
            Instruction::new(Opcode::Ret, Some(Operand::Conditional(Condition::None)), None, 1, 16)
        }));

        // reti
        lut.push(define_decoder!("11011001", |_| Instruction::implied(Opcode::Reti, 16)));

        // pop r16
        lut.push(define_decoder!("11xx0001", |byte| {
            Instruction::new(
                Opcode::Pop,
                Some(Operand::Reg16(Sm83::lookup_register_16_stack(byte >> 4), AddressingMode::Direct)),
                None,
                1,
                12,
            )
        }));

        // push r16
        lut.push(define_decoder!("11xx0101", |byte| {
            Instruction::new(
                Opcode::Push,
                Some(Operand::Reg16(Sm83::lookup_register_16_stack(byte >> 4), AddressingMode::Direct)),
                None,
                1,
                16,
            )
        }));

        // jp cond, imm16
        lut.push(define_decoder!("110xx010", |byte| {
            Instruction::conditional(
                Opcode::Jp,
                Some(Operand::Conditional(Sm83::lookup_condition_2bits(byte >> 3))),
                Some(Operand::Imm16(AddressingMode::Direct)),
                3,
                (16, Some(12)),
            )
        }));

        // jp imm16
        lut.push(define_decoder!("11000011", |_| {
            Instruction::new(
                Opcode::Jp,
                Some(Operand::Conditional(Condition::None)),
                Some(Operand::Imm16(AddressingMode::Direct)),
                3,
                16,
            )
        }));

        // jp hl
        lut.push(define_decoder!("11101001", |_| {
            Instruction::new(
                Opcode::Jp,
                Some(Operand::Conditional(Condition::None)),
                Some(Operand::Reg16(Register::HL, AddressingMode::Direct)),
                1,
                4,
            )
        }));

        // call cond, imm16
        lut.push(define_decoder!("110xx100", |byte| {
            Instruction::conditional(
                Opcode::Call,
                Some(Operand::Conditional(Sm83::lookup_condition_2bits(byte >> 3))),
                Some(Operand::Imm16(AddressingMode::Direct)),
                3,
                (24, Some(12)),
            )
        }));

        // call imm16
        lut.push(define_decoder!("11001101", |_| {
            Instruction::new(
                Opcode::Call,
                Some(Operand::Conditional(Condition::None)),
                Some(Operand::Imm16(AddressingMode::Direct)),
                3,
                24,
            )
        }));

        // prefix, cost comes from the extended table
        lut.push(define_decoder!("11001011", |_| Instruction::implied(Opcode::Prefix, 0)));

        // alu a, imm8
        lut.push(define_decoder!("11xxx110", |byte| {
            Instruction::new(
                Sm83::lookup_alu(byte >> 3),
                Some(Operand::Reg8(Register::A, AddressingMode::Direct)),
                Some(Operand::Imm8(AddressingMode::Direct)),
                2,
                8,
            )
        }));

        // rst vector
        lut.push(define_decoder!("11xxx111", |byte| {
            Instruction::new(Opcode::Rst, Some(Operand::Vector((byte & 0b0011_1000) as u16)), None, 1, 16)
        }));

        // ldh (imm8), a
        lut.push(define_decoder!("11100000", |_| {
            Instruction::new(
                Opcode::Ldh,
                Some(Operand::Imm8(AddressingMode::Indirect)),
                Some(Operand::Reg8(Register::A, AddressingMode::Direct)),
                2,
                12,
            )
        }));

        // ldh a, (imm8)
        lut.push(define_decoder!("11110000", |_| {
            Instruction::new(
                Opcode::Ldh,
                Some(Operand::Reg8(Register::A, AddressingMode::Direct)),
                Some(Operand::Imm8(AddressingMode::Indirect)),
                2,
                12,
            )
        }));

        // ld (c), a
        lut.push(define_decoder!("11100010", |_| {
            Instruction::new(
                Opcode::Ld,
                Some(Operand::Reg8(Register::C, AddressingMode::Indirect)),
                Some(Operand::Reg8(Register::A, AddressingMode::Direct)),
                1,
                8,
            )
        }));

        // ld a, (c)
        lut.push(define_decoder!("11110010", |_| {
            Instruction::new(
                Opcode::Ld,
                Some(Operand::Reg8(Register::A, AddressingMode::Direct)),
                Some(Operand::Reg8(Register::C, AddressingMode::Indirect)),
                1,
                8,
            )
        }));

        // add sp, imm8
        lut.push(define_decoder!("11101000", |_| {
            Instruction::new(
                Opcode::Add,
                Some(Operand::Reg16(Register::SP, AddressingMode::Direct)),
                Some(Operand::Offset),
                2,
                16,
            )
        }));

        // ld hl, sp+imm8
        lut.push(define_decoder!("11111000", |_| {
            Instruction::new(
                Opcode::Ld,
                Some(Operand::Reg16(Register::HL, AddressingMode::Direct)),
                Some(Operand::DisplacedReg16(Register::SP)),
                2,
                12,
            )
        }));

        // ld sp, hl
        lut.push(define_decoder!("11111001", |_| {
            Instruction::new(
                Opcode::Ld,
                Some(Operand::Reg16(Register::SP, AddressingMode::Direct)),
                Some(Operand::Reg16(Register::HL, AddressingMode::Direct)),
                1,
                8,
            )
        }));

        // ld (imm16), a
        lut.push(define_decoder!("11101010", |_| {
            Instruction::new(
                Opcode::Ld,
                Some(Operand::Imm16(AddressingMode::Indirect)),
                Some(Operand::Reg8(Register::A, AddressingMode::Direct)),
                3,
                16,
            )
        }));

        // ld a, (imm16)
        lut.push(define_decoder!("11111010", |_| {
            Instruction::new(
                Opcode::Ld,
                Some(Operand::Reg8(Register::A, AddressingMode::Direct)),
                Some(Operand::Imm16(AddressingMode::Indirect)),
                3,
                16,
            )
        }));

        // di / ei
        lut.push(define_decoder!("11110011", |_| Instruction::implied(Opcode::Di, 4)));
        lut.push(define_decoder!("11111011", |_| Instruction::implied(Opcode::Ei, 4)));
    }

    fn propagate_decoders_prefixed(lut: &mut Vec<(&'static str, FDecode)>) {
        // rlc, rrc, rl, rr, sla, sra, swap, srl
        lut.push(define_decoder!("00xxxxxx", |byte| {
            let (operand, cycles) = Sm83::decode_8bit_operand(byte, 8, 16);
            Instruction::new(Sm83::lookup_shift(byte >> 3), Some(operand), None, 2, cycles)
        }));

        // bit n, r8
        lut.push(define_decoder!("01xxxxxx", |byte| {
            let (operand, cycles) = Sm83::decode_8bit_operand(byte, 8, 12);
            Instruction::new(Opcode::Bit, Some(Operand::Bit((byte >> 3) & 0b111)), Some(operand), 2, cycles)
        }));

        // res n, r8
        lut.push(define_decoder!("10xxxxxx", |byte| {
            let (operand, cycles) = Sm83::decode_8bit_operand(byte, 8, 16);
            Instruction::new(Opcode::Res, Some(Operand::Bit((byte >> 3) & 0b111)), Some(operand), 2, cycles)
        }));

        // set n, r8
        lut.push(define_decoder!("11xxxxxx", |byte| {
            let (operand, cycles) = Sm83::decode_8bit_operand(byte, 8, 16);
            Instruction::new(Opcode::Set, Some(Operand::Bit((byte >> 3) & 0b111)), Some(operand), 2, cycles)
        }));
    }
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut output = format!("{:?}", self.opcode).to_lowercase();

        // Unconditional control flow prints no condition operand.
        let lhs = match self.lhs {
            Some(Operand::Conditional(Condition::None)) => None,
            lhs => lhs,
        };

        if let Some(destination) = lhs {
            output.push_str(&format!(" {}", destination));
        }

        if let Some(source) = &self.rhs {
            if lhs.is_some() {
                output.push_str(&format!(", {}", source));
            } else {
                output.push_str(&format!(" {}", source));
            }
        }

        write!(f, "{}", output)
    }
}

impl std::fmt::Display for Register {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let output = match self {
            Register::A => "a",
            Register::B => "b",
            Register::C => "c",
            Register::D => "d",
            Register::E => "e",
            Register::H => "h",
            Register::L => "l",
            Register::F => "f",
            Register::AF => "af",
            Register::BC => "bc",
            Register::DE => "de",
            Register::HL => "hl",
            Register::SP => "sp",
            Register::PC => "pc",
        };

        write!(f, "{}", output)
    }
}

impl std::fmt::Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let output = match self {
            Operand::Reg8(reg, mode) => {
                if mode.contains(AddressingMode::Indirect) {
                    format!("({})", reg)
                } else {
                    format!("{}", reg)
                }
            }
            Operand::Reg16(reg, mode) => {
                if mode.contains(AddressingMode::Indirect) {
                    if mode.contains(AddressingMode::Increment) {
                        format!("({}+)", reg)
                    } else if mode.contains(AddressingMode::Decrement) {
                        format!("({}-)", reg)
                    } else {
                        format!("({})", reg)
                    }
                } else {
                    format!("{}", reg)
                }
            }
            Operand::Imm8(mode) => {
                if mode.contains(AddressingMode::Indirect) {
                    String::from("(n8)")
                } else {
                    String::from("n8")
                }
            }
            Operand::Imm16(mode) => {
                if mode.contains(AddressingMode::Indirect) {
                    String::from("(n16)")
                } else {
                    String::from("n16")
                }
            }
            Operand::Conditional(cond) => format!("{}", cond),
            Operand::Offset => String::from("e8"),
            Operand::Bit(value) => format!("{}", value),
            Operand::DisplacedReg16(reg) => format!("{}+e8", reg),
            Operand::Vector(addr) => format!("${:02x}", addr),
        };

        write!(f, "{}", output)
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let output = match self {
            Condition::None => "",
            Condition::NZ => "nz",
            Condition::Z => "z",
            Condition::NC => "nc",
            Condition::C => "c",
        };

        write!(f, "{}", output)
    }
}
