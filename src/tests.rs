//! Single-step instruction cases in the JSON shape used by SM83 test suites:
//! an initial and a final machine state, plus one `cycles` entry per
//! m-cycle of bus activity.

use crate::lr35902::cpu::*;
use crate::lr35902::sm83::*;
use crate::memory::mapper;
use crate::memory::mmu::*;
use serde_json::Value;

const CASES: &str = r#"[
    {
        "name": "00 nop",
        "initial": { "a": 0, "f": 0, "b": 0, "c": 0, "d": 0, "e": 0, "h": 0, "l": 0, "sp": 0, "pc": 49152,
                     "ram": [[49152, 0]] },
        "final":   { "a": 0, "f": 0, "b": 0, "c": 0, "d": 0, "e": 0, "h": 0, "l": 0, "sp": 0, "pc": 49153,
                     "ram": [[49152, 0]] },
        "cycles": [[49152, 0, "r-m"]]
    },
    {
        "name": "80 add a, b (half carry)",
        "initial": { "a": 1, "f": 0, "b": 15, "c": 0, "d": 0, "e": 0, "h": 0, "l": 0, "sp": 0, "pc": 49152,
                     "ram": [[49152, 128]] },
        "final":   { "a": 16, "f": 32, "b": 15, "c": 0, "d": 0, "e": 0, "h": 0, "l": 0, "sp": 0, "pc": 49153,
                     "ram": [[49152, 128]] },
        "cycles": [[49152, 128, "r-m"]]
    },
    {
        "name": "3c inc a (wrap keeps carry)",
        "initial": { "a": 255, "f": 16, "b": 0, "c": 0, "d": 0, "e": 0, "h": 0, "l": 0, "sp": 0, "pc": 49152,
                     "ram": [[49152, 60]] },
        "final":   { "a": 0, "f": 176, "b": 0, "c": 0, "d": 0, "e": 0, "h": 0, "l": 0, "sp": 0, "pc": 49153,
                     "ram": [[49152, 60]] },
        "cycles": [[49152, 60, "r-m"]]
    },
    {
        "name": "3d dec a (to zero)",
        "initial": { "a": 1, "f": 0, "b": 0, "c": 0, "d": 0, "e": 0, "h": 0, "l": 0, "sp": 0, "pc": 49152,
                     "ram": [[49152, 61]] },
        "final":   { "a": 0, "f": 192, "b": 0, "c": 0, "d": 0, "e": 0, "h": 0, "l": 0, "sp": 0, "pc": 49153,
                     "ram": [[49152, 61]] },
        "cycles": [[49152, 61, "r-m"]]
    },
    {
        "name": "05 dec b (half borrow)",
        "initial": { "a": 0, "f": 0, "b": 0, "c": 0, "d": 0, "e": 0, "h": 0, "l": 0, "sp": 0, "pc": 49152,
                     "ram": [[49152, 5]] },
        "final":   { "a": 0, "f": 96, "b": 255, "c": 0, "d": 0, "e": 0, "h": 0, "l": 0, "sp": 0, "pc": 49153,
                     "ram": [[49152, 5]] },
        "cycles": [[49152, 5, "r-m"]]
    },
    {
        "name": "ce adc a, n8 (carry in)",
        "initial": { "a": 255, "f": 16, "b": 0, "c": 0, "d": 0, "e": 0, "h": 0, "l": 0, "sp": 0, "pc": 49152,
                     "ram": [[49152, 206], [49153, 0]] },
        "final":   { "a": 0, "f": 176, "b": 0, "c": 0, "d": 0, "e": 0, "h": 0, "l": 0, "sp": 0, "pc": 49154,
                     "ram": [[49152, 206], [49153, 0]] },
        "cycles": [[49152, 206, "r-m"], [49153, 0, "r-m"]]
    },
    {
        "name": "de sbc a, n8 (carry in)",
        "initial": { "a": 0, "f": 16, "b": 0, "c": 0, "d": 0, "e": 0, "h": 0, "l": 0, "sp": 0, "pc": 49152,
                     "ram": [[49152, 222], [49153, 0]] },
        "final":   { "a": 255, "f": 112, "b": 0, "c": 0, "d": 0, "e": 0, "h": 0, "l": 0, "sp": 0, "pc": 49154,
                     "ram": [[49152, 222], [49153, 0]] },
        "cycles": [[49152, 222, "r-m"], [49153, 0, "r-m"]]
    },
    {
        "name": "c5 push bc",
        "initial": { "a": 0, "f": 0, "b": 18, "c": 52, "d": 0, "e": 0, "h": 0, "l": 0, "sp": 57342, "pc": 49152,
                     "ram": [[49152, 197]] },
        "final":   { "a": 0, "f": 0, "b": 18, "c": 52, "d": 0, "e": 0, "h": 0, "l": 0, "sp": 57340, "pc": 49153,
                     "ram": [[49152, 197], [57341, 18], [57340, 52]] },
        "cycles": [[49152, 197, "r-m"], null, [57341, 18, "-wm"], [57340, 52, "-wm"]]
    },
    {
        "name": "f1 pop af (low nibble masked)",
        "initial": { "a": 0, "f": 0, "b": 0, "c": 0, "d": 0, "e": 0, "h": 0, "l": 0, "sp": 57340, "pc": 49152,
                     "ram": [[49152, 241], [57340, 255], [57341, 18]] },
        "final":   { "a": 18, "f": 240, "b": 0, "c": 0, "d": 0, "e": 0, "h": 0, "l": 0, "sp": 57342, "pc": 49153,
                     "ram": [[49152, 241], [57340, 255], [57341, 18]] },
        "cycles": [[49152, 241, "r-m"], [57340, 255, "r-m"], [57341, 18, "r-m"]]
    },
    {
        "name": "e8 add sp, e8",
        "initial": { "a": 0, "f": 128, "b": 0, "c": 0, "d": 0, "e": 0, "h": 0, "l": 0, "sp": 255, "pc": 49152,
                     "ram": [[49152, 232], [49153, 1]] },
        "final":   { "a": 0, "f": 48, "b": 0, "c": 0, "d": 0, "e": 0, "h": 0, "l": 0, "sp": 256, "pc": 49154,
                     "ram": [[49152, 232], [49153, 1]] },
        "cycles": [[49152, 232, "r-m"], [49153, 1, "r-m"], null, null]
    },
    {
        "name": "27 daa",
        "initial": { "a": 60, "f": 0, "b": 0, "c": 0, "d": 0, "e": 0, "h": 0, "l": 0, "sp": 0, "pc": 49152,
                     "ram": [[49152, 39]] },
        "final":   { "a": 66, "f": 0, "b": 0, "c": 0, "d": 0, "e": 0, "h": 0, "l": 0, "sp": 0, "pc": 49153,
                     "ram": [[49152, 39]] },
        "cycles": [[49152, 39, "r-m"]]
    },
    {
        "name": "cb 7c bit 7, h",
        "initial": { "a": 0, "f": 16, "b": 0, "c": 0, "d": 0, "e": 0, "h": 0, "l": 0, "sp": 0, "pc": 49152,
                     "ram": [[49152, 203], [49153, 124]] },
        "final":   { "a": 0, "f": 176, "b": 0, "c": 0, "d": 0, "e": 0, "h": 0, "l": 0, "sp": 0, "pc": 49154,
                     "ram": [[49152, 203], [49153, 124]] },
        "cycles": [[49152, 203, "r-m"], [49153, 124, "r-m"]]
    },
    {
        "name": "cb 16 rl (hl)",
        "initial": { "a": 0, "f": 16, "b": 0, "c": 0, "d": 0, "e": 0, "h": 208, "l": 0, "sp": 0, "pc": 49152,
                     "ram": [[49152, 203], [49153, 22], [53248, 128]] },
        "final":   { "a": 0, "f": 16, "b": 0, "c": 0, "d": 0, "e": 0, "h": 208, "l": 0, "sp": 0, "pc": 49154,
                     "ram": [[49152, 203], [49153, 22], [53248, 1]] },
        "cycles": [[49152, 203, "r-m"], [49153, 22, "r-m"], [53248, 128, "r-m"], [53248, 1, "-wm"]]
    },
    {
        "name": "e0 ldh (n8), a",
        "initial": { "a": 90, "f": 0, "b": 0, "c": 0, "d": 0, "e": 0, "h": 0, "l": 0, "sp": 0, "pc": 49152,
                     "ram": [[49152, 224], [49153, 128]] },
        "final":   { "a": 90, "f": 0, "b": 0, "c": 0, "d": 0, "e": 0, "h": 0, "l": 0, "sp": 0, "pc": 49154,
                     "ram": [[49152, 224], [49153, 128], [65408, 90]] },
        "cycles": [[49152, 224, "r-m"], [49153, 128, "r-m"], [65408, 90, "-wm"]]
    },
    {
        "name": "18 jr e8 (backwards)",
        "initial": { "a": 0, "f": 0, "b": 0, "c": 0, "d": 0, "e": 0, "h": 0, "l": 0, "sp": 0, "pc": 49152,
                     "ram": [[49152, 24], [49153, 254]] },
        "final":   { "a": 0, "f": 0, "b": 0, "c": 0, "d": 0, "e": 0, "h": 0, "l": 0, "sp": 0, "pc": 49152,
                     "ram": [[49152, 24], [49153, 254]] },
        "cycles": [[49152, 24, "r-m"], [49153, 254, "r-m"], null]
    },
    {
        "name": "cd call n16",
        "initial": { "a": 0, "f": 0, "b": 0, "c": 0, "d": 0, "e": 0, "h": 0, "l": 0, "sp": 57342, "pc": 49152,
                     "ram": [[49152, 205], [49153, 52], [49154, 193]] },
        "final":   { "a": 0, "f": 0, "b": 0, "c": 0, "d": 0, "e": 0, "h": 0, "l": 0, "sp": 57340, "pc": 49460,
                     "ram": [[49152, 205], [49153, 52], [49154, 193], [57341, 192], [57340, 3]] },
        "cycles": [[49152, 205, "r-m"], [49153, 52, "r-m"], [49154, 193, "r-m"], null,
                   [57341, 192, "-wm"], [57340, 3, "-wm"]]
    },
    {
        "name": "c0 ret nz (not taken)",
        "initial": { "a": 0, "f": 128, "b": 0, "c": 0, "d": 0, "e": 0, "h": 0, "l": 0, "sp": 57340, "pc": 49152,
                     "ram": [[49152, 192]] },
        "final":   { "a": 0, "f": 128, "b": 0, "c": 0, "d": 0, "e": 0, "h": 0, "l": 0, "sp": 57340, "pc": 49153,
                     "ram": [[49152, 192]] },
        "cycles": [[49152, 192, "r-m"], null]
    }
]"#;

fn field(state: &serde_json::Map<String, Value>, name: &str) -> u64 {
    state.get(name).and_then(Value::as_u64).unwrap()
}

fn ram(state: &serde_json::Map<String, Value>) -> Vec<(u16, u8)> {
    state
        .get("ram")
        .and_then(Value::as_array)
        .unwrap()
        .iter()
        .map(|entry| {
            let entry = entry.as_array().unwrap();
            (entry[0].as_u64().unwrap() as u16, entry[1].as_u64().unwrap() as u8)
        })
        .collect()
}

#[test]
fn test_cpu() {
    let tests: Value = serde_json::from_str(CASES).unwrap();

    for test in tests.as_array().unwrap() {
        let mut mmu = Mmu::new(None, mapper::from_image(vec![0u8; 0x8000]));
        let mut cpu = Cpu::new();

        let test = test.as_object().unwrap();
        let name = test.get("name").unwrap().as_str().unwrap();
        let initial = test.get("initial").unwrap().as_object().unwrap();
        let final_state = test.get("final").unwrap().as_object().unwrap();
        let m_cycles = test.get("cycles").unwrap().as_array().unwrap().len();

        for (register, key) in [
            (Register::A, "a"),
            (Register::F, "f"),
            (Register::B, "b"),
            (Register::C, "c"),
            (Register::D, "d"),
            (Register::E, "e"),
            (Register::H, "h"),
            (Register::L, "l"),
        ] {
            cpu.write_register(&register, field(initial, key) as u8);
        }
        cpu.write_register16(&Register::SP, field(initial, "sp") as u16);
        cpu.write_register16(&Register::PC, field(initial, "pc") as u16);

        for (addr, value) in ram(initial) {
            mmu.write(addr, value);
        }

        let cycles = cpu.step(&mut mmu).unwrap_or_else(|e| panic!("{} failed: {}", name, e));
        assert_eq!(cycles, m_cycles * 4, "Cycle count mismatch for {}", name);

        for (register, key) in [
            (Register::A, "a"),
            (Register::F, "f"),
            (Register::B, "b"),
            (Register::C, "c"),
            (Register::D, "d"),
            (Register::E, "e"),
            (Register::H, "h"),
            (Register::L, "l"),
        ] {
            assert_eq!(
                cpu.read_register(&register),
                field(final_state, key) as u8,
                "Comparison with register {} failed for {}",
                register,
                name
            );
        }
        assert_eq!(
            cpu.read_register16(&Register::SP),
            field(final_state, "sp") as u16,
            "Comparison with register SP failed for {}",
            name
        );
        assert_eq!(
            cpu.read_register16(&Register::PC),
            field(final_state, "pc") as u16,
            "Comparison with register PC failed for {}",
            name
        );

        for (addr, value) in ram(final_state) {
            assert_eq!(mmu.read(addr), value, "Comparison with RAM failed for {} at ${:04x}", name, addr);
        }
    }
}
