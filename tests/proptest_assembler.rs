//! Property-based tests for the assembler.
//!
//! These tests verify assembler invariants like:
//! - Encoding identities for one-byte and two-byte instructions
//! - Label targets agreeing with equivalent numeric targets
//! - No panics on malformed input
//! - Mnemonic-level round-trip through the disassembler

use nibble4::isa::{EXTENDED_TABLE, OPCODE_TABLE};
use nibble4::{assemble, disassemble, Isa};
use proptest::prelude::*;

/// One random instruction line using English mnemonics.
fn instruction_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (0usize..15, 0u8..=255u8).prop_map(|(index, operand)| {
            format!("{} {}", OPCODE_TABLE[index].mnemonic_en, operand)
        }),
        (0usize..7).prop_map(|index| EXTENDED_TABLE[index].mnemonic_en.to_string()),
    ]
}

proptest! {
    /// Property: one-byte instructions always encode the operand's low
    /// nibble, whatever the written value.
    #[test]
    fn prop_ldi_encodes_low_nibble(value in 0u8..=255u8) {
        let exe = assemble(&format!("LDI {}", value), &Isa::default()).unwrap();
        prop_assert_eq!(exe.machine_code, vec![0x20 | (value & 0xF)]);
    }

    /// Property: two-byte instructions carry the operand byte unmasked.
    #[test]
    fn prop_jump_targets_unmasked(value in 0u8..=255u8) {
        let exe = assemble(&format!("JMP {}", value), &Isa::default()).unwrap();
        prop_assert_eq!(exe.machine_code, vec![0xB0, value]);
    }

    /// Property: a label target and the equivalent numeric target produce
    /// identical machine code.
    #[test]
    fn prop_label_and_numeric_targets_agree(nops in 0usize..100) {
        let isa = Isa::default();

        let mut labelled = String::from("JMP end\n");
        for _ in 0..nops {
            labelled.push_str("NOP\n");
        }
        labelled.push_str("end: HLT");

        let numeric = format!("JMP {}\n{}HLT", 2 + nops, "NOP\n".repeat(nops));

        let a = assemble(&labelled, &isa).unwrap();
        let b = assemble(&numeric, &isa).unwrap();
        prop_assert_eq!(a.machine_code, b.machine_code);
    }

    /// Property: the assembler never panics, whatever the input text.
    #[test]
    fn prop_assembler_never_panics(source in "\\PC*") {
        let _ = assemble(&source, &Isa::default());
    }

    /// Property: disassembling an assembled program recovers the original
    /// mnemonic sequence.
    #[test]
    fn prop_roundtrip_recovers_mnemonics(
        lines in proptest::collection::vec(instruction_strategy(), 1..30)
    ) {
        let isa = Isa::default();
        let source = lines.join("\n");
        let exe = assemble(&source, &isa).unwrap();

        let recovered: Vec<&str> = disassemble(&exe.machine_code, &isa)
            .iter()
            .map(|row| row.mnemonic)
            .collect();
        let original: Vec<&str> = lines
            .iter()
            .map(|line| line.split_whitespace().next().unwrap())
            .collect();
        prop_assert_eq!(recovered, original);
    }
}
