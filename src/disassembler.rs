//! # Disassembler
//!
//! Converts binary machine code back into mnemonic rows for debugger
//! display, consulting the same ISA classification the assembler uses:
//! control-transfer opcodes consume a second byte as their raw target,
//! everything else decodes from a single byte.

use crate::isa::Isa;

/// A single decoded instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedInstruction {
    /// ROM address the instruction starts at.
    pub address: u8,

    /// The 4-bit opcode value.
    pub opcode: u8,

    /// The operand: the second byte for two-byte instructions, otherwise
    /// the low nibble of the instruction byte (for the extended group this
    /// is the sub-opcode).
    pub operand: u8,

    /// Display mnemonic in the ISA's configured mnemonic set. Unassigned
    /// extended sub-opcodes decode as `"???"`.
    pub mnemonic: &'static str,

    /// Instruction size in bytes (1 or 2).
    pub size_bytes: u8,
}

/// Disassembles a byte stream loaded at ROM address 0.
///
/// A trailing two-byte instruction cut off by the end of the stream
/// decodes with operand 0, mirroring the zero-filled ROM it would execute
/// from.
///
/// # Examples
///
/// ```
/// use nibble4::{disassemble, Isa};
///
/// let rows = disassemble(&[0x25, 0xB0, 0x07, 0xF0], &Isa::default());
/// let text: Vec<&str> = rows.iter().map(|r| r.mnemonic).collect();
/// assert_eq!(text, vec!["LDI", "JMP", "HLT"]);
/// assert_eq!(rows[1].operand, 0x07);
/// assert_eq!(rows[2].address, 3);
/// ```
pub fn disassemble(bytes: &[u8], isa: &Isa) -> Vec<DecodedInstruction> {
    let mut instructions = Vec::new();
    let mut pc = 0usize;

    while pc < bytes.len() {
        let byte = bytes[pc];
        let opcode = byte >> 4;
        let nibble = byte & 0xF;

        let (operand, size_bytes) = if isa.is_two_byte(opcode) {
            (bytes.get(pc + 1).copied().unwrap_or(0), 2)
        } else {
            (nibble, 1)
        };

        instructions.push(DecodedInstruction {
            address: pc as u8,
            opcode,
            operand,
            mnemonic: isa.mnemonic(opcode, nibble),
            size_bytes,
        });

        pc += size_bytes as usize;
    }

    instructions
}

/// Renders one instruction as reassemblable source text.
///
/// Extended operations print as the bare mnemonic; everything else prints
/// `MNEMONIC operand`.
pub fn format_instruction(instruction: &DecodedInstruction) -> String {
    if instruction.opcode == 0xF {
        instruction.mnemonic.to_string()
    } else {
        format!("{} {}", instruction.mnemonic, instruction.operand)
    }
}

/// Renders a full listing, one `address: instruction` row per line.
pub fn format_listing(instructions: &[DecodedInstruction]) -> String {
    instructions
        .iter()
        .map(|ins| format!("{:02X}: {}", ins.address, format_instruction(ins)))
        .collect::<Vec<_>>()
        .join("\n")
}
