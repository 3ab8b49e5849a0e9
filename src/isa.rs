//! # Instruction Set Table
//!
//! This module contains the opcode metadata tables that serve as the single
//! source of truth for all instruction information shared by the assembler,
//! the disassembler, and the CPU engine.
//!
//! The machine has exactly 16 base opcodes (one per 4-bit value). Opcode 0xF
//! is the *extended* group: its operand nibble is not a value but a
//! sub-opcode selecting one of 7 operations (HLT, RST, OUT, NOT, PUSH, POP,
//! RET). The four control-transfer instructions (JMP, JZ, JC, CALL) are
//! *two-byte* instructions whose second byte is a raw ROM address; every
//! other instruction packs its operand into the low nibble of a single byte.
//!
//! Two mnemonic sets exist, English and Turkish. Which set an [`Isa`] value
//! *renders* is chosen at construction via [`MnemonicSet`]; lookups in the
//! parse direction accept mnemonics from either set so that source written
//! against one set assembles under any configuration.

/// Which mnemonic set the ISA renders when formatting instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MnemonicSet {
    /// English mnemonics (NOP, LDA, LDI, ...). The default.
    #[default]
    English,
    /// Turkish mnemonics (BOS, YUK, SAB, ...).
    Turkish,
}

/// Metadata for a single base opcode.
///
/// # Examples
///
/// ```
/// use nibble4::isa::OPCODE_TABLE;
///
/// // Look up JMP (opcode 0xB)
/// let jmp = &OPCODE_TABLE[0xB];
/// assert_eq!(jmp.mnemonic_en, "JMP");
/// assert_eq!(jmp.two_byte, true);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeInfo {
    /// The 4-bit opcode value (0x0-0xF).
    pub code: u8,

    /// English mnemonic.
    pub mnemonic_en: &'static str,

    /// Turkish mnemonic.
    pub mnemonic_tr: &'static str,

    /// Whether the instruction occupies two bytes (opcode byte followed by a
    /// raw operand byte). True only for the control-transfer group.
    pub two_byte: bool,
}

/// Metadata for one operation of the extended (opcode 0xF) group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtendedInfo {
    /// Sub-opcode value carried in the operand nibble (0x0-0x6).
    pub subcode: u8,

    /// English mnemonic.
    pub mnemonic_en: &'static str,

    /// Turkish mnemonic.
    pub mnemonic_tr: &'static str,
}

/// Complete 16-entry base opcode table indexed by opcode value.
///
/// The 0xF entry is a placeholder for the extended group; it is never
/// matched in the parse direction (extended operations are reached through
/// their own mnemonics in [`EXTENDED_TABLE`]).
pub const OPCODE_TABLE: [OpcodeInfo; 16] = [
    // 0x0
    OpcodeInfo { code: 0x0, mnemonic_en: "NOP", mnemonic_tr: "BOS", two_byte: false },
    // 0x1
    OpcodeInfo { code: 0x1, mnemonic_en: "LDA", mnemonic_tr: "YUK", two_byte: false },
    // 0x2
    OpcodeInfo { code: 0x2, mnemonic_en: "LDI", mnemonic_tr: "SAB", two_byte: false },
    // 0x3
    OpcodeInfo { code: 0x3, mnemonic_en: "STA", mnemonic_tr: "SAK", two_byte: false },
    // 0x4
    OpcodeInfo { code: 0x4, mnemonic_en: "ADD", mnemonic_tr: "TOP", two_byte: false },
    // 0x5
    OpcodeInfo { code: 0x5, mnemonic_en: "SUB", mnemonic_tr: "CIK", two_byte: false },
    // 0x6
    OpcodeInfo { code: 0x6, mnemonic_en: "AND", mnemonic_tr: "VE", two_byte: false },
    // 0x7
    OpcodeInfo { code: 0x7, mnemonic_en: "OR", mnemonic_tr: "VEY", two_byte: false },
    // 0x8
    OpcodeInfo { code: 0x8, mnemonic_en: "XOR", mnemonic_tr: "YAD", two_byte: false },
    // 0x9
    OpcodeInfo { code: 0x9, mnemonic_en: "LDAI", mnemonic_tr: "DOL", two_byte: false },
    // 0xA
    OpcodeInfo { code: 0xA, mnemonic_en: "STAI", mnemonic_tr: "SDK", two_byte: false },
    // 0xB
    OpcodeInfo { code: 0xB, mnemonic_en: "JMP", mnemonic_tr: "GIT", two_byte: true },
    // 0xC
    OpcodeInfo { code: 0xC, mnemonic_en: "JZ", mnemonic_tr: "SIF", two_byte: true },
    // 0xD
    OpcodeInfo { code: 0xD, mnemonic_en: "JC", mnemonic_tr: "ELD", two_byte: true },
    // 0xE
    OpcodeInfo { code: 0xE, mnemonic_en: "CALL", mnemonic_tr: "CAG", two_byte: true },
    // 0xF - extended group, operand nibble is a sub-opcode
    OpcodeInfo { code: 0xF, mnemonic_en: "EXT", mnemonic_tr: "EK", two_byte: false },
];

/// The 7 operations of the extended group, indexed by sub-opcode.
///
/// Sub-opcodes 0x7-0xF are unassigned; the CPU treats them as no-ops and the
/// disassembler renders them as `"???"`.
pub const EXTENDED_TABLE: [ExtendedInfo; 7] = [
    ExtendedInfo { subcode: 0x0, mnemonic_en: "HLT", mnemonic_tr: "DUR" },
    ExtendedInfo { subcode: 0x1, mnemonic_en: "RST", mnemonic_tr: "BAS" },
    ExtendedInfo { subcode: 0x2, mnemonic_en: "OUT", mnemonic_tr: "YAZ" },
    ExtendedInfo { subcode: 0x3, mnemonic_en: "NOT", mnemonic_tr: "DEG" },
    ExtendedInfo { subcode: 0x4, mnemonic_en: "PUSH", mnemonic_tr: "IT" },
    ExtendedInfo { subcode: 0x5, mnemonic_en: "POP", mnemonic_tr: "CEK" },
    ExtendedInfo { subcode: 0x6, mnemonic_en: "RET", mnemonic_tr: "DON" },
];

/// Placeholder mnemonic for unassigned extended sub-opcodes.
pub const UNKNOWN_MNEMONIC: &str = "???";

/// Resolved instruction-set lookups for one mnemonic-set configuration.
///
/// An `Isa` is cheap to construct and copy; it carries only the
/// [`MnemonicSet`] selector. The selector affects the *render* direction
/// ([`Isa::mnemonic`]); the parse direction ([`Isa::standard_opcode`],
/// [`Isa::extended_subcode`]) always accepts both mnemonic sets,
/// case-insensitively.
///
/// # Examples
///
/// ```
/// use nibble4::{Isa, MnemonicSet};
///
/// let isa = Isa::default(); // English
/// assert_eq!(isa.standard_opcode("lda"), Some(0x1));
/// assert_eq!(isa.standard_opcode("YUK"), Some(0x1)); // Turkish accepted too
/// assert_eq!(isa.extended_subcode("HLT"), Some(0x0));
/// assert_eq!(isa.standard_opcode("MOV"), None);
///
/// let tr = Isa::new(MnemonicSet::Turkish);
/// assert_eq!(tr.mnemonic(0x1, 0), "YUK");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Isa {
    set: MnemonicSet,
}

impl Isa {
    /// Creates an ISA view rendering the given mnemonic set.
    pub fn new(set: MnemonicSet) -> Self {
        Self { set }
    }

    /// Returns the configured mnemonic set.
    pub fn mnemonic_set(&self) -> MnemonicSet {
        self.set
    }

    /// Looks up a standard (non-extended) mnemonic, returning its 4-bit
    /// opcode. Matching is case-insensitive and spans both mnemonic sets.
    ///
    /// Returns `None` for extended mnemonics (HLT, RST, ...) and for
    /// anything else not in the table. A miss is surfaced by callers as an
    /// unknown-instruction error, never defaulted to NOP.
    pub fn standard_opcode(&self, mnemonic: &str) -> Option<u8> {
        let folded = mnemonic.to_ascii_uppercase();
        OPCODE_TABLE
            .iter()
            .take(0xF) // the 0xF row is reached only via extended mnemonics
            .find(|info| info.mnemonic_en == folded || info.mnemonic_tr == folded)
            .map(|info| info.code)
    }

    /// Looks up an extended mnemonic, returning its sub-opcode (the operand
    /// nibble to pair with opcode 0xF). Case-insensitive, both sets.
    pub fn extended_subcode(&self, mnemonic: &str) -> Option<u8> {
        let folded = mnemonic.to_ascii_uppercase();
        EXTENDED_TABLE
            .iter()
            .find(|info| info.mnemonic_en == folded || info.mnemonic_tr == folded)
            .map(|info| info.subcode)
    }

    /// Returns true if the opcode takes a full operand byte after the opcode
    /// byte (JMP, JZ, JC, CALL).
    pub fn is_two_byte(&self, opcode: u8) -> bool {
        OPCODE_TABLE[(opcode & 0xF) as usize].two_byte
    }

    /// Returns true if the mnemonic names a two-byte instruction.
    ///
    /// Unknown and extended mnemonics are one byte for sizing purposes;
    /// the assembler's first pass relies on this when it sizes lines it
    /// cannot yet reject.
    pub fn mnemonic_is_two_byte(&self, mnemonic: &str) -> bool {
        match self.standard_opcode(mnemonic) {
            Some(opcode) => self.is_two_byte(opcode),
            None => false,
        }
    }

    /// Returns the display mnemonic for a decoded `(opcode, operand)` pair
    /// in the configured mnemonic set.
    ///
    /// For opcode 0xF the operand nibble selects the extended operation;
    /// unassigned sub-opcodes render as `"???"`.
    pub fn mnemonic(&self, opcode: u8, operand: u8) -> &'static str {
        let opcode = opcode & 0xF;
        if opcode == 0xF {
            return match EXTENDED_TABLE.get((operand & 0xF) as usize) {
                Some(info) => self.select(info.mnemonic_en, info.mnemonic_tr),
                None => UNKNOWN_MNEMONIC,
            };
        }
        let info = &OPCODE_TABLE[opcode as usize];
        self.select(info.mnemonic_en, info.mnemonic_tr)
    }

    fn select(&self, en: &'static str, tr: &'static str) -> &'static str {
        match self.set {
            MnemonicSet::English => en,
            MnemonicSet::Turkish => tr,
        }
    }
}
