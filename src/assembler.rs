//! # Two-Pass Assembler
//!
//! Converts assembly source text into the machine's binary encoding plus an
//! initial RAM image.
//!
//! ## Source format
//!
//! - `;` starts a comment running to end of line.
//! - Blank and whitespace-only lines are ignored.
//! - `.data` and `.code` marker lines (case-sensitive) toggle between the
//!   data and code sections; lines before any marker are code.
//! - Data lines: `[label:] int int ...` - decimal values stored into
//!   consecutive RAM cells from a running offset shared across the whole
//!   data region, each masked to a nibble. A label binds to the offset at
//!   the point it appears, before that line's values are consumed.
//! - Code lines: `[label:] MNEMONIC [operand]` - the operand is a decimal
//!   integer, an optionally `[...]`-bracketed integer, or a label name.
//!   Forward references work because all label addresses are assigned
//!   before any code is emitted.
//!
//! ## Processing model
//!
//! Three strictly ordered phases over the source, never interleaved:
//!
//! 1. **Preprocessing** strips comments, drops blanks, consumes the data
//!    section, and collects code lines tagged with their 0-based source
//!    line index for error reporting.
//! 2. **Pass 1** walks the code lines with a virtual address counter,
//!    binding labels. Sizing consults the ISA table: control-transfer
//!    instructions occupy two bytes, everything else one. Pass 1 never
//!    reports errors; a mnemonic it cannot classify is sized as one byte
//!    and rejected later, so label addresses stay deterministic even in
//!    sources that will ultimately fail.
//! 3. **Pass 2** re-walks the same lines and emits bytes, resolving
//!    operands against the symbol table. The first error aborts the whole
//!    assembly with zero output.
//!
//! ## Encoding
//!
//! Two-byte instructions emit `opcode << 4` followed by the raw operand
//! byte (jump and call targets range over the full 256-byte ROM). One-byte
//! instructions emit `(opcode << 4) | (operand & 0xF)`; operands above 15
//! are silently truncated, matching the fixed-width hardware model - a
//! 4-bit machine has no representation for an assembly-time overflow.
//!
//! # Examples
//!
//! ```
//! use nibble4::{assemble, Isa};
//!
//! let source = r#"
//! .data
//! count: 9
//! .code
//! start:  LDA [count]   ; ACC := RAM[0]
//!         ADD [count]
//!         OUT
//!         HLT
//! "#;
//!
//! let exe = assemble(source, &Isa::default()).unwrap();
//! assert_eq!(exe.machine_code, vec![0x10, 0x40, 0xF2, 0xF0]);
//! assert_eq!(exe.initial_ram.get(&0), Some(&9));
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::isa::Isa;

/// The executable artifact produced by [`assemble`] and consumed by
/// [`CPU::load_program`](crate::CPU::load_program) - the sole interface
/// between assembler and CPU.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Executable {
    /// Flat byte sequence, loaded starting at ROM address 0.
    pub machine_code: Vec<u8>,

    /// Sparse mapping from RAM offset to initial nibble value, applied
    /// after `load_program` zeroes RAM. Offsets outside 0-15 are ignored
    /// at load time.
    pub initial_ram: BTreeMap<usize, u8>,
}

/// An error that aborts assembly. No partial output is ever produced.
///
/// Both variants carry the 0-based index of the originating source line,
/// counted over the raw input (comment and blank lines included), so a
/// text editor can highlight the offending line directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssembleError {
    /// The mnemonic matched neither the standard nor the extended table.
    UnknownInstruction {
        /// The case-folded mnemonic that failed to resolve.
        mnemonic: String,
        /// 0-based source line index.
        line: usize,
    },

    /// An operand token matched no symbol and did not parse as a decimal
    /// integer (after stripping any `[` `]` brackets).
    InvalidOperand {
        /// The operand token as written, brackets included.
        token: String,
        /// 0-based source line index.
        line: usize,
    },
}

impl AssembleError {
    /// The 0-based source line index the error originates from.
    pub fn line(&self) -> usize {
        match self {
            AssembleError::UnknownInstruction { line, .. } => *line,
            AssembleError::InvalidOperand { line, .. } => *line,
        }
    }

    /// The user-facing message without the line number.
    pub fn message(&self) -> String {
        match self {
            AssembleError::UnknownInstruction { mnemonic, .. } => {
                format!("Unknown Instruction: {}", mnemonic)
            }
            AssembleError::InvalidOperand { token, .. } => {
                format!("Invalid Operand: {}", token)
            }
        }
    }
}

impl fmt::Display for AssembleError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} (line {})", self.message(), self.line())
    }
}

impl std::error::Error for AssembleError {}

/// A surviving code line paired with its original 0-based source line index.
struct CodeLine {
    text: String,
    source_line: usize,
}

/// Assembles source text into an [`Executable`].
///
/// The symbol table is constructed fresh inside every call; repeated or
/// interleaved calls are fully independent.
///
/// # Errors
///
/// Returns [`AssembleError`] for an unknown mnemonic or an unresolvable
/// operand. The first error encountered in pass 2 terminates assembly
/// immediately; pass 1 never errors.
pub fn assemble(source: &str, isa: &Isa) -> Result<Executable, AssembleError> {
    let mut symbols: HashMap<String, usize> = HashMap::new();
    let mut initial_ram = BTreeMap::new();

    let code_lines = preprocess(source, &mut symbols, &mut initial_ram);
    assign_addresses(&code_lines, isa, &mut symbols);
    let machine_code = emit(&code_lines, isa, &symbols)?;

    Ok(Executable {
        machine_code,
        initial_ram,
    })
}

/// Phase 1: strip comments and blanks, consume the data section, and
/// collect code lines with their original line indices.
fn preprocess(
    source: &str,
    symbols: &mut HashMap<String, usize>,
    initial_ram: &mut BTreeMap<usize, u8>,
) -> Vec<CodeLine> {
    let mut code_lines = Vec::new();
    let mut in_data_section = false;
    let mut data_offset = 0usize;

    for (index, raw) in source.lines().enumerate() {
        let uncommented = match raw.find(';') {
            Some(pos) => &raw[..pos],
            None => raw,
        };
        let line = uncommented.trim();
        if line.is_empty() {
            continue;
        }

        // Section markers are case-sensitive and must be the whole line.
        if line == ".data" {
            in_data_section = true;
            continue;
        }
        if line == ".code" {
            in_data_section = false;
            continue;
        }

        if in_data_section {
            let mut tokens = line.split_whitespace().peekable();
            if let Some(&first) = tokens.peek() {
                if let Some(label) = first.strip_suffix(':') {
                    // The label binds to the current offset, before any
                    // values on this line are consumed.
                    symbols.insert(label.to_string(), data_offset);
                    tokens.next();
                }
            }
            for token in tokens {
                // Values are read until the first token that is not a
                // decimal integer; the remainder of the line is dropped.
                match token.parse::<i64>() {
                    Ok(value) => {
                        initial_ram.insert(data_offset, (value as u8) & 0xF);
                        data_offset += 1;
                    }
                    Err(_) => break,
                }
            }
        } else {
            code_lines.push(CodeLine {
                text: line.to_string(),
                source_line: index,
            });
        }
    }

    code_lines
}

/// Pass 1: bind code labels to virtual addresses. Sizing-only; unknown
/// mnemonics count as one byte and are rejected in pass 2, not here.
fn assign_addresses(code_lines: &[CodeLine], isa: &Isa, symbols: &mut HashMap<String, usize>) {
    let mut addr = 0usize;

    for line in code_lines {
        let text = line.text.as_str();

        // A bare `name:` defines the label and consumes no space.
        if let Some(label) = bare_label(text) {
            symbols.insert(label.to_string(), addr);
            continue;
        }

        // `name: INSTR ...` defines the label, then the rest is sized.
        let rest = match text.find(':') {
            Some(col) => {
                symbols.insert(text[..col].trim().to_string(), addr);
                text[col + 1..].trim()
            }
            None => text,
        };

        let mnemonic = rest.split_whitespace().next().unwrap_or("");
        addr += if isa.mnemonic_is_two_byte(mnemonic) { 2 } else { 1 };
    }
}

/// Pass 2: emit machine code, resolving operands against the symbol table.
fn emit(
    code_lines: &[CodeLine],
    isa: &Isa,
    symbols: &HashMap<String, usize>,
) -> Result<Vec<u8>, AssembleError> {
    let mut machine_code = Vec::new();

    for line in code_lines {
        let mut text = line.text.as_str();

        if bare_label(text).is_some() {
            continue;
        }
        if let Some(col) = text.find(':') {
            text = text[col + 1..].trim();
        }
        if text.is_empty() {
            continue;
        }

        let mut tokens = text.split_whitespace();
        let mnemonic = tokens.next().unwrap_or("").to_ascii_uppercase();

        let (opcode, operand) = if let Some(subcode) = isa.extended_subcode(&mnemonic) {
            // Extended group: the operand nibble is the sub-opcode itself.
            (0xF, subcode)
        } else if let Some(opcode) = isa.standard_opcode(&mnemonic) {
            let operand = match tokens.next() {
                Some(token) => {
                    resolve_operand(token, symbols).ok_or_else(|| AssembleError::InvalidOperand {
                        token: token.to_string(),
                        line: line.source_line,
                    })?
                }
                // A missing operand is not validated; it assembles as 0.
                None => 0,
            };
            (opcode, operand)
        } else {
            return Err(AssembleError::UnknownInstruction {
                mnemonic,
                line: line.source_line,
            });
        };

        if isa.is_two_byte(opcode) {
            machine_code.push(opcode << 4);
            machine_code.push(operand);
        } else {
            machine_code.push((opcode << 4) | (operand & 0xF));
        }
    }

    Ok(machine_code)
}

/// Returns the label name if the whole line is a `name:` definition.
fn bare_label(text: &str) -> Option<&str> {
    text.strip_suffix(':').filter(|label| !label.contains(':'))
}

/// Resolves one operand token, in order: exact symbol match, symbol match
/// after stripping `[` `]` brackets, then decimal integer. Values are
/// truncated to a byte like the registers they land in.
fn resolve_operand(token: &str, symbols: &HashMap<String, usize>) -> Option<u8> {
    if let Some(&addr) = symbols.get(token) {
        return Some(addr as u8);
    }

    let cleaned: String = token.chars().filter(|&c| c != '[' && c != ']').collect();
    if let Some(&addr) = symbols.get(cleaned.as_str()) {
        return Some(addr as u8);
    }

    cleaned.parse::<i64>().ok().map(|value| value as u8)
}
