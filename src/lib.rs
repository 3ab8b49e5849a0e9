//! # 4-bit CPU Emulator Core
//!
//! An emulator for a minimal 4-bit, Harvard-architecture processor,
//! together with the two-pass assembler and disassembler for its
//! instruction encoding.
//!
//! The machine has a 4-bit accumulator, 256 bytes of program ROM, 16
//! nibbles of data RAM (with memory-mapped I/O at addresses 14 and 15), a
//! 16-entry call/data stack, and a GPIO peripheral with switch and LED
//! registers. The instruction set is 16 base opcodes plus 7 extended
//! sub-opcodes; the four control-transfer instructions take a full operand
//! byte, everything else packs its operand into the opcode byte's low
//! nibble.
//!
//! ## Quick Start
//!
//! ```rust
//! use nibble4::{assemble, CPU, Isa};
//!
//! let source = r#"
//! .data
//! counter: 3
//! .code
//! loop:   LDA [counter]
//!         JZ done
//!         OUT
//!         LDI 1
//!         STA [15]      ; light LED 0
//!         LDA [counter]
//!         SUB [one]
//!         STA [counter]
//!         JMP loop
//! done:   HLT
//! .data
//! one: 1
//! "#;
//!
//! let isa = Isa::default();
//! let exe = assemble(source, &isa).unwrap();
//!
//! let mut cpu = CPU::new();
//! cpu.load_program(&exe.machine_code, &exe.initial_ram);
//!
//! while !cpu.is_halted() {
//!     cpu.fetch();
//!     cpu.execute();
//! }
//!
//! assert_eq!(cpu.acc(), 0);
//! assert!(cpu.flag_z());
//! assert_eq!(cpu.gpio().leds(), 0b0001);
//! ```
//!
//! ## Architecture
//!
//! - **Harvard separation**: code and data live in distinct regions; no
//!   instruction can read or write ROM as data.
//! - **Table-driven ISA**: one metadata table ([`isa::OPCODE_TABLE`]) is
//!   the single source of truth consulted by assembler, disassembler, and
//!   tests.
//! - **Synchronous core**: an external driver clocks `fetch`/`execute`;
//!   the only suspension point is the memory-mapped input port, resumed
//!   via [`CPU::resolve_input`].
//! - **No run-time errors**: every opcode value is defined and stack
//!   overflow/underflow is absorbed silently, matching the modeled
//!   hardware.
//!
//! ## Modules
//!
//! - `isa` - opcode metadata tables and mnemonic-set configuration
//! - `assembler` - two-pass source-to-binary assembler
//! - `disassembler` - binary-to-listing decoder
//! - `cpu` - CPU state and execution logic
//! - `gpio` - switch/LED peripheral unit

pub mod assembler;
pub mod cpu;
pub mod disassembler;
pub mod gpio;
pub mod isa;

// WebAssembly bindings (only built with the "wasm" feature)
pub mod wasm;

// Re-export public API
pub use assembler::{assemble, AssembleError, Executable};
pub use cpu::{CpuState, CPU};
pub use disassembler::{disassemble, format_instruction, format_listing, DecodedInstruction};
pub use gpio::Gpio;
pub use isa::{Isa, MnemonicSet};
