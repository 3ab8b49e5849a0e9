//! WASM API for the 4-bit machine.
//!
//! Provides JavaScript-callable interfaces for assembling source, clocking
//! the CPU, and inspecting machine state from a browser front end.

use wasm_bindgen::prelude::*;

use crate::{assemble, disassemble, format_listing, CPU, Isa, MnemonicSet};

/// Result of an assembly operation, in a JavaScript-friendly shape.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct AssembleResult {
    success: bool,
    code_size: usize,
    error_message: Option<String>,
    error_line: Option<usize>,
}

#[wasm_bindgen]
impl AssembleResult {
    #[wasm_bindgen(getter)]
    pub fn success(&self) -> bool {
        self.success
    }

    #[wasm_bindgen(getter)]
    pub fn code_size(&self) -> usize {
        self.code_size
    }

    #[wasm_bindgen(getter)]
    pub fn error_message(&self) -> Option<String> {
        self.error_message.clone()
    }

    /// 0-based source line index of the error, if any.
    #[wasm_bindgen(getter)]
    pub fn error_line(&self) -> Option<usize> {
        self.error_line
    }
}

/// The complete machine: CPU plus ISA configuration, driven from JS.
#[wasm_bindgen]
pub struct Machine {
    cpu: CPU,
    isa: Isa,
    machine_code: Vec<u8>,
}

#[wasm_bindgen]
impl Machine {
    /// Creates a machine. `turkish` selects the Turkish mnemonic set for
    /// disassembly listings; source is always accepted in either set.
    #[wasm_bindgen(constructor)]
    pub fn new(turkish: bool) -> Machine {
        let set = if turkish {
            MnemonicSet::Turkish
        } else {
            MnemonicSet::English
        };
        Machine {
            cpu: CPU::new(),
            isa: Isa::new(set),
            machine_code: Vec::new(),
        }
    }

    /// Assembles source and, on success, loads it into the CPU.
    pub fn load_source(&mut self, source: &str) -> AssembleResult {
        match assemble(source, &self.isa) {
            Ok(exe) => {
                self.cpu.load_program(&exe.machine_code, &exe.initial_ram);
                self.machine_code = exe.machine_code;
                AssembleResult {
                    success: true,
                    code_size: self.machine_code.len(),
                    error_message: None,
                    error_line: None,
                }
            }
            Err(err) => AssembleResult {
                success: false,
                code_size: 0,
                error_message: Some(err.message()),
                error_line: Some(err.line()),
            },
        }
    }

    /// Runs one full fetch/execute cycle.
    pub fn step(&mut self) {
        self.cpu.fetch();
        self.cpu.execute();
    }

    /// Supplies the nibble a waiting `LDA [14]` is parked on.
    pub fn resolve_input(&mut self, value: u8) {
        self.cpu.resolve_input(value);
    }

    /// Soft reset (keeps the loaded program).
    pub fn reset(&mut self) {
        self.cpu.reset();
    }

    /// Flips one GPIO input switch.
    pub fn toggle_switch(&mut self, bit: u8) {
        self.cpu.gpio_mut().toggle_switch(bit);
    }

    /// Disassembly listing of the loaded program.
    pub fn listing(&self) -> String {
        format_listing(&disassemble(&self.machine_code, &self.isa))
    }

    #[wasm_bindgen(getter)]
    pub fn acc(&self) -> u8 {
        self.cpu.acc()
    }

    #[wasm_bindgen(getter)]
    pub fn pc(&self) -> u8 {
        self.cpu.pc()
    }

    #[wasm_bindgen(getter)]
    pub fn ir(&self) -> u8 {
        self.cpu.ir()
    }

    #[wasm_bindgen(getter)]
    pub fn sp(&self) -> u8 {
        self.cpu.sp()
    }

    #[wasm_bindgen(getter)]
    pub fn flag_z(&self) -> bool {
        self.cpu.flag_z()
    }

    #[wasm_bindgen(getter)]
    pub fn flag_c(&self) -> bool {
        self.cpu.flag_c()
    }

    #[wasm_bindgen(getter)]
    pub fn halted(&self) -> bool {
        self.cpu.is_halted()
    }

    #[wasm_bindgen(getter)]
    pub fn waiting_for_input(&self) -> bool {
        self.cpu.is_waiting_for_input()
    }

    #[wasm_bindgen(getter)]
    pub fn leds(&self) -> u8 {
        self.cpu.gpio().leds()
    }

    #[wasm_bindgen(getter)]
    pub fn switches(&self) -> u8 {
        self.cpu.gpio().switches()
    }

    #[wasm_bindgen(getter)]
    pub fn console(&self) -> String {
        self.cpu.console().to_string()
    }

    /// Data memory as a JS typed array.
    pub fn ram(&self) -> js_sys::Uint8Array {
        js_sys::Uint8Array::from(&self.cpu.ram()[..])
    }

    /// Program memory as a JS typed array.
    pub fn rom(&self) -> js_sys::Uint8Array {
        js_sys::Uint8Array::from(&self.cpu.rom()[..])
    }

    /// Stack memory as a JS typed array.
    pub fn stack(&self) -> js_sys::Uint8Array {
        js_sys::Uint8Array::from(&self.cpu.stack()[..])
    }
}
