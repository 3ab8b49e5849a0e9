//! Tests for PUSH and POP, including stack saturation.

use std::collections::BTreeMap;

use nibble4::{assemble, CPU, Isa};

fn setup(source: &str) -> CPU {
    let exe = assemble(source, &Isa::default()).unwrap();
    let mut cpu = CPU::new();
    cpu.load_program(&exe.machine_code, &exe.initial_ram);
    cpu
}

fn run(cpu: &mut CPU, steps: usize) {
    for _ in 0..steps {
        cpu.fetch();
        cpu.execute();
    }
}

#[test]
fn test_push_then_pop_restores_acc() {
    let mut cpu = setup("LDI 5\nPUSH\nLDI 2\nPOP");

    run(&mut cpu, 2);
    assert_eq!(cpu.sp(), 1);
    assert_eq!(cpu.stack()[0], 5);

    run(&mut cpu, 2);
    assert_eq!(cpu.acc(), 5);
    assert_eq!(cpu.sp(), 0);
}

#[test]
fn test_pop_does_not_update_flags() {
    // POP restores a zero without setting Z.
    let mut cpu = setup("LDI 0\nPUSH\nLDI 2\nPOP");

    run(&mut cpu, 3);
    assert!(!cpu.flag_z()); // Z cleared by LDI 2

    run(&mut cpu, 1); // POP the zero
    assert_eq!(cpu.acc(), 0);
    assert!(!cpu.flag_z());
}

#[test]
fn test_pop_on_empty_stack_is_a_no_op() {
    let mut cpu = setup("LDI 7\nPOP");

    run(&mut cpu, 2);

    assert_eq!(cpu.acc(), 7);
    assert_eq!(cpu.sp(), 0);
}

#[test]
fn test_seventeenth_push_is_dropped() {
    // 17 consecutive pushes: SP saturates at 16, nothing overflows.
    let code = vec![0xF4; 17];
    let mut cpu = CPU::new();
    cpu.load_program(&code, &BTreeMap::new());

    run(&mut cpu, 17);

    assert_eq!(cpu.sp(), 16);
    assert_eq!(cpu.pc(), 17);
    assert!(!cpu.is_halted());
}

#[test]
fn test_stack_is_last_in_first_out() {
    let mut cpu = setup("LDI 1\nPUSH\nLDI 2\nPUSH\nLDI 3\nPUSH\nPOP\nPOP\nPOP");

    run(&mut cpu, 7);
    assert_eq!(cpu.acc(), 3);
    run(&mut cpu, 1);
    assert_eq!(cpu.acc(), 2);
    run(&mut cpu, 1);
    assert_eq!(cpu.acc(), 1);
}
