//! Tests for the HALT instruction and the halted state machine.

use micro8::CPU;

#[test]
fn test_halt_stops_the_machine() {
    let mut cpu = CPU::new();
    cpu.load_program(&[0xFF], 0x00).unwrap();

    cpu.step();

    assert!(!cpu.running());
    assert_eq!(cpu.pc(), 0x01);
    assert_eq!(cpu.ir(), 0xFF);
}

#[test]
fn test_halt_leaves_registers_and_flags_untouched() {
    let mut cpu = CPU::new();
    cpu.load_program(&[0x01, 250, 0x02, 10, 0xFF], 0x00).unwrap();
    cpu.run_to_halt(100);

    assert_eq!(cpu.a(), 4);
    assert!(cpu.carry());
    assert!(!cpu.zero());
}

#[test]
fn test_steps_after_halt_change_nothing() {
    let mut cpu = CPU::new();
    cpu.load_program(&[0x01, 1, 0xFF], 0x00).unwrap();
    cpu.run_to_halt(100);

    let (a, pc, traces) = (cpu.a(), cpu.pc(), cpu.trace().len());
    for _ in 0..10 {
        cpu.step();
    }

    assert_eq!(cpu.a(), a);
    assert_eq!(cpu.pc(), pc);
    assert_eq!(cpu.trace().len(), traces);
}

#[test]
fn test_run_to_halt_counts_the_halt_step() {
    let mut cpu = CPU::new();
    // LDA, ADD, HALT: three steps to a stopped machine.
    cpu.load_program(&[0x01, 10, 0x02, 5, 0xFF], 0x00).unwrap();

    assert_eq!(cpu.run_to_halt(100), 3);
    assert!(!cpu.running());
}
