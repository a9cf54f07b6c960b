//! Tests for the SUB instruction.
//!
//! Covers wrapping on borrow, the carry flag as a borrow indicator, and
//! the zero flag when the result lands on zero.

use micro8::CPU;

#[test]
fn test_sub_basic() {
    let mut cpu = CPU::new();
    // LDA #20; SUB #5
    cpu.load_program(&[0x01, 20, 0x05, 5, 0xFF], 0x00).unwrap();

    cpu.step();
    cpu.step();

    assert_eq!(cpu.a(), 15);
    assert!(!cpu.carry());
    assert!(!cpu.zero());
}

#[test]
fn test_sub_to_zero_sets_zero_flag() {
    let mut cpu = CPU::new();
    // 20 - 20 = 0.
    cpu.load_program(&[0x01, 20, 0x05, 20, 0xFF], 0x00).unwrap();

    cpu.step();
    cpu.step();

    assert_eq!(cpu.a(), 0);
    assert!(cpu.zero());
    assert!(!cpu.carry());
}

#[test]
fn test_sub_borrow_wraps_and_sets_carry() {
    let mut cpu = CPU::new();
    // 5 - 10 = -5 -> A = 251 with carry (borrow) set.
    cpu.load_program(&[0x01, 5, 0x05, 10, 0xFF], 0x00).unwrap();

    cpu.step();
    cpu.step();

    assert_eq!(cpu.a(), 251);
    assert!(cpu.carry());
    assert!(!cpu.zero());
}

#[test]
fn test_sub_zero_from_zero() {
    let mut cpu = CPU::new();
    cpu.load_program(&[0x01, 0, 0x05, 0, 0xFF], 0x00).unwrap();

    cpu.step();
    cpu.step();

    assert_eq!(cpu.a(), 0);
    assert!(cpu.zero());
    assert!(!cpu.carry());
}
