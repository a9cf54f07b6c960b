//! Tests for the DEX instruction.

use micro8::CPU;

#[test]
fn test_dex_decrements() {
    let mut cpu = CPU::new();
    cpu.load_program(&[0x0B, 5, 0x0D, 0xFF], 0x00).unwrap();
    cpu.run_to_halt(100);

    assert_eq!(cpu.x(), 4);
    assert!(!cpu.zero());
}

#[test]
fn test_dex_to_zero_sets_zero_flag() {
    let mut cpu = CPU::new();
    cpu.load_program(&[0x0B, 1, 0x0D, 0xFF], 0x00).unwrap();
    cpu.run_to_halt(100);

    assert_eq!(cpu.x(), 0);
    assert!(cpu.zero());
}

#[test]
fn test_dex_wraps_zero_to_255() {
    let mut cpu = CPU::new();
    // DEX on X=0 wraps to 255; the result is nonzero so zero clears.
    cpu.load_program(&[0x0D, 0xFF], 0x00).unwrap();
    cpu.run_to_halt(100);

    assert_eq!(cpu.x(), 255);
    assert!(!cpu.zero());
}

#[test]
fn test_dex_keeps_a_independent() {
    let mut cpu = CPU::new();
    // LDX #255; INX (X->0, zero on); LDA #5 (zero off); DEX (X->255)
    cpu.load_program(&[0x0B, 255, 0x0C, 0x01, 5, 0x0D, 0xFF], 0x00)
        .unwrap();
    cpu.run_to_halt(100);

    assert_eq!(cpu.a(), 5);
    assert_eq!(cpu.x(), 255);
    assert!(!cpu.zero());
}
