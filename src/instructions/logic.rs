//! # Bitwise Logic Instructions
//!
//! - AND, OR, XOR: bitwise operations between the accumulator and an
//!   immediate value
//! - NOT: invert every accumulator bit (the only one-byte logic op)
//!
//! All four update the zero flag and leave carry untouched. The trace shows
//! the operands and result in binary, the machine's teaching notation.

use crate::bus::BusError;
use crate::cpu::CPU;
use crate::memory::MemoryDevice;
use crate::opcodes::Opcode;

/// Executes AND: `A := A & operand`.
pub(crate) fn and<M: MemoryDevice>(cpu: &mut CPU<M>) -> Result<(), BusError> {
    binary_op(cpu, Opcode::And, '&', |a, v| a & v)
}

/// Executes OR: `A := A | operand`.
pub(crate) fn or<M: MemoryDevice>(cpu: &mut CPU<M>) -> Result<(), BusError> {
    binary_op(cpu, Opcode::Or, '|', |a, v| a | v)
}

/// Executes XOR: `A := A ^ operand`.
pub(crate) fn xor<M: MemoryDevice>(cpu: &mut CPU<M>) -> Result<(), BusError> {
    binary_op(cpu, Opcode::Xor, '^', |a, v| a ^ v)
}

/// Executes NOT: `A := !A`. One byte; PC advances by 1.
pub(crate) fn not<M: MemoryDevice>(cpu: &mut CPU<M>) -> Result<(), BusError> {
    cpu.trace_fetch(Opcode::Not, None);

    let old_a = cpu.a;
    cpu.a = !old_a;
    cpu.update_zero(cpu.a);

    cpu.push_trace(format!("  LOGIC: ~ %{old_a:08b}"));
    trace_result(cpu);

    cpu.pc = cpu.pc.wrapping_add(1);
    Ok(())
}

/// Shared body for the two-byte bitwise instructions.
fn binary_op<M: MemoryDevice>(
    cpu: &mut CPU<M>,
    op: Opcode,
    symbol: char,
    apply: fn(u8, u8) -> u8,
) -> Result<(), BusError> {
    let value = cpu.fetch_operand()?;
    cpu.trace_fetch(op, Some(value));

    let old_a = cpu.a;
    cpu.a = apply(old_a, value);
    cpu.update_zero(cpu.a);

    cpu.push_trace(format!("  LOGIC: %{old_a:08b} {symbol} %{value:08b}"));
    trace_result(cpu);

    cpu.pc = cpu.pc.wrapping_add(2);
    Ok(())
}

fn trace_result<M: MemoryDevice>(cpu: &mut CPU<M>) {
    let a = cpu.a;
    cpu.push_trace(format!("    RES: %{a:08b} (hex {a:02X}, dec {a:03})"));
}
