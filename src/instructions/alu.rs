//! # Arithmetic Instructions
//!
//! - ADD: add an immediate value to the accumulator
//! - SUB: subtract an immediate value from the accumulator
//!
//! These are the only two instructions that write the carry flag: ADD sets
//! it when the unmasked sum exceeds 255, SUB when the subtrahend exceeds
//! the accumulator. Neither ever clears carry on behalf of other
//! instructions — it stays as last written until the next ADD or SUB.

use crate::bus::BusError;
use crate::cpu::CPU;
use crate::memory::MemoryDevice;
use crate::opcodes::Opcode;

/// Executes ADD: `A := (A + operand) mod 256`, carry on 8-bit overflow.
pub(crate) fn add<M: MemoryDevice>(cpu: &mut CPU<M>) -> Result<(), BusError> {
    let value = cpu.fetch_operand()?;
    cpu.trace_fetch(Opcode::Add, Some(value));

    let old_a = cpu.a;
    let sum = u16::from(old_a) + u16::from(value);
    cpu.a = (sum & 0xFF) as u8;
    cpu.carry = sum > 0xFF;
    cpu.update_zero(cpu.a);

    let mut line = format!(
        "  MATH: {old_a:02X}+{value:02X}={:02X} ({old_a:03}+{value:03}={sum:03})",
        cpu.a
    );
    if cpu.carry {
        line.push_str(" !CARRY");
    }
    cpu.push_trace(line);

    cpu.pc = cpu.pc.wrapping_add(2);
    Ok(())
}

/// Executes SUB: `A := (A - operand) mod 256`, carry on borrow.
pub(crate) fn sub<M: MemoryDevice>(cpu: &mut CPU<M>) -> Result<(), BusError> {
    let value = cpu.fetch_operand()?;
    cpu.trace_fetch(Opcode::Sub, Some(value));

    let old_a = cpu.a;
    let difference = i16::from(old_a) - i16::from(value);
    cpu.a = old_a.wrapping_sub(value);
    cpu.carry = old_a < value;
    cpu.update_zero(cpu.a);

    cpu.push_trace(format!(
        "  MATH: {old_a:02X}-{value:02X}={:02X} ({old_a:03}-{value:03}={difference:03})",
        cpu.a
    ));

    cpu.pc = cpu.pc.wrapping_add(2);
    Ok(())
}
