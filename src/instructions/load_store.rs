//! # Load and Store Instructions
//!
//! - LDA: load an immediate value into the accumulator
//! - LDX: load an immediate value into the X register
//! - STA: store the accumulator at a memory address
//!
//! Loads update the zero flag; STA touches no flags at all.

use crate::bus::BusError;
use crate::cpu::CPU;
use crate::memory::MemoryDevice;
use crate::opcodes::Opcode;

/// Executes LDA: `A := operand`, zero flag tracks the new A.
pub(crate) fn lda<M: MemoryDevice>(cpu: &mut CPU<M>) -> Result<(), BusError> {
    let value = cpu.fetch_operand()?;
    cpu.trace_fetch(Opcode::Lda, Some(value));

    cpu.a = value;
    cpu.update_zero(value);
    cpu.pc = cpu.pc.wrapping_add(2);
    Ok(())
}

/// Executes LDX: `X := operand`, zero flag tracks the new X.
pub(crate) fn ldx<M: MemoryDevice>(cpu: &mut CPU<M>) -> Result<(), BusError> {
    let value = cpu.fetch_operand()?;
    cpu.trace_fetch(Opcode::Ldx, Some(value));

    cpu.x = value;
    cpu.update_zero(value);
    cpu.pc = cpu.pc.wrapping_add(2);
    Ok(())
}

/// Executes STA: `mem[operand] := A`. Flags are untouched.
pub(crate) fn sta<M: MemoryDevice>(cpu: &mut CPU<M>) -> Result<(), BusError> {
    let addr = cpu.fetch_operand()?;
    cpu.trace_fetch(Opcode::Sta, Some(addr));

    let value = cpu.a;
    cpu.bus.write(u16::from(addr), value)?;
    cpu.push_trace(format!("MEM: {value:02X} stored at ${addr:02X}"));
    cpu.pc = cpu.pc.wrapping_add(2);
    Ok(())
}
