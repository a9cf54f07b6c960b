//! # Increment and Decrement Instructions
//!
//! - INX: increment the X register, wrapping 255 to 0
//! - DEX: decrement the X register, wrapping 0 to 255
//!
//! Both are one-byte instructions; the zero flag tracks the new X value,
//! which is what lets BEQ close a countdown loop driven by DEX.

use crate::bus::BusError;
use crate::cpu::CPU;
use crate::memory::MemoryDevice;
use crate::opcodes::Opcode;

/// Executes INX: `X := (X + 1) mod 256`.
pub(crate) fn inx<M: MemoryDevice>(cpu: &mut CPU<M>) -> Result<(), BusError> {
    cpu.trace_fetch(Opcode::Inx, None);

    let old_x = cpu.x;
    cpu.x = old_x.wrapping_add(1);
    cpu.update_zero(cpu.x);
    cpu.push_trace(format!("  REG: X incremented ({old_x:02X} -> {:02X})", cpu.x));

    cpu.pc = cpu.pc.wrapping_add(1);
    Ok(())
}

/// Executes DEX: `X := (X - 1) mod 256`.
pub(crate) fn dex<M: MemoryDevice>(cpu: &mut CPU<M>) -> Result<(), BusError> {
    cpu.trace_fetch(Opcode::Dex, None);

    let old_x = cpu.x;
    cpu.x = old_x.wrapping_sub(1);
    cpu.update_zero(cpu.x);
    cpu.push_trace(format!("  REG: X decremented ({old_x:02X} -> {:02X})", cpu.x));

    cpu.pc = cpu.pc.wrapping_add(1);
    Ok(())
}
