//! # Control Flow Instructions
//!
//! - JMP: unconditional jump to an absolute address
//! - HALT: stop the machine
//!
//! JMP sets PC to the operand address directly; like BEQ it never also adds
//! the instruction width. HALT clears the running flag, after which `step`
//! becomes a no-op.

use crate::bus::BusError;
use crate::cpu::CPU;
use crate::memory::MemoryDevice;
use crate::opcodes::Opcode;

/// Executes JMP: `PC := operand`.
pub(crate) fn jmp<M: MemoryDevice>(cpu: &mut CPU<M>) -> Result<(), BusError> {
    let addr = cpu.fetch_operand()?;
    cpu.trace_fetch(Opcode::Jmp, Some(addr));

    cpu.pc = u16::from(addr);
    Ok(())
}

/// Executes HALT: `running := false`.
pub(crate) fn halt<M: MemoryDevice>(cpu: &mut CPU<M>) -> Result<(), BusError> {
    cpu.trace_fetch(Opcode::Halt, None);

    cpu.running = false;
    cpu.pc = cpu.pc.wrapping_add(1);
    Ok(())
}
