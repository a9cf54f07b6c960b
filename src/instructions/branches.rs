//! # Branch Instructions
//!
//! - BEQ: branch to an absolute address when the zero flag is set
//!
//! A taken branch sets PC to the operand address and nothing else — the
//! instruction width is never added on top. A branch not taken falls
//! through to the next instruction. Flags are untouched either way.

use crate::bus::BusError;
use crate::cpu::CPU;
use crate::memory::MemoryDevice;
use crate::opcodes::Opcode;

/// Executes BEQ: `if zero { PC := operand } else { PC += 2 }`.
pub(crate) fn beq<M: MemoryDevice>(cpu: &mut CPU<M>) -> Result<(), BusError> {
    let addr = cpu.fetch_operand()?;
    cpu.trace_fetch(Opcode::Beq, Some(addr));

    if cpu.zero {
        cpu.push_trace(format!("BRANCH: Z=ON, jumping to ${addr:02X}"));
        cpu.pc = u16::from(addr);
    } else {
        cpu.push_trace("BRANCH: Z=OFF, no jump");
        cpu.pc = cpu.pc.wrapping_add(2);
    }
    Ok(())
}
