//! # CPU State and Execution
//!
//! This module contains the CPU struct representing the machine's processor
//! state and the fetch-decode-execute loop.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: accumulator (A) and index register (X), both 8-bit
//! - **Program counter** (PC): address of the next instruction
//! - **Instruction register** (IR): the most recently fetched opcode byte
//! - **Flags**: carry and zero (individual bool fields), plus the running flag
//! - **Execution trace**: the 15 most recent trace lines, for display only
//!
//! ## Execution Model
//!
//! [`CPU::load_program`] resets the machine and copies a byte program into
//! memory through the bus; [`CPU::step`] executes one instruction (or skips
//! one unknown byte); [`CPU::run_to_halt`] drives `step` under a budget.
//! Flags reflect only the last A- or X-mutating instruction: carry is
//! written by ADD/SUB alone and is never cleared by unrelated instructions,
//! so it can stay stale — that is the machine's documented behavior, not an
//! accident.

use crate::bus::{Bus, BusError};
use crate::instructions;
use crate::memory::{Memory, MemoryDevice};
use crate::opcodes::Opcode;
use crate::trace::TraceBuffer;
use thiserror::Error;

/// Errors raised by [`CPU::load_program`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The program would extend past the end of memory. Nothing is written.
    #[error("program of {len} bytes at offset ${offset:02X} exceeds memory capacity {capacity}")]
    ProgramTooLarge {
        /// Program length in bytes.
        len: usize,
        /// Requested load offset.
        offset: u8,
        /// Capacity of the attached memory.
        capacity: usize,
    },

    /// The bus rejected an access while loading.
    #[error(transparent)]
    Bus(#[from] BusError),
}

/// The machine's processor: registers, flags and the execution cycle.
///
/// The CPU is generic over the memory implementation via the
/// [`MemoryDevice`] trait and reaches memory exclusively through its
/// [`Bus`] — nothing bypasses that boundary.
///
/// # Examples
///
/// ```
/// use micro8::CPU;
///
/// let mut cpu = CPU::new();
///
/// // LDA #10; ADD #5; HALT
/// cpu.load_program(&[0x01, 10, 0x02, 5, 0xFF], 0x00).unwrap();
/// cpu.run_to_halt(100);
///
/// assert_eq!(cpu.a(), 15);
/// assert!(!cpu.carry());
/// assert!(!cpu.running());
/// ```
#[derive(Debug, Clone)]
pub struct CPU<M: MemoryDevice = Memory> {
    /// Accumulator register.
    pub(crate) a: u8,

    /// X index register.
    pub(crate) x: u8,

    /// Program counter. Wider than a cell address so the off-the-end halt
    /// check is expressible after a two-byte instruction at the last cell.
    pub(crate) pc: u16,

    /// Instruction register: the opcode byte fetched by the last step.
    pub(crate) ir: u8,

    /// Carry flag. Written only by ADD and SUB.
    pub(crate) carry: bool,

    /// Zero flag. Tracks the last write to A or X.
    pub(crate) zero: bool,

    /// False once HALT executes or PC runs off the end of memory.
    pub(crate) running: bool,

    /// The only path to memory.
    pub(crate) bus: Bus<M>,

    /// Bounded execution trace.
    pub(crate) trace: TraceBuffer,
}

impl CPU<Memory> {
    /// Creates a CPU with a fresh 256-byte memory attached to its bus.
    pub fn new() -> Self {
        let mut bus = Bus::new();
        bus.attach_memory(Memory::new());
        Self::with_bus(bus)
    }
}

impl Default for CPU<Memory> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: MemoryDevice> CPU<M> {
    /// Creates a CPU over a caller-supplied bus.
    ///
    /// The bus may be unattached; any access before a memory is attached
    /// halts the machine with a trace line rather than panicking.
    pub fn with_bus(bus: Bus<M>) -> Self {
        Self {
            a: 0x00,
            x: 0x00,
            pc: 0,
            ir: 0x00,
            carry: false,
            zero: false,
            running: true,
            bus,
            trace: TraceBuffer::new(),
        }
    }

    /// Resets the machine and loads a program through the bus.
    ///
    /// On success every register and flag is zeroed, the trace is cleared,
    /// all memory cells are zero-filled, the program bytes are written
    /// starting at `offset`, `PC = offset`, and the machine is running.
    ///
    /// Fails with [`LoadError::ProgramTooLarge`] — before any mutation —
    /// when the last program byte would land past the end of memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use micro8::{CPU, LoadError};
    ///
    /// let mut cpu = CPU::new();
    /// let err = cpu.load_program(&[0; 300], 0x00).unwrap_err();
    /// assert!(matches!(err, LoadError::ProgramTooLarge { .. }));
    /// ```
    pub fn load_program(&mut self, program: &[u8], offset: u8) -> Result<(), LoadError> {
        let capacity = self.bus.capacity()?;
        if usize::from(offset) + program.len() > capacity {
            return Err(LoadError::ProgramTooLarge {
                len: program.len(),
                offset,
                capacity,
            });
        }

        self.a = 0x00;
        self.x = 0x00;
        self.ir = 0x00;
        self.carry = false;
        self.zero = false;
        self.running = true;
        self.trace.clear();

        // The size check above guarantees every address below is in range.
        for addr in 0..capacity {
            self.bus.write(addr as u16, 0x00)?;
        }
        for (i, &byte) in program.iter().enumerate() {
            self.bus.write(u16::from(offset) + i as u16, byte)?;
        }

        self.pc = u16::from(offset);
        Ok(())
    }

    /// Executes one instruction, or skips one unknown byte.
    ///
    /// A no-op once halted. A PC at or past the end of memory halts the
    /// machine. Unknown opcode bytes are skipped with a trace line and are
    /// not an error — the machine tolerates hand-crafted byte programs.
    /// Bus failures (operand fetch off the end of memory, unattached bus)
    /// halt the machine with a trace line.
    pub fn step(&mut self) {
        if !self.running {
            return;
        }

        let capacity = match self.bus.capacity() {
            Ok(capacity) => capacity,
            Err(e) => return self.fault(e),
        };
        if usize::from(self.pc) >= capacity {
            self.running = false;
            return;
        }

        let opcode = match self.bus.read(self.pc) {
            Ok(byte) => byte,
            Err(e) => return self.fault(e),
        };
        self.ir = opcode;

        match Opcode::decode(opcode) {
            Some(op) => {
                if let Err(e) = self.execute(op) {
                    self.fault(e);
                }
            }
            None => {
                self.push_trace(format!("SKIP: unknown opcode {opcode:02X}"));
                self.pc = self.pc.wrapping_add(1);
            }
        }
    }

    /// Steps until the machine halts or `max_steps` is exhausted.
    ///
    /// Returns the number of steps taken. The budget bounds programs that
    /// never halt (a JMP cycle has no other way out).
    ///
    /// # Examples
    ///
    /// ```
    /// use micro8::CPU;
    ///
    /// let mut cpu = CPU::new();
    /// // JMP $00 — an infinite loop.
    /// cpu.load_program(&[0x04, 0x00], 0x00).unwrap();
    ///
    /// assert_eq!(cpu.run_to_halt(50), 50);
    /// assert!(cpu.running());
    /// ```
    pub fn run_to_halt(&mut self, max_steps: usize) -> usize {
        let mut steps = 0;
        while self.running && steps < max_steps {
            self.step();
            steps += 1;
        }
        steps
    }

    /// Dispatches a decoded opcode to its handler.
    ///
    /// Handlers are solely responsible for advancing PC; branch and jump
    /// handlers set it absolutely and never also add the instruction width.
    fn execute(&mut self, op: Opcode) -> Result<(), BusError> {
        match op {
            Opcode::Lda => instructions::load_store::lda(self),
            Opcode::Ldx => instructions::load_store::ldx(self),
            Opcode::Sta => instructions::load_store::sta(self),
            Opcode::Add => instructions::alu::add(self),
            Opcode::Sub => instructions::alu::sub(self),
            Opcode::And => instructions::logic::and(self),
            Opcode::Or => instructions::logic::or(self),
            Opcode::Xor => instructions::logic::xor(self),
            Opcode::Not => instructions::logic::not(self),
            Opcode::Inx => instructions::inc_dec::inx(self),
            Opcode::Dex => instructions::inc_dec::dex(self),
            Opcode::Beq => instructions::branches::beq(self),
            Opcode::Jmp => instructions::control::jmp(self),
            Opcode::Halt => instructions::control::halt(self),
        }
    }

    /// Records a bus failure and halts.
    fn fault(&mut self, error: BusError) {
        self.push_trace(format!("BUS: {error}"));
        self.running = false;
    }

    // ========== Handler support ==========

    /// Reads the operand byte at `PC + 1`.
    pub(crate) fn fetch_operand(&self) -> Result<u8, BusError> {
        self.bus.read(self.pc.wrapping_add(1))
    }

    /// Records the canonical `FETCH:` trace line for an instruction.
    pub(crate) fn trace_fetch(&mut self, op: Opcode, operand: Option<u8>) {
        let line = match operand {
            Some(value) => format!(
                "FETCH: {:02X} {value:02X} -> {} {}",
                op as u8,
                op.mnemonic(),
                op.operand_kind().format(value)
            ),
            None => format!("FETCH: {:02X} -> {}", op as u8, op.mnemonic()),
        };
        self.push_trace(line);
    }

    /// Appends a line to the execution trace.
    pub(crate) fn push_trace(&mut self, line: impl Into<String>) {
        self.trace.push(line);
    }

    /// Updates the zero flag from the value just written to A or X.
    pub(crate) fn update_zero(&mut self, value: u8) {
        self.zero = value == 0;
    }

    // ========== Snapshot accessors ==========

    /// Accumulator value.
    pub fn a(&self) -> u8 {
        self.a
    }

    /// X register value.
    pub fn x(&self) -> u8 {
        self.x
    }

    /// Program counter value.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// The opcode byte fetched by the most recent step.
    pub fn ir(&self) -> u8 {
        self.ir
    }

    /// Carry flag.
    pub fn carry(&self) -> bool {
        self.carry
    }

    /// Zero flag.
    pub fn zero(&self) -> bool {
        self.zero
    }

    /// True while the machine is running, false once halted.
    pub fn running(&self) -> bool {
        self.running
    }

    /// The bounded execution trace, oldest line first.
    pub fn trace(&self) -> &TraceBuffer {
        &self.trace
    }

    /// Borrows the bus, e.g. to render the memory image.
    pub fn bus(&self) -> &Bus<M> {
        &self.bus
    }

    /// Mutably borrows the bus, e.g. to pre-seed memory in tests.
    pub fn bus_mut(&mut self) -> &mut Bus<M> {
        &mut self.bus
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let cpu = CPU::new();

        assert_eq!(cpu.a(), 0x00);
        assert_eq!(cpu.x(), 0x00);
        assert_eq!(cpu.pc(), 0x0000);
        assert_eq!(cpu.ir(), 0x00);
        assert!(!cpu.carry());
        assert!(!cpu.zero());
        assert!(cpu.running());
        assert!(cpu.trace().is_empty());
    }

    #[test]
    fn test_load_program_resets_everything() {
        let mut cpu = CPU::new();
        cpu.load_program(&[0x01, 200, 0x02, 100, 0xFF], 0x00).unwrap();
        cpu.run_to_halt(100);
        assert!(cpu.carry());

        cpu.load_program(&[0xFF], 0x10).unwrap();
        assert_eq!(cpu.a(), 0);
        assert_eq!(cpu.pc(), 0x10);
        assert!(!cpu.carry());
        assert!(cpu.running());
        assert!(cpu.trace().is_empty());
        // Old program bytes are gone.
        assert_eq!(cpu.bus().read(0x00).unwrap(), 0x00);
        assert_eq!(cpu.bus().read(0x10).unwrap(), 0xFF);
    }

    #[test]
    fn test_load_program_too_large_leaves_memory_untouched() {
        let mut cpu = CPU::new();
        cpu.bus_mut().write(0x00, 0xAB).unwrap();

        let err = cpu.load_program(&[0x00; 2], 0xFF).unwrap_err();
        assert_eq!(
            err,
            LoadError::ProgramTooLarge {
                len: 2,
                offset: 0xFF,
                capacity: 256
            }
        );
        assert_eq!(cpu.bus().read(0x00).unwrap(), 0xAB);
    }

    #[test]
    fn test_load_program_exactly_filling_memory() {
        let mut cpu = CPU::new();
        cpu.load_program(&[0x00; 256], 0x00).unwrap();
        cpu.load_program(&[0xFF], 0xFF).unwrap();
        assert_eq!(cpu.bus().read(0xFF).unwrap(), 0xFF);
    }

    #[test]
    fn test_step_after_halt_is_noop() {
        let mut cpu = CPU::new();
        cpu.load_program(&[0xFF], 0x00).unwrap();
        cpu.step();
        assert!(!cpu.running());

        let pc = cpu.pc();
        cpu.step();
        assert_eq!(cpu.pc(), pc);
    }

    #[test]
    fn test_unknown_opcode_is_skipped() {
        let mut cpu = CPU::new();
        // 0x42 is unassigned; execution must continue into the HALT.
        cpu.load_program(&[0x42, 0xFF], 0x00).unwrap();

        cpu.step();
        assert!(cpu.running());
        assert_eq!(cpu.pc(), 0x01);
        assert_eq!(cpu.ir(), 0x42);

        cpu.step();
        assert!(!cpu.running());
    }

    #[test]
    fn test_pc_off_the_end_halts() {
        let mut cpu = CPU::new();
        // LDA #1 at $FE leaves PC at $100 with no HALT executed.
        cpu.load_program(&[0x01, 0x01], 0xFE).unwrap();

        cpu.step();
        assert_eq!(cpu.pc(), 0x100);
        assert!(cpu.running());

        cpu.step();
        assert!(!cpu.running());
    }

    #[test]
    fn test_unattached_bus_halts_with_trace() {
        let mut cpu: CPU = CPU::with_bus(Bus::new());
        cpu.step();
        assert!(!cpu.running());
        assert!(cpu.trace().lines()[0].starts_with("BUS:"));
    }
}
