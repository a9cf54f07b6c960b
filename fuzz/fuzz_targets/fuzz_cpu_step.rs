//! Fuzz target for CPU execution.
//!
//! Loads an arbitrary byte image at an arbitrary offset and steps the
//! machine under a budget, looking for panics and trace-bound violations.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use micro8::{CPU, TRACE_CAPACITY};

/// Arbitrary program image for fuzzing.
#[derive(Debug, Arbitrary)]
struct FuzzProgram {
    /// Raw bytes to load; anything at all, including unknown opcodes.
    bytes: Vec<u8>,

    /// Load offset; loads that do not fit must be rejected, not truncated.
    offset: u8,

    /// Step budget, bounded so JMP cycles terminate the run.
    steps: u16,
}

fuzz_target!(|input: FuzzProgram| {
    let mut cpu = CPU::new();

    match cpu.load_program(&input.bytes, input.offset) {
        Ok(()) => {
            cpu.run_to_halt(usize::from(input.steps));

            assert!(cpu.trace().len() <= TRACE_CAPACITY);
            assert!(usize::from(cpu.pc()) <= 256);
        }
        Err(_) => {
            // A rejected load must leave the machine runnable.
            assert!(cpu.running());
        }
    }
});
