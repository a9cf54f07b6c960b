//! Fuzz target for the assembler.
//!
//! Feeds arbitrary text through `assemble`, checking that it never panics
//! and that successful output always decodes back to the instructions the
//! source named.

#![no_main]

use libfuzzer_sys::fuzz_target;
use micro8::{assemble, Opcode};

fuzz_target!(|source: &str| {
    if let Ok(bytes) = assemble(source) {
        // Walk the emitted stream: every instruction boundary must hold a
        // known opcode, and operand bytes must be present where promised.
        let mut i = 0;
        while i < bytes.len() {
            let op = Opcode::decode(bytes[i]).expect("assembler emitted an unknown opcode");
            i += usize::from(op.size());
        }
        assert_eq!(i, bytes.len(), "assembler emitted a truncated instruction");
    }
});
