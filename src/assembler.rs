//! # Assembler
//!
//! Converts assembly source text into the machine's binary encoding with a
//! classic two-pass scheme:
//!
//! 1. **Pass 1** walks the lines in order, binding each `LABEL:` to the
//!    running address counter and validating every mnemonic. Instruction
//!    lines are queued with their resolved address.
//! 2. **Pass 2** emits the opcode byte for each queued instruction and
//!    resolves its operand — as a label first, then as a numeric literal.
//!
//! Because labels are only resolved in pass 2, forward references work
//! exactly like backward ones.
//!
//! ## Syntax
//!
//! ```text
//! LOOP_START:            ; a label line (may carry an instruction)
//!     LDA 10             ; mnemonics and labels are case-insensitive
//!     SUB 0x01           ; literals: decimal, 0x-hex, %-binary
//!     BEQ LOOP_END       ; operands may name a label, even a later one
//!     JMP LOOP_START
//! LOOP_END: HALT
//! ```
//!
//! The assembler is all-or-nothing: any error aborts the whole assembly and
//! no partial bytecode escapes.
//!
//! # Examples
//!
//! ```
//! use micro8::assemble;
//!
//! let bytes = assemble("LDA 0x0F\nADD 5\nHALT").unwrap();
//! assert_eq!(bytes, vec![0x01, 0x0F, 0x02, 0x05, 0xFF]);
//! ```

pub mod literal;
pub mod symbol_table;

use crate::addressing::OperandKind;
use crate::opcodes::Opcode;
use self::literal::parse_literal;
use self::symbol_table::LabelTable;
use thiserror::Error;

/// Errors raised during assembly.
///
/// Every variant carries the 1-based source line and the offending token so
/// a shell can render a one-line diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssembleError {
    /// The same label name (case-insensitively) was defined twice.
    #[error("line {line}: duplicate label '{name}'")]
    DuplicateLabel {
        /// The normalized label name.
        name: String,
        /// Line of the second definition.
        line: usize,
    },

    /// A line starts with something that is neither a label nor a mnemonic.
    #[error("line {line}: unknown instruction '{mnemonic}'")]
    UnknownInstruction {
        /// The unrecognized token.
        mnemonic: String,
        /// Line it appeared on.
        line: usize,
    },

    /// An operand-bearing instruction has no operand token.
    #[error("line {line}: {mnemonic} requires an operand")]
    MissingOperand {
        /// The instruction missing its operand.
        mnemonic: &'static str,
        /// Line it appeared on.
        line: usize,
    },

    /// An operand resolved to no label, no valid literal, or a value
    /// outside [0, 255].
    #[error("line {line}: invalid operand or label '{token}'")]
    InvalidOperand {
        /// The unresolvable token.
        token: String,
        /// Line it appeared on.
        line: usize,
    },
}

/// An instruction queued by pass 1 for encoding in pass 2.
#[derive(Debug)]
struct PendingInstruction {
    opcode: Opcode,
    operand: Option<String>,
    line: usize,
}

/// Assembles source text into the machine's byte encoding.
///
/// Lines are processed in order; blank lines are skipped. A token ending in
/// `:` defines a label bound to the current address counter, and the same
/// line may carry an instruction after the label. Tokens after an
/// instruction's operand are ignored.
///
/// Returns the complete bytecode, or the first error encountered — never a
/// partial program.
///
/// # Examples
///
/// Forward references resolve across passes:
///
/// ```
/// use micro8::assemble;
///
/// let source = "LDA 0\nBEQ DONE\nADD 1\nDONE: HALT";
/// assert_eq!(assemble(source).unwrap(), vec![0x01, 0, 0x06, 0x06, 0x02, 1, 0xFF]);
/// ```
///
/// Duplicate labels are rejected with their source line:
///
/// ```
/// use micro8::{assemble, AssembleError};
///
/// let err = assemble("A: HALT\na: HALT").unwrap_err();
/// assert_eq!(
///     err,
///     AssembleError::DuplicateLabel { name: "A".into(), line: 2 }
/// );
/// ```
pub fn assemble(source: &str) -> Result<Vec<u8>, AssembleError> {
    let mut labels = LabelTable::new();
    let mut pending = Vec::new();
    let mut address: usize = 0;

    // Pass 1: bind labels, validate mnemonics, size instructions.
    for (index, raw_line) in source.lines().enumerate() {
        let line = index + 1;

        // Make sure a colon always separates a label from what follows it,
        // so "LOOP:LDA 5" tokenizes as a label plus an instruction.
        let normalized = raw_line.replace(':', ": ");
        let mut tokens = normalized.split_whitespace();

        let Some(first) = tokens.next() else {
            continue;
        };

        let head = match first.strip_suffix(':') {
            Some(name) if !name.is_empty() => {
                labels.define(name, address, line)?;
                match tokens.next() {
                    Some(token) => token,
                    // A label-only line defines the address of whatever
                    // instruction comes next.
                    None => continue,
                }
            }
            _ => first,
        };

        let Some(opcode) = Opcode::from_mnemonic(head) else {
            return Err(AssembleError::UnknownInstruction {
                mnemonic: head.to_ascii_uppercase(),
                line,
            });
        };

        pending.push(PendingInstruction {
            opcode,
            operand: tokens.next().map(str::to_owned),
            line,
        });
        address += usize::from(opcode.size());
    }

    // Pass 2: emit opcodes and resolve operands.
    let mut bytecode = Vec::with_capacity(address);
    for instr in pending {
        bytecode.push(instr.opcode as u8);
        if instr.opcode.operand_kind() == OperandKind::Implied {
            continue;
        }

        let Some(token) = instr.operand else {
            return Err(AssembleError::MissingOperand {
                mnemonic: instr.opcode.mnemonic(),
                line: instr.line,
            });
        };

        // A label wins over a literal spelling of the same token.
        let value = match labels.lookup(&token) {
            Some(addr) => Some(addr),
            None => parse_literal(&token).map(usize::from),
        };

        match value {
            Some(value) if value <= 0xFF => bytecode.push(value as u8),
            _ => {
                return Err(AssembleError::InvalidOperand {
                    token,
                    line: instr.line,
                })
            }
        }
    }

    Ok(bytecode)
}
