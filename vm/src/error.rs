use thiserror::Error;

use crate::op::Opcode;

/// Failures while executing an instruction.
///
/// Running out of input, running off the end and the step budget are not errors, they just halt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VmError {
    #[error("`{op}` at instruction {pc} overflowed: {lhs} and {rhs}")]
    Overflow {
        op: Opcode,
        pc: usize,
        lhs: i64,
        rhs: i64,
    },
}
