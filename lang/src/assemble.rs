use std::ops::Range;

use itertools::Itertools;
use thiserror::Error;
use tracing::warn;
use vm::{Instruction, Label, Op, Opcode};

use crate::parse::{Atom, Stmt};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssembleError {
    #[error("`{0}` takes a memory cell, not the label `{1}`")]
    ExpectedCell(Opcode, String, Range<usize>),
    #[error("`{0}` takes a label, not the cell {1}")]
    ExpectedLabel(Opcode, usize, Range<usize>),
    #[error("`{0}` doesn't take an operand")]
    UnexpectedOperand(Opcode, Range<usize>),
}

impl AssembleError {
    pub fn span(&self) -> Range<usize> {
        match self {
            AssembleError::ExpectedCell(.., span)
            | AssembleError::ExpectedLabel(.., span)
            | AssembleError::UnexpectedOperand(_, span) => span.clone(),
        }
    }
}

/// Turn parsed blocks into instructions, positioned in the order they were written.
///
/// Blocks missing their operand still assemble, as [Op::Unconfigured].
pub fn assemble<'a>(
    stmts: impl IntoIterator<Item = &'a Stmt>,
) -> Result<Vec<Instruction>, Vec<AssembleError>> {
    let (instructions, errs): (Vec<Instruction>, Vec<AssembleError>) = stmts
        .into_iter()
        .enumerate()
        .map(|(position, stmt)| {
            let op = to_op(stmt)?;
            if op.is_unconfigured() {
                warn!(position, opcode = %stmt.opcode, "block has no operand, it will be skipped");
            }
            Ok(Instruction {
                position,
                label: stmt.label.clone().map(Label::from),
                op,
            })
        })
        .partition_result();

    if !errs.is_empty() {
        return Err(errs);
    }
    Ok(instructions)
}

fn to_op(stmt: &Stmt) -> Result<Op, AssembleError> {
    let opcode = stmt.opcode;
    let (cell, target) = match &stmt.operand {
        None => (None, None),
        Some(_) if !opcode.takes_cell() && !opcode.takes_label() => {
            return Err(AssembleError::UnexpectedOperand(opcode, stmt.span.clone()));
        }
        Some(Atom::Cell(cell)) if opcode.takes_cell() => (Some(*cell), None),
        Some(Atom::Cell(cell)) => {
            return Err(AssembleError::ExpectedLabel(opcode, *cell, stmt.span.clone()));
        }
        Some(Atom::Name(name)) if opcode.takes_label() => (None, Some(Label::from(name.clone()))),
        Some(Atom::Name(name)) => {
            return Err(AssembleError::ExpectedCell(
                opcode,
                name.clone(),
                stmt.span.clone(),
            ));
        }
    };
    Ok(Op::from_parts(opcode, cell, target))
}

#[cfg(test)]
mod tests {
    use vm::{Op, Opcode};

    use super::{assemble, AssembleError};
    use crate::parse::parse;

    #[test]
    fn test_assembles_in_written_order() {
        let stmts = parse("top: INBOX COPYTO 2 JUMP_IF_NEGATIVE top OUTBOX").unwrap();
        let instructions = assemble(&stmts).unwrap();

        let positions: Vec<_> = instructions.iter().map(|i| i.position).collect();
        assert_eq!(positions, vec![0, 1, 2, 3]);
        assert_eq!(instructions[0].label, Some("top".into()));
        assert_eq!(instructions[1].op, Op::CopyTo(2));
        assert_eq!(instructions[2].op, Op::JumpIfNegative("top".into()));
    }

    #[test]
    fn test_missing_operand_is_unconfigured() {
        let stmts = parse("ADD\nJUMP").unwrap();
        let instructions = assemble(&stmts).unwrap();
        assert_eq!(instructions[0].op, Op::Unconfigured(Opcode::Add));
        assert_eq!(instructions[1].op, Op::Unconfigured(Opcode::Jump));
    }

    #[test]
    fn test_wrong_operands() {
        let stmts = parse("JUMP 3\nCOPYFROM there\nINBOX 1").unwrap();
        let errs = assemble(&stmts).unwrap_err();
        assert_eq!(errs.len(), 3);
        assert!(matches!(errs[0], AssembleError::ExpectedLabel(Opcode::Jump, 3, _)));
        assert!(matches!(errs[1], AssembleError::ExpectedCell(Opcode::CopyFrom, ..)));
        assert!(matches!(errs[2], AssembleError::UnexpectedOperand(Opcode::Inbox, _)));
    }
}
