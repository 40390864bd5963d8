use std::{fmt, str::FromStr};

use variantly::Variantly;

/// Index of a memory cell
pub type Cell = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Opcode {
    /// Take the next item from the inbox into the accumulator
    Inbox,
    /// Send the accumulator to the outbox, emptying it
    Outbox,
    /// Write the accumulator into a memory cell
    CopyTo,
    /// Load a memory cell into the accumulator
    CopyFrom,
    /// Add a memory cell to the accumulator
    Add,
    /// Subtract a memory cell from the accumulator
    Sub,
    /// Continue at the instruction carrying a label
    Jump,
    /// [Opcode::Jump], but only when the accumulator holds exactly 0
    JumpIfZero,
    /// [Opcode::Jump], but only when the accumulator holds a negative value
    JumpIfNegative,
}

impl Opcode {
    pub const ALL: [Opcode; 9] = [
        Opcode::Inbox,
        Opcode::Outbox,
        Opcode::CopyTo,
        Opcode::CopyFrom,
        Opcode::Add,
        Opcode::Sub,
        Opcode::Jump,
        Opcode::JumpIfZero,
        Opcode::JumpIfNegative,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Opcode::Inbox => "INBOX",
            Opcode::Outbox => "OUTBOX",
            Opcode::CopyTo => "COPYTO",
            Opcode::CopyFrom => "COPYFROM",
            Opcode::Add => "ADD",
            Opcode::Sub => "SUB",
            Opcode::Jump => "JUMP",
            Opcode::JumpIfZero => "JUMP_IF_ZERO",
            Opcode::JumpIfNegative => "JUMP_IF_NEGATIVE",
        }
    }

    /// Whether this opcode needs a memory cell to do anything
    pub fn takes_cell(self) -> bool {
        matches!(
            self,
            Opcode::CopyTo | Opcode::CopyFrom | Opcode::Add | Opcode::Sub
        )
    }

    /// Whether this opcode needs a target label to do anything
    pub fn takes_label(self) -> bool {
        matches!(
            self,
            Opcode::Jump | Opcode::JumpIfZero | Opcode::JumpIfNegative
        )
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown opcode `{0}`")]
pub struct UnknownOpcode(pub String);

impl FromStr for Opcode {
    type Err = UnknownOpcode;

    /// Case-insensitive, so `jump_if_zero` and `JUMP_IF_ZERO` are the same block
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Opcode::ALL
            .into_iter()
            .find(|op| op.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownOpcode(s.to_string()))
    }
}

/// A symbolic jump target
#[derive(
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    derive_more::From,
    derive_more::Display,
    derive_more::Deref,
)]
pub struct Label(String);

impl From<&str> for Label {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// An operation with exactly the operand its opcode needs
#[derive(Clone, Debug, PartialEq, Eq, Variantly)]
pub enum Op {
    Inbox,
    Outbox,
    CopyTo(Cell),
    CopyFrom(Cell),
    Add(Cell),
    Sub(Cell),
    Jump(Label),
    JumpIfZero(Label),
    JumpIfNegative(Label),
    /// A block that was placed but never given its operand.
    ///
    /// Only ever advances the instruction pointer.
    Unconfigured(Opcode),
}

impl Op {
    /// Build an [Op] from loosely typed parts, ignoring operands the opcode doesn't use.
    ///
    /// Missing operands degrade to [Op::Unconfigured] instead of failing. An empty label counts
    /// as missing.
    pub fn from_parts(opcode: Opcode, cell: Option<Cell>, target: Option<Label>) -> Op {
        let target = target.filter(|label| !label.is_empty());
        match (opcode, cell, target) {
            (Opcode::Inbox, ..) => Op::Inbox,
            (Opcode::Outbox, ..) => Op::Outbox,
            (Opcode::CopyTo, Some(cell), _) => Op::CopyTo(cell),
            (Opcode::CopyFrom, Some(cell), _) => Op::CopyFrom(cell),
            (Opcode::Add, Some(cell), _) => Op::Add(cell),
            (Opcode::Sub, Some(cell), _) => Op::Sub(cell),
            (Opcode::Jump, _, Some(label)) => Op::Jump(label),
            (Opcode::JumpIfZero, _, Some(label)) => Op::JumpIfZero(label),
            (Opcode::JumpIfNegative, _, Some(label)) => Op::JumpIfNegative(label),
            (opcode, ..) => Op::Unconfigured(opcode),
        }
    }

    pub fn opcode(&self) -> Opcode {
        match self {
            Op::Inbox => Opcode::Inbox,
            Op::Outbox => Opcode::Outbox,
            Op::CopyTo(_) => Opcode::CopyTo,
            Op::CopyFrom(_) => Opcode::CopyFrom,
            Op::Add(_) => Opcode::Add,
            Op::Sub(_) => Opcode::Sub,
            Op::Jump(_) => Opcode::Jump,
            Op::JumpIfZero(_) => Opcode::JumpIfZero,
            Op::JumpIfNegative(_) => Opcode::JumpIfNegative,
            Op::Unconfigured(opcode) => *opcode,
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::CopyTo(cell) | Op::CopyFrom(cell) | Op::Add(cell) | Op::Sub(cell) => {
                write!(f, "{} {}", self.opcode(), cell)
            }
            Op::Jump(label) | Op::JumpIfZero(label) | Op::JumpIfNegative(label) => {
                write!(f, "{} {}", self.opcode(), label)
            }
            Op::Inbox | Op::Outbox | Op::Unconfigured(_) => write!(f, "{}", self.opcode()),
        }
    }
}

/// One block of a program.
///
/// `position` orders blocks within a program; the host assigns them densely.
/// `label` marks this instruction as the target of any jump to that label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instruction {
    pub position: usize,
    pub label: Option<Label>,
    pub op: Op,
}

impl Instruction {
    pub fn new(position: usize, op: Op) -> Self {
        Self {
            position,
            label: None,
            op,
        }
    }

    pub fn labelled(mut self, label: impl Into<Label>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(label) = &self.label {
            write!(f, "{label}: ")?;
        }
        write!(f, "{}", self.op)
    }
}
