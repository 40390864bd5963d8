use std::collections::VecDeque;

use crate::memory::Memory;

/// Why the machine stopped
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HaltReason {
    /// An INBOX found nothing left to take. The usual way a looping program ends.
    InboxEmpty,
    /// The instruction pointer ran past the last instruction
    EndOfProgram,
    /// The step budget was used up
    StepBudget,
    /// An instruction failed, see [crate::error::VmError]
    Fault,
}

/// Everything that changes while a program runs.
///
/// [crate::interpret::Vm::state] hands out owned copies of this, so a host can hold on to one
/// while the machine keeps going.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VmState {
    /// Index into the sorted program of the next instruction.
    ///
    /// Advances by one after each instruction unless a jump redirects it.
    pub pc: usize,
    /// Instructions executed since the last reset
    pub step_count: usize,
    /// Set once the machine halts, and only cleared by a reset
    pub halt: Option<HaltReason>,
    /// The "current value" register
    pub accumulator: Option<i64>,
    pub inbox: VecDeque<i64>,
    pub outbox: Vec<i64>,
    pub memory: Memory,
}

impl VmState {
    pub fn new(inbox: &[i64]) -> Self {
        Self {
            inbox: inbox.iter().copied().collect(),
            ..Default::default()
        }
    }

    pub fn halted(&self) -> bool {
        self.halt.is_some()
    }
}
