use crate::{
    error::VmError,
    op::{Instruction, Label, Op, Opcode},
    program::Program,
    puzzle::Puzzle,
    state::{HaltReason, VmState},
};
use tracing::{debug, instrument, trace, warn};

/// Default step budget for a single run
pub const MAX_STEPS: usize = 10_000;

#[derive(Clone, Debug)]
pub struct Vm {
    /// The maximum number of instructions to run.
    ///
    /// When this is reached the VM halts so a program that never reads past the end of its inbox
    /// can't spin forever.
    max_steps: usize,
    /// The puzzle's inbox as it was when installed, for [Vm::restart]
    initial_inbox: Vec<i64>,
    program: Program,
    state: VmState,
}

impl Vm {
    pub fn new(puzzle: &Puzzle) -> Self {
        Self {
            max_steps: MAX_STEPS,
            initial_inbox: puzzle.initial_inbox.clone(),
            program: Program::default(),
            state: VmState::new(&puzzle.initial_inbox),
        }
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Replace the program, ordering it by position.
    ///
    /// Execution state is left alone: the next step continues from the current pointer.
    pub fn install_program(&mut self, instructions: Vec<Instruction>) {
        self.program = Program::new(instructions);
        debug!(len = self.program.len(), "installed program");
    }

    /// Step until the machine halts or the budget runs out.
    ///
    /// Returns `true` only when the loop stopped without the machine being halted, which in
    /// practice means the step budget was reached. Whether the puzzle was solved is a separate
    /// question, see [Puzzle::is_solved_by].
    pub fn run(&mut self) -> Result<bool, VmError> {
        while !self.state.halted() && self.state.step_count < self.max_steps {
            if !self.step()? {
                break;
            }
        }
        Ok(!self.state.halted())
    }

    /// Execute the instruction at the pointer.
    ///
    /// Returns whether an instruction actually executed. On error the machine is halted before
    /// the error is handed back.
    #[instrument(skip(self))]
    pub fn step(&mut self) -> Result<bool, VmError> {
        #[cfg(feature = "tracing")]
        {
            tracy_client::plot!("PC", self.state.pc as f64);
            tracy_client::plot!("step_count", self.state.step_count as f64);
        }

        if self.state.halted() {
            return Ok(false);
        }
        if self.state.step_count >= self.max_steps {
            self.halt(HaltReason::StepBudget);
            return Ok(false);
        }
        let Some(instr) = self.program.get(self.state.pc) else {
            self.halt(HaltReason::EndOfProgram);
            return Ok(false);
        };

        trace!(pc = self.state.pc, %instr, "executing");
        match Self::run_op(&mut self.state, &self.program, &instr.op) {
            Ok(None) => {
                self.state.step_count += 1;
                Ok(true)
            }
            Ok(Some(reason)) => {
                self.halt(reason);
                Ok(false)
            }
            Err(err) => {
                self.halt(HaltReason::Fault);
                Err(err)
            }
        }
    }

    /// Apply `op` to the state, moving the pointer on.
    ///
    /// Returns a halt reason instead if the op can't execute at all.
    fn run_op(
        state: &mut VmState,
        program: &Program,
        op: &Op,
    ) -> Result<Option<HaltReason>, VmError> {
        let pc = state.pc;
        let mut next = pc + 1;
        match op {
            Op::Inbox => match state.inbox.pop_front() {
                Some(value) => state.accumulator = Some(value),
                None => return Ok(Some(HaltReason::InboxEmpty)),
            },
            Op::Outbox => {
                if let Some(value) = state.accumulator.take() {
                    state.outbox.push(value);
                }
            }
            Op::CopyTo(cell) => {
                if let Some(value) = state.accumulator {
                    state.memory.set(*cell, value);
                }
            }
            Op::CopyFrom(cell) => {
                state.accumulator = Some(state.memory.get(*cell));
            }
            Op::Add(cell) => {
                if let Some(lhs) = state.accumulator {
                    let rhs = state.memory.get(*cell);
                    let sum = lhs.checked_add(rhs).ok_or(VmError::Overflow {
                        op: Opcode::Add,
                        pc,
                        lhs,
                        rhs,
                    })?;
                    state.accumulator = Some(sum);
                }
            }
            Op::Sub(cell) => {
                if let Some(lhs) = state.accumulator {
                    let rhs = state.memory.get(*cell);
                    let difference = lhs.checked_sub(rhs).ok_or(VmError::Overflow {
                        op: Opcode::Sub,
                        pc,
                        lhs,
                        rhs,
                    })?;
                    state.accumulator = Some(difference);
                }
            }
            Op::Jump(label) => {
                next = Self::jump_target(program, label, pc);
            }
            Op::JumpIfZero(label) => {
                // an empty accumulator is not zero
                if state.accumulator == Some(0) {
                    next = Self::jump_target(program, label, pc);
                }
            }
            Op::JumpIfNegative(label) => {
                if state.accumulator.is_some_and(|value| value < 0) {
                    next = Self::jump_target(program, label, pc);
                }
            }
            Op::Unconfigured(opcode) => {
                trace!(pc, %opcode, "skipping unconfigured block");
            }
        }
        state.pc = next;
        Ok(None)
    }

    /// Where a jump from `pc` to `label` lands. Unknown labels fall through to the next instruction.
    fn jump_target(program: &Program, label: &Label, pc: usize) -> usize {
        program.resolve(label).unwrap_or_else(|| {
            warn!(pc, %label, "no instruction carries this label, falling through");
            pc + 1
        })
    }

    fn halt(&mut self, reason: HaltReason) {
        debug!(
            ?reason,
            pc = self.state.pc,
            step_count = self.state.step_count,
            "halted"
        );
        self.state.halt = Some(reason);
    }

    /// Start a fresh run of `puzzle`, keeping the installed program
    pub fn reset(&mut self, puzzle: &Puzzle) {
        self.initial_inbox = puzzle.initial_inbox.clone();
        self.restart();
    }

    /// Start a fresh run against the inbox of the puzzle last installed
    pub fn restart(&mut self) {
        self.state = VmState::new(&self.initial_inbox);
    }

    /// An owned copy of the execution state
    pub fn state(&self) -> VmState {
        self.state.clone()
    }

    pub fn is_halted(&self) -> bool {
        self.state.halted()
    }

    pub fn output(&self) -> Vec<i64> {
        self.state.outbox.clone()
    }

    pub fn program(&self) -> &[Instruction] {
        self.program.instructions()
    }

    /// The instruction the pointer is on, if it's still inside the program
    pub fn current_instruction(&self) -> Option<&Instruction> {
        self.program.get(self.state.pc)
    }
}
