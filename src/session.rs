use itertools::Itertools;
use thiserror::Error;
use tracing::{info, instrument};
use vm::{HaltReason, Instruction, Puzzle, Vm, VmError, VmState};

use crate::puzzles::get_puzzle_by_id;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("there's no puzzle called `{0}`")]
    UnknownPuzzle(String),
    #[error(transparent)]
    Vm(#[from] VmError),
}

/// How a run went, in terms a player cares about
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutionResult {
    pub success: bool,
    pub message: String,
    pub steps_taken: usize,
    pub memory_used: usize,
}

/// One puzzle being played: the blocks the player has placed and a machine to run them on.
///
/// The program is reinstalled before every step or run, so edits between steps take effect
/// from wherever the pointer is.
#[derive(derive_more::Debug)]
pub struct Session {
    puzzle: Puzzle,
    #[debug(ignore)]
    program: Vec<Instruction>,
    vm: Vm,
}

impl Session {
    pub fn new(puzzle: Puzzle) -> Self {
        let vm = Vm::new(&puzzle);
        Self {
            puzzle,
            program: vec![],
            vm,
        }
    }

    pub fn from_id(id: &str) -> Result<Self, SessionError> {
        get_puzzle_by_id(id)
            .map(Self::new)
            .ok_or_else(|| SessionError::UnknownPuzzle(id.to_string()))
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.vm = self.vm.with_max_steps(max_steps);
        self
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn set_program(&mut self, program: Vec<Instruction>) {
        self.program = program;
    }

    pub fn program(&self) -> &[Instruction] {
        &self.program
    }

    pub fn step(&mut self) -> Result<bool, SessionError> {
        self.vm.install_program(self.program.clone());
        Ok(self.vm.step()?)
    }

    #[instrument(skip(self), fields(puzzle = %self.puzzle.id))]
    pub fn run(&mut self) -> Result<bool, SessionError> {
        self.vm.install_program(self.program.clone());
        let unfinished = self.vm.run()?;
        info!(steps = self.vm.state().step_count, correct = self.is_correct(), "run finished");
        Ok(unfinished)
    }

    pub fn reset(&mut self) {
        self.vm.reset(&self.puzzle);
    }

    pub fn state(&self) -> VmState {
        self.vm.state()
    }

    pub fn is_halted(&self) -> bool {
        self.vm.is_halted()
    }

    /// The instruction the machine will execute next, for highlighting
    pub fn current_instruction(&self) -> Option<&Instruction> {
        self.vm.current_instruction()
    }

    pub fn is_correct(&self) -> bool {
        self.puzzle.is_solved_by(&self.vm.output())
    }

    /// The puzzle's memory grid, unset cells shown as 0
    pub fn memory_cells(&self) -> Vec<i64> {
        self.vm.state().memory.cells(self.puzzle.memory_size)
    }

    pub fn result(&self) -> ExecutionResult {
        let state = self.vm.state();
        let success = self.is_correct() && !state.outbox.is_empty();
        let message = if success {
            "Correct output!".to_string()
        } else {
            match state.halt {
                None => "Still running".to_string(),
                Some(HaltReason::StepBudget) => {
                    format!("Gave up after {} steps", state.step_count)
                }
                Some(HaltReason::Fault) => "Stopped on an error".to_string(),
                Some(HaltReason::InboxEmpty | HaltReason::EndOfProgram) => format!(
                    "Expected [{}] but got [{}]",
                    self.puzzle.expected_outbox.iter().join(", "),
                    state.outbox.iter().join(", ")
                ),
            }
        };
        ExecutionResult {
            success,
            message,
            steps_taken: state.step_count,
            memory_used: state.memory.used(),
        }
    }
}

#[cfg(test)]
mod tests {
    use vm::{HaltReason, Op};

    use super::{Session, SessionError};

    fn session(id: &str, src: &str) -> Session {
        let mut session = Session::from_id(id).unwrap();
        session.set_program(lang::compile(src).unwrap());
        session
    }

    #[test]
    fn test_hello_world() {
        let mut session = session("hello-world", "loop: INBOX OUTBOX JUMP loop");
        assert!(!session.run().unwrap());

        let result = session.result();
        assert!(result.success);
        assert_eq!(result.message, "Correct output!");
        assert_eq!(result.steps_taken, 9);
        assert_eq!(result.memory_used, 0);
    }

    #[test]
    fn test_sum_all_unrolled() {
        let mut session = session(
            "sum-all",
            "INBOX COPYTO 0
             INBOX ADD 0 COPYTO 0
             INBOX ADD 0 COPYTO 0
             INBOX ADD 0 COPYTO 0
             INBOX ADD 0
             OUTBOX",
        );
        session.run().unwrap();
        assert!(session.result().success);
        assert_eq!(session.memory_cells(), vec![10, 0, 0, 0, 0]);
    }

    #[test]
    fn test_negate() {
        let mut session = session("negate", "INBOX COPYTO 0 SUB 0 SUB 0 OUTBOX");
        session.run().unwrap();
        let result = session.result();
        assert!(result.success);
        assert_eq!(result.memory_used, 1);
    }

    #[test]
    fn test_wrong_output() {
        let mut session = session("add-one", "INBOX OUTBOX");
        session.run().unwrap();
        assert!(!session.is_correct());
        let result = session.result();
        assert!(!result.success);
        assert_eq!(result.message, "Expected [6] but got [5]");
    }

    #[test]
    fn test_budget_message() {
        let mut session = session("hello-world", "spin: JUMP spin").with_max_steps(50);
        assert!(session.run().unwrap());
        assert_eq!(session.result().message, "Still running");
        assert!(!session.step().unwrap());
        assert_eq!(session.state().halt, Some(HaltReason::StepBudget));
        assert_eq!(session.result().message, "Gave up after 50 steps");
    }

    #[test]
    fn test_editing_between_steps() {
        let mut session = session("hello-world", "INBOX");
        session.step().unwrap();
        assert_eq!(session.current_instruction(), None);

        let mut program = session.program().to_vec();
        program.extend(lang::compile("INBOX OUTBOX").unwrap().into_iter().map(|mut instr| {
            instr.position += 1;
            instr
        }));
        session.set_program(program);

        assert_eq!(session.current_instruction(), None, "not installed until the next step");
        session.step().unwrap();
        assert_eq!(session.current_instruction().map(|i| &i.op), Some(&Op::Outbox));
        session.run().unwrap();
        assert_eq!(session.state().outbox, vec![2]);
    }

    #[test]
    fn test_reset() {
        let mut session = session("hello-world", "loop: INBOX OUTBOX JUMP loop");
        session.run().unwrap();
        assert!(session.is_halted());

        session.reset();
        assert!(!session.is_halted());
        assert_eq!(session.state().inbox, vec![1, 2, 3]);
        assert_eq!(session.program().len(), 3);
        assert!(!session.result().success);
    }

    #[test]
    fn test_unknown_puzzle() {
        assert!(matches!(
            Session::from_id("multiply"),
            Err(SessionError::UnknownPuzzle(id)) if id == "multiply"
        ));
    }
}
