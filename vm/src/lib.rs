//! The block program executor.
//!
//! A [Vm] takes a list of [Instruction]s and runs them against a [Puzzle]'s inbox, one
//! instruction at a time, until the inbox runs dry, the program runs off its end or the step
//! budget is spent.

pub mod error;
pub mod interpret;
pub mod memory;
pub mod op;
pub mod program;
pub mod puzzle;
pub mod state;

pub use error::VmError;
pub use interpret::{Vm, MAX_STEPS};
pub use memory::Memory;
pub use op::{Cell, Instruction, Label, Op, Opcode};
pub use puzzle::Puzzle;
pub use state::{HaltReason, VmState};
