pub mod puzzles;
pub mod session;
pub mod trace;

pub use puzzles::{catalog, get_puzzle_by_id};
pub use session::{ExecutionResult, Session, SessionError};
