//! A text form for block programs.
//!
//! ```text
//! loop: INBOX
//!       COPYTO 0
//!       ADD 0
//!       OUTBOX
//!       JUMP loop
//! ```

pub mod assemble;
pub mod compile;
pub mod listing;
pub mod parse;

pub use compile::compile;
pub use listing::listing;
