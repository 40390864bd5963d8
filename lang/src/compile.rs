use eyre::eyre;
use tracing::instrument;
use vm::Instruction;

use crate::{
    assemble::assemble,
    parse::{parse, report, report_parse_errors},
};

/// Parse and assemble a program, printing diagnostics for anything wrong with it
#[instrument(skip(src))]
pub fn compile(src: &str) -> Result<Vec<Instruction>, eyre::Report> {
    let stmts = match parse(src) {
        Ok(stmts) => stmts,
        Err(errs) => {
            report_parse_errors(src, &errs);
            return Err(eyre!("program has {} syntax error(s)", errs.len()));
        }
    };

    assemble(&stmts).map_err(|errs| {
        report(src, errs.iter().map(|err| (err.span(), err.to_string())));
        eyre!("program has {} malformed block(s)", errs.len())
    })
}

#[cfg(test)]
mod tests {
    use vm::{Op, Puzzle, Vm};

    use super::*;

    #[test]
    fn test_compile_and_run() {
        let program = compile(
            "
            # double every input
            loop: INBOX
                  COPYTO 0
                  ADD 0
                  OUTBOX
                  JUMP loop
            ",
        )
        .unwrap();
        assert_eq!(program[4].op, Op::Jump("loop".into()));

        let mut vm = Vm::new(&Puzzle::from_io(vec![1, -4, 10], vec![2, -8, 20]));
        vm.install_program(program);
        vm.run().unwrap();
        assert_eq!(vm.output(), vec![2, -8, 20]);
    }

    #[test]
    fn test_compile_errors() {
        assert!(compile("INBOX OUTBOX JUMP 4").is_err());
        assert!(compile("INBOX ?").is_err());
    }
}
