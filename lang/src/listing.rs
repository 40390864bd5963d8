use itertools::Itertools;
use vm::Instruction;

/// Write instructions back out in the text form [crate::parse::parse] reads
pub fn listing(instructions: &[Instruction]) -> String {
    let width = instructions
        .iter()
        .filter_map(|instr| instr.label.as_ref())
        .map(|label| label.len() + 2)
        .max()
        .unwrap_or(0);

    instructions
        .iter()
        .map(|instr| {
            let label = instr
                .label
                .as_ref()
                .map(|label| format!("{label}: "))
                .unwrap_or_default();
            format!("{label:width$}{}", instr.op)
        })
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::listing;
    use crate::compile::compile;

    #[test]
    fn test_listing_aligns_labels() {
        let program = compile("loop: INBOX OUTBOX JUMP loop").unwrap();
        assert_eq!(listing(&program), "loop: INBOX\n      OUTBOX\n      JUMP loop");
    }

    #[test]
    fn test_listing_reads_back() {
        let src = "start: COPYFROM 3\nSUB 1\nJUMP_IF_ZERO start\nADD\nOUTBOX";
        let program = compile(src).unwrap();
        assert_eq!(compile(&listing(&program)).unwrap(), program);
    }
}
