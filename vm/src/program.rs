use std::collections::HashMap;

use crate::op::{Instruction, Label};

/// An installed program: instructions in address order plus a label table.
///
/// Addresses are indices into the sorted list. The label table maps each label to the
/// first instruction carrying it and is rebuilt whenever the list is replaced.
#[derive(Clone, Debug, Default)]
pub struct Program {
    instructions: Vec<Instruction>,
    labels: HashMap<Label, usize>,
}

impl Program {
    pub fn new(mut instructions: Vec<Instruction>) -> Self {
        // stable, so equal positions keep the host's order
        instructions.sort_by_key(|instr| instr.position);

        let mut labels = HashMap::new();
        for (address, instr) in instructions.iter().enumerate() {
            // an empty label is no label
            if let Some(label) = instr.label.as_ref().filter(|label| !label.is_empty()) {
                labels.entry(label.clone()).or_insert(address);
            }
        }

        Self {
            instructions,
            labels,
        }
    }

    pub fn get(&self, address: usize) -> Option<&Instruction> {
        self.instructions.get(address)
    }

    /// Address of the first instruction labelled `label`
    pub fn resolve(&self, label: &Label) -> Option<usize> {
        self.labels.get(label).copied()
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }
}

#[cfg(test)]
mod tests {
    use super::Program;
    use crate::op::{Instruction, Op};

    #[test]
    fn test_sorts_by_position_stably() {
        let program = Program::new(vec![
            Instruction::new(2, Op::Outbox),
            Instruction::new(0, Op::Inbox).labelled("a"),
            Instruction::new(0, Op::Inbox).labelled("b"),
            Instruction::new(1, Op::CopyTo(0)),
        ]);
        let labels: Vec<_> = program
            .instructions()
            .iter()
            .map(|instr| instr.label.as_ref().map(|l| l.to_string()))
            .collect();
        assert_eq!(
            labels,
            vec![Some("a".into()), Some("b".into()), None, None]
        );
        assert_eq!(program.get(3).map(|i| &i.op), Some(&Op::Outbox));
    }

    #[test]
    fn test_duplicate_labels_resolve_to_first() {
        let program = Program::new(vec![
            Instruction::new(0, Op::Inbox),
            Instruction::new(1, Op::Outbox).labelled("x"),
            Instruction::new(2, Op::Inbox).labelled("x"),
        ]);
        assert_eq!(program.resolve(&"x".into()), Some(1));
        assert_eq!(program.resolve(&"y".into()), None);
    }

    #[test]
    fn test_empty_label_is_not_an_anchor() {
        let program = Program::new(vec![
            Instruction::new(0, Op::Outbox),
            Instruction::new(1, Op::Outbox).labelled(""),
        ]);
        assert_eq!(program.resolve(&"".into()), None);
    }

    #[test]
    fn test_jump_target_is_not_an_anchor() {
        let program = Program::new(vec![Instruction::new(0, Op::Jump("x".into()))]);
        assert_eq!(program.resolve(&"x".into()), None);
    }
}
