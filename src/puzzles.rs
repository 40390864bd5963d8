use vm::Puzzle;

/// The built-in puzzles, in the order they're offered
pub fn catalog() -> Vec<Puzzle> {
    vec![
        Puzzle {
            id: "hello-world".into(),
            name: "Hello World".into(),
            description: "Copy each item from INBOX to OUTBOX".into(),
            initial_inbox: vec![1, 2, 3],
            expected_outbox: vec![1, 2, 3],
            memory_size: 5,
            min_steps: Some(9),
            hint: Some("Use INBOX and OUTBOX blocks in sequence".into()),
        },
        Puzzle {
            id: "add-one".into(),
            name: "Add One".into(),
            description: "Read a number, add 1, and output it".into(),
            initial_inbox: vec![5],
            expected_outbox: vec![6],
            memory_size: 5,
            min_steps: Some(12),
            hint: Some("Use ADD block after reading input".into()),
        },
        Puzzle {
            id: "sum-all".into(),
            name: "Sum All".into(),
            description: "Read all numbers and output their sum".into(),
            initial_inbox: vec![1, 2, 3, 4, 5],
            expected_outbox: vec![15],
            memory_size: 5,
            min_steps: Some(30),
            hint: Some("You'll need a loop using JUMP blocks".into()),
        },
        Puzzle {
            id: "negate".into(),
            name: "Negate".into(),
            description: "Read a number and output its negative".into(),
            initial_inbox: vec![7],
            expected_outbox: vec![-7],
            memory_size: 5,
            min_steps: Some(15),
            hint: Some("SUB from zero".into()),
        },
    ]
}

pub fn get_puzzle_by_id(id: &str) -> Option<Puzzle> {
    catalog().into_iter().find(|puzzle| puzzle.id == id)
}

#[cfg(test)]
mod tests {
    use super::{catalog, get_puzzle_by_id};
    use itertools::Itertools;

    #[test]
    fn test_ids_are_unique() {
        assert!(catalog().iter().map(|puzzle| &puzzle.id).all_unique());
    }

    #[test]
    fn test_lookup() {
        let puzzle = get_puzzle_by_id("negate").unwrap();
        assert_eq!(puzzle.expected_outbox, vec![-7]);
        assert!(get_puzzle_by_id("multiply").is_none());
    }
}
