/// A problem definition: turn `initial_inbox` into `expected_outbox`.
///
/// `memory_size`, `min_steps` and `hint` are only there for display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Puzzle {
    pub id: String,
    pub name: String,
    pub description: String,
    pub initial_inbox: Vec<i64>,
    pub expected_outbox: Vec<i64>,
    pub memory_size: usize,
    pub min_steps: Option<usize>,
    pub hint: Option<String>,
}

impl Puzzle {
    /// A bare puzzle with no display text, handy for driving the [crate::interpret::Vm] directly
    pub fn from_io(initial_inbox: Vec<i64>, expected_outbox: Vec<i64>) -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            description: String::new(),
            initial_inbox,
            expected_outbox,
            memory_size: 0,
            min_steps: None,
            hint: None,
        }
    }

    /// Whether `outbox` is exactly the expected output, in order and length
    pub fn is_solved_by(&self, outbox: &[i64]) -> bool {
        self.expected_outbox == outbox
    }
}
