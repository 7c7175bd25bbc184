use crate::task::{Status, Task};

/// Distinct non-empty board names, in order of first appearance.
pub fn board_names(tasks: &[Task]) -> Vec<String> {
    let mut boards: Vec<String> = Vec::new();
    for task in tasks {
        if !task.board.is_empty() && !boards.contains(&task.board) {
            boards.push(task.board.clone());
        }
    }
    boards
}

pub fn tasks_in_column<'a>(tasks: &'a [Task], board: &str, status: Status) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|t| t.board == board && t.status == status)
        .collect()
}

/// The three columns of one board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    pub board: String,
    pub columns: [Vec<Task>; 3],
}

impl BoardView {
    pub fn build(tasks: &[Task], board: &str) -> Self {
        let column = |status: Status| -> Vec<Task> {
            tasks_in_column(tasks, board, status)
                .into_iter()
                .cloned()
                .collect()
        };
        Self {
            board: board.to_string(),
            columns: Status::ALL.map(column),
        }
    }

    pub fn empty() -> Self {
        Self {
            board: String::new(),
            columns: Default::default(),
        }
    }

    pub fn column(&self, status: Status) -> &[Task] {
        &self.columns[status.index()]
    }

    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(Vec::is_empty)
    }
}
