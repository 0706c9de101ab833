use std::collections::BTreeSet;

/// Session-scoped record of what has already been played.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Progress {
    completed_quizzes: BTreeSet<String>,
}

impl Progress {
    pub fn mark_completed(&mut self, quiz_id: &str) {
        self.completed_quizzes.insert(quiz_id.to_string());
    }

    pub fn is_completed(&self, quiz_id: &str) -> bool {
        self.completed_quizzes.contains(quiz_id)
    }

    pub fn reset(&mut self) {
        self.completed_quizzes.clear();
    }
}
