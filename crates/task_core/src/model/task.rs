use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single to-do item. Field names double as the on-disk JSON keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub due_date: String,
    pub priority: String,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Builds a task with `completed = false`. The id is a placeholder until
    /// the store assigns one; only the store constructs tasks.
    pub fn new(
        title: &str,
        description: &str,
        category: &str,
        due_date: &str,
        priority: &str,
    ) -> Result<Self, AppError> {
        if title.trim().is_empty() {
            return Err(AppError::validation("title must not be empty"));
        }

        Ok(Self {
            id: 0,
            title: title.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            due_date: due_date.to_string(),
            priority: priority.to_string(),
            completed: false,
        })
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} ({}) [{}] - Due: {}",
            self.title, self.description, self.category, self.priority, self.due_date
        )
    }
}
