use crate::error::AppError;
use crate::model::Task;
use crate::storage::json_store::{self, LoadOutcome};
use std::path::{Path, PathBuf};

/// Optional filters for [`TaskStore::search`]. Filters left as `None` are
/// skipped; the rest are applied in sequence over insertion order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    pub keyword: Option<String>,
    pub category: Option<String>,
    pub completed: Option<bool>,
}

/// In-memory owner of the task collection. Loaded once from the snapshot
/// file at open; every mutation rewrites the file in full.
#[derive(Debug)]
pub struct TaskStore {
    path: PathBuf,
    tasks: Vec<Task>,
    next_id: u64,
    recovered_from_malformed: bool,
}

impl TaskStore {
    pub fn open(path: &Path) -> Result<Self, AppError> {
        let outcome = json_store::load_tasks(path)?;
        let recovered_from_malformed = matches!(outcome, LoadOutcome::ResetMalformed);
        let tasks = outcome.into_tasks();
        let next_id = tasks.iter().map(|task| task.id).max().unwrap_or(0) + 1;

        Ok(Self {
            path: path.to_path_buf(),
            tasks,
            next_id,
            recovered_from_malformed,
        })
    }

    /// True when open() found a file it could not parse and discarded it.
    pub fn recovered_from_malformed(&self) -> bool {
        self.recovered_from_malformed
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn add(
        &mut self,
        title: &str,
        description: &str,
        category: &str,
        due_date: &str,
        priority: &str,
    ) -> Result<Task, AppError> {
        if self.tasks.iter().any(|task| task.title == title) {
            return Err(AppError::duplicate_title(format!(
                "a task titled '{title}' already exists"
            )));
        }

        let mut task = Task::new(title, description, category, due_date, priority)?;
        task.id = self.next_id;
        self.next_id += 1;

        self.tasks.push(task.clone());
        self.flush()?;

        Ok(task)
    }

    pub fn complete(&mut self, id: u64) -> Result<Task, AppError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or_else(|| AppError::not_found(format!("no task with id {id}")))?;

        task.completed = true;
        let completed = task.clone();
        self.flush()?;

        Ok(completed)
    }

    pub fn delete(&mut self, id: u64) -> Result<Task, AppError> {
        let index = self
            .tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or_else(|| AppError::not_found(format!("no task with id {id}")))?;

        let removed = self.tasks.remove(index);
        self.flush()?;

        Ok(removed)
    }

    pub fn search(&self, filter: &SearchFilter) -> Vec<Task> {
        let mut results: Vec<&Task> = self.tasks.iter().collect();

        if let Some(keyword) = filter.keyword.as_deref() {
            let needle = keyword.to_lowercase();
            results.retain(|task| {
                task.title.to_lowercase().contains(&needle)
                    || task.description.to_lowercase().contains(&needle)
            });
        }

        if let Some(category) = filter.category.as_deref() {
            results.retain(|task| task.category == category);
        }

        if let Some(completed) = filter.completed {
            results.retain(|task| task.completed == completed);
        }

        results.into_iter().cloned().collect()
    }

    fn flush(&self) -> Result<(), AppError> {
        json_store::save_tasks(&self.path, &self.tasks)
    }
}
