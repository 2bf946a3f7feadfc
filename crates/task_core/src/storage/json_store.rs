use crate::error::AppError;
use crate::model::Task;
use std::path::{Path, PathBuf};

pub const STORE_PATH_ENV: &str = "TASKMAN_STORE_PATH";
const STORE_FILE_NAME: &str = "data.json";

/// Result of reading the persisted snapshot. A file that fails to parse is
/// treated as disposable and replaced with an empty collection; callers can
/// observe that this happened instead of it being silent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded(Vec<Task>),
    ResetMalformed,
}

impl LoadOutcome {
    pub fn into_tasks(self) -> Vec<Task> {
        match self {
            Self::Loaded(tasks) => tasks,
            Self::ResetMalformed => Vec::new(),
        }
    }
}

pub fn store_path() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var(STORE_PATH_ENV)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| AppError::invalid_data("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata).join("taskman").join(STORE_FILE_NAME))
    } else {
        let home = std::env::var("HOME").map_err(|_| AppError::invalid_data("HOME is not set"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("taskman")
            .join(STORE_FILE_NAME))
    }
}

pub fn load_tasks(path: &Path) -> Result<LoadOutcome, AppError> {
    if !path.exists() {
        return Ok(LoadOutcome::Loaded(Vec::new()));
    }

    let content = std::fs::read_to_string(path).map_err(|err| AppError::io(err.to_string()))?;
    if content.trim().is_empty() {
        return Ok(LoadOutcome::Loaded(Vec::new()));
    }

    let tasks: Vec<Task> = match serde_json::from_str(&content) {
        Ok(tasks) => tasks,
        Err(_) => return Ok(LoadOutcome::ResetMalformed),
    };

    // Parsed data still goes through title validation; a blank title in
    // otherwise well-formed JSON is an error, not a disposable snapshot.
    for task in &tasks {
        if task.title.trim().is_empty() {
            return Err(AppError::validation(format!(
                "task {} has an empty title",
                task.id
            )));
        }
    }

    Ok(LoadOutcome::Loaded(tasks))
}

pub fn save_tasks(path: &Path, tasks: &[Task]) -> Result<(), AppError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|err| AppError::io(err.to_string()))?;
    }

    let content =
        serde_json::to_string_pretty(tasks).map_err(|err| AppError::invalid_data(err.to_string()))?;

    // Full rewrite via a sibling temp file so a crash mid-write leaves the
    // previous snapshot intact.
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    std::fs::write(&tmp, content).map_err(|err| AppError::io(err.to_string()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let permissions = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(&tmp, permissions).map_err(|err| AppError::io(err.to_string()))?;
    }

    std::fs::rename(&tmp, path).map_err(|err| AppError::io(err.to_string()))?;

    Ok(())
}
