use clap::Parser;
use std::io::{self, BufRead, Write};
use tabled::{Table, Tabled};
use task_cli::cli::{Cli, Command};
use task_core::config;
use task_core::error::AppError;
use task_core::model::Task;
use task_core::task_store::{SearchFilter, TaskStore};

fn status_label(completed: bool) -> &'static str {
    if completed { "completed" } else { "not completed" }
}

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Status")]
    status: &'static str,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Due")]
    due_date: String,
    #[tabled(rename = "Priority")]
    priority: String,
}

impl From<&Task> for TaskRow {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            status: status_label(task.completed),
            category: task.category.clone(),
            due_date: task.due_date.clone(),
            priority: task.priority.clone(),
        }
    }
}

fn print_tasks_table(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No tasks.");
        return;
    }

    let rows: Vec<TaskRow> = tasks.iter().map(TaskRow::from).collect();
    println!("{}", Table::new(rows));
}

fn print_tasks_json(tasks: &[Task]) -> Result<(), AppError> {
    let payload =
        serde_json::to_string(tasks).map_err(|err| AppError::invalid_data(err.to_string()))?;
    println!("{payload}");
    Ok(())
}

fn print_task_json(task: &Task) {
    let json = serde_json::json!({
        "id": task.id,
        "title": task.title,
        "description": task.description,
        "category": task.category,
        "due_date": task.due_date,
        "priority": task.priority,
        "completed": task.completed,
    });
    println!("{json}");
}

fn print_search_results(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No matching tasks.");
        return;
    }

    for task in tasks {
        println!("[{}] {} - {}", task.id, task.title, status_label(task.completed));
    }
}

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::validation(message)
}

fn open_store() -> Result<TaskStore, AppError> {
    let config_load = config::load_config_with_fallback();
    if let Some(err) = config_load.error.as_ref() {
        eprintln!("WARNING: {err}");
    }

    let path = config::resolve_store_path(&config_load.config)?;
    let store = TaskStore::open(&path)?;
    if store.recovered_from_malformed() {
        eprintln!("WARNING: task file was not valid JSON; starting with an empty list");
    }

    Ok(store)
}

fn run_command(cli: Cli) -> Result<(), AppError> {
    let mut store = open_store()?;

    match cli.command {
        Command::List => {
            if cli.json {
                print_tasks_json(store.tasks())?;
            } else {
                print_tasks_table(store.tasks());
            }
        }
        Command::Add {
            title,
            description,
            category,
            due,
            priority,
        } => {
            let task = store.add(&title, &description, &category, &due, &priority)?;
            if cli.json {
                print_task_json(&task);
            } else {
                println!("Added task: {} ({})", task.title, task.id);
            }
        }
        Command::Done { id } => {
            let task = store.complete(id)?;
            if cli.json {
                print_task_json(&task);
            } else {
                println!("Completed task: {} ({})", task.title, task.id);
            }
        }
        Command::Delete { id } => {
            let task = store.delete(id)?;
            if cli.json {
                print_task_json(&task);
            } else {
                println!("Deleted task: {} ({})", task.title, task.id);
            }
        }
        Command::Search {
            keyword,
            category,
            completed,
        } => {
            let filter = SearchFilter {
                keyword,
                category,
                completed,
            };
            let results = store.search(&filter);
            if cli.json {
                print_tasks_json(&results)?;
            } else {
                print_search_results(&results);
            }
        }
    }

    Ok(())
}

fn prompt(label: &str, input: &mut impl BufRead) -> Result<Option<String>, AppError> {
    print!("{label}");
    io::stdout()
        .flush()
        .map_err(|err| AppError::io(err.to_string()))?;

    let mut line = String::new();
    let bytes = input
        .read_line(&mut line)
        .map_err(|err| AppError::io(err.to_string()))?;
    if bytes == 0 {
        return Ok(None);
    }

    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn prompt_id(label: &str, input: &mut impl BufRead) -> Result<Option<u64>, AppError> {
    let Some(raw) = prompt(label, input)? else {
        return Ok(None);
    };
    let id = raw
        .trim()
        .parse::<u64>()
        .map_err(|_| AppError::validation("id must be a number"))?;
    Ok(Some(id))
}

fn none_if_blank(value: String) -> Option<String> {
    if value.trim().is_empty() { None } else { Some(value) }
}

fn menu_add(store: &mut TaskStore, input: &mut impl BufRead) -> Result<(), AppError> {
    let Some(title) = prompt("Task title: ", input)? else {
        return Ok(());
    };
    let Some(description) = prompt("Task description: ", input)? else {
        return Ok(());
    };
    let Some(category) = prompt("Task category: ", input)? else {
        return Ok(());
    };
    let Some(due_date) = prompt("Due date (YYYY-MM-DD): ", input)? else {
        return Ok(());
    };
    let Some(priority) = prompt("Priority (low, middle, high): ", input)? else {
        return Ok(());
    };

    let task = store.add(&title, &description, &category, &due_date, &priority)?;
    println!("Added task: {} ({})", task.title, task.id);
    Ok(())
}

fn menu_search(store: &TaskStore, input: &mut impl BufRead) -> Result<(), AppError> {
    let Some(keyword) = prompt("Keyword (leave blank to skip): ", input)? else {
        return Ok(());
    };
    let Some(category) = prompt("Category (leave blank to skip): ", input)? else {
        return Ok(());
    };
    let Some(status) = prompt("Status (completed/not completed, leave blank to skip): ", input)?
    else {
        return Ok(());
    };

    let completed = match status.trim().to_lowercase().as_str() {
        "completed" => Some(true),
        "not completed" => Some(false),
        _ => None,
    };

    let filter = SearchFilter {
        keyword: none_if_blank(keyword),
        category: none_if_blank(category),
        completed,
    };
    print_search_results(&store.search(&filter));
    Ok(())
}

fn run_menu() -> Result<(), AppError> {
    let mut store = open_store()?;
    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        println!();
        println!("Task manager");
        println!("1. View tasks");
        println!("2. Add task");
        println!("3. Complete task");
        println!("4. Delete task");
        println!("5. Search tasks");
        println!("6. Exit");

        let Some(choice) = prompt("Choose an option: ", &mut input)? else {
            break;
        };

        let result = match choice.trim() {
            "" => continue,
            "1" => {
                print_tasks_table(store.tasks());
                Ok(())
            }
            "2" => menu_add(&mut store, &mut input),
            "3" => match prompt_id("Task id to complete: ", &mut input) {
                Ok(Some(id)) => store.complete(id).map(|task| {
                    println!("Completed task: {} ({})", task.title, task.id);
                }),
                Ok(None) => break,
                Err(err) => Err(err),
            },
            "4" => match prompt_id("Task id to delete: ", &mut input) {
                Ok(Some(id)) => store.delete(id).map(|task| {
                    println!("Deleted task: {} ({})", task.title, task.id);
                }),
                Ok(None) => break,
                Err(err) => Err(err),
            },
            "5" => menu_search(&store, &mut input),
            "6" => break,
            _ => {
                println!("Invalid choice, try again.");
                Ok(())
            }
        };

        if let Err(err) = result {
            eprintln!("ERROR: {err}");
        }
    }

    Ok(())
}

fn main() {
    let mut args = std::env::args_os();
    args.next();
    if args.next().is_none() {
        if let Err(err) = run_menu() {
            eprintln!("ERROR: {err}");
            std::process::exit(1);
        }
        return;
    }

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            if err.use_stderr() {
                eprintln!("ERROR: {}", normalize_parse_error(err));
                std::process::exit(1);
            }
            // --help / --version render through clap directly.
            err.print().ok();
            return;
        }
    };

    if let Err(err) = run_command(cli) {
        eprintln!("ERROR: {err}");
        std::process::exit(1);
    }
}
