use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List all tasks
    ///
    /// Example: taskman list
    List,
    /// Add a new task
    ///
    /// Example: taskman add "Buy milk" -c Groceries --due 2026-01-15
    Add {
        title: String,
        #[arg(short, long, default_value = "")]
        description: String,
        #[arg(short, long, default_value = "")]
        category: String,
        /// Due date (YYYY-MM-DD)
        #[arg(long, default_value = "")]
        due: String,
        /// One of low, middle, high
        #[arg(short, long, default_value = "middle")]
        priority: String,
    },
    /// Mark a task as completed
    ///
    /// Example: taskman done 1
    Done {
        id: u64,
    },
    /// Delete a task
    ///
    /// Example: taskman delete 1
    Delete {
        id: u64,
    },
    /// Search tasks by keyword, category, or completion status
    ///
    /// Example: taskman search -k milk
    /// Example: taskman search -c Groceries --completed false
    Search {
        #[arg(short, long)]
        keyword: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(long)]
        completed: Option<bool>,
    },
}
