use std::path::PathBuf;

use clap::Parser;

const DEFAULT_DATABASE_FILE: &str = "todos.db";

/// Todo API server backed by SQLite
#[derive(Parser, Debug, Clone)]
#[command(name = "todo-server")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Host address to bind the server to
    #[arg(long, short = 'H', default_value = "0.0.0.0", env = "HOST")]
    pub host: String,

    /// Port to listen on
    #[arg(long, short, default_value = "3000", env = "PORT")]
    pub port: u16,

    /// SQLite database file (defaults to todos.db next to the executable)
    #[arg(long, env = "TODO_DB_PATH")]
    pub database: Option<PathBuf>,

    /// Exit at startup if the database cannot be opened, instead of serving
    /// every request with a 500
    #[arg(long, env = "TODO_FAIL_FAST")]
    pub fail_fast: bool,
}

impl Config {
    pub fn database_path(&self) -> PathBuf {
        if let Some(path) = &self.database {
            return path.clone();
        }
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join(DEFAULT_DATABASE_FILE)))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_FILE))
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
