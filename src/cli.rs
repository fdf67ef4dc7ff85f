use std::path::PathBuf;

use clap::Parser;

use crate::codec::ValueFormat;
use crate::config::AppConfig;
use crate::logging;

/// `kvpeek` - browse and edit a sorted key-value store from the terminal
#[derive(Parser, Debug)]
#[command(name = "kvpeek", version, about)]
pub struct Cli {
    /// SQLite file holding the key-value table (created if missing)
    #[arg(long, env = "KVPEEK_DB", default_value = "kvpeek.db")]
    pub db: PathBuf,

    /// Browse an in-memory store seeded with sample records instead of --db
    #[arg(long)]
    pub memory: bool,

    /// Keys fetched per page (overrides config file)
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Initial value format: text, hex, base64 or json (overrides config file)
    #[arg(long)]
    pub format: Option<ValueFormat>,

    /// Log file path [default: <cache dir>/kvpeek/kvpeek.log]
    #[arg(long, env = "KVPEEK_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// CLI page size if given and non-zero, else the config's.
    pub fn page_size(&self, config: &AppConfig) -> usize {
        self.page_size
            .filter(|&n| n > 0)
            .unwrap_or_else(|| config.effective_page_size())
    }

    pub fn format(&self, config: &AppConfig) -> ValueFormat {
        self.format.unwrap_or(config.default_format)
    }

    /// Label for the header.
    pub fn source_label(&self) -> String {
        if self.memory {
            "in-memory demo".to_string()
        } else {
            self.db.display().to_string()
        }
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(logging::default_log_path)
    }
}
