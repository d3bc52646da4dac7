use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::fmt;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    /// CSV file path or http(s) URL of the spreadsheet export
    #[clap(long, global = true, value_parser)]
    pub source: Option<String>,

    #[clap(long, global = true, value_parser)]
    pub config: Option<PathBuf>,

    /// Keep the first CSV record instead of treating it as a title row
    #[clap(long, global = true, value_parser, default_value_t = false)]
    pub no_header: bool,

    #[clap(long, global = true, value_parser, default_value_t = false)]
    pub verbose: bool,

    #[clap(long, global = true, value_parser)]
    pub log: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Look up a keyword once
    Search {
        keyword: String,

        #[clap(long, value_parser)]
        limit: Option<usize>,

        #[clap(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Search as you type: every input line replaces the current keyword
    Interactive {
        #[clap(long, value_parser)]
        limit: Option<usize>,
    },
    /// Show the word of the day
    Today {
        /// Date as YYYY-MM-DD, defaults to today
        #[clap(long, value_parser)]
        date: Option<chrono::NaiveDate>,
    },
    /// Generate shell completions
    Completions {
        #[clap(value_enum)]
        shell: Shell,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
