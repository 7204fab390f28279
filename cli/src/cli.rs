use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "folio-lint", version, about = "Validate a folio content directory")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse every post and report the ones the server would reject.
    Check {
        /// Content directory.
        dir: PathBuf,
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Show the related posts for one slug, with scores.
    Related {
        /// Content directory.
        dir: PathBuf,
        slug: String,
        #[arg(long, default_value_t = 3)]
        limit: usize,
        /// Only list posts that share a category or tag.
        #[arg(long)]
        positive_only: bool,
    },
    /// Write a new post skeleton with a valid header.
    New {
        /// Content directory.
        dir: PathBuf,
        slug: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: String,
        #[arg(long)]
        category: String,
        /// Comma-separated tags list.
        #[arg(long)]
        tags: Option<String>,
        #[arg(long, default_value = "")]
        description: String,
        /// Publication date in `YYYY-MM-DD` format. Defaults to today.
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        featured: bool,
    },
}
