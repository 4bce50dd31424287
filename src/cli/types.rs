//! CLI type definitions
//!
//! The clap command structure that defines the CLI interface.

use clap::Parser;
use std::path::PathBuf;

/// Ask questions about a document with retrieval-augmented generation.
#[derive(Debug, Parser)]
#[command(name = "docask")]
#[command(about = "Ask questions about a document with retrieval-augmented generation")]
#[command(version)]
pub struct Cli {
    /// The question to ask (all words are joined into one query)
    pub question: Vec<String>,

    /// Delete the collection and repopulate it from the configured
    /// document before answering
    #[arg(short, long)]
    pub reset: bool,

    /// Path to a configuration file (default: docask.yaml plus DOCASK_* env vars)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Number of chunks to retrieve as context
    #[arg(short = 'k', long, value_name = "N")]
    pub top_k: Option<usize>,

    /// Override the configured document path
    #[arg(long, value_name = "FILE")]
    pub document: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}
