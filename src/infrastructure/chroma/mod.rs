//! ChromaDB vector store adapter

pub mod client;
pub mod types;

pub use client::{ChromaClient, ChromaCollection};
pub use types::CreateOutcome;
