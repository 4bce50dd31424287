//! Text processing infrastructure

pub mod chunker;

pub use chunker::Chunker;
