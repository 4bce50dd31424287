//! Service layer: pipeline orchestration.

pub mod rag_service;

pub use rag_service::{build_prompt, RagService};
