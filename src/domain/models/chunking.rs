//! Chunking configuration
//!
//! Character-based sizing keeps splitting deterministic and independent
//! of any tokenizer; lengths are measured in characters, not bytes.

use serde::{Deserialize, Serialize};

/// Configuration for document chunking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Maximum size of each chunk in characters
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,

    /// Overlap between adjacent chunks in characters (for context preservation)
    #[serde(default = "default_overlap")]
    pub overlap: usize,
}

const fn default_max_chars() -> usize {
    800
}

const fn default_overlap() -> usize {
    100
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_chars: default_max_chars(),
            overlap: default_overlap(),
        }
    }
}

impl ChunkingConfig {
    /// Create a configuration with explicit size and overlap
    pub fn new(max_chars: usize, overlap: usize) -> Self {
        Self { max_chars, overlap }
    }

    /// Validate the chunking configuration
    ///
    /// The overlap must be strictly between zero and the chunk size.
    pub fn validate(&self) -> Result<(), String> {
        if self.overlap == 0 {
            return Err("overlap must be greater than 0".to_string());
        }

        if self.overlap >= self.max_chars {
            return Err(format!(
                "overlap ({}) must be less than max_chars ({})",
                self.overlap, self.max_chars
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ChunkingConfig::default();
        assert_eq!(config.max_chars, 800);
        assert_eq!(config.overlap, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        assert!(ChunkingConfig::new(20, 5).validate().is_ok());

        // zero overlap
        assert!(ChunkingConfig::new(20, 0).validate().is_err());

        // overlap equal to size
        assert!(ChunkingConfig::new(20, 20).validate().is_err());

        // overlap greater than size
        assert!(ChunkingConfig::new(20, 30).validate().is_err());
    }
}
