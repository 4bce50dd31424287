//! Recursive character text chunker
//!
//! Splits text along semantic boundaries, coarsest first: paragraph
//! break, line break, sentence terminator, single space, and finally
//! individual characters. Pieces still longer than the size limit are
//! re-split with the next finer separator; the character-level fallback
//! always succeeds, so splitting terminates. Separators stay attached to
//! the preceding fragment, so no characters are ever dropped.

use std::collections::VecDeque;

use crate::domain::errors::{RagError, RagResult};
use crate::domain::models::ChunkingConfig;

/// Separator ladder, coarsest first. The character-level fallback is
/// implicit when none of these occur in a piece of text.
const SEPARATORS: [&str; 4] = ["\n\n", "\n", ". ", " "];

/// Deterministic, overlap-aware text splitter.
pub struct Chunker {
    config: ChunkingConfig,
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

impl Chunker {
    /// Create a chunker, validating the configuration up front.
    pub fn new(config: ChunkingConfig) -> RagResult<Self> {
        config.validate().map_err(RagError::InvalidConfiguration)?;
        Ok(Self { config })
    }

    /// Split `text` into chunks of at most `max_chars` characters, with
    /// adjacent chunks sharing approximately `overlap` characters.
    ///
    /// Output order matches document order and the result is identical
    /// across repeated calls. Empty input yields an empty sequence;
    /// input within the size limit yields a single chunk unchanged.
    pub fn split(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }

        if char_len(text) <= self.config.max_chars {
            return vec![text.to_string()];
        }

        self.split_recursive(text, &SEPARATORS)
    }

    fn split_recursive(&self, text: &str, separators: &[&str]) -> Vec<String> {
        let (fragments, finer) = fragment(text, separators);

        let mut chunks = Vec::new();
        let mut pending: Vec<String> = Vec::new();

        for piece in fragments {
            if char_len(&piece) <= self.config.max_chars {
                pending.push(piece);
            } else {
                // Flush accumulated fragments before recursing so chunk
                // order matches document order.
                if !pending.is_empty() {
                    chunks.extend(self.merge(std::mem::take(&mut pending)));
                }
                chunks.extend(self.split_recursive(&piece, finer));
            }
        }

        if !pending.is_empty() {
            chunks.extend(self.merge(pending));
        }

        chunks
    }

    /// Merge fragments into chunks, carrying a trailing window of at
    /// most `overlap` characters into the next chunk. Exact overlap
    /// varies because fragment boundaries are respected.
    fn merge(&self, fragments: Vec<String>) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut window: VecDeque<String> = VecDeque::new();
        let mut window_len = 0usize;

        for piece in fragments {
            let piece_len = char_len(&piece);

            if window_len + piece_len > self.config.max_chars && !window.is_empty() {
                chunks.push(window.iter().map(String::as_str).collect());

                // Shed leading fragments until the retained tail fits the
                // overlap budget and leaves room for the next fragment.
                while window_len > self.config.overlap
                    || (window_len + piece_len > self.config.max_chars && window_len > 0)
                {
                    let Some(dropped) = window.pop_front() else {
                        break;
                    };
                    window_len -= char_len(&dropped);
                }
            }

            window_len += piece_len;
            window.push_back(piece);
        }

        if !window.is_empty() {
            chunks.push(window.iter().map(String::as_str).collect());
        }

        chunks
    }
}

/// Split on the coarsest separator present in `text`, keeping the
/// separator attached to the preceding fragment. When no separator
/// occurs, fall back to single characters, which always succeeds.
fn fragment<'a>(text: &str, separators: &'a [&'a str]) -> (Vec<String>, &'a [&'a str]) {
    for (i, sep) in separators.iter().enumerate() {
        if text.contains(sep) {
            let fragments = text.split_inclusive(sep).map(str::to_string).collect();
            return (fragments, &separators[i + 1..]);
        }
    }

    (text.chars().map(String::from).collect(), &[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn chunker(max_chars: usize, overlap: usize) -> Chunker {
        Chunker::new(ChunkingConfig::new(max_chars, overlap)).unwrap()
    }

    /// Rebuild the original text by stripping each chunk's leading
    /// overlap against the reconstruction so far.
    fn reconstruct(chunks: &[String]) -> String {
        let mut text = String::new();
        for chunk in chunks {
            let chars: Vec<char> = chunk.chars().collect();
            let mut skip = chars.len();
            loop {
                let prefix: String = chars[..skip].iter().collect();
                if text.ends_with(&prefix) {
                    break;
                }
                skip -= 1;
            }
            text.extend(&chars[skip..]);
        }
        text
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = Chunker::new(ChunkingConfig::new(100, 150));
        assert!(matches!(result, Err(RagError::InvalidConfiguration(_))));

        let result = Chunker::new(ChunkingConfig::new(100, 0));
        assert!(matches!(result, Err(RagError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_empty_text_yields_no_chunks() {
        assert!(chunker(20, 5).split("").is_empty());
    }

    #[test]
    fn test_short_text_is_single_chunk() {
        let chunks = chunker(50, 10).split("Well within the limit.");
        assert_eq!(chunks, vec!["Well within the limit.".to_string()]);
    }

    #[test]
    fn test_splits_on_paragraph_before_finer_separators() {
        let text = "First paragraph here.\n\nSecond paragraph here.";
        let chunks = chunker(25, 5).split(text);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0], "First paragraph here.\n\n");
        assert_eq!(chunks[1], "Second paragraph here.");
    }

    #[test]
    fn test_recursive_descent_to_word_level() {
        let text = "Paragraph one.\n\nParagraph two about Kerry Walsh.";
        let chunks = chunker(20, 5).split(text);

        assert!(chunks.len() >= 2);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 20, "oversized chunk: {chunk:?}");
        }
        assert!(chunks.iter().any(|c| c.contains("Kerry Walsh")));
        assert_eq!(reconstruct(&chunks), text);
    }

    #[test]
    fn test_character_fallback_for_unbroken_text() {
        // No separator at all: character-level split still terminates
        // and still respects the size bound.
        let text = "abcdefghijklmnopqrstuvwxyz0123456789";
        let chunks = chunker(10, 3).split(text);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 10);
        }
        assert_eq!(reconstruct(&chunks), text);
    }

    #[test]
    fn test_adjacent_chunks_overlap() {
        let text = "aa bb cc dd ee ff gg hh ii jj";
        let chunks = chunker(12, 6).split(text);

        assert!(chunks.len() > 1);
        // Each chunk after the first starts with text already seen at
        // the end of its predecessor.
        for pair in chunks.windows(2) {
            let first_word = pair[1].split(' ').next().unwrap();
            assert!(
                pair[0].contains(first_word),
                "expected {:?} to carry overlap from {:?}",
                pair[1],
                pair[0]
            );
        }
        assert_eq!(reconstruct(&chunks), text);
    }

    #[test]
    fn test_multibyte_text_never_splits_inside_code_point() {
        let text = "héllo wörld çafé ünïcödé tèxt hère ånd thêre ôver ánd óver";
        let chunks = chunker(15, 4).split(text);

        for chunk in &chunks {
            assert!(chunk.chars().count() <= 15);
        }
        assert_eq!(reconstruct(&chunks), text);
    }

    #[test]
    fn test_sentence_separator_is_respected() {
        let text = "One sentence here. Another sentence there. A third one closes.";
        let chunks = chunker(30, 6).split(text);

        assert!(chunks.len() >= 2);
        assert!(chunks[0].ends_with(". "));
        assert_eq!(reconstruct(&chunks), text);
    }

    #[test]
    fn test_deterministic_across_calls() {
        let text = "Some repeated paragraph.\n\n".repeat(8);
        let splitter = chunker(40, 10);

        let first = splitter.split(&text);
        let second = splitter.split(&text);
        assert_eq!(first, second);
    }

    proptest! {
        #[test]
        fn prop_chunks_respect_size_bound(
            text in "[a-z ]{0,300}",
            max in 4usize..60,
            overlap_frac in 1usize..4,
        ) {
            let overlap = (max / (overlap_frac + 1)).max(1);
            let splitter = chunker(max, overlap);
            for chunk in splitter.split(&text) {
                prop_assert!(chunk.chars().count() <= max);
            }
        }

        #[test]
        fn prop_split_is_deterministic(text in "\\PC{0,200}", max in 4usize..50) {
            let splitter = chunker(max, max / 2);
            prop_assert_eq!(splitter.split(&text), splitter.split(&text));
        }

        #[test]
        fn prop_chunks_are_substrings_of_source(
            text in "[a-z\\n .]{0,300}",
            max in 6usize..50,
        ) {
            // Chunks are concatenations of contiguous source fragments,
            // so every chunk must occur verbatim in the source.
            let splitter = chunker(max, 2);
            for chunk in splitter.split(&text) {
                prop_assert!(text.contains(&chunk), "chunk {:?} not found in source", chunk);
            }
        }
    }
}
