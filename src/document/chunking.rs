use thiserror::Error;

use crate::constants::{DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_WORDS};

#[derive(Debug, Error)]
/// Errors validating chunking parameters.
pub enum ChunkingError {
    /// Window must hold at least one word.
    #[error("chunk window must be at least 1 word, got {window}")]
    EmptyWindow {
        /// Configured window size.
        window: usize,
    },

    /// Overlap must leave the splitter a positive step.
    #[error("chunk overlap ({overlap}) must be smaller than the window ({window})")]
    OverlapTooLarge {
        /// Configured window size.
        window: usize,
        /// Configured overlap.
        overlap: usize,
    },
}

/// Word-window chunking parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkingConfig {
    /// Words per chunk.
    pub window_words: usize,
    /// Words shared between consecutive chunks.
    pub overlap_words: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            window_words: DEFAULT_CHUNK_WORDS,
            overlap_words: DEFAULT_CHUNK_OVERLAP,
        }
    }
}

impl ChunkingConfig {
    pub fn new(window_words: usize, overlap_words: usize) -> Self {
        Self {
            window_words,
            overlap_words,
        }
    }

    /// Rejects parameter combinations the splitter cannot make progress on.
    pub fn validate(&self) -> Result<(), ChunkingError> {
        if self.window_words == 0 {
            return Err(ChunkingError::EmptyWindow {
                window: self.window_words,
            });
        }

        if self.overlap_words >= self.window_words {
            return Err(ChunkingError::OverlapTooLarge {
                window: self.window_words,
                overlap: self.overlap_words,
            });
        }

        Ok(())
    }
}

/// Splits text into overlapping word windows.
///
/// Pure and deterministic: identical input and parameters always yield the
/// identical ordered chunk sequence. Consecutive chunks share exactly
/// `overlap_words` words; the final chunk may be shorter. Degenerate
/// parameters (overlap >= window) are clamped to a step of one word rather
/// than looping; [`ChunkingConfig::validate`] rejects them up front.
pub fn chunk_text(text: &str, window_words: usize, overlap_words: usize) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return Vec::new();
    }

    let step = window_words.saturating_sub(overlap_words).max(1);
    let mut chunks = Vec::new();
    let mut start = 0;

    loop {
        let end = (start + window_words.max(1)).min(words.len());
        chunks.push(words[start..end].join(" "));

        if end >= words.len() {
            break;
        }
        start += step;
    }

    chunks
}
