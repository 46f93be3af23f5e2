//! Configuration types for the engine

use serde::{Deserialize, Serialize};

/// Chunking policy for statistics
///
/// A chunk closes at the first end-of-sentence token once it holds at
/// least `target_tokens` tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkPolicy {
    /// Token count after which the chunk closes at the next sentence end
    pub target_tokens: usize,
}

impl ChunkPolicy {
    /// Policy with the given target, at least one token
    pub fn new(target_tokens: usize) -> Self {
        Self {
            target_tokens: target_tokens.max(1),
        }
    }
}

impl Default for ChunkPolicy {
    fn default() -> Self {
        Self {
            target_tokens: 2_000,
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Chunk sizing for statistics
    #[serde(default)]
    pub chunk_policy: ChunkPolicy,
}

impl EngineConfig {
    /// Configuration with a custom chunk target
    pub fn with_chunk_tokens(target_tokens: usize) -> Self {
        Self {
            chunk_policy: ChunkPolicy::new(target_tokens),
        }
    }
}
