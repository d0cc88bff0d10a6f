//! Document chunks and their per-query scores.

use serde::{Deserialize, Serialize};

use crate::constants::HEADING_PATH_SEPARATOR;
use crate::similarity::SimilarityScores;

/// Case-normalizes a query keyword so chunk scores can be matched back to queries.
pub fn normalize_keyword(text: &str) -> String {
    text.trim().to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// A contiguous span of document text with its heading context.
pub struct Chunk {
    pub id: String,
    pub index: usize,
    pub text: String,
    #[serde(default)]
    pub heading_path: Vec<String>,
    #[serde(default)]
    pub word_count: usize,
    #[serde(default)]
    pub char_count: usize,
}

impl Chunk {
    /// Creates a chunk, deriving word and character counts from `text`.
    pub fn new(
        id: impl Into<String>,
        index: usize,
        text: impl Into<String>,
        heading_path: Vec<String>,
    ) -> Self {
        let text = text.into();
        Self {
            id: id.into(),
            index,
            word_count: text.split_whitespace().count(),
            char_count: text.chars().count(),
            text,
            heading_path,
        }
    }

    /// Heading path rendered as `"A > B > C"` (empty when the chunk has no headings).
    pub fn heading(&self) -> String {
        self.heading_path.join(HEADING_PATH_SEPARATOR)
    }

    /// Innermost heading, if any.
    pub fn leaf_heading(&self) -> Option<&str> {
        self.heading_path.last().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Scores of one chunk against one query keyword.
pub struct KeywordScore {
    /// Case-normalized query text.
    pub keyword: String,
    pub scores: SimilarityScores,
}

impl KeywordScore {
    pub fn new(keyword: &str, scores: SimilarityScores) -> Self {
        Self {
            keyword: normalize_keyword(keyword),
            scores,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// A chunk identity plus its ordered per-query scores.
pub struct ChunkScore {
    pub chunk_index: usize,
    pub chunk_id: String,
    pub text: String,
    #[serde(default)]
    pub heading_path: Vec<String>,
    #[serde(default)]
    pub word_count: usize,
    #[serde(default)]
    pub char_count: usize,
    #[serde(default)]
    pub keyword_scores: Vec<KeywordScore>,
}

impl ChunkScore {
    /// Starts an empty score record for `chunk`.
    pub fn for_chunk(chunk: &Chunk) -> Self {
        Self {
            chunk_index: chunk.index,
            chunk_id: chunk.id.clone(),
            text: chunk.text.clone(),
            heading_path: chunk.heading_path.clone(),
            word_count: chunk.word_count,
            char_count: chunk.char_count,
            keyword_scores: Vec::new(),
        }
    }

    /// Looks up the scores recorded for `query` (case-insensitive).
    pub fn scores_for(&self, query: &str) -> Option<&SimilarityScores> {
        let keyword = normalize_keyword(query);
        self.keyword_scores
            .iter()
            .find(|k| k.keyword == keyword)
            .map(|k| &k.scores)
    }

    /// Keyword with the highest passage score; ties keep the earliest keyword.
    pub fn best(&self) -> Option<&KeywordScore> {
        self.keyword_scores.iter().fold(None, |best, candidate| match best {
            Some(b) if b.scores.passage_score >= candidate.scores.passage_score => Some(b),
            _ => Some(candidate),
        })
    }

    /// Rebuilds the [`Chunk`] this record describes.
    pub fn to_chunk(&self) -> Chunk {
        Chunk {
            id: self.chunk_id.clone(),
            index: self.chunk_index,
            text: self.text.clone(),
            heading_path: self.heading_path.clone(),
            word_count: self.word_count,
            char_count: self.char_count,
        }
    }
}
