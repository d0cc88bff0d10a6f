//! Scoring from precomputed embeddings.

use tracing::debug;

use super::error::AnalysisError;
use super::input::Embeddings;
use crate::chunk::{Chunk, ChunkScore, KeywordScore};
use crate::similarity::{SimilarityScores, cosine_similarity, passage_score};

fn ensure_count(what: &'static str, expected: usize, actual: usize) -> Result<(), AnalysisError> {
    if expected != actual {
        return Err(AnalysisError::EmbeddingCount {
            what,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Scores every chunk against every query.
///
/// `embeddings.queries[q]` embeds `queries[q]` and `embeddings.chunks[c]` embeds
/// `chunks[c]`. Keyword scores keep query order.
pub fn score_chunks(
    queries: &[String],
    chunks: &[Chunk],
    embeddings: &Embeddings,
) -> Result<Vec<ChunkScore>, AnalysisError> {
    ensure_count("query", queries.len(), embeddings.queries.len())?;
    ensure_count("chunk", chunks.len(), embeddings.chunks.len())?;

    let mut scores = Vec::with_capacity(chunks.len());
    for (chunk, chunk_vec) in chunks.iter().zip(&embeddings.chunks) {
        let mut record = ChunkScore::for_chunk(chunk);
        for (query, query_vec) in queries.iter().zip(&embeddings.queries) {
            let pair = SimilarityScores::compute(query_vec, chunk_vec)?;
            record.keyword_scores.push(KeywordScore::new(query, pair));
        }
        scores.push(record);
    }

    debug!(
        chunks = scores.len(),
        queries = queries.len(),
        "Scored chunks from embeddings"
    );
    Ok(scores)
}

/// Mean passage score of the queries against the whole document.
///
/// `None` without a document embedding or without queries.
pub fn document_aggregate_score(embeddings: &Embeddings) -> Result<Option<f64>, AnalysisError> {
    let Some(document) = embeddings.document.as_deref() else {
        return Ok(None);
    };
    if embeddings.queries.is_empty() {
        return Ok(None);
    }

    let mut total = 0.0;
    for query in &embeddings.queries {
        total += f64::from(passage_score(cosine_similarity(query, document)?));
    }
    Ok(Some(total / embeddings.queries.len() as f64))
}
