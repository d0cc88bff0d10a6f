//! Sample documents and event streams.

use serde_json::{Value, json};

use coverage::{AnalysisRequest, Chunk};

pub const QUERIES: [&str; 3] = ["refund policy", "shipping times", "warranty claims"];

pub fn chunks() -> Vec<Chunk> {
    vec![
        Chunk::new(
            "c0",
            0,
            "Refunds are issued within 30 days of purchase when the item is unused.",
            vec!["Policies".to_string(), "Refunds and Returns".to_string()],
        ),
        Chunk::new(
            "c1",
            1,
            "Orders ship within two business days and arrive within a week.",
            vec!["Policies".to_string(), "Shipping".to_string()],
        ),
    ]
}

pub fn request() -> AnalysisRequest {
    AnalysisRequest::new(
        chunks(),
        QUERIES.iter().map(|q| q.to_string()).collect(),
        chunks()
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n"),
    )
}

fn scores(cosine: f64) -> Value {
    json!({
        "cosine": cosine,
        "euclidean": 1.0 - cosine,
        "manhattan": 2.0 * (1.0 - cosine),
        "dotProduct": cosine,
        "passageScore": (cosine.clamp(0.0, 1.0) * 100.0).round() as u8,
    })
}

fn chunk_score(chunk: &Chunk, cosines: [f64; 3]) -> Value {
    json!({
        "chunkIndex": chunk.index,
        "chunkId": chunk.id,
        "text": chunk.text,
        "headingPath": chunk.heading_path,
        "wordCount": chunk.word_count,
        "charCount": chunk.char_count,
        "keywordScores": QUERIES
            .iter()
            .zip(cosines)
            .map(|(q, c)| json!({ "keyword": q, "scores": scores(c) }))
            .collect::<Vec<_>>(),
    })
}

/// Events of a successful run, in producer order.
pub fn successful_events() -> Vec<Value> {
    let chunks = chunks();
    let c0 = chunk_score(&chunks[0], [0.88, 0.21, 0.30]);
    let c1 = chunk_score(&chunks[1], [0.52, 0.79, 0.12]);

    vec![
        json!({ "type": "started", "stages": coverage::pipeline::initial_stages() }),
        json!({ "type": "stage", "stage": 1, "phase": "started" }),
        json!({ "type": "embedding_info", "model": "mini-embed", "dimensions": 384, "totalTexts": 6, "batchSize": 4 }),
        json!({ "type": "embedding_batch", "batch": 1, "totalBatches": 2, "textsEmbedded": 4 }),
        json!({ "type": "embedding_batch", "batch": 2, "totalBatches": 2, "textsEmbedded": 2 }),
        json!({ "type": "stage", "stage": 2, "phase": "started" }),
        json!({ "type": "document_aggregate", "score": 63.5, "interpretation": "moderate" }),
        json!({ "type": "stage", "stage": 3, "phase": "started", "totalItems": 2 }),
        json!({ "type": "chunk_scored", "chunkIndex": 0, "bestQuery": "refund policy", "bestScore": 88 }),
        json!({ "type": "chunk_scored", "chunkIndex": 1, "bestQuery": "shipping times", "bestScore": 79 }),
        json!({ "type": "stage", "stage": 4, "phase": "started" }),
        json!({
            "type": "coverage_calculated",
            "summary": { "totalQueries": 3, "covered": 2, "gaps": 1, "coveragePercent": 66.7 },
            "map": [
                { "query": "refund policy", "chunkIndex": 0, "score": 88, "covered": true },
                { "query": "shipping times", "chunkIndex": 1, "score": 79, "covered": true },
                { "query": "warranty claims", "score": 30, "covered": false }
            ]
        }),
        json!({ "type": "stage", "stage": 5, "phase": "started" }),
        json!({ "type": "diagnostic_progress", "pairsProcessed": 6, "totalPairs": 6 }),
        json!({
            "type": "complete",
            "summary": {
                "totalChunks": 2,
                "totalQueries": 3,
                "coveredQueries": 2,
                "gapQueries": 1,
                "averageBestScore": 65.7,
                "durationMs": 1250
            },
            "chunkScores": [c0, c1],
            "coverageMap": [],
            "diagnostics": []
        }),
    ]
}

/// Renders events as an SSE body.
pub fn sse_body(events: &[Value]) -> String {
    events
        .iter()
        .map(|e| format!("data: {e}\n\n"))
        .collect()
}
