//! End-to-end analysis of one document.
//!
//! Inputs carrying precomputed embeddings are scored in-process; everything else goes
//! through the streaming backend. Either way the chunk scores feed the assignment
//! engine and the coverage classifier to produce a [`CoverageReport`].

pub mod error;
pub mod input;
pub mod report;
pub mod scoring;


pub use error::AnalysisError;
pub use input::{AnalysisInput, Embeddings};
pub use report::{AssignedPair, CoverageReport};
pub use scoring::{document_aggregate_score, score_chunks};

use tracing::{info, instrument};

use crate::assignment::AssignmentEngine;
use crate::config::Config;
use crate::pipeline::PipelineCoordinator;

#[derive(Debug)]
pub struct Analyzer {
    engine: AssignmentEngine,
    coordinator: PipelineCoordinator,
}

impl Analyzer {
    pub fn new(config: &Config) -> Result<Self, AnalysisError> {
        Ok(Self {
            engine: AssignmentEngine::new(config.score_threshold)?,
            coordinator: PipelineCoordinator::new(config)?,
        })
    }

    pub fn with_parts(engine: AssignmentEngine, coordinator: PipelineCoordinator) -> Self {
        Self {
            engine,
            coordinator,
        }
    }

    pub fn coordinator(&self) -> &PipelineCoordinator {
        &self.coordinator
    }

    #[instrument(skip(self, input), fields(local = input.embeddings.is_some()))]
    pub async fn analyze(&self, input: &AnalysisInput) -> Result<CoverageReport, AnalysisError> {
        match &input.embeddings {
            Some(embeddings) => self.analyze_embeddings(input, embeddings),
            None => {
                let queries = input.queries()?;
                let result = self.coordinator.run(&input.request).await?;
                CoverageReport::from_result(&queries, result, &self.engine)
            }
        }
    }

    /// Scores `input` in-process from `embeddings`.
    pub fn analyze_embeddings(
        &self,
        input: &AnalysisInput,
        embeddings: &Embeddings,
    ) -> Result<CoverageReport, AnalysisError> {
        input.request.validate()?;
        let queries = input.queries()?;

        let chunk_scores = score_chunks(&input.request.queries, &input.request.chunks, embeddings)?;
        let aggregate = document_aggregate_score(embeddings)?;

        info!(
            chunks = chunk_scores.len(),
            queries = queries.len(),
            "Scored document locally"
        );
        CoverageReport::build(&queries, chunk_scores, aggregate, &self.engine)
    }
}
