use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("analysis request has no queries")]
    EmptyQueries,

    #[error("an analysis run is already active")]
    AlreadyRunning,

    #[error("analysis run was reset before it finished")]
    Cancelled,

    #[error("failed to build HTTP client: {0}")]
    Client(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("scoring backend returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("event stream ended before a terminal event")]
    StreamEnded,

    #[error("scoring backend reported an error: {0}")]
    Producer(String),
}

pub type PipelineResult<T> = Result<T, PipelineError>;
