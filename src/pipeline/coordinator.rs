use futures_util::stream::{Stream, StreamExt};
use parking_lot::Mutex;
use tracing::{debug, error, info, instrument, warn};

use super::error::{PipelineError, PipelineResult};
use super::event::PipelineEvent;
use super::request::AnalysisRequest;
use super::sse::{SseDecoder, SseFrame};
use super::state::{AnalysisResult, PipelineState, RunStatus, reduce};
use crate::config::Config;

struct Inner {
    state: PipelineState,
    generation: u64,
    active: bool,
}

/// Drives one streaming analysis run at a time and owns its [`PipelineState`].
///
/// Every run is stamped with a generation number. [`reset`](Self::reset) bumps the
/// generation, so events still in flight for an abandoned run are dropped instead of
/// leaking into the next one.
pub struct PipelineCoordinator {
    client: reqwest::Client,
    endpoint: String,
    inner: Mutex<Inner>,
}

impl std::fmt::Debug for PipelineCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("PipelineCoordinator")
            .field("endpoint", &self.endpoint)
            .field("generation", &inner.generation)
            .field("active", &inner.active)
            .finish()
    }
}

struct RunGuard<'a> {
    coordinator: &'a PipelineCoordinator,
    generation: u64,
    run_id: String,
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        let mut inner = self.coordinator.inner.lock();
        if inner.generation == self.generation {
            inner.active = false;
        }
    }
}

impl PipelineCoordinator {
    /// Creates a coordinator for the backend configured in `config`.
    ///
    /// `request_timeout` bounds connecting and each wait for the next read, not the whole run.
    pub fn new(config: &Config) -> PipelineResult<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.request_timeout)
            .read_timeout(config.request_timeout)
            .build()
            .map_err(|e| PipelineError::Client(e.to_string()))?;
        Ok(Self::with_client(client, config.backend_url.clone()))
    }

    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            inner: Mutex::new(Inner {
                state: PipelineState::default(),
                generation: 0,
                active: false,
            }),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Copy of the current state (partial while a run is active).
    pub fn snapshot(&self) -> PipelineState {
        self.inner.lock().state.clone()
    }

    pub fn status(&self) -> RunStatus {
        self.inner.lock().state.status.clone()
    }

    pub fn is_active(&self) -> bool {
        self.inner.lock().active
    }

    /// Abandons any active run and discards all accumulated state. Idempotent.
    pub fn reset(&self) {
        let mut inner = self.inner.lock();
        inner.generation += 1;
        inner.active = false;
        inner.state = PipelineState::default();
        debug!(generation = inner.generation, "Pipeline coordinator reset");
    }

    /// Posts `request` to the backend and consumes its event stream.
    #[instrument(
        skip(self, request),
        fields(chunks = request.chunks.len(), queries = request.queries.len())
    )]
    pub async fn run(&self, request: &AnalysisRequest) -> PipelineResult<AnalysisResult> {
        request.validate()?;
        let run = self.begin_run()?;

        let response = match self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::ACCEPT, "text/event-stream")
            .json(request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return Err(self.fail(&run, PipelineError::Transport(e.to_string()))),
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(self.fail(
                &run,
                PipelineError::HttpStatus {
                    status: status.as_u16(),
                    body,
                },
            ));
        }

        self.consume(&run, response.bytes_stream()).await
    }

    /// Consumes an already-open SSE byte stream as a new run.
    pub async fn drive<S, B, E>(&self, stream: S) -> PipelineResult<AnalysisResult>
    where
        S: Stream<Item = Result<B, E>>,
        B: AsRef<[u8]>,
        E: std::fmt::Display,
    {
        let run = self.begin_run()?;
        self.consume(&run, stream).await
    }

    fn begin_run(&self) -> PipelineResult<RunGuard<'_>> {
        let mut inner = self.inner.lock();
        if inner.active {
            return Err(PipelineError::AlreadyRunning);
        }

        let run_id = uuid::Uuid::new_v4().to_string();
        inner.generation += 1;
        inner.active = true;
        inner.state = PipelineState::for_run(run_id.clone());

        info!(run_id = %run_id, generation = inner.generation, "Analysis run started");

        Ok(RunGuard {
            coordinator: self,
            generation: inner.generation,
            run_id,
        })
    }

    async fn consume<S, B, E>(
        &self,
        run: &RunGuard<'_>,
        stream: S,
    ) -> PipelineResult<AnalysisResult>
    where
        S: Stream<Item = Result<B, E>>,
        B: AsRef<[u8]>,
        E: std::fmt::Display,
    {
        let mut decoder = SseDecoder::new();
        let mut stream = std::pin::pin!(stream);

        while let Some(item) = stream.next().await {
            let bytes = match item {
                Ok(bytes) => bytes,
                Err(e) => return Err(self.fail(run, PipelineError::Transport(e.to_string()))),
            };

            for frame in decoder.push(bytes.as_ref()) {
                if let Some(outcome) = self.apply_frame(run, &frame) {
                    return outcome;
                }
            }
        }

        if let Some(frame) = decoder.finish()
            && let Some(outcome) = self.apply_frame(run, &frame)
        {
            return outcome;
        }

        Err(self.fail(run, PipelineError::StreamEnded))
    }

    /// Applies one frame. Returns `Some` once the run is over for any reason.
    fn apply_frame(
        &self,
        run: &RunGuard<'_>,
        frame: &SseFrame,
    ) -> Option<PipelineResult<AnalysisResult>> {
        let parsed = PipelineEvent::parse(&frame.data);

        let mut inner = self.inner.lock();
        if inner.generation != run.generation {
            debug!(run_id = %run.run_id, "Dropping event from abandoned run");
            return Some(Err(PipelineError::Cancelled));
        }

        let event = match parsed {
            Ok(Some(event)) => event,
            Ok(None) => return None,
            Err(e) => {
                inner.state.skipped_frames += 1;
                warn!(
                    run_id = %run.run_id,
                    error = %e,
                    data_len = frame.data.len(),
                    "Skipping unparseable pipeline event"
                );
                return None;
            }
        };

        let state = std::mem::take(&mut inner.state);
        inner.state = reduce(state, &event);

        match &inner.state.status {
            RunStatus::Completed => {
                info!(
                    run_id = %run.run_id,
                    scored_chunks = inner.state.scored_chunks.len(),
                    "Analysis run complete"
                );
                inner.state.result.clone().map(Ok)
            }
            RunStatus::Failed { message } => {
                error!(run_id = %run.run_id, error = %message, "Analysis run failed");
                Some(Err(PipelineError::Producer(message.clone())))
            }
            RunStatus::Idle | RunStatus::Running => None,
        }
    }

    /// Records `err` as the run's terminal error (if the run is still current).
    fn fail(&self, run: &RunGuard<'_>, err: PipelineError) -> PipelineError {
        let mut inner = self.inner.lock();
        if inner.generation != run.generation {
            return PipelineError::Cancelled;
        }

        error!(run_id = %run.run_id, error = %err, "Analysis run failed");
        let state = std::mem::take(&mut inner.state);
        inner.state = reduce(
            state,
            &PipelineEvent::Error {
                message: err.to_string(),
            },
        );
        err
    }
}
