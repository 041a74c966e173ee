//! High-level asynchronous lookup client.
//!
//! [`Client::submit`] drives at most `schedule.max_attempts()` sequential
//! attempts against the configured capture endpoint, publishing
//! [`DisplayState`] transitions over a watch channel. Submissions carry a
//! monotonically increasing generation id; a publication from a superseded
//! submission is discarded, so the caller always observes "last submit wins".

use crate::{
    classify::classify,
    error::{Error, HttpError},
    retry::RetrySchedule,
    transport::{AsyncTransport, DynAsyncTransport, ReqwestAsync, TransportRequest},
    types::{DisplayState, ResultBundle},
    util::{
        diagnostics,
        url::{parse_endpoint, sanitize_url_for_error},
    },
    validate,
};
use http::StatusCode;
use serde::Serialize;
use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};
use tokio::{sync::watch, time::sleep};
use tracing::{debug, warn};
use url::Url;

const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Serialize)]
struct LookupRequest<'a> {
    email: &'a str,
}

/// Terminal outcome of one completed [`Client::submit`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Found(ResultBundle),
    NotFound { email: String, detail: String },
    /// A newer submission (or a dismissal) started before this one resolved;
    /// its result was discarded without touching the display state.
    Superseded,
}

/// Configures and constructs [`Client`].
pub struct ClientBuilder {
    endpoint: Url,
    user_agent: String,
    timeout: Duration,
    connect_timeout: Duration,
    schedule: RetrySchedule,
    transport: Option<DynAsyncTransport>,
}

impl ClientBuilder {
    fn try_new(endpoint: impl AsRef<str>) -> Result<Self, Error> {
        let endpoint = parse_endpoint(endpoint.as_ref())?;
        Ok(Self {
            endpoint,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            schedule: RetrySchedule::default(),
            transport: None,
        })
    }

    /// Override the default `User-Agent` header.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = ua.into();
        self
    }

    /// Adjust the per-attempt request timeout.
    pub fn timeout(mut self, value: Duration) -> Self {
        self.timeout = value;
        self
    }

    /// Adjust the connection establishment timeout.
    pub fn connect_timeout(mut self, value: Duration) -> Self {
        self.connect_timeout = value;
        self
    }

    /// Replace the fixed inter-attempt delay schedule.
    pub fn retry_schedule(mut self, schedule: RetrySchedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Swap out the underlying transport.
    pub fn transport(mut self, transport: DynAsyncTransport) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Finalise configuration and build the client.
    pub fn build(self) -> Result<Client, Error> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestAsync::try_new(
                &self.user_agent,
                self.timeout,
                self.connect_timeout,
            )?),
        };

        let (state, _) = watch::channel(DisplayState::Idle);

        Ok(Client {
            inner: Arc::new(Inner {
                endpoint: self.endpoint,
                timeout: self.timeout,
                schedule: self.schedule,
                transport,
                state,
                generation: AtomicU64::new(0),
            }),
        })
    }
}

#[derive(Clone)]
pub struct Client {
    inner: Arc<Inner>,
}

struct Inner {
    endpoint: Url,
    timeout: Duration,
    schedule: RetrySchedule,
    transport: DynAsyncTransport,
    state: watch::Sender<DisplayState>,
    generation: AtomicU64,
}

impl Client {
    pub fn builder(endpoint: impl AsRef<str>) -> Result<ClientBuilder, Error> {
        ClientBuilder::try_new(endpoint)
    }

    pub fn new(endpoint: impl AsRef<str>) -> Result<Self, Error> {
        Self::builder(endpoint)?.build()
    }

    /// Snapshot of the current display state.
    #[must_use]
    pub fn state(&self) -> DisplayState {
        self.inner.state.borrow().clone()
    }

    /// Observe display-state transitions.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<DisplayState> {
        self.inner.state.subscribe()
    }

    /// Submit a lookup for `email`.
    ///
    /// Empty or whitespace-only input fails with [`Error::InvalidInput`]
    /// before any state reset or network attempt. Otherwise any previously
    /// published result or failure is cleared, and the attempt loop runs until
    /// a non-empty bundle is found or the schedule is exhausted; exactly one
    /// of `Found` or `NotFound` is published per submission that stays
    /// current. Retryable failures never escape this method.
    pub async fn submit(&self, email: impl AsRef<str>) -> Result<Outcome, Error> {
        let email = email.as_ref().trim().to_owned();
        validate::REQUIRED.check(&email)?;

        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.publish(generation, DisplayState::Idle);

        let mut attempt: u32 = 1;
        loop {
            if !self.publish(generation, DisplayState::InFlight { attempt }) {
                return Ok(Outcome::Superseded);
            }

            match self.attempt(&email).await {
                Ok(bundle) => {
                    debug!(attempt, results = bundle.len(), "lookup succeeded");
                    if self.publish(generation, DisplayState::Found(bundle.clone())) {
                        return Ok(Outcome::Found(bundle));
                    }
                    return Ok(Outcome::Superseded);
                }
                Err(err) if !err.is_retryable() => return Err(err),
                Err(err) => {
                    warn!(attempt, error = %err, "lookup attempt failed");
                    match self.inner.schedule.delay_after(attempt) {
                        Some(delay) => {
                            sleep(delay).await;
                            attempt += 1;
                        }
                        None => {
                            let detail = err.detail();
                            let published = self.publish(
                                generation,
                                DisplayState::NotFound {
                                    email: email.clone(),
                                    detail: detail.clone(),
                                },
                            );
                            if published {
                                return Ok(Outcome::NotFound { email, detail });
                            }
                            return Ok(Outcome::Superseded);
                        }
                    }
                }
            }
        }
    }

    /// Clear any published result or failure back to `Idle`.
    ///
    /// Unconditional: called when the caller acts on a published result,
    /// regardless of which variant was acted on. Also invalidates any
    /// still-in-flight submission so it cannot repopulate the display.
    pub fn dismiss(&self) {
        self.inner.generation.fetch_add(1, Ordering::SeqCst);
        self.inner.state.send_replace(DisplayState::Idle);
    }

    /// One attempt: POST the email, classify the response.
    async fn attempt(&self, email: &str) -> Result<ResultBundle, Error> {
        let body =
            serde_json::to_vec(&LookupRequest { email }).map_err(|err| Error::InvalidConfig {
                message: "failed to encode request body".into(),
                source: Some(Box::new(err)),
            })?;

        let resp = self
            .inner
            .transport
            .post(TransportRequest {
                url: self.inner.endpoint.clone(),
                body,
                timeout: self.inner.timeout,
            })
            .await?;

        if !matches!(resp.status, StatusCode::OK | StatusCode::CREATED) {
            let message = diagnostics::extract_message(&resp.body);
            return Err(Error::Api(HttpError {
                status: resp.status,
                url: Box::new(sanitize_url_for_error(&self.inner.endpoint)),
                message,
            }));
        }

        let bundle = classify(&resp.body).map_err(|source| Error::Decode {
            status: resp.status,
            path: self.inner.endpoint.path().to_owned().into_boxed_str(),
            source: Box::new(source),
        })?;

        if bundle.is_empty() {
            return Err(Error::EmptyResult);
        }
        Ok(bundle)
    }

    /// Publish a display transition unless this submission has been
    /// superseded. The generation check runs inside the sender's lock, so a
    /// stale submission can never overwrite a newer one's state.
    fn publish(&self, generation: u64, next: DisplayState) -> bool {
        self.inner.state.send_if_modified(|state| {
            if self.inner.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            *state = next;
            true
        })
    }
}
