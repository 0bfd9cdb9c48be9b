//! One-shot leaderboard fetch
//!
//! The fetch runs on its own thread so the UI can draw an empty table while
//! the request is in flight. The result travels back over a channel; once the
//! [`Fetcher`] is dropped the channel is closed and a late response is
//! discarded by the worker.

use crate::types::{Envelope, LeaderboardPayload};
use chrono::{DateTime, Local};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Why a fetch did not produce a payload
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Network(String),

    #[error("server responded with HTTP {0}")]
    Status(u16),

    #[error("malformed leaderboard: {0}")]
    Decode(String),

    #[error("fetch worker stopped without a response")]
    Disconnected,
}

/// Observable state of the fetch
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Pending,
    Loaded(T),
    Failed(FetchError),
}

impl<T> LoadState<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, LoadState::Pending)
    }
}

/// Something that can produce the leaderboard
pub trait LeaderboardSource: Send + 'static {
    fn fetch(&self) -> Result<LeaderboardPayload, FetchError>;
}

/// Plain HTTP GET against the leaderboard endpoint
pub struct HttpSource {
    client: reqwest::blocking::Client,
    url: String,
}

impl HttpSource {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("clanboard/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }
}

impl LeaderboardSource for HttpSource {
    fn fetch(&self) -> Result<LeaderboardPayload, FetchError> {
        debug!(url = %self.url, "requesting leaderboard");

        let response = self
            .client
            .get(&self.url)
            .send()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        parse_envelope(&body)
    }
}

/// Unwrap `{ "data": ... }` into the payload
pub fn parse_envelope(body: &str) -> Result<LeaderboardPayload, FetchError> {
    serde_json::from_str::<Envelope>(body)
        .map(|envelope| envelope.data)
        .map_err(|e| FetchError::Decode(e.to_string()))
}

type FetchResult = Result<LeaderboardPayload, FetchError>;

/// Run the fetch and hand the result to the view. Returns false when the
/// view is already gone and the response was discarded.
fn deliver<S: LeaderboardSource>(source: &S, tx: &Sender<FetchResult>) -> bool {
    let result = source.fetch();
    if tx.send(result).is_err() {
        debug!("view closed before the fetch completed, discarding response");
        return false;
    }
    true
}

/// Owns the single in-flight fetch and its resulting state
pub struct Fetcher {
    state: LoadState<LeaderboardPayload>,
    rx: Option<Receiver<FetchResult>>,
    fetched_at: Option<DateTime<Local>>,
}

impl Fetcher {
    /// Start the fetch. This is the only request made for the fetcher's lifetime.
    pub fn spawn<S: LeaderboardSource>(source: S) -> Self {
        let (tx, rx) = mpsc::channel();

        let spawned = thread::Builder::new()
            .name("clanboard-fetch".into())
            .spawn(move || {
                deliver(&source, &tx);
            });

        match spawned {
            Ok(_) => Self {
                state: LoadState::Pending,
                rx: Some(rx),
                fetched_at: None,
            },
            Err(e) => {
                warn!("could not start fetch worker: {}", e);
                Self {
                    state: LoadState::Failed(FetchError::Network(e.to_string())),
                    rx: None,
                    fetched_at: None,
                }
            }
        }
    }

    pub fn state(&self) -> &LoadState<LeaderboardPayload> {
        &self.state
    }

    /// Local time the payload arrived
    pub fn fetched_at(&self) -> Option<DateTime<Local>> {
        self.fetched_at
    }

    /// Non-blocking check for a result. Returns true if the state changed.
    pub fn poll(&mut self) -> bool {
        let Some(rx) = &self.rx else { return false };

        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Disconnected) => Err(FetchError::Disconnected),
        };

        self.settle(result);
        true
    }

    /// Block until the fetch settles or `timeout` passes. Returns true once settled.
    pub fn wait(&mut self, timeout: Duration) -> bool {
        let Some(rx) = &self.rx else {
            return !self.state.is_pending();
        };

        let result = match rx.recv_timeout(timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => return false,
            Err(RecvTimeoutError::Disconnected) => Err(FetchError::Disconnected),
        };

        self.settle(result);
        true
    }

    fn settle(&mut self, result: FetchResult) {
        self.rx = None;

        match result {
            Ok(payload) => {
                info!(groups = payload.groups.len(), "leaderboard loaded");
                self.fetched_at = Some(Local::now());
                self.state = LoadState::Loaded(payload);
            }
            Err(e) => {
                warn!("leaderboard fetch failed: {}", e);
                self.state = LoadState::Failed(e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    struct StaticSource {
        result: FetchResult,
        calls: Arc<AtomicUsize>,
    }

    impl StaticSource {
        fn new(result: FetchResult) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    result,
                    calls: calls.clone(),
                },
                calls,
            )
        }
    }

    impl LeaderboardSource for StaticSource {
        fn fetch(&self) -> FetchResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    struct SlowSource(Duration);

    impl LeaderboardSource for SlowSource {
        fn fetch(&self) -> FetchResult {
            thread::sleep(self.0);
            Ok(LeaderboardPayload::default())
        }
    }

    fn payload() -> LeaderboardPayload {
        LeaderboardPayload {
            requirement_title: "Points".into(),
            requirement_suffix: "pts".into(),
            groups: Vec::new(),
        }
    }

    #[test]
    fn test_success_settles_loaded() {
        let (source, calls) = StaticSource::new(Ok(payload()));
        let mut fetcher = Fetcher::spawn(source);

        assert!(fetcher.wait(Duration::from_secs(5)));
        assert_eq!(fetcher.state(), &LoadState::Loaded(payload()));
        assert!(fetcher.fetched_at().is_some());

        // Settled fetchers never change again
        assert!(!fetcher.poll());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failure_settles_failed() {
        let (source, _) = StaticSource::new(Err(FetchError::Status(502)));
        let mut fetcher = Fetcher::spawn(source);

        assert!(fetcher.wait(Duration::from_secs(5)));
        assert_eq!(fetcher.state(), &LoadState::Failed(FetchError::Status(502)));
        assert!(fetcher.state().value().is_none());
        assert!(fetcher.fetched_at().is_none());
    }

    #[test]
    fn test_pending_until_response() {
        let mut fetcher = Fetcher::spawn(SlowSource(Duration::from_millis(300)));

        assert!(fetcher.state().is_pending());
        assert!(!fetcher.poll());
        assert!(!fetcher.wait(Duration::from_millis(10)));
        assert!(fetcher.state().is_pending());

        assert!(fetcher.wait(Duration::from_secs(5)));
        assert!(fetcher.state().value().is_some());
    }

    #[test]
    fn test_drop_before_response_discards_it() {
        let (source, calls) = StaticSource::new(Ok(payload()));
        let (tx, rx) = mpsc::channel();
        drop(rx);

        assert!(!deliver(&source, &tx));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_deliver_to_open_view() {
        let (source, _) = StaticSource::new(Ok(payload()));
        let (tx, rx) = mpsc::channel();

        assert!(deliver(&source, &tx));
        assert_eq!(rx.try_recv().unwrap(), Ok(payload()));
    }

    #[test]
    fn test_worker_outlives_dropped_fetcher() {
        let (gate_tx, gate_rx) = mpsc::channel::<()>();
        let (done_tx, done_rx) = mpsc::channel::<()>();

        struct Gated {
            gate: Mutex<Receiver<()>>,
            done: Mutex<Sender<()>>,
        }

        impl LeaderboardSource for Gated {
            fn fetch(&self) -> FetchResult {
                let _ = self.gate.lock().unwrap().recv();
                let _ = self.done.lock().unwrap().send(());
                Ok(LeaderboardPayload::default())
            }
        }

        let fetcher = Fetcher::spawn(Gated {
            gate: Mutex::new(gate_rx),
            done: Mutex::new(done_tx),
        });
        drop(fetcher);

        // Response arrives after the view is gone; the worker still finishes
        gate_tx.send(()).unwrap();
        assert!(done_rx.recv_timeout(Duration::from_secs(5)).is_ok());
    }

    #[test]
    fn test_parse_envelope() {
        let parsed = parse_envelope(
            r#"{"data":{"requirementTitle":"Points","requirementSuffix":"pts","groups":[]}}"#,
        )
        .unwrap();
        assert_eq!(parsed, payload());

        assert!(matches!(parse_envelope("<html>"), Err(FetchError::Decode(_))));
        assert!(matches!(parse_envelope(r#"{"data":null}"#), Err(FetchError::Decode(_))));
    }
}
