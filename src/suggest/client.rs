// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Request supersession for the design assistant
//!
//! Each request runs on its own worker thread and reports back over a
//! channel. Only the most recent request can produce an outcome; anything
//! older is discarded on arrival.

use super::patch::ConfigPatch;
use super::prompt::tag_prompt;
use crate::config::Configuration;
use crate::error::ExternalServiceError;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Transport to the external specification service.
///
/// Implementations should check `cancel` between blocking steps and return
/// [`ExternalServiceError::Cancelled`] once it is set.
pub trait SpecGenerator: Send + Sync + 'static {
    /// Return the raw JSON text answering `prompt`
    fn generate(&self, prompt: &str, cancel: &CancelToken) -> Result<String, ExternalServiceError>;
}

impl<F> SpecGenerator for F
where
    F: Fn(&str, &CancelToken) -> Result<String, ExternalServiceError> + Send + Sync + 'static,
{
    fn generate(&self, prompt: &str, cancel: &CancelToken) -> Result<String, ExternalServiceError> {
        self(prompt, cancel)
    }
}

/// Shared cancellation flag
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Monotonic request identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Result of the latest request
#[derive(Debug, Clone, PartialEq)]
pub enum SuggestionOutcome {
    /// The patch was applied to the configuration passed in
    Applied {
        id: RequestId,
        config: Configuration,
        patch: ConfigPatch,
    },
    /// The request failed; the configuration stays as it was
    Failed {
        id: RequestId,
        error: ExternalServiceError,
    },
}

impl SuggestionOutcome {
    pub fn id(&self) -> RequestId {
        match self {
            Self::Applied { id, .. } | Self::Failed { id, .. } => *id,
        }
    }

    /// Text to show next to the prompt box
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Applied { patch, .. } => patch.reasoning.clone(),
            Self::Failed { error, .. } => Some(error.user_message()),
        }
    }
}

struct Pending {
    id: RequestId,
    cancel: CancelToken,
    deadline: Instant,
}

type Reply = (RequestId, Result<String, ExternalServiceError>);

/// Issues requests and resolves the latest one against the current configuration
pub struct SuggestionClient {
    generator: Arc<dyn SpecGenerator>,
    timeout: Duration,
    next_id: u64,
    pending: Option<Pending>,
    discarded: usize,
    tx: Sender<Reply>,
    rx: Receiver<Reply>,
}

impl SuggestionClient {
    pub fn new(generator: impl SpecGenerator, timeout: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            generator: Arc::new(generator),
            timeout,
            next_id: 0,
            pending: None,
            discarded: 0,
            tx,
            rx,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Responses thrown away because a newer request had started
    pub fn discarded(&self) -> usize {
        self.discarded
    }

    /// Start a request, superseding any outstanding one
    pub fn submit(&mut self, prompt: &str, current: &Configuration) -> RequestId {
        if let Some(previous) = self.pending.take() {
            debug!(id = %previous.id, "superseding request");
            previous.cancel.cancel();
        }

        self.next_id += 1;
        let id = RequestId(self.next_id);
        let cancel = CancelToken::new();
        let tagged = tag_prompt(prompt, current.kind);

        let generator = Arc::clone(&self.generator);
        let token = cancel.clone();
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = generator.generate(&tagged, &token);
            // The receiver is gone only when the client was dropped
            let _ = tx.send((id, result));
        });

        info!(%id, "suggestion requested");
        self.pending = Some(Pending {
            id,
            cancel,
            deadline: Instant::now() + self.timeout,
        });
        id
    }

    /// Abandon the outstanding request, if any
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            debug!(id = %pending.id, "request cancelled");
            pending.cancel.cancel();
        }
    }

    /// Non-blocking check for the latest request's outcome
    pub fn poll(&mut self, current: &Configuration) -> Option<SuggestionOutcome> {
        loop {
            match self.rx.try_recv() {
                Ok(reply) => {
                    if let Some(outcome) = self.resolve(reply, current) {
                        return Some(outcome);
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => {
                    return self.check_deadline();
                }
            }
        }
    }

    /// Block until the latest request resolves or its deadline passes
    pub fn wait(&mut self, current: &Configuration) -> Option<SuggestionOutcome> {
        loop {
            let deadline = self.pending.as_ref()?.deadline;
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok(reply) => {
                    if let Some(outcome) = self.resolve(reply, current) {
                        return Some(outcome);
                    }
                }
                Err(RecvTimeoutError::Timeout) => {
                    if let Some(outcome) = self.check_deadline() {
                        return Some(outcome);
                    }
                }
                // The client holds a sender, so this only happens while tearing down
                Err(RecvTimeoutError::Disconnected) => return self.check_deadline(),
            }
        }
    }

    fn resolve(&mut self, (id, result): Reply, current: &Configuration) -> Option<SuggestionOutcome> {
        let is_latest = matches!(&self.pending, Some(pending) if pending.id == id);
        if !is_latest {
            self.discarded += 1;
            debug!(%id, "discarding stale response");
            return None;
        }
        self.pending = None;

        let outcome = match result.and_then(|text| ConfigPatch::parse(&text)) {
            Ok(patch) => SuggestionOutcome::Applied {
                id,
                config: patch.apply(current),
                patch,
            },
            Err(error) => {
                warn!(%id, %error, "suggestion failed");
                SuggestionOutcome::Failed { id, error }
            }
        };
        Some(outcome)
    }

    fn check_deadline(&mut self) -> Option<SuggestionOutcome> {
        let expired = matches!(&self.pending, Some(pending) if Instant::now() >= pending.deadline);
        if !expired {
            return None;
        }
        let pending = self.pending.take()?;
        pending.cancel.cancel();
        warn!(id = %pending.id, timeout = ?self.timeout, "suggestion timed out");
        Some(SuggestionOutcome::Failed {
            id: pending.id,
            error: ExternalServiceError::Timeout(self.timeout),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EquipmentKind;
    use std::sync::Mutex;

    #[test]
    fn test_prompt_is_tagged_with_kind() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&seen);
        let mut client = SuggestionClient::new(
            move |prompt: &str, _: &CancelToken| -> Result<String, ExternalServiceError> {
                log.lock().unwrap().push(prompt.to_string());
                Ok("{}".to_string())
            },
            Duration::from_secs(5),
        );

        let board = Configuration::preset(EquipmentKind::Snowboard);
        client.submit("pow", &board);
        let outcome = client.wait(&board).unwrap();
        assert!(matches!(outcome, SuggestionOutcome::Applied { .. }));
        assert_eq!(seen.lock().unwrap().as_slice(), ["pow (Snowboard)"]);
    }

    #[test]
    fn test_transport_error_message() {
        let mut client = SuggestionClient::new(
            |_: &str, _: &CancelToken| -> Result<String, ExternalServiceError> {
                Err(ExternalServiceError::Transport("refused".into()))
            },
            Duration::from_secs(5),
        );
        let config = Configuration::default();
        client.submit("anything", &config);
        let outcome = client.wait(&config).unwrap();
        assert_eq!(
            outcome.message().as_deref(),
            Some("Connection Error. Please check API Key.")
        );
        assert!(!client.is_pending());
    }

    #[test]
    fn test_nothing_pending() {
        let mut client = SuggestionClient::new(
            |_: &str, _: &CancelToken| -> Result<String, ExternalServiceError> {
                Ok("{}".to_string())
            },
            Duration::from_secs(1),
        );
        assert!(client.poll(&Configuration::default()).is_none());
        assert!(client.wait(&Configuration::default()).is_none());
    }
}
