//! The session controller.
//!
//! [`RequestController`] owns every piece of session state and is the only
//! thing that mutates it. A submission is split in two synchronous halves
//! around the network call:
//!
//! - [`RequestController::begin`] validates the input and enters the loading
//!   state, handing back the [`Query`] to send;
//! - [`RequestController::finish`] applies the outcome in one go.
//!
//! [`RequestController::submit`] runs both halves with the call in between.
//! Front-ends with their own event loop can instead send the request
//! themselves (see [`RequestController::service`]) and call `finish` when it
//! completes, keeping the loop responsive in the meantime.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error, info, trace, warn};

use crate::api::PredictionService;
use crate::clipboard::{Clipboard, ClipboardExporter};
use crate::effects::{Haptics, SUCCESS_PATTERN, pulse, should_celebrate};
use crate::error::PredictError;
use crate::history::{HistoryEntry, HistoryLog, timestamp_now};
use crate::notify::{Flag, FlagDurations, NotificationTimer};
use crate::query::Query;
use crate::recent::RecentWords;
use crate::result::{CurrentResult, PredictionResult, ResultStore};

/// Everything a front-end needs to draw the session, detached from the
/// controller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub loading: bool,
    pub error: Option<String>,
    pub result: Option<CurrentResult>,
    pub history: Vec<HistoryEntry>,
    pub recent: Vec<String>,
    pub copied: bool,
    pub celebrating: bool,
    pub words_analyzed: usize,
    pub positive_rate: u32,
}

pub struct RequestController {
    service: Arc<dyn PredictionService>,
    haptics: Arc<dyn Haptics>,
    exporter: ClipboardExporter,
    notifications: NotificationTimer,

    result: ResultStore,
    history: HistoryLog,
    recent: RecentWords,
    error: Option<String>,
    loading: bool,
}

impl RequestController {
    pub fn new(
        service: Arc<dyn PredictionService>,
        clipboard: Arc<dyn Clipboard>,
        haptics: Arc<dyn Haptics>,
        durations: FlagDurations,
    ) -> Self {
        let notifications = NotificationTimer::new(durations);
        let exporter =
            ClipboardExporter::new(clipboard, Arc::clone(&haptics), notifications.clone());

        Self {
            service,
            haptics,
            exporter,
            notifications,
            result: ResultStore::new(),
            history: HistoryLog::new(),
            recent: RecentWords::new(),
            error: None,
            loading: false,
        }
    }

    // ===== Submission =====

    /// Submit a word and wait for the verdict.
    pub async fn submit(&mut self, word: &str) {
        let Some(query) = self.begin(word) else {
            return;
        };

        let outcome = self.service.predict(query.canonical()).await;
        self.finish(query, outcome);
    }

    /// Start a submission.
    ///
    /// Returns `None`, leaving all state untouched, for blank input or while
    /// another submission is still loading.
    pub fn begin(&mut self, word: &str) -> Option<Query> {
        if self.loading {
            debug!("submission ignored, a request is already in flight");
            return None;
        }

        let Some(query) = Query::parse(word) else {
            trace!("ignoring blank submission");
            return None;
        };

        self.error = None;
        self.result.clear();
        self.loading = true;

        info!(word = query.canonical(), "requesting prediction");
        Some(query)
    }

    /// Apply the outcome of the request started by [`begin`](Self::begin).
    pub fn finish(&mut self, query: Query, outcome: Result<PredictionResult, PredictError>) {
        self.loading = false;

        match outcome {
            Ok(prediction) => self.apply_prediction(&query, prediction),
            Err(err) => {
                match &err {
                    PredictError::Service(message) => {
                        warn!(word = query.canonical(), "prediction rejected: {message}")
                    }
                    PredictError::Transport(details) => {
                        error!(word = query.canonical(), "prediction failed: {details}")
                    }
                }
                self.error = Some(err.user_message().to_string());
            }
        }
    }

    fn apply_prediction(&mut self, query: &Query, prediction: PredictionResult) {
        let word = query.display();
        debug!(
            word,
            sentiment = %prediction.sentiment,
            confidence = prediction.confidence,
            "prediction received"
        );

        self.history
            .append(HistoryEntry::new(word, &prediction, timestamp_now()));
        self.recent.record(word);

        let celebrate = should_celebrate(&prediction);
        self.result.set(word, prediction);

        if celebrate {
            self.notifications.trigger(Flag::Celebration);
        }
        pulse(self.haptics.as_ref(), SUCCESS_PATTERN);
    }

    /// The service requests go to, for callers that send them on their own.
    pub fn service(&self) -> Arc<dyn PredictionService> {
        Arc::clone(&self.service)
    }

    // ===== Other user actions =====

    /// Copy the current result to the clipboard. Returns false when there is
    /// nothing to copy.
    pub fn copy_result(&self) -> bool {
        match self.result.get() {
            Some(current) => {
                self.exporter.export(&current.word, &current.prediction);
                true
            }
            None => false,
        }
    }

    /// The input was cleared: drop the result and any error along with it.
    pub fn clear_input(&mut self) {
        self.result.clear();
        self.error = None;
    }

    /// Hide the current error (the user started typing again).
    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Forget the recent words, keeping the history.
    pub fn clear_recent(&mut self) {
        self.recent.clear();
        debug!("recent words cleared");
    }

    /// Forget both the history and the recent words.
    pub fn clear_history(&mut self) {
        self.history.clear();
        self.recent.clear();
        info!("history cleared");
    }

    // ===== Accessors =====

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn result(&self) -> Option<&CurrentResult> {
        self.result.get()
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn recent(&self) -> &RecentWords {
        &self.recent
    }

    pub fn is_active(&self, flag: Flag) -> bool {
        self.notifications.is_active(flag)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            loading: self.loading,
            error: self.error.clone(),
            result: self.result.get().cloned(),
            history: self.history.iter().cloned().collect(),
            recent: self.recent.iter().map(str::to_string).collect(),
            copied: self.is_active(Flag::CopyConfirmation),
            celebrating: self.is_active(Flag::Celebration),
            words_analyzed: self.history.len(),
            positive_rate: self.history.positive_rate(),
        }
    }
}

impl std::fmt::Debug for RequestController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestController")
            .field("loading", &self.loading)
            .field("error", &self.error)
            .field("history", &self.history.len())
            .field("recent", &self.recent.len())
            .finish_non_exhaustive()
    }
}
