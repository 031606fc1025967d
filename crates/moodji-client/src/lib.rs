//! Session core for moodji.
//!
//! A user submits a word, the word is sent to a remote sentiment classifier,
//! and the verdict is kept around along with a short history, a list of
//! recently used words and a couple of transient notification flags.
//!
//! [`controller::RequestController`] owns all of that state. Everything it
//! touches outside the process (the classifier, the clipboard, haptics) sits
//! behind a trait so the front-end can pick real adapters and tests can pick
//! fakes.

pub mod api;
pub mod clipboard;
pub mod controller;
pub mod effects;
pub mod error;
pub mod history;
pub mod notify;
pub mod query;
pub mod recent;
pub mod result;
pub mod settings;

pub use api::{HttpPredictor, PredictionService};
pub use clipboard::{Clipboard, ClipboardExporter};
pub use controller::{RequestController, SessionSnapshot};
pub use effects::{Haptics, NoHaptics};
pub use error::{CapabilityError, PredictError};
pub use history::{HistoryEntry, HistoryLog};
pub use notify::{Flag, NotificationTimer};
pub use query::{EXAMPLE_WORDS, Query};
pub use recent::RecentWords;
pub use result::{ConfidenceTier, CurrentResult, PredictionResult, ResultStore, Sentiment};
pub use settings::Settings;
