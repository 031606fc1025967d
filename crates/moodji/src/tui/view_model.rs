//! View model for the interactive UI.
//!
//! [`Blocks::from_state`] turns a session snapshot plus the UI-only state
//! into a list of blocks. Rendering never looks at the controller directly.

use moodji_client::{ConfidenceTier, HistoryEntry, Sentiment, SessionSnapshot};

use super::state::AppState;

/// Transient banners shown under a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Celebration,
    Copied,
}

impl BannerKind {
    pub fn text(&self) -> &'static str {
        match self {
            BannerKind::Celebration => "🎉 That's a happy word!",
            BannerKind::Copied => "Copied to clipboard",
        }
    }
}

/// Content variants for blocks - each variant is fully self-describing
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Input {
        text: String,
        /// Cursor position in chars
        cursor: usize,
        /// A request is in flight, keys other than Esc are ignored
        locked: bool,
    },
    /// Shown when nothing has been asked yet
    Hint {
        text: String,
    },
    Spinner {
        frame: usize,
        status_text: String,
    },
    Error {
        message: String,
    },
    Verdict {
        emoji: String,
        word: String,
        sentiment: Sentiment,
        percent: u32,
        tier: ConfidenceTier,
    },
    Banner {
        kind: BannerKind,
    },
    Recent {
        words: Vec<String>,
    },
    Stats {
        words_analyzed: usize,
        positive_rate: u32,
    },
    HistoryRow {
        entry: HistoryEntry,
    },
}

impl Content {
    /// Get the prefix symbol for this content type
    pub fn prefix_symbol(&self) -> &'static str {
        match self {
            Content::Input { .. } => ">",
            Content::Hint { .. } => " ",
            Content::Spinner { .. } => "/",
            Content::Error { .. } => "!",
            Content::Verdict { .. } => "=",
            Content::Banner { .. } => "*",
            Content::Recent { .. } => "~",
            Content::Stats { .. } => "#",
            Content::HistoryRow { .. } => "-",
        }
    }
}

/// A visual block in the UI
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub content: Vec<Content>,
    pub separator_above: bool,
    pub title: Option<String>,
}

impl Block {
    fn new(content: Vec<Content>) -> Self {
        Self {
            content,
            separator_above: false,
            title: None,
        }
    }
}

/// Complete view model: everything the renderer draws
#[derive(Debug, Clone, PartialEq)]
pub struct Blocks {
    pub items: Vec<Block>,
    pub footer: &'static str,
}

impl Blocks {
    /// Pure function: derive the complete view model from state
    pub fn from_state(session: &SessionSnapshot, state: &AppState) -> Self {
        let mut items = Vec::new();

        // 1. Input line
        items.push(Block::new(vec![Content::Input {
            text: state.input.clone(),
            cursor: state.cursor,
            locked: session.loading,
        }]));

        // 2. Whatever the last submission produced
        if let Some(block) = Self::outcome_block(session) {
            items.push(block);
        }

        // 3. Recent words, newest first
        if !session.recent.is_empty() {
            items.push(Block::new(vec![Content::Recent {
                words: session.recent.clone(),
            }]));
        }

        // 4. Stats, with the full history when expanded
        if !session.history.is_empty() {
            let mut content = vec![Content::Stats {
                words_analyzed: session.words_analyzed,
                positive_rate: session.positive_rate,
            }];
            if state.show_history {
                content.extend(
                    session
                        .history
                        .iter()
                        .cloned()
                        .map(|entry| Content::HistoryRow { entry }),
                );
            }
            items.push(Block::new(content));
        }

        for (idx, block) in items.iter_mut().enumerate() {
            block.separator_above = idx > 0;
        }

        if let Some(first) = items.first_mut() {
            first.title = Some("Mood Emoji AI: what mood is your word in?".to_string());
        }

        let footer = Self::footer(session, state);

        Self { items, footer }
    }

    fn outcome_block(session: &SessionSnapshot) -> Option<Block> {
        if session.loading {
            return Some(Block::new(vec![Content::Spinner {
                frame: 0,
                status_text: "Reading the mood...".to_string(),
            }]));
        }

        if let Some(message) = &session.error {
            return Some(Block::new(vec![Content::Error {
                message: message.clone(),
            }]));
        }

        if let Some(current) = &session.result {
            let prediction = &current.prediction;
            let mut content = vec![Content::Verdict {
                emoji: prediction.emoji.clone(),
                word: current.word.clone(),
                sentiment: prediction.sentiment,
                percent: prediction.percent(),
                tier: prediction.tier(),
            }];
            if session.celebrating {
                content.push(Content::Banner {
                    kind: BannerKind::Celebration,
                });
            }
            if session.copied {
                content.push(Content::Banner {
                    kind: BannerKind::Copied,
                });
            }
            return Some(Block::new(content));
        }

        if session.history.is_empty() {
            return Some(Block::new(vec![Content::Hint {
                text: "Type a word and press Enter, or Tab for an example".to_string(),
            }]));
        }

        None
    }

    fn footer(session: &SessionSnapshot, state: &AppState) -> &'static str {
        if session.loading {
            "[Esc]: Quit"
        } else if session.result.is_some() {
            "[^Y]: Copy  [^L]: Clear  [^O]: History  [Esc]: Quit"
        } else if state.show_history {
            "[^O]: Hide  [^R]: Clear recent  [^X]: Forget all  [Esc]: Quit"
        } else {
            "[Enter]: Ask  [Tab]: Example  [^O]: History  [Esc]: Quit"
        }
    }

    /// Set the spinner frame on any spinner content. Kept out of
    /// `from_state` so the snapshot alone decides what is shown.
    pub fn with_spinner_frame(mut self, frame: usize) -> Self {
        for block in &mut self.items {
            for content in &mut block.content {
                if let Content::Spinner { frame: f, .. } = content {
                    *f = frame;
                }
            }
        }
        self
    }
}
