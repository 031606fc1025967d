//! Transient notification flags.
//!
//! A flag is switched on by [`NotificationTimer::trigger`] and switches itself
//! off once its window has elapsed. Triggering a flag that is already on
//! restarts the window rather than stacking a second one: the pending clear is
//! aborted and replaced, and every clear task carries the generation it was
//! scheduled for, so a clear that already woke up can still tell it lost the
//! race and must leave the flag alone.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use serde::Serialize;
use tokio::task::JoinHandle;

pub const DEFAULT_COPY_CONFIRMATION: Duration = Duration::from_millis(2000);
pub const DEFAULT_CELEBRATION: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Flag {
    /// "Copied!" after a clipboard export.
    CopyConfirmation,
    /// Celebration cue after a high-confidence positive result.
    Celebration,
}

/// How long each flag stays on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagDurations {
    pub copy_confirmation: Duration,
    pub celebration: Duration,
}

impl FlagDurations {
    pub fn of(&self, flag: Flag) -> Duration {
        match flag {
            Flag::CopyConfirmation => self.copy_confirmation,
            Flag::Celebration => self.celebration,
        }
    }
}

impl Default for FlagDurations {
    fn default() -> Self {
        Self {
            copy_confirmation: DEFAULT_COPY_CONFIRMATION,
            celebration: DEFAULT_CELEBRATION,
        }
    }
}

struct ActiveFlag {
    generation: u64,
    clear: JoinHandle<()>,
}

#[derive(Default)]
struct Flags {
    active: HashMap<Flag, ActiveFlag>,
    generation: u64,
}

/// Debounced, auto-expiring boolean flags.
///
/// Cheap to clone; clones share the same flags. Triggering spawns a tokio task,
/// so it must happen inside a runtime.
#[derive(Clone)]
pub struct NotificationTimer {
    flags: Arc<Mutex<Flags>>,
    durations: FlagDurations,
}

impl NotificationTimer {
    pub fn new(durations: FlagDurations) -> Self {
        Self {
            flags: Arc::new(Mutex::new(Flags::default())),
            durations,
        }
    }

    pub fn durations(&self) -> FlagDurations {
        self.durations
    }

    /// Turn `flag` on and (re)start its expiry window.
    pub fn trigger(&self, flag: Flag) {
        let mut flags = lock(&self.flags);

        flags.generation += 1;
        let generation = flags.generation;

        if let Some(previous) = flags.active.remove(&flag) {
            previous.clear.abort();
        }

        let clear = tokio::spawn(expire(
            Arc::clone(&self.flags),
            flag,
            generation,
            self.durations.of(flag),
        ));

        flags.active.insert(flag, ActiveFlag { generation, clear });
        tracing::trace!(?flag, generation, "notification triggered");
    }

    pub fn is_active(&self, flag: Flag) -> bool {
        lock(&self.flags).active.contains_key(&flag)
    }
}

impl Default for NotificationTimer {
    fn default() -> Self {
        Self::new(FlagDurations::default())
    }
}

impl std::fmt::Debug for NotificationTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationTimer")
            .field("durations", &self.durations)
            .finish_non_exhaustive()
    }
}

async fn expire(flags: Arc<Mutex<Flags>>, flag: Flag, generation: u64, after: Duration) {
    tokio::time::sleep(after).await;

    let mut flags = lock(&flags);
    if flags
        .active
        .get(&flag)
        .is_some_and(|active| active.generation == generation)
    {
        flags.active.remove(&flag);
        tracing::trace!(?flag, generation, "notification expired");
    }
}

// The lock is only ever held for a few map operations, so a poisoned mutex
// still holds consistent data.
fn lock(flags: &Mutex<Flags>) -> MutexGuard<'_, Flags> {
    flags.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
