//! Side effects that follow a prediction or an export.

use crate::error::CapabilityError;
use crate::result::{PredictionResult, Sentiment};

/// Results above this confidence (and positive) earn a celebration.
pub const CELEBRATION_THRESHOLD: f64 = 0.8;

/// Pulse, pause, pulse: played after every successful prediction.
pub const SUCCESS_PATTERN: &[u64] = &[50, 30, 50];

/// A single short pulse: played after a clipboard export.
pub const COPY_PATTERN: &[u64] = &[100];

pub fn should_celebrate(result: &PredictionResult) -> bool {
    result.sentiment == Sentiment::Positive && result.confidence > CELEBRATION_THRESHOLD
}

/// Haptic feedback capability.
///
/// `pattern` alternates pulse and pause durations in milliseconds, starting
/// with a pulse. Implementations that can't vibrate should return `Ok(())`
/// rather than an error; errors are for devices that exist but failed.
pub trait Haptics: Send + Sync {
    fn vibrate(&self, pattern: &[u64]) -> Result<(), CapabilityError>;
}

/// For platforms without any haptic device.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHaptics;

impl Haptics for NoHaptics {
    fn vibrate(&self, _pattern: &[u64]) -> Result<(), CapabilityError> {
        Ok(())
    }
}

/// Fire a pattern and forget about it. Failures are only logged.
pub(crate) fn pulse(haptics: &dyn Haptics, pattern: &[u64]) {
    if let Err(e) = haptics.vibrate(pattern) {
        tracing::warn!("haptic feedback failed: {e}");
    }
}
