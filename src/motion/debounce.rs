// Movement debouncing
// Counts motion-flagged samples per observation batch and reports movement
// only when enough of a batch was flagged, with a quiet break period after
// every detection

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a motion configuration fails validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MotionConfigError {
    #[error("sample_count_threshold must be greater than zero")]
    ZeroSampleCount,

    #[error("movement_count_threshold cannot exceed sample_count_threshold")]
    MovementCountExceedsBatch,
}

/// Configuration for the movement debouncer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotionConfig {
    /// Samples per observation batch
    pub sample_count_threshold: u32,

    /// Flagged samples required within one batch to report movement
    pub movement_count_threshold: u32,

    /// Samples consumed without counting after a detection, before the
    /// next batch starts
    pub break_sample_count: u32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        MotionConfig {
            sample_count_threshold: 10,
            movement_count_threshold: 3,
            break_sample_count: 0,
        }
    }
}

impl MotionConfig {
    pub fn validate(&self) -> Result<(), MotionConfigError> {
        if self.sample_count_threshold == 0 {
            return Err(MotionConfigError::ZeroSampleCount);
        }
        if self.movement_count_threshold > self.sample_count_threshold {
            return Err(MotionConfigError::MovementCountExceedsBatch);
        }
        Ok(())
    }
}

/// Outcome of a single observation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionVerdict {
    /// Batch not complete yet, or inside a post-detection break
    Pending,

    /// Enough flagged samples in the completed batch
    Detected,

    /// Batch completed below the movement count
    NotDetected,
}

/// Batch debouncer for boolean motion samples
/// All counters are instance fields; two debouncers never interfere
#[derive(Debug)]
pub struct MotionDebouncer {
    config: MotionConfig,
    sample_counter: u32,
    movement_counter: u32,
    break_remaining: u32,
}

impl MotionDebouncer {
    pub fn new(config: MotionConfig) -> Result<Self, MotionConfigError> {
        config.validate()?;
        Ok(MotionDebouncer {
            config,
            sample_counter: 0,
            movement_counter: 0,
            break_remaining: 0,
        })
    }

    /// Feed one motion sample; a verdict is returned once per completed batch
    pub fn observe(&mut self, moving: bool) -> MotionVerdict {
        if self.break_remaining > 0 {
            self.break_remaining -= 1;
            return MotionVerdict::Pending;
        }

        self.sample_counter += 1;
        if moving {
            self.movement_counter += 1;
        }

        if self.sample_counter < self.config.sample_count_threshold {
            return MotionVerdict::Pending;
        }

        // Batch complete: decide and reset the counters for the next one.
        let detected = self.movement_counter >= self.config.movement_count_threshold;
        self.sample_counter = 0;
        self.movement_counter = 0;

        if detected {
            log::debug!("movement detected");
            self.break_remaining = self.config.break_sample_count;
            MotionVerdict::Detected
        } else {
            MotionVerdict::NotDetected
        }
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    /// Observations still swallowed by the current break period
    pub fn break_remaining(&self) -> u32 {
        self.break_remaining
    }
}
