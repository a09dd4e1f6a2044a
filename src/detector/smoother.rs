// Streaming event smoothing
// Averages classifier scores over a bounded time window and applies a
// threshold-plus-suppression policy to report stable, debounced detections

use thiserror::Error;

use crate::detector::config::{ConfigError, DetectorConfig};
use crate::detector::types::{Detection, Sample, ScoreFrame};
use crate::detector::window::SampleWindow;

/// Consecutive under-filled windows between repeated warnings
const MIN_COUNT_WARN_INTERVAL: u32 = 10;

/// Errors that can occur while processing a sample
/// Both are recoverable: the offending sample is dropped and detector state
/// is left untouched
#[derive(Debug, Error)]
pub enum DetectorError {
    #[error(
        "samples must arrive in non-decreasing time order, \
         received {received_ms}ms after {newest_ms}ms"
    )]
    OutOfOrder { received_ms: u64, newest_ms: u64 },

    #[error("unsupported score format: {reason}")]
    UnsupportedFormat { reason: String },
}

/// Turns a noisy stream of per-category scores into stable discrete events
///
/// Each processed sample joins a sliding time window; scores are averaged
/// per category across the window and the winning category is reported.
/// A new event fires only when the winning average clears the detection
/// threshold and no suppression period is active, so a single noisy
/// inference result cannot flap the output.
pub struct StreamingEventDetector {
    config: DetectorConfig,
    window: SampleWindow,

    previous_top_category: usize,
    previous_top_time_ms: u64,
    suppression_remaining: u32,

    /// Throttles the too-few-samples warning; an instance field so two
    /// detectors never share diagnostic state
    consecutive_min_count: u32,
}

impl StreamingEventDetector {
    /// Create a detector with the given configuration
    /// Fails if the configuration violates its construction constraints
    pub fn new(config: DetectorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(StreamingEventDetector {
            config,
            window: SampleWindow::new(),
            previous_top_category: 0,
            previous_top_time_ms: 0,
            suppression_remaining: 0,
            consecutive_min_count: 0,
        })
    }

    /// Process one inference result
    ///
    /// Timestamps must be non-decreasing across calls. An out-of-order
    /// sample or an unreadable score frame is rejected without mutating
    /// any detector state; the caller should drop it and continue.
    pub fn process(
        &mut self,
        timestamp_ms: u64,
        frame: ScoreFrame,
    ) -> Result<Detection, DetectorError> {
        if let Some(newest_ms) = self.window.newest_timestamp() {
            if timestamp_ms < newest_ms {
                return Err(DetectorError::OutOfOrder {
                    received_ms: timestamp_ms,
                    newest_ms,
                });
            }
        }

        let scores = self.quantize(frame)?;

        self.window.push(Sample {
            timestamp_ms,
            scores,
        });
        self.window
            .evict_older_than(timestamp_ms.saturating_sub(self.config.window_duration_ms));

        // With too few samples the average is not trustworthy; report the
        // last stable category with zero confidence and leave the
        // suppression state alone.
        if self.window.len() < self.config.minimum_sample_count {
            self.consecutive_min_count += 1;
            if self.consecutive_min_count % MIN_COUNT_WARN_INTERVAL == 0 {
                log::warn!(
                    "too few samples for averaging ({} of {} required); decrease \
                     minimum_sample_count or increase window_duration_ms",
                    self.window.len(),
                    self.config.minimum_sample_count
                );
            }
            return Ok(Detection {
                category: self.previous_top_category,
                confidence: 0,
                is_new_event: false,
            });
        }
        self.consecutive_min_count = 0;

        let averages = self.window.average_scores(self.config.category_count);

        // Highest average wins; ties keep the lowest category index.
        let mut top_category = 0usize;
        let mut top_score = 0u32;
        for (category, &average) in averages.iter().enumerate() {
            if average > top_score {
                top_score = average;
                top_category = category;
            }
        }

        // A detection shortly after another label triggered is assumed to be
        // a bad result; a contrary winner has to persist through the whole
        // suppression period before it may fire.
        let mut is_new_event = false;
        if top_score >= u32::from(self.config.detection_threshold) {
            if self.suppression_remaining > 0 {
                if top_category != self.previous_top_category {
                    self.suppression_remaining -= 1;
                }
            } else {
                self.suppression_remaining = self.config.suppression_count;
                self.previous_top_category = top_category;
                self.previous_top_time_ms = timestamp_ms;
                is_new_event = true;
            }
        }

        Ok(Detection {
            category: top_category,
            confidence: top_score as u8,
            is_new_event,
        })
    }

    /// Convert an incoming frame to the 0-255 fixed-point domain
    /// Probabilities are scaled by 255 and truncated; anything that cannot
    /// be normalized is rejected outright
    fn quantize(&self, frame: ScoreFrame) -> Result<Box<[u8]>, DetectorError> {
        let expected = self.config.category_count;
        if frame.len() != expected {
            return Err(DetectorError::UnsupportedFormat {
                reason: format!(
                    "expected {} category scores, got {}",
                    expected,
                    frame.len()
                ),
            });
        }

        match frame {
            ScoreFrame::Probabilities(values) => {
                let mut scores = Vec::with_capacity(expected);
                for &value in values {
                    // NaN fails the range check as well.
                    if !(0.0..=1.0).contains(&value) {
                        return Err(DetectorError::UnsupportedFormat {
                            reason: format!("probability {} outside the 0.0-1.0 range", value),
                        });
                    }
                    scores.push((value * 255.0) as u8);
                }
                Ok(scores.into_boxed_slice())
            }
            ScoreFrame::Quantized(values) => Ok(values.to_vec().into_boxed_slice()),
        }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Number of samples currently held in the averaging window
    pub fn window_len(&self) -> usize {
        self.window.len()
    }

    /// Category of the last reported event
    pub fn previous_top_category(&self) -> usize {
        self.previous_top_category
    }

    /// Timestamp of the last reported event
    pub fn previous_top_time_ms(&self) -> u64 {
        self.previous_top_time_ms
    }

    /// Contrary winning results still required before the next event
    pub fn suppression_remaining(&self) -> u32 {
        self.suppression_remaining
    }
}
