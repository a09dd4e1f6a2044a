// Detector types
// Score frame encodings, stored samples, and per-call detection results

use serde::{Deserialize, Serialize};

/// One incoming score vector, one value per category
/// Mirrors the two encodings classifiers hand us in practice
#[derive(Debug, Clone, Copy)]
pub enum ScoreFrame<'a> {
    /// Raw class probabilities in [0.0, 1.0]
    /// Scaled to the 0-255 fixed-point domain by truncation
    Probabilities(&'a [f32]),

    /// Scores already on the 0-255 scale (e.g. a quantized model output)
    Quantized(&'a [u8]),
}

impl ScoreFrame<'_> {
    /// Number of category scores in the frame
    pub fn len(&self) -> usize {
        match self {
            ScoreFrame::Probabilities(values) => values.len(),
            ScoreFrame::Quantized(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A single timestamped sample held in the averaging window
/// Immutable once stored
#[derive(Debug, Clone)]
pub struct Sample {
    /// Monotonic timestamp in milliseconds
    pub timestamp_ms: u64,

    /// Quantized scores, one per category, 0-255
    pub scores: Box<[u8]>,
}

/// Result of processing one sample through the detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Detection {
    /// Index of the winning category
    pub category: usize,

    /// Averaged score of the winning category [0, 255]
    /// Zero when the window held too few samples to trust
    pub confidence: u8,

    /// True only when a debounced new event fired on this call
    pub is_new_event: bool,
}
