// Recognition loop wiring
// Couples a streaming detector, a label table, and an event sink into the
// per-inference-result loop the sensor applications run

use crate::detector::config::{ConfigError, DetectorConfig};
use crate::detector::smoother::{DetectorError, StreamingEventDetector};
use crate::detector::types::{Detection, ScoreFrame};
use crate::output::event::{CategoryLabels, Event};
use crate::output::sink::EventSink;

/// Runs the detector on each inference result and forwards every debounced
/// new event to the sink; non-event detections are only returned
pub struct Recognizer<S: EventSink> {
    detector: StreamingEventDetector,
    labels: CategoryLabels,
    sink: S,
}

impl<S: EventSink> Recognizer<S> {
    /// Build a recognizer; fails only on invalid detector configuration
    pub fn new(
        config: DetectorConfig,
        labels: CategoryLabels,
        sink: S,
    ) -> Result<Self, ConfigError> {
        Ok(Recognizer {
            detector: StreamingEventDetector::new(config)?,
            labels,
            sink,
        })
    }

    /// Process one inference result, dispatching to the sink on new events
    /// Detector errors propagate unchanged; the sample is dropped
    pub fn push(
        &mut self,
        timestamp_ms: u64,
        frame: ScoreFrame,
    ) -> Result<Detection, DetectorError> {
        let detection = self.detector.process(timestamp_ms, frame)?;

        if detection.is_new_event {
            let event = Event::new(
                detection.category,
                self.labels.get(detection.category),
                detection.confidence,
                timestamp_ms,
            );
            self.sink.handle(&event);
        }

        Ok(detection)
    }

    pub fn detector(&self) -> &StreamingEventDetector {
        &self.detector
    }

    pub fn labels(&self) -> &CategoryLabels {
        &self.labels
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}
