// Eventide - streaming smoothing and debouncing for noisy sensor event streams
// Module declarations

pub mod counting;
pub mod detector;
pub mod motion;
pub mod output;

pub use counting::{CountingConfig, PeopleCounter, Zone, ZoneEvent, ZoneStatus};
pub use detector::{
    ConfigError, Detection, DetectorConfig, DetectorError, ScoreFrame, StreamingEventDetector,
};
pub use motion::{MotionConfig, MotionDebouncer, MotionVerdict};
pub use output::{CategoryLabels, Event, EventSink, JsonlSink, LogSink, MemorySink, Recognizer};
