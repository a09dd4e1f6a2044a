// Event output module
// Debounced event records, label resolution, and emit-event collaborators

pub mod event;
pub mod recognizer;
pub mod sink;

pub use event::{CategoryLabels, Event};
pub use recognizer::Recognizer;
pub use sink::{read_event_file, EventSink, JsonlSink, LogSink, MemorySink, SinkError};
