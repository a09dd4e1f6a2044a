// Event sinks
// Pluggable emit-event collaborators: logging, in-memory buffering, and an
// append-only JSONL log for offline inspection

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::output::event::Event;

/// Errors that can occur while persisting events
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Consumer of debounced events
/// Implementations must not block; delivery happens inline on the
/// processing call
pub trait EventSink {
    fn handle(&mut self, event: &Event);
}

/// Reports each event through the logging facade
#[derive(Debug, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn handle(&mut self, event: &Event) {
        log::info!(
            "detected class={} label={} score={} @{}ms",
            event.category,
            event.label,
            event.confidence,
            event.timestamp_ms
        );
    }
}

/// Buffers events in memory, for tests and batch consumers
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Vec<Event>,
}

impl MemorySink {
    pub fn new() -> Self {
        MemorySink { events: Vec::new() }
    }

    /// All events received so far, in arrival order
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Drain the buffered events
    pub fn take(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}

impl EventSink for MemorySink {
    fn handle(&mut self, event: &Event) {
        self.events.push(event.clone());
    }
}

/// Appends each event as one JSON line to a file
/// Creates the file on first write
pub struct JsonlSink {
    file_path: PathBuf,
}

impl JsonlSink {
    pub fn new(file_path: PathBuf) -> Self {
        JsonlSink { file_path }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn append(&self, event: &Event) -> Result<(), SinkError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.file_path)?;

        let json_line = event.to_json_line()?;
        file.write_all(json_line.as_bytes())?;
        file.flush()?;

        Ok(())
    }
}

impl EventSink for JsonlSink {
    fn handle(&mut self, event: &Event) {
        // Delivery is fire-and-forget; a failed write must not take the
        // detection loop down with it.
        if let Err(e) = self.append(event) {
            log::error!("failed to append event to {:?}: {}", self.file_path, e);
        }
    }
}

/// Read events back from a JSONL file
pub fn read_event_file(path: &Path) -> Result<Vec<Event>, SinkError> {
    let contents = std::fs::read_to_string(path)?;
    let mut events = Vec::new();

    for line in contents.lines() {
        if line.trim().is_empty() {
            continue;
        }

        let event: Event = serde_json::from_str(line)?;
        events.push(event);
    }

    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_sink_buffers_in_order() {
        let mut sink = MemorySink::new();
        sink.handle(&Event::new(0, "idle", 180, 10));
        sink.handle(&Event::new(1, "wave", 220, 20));

        assert_eq!(sink.events().len(), 2);
        assert_eq!(sink.events()[0].label, "idle");
        assert_eq!(sink.events()[1].label, "wave");

        let taken = sink.take();
        assert_eq!(taken.len(), 2);
        assert!(sink.events().is_empty());
    }

    #[test]
    fn test_jsonl_sink_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("events.jsonl");

        let mut sink = JsonlSink::new(path.clone());
        sink.handle(&Event::new(0, "idle", 160, 100));
        sink.handle(&Event::new(2, "point", 240, 350));

        let events = read_event_file(&path).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].timestamp_ms, 100);
        assert_eq!(events[1].label, "point");
        assert_eq!(events[1].confidence, 240);
    }

    #[test]
    fn test_log_sink_does_not_panic() {
        let mut sink = LogSink;
        sink.handle(&Event::new(1, "wave", 200, 5));
    }
}
