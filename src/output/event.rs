// Debounced event records and category labels
// The shape handed to emit-event collaborators once a detection fires

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Human-readable labels for the detector's category indices
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryLabels {
    labels: Vec<String>,
}

impl CategoryLabels {
    pub fn new(labels: Vec<String>) -> Self {
        CategoryLabels { labels }
    }

    /// Build a label table from string slices
    pub fn from_slices(labels: &[&str]) -> Self {
        CategoryLabels {
            labels: labels.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Label for a category index; "?" if no corresponding label was found
    pub fn get(&self, index: usize) -> &str {
        self.labels.get(index).map(String::as_str).unwrap_or("?")
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// A reported, debounced transition to a new stable category
/// Distinct from a per-sample raw classification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier for this event
    pub id: Uuid,

    /// Winning category index
    pub category: usize,

    /// Resolved category label
    pub label: String,

    /// Averaged score at detection time [0, 255]
    pub confidence: u8,

    /// Monotonic stream timestamp of the detection, in milliseconds
    pub timestamp_ms: u64,

    /// Wall-clock detection time (ISO 8601)
    pub detected_at: String,
}

impl Event {
    /// Create a new event with generated UUID and current wall-clock time
    pub fn new(category: usize, label: &str, confidence: u8, timestamp_ms: u64) -> Self {
        Event {
            id: Uuid::new_v4(),
            category,
            label: label.to_string(),
            confidence,
            timestamp_ms,
            detected_at: Utc::now().to_rfc3339(),
        }
    }

    /// Serialize to JSON line (with newline)
    pub fn to_json_line(&self) -> Result<String, serde_json::Error> {
        let json = serde_json::to_string(self)?;
        Ok(format!("{}\n", json))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_lookup() {
        let labels = CategoryLabels::from_slices(&["idle", "wave", "point"]);
        assert_eq!(labels.len(), 3);
        assert_eq!(labels.get(1), "wave");
        assert_eq!(labels.get(7), "?");
    }

    #[test]
    fn test_empty_labels_fall_back() {
        let labels = CategoryLabels::new(Vec::new());
        assert!(labels.is_empty());
        assert_eq!(labels.get(0), "?");
    }

    #[test]
    fn test_event_creation() {
        let event = Event::new(2, "point", 210, 1500);
        assert_eq!(event.category, 2);
        assert_eq!(event.label, "point");
        assert_eq!(event.confidence, 210);
        assert_eq!(event.timestamp_ms, 1500);
        assert!(!event.detected_at.is_empty());
    }

    #[test]
    fn test_json_line_format() {
        let event = Event::new(0, "idle", 180, 42);
        let json_line = event.to_json_line().unwrap();

        // Should end with newline and parse back cleanly.
        assert!(json_line.ends_with('\n'));
        let parsed: Event = serde_json::from_str(json_line.trim()).unwrap();
        assert_eq!(parsed.id, event.id);
        assert_eq!(parsed.label, "idle");
    }
}
