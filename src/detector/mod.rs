// Streaming detection module
// Sliding-window score averaging and hysteresis-based event detection

pub mod config;
pub mod smoother;
pub mod types;
pub mod window;

pub use config::{ConfigError, DetectorConfig};
pub use smoother::{DetectorError, StreamingEventDetector};
pub use types::{Detection, Sample, ScoreFrame};
pub use window::SampleWindow;
